//! Document store collaborator / 文档存储
//!
//! The search engine only talks to the store through [`ItemStore`] and
//! [`StoreSession`]. A session is released when it is dropped.

pub mod matcher;
pub mod sqlite;

use async_trait::async_trait;

use crate::models::Item;
use crate::search::filter::ComposedQuery;

pub use sqlite::SqliteItemStore;

/// Store errors / 存储错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no project available")]
    NoProject,
}

/// Opens sessions against the store
#[async_trait]
pub trait ItemStore: Send + Sync {
    type Session: StoreSession;

    async fn connect(&self) -> Result<Self::Session, StoreError>;
}

/// Read operations available on an open session
#[async_trait]
pub trait StoreSession: Send {
    /// Known projects, first one is the default
    async fn project_list(&mut self) -> Result<Vec<String>, StoreError>;

    /// Known task names, in display order
    async fn task_names(&mut self) -> Result<Vec<String>, StoreError>;

    /// Items of `project` matching the query, in query sort order
    async fn find(&mut self, project: &str, query: &ComposedQuery) -> Result<Vec<Item>, StoreError>;
}
