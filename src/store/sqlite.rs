//! SQLite item store / SQLite 文档存储
//!
//! Tables:
//! - items: one JSON document per (project, id)
//! - projects: project names
//! - tasksettings: task vocabulary with display order

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqlitePool, SqlitePoolOptions};

use super::matcher::{matches, sort_documents};
use super::{ItemStore, StoreError, StoreSession};
use crate::models::Item;
use crate::search::filter::ComposedQuery;

#[derive(Clone)]
pub struct SqliteItemStore {
    db: SqlitePool,
}

impl SqliteItemStore {
    /// Use an existing pool
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Connect to a database URL / 连接数据库
    pub async fn connect_url(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let db = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(db))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }

    /// Create tables if missing / 初始化表结构
    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                project TEXT NOT NULL,
                id TEXT NOT NULL,
                doc TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (project, id)
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                name TEXT PRIMARY KEY,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasksettings (
                name TEXT PRIMARY KEY,
                sort_order INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    pub async fn add_project(&self, name: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT OR IGNORE INTO projects (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.db)
            .await?;
        Ok(())
    }

    pub async fn add_task_setting(&self, name: &str, sort_order: i64) -> Result<(), StoreError> {
        sqlx::query("INSERT OR REPLACE INTO tasksettings (name, sort_order) VALUES (?, ?)")
            .bind(name)
            .bind(sort_order)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// Insert or replace an item document
    pub async fn put_item(&self, project: &str, item: &Item) -> Result<(), StoreError> {
        let doc = serde_json::to_string(item)?;
        sqlx::query("INSERT OR REPLACE INTO items (project, id, doc, updated_at) VALUES (?, ?, ?, ?)")
            .bind(project)
            .bind(&item.id)
            .bind(doc)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    type Session = SqliteSession;

    async fn connect(&self) -> Result<Self::Session, StoreError> {
        let conn = self.db.acquire().await?;
        Ok(SqliteSession { conn })
    }
}

/// One pooled connection; returned to the pool on drop
pub struct SqliteSession {
    conn: PoolConnection<Sqlite>,
}

#[async_trait]
impl StoreSession for SqliteSession {
    async fn project_list(&mut self) -> Result<Vec<String>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM projects ORDER BY name")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn task_names(&mut self) -> Result<Vec<String>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM tasksettings ORDER BY sort_order, name")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn find(&mut self, project: &str, query: &ComposedQuery) -> Result<Vec<Item>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT doc FROM items WHERE project = ? ORDER BY rowid")
            .bind(project)
            .fetch_all(&mut *self.conn)
            .await?;

        let mut docs = Vec::new();
        for (doc,) in rows {
            let value: Value = serde_json::from_str(&doc)?;
            if matches(&query.filter, &value) {
                docs.push(value);
            }
        }
        sort_documents(&mut docs, &query.sort);

        tracing::debug!("project {}: {} items matched", project, docs.len());

        docs.into_iter()
            .map(|value| serde_json::from_value(value).map_err(StoreError::from))
            .collect()
    }
}
