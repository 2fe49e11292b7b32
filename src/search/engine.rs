//! Search engine - runs translated queries against the item store / 搜索引擎
//!
//! Flow for one request:
//! - empty phrase, no status checkbox or no content token: empty result, store untouched
//! - open a session (released when it goes out of scope)
//! - default the project, load the task vocabulary
//! - translate and execute

use crate::models::Item;
use crate::store::{ItemStore, StoreError, StoreSession};

use super::compose::translate;
use super::schema::SearchOption;
use super::tokenizer::tokenize;

pub struct SearchEngine<S> {
    store: S,
    log_queries: bool,
}

impl<S: ItemStore> SearchEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store, log_queries: false }
    }

    /// Log every composed query at debug level
    pub fn log_queries(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Search items / 搜索条目
    pub async fn search(&self, option: &SearchOption) -> Result<Vec<Item>, StoreError> {
        if option.searchword.is_empty() || option.status.is_empty() {
            return Ok(Vec::new());
        }
        if tokenize(&option.searchword, None).words.is_empty() {
            return Ok(Vec::new());
        }

        let mut session = self.store.connect().await?;

        let project = if option.project.is_empty() {
            let projects = session.project_list().await?;
            projects.into_iter().next().ok_or(StoreError::NoProject)?
        } else {
            option.project.clone()
        };

        let known_tasks = match session.task_names().await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Failed to load task names: {}", e);
                Vec::new()
            }
        };

        let Some(query) = translate(option, &known_tasks) else {
            return Ok(Vec::new());
        };
        if self.log_queries {
            tracing::debug!("search query for {}: {:?}", project, query);
        }

        match session.find(&project, &query).await {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::error!("Search failed for project {}: {}", project, e);
                Err(e)
            }
        }
    }
}
