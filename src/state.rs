use shotlist_backend::search::SearchEngine;
use shotlist_backend::store::SqliteItemStore;

/// Shared application state / 应用状态
pub struct AppState {
    pub engine: SearchEngine<SqliteItemStore>,
}

impl AppState {
    pub fn new(store: SqliteItemStore, log_queries: bool) -> Self {
        Self {
            engine: SearchEngine::new(store).log_queries(log_queries),
        }
    }

    pub fn store(&self) -> &SqliteItemStore {
        self.engine.store()
    }
}
