use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use shotlist_backend::store::{ItemStore, StoreSession};

use super::types::*;
use crate::api::ApiResponse;
use crate::state::AppState;

/// GET /api/v2/items - 搜索条目
pub async fn search_items(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<SearchResponse>> {
    let option = params.into_option();
    tracing::debug!("search: project={:?} searchword={:?}", option.project, option.searchword);

    match state.engine.search(&option).await {
        Ok(items) => {
            let total = items.len();
            Json(ApiResponse::success(SearchResponse { items, total }))
        }
        Err(e) => Json(ApiResponse::fail(500, &e.to_string())),
    }
}

/// GET /api/projects - 项目列表
pub async fn list_projects(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<String>>> {
    let result = match state.store().connect().await {
        Ok(mut session) => session.project_list().await,
        Err(e) => Err(e),
    };
    match result {
        Ok(projects) => Json(ApiResponse::success(projects)),
        Err(e) => {
            tracing::error!("Failed to list projects: {}", e);
            Json(ApiResponse::fail(500, &e.to_string()))
        }
    }
}
