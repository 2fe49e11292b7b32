use serde::{Deserialize, Serialize};

use shotlist_backend::models::Item;
use shotlist_backend::search::{SearchOption, StatusFlags};
use shotlist_backend::utils::str2bool;

/// Query string of GET /api/v2/items / 搜索参数
///
/// Flags arrive as text (`true` / `1`), anything else counts as off.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub project: String,
    pub searchword: String,
    pub sortkey: String,
    pub task: String,
    pub assign: String,
    pub ready: String,
    pub wip: String,
    pub confirm: String,
    pub done: String,
    pub omit: String,
    pub hold: String,
    pub out: String,
    pub none: String,
}

impl SearchParams {
    pub fn into_option(self) -> SearchOption {
        let status = StatusFlags {
            assign: str2bool(&self.assign),
            ready: str2bool(&self.ready),
            wip: str2bool(&self.wip),
            confirm: str2bool(&self.confirm),
            done: str2bool(&self.done),
            omit: str2bool(&self.omit),
            hold: str2bool(&self.hold),
            out: str2bool(&self.out),
            none: str2bool(&self.none),
        };
        SearchOption {
            project: self.project,
            searchword: self.searchword,
            sortkey: self.sortkey,
            status,
            task: Some(self.task).filter(|t| !t.is_empty()),
        }
    }
}

/// 搜索响应
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub items: Vec<Item>,
    pub total: usize,
}
