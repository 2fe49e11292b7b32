//! Search request definition / 搜索请求定义

use serde::{Deserialize, Serialize};

use super::status::StatusFlags;

/// Search request options / 搜索选项
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOption {
    /// Project to search; empty means the first known project / 项目
    pub project: String,
    /// Raw search phrase / 搜索词
    pub searchword: String,
    /// Sort key name / 排序字段
    pub sortkey: String,
    /// Status checkboxes / 状态复选框
    #[serde(flatten)]
    pub status: StatusFlags,
    /// Task scope, added to any `task:` directives / 任务范围
    pub task: Option<String>,
}

impl SearchOption {
    pub fn new(project: impl Into<String>, searchword: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            searchword: searchword.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: StatusFlags) -> Self {
        self.status = status;
        self
    }

    pub fn with_sortkey(mut self, sortkey: impl Into<String>) -> Self {
        self.sortkey = sortkey.into();
        self
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }
}
