//! Pipeline status codes / 流程状态码
//!
//! The string codes are what the store holds in `status` fields and must not change.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCode {
    None,
    Hold,
    Done,
    Out,
    Assign,
    Ready,
    Wip,
    Confirm,
    Omit,
}

impl StatusCode {
    /// Stored code / 存储值
    pub fn code(self) -> &'static str {
        match self {
            StatusCode::None => "0",
            StatusCode::Hold => "1",
            StatusCode::Done => "2",
            StatusCode::Out => "3",
            StatusCode::Assign => "4",
            StatusCode::Ready => "5",
            StatusCode::Wip => "6",
            StatusCode::Confirm => "7",
            StatusCode::Omit => "8",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StatusCode::None => "none",
            StatusCode::Hold => "hold",
            StatusCode::Done => "done",
            StatusCode::Out => "out",
            StatusCode::Assign => "assign",
            StatusCode::Ready => "ready",
            StatusCode::Wip => "wip",
            StatusCode::Confirm => "confirm",
            StatusCode::Omit => "omit",
        }
    }

    /// Parse a status name, ignoring case / 解析状态名
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "none" => Some(StatusCode::None),
            "hold" => Some(StatusCode::Hold),
            "done" => Some(StatusCode::Done),
            "out" => Some(StatusCode::Out),
            "assign" => Some(StatusCode::Assign),
            "ready" => Some(StatusCode::Ready),
            "wip" => Some(StatusCode::Wip),
            "confirm" => Some(StatusCode::Confirm),
            "omit" => Some(StatusCode::Omit),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(StatusCode::None),
            "1" => Some(StatusCode::Hold),
            "2" => Some(StatusCode::Done),
            "3" => Some(StatusCode::Out),
            "4" => Some(StatusCode::Assign),
            "5" => Some(StatusCode::Ready),
            "6" => Some(StatusCode::Wip),
            "7" => Some(StatusCode::Confirm),
            "8" => Some(StatusCode::Omit),
            _ => None,
        }
    }
}

/// Status checkboxes from the search form / 搜索表单的状态复选框
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusFlags {
    pub assign: bool,
    pub ready: bool,
    pub wip: bool,
    pub confirm: bool,
    pub done: bool,
    pub omit: bool,
    pub hold: bool,
    pub out: bool,
    pub none: bool,
}

impl StatusFlags {
    /// Every checkbox on
    pub fn all() -> Self {
        Self {
            assign: true,
            ready: true,
            wip: true,
            confirm: true,
            done: true,
            omit: true,
            hold: true,
            out: true,
            none: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    /// Active statuses in form order
    pub fn active(&self) -> Vec<StatusCode> {
        [
            (self.assign, StatusCode::Assign),
            (self.ready, StatusCode::Ready),
            (self.wip, StatusCode::Wip),
            (self.confirm, StatusCode::Confirm),
            (self.done, StatusCode::Done),
            (self.omit, StatusCode::Omit),
            (self.hold, StatusCode::Hold),
            (self.out, StatusCode::Out),
            (self.none, StatusCode::None),
        ]
        .into_iter()
        .filter_map(|(on, status)| on.then_some(status))
        .collect()
    }

    pub fn set(&mut self, status: StatusCode, on: bool) {
        match status {
            StatusCode::Assign => self.assign = on,
            StatusCode::Ready => self.ready = on,
            StatusCode::Wip => self.wip = on,
            StatusCode::Confirm => self.confirm = on,
            StatusCode::Done => self.done = on,
            StatusCode::Omit => self.omit = on,
            StatusCode::Hold => self.hold = on,
            StatusCode::Out => self.out = on,
            StatusCode::None => self.none = on,
        }
    }

    pub fn with(mut self, status: StatusCode) -> Self {
        self.set(status, true);
        self
    }
}
