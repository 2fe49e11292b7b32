//! Item document shape / 镜头与资产文档结构
//!
//! Field names are the keys used inside the stored JSON documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shot or asset record / 镜头或资产
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub project: String,
    /// org / left / asset
    #[serde(rename = "type")]
    pub item_type: String,
    pub status: String,
    pub shottype: String,
    pub seq: String,
    pub cut: String,
    pub scanname: String,
    pub scantime: String,
    pub scanframe: i64,
    pub rnum: String,
    pub ddline2d: String,
    pub ddline3d: String,
    pub justtimecodein: String,
    pub justtimecodeout: String,
    pub scantimecodein: String,
    pub scantimecodeout: String,
    pub tag: Vec<String>,
    pub assettags: Vec<String>,
    pub comments: Vec<Comment>,
    pub sources: Vec<Link>,
    pub references: Vec<Link>,
    pub note: Comment,
    pub tasks: BTreeMap<String, Task>,
    pub updatetime: String,
}

/// Pipeline task state on an item / 任务状态
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub title: String,
    pub status: String,
    pub user: String,
    /// Deadline (RFC3339)
    pub date: String,
    /// Internal deadline (RFC3339)
    pub predate: String,
    /// Daily review date (RFC3339)
    pub mdate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub text: String,
    pub date: String,
    pub author: String,
}

/// Source or reference attachment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub title: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_uses_store_keys() {
        let mut item = Item::default();
        item.item_type = "org".to_string();
        item.tasks.insert("comp".to_string(), Task { status: "6".to_string(), ..Default::default() });

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "org");
        assert_eq!(value["tasks"]["comp"]["status"], "6");
    }

    #[test]
    fn test_item_missing_fields_default() {
        let item: Item = serde_json::from_str(r#"{"id":"SS_0010_org","scanframe":120}"#).unwrap();
        assert_eq!(item.id, "SS_0010_org");
        assert_eq!(item.scanframe, 120);
        assert!(item.tasks.is_empty());
        assert!(item.note.text.is_empty());
    }
}
