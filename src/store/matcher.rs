//! Evaluate composed queries against JSON documents / 文档匹配
//!
//! Follows document-store semantics: arrays met along a path are flattened,
//! and a rule on an array holds when any element satisfies it. Only string
//! values take part in matching.

use serde_json::Value;
use std::cmp::Ordering;

use crate::search::filter::{Condition, Expr, FieldRef, MatchRule, SortKey};

/// Collect every value a field reference points at
pub fn resolve<'a>(doc: &'a Value, field: &FieldRef) -> Vec<&'a Value> {
    let mut out = Vec::new();
    match field {
        FieldRef::Item(path) => {
            let parts: Vec<&str> = path.split('.').collect();
            walk(doc, &parts, &mut out);
        }
        FieldRef::Task { task, field } => {
            if let Some(value) = doc
                .get("tasks")
                .and_then(|tasks| tasks.get(task.as_str()))
                .and_then(|t| t.get(field.key()))
            {
                out.push(value);
            }
        }
    }
    out
}

fn walk<'a>(value: &'a Value, path: &[&str], out: &mut Vec<&'a Value>) {
    let Some((head, rest)) = path.split_first() else {
        out.push(value);
        return;
    };
    match value {
        Value::Object(map) => {
            if let Some(next) = map.get(*head) {
                walk(next, rest, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, path, out);
            }
        }
        _ => {}
    }
}

fn rule_matches(rule: &MatchRule, text: &str) -> bool {
    match rule {
        MatchRule::Equals(expected) => text == expected,
        MatchRule::Contains { needle, case_insensitive: true } => {
            text.to_lowercase().contains(&needle.to_lowercase())
        }
        MatchRule::Contains { needle, case_insensitive: false } => text.contains(needle.as_str()),
        MatchRule::Pattern(pattern) => pattern.is_match(text),
    }
}

fn value_matches(rule: &MatchRule, value: &Value) -> bool {
    match value {
        Value::String(text) => rule_matches(rule, text),
        Value::Array(items) => items.iter().any(|item| value_matches(rule, item)),
        _ => false,
    }
}

pub fn condition_matches(condition: &Condition, doc: &Value) -> bool {
    match condition {
        Condition::Always => true,
        Condition::Match { field, rule } => resolve(doc, field).into_iter().any(|v| value_matches(rule, v)),
    }
}

/// Evaluate an expression. `And([])` holds, `Or([])` does not.
pub fn matches(expr: &Expr, doc: &Value) -> bool {
    match expr {
        Expr::And(parts) => parts.iter().all(|part| matches(part, doc)),
        Expr::Or(parts) => parts.iter().any(|part| matches(part, doc)),
        Expr::Cond(condition) => condition_matches(condition, doc),
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn sort_value<'a>(doc: &'a Value, field: &FieldRef) -> Option<&'a Value> {
    resolve(doc, field).into_iter().next()
}

/// Stable sort; missing values come first in ascending order
pub fn sort_documents(docs: &mut [Value], key: &SortKey) {
    docs.sort_by(|a, b| {
        let ordering = compare_values(sort_value(a, &key.field), sort_value(b, &key.field));
        if key.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filter::{Pattern, TaskField};
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "id": "SS_0010_org",
            "name": "SS_0010",
            "status": "6",
            "tag": ["1권", "Hero"],
            "comments": [{"text": "fix the Bar edge"}, {"text": "ok"}],
            "tasks": {
                "comp": {"status": "6", "user": "kim", "date": "2016-11-21T10:00:00+09:00"},
                "a.b": {"user": ""}
            }
        })
    }

    #[test]
    fn test_resolve_paths() {
        let doc = doc();
        assert_eq!(resolve(&doc, &FieldRef::item("comments.text")).len(), 2);
        assert_eq!(resolve(&doc, &FieldRef::item("missing.path")).len(), 0);
        assert_eq!(resolve(&doc, &FieldRef::task("comp", TaskField::User)), vec![&json!("kim")]);
        // task names are single keys
        assert_eq!(resolve(&doc, &FieldRef::task("a.b", TaskField::User)), vec![&json!("")]);
        assert!(resolve(&doc, &FieldRef::item("tasks.a.b.user")).is_empty());
    }

    #[test]
    fn test_condition_rules() {
        let doc = doc();
        assert!(condition_matches(&Condition::contains(FieldRef::item("comments.text"), "bar"), &doc));
        assert!(!condition_matches(&Condition::contains_exact_case(FieldRef::item("comments.text"), "bar"), &doc));
        assert!(condition_matches(&Condition::equals(FieldRef::item("tag"), "Hero"), &doc));
        assert!(!condition_matches(&Condition::equals(FieldRef::item("tag"), "2권"), &doc));
        assert!(condition_matches(&Condition::equals(FieldRef::task("a.b", TaskField::User), ""), &doc));
        // a missing field never equals the empty string
        assert!(!condition_matches(&Condition::equals(FieldRef::task("fx", TaskField::User), ""), &doc));
        let pattern = Pattern::new(r"^\d{4}-11-21T").unwrap();
        assert!(condition_matches(&Condition::pattern(FieldRef::task("comp", TaskField::Date), pattern), &doc));
        assert!(condition_matches(&Condition::Always, &json!({})));
    }

    #[test]
    fn test_expr_identities() {
        let doc = doc();
        assert!(matches(&Expr::And(vec![]), &doc));
        assert!(!matches(&Expr::Or(vec![]), &doc));
        let status = Expr::Cond(Condition::equals(FieldRef::item("status"), "6"));
        let other = Expr::Cond(Condition::equals(FieldRef::item("status"), "2"));
        assert!(matches(&Expr::Or(vec![other.clone(), status.clone()]), &doc));
        assert!(!matches(&Expr::And(vec![other, status]), &doc));
    }

    #[test]
    fn test_sort_documents() {
        let mut docs = vec![
            json!({"id": "b", "scanframe": 10}),
            json!({"id": "a", "scanframe": 120}),
            json!({"id": "c"}),
        ];
        sort_documents(&mut docs, &SortKey::ascending(FieldRef::item("id")));
        let ids: Vec<&str> = docs.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        sort_documents(&mut docs, &SortKey::ascending(FieldRef::item("scanframe")));
        let ids: Vec<&str> = docs.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);

        sort_documents(&mut docs, &SortKey::descending(FieldRef::item("scanframe")));
        let ids: Vec<&str> = docs.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_unknown_field_keeps_order() {
        let mut docs = vec![json!({"id": "b"}), json!({"id": "a"})];
        sort_documents(&mut docs, &SortKey::ascending(FieldRef::item("taskdate")));
        assert_eq!(docs[0]["id"], "b");
    }
}
