//! Query composition / 查询组合
//!
//! Turns classified tokens and status checkboxes into the final
//! [`ComposedQuery`] and resolves the sort key.

use super::classifier::{classify, TaskScope};
use super::filter::{ComposedQuery, Condition, Expr, FieldRef, Predicate, SortKey, TaskField};
use super::schema::SearchOption;
use super::status::StatusFlags;
use super::tokenizer::{tokenize, Tokens};

/// One equality per active flag, per selected task when any are selected
pub fn status_predicate(flags: &StatusFlags, selected_tasks: &[String]) -> Predicate {
    let active = flags.active();
    if selected_tasks.is_empty() {
        return active
            .iter()
            .map(|status| Condition::equals(FieldRef::item("status"), status.code()))
            .collect();
    }
    selected_tasks
        .iter()
        .flat_map(|task| {
            active
                .iter()
                .map(move |status| Condition::equals(FieldRef::task(task.to_lowercase(), TaskField::Status), status.code()))
        })
        .collect()
}

/// Combine token predicates and the status filter.
///
/// `use_or` is a single switch for the whole phrase, so `a or b and c` is
/// `a OR b OR c`.
pub fn compose(words: Vec<Predicate>, use_or: bool, status: Predicate) -> Expr {
    let words: Vec<Expr> = words.into_iter().map(Predicate::into_expr).collect();
    let word_expr = if use_or { Expr::Or(words) } else { Expr::And(words) };

    let mut parts = vec![word_expr];
    if !status.is_empty() {
        parts.push(status.into_expr());
    }
    Expr::And(parts)
}

/// Map a requested sort key to a field / 解析排序字段
///
/// `task` is the task used for `taskdate` / `taskpredate`; without one those
/// names are left as literal field names.
pub fn resolve_sort(sortkey: &str, task: Option<&str>) -> SortKey {
    match sortkey {
        "" => SortKey::ascending(FieldRef::item("id")),
        // longest scans and latest scans first
        "scanframe" | "scantime" => SortKey::descending(FieldRef::item(sortkey)),
        "taskdate" => match task {
            Some(task) => SortKey::ascending(FieldRef::task(task.to_lowercase(), TaskField::Date)),
            None => SortKey::ascending(FieldRef::item(sortkey)),
        },
        "taskpredate" => match task {
            Some(task) => SortKey::ascending(FieldRef::task(task.to_lowercase(), TaskField::Predate)),
            None => SortKey::ascending(FieldRef::item(sortkey)),
        },
        other => match other.strip_prefix('-') {
            Some(field) if !field.is_empty() => SortKey::descending(FieldRef::from_path(field)),
            _ => SortKey::ascending(FieldRef::from_path(other)),
        },
    }
}

/// Task used for task-date sorting: the request task, else the first selector
fn sort_task<'a>(option: &'a SearchOption, tokens: &'a Tokens) -> Option<&'a str> {
    if !tokens.has_tasks() {
        return None;
    }
    option
        .task
        .as_deref()
        .filter(|t| !t.is_empty())
        .or_else(|| tokens.tasks.first().map(String::as_str))
}

/// Translate a search request into a query / 将搜索请求翻译为查询
///
/// Returns `None` when the request short-circuits to an empty result.
pub fn translate(option: &SearchOption, known_tasks: &[String]) -> Option<ComposedQuery> {
    if option.searchword.is_empty() || option.status.is_empty() {
        return None;
    }
    let tokens = tokenize(&option.searchword, option.task.as_deref());
    if tokens.words.is_empty() {
        return None;
    }

    let scope = TaskScope::new(&tokens.tasks, known_tasks);
    let predicates: Vec<Predicate> = tokens.words.iter().map(|word| classify(word, &scope)).collect();
    let status = status_predicate(&option.status, &tokens.tasks);

    Some(ComposedQuery {
        filter: compose(predicates, tokens.use_or, status),
        sort: resolve_sort(&option.sortkey, sort_task(option, &tokens)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::status::StatusCode;

    fn known() -> Vec<String> {
        vec!["comp".to_string(), "light".to_string()]
    }

    fn option(searchword: &str) -> SearchOption {
        SearchOption::new("circle", searchword).with_status(StatusFlags::default().with(StatusCode::Wip))
    }

    #[test]
    fn test_status_predicate_unscoped() {
        let flags = StatusFlags::default().with(StatusCode::Assign).with(StatusCode::Done);
        let predicate = status_predicate(&flags, &[]);
        assert_eq!(
            predicate.conditions,
            vec![
                Condition::equals(FieldRef::item("status"), "4"),
                Condition::equals(FieldRef::item("status"), "2"),
            ]
        );
    }

    #[test]
    fn test_status_predicate_per_task() {
        let flags = StatusFlags::default().with(StatusCode::Wip).with(StatusCode::Hold);
        let tasks = vec!["comp".to_string(), "fx".to_string()];
        let predicate = status_predicate(&flags, &tasks);
        assert_eq!(predicate.len(), 4);
        assert_eq!(predicate.conditions[1], Condition::equals(FieldRef::task("comp", TaskField::Status), "1"));
        assert_eq!(predicate.conditions[2], Condition::equals(FieldRef::task("fx", TaskField::Status), "6"));
    }

    #[test]
    fn test_status_predicate_no_flags() {
        assert!(status_predicate(&StatusFlags::default(), &["comp".to_string()]).is_empty());
    }

    #[test]
    fn test_compose_and_by_default() {
        let query = translate(&option("foo bar"), &known()).unwrap();
        let Expr::And(parts) = &query.filter else { panic!("expected And") };
        assert_eq!(parts.len(), 2);
        let Expr::And(words) = &parts[0] else { panic!("expected word And") };
        assert_eq!(words.len(), 2);
        assert_eq!(parts[1], Expr::Or(vec![Expr::Cond(Condition::equals(FieldRef::item("status"), "6"))]));
    }

    #[test]
    fn test_compose_or_switch() {
        let query = translate(&option("foo or bar"), &known()).unwrap();
        let Expr::And(parts) = &query.filter else { panic!("expected And") };
        let Expr::Or(words) = &parts[0] else { panic!("expected word Or") };
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_compose_or_is_global() {
        // documented quirk: one `or` turns every connector into OR
        let query = translate(&option("a or b and c"), &known()).unwrap();
        let Expr::And(parts) = &query.filter else { panic!("expected And") };
        let Expr::Or(words) = &parts[0] else { panic!("expected word Or") };
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn test_compose_without_status() {
        let expr = compose(vec![Predicate::from_iter([Condition::Always])], false, Predicate::new());
        assert_eq!(
            expr,
            Expr::And(vec![Expr::And(vec![Expr::Or(vec![Expr::Cond(Condition::Always)])])])
        );
    }

    #[test]
    fn test_translate_short_circuits() {
        assert!(translate(&option(""), &known()).is_none());
        assert!(translate(&option("and or task:comp"), &known()).is_none());
        let no_flags = SearchOption::new("circle", "foo");
        assert!(translate(&no_flags, &known()).is_none());
    }

    #[test]
    fn test_translate_task_scopes_status() {
        let query = translate(&option("status:wip task:comp"), &known()).unwrap();
        let Expr::And(parts) = &query.filter else { panic!("expected And") };
        assert_eq!(
            parts[0],
            Expr::And(vec![Expr::Or(vec![Expr::Cond(Condition::equals(
                FieldRef::task("comp", TaskField::Status),
                "6"
            ))])])
        );
        assert_eq!(
            parts[1],
            Expr::Or(vec![Expr::Cond(Condition::equals(FieldRef::task("comp", TaskField::Status), "6"))])
        );
    }

    #[test]
    fn test_resolve_sort() {
        assert_eq!(resolve_sort("", None), SortKey::ascending(FieldRef::item("id")));
        assert_eq!(resolve_sort("scantime", None), SortKey::descending(FieldRef::item("scantime")));
        assert_eq!(resolve_sort("scanframe", Some("comp")), SortKey::descending(FieldRef::item("scanframe")));
        assert_eq!(resolve_sort("taskdate", None), SortKey::ascending(FieldRef::item("taskdate")));
        assert_eq!(
            resolve_sort("taskpredate", Some("Comp")),
            SortKey::ascending(FieldRef::task("comp", TaskField::Predate))
        );
        assert_eq!(resolve_sort("name", None), SortKey::ascending(FieldRef::item("name")));
        assert_eq!(resolve_sort("-name", None), SortKey::descending(FieldRef::item("name")));
    }

    #[test]
    fn test_translate_sort_uses_request_task() {
        let with_task = option("foo task:light").with_task("comp").with_sortkey("taskdate");
        let query = translate(&with_task, &known()).unwrap();
        assert_eq!(query.sort, SortKey::ascending(FieldRef::task("comp", TaskField::Date)));

        let directive_only = option("foo task:light").with_sortkey("taskdate");
        let query = translate(&directive_only, &known()).unwrap();
        assert_eq!(query.sort, SortKey::ascending(FieldRef::task("light", TaskField::Date)));
    }
}
