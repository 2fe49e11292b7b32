//! Query data built by the translator / 查询结构
//!
//! Everything here is plain data. Evaluation against documents lives in
//! `store::matcher`.

use regex::Regex;
use std::fmt;

/// Per-task attribute / 任务字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    Status,
    User,
    Date,
    Predate,
    Mdate,
}

impl TaskField {
    pub fn key(self) -> &'static str {
        match self {
            TaskField::Status => "status",
            TaskField::User => "user",
            TaskField::Date => "date",
            TaskField::Predate => "predate",
            TaskField::Mdate => "mdate",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "status" => Some(TaskField::Status),
            "user" => Some(TaskField::User),
            "date" => Some(TaskField::Date),
            "predate" => Some(TaskField::Predate),
            "mdate" => Some(TaskField::Mdate),
            _ => None,
        }
    }
}

/// Reference to a document field / 字段引用
///
/// Task-scoped fields keep the task name as a single key so a task name
/// containing `.` can never address a different field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldRef {
    /// Dotted path from the document root, e.g. `comments.text`
    Item(String),
    Task { task: String, field: TaskField },
}

impl FieldRef {
    pub fn item(path: impl Into<String>) -> Self {
        FieldRef::Item(path.into())
    }

    pub fn task(task: impl Into<String>, field: TaskField) -> Self {
        FieldRef::Task { task: task.into(), field }
    }

    /// Interpret a user supplied path. `tasks.<name>.<attr>` becomes a task reference.
    pub fn from_path(path: &str) -> Self {
        if let Some(rest) = path.strip_prefix("tasks.") {
            if let Some((task, attr)) = rest.rsplit_once('.') {
                if let Some(field) = TaskField::from_key(attr) {
                    if !task.is_empty() {
                        return FieldRef::task(task, field);
                    }
                }
            }
        }
        FieldRef::Item(path.to_string())
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Item(path) => write!(f, "{}", path),
            FieldRef::Task { task, field } => write!(f, "tasks[{}].{}", task, field.key()),
        }
    }
}

/// Compiled anchored pattern. Compared by source text.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Pattern)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchRule {
    Equals(String),
    Contains { needle: String, case_insensitive: bool },
    Pattern(Pattern),
}

/// One field-match condition / 单个匹配条件
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Matches every document
    Always,
    Match { field: FieldRef, rule: MatchRule },
}

impl Condition {
    pub fn equals(field: FieldRef, value: impl Into<String>) -> Self {
        Condition::Match { field, rule: MatchRule::Equals(value.into()) }
    }

    /// Case-insensitive substring match
    pub fn contains(field: FieldRef, needle: impl Into<String>) -> Self {
        Condition::Match {
            field,
            rule: MatchRule::Contains { needle: needle.into(), case_insensitive: true },
        }
    }

    pub fn contains_exact_case(field: FieldRef, needle: impl Into<String>) -> Self {
        Condition::Match {
            field,
            rule: MatchRule::Contains { needle: needle.into(), case_insensitive: false },
        }
    }

    pub fn pattern(field: FieldRef, pattern: Pattern) -> Self {
        Condition::Match { field, rule: MatchRule::Pattern(pattern) }
    }
}

/// OR-set of conditions. An empty predicate matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub conditions: Vec<Condition>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn into_expr(self) -> Expr {
        Expr::Or(self.conditions.into_iter().map(Expr::Cond).collect())
    }
}

impl FromIterator<Condition> for Predicate {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        Self { conditions: iter.into_iter().collect() }
    }
}

/// Boolean expression tree / 布尔表达式
///
/// `And([])` is true, `Or([])` is false.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Cond(Condition),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub field: FieldRef,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(field: FieldRef) -> Self {
        Self { field, descending: false }
    }

    pub fn descending(field: FieldRef) -> Self {
        Self { field, descending: true }
    }
}

/// Filter plus sort, built fresh for every request
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedQuery {
    pub filter: Expr,
    pub sort: SortKey,
}
