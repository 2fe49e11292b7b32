//! Token classifier / 搜索词分类器
//!
//! Each content token becomes one [`Predicate`]. Rules are tried in order and
//! the first rule that claims the token wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::filter::{Condition, FieldRef, Pattern, Predicate, TaskField};
use super::status::StatusCode;

/// `1121` style month/day
static SHORT_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").unwrap());
/// `2016-11-21` style daily date
static NORMAL_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());
/// `01:02:03:04` (or drop-frame `01:02:03;04`)
static TIMECODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}[:;][0-9]{2}$").unwrap());
/// `<field>:<word>`
static FIELD_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([\w.]+):(\w+)$").unwrap());

/// RFC3339 time part, with a numeric offset
const TIME_SUFFIX: &str = r"T\d{2}:\d{2}:\d{2}[-+]\d{2}:\d{2}$";

const MATCH_ALL_WORDS: &[&str] = &["all", "All", "ALL", "올", "미ㅣ", "dhf", "전체"];
const SHOT_WORDS: &[&str] = &["shot", "샷", "전샷", "전체샷"];
const ASSET_WORDS: &[&str] = &["asset", "assets", "에셋"];
/// Expands to every volume tag
const ALL_VOLUMES_WORD: &str = "전권";
const VOLUME_TAGS: [&str; 8] = ["1권", "2권", "3권", "4권", "5권", "6권", "7권", "8권"];

const FULLTEXT_FIELDS: &[&str] = &[
    "id",
    "comments.text",
    "sources.title",
    "sources.path",
    "references.title",
    "references.path",
    "note.text",
    "tag",
    "assettags",
    "scanname",
    "rnum",
];

const TIMECODE_FIELDS: &[&str] = &["justtimecodein", "justtimecodeout", "scantimecodein", "scantimecodeout"];

/// Task context shared by every token of one request / 任务上下文
#[derive(Debug, Clone, Default)]
pub struct TaskScope {
    /// Tasks selected by the request; empty means unscoped
    pub selected: Vec<String>,
    /// Every known task name
    pub known: Vec<String>,
}

impl TaskScope {
    pub fn new(selected: &[String], known: &[String]) -> Self {
        Self {
            selected: selected.iter().map(|t| t.to_lowercase()).collect(),
            known: known.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    pub fn is_scoped(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Selected tasks, or every known task when nothing is selected
    pub fn targets(&self) -> &[String] {
        if self.is_scoped() {
            &self.selected
        } else {
            &self.known
        }
    }

    fn fields(&self, field: TaskField) -> impl Iterator<Item = FieldRef> + '_ {
        self.targets().iter().map(move |task| FieldRef::task(task.as_str(), field))
    }
}

type Rule = fn(&str, &TaskScope) -> Option<Predicate>;

/// Classification rules, highest priority first
const RULES: &[(&str, Rule)] = &[
    ("short_date", short_date),
    ("normal_date", normal_date),
    ("timecode", timecode),
    ("directive", directive),
    ("field_status", field_status),
    ("keyword", keyword),
    ("fulltext", fulltext),
];

/// Build the predicate for one content token / 为单个搜索词生成条件
pub fn classify(word: &str, scope: &TaskScope) -> Predicate {
    for (name, rule) in RULES {
        if let Some(predicate) = rule(word, scope) {
            tracing::trace!("token {:?} classified as {} ({} conditions)", word, name, predicate.len());
            return predicate;
        }
    }
    // fulltext never declines
    Predicate::new()
}

fn time_pattern(prefix: &str) -> Option<Pattern> {
    Pattern::new(&format!("^{}{}", prefix, TIME_SUFFIX)).ok()
}

fn short_date(word: &str, scope: &TaskScope) -> Option<Predicate> {
    if !SHORT_DATE.is_match(word) {
        return None;
    }
    let pattern = time_pattern(&format!(r"\d{{4}}-{}-{}", &word[0..2], &word[2..4]))?;

    let mut predicate = Predicate::new();
    for task in scope.targets() {
        predicate.push(Condition::pattern(FieldRef::task(task.as_str(), TaskField::Date), pattern.clone()));
        predicate.push(Condition::pattern(FieldRef::task(task.as_str(), TaskField::Predate), pattern.clone()));
    }
    if !scope.is_scoped() {
        predicate.push(Condition::pattern(FieldRef::item("ddline2d"), pattern.clone()));
        predicate.push(Condition::pattern(FieldRef::item("ddline3d"), pattern));
    }
    // shot names are often numeric
    predicate.push(Condition::contains_exact_case(FieldRef::item("name"), word));
    Some(predicate)
}

fn normal_date(word: &str, scope: &TaskScope) -> Option<Predicate> {
    if !NORMAL_DATE.is_match(word) {
        return None;
    }
    let pattern = time_pattern(word)?;
    Some(
        scope
            .fields(TaskField::Mdate)
            .map(|field| Condition::pattern(field, pattern.clone()))
            .collect(),
    )
}

fn timecode(word: &str, _scope: &TaskScope) -> Option<Predicate> {
    if !TIMECODE.is_match(word) {
        return None;
    }
    Some(
        TIMECODE_FIELDS
            .iter()
            .map(|field| Condition::equals(FieldRef::item(*field), word))
            .collect(),
    )
}

/// Fixed `key:value` directives
fn directive(word: &str, scope: &TaskScope) -> Option<Predicate> {
    const SUBSTRING_DIRECTIVES: &[(&str, &str)] = &[
        ("tag:", "tag"),
        ("assettags:", "assettags"),
        ("deadline2d:", "ddline2d"),
        ("deadline3d:", "ddline3d"),
        ("shottype:", "shottype"),
    ];

    for (prefix, field) in SUBSTRING_DIRECTIVES {
        if let Some(value) = word.strip_prefix(prefix) {
            return Some(Predicate::from_iter([Condition::contains(FieldRef::item(*field), value)]));
        }
    }

    if word.starts_with("type:shot") {
        return Some(Predicate::from_iter([
            Condition::equals(FieldRef::item("type"), "org"),
            Condition::equals(FieldRef::item("type"), "left"),
        ]));
    }
    if word.starts_with("type:asset") {
        return Some(Predicate::from_iter([Condition::equals(FieldRef::item("type"), "asset")]));
    }
    if let Some(name) = word.strip_prefix("status:") {
        return Some(status_predicate(name, scope));
    }
    if let Some(user) = word.strip_prefix("user:") {
        return Some(user_predicate(user, scope));
    }
    if let Some(value) = word.strip_prefix("rnum:") {
        return Some(Predicate::from_iter([Condition::contains(FieldRef::item("rnum"), value)]));
    }
    None
}

/// Unknown status names give an empty predicate
fn status_predicate(name: &str, scope: &TaskScope) -> Predicate {
    let Some(status) = StatusCode::from_name(name) else {
        tracing::debug!("unknown status name {:?}, token matches nothing", name);
        return Predicate::new();
    };
    if scope.is_scoped() {
        scope
            .fields(TaskField::Status)
            .map(|field| Condition::equals(field, status.code()))
            .collect()
    } else {
        Predicate::from_iter([Condition::equals(FieldRef::item("status"), status.code())])
    }
}

/// `notassign` looks for tasks without a user
fn user_predicate(user: &str, scope: &TaskScope) -> Predicate {
    scope
        .fields(TaskField::User)
        .map(|field| {
            if user == "notassign" {
                Condition::equals(field, "")
            } else {
                Condition::contains_exact_case(field, user)
            }
        })
        .collect()
}

/// `<field>:<status name>` compares any field to a status code
fn field_status(word: &str, _scope: &TaskScope) -> Option<Predicate> {
    let caps = FIELD_VALUE.captures(word)?;
    let status = StatusCode::from_name(&caps[2])?;
    Some(Predicate::from_iter([Condition::equals(FieldRef::from_path(&caps[1]), status.code())]))
}

fn keyword(word: &str, _scope: &TaskScope) -> Option<Predicate> {
    if MATCH_ALL_WORDS.contains(&word) {
        return Some(Predicate::from_iter([Condition::Always]));
    }
    if SHOT_WORDS.contains(&word) {
        return Some(Predicate::from_iter([
            Condition::equals(FieldRef::item("type"), "org"),
            Condition::equals(FieldRef::item("type"), "left"),
        ]));
    }
    if ASSET_WORDS.contains(&word) {
        return Some(Predicate::from_iter([Condition::equals(FieldRef::item("type"), "asset")]));
    }
    if word == ALL_VOLUMES_WORD {
        return Some(
            VOLUME_TAGS
                .iter()
                .map(|tag| Condition::equals(FieldRef::item("tag"), *tag))
                .collect(),
        );
    }
    None
}

fn fulltext(word: &str, scope: &TaskScope) -> Option<Predicate> {
    let mut predicate: Predicate = FULLTEXT_FIELDS
        .iter()
        .map(|field| Condition::contains(FieldRef::item(*field), word))
        .collect();
    for field in scope.fields(TaskField::User) {
        predicate.push(Condition::contains_exact_case(field, word));
    }
    Some(predicate)
}
