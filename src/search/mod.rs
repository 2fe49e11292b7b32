//! Search module - translates search phrases into item queries / 搜索模块
//!
//! Pipeline / 流程：
//! - tokenizer: phrase → content tokens, task selectors, AND/OR switch
//! - classifier: content token → predicate (priority-ordered rules)
//! - compose: status filter, boolean composition, sort key
//! - engine: runs the composed query through an `ItemStore` session
//!
//! Everything before the engine is pure and allocation-only.

pub mod classifier;
pub mod compose;
pub mod engine;
pub mod filter;
pub mod schema;
pub mod status;
pub mod tokenizer;

pub use compose::translate;
pub use engine::SearchEngine;
pub use filter::{ComposedQuery, Condition, Expr, FieldRef, MatchRule, Predicate, SortKey, TaskField};
pub use schema::SearchOption;
pub use status::{StatusCode, StatusFlags};
