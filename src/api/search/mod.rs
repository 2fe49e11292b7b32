pub mod query;
pub mod types;

pub use query::{list_projects, search_items};
