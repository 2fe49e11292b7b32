//! Search phrase tokenizer / 搜索词分词器
//!
//! Splits the phrase on whitespace:
//! - `task:<name>` selects a task scope (may repeat)
//! - `and`, `&&`, `or`, `||` and empty pieces are connectors and dropped
//! - everything else is a content token, kept in order

/// Result of splitting a search phrase / 分词结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    /// Content tokens handed to the classifier
    pub words: Vec<String>,
    /// Selected tasks from `task:` directives plus the request task
    pub tasks: Vec<String>,
    /// A literal `or` / `||` appeared somewhere in the phrase
    pub use_or: bool,
}

impl Tokens {
    pub fn has_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }
}

fn is_connector(word: &str) -> bool {
    matches!(word, "" | "and" | "&&" | "or" | "||")
}

/// Tokenize the phrase. `request_task` is appended after any `task:` directives.
pub fn tokenize(phrase: &str, request_task: Option<&str>) -> Tokens {
    let mut tokens = Tokens::default();

    for word in phrase.split_whitespace() {
        if let Some(task) = word.strip_prefix("task:") {
            tokens.tasks.push(task.to_string());
            continue;
        }
        if matches!(word, "or" | "||") {
            tokens.use_or = true;
        }
        if is_connector(word) {
            continue;
        }
        tokens.words.push(word.to_string());
    }

    if let Some(task) = request_task.filter(|t| !t.is_empty()) {
        tokens.tasks.push(task.to_string());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words_in_order() {
        let tokens = tokenize("foo  bar and baz", None);
        assert_eq!(tokens.words, vec!["foo", "bar", "baz"]);
        assert!(tokens.tasks.is_empty());
        assert!(!tokens.use_or);
    }

    #[test]
    fn test_tokenize_task_directives() {
        let tokens = tokenize("task:comp bar task:light", Some("fx"));
        assert_eq!(tokens.words, vec!["bar"]);
        assert_eq!(tokens.tasks, vec!["comp", "light", "fx"]);
        assert!(tokens.has_tasks());
    }

    #[test]
    fn test_tokenize_or_switch() {
        assert!(tokenize("foo or bar", None).use_or);
        assert!(tokenize("foo || bar", None).use_or);
        assert!(!tokenize("foo && bar", None).use_or);
        // "OR" is not a connector and stays a content token
        let upper = tokenize("foo OR bar", None);
        assert!(!upper.use_or);
        assert_eq!(upper.words, vec!["foo", "OR", "bar"]);
    }

    #[test]
    fn test_tokenize_only_connectors() {
        let tokens = tokenize(" and || && ", Some(""));
        assert!(tokens.words.is_empty());
        assert!(tokens.tasks.is_empty());
        assert!(tokens.use_or);
    }

    #[test]
    fn test_tokenize_any_whitespace() {
        let tokens = tokenize("a\tb\n c", None);
        assert_eq!(tokens.words, vec!["a", "b", "c"]);
    }
}
