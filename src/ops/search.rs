use regex::Regex;

use crate::model::task::Task;

/// Tasks whose title contains `query`, ignoring case, in their original order.
pub fn filter_tasks(tasks: &[Task], query: &str) -> Vec<Task> {
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|t| t.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Case-insensitive literal matcher for highlighting `query` in rendered titles.
pub fn highlight_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}
