use super::command::{Command, Registry};
use indexmap::IndexMap;

/// Bucket for commands that carry no category.
pub const GENERAL_CATEGORY: &str = "General";

fn contains_lower(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[must_use]
pub fn matches_query(command: &Command, query_lower: &str) -> bool {
    if !command.is_valid() {
        return false;
    }
    if query_lower.is_empty() {
        return true;
    }

    contains_lower(&command.title, query_lower)
        || command
            .description
            .as_deref()
            .is_some_and(|d| contains_lower(d, query_lower))
        || command
            .category
            .as_deref()
            .is_some_and(|c| contains_lower(c, query_lower))
}

/// Returns indices into `registry` of every command matching `query`, in
/// registry order. Plain case-insensitive substring containment, no ranking.
#[must_use]
pub fn filter_commands(registry: &Registry, query: &str) -> Vec<usize> {
    let query_lower = query.to_lowercase();
    registry
        .iter()
        .enumerate()
        .filter(|(_, cmd)| matches_query(cmd, &query_lower))
        .map(|(i, _)| i)
        .collect()
}

#[must_use]
pub fn category_of(command: &Command) -> &str {
    command.category.as_deref().unwrap_or(GENERAL_CATEGORY)
}

/// Partitions `matches` by category. Category order is first occurrence
/// within `matches`, so blocks can reorder as the query changes.
#[must_use]
pub fn group_by_category(registry: &Registry, matches: &[usize]) -> IndexMap<String, Vec<usize>> {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for &idx in matches {
        if let Some(cmd) = registry.get(idx) {
            groups
                .entry(category_of(cmd).to_string())
                .or_default()
                .push(idx);
        }
    }
    groups
}
