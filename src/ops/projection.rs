use std::cmp::Ordering;

use crate::model::task::Task;
use crate::model::view::{Filter, Sort};

/// Compute the display sequence: filter, then a stable display-only sort.
/// Pure — the canonical list keeps its insertion order, and nothing here is
/// ever persisted.
pub fn visible_tasks(tasks: &[Task], filter: Filter, sort: Sort) -> Vec<&Task> {
    let mut visible: Vec<&Task> = tasks.iter().filter(|t| filter.keeps(t)).collect();
    match sort {
        Sort::Default => {}
        Sort::Alphabetical => visible.sort_by(|a, b| alphabetical(&a.text, &b.text)),
        // false < true, so incomplete tasks sort first; sort_by_key is
        // stable, so ties keep their input order.
        Sort::Completion => visible.sort_by_key(|t| t.completed),
    }
    visible
}

/// Case-folded ordering: compare lowercased forms, falling back to the raw
/// strings so texts equal ignoring case still order deterministically.
fn alphabetical(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(|c| c.to_lowercase())
        .cmp(b.chars().flat_map(|c| c.to_lowercase()));
    folded.then_with(|| a.cmp(b))
}
