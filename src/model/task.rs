use serde::{Deserialize, Serialize};

/// Stable handle for a task. Assigned once at creation, never changed, and
/// unique among all tasks alive in the same list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Derive a fresh id from the wall clock (milliseconds since the epoch),
    /// bumped past `last` so two creations in the same millisecond still get
    /// distinct ids.
    pub fn fresh(last: Option<TaskId>) -> TaskId {
        let now = chrono::Utc::now().timestamp_millis();
        match last {
            Some(TaskId(n)) if n >= now => TaskId(n + 1),
            _ => TaskId(now),
        }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One to-do item. This is the entire persisted record; everything else in
/// the application is derived or transient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Create a new task with the given id and text, not yet completed.
    pub fn new(id: TaskId, text: String) -> Self {
        Task {
            id,
            text,
            completed: false,
        }
    }
}
