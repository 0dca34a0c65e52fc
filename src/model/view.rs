use crate::model::task::{Task, TaskId};

/// Which subset of tasks is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl Filter {
    /// Does this filter keep the given task?
    pub fn keeps(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.completed,
            Filter::Incomplete => !task.completed,
        }
    }

    /// The next filter in the cycle (all → completed → incomplete → all).
    pub fn cycle(self) -> Filter {
        match self {
            Filter::All => Filter::Completed,
            Filter::Completed => Filter::Incomplete,
            Filter::Incomplete => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Incomplete => "incomplete",
        }
    }
}

/// Display-only ordering applied after filtering. The canonical list keeps
/// its insertion order regardless of what is selected here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sort {
    #[default]
    Default,
    Alphabetical,
    Completion,
}

impl Sort {
    /// The next ordering in the cycle (default → alphabetical → completion).
    pub fn cycle(self) -> Sort {
        match self {
            Sort::Default => Sort::Alphabetical,
            Sort::Alphabetical => Sort::Completion,
            Sort::Completion => Sort::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sort::Default => "default",
            Sort::Alphabetical => "alphabetical",
            Sort::Completion => "completion",
        }
    }
}

/// In-progress edit of a single task: which one, and the draft text typed
/// so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: TaskId,
    pub text: String,
}

/// Transient per-session display state. Never written to storage; every
/// session starts from the defaults.
#[derive(Debug, Clone, Default)]
pub struct ViewSelection {
    pub filter: Filter,
    pub sort: Sort,
    /// At most one task is mid-edit at a time.
    pub edit: Option<EditDraft>,
}
