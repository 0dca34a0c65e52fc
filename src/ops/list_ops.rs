use crate::model::task::{Task, TaskId};
use crate::model::view::{EditDraft, ViewSelection};

/// Error type for list transitions
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("task cannot be empty")]
    EmptyText,
}

/// Whether a transition changed the task list. `Dirty` means the driver
/// must persist the full list before handling the next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Change {
    Dirty,
    Clean,
}

impl Change {
    pub fn is_dirty(self) -> bool {
        matches!(self, Change::Dirty)
    }
}

/// Append a new task with a fresh id. Text that trims to empty is rejected
/// and the list is untouched; otherwise the text is stored as typed
/// (untrimmed).
pub fn add_task(tasks: &mut Vec<Task>, text: &str) -> Result<TaskId, ListError> {
    if text.trim().is_empty() {
        return Err(ListError::EmptyText);
    }
    let id = TaskId::fresh(tasks.iter().map(|t| t.id).max());
    tasks.push(Task::new(id, text.to_string()));
    Ok(id)
}

/// Remove the task with the given id. Absent ids are a silent no-op.
pub fn remove_task(tasks: &mut Vec<Task>, id: TaskId) -> Change {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() != before {
        Change::Dirty
    } else {
        Change::Clean
    }
}

/// Flip the completed flag on the task with the given id. Absent ids are a
/// silent no-op.
pub fn toggle_completion(tasks: &mut [Task], id: TaskId) -> Change {
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            task.completed = !task.completed;
            Change::Dirty
        }
        None => Change::Clean,
    }
}

/// Start editing `id`, seeding the draft with the task's current text. Only
/// one edit can be in flight: a prior draft is discarded, last call wins.
/// The task list itself is untouched.
pub fn begin_edit(selection: &mut ViewSelection, id: TaskId, current_text: &str) {
    selection.edit = Some(EditDraft {
        id,
        text: current_text.to_string(),
    });
}

/// Replace the matching task's text with `new_text` and clear the edit
/// draft. Creation validates text; edits do not — an empty edit goes
/// through. If the id no longer exists the list is untouched but the draft
/// is still cleared.
pub fn commit_edit(
    tasks: &mut [Task],
    selection: &mut ViewSelection,
    id: TaskId,
    new_text: &str,
) -> Change {
    selection.edit = None;
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            task.text = new_text.to_string();
            Change::Dirty
        }
        None => Change::Clean,
    }
}
