pub mod list_ops;
pub mod projection;

pub use list_ops::{ListError, add_task, begin_edit, commit_edit, remove_task, toggle_completion};
pub use projection::visible_tasks;
