//! The task store: sole owner of the task list, thin driver around the
//! pure transitions in `ops::list_ops`. Every transition that reports a
//! change is followed by one synchronous full-list write to the storage
//! bridge, then by observer notification — the store never assumes any
//! particular rendering mechanism on the other side of that hook.

use log::{debug, warn};

use crate::io::bridge::{BridgeError, StorageBridge};
use crate::model::task::{Task, TaskId};
use crate::model::view::{EditDraft, Filter, Sort, ViewSelection};
use crate::ops::list_ops::{self, Change, ListError};
use crate::ops::projection;

/// Fixed storage key for the serialized task list.
pub const TASKS_KEY: &str = "tasks";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ListError),
    #[error("could not encode task list: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not persist task list: {0}")]
    Persist(#[from] BridgeError),
}

/// Observer invoked with the full list after every applied change.
pub type ChangeListener = Box<dyn FnMut(&[Task])>;

pub struct TaskStore<B: StorageBridge> {
    bridge: B,
    tasks: Vec<Task>,
    selection: ViewSelection,
    listeners: Vec<ChangeListener>,
}

impl<B: StorageBridge> TaskStore<B> {
    /// Load the persisted list from the bridge. An absent key starts an
    /// empty list. A malformed value is logged and ignored — the session
    /// starts empty and the stored value survives untouched until the next
    /// successful mutation overwrites it.
    pub fn load(bridge: B) -> Self {
        let tasks = read_tasks(&bridge);
        TaskStore {
            bridge,
            tasks,
            selection: ViewSelection::default(),
            listeners: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.selection.filter
    }

    pub fn sort(&self) -> Sort {
        self.selection.sort
    }

    /// The filtered and sorted sequence currently on display.
    pub fn visible(&self) -> Vec<&Task> {
        projection::visible_tasks(&self.tasks, self.selection.filter, self.selection.sort)
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Register an observer called after every applied list change. View
    /// code subscribes here instead of the store knowing how to render.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Task]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_task(&mut self, text: &str) -> Result<TaskId, StoreError> {
        let id = list_ops::add_task(&mut self.tasks, text)?;
        debug!("added task {id}");
        self.commit()?;
        Ok(id)
    }

    pub fn remove_task(&mut self, id: TaskId) -> Result<(), StoreError> {
        let change = list_ops::remove_task(&mut self.tasks, id);
        if change.is_dirty() {
            debug!("removed task {id}");
        }
        self.apply(change)
    }

    pub fn toggle_completion(&mut self, id: TaskId) -> Result<(), StoreError> {
        let change = list_ops::toggle_completion(&mut self.tasks, id);
        self.apply(change)
    }

    pub fn begin_edit(&mut self, id: TaskId, current_text: &str) {
        list_ops::begin_edit(&mut self.selection, id, current_text);
    }

    pub fn edit_draft(&self) -> Option<&EditDraft> {
        self.selection.edit.as_ref()
    }

    /// Replace the in-progress draft text (typing feedback). Transient; no
    /// persistence and no observer notification.
    pub fn set_edit_draft(&mut self, text: &str) {
        if let Some(draft) = &mut self.selection.edit {
            draft.text = text.to_string();
        }
    }

    pub fn commit_edit(&mut self, id: TaskId, new_text: &str) -> Result<(), StoreError> {
        let change = list_ops::commit_edit(&mut self.tasks, &mut self.selection, id, new_text);
        self.apply(change)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.selection.filter = filter;
    }

    pub fn set_sort(&mut self, sort: Sort) {
        self.selection.sort = sort;
    }

    /// Drop the in-memory list and re-read it from the bridge. Used when
    /// the backing file changes under a running session. The transient
    /// selection survives, except an edit draft whose task disappeared.
    pub fn reload(&mut self) {
        self.tasks = read_tasks(&self.bridge);
        if let Some(draft) = &self.selection.edit
            && !self.tasks.iter().any(|t| t.id == draft.id)
        {
            self.selection.edit = None;
        }
        self.notify();
    }

    fn apply(&mut self, change: Change) -> Result<(), StoreError> {
        if change.is_dirty() {
            self.commit()?;
        }
        Ok(())
    }

    /// Serialize the whole list and hand it to the bridge, then notify
    /// listeners. One write per mutation, no batching, no rollback of the
    /// in-memory change if the write fails.
    fn commit(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.tasks)?;
        self.bridge.set(TASKS_KEY, &raw).inspect_err(|e| {
            warn!("persist failed: {e}");
        })?;
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.tasks);
        }
    }
}

fn read_tasks<B: StorageBridge>(bridge: &B) -> Vec<Task> {
    match bridge.get(TASKS_KEY) {
        Some(raw) => match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!("ignoring malformed task list in storage: {e}");
                Vec::new()
            }
        },
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::bridge::MemoryBridge;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn load_from_empty_bridge_starts_empty() {
        let store = TaskStore::load(MemoryBridge::new());
        assert!(store.tasks().is_empty());
        assert_eq!(store.filter(), Filter::All);
        assert_eq!(store.sort(), Sort::Default);
    }

    #[test]
    fn load_ignores_malformed_stored_value() {
        let mut bridge = MemoryBridge::new();
        bridge.set(TASKS_KEY, "not json {{{").unwrap();
        let store = TaskStore::load(bridge);
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn every_mutation_persists_the_full_list() {
        let mut store = TaskStore::load(MemoryBridge::new());
        let id = store.add_task("buy milk").unwrap();

        let raw = store.bridge.get(TASKS_KEY).unwrap();
        let stored: Vec<Task> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, store.tasks());

        store.toggle_completion(id).unwrap();
        let raw = store.bridge.get(TASKS_KEY).unwrap();
        let stored: Vec<Task> = serde_json::from_str(&raw).unwrap();
        assert!(stored[0].completed);
    }

    #[test]
    fn rejected_add_does_not_touch_the_bridge() {
        let mut store = TaskStore::load(MemoryBridge::new());
        assert!(matches!(
            store.add_task("   "),
            Err(StoreError::Validation(ListError::EmptyText))
        ));
        assert_eq!(store.bridge.get(TASKS_KEY), None);
    }

    #[test]
    fn noop_mutations_do_not_write() {
        let mut store = TaskStore::load(MemoryBridge::new());
        store.remove_task(TaskId(404)).unwrap();
        store.toggle_completion(TaskId(404)).unwrap();
        assert_eq!(store.bridge.get(TASKS_KEY), None);
    }

    #[test]
    fn listeners_fire_once_per_applied_change() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let calls_seen = Rc::clone(&calls);

        let mut store = TaskStore::load(MemoryBridge::new());
        store.subscribe(move |tasks| calls_seen.borrow_mut().push(tasks.len()));

        let id = store.add_task("buy milk").unwrap();
        store.add_task("walk dog").unwrap();
        store.remove_task(id).unwrap();
        store.remove_task(id).unwrap(); // absent: no notification

        assert_eq!(*calls.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn edit_draft_updates_are_transient() {
        let mut store = TaskStore::load(MemoryBridge::new());
        let id = store.add_task("buy milk").unwrap();
        let persisted_before = store.bridge.get(TASKS_KEY).unwrap();

        store.begin_edit(id, "buy milk");
        store.set_edit_draft("buy oat milk");
        assert_eq!(store.edit_draft().unwrap().text, "buy oat milk");
        assert_eq!(store.bridge.get(TASKS_KEY).unwrap(), persisted_before);

        store.commit_edit(id, "buy oat milk").unwrap();
        assert!(store.edit_draft().is_none());
        assert_eq!(store.find(id).unwrap().text, "buy oat milk");
        assert_ne!(store.bridge.get(TASKS_KEY).unwrap(), persisted_before);
    }

    #[test]
    fn reload_picks_up_external_changes_and_drops_stale_draft() {
        let mut bridge = MemoryBridge::new();
        bridge
            .set(TASKS_KEY, r#"[{"id":1,"text":"old","completed":false}]"#)
            .unwrap();
        let mut store = TaskStore::load(bridge);
        store.begin_edit(TaskId(1), "old");

        store
            .bridge
            .set(TASKS_KEY, r#"[{"id":2,"text":"new","completed":true}]"#)
            .unwrap();
        store.reload();

        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, TaskId(2));
        assert!(store.edit_draft().is_none());
    }

    #[test]
    fn scenario_add_add_toggle_filter() {
        let mut store = TaskStore::load(MemoryBridge::new());
        let milk = store.add_task("Buy milk").unwrap();
        store.add_task("Walk dog").unwrap();
        store.toggle_completion(milk).unwrap();
        store.set_filter(Filter::Incomplete);

        let visible: Vec<&str> = store.visible().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(visible, ["Walk dog"]);
    }
}
