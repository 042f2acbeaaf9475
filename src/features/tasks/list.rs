//! Task list and its persistence.
//!
//! The list is stored as one JSON array under the `tasks` key of the shared
//! key-value store.

use tracing::{debug, warn};

use super::Task;
use crate::error::TomatoError;
use crate::storage::{keys, KeyValueStore};

/// Ordered list of tasks with at most one active task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Load the list from the store.
    ///
    /// A malformed entry is logged and deleted, leaving an empty list.
    pub fn load(store: &mut dyn KeyValueStore) -> Self {
        let raw = match store.get(keys::TASKS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(error = %e, "failed to read tasks");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => Self::from_tasks(tasks),
            Err(e) => {
                warn!(error = %e, "discarding corrupted task list");
                if let Err(e) = store.remove(keys::TASKS) {
                    warn!(error = %e, "failed to delete corrupted task list");
                }
                Self::default()
            }
        }
    }

    /// Build a list, repairing more than one active task or an active
    /// completed task.
    #[must_use]
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        let mut seen_active = false;
        for task in &mut tasks {
            if task.active && (task.completed || seen_active) {
                debug!(id = task.id, "clearing stale active flag");
                task.active = false;
            }
            seen_active |= task.active;
        }
        Self { tasks }
    }

    /// Persist the list.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), TomatoError> {
        store.set(keys::TASKS, &serde_json::to_string(&self.tasks)?)
    }

    /// Append a task.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is blank.
    pub fn add(&mut self, text: &str) -> Result<Task, TomatoError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TomatoError::InvalidArgument(
                "Task text cannot be empty".to_string(),
            ));
        }

        let id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task::new(id, text);
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Flip a task between open and completed.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has this id.
    pub fn toggle(&mut self, id: u64) -> Result<Task, TomatoError> {
        let task = self.find_mut(id)?;
        task.completed = !task.completed;
        if task.completed {
            task.active = false;
        }
        Ok(task.clone())
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has this id.
    pub fn remove(&mut self, id: u64) -> Result<Task, TomatoError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;
        Ok(self.tasks.remove(index))
    }

    /// Make a task the active one, or deactivate it if it already is.
    ///
    /// Returns the active task afterwards, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has this id or the task is completed.
    pub fn set_active(&mut self, id: u64) -> Result<Option<Task>, TomatoError> {
        let task = self.find_mut(id)?;
        if task.completed {
            return Err(TomatoError::InvalidArgument(format!(
                "Task {id} is completed and cannot be active"
            )));
        }

        let activate = !task.active;
        for task in &mut self.tasks {
            task.active = activate && task.id == id;
        }
        Ok(self.active().cloned())
    }

    /// Delete every completed task. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        before - self.tasks.len()
    }

    /// The active task, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.active)
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of open tasks.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Task, TomatoError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: u64) -> TomatoError {
    TomatoError::NotFound(format!("Task {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn list_of(texts: &[&str]) -> TaskList {
        let mut list = TaskList::default();
        for text in texts {
            list.add(text).unwrap();
        }
        list
    }

    #[test]
    fn test_add_trims_and_numbers() {
        let mut list = TaskList::default();
        let first = list.add("  write report ").unwrap();
        let second = list.add("review PR").unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(first.text, "write report");
        assert_eq!(second.id, 2);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_add_rejects_blank() {
        let mut list = TaskList::default();
        assert!(matches!(
            list.add("   "),
            Err(TomatoError::InvalidArgument(_))
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut list = list_of(&["a", "b", "c"]);
        list.remove(2).unwrap();
        assert_eq!(list.add("d").unwrap().id, 4);

        list.remove(4).unwrap();
        list.remove(3).unwrap();
        // Only the highest id is tracked
        assert_eq!(list.add("e").unwrap().id, 2);
    }

    #[test]
    fn test_toggle_deactivates() {
        let mut list = list_of(&["a", "b"]);
        list.set_active(1).unwrap();

        let done = list.toggle(1).unwrap();
        assert!(done.completed);
        assert!(!done.active);
        assert!(list.active().is_none());

        let reopened = list.toggle(1).unwrap();
        assert!(!reopened.completed);
    }

    #[test]
    fn test_set_active_single() {
        let mut list = list_of(&["a", "b", "c"]);

        assert_eq!(list.set_active(1).unwrap().unwrap().id, 1);
        assert_eq!(list.set_active(3).unwrap().unwrap().id, 3);
        assert_eq!(list.iter().filter(|t| t.active).count(), 1);

        // Activating the active task again clears it
        assert_eq!(list.set_active(3).unwrap(), None);
        assert!(list.active().is_none());
    }

    #[test]
    fn test_set_active_rejects_completed() {
        let mut list = list_of(&["a"]);
        list.toggle(1).unwrap();

        assert!(matches!(
            list.set_active(1),
            Err(TomatoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unknown_id() {
        let mut list = list_of(&["a"]);
        assert!(matches!(list.toggle(9), Err(TomatoError::NotFound(_))));
        assert!(matches!(list.remove(9), Err(TomatoError::NotFound(_))));
        assert!(matches!(list.set_active(9), Err(TomatoError::NotFound(_))));
    }

    #[test]
    fn test_clear_completed() {
        let mut list = list_of(&["a", "b", "c"]);
        list.toggle(1).unwrap();
        list.toggle(3).unwrap();

        assert_eq!(list.clear_completed(), 2);
        assert_eq!(list.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(list.remaining(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut list = list_of(&["a", "b"]);
        list.set_active(2).unwrap();
        list.save(&mut store).unwrap();

        assert_eq!(
            store.get(keys::TASKS).unwrap().unwrap(),
            r#"[{"id":1,"text":"a","completed":false,"active":false},{"id":2,"text":"b","completed":false,"active":true}]"#
        );
        assert_eq!(TaskList::load(&mut store), list);
    }

    #[test]
    fn test_load_corrupted() {
        let mut store = MemoryStore::new();
        store.set(keys::TASKS, "[{\"id\":").unwrap();

        assert!(TaskList::load(&mut store).is_empty());
        assert_eq!(store.get(keys::TASKS).unwrap(), None);
    }

    #[test]
    fn test_from_tasks_repairs_active() {
        let mut done = Task::new(1, "a");
        done.completed = true;
        done.active = true;
        let mut first = Task::new(2, "b");
        first.active = true;
        let mut second = Task::new(3, "c");
        second.active = true;

        let list = TaskList::from_tasks(vec![done, first, second]);
        assert_eq!(list.active().map(|t| t.id), Some(2));
        assert_eq!(list.iter().filter(|t| t.active).count(), 1);
    }
}
