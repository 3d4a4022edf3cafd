//! In-memory task list, alive for as long as the server process.

use parking_lot::RwLock;

use todocal_core::Task;

/// Append-only, insertion-ordered list of created tasks.
///
/// Ids are not checked for uniqueness.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, task: Task) {
        self.tasks.write().push(task);
    }

    pub fn list_all(&self) -> Vec<Task> {
        self.tasks.read().clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }
}
