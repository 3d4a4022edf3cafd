use std::sync::Arc;

use todocal_core::CalendarGateway;

use crate::prioritizer::PrioritizationClient;
use crate::store::TaskStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub calendar: Arc<dyn CalendarGateway>,
    pub prioritizer: PrioritizationClient,
    pub store: Arc<TaskStore>,
}

impl AppState {
    /// State with a fresh, empty task store.
    pub fn new(calendar: Arc<dyn CalendarGateway>, prioritizer: PrioritizationClient) -> Self {
        AppState {
            calendar,
            prioritizer,
            store: Arc::new(TaskStore::new()),
        }
    }

    pub fn with_store(mut self, store: Arc<TaskStore>) -> Self {
        self.store = store;
        self
    }
}
