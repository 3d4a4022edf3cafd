//! Tasks ("todos") as created through the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task that has been accepted by the server.
///
/// The id is assigned once, when the task is created, and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub todo: String,
    pub tag: String,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Request body for creating a task. The id is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub todo: String,
    pub tag: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Turn the payload into a `Task`, generating an id if the caller didn't supply one.
    pub fn into_task(self) -> Task {
        Task {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            todo: self.todo,
            tag: self.tag,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
