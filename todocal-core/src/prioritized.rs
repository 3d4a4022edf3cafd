//! Prioritized tasks returned by the remote prioritization service.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TodocalError, TodocalResult};

/// A task name paired with the priority label the service gave it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizedTask {
    pub name: String,
    pub priority: String,
}

impl PrioritizedTask {
    /// Parse a `"<task name>: <priority label>"` entry.
    ///
    /// Splits on the first colon; both halves are trimmed.
    pub fn parse(entry: &str) -> TodocalResult<Self> {
        let (name, priority) = entry
            .split_once(':')
            .ok_or_else(|| TodocalError::MalformedEntry(entry.to_string()))?;

        Ok(PrioritizedTask {
            name: name.trim().to_string(),
            priority: priority.trim().to_string(),
        })
    }
}

impl FromStr for PrioritizedTask {
    type Err = TodocalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
