//! The calendar gateway seam.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CalendarError;
use crate::event::EventSummary;
use crate::task::Task;

/// Result of listing today's events.
///
/// "No events" is its own variant so callers can tell it apart from an error
/// and from a non-empty day.
#[derive(Debug, Clone, PartialEq)]
pub enum TodayEvents {
    NoEvents,
    Events(Vec<EventSummary>),
}

impl TodayEvents {
    pub fn from_events(events: Vec<EventSummary>) -> Self {
        if events.is_empty() {
            TodayEvents::NoEvents
        } else {
            TodayEvents::Events(events)
        }
    }
}

/// Read and write access to the user's calendar.
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    /// Events of the current UTC day, ordered by start time.
    async fn list_today(&self) -> Result<TodayEvents, CalendarError>;

    /// Insert an event built from `task`, returning the provider's created event verbatim.
    async fn create_event(&self, task: &Task) -> Result<Value, CalendarError>;
}
