//! Calendar-side representations of tasks.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Time zone attached to every event we write.
pub const EVENT_TIME_ZONE: &str = "UTC";

/// A start or end time in the provider's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

impl EventDateTime {
    pub fn utc(at: DateTime<Utc>) -> Self {
        EventDateTime {
            date_time: at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            time_zone: EVENT_TIME_ZONE.to_string(),
        }
    }
}

/// Body submitted to the calendar provider when a task is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBody {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
}

impl EventBody {
    /// Default length of an event created from a task without an end.
    pub const DEFAULT_DURATION_HOURS: i64 = 1;

    pub fn from_task(task: &Task) -> Self {
        let end = task
            .end_date
            .unwrap_or(task.start_date + Duration::hours(Self::DEFAULT_DURATION_HOURS));

        EventBody {
            summary: task.todo.clone(),
            description: format!("Tag: {}", task.tag),
            start: EventDateTime::utc(task.start_date),
            end: EventDateTime::utc(end),
        }
    }
}

/// What we keep of an event when listing today's calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub summary: String,
    /// `dateTime` of the event, or its all-day `date`
    pub start: String,
    pub end: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn task(end: Option<DateTime<Utc>>) -> Task {
        Task {
            id: Uuid::new_v4(),
            todo: "Write report".to_string(),
            tag: "work".to_string(),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            end_date: end,
        }
    }

    #[test]
    fn end_defaults_to_one_hour_after_start() {
        let body = EventBody::from_task(&task(None));

        assert_eq!(body.start.date_time, "2024-01-01T09:00:00Z");
        assert_eq!(body.end.date_time, "2024-01-01T10:00:00Z");
        assert_eq!(body.end.time_zone, "UTC");
    }

    #[test]
    fn supplied_end_is_used() {
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
        let body = EventBody::from_task(&task(Some(end)));

        assert_eq!(body.end.date_time, "2024-01-01T12:30:00Z");
    }

    #[test]
    fn description_embeds_tag() {
        let body = EventBody::from_task(&task(None));

        assert_eq!(body.summary, "Write report");
        assert_eq!(body.description, "Tag: work");
    }

    #[test]
    fn serializes_in_provider_shape() {
        let json = serde_json::to_value(EventBody::from_task(&task(None))).unwrap();

        assert_eq!(json["start"]["dateTime"], "2024-01-01T09:00:00Z");
        assert_eq!(json["start"]["timeZone"], "UTC");
    }
}
