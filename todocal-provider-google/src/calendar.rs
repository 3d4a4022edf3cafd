//! Google Calendar gateway over the Calendar v3 REST API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use todocal_core::{
    CalendarError, CalendarGateway, CredentialProvider, DayWindow, EventBody, EventSummary, Task,
    TodayEvents,
};

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google's alias for the user's main calendar
pub const DEFAULT_CALENDAR_ID: &str = "primary";

pub const DEFAULT_MAX_RESULTS: u32 = 20;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GoogleCalendar {
    http: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
    api_base: String,
    calendar_id: String,
    max_results: u32,
    timeout: Duration,
}

impl GoogleCalendar {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        GoogleCalendar {
            http: reqwest::Client::new(),
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Events of one UTC day, ordered by start time.
    pub async fn list_day(&self, date: NaiveDate) -> Result<TodayEvents, CalendarError> {
        let window = DayWindow::for_date(date);
        let token = self.credentials.access_token().await?;

        debug!(calendar = %self.calendar_id, time_min = %window.time_min(), "listing events");

        let response = self
            .http
            .get(self.events_url()?)
            .bearer_auth(token)
            .query(&[
                ("timeMin", window.time_min()),
                ("timeMax", window.time_max()),
                ("maxResults", self.max_results.to_string()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = check_status(response).await?;

        let list: GoogleEventList = response
            .json()
            .await
            .map_err(|e| CalendarError::InvalidResponse(e.to_string()))?;

        Ok(TodayEvents::from_events(
            list.items.into_iter().map(EventSummary::from).collect(),
        ))
    }

    fn events_url(&self) -> Result<Url, CalendarError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| CalendarError::Transport(format!("Invalid API base {}: {}", self.api_base, e)))?;

        url.path_segments_mut()
            .map_err(|_| CalendarError::Transport(format!("Invalid API base {}", self.api_base)))?
            .pop_if_empty()
            .extend(["calendars", self.calendar_id.as_str(), "events"]);

        Ok(url)
    }

    fn transport_error(&self, err: reqwest::Error) -> CalendarError {
        if err.is_timeout() {
            CalendarError::Timeout(self.timeout.as_secs())
        } else {
            CalendarError::Transport(err.to_string())
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CalendarError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CalendarError::Api {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl CalendarGateway for GoogleCalendar {
    async fn list_today(&self) -> Result<TodayEvents, CalendarError> {
        self.list_day(chrono::Utc::now().date_naive()).await
    }

    async fn create_event(&self, task: &Task) -> Result<Value, CalendarError> {
        let body = EventBody::from_task(task);
        let token = self.credentials.access_token().await?;

        debug!(calendar = %self.calendar_id, summary = %body.summary, "inserting event");

        let response = self
            .http
            .post(self.events_url()?)
            .bearer_auth(token)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| CalendarError::InvalidResponse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GoogleEventList {
    #[serde(default)]
    items: Vec<GoogleEvent>,
}

#[derive(Debug, Deserialize)]
struct GoogleEvent {
    summary: Option<String>,
    description: Option<String>,
    #[serde(default)]
    start: GoogleEventTime,
    #[serde(default)]
    end: GoogleEventTime,
}

/// Either a timed (`dateTime`) or an all-day (`date`) boundary.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventTime {
    date_time: Option<String>,
    date: Option<String>,
}

impl GoogleEventTime {
    fn into_string(self) -> String {
        self.date_time.or(self.date).unwrap_or_default()
    }
}

impl From<GoogleEvent> for EventSummary {
    fn from(event: GoogleEvent) -> Self {
        EventSummary {
            summary: event.summary.unwrap_or_else(|| "No Title".to_string()),
            start: event.start.into_string(),
            end: event.end.into_string(),
            description: event.description.unwrap_or_default(),
        }
    }
}
