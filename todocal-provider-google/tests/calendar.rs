use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use todocal_core::{
    CalendarError, CalendarGateway, CredentialError, CredentialProvider, StaticToken, Task,
    TodayEvents,
};
use todocal_provider_google::GoogleCalendar;

fn gateway(server: &MockServer) -> GoogleCalendar {
    GoogleCalendar::new(Arc::new(StaticToken::new("test-token"))).with_api_base(server.uri())
}

fn task(end: Option<chrono::DateTime<Utc>>) -> Task {
    Task {
        id: Uuid::new_v4(),
        todo: "Write report".to_string(),
        tag: "work".to_string(),
        start_date: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        end_date: end,
    }
}

#[tokio::test]
async fn list_day_queries_the_utc_day_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("timeMin", "2024-01-01T00:00:00.000000Z"))
        .and(query_param("timeMax", "2024-01-01T23:59:59.999999Z"))
        .and(query_param("maxResults", "20"))
        .and(query_param("singleEvents", "true"))
        .and(query_param("orderBy", "startTime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "calendar#events",
            "items": [
                {
                    "summary": "Standup",
                    "start": {"dateTime": "2024-01-01T09:00:00Z"},
                    "end": {"dateTime": "2024-01-01T09:15:00Z"},
                    "description": "daily"
                },
                {
                    "start": {"date": "2024-01-01"},
                    "end": {"date": "2024-01-02"}
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let events = gateway(&server)
        .list_day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .await
        .unwrap();

    let events = match events {
        TodayEvents::Events(events) => events,
        TodayEvents::NoEvents => panic!("expected events"),
    };
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].summary, "Standup");
    assert_eq!(events[0].start, "2024-01-01T09:00:00Z");
    assert_eq!(events[0].description, "daily");
    assert_eq!(events[1].summary, "No Title");
    assert_eq!(events[1].start, "2024-01-01");
}

#[tokio::test]
async fn zero_items_is_the_no_events_signal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let events = gateway(&server).list_today().await.unwrap();
    assert_eq!(events, TodayEvents::NoEvents);
}

#[tokio::test]
async fn missing_items_field_is_the_no_events_signal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "calendar#events"})))
        .mount(&server)
        .await;

    let events = gateway(&server).list_today().await.unwrap();
    assert_eq!(events, TodayEvents::NoEvents);
}

#[tokio::test]
async fn provider_error_is_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("insufficient permissions"))
        .mount(&server)
        .await;

    let err = gateway(&server).list_today().await.unwrap_err();

    match err {
        CalendarError::Api { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "insufficient permissions");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"items": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = gateway(&server)
        .with_timeout(Duration::from_millis(100))
        .list_today()
        .await
        .unwrap_err();

    assert!(matches!(err, CalendarError::Timeout(_)));
}

#[tokio::test]
async fn create_event_defaults_end_to_one_hour() {
    let server = MockServer::start().await;
    let created = json!({
        "id": "evt123",
        "status": "confirmed",
        "htmlLink": "https://www.google.com/calendar/event?eid=evt123",
        "summary": "Write report",
        "start": {"dateTime": "2024-01-01T09:00:00Z", "timeZone": "UTC"},
        "end": {"dateTime": "2024-01-01T10:00:00Z", "timeZone": "UTC"}
    });

    Mock::given(method("POST"))
        .and(path("/calendars/primary/events"))
        .and(body_json(json!({
            "summary": "Write report",
            "description": "Tag: work",
            "start": {"dateTime": "2024-01-01T09:00:00Z", "timeZone": "UTC"},
            "end": {"dateTime": "2024-01-01T10:00:00Z", "timeZone": "UTC"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(created.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let event = gateway(&server).create_event(&task(None)).await.unwrap();
    assert_eq!(event, created);
}

#[tokio::test]
async fn create_event_uses_supplied_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "summary": "Write report",
            "description": "Tag: work",
            "start": {"dateTime": "2024-01-01T09:00:00Z", "timeZone": "UTC"},
            "end": {"dateTime": "2024-01-01T11:30:00Z", "timeZone": "UTC"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "evt"})))
        .expect(1)
        .mount(&server)
        .await;

    let end = Utc.with_ymd_and_hms(2024, 1, 1, 11, 30, 0).unwrap();
    gateway(&server).create_event(&task(Some(end))).await.unwrap();
}

struct NoToken;

#[async_trait::async_trait]
impl CredentialProvider for NoToken {
    async fn access_token(&self) -> Result<String, CredentialError> {
        Err(CredentialError::Missing("no token".to_string()))
    }
}

#[tokio::test]
async fn credential_failure_skips_the_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = GoogleCalendar::new(Arc::new(NoToken))
        .with_api_base(server.uri())
        .create_event(&task(None))
        .await
        .unwrap_err();

    assert!(matches!(err, CalendarError::Credentials(CredentialError::Missing(_))));
}
