//! Google Calendar provider for todocal.
//!
//! - `app_config`: the OAuth client secret file
//! - `session`: the stored token, refreshed or re-consented on demand
//! - `consent`: the browser consent flow on a loopback redirect
//! - `calendar`: the Calendar REST gateway

pub mod app_config;
pub mod calendar;
pub mod consent;
pub mod session;

pub use calendar::GoogleCalendar;
pub use session::{FileCredentials, SessionData};

pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar"];
