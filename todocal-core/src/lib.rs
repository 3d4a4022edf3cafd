//! Core types for todocal.
//!
//! This crate provides the types shared by the server and the calendar providers:
//! - `Task` and the payload used to create one
//! - `EventBody` / `EventSummary` for the calendar side
//! - the `CalendarGateway` and `CredentialProvider` seams

pub mod calendar;
pub mod credentials;
pub mod day_window;
pub mod error;
pub mod event;
pub mod prioritized;
pub mod task;

pub use calendar::{CalendarGateway, TodayEvents};
pub use credentials::{CredentialProvider, StaticToken};
pub use day_window::DayWindow;
pub use error::{CalendarError, CredentialError, TodocalError, TodocalResult};
pub use event::{EventBody, EventDateTime, EventSummary};
pub use prioritized::PrioritizedTask;
pub use task::{NewTask, Task};
