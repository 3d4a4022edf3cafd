use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use todocal_core::CalendarGateway;
use todocal_provider_google::GoogleCalendar;
use todocal_server::{AppState, PrioritizationClient};

use crate::commands::credentials;
use crate::config::Config;

pub async fn run(cfg: &Config) -> Result<()> {
    let ip: IpAddr = cfg
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid server host '{}': expected an IP address", cfg.server.host))?;
    let addr = SocketAddr::new(ip, cfg.server.port);

    let calendar: Arc<dyn CalendarGateway> = Arc::new(
        GoogleCalendar::new(credentials(cfg))
            .with_api_base(&cfg.calendar.api_base)
            .with_calendar_id(&cfg.calendar.calendar_id)
            .with_max_results(cfg.calendar.max_results)
            .with_timeout(cfg.calendar.timeout()),
    );

    let prioritizer = PrioritizationClient::new(&cfg.prioritizer.url, cfg.prioritizer.timeout());

    info!(
        prioritizer = %prioritizer.url(),
        calendar = %cfg.calendar.calendar_id,
        "starting todocal"
    );

    todocal_server::serve(addr, AppState::new(calendar, prioritizer)).await
}
