pub mod auth;
pub mod config;
pub mod serve;

use std::sync::Arc;

use todocal_provider_google::FileCredentials;

use crate::config::Config;

/// Google credentials as configured.
pub fn credentials(cfg: &Config) -> Arc<FileCredentials> {
    Arc::new(
        FileCredentials::new(cfg.google.token_path(), cfg.google.client_secret_path())
            .interactive_consent(cfg.google.interactive_consent)
            .consent_timeout(cfg.google.consent_timeout()),
    )
}
