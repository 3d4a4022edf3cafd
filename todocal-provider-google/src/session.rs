//! Keeps a valid Google access token for the calendar gateway.
//!
//! The token lives in a JSON file. Files written by Google's Python client
//! (`token`, `expiry` keys) are read as well.

use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use todocal_core::{CredentialError, CredentialProvider};

use crate::app_config::{self, Credentials};
use crate::consent;

/// Tokens are refreshed this long before they actually expire.
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionData {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default, alias = "expiry")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&AccessToken> for SessionData {
    fn from(tokens: &AccessToken) -> Self {
        let lifetime = if tokens.expires_in > 0 {
            tokens.expires_in
        } else {
            DEFAULT_TOKEN_LIFETIME_SECS
        };

        SessionData {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at: Some(Utc::now() + Duration::seconds(lifetime)),
        }
    }
}

impl SessionData {
    /// A token of unknown age counts as expired when it can be refreshed.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() + Duration::seconds(EXPIRY_LEEWAY_SECS) >= expires_at,
            None => self.can_refresh(),
        }
    }

    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read Google OAuth token from {}", path.display()))?;

        let data = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse Google OAuth token from {}", path.display()))?;

        Ok(Some(data))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize token")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write token to {}", path.display()))?;

        // Set to owner-only (0600) since file contains OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
        }

        Ok(())
    }

    async fn refresh(&self, creds: &Credentials) -> Result<Self> {
        let client = Client::new(
            creds.client_id.clone(),
            creds.client_secret.clone(),
            String::new(),
            self.access_token.clone(),
            self.refresh_token.clone(),
        );

        let mut tokens = client
            .refresh_access_token()
            .await
            .context("Failed to refresh token")?;

        // Google typically doesn't return a new refresh_token on refresh
        if tokens.refresh_token.is_empty() {
            tokens.refresh_token = self.refresh_token.clone();
        }

        Ok((&tokens).into())
    }
}

/// File-backed credentials: load, refresh when expired, fall back to browser consent.
pub struct FileCredentials {
    token_path: PathBuf,
    client_secret_path: PathBuf,
    interactive_consent: bool,
    consent_timeout: StdDuration,
    session: Mutex<Option<SessionData>>,
    consent: Mutex<()>,
}

impl FileCredentials {
    pub fn new(token_path: impl Into<PathBuf>, client_secret_path: impl Into<PathBuf>) -> Self {
        FileCredentials {
            token_path: token_path.into(),
            client_secret_path: client_secret_path.into(),
            interactive_consent: true,
            consent_timeout: consent::DEFAULT_TIMEOUT,
            session: Mutex::new(None),
            consent: Mutex::new(()),
        }
    }

    /// Whether a missing or unrefreshable token may trigger the browser flow.
    pub fn interactive_consent(mut self, enabled: bool) -> Self {
        self.interactive_consent = enabled;
        self
    }

    /// How long to wait for the browser to come back from the consent page.
    pub fn consent_timeout(mut self, timeout: StdDuration) -> Self {
        self.consent_timeout = timeout;
        self
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// Run the consent flow now and store the result, regardless of any existing token.
    pub async fn authenticate(&self) -> Result<SessionData> {
        let _consent = self.consent.lock().await;
        let creds = app_config::load(&self.client_secret_path)?;
        let data = consent::run(&creds, self.consent_timeout).await?;
        data.save(&self.token_path)?;

        *self.session.lock().await = Some(data.clone());
        Ok(data)
    }

    async fn valid_session(&self) -> Result<SessionData, CredentialError> {
        if let Some(session) = self.stored_session().await? {
            return Ok(session);
        }

        if !self.interactive_consent {
            return Err(CredentialError::Missing(format!(
                "no usable token at {}; run `todocal auth` first",
                self.token_path.display()
            )));
        }

        // Only one browser flow at a time; other callers fail fast meanwhile.
        let Ok(_consent) = self.consent.try_lock() else {
            return Err(CredentialError::Consent(
                "browser consent already in progress".to_string(),
            ));
        };

        info!("no usable Google token, starting browser consent");
        let creds = app_config::load(&self.client_secret_path)
            .map_err(|e| CredentialError::Consent(format!("{e:#}")))?;
        let data = consent::run(&creds, self.consent_timeout)
            .await
            .map_err(|e| CredentialError::Consent(format!("{e:#}")))?;
        data.save(&self.token_path)
            .map_err(|e| CredentialError::Storage(format!("{e:#}")))?;

        *self.session.lock().await = Some(data.clone());
        Ok(data)
    }

    /// The cached or on-disk token, refreshed if needed. `None` means consent is required.
    async fn stored_session(&self) -> Result<Option<SessionData>, CredentialError> {
        // Held across refresh so concurrent requests don't refresh twice.
        let mut guard = self.session.lock().await;

        if guard.is_none() {
            *guard = SessionData::load(&self.token_path)
                .map_err(|e| CredentialError::Storage(format!("{e:#}")))?;
        }

        if let Some(session) = guard.clone() {
            if !session.is_expired() {
                return Ok(Some(session));
            }

            if session.can_refresh() {
                debug!(path = %self.token_path.display(), "access token expired, refreshing");
                let creds = app_config::load(&self.client_secret_path)
                    .map_err(|e| CredentialError::Refresh(format!("{e:#}")))?;
                let refreshed = session
                    .refresh(&creds)
                    .await
                    .map_err(|e| CredentialError::Refresh(format!("{e:#}")))?;
                refreshed
                    .save(&self.token_path)
                    .map_err(|e| CredentialError::Storage(format!("{e:#}")))?;

                *guard = Some(refreshed.clone());
                return Ok(Some(refreshed));
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl CredentialProvider for FileCredentials {
    async fn access_token(&self) -> Result<String, CredentialError> {
        Ok(self.valid_session().await?.access_token)
    }
}
