//! Access token capability used by calendar gateways.

use async_trait::async_trait;

use crate::error::CredentialError;

/// Supplies a valid access token on demand.
///
/// Implementations decide where tokens live and how they are refreshed.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, CredentialError>;
}

/// A fixed token, for tests or tokens managed outside the process.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken(token.into())
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn access_token(&self) -> Result<String, CredentialError> {
        Ok(self.0.clone())
    }
}
