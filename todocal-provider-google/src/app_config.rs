//! OAuth client credentials for the Google provider.
//!
//! Read from the client secret JSON downloaded from the Google Cloud console.
//! Both the console's `{"installed": {...}}` / `{"web": {...}}` wrappers and a
//! flat `{"client_id", "client_secret"}` object are accepted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Google OAuth client credentials (user-provided).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClientSecretFile {
    Installed { installed: Credentials },
    Web { web: Credentials },
    Flat(Credentials),
}

impl From<ClientSecretFile> for Credentials {
    fn from(file: ClientSecretFile) -> Self {
        match file {
            ClientSecretFile::Installed { installed } => installed,
            ClientSecretFile::Web { web } => web,
            ClientSecretFile::Flat(creds) => creds,
        }
    }
}

pub fn load(path: &Path) -> Result<Credentials> {
    if !path.exists() {
        anyhow::bail!(
            "Google client secret not found.\n\n\
            Download the OAuth client JSON for a desktop app from\n\
            https://console.cloud.google.com/apis/credentials and save it as {}",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read client secret from {}", path.display()))?;

    parse(&contents).with_context(|| format!("Failed to parse client secret from {}", path.display()))
}

fn parse(contents: &str) -> Result<Credentials> {
    let file: ClientSecretFile = serde_json::from_str(contents)?;
    Ok(file.into())
}
