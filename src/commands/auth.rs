use anyhow::Result;

use crate::commands::credentials;
use crate::config::Config;

pub async fn run(cfg: &Config) -> Result<()> {
    println!("Authenticating with Google Calendar...");

    let creds = credentials(cfg);
    creds.authenticate().await?;

    println!("\nAuthentication successful!");
    println!("Token saved to {}", creds.token_path().display());
    println!("\nRun `todocal serve` to start the API.");

    Ok(())
}
