use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::config::{self, Config};

pub fn show(path: &Path, cfg: &Config) -> Result<()> {
    println!("{}", "Paths".bold());
    println!(
        "  Config:         {}{}",
        path.display(),
        if path.exists() { "" } else { " (not found, using defaults)" }
    );
    println!("  Client secret:  {}", cfg.google.client_secret_path().display());
    println!("  Token:          {}", cfg.google.token_path().display());
    println!();
    println!("{}", "Effective settings".bold());

    let rendered = toml::to_string_pretty(cfg).context("Failed to render config")?;
    for line in rendered.lines() {
        println!("  {}", line);
    }

    Ok(())
}

pub fn init(path: &Path) -> Result<()> {
    config::create_default_config(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
