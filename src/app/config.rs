//! Command-line configuration and logging setup.
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::{Context, Result};
use crate::source::{DEFAULT_URL, HttpSettings};

#[derive(Debug, Clone, Parser)]
#[command(name = "user-directory", version, about = "Browse user records fetched from a JSON endpoint")]
pub struct Cli {
    /// Endpoint returning a JSON array of user records.
    #[arg(long, env = "USER_DIRECTORY_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Whole-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Theme file (`key = #RRGGBB` lines). Read only.
    #[arg(long)]
    pub theme: Option<PathBuf>,

    /// Keybindings file (`Action = Key` lines). Read only.
    #[arg(long)]
    pub keybinds: Option<PathBuf>,

    /// Write tracing output here. Without it nothing is logged, stdout belongs to the TUI.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            url: self.url.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs.max(1)),
            ..HttpSettings::default()
        }
    }

    pub fn theme_path(&self) -> Option<String> {
        self.theme.as_ref().map(|p| p.to_string_lossy().into_owned())
    }

    pub fn keybinds_path(&self) -> Option<String> {
        self.keybinds.as_ref().map(|p| p.to_string_lossy().into_owned())
    }
}

/// Install a `fmt` subscriber writing to `log_file`, filtered by `RUST_LOG`
/// (default `info`). A `None` path installs nothing.
pub fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_ctx(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_public_endpoint() {
        let cli = Cli::try_parse_from(["user-directory"]).expect("parse");
        assert_eq!(cli.url, DEFAULT_URL);
        assert_eq!(cli.http_settings().request_timeout, Duration::from_secs(30));
        assert!(cli.theme_path().is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "user-directory",
            "--url",
            "http://localhost:9/users",
            "--timeout-secs",
            "0",
            "--keybinds",
            "/tmp/keys.conf",
        ])
        .expect("parse");
        let settings = cli.http_settings();
        assert_eq!(settings.url, "http://localhost:9/users");
        assert_eq!(settings.request_timeout, Duration::from_secs(1));
        assert_eq!(cli.keybinds_path().as_deref(), Some("/tmp/keys.conf"));
    }
}
