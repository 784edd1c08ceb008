use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30;
/// One day. Larger values cannot always be added to an `Instant`.
pub const MAX_IDLE_TIMEOUT_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Base directory for `/files/`. `None` disables the file routes.
    pub directory: Option<PathBuf>,
    pub idle_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: None,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Defaults overridden by `LISTEN`, `FILES_DIR` and `IDLE_TIMEOUT_SECS`.
    /// Unparsable or out-of-range timeouts fall back to the default.
    pub fn load() -> Self {
        let defaults = Self::default();

        let listen_addr = std::env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let directory = std::env::var_os("FILES_DIR").map(PathBuf::from);
        let idle_timeout_secs = std::env::var("IDLE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs| valid_idle_timeout(*secs))
            .unwrap_or(defaults.idle_timeout_secs);

        Self {
            listen_addr,
            directory,
            idle_timeout_secs,
        }
    }

    /// Parses a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml).context("invalid config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&raw)
    }

    /// The idle timeout must lie in `1..=MAX_IDLE_TIMEOUT_SECS`.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !valid_idle_timeout(self.idle_timeout_secs) {
            anyhow::bail!(
                "idle timeout must be between 1 and {MAX_IDLE_TIMEOUT_SECS} seconds, got {}",
                self.idle_timeout_secs
            );
        }
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

fn valid_idle_timeout(secs: u64) -> bool {
    (1..=MAX_IDLE_TIMEOUT_SECS).contains(&secs)
}
