use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// A small HTTP/1.1 server.
#[derive(Debug, Parser)]
#[command(name = "courier", version)]
pub struct Cli {
    /// Directory served and written by /files/
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:4221
    #[arg(long)]
    pub listen: Option<String>,

    /// YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seconds to wait for the next request before closing a connection
    #[arg(long = "idle-timeout")]
    pub idle_timeout_secs: Option<u64>,
}

impl Cli {
    /// Builds the effective config: environment defaults, then the config
    /// file if given, then command-line flags.
    pub fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load(),
        };

        if let Some(directory) = self.directory {
            cfg.directory = Some(directory);
        }
        if let Some(listen) = self.listen {
            cfg.listen_addr = listen;
        }
        if let Some(secs) = self.idle_timeout_secs {
            cfg.idle_timeout_secs = secs;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
