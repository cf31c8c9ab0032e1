use std::path::PathBuf;

use clap::Parser;
use marks_config::MarksConfig;

/// Command-line flags for the `marksd` binary.
#[derive(Debug, Parser)]
#[command(name = "marksd", version, about = "Teacher portal for recording student marks")]
pub struct Cli {
    /// Extra TOML config file, layered above marks.toml and below MARKS_* env vars
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Interface to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Database path or :memory: (overrides config)
    #[arg(long)]
    pub database: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut MarksConfig) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database) = &self.database {
            config.database.path.clone_from(database);
        }
    }
}
