//! Command line argument parsing for docknav.
//!
//! This module handles parsing of command line arguments using the clap
//! crate and layering them over the persisted settings.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;

/// Command line arguments for docknav
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging for detailed processing information
    #[arg(short, long)]
    pub verbose: bool,

    /// Docker host to connect to (unix://, tcp:// or http://)
    #[arg(short = 'H', long, env = "DOCKER_HOST")]
    pub host: Option<String>,

    /// Number of log lines to fetch for a container
    #[arg(long, value_name = "LINES")]
    pub log_tail: Option<u32>,

    /// Start with only running containers listed
    #[arg(long)]
    pub running: bool,

    /// Write logs to this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of loaded settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.docker_host = Some(host.clone());
        }
        if let Some(tail) = self.log_tail {
            settings.log_tail = tail;
        }
        if self.running {
            settings.show_all_containers = false;
        }
    }
}
