//! docknav is a terminal UI for the Docker engine.
//!
//! This is the main entry point that loads settings, connects to the engine
//! and hands the terminal over to the UI.

use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use clap::Parser;
use console::style;
use docknav::{Cli, DockerManager, Settings};
use tracing::{debug, info, warn};

fn init_logging(cli: &Cli) -> docknav::Result<()> {
    let log_path = match &cli.log_file {
        Some(path) => path.clone(),
        None => Settings::default_log_path()?,
    };
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let level_string = if cli.verbose {
        "docknav=debug"
    } else {
        "docknav=info"
    };

    // The terminal belongs to the UI, so logs go to a file
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_env_filter(level_string)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    Ok(())
}

fn load_settings(cli: &Cli) -> docknav::Result<Settings> {
    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Falling back to default settings: {}", e);
            eprintln!("{} {}", style("Warning:").yellow().bold(), e);
            Settings::default()
        }
    };
    cli.apply(&mut settings);
    settings.validate()?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> docknav::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("{} Failed to open log file: {}", style("Warning:").yellow().bold(), e);
    }
    debug!("Logging initialized");

    let settings = load_settings(&cli)?;
    debug!("Settings: {:?}", settings);

    let docker = DockerManager::connect(settings.docker_host.as_deref(), settings.stop_timeout_secs)
        .map_err(|e| {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            e
        })?;
    info!("Connected to Docker engine");

    let show_all = docknav::ui::run(Arc::new(docker), &settings).await?;

    if show_all != settings.show_all_containers {
        // Persist the toggle against the file contents, not the CLI overrides
        let mut stored = Settings::load().unwrap_or_default();
        stored.show_all_containers = show_all;
        stored.save()?;
        debug!("Saved show_all_containers = {}", show_all);
    }

    Ok(())
}
