//! docknav is a terminal UI for browsing and managing a Docker engine.
//!
//! This library provides functionality to:
//! - List, inspect, create, start, stop and remove containers
//! - Pull, inspect and remove images
//! - Create, inspect and remove networks and volumes
//! - Show engine information and disk usage, and prune unused resources

pub mod cli;
pub mod config;
pub mod docker;
pub mod error;
pub mod ui;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Settings;
pub use docker::{DockerManager, DockerOperations, EngineHost};
pub use error::DockNavError;
pub use ui::App;

pub type Result<T> = std::result::Result<T, DockNavError>;
