//! Docker engine access for docknav.
//!
//! This module provides:
//! - The `DockerOperations` trait, the only seam between the views and the engine
//! - A bollard-backed `DockerManager` implementing it
//! - Plain domain types the views render

pub mod manager;
pub mod types;

pub use self::manager::{DockerManager, DockerOperations, EngineHost};
pub use self::types::*;
