//! The one error type shared by the engine layer, settings and the UI.
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can fail between the terminal and the engine
#[derive(Debug, Error)]
pub enum DockNavError {
    /// The engine refused a request or could not be reached
    #[error("Docker error: {0}")]
    Docker(String),
    /// A settings value is out of range
    #[error("Configuration error: {0}")]
    Config(String),
    /// The settings file could not be read, parsed or written
    #[error("{message} (configuration file path: {path}): {source}")]
    ConfigFile {
        message: String,
        path: PathBuf,
        /// Underlying io or serde failure
        source: anyhow::Error,
    },
    /// Log file or terminal io
    #[error("IO error: {0}")]
    Io(std::io::Error),
    /// Terminal setup or drawing errors
    #[error("Terminal error: {0}")]
    Terminal(String),
    /// Invalid form input
    #[error("{0}")]
    UserInput(String),
}

impl From<std::io::Error> for DockNavError {
    fn from(err: std::io::Error) -> Self {
        DockNavError::Io(err)
    }
}

impl From<bollard::errors::Error> for DockNavError {
    fn from(err: bollard::errors::Error) -> Self {
        DockNavError::Docker(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let docker_err = DockNavError::Docker("connection failed".to_string());
        assert_eq!(docker_err.to_string(), "Docker error: connection failed");

        let config_err = DockNavError::Config("invalid tail".to_string());
        assert_eq!(config_err.to_string(), "Configuration error: invalid tail");

        let input_err = DockNavError::UserInput("image is required".to_string());
        assert_eq!(input_err.to_string(), "image is required");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DockNavError = io_err.into();
        match err {
            DockNavError::Io(_) => (),
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_engine_error_conversion() {
        let engine_err = bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message: "No such container: web".to_string(),
        };
        let err: DockNavError = engine_err.into();
        match &err {
            DockNavError::Docker(message) => assert!(message.contains("No such container: web")),
            other => panic!("Expected Docker variant, got {:?}", other),
        }
        assert!(err.to_string().starts_with("Docker error:"));
    }

    #[test]
    fn test_config_file_error_names_path() {
        let err = DockNavError::ConfigFile {
            message: "Failed to parse config file".to_string(),
            path: PathBuf::from("/tmp/docknav/config.json"),
            source: anyhow::anyhow!("expected value at line 1"),
        };
        let text = err.to_string();
        assert!(text.contains("/tmp/docknav/config.json"));
        assert!(text.contains("expected value"));
    }
}
