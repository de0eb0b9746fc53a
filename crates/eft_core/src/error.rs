use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("replay directory not found: {0}")]
    MissingDirectory(PathBuf),
}

impl ReplayError {
    /// Per-file failures the batch loader skips over instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ReplayError::Io { .. } => true,
            ReplayError::InvalidJson { .. } => true,
            ReplayError::Config { .. } => false,
            ReplayError::MissingDirectory(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReplayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        let io = ReplayError::Io {
            path: PathBuf::from("a.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(io.is_recoverable());
        assert!(!ReplayError::MissingDirectory(PathBuf::from("nope")).is_recoverable());
    }

    #[test]
    fn test_display_carries_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ReplayError::InvalidJson { path: PathBuf::from("broken.json"), source };
        assert!(err.to_string().contains("broken.json"));
    }
}
