use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoxError {
    #[error("API key not configured")]
    NotConfigured,

    #[error("invalid config file {}: {message}", .path.display())]
    InvalidConfig { path: PathBuf, message: String },

    #[error("remote model error: {0}")]
    Remote(String),

    #[error("path '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("{action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("external tool failed: {0}")]
    ExternalTool(String),

    #[error("cancelled")]
    Cancelled,

    #[error("model response could not be used: {0}")]
    Malformed(String),

    #[error("unknown command '{name}'{}", .hint.as_ref().map(|h| format!(" (did you mean '{}'?)", h)).unwrap_or_default())]
    UnknownCommand { name: String, hint: Option<String> },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("execution of '{command}' failed: {source}")]
    ExecutionFailed {
        command: String,
        #[source]
        source: Box<VoxError>,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl VoxError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Process exit status for this error. Declining a confirmation is a clean exit.
    pub fn exit_code(&self) -> i32 {
        match self {
            VoxError::Cancelled => 0,
            VoxError::ExecutionFailed { source, .. } => source.exit_code(),
            _ => 1,
        }
    }
}

pub type VoxResult<T> = Result<T, VoxError>;
