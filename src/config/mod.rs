use std::env;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{VoxError, VoxResult};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Runtime settings. Everything except the credential comes from the environment.
#[derive(Clone, Debug)]
pub struct Settings {
    pub llm_host: String,
    pub llm_model: String,
    pub request_timeout: Option<Duration>,
    pub config_file: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        let request_timeout = env::var("VOXCMD_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Settings {
            llm_host: env::var("VOXCMD_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            llm_model: env::var("VOXCMD_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            request_timeout,
            config_file: env::var_os("VOXCMD_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(default_config_file),
        }
    }
}

/// `~/.voxcmd/config.json`, falling back to the working directory when there is no home.
pub fn default_config_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".voxcmd")
        .join("config.json")
}

/// The API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Credential(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    api_key: Option<String>,
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> VoxResult<Credential> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(VoxError::NotConfigured),
            Err(e) => return Err(VoxError::io("failed to read", &self.path, e)),
        };

        let file: ConfigFile = serde_json::from_str(&raw).map_err(|e| VoxError::InvalidConfig {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        match file.api_key {
            Some(key) if !key.trim().is_empty() => {
                debug!("Loaded API key from {}", self.path.display());
                Ok(Credential(key))
            }
            _ => Err(VoxError::NotConfigured),
        }
    }

    /// Overwrites any existing credential.
    pub fn save(&self, key: &str) -> VoxResult<()> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| VoxError::io("failed to create", dir, e))?;
        }

        let file = ConfigFile {
            api_key: Some(key.to_string()),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| VoxError::InvalidConfig {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        fs::write(&self.path, json).map_err(|e| VoxError::io("failed to write", &self.path, e))?;
        debug!("Saved API key to {}", self.path.display());
        Ok(())
    }
}
