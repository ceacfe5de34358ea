//! Secrets store for `!secret` substitution
//!
//! Secrets live in a `secrets.yaml` next to the configuration file so the
//! SysAP password can be kept out of the main file.

use crate::error::{ConfigError, ConfigResult};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the secrets store
pub const SECRETS_FILE: &str = "secrets.yaml";

/// Secrets loaded from secrets.yaml
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    secrets: BTreeMap<String, String>,
    path: Option<PathBuf>,
}

impl Secrets {
    /// Load `secrets.yaml` from a directory; a missing file yields an empty store
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let path = dir.join(SECRETS_FILE);

        if !path.exists() {
            debug!("No {} at {:?}, using empty secrets", SECRETS_FILE, dir);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        let raw: BTreeMap<String, Value> =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
                path: path.clone(),
                source: e,
            })?;

        let mut secrets = BTreeMap::new();
        for (key, value) in raw {
            let value = scalar_to_string(&key, value)?;
            secrets.insert(key, value);
        }

        debug!("Loaded {} secrets from {:?}", secrets.len(), path);

        Ok(Self {
            secrets,
            path: Some(path),
        })
    }

    /// Get a secret by key
    pub fn get(&self, key: &str) -> ConfigResult<&str> {
        self.secrets
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::SecretNotFound {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.secrets.contains_key(key)
    }

    /// Path of the loaded secrets file, if there was one
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

fn scalar_to_string(key: &str, value: Value) -> ConfigResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "secrets must be scalar values".to_string(),
        }),
    }
}
