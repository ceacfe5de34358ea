//! Client configuration
//!
//! ```yaml
//! host: 192.168.1.10
//! username: installer
//! password: !secret fah_password
//! language: de
//! project_file: dump.xml
//! ```

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::loader::load_yaml;

/// Default XMPP domain of the SysAP
pub const DEFAULT_XMPP_DOMAIN: &str = "busch-jaeger.de";

/// Default port of the SysAP's XMPP service
pub const DEFAULT_RPC_PORT: u16 = 5222;

/// Connection settings for one SysAP
#[derive(Clone, Serialize, Deserialize)]
pub struct FahConfig {
    /// Hostname or IP address of the SysAP
    pub host: String,

    /// free@home user name as shown in the SysAP's user list
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Language requested for display strings
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_xmpp_domain")]
    pub xmpp_domain: String,

    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Timeout for the settings.json lookup
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Load the project from a saved description instead of the SysAP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_file: Option<PathBuf>,
}

fn default_language() -> String {
    "de".to_string()
}

fn default_xmpp_domain() -> String {
    DEFAULT_XMPP_DOMAIN.to_string()
}

fn default_rpc_port() -> u16 {
    DEFAULT_RPC_PORT
}

fn default_http_timeout_secs() -> u64 {
    10
}

impl FahConfig {
    /// Configuration for a host and user with all defaults
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: String::new(),
            language: default_language(),
            xmpp_domain: default_xmpp_domain(),
            rpc_port: default_rpc_port(),
            http_timeout_secs: default_http_timeout_secs(),
            project_file: None,
        }
    }

    /// Load from a YAML file, resolving tags
    ///
    /// A relative `project_file` is resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let mut config = Self::from_yaml(&load_yaml(path)?)?;

        if let Some(dir) = path.parent() {
            config.project_file = config.project_file.take().map(|file| {
                if file.is_relative() {
                    dir.join(file)
                } else {
                    file
                }
            });
        }

        Ok(config)
    }

    /// Build from an already loaded YAML value
    pub fn from_yaml(yaml: &Value) -> ConfigResult<Self> {
        let config: Self =
            serde_yaml::from_value(yaml.clone()).map_err(|e| ConfigError::InvalidValue {
                key: "fathome".to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "host".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "username".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.rpc_port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "rpc_port".to_string(),
                reason: "must be a valid port".to_string(),
            });
        }
        Ok(())
    }
}

// Keep the password out of logs
impl fmt::Debug for FahConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FahConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"***")
            .field("language", &self.language)
            .field("xmpp_domain", &self.xmpp_domain)
            .field("rpc_port", &self.rpc_port)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("project_file", &self.project_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let yaml: Value = serde_yaml::from_str("host: sysap\nusername: installer\n").unwrap();
        let config = FahConfig::from_yaml(&yaml).unwrap();

        assert_eq!(config.language, "de");
        assert_eq!(config.xmpp_domain, DEFAULT_XMPP_DOMAIN);
        assert_eq!(config.rpc_port, 5222);
        assert_eq!(config.http_timeout_secs, 10);
        assert!(config.password.is_empty());
        assert!(config.project_file.is_none());
    }

    #[test]
    fn test_missing_host() {
        let yaml: Value = serde_yaml::from_str("username: installer\n").unwrap();
        assert!(matches!(
            FahConfig::from_yaml(&yaml),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_username() {
        let yaml: Value = serde_yaml::from_str("host: sysap\nusername: ' '\n").unwrap();
        let err = FahConfig::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "username"));
    }

    #[test]
    fn test_load_with_secret_and_project_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("secrets.yaml"), "fah_password: hunter2\n").unwrap();
        fs::write(
            dir.path().join("fathome.yaml"),
            "host: 192.168.1.10\nusername: installer\npassword: !secret fah_password\nproject_file: dump.xml\n",
        )
        .unwrap();

        let config = FahConfig::load(dir.path().join("fathome.yaml")).unwrap();
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.project_file, Some(dir.path().join("dump.xml")));
    }

    #[test]
    fn test_load_relative_config_path() {
        let cwd = std::env::current_dir().unwrap();
        let dir = TempDir::new_in(&cwd).unwrap();
        let conf = dir.path().join("demos");
        fs::create_dir(&conf).unwrap();
        fs::write(
            conf.join("fathome.yaml"),
            "host: 192.168.1.10\nusername: installer\nproject_file: project.xml\n",
        )
        .unwrap();

        let relative = conf.strip_prefix(&cwd).unwrap().to_path_buf();
        let config = FahConfig::load(relative.join("fathome.yaml")).unwrap();
        assert_eq!(config.host, "192.168.1.10");
        assert_eq!(config.project_file, Some(relative.join("project.xml")));
    }

    #[test]
    fn test_debug_hides_password() {
        let mut config = FahConfig::new("sysap", "installer");
        config.password = "hunter2".to_string();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("installer"));
    }
}
