//! YAML configuration loading for the free@home client
//!
//! Configuration files are YAML with two custom tags:
//!
//! - `!secret key` - Substitute from `secrets.yaml` next to the config file
//! - `!env_var VAR [default]` - Environment variable substitution
//!
//! # Example
//!
//! ```ignore
//! use fah_config::FahConfig;
//!
//! let config = FahConfig::load("/etc/fathome/fathome.yaml")?;
//! println!("SysAP at {}", config.host);
//! ```

mod error;
mod loader;
mod secrets;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_yaml, load_yaml_string, YamlLoader};
pub use secrets::Secrets;
pub use settings::FahConfig;

// Re-export serde_yaml::Value for convenience
pub use serde_yaml::Value;
