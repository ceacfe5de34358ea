//! YAML loader with `!secret` and `!env_var` tag support

use crate::error::{ConfigError, ConfigResult};
use crate::secrets::Secrets;
use serde_yaml::value::TaggedValue;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// YAML loader resolving custom tags
pub struct YamlLoader {
    /// Directory the secrets were loaded from
    config_dir: PathBuf,
    secrets: Secrets,
}

impl YamlLoader {
    /// Create a loader for a config directory, loading its secrets.yaml
    pub fn new(config_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let config_dir = config_dir.into();
        let secrets = Secrets::load(&config_dir)?;

        Ok(Self {
            config_dir,
            secrets,
        })
    }

    /// Create a loader with pre-loaded secrets
    pub fn with_secrets(config_dir: impl Into<PathBuf>, secrets: Secrets) -> Self {
        Self {
            config_dir: config_dir.into(),
            secrets,
        }
    }

    /// Load and process a YAML file, relative paths resolve against the config directory
    pub fn load_file(&self, path: impl AsRef<Path>) -> ConfigResult<Value> {
        let path = self.resolve_path(path.as_ref());
        debug!("Loading YAML file: {:?}", path);

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        self.load_string(&content, &path)
    }

    /// Load and process YAML from a string
    pub fn load_string(&self, content: &str, source_path: &Path) -> ConfigResult<Value> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: source_path.to_path_buf(),
            source: e,
        })?;

        self.process_value(value)
    }

    fn process_value(&self, value: Value) -> ConfigResult<Value> {
        match value {
            Value::Tagged(tagged) => self.process_tagged(*tagged),
            Value::Mapping(map) => {
                let mut result = serde_yaml::Mapping::new();
                for (k, v) in map {
                    result.insert(self.process_value(k)?, self.process_value(v)?);
                }
                Ok(Value::Mapping(result))
            }
            Value::Sequence(seq) => {
                let result: ConfigResult<Vec<Value>> =
                    seq.into_iter().map(|v| self.process_value(v)).collect();
                Ok(Value::Sequence(result?))
            }
            _ => Ok(value),
        }
    }

    fn process_tagged(&self, tagged: TaggedValue) -> ConfigResult<Value> {
        let tag = tagged.tag.to_string();
        trace!("Processing tag '{}' with value {:?}", tag, tagged.value);

        match tag.as_str() {
            "!secret" => self.process_secret(tagged.value),
            "!env_var" => self.process_env_var(tagged.value),
            _ => {
                // Unknown tag, keep it but process the inner value
                let value = self.process_value(tagged.value)?;
                Ok(Value::Tagged(Box::new(TaggedValue {
                    tag: tagged.tag,
                    value,
                })))
            }
        }
    }

    fn process_secret(&self, value: Value) -> ConfigResult<Value> {
        let key = tag_argument("!secret", value)?;
        let secret = self.secrets.get(&key)?;
        debug!("Substituted secret: {}", key);
        Ok(Value::String(secret.to_string()))
    }

    /// `!env_var NAME` or `!env_var NAME default`
    fn process_env_var(&self, value: Value) -> ConfigResult<Value> {
        let argument = tag_argument("!env_var", value)?;
        let mut parts = argument.trim().splitn(2, char::is_whitespace);
        let var = parts.next().unwrap_or_default().to_string();
        let default = parts.next().map(|d| d.trim().to_string());

        match (std::env::var(&var), default) {
            (Ok(value), _) => {
                debug!("Substituted env var: {}", var);
                Ok(Value::String(value))
            }
            (Err(_), Some(default)) => {
                debug!("Env var {} not set, using default", var);
                Ok(Value::String(default))
            }
            (Err(_), None) => Err(ConfigError::EnvVarNotFound { var }),
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config_dir.join(path)
        }
    }

    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

fn tag_argument(tag: &str, value: Value) -> ConfigResult<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ConfigError::InvalidValue {
            key: tag.to_string(),
            reason: "tag argument must be a non-empty string".to_string(),
        }),
    }
}

/// Load a YAML file with tag processing; secrets come from the file's directory
pub fn load_yaml(path: impl AsRef<Path>) -> ConfigResult<Value> {
    let path = path.as_ref();
    match (path.parent(), path.file_name()) {
        (Some(dir), Some(file)) if !dir.as_os_str().is_empty() => {
            YamlLoader::new(dir)?.load_file(file)
        }
        _ => YamlLoader::new(".")?.load_file(path),
    }
}

/// Load a YAML string with tag processing
pub fn load_yaml_string(
    config_dir: impl Into<PathBuf>,
    content: &str,
    source_name: &str,
) -> ConfigResult<Value> {
    YamlLoader::new(config_dir)?.load_string(content, Path::new(source_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn get<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
        value.as_mapping().and_then(|map| map.get(key))
    }

    #[test]
    fn test_load_plain_yaml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("fathome.yaml"), "host: sysap.local\nrpc_port: 5222\n").unwrap();

        let value = load_yaml(dir.path().join("fathome.yaml")).unwrap();
        assert_eq!(get(&value, "host"), Some(&Value::String("sysap.local".to_string())));
    }

    #[test]
    fn test_load_relative_path_with_directory() {
        let cwd = std::env::current_dir().unwrap();
        let dir = TempDir::new_in(&cwd).unwrap();
        let conf = dir.path().join("conf");
        fs::create_dir(&conf).unwrap();
        fs::write(conf.join("secrets.yaml"), "fah_password: hunter2\n").unwrap();
        fs::write(conf.join("fathome.yaml"), "password: !secret fah_password\n").unwrap();

        let relative = conf.join("fathome.yaml");
        let relative = relative.strip_prefix(&cwd).unwrap();
        assert!(relative.is_relative());

        let value = load_yaml(relative).unwrap();
        assert_eq!(get(&value, "password"), Some(&Value::String("hunter2".to_string())));
    }

    #[test]
    fn test_secret() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("secrets.yaml"), "fah_password: hunter2\n").unwrap();

        let value =
            load_yaml_string(dir.path(), "password: !secret fah_password\n", "fathome.yaml")
                .unwrap();
        assert_eq!(get(&value, "password"), Some(&Value::String("hunter2".to_string())));
    }

    #[test]
    fn test_missing_secret() {
        let dir = TempDir::new().unwrap();
        let result = load_yaml_string(dir.path(), "password: !secret nope\n", "fathome.yaml");
        assert!(matches!(result, Err(ConfigError::SecretNotFound { .. })));
    }

    #[test]
    fn test_env_var() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("FAH_CONFIG_TEST_HOST", "10.0.0.5");

        let value = load_yaml_string(
            dir.path(),
            "host: !env_var FAH_CONFIG_TEST_HOST\n",
            "fathome.yaml",
        )
        .unwrap();
        assert_eq!(get(&value, "host"), Some(&Value::String("10.0.0.5".to_string())));

        std::env::remove_var("FAH_CONFIG_TEST_HOST");
    }

    #[test]
    fn test_env_var_default() {
        let dir = TempDir::new().unwrap();
        let value = load_yaml_string(
            dir.path(),
            "language: !env_var FAH_CONFIG_TEST_UNSET_LANG en\n",
            "fathome.yaml",
        )
        .unwrap();
        assert_eq!(get(&value, "language"), Some(&Value::String("en".to_string())));

        let result = load_yaml_string(
            dir.path(),
            "language: !env_var FAH_CONFIG_TEST_UNSET_LANG\n",
            "fathome.yaml",
        );
        assert!(matches!(result, Err(ConfigError::EnvVarNotFound { .. })));
    }

    #[test]
    fn test_secret_inside_sequence() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("secrets.yaml"), "a: one\n").unwrap();

        let value = load_yaml_string(dir.path(), "list:\n  - !secret a\n  - two\n", "x.yaml")
            .unwrap();
        let list = get(&value, "list").and_then(Value::as_sequence).unwrap();
        assert_eq!(list[0], Value::String("one".to_string()));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let result = load_yaml_string(dir.path(), "host: [unclosed\n", "fathome.yaml");
        assert!(matches!(result, Err(ConfigError::ParseYaml { .. })));
    }
}
