use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Handlebars template used for text output instead of the built-in one.
    #[serde(default)]
    pub template: Option<PathBuf>,

    #[serde(default)]
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json_format: bool,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("Cannot read {}: {}", path.as_ref().display(), e))
        })?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load the config the CLI should run with.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_with_env(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_with_env(path),
            _ => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.http.timeout == 0 {
            return Err(Error::Config("Timeout must be greater than 0".to_string()));
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(Error::Config("User agent cannot be empty".to_string()));
        }

        if let Some(template) = &self.output.template {
            if template.as_os_str().is_empty() {
                return Err(Error::Config("Template path cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(timeout) = std::env::var("RSS_READER_TIMEOUT") {
            if let Ok(val) = timeout.parse() {
                self.http.timeout = val;
            }
        }

        if let Ok(user_agent) = std::env::var("RSS_READER_USER_AGENT") {
            self.http.user_agent = user_agent;
        }

        if let Ok(level) = std::env::var("RSS_READER_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rss-reader"))
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

fn default_timeout() -> u64 { 30 }
fn default_user_agent() -> String {
    format!("rss-reader/{}", env!("CARGO_PKG_VERSION"))
}
fn default_max_redirects() -> usize { 10 }
fn default_log_level() -> String { "warn".to_string() }

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.timeout, 30);
        assert_eq!(config.http.max_redirects, 10);
        assert!(config.http.user_agent.starts_with("rss-reader/"));
        assert_eq!(config.logging.level, "warn");
        assert!(config.output.template.is_none());
        assert!(!config.output.pretty_json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r#"
[http]
timeout = 5

[output]
pretty_json = true
template = "/tmp/news.hbs"
"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.http.timeout, 5);
        assert_eq!(config.http.max_redirects, 10);
        assert!(config.output.pretty_json);
        assert_eq!(config.output.template, Some(PathBuf::from("/tmp/news.hbs")));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let file = write_config("[http]\ntimeout = 0\n");
        assert!(matches!(Config::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let file = write_config("[http\ntimeout = ");
        assert!(matches!(Config::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Config::resolve(Some(Path::new("/nonexistent/rss-reader/config.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
