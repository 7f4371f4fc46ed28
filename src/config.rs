/*!
 * Configuration types for the modeler
 */

use crate::error::{ModelerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use zeebe_connect::EndpointDescriptor;

/// Feature flag: show the "move to origin" canvas entry
pub const DISABLE_ADJUST_ORIGIN: &str = "disable-adjust-origin";

/// Main configuration, loaded from `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelerConfig {
    /// Log level for diagnostic output
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path (None = stdout)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (shorthand for log_level = debug)
    #[serde(default)]
    pub verbose: bool,

    /// Application flags, e.g. `zeebe-ssl-certificate`
    #[serde(default)]
    pub flags: BTreeMap<String, String>,

    /// Default endpoint for the gateway subcommands
    #[serde(default)]
    pub endpoint: Option<EndpointDescriptor>,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl ModelerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ModelerError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&contents).map_err(|source| ModelerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given, else from the default location.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(default) if default.is_file() => Self::from_file(&default),
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/modeler/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("modeler").join("config.toml"))
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ModelerError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Whether a boolean flag is switched on.
    ///
    /// Any value other than empty, `false` or `0` counts as set.
    pub fn flag_enabled(&self, key: &str) -> bool {
        match self.flags.get(key) {
            Some(value) => !matches!(value.trim(), "" | "false" | "0"),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use zeebe_connect::ZEEBE_SSL_CERTIFICATE;

    #[test]
    fn test_default_config() {
        let config = ModelerConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_file.is_none());
        assert!(config.flags.is_empty());
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            log_level = "debug"
            verbose = true

            [flags]
            zeebe-ssl-certificate = "certs/root.pem"
            disable-adjust-origin = "true"

            [endpoint]
            type = "oauth"
            url = "https://zeebe.example.com:443"
            audience = "zeebe-api"
            clientId = "modeler"
            clientSecret = "s3cret"
            oauthURL = "https://auth.example.com/token"
        "#;

        let config: ModelerConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.verbose);
        assert_eq!(
            config.flags.get(ZEEBE_SSL_CERTIFICATE).map(String::as_str),
            Some("certs/root.pem")
        );
        assert!(config.flag_enabled(DISABLE_ADJUST_ORIGIN));

        match config.endpoint {
            Some(EndpointDescriptor::OAuth {
                ref oauth_url,
                ref client_id,
                ..
            }) => {
                assert_eq!(oauth_url, "https://auth.example.com/token");
                assert_eq!(client_id, "modeler");
            }
            other => panic!("unexpected endpoint {:?}", other),
        }
    }

    #[test]
    fn test_unknown_endpoint_type_is_rejected() {
        let toml_str = r#"
            [endpoint]
            type = "carrierPigeon"
            url = "http://localhost:26500"
        "#;

        assert!(toml::from_str::<ModelerConfig>(toml_str).is_err());
    }

    #[test]
    fn test_flag_enabled_values() {
        let mut config = ModelerConfig::default();
        assert!(!config.flag_enabled(DISABLE_ADJUST_ORIGIN));

        for (value, expected) in [("true", true), ("1", true), ("false", false), ("0", false)] {
            config
                .flags
                .insert(DISABLE_ADJUST_ORIGIN.to_string(), value.to_string());
            assert_eq!(config.flag_enabled(DISABLE_ADJUST_ORIGIN), expected, "{}", value);
        }
    }

    #[test]
    fn test_file_roundtrip() {
        let mut config = ModelerConfig {
            log_level: LogLevel::Warn,
            endpoint: Some(EndpointDescriptor::self_hosted("http://localhost:26500")),
            ..Default::default()
        };
        config
            .flags
            .insert(ZEEBE_SSL_CERTIFICATE.to_string(), "/etc/ca.pem".to_string());

        let file = NamedTempFile::new().unwrap();
        config.to_file(file.path()).unwrap();

        let loaded = ModelerConfig::load(Some(file.path())).unwrap();
        assert_eq!(loaded.log_level, LogLevel::Warn);
        assert_eq!(loaded.flags, config.flags);
        assert_eq!(loaded.endpoint, config.endpoint);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(matches!(
            ModelerConfig::load(Some(missing.as_path())),
            Err(ModelerError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "log_level = [").unwrap();

        match ModelerConfig::from_file(file.path()) {
            Err(ModelerError::ConfigParse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
