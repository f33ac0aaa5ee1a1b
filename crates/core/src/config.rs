use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::version;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TOML at line {line}, column {column}: {message}")]
    InvalidToml {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("I/O error reading configuration: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Install root handed to the version resolver: the configured value,
    /// or the directory of the running executable.
    pub fn install_root(&self) -> PathBuf {
        self.paths
            .install_root
            .clone()
            .unwrap_or_else(version::default_install_root)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    pub install_root: Option<PathBuf>,
}

#[derive(Debug, Default, Clone)]
struct ConfigOverrides {
    log_level: Option<String>,
    install_root: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Return the resolved platform-appropriate configuration file path.
pub fn config_path() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("org", "siproxylin", "siproxylin") {
        proj_dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}

/// Load configuration from the platform config path, merging environment
/// variable overrides. A missing file yields the defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load configuration from a specific path. Used by `load_config()` and tests.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    load_config_from_with_overrides(path, config_overrides_from_env())
}

/// Parse configuration from a TOML string directly (for testing).
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    load_config_from_str_with_overrides(toml_str, config_overrides_from_env())
}

fn load_config_from_with_overrides(
    path: &Path,
    overrides: ConfigOverrides,
) -> Result<Config, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            String::new()
        }
        Err(e) => return Err(ConfigError::Io(e)),
    };

    load_config_from_str_with_overrides(&contents, overrides)
}

fn load_config_from_str_with_overrides(
    toml_str: &str,
    overrides: ConfigOverrides,
) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(toml_str).map_err(|e| {
        let (line, column) = e.span().map_or((0, 0), |span| {
            let before = &toml_str[..span.start];
            let line = before.chars().filter(|&c| c == '\n').count() + 1;
            let column = before
                .rfind('\n')
                .map_or(span.start + 1, |nl| span.start - nl);
            (line, column)
        });
        ConfigError::InvalidToml {
            line,
            column,
            message: e.message().to_string(),
        }
    })?;

    apply_overrides(&mut config, overrides);
    validate(&config)?;

    Ok(config)
}

fn config_overrides_from_env() -> ConfigOverrides {
    ConfigOverrides {
        log_level: std::env::var("SIPROXYLIN_LOG_LEVEL").ok(),
        install_root: std::env::var_os("SIPROXYLIN_INSTALL_ROOT").map(PathBuf::from),
    }
}

fn apply_overrides(config: &mut Config, overrides: ConfigOverrides) {
    if let Some(level) = overrides.log_level {
        config.logging.level = level;
    }
    if let Some(root) = overrides.install_root {
        config.paths.install_root = Some(root);
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if !VALID_LOG_LEVELS.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::InvalidValue {
            field: "logging.level".to_string(),
            message: format!("must be one of: {}", VALID_LOG_LEVELS.join(", ")),
        });
    }

    if let Some(root) = &config.paths.install_root {
        if root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "paths.install_root".to_string(),
                message: "must not be empty".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse_without_env(toml_str: &str) -> Result<Config, ConfigError> {
        load_config_from_str_with_overrides(toml_str, ConfigOverrides::default())
    }

    fn full_toml() -> &'static str {
        r#"
[logging]
level = "debug"

[paths]
install_root = "/opt/siproxylin/siproxylin"
"#
    }

    // ── Parsing ───────────────────────────────────────────────────

    #[test]
    fn parses_full_config() {
        let config = parse_without_env(full_toml()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.paths.install_root.as_deref(),
            Some(Path::new("/opt/siproxylin/siproxylin"))
        );
        assert_eq!(config.install_root(), PathBuf::from("/opt/siproxylin/siproxylin"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_without_env("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.paths.install_root.is_none());
        assert_eq!(config.install_root(), version::default_install_root());
    }

    // ── Validation ────────────────────────────────────────────────

    #[test]
    fn rejects_invalid_log_level() {
        let toml = r#"
[logging]
level = "verbose"
"#;
        let err = parse_without_env(toml).unwrap_err();
        assert_matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "logging.level");
    }

    #[test]
    fn accepts_all_valid_log_levels() {
        for level in VALID_LOG_LEVELS {
            let toml = format!("[logging]\nlevel = \"{level}\"\n");
            parse_without_env(&toml).unwrap();
        }
    }

    #[test]
    fn rejects_empty_install_root() {
        let toml = r#"
[paths]
install_root = ""
"#;
        let err = parse_without_env(toml).unwrap_err();
        assert_matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "paths.install_root");
    }

    // ── Invalid TOML ──────────────────────────────────────────────

    #[test]
    fn invalid_toml_reports_position() {
        let toml = r#"
[logging]
level = "info"
bad_line ===
"#;
        let err = parse_without_env(toml).unwrap_err();
        match err {
            ConfigError::InvalidToml { line, .. } => {
                assert!(line > 0, "line should be > 0, got {line}");
            }
            other => panic!("expected InvalidToml, got: {other}"),
        }
    }

    // ── Environment variable overrides ────────────────────────────

    #[test]
    fn env_overrides_take_precedence() {
        let overrides = ConfigOverrides {
            log_level: Some("trace".to_string()),
            install_root: Some(PathBuf::from("/env/root")),
        };
        let config = load_config_from_str_with_overrides(full_toml(), overrides).unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.install_root(), PathBuf::from("/env/root"));
    }

    #[test]
    fn env_override_invalid_log_level_rejected() {
        let overrides = ConfigOverrides {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        let err = load_config_from_str_with_overrides("", overrides).unwrap_err();
        assert_matches!(err, ConfigError::InvalidValue { .. });
    }

    // ── File-based loading ────────────────────────────────────────

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, full_toml()).unwrap();

        let config = load_config_from_with_overrides(&path, ConfigOverrides::default()).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn missing_file_yields_defaults_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subdir").join("config.toml");

        let config = load_config_from_with_overrides(&path, ConfigOverrides::default()).unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(!path.exists());
    }

    #[test]
    fn config_path_ends_with_config_toml() {
        let path = config_path();
        assert!(
            path.ends_with("config.toml"),
            "config_path should end with config.toml, got: {path:?}"
        );
    }
}
