//! Configuration management for Creeds.
//!
//! Parses `creeds.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `convert.source_dir`
//! - `convert.data_dir`
//! - `site.output_dir`
//! - `site.title`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override YAML source directory.
    pub source_dir: Option<PathBuf>,
    /// Override JSON data directory.
    pub data_dir: Option<PathBuf>,
    /// Override site output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "creeds.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Converter configuration (paths are relative strings from TOML).
    convert: ConvertConfigRaw,
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,

    /// Resolved converter configuration (set after loading).
    #[serde(skip)]
    pub convert_resolved: ConvertConfig,
    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw converter configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConvertConfigRaw {
    source_dir: Option<String>,
    data_dir: Option<String>,
    strip_fields: Option<Vec<String>>,
}

/// Resolved converter configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ConvertConfig {
    /// Directory of YAML source documents.
    pub source_dir: PathBuf,
    /// Directory the JSON records are written to (the Document Store).
    pub data_dir: PathBuf,
    /// Presentational fields to strip. `None` uses the converter's defaults.
    pub strip_fields: Option<Vec<String>>,
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    output_dir: Option<String>,
    title: Option<String>,
    thesis_documents: Option<Vec<String>>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug)]
pub struct SiteConfig {
    /// Directory the generated pages are written to.
    pub output_dir: PathBuf,
    /// Site title shown on the index page.
    pub title: String,
    /// Documents whose bare entries are numbered as theses. `None` uses the
    /// renderer's defaults.
    pub thesis_documents: Option<Vec<String>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            title: default_title(),
            thesis_documents: None,
        }
    }
}

fn default_title() -> String {
    "Creeds".to_owned()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`convert.source_dir`").
        field: String,
        /// Error message (e.g., "${`CREEDS_SOURCE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `creeds.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.convert_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(data_dir) = &settings.data_dir {
            self.convert_resolved.data_dir.clone_from(data_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            convert: ConvertConfigRaw::default(),
            site: SiteConfigRaw::default(),
            convert_resolved: ConvertConfig {
                source_dir: base.join("source"),
                data_dir: base.join("data"),
                strip_fields: None,
            },
            site_resolved: SiteConfig {
                output_dir: base.join("dist"),
                ..SiteConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_resolved.title, "site.title")?;

        if self.convert_resolved.source_dir == self.convert_resolved.data_dir {
            return Err(ConfigError::Validation(
                "convert.source_dir and convert.data_dir must differ".to_owned(),
            ));
        }

        if let Some(fields) = &self.convert_resolved.strip_fields
            && fields.iter().any(|f| f.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "convert.strip_fields cannot contain empty names".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let expand_field = |value: &mut Option<String>, field: &str| -> Result<(), ConfigError> {
            if let Some(v) = value {
                *v = expand::expand_env(v, field)?;
            }
            Ok(())
        };

        expand_field(&mut self.convert.source_dir, "convert.source_dir")?;
        expand_field(&mut self.convert.data_dir, "convert.data_dir")?;
        expand_field(&mut self.site.output_dir, "site.output_dir")?;
        expand_field(&mut self.site.title, "site.title")?;

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.convert_resolved = ConvertConfig {
            source_dir: resolve(self.convert.source_dir.as_deref(), "source"),
            data_dir: resolve(self.convert.data_dir.as_deref(), "data"),
            strip_fields: self.convert.strip_fields.clone(),
        };

        self.site_resolved = SiteConfig {
            output_dir: resolve(self.site.output_dir.as_deref(), "dist"),
            title: self.site.title.clone().unwrap_or_else(default_title),
            thesis_documents: self.site.thesis_documents.clone(),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.convert_resolved.source_dir,
            PathBuf::from("/test/source")
        );
        assert_eq!(config.convert_resolved.data_dir, PathBuf::from("/test/data"));
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/test/dist"));
        assert_eq!(config.site_resolved.title, "Creeds");
        assert!(config.convert_resolved.strip_fields.is_none());
        assert!(config.site_resolved.thesis_documents.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.convert.source_dir.is_none());
        assert!(config.site.title.is_none());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[convert]
source_dir = "compendium/data"
data_dir = "data"
strip_fields = ["format"]

[site]
output_dir = "public"
title = "Reformed Standards"
thesis_documents = ["Martin Luther's 95 theses"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.convert_resolved.source_dir,
            PathBuf::from("/project/compendium/data")
        );
        assert_eq!(
            config.convert_resolved.data_dir,
            PathBuf::from("/project/data")
        );
        assert_eq!(
            config.convert_resolved.strip_fields,
            Some(vec!["format".to_owned()])
        );
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/project/public")
        );
        assert_eq!(config.site_resolved.title, "Reformed Standards");
        assert_eq!(
            config.site_resolved.thesis_documents,
            Some(vec!["Martin Luther's 95 theses".to_owned()])
        );
    }

    #[test]
    fn test_wrong_field_type_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[convert]\nstrip_fields = \"format\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_same_source_and_data() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.convert_resolved.data_dir = PathBuf::from("/test/source");

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.title = "  ".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.title"));
    }

    #[test]
    fn test_validate_rejects_empty_strip_field() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.convert_resolved.strip_fields = Some(vec![String::new()]);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            data_dir: Some(PathBuf::from("/custom/data")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.convert_resolved.data_dir,
            PathBuf::from("/custom/data")
        );
        // Unchanged
        assert_eq!(
            config.convert_resolved.source_dir,
            PathBuf::from("/test/source")
        );
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/test/dist"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/creeds.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("creeds.toml");
        std::fs::write(
            &path,
            "[convert]\nsource_dir = \"${CREEDS_TEST_SURELY_UNSET:-yaml}\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.convert_resolved.source_dir,
            temp_dir.path().join("yaml")
        );
        assert_eq!(config.convert_resolved.data_dir, temp_dir.path().join("data"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_settings_last() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("creeds.toml");
        std::fs::write(&path, "[site]\noutput_dir = \"public\"\n").unwrap();
        let settings = CliSettings {
            output_dir: Some(PathBuf::from("/elsewhere")),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/elsewhere"));
    }
}
