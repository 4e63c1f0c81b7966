//! Configuration for the mdalert extension.
//!
//! Parses `mdalert.toml` files with serde and provides auto-discovery of the
//! config file in parent directories.
//!
//! ```toml
//! [alerts]
//! labels = ["NOTE", "TIP", "IMPORTANT", "WARNING", "CAUTION"]  # or ["*"]
//! class_prefix = "markdown-alert"
//! parse_nested = true
//! case_sensitive_labels = false
//! markdown_style = "bare"   # or "quoted"
//!
//! [alerts.icons]
//! note = "ℹ️"
//!
//! [parser]
//! max_nesting = 20
//! ```
//!
//! Every key is optional.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mdalert::{
    AlertError, AlertFormatter, AlertKind, AlertOptions, DEFAULT_CLASS_PREFIX, LabelSet,
    MarkdownStyle,
};
use mdalert_block::DEFAULT_MAX_NESTING;
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdalert.toml";

/// Upper bound for `parser.max_nesting`.
const MAX_NESTING_LIMIT: usize = 100;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Alert recognition and rendering.
    pub alerts: AlertsConfig,
    /// Block parser settings.
    pub parser: ParserConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[alerts]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Accepted labels, or `["*"]` for any word.
    pub labels: Vec<String>,
    /// Icon glyphs keyed by label (any case).
    pub icons: BTreeMap<String, String>,
    /// CSS class prefix for HTML output.
    pub class_prefix: String,
    pub parse_nested: bool,
    pub case_sensitive_labels: bool,
    pub markdown_style: StyleName,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            labels: AlertKind::BUILTIN
                .iter()
                .map(|kind| kind.wire_label().to_owned())
                .collect(),
            icons: BTreeMap::new(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_owned(),
            parse_nested: true,
            case_sensitive_labels: false,
            markdown_style: StyleName::Bare,
        }
    }
}

/// Markdown output style as written in TOML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleName {
    #[default]
    Bare,
    Quoted,
}

impl From<StyleName> for MarkdownStyle {
    fn from(style: StyleName) -> Self {
        match style {
            StyleName::Bare => Self::Bare,
            StyleName::Quoted => Self::Quoted,
        }
    }
}

/// `[parser]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Container depth beyond which nested blocks are not parsed.
    pub max_nesting: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
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
    /// The alert extension rejected the options.
    #[error("Alert setup error: {0}")]
    Alert(#[from] AlertError),
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `mdalert.toml` in the current directory and its parents, falling
    /// back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Search for the config file in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_alerts()?;
        self.validate_parser()?;
        Ok(())
    }

    fn validate_alerts(&self) -> Result<(), ConfigError> {
        let prefix = &self.alerts.class_prefix;
        if prefix.is_empty() {
            return Err(ConfigError::Validation(
                "alerts.class_prefix cannot be empty".to_owned(),
            ));
        }
        if !prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "alerts.class_prefix may only contain ASCII letters, digits, '-' and '_': {prefix:?}"
            )));
        }

        self.label_set()?;
        Ok(())
    }

    fn validate_parser(&self) -> Result<(), ConfigError> {
        let max_nesting = self.parser.max_nesting;
        if max_nesting == 0 {
            return Err(ConfigError::Validation(
                "parser.max_nesting must be greater than 0".to_owned(),
            ));
        }
        if max_nesting > MAX_NESTING_LIMIT {
            return Err(ConfigError::Validation(format!(
                "parser.max_nesting cannot exceed {MAX_NESTING_LIMIT}"
            )));
        }
        Ok(())
    }

    fn label_set(&self) -> Result<LabelSet, ConfigError> {
        LabelSet::from_labels(&self.alerts.labels)
            .map_err(|err| ConfigError::Validation(format!("alerts.labels: {err}")))
    }

    /// Alert options described by the `[alerts]` section.
    pub fn alert_options(&self) -> Result<AlertOptions, ConfigError> {
        let alerts = &self.alerts;
        let options = alerts.icons.iter().fold(
            AlertOptions::default()
                .with_labels(self.label_set()?)
                .with_class_prefix(alerts.class_prefix.clone())
                .with_parse_nested(alerts.parse_nested)
                .with_case_sensitive_labels(alerts.case_sensitive_labels)
                .with_markdown_style(alerts.markdown_style.into()),
            |options, (label, icon)| options.with_icon(label, icon.clone()),
        );
        Ok(options)
    }

    /// Formatter configured from this file.
    pub fn formatter(&self) -> Result<AlertFormatter, ConfigError> {
        let formatter =
            AlertFormatter::new(self.alert_options()?)?.with_max_nesting(self.parser.max_nesting);
        Ok(formatter)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(
            config.alerts.labels,
            vec!["NOTE", "TIP", "IMPORTANT", "WARNING", "CAUTION"]
        );
        assert_eq!(config.alerts.class_prefix, "markdown-alert");
        assert!(config.alerts.parse_nested);
        assert!(!config.alerts.case_sensitive_labels);
        assert_eq!(config.alerts.markdown_style, StyleName::Bare);
        assert_eq!(config.parser.max_nesting, 20);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_default_options_match_library_defaults() {
        let options = Config::default().alert_options().unwrap();

        assert_eq!(options, AlertOptions::default());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config.alerts.class_prefix, "markdown-alert");
    }

    #[test]
    fn test_parse_alerts_config() {
        let toml = r#"
[alerts]
labels = ["note", "todo"]
class_prefix = "callout"
parse_nested = false
case_sensitive_labels = true
markdown_style = "quoted"

[alerts.icons]
note = "ℹ️"
"#;
        let config = Config::from_toml(toml).unwrap();
        let options = config.alert_options().unwrap();

        assert_eq!(
            options.labels,
            LabelSet::Only(["NOTE".to_owned(), "TODO".to_owned()].into())
        );
        assert_eq!(options.class_prefix, "callout");
        assert!(!options.parse_nested);
        assert!(options.case_sensitive_labels);
        assert_eq!(options.markdown_style, MarkdownStyle::Quoted);
        assert_eq!(options.icon_for(&AlertKind::Note), Some("ℹ️"));
    }

    #[test]
    fn test_parse_wildcard_labels() {
        let config = Config::from_toml("[alerts]\nlabels = [\"*\"]\n").unwrap();

        assert_eq!(config.alert_options().unwrap().labels, LabelSet::Any);
    }

    #[test]
    fn test_parse_parser_config() {
        let config = Config::from_toml("[parser]\nmax_nesting = 5\n").unwrap();

        assert_eq!(config.parser.max_nesting, 5);
        assert_eq!(config.formatter().unwrap().parser().max_nesting, 5);
    }

    #[test]
    fn test_unknown_style_is_parse_error() {
        let result = Config::from_toml("[alerts]\nmarkdown_style = \"fancy\"\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(toml: &str, expected_substrings: &[&str]) {
        let err = Config::from_toml(toml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_class_prefix_empty() {
        assert_validation_error(
            "[alerts]\nclass_prefix = \"\"\n",
            &["alerts.class_prefix", "empty"],
        );
    }

    #[test]
    fn test_validate_class_prefix_characters() {
        assert_validation_error(
            "[alerts]\nclass_prefix = \"a b\"\n",
            &["alerts.class_prefix"],
        );
    }

    #[test]
    fn test_validate_labels() {
        assert_validation_error("[alerts]\nlabels = []\n", &["alerts.labels", "empty"]);
        assert_validation_error(
            "[alerts]\nlabels = [\"*\", \"NOTE\"]\n",
            &["alerts.labels", "wildcard"],
        );
        assert_validation_error("[alerts]\nlabels = [\"no te\"]\n", &["alerts.labels"]);
    }

    #[test]
    fn test_validate_max_nesting() {
        assert_validation_error("[parser]\nmax_nesting = 0\n", &["greater than 0"]);
        assert_validation_error("[parser]\nmax_nesting = 101\n", &["cannot exceed 100"]);
    }

    #[test]
    fn test_load_explicit_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[alerts]\nclass_prefix = \"box\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.alerts.class_prefix, "box");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs").join("guide");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_discover_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        std::fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(nested.join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[alerts\n").unwrap();

        assert!(matches!(
            Config::load_from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_formatter_uses_config() {
        let config = Config::from_toml(
            "[alerts]\nclass_prefix = \"callout\"\nmarkdown_style = \"quoted\"\n",
        )
        .unwrap();
        let formatter = config.formatter().unwrap();

        assert_eq!(
            formatter.to_markdown("> [!note]\n> hi\n").unwrap(),
            "> [!NOTE]\n>\n> hi\n"
        );
        assert_eq!(
            formatter.to_html("> [!NOTE]\n").unwrap(),
            "<div class=\"callout callout-note\">\n<p class=\"callout-title\">Note</p>\n</div>"
        );
    }
}
