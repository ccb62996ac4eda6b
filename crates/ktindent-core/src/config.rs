//! Configuration types for ktindent.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Top-level configuration for ktindent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Properties applied to every file (`indent_size`, ...).
    #[serde(default)]
    pub properties: HashMap<String, toml::Value>,

    /// Per-glob property overrides, applied in order.
    #[serde(default)]
    pub overrides: Vec<Override>,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or an override glob does not
    /// compile.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every override pattern is a valid glob.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGlob`] for the first bad pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in self.overrides.iter().flat_map(|o| &o.files) {
            glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidGlob {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Sets a base property, replacing any configured value.
    pub fn set_property(&mut self, key: &str, value: impl Into<String>) {
        self.properties.retain(|k, _| !k.eq_ignore_ascii_case(key));
        self.properties
            .insert(key.to_ascii_lowercase(), toml::Value::String(value.into()));
    }

    /// Resolves the properties for a file path relative to the analysis root.
    ///
    /// Base `[properties]` come first; every matching `[[overrides]]` entry
    /// is layered on top in declaration order.
    #[must_use]
    pub fn properties_for(&self, relative_path: &Path) -> Properties {
        let mut properties = Properties::from_table(&self.properties);
        for entry in &self.overrides {
            if entry.matches(relative_path) {
                properties.extend(&Properties::from_table(&entry.properties));
            }
        }
        properties
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Whether a file with syntax errors aborts the run.
    #[serde(default)]
    pub fail_on_parse_error: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
            fail_on_parse_error: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/build/**".to_string(), "**/.gradle/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// Properties for files matching any of `files`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Override {
    /// Glob patterns matched against the path relative to the root.
    pub files: Vec<String>,

    /// Properties to apply.
    #[serde(default)]
    pub properties: HashMap<String, toml::Value>,
}

impl Override {
    /// Returns `true` if any pattern matches `relative_path`.
    #[must_use]
    pub fn matches(&self, relative_path: &Path) -> bool {
        self.files.iter().any(|pattern| {
            glob::Pattern::new(pattern).is_ok_and(|p| p.matches_path(relative_path))
        })
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,
}

/// Resolved string properties for one file.
///
/// Keys are case-insensitive; values are kept verbatim so rules can decide
/// how to interpret them (numbers, `unset`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    /// Converts a TOML table into string properties.
    ///
    /// Strings are taken as-is, scalars are rendered; arrays and tables are
    /// ignored.
    #[must_use]
    pub fn from_table(table: &HashMap<String, toml::Value>) -> Self {
        let mut properties = Self::default();
        for (key, value) in table {
            let rendered = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    tracing::debug!("Ignoring non-scalar property {key} = {other}");
                    continue;
                }
            };
            properties.insert(key, rendered);
        }
        properties
    }

    /// Inserts a property, lowercasing the key.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_ascii_lowercase(), value.into());
    }

    /// Gets a property value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Copies every property of `other` over this one.
    pub fn extend(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Returns `true` if no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// An override pattern is not a valid glob.
    #[error("Invalid glob pattern `{pattern}`: {message}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// Glob error message.
        message: String,
    },
}
