//! Exclusion rule configuration.
//!
//! This module provides support for loading and applying file exclusion
//! rules via TOML configuration files. Excluded files are left untouched by
//! the beautifier even when their extension is dispatched. It supports
//! multiple matching strategies:
//! - Exact filename matching
//! - Glob pattern matching
//! - Regex pattern matching
//! - Include (whitelist) rules that override exclude rules
//!
//! # Configuration File Format
//!
//! Configuration is stored in TOML format with the following structure:
//!
//! ```toml
//! [exclude]
//! filenames = ["bundle.js"]
//! patterns = ["vendor/**", "*.min.js"]
//! regex = ['^jquery-\d+\.\d+\.\d+\.min\.js$']
//!
//! [include]
//! patterns = []
//! ```
//!
//! When no configuration file exists, the default rules exclude vendored
//! jQuery bundles (`jquery-<version>.min.js`) and nothing else.

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// The default regex for vendored jQuery bundles, e.g. `jquery-3.6.0.min.js`.
const JQUERY_BUNDLE_REGEX: &str = r"^jquery-\d+\.\d+\.\d+\.min\.js$";

/// Errors that can occur during configuration loading and rule compilation.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(
                    f,
                    "Invalid glob pattern '{}': expected *.ext or dir/**",
                    pattern
                )
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for file exclusion rules.
///
/// This struct is deserialized from TOML configuration files and contains
/// all rules for which files should be skipped by the beautifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludeConfig {
    /// Rules for excluding files.
    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Rules for including files (whitelist, overrides exclude rules).
    #[serde(default)]
    pub include: IncludeRules,
}

/// Rules for excluding files from beautification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to exclude (e.g., "bundle.js").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns to exclude (e.g., "*.min.js", "vendor/**").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns to exclude, matched against the filename.
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Rules for including files, overriding exclude rules (whitelist).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    /// Glob patterns that override exclude rules.
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl ExcludeConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.beautidirrc.toml` in the current directory
    /// 3. Look for `~/.config/beautidir/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but cannot be read.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        // If explicitly specified, load from that path
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        // Try current directory
        let local_config = PathBuf::from(".beautidirrc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        // Try home directory
        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("beautidir")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        // Fall back to defaults
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile configuration into optimized structures for matching.
    ///
    /// # Errors
    ///
    /// Returns an error if any regex or glob patterns are invalid.
    pub fn compile(self) -> Result<CompiledExcludes, ConfigError> {
        CompiledExcludes::new(self)
    }
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            exclude: ExcludeRules {
                filenames: Vec::new(),
                patterns: Vec::new(),
                regex: vec![JQUERY_BUNDLE_REGEX.to_string()],
            },
            include: IncludeRules::default(),
        }
    }
}

/// Compiled, optimized exclusion rules for efficient file matching.
///
/// All glob and regex patterns are validated and pre-compiled once, so that
/// matching each file during the walk does not reparse any patterns.
pub struct CompiledExcludes {
    exclude_filenames: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
}

impl CompiledExcludes {
    /// Create compiled rules from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex patterns are invalid.
    fn new(config: ExcludeConfig) -> Result<Self, ConfigError> {
        // Pre-compile all glob patterns and validate them
        let exclude_patterns = config
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let include_patterns = config
            .include
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Pre-compile all regex patterns and validate them
        let exclude_regexes = config
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            exclude_filenames: config.exclude.filenames.into_iter().collect(),
            exclude_patterns,
            exclude_regexes,
            include_patterns,
        })
    }

    /// Check if a file is excluded from beautification.
    ///
    /// Checks are performed in this order, with early termination:
    /// 1. Include patterns (whitelist) - if matched, never excluded
    /// 2. Exact filename match - if matched, exclude
    /// 3. Glob pattern match - if matched, exclude
    /// 4. Regex pattern match against the filename - if matched, exclude
    /// 5. Default: not excluded
    pub fn is_excluded(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        // 1. Include rules have priority (whitelist override)
        if self.matches_include_patterns(file_path) {
            return false;
        }

        // 2. Check exact filename match
        if self.exclude_filenames.contains(file_name.as_ref()) {
            return true;
        }

        // 3. Check glob patterns
        if self.matches_exclude_patterns(file_path) {
            return true;
        }

        // 4. Check regex patterns
        self.matches_exclude_regex(&file_name)
    }

    /// Check if file matches any include (whitelist) patterns.
    fn matches_include_patterns(&self, file_path: &Path) -> bool {
        self.include_patterns
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
    }

    /// Check if file matches any exclude glob patterns.
    fn matches_exclude_patterns(&self, file_path: &Path) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
    }

    /// Check if file matches any exclude regex patterns.
    fn matches_exclude_regex(&self, file_name: &str) -> bool {
        self.exclude_regexes
            .iter()
            .any(|regex| regex.is_match(file_name))
    }
}
