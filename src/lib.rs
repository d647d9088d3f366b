//! beautidir - a recursive in-place beautifier for web source trees
//!
//! This library provides utilities for walking a directory tree, matching
//! files to formatters by extension (JavaScript, JSON, HTML), excluding
//! vendored library files via TOML-configurable rules, and rewriting each
//! matched file in place with its beautified content.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod format;
pub mod output;

pub use config::{CompiledExcludes, ConfigError, ExcludeConfig};
pub use dispatch::{Formatter, FormatterMap};
pub use format::FormatError;

pub use cli::{run_cli, run_cli_with_config};
