//! Shared configuration loader for the DESC tooling.
//!
//! The built-in values live in `defaults/desc.default.toml`, compiled into the
//! crate. A project may drop a `desc.toml` next to its world files to change them;
//! [`Loader`] stacks the layers and deserializes the result into [`DescConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/desc.default.toml");

/// Top-level configuration consumed by DESC applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DescConfig {
    pub server: ServerConfig,
    pub completion: CompletionConfig,
    pub hover: HoverConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    pub enabled: bool,
    pub trigger_characters: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HoverConfig {
    pub enabled: bool,
}

/// Per-project overrides, looked up in the directory the server starts in.
pub const PROJECT_FILE: &str = "desc.toml";

/// Layers configuration sources over the embedded defaults.
///
/// Later layers win: defaults, then the project file, then an explicit file,
/// then single-key overrides from the command line.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer `desc.toml` from `dir` if there is one.
    pub fn with_project_file(self, dir: impl AsRef<Path>) -> Self {
        self.with_optional_file(dir.as_ref().join(PROJECT_FILE))
    }

    /// Layer a file the user asked for; the build fails if it is missing.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key, e.g. `server.log_level`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<DescConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
