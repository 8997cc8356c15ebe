//! Configuration for the gaussdoc tools.
//!
//! Settings come in three layers, later ones winning key by key:
//!
//! 1. `defaults/gaussdoc.default.toml`, compiled in with `include_str!`
//! 2. a TOML file, usually the one named by `gaussdoc --config`
//! 3. single-key overrides such as `lexer.tab_size` or `roles.default_role`
//!
//! The merged tree deserializes into [`GaussDocConfig`]. Its `[lexer]` table becomes the
//! [`LexerOptions`] handed to every lexer in the registry, `[html]` configures the highlight
//! formatter, `[signature]` sets the separator between return values, and `[roles]` seeds the
//! [`Inliner`] that role functions receive.

use crate::gauss::formats::html::HtmlConfig;
use crate::gauss::lexing::LexerOptions;
use crate::gauss::roles::{Inliner, RolesConfig};
use crate::gauss::signature::SignatureConfig;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_TOML: &str = include_str!("../../defaults/gaussdoc.default.toml");

/// File name looked up by [`Loader::with_project_dir`].
pub const PROJECT_FILE: &str = "gaussdoc.toml";

/// Settings for lexing, HTML output, signatures and roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GaussDocConfig {
    pub lexer: LexerOptions,
    pub html: HtmlConfig,
    pub signature: SignatureConfig,
    pub roles: RolesConfig,
}

impl GaussDocConfig {
    /// Defaults, plus `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut loader = Loader::new();
        if let Some(path) = path {
            debug!(config = %path.display(), "loading configuration file");
            loader = loader.with_file(path);
        }
        loader.build()
    }

    pub fn inliner(&self) -> Inliner {
        Inliner::from(&self.roles)
    }
}

/// Builds a [`GaussDocConfig`] from the embedded defaults and any user layers.
///
/// A layer only needs the keys it changes; a file holding just `[roles]` leaves the lexer,
/// HTML and signature settings at their defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(toml_file(path.as_ref(), true));
        self
    }

    /// Layer `gaussdoc.toml` from a documentation project directory, if there is one.
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(PROJECT_FILE);
        self.builder = self.builder.add_source(toml_file(&path, false));
        self
    }

    /// Set one dotted key, e.g. `html.css_class` or `lexer.strip_all`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Shorthand for the `roles.default_role` override used by documents without a role prefix.
    pub fn with_default_role(self, role: &str) -> Result<Self, ConfigError> {
        self.set_override("roles.default_role", role)
    }

    pub fn build(self) -> Result<GaussDocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn toml_file(path: &Path, required: bool) -> File<::config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(required)
}

pub fn load_defaults() -> Result<GaussDocConfig, ConfigError> {
    Loader::new().build()
}
