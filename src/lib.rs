//! script-stencil - placeholder expansion for freshly created source files
//!
//! When an editor's creation hook sees a new source file, it hands the
//! path to this crate. A template is located by walking up the directory
//! tree, `#SYMBOL#` placeholders in it are expanded through a registry
//! of symbol handlers, and the result atomically replaces the new file's
//! content. Unknown symbols pass through untouched, so templates never
//! fail to expand.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use script_stencil::{expand_to_string, SymbolRegistry};
//!
//! let mut registry = SymbolRegistry::new();
//! registry.register_fn("NAME", |_, path| {
//!     path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
//! });
//!
//! let out = expand_to_string("pub struct #NAME#;", &registry, Path::new("src/Widget.rs"));
//! assert_eq!(out, "pub struct Widget;");
//! ```

pub mod builtins;
pub mod config;
pub mod engine;
pub mod locator;
pub mod materialize;

pub use builtins::{
    register_builtins, BuiltinContext, Clock, Environment, SystemClock, SystemEnvironment,
};
pub use config::{Config, ConfigError, ProjectInfo, TemplateConfig};
pub use engine::{expand, expand_to_string, SymbolHandler, SymbolRegistry};
pub use locator::find_template_file;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Errors from the file-expansion pipeline.
///
/// Only stream/filesystem failures surface here; symbol-resolution
/// outcomes never do (an unresolved symbol is output text, not an
/// error).
#[derive(Debug, Error)]
pub enum ExpandError {
    /// Target or root path cannot be resolved
    #[error("cannot resolve path {path}: {source}")]
    Resolve { path: PathBuf, source: io::Error },

    /// Template file cannot be opened
    #[error("cannot open template {path}: {source}")]
    TemplateOpen { path: PathBuf, source: io::Error },

    /// Reading the template or writing the expansion failed
    #[error("failed to expand into {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Configuration for one expansion run.
///
/// Because registration is first-write-wins, callers who want to shadow
/// a stock symbol should build their own [`SymbolRegistry`], register
/// the custom handlers, call [`register_builtins`], and install the
/// result with [`ExpandConfig::with_registry`].
pub struct ExpandConfig {
    /// Symbol handlers consulted by the scanner
    pub registry: SymbolRegistry,
    /// Template search and extension-gate settings
    pub templates: TemplateConfig,
}

impl ExpandConfig {
    /// Build from loaded configuration, with the built-in symbols over
    /// system providers (wall clock, real environment).
    pub fn new(config: &Config) -> Self {
        let context = BuiltinContext::new().with_project(config.project.clone());
        Self::with_context(config, &context)
    }

    /// Build from loaded configuration with caller-supplied providers
    pub fn with_context(config: &Config, context: &BuiltinContext) -> Self {
        let mut registry = SymbolRegistry::new();
        register_builtins(&mut registry, context);
        Self {
            registry,
            templates: config.templates.clone(),
        }
    }

    /// Replace the symbol registry
    pub fn with_registry(mut self, registry: SymbolRegistry) -> Self {
        self.registry = registry;
        self
    }
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Creation-hook entry point: apply the extension gate, then run the
/// expansion pipeline.
///
/// Hooks fire for every new file, so files whose extension is not in
/// the watched set are skipped without being touched; `Ok(false)` says
/// so. `Ok(true)` means the file was expanded.
pub fn process_created_file(
    target: &Path,
    root: &Path,
    config: &ExpandConfig,
) -> Result<bool, ExpandError> {
    if !config.templates.watches(target) {
        debug!(target = %target.display(), "extension not watched, skipping");
        return Ok(false);
    }
    expand_new_file(target, root, config)?;
    Ok(true)
}

/// Run the full pipeline for a newly created file: locate a template,
/// expand it, and atomically replace the file's content.
///
/// When no template is found, the file's own existing content is used as
/// the template, so a file created with literal placeholders still gets
/// them expanded.
pub fn expand_new_file(
    target: &Path,
    root: &Path,
    config: &ExpandConfig,
) -> Result<(), ExpandError> {
    let (target, template) = locate(target, root, config)?;
    let reader = open_template(&template)?;

    materialize::replace_file_with(&target, |writer| {
        engine::expand(reader, writer, &config.registry, &target)
    })
    .map_err(|source| ExpandError::Io {
        path: target.clone(),
        source,
    })
}

/// Locate and expand the template for `target`, writing the result to
/// `output` instead of touching the file. Used by the CLI's dry-run
/// mode.
pub fn expand_to_writer<W: Write>(
    target: &Path,
    root: &Path,
    config: &ExpandConfig,
    output: &mut W,
) -> Result<(), ExpandError> {
    let (target, template) = locate(target, root, config)?;
    let reader = open_template(&template)?;

    engine::expand(reader, output, &config.registry, &target).map_err(|source| ExpandError::Io {
        path: target.clone(),
        source,
    })
}

/// Resolve paths and pick the template: nearest match from the upward
/// search, or the target itself (self-substitution).
fn locate(
    target: &Path,
    root: &Path,
    config: &ExpandConfig,
) -> Result<(PathBuf, PathBuf), ExpandError> {
    let target = canonical(target)?;
    let root = canonical(root)?;

    let template =
        find_template_file(&target, &root, &config.templates).unwrap_or_else(|| target.clone());
    info!(
        template = %template.display(),
        target = %target.display(),
        "expanding template"
    );

    Ok((target, template))
}

fn canonical(path: &Path) -> Result<PathBuf, ExpandError> {
    path.canonicalize().map_err(|source| ExpandError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

fn open_template(path: &Path) -> Result<BufReader<File>, ExpandError> {
    let file = File::open(path).map_err(|source| ExpandError::TemplateOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}
