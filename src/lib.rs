//! Rewrite a README exported from a page builder into Markdown.
//!
//! The work is a fixed sequence of tag rewrites (see [`generator::STAGES`])
//! applied to one buffer that is threaded through every stage.

pub mod config;
pub mod converter;
pub mod error;
pub mod generator;

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

pub use crate::config::{Overrides, Settings};
pub use crate::converter::{Attributes, Nesting, TagSpec, Transformer, transform};
pub use crate::error::{Error, Result};

use crate::generator::Context;

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(" {2,}").expect("invalid space regex"));

/// Collapse runs of the space character. Tabs and newlines are kept.
pub fn collapse_spaces(text: &str) -> String {
    SPACE_RUN.replace_all(text, " ").into_owned()
}

/// HTML string -> Markdown string
pub fn convert(html: &str, settings: &Settings) -> Result<String> {
    let text = if settings.collapse_spaces {
        collapse_spaces(html)
    } else {
        html.to_owned()
    };
    generator::run(text, &Context::new(settings))
}

/// Where the README lives inside `dir`.
pub fn readme_path(dir: &Path, settings: &Settings) -> PathBuf {
    dir.join(&settings.file_name)
}

pub fn convert_from_path(path: &Path, settings: &Settings) -> Result<String> {
    let html = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "Read README");
    convert(&html, settings)
}

/// Convert the README in `dir` and overwrite it with the Markdown.
///
/// Nothing is written unless every stage succeeds.
pub fn convert_readme(dir: &Path, settings: &Settings) -> Result<PathBuf> {
    let path = readme_path(dir, settings);
    let markdown = convert_from_path(&path, settings)?;
    fs::write(&path, markdown).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Wrote Markdown");
    Ok(path)
}
