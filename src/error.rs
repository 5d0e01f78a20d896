//! Error types for reading, rewriting and writing a README.

use std::path::PathBuf;

/// Errors raised while converting a README.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error when reading `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error when writing `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid tag pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("`<{tag}>` has no `{attribute}` attribute")]
    MissingAttribute { tag: String, attribute: String },

    #[error("image block has no `src=` token")]
    MissingSource,

    #[error("source path `{0}` has no file name with an extension")]
    MalformedSource(String),

    // Display carries the inner message so a single line reaches the log.
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// The innermost error, skipping any stage wrappers.
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}
