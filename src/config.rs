//! Layered settings for the README conversion.
//!
//! Sources are merged in order, later ones winning:
//! 1. the built-in `Config.toml`
//! 2. a `Config.toml` next to the executable, if present
//! 3. an explicit file passed with `--config`
//! 4. `README2MD_*` environment variables
//! 5. command-line overrides
//!
//! ```no_run
//! use readme2md::{Overrides, Settings};
//!
//! let settings = Settings::new(&Overrides::default()).unwrap();
//! println!("{}", settings.file_name);
//! ```

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::{env, path::PathBuf};

use crate::converter::Nesting;

const BUILTIN: &str = include_str!("../Config.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// File looked up inside the target directory.
    pub file_name: String,
    pub collapse_spaces: bool,
    pub nesting: Nesting,
    /// Prefix for rewritten image and video links, without a trailing slash.
    pub files_dir: String,
    pub code_block_lang: String,
    pub code_block_placeholder: String,
    /// Prepended to a video's `src` in its caption.
    pub video_host: String,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub nesting: Option<Nesting>,
}

impl Settings {
    /// Load every source, see the module docs for the order.
    pub fn new(overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder = builtin();

        if let Ok(exe_path) = env::current_exe() {
            if let Some(dir) = exe_path.parent() {
                let external = dir.join("Config.toml");
                if external.is_file() {
                    builder = builder.add_source(File::from(external).required(false));
                }
            }
        }

        if let Some(path) = &overrides.config_file {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("README2MD")
                .prefix_separator("_")
                .separator("__"),
        );

        if let Some(nesting) = overrides.nesting {
            builder = builder.set_override("nesting", nesting.as_str())?;
        }

        builder.build()?.try_deserialize()
    }

    /// Only the built-in defaults, ignoring files and the environment.
    pub fn builtin() -> Result<Self, ConfigError> {
        builtin().build()?.try_deserialize()
    }

    /// Built-in defaults layered with one TOML file.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        builtin()
            .add_source(File::from(path.into()).required(true))
            .build()?
            .try_deserialize()
    }
}

fn builtin() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(BUILTIN, FileFormat::Toml))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_builtin_defaults() {
        let settings = Settings::builtin().unwrap();
        assert_eq!(settings.file_name, "README.md");
        assert!(settings.collapse_spaces);
        assert_eq!(settings.nesting, Nesting::FirstClose);
        assert_eq!(settings.files_dir, "./files");
        assert_eq!(settings.code_block_lang, "js");
        assert_eq!(settings.video_host, "https://threejs-journey.xyz");
    }

    #[test]
    fn test_file_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "nesting = \"balanced\"\nfiles_dir = \"assets\"\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.nesting, Nesting::Balanced);
        assert_eq!(settings.files_dir, "assets");
        // untouched keys keep their defaults
        assert_eq!(settings.file_name, "README.md");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            config_file: Some(dir.path().join("absent.toml")),
            nesting: None,
        };
        assert!(Settings::new(&overrides).is_err());
    }

    #[test]
    fn test_cli_nesting_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "nesting = \"first-close\"\n").unwrap();

        let overrides = Overrides {
            config_file: Some(path),
            nesting: Some(Nesting::Balanced),
        };
        let settings = Settings::new(&overrides).unwrap();
        assert_eq!(settings.nesting, Nesting::Balanced);
    }
}
