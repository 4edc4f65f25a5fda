#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::NumericMode;
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct, validate_path, Validate};
use std::path::PathBuf;

pub const BY_NAME_FILE: &str = "ordenado_por_nome.csv";
pub const BY_AGE_FILE: &str = "ordenado_por_idade.csv";

/// Usage line printed on a wrong argument count. It names a destination
/// file, but outputs always go to [`BY_NAME_FILE`] and [`BY_AGE_FILE`].
pub const USAGE: &str = "Usage: sort-export <source-file.csv> <destination-file.csv>";

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Fully resolved settings for one run: defaults, then TOML, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub source: PathBuf,
    /// Second positional argument. Kept for reporting only.
    pub destination: Option<String>,
    pub output_dir: PathBuf,
    pub by_name_file: String,
    pub by_age_file: String,
    pub input_delimiter: u8,
    pub output_delimiter: u8,
    pub numeric_mode: NumericMode,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: None,
            output_dir: PathBuf::from("."),
            by_name_file: BY_NAME_FILE.to_string(),
            by_age_file: BY_AGE_FILE.to_string(),
            input_delimiter: b',',
            output_delimiter: b',',
            numeric_mode: NumericMode::Lenient,
        }
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validate_path("source", &self.source.to_string_lossy())?;
        validate_path("output.directory", &self.output_dir.to_string_lossy())?;
        validate_path("output.by_name", &self.by_name_file)?;
        validate_path("output.by_age", &self.by_age_file)?;
        validate_distinct("output.by_age", &self.by_name_file, &self.by_age_file)?;
        Ok(())
    }
}
