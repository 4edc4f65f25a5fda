pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{toml_config::TomlConfig, RunSettings};
pub use core::{etl::EtlEngine, pipeline::CsvSortPipeline};
pub use domain::model::{NumericMode, Record, SortKey};
pub use utils::error::{EtlError, Result};
