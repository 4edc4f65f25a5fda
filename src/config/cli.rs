use crate::config::toml_config::TomlConfig;
use crate::config::RunSettings;
use crate::core::NumericMode;
use crate::utils::error::Result;
use crate::utils::validation::{validate_delimiter, validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "sort-export")]
#[command(about = "Sort a delimited file by name and by age into two output files")]
pub struct CliConfig {
    /// Source delimited file (first row is a header)
    pub source: String,

    /// Destination file. Accepted but not used: outputs have fixed names
    pub destination: String,

    /// Optional TOML settings file
    #[arg(long)]
    pub config: Option<String>,

    /// Directory the two output files are written to
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Field delimiter for input and output
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Fail on non-integer Idade/Pontuacao values instead of using 0
    #[arg(long)]
    pub strict: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves defaults, then the TOML file if given, then command line flags.
    pub fn resolve(&self) -> Result<RunSettings> {
        let mut settings = RunSettings {
            source: PathBuf::from(&self.source),
            destination: Some(self.destination.clone()),
            ..RunSettings::default()
        };

        if let Some(path) = &self.config {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            file_config.apply_to(&mut settings)?;
            tracing::debug!("Applied settings from {}", path);
        }

        if let Some(dir) = &self.output_dir {
            settings.output_dir = PathBuf::from(dir);
        }
        if let Some(delimiter) = self.delimiter {
            let delimiter = validate_delimiter("delimiter", delimiter)?;
            settings.input_delimiter = delimiter;
            settings.output_delimiter = delimiter;
        }
        if self.strict {
            settings.numeric_mode = NumericMode::Strict;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source", &self.source)?;
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(delimiter) = self.delimiter {
            validate_delimiter("delimiter", delimiter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_two_positionals_are_required() {
        assert!(CliConfig::try_parse_from(["sort-export"]).is_err());
        assert!(CliConfig::try_parse_from(["sort-export", "in.csv"]).is_err());
        assert!(CliConfig::try_parse_from(["sort-export", "a", "b", "c"]).is_err());
        assert!(CliConfig::try_parse_from(["sort-export", "in.csv", "out.csv"]).is_ok());
    }

    #[test]
    fn test_destination_does_not_change_output_names() {
        let cli = CliConfig::try_parse_from(["sort-export", "in.csv", "custom.csv"]).unwrap();
        let settings = cli.resolve().unwrap();

        assert_eq!(settings.destination.as_deref(), Some("custom.csv"));
        assert_eq!(settings.by_name_file, crate::config::BY_NAME_FILE);
        assert_eq!(settings.by_age_file, crate::config::BY_AGE_FILE);
    }

    #[test]
    fn test_flags_override_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\ndelimiter = \";\"\n[output]\ndirectory = \"from-toml\"\n")
            .unwrap();
        let config_path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::try_parse_from([
            "sort-export",
            "in.csv",
            "out.csv",
            "--config",
            config_path.as_str(),
            "--output-dir",
            "from-cli",
            "--strict",
        ])
        .unwrap();
        let settings = cli.resolve().unwrap();

        assert_eq!(settings.input_delimiter, b';');
        assert_eq!(settings.output_dir, PathBuf::from("from-cli"));
        assert_eq!(settings.numeric_mode, NumericMode::Strict);
    }

    #[test]
    fn test_invalid_delimiter_flag() {
        let cli =
            CliConfig::try_parse_from(["sort-export", "in.csv", "out.csv", "--delimiter", "\""])
                .unwrap();
        assert!(cli.validate().is_err());
        assert!(cli.resolve().is_err());
    }
}
