use crate::config::RunSettings;
use crate::core::NumericMode;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_delimiter, validate_distinct, validate_path, Validate};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional settings file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParsingConfig {
    pub mode: Option<NumericMode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub by_name: Option<String>,
    pub by_age: Option<String>,
    pub delimiter: Option<char>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers the values present in this file over `settings`.
    pub fn apply_to(&self, settings: &mut RunSettings) -> Result<()> {
        if let Some(delimiter) = self.input.delimiter {
            settings.input_delimiter = validate_delimiter("input.delimiter", delimiter)?;
        }
        if let Some(delimiter) = self.output.delimiter {
            settings.output_delimiter = validate_delimiter("output.delimiter", delimiter)?;
        }
        if let Some(mode) = self.parsing.mode {
            settings.numeric_mode = mode;
        }
        if let Some(directory) = &self.output.directory {
            settings.output_dir = PathBuf::from(directory);
        }
        if let Some(by_name) = &self.output.by_name {
            settings.by_name_file = by_name.clone();
        }
        if let Some(by_age) = &self.output.by_age {
            settings.by_age_file = by_age.clone();
        }
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(delimiter) = self.input.delimiter {
            validate_delimiter("input.delimiter", delimiter)?;
        }
        if let Some(delimiter) = self.output.delimiter {
            validate_delimiter("output.delimiter", delimiter)?;
        }
        if let Some(directory) = &self.output.directory {
            validate_path("output.directory", directory)?;
        }
        if let Some(by_name) = &self.output.by_name {
            validate_path("output.by_name", by_name)?;
        }
        if let Some(by_age) = &self.output.by_age {
            validate_path("output.by_age", by_age)?;
        }
        if let (Some(by_name), Some(by_age)) = (&self.output.by_name, &self.output.by_age) {
            validate_distinct("output.by_age", by_name, by_age)?;
        }
        Ok(())
    }
}
