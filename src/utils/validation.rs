use crate::utils::error::{EtlError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A delimiter must be one ASCII byte that cannot be confused with quoting or row breaks.
pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<u8> {
    let reason = if !delimiter.is_ascii() {
        Some("Delimiter must be a single ASCII character")
    } else if matches!(delimiter, '"' | '\n' | '\r') {
        Some("Delimiter cannot be a quote or a line break")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.escape_default().to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(delimiter as u8),
    }
}

pub fn validate_distinct(field_name: &str, first: &str, second: &str) -> Result<()> {
    if first == second {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: first.to_string(),
            reason: "Both outputs would be written to the same file".to_string(),
        });
    }
    Ok(())
}
