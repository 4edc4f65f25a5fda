use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input file '{path}' is empty: a header row is required")]
    EmptyInputError { path: String },

    #[error("Line {line} has {found} field(s), expected at least {expected}")]
    MissingFieldError {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("Malformed quoting at line {line}: {reason}")]
    QuoteError { line: u64, reason: String },

    #[error("Invalid integer '{value}' in column '{column}' at line {line}")]
    NumericFieldError {
        line: u64,
        column: String,
        value: String,
    },

    #[error("{usage}")]
    UsageError { usage: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: Box<EtlError>,
    },

    #[error("Failed to write {label} output '{path}': {source}")]
    WriteError {
        label: String,
        path: String,
        #[source]
        source: Box<EtlError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Format,
    Data,
    Usage,
    Configuration,
}

impl EtlError {
    pub fn read(path: impl Into<String>, source: EtlError) -> Self {
        EtlError::ReadError {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn write(label: impl Into<String>, path: impl Into<String>, source: EtlError) -> Self {
        EtlError::WriteError {
            label: label.into(),
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// 依錯誤種類分類，會穿透 read/write 包裝。
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::CsvError(e) => match e.kind() {
                csv::ErrorKind::Io(_) => ErrorCategory::Io,
                _ => ErrorCategory::Format,
            },
            EtlError::EmptyInputError { .. }
            | EtlError::MissingFieldError { .. }
            | EtlError::QuoteError { .. } => ErrorCategory::Format,
            EtlError::NumericFieldError { .. } => ErrorCategory::Data,
            EtlError::UsageError { .. } => ErrorCategory::Usage,
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::ReadError { source, .. } | EtlError::WriteError { source, .. } => {
                source.category()
            }
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ReadError { path, source } => {
                format!("Error reading input file '{}': {}", path, source)
            }
            EtlError::WriteError {
                label,
                path,
                source,
            } => format!("Error writing {} file '{}': {}", label, path, source),
            EtlError::UsageError { usage } => usage.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the path exists and that you have permission to access it",
            ErrorCategory::Format => {
                "Make sure the file is delimited text with a header row and three columns per line"
            }
            ErrorCategory::Data => "Fix the non-numeric value or run without --strict to coerce it to 0",
            ErrorCategory::Usage => "Pass exactly two positional arguments: <source> <destination>",
            ErrorCategory::Configuration => "Review the configuration file and command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
