use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid JSON input: {reason}")]
    ParseError { reason: String },

    #[error("Unknown target app: '{target}'")]
    UnknownTarget { target: String },

    #[error("Data too large for a QR code: {length} bytes exceeds the {capacity} byte capacity at EC level {ec_level}")]
    DataTooLarge {
        length: usize,
        capacity: usize,
        ec_level: char,
    },

    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Cannot read {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Encoding,
    FileSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ParseError { .. } | Self::InputNotFound { .. } | Self::InputUnreadable { .. } => {
                ErrorCategory::Input
            }
            Self::UnknownTarget { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::DataTooLarge { .. } | Self::Image(_) => ErrorCategory::Encoding,
            Self::Io { .. } => ErrorCategory::FileSystem,
        }
    }

    /// Per-record failures are `Medium`: the batch keeps going.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DataTooLarge { .. } | Self::Image(_) => ErrorSeverity::Medium,
            Self::ParseError { .. }
            | Self::InputNotFound { .. }
            | Self::InputUnreadable { .. }
            | Self::UnknownTarget { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::Io { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ParseError { .. } => "Error: Invalid JSON input.".to_string(),
            Self::UnknownTarget { target } => {
                format!("Error: '{}' is not a supported authenticator app.", target)
            }
            Self::DataTooLarge { length, .. } => format!(
                "Error: a {} byte URI is too long to fit in a QR code.",
                length
            ),
            Self::InputNotFound { path } => format!("Error: {} not found.", path.display()),
            Self::InputUnreadable { path, source } => {
                format!("Error: could not read {}: {}", path.display(), source)
            }
            Self::Io { path, source } => {
                format!("Error: could not access {}: {}", path.display(), source)
            }
            Self::Image(e) => format!("Error: could not encode the QR image: {}", e),
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ParseError { .. } => {
                "Check that the input is the decrypted JSON export and that it is not truncated"
                    .to_string()
            }
            Self::UnknownTarget { .. } => format!(
                "Choose one of: {}",
                crate::domain::target::TargetApp::ALL
                    .iter()
                    .map(|app| app.display_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::DataTooLarge { .. } => {
                "Shorten the token name or issuer, or choose a lower error correction level"
                    .to_string()
            }
            Self::InputNotFound { path } => format!(
                "Place the decrypted export at '{}' or pass its location with --input",
                path.display()
            ),
            Self::InputUnreadable { path, .. } => format!(
                "Check that '{}' is a regular file you have permission to read",
                path.display()
            ),
            Self::Io { .. } => {
                "Check that the path exists and that you have permission to write to it"
                    .to_string()
            }
            Self::Image(_) => "Try a smaller box size".to_string(),
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Fix the option on the command line or in the config file".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
