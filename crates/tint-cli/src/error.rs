use thiserror::Error;
use tint_color::ColorParseError;
use tint_scheme::StrategyParseError;
use tint_state::{ConfigError, PaletteSizeError};

pub type Result<T> = std::result::Result<T, TintError>;

#[derive(Debug, Error)]
pub enum TintError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),

    #[error("{0}")]
    Strategy(#[from] StrategyParseError),

    #[error("{0}")]
    PaletteSize(#[from] PaletteSizeError),

    #[error("invalid log filter {directive:?}: {message}")]
    LogFilter { directive: String, message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl TintError {
    /// Process exit code: 2 for bad input, 3 for bad configuration, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Color(_)
            | Self::Strategy(_)
            | Self::PaletteSize(_)
            | Self::LogFilter { .. }
            | Self::InvalidArgument { .. } => 2,
            Self::Config(_) => 3,
            Self::Io(_) | Self::Json(_) => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
