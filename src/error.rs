//! Error type shared by the reading source and the CSV sink.

use std::fmt;

/// Errors raised while decoding readings or persisting them.
///
/// Every variant is fatal to the current invocation; nothing is retried.
#[derive(Debug)]
pub enum AirQualityError {
    /// The input payload could not be decoded into readings.
    Parse {
        format: &'static str,
        message: String,
    },
    /// A directory or file could not be created or written.
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl AirQualityError {
    pub fn parse(format: &'static str, message: impl Into<String>) -> Self {
        AirQualityError::Parse {
            format,
            message: message.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        AirQualityError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, AirQualityError::Parse { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, AirQualityError::Io { .. })
    }
}

impl fmt::Display for AirQualityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirQualityError::Parse { format, message } => {
                write!(f, "parse error ({}): {}", format, message)
            }
            AirQualityError::Io { context, source } => {
                write!(f, "persist error: {}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AirQualityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AirQualityError::Parse { .. } => None,
            AirQualityError::Io { source, .. } => Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, AirQualityError>;
