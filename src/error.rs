//! Error types for tween scheduling and configuration
//!
//! Errors are reported at the edges (schedule time, config load time).
//! Nothing in the per-frame path returns an error.

use std::fmt;

/// A tween request that was refused by the scheduler
#[derive(Debug, Clone, PartialEq)]
pub enum TweenError {
    /// Duration was zero, negative, or not finite
    InvalidDuration(f64),
    /// The field accessor did not resolve to a number on the target
    UnreadableField,
    /// The field resolved but its current value is NaN or infinite
    NonFiniteStart(f64),
    /// The requested end value is NaN or infinite
    NonFiniteTarget(f64),
    /// The easing curve's parameter is NaN or infinite
    NonFiniteEasing(f64),
}

impl fmt::Display for TweenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TweenError::InvalidDuration(ms) => write!(f, "Invalid tween duration: {} ms", ms),
            TweenError::UnreadableField => write!(f, "Tween field is not readable on target"),
            TweenError::NonFiniteStart(v) => write!(f, "Tween start value is not finite: {}", v),
            TweenError::NonFiniteTarget(v) => write!(f, "Tween target value is not finite: {}", v),
            TweenError::NonFiniteEasing(v) => write!(f, "Tween easing parameter is not finite: {}", v),
        }
    }
}

impl std::error::Error for TweenError {}

/// Error type for loading and saving slot configuration
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(e) => Some(e),
            ConfigError::SerializeError(e) => Some(e),
            ConfigError::ValidationError(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_error_display() {
        let err = TweenError::InvalidDuration(0.0);
        assert_eq!(err.to_string(), "Invalid tween duration: 0 ms");
        assert_eq!(TweenError::UnreadableField.to_string(), "Tween field is not readable on target");
    }

    #[test]
    fn test_config_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io.into();
        assert!(matches!(err, ConfigError::IoError(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
