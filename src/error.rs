//! Unified error hierarchy for liftrs
//!
//! Program lookups fail loudly with typed errors. Timer controls never fail
//! (invalid transitions are no-ops). Alert failures are logged at their
//! severity and dropped.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all liftrs operations
#[derive(Debug, Error)]
pub enum LiftRsError {
    /// Program generation and schedule lookups
    #[error("Program error: {0}")]
    Program(#[from] ProgramError),

    /// Completion alert delivery
    #[error("Alert error: {0}")]
    Alert(#[from] AlertError),

    /// Session persistence
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON export failures
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while classifying weeks or generating workouts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// Week number outside the 26-week horizon
    #[error("Week {week} is out of range (expected {min}-{max})")]
    WeekOutOfRange { week: u32, min: u32, max: u32 },

    /// Day key with no template set in the catalog
    #[error("Unknown training day: {day}")]
    UnknownDay { day: String },
}

/// Errors produced by alert sinks (sound, vibration, toast)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    /// The sink cannot produce this kind of feedback
    #[error("{channel} alerts are not supported by this sink")]
    Unsupported { channel: String },

    /// The sink tried and failed
    #[error("Failed to deliver {channel} alert: {reason}")]
    DeliveryFailed { channel: String, reason: String },
}

/// Workout session persistence errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Session file could not be read or written
    #[error("Session file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Session file contents are not valid JSON for a session
    #[error("Malformed session data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type alias for liftrs operations
pub type Result<T> = std::result::Result<T, LiftRsError>;

impl LiftRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LiftRsError::Program(_) => ErrorSeverity::Warning,
            LiftRsError::Alert(AlertError::Unsupported { .. }) => ErrorSeverity::Debug,
            LiftRsError::Alert(AlertError::DeliveryFailed { .. }) => ErrorSeverity::Warning,
            LiftRsError::Session(SessionError::Malformed(_)) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Log this error at the tracing level matching its severity
    pub fn log(&self, message: &str) {
        let level = self.severity().to_tracing_level();
        if level == tracing::Level::ERROR {
            tracing::error!(error = %self, "{}", message);
        } else if level == tracing::Level::WARN {
            tracing::warn!(error = %self, "{}", message);
        } else if level == tracing::Level::INFO {
            tracing::info!(error = %self, "{}", message);
        } else {
            tracing::debug!(error = %self, "{}", message);
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LiftRsError::Program(ProgramError::WeekOutOfRange { week, min, max }) => {
                format!(
                    "Week {} does not exist. The program runs from week {} to week {}.",
                    week, min, max
                )
            }
            LiftRsError::Program(ProgramError::UnknownDay { day }) => {
                format!(
                    "No workout is planned for '{}'. Try sunday, tuesday, friday or home.",
                    day
                )
            }
            LiftRsError::Session(SessionError::File { path, .. }) => {
                format!("Could not access session file: {}", path.display())
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the command from finishing
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
    /// Expected on some platforms, only interesting when debugging
    Debug,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
            ErrorSeverity::Debug => tracing::Level::DEBUG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = LiftRsError::Program(ProgramError::WeekOutOfRange {
            week: 27,
            min: 1,
            max: 26,
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        assert_eq!(err.severity().to_tracing_level(), tracing::Level::WARN);

        let err: LiftRsError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_alert_error_severity() {
        let unsupported: LiftRsError = AlertError::Unsupported {
            channel: "vibration".to_string(),
        }
        .into();
        assert_eq!(unsupported.severity(), ErrorSeverity::Debug);
        assert_eq!(unsupported.severity().to_tracing_level(), tracing::Level::DEBUG);

        let failed: LiftRsError = AlertError::DeliveryFailed {
            channel: "sound".to_string(),
            reason: "no audio device".to_string(),
        }
        .into();
        assert_eq!(failed.severity(), ErrorSeverity::Warning);
        assert_eq!(failed.severity().to_tracing_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_program_error_display() {
        let err = ProgramError::WeekOutOfRange {
            week: 0,
            min: 1,
            max: 26,
        };
        assert_eq!(err.to_string(), "Week 0 is out of range (expected 1-26)");

        let err = ProgramError::UnknownDay {
            day: "saturday".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown training day: saturday");
    }

    #[test]
    fn test_user_messages() {
        let err: LiftRsError = ProgramError::UnknownDay {
            day: "lundi".to_string(),
        }
        .into();
        assert!(err.user_message().contains("No workout is planned for 'lundi'"));

        let err: LiftRsError = ProgramError::WeekOutOfRange {
            week: 30,
            min: 1,
            max: 26,
        }
        .into();
        assert!(err.user_message().contains("week 1 to week 26"));
    }
}
