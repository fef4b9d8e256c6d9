//! Error types and handling infrastructure for tickloop.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! library error types. The binary wraps these in `anyhow` for application-level context.
//!
//! Two variants matter to the render loop:
//!
//! - [`TickloopError::Interrupted`] is raised when an external termination signal stops
//!   the loop. Callers treat it as a clean shutdown.
//! - [`TickloopError::RenderFailure`] is raised when the display surface cannot draw.
//!   It is fatal and never retried.

use thiserror::Error;

/// The main error type for tickloop operations.
#[derive(Error, Debug)]
pub enum TickloopError {
    /// External interrupt (signal or Ctrl+C) stopped the loop
    #[error("Interrupted after {ticks} ticks")]
    Interrupted { ticks: u64 },

    /// Terminal device unavailable, unusable size, or backend I/O failure
    #[error("Render failed: {message}")]
    RenderFailure {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Input polling errors
    #[error("Input error: {message}")]
    InputError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid arguments passed to the loop or the CLI
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for tickloop operations.
pub type Result<T> = std::result::Result<T, TickloopError>;

impl TickloopError {
    /// Create a RenderFailure with a descriptive message
    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderFailure {
            message: message.into(),
            source: None,
        }
    }

    /// Create a RenderFailure wrapping a backend I/O error
    pub fn render_io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::RenderFailure {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create an InputError with a descriptive message
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// True when the error represents a handled interrupt rather than a failure
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }
}

// Terminal I/O is the only io::Error source in the crate.
impl From<std::io::Error> for TickloopError {
    fn from(err: std::io::Error) -> Self {
        Self::render_io("terminal I/O failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display_messages() {
        let interrupted = TickloopError::Interrupted { ticks: 7 };
        assert_eq!(interrupted.to_string(), "Interrupted after 7 ticks");

        let render = TickloopError::render("terminal has no drawable area");
        assert_eq!(
            render.to_string(),
            "Render failed: terminal has no drawable area"
        );

        let config = TickloopError::config("bad toml");
        assert_eq!(config.to_string(), "Configuration error: bad toml");
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(
            TickloopError::input("poll failed"),
            TickloopError::InputError { .. }
        ));
        assert!(matches!(
            TickloopError::invalid_argument("zero interval"),
            TickloopError::InvalidArgument { .. }
        ));
        assert!(matches!(
            TickloopError::other("unknown"),
            TickloopError::Other { .. }
        ));
    }

    #[test]
    fn test_interrupt_classification() {
        assert!(TickloopError::Interrupted { ticks: 0 }.is_interrupt());
        assert!(!TickloopError::render("boom").is_interrupt());
    }

    #[test]
    fn test_io_error_conversion_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "tty gone");
        let err: TickloopError = io_err.into();

        match &err {
            TickloopError::RenderFailure { message, source } => {
                assert_eq!(message, "terminal I/O failed");
                assert!(source.is_some());
            }
            _ => panic!("Expected RenderFailure variant"),
        }
        assert!(err.source().is_some());
    }
}
