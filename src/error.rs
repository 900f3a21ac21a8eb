//! Error types and handling for the `WeatherMap` application

use thiserror::Error;

/// Main error type for the `WeatherMap` application
#[derive(Error, Debug)]
pub enum WeatherMapError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport-level failures talking to an external service
    #[error("API error: {message}")]
    Api { message: String },

    /// Payloads that could not be understood
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherMapError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherMapError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            WeatherMapError::Api { .. } => {
                "Weather service is unavailable right now. Please try again later.".to_string()
            }
            WeatherMapError::Parse { .. } => {
                "Received an unexpected response from an external service.".to_string()
            }
            WeatherMapError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherMapError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for WeatherMapError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs carry the API key
        let err = err.without_url();
        if err.is_timeout() {
            WeatherMapError::api(format!("request timed out: {err}"))
        } else if err.is_decode() {
            WeatherMapError::parse(err.to_string())
        } else {
            WeatherMapError::api(err.to_string())
        }
    }
}
