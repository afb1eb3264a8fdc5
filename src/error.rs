//! Crate error types
//!
//! Only construction can fail. Ticking and rendering are total.

use thiserror::Error;

use crate::shape::ShapeError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid shape: {0}")]
    Shape(#[from] ShapeError),
    #[error("invalid settings: {message}")]
    Settings { message: String },
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    pub fn settings(message: impl Into<String>) -> Self {
        Error::Settings {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
