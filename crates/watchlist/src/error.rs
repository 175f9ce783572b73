//! Error types for the watchlist crate.

use thiserror::Error;

/// Errors that can occur while loading a watchlist or reading the model's
/// structured recommendations.
#[derive(Error, Debug)]
pub enum WatchlistError {
    /// I/O error occurred while reading a watchlist file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Watchlist file was not a JSON array of watchlist items
    #[error("Invalid watchlist file {path}: {reason}")]
    InvalidWatchlist { path: String, reason: String },

    /// The model's reply did not contain a JSON array at all
    ///
    /// `raw` holds the reply after code fences were stripped, so callers can
    /// show the user what came back.
    #[error("No JSON found")]
    MissingJson { raw: String },

    /// A bracketed span was found but it is not a valid recommendation array
    #[error("Invalid recommendation JSON: {reason}")]
    InvalidJson { reason: String, raw: String },
}

impl WatchlistError {
    /// Cleaned model output attached to a parse failure, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            WatchlistError::MissingJson { raw } | WatchlistError::InvalidJson { raw, .. } => {
                Some(raw)
            }
            _ => None,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, WatchlistError>;
