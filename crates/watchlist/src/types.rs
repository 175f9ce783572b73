//! Core domain types for watchlists and recommendations.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::{Result, WatchlistError};

// =============================================================================
// Type Aliases
// =============================================================================

/// The Movie Database identifier attached to a watchlist entry
pub type TmdbId = u64;

/// Titles used when no watchlist file is given.
pub const DEFAULT_TITLES: [&str; 3] = ["Inception", "The Dark Knight", "Interstellar"];

// =============================================================================
// Watchlist
// =============================================================================

/// A single saved movie.
///
/// Mirrors the shape watchlist entries have when exported from the watchlist
/// app, so such an export can be fed straight to `--watchlist`. Only `title`
/// is required; everything else defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub tmdb_id: Option<TmdbId>,
    #[serde(default)]
    pub watched: bool,
    #[serde(default)]
    pub rating: Option<f32>,
}

impl WatchlistItem {
    /// An entry that only carries a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            poster: String::new(),
            genre: Vec::new(),
            tmdb_id: None,
            watched: false,
            rating: None,
        }
    }
}

/// Ordered list of movie titles the prompt is built from.
///
/// Titles are taken as-is: no trimming, deduplication or emptiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    titles: Vec<String>,
}

impl Watchlist {
    pub fn new<I, T>(titles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a watchlist from saved entries, keeping their order.
    pub fn from_items(items: &[WatchlistItem]) -> Self {
        Self::new(items.iter().map(|item| item.title.clone()))
    }

    /// Load a JSON array of [`WatchlistItem`]s from disk.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let items: Vec<WatchlistItem> =
            serde_json::from_str(&content).map_err(|e| WatchlistError::InvalidWatchlist {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!("Loaded {} watchlist entries from {}", items.len(), path.display());
        Ok(Self::from_items(&items))
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Titles joined with `", "`, the form they take inside a prompt.
    pub fn joined(&self) -> String {
        self.titles.join(", ")
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::new(DEFAULT_TITLES)
    }
}

// =============================================================================
// Recommendations
// =============================================================================

/// One movie suggested by the model in structured mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    /// Models answer with either `"Sci-Fi"` or `["Sci-Fi", "Thriller"]`.
    #[serde(default, deserialize_with = "string_or_list")]
    pub genre: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Genre {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Genre::deserialize(deserializer)? {
        Genre::One(genre) => vec![genre],
        Genre::Many(genres) => genres,
    })
}
