//! # Watchlist Crate
//!
//! Domain types and text handling for watchlist-based recommendations.
//!
//! ## Main Components
//!
//! - **types**: `Watchlist`, `WatchlistItem`, `Recommendation`
//! - **prompt**: Prompt templates built from a watchlist
//! - **parser**: Extract structured recommendations from a model reply
//! - **error**: Error types for loading and parsing
//!
//! ## Example Usage
//!
//! ```ignore
//! use watchlist::{Watchlist, prompt::recommendation_prompt};
//!
//! let watchlist = Watchlist::default();
//! let prompt = recommendation_prompt(&watchlist);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod prompt;
pub mod parser;

// Re-export commonly used types for convenience
pub use error::{Result, WatchlistError};
pub use parser::parse_recommendations;
pub use prompt::{recommendation_prompt, structured_prompt};
pub use types::{Recommendation, TmdbId, Watchlist, WatchlistItem, DEFAULT_TITLES};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_watchlist() {
        let watchlist = Watchlist::default();

        assert_eq!(watchlist.len(), 3);
        assert_eq!(watchlist.joined(), "Inception, The Dark Knight, Interstellar");
    }

    #[test]
    fn test_from_items_keeps_order() {
        let items = vec![WatchlistItem::titled("Heat"), WatchlistItem::titled("Ronin")];

        let watchlist = Watchlist::from_items(&items);

        assert_eq!(watchlist.titles(), &["Heat".to_string(), "Ronin".to_string()]);
    }

    #[test]
    fn test_watchlist_item_from_export() {
        let json = r#"{"title": "Dune", "genre": ["Sci-Fi"], "tmdbId": 438631, "rating": 8}"#;

        let item: WatchlistItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.title, "Dune");
        assert_eq!(item.tmdb_id, Some(438631));
        assert_eq!(item.rating, Some(8.0));
        assert!(!item.watched);
        assert!(item.description.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("watchlist-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"[{{"title": "Se7en"}}, {{"title": "Zodiac", "watched": true}}]"#).unwrap();

        let watchlist = Watchlist::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(watchlist.joined(), "Se7en, Zodiac");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Watchlist::load_from_file(std::path::Path::new("/nonexistent/watchlist.json"))
            .unwrap_err();
        assert!(matches!(err, WatchlistError::IoError(_)));
    }
}
