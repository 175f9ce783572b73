//! Parser for the model's structured recommendation replies.
//!
//! Models asked for "only a JSON array" still wrap it in markdown fences or
//! add a sentence before it. Parsing therefore:
//! 1. removes every ```` ```json ```` marker (any case) and remaining ```` ``` ````
//! 2. trims the result
//! 3. parses the span from the first `[` to the last `]`

use crate::error::{Result, WatchlistError};
use crate::types::Recommendation;

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Strip markdown code fences and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        cleaned.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        if rest
            .get(..JSON_TAG.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(JSON_TAG))
        {
            rest = &rest[JSON_TAG.len()..];
        }
    }
    cleaned.push_str(rest);

    cleaned.trim().to_string()
}

/// Parse the recommendations out of a raw model reply.
pub fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>> {
    let cleaned = strip_code_fences(text);

    let span = match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => return Err(WatchlistError::MissingJson { raw: cleaned }),
    };

    match serde_json::from_str::<Vec<Recommendation>>(span) {
        Ok(recommendations) => {
            tracing::debug!("Parsed {} recommendations", recommendations.len());
            Ok(recommendations)
        }
        Err(e) => Err(WatchlistError::InvalidJson {
            reason: e.to_string(),
            raw: cleaned,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences_any_case() {
        assert_eq!(strip_code_fences("```JSON\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  ```json [] ```  "), "[]");
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }

    #[test]
    fn test_parse_fenced_array() {
        let reply = "```json\n[\n  {\"title\": \"Memento\", \"genre\": \"Thriller\", \"reason\": \"Nolan\"}\n]\n```";

        let recs = parse_recommendations(reply).unwrap();

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Memento");
        assert_eq!(recs[0].genre, vec!["Thriller".to_string()]);
        assert_eq!(recs[0].reason, "Nolan");
    }

    #[test]
    fn test_parse_array_surrounded_by_prose() {
        let reply = "Sure! Here you go:\n[{\"title\": \"Arrival\", \"genre\": [\"Sci-Fi\", \"Drama\"], \"reason\": \"Quiet sci-fi\"}]\nEnjoy.";

        let recs = parse_recommendations(reply).unwrap();

        assert_eq!(recs[0].genre, vec!["Sci-Fi".to_string(), "Drama".to_string()]);
    }

    #[test]
    fn test_missing_array_keeps_raw_output() {
        let err = parse_recommendations("```json\nI cannot help with that.\n```").unwrap_err();

        assert!(matches!(err, WatchlistError::MissingJson { .. }));
        assert_eq!(err.raw_output(), Some("I cannot help with that."));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = parse_recommendations("[{\"title\": }]").unwrap_err();

        assert!(matches!(err, WatchlistError::InvalidJson { .. }));
        assert_eq!(err.raw_output(), Some("[{\"title\": }]"));
    }
}
