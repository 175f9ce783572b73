//! Prompt templates sent to the generative service.

use crate::types::Watchlist;

/// Free-form prompt: the model answers in prose.
pub fn recommendation_prompt(watchlist: &Watchlist) -> String {
    format!(
        "\nGiven the following watchlist: {},\n\
         recommend 5 other movies that the user might enjoy.\n\
         For each movie, include a short description and genre.\n",
        watchlist.joined()
    )
}

/// Prompt asking for a bare JSON array of `{title, genre, reason}` objects.
pub fn structured_prompt(watchlist: &Watchlist) -> String {
    format!(
        "\nBased on the user's watchlist: {},\n\
         recommend 5 similar movies the user might enjoy.\n\
         For each movie, return a JSON object with \"title\", \"genre\", and \"reason\".\n\
         Return only valid JSON array (no markdown or text outside JSON).\n",
        watchlist.joined()
    )
}
