//! Console report of a run.
//!
//! All output goes through a `Write` so tests can capture it in a buffer.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;
use serde_json::json;
use watchlist::Recommendation;

pub const KEY_LOADED: &str = "🔑 Using Gemini API key: ✅ Loaded";
pub const SUCCESS_HEADER: &str = "🎬 AI Movie Recommendations:";
pub const FAILURE_HEADER: &str = "❌ Error while testing Gemini API:";

pub fn missing_key<W: Write + ?Sized>(out: &mut W, err: &impl Display) -> io::Result<()> {
    writeln!(out, "❌ {err}")
}

pub fn key_loaded<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{KEY_LOADED}")
}

/// Header followed by the model's text, verbatim.
pub fn recommendations<W: Write + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "\n{SUCCESS_HEADER}\n")?;
    writeln!(out, "{text}")
}

pub fn failure<W: Write + ?Sized>(out: &mut W, err: &impl Display) -> io::Result<()> {
    writeln!(out, "\n{FAILURE_HEADER}")?;
    writeln!(out, "{err}")
}

/// Numbered, coloured list of parsed recommendations.
pub fn recommendation_list<W: Write + ?Sized>(
    out: &mut W,
    recommendations: &[Recommendation],
) -> io::Result<()> {
    writeln!(out, "\n{}\n", SUCCESS_HEADER.bold().blue())?;
    for (idx, rec) in recommendations.iter().enumerate() {
        let genres = if rec.genre.is_empty() {
            String::new()
        } else {
            format!(" [{}]", rec.genre.join(", "))
        };
        writeln!(
            out,
            "{}. {}{}",
            (idx + 1).to_string().green(),
            rec.title.bold(),
            genres.cyan()
        )?;
        if !rec.reason.is_empty() {
            writeln!(out, "   {}", rec.reason)?;
        }
    }
    Ok(())
}

/// `{"recommendations": [...]}`, pretty-printed.
pub fn recommendation_json<W: Write + ?Sized>(
    out: &mut W,
    recommendations: &[Recommendation],
) -> io::Result<()> {
    let body = json!({ "recommendations": recommendations });
    let text = serde_json::to_string_pretty(&body).map_err(io::Error::other)?;
    writeln!(out, "{text}")
}

/// What the model actually sent back when it could not be parsed.
pub fn raw_output<W: Write + ?Sized>(out: &mut W, raw: &str) -> io::Result<()> {
    writeln!(out, "\nRaw output:\n{raw}")
}
