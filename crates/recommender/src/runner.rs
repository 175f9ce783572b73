//! # Recommendation Runner
//!
//! One request/response cycle:
//! 1. Check configuration (no key, no call)
//! 2. Build the prompt from the watchlist
//! 3. Call the generative service once
//! 4. Print the text, or the failure, and report a [`RunStatus`]

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info, warn};

use gemini_client::{GeminiClientError, GenerativeService};
use watchlist::{
    Recommendation, Watchlist, WatchlistError, parse_recommendations, recommendation_prompt,
    structured_prompt,
};

use crate::config::{ConfigError, RunnerConfig};
use crate::report;

/// How a run ended. Each variant maps to a distinct process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Recommendations were printed
    Success,
    /// No API key; nothing was sent
    MissingConfig,
    /// The service call failed
    ServiceFailed,
    /// The service answered but structured output could not be parsed
    InvalidResponse,
}

impl RunStatus {
    pub fn code(self) -> u8 {
        match self {
            RunStatus::Success => 0,
            RunStatus::MissingConfig => 1,
            RunStatus::ServiceFailed => 2,
            RunStatus::InvalidResponse => 3,
        }
    }
}

/// How structured recommendations are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredFormat {
    /// Numbered list; status lines share the output stream
    List,
    /// JSON on the output stream; status lines go to the status stream
    Json,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Failure of a structured recommendation request
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error(transparent)]
    Service(#[from] GeminiClientError),

    #[error(transparent)]
    InvalidResponse(#[from] WatchlistError),
}

impl RecommendError {
    pub fn status(&self) -> RunStatus {
        match self {
            RecommendError::Service(_) => RunStatus::ServiceFailed,
            RecommendError::InvalidResponse(_) => RunStatus::InvalidResponse,
        }
    }
}

/// Runs recommendation requests against a [`GenerativeService`].
pub struct RecommendationRunner<S> {
    config: RunnerConfig,
    service: S,
    watchlist: Watchlist,
}

impl<S: GenerativeService> RecommendationRunner<S> {
    /// Runner over the default watchlist.
    pub fn new(config: RunnerConfig, service: S) -> Self {
        Self {
            config,
            service,
            watchlist: Watchlist::default(),
        }
    }

    pub fn with_watchlist(mut self, watchlist: Watchlist) -> Self {
        self.watchlist = watchlist;
        self
    }

    /// The free-form prompt this runner sends.
    pub fn prompt(&self) -> String {
        recommendation_prompt(&self.watchlist)
    }

    /// Ask for free-form recommendations and return the text unchanged.
    pub async fn fetch_text(&self) -> Result<String, GeminiClientError> {
        self.generate(&self.prompt()).await
    }

    /// Ask for a JSON array of recommendations and parse it.
    pub async fn recommend(&self) -> Result<Vec<Recommendation>, RecommendError> {
        let text = self.generate(&structured_prompt(&self.watchlist)).await?;
        parse_recommendations(&text).map_err(|e| {
            warn!("Structured recommendations could not be parsed: {}", e);
            RecommendError::from(e)
        })
    }

    /// Fetch free-form recommendations and print them, or the failure.
    pub async fn run<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<RunStatus> {
        match self.fetch_text().await {
            Ok(text) => {
                report::recommendations(out, &text)?;
                Ok(RunStatus::Success)
            }
            Err(e) => {
                report::failure(out, &e)?;
                Ok(RunStatus::ServiceFailed)
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, GeminiClientError> {
        let start_time = Instant::now();
        info!(
            "Requesting recommendations for {} watchlist titles from {}",
            self.watchlist.len(),
            self.config.model()
        );

        let result = self.service.generate(self.config.model(), prompt).await;

        match &result {
            Ok(text) => info!(
                "Received {} bytes in {:.2?}",
                text.len(),
                start_time.elapsed()
            ),
            Err(e) => error!("Recommendation request failed after {:.2?}: {}", start_time.elapsed(), e),
        }
        result
    }
}

/// Print the configuration check. Returns the config when a run may proceed.
pub fn check_config<W: Write + ?Sized>(
    config: Result<RunnerConfig, ConfigError>,
    out: &mut W,
) -> io::Result<Option<RunnerConfig>> {
    match config {
        Ok(config) => {
            report::key_loaded(out)?;
            Ok(Some(config))
        }
        Err(e) => {
            error!("{}", e);
            report::missing_key(out, &e)?;
            Ok(None)
        }
    }
}

/// The whole program in text mode: check config, connect, run once.
///
/// `connect` is only called once the configuration is known to be valid, so
/// a missing key never constructs a service.
pub async fn run_once<S, F, W>(
    config: Result<RunnerConfig, ConfigError>,
    watchlist: Watchlist,
    connect: F,
    out: &mut W,
) -> io::Result<RunStatus>
where
    S: GenerativeService,
    F: FnOnce(&RunnerConfig) -> Result<S, GeminiClientError>,
    W: Write + ?Sized,
{
    let Some(config) = check_config(config, out)? else {
        return Ok(RunStatus::MissingConfig);
    };

    let service = match connect(&config) {
        Ok(service) => service,
        Err(e) => {
            report::failure(out, &e)?;
            return Ok(RunStatus::ServiceFailed);
        }
    };

    RecommendationRunner::new(config, service)
        .with_watchlist(watchlist)
        .run(out)
        .await
}

/// Status lines share `out` for lists; JSON keeps `out` for the document only.
fn status_stream<'a, W: Write, E: Write>(
    format: StructuredFormat,
    out: &'a mut W,
    status_out: &'a mut E,
) -> &'a mut dyn Write {
    match format {
        StructuredFormat::List => out,
        StructuredFormat::Json => status_out,
    }
}

/// The whole program in a structured format: check config, connect, ask for
/// a JSON array, print it as `format`.
///
/// A reply that cannot be parsed is reported with its cleaned raw text.
pub async fn run_structured<S, F, W, E>(
    config: Result<RunnerConfig, ConfigError>,
    watchlist: Watchlist,
    connect: F,
    format: StructuredFormat,
    out: &mut W,
    status_out: &mut E,
) -> io::Result<RunStatus>
where
    S: GenerativeService,
    F: FnOnce(&RunnerConfig) -> Result<S, GeminiClientError>,
    W: Write,
    E: Write,
{
    let Some(config) = check_config(config, status_stream(format, out, status_out))? else {
        return Ok(RunStatus::MissingConfig);
    };

    let service = match connect(&config) {
        Ok(service) => service,
        Err(e) => {
            report::failure(status_stream(format, out, status_out), &e)?;
            return Ok(RunStatus::ServiceFailed);
        }
    };
    let runner = RecommendationRunner::new(config, service).with_watchlist(watchlist);

    match runner.recommend().await {
        Ok(recommendations) => {
            match format {
                StructuredFormat::List => report::recommendation_list(out, &recommendations)?,
                StructuredFormat::Json => report::recommendation_json(out, &recommendations)?,
            }
            Ok(RunStatus::Success)
        }
        Err(e) => {
            let status = status_stream(format, out, status_out);
            report::failure(status, &e)?;
            if let RecommendError::InvalidResponse(inner) = &e {
                if let Some(raw) = inner.raw_output() {
                    report::raw_output(status, raw)?;
                }
            }
            Ok(e.status())
        }
    }
}
