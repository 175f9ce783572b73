use thiserror::Error;

/// Errors that can occur when interacting with the Gemini service
#[derive(Error, Debug)]
pub enum GeminiClientError {
    /// The HTTP client could not be built
    #[error("Failed to create Gemini client: {0}")]
    Client(String),

    /// The request never got an HTTP response (DNS, TLS, connection reset...)
    #[error("Failed to reach Gemini service: {}", with_causes(.0))]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{status} {message}")]
    Api { status: u16, message: String },

    /// The body could not be decoded as a `generateContent` response
    #[error("Invalid response from Gemini service: {0}")]
    InvalidResponse(String),

    /// The response decoded fine but carried no text
    #[error("Gemini returned no text{}", blocked_suffix(.block_reason))]
    EmptyResponse { block_reason: Option<String> },
}

/// `reqwest` keeps the interesting part (refused, DNS, TLS) in the source chain.
fn with_causes(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn blocked_suffix(block_reason: &Option<String>) -> String {
    match block_reason {
        Some(reason) => format!(" (blocked: {reason})"),
        None => String::new(),
    }
}

impl GeminiClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GeminiClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
