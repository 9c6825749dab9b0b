//! # Error Types
//!
//! Error taxonomy for the ogforge client controllers.
//!
//! The `Display` form of every variant is exactly what the UI error region
//! shows when that failure surfaces. Diagnostic detail (transport problems,
//! status codes) stays on the variant's fields and goes to the log, never to
//! the user.

use thiserror::Error;

/// Fallback shown when the onboarding endpoint fails without a usable body,
/// or when the request never reaches it at all.
pub const GENERATE_FALLBACK_MESSAGE: &str = "Unable to generate onboarding artifacts.";

/// Local validation failures raised before any network call is made.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The canonical page URL field is blank after trimming.
    #[error("Please provide a canonical page URL.")]
    MissingPageUrl,

    /// The title field is blank after trimming.
    #[error("Please provide a title.")]
    MissingTitle,
}

/// Clipboard write failure reported by a [`Clipboard`](crate::surface::Clipboard)
/// implementation. Carries the platform's own description of what went wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Main error type for ogforge operations.
#[derive(Debug, Error)]
pub enum OgforgeError {
    /// The form failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport, body-read, or response-decode failure.
    #[error("{}", GENERATE_FALLBACK_MESSAGE)]
    Network(#[source] reqwest::Error),

    /// Non-2xx response. `message` is the response body verbatim, or the
    /// generic fallback when the body was blank.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Writing to the clipboard failed.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// The configured page origin could not be parsed.
    #[error("Invalid origin: {0}")]
    Origin(String),
}
