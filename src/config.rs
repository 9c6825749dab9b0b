//! Studio configuration.
//!
//! Carries the values the server renders into the configuration page: the
//! page origin, the optional access key, and the signed-URL expiry attached
//! to every generation payload. Everything else the controllers need is a
//! compile-time constant.

use url::Url;

use crate::error::OgforgeError;

/// Signed-URL lifetime attached to every generation payload, in seconds.
pub const DEFAULT_EXPIRES_IN_SECONDS: u32 = 3600;

/// Path of the image generation endpoint.
pub const IMAGE_PATH: &str = "/g";

/// Path of the onboarding generation endpoint.
pub const ONBOARDING_PATH: &str = "/api/onboarding/meta";

/// Configuration shared by the studio controllers.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    origin: Url,
    /// Access key appended to derived image URLs when present.
    pub access_key: Option<String>,
    /// Expiry requested for the signed preview URL, in seconds.
    pub expires_in_seconds: u32,
}

impl StudioConfig {
    /// Parse and normalize the page origin.
    ///
    /// Only http(s) origins are meaningful here; a path, query, or fragment
    /// on the input is dropped, mirroring how a page reports its own origin.
    pub fn new(origin: &str) -> Result<Self, OgforgeError> {
        let parsed = Url::parse(origin)
            .map_err(|e| OgforgeError::Origin(format!("{origin}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(OgforgeError::Origin(format!(
                "{origin}: expected an http(s) origin"
            )));
        }
        Ok(Self {
            origin: parsed,
            access_key: None,
            expires_in_seconds: DEFAULT_EXPIRES_IN_SECONDS,
        })
    }

    /// Attach an access key. Blank keys are treated as absent.
    pub fn with_access_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.access_key = if key.is_empty() { None } else { Some(key) };
        self
    }

    pub fn with_expires_in_seconds(mut self, seconds: u32) -> Self {
        self.expires_in_seconds = seconds;
        self
    }

    /// The normalized origin, `scheme://host[:port]` with no trailing slash.
    pub fn origin(&self) -> String {
        self.origin.origin().ascii_serialization()
    }

    /// Absolute URL of a server endpoint under this origin.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.origin(), path)
    }
}
