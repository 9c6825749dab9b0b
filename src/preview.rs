//! Live preview fetching.
//!
//! [`PreviewFetcher`] issues requests against the image endpoint and walks
//! the render region through its lifecycle: `Idle -> Loading -> Success`
//! or `Failure`, re-entering `Loading` on every new call regardless of the
//! prior terminal phase.
//!
//! Overlapping fetches are allowed. Every call takes a fresh sequence
//! number and a completion only renders while it is still the most recently
//! issued, so a slow stale response can never overwrite a newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::header;

use crate::error::{GENERATE_FALLBACK_MESSAGE, OgforgeError};
use crate::payload::{GenerationPayload, OnboardingArtifacts};
use crate::surface::PreviewSurface;

/// Placeholder text shown while an image request is in flight.
pub const GENERATING_PLACEHOLDER: &str = "Generating image...";

/// Fixed user-facing message for any failed image fetch.
pub const IMAGE_ERROR_MESSAGE: &str =
    "An error occurred while generating the image. Please try again.";

/// Lifecycle of the render region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

/// Bytes of a successfully fetched preview image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub bytes: Vec<u8>,
    /// `Content-Type` reported by the server, when present.
    pub content_type: Option<String>,
}

/// Issues preview requests and projects the outcome onto a surface.
///
/// Clones share the lifecycle state, like handing out a second reference to
/// the same controller.
#[derive(Clone)]
pub struct PreviewFetcher {
    client: reqwest::Client,
    surface: Arc<dyn PreviewSurface>,
    lifecycle: Arc<Lifecycle>,
}

struct Lifecycle {
    /// Sequence number of the most recently issued image fetch.
    issued: AtomicU64,
    phase: Mutex<FetchPhase>,
}

impl PreviewFetcher {
    pub fn new(surface: Arc<dyn PreviewSurface>) -> Self {
        Self::with_client(reqwest::Client::new(), surface)
    }

    /// Use a caller-provided client, for shared connection pools or custom
    /// middleware.
    pub fn with_client(client: reqwest::Client, surface: Arc<dyn PreviewSurface>) -> Self {
        Self {
            client,
            surface,
            lifecycle: Arc::new(Lifecycle {
                issued: AtomicU64::new(0),
                phase: Mutex::new(FetchPhase::Idle),
            }),
        }
    }

    /// Current lifecycle phase of the render region.
    pub fn phase(&self) -> FetchPhase {
        *self
            .lifecycle
            .phase
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn set_phase(&self, phase: FetchPhase) {
        *self
            .lifecycle
            .phase
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = phase;
    }

    /// Fetch `url` and render the result.
    ///
    /// Enters `Loading` and shows the placeholder immediately, then renders
    /// either the received image or the fixed error message. Fire and
    /// forget: failures are reported through the surface and the log, never
    /// returned.
    pub async fn fetch_and_render(&self, url: &str) {
        let seq = self.lifecycle.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_phase(FetchPhase::Loading);
        self.surface.show_placeholder();

        let outcome = self.fetch_image(url).await;

        // A newer fetch owns the region now; drop this completion.
        if self.lifecycle.issued.load(Ordering::SeqCst) != seq {
            log::debug!("discarding stale preview response for {url}");
            return;
        }

        match outcome {
            Ok(artifact) => {
                self.set_phase(FetchPhase::Success);
                self.surface.show_image(artifact);
            }
            Err(e) => {
                self.set_phase(FetchPhase::Failure);
                log::error!("image generation failed for {url}: {e}");
                self.surface.show_error(IMAGE_ERROR_MESSAGE);
            }
        }
    }

    async fn fetch_image(&self, url: &str) -> Result<ImageArtifact, OgforgeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(OgforgeError::Network)?;
        let status = response.status();
        if !status.is_success() {
            // The image flow shows a fixed message; the status is for the log.
            return Err(OgforgeError::Server {
                status: status.as_u16(),
                message: format!("HTTP {status}"),
            });
        }
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(OgforgeError::Network)?;
        Ok(ImageArtifact {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    /// Submit a generation payload to the onboarding endpoint and parse the
    /// artifacts.
    ///
    /// A non-2xx response surfaces its body text verbatim; a blank body
    /// falls back to the generic message. Does not touch the render region
    /// phase, which belongs to the image flow.
    pub async fn submit(
        &self,
        endpoint: &str,
        payload: &GenerationPayload,
    ) -> Result<OnboardingArtifacts, OgforgeError> {
        let response = self
            .client
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(OgforgeError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                GENERATE_FALLBACK_MESSAGE.to_string()
            } else {
                body
            };
            return Err(OgforgeError::Server {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<OnboardingArtifacts>()
            .await
            .map_err(OgforgeError::Network)
    }
}
