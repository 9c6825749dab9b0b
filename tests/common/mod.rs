//! Shared test support: a stub of the two ogforge server endpoints plus
//! recording implementations of the projection surfaces.

// Each integration test binary compiles its own copy of this module and
// uses a different subset of it.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{RawQuery, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use ogforge::error::ClipboardError;
use ogforge::preview::ImageArtifact;
use ogforge::surface::{Clipboard, CopyTarget, PreviewSurface, WizardSurface};

/// Minimal PNG-ish body the stub image endpoint serves by default.
pub const DEFAULT_IMAGE_BODY: &[u8] = b"\x89PNG\r\n\x1a\nstub";

/// Behavior knobs and request recordings for the stub endpoints.
#[derive(Default)]
pub struct StubState {
    /// Non-2xx override for `GET /g`; `None` serves the image body.
    pub image_failure: Mutex<Option<u16>>,
    /// Artificial delay before `GET /g` responds.
    pub image_delay: Mutex<Duration>,
    /// Body served by `GET /g` on success.
    pub image_body: Mutex<Vec<u8>>,
    /// Non-2xx override for `POST /api/onboarding/meta` as `(status, body)`.
    pub meta_failure: Mutex<Option<(u16, String)>>,
    /// Artificial delay before the onboarding endpoint responds.
    pub meta_delay: Mutex<Duration>,
    /// Every query string `GET /g` received, in arrival order.
    pub image_queries: Mutex<Vec<String>>,
    /// Every JSON payload the onboarding endpoint received.
    pub payloads: Mutex<Vec<serde_json::Value>>,
}

impl StubState {
    pub fn image_queries(&self) -> Vec<String> {
        self.image_queries.lock().unwrap().clone()
    }

    pub fn payloads(&self) -> Vec<serde_json::Value> {
        self.payloads.lock().unwrap().clone()
    }

    pub fn set_image_failure(&self, status: u16) {
        *self.image_failure.lock().unwrap() = Some(status);
    }

    pub fn set_image_delay(&self, delay: Duration) {
        *self.image_delay.lock().unwrap() = delay;
    }

    pub fn set_image_body(&self, body: &[u8]) {
        *self.image_body.lock().unwrap() = body.to_vec();
    }

    pub fn set_meta_failure(&self, status: u16, body: &str) {
        *self.meta_failure.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn set_meta_delay(&self, delay: Duration) {
        *self.meta_delay.lock().unwrap() = delay;
    }
}

async fn image_endpoint(State(stub): State<Arc<StubState>>, RawQuery(query): RawQuery) -> Response {
    // Snapshot the knobs at arrival so a test can re-configure the stub
    // while a delayed request is still pending.
    let failure = *stub.image_failure.lock().unwrap();
    let delay = *stub.image_delay.lock().unwrap();
    let body = stub.image_body.lock().unwrap().clone();
    stub.image_queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    match failure {
        Some(status) => StatusCode::from_u16(status).unwrap().into_response(),
        None => {
            let body = if body.is_empty() {
                DEFAULT_IMAGE_BODY.to_vec()
            } else {
                body
            };
            ([(header::CONTENT_TYPE, "image/png")], body).into_response()
        }
    }
}

async fn onboarding_endpoint(
    State(stub): State<Arc<StubState>>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    stub.payloads.lock().unwrap().push(payload.clone());
    let failure = stub.meta_failure.lock().unwrap().clone();
    let delay = *stub.meta_delay.lock().unwrap();

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    if let Some((status, body)) = failure {
        return (StatusCode::from_u16(status).unwrap(), body).into_response();
    }

    let title = payload["title"].as_str().unwrap_or_default();
    Json(serde_json::json!({
        "meta_tags": format!("<meta property=\"og:title\" content=\"{title}\" />"),
        "signed_url": format!("https://osig.example/g?title={title}&sig=abc123&exp=1756000000"),
        "validation_links": {
            "Facebook Sharing Debugger": "https://developers.facebook.com/tools/debug/",
            "X Card Validator": "https://cards-dev.twitter.com/validator"
        }
    }))
    .into_response()
}

/// Spawn the stub server on an ephemeral port; returns its state and
/// origin.
pub async fn spawn_stub() -> (Arc<StubState>, String) {
    let stub = Arc::new(StubState::default());
    let app = Router::new()
        .route("/g", get(image_endpoint))
        .route("/api/onboarding/meta", post(onboarding_endpoint))
        .with_state(Arc::clone(&stub));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    (stub, format!("http://{addr}"))
}

/// An origin that refuses connections: bound, resolved, then dropped.
pub async fn unreachable_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway local addr");
    drop(listener);
    format!("http://{addr}")
}

// ==== Recording surfaces ====

/// Everything a wizard projects, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Step(usize),
    Error(String),
    ErrorCleared,
    Buttons(bool),
    MetaTags(String),
    PreviewLink(String),
    ValidationLinks(Vec<(String, String)>),
    CopyLabel(CopyTarget, String),
    PagePrefill(String),
    FormCleared,
}

#[derive(Default)]
pub struct RecordingWizardSurface {
    events: Mutex<Vec<WizardEvent>>,
}

impl RecordingWizardSurface {
    pub fn events(&self) -> Vec<WizardEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of events recorded so far, for before/after comparisons.
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Error region content after replaying all events.
    pub fn displayed_error(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            WizardEvent::Error(message) => Some(Some(message)),
            WizardEvent::ErrorCleared => Some(None),
            _ => None,
        })?
    }

    /// Current label of `target` after replaying all events.
    pub fn copy_label(&self, target: CopyTarget) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            WizardEvent::CopyLabel(t, label) if t == target => Some(label),
            _ => None,
        })
    }

    /// Latest projected meta tags.
    pub fn meta_tags(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            WizardEvent::MetaTags(tags) => Some(tags),
            _ => None,
        })
    }

    /// Latest projected preview link.
    pub fn preview_link(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            WizardEvent::PreviewLink(href) => Some(href),
            _ => None,
        })
    }

    /// Latest projected validation links.
    pub fn validation_links(&self) -> Option<Vec<(String, String)>> {
        self.events().into_iter().rev().find_map(|event| match event {
            WizardEvent::ValidationLinks(links) => Some(links),
            _ => None,
        })
    }

    /// Latest projected button enablement.
    pub fn buttons_enabled(&self) -> Option<bool> {
        self.events().into_iter().rev().find_map(|event| match event {
            WizardEvent::Buttons(enabled) => Some(enabled),
            _ => None,
        })
    }

    /// Latest projected step.
    pub fn visible_step(&self) -> Option<usize> {
        self.events().into_iter().rev().find_map(|event| match event {
            WizardEvent::Step(step) => Some(step),
            _ => None,
        })
    }

    fn push(&self, event: WizardEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl WizardSurface for RecordingWizardSurface {
    fn show_step(&self, step: usize) {
        self.push(WizardEvent::Step(step));
    }

    fn set_error(&self, message: &str) {
        self.push(WizardEvent::Error(message.to_string()));
    }

    fn clear_error(&self) {
        self.push(WizardEvent::ErrorCleared);
    }

    fn set_buttons_enabled(&self, enabled: bool) {
        self.push(WizardEvent::Buttons(enabled));
    }

    fn set_meta_tags(&self, meta_tags: &str) {
        self.push(WizardEvent::MetaTags(meta_tags.to_string()));
    }

    fn set_preview_link(&self, href: &str) {
        self.push(WizardEvent::PreviewLink(href.to_string()));
    }

    fn render_validation_links(&self, links: &BTreeMap<String, String>) {
        self.push(WizardEvent::ValidationLinks(
            links
                .iter()
                .map(|(label, url)| (label.clone(), url.clone()))
                .collect(),
        ));
    }

    fn set_copy_label(&self, target: CopyTarget, label: &str) {
        self.push(WizardEvent::CopyLabel(target, label.to_string()));
    }

    fn prefill_page_url(&self, origin: &str) {
        self.push(WizardEvent::PagePrefill(origin.to_string()));
    }

    fn clear_form(&self) {
        self.push(WizardEvent::FormCleared);
    }
}

/// Everything a preview fetcher projects, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewEvent {
    Placeholder,
    Image(ImageArtifact),
    Error(String),
}

#[derive(Default)]
pub struct RecordingPreviewSurface {
    events: Mutex<Vec<PreviewEvent>>,
}

impl RecordingPreviewSurface {
    pub fn events(&self) -> Vec<PreviewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn rendered_images(&self) -> Vec<ImageArtifact> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PreviewEvent::Image(artifact) => Some(artifact),
                _ => None,
            })
            .collect()
    }
}

impl PreviewSurface for RecordingPreviewSurface {
    fn show_placeholder(&self) {
        self.events.lock().unwrap().push(PreviewEvent::Placeholder);
    }

    fn show_image(&self, artifact: ImageArtifact) {
        self.events.lock().unwrap().push(PreviewEvent::Image(artifact));
    }

    fn show_error(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(PreviewEvent::Error(message.to_string()));
    }
}

/// Clipboard double: records writes, or refuses them when told to fail.
#[derive(Default)]
pub struct StubClipboard {
    pub fail: Mutex<bool>,
    pub writes: Mutex<Vec<String>>,
}

impl StubClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait]
impl Clipboard for StubClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if *self.fail.lock().unwrap() {
            return Err(ClipboardError("write permission denied".to_string()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
