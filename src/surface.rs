//! Projection seams between the controllers and the embedding UI.
//!
//! Controllers own their state and push every visible change out through
//! these traits; nothing is ever read back from the UI. An implementation
//! decides what "visible" means: a DOM bridge, a terminal pane, a recording
//! stub in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::ClipboardError;
use crate::preview::ImageArtifact;

/// Idle label of the copy buttons.
pub const COPY_IDLE_LABEL: &str = "Copy";

/// Label shown for two seconds after a successful copy.
pub const COPIED_LABEL: &str = "Copied!";

/// The two copy buttons the wizard manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    /// Copies the generated meta tag snippet.
    MetaTags,
    /// Copies the canonical generate link.
    GenerateLink,
}

/// Render target of the onboarding wizard.
pub trait WizardSurface: Send + Sync {
    /// Show exactly the step region at `step` and hide every other one.
    fn show_step(&self, step: usize);

    /// Display `message` in the error region.
    fn set_error(&self, message: &str);

    /// Clear the error region.
    fn clear_error(&self);

    /// Enable or disable every action button across all steps.
    fn set_buttons_enabled(&self, enabled: bool);

    /// Fill the meta tag output region.
    fn set_meta_tags(&self, meta_tags: &str);

    /// Point the preview link at `href`.
    fn set_preview_link(&self, href: &str);

    /// Replace the rendered validator links with `links`.
    ///
    /// The wizard always passes the complete new mapping, never a delta, so
    /// implementations must drop the previous set first.
    fn render_validation_links(&self, links: &BTreeMap<String, String>);

    /// Change a copy button's label.
    fn set_copy_label(&self, target: CopyTarget, label: &str);

    /// Prefill the page URL input with the configured origin. Surfaces
    /// without that input ignore the call.
    fn prefill_page_url(&self, origin: &str);

    /// Reset every form input to its pristine value.
    fn clear_form(&self);
}

/// Render target of the preview fetcher.
pub trait PreviewSurface: Send + Sync {
    /// Replace the region content with the neutral loading placeholder,
    /// conventionally [`GENERATING_PLACEHOLDER`](crate::preview::GENERATING_PLACEHOLDER).
    fn show_placeholder(&self);

    /// Render a fetched image.
    fn show_image(&self, artifact: ImageArtifact);

    /// Replace the region content with a visible error message.
    fn show_error(&self, message: &str);
}

/// Write-only system clipboard access.
///
/// The controllers only ever call this from a direct user action, which is
/// what clipboard permission models expect.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
