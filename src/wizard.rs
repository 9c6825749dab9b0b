//! The onboarding wizard.
//!
//! A five-step form controller: collect the page URL and text fields over
//! the first steps, then generate meta tags, a signed preview link, and
//! validator links on the last one. The wizard owns an in-memory view model
//! ([`WizardState`]) plus the raw form values; every visible change is
//! projected one way through a [`WizardSurface`].
//!
//! Methods take `&self` so an embedding can share one controller across all
//! of its event handlers. Internal locks are short and never held across an
//! await.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::{IMAGE_PATH, ONBOARDING_PATH, StudioConfig};
use crate::error::OgforgeError;
use crate::fields::{FieldName, FormFieldSet};
use crate::link;
use crate::payload::{GenerationPayload, OnboardingArtifacts};
use crate::preview::PreviewFetcher;
use crate::surface::{COPIED_LABEL, COPY_IDLE_LABEL, Clipboard, CopyTarget, WizardSurface};

/// Number of steps in the onboarding form.
pub const STEP_COUNT: usize = 5;

/// How long a copy button shows "Copied!" before reverting.
const COPY_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Shown when copying the meta tags fails.
pub const COPY_META_TAGS_ERROR: &str = "Failed to copy meta tags.";

/// Shown when copying the generate link fails.
pub const COPY_LINK_ERROR: &str = "Failed to copy link.";

/// In-memory view model of the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    /// Currently visible step, always in `0..STEP_COUNT`.
    pub step: usize,
    /// Message currently shown in the error region.
    pub last_error: Option<String>,
    /// Whether a generate call is outstanding.
    pub in_flight: bool,
    /// Meta tags from the most recent successful generation.
    pub meta_tags: String,
}

impl WizardState {
    /// One step forward, clamped to the last step. Moving clears the
    /// displayed error.
    fn advanced(&self) -> Self {
        Self {
            step: (self.step + 1).min(STEP_COUNT - 1),
            last_error: None,
            ..self.clone()
        }
    }

    /// One step back, clamped to the first step.
    fn retreated(&self) -> Self {
        Self {
            step: self.step.saturating_sub(1),
            last_error: None,
            ..self.clone()
        }
    }
}

/// Pending "Copied!" revert timers, one slot per button.
#[derive(Default)]
struct CopyResets {
    meta_tags: Option<JoinHandle<()>>,
    generate_link: Option<JoinHandle<()>>,
}

impl CopyResets {
    fn slot(&mut self, target: CopyTarget) -> &mut Option<JoinHandle<()>> {
        match target {
            CopyTarget::MetaTags => &mut self.meta_tags,
            CopyTarget::GenerateLink => &mut self.generate_link,
        }
    }
}

/// The five-step onboarding controller.
pub struct OnboardingWizard {
    config: StudioConfig,
    fetcher: PreviewFetcher,
    clipboard: Arc<dyn Clipboard>,
    surface: Arc<dyn WizardSurface>,
    state: Mutex<WizardState>,
    fields: Mutex<FormFieldSet>,
    /// Sequence number of the most recently issued generate call.
    issued: AtomicU64,
    copy_resets: Mutex<CopyResets>,
}

impl OnboardingWizard {
    /// Attach the controller: step 0 becomes visible and the page URL input
    /// is prefilled with the configured origin.
    pub fn attach(
        config: StudioConfig,
        fetcher: PreviewFetcher,
        clipboard: Arc<dyn Clipboard>,
        surface: Arc<dyn WizardSurface>,
    ) -> Self {
        let origin = config.origin();
        let mut fields = FormFieldSet::onboarding_form();
        fields.set(FieldName::PageUrl, origin.clone());

        let wizard = Self {
            config,
            fetcher,
            clipboard,
            surface,
            state: Mutex::new(WizardState::default()),
            fields: Mutex::new(fields),
            issued: AtomicU64::new(0),
            copy_resets: Mutex::new(CopyResets::default()),
        };
        wizard.surface.prefill_page_url(&origin);
        wizard.project_step(0);
        wizard
    }

    fn state(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fields(&self) -> MutexGuard<'_, FormFieldSet> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the view model.
    pub fn view(&self) -> WizardState {
        self.state().clone()
    }

    /// Raw value of a form field.
    pub fn field(&self, name: FieldName) -> String {
        self.fields().get(name).to_string()
    }

    /// Record an edited input value.
    ///
    /// The embedding calls this on every change event. Derived values are
    /// recomputed on demand from the stored fields, never cached.
    pub fn set_field(&self, name: FieldName, value: impl Into<String>) {
        self.fields().set(name, value);
    }

    /// Canonical image request URL for the current form state.
    pub fn generate_link(&self) -> String {
        link::derive_url(
            &self.fields(),
            self.config.access_key.as_deref(),
            &self.config.origin(),
            IMAGE_PATH,
        )
    }

    /// Display rendering of [`generate_link`](Self::generate_link).
    pub fn generate_link_pretty(&self) -> String {
        link::pretty_url(&self.generate_link())
    }

    // ==== Navigation ====

    /// Show the next step. No-op on the last step.
    pub fn go_next(&self) {
        let moved = {
            let mut state = self.state();
            let next = state.advanced();
            if next.step == state.step {
                None
            } else {
                let step = next.step;
                *state = next;
                Some(step)
            }
        };
        if let Some(step) = moved {
            self.project_step(step);
        }
    }

    /// Show the previous step. No-op on the first step.
    pub fn go_previous(&self) {
        let moved = {
            let mut state = self.state();
            let previous = state.retreated();
            if previous.step == state.step {
                None
            } else {
                let step = previous.step;
                *state = previous;
                Some(step)
            }
        };
        if let Some(step) = moved {
            self.project_step(step);
        }
    }

    /// Exactly one step visible; moving between steps clears the error
    /// region.
    fn project_step(&self, step: usize) {
        self.surface.show_step(step);
        self.surface.clear_error();
    }

    /// Return to step 0, clearing the form and every derived output.
    pub fn reset(&self) {
        self.fields().clear();
        *self.state() = WizardState::default();
        self.surface.clear_form();
        self.surface.set_meta_tags("");
        self.surface.set_preview_link("#");
        self.surface.render_validation_links(&BTreeMap::new());
        self.project_step(0);
    }

    // ==== Generation ====

    /// Run the generate action end to end.
    ///
    /// Buttons stay disabled for the whole attempt and are re-enabled on
    /// every path, success or failure. The outcome is sequence-guarded:
    /// when a newer generate was issued while this one was in flight, its
    /// completion is dropped instead of rendered.
    pub async fn generate(&self) {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state();
            state.last_error = None;
            state.in_flight = true;
        }
        self.surface.clear_error();
        self.surface.set_buttons_enabled(false);

        let payload = {
            let fields = self.fields();
            GenerationPayload::from_fields(&fields, self.config.expires_in_seconds)
        };
        let outcome = match payload {
            Ok(payload) => {
                self.fetcher
                    .submit(&self.config.endpoint(ONBOARDING_PATH), &payload)
                    .await
            }
            Err(e) => Err(e.into()),
        };

        if self.issued.load(Ordering::SeqCst) == seq {
            match outcome {
                Ok(artifacts) => self.apply_artifacts(artifacts),
                Err(e) => self.apply_error(&e),
            }
        } else {
            log::debug!("discarding stale generate response");
        }

        self.state().in_flight = false;
        self.surface.set_buttons_enabled(true);
    }

    fn apply_artifacts(&self, artifacts: OnboardingArtifacts) {
        self.state().meta_tags = artifacts.meta_tags.clone();
        self.surface.set_meta_tags(&artifacts.meta_tags);
        self.surface.set_preview_link(&artifacts.signed_url);
        self.surface.render_validation_links(&artifacts.validation_links);
    }

    fn apply_error(&self, error: &OgforgeError) {
        let message = error.to_string();
        log::error!("onboarding generation failed: {error:?}");
        self.state().last_error = Some(message.clone());
        self.surface.set_error(&message);
    }

    // ==== Clipboard ====

    /// Copy the generated meta tags.
    pub async fn copy_meta_tags(&self) {
        let text = self.state().meta_tags.clone();
        self.copy(CopyTarget::MetaTags, text, COPY_META_TAGS_ERROR).await;
    }

    /// Copy the canonical generate link. Always the canonical form, never
    /// the pretty rendering.
    pub async fn copy_generate_link(&self) {
        let text = self.generate_link();
        self.copy(CopyTarget::GenerateLink, text, COPY_LINK_ERROR).await;
    }

    async fn copy(&self, target: CopyTarget, text: String, failure_message: &str) {
        match self.clipboard.write_text(&text).await {
            Ok(()) => {
                self.surface.set_copy_label(target, COPIED_LABEL);
                self.schedule_copy_reset(target);
            }
            Err(e) => {
                // Copy failures touch only the error region, never the
                // generation outputs.
                log::error!("{e}");
                self.state().last_error = Some(failure_message.to_string());
                self.surface.set_error(failure_message);
            }
        }
    }

    /// Revert the label exactly two seconds after the most recent
    /// successful copy; a still-pending revert for the same button is
    /// cancelled first.
    fn schedule_copy_reset(&self, target: CopyTarget) {
        let mut resets = self
            .copy_resets
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = resets.slot(target).take() {
            pending.abort();
        }
        let surface = Arc::clone(&self.surface);
        *resets.slot(target) = Some(tokio::spawn(async move {
            tokio::time::sleep(COPY_RESET_DELAY).await;
            surface.set_copy_label(target, COPY_IDLE_LABEL);
        }));
    }
}
