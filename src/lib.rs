//! # ogforge
//!
//! Client-side controllers for the ogforge social image service. The
//! service renders Open Graph images server-side behind two endpoints; this
//! crate drives the configuration page that sits in front of them:
//!
//! - **Link building** ([`link`]): derive the canonical image request URL
//!   from form state, plus a display-only pretty rendering of it
//! - **Preview fetching** ([`preview`]): the asynchronous
//!   loading/success/failure lifecycle of the image region
//! - **Onboarding wizard** ([`wizard`]): a five-step form state machine
//!   that produces meta tags, a signed preview link, and validator links
//!
//! The controllers never render anything themselves. They own their state
//! and project every visible change one way through the seams in
//! [`surface`]; an embedding supplies the actual UI behind those traits.
//!
//! ## Quick Start
//!
//! Deriving a generate link is pure and needs no wiring:
//!
//! ```
//! use ogforge::fields::{FieldName, FormFieldSet};
//! use ogforge::link;
//!
//! let mut fields = FormFieldSet::image_form();
//! fields.set(FieldName::Style, "base");
//! fields.set(FieldName::Title, "Hello");
//!
//! let url = link::derive_url(&fields, None, "https://osig.example", "/g");
//! assert_eq!(
//!     url,
//!     "https://osig.example/g?style=base&site=&font=&title=Hello&subtitle=&eyebrow=&image_url=&format="
//! );
//! ```
//!
//! The async controllers are built from a [`StudioConfig`] plus the
//! embedding's surface implementations:
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use ogforge::config::StudioConfig;
//! # use ogforge::preview::PreviewFetcher;
//! # use ogforge::surface::{Clipboard, WizardSurface};
//! # use ogforge::wizard::OnboardingWizard;
//! # async fn wire(
//! #     clipboard: Arc<dyn Clipboard>,
//! #     wizard_surface: Arc<dyn WizardSurface>,
//! #     preview_surface: Arc<dyn ogforge::surface::PreviewSurface>,
//! # ) -> Result<(), ogforge::OgforgeError> {
//! let config = StudioConfig::new("https://osig.example")?;
//! let fetcher = PreviewFetcher::new(preview_surface);
//! let wizard = OnboardingWizard::attach(config, fetcher, clipboard, wizard_surface);
//! wizard.generate().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Page-injected configuration: origin, access key, expiry |
//! | [`error`] | Error taxonomy with user-facing `Display` text |
//! | [`fields`] | Ordered form field model and choice vocabularies |
//! | [`link`] | Canonical URL derivation and pretty rendering |
//! | [`payload`] | Validated generation payload and response artifacts |
//! | [`preview`] | Image fetch lifecycle and endpoint client |
//! | [`surface`] | Projection traits the embedding implements |
//! | [`wizard`] | Five-step onboarding state machine |

pub mod config;
pub mod error;
pub mod fields;
pub mod link;
pub mod payload;
pub mod preview;
pub mod surface;
pub mod wizard;

pub use config::StudioConfig;
pub use error::OgforgeError;
pub use preview::PreviewFetcher;
pub use wizard::OnboardingWizard;
