//! Generation payload schema.
//!
//! [`GenerationPayload`] is the validated projection of the wizard form into
//! the onboarding request body, and [`OnboardingArtifacts`] is what a
//! successful generation sends back. Validation happens in exactly one
//! place, [`GenerationPayload::from_fields`]; everything downstream can rely
//! on a payload being well-formed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::fields::{FieldName, FormFieldSet};

/// Upper bound accepted for the `quality` field, in percent.
const QUALITY_MAX: u32 = 100;

/// Request body for the onboarding generation endpoint.
///
/// Free-text fields arrive trimmed; select values pass through untouched.
/// The optional numeric fields are serialized only when present: an
/// unparsable or out-of-range input is dropped rather than sent, leaving
/// the server to apply its own default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationPayload {
    pub page_url: String,
    pub style: String,
    pub site: String,
    pub font: String,
    pub title: String,
    pub subtitle: String,
    pub eyebrow: String,
    pub image_url: String,
    pub format: String,
    pub version: String,
    pub expires_in_seconds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_kb: Option<u32>,
}

impl GenerationPayload {
    /// Build a payload from the wizard form.
    ///
    /// Fails with the exact user-facing message when the canonical page URL
    /// or the title is blank; the page URL is checked first. `quality` is
    /// kept only in `1..=100`, `max_kb` only when strictly positive.
    pub fn from_fields(
        fields: &FormFieldSet,
        expires_in_seconds: u32,
    ) -> Result<Self, ValidationError> {
        let page_url = fields.get(FieldName::PageUrl).trim();
        if page_url.is_empty() {
            return Err(ValidationError::MissingPageUrl);
        }
        let title = fields.get(FieldName::Title).trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        Ok(Self {
            page_url: page_url.to_string(),
            style: fields.get(FieldName::Style).to_string(),
            site: fields.get(FieldName::Site).to_string(),
            font: fields.get(FieldName::Font).to_string(),
            title: title.to_string(),
            subtitle: fields.get(FieldName::Subtitle).trim().to_string(),
            eyebrow: fields.get(FieldName::Eyebrow).trim().to_string(),
            image_url: fields.get(FieldName::ImageUrl).trim().to_string(),
            format: fields.get(FieldName::Format).to_string(),
            version: fields.get(FieldName::Version).trim().to_string(),
            expires_in_seconds,
            quality: parse_positive(fields.get(FieldName::Quality)).filter(|q| *q <= QUALITY_MAX),
            max_kb: parse_positive(fields.get(FieldName::MaxKb)),
        })
    }
}

/// Parse a strictly positive integer, rejecting everything else.
fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Structured result of a successful onboarding generation.
///
/// Unknown response fields are ignored. `validation_links` maps a validator
/// label ("Facebook Sharing Debugger") to its URL; the map keeps label
/// order deterministic so re-rendering the link list is stable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OnboardingArtifacts {
    /// Ready-to-paste HTML meta tag snippet.
    pub meta_tags: String,
    /// Signed, expiring preview URL for the generated image.
    pub signed_url: String,
    /// Validator label to URL.
    pub validation_links: BTreeMap<String, String>,
}
