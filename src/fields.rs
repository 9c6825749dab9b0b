//! Form field model shared by the image form and the onboarding wizard.
//!
//! A [`FormFieldSet`] is an ordered name-to-value mapping that mirrors the
//! form inputs in document order. Derived URLs and payloads enumerate it in
//! exactly that order. The CSRF token entry is stored like any other field
//! but never leaves the form: it is skipped by enumeration, so it cannot
//! appear in a derived URL or payload.

use std::fmt;

/// Reserved form field carrying the CSRF token.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Named form fields across both form variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    CsrfToken,
    PageUrl,
    Style,
    Site,
    Font,
    Title,
    Subtitle,
    Eyebrow,
    ImageUrl,
    Format,
    Quality,
    MaxKb,
    Version,
}

impl FieldName {
    /// Wire name used in query strings and payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CsrfToken => CSRF_FIELD,
            Self::PageUrl => "page_url",
            Self::Style => "style",
            Self::Site => "site",
            Self::Font => "font",
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Eyebrow => "eyebrow",
            Self::ImageUrl => "image_url",
            Self::Format => "format",
            Self::Quality => "quality",
            Self::MaxKb => "max_kb",
            Self::Version => "version",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of raw form values.
///
/// Values are raw user input and may be empty; an empty value is still a
/// present field. Which fields exist is fixed per form variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldSet {
    entries: Vec<(FieldName, String)>,
}

impl FormFieldSet {
    /// The simple image-generator form.
    pub fn image_form() -> Self {
        use FieldName::*;
        Self::with_names(&[
            CsrfToken, Style, Site, Font, Title, Subtitle, Eyebrow, ImageUrl, Format,
        ])
    }

    /// The five-step onboarding form.
    pub fn onboarding_form() -> Self {
        use FieldName::*;
        Self::with_names(&[
            CsrfToken, PageUrl, Title, Subtitle, Eyebrow, Site, Style, Font, ImageUrl, Format,
            Quality, MaxKb, Version,
        ])
    }

    /// A field set with no inputs at all (degenerate forms).
    pub fn empty() -> Self {
        Self::with_names(&[])
    }

    fn with_names(names: &[FieldName]) -> Self {
        Self {
            entries: names.iter().map(|&name| (name, String::new())).collect(),
        }
    }

    /// Raw value of `name`; the empty string when the field is absent.
    pub fn get(&self, name: FieldName) -> &str {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Set `name` to `value`, appending the field when this variant does not
    /// already carry it.
    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Enumerate `(wire name, value)` pairs in document order, skipping the
    /// CSRF token entry.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries
            .iter()
            .filter(|(name, _)| *name != FieldName::CsrfToken)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Clear every value back to the empty string, keeping the fields.
    pub fn clear(&mut self) {
        for (_, value) in &mut self.entries {
            value.clear();
        }
    }
}

/// Choice vocabularies the server renders into the form selects, as
/// `(value, label)` pairs with the rendered default first.
///
/// The controllers pass select values through without checking them against
/// these lists; the server owns validation.
pub mod choices {
    pub const SITES: &[(&str, &str)] = &[("x", "X (Twitter)"), ("facebook", "Facebook")];

    pub const STYLES: &[(&str, &str)] = &[("base", "Base"), ("job_logo", "Job Logo")];

    pub const FONTS: &[(&str, &str)] = &[
        ("helvetica", "Helvetica"),
        ("markerfelt", "Marker Felt"),
        ("papyrus", "Papyrus"),
    ];

    pub const FORMATS: &[(&str, &str)] = &[("png", "PNG"), ("jpeg", "JPEG")];
}
