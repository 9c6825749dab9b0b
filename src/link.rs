//! Canonical request URL derivation.
//!
//! Builds the machine-usable image request URL from the current form state,
//! plus a display-only "pretty" rendering of it. The two are kept strictly
//! separate so the display form can never drift from the canonical one:
//! stripping all whitespace from [`pretty_url`] output gives back its input
//! byte for byte.
//!
//! Derivation is a pure function of its inputs. Identical form state,
//! access key, origin, and base path always produce a byte-identical URL,
//! which is what makes the generated link safe to copy, share, and cache.

use url::form_urlencoded;

use crate::fields::FormFieldSet;

/// Query parameter carrying the access key.
const KEY_PARAM: &str = "key";

/// Derive the canonical request URL for the image endpoint.
///
/// Fields are enumerated in document order with empty values preserved as
/// `name=`; the CSRF token never appears. An access key, when present, is
/// appended last as `key=<value>`. Encoding follows
/// `application/x-www-form-urlencoded`, so spaces become `+` and reserved
/// characters are percent-encoded.
pub fn derive_url(
    fields: &FormFieldSet,
    access_key: Option<&str>,
    origin: &str,
    base_path: &str,
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields.iter() {
        query.append_pair(name, value);
    }
    if let Some(key) = access_key
        && !key.is_empty()
    {
        query.append_pair(KEY_PARAM, key);
    }
    format!("{}{}?{}", origin, base_path, query.finish())
}

/// Render a canonical URL for display: the `?` and every `&` break onto a
/// fresh indented line.
///
/// Values never contain a raw `?` or `&` (both are percent-encoded by
/// [`derive_url`]), so this is a plain textual transform that whitespace
/// stripping reverses exactly. The output is for human eyes only and must
/// never be fetched or copied.
pub fn pretty_url(canonical: &str) -> String {
    canonical.replacen('?', "?\n  ", 1).replace('&', "&\n  ")
}
