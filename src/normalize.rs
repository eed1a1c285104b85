//! Webhook response normalization — canonical document result extraction.
//!
//! DESIGN
//! ======
//! The document webhook's response shape is not contractually stable: it may
//! be an object or an array, wrap the useful fields one level down under
//! `data` or `json`, duplicate fields under alternate names, or leak
//! unevaluated template expressions (`{{...}}` / `={{...}}`) where a value
//! failed to substitute. This module is a pure function over a raw
//! `serde_json::Value` with explicit fallback tables, so every observed
//! shape is covered by a test rather than ad hoc branching.
//!
//! Invariant: a raw template expression never reaches the caller. Fields
//! that still look templated are dropped (URLs) or defaulted (file name).

use serde_json::Value;

const DEFAULT_FILE_NAME: &str = "document.pdf";

const DOWNLOAD_KEYS: [&str; 2] = ["downloadUrl", "downloadUrl1"];
const VIEW_KEYS: [&str; 4] = ["viewUrl", "previewUrl", "previewUrl1", "viewUrl1"];
const ACCEPT_KEYS: [&str; 4] = ["downloadUrl", "downloadUrl1", "viewUrl", "previewUrl1"];

// =============================================================================
// TYPES
// =============================================================================

/// Canonical result of a successful document generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResult {
    pub file_name: String,
    pub download_url: String,
    pub view_url: Option<String>,
    /// Human-readable status line from the webhook, when it sent one.
    pub message: Option<String>,
}

/// The webhook responded, but no usable document URL could be extracted.
#[derive(Debug, thiserror::Error)]
#[error("webhook response contained no document URL")]
pub struct NormalizationFailure;

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Extract a [`DocumentResult`] from a raw webhook response.
///
/// # Errors
///
/// Returns [`NormalizationFailure`] when the response carries neither a
/// truthy `success` flag nor any download/view URL field — the caller
/// surfaces a generic "no document URL" error instead of a broken link.
pub fn normalize(raw: &Value) -> Result<DocumentResult, NormalizationFailure> {
    let candidate = match raw {
        Value::Array(items) => select_candidate(items).ok_or(NormalizationFailure)?,
        other => other,
    };

    // Unwrap one level of wrapper object.
    let working = candidate
        .get("data")
        .filter(|v| v.is_object())
        .or_else(|| candidate.get("json").filter(|v| v.is_object()))
        .unwrap_or(candidate);

    let accepted = is_truthy(working.get("success"))
        || ACCEPT_KEYS.iter().any(|key| is_truthy(working.get(*key)));
    if !accepted {
        return Err(NormalizationFailure);
    }

    let file_name = match working.get("fileName").and_then(Value::as_str) {
        Some(name) if !name.is_empty() && !name.contains("{{") => name.to_owned(),
        _ => DEFAULT_FILE_NAME.to_owned(),
    };

    let download_url = sanitize_url(first_truthy(working, &DOWNLOAD_KEYS));
    let view_url = sanitize_url(first_truthy(working, &VIEW_KEYS));
    let message = working
        .get("message")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    Ok(DocumentResult {
        file_name,
        download_url,
        view_url: (!view_url.is_empty()).then_some(view_url),
        message,
    })
}

/// Pick the element to normalize from an array response: the first whose
/// download-URL field is already evaluated, else the first element.
fn select_candidate(items: &[Value]) -> Option<&Value> {
    items
        .iter()
        .find(|item| evaluated_download_url(item).is_some())
        .or_else(|| items.first())
}

fn evaluated_download_url(item: &Value) -> Option<&str> {
    DOWNLOAD_KEYS
        .iter()
        .find_map(|key| item.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .filter(|url| !url.contains("{{"))
}

/// First field in `keys` holding a truthy value.
fn first_truthy<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .map(|key| obj.get(*key))
        .find(|v| is_truthy(*v))
        .flatten()
}

/// JS-style truthiness, matching how the upstream shapes were probed.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Clean a URL-ish value: trim, strip one templating artifact `"- "` prefix,
/// and blank out anything still starting with an unevaluated expression.
fn sanitize_url(value: Option<&Value>) -> String {
    let Some(url) = value.and_then(Value::as_str) else {
        return String::new();
    };
    let url = url.trim();
    let url = url.strip_prefix("- ").unwrap_or(url);
    if url.starts_with("{{") || url.starts_with("={{") {
        String::new()
    } else {
        url.to_owned()
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
