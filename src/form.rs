//! Form data model — document type, client details, line items, GST rows.
//!
//! DESIGN
//! ======
//! Mirrors the browser form body field-for-field. The wire uses camelCase
//! keys; numeric fields arrive as JSON numbers or as strings typed into the
//! form, so `rate`/`quantity` deserialize through a lenient coercion that
//! maps anything non-numeric to 0 and never lets NaN reach the totals.
//! Validation is a separate explicit pass so tolerant parsing and rejection
//! stay independently testable.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// DOCUMENT TYPE
// =============================================================================

/// The three document kinds the downstream webhook can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Proposal,
    Quotation,
    Invoice,
}

impl DocType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Proposal => "proposal",
            Self::Quotation => "quotation",
            Self::Invoice => "invoice",
        }
    }
}

// =============================================================================
// GST TYPE
// =============================================================================

/// GST tax categories. CGST/SGST apply in-state, IGST inter-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GstType {
    #[serde(rename = "CGST")]
    Cgst,
    #[serde(rename = "SGST")]
    Sgst,
    #[serde(rename = "IGST")]
    Igst,
}

// =============================================================================
// FORM SECTIONS
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientDetails {
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_city: Option<String>,
    /// Arrives as a string or a bare number depending on the input control.
    #[serde(deserialize_with = "de_opt_stringlike", skip_serializing_if = "Option::is_none")]
    pub client_pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_state: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
}

/// One billable row of the invoice table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub name: String,
    #[serde(deserialize_with = "de_lenient_number")]
    pub rate: f64,
    #[serde(deserialize_with = "de_lenient_number")]
    pub quantity: f64,
}

/// One tax row: a GST category and a percent rate applied to the subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRow {
    #[serde(rename = "type")]
    pub kind: GstType,
    #[serde(default, deserialize_with = "de_lenient_number")]
    pub rate: f64,
}

// =============================================================================
// SUBMISSION BODY
// =============================================================================

/// The structured document submission posted by the form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentForm {
    pub document_type: DocType,
    pub client_details: ClientDetails,
    #[serde(default)]
    pub invoice_details: Option<InvoiceDetails>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub gst_list: Vec<TaxRow>,
}

/// The possibly-partial structure returned by transcript extraction.
/// Absent or null fields mean "not extracted".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_details: Option<ClientDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_details: Option<InvoiceDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_list: Option<Vec<TaxRow>>,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// A malformed or missing required form field, surfaced inline by the UI.
#[derive(Debug, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: &'static str) -> Self {
        Self { field: field.into(), message }
    }
}

impl DocumentForm {
    /// Reject submissions the downstream webhook cannot render.
    ///
    /// # Errors
    ///
    /// Returns the first failing field with a human-readable message.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client_details.client_name.trim().is_empty() {
            return Err(ValidationError::new("clientDetails.clientName", "Client name is required"));
        }
        if let Some(email) = self.client_details.client_email.as_deref() {
            if !email.is_empty() && !is_valid_email(email) {
                return Err(ValidationError::new("clientDetails.clientEmail", "Invalid email address"));
            }
        }
        if self.document_type == DocType::Invoice && self.items.is_empty() {
            return Err(ValidationError::new("items", "At least one item is required"));
        }
        for (i, item) in self.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(ValidationError::new(format!("items[{i}].name"), "Item name is required"));
            }
            if item.rate < 0.0 {
                return Err(ValidationError::new(format!("items[{i}].rate"), "Rate must not be negative"));
            }
            if item.quantity < 1.0 {
                return Err(ValidationError::new(format!("items[{i}].quantity"), "Quantity must be at least 1"));
            }
        }
        for (i, row) in self.gst_list.iter().enumerate() {
            if row.rate < 0.0 {
                return Err(ValidationError::new(format!("gstList[{i}].rate"), "GST rate must not be negative"));
            }
        }
        Ok(())
    }
}

fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

// =============================================================================
// LENIENT COERCION
// =============================================================================

/// Coerce a JSON value to a finite number, defaulting to 0.
///
/// Matches form semantics: numeric strings parse, everything else
/// (missing, null, garbage, NaN/inf) collapses to 0 so totals never see NaN.
#[must_use]
pub fn lenient_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

fn de_lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value))
}

fn de_opt_stringlike<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
