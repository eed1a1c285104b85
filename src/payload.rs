//! Webhook wire payload — flatten a form submission into the legacy contract.
//!
//! DESIGN
//! ======
//! The document webhook consumes `{ documentType, data }` where `data` is a
//! flat string-keyed map: items indexed as `item_<n>_*` starting at 1, tax
//! rows collapsed into per-type `c_gst`/`s_gst`/`i_gst` rate keys plus
//! `*_price` amount keys. The contract is asymmetric on purpose: a later row
//! of the same GST type overwrites the transmitted rate, while the amount
//! keys carry the accumulated per-type totals. Fixed upstream — do not
//! "repair" it here.
//!
//! All values are transmitted as strings. Two-decimal rounding is applied
//! here and only here; stored rates and quantities stay untouched.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::form::{DocType, DocumentForm, GstType};
use crate::totals::TaxAggregate;

/// The body posted to the document webhook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    pub document_type: DocType,
    pub data: Map<String, Value>,
}

// =============================================================================
// FLATTENING
// =============================================================================

/// Flatten a validated form and its computed totals into the wire payload.
///
/// Absent optional fields are omitted entirely rather than sent as null;
/// GST keys only appear for types that have at least one row.
#[must_use]
pub fn build_payload(form: &DocumentForm, totals: &TaxAggregate) -> DocumentPayload {
    let mut data = Map::new();

    let client = &form.client_details;
    put(&mut data, "clientName", Some(client.client_name.as_str()));
    put(&mut data, "clientCompany", client.client_company.as_deref());
    put(&mut data, "clientEmail", client.client_email.as_deref());
    put(&mut data, "clientLocality", client.client_locality.as_deref());
    put(&mut data, "clientCity", client.client_city.as_deref());
    put(&mut data, "clientPincode", client.client_pincode.as_deref());
    put(&mut data, "clientState", client.client_state.as_deref());

    if let Some(invoice) = &form.invoice_details {
        put(&mut data, "invoiceNumber", invoice.invoice_number.as_deref());
        put(&mut data, "invoiceDate", invoice.invoice_date.as_deref());
    }

    for (i, item) in form.items.iter().enumerate() {
        let index = i + 1;
        data.insert(format!("item_{index}_name"), Value::String(item.name.clone()));
        data.insert(format!("item_{index}_rate"), Value::String(num_string(item.rate)));
        data.insert(format!("item_{index}_quantity"), Value::String(num_string(item.quantity)));
    }

    // Last row of a type wins the rate key; the price key gets the summed
    // per-type amount from the aggregator.
    for row in &form.gst_list {
        data.insert(rate_key(row.kind).to_owned(), Value::String(num_string(row.rate)));
        data.insert(
            price_key(row.kind).to_owned(),
            Value::String(format!("{:.2}", totals.per_type.amount(row.kind))),
        );
    }

    data.insert("subtotal".to_owned(), Value::String(format!("{:.2}", totals.subtotal)));
    data.insert("total".to_owned(), Value::String(format!("{:.2}", totals.grand_total)));
    // Some templates read the taxable value under "value".
    data.insert("value".to_owned(), Value::String(format!("{:.2}", totals.subtotal)));

    DocumentPayload { document_type: form.document_type, data }
}

fn put(data: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(v) = value {
        data.insert(key.to_owned(), Value::String(v.to_owned()));
    }
}

/// Render a number the way the form would type it: no trailing zeros,
/// no forced decimals.
fn num_string(n: f64) -> String {
    if n.is_finite() { format!("{n}") } else { "0".to_owned() }
}

fn rate_key(kind: GstType) -> &'static str {
    match kind {
        GstType::Cgst => "c_gst",
        GstType::Sgst => "s_gst",
        GstType::Igst => "i_gst",
    }
}

fn price_key(kind: GstType) -> &'static str {
    match kind {
        GstType::Cgst => "cgst_price",
        GstType::Sgst => "sgst_price",
        GstType::Igst => "igst_price",
    }
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;
