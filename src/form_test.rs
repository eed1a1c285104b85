use super::*;
use serde_json::json;

fn invoice_body() -> serde_json::Value {
    json!({
        "documentType": "invoice",
        "clientDetails": { "clientName": "Asha Menon", "clientEmail": "asha@menon.in" },
        "invoiceDetails": { "invoiceNumber": "INV-042" },
        "items": [{ "name": "Design", "rate": 1000, "quantity": 2 }],
        "gstList": [{ "type": "CGST", "rate": 9 }]
    })
}

fn parse(body: serde_json::Value) -> DocumentForm {
    serde_json::from_value(body).unwrap()
}

// =========================================================================
// deserialization
// =========================================================================

#[test]
fn full_invoice_round_trip() {
    let form = parse(invoice_body());
    assert_eq!(form.document_type, DocType::Invoice);
    assert_eq!(form.client_details.client_name, "Asha Menon");
    assert_eq!(form.items.len(), 1);
    assert_eq!(form.gst_list[0].kind, GstType::Cgst);
    assert!(form.validate().is_ok());
}

#[test]
fn rate_accepts_numeric_string() {
    let item: LineItem = serde_json::from_value(json!({ "name": "Design", "rate": "1500", "quantity": "2" })).unwrap();
    assert!((item.rate - 1500.0).abs() < f64::EPSILON);
    assert!((item.quantity - 2.0).abs() < f64::EPSILON);
}

#[test]
fn garbage_rate_coerces_to_zero() {
    let item: LineItem = serde_json::from_value(json!({ "name": "Design", "rate": "lots", "quantity": null })).unwrap();
    assert!((item.rate).abs() < f64::EPSILON);
    assert!((item.quantity).abs() < f64::EPSILON);
}

#[test]
fn missing_numeric_fields_default_to_zero() {
    let item: LineItem = serde_json::from_value(json!({ "name": "Design" })).unwrap();
    assert!((item.rate).abs() < f64::EPSILON);
    assert!((item.quantity).abs() < f64::EPSILON);
}

#[test]
fn pincode_accepts_number_or_string() {
    let details: ClientDetails =
        serde_json::from_value(json!({ "clientName": "A", "clientPincode": 682001 })).unwrap();
    assert_eq!(details.client_pincode.as_deref(), Some("682001"));

    let details: ClientDetails =
        serde_json::from_value(json!({ "clientName": "A", "clientPincode": "682 001" })).unwrap();
    assert_eq!(details.client_pincode.as_deref(), Some("682 001"));
}

#[test]
fn unknown_gst_type_is_rejected() {
    assert!(serde_json::from_value::<TaxRow>(json!({ "type": "VAT", "rate": 9 })).is_err());
}

#[test]
fn extracted_fields_tolerate_partial_objects() {
    let fields: ExtractedFields = serde_json::from_value(json!({
        "clientDetails": { "clientName": "Ravi" },
        "items": [{ "name": "Logo", "rate": "500" }]
    }))
    .unwrap();
    assert_eq!(fields.client_details.unwrap().client_name, "Ravi");
    assert!(fields.invoice_details.is_none());
    assert_eq!(fields.items.unwrap().len(), 1);
    assert!(fields.gst_list.is_none());
}

// =========================================================================
// validation
// =========================================================================

#[test]
fn missing_client_name_rejected() {
    let mut body = invoice_body();
    body["clientDetails"]["clientName"] = json!("  ");
    let err = parse(body).validate().unwrap_err();
    assert_eq!(err.field, "clientDetails.clientName");
}

#[test]
fn invalid_email_rejected() {
    let mut body = invoice_body();
    body["clientDetails"]["clientEmail"] = json!("not-an-email");
    let err = parse(body).validate().unwrap_err();
    assert_eq!(err.field, "clientDetails.clientEmail");
}

#[test]
fn empty_email_allowed() {
    let mut body = invoice_body();
    body["clientDetails"]["clientEmail"] = json!("");
    assert!(parse(body).validate().is_ok());
}

#[test]
fn invoice_requires_items() {
    let mut body = invoice_body();
    body["items"] = json!([]);
    let err = parse(body).validate().unwrap_err();
    assert_eq!(err.field, "items");
}

#[test]
fn proposal_allows_empty_items() {
    let body = json!({
        "documentType": "proposal",
        "clientDetails": { "clientName": "Asha Menon" }
    });
    assert!(parse(body).validate().is_ok());
}

#[test]
fn zero_quantity_rejected() {
    let mut body = invoice_body();
    body["items"][0]["quantity"] = json!(0);
    let err = parse(body).validate().unwrap_err();
    assert_eq!(err.field, "items[0].quantity");
}

#[test]
fn negative_rate_rejected() {
    let mut body = invoice_body();
    body["items"][0]["rate"] = json!(-5);
    let err = parse(body).validate().unwrap_err();
    assert_eq!(err.field, "items[0].rate");
}

#[test]
fn negative_gst_rate_rejected() {
    let mut body = invoice_body();
    body["gstList"][0]["rate"] = json!(-1);
    let err = parse(body).validate().unwrap_err();
    assert_eq!(err.field, "gstList[0].rate");
}

#[test]
fn unnamed_item_rejected() {
    let mut body = invoice_body();
    body["items"][0]["name"] = json!("");
    let err = parse(body).validate().unwrap_err();
    assert_eq!(err.field, "items[0].name");
}
