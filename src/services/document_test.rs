use super::*;
use crate::form::{ClientDetails, DocType, GstType, LineItem, TaxRow};
use crate::payload::DocumentPayload;
use crate::webhook::DocumentRender;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

// =========================================================================
// mocks
// =========================================================================

struct MockRender {
    response: Value,
    seen: Mutex<Option<Value>>,
}

impl MockRender {
    fn new(response: Value) -> Arc<Self> {
        Arc::new(Self { response, seen: Mutex::new(None) })
    }
}

#[async_trait::async_trait]
impl DocumentRender for MockRender {
    async fn render(&self, payload: &DocumentPayload) -> Result<Value, SubmissionError> {
        *self.seen.lock().unwrap() = Some(serde_json::to_value(payload).unwrap());
        Ok(self.response.clone())
    }
}

struct FailRender;

#[async_trait::async_trait]
impl DocumentRender for FailRender {
    async fn render(&self, _payload: &DocumentPayload) -> Result<Value, SubmissionError> {
        Err(SubmissionError::Status { status: 502, body: String::new() })
    }
}

fn invoice_form() -> DocumentForm {
    DocumentForm {
        document_type: DocType::Invoice,
        client_details: ClientDetails { client_name: "Asha Menon".into(), ..ClientDetails::default() },
        invoice_details: None,
        items: vec![LineItem { name: "Design".into(), rate: 1000.0, quantity: 2.0 }],
        gst_list: vec![TaxRow { kind: GstType::Cgst, rate: 9.0 }, TaxRow { kind: GstType::Sgst, rate: 9.0 }],
    }
}

// =========================================================================
// generate_document
// =========================================================================

#[tokio::test]
async fn successful_submission_normalizes_result() {
    let render = MockRender::new(json!({
        "fileName": "invoice-asha.pdf",
        "downloadUrl": "- https://docs/x.pdf ",
        "message": "Invoice ready"
    }));
    let state = AppState::new(None, render);

    let result = generate_document(&state, &invoice_form()).await.unwrap();
    assert_eq!(result.file_name, "invoice-asha.pdf");
    assert_eq!(result.download_url, "https://docs/x.pdf");
    assert_eq!(result.message.as_deref(), Some("Invoice ready"));
}

#[tokio::test]
async fn payload_reaches_webhook_flattened() {
    let render = MockRender::new(json!({ "downloadUrl": "https://docs/x.pdf" }));
    let state = AppState::new(None, render.clone());

    generate_document(&state, &invoice_form()).await.unwrap();

    let seen = render.seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen["documentType"], json!("invoice"));
    let data = &seen["data"];
    assert_eq!(data["clientName"], json!("Asha Menon"));
    assert_eq!(data["item_1_name"], json!("Design"));
    assert_eq!(data["subtotal"], json!("2000.00"));
    assert_eq!(data["cgst_price"], json!("180.00"));
    assert_eq!(data["total"], json!("2360.00"));
}

#[tokio::test]
async fn validation_failure_skips_webhook() {
    let render = MockRender::new(json!({ "downloadUrl": "https://docs/x.pdf" }));
    let state = AppState::new(None, render.clone());

    let mut form = invoice_form();
    form.client_details.client_name = String::new();
    let err = generate_document(&state, &form).await.unwrap_err();
    assert!(matches!(err, DocumentError::Validation(_)));
    assert_eq!(err.error_code(), "E_VALIDATION");
    assert!(render.seen.lock().unwrap().is_none());
}

#[tokio::test]
async fn missing_document_url_is_distinct_error() {
    let render = MockRender::new(json!({ "ok": true }));
    let state = AppState::new(None, render);

    let err = generate_document(&state, &invoice_form()).await.unwrap_err();
    assert!(matches!(err, DocumentError::NoDocumentUrl(_)));
    assert_eq!(err.error_code(), "E_NO_DOCUMENT_URL");
    assert!(!err.retryable());
}

#[tokio::test]
async fn webhook_failure_propagates() {
    let state = AppState::new(None, Arc::new(FailRender));

    let err = generate_document(&state, &invoice_form()).await.unwrap_err();
    assert!(matches!(err, DocumentError::Submission(_)));
    assert!(err.retryable());
}
