mod common;

use axum::{body::Body, http::{Request, StatusCode}, Router};
use common::{build_app, valid_submission, MockEmailSender, MockQuotationRepository, OWNER_EMAIL};
use http_body_util::BodyExt;
use portfolio_backend::model::quotation::QuotationStatus;
use portfolio_backend::util::error::GENERIC_FAILURE_MESSAGE;
use serde_json::Value;
use tower::ServiceExt; // for .oneshot()

async fn post_quotation(app: &Router, body: String) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/quotation")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect()
}

fn assert_ticket_format(ticket_id: &str) {
    let pattern = regex::Regex::new(r"^QT-[0-9A-Z]+-[0-9A-Z]{6}$").unwrap();
    assert!(pattern.is_match(ticket_id), "unexpected ticket id {ticket_id}");
}

#[tokio::test]
async fn test_valid_submission_is_stored_and_acknowledged() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let (status, body) = post_quotation(&app, valid_submission().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().is_some());
    let ticket_id = body["ticketId"].as_str().unwrap();
    assert_ticket_format(ticket_id);

    let stored = repo.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].ticket_id, ticket_id);
    assert_eq!(stored[0].status, QuotationStatus::Pending);
    assert_eq!(stored[0].client_email, "jane@example.com");
    assert!(stored[0].created_at.is_some());

    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, OWNER_EMAIL);
    assert_eq!(sent[1].to, "jane@example.com");
    assert!(sent.iter().all(|m| m.subject.contains(ticket_id)));
}

#[tokio::test]
async fn test_identical_submissions_are_not_deduplicated() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let (_, first) = post_quotation(&app, valid_submission().to_string()).await;
    let (_, second) = post_quotation(&app, valid_submission().to_string()).await;

    assert_eq!(repo.stored().len(), 2);
    assert_ne!(first["ticketId"], second["ticketId"]);
}

#[tokio::test]
async fn test_invalid_email_is_rejected_without_side_effects() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let mut submission = valid_submission();
    submission["clientEmail"] = "not-an-email".into();
    let (status, body) = post_quotation(&app, submission.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let errors = body["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|e| e["field"] == "clientEmail" && e["message"].as_str().unwrap().contains("email")));
    assert!(repo.stored().is_empty());
    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_each_missing_required_field_is_named() {
    let required = [
        "service",
        "selectedOptions",
        "timeline",
        "budget",
        "projectBrief",
        "clientName",
        "clientEmail",
        "preferredContact",
        "consent",
    ];

    for field in required {
        let repo = MockQuotationRepository::new();
        let mailer = MockEmailSender::new();
        let app = build_app(&repo, &mailer);

        let mut submission = valid_submission();
        submission.as_object_mut().unwrap().remove(field);
        let (status, body) = post_quotation(&app, submission.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "field {field}");
        assert_eq!(body["success"], false);
        assert_eq!(error_fields(&body), vec![field.to_string()], "field {field}");
        assert!(repo.stored().is_empty());
    }
}

#[tokio::test]
async fn test_optional_fields_may_be_omitted_or_set() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let mut submission = valid_submission();
    submission.as_object_mut().unwrap().remove("honeypot");
    submission["clientPhone"] = "+1 555 0100".into();
    submission["clientCompany"] = "Acme".into();
    let (status, _) = post_quotation(&app, submission.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let stored = repo.stored();
    assert_eq!(stored[0].client_phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(stored[0].client_company.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_consent_false_is_rejected() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let mut submission = valid_submission();
    submission["consent"] = false.into();
    let (status, body) = post_quotation(&app, submission.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["consent".to_string()]);
    assert!(repo.stored().is_empty());
}

#[tokio::test]
async fn test_filled_honeypot_is_rejected() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let mut submission = valid_submission();
    submission["honeypot"] = "https://cheap-seo.example".into();
    let (status, body) = post_quotation(&app, submission.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["honeypot".to_string()]);
    assert!(repo.stored().is_empty());
    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_project_brief_length_boundary() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let mut submission = valid_submission();
    submission["projectBrief"] = "x".repeat(19).into();
    let (status, body) = post_quotation(&app, submission.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["projectBrief".to_string()]);

    submission["projectBrief"] = "x".repeat(20).into();
    let (status, _) = post_quotation(&app, submission.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repo.stored().len(), 1);
}

#[tokio::test]
async fn test_every_violation_is_reported() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let (status, body) = post_quotation(&app, "{}".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = error_fields(&body);
    for expected in ["budget", "clientEmail", "clientName", "consent", "projectBrief", "service"] {
        assert!(fields.iter().any(|f| f == expected), "missing {expected}");
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_client_error() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let (status, body) = post_quotation(&app, "{\"service\": ".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(error_fields(&body), vec!["body".to_string()]);
    let message = body["errors"][0]["message"].as_str().unwrap();
    assert!(!message.contains("line"), "parser detail leaked: {message}");
    assert!(repo.stored().is_empty());
}

#[tokio::test]
async fn test_wrong_typed_fields_are_reported_with_other_violations() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let cases = [
        ("consent", Value::from("true")),
        ("selectedOptions", Value::from("Landing Page")),
        ("service", Value::Null),
    ];
    for (field, value) in cases {
        let mut submission = valid_submission();
        submission[field] = value;
        submission["clientEmail"] = Value::from("bad");

        let (status, body) = post_quotation(&app, submission.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "field {field}");
        assert_eq!(body["success"], false);
        assert_eq!(
            error_fields(&body),
            vec!["clientEmail".to_string(), field.to_string()],
            "field {field}"
        );
    }
    assert!(repo.stored().is_empty());
    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_store_failure_returns_generic_error_and_sends_nothing() {
    let repo = MockQuotationRepository::failing();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let (status, body) = post_quotation(&app, valid_submission().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], GENERIC_FAILURE_MESSAGE);
    assert!(body.get("errors").is_none());
    assert!(body.get("ticketId").is_none());
    assert_eq!(mailer.attempts(), 0);
}

#[tokio::test]
async fn test_owner_email_failure_keeps_record_and_skips_client_email() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::failing_on(1);
    let app = build_app(&repo, &mailer);

    let (status, body) = post_quotation(&app, valid_submission().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], GENERIC_FAILURE_MESSAGE);
    assert_eq!(repo.stored().len(), 1);
    assert_eq!(mailer.attempts(), 1);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_client_email_failure_keeps_record() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::failing_on(2);
    let app = build_app(&repo, &mailer);

    let (status, body) = post_quotation(&app, valid_submission().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], GENERIC_FAILURE_MESSAGE);
    assert_eq!(repo.stored().len(), 1);
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, OWNER_EMAIL);
}

#[tokio::test]
async fn test_health_route() {
    let repo = MockQuotationRepository::new();
    let mailer = MockEmailSender::new();
    let app = build_app(&repo, &mailer);

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}
