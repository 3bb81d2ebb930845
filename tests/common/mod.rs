#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use portfolio_backend::model::quotation::Quotation;
use portfolio_backend::repository::quotation_repo::QuotationRepository;
use portfolio_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use portfolio_backend::router::quotation_router::quotation_router;
use portfolio_backend::service::quotation_service::QuotationServiceImpl;
use portfolio_backend::util::email::{EmailError, EmailMessage, EmailSender};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const OWNER_EMAIL: &str = "owner@example.com";

/// In-memory record store
#[derive(Clone, Default)]
pub struct MockQuotationRepository {
    pub records: Arc<Mutex<Vec<Quotation>>>,
    pub fail: bool,
}

impl MockQuotationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn stored(&self) -> Vec<Quotation> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuotationRepository for MockQuotationRepository {
    async fn create(&self, quotation: Quotation) -> RepositoryResult<Quotation> {
        if self.fail {
            return Err(RepositoryError::connection("record store unreachable"));
        }
        let mut stored = quotation;
        stored.id = Some(bson::oid::ObjectId::new());
        stored.created_at = Some(chrono::Utc::now().to_rfc3339());
        self.records.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}

/// Records every message it is asked to send; fails on the configured attempt (1-based)
#[derive(Clone, Default)]
pub struct MockEmailSender {
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
    pub attempts: Arc<Mutex<usize>>,
    pub fail_on_attempt: Option<usize>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(attempt: usize) -> Self {
        Self { fail_on_attempt: Some(attempt), ..Self::default() }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if self.fail_on_attempt == Some(attempt) {
            return Err(EmailError::SmtpError("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub fn build_app(repo: &MockQuotationRepository, mailer: &MockEmailSender) -> Router {
    let service = Arc::new(QuotationServiceImpl::new(
        Arc::new(repo.clone()),
        Arc::new(mailer.clone()),
        OWNER_EMAIL.to_string(),
    ));
    quotation_router(service)
}

pub fn valid_submission() -> Value {
    json!({
        "service": "Web Design",
        "selectedOptions": ["Landing Page"],
        "timeline": "2 weeks",
        "budget": "$500-1000",
        "projectBrief": "I need a new landing page for my startup",
        "clientName": "Jane Doe",
        "clientEmail": "jane@example.com",
        "preferredContact": "email",
        "consent": true,
        "honeypot": ""
    })
}
