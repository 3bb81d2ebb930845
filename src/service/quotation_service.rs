use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::dto::quotation_dto::{CreateQuotationRequest, QuotationReceipt};
use crate::repository::quotation_repo::QuotationRepository;
use crate::util::email::EmailSender;
use crate::util::email_templates::{client_confirmation, owner_notification};
use crate::util::error::{field_errors_from, ServiceError};
use crate::util::ticket::generate_ticket_id;

#[async_trait]
pub trait QuotationService: Send + Sync {
	/// Validate, store and acknowledge one quotation request.
	async fn submit_quotation(&self, request: CreateQuotationRequest) -> Result<QuotationReceipt, ServiceError>;
}

pub struct QuotationServiceImpl {
	pub quotation_repo: Arc<dyn QuotationRepository>,
	pub email_sender: Arc<dyn EmailSender>,
	pub owner_email: String,
}

impl QuotationServiceImpl {
	pub fn new(
		quotation_repo: Arc<dyn QuotationRepository>,
		email_sender: Arc<dyn EmailSender>,
		owner_email: String,
	) -> Self {
		QuotationServiceImpl {
			quotation_repo,
			email_sender,
			owner_email,
		}
	}
}

#[async_trait]
impl QuotationService for QuotationServiceImpl {
	// Validate -> ticket -> persist -> notify owner -> notify client.
	// The record is not rolled back when a notification fails.
	#[instrument(skip(self, request), fields(service = %request.service))]
	async fn submit_quotation(&self, request: CreateQuotationRequest) -> Result<QuotationReceipt, ServiceError> {
		info!("Submitting quotation request");

		if let Err(errors) = request.validate() {
			let errors = field_errors_from(&errors);
			let rejected: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
			warn!(fields = ?rejected, "Quotation request rejected");
			return Err(ServiceError::Validation(errors));
		}

		let ticket_id = generate_ticket_id();
		let quotation = request.into_quotation(ticket_id.clone());

		let stored = self.quotation_repo.create(quotation).await.map_err(|e| {
			error!(ticket_id = %ticket_id, "Failed to store quotation: {e}");
			ServiceError::from(e)
		})?;
		info!(ticket_id = %ticket_id, "Quotation stored");

		self.email_sender
			.send_email(owner_notification(&stored, &self.owner_email))
			.await
			.map_err(|e| {
				error!(ticket_id = %ticket_id, "Quotation stored but owner notification failed: {e}");
				ServiceError::from(e)
			})?;

		self.email_sender
			.send_email(client_confirmation(&stored))
			.await
			.map_err(|e| {
				error!(ticket_id = %ticket_id, "Quotation stored but client confirmation failed: {e}");
				ServiceError::from(e)
			})?;

		info!(ticket_id = %ticket_id, "Quotation request submitted successfully");
		Ok(QuotationReceipt { ticket_id })
	}
}
