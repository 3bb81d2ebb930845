use axum::{extract::State, response::IntoResponse, Json};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::dto::quotation_dto::{CreateQuotationRequest, QuotationSuccessResponse};
use crate::service::quotation_service::{QuotationService, QuotationServiceImpl};
use crate::util::error::{
    field_errors_from, sort_field_errors, FieldError, HandlerError, MALFORMED_BODY_MESSAGE,
};

/// Handler: submit a quotation request (public).
///
/// The raw body is parsed here rather than through axum's `Json` extractor so that
/// malformed input gets the same error shape as a validation failure.
pub async fn submit_quotation_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    body: Bytes,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[submit_quotation_handler] Handler called");
    debug!("[submit_quotation_handler] Body size: {} bytes", body.len());

    let request = parse_quotation_body(&body)?;
    let receipt = service.submit_quotation(request).await?;

    Ok(Json(QuotationSuccessResponse::new(receipt.ticket_id)))
}

fn malformed_body() -> HandlerError {
    HandlerError::validation(vec![FieldError::new("body", MALFORMED_BODY_MESSAGE)])
}

/// Fields of the wrong JSON type are reported together with every rule the rest of
/// the request breaks. A mistyped field is not reported a second time by the rules.
fn parse_quotation_body(body: &[u8]) -> Result<CreateQuotationRequest, HandlerError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        warn!("[submit_quotation_handler] Invalid JSON body: {}", e);
        malformed_body()
    })?;
    let Value::Object(fields) = value else {
        warn!("[submit_quotation_handler] JSON body is not an object");
        return Err(malformed_body());
    };

    let (request, mut errors) = CreateQuotationRequest::from_json_fields(&fields);
    if errors.is_empty() {
        return Ok(request);
    }

    let mistyped: Vec<String> = errors.iter().map(|e| e.field.clone()).collect();
    warn!(fields = ?mistyped, "[submit_quotation_handler] Fields with the wrong JSON type");
    if let Err(rule_errors) = request.validate() {
        errors.extend(
            field_errors_from(&rule_errors)
                .into_iter()
                .filter(|e| !mistyped.contains(&e.field)),
        );
    }
    sort_field_errors(&mut errors);
    Err(HandlerError::validation(errors))
}
