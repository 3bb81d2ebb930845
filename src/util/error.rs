use axum::{response::{IntoResponse, Response}, http::StatusCode, Json};
use serde::Serialize;
use validator::ValidationErrors;

pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to submit quotation request. Please try again later.";
pub const VALIDATION_FAILURE_MESSAGE: &str = "Invalid quotation request";
pub const MALFORMED_BODY_MESSAGE: &str = "Request body must be a JSON object";

/// One rejected input field, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        FieldError { field: field.into(), message: message.into() }
    }
}

/// Flatten validator output into a list sorted by field name.
pub fn field_errors_from(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = to_camel_case(&field.to_string());
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid ({})", field, e.code));
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    sort_field_errors(&mut out);
    out
}

pub fn sort_field_errors(errors: &mut [FieldError]) {
    errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
}

/// Field names are reported in the same camelCase the JSON body uses.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    Validation,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl HandlerError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        HandlerError {
            error: HandlerErrorKind::Validation,
            message: VALIDATION_FAILURE_MESSAGE.to_string(),
            errors,
        }
    }

    /// The caller only ever sees the generic message; causes stay in the logs.
    pub fn internal() -> Self {
        HandlerError {
            error: HandlerErrorKind::Internal,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
            errors: Vec::new(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.error {
            HandlerErrorKind::Validation => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            success: false,
            message: &self.message,
            errors: match self.error {
                HandlerErrorKind::Validation => Some(self.errors.as_slice()),
                HandlerErrorKind::Internal => None,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HandlerError::validation(errors),
            other => {
                tracing::error!(error = %other, "Quotation submission failed");
                HandlerError::internal()
            }
        }
    }
}


#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("Persistence failed: {0}")]
    Persistence(String),
    #[error("Notification failed: {0}")]
    Notification(String),
}

impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        ServiceError::Persistence(err.to_string())
    }
}

impl From<crate::util::email::EmailError> for ServiceError {
    fn from(err: crate::util::email::EmailError) -> Self {
        ServiceError::Notification(err.to_string())
    }
}
