use crate::model::quotation::{Quotation, QuotationStatus};
use crate::util::error::FieldError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

/// Body of `POST /api/quotation`.
///
/// Built field by field from the JSON object with [`CreateQuotationRequest::from_json_fields`].
/// Absent or `null` fields keep their empty default so the validator reports them under
/// their own name.
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateQuotationRequest {
    #[validate(length(min = 1, message = "Please select a service"))]
    pub service: String,

    #[validate(length(min = 1, message = "Please select at least one option"))]
    pub selected_options: Vec<String>,

    #[validate(length(min = 1, message = "Please select a timeline"))]
    pub timeline: String,

    #[validate(length(min = 1, message = "Please select a budget range"))]
    pub budget: String,

    #[validate(length(min = 20, message = "Please provide at least 20 characters describing your project"))]
    pub project_brief: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub client_name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub client_email: String,

    pub client_phone: Option<String>,

    pub client_company: Option<String>,

    #[validate(length(min = 1, message = "Please select a preferred contact method"))]
    pub preferred_contact: String,

    #[validate(custom(function = "validate_consent"))]
    pub consent: bool,

    #[validate(custom(function = "validate_honeypot"))]
    pub honeypot: String,
}

#[derive(Debug, Clone, Copy)]
enum JsonKind {
    Text,
    TextList,
    Flag,
}

impl JsonKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            JsonKind::Text => value.is_string(),
            JsonKind::TextList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            JsonKind::Flag => value.is_boolean(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            JsonKind::Text => "a string",
            JsonKind::TextList => "a list of strings",
            JsonKind::Flag => "true or false",
        }
    }
}

/// Reads typed values out of a JSON object, recording fields of the wrong type.
struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl FieldReader<'_> {
    /// `None` when the key is absent, `null`, or holds the wrong JSON type.
    fn read<T: DeserializeOwned>(&mut self, key: &str, kind: JsonKind) -> Option<T> {
        let value = self.fields.get(key).filter(|v| !v.is_null())?;
        if !kind.matches(value) {
            self.errors
                .push(FieldError::new(key, format!("{} must be {}", key, kind.describe())));
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

fn validate_consent(consent: &bool) -> Result<(), ValidationError> {
    if *consent {
        return Ok(());
    }
    let mut err = ValidationError::new("consent");
    err.message = Some("You must agree to the terms".into());
    Err(err)
}

fn validate_honeypot(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    let mut err = ValidationError::new("honeypot");
    err.message = Some("Spam detected".into());
    Err(err)
}

impl CreateQuotationRequest {
    /// Read every known field out of a JSON object.
    ///
    /// A field holding the wrong JSON type is reported under its camelCase name and left
    /// at its default; the rest of the object is still read. Unknown keys are ignored.
    pub fn from_json_fields(fields: &Map<String, Value>) -> (Self, Vec<FieldError>) {
        let mut r = FieldReader { fields, errors: Vec::new() };

        let request = CreateQuotationRequest {
            service: r.read("service", JsonKind::Text).unwrap_or_default(),
            selected_options: r.read("selectedOptions", JsonKind::TextList).unwrap_or_default(),
            timeline: r.read("timeline", JsonKind::Text).unwrap_or_default(),
            budget: r.read("budget", JsonKind::Text).unwrap_or_default(),
            project_brief: r.read("projectBrief", JsonKind::Text).unwrap_or_default(),
            client_name: r.read("clientName", JsonKind::Text).unwrap_or_default(),
            client_email: r.read("clientEmail", JsonKind::Text).unwrap_or_default(),
            client_phone: r.read("clientPhone", JsonKind::Text),
            client_company: r.read("clientCompany", JsonKind::Text),
            preferred_contact: r.read("preferredContact", JsonKind::Text).unwrap_or_default(),
            consent: r.read("consent", JsonKind::Flag).unwrap_or_default(),
            honeypot: r.read("honeypot", JsonKind::Text).unwrap_or_default(),
        };
        (request, r.errors)
    }

    /// Turn an accepted request into the record to store. The honeypot is dropped.
    pub fn into_quotation(self, ticket_id: String) -> Quotation {
        Quotation {
            id: None,
            ticket_id,
            service: self.service,
            selected_options: self.selected_options,
            timeline: self.timeline,
            budget: self.budget,
            project_brief: self.project_brief,
            client_name: self.client_name,
            client_email: self.client_email,
            client_phone: self.client_phone.filter(|p| !p.trim().is_empty()),
            client_company: self.client_company.filter(|c| !c.trim().is_empty()),
            preferred_contact: self.preferred_contact,
            consent: self.consent,
            status: QuotationStatus::Pending,
            created_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationSuccessResponse {
    pub success: bool,
    pub message: String,
    pub ticket_id: String,
}

impl QuotationSuccessResponse {
    pub fn new(ticket_id: String) -> Self {
        QuotationSuccessResponse {
            success: true,
            message: "Quotation request submitted successfully".to_string(),
            ticket_id,
        }
    }
}

/// What the service hands back after a fully successful submission.
#[derive(Debug, Clone)]
pub struct QuotationReceipt {
    pub ticket_id: String,
}
