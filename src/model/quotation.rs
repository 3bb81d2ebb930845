use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review state of a quotation request. New requests are always `Pending`;
/// later states belong to whoever reviews the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    #[default]
    Pending,
    Reviewed,
    Quoted,
    Completed,
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuotationStatus::Pending => "pending",
            QuotationStatus::Reviewed => "reviewed",
            QuotationStatus::Quoted => "quoted",
            QuotationStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// A stored quotation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub ticket_id: String,
    pub service: String,
    pub selected_options: Vec<String>,
    pub timeline: String,
    pub budget: String,
    pub project_brief: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub preferred_contact: String,
    pub consent: bool,
    pub status: QuotationStatus,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&QuotationStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let parsed: QuotationStatus = serde_json::from_str("\"quoted\"").unwrap();
        assert_eq!(parsed, QuotationStatus::Quoted);
        assert_eq!(QuotationStatus::default(), QuotationStatus::Pending);
        assert_eq!(QuotationStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_quotation_uses_camel_case_fields() {
        let quotation = Quotation {
            id: None,
            ticket_id: "QT-ABC-123456".to_string(),
            service: "Web Design".to_string(),
            selected_options: vec!["Landing Page".to_string()],
            timeline: "2 weeks".to_string(),
            budget: "$500-1000".to_string(),
            project_brief: "I need a new landing page for my startup".to_string(),
            client_name: "Jane Doe".to_string(),
            client_email: "jane@example.com".to_string(),
            client_phone: None,
            client_company: None,
            preferred_contact: "email".to_string(),
            consent: true,
            status: QuotationStatus::Pending,
            created_at: None,
        };
        let value = serde_json::to_value(&quotation).unwrap();
        assert_eq!(value["ticketId"], "QT-ABC-123456");
        assert_eq!(value["selectedOptions"][0], "Landing Page");
        assert_eq!(value["status"], "pending");
        assert!(value.get("_id").is_none());
    }
}
