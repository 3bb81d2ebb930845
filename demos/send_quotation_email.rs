use dotenv::dotenv;
use portfolio_backend::config::EmailConfig;
use portfolio_backend::dto::quotation_dto::CreateQuotationRequest;
use portfolio_backend::util::email::{EmailSender, SmtpEmailService};
use portfolio_backend::util::email_templates::{client_confirmation, owner_notification};
use portfolio_backend::util::logger::Logger;
use portfolio_backend::util::ticket::generate_ticket_id;
use tracing::{error, info, warn};

/// Sends the owner notification and client confirmation for a sample request
/// through the SMTP server configured in the environment.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_result = dotenv();
    let logger = Logger::new()?;
    let _guards = logger.guards;

    info!("🚀 Sending sample quotation emails");
    if let Err(e) = dotenv_result {
        warn!("⚠️ Failed to load .env file: {} (using system env vars)", e);
    }

    let email_config = EmailConfig::from_env()?;
    let owner_email = email_config.owner_email.clone();
    let client_email = std::env::var("DEMO_CLIENT_EMAIL").unwrap_or_else(|_| owner_email.clone());
    let email_service = SmtpEmailService::new(email_config)?;

    let request = CreateQuotationRequest {
        service: "Web Design".to_string(),
        selected_options: vec!["Landing Page".to_string()],
        timeline: "2 weeks".to_string(),
        budget: "$500-1000".to_string(),
        project_brief: "I need a new landing page for my startup".to_string(),
        client_name: "Jane Doe".to_string(),
        client_email,
        preferred_contact: "email".to_string(),
        consent: true,
        ..Default::default()
    };
    let quotation = request.into_quotation(generate_ticket_id());

    for message in [owner_notification(&quotation, &owner_email), client_confirmation(&quotation)] {
        let to = message.to.clone();
        if let Err(e) = email_service.send_email(message).await {
            error!("Failed to send email to {}: {}", to, e);
            return Err(e.into());
        }
        info!("Email sent to {}", to);
    }
    Ok(())
}
