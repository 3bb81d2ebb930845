use crate::config::{EmailConfig, ConfigError};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use tracing::{error, info, instrument};
use validator::ValidateEmail;

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// Email message builder
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
}

impl EmailMessage {
    pub fn new(to: String, subject: String) -> Self {
        Self {
            to,
            subject,
            text_body: None,
            html_body: None,
        }
    }

    pub fn with_text_body(mut self, body: String) -> Self {
        self.text_body = Some(body);
        self
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.html_body = Some(body);
        self
    }
}

/// Anything that can deliver an [`EmailMessage`]. The sender address is the
/// implementation's concern.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError>;
}

/// SMTP email service implementation
pub struct SmtpEmailService {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    /// Create a new SMTP email service. No connection is opened until the first send.
    #[instrument(skip(config), fields(host = %config.smtp_host, port = config.smtp_port))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");

        config.validate().map_err(EmailError::from)?;

        let mut transport_builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .timeout(Some(std::time::Duration::from_secs(config.connection_timeout_secs)));

        if config.use_tls {
            let tls_parameters = TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;

            transport_builder = if config.use_starttls {
                transport_builder.tls(Tls::Required(tls_parameters))
            } else {
                transport_builder.tls(Tls::Wrapper(tls_parameters))
            };
        } else {
            transport_builder = transport_builder.tls(Tls::None);
        }

        if config.has_credentials() {
            let credentials = Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            );
            transport_builder = transport_builder.credentials(credentials);
        }

        let transport = transport_builder.build();

        info!("SMTP email service initialized successfully");
        Ok(Self { config, transport })
    }

    /// Build a lettre Message from EmailMessage
    pub fn build_message(&self, email_message: EmailMessage) -> Result<Message, EmailError> {
        let from_mailbox: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))?;

        let to_mailbox: Mailbox = email_message.to
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

        let message_builder = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(&email_message.subject);

        let built = match (email_message.text_body, email_message.html_body) {
            (Some(text), Some(html)) => message_builder.multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::builder().header(ContentType::TEXT_PLAIN).body(text))
                    .singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(html)),
            ),
            (Some(text), None) => message_builder.header(ContentType::TEXT_PLAIN).body(text),
            (None, Some(html)) => message_builder
                .singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(html)),
            (None, None) => {
                return Err(EmailError::MessageError("No message body provided".to_string()));
            }
        };

        built.map_err(|e| EmailError::MessageError(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailService {
    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!("Sending email");

        validate_email_address(&message.to)?;

        let email_message = self.build_message(message)?;

        self.transport
            .send(email_message)
            .await
            .map_err(|e| {
                error!("Failed to send email: {}", e);
                EmailError::SmtpError(format!("Failed to send email: {}", e))
            })?;

        info!("Email sent successfully");
        Ok(())
    }
}

/// Same rule the request DTO applies to `clientEmail`.
fn validate_email_address(email: &str) -> Result<(), EmailError> {
    if email.is_empty() {
        return Err(EmailError::AddressError("Email address cannot be empty".to_string()));
    }
    if !email.validate_email() {
        return Err(EmailError::AddressError(format!("Invalid email format: {}", email)));
    }
    Ok(())
}
