use axum::Router;
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, EmailConfig, MongoConfig};
use crate::repository::quotation_repo::MongoQuotationRepository;
use crate::router::quotation_router::quotation_router;
use crate::service::quotation_service::QuotationServiceImpl;
use crate::util::email::SmtpEmailService;

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;
        let email_config = EmailConfig::from_env()?;

        let owner_email = email_config.owner_email.clone();
        let quotation_repo = Arc::new(MongoQuotationRepository::new(&mongo_config).await?);
        let email_sender = Arc::new(SmtpEmailService::new(email_config)?);
        let quotation_service = Arc::new(QuotationServiceImpl::new(
            quotation_repo,
            email_sender,
            owner_email,
        ));

        let router = quotation_router(quotation_service);
        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.bind_address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("🚀 Server running at http://{}", listener.local_addr()?);
        axum::serve(listener, self.router).await
    }
}
