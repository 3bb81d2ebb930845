use crate::model::quotation::Quotation;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::config::mongo_conf::MongoConfig;
use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, error};

/// Record store for quotation requests. Inserts already-validated records only.
#[async_trait]
pub trait QuotationRepository: Send + Sync {
    /// Insert one record, returning it with its store id and `createdAt` filled in.
    async fn create(&self, quotation: Quotation) -> RepositoryResult<Quotation>;
}

pub struct MongoQuotationRepository {
    collection: mongodb::Collection<Quotation>,
}

impl MongoQuotationRepository {
    /// Create a new MongoQuotationRepository using MongoConfig
    pub async fn new(config: &MongoConfig) -> Result<Self, RepositoryError> {
        use mongodb::{options::{ClientOptions, Credential, ResolverConfig}, Client};

        let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare())
            .await
            .map_err(|e| RepositoryError::connection(format!("Invalid MongoDB URI: {}", e)))?;
        client_options.app_name = Some("PortfolioBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            client_options.credential = Some(Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build());
        }

        let client = Client::with_options(client_options)?;
        let collection = client
            .database(&config.database)
            .collection::<Quotation>(&config.quotation_collection);
        info!(collection = %config.quotation_collection, "Quotation repository ready");
        Ok(MongoQuotationRepository { collection })
    }
}

#[async_trait]
impl QuotationRepository for MongoQuotationRepository {
    #[tracing::instrument(skip(self, quotation), fields(ticket_id = %quotation.ticket_id))]
    async fn create(&self, quotation: Quotation) -> RepositoryResult<Quotation> {
        info!("Creating new quotation");
        let mut new_quotation = quotation;
        new_quotation.id = Some(ObjectId::new());
        new_quotation.created_at = Some(chrono::Utc::now().to_rfc3339());

        match self.collection.insert_one(&new_quotation, None).await {
            Ok(_) => {
                info!("Quotation created successfully");
                Ok(new_quotation)
            }
            Err(e) => {
                error!("Failed to create quotation: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }
}
