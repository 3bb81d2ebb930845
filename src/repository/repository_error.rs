/// Errors raised by the record store.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Already Exists: {0}")]
    AlreadyExists(String),
    #[error("Validation Error: {0}")]
    ValidationError(String),
    #[error("Database Error: {0}")]
    DatabaseError(String),
    #[error("Connection Error: {0}")]
    ConnectionError(String),
    /// Anything the driver reports that fits none of the above
    #[error("Repository Error: {0}")]
    Generic(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    pub fn connection<T: Into<String>>(msg: T) -> Self {
        RepositoryError::ConnectionError(msg.into())
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::Write(_) => {
                // E11000 is the duplicate key code
                if err.to_string().contains("E11000") {
                    RepositoryError::AlreadyExists(format!("Duplicate key: {}", err))
                } else {
                    RepositoryError::DatabaseError(format!("Write error: {}", err))
                }
            }
            ErrorKind::Authentication { .. } => {
                RepositoryError::ConnectionError(format!("Authentication failed: {}", err))
            }
            ErrorKind::ServerSelection { .. } => {
                RepositoryError::ConnectionError(format!("Server unreachable: {}", err))
            }
            ErrorKind::InvalidArgument { .. } => {
                RepositoryError::ValidationError(format!("Invalid argument: {}", err))
            }
            ErrorKind::Io(_) => RepositoryError::ConnectionError(format!("IO error: {}", err)),
            _ => RepositoryError::Generic(Box::new(err)),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
