pub mod quotation_repo;
pub mod repository_error;
