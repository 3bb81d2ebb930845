use axum::{Router, routing::{get, post}};
use std::sync::Arc;
use crate::handler::quotation_handler::submit_quotation_handler;
use crate::service::quotation_service::QuotationServiceImpl;

pub const QUOTATION_PATH: &str = "/api/quotation";

pub fn quotation_router(service: Arc<QuotationServiceImpl>) -> Router {
    Router::new()
        .route(QUOTATION_PATH, post(submit_quotation_handler))
        .route("/health", get(|| async { "OK" }))
        .with_state(service)
}
