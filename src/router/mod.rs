pub mod quotation_router;
