pub mod quotation_service;
