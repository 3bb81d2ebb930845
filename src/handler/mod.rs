pub mod quotation_handler;
