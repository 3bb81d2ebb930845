pub mod quotation_dto;
