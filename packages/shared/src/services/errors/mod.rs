pub mod catalog_service_errors;
pub mod match_service_errors;
