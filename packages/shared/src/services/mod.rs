pub mod archive_service;
pub mod catalog_service;
pub mod errors;
pub mod freshness;
pub mod match_service;
pub mod move_ranker;
pub mod position_service;
