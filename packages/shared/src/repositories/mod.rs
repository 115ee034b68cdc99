pub mod archive_repository;
pub mod errors;
pub mod solver_repository;
