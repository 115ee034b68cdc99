pub mod archive_repository_errors;
pub mod solver_repository_errors;
