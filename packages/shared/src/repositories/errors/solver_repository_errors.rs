#[derive(Debug)]
pub enum SolverRepositoryError {
    Http(String),
    Status(u16),
    Decode(String),
}

impl std::fmt::Display for SolverRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverRepositoryError::Http(msg) => write!(f, "HTTP error: {}", msg),
            SolverRepositoryError::Status(code) => {
                write!(f, "Solver responded with status {}", code)
            }
            SolverRepositoryError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for SolverRepositoryError {}
