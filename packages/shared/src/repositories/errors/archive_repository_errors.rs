#[derive(Debug)]
pub enum ArchiveRepositoryError {
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for ArchiveRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ArchiveRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for ArchiveRepositoryError {}
