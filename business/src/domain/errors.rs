/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.unavailable")]
    Unavailable,
    #[error("repository.quota_exceeded")]
    QuotaExceeded,
    #[error("repository.database_error")]
    DatabaseError,
}

impl RepositoryError {
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn unavailable() -> Self {
        RepositoryError::Unavailable
    }
    pub fn quota_exceeded() -> Self {
        RepositoryError::QuotaExceeded
    }
    pub fn database_error() -> Self {
        RepositoryError::DatabaseError
    }
}
