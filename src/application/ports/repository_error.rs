#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("corrupt row: {0}")]
    CorruptRow(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}
