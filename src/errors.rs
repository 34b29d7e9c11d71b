use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("VALIDATION: {0}")]
    Validation(String),
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("METHOD_NOT_ALLOWED: allowed methods are {allow}")]
    MethodNotAllowed { allow: &'static str },
    #[error("STORE_CORRUPT: {0}")]
    CorruptStore(String),
    #[error("STORE_WRITE: {0}")]
    StoreWrite(String),
    #[error("IO_FAILURE: {0}")]
    Io(String),
}

pub type AppResult<T> = Result<T, AppError>;
