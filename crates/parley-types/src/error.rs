use thiserror::Error;

/// Credential shape errors. Raised before any collaborator is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Errors from repository operations (used by trait definitions in parley-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from signing a user in.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from the remote inference service.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference request failed: {0}")]
    Transport(String),

    #[error("inference service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed inference response: {0}")]
    MalformedResponse(String),
}

/// Errors from the chat and history use cases.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No session, a session without a user, or a conversation the user does not own.
    #[error("unauthorized")]
    Unauthorized,

    /// A required identifier was missing from the request.
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
