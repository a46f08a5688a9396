//! Error taxonomy for the authentication core

use thiserror::Error;

/// Authentication and authorization errors
///
/// Several externally distinct failure causes are merged on purpose:
/// `InvalidToken` covers bad signature, malformed token, and expiry;
/// `InvalidCredentials` covers both an unknown login name and a wrong
/// password. Callers must not re-split them at the boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingAuthHeader,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("Login name already taken")]
    NameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    AlreadyExists,

    #[error("Events not found: {}", .0.join(","))]
    EventsNotFound(Vec<String>),

    #[error("Token creation failed")]
    TokenCreation,

    #[error("Storage error: {0}")]
    Storage(String),
}
