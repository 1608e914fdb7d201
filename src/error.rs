//! Error taxonomy for catalog and auth operations.
//!
//! [`CatalogError`] separates rejected input from unknown ids so the HTTP
//! layer can map them to 400 and 404 distinctly. Recorder operations have no
//! error type: they are infallible by construction (see [`crate::audit`]).

use crate::types::ProductId;
use thiserror::Error;

/// Failure of a catalog mutation. Mutations are never partially applied: on
/// error the catalog and the movement log are unchanged.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Bad or missing input (empty name, negative quantity).
    #[error("{0}")]
    Validation(String),

    /// No product with the given id.
    #[error("product {0} not found")]
    NotFound(ProductId),
}

/// Failure of an authentication operation.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad or missing input (empty username, short password).
    #[error("{0}")]
    Validation(String),

    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// No session token, or a token that is missing/expired/revoked.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Registration with a username that already exists.
    #[error("username already exists")]
    UsernameTaken,

    /// Password hashing or verification failed.
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}
