//! Bearer-token identity resolution
//!
//! Recovers the calling user from an `Authorization` header value.
//! The three failure branches (missing/malformed header, bad token,
//! deleted subject) are distinguished internally for testability but
//! all surface as the same unauthenticated outcome at the boundary.

use crate::error::AuthError;
use crate::store::{User, UserStore};
use crate::token::TokenCodec;
use tracing::debug;

/// Scheme prefix accepted on the Authorization header.
const BEARER_PREFIX_LEN: usize = "Bearer ".len();

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively with exactly one space
/// separating it from the token.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingAuthHeader)?;

    // Byte-wise comparison; a matching prefix is ASCII, so slicing
    // past it cannot split a character.
    let bytes = header.as_bytes();
    if bytes.len() <= BEARER_PREFIX_LEN
        || !bytes[..BEARER_PREFIX_LEN].eq_ignore_ascii_case(b"bearer ")
    {
        return Err(AuthError::MissingAuthHeader);
    }

    Ok(&header[BEARER_PREFIX_LEN..])
}

/// Resolve an Authorization header value to the calling user.
pub async fn resolve<S: UserStore + ?Sized>(
    codec: &TokenCodec,
    users: &S,
    header: Option<&str>,
) -> Result<User, AuthError> {
    let token = bearer_token(header)?;
    let claims = codec.decode(token)?;

    let user = users
        .get_user_by_id(&claims.sub)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?
        .ok_or_else(|| {
            debug!("Token subject no longer exists: {}", claims.sub);
            AuthError::UserNotFound
        })?;

    Ok(user)
}
