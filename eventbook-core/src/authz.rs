//! Ownership authorization guard

use crate::error::AuthError;
use crate::store::User;
use tracing::warn;

/// Allow the operation iff the resolved caller owns the path user id.
///
/// Pure comparison; the caller's existence has already been proven by
/// identity resolution, and the path user's existence is irrelevant to
/// the decision.
pub fn authorize_owner(caller: &User, path_user_id: &str) -> Result<(), AuthError> {
    if caller.id == path_user_id {
        Ok(())
    } else {
        warn!(
            "User '{}' attempted to access resources of '{}'",
            caller.id, path_user_id
        );
        Err(AuthError::Forbidden)
    }
}
