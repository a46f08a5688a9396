//! Auth service: signup, login, and the account/membership operations
//! built on the collaborator traits

use crate::error::AuthError;
use crate::password::{hash_password, verify_password};
use crate::store::{Event, EventStore, NewEvent, StoreError, User, UserStore};
use crate::token::TokenCodec;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a successful signup or login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub access_token: String,
    pub token_type: String,
    pub user_id: String,
    pub login_name: String,
    pub access_level: String,
}

impl AuthResult {
    fn new(access_token: String, user: &User) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user_id: user.id.clone(),
            login_name: user.login_name.clone(),
            access_level: user.access_level.clone(),
        }
    }
}

/// Public view of a user account and its membership set
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub login_name: String,
    pub access_level: String,
    pub event_ids: Vec<String>,
}

/// Orchestrates credential hashing, token issuance, and the
/// account/membership operations over the persistence collaborators.
#[derive(Clone)]
pub struct AuthService {
    codec: TokenCodec,
    users: Arc<dyn UserStore>,
    events: Arc<dyn EventStore>,
}

impl AuthService {
    pub fn new(codec: TokenCodec, users: Arc<dyn UserStore>, events: Arc<dyn EventStore>) -> Self {
        Self {
            codec,
            users,
            events,
        }
    }

    /// Token codec, for identity resolution at the HTTP boundary.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// User lookup collaborator, for identity resolution.
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    /// Create an account and issue its first token.
    ///
    /// The login-name existence check here is a fast path only; the
    /// storage layer's uniqueness constraint is the real arbiter, and a
    /// late `Conflict` from the insert maps to the same `NameTaken`.
    pub async fn signup(&self, login_name: &str, password: &str) -> Result<AuthResult, AuthError> {
        if self.lookup_by_login(login_name).await?.is_some() {
            debug!("Signup rejected, login name '{}' already exists", login_name);
            return Err(AuthError::NameTaken);
        }

        let user = User::new(login_name.to_string(), hash_password(password)?);

        match self.users.insert_user(&user, &[]).await {
            Ok(()) => {}
            Err(StoreError::Conflict) => {
                warn!("Concurrent signup lost the race for login name '{}'", login_name);
                return Err(AuthError::NameTaken);
            }
            Err(e) => return Err(AuthError::Storage(e.to_string())),
        }

        let token = self.codec.mint(&user.id)?;
        info!("Registered new user: {}", user.login_name);
        Ok(AuthResult::new(token, &user))
    }

    /// Verify credentials and issue a fresh token.
    ///
    /// An unknown login name and a wrong password are deliberately
    /// indistinguishable to the caller.
    pub async fn login(&self, login_name: &str, password: &str) -> Result<AuthResult, AuthError> {
        let user = self
            .lookup_by_login(login_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            warn!("Invalid password for user: {}", login_name);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.codec.mint(&user.id)?;
        debug!("User authenticated: {}", login_name);
        Ok(AuthResult::new(token, &user))
    }

    /// Legacy/administrative creation path with a caller-supplied id
    /// and optional initial membership. Issues no token.
    pub async fn create_user_with_id(
        &self,
        id: &str,
        login_name: &str,
        password: &str,
        event_ids: &[String],
    ) -> Result<UserSummary, AuthError> {
        if self
            .users
            .get_user_by_id(id)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?
            .is_some()
        {
            return Err(AuthError::AlreadyExists);
        }

        // Every referenced event must resolve before anything is
        // written; the complete missing set is reported at once.
        let resolved = self.resolve_event_ids(event_ids).await?;

        let user = User::with_id(id.to_string(), login_name.to_string(), hash_password(password)?);

        match self.users.insert_user(&user, &resolved).await {
            Ok(()) => {}
            Err(StoreError::Conflict) => return Err(AuthError::AlreadyExists),
            Err(e) => return Err(AuthError::Storage(e.to_string())),
        }

        info!("Created user '{}' with {} initial events", user.id, resolved.len());
        Ok(UserSummary {
            id: user.id,
            login_name: user.login_name,
            access_level: user.access_level,
            event_ids: resolved,
        })
    }

    /// Profile view for an existing user.
    pub async fn user_summary(&self, user_id: &str) -> Result<UserSummary, AuthError> {
        let user = self
            .users
            .get_user_by_id(user_id)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        let event_ids = self
            .users
            .list_event_ids(user_id)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(UserSummary {
            id: user.id,
            login_name: user.login_name,
            access_level: user.access_level,
            event_ids,
        })
    }

    /// The events a user is a member of, fully resolved.
    pub async fn list_user_events(&self, user_id: &str) -> Result<Vec<Event>, AuthError> {
        let summary = self.user_summary(user_id).await?;
        self.events
            .get_events_by_ids(&summary.event_ids)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }

    /// Add and remove events from a user's membership set.
    ///
    /// Additions are validated as a whole set first; if any id is
    /// unresolved the operation aborts with the complete missing list
    /// and no write happens. Removals of ids the user is not a member
    /// of are no-ops.
    pub async fn update_membership(
        &self,
        user_id: &str,
        add: &[String],
        remove: &[String],
    ) -> Result<UserSummary, AuthError> {
        // Confirm the user exists before touching membership.
        let _ = self
            .users
            .get_user_by_id(user_id)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        let add = self.resolve_event_ids(add).await?;

        self.users
            .update_membership(user_id, &add, remove)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        self.user_summary(user_id).await
    }

    /// Create an event. Requires an authenticated caller but no
    /// ownership; events have no owner.
    pub async fn create_event(&self, new: NewEvent) -> Result<Event, AuthError> {
        let event = Event::from_new(new);
        self.events
            .insert_event(&event)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        info!("Created event: {}", event.id);
        Ok(event)
    }

    /// Fetch a single event.
    pub async fn get_event(&self, event_id: &str) -> Result<Option<Event>, AuthError> {
        self.events
            .get_event(event_id)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }

    async fn lookup_by_login(&self, login_name: &str) -> Result<Option<User>, AuthError> {
        self.users
            .get_user_by_login(login_name)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }

    /// Check that every id names an existing event, preserving request
    /// order and reporting the complete missing set on failure.
    async fn resolve_event_ids(&self, ids: &[String]) -> Result<Vec<String>, AuthError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = self
            .events
            .get_events_by_ids(ids)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let found_ids: HashSet<&str> = found.iter().map(|e| e.id.as_str()).collect();
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !found_ids.contains(id.as_str()))
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Err(AuthError::EventsNotFound(missing));
        }

        Ok(ids.to_vec())
    }
}
