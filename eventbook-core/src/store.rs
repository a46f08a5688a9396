//! Persistence collaborator traits and the records they exchange
//!
//! The core never talks to a database directly; it goes through these
//! traits. `eventbook-web` provides the SQLite implementation and
//! [`crate::memory::MemoryStore`] the in-memory one.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default access level assigned at signup. "admin" is reserved; no
/// operation currently consults this field.
pub const DEFAULT_ACCESS_LEVEL: &str = "user";

/// A stored user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub login_name: String,
    pub password_hash: String,
    pub access_level: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user with a generated id and the default access level.
    pub fn new(login_name: String, password_hash: String) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), login_name, password_hash)
    }

    /// Create a user with a caller-supplied id (legacy creation path).
    pub fn with_id(id: String, login_name: String, password_hash: String) -> Self {
        Self {
            id,
            login_name,
            password_hash,
            access_level: DEFAULT_ACCESS_LEVEL.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A stored event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub max_attendees: i64,
    pub current_attendees: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Fields required to create an event
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub max_attendees: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Event {
    /// Materialize a new event with a generated id and zero attendees.
    pub fn from_new(new: NewEvent) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            category: new.category,
            max_attendees: new.max_attendees,
            current_attendees: 0,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
        }
    }
}

/// Storage-layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. This is the
    /// authoritative arbiter for duplicate ids and login names; the
    /// service-level existence checks are only a fast path.
    #[error("conflicting record already exists")]
    Conflict,

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// User lookup and persistence collaborator
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn get_user_by_login(&self, login_name: &str) -> Result<Option<User>, StoreError>;

    /// Persist a user together with its initial membership links.
    /// Either everything is written or nothing is.
    async fn insert_user(&self, user: &User, event_ids: &[String]) -> Result<(), StoreError>;

    /// Event ids the user is a member of.
    async fn list_event_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError>;

    /// Apply additions and removals to a user's membership set in one
    /// atomic step. Callers are responsible for validating that every
    /// added id resolves to an existing event first.
    async fn update_membership(
        &self,
        user_id: &str,
        add: &[String],
        remove: &[String],
    ) -> Result<(), StoreError>;
}

/// Event lookup and persistence collaborator
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError>;

    /// Fetch every listed event that exists; absent ids are simply not
    /// in the result, letting callers compute the full missing set.
    async fn get_events_by_ids(&self, ids: &[String]) -> Result<Vec<Event>, StoreError>;

    async fn insert_event(&self, event: &Event) -> Result<(), StoreError>;
}
