//! In-memory store for development and testing

use crate::store::{Event, StoreError, User, UserStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory implementation of both collaborator traits.
///
/// Used as the fallback when no database is configured, and by unit
/// tests that exercise the service without SQLite.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<String, User>>>,
    events: Arc<RwLock<HashMap<String, Event>>>,
    // user id -> membership set, insertion-ordered
    memberships: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().unwrap();
        Ok(users.get(id).cloned())
    }

    async fn get_user_by_login(&self, login_name: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.login_name == login_name).cloned())
    }

    async fn insert_user(&self, user: &User, event_ids: &[String]) -> Result<(), StoreError> {
        let mut users = self.users.write().unwrap();
        if users.contains_key(&user.id) {
            return Err(StoreError::Conflict);
        }
        if users.values().any(|u| u.login_name == user.login_name) {
            return Err(StoreError::Conflict);
        }
        users.insert(user.id.clone(), user.clone());

        let mut memberships = self.memberships.write().unwrap();
        memberships.insert(user.id.clone(), event_ids.to_vec());
        Ok(())
    }

    async fn list_event_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let memberships = self.memberships.read().unwrap();
        Ok(memberships.get(user_id).cloned().unwrap_or_default())
    }

    async fn update_membership(
        &self,
        user_id: &str,
        add: &[String],
        remove: &[String],
    ) -> Result<(), StoreError> {
        let mut memberships = self.memberships.write().unwrap();
        let set = memberships.entry(user_id.to_string()).or_default();

        for id in add {
            if !set.contains(id) {
                set.push(id.clone());
            }
        }
        set.retain(|id| !remove.contains(id));
        Ok(())
    }
}

#[async_trait]
impl crate::store::EventStore for MemoryStore {
    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let events = self.events.read().unwrap();
        Ok(events.get(id).cloned())
    }

    async fn get_events_by_ids(&self, ids: &[String]) -> Result<Vec<Event>, StoreError> {
        let events = self.events.read().unwrap();
        Ok(ids.iter().filter_map(|id| events.get(id).cloned()).collect())
    }

    async fn insert_event(&self, event: &Event) -> Result<(), StoreError> {
        let mut events = self.events.write().unwrap();
        if events.contains_key(&event.id) {
            return Err(StoreError::Conflict);
        }
        events.insert(event.id.clone(), event.clone());
        Ok(())
    }
}
