//! SQLite-backed implementation of the core's persistence collaborators

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eventbook_core::{Event, EventStore, StoreError, User, UserStore};
use sqlx::{sqlite::SqliteConnectOptions, Row, SqlitePool};
use tracing::{debug, error, info};

/// One pool serving both the user and event stores.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect and run the table migrations.
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to database: {}", database_url);

        let pool = if database_url.starts_with("sqlite:") && !database_url.contains(":memory:") {
            let db_path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);

            if let Some(parent) = std::path::Path::new(db_path).parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        error!("Failed to create database directory: {}", e);
                        StoreError::Backend(format!("failed to create directory: {}", e))
                    })?;
                }
            }

            let options = SqliteConnectOptions::new()
                .filename(db_path)
                .create_if_missing(true);

            SqlitePool::connect_with(options).await.map_err(|e| {
                error!("Database connection failed: {}", e);
                StoreError::Backend(format!("failed to connect: {}", e))
            })?
        } else {
            // A pooled in-memory database is one database per
            // connection; pin the pool to a single connection so every
            // query sees the same tables.
            sqlx::sqlite::SqlitePoolOptions::new()
                .max_connections(1)
                .connect(database_url)
                .await
                .map_err(|e| {
                    error!("Database connection failed: {}", e);
                    StoreError::Backend(format!("failed to connect: {}", e))
                })?
        };

        let store = Self { pool };
        store.create_tables().await?;
        info!("Database ready");
        Ok(store)
    }

    /// Pool accessor, mainly for tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_tables(&self) -> Result<(), StoreError> {
        // The UNIQUE constraint on login_name is the authoritative
        // uniqueness arbiter; service-level checks are a fast path.
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                login_name TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                access_level TEXT NOT NULL DEFAULT 'user',
                created_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_users_login_name ON users(login_name)",
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                category TEXT,
                max_attendees INTEGER NOT NULL,
                current_attendees INTEGER NOT NULL DEFAULT 0,
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS user_events (
                user_id TEXT NOT NULL REFERENCES users(id),
                event_id TEXT NOT NULL REFERENCES events(id),
                PRIMARY KEY (user_id, event_id)
            )
            "#,
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    error!("Failed to create tables: {}", e);
                    StoreError::Backend(e.to_string())
                })?;
        }

        Ok(())
    }
}

fn map_sqlx_err(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StoreError::Conflict;
        }
    }
    StoreError::Backend(e.to_string())
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        login_name: row.get("login_name"),
        password_hash: row.get("password_hash"),
        access_level: row.get("access_level"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }
}

fn event_from_row(row: &sqlx::sqlite::SqliteRow) -> Event {
    Event {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: row.get("category"),
        max_attendees: row.get("max_attendees"),
        current_attendees: row.get("current_attendees"),
        date: row.get::<NaiveDate, _>("date"),
        start_time: row.get::<NaiveTime, _>("start_time"),
        end_time: row.get::<NaiveTime, _>("end_time"),
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn get_user_by_login(&self, login_name: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query("SELECT * FROM users WHERE login_name = ?")
            .bind(login_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn insert_user(&self, user: &User, event_ids: &[String]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, login_name, password_hash, access_level, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.login_name)
        .bind(&user.password_hash)
        .bind(&user.access_level)
        .bind(user.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_err)?;

        for event_id in event_ids {
            sqlx::query("INSERT INTO user_events (user_id, event_id) VALUES (?, ?)")
                .bind(&user.id)
                .bind(event_id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_err)?;
        }

        tx.commit().await.map_err(map_sqlx_err)?;
        debug!("Inserted user: {}", user.id);
        Ok(())
    }

    async fn list_event_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query(
            "SELECT event_id FROM user_events WHERE user_id = ? ORDER BY rowid",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(rows.iter().map(|row| row.get("event_id")).collect())
    }

    async fn update_membership(
        &self,
        user_id: &str,
        add: &[String],
        remove: &[String],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        for event_id in add {
            sqlx::query(
                "INSERT OR IGNORE INTO user_events (user_id, event_id) VALUES (?, ?)",
            )
            .bind(user_id)
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;
        }

        for event_id in remove {
            sqlx::query("DELETE FROM user_events WHERE user_id = ? AND event_id = ?")
                .bind(user_id)
                .bind(event_id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_err)?;
        }

        tx.commit().await.map_err(map_sqlx_err)?;
        debug!("Updated membership for user: {}", user_id);
        Ok(())
    }
}

#[async_trait]
impl EventStore for SqliteStore {
    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let row = sqlx::query("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(row.as_ref().map(event_from_row))
    }

    async fn get_events_by_ids(&self, ids: &[String]) -> Result<Vec<Event>, StoreError> {
        let mut events = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(event) = self.get_event(id).await? {
                events.push(event);
            }
        }
        Ok(events)
    }

    async fn insert_event(&self, event: &Event) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO events
                (id, title, description, category, max_attendees, current_attendees,
                 date, start_time, end_time)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.category)
        .bind(event.max_attendees)
        .bind(event.current_attendees)
        .bind(event.date)
        .bind(event.start_time)
        .bind(event.end_time)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        debug!("Inserted event: {}", event.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteStore {
        SqliteStore::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn duplicate_login_name_is_a_conflict() {
        let store = store().await;
        let alice = User::new("alice".to_string(), "hash-a".to_string());
        store.insert_user(&alice, &[]).await.unwrap();

        let imposter = User::new("alice".to_string(), "hash-b".to_string());
        let err = store.insert_user(&imposter, &[]).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[tokio::test]
    async fn user_round_trips_through_both_lookups() {
        let store = store().await;
        let alice = User::new("alice".to_string(), "hash-a".to_string());
        store.insert_user(&alice, &[]).await.unwrap();

        let by_id = store.get_user_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(by_id.login_name, "alice");

        let by_login = store.get_user_by_login("alice").await.unwrap().unwrap();
        assert_eq!(by_login.id, alice.id);

        assert!(store.get_user_by_login("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn membership_updates_are_applied_in_order() {
        let store = store().await;
        let alice = User::new("alice".to_string(), "hash".to_string());
        store.insert_user(&alice, &[]).await.unwrap();

        let event = Event::from_new(eventbook_core::NewEvent {
            title: "Test Event".to_string(),
            description: None,
            category: None,
            max_attendees: 10,
            date: chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            start_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: chrono::NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        });
        store.insert_event(&event).await.unwrap();

        store
            .update_membership(&alice.id, &[event.id.clone()], &[])
            .await
            .unwrap();
        assert_eq!(
            store.list_event_ids(&alice.id).await.unwrap(),
            vec![event.id.clone()]
        );

        store
            .update_membership(&alice.id, &[], &[event.id.clone()])
            .await
            .unwrap();
        assert!(store.list_event_ids(&alice.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn event_round_trips_with_dates_and_times() {
        let store = store().await;
        let event = Event::from_new(eventbook_core::NewEvent {
            title: "Launch".to_string(),
            description: Some("Desc".to_string()),
            category: Some("Cat".to_string()),
            max_attendees: 100,
            date: chrono::NaiveDate::from_ymd_opt(2030, 6, 15).unwrap(),
            start_time: chrono::NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            end_time: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        });
        store.insert_event(&event).await.unwrap();

        let loaded = store.get_event(&event.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Launch");
        assert_eq!(loaded.date, event.date);
        assert_eq!(loaded.start_time, event.start_time);
        assert_eq!(loaded.current_attendees, 0);

        assert!(store.get_event("missing").await.unwrap().is_none());
    }
}
