//! Request and response schemas for the HTTP surface
//!
//! Wire names are camelCase; the internal records stay snake_case.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eventbook_core::Event;
use serde::{Deserialize, Serialize};

/// Signup request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub login_name: String,
    pub password: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login_name: String,
    pub password: String,
}

/// Legacy creation request with a caller-supplied id
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_id: String,
    pub login_name: String,
    pub password: String,
    #[serde(default)]
    pub event_ids: Vec<String>,
}

/// Membership update body; omitted lists mean "no change"
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserEventsRequest {
    #[serde(default)]
    pub add_event_ids: Vec<String>,
    #[serde(default)]
    pub remove_event_ids: Vec<String>,
}

/// Event creation body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub max_attendees: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Public event view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
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

impl From<Event> for EventSummary {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            category: event.category,
            max_attendees: event.max_attendees,
            current_attendees: event.current_attendees,
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}
