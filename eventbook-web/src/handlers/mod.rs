//! HTTP request handlers

pub mod auth;
pub mod events;
pub mod health;
pub mod types;
pub mod users;

pub use auth::{login, signup};
pub use events::{create_event, get_event};
pub use health::health_check;
pub use users::{create_user, get_user, get_user_events, update_user_events};
