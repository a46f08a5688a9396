//! Eventbook authentication and authorization core
//!
//! Token issuance and verification, password hashing, bearer-token
//! identity resolution, and the ownership guard for event-membership
//! writes. Persistence is reached only through the collaborator traits
//! in [`store`]; the HTTP surface lives in `eventbook-web`.

pub mod authz;
pub mod error;
pub mod identity;
pub mod memory;
pub mod password;
pub mod service;
pub mod store;
pub mod token;

pub use authz::authorize_owner;
pub use error::AuthError;
pub use memory::MemoryStore;
pub use service::{AuthResult, AuthService, UserSummary};
pub use store::{Event, EventStore, NewEvent, StoreError, User, UserStore};
pub use token::{Claims, TokenCodec};
