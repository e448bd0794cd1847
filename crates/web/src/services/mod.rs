//! Services behind the route handlers.
//!
//! - `auth` - mock login against the configured credentials
//! - `persistence` - the state record in the session

pub mod auth;
pub mod persistence;

pub use auth::{Authenticator, LoginError};
pub use persistence::PersistenceAdapter;
