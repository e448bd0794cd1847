//! HTTP middleware and extractors.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. Panic catcher (render the 500 page)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//! 5. Session layer (tower-sessions, memory or `SQLite` store)
//!
//! Handlers then extract a [`StateHandle`] or one of the guards built on it.

pub mod auth;
pub mod flash;
pub mod request_id;
pub mod session;
pub mod state;

pub use auth::{Authenticated, GuardRejection, InOnboarding, Onboarded};
pub use flash::{Flashes, push_flash};
pub use request_id::{RequestId, request_id_middleware};
pub use session::{connect_sqlite_store, create_session_layer};
pub use state::StateHandle;
