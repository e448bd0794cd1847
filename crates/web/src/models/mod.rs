//! Types stored in the session and passed to templates.

pub mod session;
pub mod views;

pub use session::keys as session_keys;
pub use session::{Flash, FlashKind};
