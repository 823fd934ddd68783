//! Authentication module for managing the session credential.
//!
//! This module provides:
//! - `TokenStore`: the persistent credential storage abstraction, with a
//!   file-backed implementation and an in-memory one for tests
//! - `Session`: the explicit session context owning the store
//!
//! The token survives process restarts and is cleared on logout or when the
//! service answers an authenticated request with 401.

pub mod session;
pub mod store;

pub use session::Session;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
