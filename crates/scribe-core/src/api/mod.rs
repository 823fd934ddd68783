//! REST API client module for the articles service.
//!
//! This module provides the `ApiClient` for authenticating and for the
//! CRUD operations on the articles collection.
//!
//! The API uses an opaque token carried in the `Authorization` header,
//! obtained through the login endpoint.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{unauthorized, ApiError};
