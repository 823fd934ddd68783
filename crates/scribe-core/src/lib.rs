//! Core library for scribe, a terminal client for the articles service.
//!
//! This crate contains everything that is independent of the terminal UI:
//! the REST API client, the authentication session model, the domain
//! models, and application configuration.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
