//! Data layer for a Spotify Web API client.
//!
//! - `auth`: token providers and the persisted login session
//! - `repo`: one repository per resource family over a shared HTTP transport
//! - `model`: ids, wire shapes, UI-facing models and the mapping between them
//! - `state`: observable per-screen state built on top of the repositories

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod state;

pub use error::{ApiError, Result};
