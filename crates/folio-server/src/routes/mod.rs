//! Route handlers for the HTTP API.

pub mod content;
pub mod health;
