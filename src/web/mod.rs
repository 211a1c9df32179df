//! HTTP API module for cloudstore.
//!
//! This module maps each request onto one file operation and translates
//! the outcome into a JSON body or a binary attachment.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
