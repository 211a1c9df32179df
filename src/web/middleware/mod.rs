//! Middleware for the HTTP API.

pub mod cors;
pub mod payload;

pub use cors::create_cors_layer;
pub use payload::json_payload_too_large;
