//! Neural Compressor UX REST API contract types and validation
//!
//! This crate defines the request shapes sent to the optimization-management
//! backend. Response bodies are owned by the server and are handled as
//! untyped JSON by the client.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
