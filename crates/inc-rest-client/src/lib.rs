//! REST API client for the Neural Compressor UX backend
//!
//! This crate provides the data-access facade used by front-ends of the
//! optimization service. Requests are returned as lazy [`PendingRequest`]s;
//! session state and notification channels live on the [`RestClient`].

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod presenter;
pub mod request;
pub mod session;

pub use auth::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use events::*;
pub use presenter::*;
pub use request::*;
pub use session::*;
