//! Biblion Library Management Client Core
//!
//! State machines behind the Biblion staff client: paginated/searchable
//! entity pickers over the school hierarchy, and loan composition with a
//! per-reader borrowing cap. The surrounding shell owns HTTP, storage, and
//! rendering; it reaches this core through the port traits in [`ports`].

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use config::ClientConfig;
pub use error::{CoreError, CoreResult, Severity, Signal, SignalCode};
