//! Data models for the Biblion client core

pub mod book;
pub mod context;
pub mod entity;
pub mod selection;

// Re-export commonly used types
pub use book::{Book, LoanLineItem};
pub use context::FetchContext;
pub use entity::{Entity, GroupCode};
pub use selection::{Hierarchy, SelectionPath, SelectionSnapshot};
