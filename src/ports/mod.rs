//! Boundary ports to the surrounding application shell
//!
//! The core owns no HTTP client, storage, or rendering. Everything it needs
//! from the outside world comes through the traits in this module; the shell
//! supplies the implementations at construction time.

pub mod clock;
pub mod fetch;
pub mod notify;
pub mod persistence;

pub use clock::{Clock, SystemClock};
pub use fetch::{EntityFetchPort, FetchError};
pub use notify::NotificationPort;
pub use persistence::{SelectionMemory, SelectionPersistencePort};
