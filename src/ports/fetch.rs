//! Entity list fetch port

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Entity, FetchContext};

/// Transient failure while loading a list.
///
/// Never crosses the service boundary: the paging layer converts it into
/// `has_more = false` plus a [`crate::error::Signal::FetchFailed`]
/// notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("server failure: {0}")]
    Server(String),
}

/// Pageable source of entities for one filter context.
///
/// Implemented by the shell over its REST client. Each picker gets its own
/// implementation (organizational units, readers, book catalog); the
/// contexts describe the scope, the port decides what endpoint that maps to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityFetchPort: Send + Sync {
    /// Fetch `take` records starting at `skip` within `context`.
    ///
    /// A short or empty batch means the source is exhausted. Timeout policy
    /// belongs to the implementation, not the core.
    async fn fetch_page(
        &self,
        context: &FetchContext,
        skip: usize,
        take: usize,
    ) -> Result<Vec<Entity>, FetchError>;
}
