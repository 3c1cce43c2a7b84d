//! Growable paged result window for one filter context

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    error::Signal,
    models::{Entity, FetchContext},
    ports::{EntityFetchPort, NotificationPort},
};

/// Incrementally loaded list of entities, unique by id, in fetch order.
///
/// One instance serves one filter context at a time. Plain loads append;
/// a fresh search keyword replaces the window wholesale. Fetch failures are
/// absorbed: the window keeps its items, stops paginating, and reports the
/// failure through the notification port.
///
/// Callers must not overlap `load_page`/`search` calls on the same instance;
/// the cache assumes single-flight usage per context and implements no
/// mutual exclusion of its own.
pub struct PagedListCache {
    fetcher: Arc<dyn EntityFetchPort>,
    notifier: Arc<dyn NotificationPort>,
    page_size: usize,
    context: Option<FetchContext>,
    items: IndexMap<i64, Entity>,
    cursor: usize,
    has_more: bool,
    search_mode: bool,
    keyword: String,
}

impl PagedListCache {
    /// Create an idle cache; nothing loads until [`reset`](Self::reset)
    /// arms it with a context.
    pub fn new(
        fetcher: Arc<dyn EntityFetchPort>,
        notifier: Arc<dyn NotificationPort>,
        page_size: usize,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            page_size,
            context: None,
            items: IndexMap::new(),
            cursor: 0,
            has_more: false,
            search_mode: false,
            keyword: String::new(),
        }
    }

    /// Drop all state and disarm the cache. Used when the owning selector
    /// loses its ancestor scope entirely.
    pub fn clear(&mut self) {
        self.context = None;
        self.items.clear();
        self.cursor = 0;
        self.has_more = false;
        self.search_mode = false;
        self.keyword.clear();
    }

    /// Point the cache at a new filter context, dropping all cached items
    pub fn reset(&mut self, context: FetchContext) {
        self.context = Some(context);
        self.items.clear();
        self.cursor = 0;
        self.has_more = true;
        self.search_mode = false;
        self.keyword.clear();
    }

    /// Load the next page for the current context.
    ///
    /// Outside search mode the batch is appended (deduplicated by id, the
    /// fresh record wins) and the cursor advances by the returned count. In
    /// search mode the active keyword is re-issued at the end of the window
    /// and the cursor is untouched. Errors never propagate: they flip
    /// `has_more` off and emit a `FetchFailed` signal.
    pub async fn load_page(&mut self) {
        let Some(base) = self.context.clone() else {
            return;
        };

        let (context, skip) = if self.search_mode {
            match base.with_keyword(&self.keyword) {
                Some(search) => (search, self.items.len()),
                None => (base, self.cursor),
            }
        } else {
            (base, self.cursor)
        };

        match self.fetcher.fetch_page(&context, skip, self.page_size).await {
            Ok(batch) => {
                let returned = batch.len();
                if returned == 0 {
                    self.has_more = false;
                    return;
                }
                for entity in batch {
                    self.items.insert(entity.id, entity);
                }
                if !self.search_mode {
                    self.cursor += returned;
                }
                self.has_more = returned == self.page_size;
                tracing::debug!(
                    "Loaded {} records for {} (window now {})",
                    returned,
                    context,
                    self.items.len()
                );
            }
            Err(err) => {
                tracing::warn!("Fetch failed for {}: {}", context, err);
                self.has_more = false;
                self.notifier.notify(&Signal::FetchFailed {
                    context: context.to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    /// Run a keyword search within the current context.
    ///
    /// An empty keyword is a reset back to the unfiltered list. A non-empty
    /// keyword replaces the window wholesale with the first result page and
    /// stops pagination; on failure the window is left as it was.
    pub async fn search(&mut self, keyword: &str) {
        let Some(base) = self.context.clone() else {
            return;
        };

        if keyword.is_empty() {
            self.reset(base);
            self.load_page().await;
            return;
        }

        let Some(context) = base.with_keyword(keyword) else {
            tracing::warn!("Search requested on unsearchable context {}", base);
            return;
        };

        self.search_mode = true;
        self.keyword = keyword.to_string();
        self.cursor = 0;

        match self.fetcher.fetch_page(&context, 0, self.page_size).await {
            Ok(batch) => {
                tracing::debug!("Search {} returned {} records", context, batch.len());
                self.items = batch.into_iter().map(|e| (e.id, e)).collect();
                self.has_more = false;
            }
            Err(err) => {
                tracing::warn!("Search failed for {}: {}", context, err);
                self.has_more = false;
                self.notifier.notify(&Signal::FetchFailed {
                    context: context.to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    /// Merge externally selected entities into the window so they stay
    /// visible regardless of the pagination window. Entities already fetched
    /// win; the merge is idempotent.
    pub fn reconcile_preselected(&mut self, preselected: &[Entity]) {
        for entity in preselected {
            if !self.items.contains_key(&entity.id) {
                self.items.insert(entity.id, entity.clone());
            }
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &Entity> {
        self.items.values()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_search_mode(&self) -> bool {
        self.search_mode
    }

    pub fn context(&self) -> Option<&FetchContext> {
        self.context.as_ref()
    }
}
