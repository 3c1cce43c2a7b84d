//! Client-side state services

pub mod composer;
pub mod paging;
pub mod search;
pub mod selection;

use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::ClientConfig,
    models::Hierarchy,
    ports::{Clock, EntityFetchPort, NotificationPort},
};

pub use composer::{LoanComposer, ToggleOutcome};
pub use paging::PagedListCache;
pub use search::{SearchDebouncer, SearchDispatch};
pub use selection::CascadingSelectionController;

/// One cascading-selector workflow: hierarchy selection plus debounced
/// keyword search over its leaf list.
pub struct Picker {
    pub selection: CascadingSelectionController,
    pub debouncer: SearchDebouncer,
}

impl Picker {
    pub fn new(selection: CascadingSelectionController, debouncer: SearchDebouncer) -> Self {
        Self {
            selection,
            debouncer,
        }
    }

    /// Feed one keystroke of the search box. An empty box searches (resets)
    /// immediately; anything else waits out the quiet period.
    pub async fn submit_keystroke(&mut self, keyword: &str) {
        if let Some(dispatch) = self.debouncer.submit(keyword) {
            self.selection.search_divisions(&dispatch.keyword).await;
        }
    }

    /// Run the pending search if its quiet period has elapsed. Intended to
    /// be called from the shell's event loop; returns whether a search ran.
    pub async fn poll_search(&mut self) -> bool {
        match self.debouncer.poll() {
            Some(dispatch) => {
                self.selection.search_divisions(&dispatch.keyword).await;
                true
            }
            None => false,
        }
    }
}

/// Container for the three picker workflows and the composer factory
pub struct Services {
    pub units: Picker,
    pub readers: Picker,
    pub books: Picker,
    notifier: Arc<dyn NotificationPort>,
    default_cap: u32,
}

impl Services {
    /// Wire all pickers from configuration and the shell's port
    /// implementations. Each picker gets its own fetch port (organizational
    /// units, readers scoped by school, the book catalog) but they share the
    /// notification channel and clock.
    pub fn new(
        config: &ClientConfig,
        hierarchy: Hierarchy,
        units_fetch: Arc<dyn EntityFetchPort>,
        readers_fetch: Arc<dyn EntityFetchPort>,
        books_fetch: Arc<dyn EntityFetchPort>,
        notifier: Arc<dyn NotificationPort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let quiet_period = Duration::from_millis(config.search.debounce_ms);
        let picker = |fetch: Arc<dyn EntityFetchPort>| {
            Picker::new(
                CascadingSelectionController::new(
                    hierarchy,
                    fetch,
                    notifier.clone(),
                    &config.paging,
                ),
                SearchDebouncer::new(quiet_period, clock.clone()),
            )
        };
        let units = picker(units_fetch);
        let readers = picker(readers_fetch);
        let books = picker(books_fetch);
        Self {
            units,
            readers,
            books,
            notifier,
            default_cap: config.borrowing.default_cap,
        }
    }

    /// Start a loan composition for a reader with `cap` borrows remaining.
    /// Falls back to the configured default cap when the caller has none.
    pub fn composer(&self, cap: Option<u32>) -> LoanComposer {
        LoanComposer::new(cap.unwrap_or(self.default_cap), self.notifier.clone())
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared fakes for the service unit tests

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use async_trait::async_trait;

    use crate::error::{Signal, SignalCode};
    use crate::models::{Entity, FetchContext, GroupCode};
    use crate::ports::{Clock, EntityFetchPort, FetchError, NotificationPort};

    pub fn division(id: i64, name: &str) -> Entity {
        Entity::new(id, name, GroupCode::Division)
    }

    /// Collects emitted signals for assertions
    #[derive(Default)]
    pub struct RecordingNotifier {
        signals: Mutex<Vec<Signal>>,
    }

    impl RecordingNotifier {
        pub fn codes(&self) -> Vec<SignalCode> {
            self.signals.lock().unwrap().iter().map(|s| s.code()).collect()
        }
    }

    impl NotificationPort for RecordingNotifier {
        fn notify(&self, signal: &Signal) {
            self.signals.lock().unwrap().push(signal.clone());
        }
    }

    /// Serves queued pages in order, recording every call
    #[derive(Default)]
    pub struct StubFetch {
        pages: Mutex<VecDeque<Result<Vec<Entity>, FetchError>>>,
        calls: Mutex<Vec<(FetchContext, usize, usize)>>,
    }

    impl StubFetch {
        pub fn push_page(&self, page: Vec<Entity>) {
            self.pages.lock().unwrap().push_back(Ok(page));
        }

        pub fn push_error(&self, message: &str) {
            self.pages
                .lock()
                .unwrap()
                .push_back(Err(FetchError::Transport(message.to_string())));
        }

        pub fn calls(&self) -> Vec<(FetchContext, usize, usize)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EntityFetchPort for StubFetch {
        async fn fetch_page(
            &self,
            context: &FetchContext,
            skip: usize,
            take: usize,
        ) -> Result<Vec<Entity>, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((context.clone(), skip, take));
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    /// Hand-cranked clock for debounce tests
    pub struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }
}
