//! Keystroke debouncing for interactive search

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::ports::Clock;

/// A search request ready to be issued, tagged with its sequence number.
///
/// An empty keyword means "reset to the unfiltered list".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDispatch {
    pub seq: u64,
    pub keyword: String,
}

struct PendingQuery {
    keyword: String,
    deadline: Instant,
}

/// Serializes rapid keystrokes into at most one search per quiet period.
///
/// Explicit state machine instead of timers: the owner calls
/// [`submit`](Self::submit) on every keystroke and [`poll`](Self::poll) from
/// its event loop. Responses must pass [`is_current`](Self::is_current)
/// before being applied; a response carrying a superseded sequence number is
/// stale and must be dropped. In-flight requests are never cancelled, only
/// ignored on arrival.
pub struct SearchDebouncer {
    clock: Arc<dyn Clock>,
    quiet_period: Duration,
    pending: Option<PendingQuery>,
    issued: u64,
}

impl SearchDebouncer {
    pub fn new(quiet_period: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            quiet_period,
            pending: None,
            issued: 0,
        }
    }

    /// Record a keystroke.
    ///
    /// A non-empty keyword (re)schedules the pending dispatch for one quiet
    /// period from now, superseding any earlier pending keyword. An empty
    /// keyword bypasses debouncing entirely and is dispatched immediately.
    pub fn submit(&mut self, keyword: &str) -> Option<SearchDispatch> {
        if keyword.is_empty() {
            self.pending = None;
            return Some(self.issue(String::new()));
        }
        self.pending = Some(PendingQuery {
            keyword: keyword.to_string(),
            deadline: self.clock.now() + self.quiet_period,
        });
        None
    }

    /// Issue the pending dispatch once its quiet period has elapsed
    pub fn poll(&mut self) -> Option<SearchDispatch> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| self.clock.now() >= p.deadline);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        Some(self.issue(pending.keyword))
    }

    /// Drop the pending dispatch (component teardown). Requests already in
    /// flight still resolve and remain subject to the staleness check.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// True iff `seq` is the most recently issued sequence number.
    /// Responses failing this check are stale and must be discarded.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.issued
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn issue(&mut self, keyword: String) -> SearchDispatch {
        self.issued += 1;
        tracing::debug!("Dispatching search #{} for \"{}\"", self.issued, keyword);
        SearchDispatch {
            seq: self.issued,
            keyword,
        }
    }
}
