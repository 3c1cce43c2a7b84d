//! Loan composition: multi-select with per-book quantities under a cap

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    error::{CoreError, CoreResult, Signal},
    models::{Book, LoanLineItem},
    ports::NotificationPort,
};

/// Outcome of toggling a book in the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The book was added with the given starting quantity
    Added(u32),
    /// The book was already selected and has been removed
    Removed,
    /// The composition is at capacity; nothing was added
    Rejected,
}

/// Aggregates the books selected for one borrow transaction.
///
/// The cap is the reader's remaining borrowable count, supplied by the
/// caller. Invariant after every operation: the requested quantities sum to
/// at most the cap. All quantity math is integer and saturating.
pub struct LoanComposer {
    notifier: Arc<dyn NotificationPort>,
    cap: u32,
    line_items: IndexMap<i64, LoanLineItem>,
}

impl LoanComposer {
    pub fn new(cap: u32, notifier: Arc<dyn NotificationPort>) -> Self {
        Self {
            notifier,
            cap,
            line_items: IndexMap::new(),
        }
    }

    /// Toggle a book in or out of the selection.
    ///
    /// Adding starts the line at quantity 1 when a copy is available and the
    /// cap has room. A book without available copies, or any add while the
    /// cap is zero, stays visible at quantity 0 (`QuantityClampedToZero`).
    /// Once a non-zero cap is fully consumed, further adds are rejected
    /// outright (`CapacityExceeded`) so the operator gets a blocking
    /// message.
    pub fn toggle_select(&mut self, book: &Book) -> ToggleOutcome {
        if self.line_items.shift_remove(&book.id).is_some() {
            tracing::debug!("Book {} removed from composition", book.id);
            return ToggleOutcome::Removed;
        }

        if self.cap > 0 && self.total_requested() + 1 > self.cap {
            tracing::debug!("Book {} rejected, composition at cap {}", book.id, self.cap);
            self.notifier.notify(&Signal::CapacityExceeded { cap: self.cap });
            return ToggleOutcome::Rejected;
        }

        let quantity = if book.available_quantity == 0 || self.cap == 0 {
            self.notifier
                .notify(&Signal::QuantityClampedToZero { book_id: book.id });
            0
        } else {
            1
        };

        self.line_items
            .insert(book.id, LoanLineItem::from_book(book, quantity));
        ToggleOutcome::Added(quantity)
    }

    /// Set the requested quantity for a selected book.
    ///
    /// The value is clamped to the available copies, then to the capacity
    /// left by the other line items (signalling `CapacityExceeded` when the
    /// cap bites). Returns the value actually written.
    pub fn set_quantity(&mut self, book_id: i64, requested: u32) -> CoreResult<u32> {
        let others: u32 = self
            .line_items
            .iter()
            .filter(|(id, _)| **id != book_id)
            .map(|(_, item)| item.requested_quantity)
            .sum();
        let item = self
            .line_items
            .get_mut(&book_id)
            .ok_or(CoreError::NoSuchSelection(book_id))?;

        let mut value = requested.min(item.available_quantity);
        let allowance = self.cap.saturating_sub(others);
        if value > allowance {
            value = allowance;
            self.notifier.notify(&Signal::CapacityExceeded { cap: self.cap });
        }
        item.requested_quantity = value;
        Ok(value)
    }

    /// Produce the line items to submit: every selection with a non-zero
    /// quantity.
    pub fn finalize(&self) -> CoreResult<Vec<LoanLineItem>> {
        let picked: Vec<LoanLineItem> = self
            .line_items
            .values()
            .filter(|item| item.requested_quantity > 0)
            .cloned()
            .collect();
        if picked.is_empty() {
            return Err(CoreError::NothingSelected);
        }
        let requested: u32 = picked.iter().map(|item| item.requested_quantity).sum();
        if requested > self.cap {
            // Unreachable while the per-operation invariant holds
            return Err(CoreError::CapacityExceeded {
                requested,
                cap: self.cap,
            });
        }
        Ok(picked)
    }

    /// Zero every quantity but keep the selection set, so a cancelled
    /// dialog reopens with the same checklist.
    pub fn reset_quantities(&mut self) {
        for item in self.line_items.values_mut() {
            item.requested_quantity = 0;
        }
    }

    /// Adjust the cap (the operator switched reader). Quantities re-clamp
    /// in selection order; a `CapacityExceeded` signal is raised if any
    /// line had to shrink.
    pub fn set_cap(&mut self, cap: u32) {
        self.cap = cap;
        let mut remaining = cap;
        let mut clamped = false;
        for item in self.line_items.values_mut() {
            let keep = item.requested_quantity.min(remaining);
            if keep != item.requested_quantity {
                clamped = true;
            }
            item.requested_quantity = keep;
            remaining -= keep;
        }
        if clamped {
            self.notifier.notify(&Signal::CapacityExceeded { cap });
        }
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    pub fn total_requested(&self) -> u32 {
        self.line_items
            .values()
            .map(|item| item.requested_quantity)
            .sum()
    }

    pub fn is_selected(&self, book_id: i64) -> bool {
        self.line_items.contains_key(&book_id)
    }

    pub fn line_items(&self) -> impl Iterator<Item = &LoanLineItem> {
        self.line_items.values()
    }

    pub fn len(&self) -> usize {
        self.line_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}
