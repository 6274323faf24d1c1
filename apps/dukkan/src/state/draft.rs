//! # Draft Invoice State
//!
//! The invoice currently being rung up. Nothing here is persisted until
//! `save_invoice` succeeds.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen Action          Command                 Draft Change            │
//! │  ─────────────          ───────                 ────────────            │
//! │  Scan / pick product ──► add_to_invoice() ─────► merge or push line     │
//! │  Remove line ──────────► remove_invoice_item() ► items.remove(i)        │
//! │  Cancel ───────────────► clear_invoice() ──────► items.clear()          │
//! │  Save ─────────────────► save_invoice() ───────► snapshot, persist,     │
//! │                                                  clear if unchanged     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use dukkan_core::invoice::InvoiceDraft;

#[derive(Debug, Clone, Default)]
pub struct DraftState {
    draft: Arc<Mutex<InvoiceDraft>>,
}

impl DraftState {
    pub fn new() -> Self {
        DraftState::default()
    }

    // A panic inside a closure leaves the draft as it was at the last
    // completed mutation, which is still a valid draft.
    fn lock(&self) -> MutexGuard<'_, InvoiceDraft> {
        self.draft.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs `f` with read access to the draft.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = draft_state.with_draft(|d| d.total());
    /// ```
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InvoiceDraft) -> R,
    {
        let draft = self.lock();
        f(&draft)
    }

    /// Runs `f` with write access to the draft.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InvoiceDraft) -> R,
    {
        let mut draft = self.lock();
        f(&mut draft)
    }

    /// Copy of the draft, so the lock is not held while saving.
    pub fn snapshot(&self) -> InvoiceDraft {
        self.with_draft(|d| d.clone())
    }

    /// Clears the draft only if it still equals `saved`.
    ///
    /// Lines added while a save was in flight stay on the draft.
    pub fn clear_if_unchanged(&self, saved: &InvoiceDraft) -> bool {
        self.with_draft_mut(|d| {
            if d == saved {
                d.clear();
                true
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dukkan_core::inventory::StockPolicy;
    use dukkan_core::{Money, Product};

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            barcode: format!("B-{}", id),
            name: format!("منتج {}", id),
            quantity: 10,
            price: Money::from_major(5),
            available: 10,
        }
    }

    #[test]
    fn test_clear_if_unchanged() {
        let state = DraftState::new();
        state
            .with_draft_mut(|d| d.add(&product("1"), 2, Money::from_major(5), StockPolicy::Strict))
            .unwrap();

        let saved = state.snapshot();
        assert!(state.clear_if_unchanged(&saved));
        assert!(state.with_draft(|d| d.is_empty()));
    }

    #[test]
    fn test_concurrent_edit_survives_save() {
        let state = DraftState::new();
        state
            .with_draft_mut(|d| d.add(&product("1"), 2, Money::from_major(5), StockPolicy::Strict))
            .unwrap();
        let saved = state.snapshot();

        state
            .with_draft_mut(|d| d.add(&product("2"), 1, Money::from_major(5), StockPolicy::Strict))
            .unwrap();

        assert!(!state.clear_if_unchanged(&saved));
        assert_eq!(state.with_draft(|d| d.len()), 2);
    }

    #[test]
    fn test_clones_share_the_draft() {
        let state = DraftState::new();
        let other = state.clone();
        other
            .with_draft_mut(|d| d.add(&product("1"), 1, Money::from_major(5), StockPolicy::Strict))
            .unwrap();
        assert_eq!(state.with_draft(|d| d.total()), Money::from_major(5));
    }
}
