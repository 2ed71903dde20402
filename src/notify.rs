//! Change notification for collection views.
//!
//! Mutating collection operations call every registered
//! [`CollectionListener`]; views that need to refetch hold a listener of
//! their own (typically a [`RefreshSignal`]) and hand a clone to the
//! builder. There is no process-wide flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What happened to a user's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    Added,
    QuantityChanged,
    Removed,
}

pub trait CollectionListener: Send + Sync {
    fn collection_changed(&self, user_id: &str, change: CollectionChange);
}

/// Take-and-reset refresh flag. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RefreshSignal(Arc<AtomicBool>);

impl RefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Returns whether a refresh was pending and clears it.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl CollectionListener for RefreshSignal {
    fn collection_changed(&self, _user_id: &str, _change: CollectionChange) {
        self.0.store(true, Ordering::Release);
    }
}
