//! Single-flight session slot.
//!
//! At most one question is in flight at a time. The slot hands out a
//! [`SessionGuard`] on acquire; dropping the guard releases the slot and
//! clears the active cancellation token, so no exit path (success, error,
//! panic unwind) can leave the assistant stuck in the busy state.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

/// Shared slot tracking the (at most one) in-flight question.
#[derive(Debug, Default)]
pub struct SessionSlot {
    busy: AtomicBool,
    current: Mutex<Option<CancellationToken>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to claim the slot. Returns `None` if a question is already
    /// in flight; the caller should reject the new submission.
    pub fn acquire(&self) -> Option<SessionGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        let token = CancellationToken::new();
        *self.current.lock().expect("session slot poisoned") = Some(token.clone());
        Some(SessionGuard { slot: self, token })
    }

    /// Cancel the active question, if any. Safe to call when idle.
    pub fn cancel_active(&self) {
        if let Some(token) = self
            .current
            .lock()
            .expect("session slot poisoned")
            .as_ref()
        {
            token.cancel();
        }
    }

    /// Whether a question is currently being processed.
    pub fn is_processing(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Exclusive claim on the session slot for one question.
///
/// Holds the cancellation token for the question; the slot is released and
/// the token cleared on drop.
#[derive(Debug)]
pub struct SessionGuard<'a> {
    slot: &'a SessionSlot,
    token: CancellationToken,
}

impl SessionGuard<'_> {
    /// The cancellation token observed by every stage of this question.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        self.slot
            .current
            .lock()
            .expect("session slot poisoned")
            .take();
        self.slot.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_is_exclusive_until_drop() {
        let slot = SessionSlot::new();
        assert!(!slot.is_processing());

        let guard = slot.acquire().unwrap();
        assert!(slot.is_processing());
        assert!(slot.acquire().is_none());

        drop(guard);
        assert!(!slot.is_processing());
        assert!(slot.acquire().is_some());
    }

    #[test]
    fn cancel_active_fires_only_the_held_token() {
        let slot = SessionSlot::new();
        let guard = slot.acquire().unwrap();
        assert!(!guard.token().is_cancelled());

        slot.cancel_active();
        assert!(guard.token().is_cancelled());

        drop(guard);
        // A fresh acquire gets a fresh token.
        let next = slot.acquire().unwrap();
        assert!(!next.token().is_cancelled());
    }

    #[test]
    fn cancel_when_idle_is_a_no_op() {
        let slot = SessionSlot::new();
        slot.cancel_active();
        assert!(!slot.is_processing());
    }
}
