//! In-flight guard serializing mutating operations.
//!
//! Mutating calls from different threads queue on a mutex and run one at a
//! time. A mutating call issued from the thread that already holds the
//! guard (typically from inside a backing-asset callback or an event
//! listener) is rejected instead of deadlocking.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use crate::error::TokenError;

#[derive(Default)]
pub struct ReentrancyGuard {
    turn: Mutex<()>,
    holder: Mutex<Option<ThreadId>>,
}

/// Proof that the current thread holds the guard. Releases on drop, on
/// every exit path.
pub struct Entered<'a> {
    guard: &'a ReentrancyGuard,
    _turn: MutexGuard<'a, ()>,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the guard, blocking while another thread holds it.
    pub fn enter(&self) -> Result<Entered<'_>, TokenError> {
        let me = thread::current().id();
        if *self.holder() == Some(me) {
            return Err(TokenError::ReentrancyDetected);
        }
        // A panic inside a guarded section cannot leave ledger state half
        // written, so a poisoned turn is safe to take over.
        let turn = self.turn.lock().unwrap_or_else(PoisonError::into_inner);
        *self.holder() = Some(me);
        Ok(Entered {
            guard: self,
            _turn: turn,
        })
    }

    /// True while any thread is inside a guarded operation.
    pub fn is_busy(&self) -> bool {
        self.holder().is_some()
    }

    fn holder(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        *self.guard.holder() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn nested_entry_on_same_thread_is_rejected() {
        let guard = ReentrancyGuard::new();
        let _outer = guard.enter().unwrap();
        assert!(guard.is_busy());
        assert!(matches!(guard.enter(), Err(TokenError::ReentrancyDetected)));
    }

    #[test]
    fn guard_released_on_drop() {
        let guard = ReentrancyGuard::new();
        {
            let _entered = guard.enter().unwrap();
        }
        assert!(!guard.is_busy());
        assert!(guard.enter().is_ok());
    }

    #[test]
    fn guard_released_on_error_path() {
        fn failing(guard: &ReentrancyGuard) -> Result<(), TokenError> {
            let _entered = guard.enter()?;
            Err(TokenError::ZeroAmount)
        }
        let guard = ReentrancyGuard::new();
        assert!(failing(&guard).is_err());
        assert!(!guard.is_busy());
    }

    #[test]
    fn threads_are_serialized_not_rejected() {
        let guard = Arc::new(ReentrancyGuard::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = Arc::clone(&guard);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let _entered = guard.enter().unwrap();
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        inside.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }
}
