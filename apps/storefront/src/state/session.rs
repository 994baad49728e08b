//! # Session Handle
//!
//! Shared ownership of the session state.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. The dispatcher and the view builders both need access
//! 2. Only one event may mutate the session at a time
//! 3. Prank timer tasks run on other runtime workers
//!
//! Every user event locks, mutates, and unlocks before the next event is
//! processed, which is what makes the purchase transaction atomic without
//! any further machinery.
//!
//! ## Why Not RwLock?
//! Session operations are quick and most of them write. A RwLock would add
//! complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use magnate_core::SessionState;

/// Cloneable handle to the single session of this process.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<SessionState>>,
}

impl SessionHandle {
    /// Creates a handle around a fresh, empty session.
    pub fn new() -> Self {
        SessionHandle {
            inner: Arc::new(Mutex::new(SessionState::new())),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let balance = handle.with_session(|s| s.balance());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        let session = self.inner.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// handle.with_session_mut(|s| s.select_persona(&catalog, "musk"))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let mut session = self.inner.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magnate_core::Currency;

    #[test]
    fn test_clones_share_state() {
        let handle = SessionHandle::new();
        let other = handle.clone();

        handle.with_session_mut(|s| s.change_currency(Currency::Uzs));
        assert_eq!(other.with_session(|s| s.currency()), Currency::Uzs);
    }
}
