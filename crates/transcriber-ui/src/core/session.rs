//! Session credential primitives.
//!
//! # Design
//! - The session is a single optional API key; absence means anonymous browsing.
//! - Readers poll the store on every request instead of subscribing to changes.
//! - Presence does not imply validity; the backend rejects bad keys lazily.

use std::cell::RefCell;
use std::rc::Rc;

/// Storage seam for the session token.
///
/// The browser implementation persists to `LocalStorage`; [`MemorySession`]
/// backs native tests.
pub trait SessionStore {
    /// Current token, if any.
    fn get(&self) -> Option<String>;
    /// Replace the stored token.
    fn set(&self, token: &str);
    /// Forget the stored token.
    fn clear(&self);

    /// Whether a token is currently stored.
    fn is_active(&self) -> bool {
        self.get().is_some()
    }
}

/// Trim a raw token, treating blank input as no token at all.
#[must_use]
pub fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// In-memory session store.
#[derive(Clone, Debug, Default)]
pub struct MemorySession {
    token: Rc<RefCell<Option<String>>>,
}

impl MemorySession {
    /// Create a store pre-populated with `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let session = Self::default();
        session.set(token);
        session
    }
}

impl SessionStore for MemorySession {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}
