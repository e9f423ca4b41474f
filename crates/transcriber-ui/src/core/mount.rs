//! Currently mounted view and per-navigation tickets.
//!
//! # Design
//! - Every navigation mounts a new generation; the ticket it receives goes
//!   stale as soon as another navigation starts.
//! - Async work checks its ticket before touching the surface, so a late
//!   response for a superseded view is dropped instead of applied.

use crate::core::templates::ViewName;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Slot {
    generation: Cell<u64>,
    view: Cell<Option<ViewName>>,
}

/// Tracks which view generation is mounted.
#[derive(Clone, Debug, Default)]
pub struct MountTracker {
    slot: Rc<Slot>,
}

impl MountTracker {
    /// Start a new generation for `view`, invalidating every earlier ticket.
    #[must_use]
    pub fn begin(&self, view: ViewName) -> ViewTicket {
        let generation = self.slot.generation.get().wrapping_add(1);
        self.slot.generation.set(generation);
        self.slot.view.set(Some(view));
        ViewTicket {
            generation,
            view,
            slot: Rc::clone(&self.slot),
        }
    }

    /// Ticket for the view mounted right now, used by in-view actions.
    #[must_use]
    pub fn current(&self) -> Option<ViewTicket> {
        self.slot.view.get().map(|view| ViewTicket {
            generation: self.slot.generation.get(),
            view,
            slot: Rc::clone(&self.slot),
        })
    }

    /// View mounted right now.
    #[must_use]
    pub fn mounted_view(&self) -> Option<ViewName> {
        self.slot.view.get()
    }
}

/// Proof that a particular view generation is (or was) mounted.
#[derive(Clone, Debug)]
pub struct ViewTicket {
    generation: u64,
    view: ViewName,
    slot: Rc<Slot>,
}

impl ViewTicket {
    /// Whether no navigation has happened since the ticket was issued.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.slot.generation.get() == self.generation
    }

    /// View the ticket was issued for.
    #[must_use]
    pub const fn view(&self) -> ViewName {
        self.view
    }

    /// Generation number, for diagnostics.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_navigation_invalidates_older_tickets() {
        let tracker = MountTracker::default();
        let first = tracker.begin(ViewName::Videos);
        assert!(first.is_current());
        let second = tracker.begin(ViewName::Videos);
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn current_ticket_follows_the_mounted_view() {
        let tracker = MountTracker::default();
        assert!(tracker.current().is_none());
        let _ticket = tracker.begin(ViewName::Tweaks);
        let action = tracker.current();
        assert_eq!(action.as_ref().map(ViewTicket::view), Some(ViewName::Tweaks));
        assert!(action.as_ref().is_some_and(ViewTicket::is_current));
        let _next = tracker.begin(ViewName::Home);
        assert!(action.is_some_and(|ticket| !ticket.is_current()));
        assert_eq!(tracker.mounted_view(), Some(ViewName::Home));
    }
}
