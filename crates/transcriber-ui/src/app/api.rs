//! Console context shared with components.
//!
//! # Design
//! - Exactly one console per app boot; components receive it through props.
//! - Equality is identity so re-renders never rebuild it.

use crate::core::console::Console;
use std::rc::Rc;

/// Shared console handle for UI components.
#[derive(Clone)]
pub(crate) struct ConsoleCtx {
    /// Singleton console instance.
    pub(crate) console: Rc<Console>,
}

impl ConsoleCtx {
    pub(crate) fn new(console: Rc<Console>) -> Self {
        Self { console }
    }
}

impl PartialEq for ConsoleCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.console, &other.console)
    }
}
