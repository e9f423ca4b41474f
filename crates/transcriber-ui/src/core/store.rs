//! App-wide yewdux store.
//!
//! # Design
//! - The console writes through the surface seams; components only select.
//! - Mounting bumps an epoch so the view host re-applies markup even when the
//!   same view renders identical text twice.
//! - Toasts are capped so a burst of failures cannot flood the screen.

use crate::core::nav::{LoginAffordance, NavModel};
use crate::core::polling::Readiness;
use crate::core::templates::ViewName;
use yewdux::store::Store;

/// Most toasts kept on screen at once.
pub const MAX_TOASTS: usize = 4;
/// Milliseconds before a toast dismisses itself.
pub const TOAST_TIMEOUT_MS: u32 = 4_000;

/// Severity of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Action succeeded.
    Success,
    /// Action failed.
    Error,
}

impl ToastKind {
    /// CSS class for the toast.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic identifier.
    pub id: u64,
    /// Display text.
    pub message: String,
    /// Severity.
    pub kind: ToastKind,
}

/// Markup of the mounted view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountedView {
    /// View the markup belongs to.
    pub view: ViewName,
    /// Rendered template output.
    pub markup: String,
    /// Mount counter.
    pub epoch: u64,
}

/// Shared shell state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct ShellStore {
    /// Mounted view, absent until the first navigation renders.
    pub view: Option<MountedView>,
    /// Navigation bar.
    pub nav: NavModel,
    /// Login/logout control.
    pub login: LoginAffordance,
    /// Bumped to reset the API key input.
    pub login_epoch: u64,
    /// Vocabulary readiness, reset on every mount.
    pub readiness: Option<Readiness>,
    /// Visible toasts, oldest first.
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl ShellStore {
    /// Swap in new view markup.
    pub fn mount(&mut self, view: ViewName, markup: String) {
        let epoch = self.view.as_ref().map_or(1, |mounted| mounted.epoch + 1);
        self.view = Some(MountedView {
            view,
            markup,
            epoch,
        });
        self.readiness = None;
    }

    /// Queue a toast, dropping the oldest beyond [`MAX_TOASTS`].
    pub fn push_toast(&mut self, kind: ToastKind, message: &str) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast {
            id,
            message: message.to_string(),
            kind,
        });
        if self.toasts.len() > MAX_TOASTS {
            let drain = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(0..drain);
        }
        id
    }

    /// Remove toast `id` if still shown.
    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Reset the API key input.
    pub fn clear_login_input(&mut self) {
        self.login_epoch += 1;
    }
}
