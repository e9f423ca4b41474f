//! View controllers.
//!
//! # Design
//! - Each controller renders a loading placeholder, fetches, then re-renders;
//!   the order is fixed and each step checks the navigation ticket first.
//! - Load failures freeze the placeholder and raise one blocking alert.
//! - Action failures only notify; the mounted view is left as it was.
//! - In-view actions arrive as `data-action` names plus attribute lookups and
//!   are parsed into [`ViewAction`] before anything runs.

pub mod home;
pub mod video;
pub mod videos;
pub mod word_list;

use crate::core::api::ApiClient;
use crate::core::mount::ViewTicket;
use crate::core::ports::{Clock, Downloads, Notifier, ViewSurface};
use crate::core::routes::{CacheBuster, Route};
use crate::core::session::SessionStore;
use crate::core::templates::TemplateCache;
use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;
pub use word_list::WordList;

/// Everything a controller needs to load, render, and notify.
#[derive(Clone)]
pub struct ViewContext {
    /// Authenticated API client.
    pub api: ApiClient,
    /// Compiled templates.
    pub templates: Rc<TemplateCache>,
    /// Mounted-view surface.
    pub surface: Rc<dyn ViewSurface>,
    /// Toasts and dialogs.
    pub notifier: Rc<dyn Notifier>,
    /// File downloads.
    pub downloads: Rc<dyn Downloads>,
    /// Session token store.
    pub session: Rc<dyn SessionStore>,
    /// Wall clock.
    pub clock: Rc<dyn Clock>,
    buster: Rc<CacheBuster>,
}

impl ViewContext {
    /// Bundle the controller dependencies.
    #[must_use]
    pub fn new(
        api: ApiClient,
        templates: Rc<TemplateCache>,
        surface: Rc<dyn ViewSurface>,
        notifier: Rc<dyn Notifier>,
        downloads: Rc<dyn Downloads>,
        session: Rc<dyn SessionStore>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            api,
            templates,
            surface,
            notifier,
            downloads,
            session,
            clock,
            buster: Rc::new(CacheBuster::default()),
        }
    }

    /// Fresh, strictly increasing cache-buster stamp.
    #[must_use]
    pub fn next_stamp(&self) -> i64 {
        self.buster.next(self.clock.now_ms())
    }

    /// Link to `route` that always triggers a fresh navigation.
    #[must_use]
    pub fn refresh_link(&self, route: &Route) -> String {
        format!("#{}", route.cache_busted(self.next_stamp()))
    }

    /// Render the ticket's view with `data` and mount it, unless the ticket
    /// went stale.
    pub fn mount<T: Serialize>(&self, ticket: &ViewTicket, data: &T) -> Mounted {
        if !ticket.is_current() {
            tracing::debug!(
                view = %ticket.view(),
                generation = ticket.generation(),
                "discarding render for superseded view"
            );
            return Mounted::Stale;
        }
        match self.templates.render(ticket.view(), data) {
            Ok(markup) => {
                self.surface.mount(ticket.view(), markup);
                Mounted::Shown
            }
            Err(err) => {
                tracing::error!(view = %ticket.view(), error = %err, "render failed");
                Mounted::Broken
            }
        }
    }

    /// Mount the loaded view; a render failure takes the load-failure path.
    pub fn settle<T: Serialize>(&self, ticket: &ViewTicket, data: &T, failure: &str) -> LoadOutcome {
        match self.mount(ticket, data) {
            Mounted::Shown => LoadOutcome::Loaded,
            Mounted::Stale => LoadOutcome::Superseded,
            Mounted::Broken => self.load_failed(ticket, failure),
        }
    }

    /// Alert `message` for a failed load and report the outcome.
    pub fn load_failed(&self, ticket: &ViewTicket, message: &str) -> LoadOutcome {
        self.alert_load_failure(ticket, message);
        if ticket.is_current() {
            LoadOutcome::Failed
        } else {
            LoadOutcome::Superseded
        }
    }

    /// Blocking alert for a failed load, suppressed when the view is gone.
    pub fn alert_load_failure(&self, ticket: &ViewTicket, message: &str) {
        if ticket.is_current() {
            self.notifier.alert(message);
        } else {
            tracing::debug!(view = %ticket.view(), "suppressing alert for superseded view");
        }
    }
}

/// Result of mounting rendered markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mounted {
    /// Markup is on screen.
    Shown,
    /// The ticket was superseded; nothing rendered.
    Stale,
    /// The template rejected the data.
    Broken,
}

/// Result of a navigation load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Final view mounted.
    Loaded,
    /// Fetch or render failed; placeholder stays mounted.
    Failed,
    /// A newer navigation took over; nothing applied.
    Superseded,
}

/// Result of an in-view action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Action succeeded without navigation.
    Completed,
    /// User declined the confirmation.
    Declined,
    /// Action failed and was reported.
    Failed,
    /// Action succeeded; `route` must be reloaded from scratch.
    Reload(Route),
}

/// Typed in-view actions.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewAction {
    /// Delete a video after confirmation.
    DeleteVideo {
        /// Video id.
        id: String,
    },
    /// Reprocess a video after confirmation.
    ReprocessVideo {
        /// Video id.
        id: String,
    },
    /// Replace a video's captions.
    SaveCaptions {
        /// Video id.
        id: String,
        /// Edited caption payload.
        captions: Value,
    },
    /// Download a video's captions as WebVTT.
    DownloadCaptions {
        /// Video id.
        id: String,
        /// Display name used for the file.
        name: String,
    },
    /// Replace a word list with the lines of `text`.
    SaveWords {
        /// Target list.
        list: WordList,
        /// Raw multi-line input.
        text: String,
    },
}

/// Attribute naming the video id on an action element.
pub const ATTR_VIDEO_ID: &str = "video-id";
/// Attribute naming the video display name on an action element.
pub const ATTR_VIDEO_NAME: &str = "video-name";
/// Pseudo-attribute for the value of the element named by `data-source`.
pub const ATTR_SOURCE_VALUE: &str = "source-value";

impl ViewAction {
    /// Parse a `data-action` name; `attr` resolves the element's data attributes.
    #[must_use]
    pub fn from_markup(action: &str, attr: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let id = || attr(ATTR_VIDEO_ID).filter(|id| !id.trim().is_empty());
        match action {
            "delete-video" => Some(Self::DeleteVideo { id: id()? }),
            "reprocess-video" => Some(Self::ReprocessVideo { id: id()? }),
            "save-captions" => Some(Self::SaveCaptions {
                id: id()?,
                captions: parse_captions(&attr(ATTR_SOURCE_VALUE)?),
            }),
            "download-captions" => {
                let id = id()?;
                let name = attr(ATTR_VIDEO_NAME)
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| id.clone());
                Some(Self::DownloadCaptions { id, name })
            }
            "save-tweaks" => Some(Self::SaveWords {
                list: WordList::Tweaks,
                text: attr(ATTR_SOURCE_VALUE)?,
            }),
            "save-vocabulary" => Some(Self::SaveWords {
                list: WordList::Vocabulary,
                text: attr(ATTR_SOURCE_VALUE)?,
            }),
            _ => None,
        }
    }
}

/// Edited captions are submitted as JSON when they parse, as text otherwise.
fn parse_captions(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
