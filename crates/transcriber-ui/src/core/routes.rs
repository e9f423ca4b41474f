//! Hash-fragment routing.
//!
//! # Design
//! - Routes are a closed enum; the ordered pattern table only constructs
//!   variants, and the console matches on them exhaustively.
//! - Patterns are literals or a literal prefix plus one positional capture
//!   (`video/{id}`); the first registered match wins.
//! - Query strings (the `t` cache buster) never take part in matching.

use crate::core::nav::NavLink;
use crate::core::templates::ViewName;
use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;
use thiserror::Error;

/// Client routes served by the console.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page (empty fragment).
    Home,
    /// Video list.
    Videos,
    /// Video detail for one id.
    VideoDetail {
        /// Backend video identifier.
        id: String,
    },
    /// Tweaks editor.
    Tweaks,
    /// Vocabulary editor.
    Vocabulary,
}

impl Route {
    /// Fragment that addresses this route, without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> String {
        match self {
            Self::Home => String::new(),
            Self::Videos => "videos".to_string(),
            Self::VideoDetail { id } => format!("video/{}", urlencoding::encode(id)),
            Self::Tweaks => "tweaks".to_string(),
            Self::Vocabulary => "vocabulary".to_string(),
        }
    }

    /// Fragment with a `t` query parameter that forces a fresh navigation.
    #[must_use]
    pub fn cache_busted(&self, stamp: i64) -> String {
        format!("{}?t={stamp}", self.fragment())
    }

    /// Template rendered for this route.
    #[must_use]
    pub const fn view(&self) -> ViewName {
        match self {
            Self::Home => ViewName::Home,
            Self::Videos => ViewName::Videos,
            Self::VideoDetail { .. } => ViewName::Video,
            Self::Tweaks => ViewName::Tweaks,
            Self::Vocabulary => ViewName::Vocabulary,
        }
    }

    /// Navigation link highlighted while this route is shown.
    #[must_use]
    pub const fn nav_link(&self) -> NavLink {
        match self {
            Self::Home => NavLink::Home,
            Self::Videos | Self::VideoDetail { .. } => NavLink::Videos,
            Self::Tweaks => NavLink::Tweaks,
            Self::Vocabulary => NavLink::Vocabulary,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.fragment())
    }
}

/// Pattern registration failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// Pattern contained a capture anywhere but the last segment, or several.
    #[error("route pattern '{pattern}' must end with at most one capture segment")]
    InvalidCapture {
        /// Offending pattern.
        pattern: String,
    },
    /// Pattern was already registered.
    #[error("route pattern '{pattern}' is already registered")]
    Duplicate {
        /// Offending pattern.
        pattern: String,
    },
}

/// Parsed route pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    prefix: String,
    capture: bool,
}

impl RoutePattern {
    /// Parse `literal` or `literal/{name}`.
    ///
    /// # Errors
    /// Returns [`RouteError::InvalidCapture`] when a capture is not the final
    /// segment or more than one capture is present.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let raw = pattern.trim_matches('/').to_string();
        let invalid = || RouteError::InvalidCapture {
            pattern: pattern.to_string(),
        };
        let segments: Vec<&str> = raw.split('/').collect();
        let is_capture = |segment: &&str| segment.starts_with('{') && segment.ends_with('}');
        let captures = segments.iter().filter(|segment| is_capture(segment)).count();
        match captures {
            0 => Ok(Self {
                prefix: raw.clone(),
                raw,
                capture: false,
            }),
            1 if segments.len() > 1 && segments.last().is_some_and(|last| is_capture(last)) => {
                let prefix = segments[..segments.len() - 1].join("/");
                Ok(Self {
                    raw,
                    prefix,
                    capture: true,
                })
            }
            _ => Err(invalid()),
        }
    }

    /// Match a normalized path, returning positional captures.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        if !self.capture {
            return (path == self.prefix).then(Vec::new);
        }
        let rest = path.strip_prefix(&self.prefix)?.strip_prefix('/')?;
        if rest.is_empty() || rest.contains('/') {
            return None;
        }
        Some(vec![rest.to_string()])
    }
}

type Handler<T> = Box<dyn Fn(&[String]) -> T>;

/// Ordered pattern table; the first matching pattern wins.
pub struct RouteTable<T> {
    entries: Vec<(RoutePattern, Handler<T>)>,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for RouteTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(pattern, _)| &pattern.raw))
            .finish()
    }
}

impl<T> RouteTable<T> {
    /// Register `pattern`; `handler` receives the positional captures.
    ///
    /// # Errors
    /// Returns [`RouteError`] for malformed or duplicate patterns.
    pub fn add(
        &mut self,
        pattern: &str,
        handler: impl Fn(&[String]) -> T + 'static,
    ) -> Result<(), RouteError> {
        let parsed = RoutePattern::parse(pattern)?;
        if self.entries.iter().any(|(existing, _)| existing == &parsed) {
            return Err(RouteError::Duplicate {
                pattern: pattern.to_string(),
            });
        }
        self.entries.push((parsed, Box::new(handler)));
        Ok(())
    }

    /// Resolve a normalized path against the table.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<T> {
        self.entries.iter().find_map(|(pattern, handler)| {
            pattern.captures(path).map(|captures| handler(&captures))
        })
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pattern is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the console's route table.
///
/// # Errors
/// Returns [`RouteError`] if a pattern fails to register.
pub fn console_routes() -> Result<RouteTable<Route>, RouteError> {
    let mut table = RouteTable::default();
    table.add("", |_| Route::Home)?;
    table.add("videos", |_| Route::Videos)?;
    table.add("video/{id}", |captures| Route::VideoDetail {
        id: captures.first().map(|raw| decode_segment(raw)).unwrap_or_default(),
    })?;
    table.add("tweaks", |_| Route::Tweaks)?;
    table.add("vocabulary", |_| Route::Vocabulary)?;
    Ok(table)
}

/// Undo the percent-encoding browsers apply to fragment segments.
fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), Cow::into_owned)
}

/// Strip the routing prefix, query string, and surrounding slashes.
#[must_use]
pub fn normalize_fragment(raw: &str) -> &str {
    let fragment = raw.trim().trim_start_matches('#');
    let path = fragment
        .split_once('?')
        .map_or(fragment, |(path, _query)| path);
    path.trim_matches('/')
}

/// Location seam: reads and writes the routing fragment.
pub trait Location {
    /// Current fragment, with or without the leading `#`.
    fn fragment(&self) -> String;
    /// Replace the fragment; the location listener dispatches afterwards.
    fn set_fragment(&self, fragment: &str);
}

/// Fragment router with a not-found callback.
pub struct Router<T> {
    table: RouteTable<T>,
    not_found: Box<dyn Fn(&str)>,
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("table", &self.table).finish()
    }
}

impl<T> Router<T> {
    /// Build a router over `table`.
    pub fn new(table: RouteTable<T>, not_found: impl Fn(&str) + 'static) -> Self {
        Self {
            table,
            not_found: Box::new(not_found),
        }
    }

    /// Resolve a raw fragment; unmatched paths invoke the not-found callback.
    pub fn dispatch(&self, raw: &str) -> Option<T> {
        let path = normalize_fragment(raw);
        let resolved = self.table.resolve(path);
        if resolved.is_none() {
            (self.not_found)(path);
        }
        resolved
    }

    /// Resolve the location's current fragment.
    pub fn check(&self, location: &dyn Location) -> Option<T> {
        self.dispatch(&location.fragment())
    }

    /// Move the location to `fragment`.
    pub fn navigate_to(&self, location: &dyn Location, fragment: &str) {
        let fragment = fragment.trim_start_matches('#');
        tracing::info!(fragment, "navigating");
        location.set_fragment(fragment);
    }
}

/// Produces strictly increasing cache-buster stamps.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: Cell<i64>,
}

impl CacheBuster {
    /// Next stamp, derived from `now_ms` but always greater than the last.
    pub fn next(&self, now_ms: i64) -> i64 {
        let stamp = now_ms.max(self.last.get().saturating_add(1));
        self.last.set(stamp);
        stamp
    }
}
