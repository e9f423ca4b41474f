//! Navigation bar state.
//!
//! # Design
//! - Links beyond home are gated on "a session token exists", not on its validity.
//! - Highlighting clears every marker before setting one, so it is idempotent.

/// Links shown in the navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavLink {
    /// Home page.
    Home,
    /// Video list.
    Videos,
    /// Custom vocabulary.
    Vocabulary,
    /// Tweaks.
    Tweaks,
}

impl NavLink {
    /// Display order of the bar.
    pub const ALL: [Self; 4] = [Self::Home, Self::Videos, Self::Vocabulary, Self::Tweaks];

    /// DOM id of the link element.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Home => "homeLink",
            Self::Videos => "videosLink",
            Self::Vocabulary => "vocabularyLink",
            Self::Tweaks => "tweaksLink",
        }
    }

    /// Link target.
    #[must_use]
    pub const fn href(self) -> &'static str {
        match self {
            Self::Home => "#",
            Self::Videos => "#videos",
            Self::Vocabulary => "#vocabulary",
            Self::Tweaks => "#tweaks",
        }
    }

    /// Visible label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Videos => "Videos",
            Self::Vocabulary => "Vocabulary",
            Self::Tweaks => "Tweaks",
        }
    }

    /// Whether the link is only shown while a session token is stored.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        !matches!(self, Self::Home)
    }
}

/// One rendered navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    /// Link target.
    pub link: NavLink,
    /// Whether the active marker is set.
    pub active: bool,
}

/// Rendered navigation bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavModel {
    items: Vec<NavItem>,
}

impl Default for NavModel {
    fn default() -> Self {
        Self::build(false)
    }
}

impl NavModel {
    /// Links visible for the given session state, none highlighted.
    #[must_use]
    pub fn build(session_active: bool) -> Self {
        let items = NavLink::ALL
            .into_iter()
            .filter(|link| session_active || !link.requires_session())
            .map(|link| NavItem {
                link,
                active: false,
            })
            .collect();
        Self { items }
    }

    /// Clear every active marker, then mark `link` if it is shown.
    pub fn highlight(&mut self, link: NavLink) {
        for item in &mut self.items {
            item.active = false;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.link == link) {
            item.active = true;
        }
    }

    /// Copy with `link` highlighted.
    #[must_use]
    pub fn highlighted(mut self, link: NavLink) -> Self {
        self.highlight(link);
        self
    }

    /// Visible entries in display order.
    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Whether `link` is visible.
    #[must_use]
    pub fn shows(&self, link: NavLink) -> bool {
        self.items.iter().any(|item| item.link == link)
    }

    /// Currently highlighted link.
    #[must_use]
    pub fn active(&self) -> Option<NavLink> {
        self.items.iter().find(|item| item.active).map(|item| item.link)
    }
}

/// Login/logout control shown beside the navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoginAffordance {
    /// Prompt for an API key.
    #[default]
    EnterKey,
    /// Offer to clear the stored key.
    ClearKey,
}

impl LoginAffordance {
    /// Affordance for the given session state.
    #[must_use]
    pub const fn for_session(session_active: bool) -> Self {
        if session_active {
            Self::ClearKey
        } else {
            Self::EnterKey
        }
    }
}
