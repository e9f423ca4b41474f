//! Tweaks and vocabulary editors.
//!
//! Both lists share one controller: the server owns the canonical set, every
//! save replaces the whole collection, and display order is always sorted.

use crate::core::api::ApiError;
use crate::core::mount::ViewTicket;
use crate::core::templates::ViewName;
use crate::core::views::{ActionOutcome, LoadOutcome, ViewContext};
use serde_json::{Map, Value};

/// Word lists editable from the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordList {
    /// Transcript replacement phrases.
    Tweaks,
    /// Custom transcription vocabulary.
    Vocabulary,
}

impl WordList {
    /// View that renders the list.
    #[must_use]
    pub const fn view(self) -> ViewName {
        match self {
            Self::Tweaks => ViewName::Tweaks,
            Self::Vocabulary => ViewName::Vocabulary,
        }
    }

    /// JSON/template key of the list, also used in messages.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Tweaks => "tweaks",
            Self::Vocabulary => "vocabulary",
        }
    }

    /// Alert shown when the list cannot be loaded.
    #[must_use]
    pub fn load_failed_message(self) -> String {
        format!(
            "Error loading {}, please check your API Key and network status",
            self.key()
        )
    }

    /// Toast after a save.
    #[must_use]
    pub fn saved_message(self) -> String {
        format!("Saved {}", self.key())
    }

    /// Toast after a failed save.
    #[must_use]
    pub fn save_failed_message(self) -> String {
        format!("Failed to save {}", self.key())
    }

    async fn fetch(self, ctx: &ViewContext) -> Result<Vec<String>, ApiError> {
        match self {
            Self::Tweaks => ctx.api.get_tweaks().await,
            Self::Vocabulary => ctx.api.get_vocabulary().await,
        }
    }

    async fn replace(self, ctx: &ViewContext, words: Vec<String>) -> Result<Vec<String>, ApiError> {
        match self {
            Self::Tweaks => ctx.api.save_tweaks(words).await,
            Self::Vocabulary => ctx.api.save_vocabulary(words).await,
        }
    }
}

/// Split a text block on `\n` or `\r\n`.
#[must_use]
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Template data: `{"loading": .., "<key>": [..]}`.
#[must_use]
pub fn model(list: WordList, loading: bool, mut words: Vec<String>) -> Value {
    words.sort();
    let mut data = Map::new();
    data.insert("loading".to_string(), Value::Bool(loading));
    data.insert(
        list.key().to_string(),
        Value::Array(words.into_iter().map(Value::String).collect()),
    );
    Value::Object(data)
}

/// Mount the editor: placeholder, fetch, sorted list.
pub async fn show(ctx: &ViewContext, ticket: &ViewTicket, list: WordList) -> LoadOutcome {
    ctx.mount(ticket, &model(list, true, Vec::new()));
    match list.fetch(ctx).await {
        Ok(words) => {
            tracing::info!(list = list.key(), count = words.len(), "loaded word list");
            ctx.settle(ticket, &model(list, false, words), &list.load_failed_message())
        }
        Err(err) => {
            tracing::warn!(list = list.key(), error = %err, "failed to load word list");
            ctx.load_failed(ticket, &list.load_failed_message())
        }
    }
}

/// Replace the list with the lines of `raw` and re-render the echoed set.
///
/// Failures leave the user's edits on screen.
pub async fn save(ctx: &ViewContext, ticket: &ViewTicket, list: WordList, raw: &str) -> ActionOutcome {
    let words = split_lines(raw);
    match list.replace(ctx, words).await {
        Ok(canonical) => {
            tracing::info!(list = list.key(), count = canonical.len(), "saved word list");
            ctx.mount(ticket, &model(list, false, canonical));
            ctx.notifier.success(&list.saved_message());
            ActionOutcome::Completed
        }
        Err(err) => {
            tracing::warn!(list = list.key(), error = %err, "failed to save word list");
            ctx.notifier.error(&list.save_failed_message());
            ActionOutcome::Failed
        }
    }
}
