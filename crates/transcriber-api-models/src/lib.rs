#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the transcriber remote API.
//!
//! The console only reads videos, deletes them, or asks the backend to
//! reprocess them; word lists (tweaks and vocabulary) are replaced wholesale.
//! Every payload here mirrors the JSON the API gateway emits so the UI can
//! decode responses without an intermediate mapping layer.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Processing lifecycle of a video as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoStatus {
    /// Transcription failed.
    Errored,
    /// Transcription is running.
    Processing,
    /// Captions are generated and awaiting review.
    Ready,
    /// Captions were reviewed and published.
    Complete,
}

impl VideoStatus {
    /// All statuses the console renders, in display order.
    pub const ALL: [Self; 4] = [Self::Errored, Self::Processing, Self::Ready, Self::Complete];

    /// Wire value used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Errored => "ERRORED",
            Self::Processing => "PROCESSING",
            Self::Ready => "READY",
            Self::Complete => "COMPLETE",
        }
    }

    /// Parse a wire value; unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

/// Raw processing timestamp, either epoch milliseconds or a date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// RFC 3339 timestamp or plain `YYYY-MM-DD` date.
    Text(String),
}

impl Timestamp {
    /// Read a timestamp from an arbitrary JSON value.
    ///
    /// Fractional millis are truncated; anything other than a number or
    /// string yields `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().filter(|ms| ms.is_finite()).map(|ms| ms as i64))
                .map(Self::Millis),
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }

    /// Interpret the timestamp as a UTC instant when it is well formed.
    #[must_use]
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            Self::Text(text) => {
                let text = text.trim();
                if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                    return Some(parsed.with_timezone(&Utc));
                }
                if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
                    return Some(parsed.and_utc());
                }
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }
        }
    }
}

/// Video record as returned by the videos endpoints.
///
/// Fields the console does not interpret are kept in [`Video::extra`] so the
/// templates can display them unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Backend identifier; numeric ids are kept in their decimal form.
    #[serde(deserialize_with = "id_from_value")]
    pub id: String,
    /// Raw status value, absent when missing or not a string; see
    /// [`Video::status`].
    #[serde(
        default,
        deserialize_with = "text_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    /// When the backend last processed the video; unusable values are dropped.
    #[serde(
        default,
        deserialize_with = "timestamp_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub processed_date: Option<Timestamp>,
    /// Display date derived by the console.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_date: Option<String>,
    /// Remaining display fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Video {
    /// Parsed status, `None` when the backend sent an unknown value.
    #[must_use]
    pub fn status(&self) -> Option<VideoStatus> {
        self.status.as_deref().and_then(VideoStatus::parse)
    }
}

fn id_from_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "video id must be a string or number, got {other}"
        ))),
    }
}

fn text_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn timestamp_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Timestamp>, D::Error> {
    Ok(Timestamp::from_value(&Value::deserialize(deserializer)?))
}

/// `GET videos` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoList {
    /// Every video known to the backend.
    pub videos: Vec<Video>,
}

/// `GET videos/{id}` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEnvelope {
    /// The requested video.
    pub video: Video,
}

/// `PATCH videos/{id}` request body; always the empty object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReprocessRequest {}

/// `PUT captions/{id}` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionsUpdate {
    /// Caption payload exactly as edited in the detail view.
    pub captions: Value,
}

/// Tweaks payload for both reads and replace-whole writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweaksBody {
    /// Replacement phrases.
    pub tweaks: Vec<String>,
}

/// Custom vocabulary payload for both reads and replace-whole writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyBody {
    /// Vocabulary terms.
    pub vocabulary: Vec<String>,
}

/// Signed upload location returned by `GET upload/{filename}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UploadTarget {
    /// Object form, `{"signedUrl": "..."}` or `{"url": "..."}`.
    Signed {
        /// Pre-signed write URL.
        #[serde(rename = "signedUrl", alias = "url")]
        signed_url: String,
    },
    /// Bare JSON string.
    Bare(String),
}

impl UploadTarget {
    /// Decode an upload response body, accepting plain-text URLs as well.
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        serde_json::from_str(trimmed)
            .ok()
            .or_else(|| Some(Self::Bare(trimmed.to_string())))
    }

    /// The signed URL.
    #[must_use]
    pub fn into_url(self) -> String {
        match self {
            Self::Signed { signed_url } | Self::Bare(signed_url) => signed_url,
        }
    }
}
