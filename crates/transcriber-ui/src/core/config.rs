//! Site configuration document.
//!
//! # Design
//! - Loaded once at startup from `site_config.json`; any defect is fatal.
//! - Endpoint URLs are composed in one place so slashes never double up.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while parsing or validating the site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Document was not valid JSON or lacked required fields.
    #[error("site configuration is malformed: {source}")]
    Malformed {
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// Field contained an unusable value.
    #[error("invalid value for '{field}': {message}")]
    InvalidField {
        /// Offending field name.
        field: &'static str,
        /// Human-readable reason.
        message: &'static str,
    },
}

/// Named API sub-paths declared by the configuration document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Video collection.
    Videos,
    /// Single video resource.
    Video,
    /// Caption resource of a video.
    Captions,
    /// Tweaks word list.
    Tweaks,
    /// Custom vocabulary word list.
    Vocabulary,
    /// Signed upload URL issuer.
    Upload,
}

/// Deserialized `site_config.json`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SiteConfig {
    /// Deployment version, logged at startup; numbers are kept as text and
    /// other shapes are ignored.
    #[serde(default, deserialize_with = "display_version")]
    pub version: Option<String>,
    /// Base address of the remote API.
    pub api_base: String,
    /// Sub-path of the video collection.
    pub api_videos: String,
    /// Sub-path of a single video.
    pub api_video: String,
    /// Sub-path of captions.
    pub api_captions: String,
    /// Sub-path of tweaks.
    pub api_tweaks: String,
    /// Sub-path of the custom vocabulary.
    pub api_vocabulary: String,
    /// Sub-path of the upload URL issuer.
    pub api_upload: String,
}

fn display_version<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

impl SiteConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Malformed`] for undecodable JSON and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|source| ConfigError::Malformed { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the base is an HTTP(S) address and every sub-path is set.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidField`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidField {
                field: "api_base",
                message: "must be an http(s) URL",
            });
        }
        let paths = [
            ("api_videos", &self.api_videos),
            ("api_video", &self.api_video),
            ("api_captions", &self.api_captions),
            ("api_tweaks", &self.api_tweaks),
            ("api_vocabulary", &self.api_vocabulary),
            ("api_upload", &self.api_upload),
        ];
        for (field, value) in paths {
            if value.trim().trim_matches('/').is_empty() {
                return Err(ConfigError::InvalidField {
                    field,
                    message: "must name a sub-path",
                });
            }
        }
        Ok(())
    }

    /// Sub-path configured for `endpoint`.
    #[must_use]
    pub fn path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Videos => &self.api_videos,
            Endpoint::Video => &self.api_video,
            Endpoint::Captions => &self.api_captions,
            Endpoint::Tweaks => &self.api_tweaks,
            Endpoint::Vocabulary => &self.api_vocabulary,
            Endpoint::Upload => &self.api_upload,
        }
    }

    /// Absolute URL of a collection endpoint.
    #[must_use]
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/{}",
            self.api_base.trim().trim_end_matches('/'),
            self.path(endpoint).trim().trim_matches('/')
        )
    }

    /// Absolute URL of an item below `endpoint`, percent-encoding the segment.
    #[must_use]
    pub fn item_url(&self, endpoint: Endpoint, segment: &str) -> String {
        format!("{}/{}", self.url(endpoint), urlencoding::encode(segment))
    }
}

#[cfg(test)]
pub(crate) fn sample_config() -> SiteConfig {
    SiteConfig {
        version: Some("1.2.0".to_string()),
        api_base: "https://api.example.test/prod".to_string(),
        api_videos: "/videos".to_string(),
        api_video: "/video".to_string(),
        api_captions: "/captions".to_string(),
        api_tweaks: "/tweaks".to_string(),
        api_vocabulary: "/vocabulary".to_string(),
        api_upload: "/upload".to_string(),
    }
}
