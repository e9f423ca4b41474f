//! Remote API client.
//!
//! # Design
//! - Every call reads the session token at send time and attaches it as
//!   `X-Api-Key`; an absent token simply omits the header.
//! - Transport failures and non-2xx statuses both fold into [`ApiError`], so
//!   callers only ever see one success path and one failure path.
//! - The HTTP stack sits behind [`Transport`]; the browser uses gloo-net and
//!   tests script responses in memory.

use crate::core::config::{Endpoint, SiteConfig};
use crate::core::polling::ReadinessProbe;
use crate::core::session::SessionStore;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use transcriber_api_models::{
    CaptionsUpdate, ReprocessRequest, TweaksBody, UploadTarget, Video, VideoEnvelope, VideoList,
    VocabularyBody,
};

/// Header carrying the session token.
pub const HEADER_API_KEY: &str = "X-Api-Key";
/// Content type sent with every call.
pub const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";

/// HTTP methods used by the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
}

impl Method {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound request handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(&'static str, String)>,
    /// Serialized JSON body.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Value of the first header named `name`.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Response returned by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl ApiResponse {
    /// Successful response with `body`.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Network-level failure (no HTTP status available).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    /// Browser-reported reason.
    pub message: String,
}

impl TransportError {
    /// Wrap a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// HTTP stack seam.
#[async_trait(?Send)]
pub trait Transport {
    /// Send `request` and collect the whole response body.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Failures surfaced by [`ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response.
    #[error("{method} {url} failed")]
    Transport {
        /// Request method.
        method: Method,
        /// Request URL.
        url: String,
        /// Underlying failure.
        #[source]
        source: TransportError,
    },
    /// Server answered with a non-success status.
    #[error("{method} {url} returned status {status}")]
    Status {
        /// Request method.
        method: Method,
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// Response body did not match the expected shape.
    #[error("response from {url} could not be decoded")]
    Decode {
        /// Request URL.
        url: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Request body could not be serialized.
    #[error("request body could not be encoded")]
    Encode {
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Upload endpoint answered without a URL.
    #[error("{url} returned no upload URL")]
    MissingUploadUrl {
        /// Request URL.
        url: String,
    },
}

/// Authenticated client for the remote API.
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    session: Rc<dyn SessionStore>,
    config: Rc<SiteConfig>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base", &self.config.api_base)
            .field("authenticated", &self.session.is_active())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client over the given seams.
    #[must_use]
    pub fn new(
        transport: Rc<dyn Transport>,
        session: Rc<dyn SessionStore>,
        config: Rc<SiteConfig>,
    ) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    /// Loaded site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    fn request(&self, method: Method, url: String, body: Option<String>) -> ApiRequest {
        let mut headers = vec![("Content-Type", CONTENT_TYPE_JSON.to_string())];
        if let Some(token) = self.session.get() {
            headers.push((HEADER_API_KEY, token));
        }
        ApiRequest {
            method,
            url,
            headers,
            body,
        }
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<String>,
    ) -> Result<ApiResponse, ApiError> {
        tracing::debug!(%method, url = %url, "api request");
        let request = self.request(method, url.clone(), body);
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| ApiError::Transport {
                method,
                url: url.clone(),
                source,
            })?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                method,
                url,
                status: response.status,
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = self.send(Method::Get, url.clone(), None).await?;
        serde_json::from_str(&response.body).map_err(|source| ApiError::Decode { url, source })
    }

    async fn write_json<B: Serialize>(
        &self,
        method: Method,
        url: String,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_string(body).map_err(|source| ApiError::Encode { source })?;
        self.send(method, url, Some(body)).await
    }

    async fn replace_json<B: Serialize + DeserializeOwned>(
        &self,
        url: String,
        body: &B,
    ) -> Result<B, ApiError> {
        let response = self.write_json(Method::Put, url.clone(), body).await?;
        serde_json::from_str(&response.body).map_err(|source| ApiError::Decode { url, source })
    }

    /// `GET videos`.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport, status, or decode failure.
    pub async fn list_videos(&self) -> Result<Vec<Video>, ApiError> {
        let list: VideoList = self.get_json(self.config.url(Endpoint::Videos)).await?;
        Ok(list.videos)
    }

    /// `GET video/{id}`.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport, status, or decode failure.
    pub async fn get_video(&self, id: &str) -> Result<Video, ApiError> {
        let envelope: VideoEnvelope = self
            .get_json(self.config.item_url(Endpoint::Video, id))
            .await?;
        Ok(envelope.video)
    }

    /// `DELETE video/{id}`.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport or status failure.
    pub async fn delete_video(&self, id: &str) -> Result<(), ApiError> {
        self.send(Method::Delete, self.config.item_url(Endpoint::Video, id), None)
            .await
            .map(drop)
    }

    /// `PATCH video/{id}` with `{}`.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport or status failure.
    pub async fn reprocess_video(&self, id: &str) -> Result<(), ApiError> {
        self.write_json(
            Method::Patch,
            self.config.item_url(Endpoint::Video, id),
            &ReprocessRequest::default(),
        )
        .await
        .map(drop)
    }

    /// `GET captions/{id}`, returning the raw subtitle text.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport or status failure.
    pub async fn get_captions(&self, id: &str) -> Result<String, ApiError> {
        let response = self
            .send(Method::Get, self.config.item_url(Endpoint::Captions, id), None)
            .await?;
        Ok(response.body)
    }

    /// `PUT captions/{id}` with `{captions}`.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport or status failure.
    pub async fn save_captions(&self, id: &str, captions: Value) -> Result<(), ApiError> {
        self.write_json(
            Method::Put,
            self.config.item_url(Endpoint::Captions, id),
            &CaptionsUpdate { captions },
        )
        .await
        .map(drop)
    }

    /// `GET tweaks`.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport, status, or decode failure.
    pub async fn get_tweaks(&self) -> Result<Vec<String>, ApiError> {
        let body: TweaksBody = self.get_json(self.config.url(Endpoint::Tweaks)).await?;
        Ok(body.tweaks)
    }

    /// `PUT tweaks`, returning the canonical set echoed by the server.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport, status, or decode failure.
    pub async fn save_tweaks(&self, tweaks: Vec<String>) -> Result<Vec<String>, ApiError> {
        let body = self
            .replace_json(self.config.url(Endpoint::Tweaks), &TweaksBody { tweaks })
            .await?;
        Ok(body.tweaks)
    }

    /// `GET vocabulary`.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport, status, or decode failure.
    pub async fn get_vocabulary(&self) -> Result<Vec<String>, ApiError> {
        let body: VocabularyBody = self.get_json(self.config.url(Endpoint::Vocabulary)).await?;
        Ok(body.vocabulary)
    }

    /// `PUT vocabulary`, returning the canonical set echoed by the server.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport, status, or decode failure.
    pub async fn save_vocabulary(&self, vocabulary: Vec<String>) -> Result<Vec<String>, ApiError> {
        let body = self
            .replace_json(
                self.config.url(Endpoint::Vocabulary),
                &VocabularyBody { vocabulary },
            )
            .await?;
        Ok(body.vocabulary)
    }

    /// `HEAD vocabulary`; any failure means the build is still running.
    pub async fn vocabulary_ready(&self) -> bool {
        self.send(Method::Head, self.config.url(Endpoint::Vocabulary), None)
            .await
            .is_ok()
    }

    /// `GET upload/{file_name}`, returning the signed write URL.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport or status failure, or
    /// [`ApiError::MissingUploadUrl`] for an empty body.
    pub async fn request_upload_url(&self, file_name: &str) -> Result<String, ApiError> {
        let url = self.config.item_url(Endpoint::Upload, file_name);
        let response = self.send(Method::Get, url.clone(), None).await?;
        UploadTarget::from_body(&response.body)
            .map(UploadTarget::into_url)
            .ok_or(ApiError::MissingUploadUrl { url })
    }
}

#[async_trait(?Send)]
impl ReadinessProbe for ApiClient {
    async fn probe(&self) -> bool {
        self.vocabulary_ready().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::MemorySession;
    use crate::core::test_support::{FakeTransport, client_with};
    use serde_json::json;

    const VIDEOS: &str = "https://api.example.test/prod/videos";
    const TWEAKS: &str = "https://api.example.test/prod/tweaks";

    #[tokio::test]
    async fn attaches_token_and_content_type() -> Result<(), ApiError> {
        let transport = FakeTransport::default();
        transport.reply(Method::Get, VIDEOS, 200, json!({"videos": []}));
        let client = client_with(&transport, MemorySession::with_token("abc"));
        assert!(client.list_videos().await?.is_empty());

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].header(HEADER_API_KEY), Some("abc"));
        assert_eq!(sent[0].header("content-type"), Some(CONTENT_TYPE_JSON));
        Ok(())
    }

    #[tokio::test]
    async fn anonymous_calls_omit_the_key_header() {
        let transport = FakeTransport::default();
        let client = client_with(&transport, MemorySession::default());
        let _ = client.list_videos().await;
        assert_eq!(transport.requests()[0].header(HEADER_API_KEY), None);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let transport = FakeTransport::default();
        transport.reply(Method::Delete, "https://api.example.test/prod/video/v1", 403, json!({}));
        let client = client_with(&transport, MemorySession::with_token("abc"));
        let err = client.delete_video("v1").await;
        assert!(matches!(err, Err(ApiError::Status { status: 403, .. })));
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let transport = FakeTransport::default();
        transport.fail(Method::Get, TWEAKS, "offline");
        let client = client_with(&transport, MemorySession::with_token("abc"));
        assert!(matches!(
            client.get_tweaks().await,
            Err(ApiError::Transport { method: Method::Get, .. })
        ));
    }

    #[tokio::test]
    async fn reprocess_sends_empty_object() -> Result<(), ApiError> {
        let transport = FakeTransport::default();
        transport.reply(Method::Patch, "https://api.example.test/prod/video/v%201", 200, json!({}));
        let client = client_with(&transport, MemorySession::with_token("abc"));
        client.reprocess_video("v 1").await?;
        assert_eq!(transport.requests()[0].body.as_deref(), Some("{}"));
        Ok(())
    }

    #[tokio::test]
    async fn word_list_writes_replace_the_whole_set() -> Result<(), ApiError> {
        let transport = FakeTransport::default();
        transport.reply(Method::Put, TWEAKS, 200, json!({"tweaks": ["b", "a"]}));
        let client = client_with(&transport, MemorySession::with_token("abc"));
        let echoed = client
            .save_tweaks(vec!["b".to_string(), "a".to_string()])
            .await?;
        assert_eq!(echoed, ["b", "a"]);
        let body = transport.requests()[0].body.clone().unwrap_or_default();
        assert_eq!(body, r#"{"tweaks":["b","a"]}"#);
        Ok(())
    }

    #[tokio::test]
    async fn captions_are_raw_text() -> Result<(), ApiError> {
        let transport = FakeTransport::default();
        transport.reply_text(
            Method::Get,
            "https://api.example.test/prod/captions/v1",
            200,
            "WEBVTT\n\n00:00.000 --> 00:01.000\nhello",
        );
        let client = client_with(&transport, MemorySession::with_token("abc"));
        assert!(client.get_captions("v1").await?.starts_with("WEBVTT"));
        Ok(())
    }

    #[tokio::test]
    async fn readiness_probe_folds_failures_into_busy() {
        let transport = FakeTransport::default();
        let url = "https://api.example.test/prod/vocabulary";
        transport.reply_text(Method::Head, url, 404, "");
        transport.reply_text(Method::Head, url, 200, "");
        let client = client_with(&transport, MemorySession::with_token("abc"));
        assert!(!client.probe().await);
        assert!(client.probe().await);
    }

    #[tokio::test]
    async fn upload_url_is_extracted_from_the_body() -> Result<(), ApiError> {
        let transport = FakeTransport::default();
        transport.reply(
            Method::Get,
            "https://api.example.test/prod/upload/clip.mp4",
            200,
            json!({"signedUrl": "https://bucket.example.test/put?sig=1"}),
        );
        let client = client_with(&transport, MemorySession::with_token("abc"));
        assert_eq!(
            client.request_upload_url("clip.mp4").await?,
            "https://bucket.example.test/put?sig=1"
        );
        Ok(())
    }
}
