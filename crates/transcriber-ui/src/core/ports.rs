//! Effect seams between the console and the browser.
//!
//! # Design
//! - Controllers never touch the DOM; they describe effects through these traits.
//! - The wasm shell implements them with Yew state, gloo dialogs, and blobs.
//! - Native tests implement them with recorders.

use crate::core::api::TransportError;
use crate::core::nav::{LoginAffordance, NavModel};
use crate::core::polling::Readiness;
use crate::core::templates::ViewName;
use async_trait::async_trait;
use thiserror::Error;

/// Rendering surface for the mounted view and the chrome around it.
pub trait ViewSurface {
    /// Atomically replace the mounted view's markup.
    fn mount(&self, view: ViewName, markup: String);
    /// Replace the navigation bar.
    fn render_nav(&self, nav: &NavModel);
    /// Replace the login/logout control.
    fn render_login(&self, affordance: LoginAffordance);
    /// Empty the API key input.
    fn clear_login_input(&self);
    /// Show or hide the vocabulary action controls.
    fn show_readiness(&self, readiness: Readiness);
}

/// User-facing notifications and dialogs.
pub trait Notifier {
    /// Transient success notification.
    fn success(&self, message: &str);
    /// Transient failure notification.
    fn error(&self, message: &str);
    /// Blocking alert.
    fn alert(&self, message: &str);
    /// Blocking yes/no confirmation.
    fn confirm(&self, message: &str) -> bool;
}

/// Client-side file download failure.
#[derive(Debug, Error)]
#[error("download failed: {message}")]
pub struct DownloadError {
    /// Browser-reported reason.
    pub message: String,
}

/// Client-side "save as" downloads.
pub trait Downloads {
    /// Offer `contents` to the user as a file named `file_name`.
    ///
    /// # Errors
    /// Returns [`DownloadError`] when the browser refuses to build the file.
    fn save(&self, file_name: &str, mime: &str, contents: &str) -> Result<(), DownloadError>;
}

/// Wall clock seam, used for cache-buster stamps.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Direct upload of one user-selected file to a signed URL.
#[async_trait(?Send)]
pub trait UploadSink {
    /// Name of the selected file.
    fn file_name(&self) -> String;

    /// `PUT` the file to `signed_url`.
    async fn put(&self, signed_url: &str) -> Result<(), TransportError>;
}
