//! Landing page and direct video upload.

use crate::core::mount::ViewTicket;
use crate::core::ports::UploadSink;
use crate::core::routes::Route;
use crate::core::views::{ActionOutcome, LoadOutcome, Mounted, ViewContext};
use serde::Serialize;

/// Toast after a successful upload.
pub const UPLOADED: &str = "Uploaded video";
/// Toast after a failed upload.
pub const UPLOAD_FAILED: &str = "Failed to upload video";

/// Template data for the landing page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeModel {
    /// Whether a session token is stored.
    pub logged_in: bool,
    /// Deployment version from the site configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Mount the landing page; it needs no fetch.
pub fn show(ctx: &ViewContext, ticket: &ViewTicket) -> LoadOutcome {
    let model = HomeModel {
        logged_in: ctx.session.is_active(),
        version: ctx.api.config().version.clone(),
    };
    match ctx.mount(ticket, &model) {
        Mounted::Shown => LoadOutcome::Loaded,
        Mounted::Stale => LoadOutcome::Superseded,
        Mounted::Broken => LoadOutcome::Failed,
    }
}

/// Obtain a signed URL for the selected file and hand it to `sink`.
///
/// A completed upload reloads the video list so the new entry shows up.
pub async fn upload(ctx: &ViewContext, sink: &dyn UploadSink) -> ActionOutcome {
    let file_name = sink.file_name();
    let signed_url = match ctx.api.request_upload_url(&file_name).await {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(file = %file_name, error = %err, "failed to fetch signed upload url");
            ctx.notifier.error(UPLOAD_FAILED);
            return ActionOutcome::Failed;
        }
    };
    match sink.put(&signed_url).await {
        Ok(()) => {
            tracing::info!(file = %file_name, "uploaded video");
            ctx.notifier.success(UPLOADED);
            ActionOutcome::Reload(Route::Videos)
        }
        Err(err) => {
            tracing::warn!(file = %file_name, error = %err, "failed to upload video");
            ctx.notifier.error(UPLOAD_FAILED);
            ActionOutcome::Failed
        }
    }
}
