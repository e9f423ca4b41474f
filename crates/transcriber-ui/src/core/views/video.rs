//! Video detail controller: caption editing and WebVTT download.

use crate::core::mount::ViewTicket;
use crate::core::views::{ActionOutcome, LoadOutcome, ViewContext};
use serde::Serialize;
use serde_json::Value;
use transcriber_api_models::Video;

/// Alert shown when the video cannot be loaded.
pub const LOAD_FAILED: &str = "Error loading video, please check your API Key and network status";
/// Toast after saving captions.
pub const CAPTIONS_SAVED: &str = "Saved captions";
/// Toast after a failed caption save.
pub const CAPTIONS_SAVE_FAILED: &str = "Failed to save captions";
/// Toast after generating the caption file.
pub const CAPTIONS_GENERATED: &str = "Generated captions";
/// Toast after a failed caption download.
pub const CAPTIONS_GENERATE_FAILED: &str = "Failed to generate captions";
/// MIME type of downloaded caption files.
pub const VTT_MIME: &str = "text/vtt;charset=utf-8";

/// Template data for the detail view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoModel {
    /// Placeholder flag.
    pub loading: bool,
    /// Loaded video, absent while loading.
    pub video: Option<Video>,
    /// Label shown before the video arrives.
    pub video_id: String,
}

impl VideoModel {
    /// Placeholder for `id`.
    #[must_use]
    pub fn loading(id: &str) -> Self {
        Self {
            loading: true,
            video: None,
            video_id: placeholder_label(id),
        }
    }

    /// Populated view.
    #[must_use]
    pub fn loaded(id: &str, video: Video) -> Self {
        Self {
            loading: false,
            video: Some(video),
            video_id: placeholder_label(id),
        }
    }
}

/// Synthesized id label, `Video_<id>`.
#[must_use]
pub fn placeholder_label(id: &str) -> String {
    format!("Video_{id}")
}

/// File name offered for a caption download.
#[must_use]
pub fn caption_file_name(video_name: &str) -> String {
    format!("{video_name}.vtt")
}

/// Mount the detail view: placeholder, fetch, populated view.
pub async fn show(ctx: &ViewContext, ticket: &ViewTicket, id: &str) -> LoadOutcome {
    ctx.mount(ticket, &VideoModel::loading(id));
    match ctx.api.get_video(id).await {
        Ok(video) => {
            tracing::info!(id, "loaded video");
            ctx.settle(ticket, &VideoModel::loaded(id, video), LOAD_FAILED)
        }
        Err(err) => {
            tracing::warn!(id, error = %err, "failed to load video");
            ctx.load_failed(ticket, LOAD_FAILED)
        }
    }
}

/// Replace the captions of `id`; never re-renders.
pub async fn save_captions(ctx: &ViewContext, id: &str, captions: Value) -> ActionOutcome {
    match ctx.api.save_captions(id, captions).await {
        Ok(()) => {
            tracing::info!(id, "saved captions");
            ctx.notifier.success(CAPTIONS_SAVED);
            ActionOutcome::Completed
        }
        Err(err) => {
            tracing::warn!(id, error = %err, "failed to save captions");
            ctx.notifier.error(CAPTIONS_SAVE_FAILED);
            ActionOutcome::Failed
        }
    }
}

/// Fetch the captions of `id` and offer them as `<video_name>.vtt`.
pub async fn download_captions(ctx: &ViewContext, id: &str, video_name: &str) -> ActionOutcome {
    let body = match ctx.api.get_captions(id).await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(id, error = %err, "failed to fetch captions");
            ctx.notifier.error(CAPTIONS_GENERATE_FAILED);
            return ActionOutcome::Failed;
        }
    };
    ctx.notifier.success(CAPTIONS_GENERATED);
    match ctx
        .downloads
        .save(&caption_file_name(video_name), VTT_MIME, &body)
    {
        Ok(()) => ActionOutcome::Completed,
        Err(err) => {
            tracing::warn!(id, error = %err, "failed to save caption file");
            ctx.notifier.error(CAPTIONS_GENERATE_FAILED);
            ActionOutcome::Failed
        }
    }
}
