//! Video list controller.

use crate::core::mount::ViewTicket;
use crate::core::routes::Route;
use crate::core::views::{ActionOutcome, LoadOutcome, ViewContext};
use serde::Serialize;
use transcriber_api_models::{Timestamp, Video, VideoStatus};

/// Alert shown when the list cannot be loaded.
pub const LOAD_FAILED: &str = "Error loading videos, please check your API Key and network status";
/// Delete confirmation prompt.
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this video? This will remove any existing captions and delete all assets associated with this video including the input video file. This action cannot be undone.";
/// Reprocess confirmation prompt.
pub const CONFIRM_REPROCESS: &str = "Are you sure you want to restart processing this video? This will overwrite existing captions, This action cannot be undone.";
/// Toast after a delete.
pub const DELETED: &str = "Successfully deleted video";
/// Toast after a failed delete.
pub const DELETE_FAILED: &str = "Failed to delete video, check console logs";
/// Toast after a reprocess request.
pub const REPROCESSING: &str = "Started reprocessing video";
/// Toast after a failed reprocess request.
pub const REPROCESS_FAILED: &str = "Failed to reprocess video";

/// Videos partitioned by status; unknown statuses land nowhere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Buckets {
    /// `ERRORED`
    pub errored: Vec<Video>,
    /// `PROCESSING`
    pub processing: Vec<Video>,
    /// `READY`
    pub ready: Vec<Video>,
    /// `COMPLETE`
    pub complete: Vec<Video>,
}

impl Buckets {
    /// Videos across all four buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.errored.len() + self.processing.len() + self.ready.len() + self.complete.len()
    }
}

/// Display date (`YYYY-MM-DD`, UTC) for a processing timestamp.
#[must_use]
pub fn format_date(timestamp: Option<&Timestamp>) -> Option<String> {
    timestamp
        .and_then(Timestamp::to_utc)
        .map(|instant| instant.format("%Y-%m-%d").to_string())
}

/// Derive `formattedDate` for every video and split the list by status,
/// keeping the input order within each bucket.
#[must_use]
pub fn partition(videos: Vec<Video>) -> Buckets {
    let mut buckets = Buckets::default();
    for mut video in videos {
        video.formatted_date = format_date(video.processed_date.as_ref());
        match video.status() {
            Some(VideoStatus::Errored) => buckets.errored.push(video),
            Some(VideoStatus::Processing) => buckets.processing.push(video),
            Some(VideoStatus::Ready) => buckets.ready.push(video),
            Some(VideoStatus::Complete) => buckets.complete.push(video),
            None => {
                tracing::debug!(id = %video.id, status = ?video.status, "skipping video with unknown status");
            }
        }
    }
    buckets
}

/// Template data for the list view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideosModel {
    /// Placeholder flag.
    pub loading: bool,
    /// Errored videos.
    pub errored_videos: Vec<Video>,
    /// Videos being processed.
    pub processing_videos: Vec<Video>,
    /// Videos awaiting review.
    pub ready_videos: Vec<Video>,
    /// Completed videos.
    pub completed_videos: Vec<Video>,
    /// Cache-busted link back to this view.
    pub refresh_link: String,
}

impl VideosModel {
    /// Placeholder with empty buckets.
    #[must_use]
    pub fn loading(refresh_link: String) -> Self {
        Self::loaded(Buckets::default(), refresh_link).with_loading()
    }

    /// Populated view.
    #[must_use]
    pub fn loaded(buckets: Buckets, refresh_link: String) -> Self {
        Self {
            loading: false,
            errored_videos: buckets.errored,
            processing_videos: buckets.processing,
            ready_videos: buckets.ready,
            completed_videos: buckets.complete,
            refresh_link,
        }
    }

    fn with_loading(mut self) -> Self {
        self.loading = true;
        self
    }
}

/// Mount the list view: placeholder, fetch, populated view.
pub async fn show(ctx: &ViewContext, ticket: &ViewTicket) -> LoadOutcome {
    ctx.mount(ticket, &VideosModel::loading(ctx.refresh_link(&Route::Videos)));
    match ctx.api.list_videos().await {
        Ok(videos) => {
            let received = videos.len();
            let buckets = partition(videos);
            tracing::info!(received, shown = buckets.total(), "loaded videos");
            let model = VideosModel::loaded(buckets, ctx.refresh_link(&Route::Videos));
            ctx.settle(ticket, &model, LOAD_FAILED)
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load videos");
            ctx.load_failed(ticket, LOAD_FAILED)
        }
    }
}

/// Delete `id` after confirmation; success reloads the list.
pub async fn delete(ctx: &ViewContext, id: &str) -> ActionOutcome {
    if !ctx.notifier.confirm(CONFIRM_DELETE) {
        tracing::info!(id, "user cancelled request to delete a video");
        return ActionOutcome::Declined;
    }
    match ctx.api.delete_video(id).await {
        Ok(()) => {
            tracing::info!(id, "deleted video");
            ctx.notifier.success(DELETED);
            ActionOutcome::Reload(Route::Videos)
        }
        Err(err) => {
            tracing::warn!(id, error = %err, "failed to delete video");
            ctx.notifier.error(DELETE_FAILED);
            ActionOutcome::Failed
        }
    }
}

/// Ask the backend to reprocess `id` after confirmation; success reloads the list.
pub async fn reprocess(ctx: &ViewContext, id: &str) -> ActionOutcome {
    if !ctx.notifier.confirm(CONFIRM_REPROCESS) {
        tracing::info!(id, "user cancelled request to restart processing");
        return ActionOutcome::Declined;
    }
    match ctx.api.reprocess_video(id).await {
        Ok(()) => {
            tracing::info!(id, "reprocessing video");
            ctx.notifier.success(REPROCESSING);
            ActionOutcome::Reload(Route::Videos)
        }
        Err(err) => {
            tracing::warn!(id, error = %err, "failed to reprocess video");
            ctx.notifier.error(REPROCESS_FAILED);
            ActionOutcome::Failed
        }
    }
}
