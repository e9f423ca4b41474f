//! Console orchestration.
//!
//! # Design
//! - Owns the router, the mount tracker, the readiness monitor, and the nav
//!   state; the browser shell only forwards location changes, in-view actions,
//!   and login/logout events.
//! - Every navigation cancels the readiness monitor and begins a new mount
//!   generation before any controller runs.
//! - Actions that must show fresh server state navigate to a cache-busted
//!   fragment; the location listener performs the actual load.

use crate::core::api::{ApiClient, Transport};
use crate::core::mount::{MountTracker, ViewTicket};
use crate::core::nav::{LoginAffordance, NavLink, NavModel};
use crate::core::polling::{ReadinessMonitor, Sleeper};
use crate::core::ports::{Clock, Downloads, Notifier, UploadSink, ViewSurface};
use crate::core::routes::{Location, Route, RouteError, Router, console_routes};
use crate::core::session::{SessionStore, normalize_token};
use crate::core::startup::Bootstrap;
use crate::core::templates::ViewName;
use crate::core::views::{
    ActionOutcome, LoadOutcome, ViewAction, ViewContext, WordList, home, video, videos, word_list,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Toast after storing an API key.
pub const KEY_SAVED: &str = "Saved API key";
/// Toast after clearing the API key.
pub const KEY_CLEARED: &str = "Cleared API Key";
/// Toast when the login form is submitted blank.
pub const KEY_MISSING: &str = "Please enter an API key";

/// Browser effects the console depends on.
#[derive(Clone)]
pub struct Ports {
    /// Mounted view and chrome.
    pub surface: Rc<dyn ViewSurface>,
    /// Toasts and dialogs.
    pub notifier: Rc<dyn Notifier>,
    /// File downloads.
    pub downloads: Rc<dyn Downloads>,
    /// Retry timer.
    pub sleeper: Rc<dyn Sleeper>,
    /// Routing fragment.
    pub location: Rc<dyn Location>,
    /// Wall clock.
    pub clock: Rc<dyn Clock>,
}

/// The running console.
pub struct Console {
    ctx: ViewContext,
    router: Router<Route>,
    mounts: MountTracker,
    monitor: ReadinessMonitor,
    nav: RefCell<NavModel>,
    location: Rc<dyn Location>,
    sleeper: Rc<dyn Sleeper>,
}

impl Console {
    /// Arm every route over the loaded configuration and templates.
    ///
    /// # Errors
    /// Returns [`RouteError`] if the route table cannot be built.
    pub fn new(
        boot: Bootstrap,
        session: Rc<dyn SessionStore>,
        transport: Rc<dyn Transport>,
        ports: Ports,
    ) -> Result<Self, RouteError> {
        let router = Router::new(console_routes()?, |path| {
            tracing::warn!(path, "page not found");
        });
        let api = ApiClient::new(transport, Rc::clone(&session), Rc::new(boot.config));
        let ctx = ViewContext::new(
            api,
            Rc::new(boot.templates),
            ports.surface,
            ports.notifier,
            ports.downloads,
            session,
            ports.clock,
        );
        Ok(Self {
            ctx,
            router,
            mounts: MountTracker::default(),
            monitor: ReadinessMonitor::default(),
            nav: RefCell::new(NavModel::default()),
            location: ports.location,
            sleeper: ports.sleeper,
        })
    }

    /// Render the chrome and dispatch the current location.
    pub async fn start(&self) {
        self.render_chrome(None);
        self.handle_location().await;
    }

    /// Dispatch the current location; unknown fragments leave the view as is.
    pub async fn handle_location(&self) {
        if let Some(route) = self.router.check(self.location.as_ref()) {
            self.show(route).await;
        }
    }

    /// Move the location to `fragment`.
    pub fn navigate_to(&self, fragment: &str) {
        self.router.navigate_to(self.location.as_ref(), fragment);
    }

    /// Navigate to `route` with a fresh cache buster so it always reloads.
    pub fn reload(&self, route: &Route) {
        let fragment = route.cache_busted(self.ctx.next_stamp());
        self.navigate_to(&fragment);
    }

    /// Mount `route`, superseding whatever was mounted before.
    pub async fn show(&self, route: Route) -> LoadOutcome {
        self.monitor.cancel();
        let ticket = self.mounts.begin(route.view());
        self.highlight(route.nav_link());
        tracing::info!(route = %route, generation = ticket.generation(), "showing view");
        let outcome = match route {
            Route::Home => home::show(&self.ctx, &ticket),
            Route::Videos => videos::show(&self.ctx, &ticket).await,
            Route::VideoDetail { id } => video::show(&self.ctx, &ticket, &id).await,
            Route::Tweaks => word_list::show(&self.ctx, &ticket, WordList::Tweaks).await,
            Route::Vocabulary => {
                let outcome = word_list::show(&self.ctx, &ticket, WordList::Vocabulary).await;
                if outcome == LoadOutcome::Loaded {
                    self.watch_vocabulary(&ticket).await;
                }
                outcome
            }
        };
        tracing::debug!(?outcome, view = %ticket.view(), "view settled");
        outcome
    }

    /// Run an in-view action against the mounted view.
    pub async fn perform(&self, action: ViewAction) -> ActionOutcome {
        let outcome = match action {
            ViewAction::DeleteVideo { id } => videos::delete(&self.ctx, &id).await,
            ViewAction::ReprocessVideo { id } => videos::reprocess(&self.ctx, &id).await,
            ViewAction::SaveCaptions { id, captions } => {
                video::save_captions(&self.ctx, &id, captions).await
            }
            ViewAction::DownloadCaptions { id, name } => {
                video::download_captions(&self.ctx, &id, &name).await
            }
            ViewAction::SaveWords { list, text } => self.save_words(list, &text).await,
        };
        self.follow(&outcome);
        outcome
    }

    /// Upload the file held by `sink` through a signed URL.
    pub async fn upload(&self, sink: &dyn UploadSink) -> ActionOutcome {
        let outcome = home::upload(&self.ctx, sink).await;
        self.follow(&outcome);
        outcome
    }

    /// Store a new API key; blank input is rejected.
    pub fn login(&self, raw: &str) {
        let Some(token) = normalize_token(raw) else {
            tracing::info!("ignoring blank API key");
            self.ctx.notifier.error(KEY_MISSING);
            return;
        };
        self.ctx.session.set(&token);
        self.ctx.surface.clear_login_input();
        self.render_chrome(Some(NavLink::Home));
        tracing::info!("saved API key");
        self.ctx.notifier.success(KEY_SAVED);
    }

    /// Forget the API key.
    pub fn logout(&self) {
        self.ctx.session.clear();
        self.render_chrome(Some(NavLink::Home));
        tracing::info!("cleared API key");
        self.ctx.notifier.success(KEY_CLEARED);
    }

    /// Handle on the mount tracker.
    #[must_use]
    pub fn mounts(&self) -> MountTracker {
        self.mounts.clone()
    }

    /// View mounted right now.
    #[must_use]
    pub fn mounted_view(&self) -> Option<ViewName> {
        self.mounts.mounted_view()
    }

    /// Toasts and dialogs used by the console.
    #[must_use]
    pub fn notifier(&self) -> Rc<dyn Notifier> {
        Rc::clone(&self.ctx.notifier)
    }

    async fn save_words(&self, list: WordList, text: &str) -> ActionOutcome {
        let Some(ticket) = self
            .mounts
            .current()
            .filter(|ticket| ticket.view() == list.view())
        else {
            tracing::warn!(list = list.key(), "save requested while its view is not mounted");
            return ActionOutcome::Failed;
        };
        let outcome = word_list::save(&self.ctx, &ticket, list, text).await;
        if list == WordList::Vocabulary && outcome == ActionOutcome::Completed {
            self.watch_vocabulary(&ticket).await;
        }
        outcome
    }

    async fn watch_vocabulary(&self, ticket: &ViewTicket) {
        let surface = Rc::clone(&self.ctx.surface);
        let outcome = self
            .monitor
            .run(&self.ctx.api, self.sleeper.as_ref(), ticket, |state| {
                surface.show_readiness(state);
            })
            .await;
        tracing::debug!(?outcome, "readiness monitor finished");
    }

    fn follow(&self, outcome: &ActionOutcome) {
        if let ActionOutcome::Reload(route) = outcome {
            self.reload(route);
        }
    }

    fn render_chrome(&self, highlight: Option<NavLink>) {
        let active = self.ctx.session.is_active();
        self.ctx
            .surface
            .render_login(LoginAffordance::for_session(active));
        let mut nav = NavModel::build(active);
        if let Some(link) = highlight {
            nav.highlight(link);
        }
        self.ctx.surface.render_nav(&nav);
        *self.nav.borrow_mut() = nav;
    }

    fn highlight(&self, link: NavLink) {
        let nav = {
            let mut nav = self.nav.borrow_mut();
            nav.highlight(link);
            nav.clone()
        };
        self.ctx.surface.render_nav(&nav);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::Method;
    use crate::core::polling::{READINESS_INTERVAL, Readiness};
    use crate::core::templates::sample_sources;
    use crate::core::test_support::{FakeUploadSink, Harness};
    use serde_json::json;

    const API: &str = "https://api.example.test/prod";

    fn url(path: &str) -> String {
        format!("{API}/{path}")
    }

    #[test]
    fn login_and_logout_keep_session_and_nav_in_step() {
        let harness = Harness::anonymous();
        harness.console.login("abc");
        assert_eq!(harness.session.get().as_deref(), Some("abc"));
        let nav = harness.surface.last_nav();
        assert!(nav.shows(NavLink::Videos));
        assert!(nav.shows(NavLink::Tweaks));
        assert!(nav.shows(NavLink::Vocabulary));
        assert_eq!(nav.active(), Some(NavLink::Home));
        assert_eq!(harness.surface.last_login(), Some(LoginAffordance::ClearKey));
        assert_eq!(harness.surface.cleared_inputs(), 1);

        harness.console.logout();
        assert_eq!(harness.session.get(), None);
        let nav = harness.surface.last_nav();
        assert!(!nav.shows(NavLink::Videos));
        assert!(!nav.shows(NavLink::Tweaks));
        assert!(!nav.shows(NavLink::Vocabulary));
        assert_eq!(harness.surface.last_login(), Some(LoginAffordance::EnterKey));
        assert_eq!(harness.notifier.successes(), [KEY_SAVED, KEY_CLEARED]);
    }

    #[test]
    fn blank_login_is_rejected() {
        let harness = Harness::anonymous();
        harness.console.login("   ");
        assert!(!harness.session.is_active());
        assert_eq!(harness.notifier.errors(), [KEY_MISSING]);
        assert_eq!(harness.surface.cleared_inputs(), 0);
    }

    #[tokio::test]
    async fn start_renders_chrome_then_dispatches_deep_link() {
        let harness = Harness::signed_in();
        harness.location.set("#video/v7");
        harness.transport.reply(
            Method::Get,
            &url("video/v7"),
            200,
            json!({"video": {"id": "v7", "status": "READY", "name": "intro"}}),
        );
        harness.console.start().await;

        let mounts = harness.surface.mounts();
        assert_eq!(mounts.len(), 2);
        assert_eq!(mounts[0], (ViewName::Video, "<p>loading Video_v7</p>".to_string()));
        assert_eq!(mounts[1], (ViewName::Video, "<p>Video_v7:intro</p>".to_string()));
        assert_eq!(harness.surface.last_nav().active(), Some(NavLink::Videos));
        assert_eq!(harness.surface.last_login(), Some(LoginAffordance::ClearKey));
    }

    #[tokio::test]
    async fn escaped_video_ids_are_requested_once_encoded() {
        let harness = Harness::signed_in();
        harness.location.set("#video/my%20clip");
        harness.transport.reply(
            Method::Get,
            &url("video/my%20clip"),
            200,
            json!({"video": {"id": "my clip", "status": "READY", "name": "intro"}}),
        );
        harness.console.handle_location().await;

        let mounts = harness.surface.mounts();
        assert_eq!(mounts[0], (ViewName::Video, "<p>loading Video_my clip</p>".to_string()));
        assert_eq!(mounts[1], (ViewName::Video, "<p>Video_my clip:intro</p>".to_string()));
        assert_eq!(harness.transport.count(Method::Get, &url("video/my%20clip")), 1);
        assert!(harness.notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn unknown_fragment_leaves_the_view_unchanged() {
        let harness = Harness::signed_in();
        harness.location.set("#tweaks");
        harness.transport.reply(Method::Get, &url("tweaks"), 200, json!({"tweaks": []}));
        harness.console.handle_location().await;
        let before = harness.surface.mounts();

        harness.location.set("#nowhere/at/all");
        harness.console.handle_location().await;
        assert_eq!(harness.surface.mounts(), before);
        assert_eq!(harness.console.mounted_view(), Some(ViewName::Tweaks));
    }

    #[tokio::test]
    async fn videos_load_renders_placeholder_then_buckets() {
        let harness = Harness::signed_in();
        harness.transport.reply(
            Method::Get,
            &url("videos"),
            200,
            json!({"videos": [
                {"id": "r1", "status": "READY", "processedDate": "2020-01-02T10:00:00Z"},
                {"id": "e1", "status": "ERRORED"},
                {"id": "u1", "status": "UPLOADING"},
                {"id": "c1", "status": "COMPLETE"}
            ]}),
        );
        let outcome = harness.console.show(Route::Videos).await;

        assert_eq!(outcome, LoadOutcome::Loaded);
        let mounts = harness.surface.mounts();
        assert_eq!(mounts.len(), 2);
        assert!(mounts[0].1.starts_with("<p>loading</p>"));
        assert!(mounts[1].1.contains("errored:e1,"));
        assert!(mounts[1].1.contains("ready:r1@2020-01-02,"));
        assert!(mounts[1].1.contains("complete:c1,"));
        assert!(!mounts[1].1.contains("u1"));
    }

    #[tokio::test]
    async fn videos_load_failure_freezes_placeholder_with_one_alert() {
        let harness = Harness::signed_in();
        harness.transport.reply(Method::Get, &url("videos"), 401, json!({}));
        let outcome = harness.console.show(Route::Videos).await;

        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(harness.surface.mounts().len(), 1);
        assert_eq!(harness.notifier.alerts(), [videos::LOAD_FAILED]);
    }

    #[tokio::test]
    async fn render_failure_after_load_alerts_instead_of_passing_as_stale() {
        let mut sources = sample_sources();
        sources.videos = "{{#if loading}}<p>loading</p>{{else}}{{missing_helper readyVideos}}{{/if}}"
            .to_string();
        let harness = Harness::signed_in_with(&sources);
        harness.transport.reply(Method::Get, &url("videos"), 200, json!({"videos": []}));
        let outcome = harness.console.show(Route::Videos).await;

        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(harness.surface.mounts().len(), 1);
        assert_eq!(harness.notifier.alerts(), [videos::LOAD_FAILED]);
    }

    #[tokio::test]
    async fn late_response_for_superseded_view_is_discarded() {
        let harness = Harness::signed_in();
        harness.transport.reply(Method::Get, &url("videos"), 200, json!({"videos": []}));
        let mounts = harness.console.mounts();
        harness.transport.on_send(move |_| {
            let _ = mounts.begin(ViewName::Home);
        });

        let outcome = harness.console.show(Route::Videos).await;

        assert_eq!(outcome, LoadOutcome::Superseded);
        assert_eq!(harness.surface.mounts().len(), 1);
    }

    #[tokio::test]
    async fn late_failure_for_superseded_view_raises_no_alert() {
        let harness = Harness::signed_in();
        harness.transport.fail(Method::Get, &url("tweaks"), "offline");
        let mounts = harness.console.mounts();
        harness.transport.on_send(move |_| {
            let _ = mounts.begin(ViewName::Videos);
        });

        let outcome = harness.console.show(Route::Tweaks).await;

        assert_eq!(outcome, LoadOutcome::Superseded);
        assert!(harness.notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_forces_fresh_navigation() {
        let harness = Harness::signed_in();
        harness.location.set("#videos?t=1");
        harness
            .transport
            .reply(Method::Delete, &url("video/v1"), 200, json!({}));

        let outcome = harness
            .console
            .perform(ViewAction::DeleteVideo {
                id: "v1".to_string(),
            })
            .await;

        assert_eq!(outcome, ActionOutcome::Reload(Route::Videos));
        let navigations = harness.location.navigations();
        assert_eq!(navigations.len(), 1);
        assert!(navigations[0].starts_with("videos?t="));
        assert_ne!(navigations[0], "videos?t=1");
        assert_eq!(harness.notifier.confirms(), [videos::CONFIRM_DELETE]);
        assert_eq!(harness.notifier.successes(), [videos::DELETED]);
    }

    #[tokio::test]
    async fn repeated_reloads_always_change_the_cache_buster() {
        let harness = Harness::signed_in();
        harness.console.reload(&Route::Videos);
        harness.console.reload(&Route::Videos);
        let navigations = harness.location.navigations();
        assert_eq!(navigations.len(), 2);
        assert_ne!(navigations[0], navigations[1]);
    }

    #[tokio::test]
    async fn failed_delete_notifies_once_and_stays_put() {
        let harness = Harness::signed_in();
        harness
            .transport
            .reply(Method::Delete, &url("video/v1"), 500, json!({}));

        let outcome = harness
            .console
            .perform(ViewAction::DeleteVideo {
                id: "v1".to_string(),
            })
            .await;

        assert_eq!(outcome, ActionOutcome::Failed);
        assert!(harness.location.navigations().is_empty());
        assert_eq!(harness.notifier.errors(), [videos::DELETE_FAILED]);
    }

    #[tokio::test]
    async fn declined_confirmation_sends_nothing() {
        let harness = Harness::signed_in();
        harness.notifier.answer_confirm(false);

        let outcome = harness
            .console
            .perform(ViewAction::ReprocessVideo {
                id: "v1".to_string(),
            })
            .await;

        assert_eq!(outcome, ActionOutcome::Declined);
        assert!(harness.transport.requests().is_empty());
        assert!(harness.location.navigations().is_empty());
    }

    #[tokio::test]
    async fn reprocess_patches_and_reloads() {
        let harness = Harness::signed_in();
        harness
            .transport
            .reply(Method::Patch, &url("video/v2"), 202, json!({}));

        let outcome = harness
            .console
            .perform(ViewAction::ReprocessVideo {
                id: "v2".to_string(),
            })
            .await;

        assert_eq!(outcome, ActionOutcome::Reload(Route::Videos));
        assert_eq!(harness.notifier.successes(), [videos::REPROCESSING]);
        assert_eq!(harness.location.navigations().len(), 1);
    }

    #[tokio::test]
    async fn saved_tweaks_are_sorted_on_rerender_and_refetch() {
        let harness = Harness::signed_in();
        let tweaks = url("tweaks");
        harness
            .transport
            .reply(Method::Get, &tweaks, 200, json!({"tweaks": []}));
        harness
            .transport
            .reply(Method::Put, &tweaks, 200, json!({"tweaks": ["zeta", "alpha", "mid"]}));
        harness
            .transport
            .reply(Method::Get, &tweaks, 200, json!({"tweaks": ["zeta", "alpha", "mid"]}));
        harness.console.show(Route::Tweaks).await;

        let outcome = harness
            .console
            .perform(ViewAction::SaveWords {
                list: WordList::Tweaks,
                text: "zeta\r\nalpha\nmid".to_string(),
            })
            .await;

        assert_eq!(outcome, ActionOutcome::Completed);
        let put = harness
            .transport
            .requests()
            .into_iter()
            .find(|request| request.method == Method::Put);
        assert_eq!(
            put.and_then(|request| request.body).as_deref(),
            Some(r#"{"tweaks":["zeta","alpha","mid"]}"#)
        );
        assert_eq!(
            harness.surface.last_mount(),
            Some((ViewName::Tweaks, "<p>alpha;mid;zeta;</p>".to_string()))
        );
        assert_eq!(harness.notifier.successes(), ["Saved tweaks"]);

        harness.console.show(Route::Tweaks).await;
        assert_eq!(
            harness.surface.last_mount(),
            Some((ViewName::Tweaks, "<p>alpha;mid;zeta;</p>".to_string()))
        );
    }

    #[tokio::test]
    async fn failed_save_keeps_the_edits_on_screen() {
        let harness = Harness::signed_in();
        let tweaks = url("tweaks");
        harness
            .transport
            .reply(Method::Get, &tweaks, 200, json!({"tweaks": ["a"]}));
        harness.transport.reply(Method::Put, &tweaks, 500, json!({}));
        harness.console.show(Route::Tweaks).await;
        let mounted = harness.surface.mounts().len();

        let outcome = harness
            .console
            .perform(ViewAction::SaveWords {
                list: WordList::Tweaks,
                text: "a\nb".to_string(),
            })
            .await;

        assert_eq!(outcome, ActionOutcome::Failed);
        assert_eq!(harness.surface.mounts().len(), mounted);
        assert_eq!(harness.notifier.errors(), ["Failed to save tweaks"]);
    }

    #[tokio::test]
    async fn vocabulary_view_polls_until_ready() {
        let harness = Harness::signed_in();
        let vocabulary = url("vocabulary");
        harness
            .transport
            .reply(Method::Get, &vocabulary, 200, json!({"vocabulary": ["b", "a"]}));
        harness.transport.reply_text(Method::Head, &vocabulary, 404, "");
        harness.transport.reply_text(Method::Head, &vocabulary, 503, "");
        harness.transport.reply_text(Method::Head, &vocabulary, 200, "");

        let outcome = harness.console.show(Route::Vocabulary).await;

        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(
            harness.surface.readiness(),
            [Readiness::Busy, Readiness::Busy, Readiness::Ready]
        );
        assert_eq!(
            harness.sleeper.delays(),
            [READINESS_INTERVAL, READINESS_INTERVAL]
        );
        assert_eq!(harness.transport.count(Method::Head, &vocabulary), 3);
    }

    #[tokio::test]
    async fn leaving_vocabulary_stops_polling() {
        let harness = Harness::signed_in();
        let vocabulary = url("vocabulary");
        harness
            .transport
            .reply(Method::Get, &vocabulary, 200, json!({"vocabulary": []}));
        harness.transport.reply_text(Method::Head, &vocabulary, 404, "");
        harness.transport.reply_text(Method::Head, &vocabulary, 200, "");
        let mounts = harness.console.mounts();
        harness.sleeper.on_sleep(move || {
            let _ = mounts.begin(ViewName::Home);
        });

        harness.console.show(Route::Vocabulary).await;

        assert_eq!(harness.surface.readiness(), [Readiness::Busy]);
        assert_eq!(harness.transport.count(Method::Head, &vocabulary), 1);
    }

    #[tokio::test]
    async fn caption_download_saves_a_vtt_file() {
        let harness = Harness::signed_in();
        harness.transport.reply_text(
            Method::Get,
            &url("captions/v1"),
            200,
            "WEBVTT\n\n00:00.000 --> 00:01.000\nhi",
        );

        let outcome = harness
            .console
            .perform(ViewAction::DownloadCaptions {
                id: "v1".to_string(),
                name: "intro".to_string(),
            })
            .await;

        assert_eq!(outcome, ActionOutcome::Completed);
        let saved = harness.downloads.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "intro.vtt");
        assert_eq!(saved[0].1, video::VTT_MIME);
        assert!(saved[0].2.starts_with("WEBVTT"));
        assert_eq!(harness.notifier.successes(), [video::CAPTIONS_GENERATED]);
    }

    #[tokio::test]
    async fn caption_save_notifies_without_rerender() {
        let harness = Harness::signed_in();
        harness
            .transport
            .reply(Method::Put, &url("captions/v1"), 200, json!({}));

        let outcome = harness
            .console
            .perform(ViewAction::SaveCaptions {
                id: "v1".to_string(),
                captions: json!("WEBVTT"),
            })
            .await;

        assert_eq!(outcome, ActionOutcome::Completed);
        assert!(harness.surface.mounts().is_empty());
        assert_eq!(harness.notifier.successes(), [video::CAPTIONS_SAVED]);
    }

    #[tokio::test]
    async fn upload_puts_to_the_signed_url_then_reloads_videos() {
        let harness = Harness::signed_in();
        harness.transport.reply(
            Method::Get,
            &url("upload/clip.mp4"),
            200,
            json!({"signedUrl": "https://bucket.example.test/clip.mp4?sig=1"}),
        );
        let sink = FakeUploadSink::new("clip.mp4");

        let outcome = harness.console.upload(&sink).await;

        assert_eq!(outcome, ActionOutcome::Reload(Route::Videos));
        assert_eq!(sink.puts(), ["https://bucket.example.test/clip.mp4?sig=1"]);
        assert_eq!(harness.notifier.successes(), [home::UPLOADED]);
        assert_eq!(harness.location.navigations().len(), 1);
    }

    #[tokio::test]
    async fn home_reflects_session_state() {
        let harness = Harness::anonymous();
        harness.console.show(Route::Home).await;
        assert_eq!(
            harness.surface.last_mount(),
            Some((ViewName::Home, "<h1>home</h1>".to_string()))
        );
        harness.console.login("abc");
        harness.console.show(Route::Home).await;
        assert_eq!(
            harness.surface.last_mount(),
            Some((ViewName::Home, "<h1>home</h1><p>signed-in</p>".to_string()))
        );
    }
}
