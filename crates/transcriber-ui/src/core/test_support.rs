//! In-memory fakes for the console seams.

use crate::core::api::{ApiClient, ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::core::config::sample_config;
use crate::core::console::{Console, Ports};
use crate::core::nav::{LoginAffordance, NavModel};
use crate::core::polling::{Readiness, ReadinessProbe, Sleeper};
use crate::core::ports::{Clock, DownloadError, Downloads, Notifier, UploadSink, ViewSurface};
use crate::core::routes::Location;
use crate::core::session::MemorySession;
use crate::core::startup::{Bootstrap, DocumentLoader, LoadError, SITE_CONFIG_PATH};
use crate::core::templates::{TemplateCache, TemplateSources, ViewName, sample_sources};
use async_trait::async_trait;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

type Script = HashMap<(Method, String), VecDeque<Result<ApiResponse, TransportError>>>;
type SendHook = Box<dyn Fn(&ApiRequest)>;

#[derive(Default)]
struct TransportLog {
    script: RefCell<Script>,
    requests: RefCell<Vec<ApiRequest>>,
    hook: RefCell<Option<SendHook>>,
}

/// Transport answering from per-endpoint response queues.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    log: Rc<TransportLog>,
}

impl FakeTransport {
    fn push(&self, method: Method, url: &str, response: Result<ApiResponse, TransportError>) {
        self.log
            .script
            .borrow_mut()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(response);
    }

    pub(crate) fn reply(&self, method: Method, url: &str, status: u16, body: Value) {
        self.reply_text(method, url, status, &body.to_string());
    }

    pub(crate) fn reply_text(&self, method: Method, url: &str, status: u16, body: &str) {
        self.push(
            method,
            url,
            Ok(ApiResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub(crate) fn fail(&self, method: Method, url: &str, message: &str) {
        self.push(method, url, Err(TransportError::new(message)));
    }

    pub(crate) fn on_send(&self, hook: impl Fn(&ApiRequest) + 'static) {
        *self.log.hook.borrow_mut() = Some(Box::new(hook));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.log.requests.borrow().clone()
    }

    pub(crate) fn count(&self, method: Method, url: &str) -> usize {
        self.log
            .requests
            .borrow()
            .iter()
            .filter(|request| request.method == method && request.url == url)
            .count()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method, request.url.clone());
        self.log.requests.borrow_mut().push(request.clone());
        if let Some(hook) = self.log.hook.borrow().as_ref() {
            hook(&request);
        }
        self.log
            .script
            .borrow_mut()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(TransportError::new(format!(
                    "no scripted response for {} {}",
                    key.0, key.1
                )))
            })
    }
}

/// Client over `transport` with the sample configuration.
pub(crate) fn client_with(transport: &FakeTransport, session: MemorySession) -> ApiClient {
    ApiClient::new(
        Rc::new(transport.clone()),
        Rc::new(session),
        Rc::new(sample_config()),
    )
}

/// Records every surface effect.
#[derive(Default)]
pub(crate) struct FakeSurface {
    mounts: RefCell<Vec<(ViewName, String)>>,
    navs: RefCell<Vec<NavModel>>,
    logins: RefCell<Vec<LoginAffordance>>,
    cleared: Cell<usize>,
    readiness: RefCell<Vec<Readiness>>,
}

impl FakeSurface {
    pub(crate) fn mounts(&self) -> Vec<(ViewName, String)> {
        self.mounts.borrow().clone()
    }

    pub(crate) fn last_mount(&self) -> Option<(ViewName, String)> {
        self.mounts.borrow().last().cloned()
    }

    pub(crate) fn last_nav(&self) -> NavModel {
        self.navs.borrow().last().cloned().unwrap_or_default()
    }

    pub(crate) fn last_login(&self) -> Option<LoginAffordance> {
        self.logins.borrow().last().copied()
    }

    pub(crate) fn cleared_inputs(&self) -> usize {
        self.cleared.get()
    }

    pub(crate) fn readiness(&self) -> Vec<Readiness> {
        self.readiness.borrow().clone()
    }
}

impl ViewSurface for FakeSurface {
    fn mount(&self, view: ViewName, markup: String) {
        self.mounts.borrow_mut().push((view, markup));
    }

    fn render_nav(&self, nav: &NavModel) {
        self.navs.borrow_mut().push(nav.clone());
    }

    fn render_login(&self, affordance: LoginAffordance) {
        self.logins.borrow_mut().push(affordance);
    }

    fn clear_login_input(&self) {
        self.cleared.set(self.cleared.get() + 1);
    }

    fn show_readiness(&self, readiness: Readiness) {
        self.readiness.borrow_mut().push(readiness);
    }
}

/// Records notifications; confirmations answer with a configurable value.
pub(crate) struct FakeNotifier {
    successes: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
    confirms: RefCell<Vec<String>>,
    answer: Cell<bool>,
}

impl Default for FakeNotifier {
    fn default() -> Self {
        Self {
            successes: RefCell::default(),
            errors: RefCell::default(),
            alerts: RefCell::default(),
            confirms: RefCell::default(),
            answer: Cell::new(true),
        }
    }
}

impl FakeNotifier {
    pub(crate) fn answer_confirm(&self, answer: bool) {
        self.answer.set(answer);
    }

    pub(crate) fn successes(&self) -> Vec<String> {
        self.successes.borrow().clone()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub(crate) fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }
}

impl Notifier for FakeNotifier {
    fn success(&self, message: &str) {
        self.successes.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}

/// Location whose writes are recorded but never dispatched.
#[derive(Default)]
pub(crate) struct FakeLocation {
    fragment: RefCell<String>,
    navigations: RefCell<Vec<String>>,
}

impl FakeLocation {
    pub(crate) fn set(&self, fragment: &str) {
        *self.fragment.borrow_mut() = fragment.to_string();
    }

    pub(crate) fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }
}

impl Location for FakeLocation {
    fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    fn set_fragment(&self, fragment: &str) {
        self.set(fragment);
        self.navigations.borrow_mut().push(fragment.to_string());
    }
}

/// Sleeper that returns at once, recording each requested delay.
#[derive(Default)]
pub(crate) struct FakeSleeper {
    delays: RefCell<Vec<Duration>>,
    hook: RefCell<Option<Box<dyn Fn()>>>,
}

impl FakeSleeper {
    pub(crate) fn on_sleep(&self, hook: impl Fn() + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }

    pub(crate) fn delays(&self) -> Vec<Duration> {
        self.delays.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Sleeper for FakeSleeper {
    async fn sleep(&self, delay: Duration) {
        self.delays.borrow_mut().push(delay);
        if let Some(hook) = self.hook.borrow().as_ref() {
            hook();
        }
    }
}

/// Probe answering from a fixed script, then `false` forever.
pub(crate) struct ScriptedProbe {
    answers: RefCell<VecDeque<bool>>,
    calls: Cell<usize>,
}

impl ScriptedProbe {
    pub(crate) fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl ReadinessProbe for ScriptedProbe {
    async fn probe(&self) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }
}

/// Records offered downloads.
#[derive(Default)]
pub(crate) struct FakeDownloads {
    saved: RefCell<Vec<(String, String, String)>>,
}

impl FakeDownloads {
    pub(crate) fn saved(&self) -> Vec<(String, String, String)> {
        self.saved.borrow().clone()
    }
}

impl Downloads for FakeDownloads {
    fn save(&self, file_name: &str, mime: &str, contents: &str) -> Result<(), DownloadError> {
        self.saved.borrow_mut().push((
            file_name.to_string(),
            mime.to_string(),
            contents.to_string(),
        ));
        Ok(())
    }
}

/// Clock that advances one millisecond per reading.
pub(crate) struct FakeClock {
    now: Cell<i64>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            now: Cell::new(1_700_000_000_000),
        }
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> i64 {
        let now = self.now.get();
        self.now.set(now + 1);
        now
    }
}

/// Upload sink that records target URLs and always succeeds.
pub(crate) struct FakeUploadSink {
    name: String,
    puts: RefCell<Vec<String>>,
}

impl FakeUploadSink {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            puts: RefCell::default(),
        }
    }

    pub(crate) fn puts(&self) -> Vec<String> {
        self.puts.borrow().clone()
    }
}

#[async_trait(?Send)]
impl UploadSink for FakeUploadSink {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    async fn put(&self, signed_url: &str) -> Result<(), TransportError> {
        self.puts.borrow_mut().push(signed_url.to_string());
        Ok(())
    }
}

/// Static document loader backed by a path map.
pub(crate) struct FakeLoader {
    documents: RefCell<HashMap<String, String>>,
    requested: RefCell<Vec<String>>,
}

impl FakeLoader {
    /// Loader holding the sample configuration and every sample template.
    pub(crate) fn complete() -> Self {
        let TemplateSources {
            home,
            videos,
            video,
            tweaks,
            vocabulary,
        } = sample_sources();
        let config = sample_config();
        let config_json = serde_json::json!({
            "version": config.version,
            "api_base": config.api_base,
            "api_videos": config.api_videos,
            "api_video": config.api_video,
            "api_captions": config.api_captions,
            "api_tweaks": config.api_tweaks,
            "api_vocabulary": config.api_vocabulary,
            "api_upload": config.api_upload,
        });
        let documents = [
            (SITE_CONFIG_PATH.to_string(), config_json.to_string()),
            (ViewName::Home.template_path(), home),
            (ViewName::Videos.template_path(), videos),
            (ViewName::Video.template_path(), video),
            (ViewName::Tweaks.template_path(), tweaks),
            (ViewName::Vocabulary.template_path(), vocabulary),
        ];
        Self {
            documents: RefCell::new(documents.into_iter().collect()),
            requested: RefCell::default(),
        }
    }

    pub(crate) fn insert(&self, path: &str, text: &str) {
        self.documents
            .borrow_mut()
            .insert(path.to_string(), text.to_string());
    }

    pub(crate) fn remove(&self, path: &str) {
        self.documents.borrow_mut().remove(path);
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

#[async_trait(?Send)]
impl DocumentLoader for FakeLoader {
    async fn load(&self, path: &str) -> Result<String, LoadError> {
        self.requested.borrow_mut().push(path.to_string());
        self.documents
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError {
                path: path.to_string(),
                message: "404 Not Found".to_string(),
            })
    }
}

/// A console wired to recording fakes.
pub(crate) struct Harness {
    pub(crate) transport: FakeTransport,
    pub(crate) session: MemorySession,
    pub(crate) surface: Rc<FakeSurface>,
    pub(crate) notifier: Rc<FakeNotifier>,
    pub(crate) downloads: Rc<FakeDownloads>,
    pub(crate) sleeper: Rc<FakeSleeper>,
    pub(crate) location: Rc<FakeLocation>,
    pub(crate) console: Console,
}

impl Harness {
    pub(crate) fn anonymous() -> Self {
        Self::with_session(MemorySession::default())
    }

    pub(crate) fn signed_in() -> Self {
        Self::with_session(MemorySession::with_token("test-key"))
    }

    pub(crate) fn signed_in_with(sources: &TemplateSources) -> Self {
        Self::build(MemorySession::with_token("test-key"), sources)
    }

    fn with_session(session: MemorySession) -> Self {
        Self::build(session, &sample_sources())
    }

    fn build(session: MemorySession, sources: &TemplateSources) -> Self {
        let transport = FakeTransport::default();
        let surface = Rc::new(FakeSurface::default());
        let notifier = Rc::new(FakeNotifier::default());
        let downloads = Rc::new(FakeDownloads::default());
        let sleeper = Rc::new(FakeSleeper::default());
        let location = Rc::new(FakeLocation::default());
        let templates =
            TemplateCache::compile(sources).expect("sample templates compile");
        let boot = Bootstrap {
            config: sample_config(),
            templates,
        };
        let ports = Ports {
            surface: surface.clone(),
            notifier: notifier.clone(),
            downloads: downloads.clone(),
            sleeper: sleeper.clone(),
            location: location.clone(),
            clock: Rc::new(FakeClock::default()),
        };
        let console = Console::new(
            boot,
            Rc::new(session.clone()),
            Rc::new(transport.clone()),
            ports,
        )
        .expect("console routes register");
        Self {
            transport,
            session,
            surface,
            notifier,
            downloads,
            sleeper,
            location,
            console,
        }
    }
}
