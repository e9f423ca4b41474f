//! Browser implementations of the console's effect seams.
//!
//! # Design
//! - View, nav, login, readiness, and toast state flow through the yewdux
//!   store; components re-render from selectors.
//! - Blocking alerts and confirmations use native dialogs.
//! - Downloads build a blob URL and click a transient anchor.

use crate::core::nav::{LoginAffordance, NavModel};
use crate::core::polling::{Readiness, Sleeper};
use crate::core::ports::{Clock, DownloadError, Downloads, Notifier, ViewSurface};
use crate::core::store::{ShellStore, ToastKind};
use crate::core::templates::ViewName;
use async_trait::async_trait;
use gloo::dialogs;
use gloo::file::{Blob, ObjectUrl};
use gloo::timers::callback::Timeout;
use gloo::utils::document;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yewdux::prelude::Dispatch;

/// Delay before a download's blob URL is revoked.
const OBJECT_URL_TTL_MS: u32 = 10_000;

/// Store-backed surface shared by every seam.
#[derive(Clone)]
pub(crate) struct StoreSurface {
    dispatch: Dispatch<ShellStore>,
}

impl StoreSurface {
    pub(crate) fn new(dispatch: Dispatch<ShellStore>) -> Self {
        Self { dispatch }
    }
}

impl ViewSurface for StoreSurface {
    fn mount(&self, view: ViewName, markup: String) {
        self.dispatch.reduce_mut(move |store| store.mount(view, markup));
    }

    fn render_nav(&self, nav: &NavModel) {
        let nav = nav.clone();
        self.dispatch.reduce_mut(move |store| store.nav = nav);
    }

    fn render_login(&self, affordance: LoginAffordance) {
        self.dispatch.reduce_mut(|store| store.login = affordance);
    }

    fn clear_login_input(&self) {
        self.dispatch.reduce_mut(ShellStore::clear_login_input);
    }

    fn show_readiness(&self, readiness: Readiness) {
        self.dispatch
            .reduce_mut(|store| store.readiness = Some(readiness));
    }
}

impl Notifier for StoreSurface {
    fn success(&self, message: &str) {
        self.dispatch.reduce_mut(|store| {
            store.push_toast(ToastKind::Success, message);
        });
    }

    fn error(&self, message: &str) {
        self.dispatch.reduce_mut(|store| {
            store.push_toast(ToastKind::Error, message);
        });
    }

    fn alert(&self, message: &str) {
        dialogs::alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        dialogs::confirm(message)
    }
}

impl Downloads for StoreSurface {
    fn save(&self, file_name: &str, mime: &str, contents: &str) -> Result<(), DownloadError> {
        let failed = |message: String| DownloadError { message };
        let url = ObjectUrl::from(Blob::new_with_options(contents, Some(mime)));
        let anchor = document()
            .create_element("a")
            .map_err(|err| failed(format!("{err:?}")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| failed("anchor is not an html element".to_string()))?;
        anchor
            .set_attribute("href", &url)
            .and_then(|()| anchor.set_attribute("download", file_name))
            .map_err(|err| failed(format!("{err:?}")))?;
        anchor.click();
        Timeout::new(OBJECT_URL_TTL_MS, move || drop(url)).forget();
        Ok(())
    }
}

#[async_trait(?Send)]
impl Sleeper for StoreSurface {
    async fn sleep(&self, delay: Duration) {
        gloo_timers::future::sleep(delay).await;
    }
}

impl Clock for StoreSurface {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
