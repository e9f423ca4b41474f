//! Browser shell: boot sequence, root component, and seam implementations.
//!
//! # Design
//! - Nothing renders until the configuration and every template have loaded;
//!   a startup failure is reported to the browser console only.
//! - The console is built once and shared with components through props.
//! - `hashchange` drives routing; actions reach the console through the view
//!   host's delegated listener.

mod api;
mod logging;
mod preferences;
mod routes;
mod surface;
mod transport;

pub(crate) use api::ConsoleCtx;
pub(crate) use transport::FileUpload;

use crate::components::nav::NavBar;
use crate::components::toast::ToastHost;
use crate::components::view_host::ViewHost;
use crate::core::console::{Console, Ports};
use crate::core::startup::bootstrap;
use crate::core::store::ShellStore;
use anyhow::anyhow;
use gloo::events::EventListener;
use gloo::utils::{document, window};
use logging::{DEFAULT_LOG_LEVEL, init_logging};
use preferences::LocalSession;
use routes::HashLocation;
use std::rc::Rc;
use surface::StoreSurface;
use transport::{FetchLoader, FetchTransport};
use yew::prelude::*;
use yewdux::prelude::Dispatch;

#[derive(Properties, PartialEq)]
struct ConsoleAppProps {
    ctx: ConsoleCtx,
}

#[function_component(ConsoleApp)]
fn console_app(props: &ConsoleAppProps) -> Html {
    html! {
        <div class="console-shell">
            <header class="site-header">
                <strong class="brand">{"Transcriber"}</strong>
                <NavBar ctx={props.ctx.clone()} />
            </header>
            <ViewHost ctx={props.ctx.clone()} />
            <ToastHost />
        </div>
    }
}

async fn boot() -> anyhow::Result<()> {
    let boot = bootstrap(&FetchLoader)
        .await
        .map_err(|err| anyhow!("startup failed: {err}"))?;

    let surface = Rc::new(StoreSurface::new(Dispatch::<ShellStore>::new()));
    let ports = Ports {
        surface: surface.clone(),
        notifier: surface.clone(),
        downloads: surface.clone(),
        sleeper: surface.clone(),
        location: Rc::new(HashLocation),
        clock: surface,
    };
    let console = Rc::new(
        Console::new(boot, Rc::new(LocalSession), Rc::new(FetchTransport), ports)
            .map_err(|err| anyhow!("route table rejected: {err}"))?,
    );

    let props = ConsoleAppProps {
        ctx: ConsoleCtx::new(console.clone()),
    };
    match document().get_element_by_id("root") {
        Some(root) => yew::Renderer::<ConsoleApp>::with_root_and_props(root, props).render(),
        None => yew::Renderer::<ConsoleApp>::with_props(props).render(),
    };

    let listener = {
        let console = console.clone();
        EventListener::new(&window(), "hashchange", move |_event| {
            let console = console.clone();
            yew::platform::spawn_local(async move { console.handle_location().await });
        })
    };
    listener.forget();

    console.start().await;
    Ok(())
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = init_logging(DEFAULT_LOG_LEVEL) {
        gloo::console::error!(format!("logging unavailable: {err}"));
    }
    yew::platform::spawn_local(async {
        if let Err(err) = boot().await {
            tracing::error!(error = %err, "console failed to start");
        }
    });
}
