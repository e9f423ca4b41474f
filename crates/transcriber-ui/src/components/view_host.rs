//! Host element for template-rendered views.
//!
//! # Design
//! - Markup is applied on every epoch change, never diffed by Yew.
//! - Buttons inside templates carry `data-action`; one delegated listener
//!   turns them into console actions.
//! - `data-source` names the element whose value an action submits.

use crate::app::{ConsoleCtx, FileUpload};
use crate::core::polling::Readiness;
use crate::core::store::ShellStore;
use crate::core::views::{ATTR_SOURCE_VALUE, ViewAction};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yewdux::prelude::use_selector;

const UPLOAD_ACTION: &str = "upload-video";
const BUSY_BANNER: &str = "#beingUpdated";
const ACTION_CONTROLS: [&str; 2] = ["#topButton", "#bottomButton"];

#[derive(Properties, PartialEq)]
pub(crate) struct ViewHostProps {
    pub(crate) ctx: ConsoleCtx,
}

#[function_component(ViewHost)]
pub(crate) fn view_host(props: &ViewHostProps) -> Html {
    let view = use_selector(|store: &ShellStore| store.view.clone());
    let readiness = use_selector(|store: &ShellStore| store.readiness);
    let host = use_node_ref();
    let epoch = (*view).as_ref().map_or(0, |mounted| mounted.epoch);

    {
        let host = host.clone();
        let view = view.clone();
        use_effect_with_deps(
            move |_| {
                if let (Some(element), Some(mounted)) =
                    (host.cast::<Element>(), (*view).as_ref())
                {
                    element.set_inner_html(&mounted.markup);
                    tracing::debug!(view = %mounted.view, epoch = mounted.epoch, "view mounted");
                }
                || ()
            },
            epoch,
        );
    }
    {
        let host = host.clone();
        use_effect_with_deps(
            move |(_, readiness): &(u64, Option<Readiness>)| {
                if let (Some(element), Some(readiness)) = (host.cast::<Element>(), readiness) {
                    apply_readiness(&element, *readiness);
                }
                || ()
            },
            (epoch, *readiness),
        );
    }

    let onclick = {
        let ctx = props.ctx.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(trigger) = event
                .target_dyn_into::<Element>()
                .and_then(|target| target.closest("[data-action]").ok().flatten())
            else {
                return;
            };
            event.prevent_default();
            dispatch(&ctx, &trigger);
        })
    };
    let onsubmit = Callback::from(|event: SubmitEvent| event.prevent_default());

    html! {
        <main id="content" ref={host} {onclick} {onsubmit}></main>
    }
}

fn apply_readiness(host: &Element, readiness: Readiness) {
    let busy = readiness == Readiness::Busy;
    set_hidden(host, BUSY_BANNER, !busy);
    for selector in ACTION_CONTROLS {
        set_hidden(host, selector, busy);
    }
}

fn set_hidden(host: &Element, selector: &str, hidden: bool) {
    let Ok(Some(element)) = host.query_selector(selector) else {
        return;
    };
    let result = if hidden {
        element.set_attribute("hidden", "")
    } else {
        element.remove_attribute("hidden")
    };
    if result.is_err() {
        tracing::warn!(selector, "failed to toggle visibility");
    }
}

fn dispatch(ctx: &ConsoleCtx, trigger: &Element) {
    let Some(action) = trigger.get_attribute("data-action") else {
        return;
    };
    let console = ctx.console.clone();
    if action == UPLOAD_ACTION {
        let Some(file) = source_element(trigger)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            tracing::debug!("upload requested without a selected file");
            return;
        };
        yew::platform::spawn_local(async move {
            let outcome = console.upload(&FileUpload::new(file)).await;
            tracing::debug!(?outcome, "upload finished");
        });
        return;
    }

    let attr = |key: &str| {
        if key == ATTR_SOURCE_VALUE {
            source_element(trigger).and_then(|element| element_value(&element))
        } else {
            trigger.get_attribute(&format!("data-{key}"))
        }
    };
    match ViewAction::from_markup(&action, attr) {
        Some(view_action) => yew::platform::spawn_local(async move {
            let outcome = console.perform(view_action).await;
            tracing::debug!(?outcome, "action finished");
        }),
        None => tracing::warn!(action = %action, "unrecognised or incomplete view action"),
    }
}

fn source_element(trigger: &Element) -> Option<Element> {
    let id = trigger.get_attribute("data-source")?;
    gloo::utils::document().get_element_by_id(&id)
}

fn element_value(element: &Element) -> Option<String> {
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    element
        .dyn_ref::<HtmlInputElement>()
        .map(HtmlInputElement::value)
}
