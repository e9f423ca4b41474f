//! Navigation bar and API key control.

use crate::app::ConsoleCtx;
use crate::core::nav::{LoginAffordance, NavItem};
use crate::core::store::ShellStore;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct NavBarProps {
    pub(crate) ctx: ConsoleCtx,
}

#[function_component(NavBar)]
pub(crate) fn nav_bar(props: &NavBarProps) -> Html {
    let nav = use_selector(|store: &ShellStore| store.nav.clone());
    html! {
        <nav class="site-nav">
            <ul id="navBar">
                {for nav.items().iter().map(nav_item)}
            </ul>
            <LoginControl ctx={props.ctx.clone()} />
        </nav>
    }
}

fn nav_item(item: &NavItem) -> Html {
    html! {
        <li>
            <a
                id={item.link.id()}
                href={item.link.href()}
                class={classes!(item.active.then_some("active"))}
            >
                {item.link.label()}
            </a>
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct LoginControlProps {
    pub(crate) ctx: ConsoleCtx,
}

#[function_component(LoginControl)]
pub(crate) fn login_control(props: &LoginControlProps) -> Html {
    let login = use_selector(|store: &ShellStore| store.login);
    let login_epoch = use_selector(|store: &ShellStore| store.login_epoch);
    let input = use_node_ref();

    match *login {
        LoginAffordance::EnterKey => {
            let onsubmit = {
                let console = props.ctx.console.clone();
                let input = input.clone();
                Callback::from(move |event: SubmitEvent| {
                    event.prevent_default();
                    let value = input
                        .cast::<HtmlInputElement>()
                        .map(|field| field.value())
                        .unwrap_or_default();
                    console.login(&value);
                })
            };
            html! {
                <form id="loginForm" class="login" {onsubmit}>
                    <input
                        key={*login_epoch}
                        ref={input}
                        id="apiKey"
                        type="password"
                        placeholder="API key"
                        autocomplete="off"
                    />
                    <button type="submit" class="solid">{"Login"}</button>
                </form>
            }
        }
        LoginAffordance::ClearKey => {
            let onclick = {
                let console = props.ctx.console.clone();
                Callback::from(move |_| console.logout())
            };
            html! {
                <div id="logoutForm" class="login">
                    <button type="button" class="ghost" {onclick}>{"Logout"}</button>
                </div>
            }
        }
    }
}
