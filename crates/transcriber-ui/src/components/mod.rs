//! Yew components for the console shell.

pub(crate) mod nav;
pub(crate) mod toast;
pub(crate) mod view_host;
