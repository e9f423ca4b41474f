//! Hash-fragment location for the browser.

use crate::core::routes::Location;
use gloo::console;
use gloo::utils::window;

/// `window.location.hash`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct HashLocation;

impl Location for HashLocation {
    fn fragment(&self) -> String {
        window().location().hash().unwrap_or_default()
    }

    fn set_fragment(&self, fragment: &str) {
        if let Err(err) = window().location().set_hash(fragment) {
            console::error!("failed to update location hash", fragment, err);
        }
    }
}
