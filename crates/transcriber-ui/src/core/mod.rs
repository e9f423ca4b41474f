//! Core, DOM-free primitives and controllers for the console.
pub mod api;
pub mod config;
pub mod console;
pub mod mount;
pub mod nav;
pub mod polling;
pub mod ports;
pub mod routes;
pub mod session;
pub mod startup;
pub mod store;
pub mod templates;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
