//! # appt-client
//!
//! Leptos + WASM frontend for the appointment application's sign-in and
//! sign-up flows.
//!
//! The flow itself is plain Rust and runs anywhere: [`form`] holds field
//! state, [`validate`] checks records, [`submit`] drives the remote call and
//! interprets its reply, [`state::session`] keeps the signed-in user, and
//! [`state::toast`] holds the notification. [`pages`] and [`app`] bind that
//! flow to the browser under the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod form;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod submit;
pub mod util;
pub mod validate;

/// Browser entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
