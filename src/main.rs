mod api;
mod app;
mod channel;
mod channel_messages;
mod config;
mod identity;
mod loading;
mod message;
mod new_message;
mod scroll;
mod state;

use app::*;
use config::ClientConfig;
use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Trace) {
        leptos::logging::warn!("Logger already installed: {err}");
    }
    let config = ClientConfig::from_build_env();
    log::set_max_level(config.log_level().to_level_filter());
    mount_to_body(move || {
        view! { <App config=config.clone() /> }
    })
}
