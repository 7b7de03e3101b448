use std::rc::Rc;

use crate::api::{HttpApi, MessageApi};
use crate::channel_messages::ChannelMessages;
use crate::config::ClientConfig;
use crate::identity;
use leptos::*;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let user = identity::load_current_user(&config.identity_key);
    let scroll_policy = config.scroll_policy;

    match HttpApi::new(&config.api_base_url) {
        Ok(api) => {
            log::info!("Using message API at {}", config.api_base_url);
            let api: Rc<dyn MessageApi> = Rc::new(api);
            view! { <ChannelMessages api user scroll_policy /> }.into_view()
        }
        Err(err) => {
            log::error!("Cannot talk to {}: {err}", config.api_base_url);
            view! {
                <div
                    class="flex items-center justify-center w-full h-screen text-red-600 dark:text-red-400"
                    role="alert"
                >
                    {format!("Misconfigured message API ({err})")}
                </div>
            }
                .into_view()
        }
    }
}
