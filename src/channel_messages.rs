use std::cell::Cell;
use std::rc::Rc;

use leptos::html::Div;
use leptos::*;

use crate::api::MessageApi;
use crate::channel::{self, ChannelState, LoadState};
use crate::loading::Loading;
use crate::message::MessageView;
use crate::new_message::NewMessage;
use crate::scroll::{self, ScrollMetrics, ScrollPolicy};
use crate::state::User;

fn metrics_of(element: &web_sys::Element) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: element.scroll_top(),
        scroll_height: element.scroll_height(),
        client_height: element.client_height(),
    }
}

fn unsent_notice(count: usize) -> String {
    if count == 1 {
        "1 message sent since the history failed to load".to_owned()
    } else {
        format!("{count} messages sent since the history failed to load")
    }
}

/// The channel history with its composer.
///
/// `user` is resolved once by the caller and never re-read. The history is
/// fetched once when the view is created.
#[component]
pub fn ChannelMessages(
    api: Rc<dyn MessageApi>,
    user: User,
    #[prop(optional)] scroll_policy: ScrollPolicy,
) -> impl IntoView {
    let state = create_rw_signal(ChannelState::new());
    let messages_ref = create_node_ref::<Div>();
    // Whether the reader was at the bottom before the latest change.
    let at_bottom = Rc::new(Cell::new(true));

    let load_api = Rc::clone(&api);
    spawn_local(async move {
        let result = channel::load(load_api.as_ref()).await;
        state.update(|state| state.finish_load(result));
    });

    let load_state = create_memo(move |_| state.with(|state| state.load_state().clone()));
    let revision = create_memo(move |_| state.with(ChannelState::revision));
    let post_error =
        create_memo(move |_| state.with(|state| state.post_error().map(str::to_owned)));

    let pinned = Rc::clone(&at_bottom);
    create_effect(move |_| {
        let _ = revision.get();
        let Some(container) = messages_ref.get() else {
            return;
        };
        let pinned = Rc::clone(&pinned);
        // Wait for the new rows to be laid out.
        request_animation_frame(move || {
            let was_at_bottom = pinned.get();
            if let Some(offset) =
                scroll::pin_target(scroll_policy, was_at_bottom, metrics_of(&container))
            {
                container.set_scroll_top(offset);
                pinned.set(true);
            }
        });
    });

    let handle_new_message = move |content: String| {
        let api = Rc::clone(&api);
        let user = user.clone();
        spawn_local(async move {
            let result = channel::submit(api.as_ref(), &user, content).await;
            state.update(|state| state.finish_post(result));
        });
    };

    view! {
        <div
            class="grow flex flex-col h-dvh max-h-dvh dark:bg-gray-900"
            aria-busy=move || state.with(ChannelState::is_loading).to_string()
        >
            {move || match load_state.get() {
                LoadState::Loading => view! { <Loading /> }.into_view(),
                LoadState::Failed(reason) => {
                    view! {
                        <div
                            class="grow flex flex-col items-center justify-center gap-2 text-red-600 dark:text-red-400"
                            role="alert"
                        >
                            <h3 class="text-lg font-semibold">"Could not load messages"</h3>
                            <p class="text-sm">{reason}</p>
                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                "Messages you send are delivered but only show up after a reload."
                            </p>
                            {move || {
                                let unseen = state.with(ChannelState::unseen_posts);
                                (unseen > 0)
                                    .then(|| {
                                        view! {
                                            <p class="text-sm font-medium">{unsent_notice(unseen)}</p>
                                        }
                                    })
                            }}
                        </div>
                    }
                        .into_view()
                }
                LoadState::Ready => {
                    let at_bottom = Rc::clone(&at_bottom);
                    let on_scroll = move |_| {
                        if let Some(container) = messages_ref.get_untracked() {
                            at_bottom.set(metrics_of(&container).is_at_bottom());
                        }
                    };
                    view! {
                        <div
                            node_ref=messages_ref
                            class="grow overflow-y-auto py-4"
                            on:scroll=on_scroll
                        >
                            <For
                                each=move || state.with(ChannelState::entries)
                                key=|entry| entry.0
                                children=|(_, message)| view! { <MessageView message /> }
                            />
                        </div>
                    }
                        .into_view()
                }
            }}
            {move || {
                post_error
                    .get()
                    .map(|error| {
                        view! {
                            <div
                                class="flex items-center justify-between mx-3 mb-2 px-4 py-2 text-sm text-red-800 rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400"
                                role="alert"
                            >
                                <span>"Message not sent: " {error}</span>
                                <button
                                    type="button"
                                    class="font-medium underline"
                                    on:click=move |_| state.update(ChannelState::dismiss_post_error)
                                >
                                    "Dismiss"
                                </button>
                            </div>
                        }
                    })
            }}
            <NewMessage handle_new_message />
        </div>
    }
}
