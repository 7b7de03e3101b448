use leptos::leptos_dom::ev::SubmitEvent;
use leptos::*;

/// Draft to hand to the channel, or `None` for a blank input.
pub fn prepare(draft: &str) -> Option<String> {
    if draft.trim().is_empty() {
        None
    } else {
        Some(draft.to_owned())
    }
}

/// Message composer. Calls `handle_new_message` with the draft on submit and
/// clears itself; posting is up to the caller.
#[component]
pub fn NewMessage<F>(handle_new_message: F) -> impl IntoView
where
    F: Fn(String) + 'static,
{
    let (draft, set_draft) = create_signal(String::new());

    let update_draft = move |ev| {
        set_draft.set(event_target_value(&ev));
    };
    let send_message = move |ev: SubmitEvent| {
        ev.prevent_default();
        if let Some(content) = prepare(&draft.get_untracked()) {
            handle_new_message(content);
            set_draft.set(String::new());
        }
    };

    view! {
        <form class="w-full" on:submit=send_message>
            <label for="new-message" class="sr-only">
                "Your message"
            </label>
            <div class="flex items-center px-3 py-2 bg-gray-50 dark:bg-gray-700">
                <input
                    id="new-message"
                    autocomplete="off"
                    class="block mx-4 p-2.5 w-full text-sm text-gray-900 bg-white rounded-lg border border-gray-300 focus:ring-blue-500 focus:border-blue-500 dark:bg-gray-800 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white"
                    placeholder="Message #channel"
                    on:input=update_draft
                    prop:value=draft
                />
                <button
                    type="submit"
                    class="inline-flex justify-center p-2 text-blue-600 rounded-full cursor-pointer hover:bg-blue-100 dark:text-blue-500 dark:hover:bg-gray-600"
                >
                    <svg
                        class="w-5 h-5 rotate-90 rtl:-rotate-90"
                        aria-hidden="true"
                        xmlns="http://www.w3.org/2000/svg"
                        fill="currentColor"
                        viewBox="0 0 18 20"
                    >
                        <path d="m17.914 18.594-8-18a1 1 0 0 0-1.828 0l-8 18a1 1 0 0 0 1.157 1.376L8 18.281V9a1 1 0 0 1 2 0v9.281l6.758 1.689a1 1 0 0 0 1.156-1.376Z" />
                    </svg>
                    <span class="sr-only">"Send message"</span>
                </button>
            </div>
        </form>
    }
}
