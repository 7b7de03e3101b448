use crate::state::Message;
use leptos::*;

const ROW: &str = "flex items-start gap-3 px-5 py-2 hover:bg-gray-50 dark:hover:bg-gray-800";
const MENTION_ROW: &str = "flex items-start gap-3 px-5 py-2 border-l-4 border-amber-400 bg-amber-50 dark:bg-amber-900/20";

/// Row classes; mentions get a highlighted background and a left rule.
pub fn row_class(has_mention: bool) -> &'static str {
    if has_mention {
        MENTION_ROW
    } else {
        ROW
    }
}

#[component]
pub fn MessageView(message: Message) -> impl IntoView {
    let date = message.display_date();
    let class = row_class(message.has_mention);
    let Message {
        content,
        username,
        avatar_url,
        has_mention,
        ..
    } = message;
    view! {
        <div class=class data-mention=has_mention.to_string()>
            <img class="w-10 h-10 rounded-full" src=avatar_url alt=username.clone() />
            <div class="flex flex-col gap-1 min-w-0">
                <div class="flex items-baseline space-x-2 rtl:space-x-reverse">
                    <strong class="text-sm font-semibold text-gray-900 dark:text-white">
                        {username}
                    </strong>
                    <span class="text-xs font-normal text-gray-500 dark:text-gray-400">
                        {date}
                    </span>
                </div>
                <p class="text-sm font-normal text-gray-900 dark:text-white break-words">
                    {content}
                </p>
            </div>
        </div>
    }
}
