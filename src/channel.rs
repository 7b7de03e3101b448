//! Channel view state, independent of the DOM.
//!
//! The list starts empty, is replaced once by the initial fetch and then
//! only grows as posts come back from the server. `revision` is bumped on
//! every list change so the view can re-pin its scroll position.

use crate::api::{ApiError, MessageApi};
use crate::state::{welcome_message, Message, NewMessageRequest, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Identity of a rendered row. Server ids may repeat (a post can race the
/// initial fetch), so history rows are keyed by position as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Welcome,
    Message { index: usize, id: i64 },
}

#[derive(Debug, Clone)]
pub struct ChannelState {
    messages: Vec<Message>,
    load: LoadState,
    post_error: Option<String>,
    unseen_posts: usize,
    revision: u64,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            load: LoadState::Loading,
            post_error: None,
            unseen_posts: 0,
            revision: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn post_error(&self) -> Option<&str> {
        self.post_error.as_deref()
    }

    /// Posts accepted by the server while the history could not be shown.
    pub fn unseen_posts(&self) -> usize {
        self.unseen_posts
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Rows to render: the welcome message followed by the channel history.
    /// Empty until the initial fetch succeeded.
    pub fn entries(&self) -> Vec<(EntryKey, Message)> {
        if self.load != LoadState::Ready {
            return Vec::new();
        }
        let mut entries = Vec::with_capacity(self.messages.len() + 1);
        entries.push((EntryKey::Welcome, welcome_message()));
        entries.extend(
            self.messages()
                .iter()
                .enumerate()
                .map(|(index, message)| {
                    let key = EntryKey::Message {
                        index,
                        id: message.id,
                    };
                    (key, message.clone())
                }),
        );
        entries
    }

    pub fn finish_load(&mut self, result: Result<Vec<Message>, ApiError>) {
        match result {
            Ok(messages) => {
                self.messages = messages;
                self.load = LoadState::Ready;
                self.revision += 1;
            }
            Err(err) => {
                self.load = LoadState::Failed(err.to_string());
            }
        }
    }

    /// Appends to the list as it is now, not as it was when the post started.
    pub fn finish_post(&mut self, result: Result<Message, ApiError>) {
        match result {
            Ok(message) => {
                if matches!(self.load, LoadState::Failed(_)) {
                    self.unseen_posts += 1;
                }
                self.messages.push(message);
                self.post_error = None;
                self.revision += 1;
            }
            Err(err) => {
                self.post_error = Some(err.to_string());
            }
        }
    }

    pub fn dismiss_post_error(&mut self) {
        self.post_error = None;
    }
}

/// Fetch the channel history.
pub async fn load(api: &dyn MessageApi) -> Result<Vec<Message>, ApiError> {
    match api.fetch_messages().await {
        Ok(messages) => {
            log::info!("Loaded {} messages", messages.len());
            Ok(messages)
        }
        Err(err) => {
            log::error!("Failed to load messages: {err}");
            Err(err)
        }
    }
}

/// Post `content` as `author`. An anonymous author still posts, with empty
/// identity fields.
pub async fn submit(
    api: &dyn MessageApi,
    author: &User,
    content: String,
) -> Result<Message, ApiError> {
    let request = NewMessageRequest::new(content, author);
    match api.post_message(&request).await {
        Ok(message) => {
            log::debug!("Posted message {}", message.id);
            Ok(message)
        }
        Err(err) => {
            log::error!("Failed to post message: {err}");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeApi {
        history: Vec<Message>,
        fail_fetch: bool,
        fail_post: bool,
        next_id: RefCell<i64>,
        posted: RefCell<Vec<NewMessageRequest>>,
    }

    #[async_trait(?Send)]
    impl MessageApi for FakeApi {
        async fn fetch_messages(&self) -> Result<Vec<Message>, ApiError> {
            if self.fail_fetch {
                return Err(ApiError::Status(500));
            }
            Ok(self.history.clone())
        }

        async fn post_message(&self, message: &NewMessageRequest) -> Result<Message, ApiError> {
            self.posted.borrow_mut().push(message.clone());
            if self.fail_post {
                return Err(ApiError::Status(503));
            }
            let mut next_id = self.next_id.borrow_mut();
            *next_id += 1;
            Ok(Message {
                id: *next_id,
                content: message.content.clone(),
                date: "10:01".to_owned(),
                username: message.username.clone(),
                avatar_url: message.avatar_url.clone(),
                has_mention: false,
            })
        }
    }

    fn message(id: i64, content: &str, username: &str) -> Message {
        Message {
            id,
            content: content.to_owned(),
            date: "10:00".to_owned(),
            username: username.to_owned(),
            avatar_url: format!("{}.png", username.to_lowercase()),
            has_mention: false,
        }
    }

    fn alice() -> User {
        User {
            name: "Alice".to_owned(),
            avatar_url: "a.png".to_owned(),
        }
    }

    fn loaded(api: &FakeApi) -> ChannelState {
        let mut state = ChannelState::new();
        state.finish_load(block_on(load(api)));
        state
    }

    #[test]
    fn test_initial_state() {
        let state = ChannelState::new();
        assert!(state.is_loading());
        assert!(state.messages().is_empty());
        assert!(state.entries().is_empty());
        assert_eq!(state.post_error(), None);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_load_renders_welcome_then_history() {
        let api = FakeApi {
            history: vec![message(1, "hi", "Bob")],
            ..Default::default()
        };
        let state = loaded(&api);

        assert!(!state.is_loading());
        assert_eq!(state.load_state(), &LoadState::Ready);
        let entries = state.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (EntryKey::Welcome, welcome_message()));
        assert_eq!(entries[1].0, EntryKey::Message { index: 0, id: 1 });
        assert_eq!(entries[1].1.username, "Bob");
        assert_eq!(entries[1].1.content, "hi");
    }

    #[test]
    fn test_load_keeps_server_order() {
        let history = vec![
            message(7, "third", "Carol"),
            message(2, "first", "Bob"),
            message(2, "dup", "Bob"),
        ];
        let api = FakeApi {
            history: history.clone(),
            ..Default::default()
        };
        let state = loaded(&api);
        let rendered: Vec<Message> = state.entries().into_iter().skip(1).map(|(_, m)| m).collect();
        assert_eq!(rendered, history);
    }

    #[test]
    fn test_empty_channel_still_shows_welcome() {
        let state = loaded(&FakeApi::default());
        let entries = state.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, EntryKey::Welcome);
        assert!(entries[0].1.has_mention);
    }

    #[test]
    fn test_load_failure_is_reported() {
        let api = FakeApi {
            fail_fetch: true,
            ..Default::default()
        };
        let state = loaded(&api);
        assert!(!state.is_loading());
        assert_eq!(
            state.load_state(),
            &LoadState::Failed("Server answered with status 500".to_owned())
        );
        assert!(state.entries().is_empty());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_submit_appends_echo() {
        let api = FakeApi {
            history: vec![message(1, "hi", "Bob")],
            next_id: RefCell::new(1),
            ..Default::default()
        };
        let mut state = loaded(&api);
        let before = state.revision();

        state.finish_post(block_on(submit(&api, &alice(), "hello".to_owned())));

        assert_eq!(
            api.posted.borrow().as_slice(),
            &[NewMessageRequest::new("hello", &alice())]
        );
        let messages = state.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].id, 2);
        assert_eq!(messages[1].content, "hello");
        assert_eq!(messages[1].username, "Alice");
        assert_eq!(messages[1].avatar_url, "a.png");
        assert!(state.revision() > before);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_submit_failure_leaves_list() {
        let api = FakeApi {
            history: vec![message(1, "hi", "Bob")],
            fail_post: true,
            ..Default::default()
        };
        let mut state = loaded(&api);
        let before = state.messages().to_vec();
        let revision = state.revision();

        state.finish_post(block_on(submit(&api, &alice(), "hello".to_owned())));

        assert_eq!(state.messages(), before.as_slice());
        assert_eq!(state.load_state(), &LoadState::Ready);
        assert_eq!(state.revision(), revision);
        assert_eq!(state.post_error(), Some("Server answered with status 503"));

        state.dismiss_post_error();
        assert_eq!(state.post_error(), None);
    }

    #[test]
    fn test_successful_post_clears_error() {
        let mut state = loaded(&FakeApi::default());
        state.finish_post(Err(ApiError::Status(503)));
        assert!(state.post_error().is_some());
        state.finish_post(Ok(message(9, "again", "Alice")));
        assert_eq!(state.post_error(), None);
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn test_submit_without_identity() {
        let api = FakeApi::default();
        let posted = block_on(submit(&api, &User::default(), "hello".to_owned())).unwrap();
        let requests = api.posted.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].content, "hello");
        assert_eq!(requests[0].username, "");
        assert_eq!(requests[0].avatar_url, "");
        assert_eq!(posted.content, "hello");
    }

    #[test]
    fn test_post_before_load_is_replaced_by_history() {
        let mut state = ChannelState::new();
        state.finish_post(Ok(message(5, "early", "Alice")));
        assert!(state.is_loading());
        assert!(state.entries().is_empty());

        state.finish_load(Ok(vec![message(4, "hi", "Bob"), message(5, "early", "Alice")]));
        let ids: Vec<EntryKey> = state.entries().into_iter().map(|(key, _)| key).collect();
        assert_eq!(
            ids,
            vec![
                EntryKey::Welcome,
                EntryKey::Message { index: 0, id: 4 },
                EntryKey::Message { index: 1, id: 5 },
            ]
        );
    }

    #[test]
    fn test_concurrent_posts_both_land() {
        let mut state = loaded(&FakeApi::default());
        state.finish_post(Ok(message(1, "one", "Alice")));
        state.finish_post(Ok(message(2, "two", "Alice")));
        let contents: Vec<&str> = state.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two"]);
    }

    #[test]
    fn test_loading_never_returns() {
        let mut state = loaded(&FakeApi::default());
        state.finish_post(Ok(message(1, "one", "Alice")));
        state.finish_post(Err(ApiError::Status(500)));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_entry_keys_unique_with_repeated_ids() {
        let mut state = ChannelState::new();
        state.finish_load(Ok(vec![message(1, "hi", "Bob"), message(2, "hello", "Alice")]));
        // The echo of a post the fetch already returned.
        state.finish_post(Ok(message(2, "hello", "Alice")));

        let entries = state.entries();
        let keys: HashSet<EntryKey> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(entries.len(), 4);
        assert_eq!(keys.len(), entries.len());
    }

    #[test]
    fn test_posts_after_failed_load_are_counted() {
        let mut state = ChannelState::new();
        state.finish_load(Err(ApiError::Status(500)));
        assert_eq!(state.unseen_posts(), 0);

        state.finish_post(Ok(message(1, "hello", "Alice")));
        state.finish_post(Err(ApiError::Status(503)));
        assert_eq!(state.unseen_posts(), 1);
        assert!(state.entries().is_empty());
        assert!(state.post_error().is_some());
    }

    #[test]
    fn test_posts_after_successful_load_are_seen() {
        let mut state = loaded(&FakeApi::default());
        state.finish_post(Ok(message(1, "hello", "Alice")));
        assert_eq!(state.unseen_posts(), 0);
    }
}
