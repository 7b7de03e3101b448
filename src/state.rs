use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl User {
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub date: String,
    pub username: String,
    pub avatar_url: String,
    // The backend has shipped both spellings.
    #[serde(default, alias = "hasMention")]
    pub has_mention: bool,
}

impl Message {
    /// Date as shown in the message header.
    ///
    /// RFC 3339 timestamps are shown as local `HH:MM`, anything else is
    /// assumed to be pre-formatted by the server and kept as is.
    pub fn display_date(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.date) {
            Ok(date) => format!("{}", DateTime::<Local>::from(date).format("%H:%M")),
            Err(_) => self.date.clone(),
        }
    }
}

/// Body of `POST /new-message`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewMessageRequest {
    pub content: String,
    pub username: String,
    pub avatar_url: String,
}

impl NewMessageRequest {
    pub fn new(content: impl Into<String>, author: &User) -> Self {
        Self {
            content: content.into(),
            username: author.name.clone(),
            avatar_url: author.avatar_url.clone(),
        }
    }
}

// Inline so the pinned row never depends on a served asset.
pub const WELCOME_AVATAR: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 40 40'><circle cx='20' cy='20' r='20' fill='%235865F2'/><text x='20' y='26' font-size='18' text-anchor='middle' fill='white' font-family='sans-serif'>L</text></svg>";

/// Pinned message shown above the channel history. Never sent to the server.
pub fn welcome_message() -> Message {
    Message {
        id: 0,
        content: "Welcome to the channel! Say hi to @everyone below.".to_owned(),
        date: "Beginning of time".to_owned(),
        username: "Leo".to_owned(),
        avatar_url: WELCOME_AVATAR.to_owned(),
        has_mention: true,
    }
}
