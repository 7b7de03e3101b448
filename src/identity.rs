//! Current-user identity, read once from `localStorage` at startup.
//!
//! The logged-in user's display name and avatar are written by the login
//! flow under a fixed key; this crate only reads them. A missing or broken
//! value degrades to an empty identity so posting keeps working.

use crate::state::User;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("localStorage is not available")]
    Unavailable,

    #[error("Stored user is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse the raw stored value. No value is not an error.
pub fn parse_user(raw: Option<&str>) -> Result<User, IdentityError> {
    match raw {
        Some(raw) => Ok(serde_json::from_str(raw)?),
        None => Ok(User::default()),
    }
}

fn read_local_storage(key: &str) -> Result<Option<String>, IdentityError> {
    let storage = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or(IdentityError::Unavailable)?;
    Ok(storage.get_item(key).ok().flatten())
}

fn resolve_user(key: &str, raw: Result<Option<String>, IdentityError>) -> User {
    match raw.and_then(|raw| parse_user(raw.as_deref())) {
        Ok(user) => {
            if user.is_anonymous() {
                log::info!("No user stored under {key}; posting anonymously");
            } else {
                log::info!("Posting as {}", user.name);
            }
            user
        }
        Err(err) => {
            log::warn!("Ignoring stored user under {key}: {err}");
            User::default()
        }
    }
}

/// Load the current user from the browser's `localStorage`.
pub fn load_current_user(key: &str) -> User {
    resolve_user(key, read_local_storage(key))
}
