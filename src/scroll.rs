//! Scroll pinning for the message list.
//!
//! The DOM side lives in the channel component; this module only decides
//! where the container should end up so it can be tested off the browser.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Distance from the bottom (px) still treated as "at the bottom".
pub const BOTTOM_THRESHOLD: i32 = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollPolicy {
    /// Jump to the newest message on every list change.
    #[default]
    Always,
    /// Only follow new messages when the reader was already at the bottom.
    FollowBottom,
}

impl ScrollPolicy {
    pub fn should_pin(self, was_at_bottom: bool) -> bool {
        match self {
            ScrollPolicy::Always => true,
            ScrollPolicy::FollowBottom => was_at_bottom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scroll policy {0:?}")]
pub struct UnknownPolicy(String);

impl FromStr for ScrollPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "always" => Ok(ScrollPolicy::Always),
            "follow-bottom" => Ok(ScrollPolicy::FollowBottom),
            other => Err(UnknownPolicy(other.to_owned())),
        }
    }
}

/// Snapshot of a scroll container's geometry, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    pub scroll_top: i32,
    pub scroll_height: i32,
    pub client_height: i32,
}

impl ScrollMetrics {
    /// Largest valid `scrollTop`.
    pub fn max_offset(&self) -> i32 {
        (self.scroll_height - self.client_height).max(0)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.max_offset() - self.scroll_top <= BOTTOM_THRESHOLD
    }
}

/// Offset to apply after the list changed, or `None` to leave the viewport
/// where the reader put it.
pub fn pin_target(policy: ScrollPolicy, was_at_bottom: bool, now: ScrollMetrics) -> Option<i32> {
    policy.should_pin(was_at_bottom).then(|| now.max_offset())
}
