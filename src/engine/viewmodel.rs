//! Render-ready post representation.
//!
//! A [`PostViewModel`] is what the presentation layer sees: raw post data with
//! any optimistic overlay already applied and display strings pre-computed.

use crate::domain::{Post, PostId};

/// A merged, render-ready post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostViewModel {
    pub id: PostId,
    pub brand_name: String,
    /// First character of the brand name, used as the avatar letter.
    pub brand_initial: String,
    pub usp: String,
    pub caption: String,
    /// Display timestamp (`YYYY-MM-DD HH:MM` or the raw wire value).
    pub posted_at: String,
    pub likes: u64,
    pub shares: u64,
    pub is_following: bool,
    /// True while a local like is shown ahead of server confirmation.
    pub like_pending: bool,
    /// True while a local follow is shown ahead of server confirmation.
    pub follow_pending: bool,
    pub reaction_count: usize,
    /// Thought of the most recent consumer reaction, if any.
    pub latest_thought: Option<String>,
}

impl PostViewModel {
    /// Label for the follow button.
    #[must_use]
    pub const fn follow_label(&self) -> &'static str {
        if self.is_following {
            "Following"
        } else {
            "Follow"
        }
    }
}

impl From<&Post> for PostViewModel {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            brand_name: post.brand_name.clone(),
            brand_initial: post
                .brand_name
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default(),
            usp: post.usp.clone(),
            caption: post.caption.clone(),
            posted_at: post.posted_at(),
            likes: post.stats.likes,
            shares: post.stats.shares,
            is_following: post.is_following,
            like_pending: false,
            follow_pending: false,
            reaction_count: post.reactions.len(),
            latest_thought: post
                .reactions
                .iter()
                .rev()
                .map(|r| r.thought.trim())
                .find(|t| !t.is_empty())
                .map(String::from),
        }
    }
}
