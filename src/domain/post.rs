//! Post domain model as delivered by the campaign feed endpoint.
//!
//! The backend serializes posts with snake_case keys (`brand_name`), a loosely
//! formatted `timestamp`, an optional `stats` object and an optional list of
//! consumer `reactions`. This module normalizes that payload into [`Post`],
//! filling defaults for everything the wire may omit.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// Server-assigned post identifier, unique within a feed.
pub type PostId = i64;

/// Naive timestamp layouts accepted in addition to RFC 3339.
///
/// The backend writes Python `datetime` values, which come out either
/// ISO-style or space separated, without an offset. Both are read as UTC.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Engagement counters for a post.
///
/// Absent or null fields default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostStats {
    pub likes: u64,
    pub shares: u64,
}

/// A consumer reaction attached to a post by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Reaction {
    #[serde(default)]
    pub consumer_id: String,
    /// Reaction kind as reported by the backend (`LIKE`, `SHARE`, `IGNORE`, ...).
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub thought: String,
}

/// A single campaign post.
///
/// Instances are created fresh for every poll; the engine never mutates a post
/// from a previous snapshot. Optimistic local changes live in the engine's
/// overlay table, not here.
///
/// # Fields
///
/// - `id`: Stable server identifier
/// - `brand_name`: Originating brand, also the key for follow requests
/// - `usp`: Marketing tagline, may be empty
/// - `caption`: Post body
/// - `timestamp`: Parsed instant, `None` when missing or unparseable
/// - `timestamp_raw`: The timestamp exactly as received, used as display fallback
/// - `stats`: Like and share counters
/// - `is_following`: Whether the viewer follows `brand_name`
/// - `reactions`: Consumer reactions, possibly empty
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WirePost")]
pub struct Post {
    pub id: PostId,
    pub brand_name: String,
    pub usp: String,
    pub caption: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub timestamp_raw: String,
    pub stats: PostStats,
    pub is_following: bool,
    pub reactions: Vec<Reaction>,
}

impl Post {
    /// Creates a post with empty text fields and zeroed stats.
    ///
    /// # Examples
    ///
    /// ```
    /// use campaign_feed::domain::Post;
    ///
    /// let post = Post::new(7, "EnduraStride");
    /// assert_eq!(post.stats.likes, 0);
    /// assert!(!post.is_following);
    /// ```
    #[must_use]
    pub fn new(id: PostId, brand_name: impl Into<String>) -> Self {
        Self {
            id,
            brand_name: brand_name.into(),
            usp: String::new(),
            caption: String::new(),
            timestamp: None,
            timestamp_raw: String::new(),
            stats: PostStats::default(),
            is_following: false,
            reactions: Vec::new(),
        }
    }

    /// Returns the timestamp formatted for display.
    ///
    /// Parsed instants render as `YYYY-MM-DD HH:MM`; anything else is shown
    /// verbatim so that odd backend values stay visible.
    #[must_use]
    pub fn posted_at(&self) -> String {
        self.timestamp.map_or_else(
            || self.timestamp_raw.clone(),
            |instant| instant.format("%Y-%m-%d %H:%M").to_string(),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireStats {
    #[serde(default)]
    likes: Option<u64>,
    #[serde(default)]
    shares: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WirePost {
    id: PostId,
    #[serde(default)]
    brand_name: String,
    #[serde(default)]
    usp: Option<String>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    stats: Option<WireStats>,
    #[serde(default, rename = "isFollowing", alias = "is_following")]
    is_following: Option<bool>,
    #[serde(default)]
    reactions: Option<Vec<Reaction>>,
}

impl From<WirePost> for Post {
    fn from(wire: WirePost) -> Self {
        let stats = wire.stats.unwrap_or_default();
        let timestamp_raw = wire.timestamp.unwrap_or_default();

        Self {
            id: wire.id,
            brand_name: wire.brand_name,
            usp: wire.usp.unwrap_or_default(),
            caption: wire.caption.unwrap_or_default(),
            timestamp: parse_timestamp(&timestamp_raw),
            timestamp_raw,
            stats: PostStats {
                likes: stats.likes.unwrap_or(0),
                shares: stats.shares.unwrap_or(0),
            },
            is_following: wire.is_following.unwrap_or(false),
            reactions: wire.reactions.unwrap_or_default(),
        }
    }
}

/// Parses a backend timestamp, treating offset-less values as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
