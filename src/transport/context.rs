//! Correlation data carried through a host web request.
//!
//! Zellij hands the `context` map given to `web_request` back unchanged in
//! the matching `WebRequestResult` event. The client stores just enough in it
//! to route the reply: which operation it was and, for feed fetches, the
//! ticket the engine issued.

use crate::domain::PostId;
use crate::engine::FetchTicket;
use std::collections::BTreeMap;

const KIND: &str = "kind";
const GENERATION: &str = "generation";
const EPOCH: &str = "epoch";
const POST_ID: &str = "post_id";
const BRAND_NAME: &str = "brand_name";

/// Identifies which request a web reply belongs to.
///
/// # Examples
///
/// ```
/// use campaign_feed::transport::RequestContext;
///
/// let context = RequestContext::Like { id: 42 };
/// let map = context.to_map();
/// assert_eq!(RequestContext::from_map(&map), Some(context));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestContext {
    /// A feed fetch issued for the given ticket.
    Feed(FetchTicket),
    /// A like sent for a post.
    Like { id: PostId },
    /// A follow sent for a brand.
    Follow { brand_name: String },
}

impl RequestContext {
    /// Short operation name used in logs and in the context map.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Feed(_) => "feed",
            Self::Like { .. } => "like",
            Self::Follow { .. } => "follow",
        }
    }

    /// Encodes the context as the string map accepted by `web_request`.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KIND.to_string(), self.kind().to_string());

        match self {
            Self::Feed(ticket) => {
                map.insert(GENERATION.to_string(), ticket.generation.to_string());
                map.insert(EPOCH.to_string(), ticket.epoch.to_string());
            }
            Self::Like { id } => {
                map.insert(POST_ID.to_string(), id.to_string());
            }
            Self::Follow { brand_name } => {
                map.insert(BRAND_NAME.to_string(), brand_name.clone());
            }
        }

        map
    }

    /// Decodes a context map, returning `None` for foreign or damaged maps.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        match map.get(KIND)?.as_str() {
            "feed" => Some(Self::Feed(FetchTicket {
                generation: map.get(GENERATION)?.parse().ok()?,
                epoch: map.get(EPOCH)?.parse().ok()?,
            })),
            "like" => Some(Self::Like {
                id: map.get(POST_ID)?.parse().ok()?,
            }),
            "follow" => Some(Self::Follow {
                brand_name: map.get(BRAND_NAME)?.clone(),
            }),
            _ => None,
        }
    }
}
