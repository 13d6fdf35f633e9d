//! Campaign transport boundary.
//!
//! The transport is a stateless set of requests against the remote feed
//! service: fetch the post list, like a post, follow a brand. It does no
//! retrying and no caching. Requests are fire-and-forget from the caller's
//! point of view; on the Zellij host the replies come back later as
//! `WebRequestResult` events and are decoded with [`decode_feed`] and
//! [`decode_interaction`].
//!
//! # Design
//!
//! [`CampaignTransport`] is the seam between the engine/dispatcher and the
//! host. The plugin binary implements it on top of `web_request`; tests
//! implement it with a recorder.
//!
//! - [`endpoints`]: URL construction for each remote operation
//! - [`context`]: Correlation data carried through a web request and back

pub mod context;
pub mod endpoints;

pub use context::RequestContext;
pub use endpoints::Endpoints;

use crate::domain::{FeedError, Post, PostId, Result};
use crate::engine::FetchTicket;

/// Abstraction over the remote campaign service.
///
/// Every method only issues the request. Results, if any, are delivered
/// back into the event loop by the host.
///
/// # Examples
///
/// ```
/// use campaign_feed::transport::CampaignTransport;
/// use campaign_feed::engine::FetchTicket;
///
/// #[derive(Default)]
/// struct Recorder {
///     fetches: Vec<FetchTicket>,
/// }
///
/// impl CampaignTransport for Recorder {
///     fn fetch_feed(&mut self, ticket: FetchTicket) {
///         self.fetches.push(ticket);
///     }
///     fn like(&mut self, _id: i64) {}
///     fn follow(&mut self, _brand_name: &str) {}
/// }
/// ```
pub trait CampaignTransport {
    /// Requests the full post list (`GET /campaigns/`).
    ///
    /// The ticket must be echoed back with the response so the engine can
    /// drop stale or orphaned results.
    fn fetch_feed(&mut self, ticket: FetchTicket);

    /// Sends a like for a post (`POST /campaigns/{id}/like`).
    fn like(&mut self, id: PostId);

    /// Follows a brand (`POST /brands/{brand_name}/follow`).
    fn follow(&mut self, brand_name: &str);

    /// Records a share. Local only, no network effect.
    fn share(&mut self, id: PostId) {
        tracing::info!(post_id = id, "shared campaign");
    }
}

/// Returns whether an HTTP status is in the 2xx range.
#[must_use]
pub const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Decodes a feed response into a snapshot.
///
/// Non-2xx statuses are absorbed into an empty snapshot rather than an error,
/// so callers must treat an empty result as "unknown", never as "the feed is
/// now empty". Posts with an empty brand name are skipped.
///
/// # Errors
///
/// Returns [`FeedError::MalformedResponse`] when a 2xx body is not a JSON
/// array of posts.
pub fn decode_feed(status: u16, body: &[u8]) -> Result<Vec<Post>> {
    if !is_success(status) {
        tracing::warn!(status = status, "feed request failed, treating as empty snapshot");
        return Ok(Vec::new());
    }

    let posts: Vec<Post> = serde_json::from_slice(body)
        .map_err(|e| FeedError::MalformedResponse(e.to_string()))?;

    let total = posts.len();
    let posts: Vec<Post> = posts
        .into_iter()
        .filter(|post| {
            let valid = !post.brand_name.is_empty();
            if !valid {
                tracing::warn!(post_id = post.id, "skipping post without brand name");
            }
            valid
        })
        .collect();

    tracing::debug!(received = total, kept = posts.len(), "feed response decoded");
    Ok(posts)
}

/// Decodes the reply to a like or follow request.
///
/// The body is ignored; only the status matters.
///
/// # Errors
///
/// Returns [`FeedError::Network`] for non-2xx statuses.
pub fn decode_interaction(status: u16) -> Result<()> {
    if is_success(status) {
        Ok(())
    } else {
        Err(FeedError::Network(format!("request failed with status {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_yields_empty_snapshot() {
        let posts = decode_feed(500, b"Internal Server Error").unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn success_body_decodes_in_wire_order() {
        let body = br#"[{"id": 1, "brand_name": "A", "stats": {"likes": 2}},
                        {"id": 2, "brand_name": "B", "stats": {"likes": 0}}]"#;

        let posts = decode_feed(200, body).unwrap();

        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn non_array_body_is_malformed() {
        let err = decode_feed(200, br#"{"detail": "oops"}"#).unwrap_err();
        assert!(matches!(err, FeedError::MalformedResponse(_)));
    }

    #[test]
    fn posts_without_brand_are_skipped() {
        let body = br#"[{"id": 1, "brand_name": ""}, {"id": 2, "brand_name": "B"}]"#;

        let posts = decode_feed(200, body).unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 2);
    }

    #[test]
    fn interaction_status_mapping() {
        assert!(decode_interaction(204).is_ok());
        assert!(matches!(decode_interaction(404), Err(FeedError::Network(_))));
    }
}
