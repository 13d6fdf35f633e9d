//! Interaction dispatcher.
//!
//! Turns a user intent from the presentation layer into an immediate
//! optimistic change in the [`FeedEngine`] followed by the matching transport
//! call. The dispatcher borrows both for the duration of one intent; it holds
//! no state of its own besides the delivery policy.
//!
//! # Delivery
//!
//! By default every request is fire-and-forget: the optimistic change stays
//! until the feed confirms it or the overlay cycle budget runs out, even if
//! the request failed. [`DeliveryPolicy::RollbackOnFailure`] upgrades this to
//! confirm/rollback semantics.

use crate::domain::PostId;
use crate::engine::FeedEngine;
use crate::transport::CampaignTransport;

/// How failed like and follow requests affect the optimistic overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Failures are logged and the optimistic value is kept.
    #[default]
    FireAndForget,
    /// Failures withdraw the optimistic change.
    RollbackOnFailure,
}

/// Routes like, share and follow intents.
///
/// # Example
///
/// ```rust
/// use campaign_feed::dispatcher::{DeliveryPolicy, InteractionDispatcher};
/// use campaign_feed::engine::{FeedEngine, FetchTicket};
/// use campaign_feed::transport::CampaignTransport;
///
/// #[derive(Default)]
/// struct Sent(Vec<i64>);
///
/// impl CampaignTransport for Sent {
///     fn fetch_feed(&mut self, _ticket: FetchTicket) {}
///     fn like(&mut self, id: i64) { self.0.push(id); }
///     fn follow(&mut self, _brand_name: &str) {}
/// }
///
/// let mut engine = FeedEngine::default();
/// let mut transport = Sent::default();
/// InteractionDispatcher::new(&mut engine, &mut transport, DeliveryPolicy::default()).like(3);
/// assert_eq!(transport.0, vec![3]);
/// ```
pub struct InteractionDispatcher<'a, T: CampaignTransport + ?Sized> {
    engine: &'a mut FeedEngine,
    transport: &'a mut T,
    policy: DeliveryPolicy,
}

impl<'a, T: CampaignTransport + ?Sized> InteractionDispatcher<'a, T> {
    pub fn new(engine: &'a mut FeedEngine, transport: &'a mut T, policy: DeliveryPolicy) -> Self {
        Self {
            engine,
            transport,
            policy,
        }
    }

    /// Adds one optimistic like, re-publishes, then sends the like request.
    pub fn like(&mut self, id: PostId) {
        let _span = tracing::debug_span!("dispatch_like", post_id = id).entered();

        self.engine.apply_like(id);
        self.transport.like(id);
    }

    /// Records a share. No overlay change and no stat increment.
    pub fn share(&mut self, id: PostId) {
        let _span = tracing::debug_span!("dispatch_share", post_id = id).entered();

        self.transport.share(id);
    }

    /// Marks the brand as followed everywhere, re-publishes, then sends the follow request.
    pub fn follow(&mut self, brand_name: &str) {
        let _span = tracing::debug_span!("dispatch_follow", brand = %brand_name).entered();

        self.engine.apply_follow(brand_name);
        self.transport.follow(brand_name);
    }

    /// Handles a failed like request according to the policy.
    ///
    /// Returns whether the published view changed.
    pub fn like_failed(&mut self, id: PostId) -> bool {
        match self.policy {
            DeliveryPolicy::FireAndForget => {
                tracing::warn!(post_id = id, "like request failed, keeping optimistic value");
                false
            }
            DeliveryPolicy::RollbackOnFailure => {
                tracing::warn!(post_id = id, "like request failed, rolling back");
                self.engine.rollback_like(id)
            }
        }
    }

    /// Handles a failed follow request according to the policy.
    ///
    /// Returns whether the published view changed.
    pub fn follow_failed(&mut self, brand_name: &str) -> bool {
        match self.policy {
            DeliveryPolicy::FireAndForget => {
                tracing::warn!(brand = %brand_name, "follow request failed, keeping optimistic value");
                false
            }
            DeliveryPolicy::RollbackOnFailure => {
                tracing::warn!(brand = %brand_name, "follow request failed, rolling back");
                self.engine.rollback_follow(brand_name)
            }
        }
    }
}
