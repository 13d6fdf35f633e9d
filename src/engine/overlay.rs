//! Optimistic overlay table.
//!
//! The overlay holds local, not-yet-confirmed changes the user made: extra
//! likes per post id and pending follows per brand. It outlives individual
//! snapshots. Each merge cycle reconciles it against the fresh raw data:
//!
//! - **Confirmed**: the raw value caught up with (or passed) the local intent,
//!   so the entry is dropped and the raw value is shown.
//! - **Pending**: the raw value still lags, so the optimistic value stays
//!   visible and the entry ages by one cycle.
//! - **Expired**: the entry aged past the cycle budget and is dropped.
//!
//! Entries are never removed because a request failed unless the caller
//! explicitly retracts them.

use super::viewmodel::PostViewModel;
use crate::domain::{Post, PostId};
use std::collections::HashMap;

/// Pending local likes for one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOverlay {
    /// Raw like count seen when the first unconfirmed tap happened.
    pub base: u64,
    /// Cumulative unconfirmed taps.
    pub delta: u64,
    /// Merge cycles survived without confirmation.
    pub cycles: u32,
}

impl LikeOverlay {
    /// The like count the user expects to see.
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.base.saturating_add(self.delta)
    }
}

/// A pending local follow for one brand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowOverlay {
    /// Merge cycles survived without confirmation.
    pub cycles: u32,
}

/// Result of reconciling the overlay with one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub confirmed: usize,
    pub expired: usize,
    pub pending: usize,
}

/// Optimistic deltas keyed by post id (likes) and brand name (follows).
#[derive(Debug, Clone, Default)]
pub struct OverlayTable {
    likes: HashMap<PostId, LikeOverlay>,
    follows: HashMap<String, FollowOverlay>,
    /// Cycles an entry may stay unconfirmed; `None` keeps it forever.
    cycle_budget: Option<u32>,
}

impl OverlayTable {
    /// Creates an empty table with the given cycle budget.
    #[must_use]
    pub fn new(cycle_budget: Option<u32>) -> Self {
        Self {
            likes: HashMap::new(),
            follows: HashMap::new(),
            cycle_budget,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.likes.is_empty() && self.follows.is_empty()
    }

    #[must_use]
    pub fn like(&self, id: PostId) -> Option<&LikeOverlay> {
        self.likes.get(&id)
    }

    #[must_use]
    pub fn follow(&self, brand_name: &str) -> Option<&FollowOverlay> {
        self.follows.get(brand_name)
    }

    /// Records one more local like for `id`.
    ///
    /// `raw_likes` is the latest server value for the post; it becomes the
    /// base only when no like is already pending, so repeated taps accumulate.
    pub fn add_like(&mut self, id: PostId, raw_likes: u64) -> LikeOverlay {
        let entry = self.likes.entry(id).or_insert(LikeOverlay {
            base: raw_likes,
            delta: 0,
            cycles: 0,
        });
        entry.delta = entry.delta.saturating_add(1);
        entry.cycles = 0;
        *entry
    }

    /// Removes one unit of pending like for `id`. Returns whether anything changed.
    pub fn retract_like(&mut self, id: PostId) -> bool {
        let Some(entry) = self.likes.get_mut(&id) else {
            return false;
        };

        entry.delta = entry.delta.saturating_sub(1);
        if entry.delta == 0 {
            self.likes.remove(&id);
        }
        true
    }

    /// Records a local follow for `brand_name`.
    pub fn add_follow(&mut self, brand_name: &str) {
        self.follows.insert(brand_name.to_string(), FollowOverlay::default());
    }

    /// Drops a pending follow. Returns whether one existed.
    pub fn retract_follow(&mut self, brand_name: &str) -> bool {
        self.follows.remove(brand_name).is_some()
    }

    /// Confirms, ages and expires entries against a fresh snapshot.
    pub fn reconcile(&mut self, snapshot: &[Post]) -> Reconciliation {
        let mut outcome = Reconciliation::default();
        let budget = self.cycle_budget;

        self.likes.retain(|id, entry| {
            let raw = snapshot.iter().find(|p| p.id == *id).map(|p| p.stats.likes);
            if raw.is_some_and(|likes| likes >= entry.target()) {
                outcome.confirmed += 1;
                return false;
            }
            entry.cycles = entry.cycles.saturating_add(1);
            if budget.is_some_and(|b| entry.cycles >= b) {
                outcome.expired += 1;
                return false;
            }
            outcome.pending += 1;
            true
        });

        self.follows.retain(|brand, entry| {
            let mut brand_posts = snapshot.iter().filter(|p| &p.brand_name == brand).peekable();
            if brand_posts.peek().is_some() && brand_posts.all(|p| p.is_following) {
                outcome.confirmed += 1;
                return false;
            }
            entry.cycles = entry.cycles.saturating_add(1);
            if budget.is_some_and(|b| entry.cycles >= b) {
                outcome.expired += 1;
                return false;
            }
            outcome.pending += 1;
            true
        });

        outcome
    }

    /// Builds the view model for a raw post with pending entries applied.
    #[must_use]
    pub fn apply(&self, post: &Post) -> PostViewModel {
        let mut vm = PostViewModel::from(post);

        if let Some(like) = self.likes.get(&post.id) {
            let target = like.target();
            if target > vm.likes {
                vm.likes = target;
                vm.like_pending = true;
            }
        }

        if self.follows.contains_key(&post.brand_name) && !vm.is_following {
            vm.is_following = true;
            vm.follow_pending = true;
        }

        vm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: PostId, brand: &str, likes: u64) -> Post {
        let mut post = Post::new(id, brand);
        post.stats.likes = likes;
        post
    }

    #[test]
    fn taps_accumulate_on_the_first_base() {
        let mut table = OverlayTable::new(None);
        table.add_like(1, 5);
        let entry = table.add_like(1, 6);

        assert_eq!(entry.base, 5);
        assert_eq!(entry.delta, 2);
        assert_eq!(table.apply(&post(1, "A", 5)).likes, 7);
    }

    #[test]
    fn partial_catch_up_keeps_the_optimistic_value() {
        let mut table = OverlayTable::new(None);
        table.add_like(1, 2);
        table.add_like(1, 2);

        let snapshot = vec![post(1, "A", 3)];
        let outcome = table.reconcile(&snapshot);

        assert_eq!(outcome.pending, 1);
        let vm = table.apply(&snapshot[0]);
        assert_eq!(vm.likes, 4);
        assert!(vm.like_pending);
    }

    #[test]
    fn caught_up_raw_value_confirms_the_entry() {
        let mut table = OverlayTable::new(None);
        table.add_like(1, 2);

        let snapshot = vec![post(1, "A", 9)];
        let outcome = table.reconcile(&snapshot);

        assert_eq!(outcome.confirmed, 1);
        assert!(table.like(1).is_none());
        assert_eq!(table.apply(&snapshot[0]).likes, 9);
    }

    #[test]
    fn unconfirmed_entries_expire_after_budget() {
        let mut table = OverlayTable::new(Some(2));
        table.add_like(1, 0);
        table.add_follow("A");
        let snapshot = vec![post(1, "A", 0)];

        assert_eq!(table.reconcile(&snapshot).pending, 2);
        assert_eq!(table.reconcile(&snapshot).expired, 2);
        assert!(table.is_empty());
    }

    #[test]
    fn unlimited_budget_never_expires() {
        let mut table = OverlayTable::new(None);
        table.add_like(1, 0);

        for _ in 0..100 {
            table.reconcile(&[post(1, "A", 0)]);
        }

        assert_eq!(table.like(1).map(|e| e.cycles), Some(100));
    }

    #[test]
    fn follow_applies_to_every_post_of_the_brand() {
        let mut table = OverlayTable::new(None);
        table.add_follow("A");

        assert!(table.apply(&post(1, "A", 0)).is_following);
        assert!(table.apply(&post(2, "A", 0)).follow_pending);
        assert!(!table.apply(&post(3, "B", 0)).is_following);
    }

    #[test]
    fn follow_is_confirmed_only_when_all_brand_posts_agree() {
        let mut table = OverlayTable::new(None);
        table.add_follow("A");

        let mut followed = post(1, "A", 0);
        followed.is_following = true;
        let lagging = post(2, "A", 0);

        table.reconcile(&[followed.clone(), lagging]);
        assert!(table.follow("A").is_some());

        table.reconcile(&[followed]);
        assert!(table.follow("A").is_none());
    }

    #[test]
    fn follow_without_brand_posts_stays_pending() {
        let mut table = OverlayTable::new(None);
        table.add_follow("A");

        let outcome = table.reconcile(&[post(1, "B", 0)]);

        assert_eq!(outcome.pending, 1);
    }

    #[test]
    fn retract_like_drops_entry_at_zero() {
        let mut table = OverlayTable::new(None);
        table.add_like(1, 0);
        table.add_like(1, 0);

        assert!(table.retract_like(1));
        assert_eq!(table.like(1).map(|e| e.delta), Some(1));
        assert!(table.retract_like(1));
        assert!(table.like(1).is_none());
        assert!(!table.retract_like(1));
    }
}
