//! Most-active-N selection.
//!
//! Rewards recent movement over raw presence: each visible body gets a
//! watcher holding an exponentially-decayed activity level fed by the
//! magnitude of the second derivative of its position. Whoever is gesturing
//! now outranks whoever has merely been standing in view longest.

use crate::selector::{SelectionStrategy, SkeletonCandidate};
use crate::skeleton::types::{TrackingId, Vec3};

/// Cross-frame activity accumulator for one tracking id.
#[derive(Debug)]
struct ActivityWatcher {
    tracking_id: TrackingId,
    activity_level: f64,
    previous_position: Vec3,
    previous_delta: Vec3,
    updated: bool,
}

impl ActivityWatcher {
    fn new(candidate: &SkeletonCandidate) -> Self {
        Self {
            tracking_id: candidate.tracking_id,
            activity_level: 0.0,
            previous_position: candidate.position,
            previous_delta: Vec3::default(),
            updated: true,
        }
    }

    fn new_pass(&mut self) {
        self.updated = false;
    }

    fn update(&mut self, position: Vec3, falloff: f64) {
        let delta = position.sub(&self.previous_position);
        let delta_v = delta.sub(&self.previous_delta);

        self.previous_position = position;
        self.previous_delta = delta;

        self.activity_level = self.activity_level * falloff + delta_v.norm();
        self.updated = true;
    }
}

/// Ranks candidates by descending decayed activity level.
#[derive(Debug)]
pub struct MostActiveStrategy {
    falloff: f64,
    watchers: Vec<ActivityWatcher>,
}

impl MostActiveStrategy {
    pub fn new(falloff: f64) -> Self {
        Self {
            falloff,
            watchers: Vec::new(),
        }
    }
}

impl SelectionStrategy for MostActiveStrategy {
    fn select(&mut self, candidates: &[SkeletonCandidate], max: usize) -> Vec<TrackingId> {
        for watcher in &mut self.watchers {
            watcher.new_pass();
        }

        for candidate in candidates {
            match self
                .watchers
                .iter_mut()
                .find(|w| w.tracking_id == candidate.tracking_id)
            {
                Some(watcher) => watcher.update(candidate.position, self.falloff),
                None => self.watchers.push(ActivityWatcher::new(candidate)),
            }
        }

        // Watchers for bodies that disappeared are discarded; their
        // activity history must not leak onto a reused tracking id.
        self.watchers.retain(|w| w.updated);

        // Descending by level, ties by ascending id for determinism.
        self.watchers.sort_by(|a, b| {
            b.activity_level
                .total_cmp(&a.activity_level)
                .then(a.tracking_id.cmp(&b.tracking_id))
        });

        self.watchers
            .iter()
            .take(max)
            .map(|w| w.tracking_id)
            .collect()
    }

    fn reset(&mut self) {
        self.watchers.clear();
    }
}
