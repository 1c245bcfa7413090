//! Sticky-N (oldest-tracked) selection.

use crate::selector::{SelectionStrategy, SkeletonCandidate};
use crate::skeleton::types::TrackingId;

/// Favors continuity: a body tracked earliest keeps priority for as long as
/// it remains visible. The persistent id list spans the tracking session.
#[derive(Debug, Default)]
pub struct StickyStrategy {
    active: Vec<TrackingId>,
}

impl StickyStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStrategy for StickyStrategy {
    fn select(&mut self, candidates: &[SkeletonCandidate], max: usize) -> Vec<TrackingId> {
        let present: Vec<TrackingId> = candidates.iter().map(|c| c.tracking_id).collect();

        // Drop ids that disappeared, keeping the relative order of survivors.
        self.active.retain(|id| present.contains(id));

        // Append ids seen for the first time.
        for id in &present {
            if !self.active.contains(id) {
                self.active.push(*id);
            }
        }

        self.active.iter().take(max).copied().collect()
    }

    fn reset(&mut self) {
        self.active.clear();
    }
}
