//! Closest-N selection.

use crate::selector::{SelectionStrategy, SkeletonCandidate};
use crate::skeleton::types::TrackingId;

/// Step added to a candidate's depth key until it no longer collides with
/// one already inserted. Keeps the sort total and the tie order stable
/// (earlier candidate wins the exact tie).
const DEPTH_TIE_STEP: f64 = 0.0001;

/// Ranks candidates by ascending distance from the sensor. Stateless.
#[derive(Debug, Default)]
pub struct ClosestStrategy;

impl ClosestStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for ClosestStrategy {
    fn select(&mut self, candidates: &[SkeletonCandidate], max: usize) -> Vec<TrackingId> {
        let mut depth_sorted: Vec<(f64, TrackingId)> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let mut depth = candidate.position.z;
            while depth_sorted.iter().any(|&(d, _)| d == depth) {
                depth += DEPTH_TIE_STEP;
            }
            depth_sorted.push((depth, candidate.tracking_id));
        }

        depth_sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        depth_sorted.into_iter().take(max).map(|(_, id)| id).collect()
    }

    fn reset(&mut self) {}
}
