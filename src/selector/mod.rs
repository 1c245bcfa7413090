//! Skeleton selection.
//!
//! The sensor can report more bodies than the robot should listen to. Each
//! frame, the selector ranks the candidates and admits up to `max_tracked`
//! of them (typically 1 or 2) according to one of three interchangeable
//! strategies: closest to the sensor, longest continuously tracked, or most
//! recently active. Sticky and most-active keep small cross-frame state that
//! is reset whenever the strategy changes or tracking restarts.

mod activity;
mod closest;
mod sticky;

pub use activity::MostActiveStrategy;
pub use closest::ClosestStrategy;
pub use sticky::StickyStrategy;

use crate::skeleton::types::{Frame, TrackingId, Vec3};
use serde::{Deserialize, Serialize};

/// Default decay applied to activity levels each frame.
pub const DEFAULT_ACTIVITY_FALLOFF: f64 = 0.98;

/// One candidate body in a frame, reduced to what ranking needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonCandidate {
    pub tracking_id: TrackingId,
    pub position: Vec3,
}

/// Which ranking strategy the selector runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Ascending distance from the sensor.
    Closest,
    /// Longest continuously tracked keeps priority.
    Sticky,
    /// Highest exponentially-decayed recent motion.
    MostActive,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Closest => "closest",
            SelectionMode::Sticky => "sticky",
            SelectionMode::MostActive => "most_active",
        }
    }
}

impl std::str::FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "closest" => Ok(SelectionMode::Closest),
            "sticky" => Ok(SelectionMode::Sticky),
            "most_active" | "most-active" => Ok(SelectionMode::MostActive),
            other => Err(format!("unknown selection mode '{other}'")),
        }
    }
}

/// A ranking strategy over the current frame's candidates plus whatever
/// persistent state the strategy keeps across frames.
///
/// `select` is deterministic in (candidates, persistent state); `reset`
/// clears the persistent state.
pub trait SelectionStrategy: Send {
    fn select(&mut self, candidates: &[SkeletonCandidate], max: usize) -> Vec<TrackingId>;

    fn reset(&mut self);
}

/// Owns the active strategy and the admission count.
pub struct SkeletonSelector {
    strategy: Box<dyn SelectionStrategy>,
    mode: SelectionMode,
    max_tracked: usize,
    activity_falloff: f64,
}

impl SkeletonSelector {
    pub fn new(mode: SelectionMode, max_tracked: usize, activity_falloff: f64) -> Self {
        Self {
            strategy: build_strategy(mode, activity_falloff),
            mode,
            max_tracked,
            activity_falloff,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn max_tracked(&self) -> usize {
        self.max_tracked
    }

    /// Switch strategies. Persistent ranking state cannot survive a change
    /// of strategy (stale rankings), so the new strategy starts clean.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.strategy = build_strategy(mode, self.activity_falloff);
    }

    /// Clear persistent state, e.g. when tracking restarts.
    pub fn reset(&mut self) {
        self.strategy.reset();
    }

    /// Rank the frame's bodies and return the admitted ids, best first.
    pub fn select(&mut self, frame: &Frame) -> Vec<TrackingId> {
        let candidates: Vec<SkeletonCandidate> = frame
            .bodies
            .iter()
            .map(|body| SkeletonCandidate {
                tracking_id: body.tracking_id,
                position: body.position,
            })
            .collect();

        self.strategy.select(&candidates, self.max_tracked)
    }
}

fn build_strategy(mode: SelectionMode, activity_falloff: f64) -> Box<dyn SelectionStrategy> {
    match mode {
        SelectionMode::Closest => Box::new(ClosestStrategy::new()),
        SelectionMode::Sticky => Box::new(StickyStrategy::new()),
        SelectionMode::MostActive => Box::new(MostActiveStrategy::new(activity_falloff)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SkeletonCandidate;
    use crate::skeleton::types::Vec3;

    pub fn candidate(id: u64, z: f64) -> SkeletonCandidate {
        SkeletonCandidate {
            tracking_id: id,
            position: Vec3::new(0.0, 0.0, z),
        }
    }

    pub fn candidate_at(id: u64, position: Vec3) -> SkeletonCandidate {
        SkeletonCandidate {
            tracking_id: id,
            position,
        }
    }
}
