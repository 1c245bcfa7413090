//! Believed posture of the robot.
//!
//! Four independent axes (left/right upper arm, left/right forearm), each in
//! one of three discrete positions. This model is the single source of truth
//! for what configuration the robot is believed to be in; every mutation goes
//! through a named one-step operation, and every committed change notifies
//! registered observers synchronously before the mutator returns.

use serde::{Deserialize, Serialize};

/// Discrete position of one posture axis.
///
/// The implied ordering is `Down ↔ Middle ↔ Up`; mutators move one step at a
/// time, so a value never jumps between `Down` and `Up` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostureState {
    Down,
    Middle,
    Up,
}

impl std::fmt::Display for PostureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PostureState::Down => "down",
            PostureState::Middle => "middle",
            PostureState::Up => "up",
        };
        write!(f, "{name}")
    }
}

/// Body side selector for the symmetric axis operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// One of the four independently tracked posture axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostureAxis {
    LeftArm,
    LeftForearm,
    RightArm,
    RightForearm,
}

impl PostureAxis {
    /// All axes, in the order `reset` visits them.
    pub const ALL: [PostureAxis; 4] = [
        PostureAxis::LeftForearm,
        PostureAxis::RightForearm,
        PostureAxis::LeftArm,
        PostureAxis::RightArm,
    ];

    pub fn arm(side: Side) -> Self {
        match side {
            Side::Left => PostureAxis::LeftArm,
            Side::Right => PostureAxis::RightArm,
        }
    }

    pub fn forearm(side: Side) -> Self {
        match side {
            Side::Left => PostureAxis::LeftForearm,
            Side::Right => PostureAxis::RightForearm,
        }
    }

    /// Whether this is an upper-arm (in/out) axis as opposed to a forearm
    /// (up/down) axis.
    pub fn is_arm(&self) -> bool {
        matches!(self, PostureAxis::LeftArm | PostureAxis::RightArm)
    }

    pub fn side(&self) -> Side {
        match self {
            PostureAxis::LeftArm | PostureAxis::LeftForearm => Side::Left,
            PostureAxis::RightArm | PostureAxis::RightForearm => Side::Right,
        }
    }
}

impl std::fmt::Display for PostureAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PostureAxis::LeftArm => "left arm",
            PostureAxis::LeftForearm => "left forearm",
            PostureAxis::RightArm => "right arm",
            PostureAxis::RightForearm => "right forearm",
        };
        write!(f, "{name}")
    }
}

/// Immutable record of one committed posture change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureChange {
    pub axis: PostureAxis,
    pub old: PostureState,
    pub new: PostureState,
}

/// Synchronous observer of posture changes.
///
/// Observers run inline on the mutating call; they must be cheap or they
/// stall the next frame's admission.
pub type PostureObserver = Box<dyn FnMut(&PostureChange) + Send>;

/// The four-axis posture state machine.
pub struct PostureModel {
    left_arm: PostureState,
    left_forearm: PostureState,
    right_arm: PostureState,
    right_forearm: PostureState,
    observers: Vec<PostureObserver>,
}

impl std::fmt::Debug for PostureModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostureModel")
            .field("left_arm", &self.left_arm)
            .field("left_forearm", &self.left_forearm)
            .field("right_arm", &self.right_arm)
            .field("right_forearm", &self.right_forearm)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for PostureModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PostureModel {
    /// All four axes start at `Down`.
    pub fn new() -> Self {
        Self {
            left_arm: PostureState::Down,
            left_forearm: PostureState::Down,
            right_arm: PostureState::Down,
            right_forearm: PostureState::Down,
            observers: Vec::new(),
        }
    }

    /// Register a synchronous change observer. Observers are invoked in
    /// registration order, after the new value is committed.
    pub fn subscribe(&mut self, observer: PostureObserver) {
        self.observers.push(observer);
    }

    /// Current believed state of an axis.
    pub fn state(&self, axis: PostureAxis) -> PostureState {
        match axis {
            PostureAxis::LeftArm => self.left_arm,
            PostureAxis::LeftForearm => self.left_forearm,
            PostureAxis::RightArm => self.right_arm,
            PostureAxis::RightForearm => self.right_forearm,
        }
    }

    /// Move the arm axis one step toward `Down`. No-op if already there.
    pub fn arm_in(&mut self, side: Side) -> Option<PostureChange> {
        self.step_down(PostureAxis::arm(side))
    }

    /// Move the arm axis one step toward `Up`. No-op if already there.
    pub fn arm_out(&mut self, side: Side) -> Option<PostureChange> {
        self.step_up(PostureAxis::arm(side))
    }

    /// Move the forearm axis one step toward `Down`. No-op if already there.
    pub fn forearm_down(&mut self, side: Side) -> Option<PostureChange> {
        self.step_down(PostureAxis::forearm(side))
    }

    /// Move the forearm axis one step toward `Up`. No-op if already there.
    pub fn forearm_up(&mut self, side: Side) -> Option<PostureChange> {
        self.step_up(PostureAxis::forearm(side))
    }

    /// Return every axis to `Down`, emitting one change event per axis that
    /// was not already there. Callable at any time.
    pub fn reset(&mut self) -> Vec<PostureChange> {
        PostureAxis::ALL
            .iter()
            .filter_map(|&axis| self.set_state(axis, PostureState::Down))
            .collect()
    }

    fn step_down(&mut self, axis: PostureAxis) -> Option<PostureChange> {
        let next = match self.state(axis) {
            PostureState::Down => return None,
            PostureState::Middle => PostureState::Down,
            PostureState::Up => PostureState::Middle,
        };
        self.set_state(axis, next)
    }

    fn step_up(&mut self, axis: PostureAxis) -> Option<PostureChange> {
        let next = match self.state(axis) {
            PostureState::Up => return None,
            PostureState::Middle => PostureState::Up,
            PostureState::Down => PostureState::Middle,
        };
        self.set_state(axis, next)
    }

    /// Commit a new state and notify observers. Returns `None` (and raises
    /// no event) for a no-op write.
    fn set_state(&mut self, axis: PostureAxis, new: PostureState) -> Option<PostureChange> {
        let old = self.state(axis);
        if old == new {
            return None;
        }

        match axis {
            PostureAxis::LeftArm => self.left_arm = new,
            PostureAxis::LeftForearm => self.left_forearm = new,
            PostureAxis::RightArm => self.right_arm = new,
            PostureAxis::RightForearm => self.right_forearm = new,
        }

        let change = PostureChange { axis, old, new };
        for observer in &mut self.observers {
            observer(&change);
        }

        Some(change)
    }
}
