//! Forearm (up/down) axis classifiers.
//!
//! The measured quantity is the angle at the elbow vertex between the rays
//! to the side's shoulder and wrist. A folded arm (wrist near the shoulder)
//! gives a small angle, a hanging arm a large one; thresholds `forearm_up`
//! and `forearm_down` partition the range into up, middle and down zones
//! with the same hysteresis gating as the arm axis.

use crate::config::GestureThresholds;
use crate::gesture::{forearm_angle, GestureClassifier, GestureError};
use crate::posture::{PostureAxis, PostureChange, PostureModel, PostureState, Side};
use crate::skeleton::types::TrackedBody;

/// Forearm folded up: one step toward `Up`.
pub struct ForearmUpGesture {
    side: Side,
    forearm_up: f64,
}

impl ForearmUpGesture {
    pub fn new(side: Side, thresholds: &GestureThresholds) -> Self {
        Self {
            side,
            forearm_up: thresholds.forearm_up,
        }
    }
}

impl GestureClassifier for ForearmUpGesture {
    fn name(&self) -> &'static str {
        match self.side {
            Side::Left => "left-forearm-up",
            Side::Right => "right-forearm-up",
        }
    }

    fn is_applicable(&self, posture: &PostureModel, body: &TrackedBody) -> bool {
        if posture.state(PostureAxis::forearm(self.side)) == PostureState::Up {
            return false;
        }

        match forearm_angle(body, self.side) {
            Some(angle) => angle <= self.forearm_up,
            None => false,
        }
    }

    fn execute(&self, posture: &mut PostureModel) -> Result<Option<PostureChange>, GestureError> {
        Ok(posture.forearm_up(self.side))
    }
}

/// Forearm hanging: one step toward `Down`.
pub struct ForearmDownGesture {
    side: Side,
    forearm_down: f64,
}

impl ForearmDownGesture {
    pub fn new(side: Side, thresholds: &GestureThresholds) -> Self {
        Self {
            side,
            forearm_down: thresholds.forearm_down,
        }
    }
}

impl GestureClassifier for ForearmDownGesture {
    fn name(&self) -> &'static str {
        match self.side {
            Side::Left => "left-forearm-down",
            Side::Right => "right-forearm-down",
        }
    }

    fn is_applicable(&self, posture: &PostureModel, body: &TrackedBody) -> bool {
        if posture.state(PostureAxis::forearm(self.side)) == PostureState::Down {
            return false;
        }

        match forearm_angle(body, self.side) {
            Some(angle) => angle >= self.forearm_down,
            None => false,
        }
    }

    fn execute(&self, posture: &mut PostureModel) -> Result<Option<PostureChange>, GestureError> {
        Ok(posture.forearm_down(self.side))
    }
}

/// Forearm in the middle zone: one step toward `Middle`, approaching from
/// whichever side the axis was last on (see the arm-center rule).
pub struct ForearmMiddleGesture {
    side: Side,
    forearm_up: f64,
    forearm_down: f64,
}

impl ForearmMiddleGesture {
    pub fn new(side: Side, thresholds: &GestureThresholds) -> Self {
        Self {
            side,
            forearm_up: thresholds.forearm_up,
            forearm_down: thresholds.forearm_down,
        }
    }
}

impl GestureClassifier for ForearmMiddleGesture {
    fn name(&self) -> &'static str {
        match self.side {
            Side::Left => "left-forearm-middle",
            Side::Right => "right-forearm-middle",
        }
    }

    fn is_applicable(&self, posture: &PostureModel, body: &TrackedBody) -> bool {
        if posture.state(PostureAxis::forearm(self.side)) == PostureState::Middle {
            return false;
        }

        match forearm_angle(body, self.side) {
            Some(angle) => angle > self.forearm_up && angle < self.forearm_down,
            None => false,
        }
    }

    fn execute(&self, posture: &mut PostureModel) -> Result<Option<PostureChange>, GestureError> {
        if posture.state(PostureAxis::forearm(self.side)) == PostureState::Up {
            Ok(posture.forearm_down(self.side))
        } else {
            Ok(posture.forearm_up(self.side))
        }
    }
}
