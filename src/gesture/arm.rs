//! Upper-arm (in/out) axis classifiers.
//!
//! The measured quantity is the angle at the shoulder-center vertex between
//! the rays to the side's elbow and to the spine. Thresholds `arm_in` and
//! `arm_out` partition it into three zones: in (arm against the body),
//! center, and out (arm raised sideways). Each classifier targets one zone
//! and is gated by hysteresis: it never reports applicable for the zone the
//! axis is already believed to occupy.

use crate::config::GestureThresholds;
use crate::gesture::{arm_angle, GestureClassifier, GestureError};
use crate::posture::{PostureAxis, PostureChange, PostureModel, PostureState, Side};
use crate::skeleton::types::TrackedBody;

/// Arm held against the body: one step toward `Down`.
pub struct ArmInGesture {
    side: Side,
    arm_in: f64,
}

impl ArmInGesture {
    pub fn new(side: Side, thresholds: &GestureThresholds) -> Self {
        Self {
            side,
            arm_in: thresholds.arm_in,
        }
    }
}

impl GestureClassifier for ArmInGesture {
    fn name(&self) -> &'static str {
        match self.side {
            Side::Left => "left-arm-in",
            Side::Right => "right-arm-in",
        }
    }

    fn is_applicable(&self, posture: &PostureModel, body: &TrackedBody) -> bool {
        if posture.state(PostureAxis::arm(self.side)) == PostureState::Down {
            return false;
        }

        match arm_angle(body, self.side) {
            Some(angle) => angle <= self.arm_in,
            None => false,
        }
    }

    fn execute(&self, posture: &mut PostureModel) -> Result<Option<PostureChange>, GestureError> {
        Ok(posture.arm_in(self.side))
    }
}

/// Arm raised sideways: one step toward `Up`.
pub struct ArmOutGesture {
    side: Side,
    arm_out: f64,
}

impl ArmOutGesture {
    pub fn new(side: Side, thresholds: &GestureThresholds) -> Self {
        Self {
            side,
            arm_out: thresholds.arm_out,
        }
    }
}

impl GestureClassifier for ArmOutGesture {
    fn name(&self) -> &'static str {
        match self.side {
            Side::Left => "left-arm-out",
            Side::Right => "right-arm-out",
        }
    }

    fn is_applicable(&self, posture: &PostureModel, body: &TrackedBody) -> bool {
        if posture.state(PostureAxis::arm(self.side)) == PostureState::Up {
            return false;
        }

        match arm_angle(body, self.side) {
            Some(angle) => angle >= self.arm_out,
            None => false,
        }
    }

    fn execute(&self, posture: &mut PostureModel) -> Result<Option<PostureChange>, GestureError> {
        Ok(posture.arm_out(self.side))
    }
}

/// Arm in the center zone: one step toward `Middle`.
///
/// Centering has no intrinsic direction, so execute approaches from
/// whichever side the axis was last on: from `Up` it steps in, from `Down`
/// it steps out. This tie-break is what prevents oscillation at the zone
/// boundary.
pub struct ArmCenterGesture {
    side: Side,
    arm_in: f64,
    arm_out: f64,
}

impl ArmCenterGesture {
    pub fn new(side: Side, thresholds: &GestureThresholds) -> Self {
        Self {
            side,
            arm_in: thresholds.arm_in,
            arm_out: thresholds.arm_out,
        }
    }
}

impl GestureClassifier for ArmCenterGesture {
    fn name(&self) -> &'static str {
        match self.side {
            Side::Left => "left-arm-center",
            Side::Right => "right-arm-center",
        }
    }

    fn is_applicable(&self, posture: &PostureModel, body: &TrackedBody) -> bool {
        if posture.state(PostureAxis::arm(self.side)) == PostureState::Middle {
            return false;
        }

        match arm_angle(body, self.side) {
            Some(angle) => angle > self.arm_in && angle < self.arm_out,
            None => false,
        }
    }

    fn execute(&self, posture: &mut PostureModel) -> Result<Option<PostureChange>, GestureError> {
        if posture.state(PostureAxis::arm(self.side)) == PostureState::Up {
            Ok(posture.arm_in(self.side))
        } else {
            Ok(posture.arm_out(self.side))
        }
    }
}
