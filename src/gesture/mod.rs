//! Gesture classification pipeline.
//!
//! A fixed, ordered catalog of classifiers turns a tracked body's joints
//! into at most one posture change per frame. Each classifier answers two
//! questions: is it applicable to the current joints and believed posture,
//! and what one-step mutation does it apply when it fires. The pipeline
//! evaluates classifiers in catalog order and stops at the first hit, so a
//! single frame never cascades multiple changes from one gesture.

pub mod angles;
mod arm;
mod forearm;
mod lean;

pub use angles::vertex_angle_deg;
pub use arm::{ArmCenterGesture, ArmInGesture, ArmOutGesture};
pub use forearm::{ForearmDownGesture, ForearmMiddleGesture, ForearmUpGesture};
pub use lean::{LeanBackwardGesture, LeanForwardGesture, TiltLeftGesture, TiltRightGesture};

use crate::config::GestureThresholds;
use crate::posture::{PostureChange, PostureModel, Side};
use crate::skeleton::types::TrackedBody;

/// Errors surfaced by gesture execution.
#[derive(Debug)]
pub enum GestureError {
    /// The gesture is cataloged but its robot motion is not implemented.
    /// Reaching this is a programming error: inert classifiers never report
    /// themselves applicable.
    Unimplemented(&'static str),
}

impl std::fmt::Display for GestureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureError::Unimplemented(name) => {
                write!(f, "gesture '{name}' is cataloged but not implemented")
            }
        }
    }
}

impl std::error::Error for GestureError {}

/// A stateless posture-change strategy.
///
/// `is_applicable` must be side-effect free; `execute` applies exactly one
/// one-step posture mutation. Classifiers that need a joint the sensor did
/// not directly track must report not applicable instead of computing on
/// estimated or stale positions.
pub trait GestureClassifier: Send {
    /// Catalog name, used for logging and reports.
    fn name(&self) -> &'static str;

    fn is_applicable(&self, posture: &PostureModel, body: &TrackedBody) -> bool;

    fn execute(&self, posture: &mut PostureModel) -> Result<Option<PostureChange>, GestureError>;
}

/// Result of running the pipeline over one tracked body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredGesture {
    /// Name of the classifier that fired.
    pub name: &'static str,
    /// The posture change it committed, if the mutation was not a no-op.
    pub change: Option<PostureChange>,
}

/// The ordered classifier catalog.
pub struct GesturePipeline {
    classifiers: Vec<Box<dyn GestureClassifier>>,
}

impl GesturePipeline {
    /// Build the standard catalog from validated thresholds.
    ///
    /// Catalog order mirrors the device command catalog: the inert lean and
    /// tilt entries first, then the left-side classifiers, then the right.
    /// Within a side, the arm (in/out) and forearm (up/down) entries
    /// interleave; order only matters in that the first applicable entry
    /// wins the frame.
    pub fn new(thresholds: &GestureThresholds) -> Result<Self, crate::config::ConfigError> {
        thresholds.validate()?;

        let mut classifiers: Vec<Box<dyn GestureClassifier>> = vec![
            Box::new(LeanBackwardGesture),
            Box::new(LeanForwardGesture),
        ];

        for side in [Side::Left, Side::Right] {
            classifiers.push(Box::new(ArmCenterGesture::new(side, thresholds)));
            classifiers.push(Box::new(ForearmDownGesture::new(side, thresholds)));
            classifiers.push(Box::new(ArmInGesture::new(side, thresholds)));
            classifiers.push(Box::new(ForearmMiddleGesture::new(side, thresholds)));
            classifiers.push(Box::new(ArmOutGesture::new(side, thresholds)));
            classifiers.push(Box::new(ForearmUpGesture::new(side, thresholds)));
        }

        classifiers.push(Box::new(TiltLeftGesture));
        classifiers.push(Box::new(TiltRightGesture));

        Ok(Self { classifiers })
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    /// Evaluate the catalog in order against one tracked body and execute
    /// the first applicable classifier. At most one classifier fires per
    /// body per frame.
    pub fn process(
        &self,
        posture: &mut PostureModel,
        body: &TrackedBody,
    ) -> Result<Option<FiredGesture>, GestureError> {
        for classifier in &self.classifiers {
            if classifier.is_applicable(posture, body) {
                let change = classifier.execute(posture)?;
                return Ok(Some(FiredGesture {
                    name: classifier.name(),
                    change,
                }));
            }
        }
        Ok(None)
    }
}

/// Angle at the shoulder-center vertex between the rays to the side's elbow
/// and to the spine. `None` when any required joint is not directly tracked.
pub(crate) fn arm_angle(body: &TrackedBody, side: Side) -> Option<f64> {
    use crate::skeleton::types::JointId;

    let elbow_id = match side {
        Side::Left => JointId::ElbowLeft,
        Side::Right => JointId::ElbowRight,
    };

    let shoulder_center = body.tracked_position(JointId::ShoulderCenter)?;
    let elbow = body.tracked_position(elbow_id)?;
    let spine = body.tracked_position(JointId::Spine)?;

    Some(vertex_angle_deg(&elbow, &spine, &shoulder_center))
}

/// Angle at the elbow vertex between the rays to the side's shoulder and
/// wrist. `None` when any required joint is not directly tracked.
pub(crate) fn forearm_angle(body: &TrackedBody, side: Side) -> Option<f64> {
    use crate::skeleton::types::JointId;

    let (shoulder_id, elbow_id, wrist_id) = match side {
        Side::Left => (JointId::ShoulderLeft, JointId::ElbowLeft, JointId::WristLeft),
        Side::Right => (JointId::ShoulderRight, JointId::ElbowRight, JointId::WristRight),
    };

    let shoulder = body.tracked_position(shoulder_id)?;
    let elbow = body.tracked_position(elbow_id)?;
    let wrist = body.tracked_position(wrist_id)?;

    Some(vertex_angle_deg(&shoulder, &wrist, &elbow))
}
