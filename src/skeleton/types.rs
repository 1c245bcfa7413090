//! Skeletal frame input types.
//!
//! A frame is the unit of input for the whole agent: zero or more tracked
//! bodies, each a map from a fixed set of joint identifiers to a 3D position
//! plus a per-joint tracking quality flag. The sensor adapter that produces
//! frames is an external collaborator; these types are read-only input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A 3D point or vector in sensor space (meters, sensor at the origin,
/// z pointing away from the sensor).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise difference `self - other`.
    pub fn sub(&self, other: &Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the direction of `self`, or the zero vector if the
    /// length is zero.
    pub fn normalized(&self) -> Vec3 {
        let len = self.norm();
        if len == 0.0 {
            return Vec3::default();
        }
        Vec3 {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }
}

/// The fixed skeletal joint set reported by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointId {
    HipCenter,
    Spine,
    ShoulderCenter,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
}

/// Per-joint tracking quality as reported by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingQuality {
    /// Position observed directly.
    Tracked,
    /// Position estimated from neighboring joints.
    Inferred,
    /// No position available; the position field is stale or zero.
    NotTracked,
}

/// A single joint observation: position plus quality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JointSample {
    pub position: Vec3,
    pub quality: TrackingQuality,
}

impl JointSample {
    pub fn tracked(position: Vec3) -> Self {
        Self {
            position,
            quality: TrackingQuality::Tracked,
        }
    }
}

/// Stable identifier the sensor assigns to a body while it stays visible.
pub type TrackingId = u64;

/// One sensor-reported human figure in a frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedBody {
    /// Stable id while the body remains continuously visible.
    pub tracking_id: TrackingId,
    /// Center-of-mass position used for selection ranking.
    pub position: Vec3,
    /// Joint observations keyed by joint id.
    pub joints: HashMap<JointId, JointSample>,
}

impl TrackedBody {
    pub fn new(tracking_id: TrackingId, position: Vec3) -> Self {
        Self {
            tracking_id,
            position,
            joints: HashMap::new(),
        }
    }

    /// Insert or replace a joint observation. Returns `self` for chaining
    /// when building fixtures.
    pub fn with_joint(mut self, id: JointId, sample: JointSample) -> Self {
        self.joints.insert(id, sample);
        self
    }

    /// Position of a joint, only if the sensor observed it directly.
    ///
    /// Inferred and not-tracked joints return `None`: classifiers must not
    /// compute angles on estimated or stale positions.
    pub fn tracked_position(&self, id: JointId) -> Option<Vec3> {
        let sample = self.joints.get(&id)?;
        match sample.quality {
            TrackingQuality::Tracked => Some(sample.position),
            TrackingQuality::Inferred | TrackingQuality::NotTracked => None,
        }
    }
}

/// A single frame of skeletal data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Capture time of the frame.
    pub timestamp: DateTime<Utc>,
    /// Bodies tracked in this frame.
    pub bodies: Vec<TrackedBody>,
}

impl Frame {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            bodies: Vec::new(),
        }
    }

    pub fn body(&self, tracking_id: TrackingId) -> Option<&TrackedBody> {
        self.bodies.iter().find(|b| b.tracking_id == tracking_id)
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_ops() {
        let a = Vec3::new(3.0, 4.0, 0.0);
        assert!((a.norm() - 5.0).abs() < 1e-12);

        let unit = a.normalized();
        assert!((unit.norm() - 1.0).abs() < 1e-12);

        let zero = Vec3::default().normalized();
        assert_eq!(zero, Vec3::default());
    }

    #[test]
    fn test_tracked_position_quality_gate() {
        let body = TrackedBody::new(1, Vec3::default())
            .with_joint(JointId::Head, JointSample::tracked(Vec3::new(0.0, 1.0, 2.0)))
            .with_joint(
                JointId::Spine,
                JointSample {
                    position: Vec3::new(0.0, 0.5, 2.0),
                    quality: TrackingQuality::Inferred,
                },
            )
            .with_joint(
                JointId::HipCenter,
                JointSample {
                    position: Vec3::default(),
                    quality: TrackingQuality::NotTracked,
                },
            );

        assert!(body.tracked_position(JointId::Head).is_some());
        assert!(body.tracked_position(JointId::Spine).is_none());
        assert!(body.tracked_position(JointId::HipCenter).is_none());
        assert!(body.tracked_position(JointId::WristLeft).is_none());
    }

    #[test]
    fn test_frame_json_round_trip() {
        let mut frame = Frame::new(Utc::now());
        frame.bodies.push(
            TrackedBody::new(7, Vec3::new(0.1, 0.0, 1.8))
                .with_joint(JointId::ShoulderCenter, JointSample::tracked(Vec3::new(0.0, 0.6, 1.8))),
        );

        let json = serde_json::to_string(&frame).unwrap();
        let back: Frame = serde_json::from_str(&json).unwrap();

        assert_eq!(back.bodies.len(), 1);
        assert_eq!(back.bodies[0].tracking_id, 7);
        assert!(back.bodies[0]
            .tracked_position(JointId::ShoulderCenter)
            .is_some());
    }
}
