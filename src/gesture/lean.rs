//! Body lean and tilt classifiers.
//!
//! These are cataloged for parity with the device command set but are
//! permanently inert: no angle thresholds exist for them, so they never
//! report applicable. Their execute paths fail loudly rather than masking
//! the gap as success.

use crate::gesture::{GestureClassifier, GestureError};
use crate::posture::{PostureChange, PostureModel};
use crate::skeleton::types::TrackedBody;

macro_rules! inert_gesture {
    ($type_name:ident, $name:literal) => {
        pub struct $type_name;

        impl GestureClassifier for $type_name {
            fn name(&self) -> &'static str {
                $name
            }

            fn is_applicable(&self, _posture: &PostureModel, _body: &TrackedBody) -> bool {
                false
            }

            fn execute(
                &self,
                _posture: &mut PostureModel,
            ) -> Result<Option<PostureChange>, GestureError> {
                Err(GestureError::Unimplemented($name))
            }
        }
    };
}

inert_gesture!(LeanBackwardGesture, "lean-backward");
inert_gesture!(LeanForwardGesture, "lean-forward");
inert_gesture!(TiltLeftGesture, "tilt-left");
inert_gesture!(TiltRightGesture, "tilt-right");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::types::{TrackedBody, Vec3};

    #[test]
    fn test_inert_entries_never_apply() {
        let posture = PostureModel::new();
        let body = TrackedBody::new(1, Vec3::default());

        assert!(!LeanForwardGesture.is_applicable(&posture, &body));
        assert!(!LeanBackwardGesture.is_applicable(&posture, &body));
        assert!(!TiltLeftGesture.is_applicable(&posture, &body));
        assert!(!TiltRightGesture.is_applicable(&posture, &body));
    }

    #[test]
    fn test_inert_execute_fails_loudly() {
        let mut posture = PostureModel::new();
        match LeanForwardGesture.execute(&mut posture) {
            Err(GestureError::Unimplemented(name)) => assert_eq!(name, "lean-forward"),
            other => panic!("expected unimplemented error, got {other:?}"),
        }
    }
}
