//! The per-frame driver.
//!
//! Glues the core components together: each incoming frame is narrowed by
//! the skeleton selector, the admitted bodies run through the classifier
//! pipeline, committed posture changes are mapped to IR catalog commands,
//! and transmit requests are enqueued for the transceiver. Frames are
//! processed one at a time; nothing here blocks or suspends.

use crate::config::Config;
use crate::gesture::{FiredGesture, GestureError, GesturePipeline};
use crate::ir::{IrCommand, IrError, IrRequest, IrTransmitter};
use crate::posture::{PostureChange, PostureModel, PostureObserver, PostureState, Side};
use crate::selector::SkeletonSelector;
use crate::skeleton::types::{Frame, TrackingId};
use crate::voice::{VoiceAction, VoiceControl, VoiceOutcome};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors surfaced by the driver.
#[derive(Debug)]
pub enum AgentError {
    Gesture(GestureError),
    Ir(IrError),
}

impl From<GestureError> for AgentError {
    fn from(e: GestureError) -> Self {
        AgentError::Gesture(e)
    }
}

impl From<IrError> for AgentError {
    fn from(e: IrError) -> Self {
        AgentError::Ir(e)
    }
}

impl std::fmt::Display for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentError::Gesture(e) => write!(f, "gesture error: {e}"),
            AgentError::Ir(e) => write!(f, "transmit error: {e}"),
        }
    }
}

impl std::error::Error for AgentError {}

/// Map a committed posture change to the IR command that realizes it.
///
/// The command encodes the step direction, so the middle state picks its
/// command from the side the change approached from.
pub fn command_for(change: &PostureChange) -> IrCommand {
    let side = change.axis.side();

    if change.axis.is_arm() {
        match change.new {
            PostureState::Down => arm_in_command(side),
            PostureState::Up => arm_out_command(side),
            PostureState::Middle => {
                if change.old == PostureState::Down {
                    arm_out_command(side)
                } else {
                    arm_in_command(side)
                }
            }
        }
    } else {
        match change.new {
            PostureState::Down => arm_down_command(side),
            PostureState::Up => arm_up_command(side),
            PostureState::Middle => {
                if change.old == PostureState::Down {
                    arm_up_command(side)
                } else {
                    arm_down_command(side)
                }
            }
        }
    }
}

fn arm_in_command(side: Side) -> IrCommand {
    match side {
        Side::Left => IrCommand::LeftArmIn,
        Side::Right => IrCommand::RightArmIn,
    }
}

fn arm_out_command(side: Side) -> IrCommand {
    match side {
        Side::Left => IrCommand::LeftArmOut,
        Side::Right => IrCommand::RightArmOut,
    }
}

fn arm_up_command(side: Side) -> IrCommand {
    match side {
        Side::Left => IrCommand::LeftArmUp,
        Side::Right => IrCommand::RightArmUp,
    }
}

fn arm_down_command(side: Side) -> IrCommand {
    match side {
        Side::Left => IrCommand::LeftArmDown,
        Side::Right => IrCommand::RightArmDown,
    }
}

/// What one frame produced.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Bodies the selector admitted, best first.
    pub admitted: Vec<TrackingId>,
    /// Gestures that fired, one at most per admitted body.
    pub fired: Vec<(TrackingId, FiredGesture)>,
    /// Commands enqueued for transmission this frame.
    pub commands: Vec<IrCommand>,
}

/// Running counters for one agent session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub session_id: Uuid,
    pub started: DateTime<Utc>,
    pub frames: u64,
    pub bodies_admitted: u64,
    pub gestures_fired: u64,
    pub commands_requested: u64,
    pub voice_commands_accepted: u64,
}

impl SessionStats {
    fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started: Utc::now(),
            frames: 0,
            bodies_admitted: 0,
            gestures_fired: 0,
            commands_requested: 0,
            voice_commands_accepted: 0,
        }
    }

    /// Human-readable session summary.
    pub fn summary(&self) -> String {
        format!(
            "Session {}:\n\
             - Frames processed: {}\n\
             - Bodies admitted: {}\n\
             - Gestures fired: {}\n\
             - IR commands requested: {}\n\
             - Voice commands accepted: {}",
            self.session_id,
            self.frames,
            self.bodies_admitted,
            self.gestures_fired,
            self.commands_requested,
            self.voice_commands_accepted
        )
    }
}

/// The gesture-to-posture agent.
pub struct GestureAgent {
    posture: PostureModel,
    pipeline: GesturePipeline,
    selector: SkeletonSelector,
    voice: VoiceControl,
    transmitter: Box<dyn IrTransmitter>,
    follow: bool,
    stats: SessionStats,
}

impl GestureAgent {
    /// Build an agent from a validated configuration and a transmit seam.
    ///
    /// Fails before any frame is processed if the configuration is invalid.
    pub fn new(
        config: &Config,
        transmitter: Box<dyn IrTransmitter>,
    ) -> Result<Self, crate::config::ConfigError> {
        config.validate()?;

        Ok(Self {
            posture: PostureModel::new(),
            pipeline: GesturePipeline::new(&config.thresholds)?,
            selector: SkeletonSelector::new(
                config.selection.mode,
                config.selection.max_tracked,
                config.selection.activity_falloff,
            ),
            voice: VoiceControl::new(
                Duration::from_secs(config.attention_window_secs),
                config.min_confidence,
            ),
            transmitter,
            follow: config.follow_on_start,
            stats: SessionStats::new(),
        })
    }

    /// Believed posture, read-only.
    pub fn posture(&self) -> &PostureModel {
        &self.posture
    }

    /// Register an external posture observer (UI, logging, ...). Observers
    /// run inline on every committed change and must be cheap.
    pub fn subscribe_posture(&mut self, observer: PostureObserver) {
        self.posture.subscribe(observer);
    }

    /// Whether gesture-driven transmission is enabled.
    pub fn follow(&self) -> bool {
        self.follow
    }

    pub fn set_follow(&mut self, follow: bool) {
        if self.follow == follow {
            return;
        }
        self.follow = follow;
        info!(follow, "skeleton tracking toggled");
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Process one frame: select bodies, classify, mutate posture, request
    /// transmissions. Fully synchronous; returns before the next frame is
    /// admitted.
    pub fn process_frame(&mut self, frame: &Frame) -> Result<FrameReport, AgentError> {
        self.stats.frames += 1;

        let mut report = FrameReport {
            admitted: self.selector.select(frame),
            ..FrameReport::default()
        };
        self.stats.bodies_admitted += report.admitted.len() as u64;

        debug!(
            frame = self.stats.frames,
            bodies = frame.bodies.len(),
            admitted = ?report.admitted,
            "frame"
        );

        for &tracking_id in &report.admitted {
            let Some(body) = frame.body(tracking_id) else {
                continue;
            };

            if let Some(fired) = self.pipeline.process(&mut self.posture, body)? {
                self.stats.gestures_fired += 1;

                if let Some(change) = fired.change {
                    info!(
                        gesture = fired.name,
                        axis = %change.axis,
                        old = %change.old,
                        new = %change.new,
                        "posture change"
                    );

                    if self.follow {
                        let command = command_for(&change);
                        self.request(command)?;
                        report.commands.push(command);
                    }
                }

                report.fired.push((tracking_id, fired));
            }
        }

        Ok(report)
    }

    /// Feed one speech recognition result through the attention gate and,
    /// when a command is accepted, act on it.
    pub fn handle_voice(
        &mut self,
        phrase: &str,
        confidence: f64,
    ) -> Result<VoiceOutcome, AgentError> {
        let outcome = self.voice.interpret(phrase, confidence);

        match outcome {
            VoiceOutcome::Accepted(action) => {
                self.stats.voice_commands_accepted += 1;
                info!(phrase, ?action, "voice command accepted");
                self.perform(action)?;
            }
            VoiceOutcome::Woke => info!("wake phrase recognized, attention window open"),
            VoiceOutcome::NotAttending => debug!(phrase, "command outside attention window"),
            VoiceOutcome::LowConfidence => debug!(phrase, confidence, "recognition discarded"),
            VoiceOutcome::Unknown => warn!(phrase, "phrase not in catalog"),
        }

        Ok(outcome)
    }

    /// Re-zero the believed posture and the selector's cross-frame state.
    /// The posture changes flow through the normal transmit mapping so the
    /// robot physically steps each limb back down (when `follow` is on).
    pub fn reset(&mut self) -> Result<(), AgentError> {
        info!("resetting posture and selection state");
        let changes = self.posture.reset();
        if self.follow {
            for change in &changes {
                self.request(command_for(change))?;
            }
        }
        self.selector.reset();
        Ok(())
    }

    fn perform(&mut self, action: VoiceAction) -> Result<(), AgentError> {
        match action {
            // Voice-driven transmissions bypass the follow gate: the
            // operator addressed the robot explicitly.
            VoiceAction::Transmit(command) => self.request(command),
            VoiceAction::SetFollow(follow) => {
                self.set_follow(follow);
                Ok(())
            }
            VoiceAction::ResetPosture => self.reset(),
        }
    }

    fn request(&mut self, command: IrCommand) -> Result<(), AgentError> {
        debug!(%command, "requesting transmit");
        self.transmitter.transmit(IrRequest::once(command))?;
        self.stats.commands_requested += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posture::PostureAxis;

    fn change(axis: PostureAxis, old: PostureState, new: PostureState) -> PostureChange {
        PostureChange { axis, old, new }
    }

    #[test]
    fn test_arm_axis_command_mapping() {
        use PostureState::*;

        // Steps toward Up request the out command, toward Down the in one.
        assert_eq!(
            command_for(&change(PostureAxis::LeftArm, Down, Middle)),
            IrCommand::LeftArmOut
        );
        assert_eq!(
            command_for(&change(PostureAxis::LeftArm, Middle, Up)),
            IrCommand::LeftArmOut
        );
        assert_eq!(
            command_for(&change(PostureAxis::RightArm, Up, Middle)),
            IrCommand::RightArmIn
        );
        assert_eq!(
            command_for(&change(PostureAxis::RightArm, Middle, Down)),
            IrCommand::RightArmIn
        );
        // Reset can jump Up → Down in one event.
        assert_eq!(
            command_for(&change(PostureAxis::RightArm, Up, Down)),
            IrCommand::RightArmIn
        );
    }

    #[test]
    fn test_forearm_axis_command_mapping() {
        use PostureState::*;

        assert_eq!(
            command_for(&change(PostureAxis::RightForearm, Down, Middle)),
            IrCommand::RightArmUp
        );
        assert_eq!(
            command_for(&change(PostureAxis::RightForearm, Middle, Up)),
            IrCommand::RightArmUp
        );
        assert_eq!(
            command_for(&change(PostureAxis::LeftForearm, Up, Middle)),
            IrCommand::LeftArmDown
        );
        assert_eq!(
            command_for(&change(PostureAxis::LeftForearm, Middle, Down)),
            IrCommand::LeftArmDown
        );
        assert_eq!(
            command_for(&change(PostureAxis::LeftForearm, Up, Down)),
            IrCommand::LeftArmDown
        );
    }
}
