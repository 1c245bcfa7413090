//! End-to-end tests for the frame driver: frames in, IR requests out.

use chrono::Utc;
use pretty_assertions::assert_eq;
use robogesture_agent::{
    agent::GestureAgent,
    config::Config,
    ir::{self, IrCommand, IrRequest},
    posture::{PostureAxis, PostureState},
    selector::SelectionMode,
    skeleton::{Frame, JointId, JointSample, TrackedBody, Vec3},
    voice::VoiceOutcome,
};
use crossbeam_channel::Receiver;

/// A body whose right forearm (elbow vertex, rays to shoulder and wrist)
/// measures `angle_deg`.
fn body_with_right_forearm_angle(id: u64, angle_deg: f64) -> TrackedBody {
    let elbow = Vec3::new(0.3, 0.8, 2.0);
    let shoulder = Vec3::new(0.3, 1.2, 2.0);

    let rad = angle_deg.to_radians();
    let wrist = Vec3::new(elbow.x - rad.sin() * 0.35, elbow.y + rad.cos() * 0.35, 2.0);

    TrackedBody::new(id, Vec3::new(0.0, 0.5, 2.0))
        .with_joint(JointId::ShoulderRight, JointSample::tracked(shoulder))
        .with_joint(JointId::ElbowRight, JointSample::tracked(elbow))
        .with_joint(JointId::WristRight, JointSample::tracked(wrist))
}

fn frame_with(bodies: Vec<TrackedBody>) -> Frame {
    let mut frame = Frame::new(Utc::now());
    frame.bodies = bodies;
    frame
}

fn agent_with_queue(follow: bool) -> (GestureAgent, Receiver<IrRequest>) {
    let config = Config {
        follow_on_start: follow,
        ..Config::default()
    };
    let (transmitter, requests) = ir::transmit_queue(64);
    let agent = GestureAgent::new(&config, Box::new(transmitter)).expect("default config is valid");
    (agent, requests)
}

fn drain(requests: &Receiver<IrRequest>) -> Vec<IrCommand> {
    let mut commands = Vec::new();
    while let Ok(request) = requests.try_recv() {
        commands.push(request.command);
    }
    commands
}

#[test]
fn folded_forearm_raises_one_step_per_frame() {
    let (mut agent, requests) = agent_with_queue(true);

    // 10° is inside the "up" zone (threshold 20°). One frame moves the
    // forearm exactly one step, not all the way up.
    let frame = frame_with(vec![body_with_right_forearm_angle(1, 10.0)]);
    let report = agent.process_frame(&frame).unwrap();

    assert_eq!(report.fired.len(), 1);
    assert_eq!(
        agent.posture().state(PostureAxis::RightForearm),
        PostureState::Middle
    );
    assert_eq!(drain(&requests), vec![IrCommand::RightArmUp]);

    // Holding the pose: the second frame takes the second step, the third
    // is absorbed by hysteresis.
    agent.process_frame(&frame).unwrap();
    assert_eq!(
        agent.posture().state(PostureAxis::RightForearm),
        PostureState::Up
    );
    assert_eq!(drain(&requests), vec![IrCommand::RightArmUp]);

    let report = agent.process_frame(&frame).unwrap();
    assert!(report.fired.is_empty());
    assert!(drain(&requests).is_empty());
}

#[test]
fn follow_off_mutates_posture_without_transmitting() {
    let (mut agent, requests) = agent_with_queue(false);

    let frame = frame_with(vec![body_with_right_forearm_angle(1, 10.0)]);
    agent.process_frame(&frame).unwrap();

    assert_eq!(
        agent.posture().state(PostureAxis::RightForearm),
        PostureState::Middle
    );
    assert!(drain(&requests).is_empty());
}

#[test]
fn selector_gates_which_body_drives_the_pipeline() {
    let config = Config {
        follow_on_start: true,
        ..Config::default()
    };
    assert_eq!(config.selection.mode, SelectionMode::Closest);
    assert_eq!(config.selection.max_tracked, 1);

    let (transmitter, requests) = ir::transmit_queue(64);
    let mut agent = GestureAgent::new(&config, Box::new(transmitter)).unwrap();

    // The gesturing body is farther than an idle one; closest-1 admits only
    // the idle body, so nothing may fire.
    let mut gesturing = body_with_right_forearm_angle(2, 10.0);
    gesturing.position = Vec3::new(0.0, 0.5, 3.0);
    let idle = TrackedBody::new(1, Vec3::new(0.0, 0.5, 1.0));

    let report = agent
        .process_frame(&frame_with(vec![gesturing, idle]))
        .unwrap();

    assert_eq!(report.admitted, vec![1]);
    assert!(report.fired.is_empty());
    assert!(drain(&requests).is_empty());
}

#[test]
fn voice_commands_pass_the_attention_gate() {
    let (mut agent, requests) = agent_with_queue(false);

    // No wake phrase yet: rejected, nothing transmitted.
    assert_eq!(
        agent.handle_voice("walk forward", 0.9).unwrap(),
        VoiceOutcome::NotAttending
    );
    assert!(drain(&requests).is_empty());

    assert_eq!(agent.handle_voice("robo", 0.95).unwrap(), VoiceOutcome::Woke);
    match agent.handle_voice("walk forward", 0.9).unwrap() {
        VoiceOutcome::Accepted(_) => {}
        other => panic!("expected accepted, got {other:?}"),
    }

    // Voice-driven transmission bypasses the follow gate.
    assert_eq!(drain(&requests), vec![IrCommand::WalkForward]);
}

#[test]
fn voice_reset_walks_posture_back_down() {
    let (mut agent, requests) = agent_with_queue(true);

    // Raise the right forearm to Up over two frames.
    let frame = frame_with(vec![body_with_right_forearm_angle(1, 10.0)]);
    agent.process_frame(&frame).unwrap();
    agent.process_frame(&frame).unwrap();
    drain(&requests);

    agent.handle_voice("robo", 0.95).unwrap();
    agent.handle_voice("reset", 0.9).unwrap();

    assert_eq!(
        agent.posture().state(PostureAxis::RightForearm),
        PostureState::Down
    );
    // One axis changed, so the reset produced exactly one transmit request.
    assert_eq!(drain(&requests), vec![IrCommand::RightArmDown]);
}

#[test]
fn posture_observers_see_driver_mutations() {
    use std::sync::{Arc, Mutex};

    let (mut agent, _requests) = agent_with_queue(false);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    agent.subscribe_posture(Box::new(move |change| {
        sink.lock().unwrap().push((change.axis, change.new));
    }));

    let frame = frame_with(vec![body_with_right_forearm_angle(1, 10.0)]);
    agent.process_frame(&frame).unwrap();

    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[(PostureAxis::RightForearm, PostureState::Middle)]
    );
}
