//! Demonstration of the Robogesture Agent frame pipeline.
//!
//! This example shows how to:
//! 1. Build an agent from configuration
//! 2. Feed it skeletal frames (synthesized here; normally from the sensor)
//! 3. Observe posture changes
//! 4. Drain the IR transmit queue
//!
//! Run with: cargo run --example replay_demo

use chrono::Utc;
use robogesture_agent::{
    agent::GestureAgent,
    config::Config,
    ir,
    posture::{PostureAxis, PostureState},
    skeleton::{Frame, JointId, JointSample, TrackedBody, Vec3},
};

/// Synthesize a body holding its right forearm at the given angle.
fn posed_body(angle_deg: f64) -> TrackedBody {
    let elbow = Vec3::new(0.3, 0.8, 2.0);
    let shoulder = Vec3::new(0.3, 1.2, 2.0);

    let rad = angle_deg.to_radians();
    let wrist = Vec3::new(elbow.x - rad.sin() * 0.35, elbow.y + rad.cos() * 0.35, 2.0);

    TrackedBody::new(1, Vec3::new(0.0, 0.5, 2.0))
        .with_joint(JointId::ShoulderRight, JointSample::tracked(shoulder))
        .with_joint(JointId::ElbowRight, JointSample::tracked(elbow))
        .with_joint(JointId::WristRight, JointSample::tracked(wrist))
}

fn main() {
    println!("Robogesture Agent - Replay Demo");
    println!("================================");
    println!();

    let config = Config {
        follow_on_start: true,
        ..Config::default()
    };

    let (transmitter, requests) = ir::transmit_queue(64);
    let mut agent =
        GestureAgent::new(&config, Box::new(transmitter)).expect("default config is valid");

    agent.subscribe_posture(Box::new(|change| {
        println!(
            "  posture: {} {} -> {}",
            change.axis, change.old, change.new
        );
    }));

    // The operator folds the right forearm up, holds it, then drops it.
    let poses = [10.0, 10.0, 10.0, 70.0, 150.0, 150.0];

    for (i, &angle) in poses.iter().enumerate() {
        println!("frame {i}: forearm at {angle}°");

        let mut frame = Frame::new(Utc::now());
        frame.bodies.push(posed_body(angle));

        let report = agent.process_frame(&frame).expect("transmit queue open");
        for command in &report.commands {
            println!("  transmit: {} ({})", command.name(), command.code());
        }
    }

    println!();
    println!(
        "final right forearm state: {}",
        agent.posture().state(PostureAxis::RightForearm)
    );
    assert_eq!(
        agent.posture().state(PostureAxis::RightForearm),
        PostureState::Down
    );

    drop(agent);
    let queued: Vec<_> = requests.try_iter().collect();
    println!("requests drained from the queue: {}", queued.len());
    println!();
    println!("Demo complete!");
}
