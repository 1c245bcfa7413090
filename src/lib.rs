//! Robogesture Agent - gesture-to-posture bridge for an IR-controlled robot.
//!
//! This library turns frames of tracked skeletal joints and recognized voice
//! phrases into discrete posture commands for a remote-controlled humanoid
//! toy, transmitted as infrared codes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Robogesture Agent                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────┐   ┌────────────┐             │
//! │  │ Skeleton  │──▶│  Gesture   │──▶│  Posture   │             │
//! │  │ Selector  │   │  Pipeline  │   │   Model    │             │
//! │  └───────────┘   └────────────┘   └─────┬──────┘             │
//! │        ▲                                │ change events      │
//! │  frames│                                ▼                    │
//! │  ┌─────┴─────┐   ┌────────────┐   ┌────────────┐             │
//! │  │  Frame    │   │   Voice    │──▶│ IR command │──▶ queue    │
//! │  │  source   │   │  control   │   │  catalog   │             │
//! │  └───────────┘   └────────────┘   └────────────┘             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The frame source, the speech recognizer and the infrared transceiver are
//! external collaborators; the crate consumes frames and recognition
//! results and produces transmit requests on a bounded queue.
//!
//! # Example
//!
//! ```no_run
//! use robogesture_agent::{agent::GestureAgent, config::Config, ir};
//!
//! let config = Config::default();
//! let (transmitter, requests) = ir::transmit_queue(64);
//! let mut agent = GestureAgent::new(&config, Box::new(transmitter))
//!     .expect("valid configuration");
//!
//! // Frames come from the sensor adapter; requests drain to the
//! // transceiver thread.
//! # let frame = robogesture_agent::skeleton::Frame::new(chrono::Utc::now());
//! agent.process_frame(&frame).unwrap();
//! while let Ok(request) = requests.try_recv() {
//!     println!("would transmit {}", request.command);
//! }
//! ```

pub mod agent;
pub mod config;
pub mod gesture;
pub mod ir;
pub mod posture;
pub mod selector;
pub mod skeleton;
pub mod voice;

// Re-export key types at crate root for convenience
pub use agent::{command_for, AgentError, FrameReport, GestureAgent, SessionStats};
pub use config::{Config, ConfigError, GestureThresholds, SelectionConfig};
pub use gesture::{FiredGesture, GestureClassifier, GestureError, GesturePipeline};
pub use ir::{IrCommand, IrError, IrRequest, IrTransmitter, QueuedTransmitter};
pub use posture::{PostureAxis, PostureChange, PostureModel, PostureState, Side};
pub use selector::{SelectionMode, SelectionStrategy, SkeletonSelector};
pub use skeleton::{Frame, JointId, JointSample, TrackedBody, TrackingId, TrackingQuality};
pub use voice::{VoiceAction, VoiceCatalog, VoiceControl, VoiceOutcome};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
