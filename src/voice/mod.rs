//! Voice command surface.
//!
//! Speech recognition itself is an external collaborator; this module owns
//! what the recognizer feeds into: a case-insensitive phrase catalog mapping
//! spoken commands to actions, and the attention gate that only accepts a
//! command within a bounded window after the wake phrase.

use crate::ir::IrCommand;
use std::time::{Duration, Instant};

/// The phrase that opens the attention window.
pub const WAKE_PHRASE: &str = "robo";

/// Default attention window after the wake phrase.
pub const DEFAULT_ATTENTION_WINDOW: Duration = Duration::from_secs(20);

/// Recognitions below this confidence are discarded by default.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.8;

/// What a recognized phrase asks the agent to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceAction {
    /// Send one catalog command.
    Transmit(IrCommand),
    /// Enable or disable gesture-driven transmission.
    SetFollow(bool),
    /// Re-zero the believed posture.
    ResetPosture,
}

/// The fixed phrase → action table.
pub struct VoiceCatalog {
    entries: Vec<(&'static str, VoiceAction)>,
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl VoiceCatalog {
    /// The stock phrase set.
    pub fn standard() -> Self {
        use VoiceAction::*;

        Self {
            entries: vec![
                ("wake up", Transmit(IrCommand::WakeUp)),
                ("sleep", Transmit(IrCommand::Sleep)),
                ("power down", Transmit(IrCommand::PowerOff)),
                ("stop", Transmit(IrCommand::Stop)),
                ("reset", ResetPosture),
                ("follow me", SetFollow(true)),
                ("do not follow me", SetFollow(false)),
                ("walk forward", Transmit(IrCommand::WalkForward)),
                ("walk back", Transmit(IrCommand::WalkBack)),
                ("walk left", Transmit(IrCommand::WalkLeft)),
                ("walk right", Transmit(IrCommand::WalkRight)),
                ("step forward", Transmit(IrCommand::StepForward)),
                ("step back", Transmit(IrCommand::StepBack)),
                ("step left", Transmit(IrCommand::StepLeft)),
                ("step right", Transmit(IrCommand::StepRight)),
            ],
        }
    }

    /// Case-insensitive lookup of a spoken phrase.
    pub fn lookup(&self, phrase: &str) -> Option<VoiceAction> {
        let phrase = phrase.trim();
        self.entries
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(phrase))
            .map(|&(_, action)| action)
    }

    /// All phrases, e.g. for building a recognizer grammar.
    pub fn phrases(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(p, _)| p)
    }
}

/// Outcome of feeding one recognition result through the voice control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoiceOutcome {
    /// Confidence below the configured floor.
    LowConfidence,
    /// The wake phrase was heard; the attention window is now open.
    Woke,
    /// A command arrived without (or after) the attention window.
    NotAttending,
    /// The phrase is not in the catalog; attention is kept.
    Unknown,
    /// A command was accepted; attention is consumed.
    Accepted(VoiceAction),
}

/// Wake-phrase gating plus the phrase catalog.
///
/// One accepted command consumes the window; attention must be re-acquired
/// for the next one.
pub struct VoiceControl {
    catalog: VoiceCatalog,
    window: Duration,
    min_confidence: f64,
    armed_at: Option<Instant>,
}

impl VoiceControl {
    pub fn new(window: Duration, min_confidence: f64) -> Self {
        Self {
            catalog: VoiceCatalog::standard(),
            window,
            min_confidence,
            armed_at: None,
        }
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    /// Whether the attention window is open at `now`.
    pub fn attending_at(&self, now: Instant) -> bool {
        match self.armed_at {
            Some(armed) => now.duration_since(armed) < self.window,
            None => false,
        }
    }

    /// Feed one recognition result.
    pub fn interpret(&mut self, phrase: &str, confidence: f64) -> VoiceOutcome {
        self.interpret_at(phrase, confidence, Instant::now())
    }

    /// Clock-explicit variant of [`interpret`](Self::interpret).
    pub fn interpret_at(&mut self, phrase: &str, confidence: f64, now: Instant) -> VoiceOutcome {
        if confidence < self.min_confidence {
            return VoiceOutcome::LowConfidence;
        }

        let phrase = phrase.trim();
        if phrase.eq_ignore_ascii_case(WAKE_PHRASE) {
            self.armed_at = Some(now);
            return VoiceOutcome::Woke;
        }

        if !self.attending_at(now) {
            self.armed_at = None;
            return VoiceOutcome::NotAttending;
        }

        match self.catalog.lookup(phrase) {
            Some(action) => {
                self.armed_at = None;
                VoiceOutcome::Accepted(action)
            }
            None => VoiceOutcome::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> VoiceControl {
        VoiceControl::new(DEFAULT_ATTENTION_WINDOW, DEFAULT_MIN_CONFIDENCE)
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = VoiceCatalog::standard();
        assert_eq!(
            catalog.lookup("WALK FORWARD"),
            Some(VoiceAction::Transmit(IrCommand::WalkForward))
        );
        assert_eq!(
            catalog.lookup("  Follow Me "),
            Some(VoiceAction::SetFollow(true))
        );
        assert_eq!(catalog.lookup("moonwalk"), None);
    }

    #[test]
    fn test_command_without_wake_is_rejected() {
        let mut control = control();
        let now = Instant::now();
        assert_eq!(
            control.interpret_at("stop", 0.9, now),
            VoiceOutcome::NotAttending
        );
    }

    #[test]
    fn test_wake_then_command_within_window() {
        let mut control = control();
        let now = Instant::now();

        assert_eq!(control.interpret_at("robo", 0.95, now), VoiceOutcome::Woke);
        assert_eq!(
            control.interpret_at("stop", 0.9, now + Duration::from_secs(5)),
            VoiceOutcome::Accepted(VoiceAction::Transmit(IrCommand::Stop))
        );

        // Attention was consumed by the accepted command.
        assert_eq!(
            control.interpret_at("sleep", 0.9, now + Duration::from_secs(6)),
            VoiceOutcome::NotAttending
        );
    }

    #[test]
    fn test_window_expiry_requires_rewake() {
        let mut control = control();
        let now = Instant::now();

        control.interpret_at("robo", 0.95, now);
        assert_eq!(
            control.interpret_at("stop", 0.9, now + Duration::from_secs(25)),
            VoiceOutcome::NotAttending
        );

        control.interpret_at("robo", 0.95, now + Duration::from_secs(26));
        assert_eq!(
            control.interpret_at("stop", 0.9, now + Duration::from_secs(27)),
            VoiceOutcome::Accepted(VoiceAction::Transmit(IrCommand::Stop))
        );
    }

    #[test]
    fn test_low_confidence_is_discarded_before_gating() {
        let mut control = control();
        let now = Instant::now();

        assert_eq!(
            control.interpret_at("robo", 0.5, now),
            VoiceOutcome::LowConfidence
        );
        // The weak wake must not have opened the window.
        assert!(!control.attending_at(now));
    }

    #[test]
    fn test_unknown_phrase_keeps_attention() {
        let mut control = control();
        let now = Instant::now();

        control.interpret_at("robo", 0.95, now);
        assert_eq!(
            control.interpret_at("moonwalk", 0.9, now + Duration::from_secs(1)),
            VoiceOutcome::Unknown
        );
        assert_eq!(
            control.interpret_at("stop", 0.9, now + Duration::from_secs(2)),
            VoiceOutcome::Accepted(VoiceAction::Transmit(IrCommand::Stop))
        );
    }
}
