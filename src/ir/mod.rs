//! Infrared command boundary.
//!
//! The robot is driven by a closed catalog of named infrared codes learned
//! from its stock remote. The agent only ever selects which catalog entry to
//! send; the code strings are opaque transport payloads for the transceiver
//! driver, which lives outside this crate behind the [`IrTransmitter`] seam.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

/// Transport encoding of the catalog codes, as expected by the transceiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeFormat {
    Uuirt,
    Pronto,
}

/// Format the carried catalog was learned in.
pub const CATALOG_FORMAT: CodeFormat = CodeFormat::Uuirt;

/// The closed, versioned catalog of robot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrCommand {
    Sleep,
    WakeUp,
    PowerOff,
    Stop,
    LeanRight,
    LeanLeft,
    LeanBack,
    LeanForward,
    LeftArmIn,
    LeftArmOut,
    LeftArmUp,
    LeftArmDown,
    RightArmIn,
    RightArmOut,
    RightArmUp,
    RightArmDown,
    WalkLeft,
    WalkRight,
    WalkForward,
    WalkBack,
    StepForward,
    StepBack,
    StepRight,
    StepLeft,
}

impl IrCommand {
    /// Every catalog entry, in catalog order.
    pub const ALL: [IrCommand; 24] = [
        IrCommand::Sleep,
        IrCommand::WakeUp,
        IrCommand::PowerOff,
        IrCommand::Stop,
        IrCommand::LeanRight,
        IrCommand::LeanLeft,
        IrCommand::LeanBack,
        IrCommand::LeanForward,
        IrCommand::LeftArmIn,
        IrCommand::LeftArmOut,
        IrCommand::LeftArmUp,
        IrCommand::LeftArmDown,
        IrCommand::RightArmIn,
        IrCommand::RightArmOut,
        IrCommand::RightArmUp,
        IrCommand::RightArmDown,
        IrCommand::WalkLeft,
        IrCommand::WalkRight,
        IrCommand::WalkForward,
        IrCommand::WalkBack,
        IrCommand::StepForward,
        IrCommand::StepBack,
        IrCommand::StepRight,
        IrCommand::StepLeft,
    ];

    /// Catalog key.
    pub fn name(&self) -> &'static str {
        match self {
            IrCommand::Sleep => "Sleep",
            IrCommand::WakeUp => "WakeUp",
            IrCommand::PowerOff => "PowerOff",
            IrCommand::Stop => "Stop",
            IrCommand::LeanRight => "LeanRight",
            IrCommand::LeanLeft => "LeanLeft",
            IrCommand::LeanBack => "LeanBack",
            IrCommand::LeanForward => "LeanForward",
            IrCommand::LeftArmIn => "LeftArmIn",
            IrCommand::LeftArmOut => "LeftArmOut",
            IrCommand::LeftArmUp => "LeftArmUp",
            IrCommand::LeftArmDown => "LeftArmDown",
            IrCommand::RightArmIn => "RightArmIn",
            IrCommand::RightArmOut => "RightArmOut",
            IrCommand::RightArmUp => "RightArmUp",
            IrCommand::RightArmDown => "RightArmDown",
            IrCommand::WalkLeft => "WalkLeft",
            IrCommand::WalkRight => "WalkRight",
            IrCommand::WalkForward => "WalkForward",
            IrCommand::WalkBack => "WalkBack",
            IrCommand::StepForward => "StepForward",
            IrCommand::StepBack => "StepBack",
            IrCommand::StepRight => "StepRight",
            IrCommand::StepLeft => "StepLeft",
        }
    }

    /// Case-insensitive catalog lookup.
    pub fn from_name(name: &str) -> Option<IrCommand> {
        IrCommand::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .copied()
    }

    /// The opaque transport code, learned from the stock remote.
    pub fn code(&self) -> &'static str {
        match self {
            IrCommand::Sleep => "F5AR1BEC811578222022782220222022202278227822",
            IrCommand::WakeUp => "F41R206B81148083232323808323808323232323232323808323",
            IrCommand::PowerOff => "F41R29C881168084238084232323808423232323232323808423",
            IrCommand::Stop => "F3FR0EE681168085232423242324238085238085238085232423",
            IrCommand::LeanRight => "F4AR13A1811572221F221F221F221F221F2272227122",
            IrCommand::LeanLeft => "F4DR0E51811872221F231F231F2372221F2372227122",
            IrCommand::LeanBack => "F4FR13BB811776222023752220232023762320237623",
            IrCommand::LeanForward => "F41R1FCD8114808323232380832323238083238083232323808323",
            IrCommand::LeftArmIn => "F43R0EE181167D222122222221237D227D2222237D22",
            IrCommand::LeftArmOut => "F47R0DCF811476222022202220227622202276222022",
            IrCommand::LeftArmUp => "F40R0FF1811680832223232323232380832323232323808323",
            IrCommand::LeftArmDown => "F41R0E59811680812223232323232380812280812223232323",
            IrCommand::RightArmIn => "F3FR0EE2811680852324232423242324238085232423808523",
            IrCommand::RightArmOut => "F3FR13208116808423232323232323232323238084232323",
            IrCommand::RightArmUp => "F3FR0DD38116808523242324232423242324232423808523",
            IrCommand::RightArmDown => "F3FR0FF28116808523242324232423242380852324232423",
            IrCommand::WalkLeft => "F3FR13228116808523242324232423808523242324232423",
            IrCommand::WalkRight => "F3FR13A981168085232423242324232423242324232423",
            IrCommand::WalkForward => "F3FR0EE3811680852324232423242324238085238085232423",
            IrCommand::WalkBack => "F3FR0CC381168085232423242324232423808523808523808523",
            IrCommand::StepForward => "F41R24B081148083232323808323232323238083238083232323",
            IrCommand::StepBack => "F41R23A78114808323232380832323232323808323808323808323",
            IrCommand::StepRight => "F41R22938114808323232380832323232323232323232323",
            IrCommand::StepLeft => "F41R20F5811480832323238083232323808323232323232323",
        }
    }
}

impl std::fmt::Display for IrCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One transmit request handed to the transceiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrRequest {
    pub command: IrCommand,
    pub format: CodeFormat,
    /// How many times the transceiver should repeat the code.
    pub repeat_count: u32,
}

impl IrRequest {
    /// Send a catalog command a single time.
    pub fn once(command: IrCommand) -> Self {
        Self {
            command,
            format: CATALOG_FORMAT,
            repeat_count: 1,
        }
    }
}

/// Errors at the transmit boundary.
#[derive(Debug)]
pub enum IrError {
    /// The transmit queue is full; the transceiver is not keeping up.
    QueueFull(IrCommand),
    /// The transceiver side of the queue is gone.
    Disconnected(IrCommand),
}

impl std::fmt::Display for IrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrError::QueueFull(cmd) => write!(f, "transmit queue full, dropping {cmd}"),
            IrError::Disconnected(cmd) => {
                write!(f, "transceiver disconnected, cannot send {cmd}")
            }
        }
    }
}

impl std::error::Error for IrError {}

/// The transmit seam between the gesture core and the transceiver driver.
///
/// Implementations must not block: the frame loop calls this inline.
pub trait IrTransmitter: Send {
    fn transmit(&self, request: IrRequest) -> Result<(), IrError>;
}

/// Production adapter: a bounded queue drained by the transceiver thread.
pub struct QueuedTransmitter {
    sender: Sender<IrRequest>,
}

impl QueuedTransmitter {
    pub fn new(sender: Sender<IrRequest>) -> Self {
        Self { sender }
    }
}

impl IrTransmitter for QueuedTransmitter {
    fn transmit(&self, request: IrRequest) -> Result<(), IrError> {
        self.sender.try_send(request).map_err(|e| match e {
            TrySendError::Full(r) => IrError::QueueFull(r.command),
            TrySendError::Disconnected(r) => IrError::Disconnected(r.command),
        })
    }
}

/// Create a bounded transmit queue, returning the agent-side transmitter
/// and the transceiver-side receiver.
pub fn transmit_queue(capacity: usize) -> (QueuedTransmitter, Receiver<IrRequest>) {
    let (sender, receiver) = bounded(capacity);
    (QueuedTransmitter::new(sender), receiver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_closed_and_named() {
        assert_eq!(IrCommand::ALL.len(), 24);
        for command in IrCommand::ALL {
            assert!(!command.code().is_empty());
            assert_eq!(IrCommand::from_name(command.name()), Some(command));
        }
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(IrCommand::from_name("leftarmin"), Some(IrCommand::LeftArmIn));
        assert_eq!(IrCommand::from_name("STEPFORWARD"), Some(IrCommand::StepForward));
        assert_eq!(IrCommand::from_name("whistle"), None);
    }

    #[test]
    fn test_codes_are_distinct() {
        for (i, a) in IrCommand::ALL.iter().enumerate() {
            for b in &IrCommand::ALL[i + 1..] {
                assert_ne!(a.code(), b.code(), "{a} and {b} share a code");
            }
        }
    }

    #[test]
    fn test_queued_transmitter_reports_backpressure() {
        let (transmitter, receiver) = transmit_queue(1);

        transmitter.transmit(IrRequest::once(IrCommand::Stop)).unwrap();
        match transmitter.transmit(IrRequest::once(IrCommand::WakeUp)) {
            Err(IrError::QueueFull(IrCommand::WakeUp)) => {}
            other => panic!("expected queue-full, got {other:?}"),
        }

        assert_eq!(receiver.recv().unwrap().command, IrCommand::Stop);

        drop(receiver);
        match transmitter.transmit(IrRequest::once(IrCommand::Sleep)) {
            Err(IrError::Disconnected(IrCommand::Sleep)) => {}
            other => panic!("expected disconnected, got {other:?}"),
        }
    }
}
