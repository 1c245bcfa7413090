//! Robogesture Agent CLI
//!
//! Drives the gesture-to-posture core from recorded skeletal frames and
//! prints the infrared commands the robot would receive.

use clap::{Parser, Subcommand};
use robogesture_agent::{
    agent::GestureAgent,
    config::Config,
    ir::{self, IrCommand, IrRequest},
    selector::SelectionMode,
    skeleton::{FrameError, FrameReader},
    voice::{VoiceAction, VoiceCatalog},
    VERSION,
};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "robogesture")]
#[command(version = VERSION)]
#[command(about = "Gesture-to-posture command bridge for an IR-controlled robot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay skeletal frames through the agent
    Run {
        /// JSONL frame recording (one frame per line); stdin if omitted
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Selection strategy (closest, sticky, most_active)
        #[arg(long)]
        mode: Option<SelectionMode>,

        /// How many bodies may drive the pipeline per frame (1 or 2)
        #[arg(long)]
        max_tracked: Option<usize>,

        /// Start with gesture-driven transmission enabled
        #[arg(long)]
        follow: bool,

        /// Capacity of the transmit queue
        #[arg(long, default_value = "64")]
        queue_capacity: usize,
    },

    /// Resolve a voice phrase against the command catalog
    Say {
        /// The phrase, e.g. "walk forward"
        phrase: Vec<String>,
    },

    /// List the IR command catalog
    Codes,

    /// Show configuration
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            mode,
            max_tracked,
            follow,
            queue_capacity,
        } => {
            cmd_run(input, mode, max_tracked, follow, queue_capacity);
        }
        Commands::Say { phrase } => {
            cmd_say(&phrase.join(" "));
        }
        Commands::Codes => {
            cmd_codes();
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

fn cmd_run(
    input: Option<PathBuf>,
    mode: Option<SelectionMode>,
    max_tracked: Option<usize>,
    follow: bool,
    queue_capacity: usize,
) {
    println!("Robogesture Agent v{VERSION}");

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Some(mode) = mode {
        config.selection.mode = mode;
    }
    if let Some(max_tracked) = max_tracked {
        config.selection.max_tracked = max_tracked;
    }
    if follow {
        config.follow_on_start = true;
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    println!("  Selection: {} (max {})", config.selection.mode.as_str(), config.selection.max_tracked);
    println!("  Thresholds: arm {}..{}°, forearm {}..{}°",
        config.thresholds.arm_in,
        config.thresholds.arm_out,
        config.thresholds.forearm_up,
        config.thresholds.forearm_down,
    );
    println!("  Follow: {}", if config.follow_on_start { "on" } else { "off" });
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    // Stand-in for the transceiver thread: drain the queue and print what
    // would go over the air.
    let (transmitter, requests) = ir::transmit_queue(queue_capacity);
    let transceiver = thread::spawn(move || {
        for IrRequest { command, .. } in requests.iter() {
            info!(%command, code = command.code(), "transmit");
        }
    });

    let mut agent = match GestureAgent::new(&config, Box::new(transmitter)) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }) {
        eprintln!("Warning: could not install Ctrl+C handler: {e}");
    }

    let reader: Box<dyn BufRead> = match &input {
        Some(path) => match std::fs::File::open(path) {
            Ok(file) => Box::new(std::io::BufReader::new(file)),
            Err(e) => {
                eprintln!("Error opening {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Box::new(std::io::BufReader::new(std::io::stdin())),
    };

    for result in FrameReader::new(reader) {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let frame = match result {
            Ok(frame) => frame,
            Err(e @ FrameError::Parse { .. }) => {
                warn!("{e}");
                continue;
            }
            Err(e) => {
                eprintln!("Error reading frames: {e}");
                break;
            }
        };

        if let Err(e) = agent.process_frame(&frame) {
            eprintln!("Error: {e}");
            break;
        }
    }

    println!();
    println!("{}", agent.stats().summary());

    // Disconnect the queue so the transceiver stand-in drains and exits.
    drop(agent);
    let _ = transceiver.join();
}

fn cmd_say(phrase: &str) {
    let catalog = VoiceCatalog::standard();

    match catalog.lookup(phrase) {
        Some(VoiceAction::Transmit(command)) => {
            println!("{phrase:?} -> {} ({})", command.name(), command.code());
        }
        Some(VoiceAction::SetFollow(enable)) => {
            println!(
                "{phrase:?} toggles skeleton following {} (session command, no IR code)",
                if enable { "on" } else { "off" }
            );
        }
        Some(VoiceAction::ResetPosture) => {
            println!("{phrase:?} re-zeros the believed posture (session command)");
        }
        None => {
            eprintln!("Phrase not in catalog: {phrase:?}");
            eprintln!("Known phrases:");
            for known in catalog.phrases() {
                eprintln!("  {known}");
            }
            std::process::exit(1);
        }
    }
}

fn cmd_codes() {
    println!("IR command catalog ({} entries, format {:?}):", IrCommand::ALL.len(), ir::CATALOG_FORMAT);
    println!();
    for command in IrCommand::ALL {
        println!("  {:<14} {}", command.name(), command.code());
    }
}

fn cmd_config() {
    match Config::load() {
        Ok(config) => {
            println!("Configuration file: {}", Config::config_path().display());
            println!();
            match serde_json::to_string_pretty(&config) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Error serializing configuration: {e}"),
            }
        }
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    }
}
