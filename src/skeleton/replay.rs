//! Frame replay from JSON Lines input.
//!
//! The live sensor adapter is an external collaborator; for development and
//! testing, frames are replayed from a JSONL stream (one `Frame` per line).

use crate::skeleton::types::Frame;
use std::io::BufRead;

/// Errors produced while reading a frame stream.
#[derive(Debug)]
pub enum FrameError {
    Io(String),
    /// A line failed to parse as a frame; carries the 1-based line number.
    Parse { line: usize, message: String },
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::Io(e) => write!(f, "IO error: {e}"),
            FrameError::Parse { line, message } => {
                write!(f, "Frame parse error at line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// Iterator over frames in a JSONL stream.
///
/// Blank lines are skipped so hand-edited recordings stay valid.
pub struct FrameReader<R: BufRead> {
    reader: R,
    line: usize,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut buf = String::new();
            self.line += 1;
            match self.reader.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => {
                    let trimmed = buf.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str(trimmed).map_err(|e| {
                        FrameError::Parse {
                            line: self.line,
                            message: e.to_string(),
                        }
                    }));
                }
                Err(e) => return Some(Err(FrameError::Io(e.to_string()))),
            }
        }
    }
}
