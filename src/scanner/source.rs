//! Frame sources
//!
//! A frame source stands in for the camera and decoder pair: every call to
//! [`FrameSource::next_frame`] corresponds to one polled frame and yields the
//! decoded texts found in it. Locating and decoding the visual codes happens
//! outside this crate.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

use super::error::{ScanError, ScanOutcome};

/// Line marker in a frame log that stands for a failed frame read
pub const FAIL_MARKER: &str = "!fail";

/// Supplier of decoded texts, one frame per call
#[async_trait]
pub trait FrameSource: Send {
    /// Read the next frame.
    ///
    /// `Ok(None)` means the source is exhausted. A `ScanError::FrameRead`
    /// reports a single failed read; the caller may keep polling.
    async fn next_frame(&mut self) -> ScanOutcome<Option<Vec<String>>>;

    /// Human readable description for logging
    fn describe(&self) -> String;
}

type BoxedReader = Box<dyn AsyncRead + Unpin + Send>;

/// Replays a line-oriented frame log
///
/// One line per frame, decoded texts separated by tabs. A blank line is a
/// frame without any code, lines starting with `#` are skipped and a line
/// holding only `!fail` simulates a failed read.
pub struct ReplaySource {
    lines: Lines<BufReader<BoxedReader>>,
    origin: String,
    line_no: usize,
}

impl ReplaySource {
    pub fn from_reader<R>(reader: R, origin: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let boxed: BoxedReader = Box::new(reader);
        Self {
            lines: BufReader::new(boxed).lines(),
            origin: origin.to_string(),
            line_no: 0,
        }
    }

    /// Replay from standard input
    pub fn stdin() -> Self {
        Self::from_reader(tokio::io::stdin(), "<stdin>")
    }

    /// Replay from a file
    pub async fn open(path: &Path) -> ScanOutcome<Self> {
        let file =
            tokio::fs::File::open(path)
                .await
                .map_err(|e| ScanError::SourceUnavailable {
                    message: format!("Cannot open frame log '{}': {}", path.display(), e),
                })?;
        Ok(Self::from_reader(file, &path.display().to_string()))
    }

    /// Open the source named on the command line; `-` or nothing means stdin
    pub async fn from_input(input: Option<&PathBuf>) -> ScanOutcome<Self> {
        match input {
            Some(path) if path.as_os_str() != "-" => Self::open(path).await,
            _ => Ok(Self::stdin()),
        }
    }

    fn parse_frame(line: &str) -> Vec<String> {
        if line.is_empty() {
            return Vec::new();
        }
        line.split('\t').map(str::to_string).collect()
    }
}

#[async_trait]
impl FrameSource for ReplaySource {
    async fn next_frame(&mut self) -> ScanOutcome<Option<Vec<String>>> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(None),
                Err(e) => {
                    // the unreadable line still counts
                    self.line_no += 1;
                    return Err(ScanError::FrameRead {
                        message: format!("{} line {}: {}", self.origin, self.line_no, e),
                    });
                }
            };
            self.line_no += 1;

            let line = line.trim_end_matches('\r');
            if line.starts_with('#') {
                continue;
            }
            if line.trim() == FAIL_MARKER {
                return Err(ScanError::FrameRead {
                    message: format!("{} line {}", self.origin, self.line_no),
                });
            }
            return Ok(Some(Self::parse_frame(line)));
        }
    }

    fn describe(&self) -> String {
        format!("frame log {}", self.origin)
    }
}

/// A single scripted poll result
#[derive(Debug, Clone)]
pub enum ScriptedFrame {
    Codes(Vec<String>),
    Failure(String),
}

/// In-memory frame source for tests and embedding
#[derive(Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<ScriptedFrame>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// One code per frame
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut source = Self::new();
        for code in codes {
            source = source.frame(vec![code.into()]);
        }
        source
    }

    pub fn frame(mut self, codes: Vec<String>) -> Self {
        self.frames.push_back(ScriptedFrame::Codes(codes));
        self
    }

    pub fn failure(mut self, reason: &str) -> Self {
        self.frames
            .push_back(ScriptedFrame::Failure(reason.to_string()));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl FrameSource for ScriptedSource {
    async fn next_frame(&mut self) -> ScanOutcome<Option<Vec<String>>> {
        match self.frames.pop_front() {
            Some(ScriptedFrame::Codes(codes)) => Ok(Some(codes)),
            Some(ScriptedFrame::Failure(message)) => Err(ScanError::FrameRead { message }),
            None => Ok(None),
        }
    }

    fn describe(&self) -> String {
        format!("scripted source ({} frames queued)", self.frames.len())
    }
}
