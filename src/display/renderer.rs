//! Notice renderers

use std::io::{self, Write};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::core::styles::StyleRole;
use crate::scanner::controller::{Notice, StatusKind};
use crate::scanner::types::ScanResult;

/// Output format options for rendered notices
#[derive(EnumIter, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Look up a format by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// All format names, for help and validation messages
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(|f| f.name()).collect()
    }
}

/// Human readable message for a notice
pub fn message_for(notice: &Notice) -> String {
    match notice {
        Notice::Status {
            status: StatusKind::Scanning,
        } => "Scanning...".to_string(),
        Notice::Status {
            status: StatusKind::Stopped,
        } => "Scanning stopped.".to_string(),
        Notice::Result {
            result: ScanResult::Approved { code },
        } => format!("Approved: {}", code),
        Notice::Result {
            result: ScanResult::Rejected { .. },
        } => "This code has already been used.".to_string(),
        Notice::FrameError { .. } => "Failed to capture frame.".to_string(),
        Notice::Exported { path, count } => {
            format!("Exported {} codes to {}", count, path.display())
        }
        Notice::ExportFailed { path, reason } => {
            format!("Export to {} failed: {}", path.display(), reason)
        }
    }
}

/// Sink for controller notices
pub trait Renderer: Send {
    fn render(&mut self, notice: &Notice) -> io::Result<()>;
}

/// Line-oriented text output, optionally coloured
pub struct TextRenderer<W: Write + Send> {
    out: W,
    color: bool,
}

impl<W: Write + Send> TextRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn role(notice: &Notice) -> StyleRole {
        match notice {
            Notice::Status { .. } | Notice::Exported { .. } => StyleRole::Status,
            Notice::Result { result } if result.is_approved() => StyleRole::Approved,
            Notice::Result { .. } => StyleRole::Rejected,
            Notice::FrameError { .. } | Notice::ExportFailed { .. } => StyleRole::Failure,
        }
    }
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn render(&mut self, notice: &Notice) -> io::Result<()> {
        let line = Self::role(notice).paint(&message_for(notice), self.color);
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }
}

/// JSON lines output
pub struct JsonRenderer<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Renderer for JsonRenderer<W> {
    fn render(&mut self, notice: &Notice) -> io::Result<()> {
        let mut value = serde_json::to_value(notice).map_err(io::Error::other)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "message".to_string(),
                serde_json::Value::String(message_for(notice)),
            );
        }
        serde_json::to_writer(&mut self.out, &value).map_err(io::Error::other)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Build the renderer for `format` writing to stdout
pub fn stdout_renderer(format: OutputFormat, color: bool) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new(io::stdout(), color)),
        OutputFormat::Json => Box::new(JsonRenderer::new(io::stdout())),
    }
}
