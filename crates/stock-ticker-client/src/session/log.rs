/*
[INPUT]:  Rendered session lines
[OUTPUT]: Append-only display log and the LogSink rendering seam
[POS]:    Session layer - output surface
[UPDATE]: When adding line kinds or sink implementations
*/

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Connected,
    Sent,
    Response,
    Error,
    Disconnected,
}

/// Color hint for a line. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Blue,
    Red,
}

impl LineKind {
    pub fn tone(&self) -> Tone {
        match self {
            LineKind::Response => Tone::Blue,
            LineKind::Error => Tone::Red,
            LineKind::Connected | LineKind::Sent | LineKind::Disconnected => Tone::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub kind: LineKind,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl LogLine {
    fn new(kind: LineKind, text: String) -> Self {
        Self {
            kind,
            text,
            at: Utc::now(),
        }
    }

    pub fn connected() -> Self {
        Self::new(LineKind::Connected, "CONNECTED".to_string())
    }

    pub fn sent(payload: &str) -> Self {
        Self::new(LineKind::Sent, format!("SENT: {payload}"))
    }

    pub fn response(payload: &str) -> Self {
        Self::new(LineKind::Response, format!("RESPONSE: {payload}"))
    }

    pub fn error(detail: &str) -> Self {
        Self::new(LineKind::Error, format!("ERROR: {detail}"))
    }

    pub fn disconnected() -> Self {
        Self::new(LineKind::Disconnected, "DISCONNECTED".to_string())
    }

    pub fn tone(&self) -> Tone {
        self.kind.tone()
    }
}

/// Destination for rendered lines, called in event order.
pub trait LogSink {
    fn append(&mut self, line: LogLine);
}

/// In-memory append-only log.
#[derive(Debug, Default, Clone)]
pub struct TickerLog {
    lines: Vec<LogLine>,
}

impl TickerLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|line| line.kind == kind).count()
    }
}

impl LogSink for TickerLog {
    fn append(&mut self, line: LogLine) {
        self.lines.push(line);
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn append(&mut self, line: LogLine) {
        (**self).append(line);
    }
}
