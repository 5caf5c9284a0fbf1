/*
[INPUT]:  LogLine values from the session
[OUTPUT]: Colored lines on the terminal
[POS]:    Output layer - terminal LogSink
[UPDATE]: When changing line formatting or colors
*/

use console::{Term, style};
use stock_ticker_client::{LogLine, LogSink, Tone};
use tracing::warn;

/// Plain text of a line as printed, without color.
pub fn format_line(line: &LogLine, timestamps: bool) -> String {
    if timestamps {
        format!("{} {}", line.at.format("%H:%M:%S%.3f"), line.text)
    } else {
        line.text.clone()
    }
}

#[derive(Debug)]
pub struct TerminalSink {
    term: Term,
    timestamps: bool,
    written: usize,
}

impl TerminalSink {
    pub fn stdout(timestamps: bool) -> Self {
        Self {
            term: Term::stdout(),
            timestamps,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl LogSink for TerminalSink {
    fn append(&mut self, line: LogLine) {
        let text = format_line(&line, self.timestamps);
        let rendered = match line.tone() {
            Tone::Plain => text,
            Tone::Blue => style(text).blue().to_string(),
            Tone::Red => style(text).red().to_string(),
        };

        match self.term.write_line(&rendered) {
            Ok(()) => self.written += 1,
            Err(err) => warn!(error = %err, "failed to write log line"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_plain() {
        let line = LogLine::response(r#"{"price":123.45}"#);
        assert_eq!(format_line(&line, false), r#"RESPONSE: {"price":123.45}"#);
    }

    #[test]
    fn test_format_line_with_timestamp() {
        let line = LogLine::disconnected();
        let rendered = format_line(&line, true);
        let expected_prefix = line.at.format("%H:%M:%S%.3f").to_string();
        assert!(rendered.starts_with(&expected_prefix));
        assert!(rendered.ends_with(" DISCONNECTED"));
    }
}
