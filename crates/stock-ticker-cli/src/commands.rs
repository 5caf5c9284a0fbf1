/*
[INPUT]:  Lines typed on stdin while the session runs
[OUTPUT]: Ticker requests on a channel, or a shutdown on `quit`
[POS]:    Input layer - interactive add/remove commands
[UPDATE]: When adding interactive commands
*/

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use anyhow::{Result, bail};
use stock_ticker_client::{Command, TickerRequest};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Request(TickerRequest),
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
///
/// Accepted forms: `add <SYMBOL>`, `remove <SYMBOL>`, `quit`.
pub fn parse_line(line: &str) -> Result<Option<InputCommand>> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };

    if verb.eq_ignore_ascii_case("quit") {
        return Ok(Some(InputCommand::Quit));
    }

    let command: Command = verb.parse()?;
    let Some(symbol) = parts.next() else {
        bail!("usage: {command} <SYMBOL>");
    };
    if parts.next().is_some() {
        bail!("usage: {command} <SYMBOL>");
    }

    Ok(Some(InputCommand::Request(TickerRequest::new(command, symbol))))
}

/// Read commands from `input` on a plain OS thread.
///
/// The thread is never joined by the binary: a read blocked on stdin must
/// not keep the process alive once the session is over.
pub fn spawn_input_reader<R>(
    input: R,
    requests: mpsc::UnboundedSender<TickerRequest>,
    shutdown: CancellationToken,
) -> io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || read_commands(input, &requests, &shutdown))
}

fn read_commands<R: BufRead>(
    input: R,
    requests: &mpsc::UnboundedSender<TickerRequest>,
    shutdown: &CancellationToken,
) {
    for line in input.lines() {
        if shutdown.is_cancelled() {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "stdin read failed");
                break;
            }
        };

        match parse_line(&line) {
            Ok(Some(InputCommand::Request(request))) => {
                if requests.send(request).is_err() {
                    break;
                }
            }
            Ok(Some(InputCommand::Quit)) => {
                shutdown.cancel();
                break;
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, input = %line, "input ignored"),
        }
    }
}
