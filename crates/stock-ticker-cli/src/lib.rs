/*
[INPUT]:  CLI modules
[OUTPUT]: Configuration, input parsing and terminal rendering for the binary
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod commands;
pub mod config;
pub mod render;

pub use commands::{InputCommand, parse_line, spawn_input_reader};
pub use config::TickerConfig;
pub use render::{TerminalSink, format_line};
