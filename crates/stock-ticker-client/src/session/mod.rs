/*
[INPUT]:  Connection events from the ws layer
[OUTPUT]: Append-only display log of the session
[POS]:    Session layer - event rendering
[UPDATE]: When adding line kinds or changing event handling
*/

pub mod log;
pub mod runner;
pub mod state_machine;

pub use log::{LineKind, LogLine, LogSink, TickerLog, Tone};
pub use runner::TickerSession;
pub use state_machine::{ConnectionMachine, StateError};
