/*
[INPUT]:  Ticker server command vocabulary
[OUTPUT]: Command enum with serde and text conversions
[POS]:    Data layer - enumerations for the ticker protocol
[UPDATE]: When the server accepts new commands
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TickerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Add,
    Remove,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Remove => "remove",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Command::Add),
            "remove" => Ok(Command::Remove),
            _ => Err(TickerError::InvalidCommand(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Command::Add).unwrap(), "\"add\"");
        assert_eq!(serde_json::to_string(&Command::Remove).unwrap(), "\"remove\"");
    }

    #[test]
    fn test_command_from_str() {
        assert_eq!("ADD".parse::<Command>().unwrap(), Command::Add);
        assert_eq!(" remove ".parse::<Command>().unwrap(), Command::Remove);
        assert!(matches!(
            "subscribe".parse::<Command>(),
            Err(TickerError::InvalidCommand(cmd)) if cmd == "subscribe"
        ));
    }
}
