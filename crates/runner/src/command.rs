//! Operator commands read by the harness, one per line

use std::str::FromStr;

use crate::error::Error;

pub const HELP: &str = r#"Commands:
    <integer>       Set drift in ms (origin = basis - drift), e.g. 21600000
    drift <ms>      Same as above
    span [ms]       Run a clock-derived span for ms (default 500) with a midpoint event
    week            Run a span started 7 days ago and ended 6 days ago (explicit times)
    readout         Print wall-clock and origin+monotonic timestamps now
    help            Show this help
    quit            Exit
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw drift text, parsed by the drift simulator
    SetDrift(String),
    /// Clock-derived span, optional duration in ms
    Span(Option<u64>),
    WeekAgo,
    Readout,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') {
            return Ok(Command::SetDrift(line.to_string()));
        }

        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let argument = words.next();

        match verb.as_str() {
            "drift" => argument
                .map(|value| Command::SetDrift(value.to_string()))
                .ok_or_else(|| Error::InvalidArgument {
                    command: verb.clone(),
                    value: String::new(),
                }),
            "span" => match argument {
                None => Ok(Command::Span(None)),
                Some(value) => value.parse::<u64>().map(|ms| Command::Span(Some(ms))).map_err(
                    |_| Error::InvalidArgument {
                        command: verb.clone(),
                        value: value.to_string(),
                    },
                ),
            },
            "week" => Ok(Command::WeekAgo),
            "readout" => Ok(Command::Readout),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(Error::UnknownCommand(line.to_string())),
        }
    }
}
