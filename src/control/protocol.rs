// src/control/protocol.rs

//! Control-socket request grammar.
//!
//! A request is raw ASCII: `-` plus a verb byte, then an optional argument
//! after one separator. The verb is selected by the first two bytes, so
//! `-q` and `-quit` are the same request.
//!
//! | Request       | Command                          |
//! |---------------|----------------------------------|
//! | `-q`          | [`ControlCommand::Quit`]          |
//! | `-x <path>`   | [`ControlCommand::SetExecutable`] |
//! | `-a <args>`   | [`ControlCommand::SetArguments`]  |
//! | `-l <mode>`   | [`ControlCommand::SetLed`]        |

use thiserror::Error;

use crate::types::LedMode;

/// `-l` requests shorter than this carry no mode at all. Longer requests
/// with a blank mode are parse errors.
const MIN_LED_REQUEST_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Quit,
    SetExecutable(String),
    SetArguments(String),
    SetLed(LedMode),
}

impl ControlCommand {
    /// Reply sent after the command has been applied.
    pub fn confirmation(&self) -> String {
        match self {
            ControlCommand::Quit => "Received quit.".to_string(),
            ControlCommand::SetExecutable(_) => "Updated executable.".to_string(),
            ControlCommand::SetArguments(_) => "Updated arguments.".to_string(),
            ControlCommand::SetLed(mode) => format!("Set LED Mode {mode}!"),
        }
    }
}

/// Rejected request. `Display` is the reply text sent to the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unable to parse command!")]
    UnknownCommand,

    #[error("Missing LED parameter!")]
    MissingLedParameter,

    #[error("ERR: Unable to parse LED parameter!")]
    InvalidLedParameter(String),

    #[error("ERR: Missing executable parameter!")]
    MissingExecutable,
}

/// Verb byte plus argument text of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tokens<'a> {
    verb: u8,
    argument: &'a str,
    len: usize,
}

fn tokenize(text: &str) -> Option<Tokens<'_>> {
    let text = text.trim_end_matches(['\r', '\n', '\0']);
    let bytes = text.as_bytes();

    if bytes.len() < 2 || bytes[0] != b'-' {
        return None;
    }

    let argument = text.get(2..).unwrap_or("").trim_start();

    Some(Tokens {
        verb: bytes[1],
        argument,
        len: bytes.len(),
    })
}

/// Parse one raw request into a command.
pub fn parse_request(request: &[u8]) -> Result<ControlCommand, ProtocolError> {
    let text = String::from_utf8_lossy(request);
    let tokens = tokenize(&text).ok_or(ProtocolError::UnknownCommand)?;

    match tokens.verb {
        b'q' => Ok(ControlCommand::Quit),
        b'x' => {
            if tokens.argument.is_empty() {
                return Err(ProtocolError::MissingExecutable);
            }
            Ok(ControlCommand::SetExecutable(tokens.argument.to_string()))
        }
        b'a' => Ok(ControlCommand::SetArguments(tokens.argument.to_string())),
        b'l' => {
            if tokens.len < MIN_LED_REQUEST_LEN {
                return Err(ProtocolError::MissingLedParameter);
            }
            let mode = tokens.argument.trim_end();
            mode.parse::<LedMode>()
                .map(ControlCommand::SetLed)
                .map_err(|_| ProtocolError::InvalidLedParameter(mode.to_string()))
        }
        _ => Err(ProtocolError::UnknownCommand),
    }
}
