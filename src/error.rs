use thiserror::Error;

use crate::session::SessionState;

/// Errors produced while feeding input into a [`crate::session::Session`].
///
/// These never abort a transition: the session keeps its state and surfaces
/// the error through its message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid input. please enter a numerical wordcount.")]
    InvalidWordCount { input: String },
    #[error("'{command}' is not accepted while {state}")]
    UnexpectedCommand { command: char, state: SessionState },
}

/// Host-side failures that end the process with a non-zero status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("stdin must be a tty")]
    NotATty,
    #[error("invalid config: {0}")]
    Config(String),
    #[error("terminal input closed")]
    InputClosed,
}
