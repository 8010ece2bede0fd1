//! Writing-session state machine.
//!
//! A [`Session`] walks through `startup -> ready -> writing -> stopped ->
//! resumed`, and from `resumed` back into `writing` for the next lap. Input
//! arrives one [`SessionEvent`] at a time through [`Session::handle`], which
//! returns either a [`RenderHint`] for the display or [`Step::Quit`].

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::SessionError;
use crate::text_input::{EditKey, TextInput, DEFAULT_CHAR_LIMIT};

#[cfg(test)]
mod proptests;

pub type Timestamp = DateTime<Local>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SessionState {
    Startup,
    Ready,
    Writing,
    Stopped,
    Resumed,
}

impl SessionState {
    /// States where keystrokes go into the pending buffer instead of being
    /// read as commands.
    pub fn collects_text(self) -> bool {
        matches!(self, SessionState::Startup | SessionState::Stopped)
    }

    pub fn commands(self) -> &'static str {
        match self {
            SessionState::Startup | SessionState::Stopped => "[q]uit | [enter] submit",
            SessionState::Ready => "[q]uit | [b]egin",
            SessionState::Writing => "[q]uit | [s]top",
            SessionState::Resumed => "[q]uit | [r]esume",
        }
    }
}

/// Single-letter commands. Matching ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Begin,
    Stop,
    Resume,
    Quit,
}

impl Command {
    pub fn parse(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'b' => Some(Command::Begin),
            's' => Some(Command::Stop),
            'r' => Some(Command::Resume),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    EnterStartCount,
    Begin,
    Writing,
    EnterEndCount,
    LapComplete,
}

impl Prompt {
    pub fn text(self) -> &'static str {
        match self {
            Prompt::EnterStartCount => "enter beginning wordcount",
            Prompt::Begin => "[b]egin",
            Prompt::Writing => "writing... [s]top when done",
            Prompt::EnterEndCount => "enter ending wordcount",
            Prompt::LapComplete => "lap complete. [r]esume to start the next lap",
        }
    }
}

/// What the user is asked to do next, or what went wrong with the last input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Prompt(Prompt),
    Error(SessionError),
}

impl Message {
    pub fn text(&self) -> String {
        match self {
            Message::Prompt(p) => p.text().to_string(),
            Message::Error(e) => e.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Message::Error(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Char(char),
    Edit(EditKey),
    Commit,
    Quit,
}

/// Outcome of handling one event
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Render(RenderHint),
    Quit,
}

/// A completed start-to-end measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lap {
    pub number: u32,
    pub start_count: u32,
    pub end_count: u32,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

impl Lap {
    /// Signed word delta; negative when text was removed during the lap
    pub fn words(&self) -> i64 {
        i64::from(self.end_count) - i64::from(self.start_count)
    }

    pub fn wpm(&self) -> i64 {
        words_per_minute(
            self.start_count,
            self.end_count,
            self.start_time,
            self.end_time,
        )
    }
}

/// Lap duration in minutes, never less than one.
///
/// A negative elapsed time (the wall clock stepped backwards) counts as zero.
pub fn duration_minutes(start_time: Timestamp, end_time: Timestamp) -> f64 {
    let elapsed_ms = (end_time - start_time).num_milliseconds().max(0);
    (elapsed_ms as f64 / 60_000.0).max(1.0)
}

pub fn words_per_minute(
    start_count: u32,
    end_count: u32,
    start_time: Timestamp,
    end_time: Timestamp,
) -> i64 {
    let words = i64::from(end_count) - i64::from(start_count);
    (words as f64 / duration_minutes(start_time, end_time)).floor() as i64
}

/// Parse a committed buffer as a base-10 non-negative word count
pub fn parse_word_count(input: &str) -> Result<u32, SessionError> {
    let invalid = || SessionError::InvalidWordCount {
        input: input.to_string(),
    };
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    input.parse::<u32>().map_err(|_| invalid())
}

/// Read-only projection of a session for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderHint {
    pub state: SessionState,
    pub lap: u32,
    pub message: Message,
    pub start_count: Option<u32>,
    pub start_time: Option<Timestamp>,
    pub end_count: Option<u32>,
    pub end_time: Option<Timestamp>,
    pub wpm: Option<i64>,
    pub commands: &'static str,
    pub pending_input: Option<TextInput>,
    pub laps: Vec<Lap>,
}

#[derive(Debug, Clone)]
pub struct Session<C: Clock = SystemClock> {
    state: SessionState,
    lap: u32,
    start_count: Option<u32>,
    end_count: Option<u32>,
    start_time: Option<Timestamp>,
    end_time: Option<Timestamp>,
    message: Message,
    pending_input: TextInput,
    laps: Vec<Lap>,
    clock: C,
}

impl Default for Session<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_LIMIT)
    }
}

impl Session<SystemClock> {
    pub fn new(char_limit: usize) -> Self {
        Self::with_clock(SystemClock, char_limit)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(clock: C, char_limit: usize) -> Self {
        Self {
            state: SessionState::Startup,
            lap: 1,
            start_count: None,
            end_count: None,
            start_time: None,
            end_time: None,
            message: Message::Prompt(Prompt::EnterStartCount),
            pending_input: TextInput::new(char_limit),
            laps: Vec::new(),
            clock,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn lap(&self) -> u32 {
        self.lap
    }

    pub fn start_count(&self) -> Option<u32> {
        self.start_count
    }

    pub fn end_count(&self) -> Option<u32> {
        self.end_count
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        self.end_time
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn pending_input(&self) -> &TextInput {
        &self.pending_input
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Words per minute of the lap just finished. Only available in `resumed`.
    pub fn wpm(&self) -> Option<i64> {
        if self.state != SessionState::Resumed {
            return None;
        }
        self.laps.last().map(Lap::wpm)
    }

    /// Apply one event. Quit wins over every state-specific rule and leaves
    /// the session untouched.
    pub fn handle(&mut self, event: SessionEvent) -> Step {
        if is_quit(event) {
            info!(state = %self.state, lap = self.lap, "quit requested");
            return Step::Quit;
        }

        match event {
            SessionEvent::Char(c) if self.state.collects_text() => {
                self.pending_input.insert(c);
            }
            SessionEvent::Char(c) => {
                if let Err(err) = self.apply_command(c) {
                    debug!(%err, "ignoring command");
                }
            }
            SessionEvent::Edit(key) if self.state.collects_text() => {
                self.pending_input.apply(key);
            }
            SessionEvent::Commit if self.state.collects_text() => self.commit(),
            SessionEvent::Edit(_) | SessionEvent::Commit | SessionEvent::Quit => {}
        }

        Step::Render(self.render_hint())
    }

    fn apply_command(&mut self, c: char) -> Result<(), SessionError> {
        match (self.state, Command::parse(c)) {
            (SessionState::Ready, Some(Command::Begin)) => {
                self.start_time = Some(self.clock.now());
                self.message = Message::Prompt(Prompt::Writing);
                self.transition(SessionState::Writing);
            }
            (SessionState::Writing, Some(Command::Stop)) => {
                self.end_time = Some(self.clock.now());
                self.pending_input.clear();
                self.message = Message::Prompt(Prompt::EnterEndCount);
                self.transition(SessionState::Stopped);
            }
            (SessionState::Resumed, Some(Command::Resume)) => {
                self.start_count = self.end_count.take();
                self.start_time = Some(self.clock.now());
                self.end_time = None;
                self.lap += 1;
                self.message = Message::Prompt(Prompt::Writing);
                self.transition(SessionState::Writing);
            }
            _ => {
                return Err(SessionError::UnexpectedCommand {
                    command: c,
                    state: self.state,
                })
            }
        }
        Ok(())
    }

    fn commit(&mut self) {
        let count = match parse_word_count(&self.pending_input.value()) {
            Ok(count) => count,
            Err(err) => {
                warn!(state = %self.state, %err, "rejected wordcount");
                self.message = Message::Error(err);
                return;
            }
        };
        self.pending_input.clear();

        match self.state {
            SessionState::Startup => {
                self.start_count = Some(count);
                self.message = Message::Prompt(Prompt::Begin);
                self.transition(SessionState::Ready);
            }
            SessionState::Stopped => {
                self.end_count = Some(count);
                if let (Some(start_count), Some(start_time), Some(end_time)) =
                    (self.start_count, self.start_time, self.end_time)
                {
                    let lap = Lap {
                        number: self.lap,
                        start_count,
                        end_count: count,
                        start_time,
                        end_time,
                    };
                    info!(
                        lap = lap.number,
                        words = lap.words(),
                        wpm = lap.wpm(),
                        "lap complete"
                    );
                    self.laps.push(lap);
                }
                self.message = Message::Prompt(Prompt::LapComplete);
                self.transition(SessionState::Resumed);
            }
            _ => {}
        }
    }

    fn transition(&mut self, to: SessionState) {
        info!(from = %self.state, to = %to, lap = self.lap, "session transition");
        self.state = to;
    }

    pub fn render_hint(&self) -> RenderHint {
        let resumed = self.state == SessionState::Resumed;
        RenderHint {
            state: self.state,
            lap: self.lap,
            message: self.message.clone(),
            start_count: self.start_count,
            start_time: self.start_time,
            end_count: self.end_count.filter(|_| resumed),
            end_time: self.end_time,
            wpm: self.wpm(),
            commands: self.state.commands(),
            pending_input: self
                .state
                .collects_text()
                .then(|| self.pending_input.clone()),
            laps: self.laps.clone(),
        }
    }
}

fn is_quit(event: SessionEvent) -> bool {
    match event {
        SessionEvent::Quit => true,
        SessionEvent::Char(c) => Command::parse(c) == Some(Command::Quit),
        _ => false,
    }
}
