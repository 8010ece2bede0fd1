use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::AppError;
use crate::runtime::AppEvent;
use crate::session::{RenderHint, Session, SessionEvent, SessionState, Step};
use crate::text_input::EditKey;
use crate::ui::{spinner::Spinner, theme::Theme};

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Redraw,
    Quit,
}

/// Owns the session and the display-only collaborators around it
#[derive(Debug)]
pub struct App<C: Clock = SystemClock> {
    pub session: Session<C>,
    pub hint: RenderHint,
    pub spinner: Spinner,
    pub theme: Theme,
    pub show_banner: bool,
    pub input_width: u16,
}

impl App<SystemClock> {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Self::with_session(Session::new(config.char_limit), config)
    }
}

impl<C: Clock> App<C> {
    pub fn with_session(session: Session<C>, config: &Config) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            hint: session.render_hint(),
            session,
            spinner: Spinner::default(),
            theme: Theme::from_config(&config.theme)?,
            show_banner: config.show_banner,
            input_width: 20,
        })
    }

    /// Route one runtime event. Only keys reach the session; ticks drive the
    /// spinner and resizes the input width.
    pub fn on_event(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Key(key) => {
                let Some(ev) = map_key(key) else {
                    return Flow::Continue;
                };
                match self.session.handle(ev) {
                    Step::Quit => Flow::Quit,
                    Step::Render(hint) => {
                        if hint.state != self.hint.state {
                            self.spinner.reset();
                        }
                        self.hint = hint;
                        Flow::Redraw
                    }
                }
            }
            AppEvent::Tick => {
                if self.hint.state == SessionState::Writing {
                    self.spinner.tick();
                    Flow::Redraw
                } else {
                    Flow::Continue
                }
            }
            AppEvent::Resize(width, height) => {
                debug!(width, height, "resize");
                self.input_width = input_width_for(width);
                Flow::Redraw
            }
        }
    }
}

/// The input box spans a third of the terminal
pub fn input_width_for(terminal_width: u16) -> u16 {
    (terminal_width / 3).max(1)
}

/// Translate a terminal key into a session event. Keys with no meaning to
/// the session map to `None`.
pub fn map_key(key: KeyEvent) -> Option<SessionEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(SessionEvent::Quit),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Esc => Some(SessionEvent::Quit),
        KeyCode::Enter => Some(SessionEvent::Commit),
        KeyCode::Backspace => Some(SessionEvent::Edit(EditKey::Backspace)),
        KeyCode::Delete => Some(SessionEvent::Edit(EditKey::Delete)),
        KeyCode::Left => Some(SessionEvent::Edit(EditKey::Left)),
        KeyCode::Right => Some(SessionEvent::Edit(EditKey::Right)),
        KeyCode::Home => Some(SessionEvent::Edit(EditKey::Home)),
        KeyCode::End => Some(SessionEvent::Edit(EditKey::End)),
        KeyCode::Char(c) => Some(SessionEvent::Char(c)),
        _ => None,
    }
}
