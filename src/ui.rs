pub mod spinner;
pub mod theme;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::App;
use crate::clock::Clock;
use crate::session::{Lap, RenderHint, SessionState, Timestamp};
use crate::text_input::TextInput;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

const BANNER: &str = r" _    __________  ___
| |  | | ___ \  \/  |
| |  | | |_/ / .  . |
| |/\| |  __/| |\/| |
\  /\  / |   | |  | |
 \/  \/\_|   \_|  |_/";

/// 12-hour clock, e.g. `3:04PM`
pub fn kitchen_time(t: Timestamp) -> String {
    t.format("%-I:%M%p").to_string()
}

pub fn ui<C: Clock>(app: &App<C>, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hint = &self.hint;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let banner_lines = if self.show_banner {
            BANNER.lines().count() as u16
        } else {
            1
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(banner_lines),
                Constraint::Length(1), // padding
                Constraint::Length(1), // message
                Constraint::Length(1), // padding
                Constraint::Min(3),    // body
                Constraint::Length(1), // commands
            ])
            .split(area);

        let header = if self.show_banner {
            Paragraph::new(BANNER)
        } else {
            Paragraph::new(Span::styled("WPM", bold_style))
        };
        header.render(chunks[0], buf);

        let message_style = if hint.message.is_error() {
            Style::default().fg(Color::Red).patch(bold_style)
        } else {
            bold_style
        };
        Paragraph::new(Span::styled(hint.message.text(), message_style))
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        self.render_body(chunks[4], buf);

        Paragraph::new(Span::styled(hint.commands, italic_style)).render(chunks[5], buf);
    }
}

impl<C: Clock> App<C> {
    fn render_body(&self, area: Rect, buf: &mut Buffer) {
        let hint = &self.hint;
        let mut lines = self.summary_lines(hint);

        if let Some(input) = &hint.pending_input {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(lines.len() as u16),
                    Constraint::Length(3),
                    Constraint::Min(0),
                ])
                .split(area);
            Paragraph::new(lines).render(split[0], buf);

            let inner = self.input_width.max(input.width() as u16 + 1);
            let box_area = Rect {
                width: (inner + 2).min(split[1].width),
                ..split[1]
            };
            render_input(input, box_area, buf);
            return;
        }

        if hint.state == SessionState::Resumed && hint.laps.len() > 1 {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "laps",
                Style::default().add_modifier(Modifier::UNDERLINED),
            )));
            lines.extend(hint.laps.iter().map(|lap| self.lap_line(lap)));
        }

        Paragraph::new(lines).render(area, buf);
    }

    fn summary_lines(&self, hint: &RenderHint) -> Vec<Line<'static>> {
        let time_style = Style::default().fg(self.theme.time);
        let count_style = Style::default().fg(self.theme.word_count);
        let wpm_style = Style::default()
            .fg(self.theme.wpm)
            .add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();

        if hint.state == SessionState::Writing {
            let mut spans = vec![Span::raw(format!("{} ", self.spinner.frame()))];
            if let Some(t) = hint.start_time {
                spans.push(Span::raw(format!("lap {} started at ", hint.lap)));
                spans.push(Span::styled(kitchen_time(t), time_style));
            }
            lines.push(Line::from(spans));
        }

        if let Some(count) = hint.start_count {
            let mut spans = vec![
                Span::raw("starting wordcount: "),
                Span::styled(count.to_string(), count_style),
            ];
            if hint.state != SessionState::Writing {
                if let Some(t) = hint.start_time {
                    spans.push(Span::raw(" at "));
                    spans.push(Span::styled(kitchen_time(t), time_style));
                }
            }
            lines.push(Line::from(spans));
        }

        if let Some(t) = hint.end_time {
            let mut spans = vec![Span::raw("ending wordcount: ")];
            match hint.end_count {
                Some(count) => spans.push(Span::styled(count.to_string(), count_style)),
                None => spans.push(Span::raw("?")),
            }
            spans.push(Span::raw(" at "));
            spans.push(Span::styled(kitchen_time(t), time_style));
            lines.push(Line::from(spans));
        }

        if let Some(wpm) = hint.wpm {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(format!("{wpm} wpm"), wpm_style)));
        }

        lines
    }

    fn lap_line(&self, lap: &Lap) -> Line<'static> {
        Line::from(vec![
            Span::raw(format!("{:>3}. ", lap.number)),
            Span::styled(
                format!("{} wpm", lap.wpm()),
                Style::default().fg(self.theme.wpm),
            ),
            Span::raw(format!(" ({:+} words, ", lap.words())),
            Span::styled(kitchen_time(lap.start_time), Style::default().fg(self.theme.time)),
            Span::raw(" - "),
            Span::styled(kitchen_time(lap.end_time), Style::default().fg(self.theme.time)),
            Span::raw(")"),
        ])
    }
}

fn render_input(input: &TextInput, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL);
    let cursor_style = Style::default().add_modifier(Modifier::REVERSED);

    let line = if input.is_empty() {
        let placeholder = input.placeholder();
        let mut chars = placeholder.chars();
        let first = chars.next().map(String::from).unwrap_or_else(|| " ".into());
        Line::from(vec![
            Span::styled(first, cursor_style),
            Span::styled(
                chars.collect::<String>(),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ])
    } else {
        let (before, after) = input.split_at_cursor();
        let mut rest = after.chars();
        let under = rest.next().map(String::from).unwrap_or_else(|| " ".into());
        Line::from(vec![
            Span::raw(before),
            Span::styled(under, cursor_style),
            Span::raw(rest.collect::<String>()),
        ])
    };

    Paragraph::new(line).block(block).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::Config;
    use crate::runtime::AppEvent;
    use crate::session::Session;
    use crate::text_input::DEFAULT_CHAR_LIMIT;
    use chrono::TimeZone;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn create_test_app(banner: bool) -> (App<ManualClock>, ManualClock) {
        let start = chrono::Local.with_ymd_and_hms(2024, 3, 1, 15, 4, 0).unwrap();
        let clock = ManualClock::new(start);
        let session = Session::with_clock(clock.clone(), DEFAULT_CHAR_LIMIT);
        let config = Config {
            show_banner: banner,
            ..Config::default()
        };
        (App::with_session(session, &config).unwrap(), clock)
    }

    fn press(app: &mut App<ManualClock>, keys: &str) {
        for c in keys.chars() {
            let code = if c == '\n' {
                KeyCode::Enter
            } else {
                KeyCode::Char(c)
            };
            app.on_event(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        }
    }

    fn rendered(app: &App<ManualClock>) -> String {
        let area = Rect::new(0, 0, 80, 30);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content
            .chunks(area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn kitchen_time_format() {
        let t = chrono::Local.with_ymd_and_hms(2024, 3, 1, 15, 4, 0).unwrap();
        assert_eq!(kitchen_time(t), "3:04PM");
        let t = chrono::Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(kitchen_time(t), "9:30AM");
    }

    #[test]
    fn startup_screen_shows_prompt_and_placeholder() {
        let (app, _) = create_test_app(true);
        let screen = rendered(&app);
        assert!(screen.contains("enter beginning wordcount"));
        assert!(screen.contains("nter wordcount"));
        assert!(screen.contains("[q]uit | [enter] submit"));
        assert!(screen.contains(r"| |  | | ___ \"));
    }

    #[test]
    fn banner_can_be_hidden() {
        let (app, _) = create_test_app(false);
        let screen = rendered(&app);
        assert!(screen.contains("WPM"));
        assert!(!screen.contains("|_/"));
    }

    #[test]
    fn invalid_input_is_shown_in_red() {
        let (mut app, _) = create_test_app(false);
        press(&mut app, "ab\n");
        let area = Rect::new(0, 0, 80, 30);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let screen = rendered(&app);
        assert!(screen.contains("invalid input. please enter a numerical wordcount."));
        let row = (0..area.height)
            .find(|y| buffer[(HORIZONTAL_MARGIN, *y)].symbol() == "i")
            .unwrap();
        assert_eq!(buffer[(HORIZONTAL_MARGIN, row)].fg, Color::Red);
    }

    #[test]
    fn writing_screen_shows_spinner_and_start_time() {
        let (mut app, _) = create_test_app(false);
        press(&mut app, "120\nb");
        let screen = rendered(&app);
        assert!(screen.contains("⠋ lap 1 started at 3:04PM"));
        assert!(screen.contains("starting wordcount: 120"));
        assert!(screen.contains("[q]uit | [s]top"));
    }

    #[test]
    fn resumed_screen_shows_wpm() {
        let (mut app, clock) = create_test_app(false);
        press(&mut app, "120\nb");
        clock.advance_secs(90);
        press(&mut app, "s150\n");
        let screen = rendered(&app);
        assert!(screen.contains("20 wpm"));
        assert!(screen.contains("ending wordcount: 150 at 3:05PM"));
        assert!(screen.contains("[q]uit | [r]esume"));
        assert!(!screen.contains("laps"));
    }

    #[test]
    fn lap_history_lists_every_lap() {
        let (mut app, clock) = create_test_app(false);
        press(&mut app, "100\nb");
        clock.advance_secs(60);
        press(&mut app, "s130\n");
        clock.advance_secs(10);
        press(&mut app, "r");
        clock.advance_secs(120);
        press(&mut app, "s150\n");

        let screen = rendered(&app);
        assert!(screen.contains("laps"));
        assert!(screen.contains("  1. 30 wpm (+30 words"));
        assert!(screen.contains("  2. 10 wpm (+20 words"));
    }

    #[test]
    fn terminal_draw_smoke() {
        let (app, _) = create_test_app(true);
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();
    }
}
