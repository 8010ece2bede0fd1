//! Property-based tests for the session state machine
//!
//! Random event streams are replayed against a manually advanced clock and
//! every step is checked against the transition table.

use super::*;
use crate::clock::ManualClock;
use proptest::prelude::*;

fn arb_edit_key() -> impl Strategy<Value = EditKey> {
    prop_oneof![
        Just(EditKey::Backspace),
        Just(EditKey::Delete),
        Just(EditKey::Left),
        Just(EditKey::Right),
        Just(EditKey::Home),
        Just(EditKey::End),
    ]
}

/// Events weighted towards digits and command letters so laps actually finish
fn arb_event() -> impl Strategy<Value = SessionEvent> {
    prop_oneof![
        4 => proptest::char::range('0', '9').prop_map(SessionEvent::Char),
        3 => prop::sample::select(vec!['b', 's', 'r', 'B', 'S', 'R']).prop_map(SessionEvent::Char),
        1 => proptest::char::range('a', 'z')
            .prop_filter("quit is checked separately", |c| *c != 'q')
            .prop_map(SessionEvent::Char),
        3 => Just(SessionEvent::Commit),
        1 => arb_edit_key().prop_map(SessionEvent::Edit),
    ]
}

fn arb_events() -> impl Strategy<Value = Vec<(SessionEvent, i64)>> {
    prop::collection::vec((arb_event(), 1i64..300), 0..60)
}

fn allowed(from: SessionState, to: SessionState) -> bool {
    use SessionState::*;
    from == to
        || matches!(
            (from, to),
            (Startup, Ready)
                | (Ready, Writing)
                | (Writing, Stopped)
                | (Stopped, Resumed)
                | (Resumed, Writing)
        )
}

/// Whether `event` moves a command-driven state forward
fn accepted_in(state: SessionState, event: SessionEvent) -> bool {
    let SessionEvent::Char(c) = event else {
        return false;
    };
    matches!(
        (state, Command::parse(c)),
        (SessionState::Ready, Some(Command::Begin))
            | (SessionState::Writing, Some(Command::Stop))
            | (SessionState::Resumed, Some(Command::Resume))
    )
}

fn replay(events: &[(SessionEvent, i64)]) -> (Session<ManualClock>, ManualClock) {
    let clock = ManualClock::default();
    let mut session = Session::with_clock(clock.clone(), DEFAULT_CHAR_LIMIT);
    for (event, secs) in events {
        clock.advance_secs(*secs);
        session.handle(*event);
    }
    (session, clock)
}

proptest! {
    #[test]
    fn only_table_transitions_are_reachable(events in arb_events()) {
        let clock = ManualClock::default();
        let mut session = Session::with_clock(clock.clone(), DEFAULT_CHAR_LIMIT);
        for (event, secs) in events {
            clock.advance_secs(secs);
            let before = session.state();
            let step = session.handle(event);
            prop_assert!(matches!(step, Step::Render(_)));
            prop_assert!(
                allowed(before, session.state()),
                "{} -> {} on {:?}", before, session.state(), event
            );
        }
    }

    #[test]
    fn quit_is_universal_and_pure(events in arb_events(), upper in any::<bool>(), host in any::<bool>()) {
        let (mut session, _) = replay(&events);
        let before = session.render_hint();
        let quit = if host {
            SessionEvent::Quit
        } else if upper {
            SessionEvent::Char('Q')
        } else {
            SessionEvent::Char('q')
        };
        prop_assert_eq!(session.handle(quit), Step::Quit);
        prop_assert_eq!(session.render_hint(), before);
    }

    #[test]
    fn failed_parse_only_changes_message(events in arb_events(), junk in "[a-pt-z]{1,5}") {
        let (mut session, _) = replay(&events);
        if session.state().collects_text() {
            session.handle(SessionEvent::Edit(EditKey::End));
            for _ in 0..DEFAULT_CHAR_LIMIT {
                session.handle(SessionEvent::Edit(EditKey::Backspace));
            }
            for c in junk.chars() {
                session.handle(SessionEvent::Char(c));
            }
            let before = session.render_hint();
            session.handle(SessionEvent::Commit);
            let after = session.render_hint();

            prop_assert_eq!(after.state, before.state);
            prop_assert_eq!(after.start_count, before.start_count);
            prop_assert_eq!(after.end_count, before.end_count);
            prop_assert_eq!(&after.pending_input, &before.pending_input);
            prop_assert!(after.message.is_error());
        }
    }

    #[test]
    fn ignored_input_leaves_hint_unchanged(
        events in arb_events(),
        extra in prop::collection::vec((arb_event(), 1i64..300), 1..10),
    ) {
        let (mut session, clock) = replay(&events);
        let state = session.state();
        if !state.collects_text() {
            let before = session.render_hint();
            for (event, secs) in extra {
                if accepted_in(state, event) {
                    continue;
                }
                clock.advance_secs(secs);
                session.handle(event);
                prop_assert_eq!(&session.render_hint(), &before, "{:?} in {}", event, state);
            }
        }
    }

    #[test]
    fn short_laps_use_one_minute(secs in 0i64..60, start in 0u32..100_000, delta in 0u32..10_000) {
        let t0 = Local::now();
        let t1 = t0 + chrono::Duration::seconds(secs);
        prop_assert_eq!(duration_minutes(t0, t1), 1.0);
        prop_assert_eq!(words_per_minute(start, start + delta, t0, t1), i64::from(delta));
    }

    #[test]
    fn resume_chains_counts_and_moves_start_time(events in arb_events()) {
        let clock = ManualClock::default();
        let mut session = Session::with_clock(clock.clone(), DEFAULT_CHAR_LIMIT);
        for (event, secs) in events {
            clock.advance_secs(secs);
            let before_state = session.state();
            let prior_end = session.end_count();
            let prior_start = session.start_time();
            session.handle(event);
            if before_state == SessionState::Resumed && session.state() == SessionState::Writing {
                prop_assert_eq!(session.start_count(), prior_end);
                prop_assert!(session.start_time() > prior_start);
            }
        }
    }

    #[test]
    fn start_never_after_end(events in arb_events()) {
        let (session, _) = replay(&events);
        if let (Some(start), Some(end)) = (session.start_time(), session.end_time()) {
            prop_assert!(start <= end);
        }
        for lap in session.laps() {
            prop_assert!(lap.start_time <= lap.end_time);
        }
    }
}
