use std::time::Duration;

use tokio::time::Instant;

/// What the caller must do after feeding a text update to the debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Text was cleared: fetch the full catalog immediately, no debounce
    FetchCatalog,
    /// Timer (re)armed: schedule a wake-up at the given deadline
    Armed(Instant),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Armed { deadline: Instant, query: String },
    Fired,
}

/// Collapses a keystroke stream into at most one search per quiet period
///
/// Explicit state machine (`Idle` / `Armed` / `Fired`) with transitions
/// driven by injected instants, so cancellation and teardown are
/// deterministic and testable without real timers. Every update restarts
/// the quiet period; only the most recent text can ever fire. An
/// empty/whitespace update bypasses the debounce entirely and asks for a
/// full-catalog fetch instead.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    state: State,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: State::Idle,
        }
    }

    /// Feeds one raw text update
    pub fn on_input(&mut self, now: Instant, text: &str) -> InputAction {
        if text.trim().is_empty() {
            self.state = State::Idle;
            return InputAction::FetchCatalog;
        }

        let deadline = now + self.delay;
        self.state = State::Armed {
            deadline,
            query: text.to_string(),
        };
        InputAction::Armed(deadline)
    }

    /// Fires the armed search once the quiet period has elapsed
    ///
    /// Returns the query exactly once. A wake-up for a deadline that has
    /// since been superseded returns `None` and leaves the newer arm
    /// untouched.
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        match &self.state {
            State::Armed { deadline, query } if now >= *deadline => {
                let query = query.clone();
                self.state = State::Fired;
                Some(query)
            }
            _ => None,
        }
    }

    /// Cancels any armed timer; used on teardown
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            State::Armed { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, State::Armed { .. })
    }
}
