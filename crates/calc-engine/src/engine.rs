//! Expression Engine
//!
//! Owns the expression buffer and the "last action was an evaluation" flag,
//! and drives the display sink after every state change.
//!
//! ```text
//!            press / clear / backspace
//!              ┌──────────────┐
//!              ▼              │
//!          ┌─────────┐  evaluate()   ┌───────────┐
//!   ──────▶│ Editing │──────────────▶│ Evaluated │
//!          └─────────┘               └───────────┘
//!              ▲   press / clear / backspace │
//!              └─────────────────────────────┤
//!              ▲   auto-clear after "Error"  │
//!              └─────────────────────────────┘
//! ```
//!
//! The only deferred action is the auto-clear that follows an error. It is
//! kept as a deadline and fired by [`ExpressionEngine::poll`], which every
//! operation also calls first, so a shell only has to call `poll` when
//! [`ExpressionEngine::ms_until_next_timer`] says so.

use tracing::{debug, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{AutoClearPolicy, EngineConfig};
use crate::core::evaluator::Evaluator;
use crate::core::format::format_result;
use crate::core::sanitize;
use crate::core::{CalcError, CalcResult};

/// Buffer content shown after a failed evaluation
pub const ERROR_MARKER: &str = "Error";

/// Display text for an empty buffer
pub const EMPTY_DISPLAY: &str = "0";

/// Receives the display text after every state change
pub trait DisplaySink {
    /// Shows `text` to the user
    fn render(&mut self, text: &str);
}

/// Records every rendered frame, oldest first
impl DisplaySink for Vec<String> {
    fn render(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Discards all output
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn render(&mut self, _text: &str) {}
}

/// The two states of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Building an expression
    Editing,
    /// The buffer holds a result or the error marker
    Evaluated,
}

/// What [`ExpressionEngine::evaluate`] did
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    /// The buffer was empty or blank; nothing changed
    Skipped,
    /// The expression produced a value
    Value {
        /// Unrounded result
        value: f64,
        /// Text now in the buffer
        display: String,
    },
    /// The expression failed; the buffer holds [`ERROR_MARKER`]
    Failed(CalcError),
}

impl EvaluationOutcome {
    /// Returns true for [`EvaluationOutcome::Failed`]
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Calculator core: expression buffer, evaluation flag and auto-clear timer
#[derive(Debug)]
pub struct ExpressionEngine<S: DisplaySink> {
    buffer: String,
    evaluated: bool,
    /// Deadlines (clock milliseconds) of scheduled auto-clears, ascending
    pending_clears: Vec<u64>,
    config: EngineConfig,
    evaluator: Evaluator,
    clock: Clock,
    sink: S,
}

impl<S: DisplaySink> ExpressionEngine<S> {
    /// Creates an engine with default configuration and the system clock
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, EngineConfig::default())
    }

    /// Creates an engine with a custom configuration and the system clock
    pub fn with_config(sink: S, config: EngineConfig) -> Self {
        Self::with_clock(sink, config, std::sync::Arc::new(SystemClock::new()))
    }

    /// Creates an engine with a custom configuration and time source
    pub fn with_clock(sink: S, config: EngineConfig, clock: Clock) -> Self {
        let evaluator = if config.reject_non_finite {
            Evaluator::rejecting_non_finite()
        } else {
            Evaluator::new()
        };
        Self {
            buffer: String::new(),
            evaluated: false,
            pending_clears: Vec::new(),
            config,
            evaluator,
            clock,
            sink,
        }
    }

    /// Returns the raw buffer
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns the text the display should show
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.buffer.is_empty() {
            EMPTY_DISPLAY
        } else {
            &self.buffer
        }
    }

    /// Returns the current state
    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.evaluated {
            EngineState::Evaluated
        } else {
            EngineState::Editing
        }
    }

    /// Returns true if the last action was an evaluation or error
    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Returns true if the buffer holds the error marker
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.buffer == ERROR_MARKER
    }

    /// Returns the active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the display sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the display sink mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the engine, returning the display sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Renders the current display text without changing state
    ///
    /// Shells call this once at startup to show the initial `"0"`.
    pub fn refresh(&mut self) {
        let text = self.display_text().to_string();
        self.sink.render(&text);
    }

    /// Appends a token to the buffer
    ///
    /// After an evaluation, a token containing a digit or decimal point starts
    /// a fresh expression; any other token continues from the result.
    pub fn press(&mut self, token: &str) {
        self.begin_input();
        trace!(token, evaluated = self.evaluated, "press");

        if self.evaluated && starts_number(token) {
            self.buffer.clear();
        }
        self.evaluated = false;
        self.buffer.push_str(token);
        self.render();
    }

    /// Empties the buffer
    pub fn clear(&mut self) {
        self.begin_input();
        trace!("clear");

        self.buffer.clear();
        self.evaluated = false;
        self.render();
    }

    /// Deletes the last character, or the whole result after an evaluation
    pub fn backspace(&mut self) {
        self.begin_input();
        trace!(evaluated = self.evaluated, "backspace");

        if self.evaluated {
            self.buffer.clear();
            self.evaluated = false;
        } else {
            self.buffer.pop();
        }
        self.render();
    }

    /// Evaluates the buffer
    ///
    /// A blank buffer is left untouched and nothing is rendered. Any failure
    /// puts [`ERROR_MARKER`] in the buffer and schedules the auto-clear.
    pub fn evaluate(&mut self) -> EvaluationOutcome {
        self.poll();
        if self.buffer.trim().is_empty() {
            trace!("evaluate skipped on blank buffer");
            return EvaluationOutcome::Skipped;
        }
        self.cancel_pending_on_input();

        match self.compute() {
            Ok(value) => {
                let text = format_result(value, self.config.significant_digits);
                debug!(expression = %self.buffer, result = %text, "evaluated");
                self.buffer.clone_from(&text);
                self.evaluated = true;
                self.render();
                EvaluationOutcome::Value {
                    value,
                    display: text,
                }
            }
            Err(err) => {
                warn!(expression = %self.buffer, kind = ?err.kind(), error = %err, "evaluation failed");
                self.buffer = ERROR_MARKER.to_string();
                self.evaluated = true;
                self.render();
                self.schedule_auto_clear();
                EvaluationOutcome::Failed(err)
            }
        }
    }

    /// Fires every auto-clear whose deadline has passed
    ///
    /// Returns the number of timers fired.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now_ms();
        let due = self
            .pending_clears
            .iter()
            .take_while(|deadline| **deadline <= now)
            .count();

        for deadline in self.pending_clears.drain(..due).collect::<Vec<_>>() {
            debug!(deadline, now, "auto-clear fired");
            self.buffer.clear();
            self.evaluated = false;
            self.render();
        }
        due
    }

    /// Returns the earliest pending auto-clear deadline
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending_clears.first().copied()
    }

    /// Returns how long until the next timer is due (0 if already due)
    #[must_use]
    pub fn ms_until_next_timer(&self) -> Option<u64> {
        let now = self.clock.now_ms();
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Returns the number of scheduled auto-clears
    #[must_use]
    pub fn pending_timer_count(&self) -> usize {
        self.pending_clears.len()
    }

    fn compute(&self) -> CalcResult<f64> {
        let prepared = sanitize::prepare(&self.buffer)?;
        self.evaluator.evaluate_str(&prepared)
    }

    fn begin_input(&mut self) {
        self.poll();
        self.cancel_pending_on_input();
    }

    fn cancel_pending_on_input(&mut self) {
        if self.config.auto_clear == AutoClearPolicy::CancelOnInput
            && !self.pending_clears.is_empty()
        {
            debug!(count = self.pending_clears.len(), "auto-clear canceled by input");
            self.pending_clears.clear();
        }
    }

    fn schedule_auto_clear(&mut self) {
        let deadline = self
            .clock
            .now_ms()
            .saturating_add(self.config.error_clear_delay_ms);
        // Deadlines only grow with time, so pushing keeps the list sorted
        self.pending_clears.push(deadline);
        debug!(deadline, "auto-clear scheduled");
    }

    fn render(&mut self) {
        let text = self.display_text().to_string();
        self.sink.render(&text);
    }
}

/// Returns true if typing `token` after a result should start a new number
fn starts_number(token: &str) -> bool {
    token.chars().any(|ch| ch.is_ascii_digit() || ch == '.')
}
