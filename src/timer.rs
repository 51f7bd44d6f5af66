//! Rest timer state machine
//!
//! ```text
//! Idle -> Running -> {Paused <-> Running} -> Completed -> Idle
//! ```
//!
//! The timer owns no clock. A driver delivers one tick per second through
//! [`RestTimer::tick`], or through [`RestTimer::fire`] with the token it was
//! handed when the countdown was scheduled. Every transition that cancels or
//! reschedules the countdown bumps the generation, so a tick carrying an
//! older token is ignored and at most one tick source is live.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ticks a completed timer stays visible before returning to idle
pub const DEFAULT_GRACE_TICKS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerPhase::Idle => write!(f, "idle"),
            TimerPhase::Running => write!(f, "running"),
            TimerPhase::Paused => write!(f, "paused"),
            TimerPhase::Completed => write!(f, "completed"),
        }
    }
}

/// What the rest period follows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestLabel {
    pub exercise: String,
    /// 1-based number of the set just completed
    pub set_number: u32,
    pub total_sets: u32,
}

impl RestLabel {
    pub fn new(exercise: impl Into<String>, set_number: u32, total_sets: u32) -> Self {
        Self {
            exercise: exercise.into(),
            set_number,
            total_sets,
        }
    }
}

impl fmt::Display for RestLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - set {}/{}", self.exercise, self.set_number, self.total_sets)
    }
}

/// Observable timer state; `remaining_seconds` never goes below zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: TimerPhase,
    pub remaining_seconds: u32,
    pub initial_seconds: u32,
    pub label: Option<RestLabel>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            phase: TimerPhase::Idle,
            remaining_seconds: 0,
            initial_seconds: 0,
            label: None,
        }
    }
}

/// Handle for one scheduled tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

/// Timer notifications. All methods default to no-ops.
pub trait TimerListener {
    /// A countdown second elapsed
    fn on_tick(&mut self, _state: &TimerState) {}

    /// State changed through a control call
    fn on_update(&mut self, _state: &TimerState) {}

    /// Countdown reached zero; fired once per run
    fn on_complete(&mut self, _state: &TimerState) {}

    /// Grace period over, timer back to idle
    fn on_dismiss(&mut self, _state: &TimerState) {}
}

impl TimerListener for () {}

impl<A: TimerListener, B: TimerListener> TimerListener for (A, B) {
    fn on_tick(&mut self, state: &TimerState) {
        self.0.on_tick(state);
        self.1.on_tick(state);
    }

    fn on_update(&mut self, state: &TimerState) {
        self.0.on_update(state);
        self.1.on_update(state);
    }

    fn on_complete(&mut self, state: &TimerState) {
        self.0.on_complete(state);
        self.1.on_complete(state);
    }

    fn on_dismiss(&mut self, state: &TimerState) {
        self.0.on_dismiss(state);
        self.1.on_dismiss(state);
    }
}

/// Countdown between sets
#[derive(Debug)]
pub struct RestTimer<L: TimerListener = ()> {
    state: TimerState,
    listener: L,
    generation: u64,
    active: Option<TickToken>,
    grace_ticks: u32,
    grace_remaining: u32,
}

impl Default for RestTimer<()> {
    fn default() -> Self {
        Self::new(())
    }
}

impl<L: TimerListener> RestTimer<L> {
    pub fn new(listener: L) -> Self {
        Self::with_grace(listener, DEFAULT_GRACE_TICKS)
    }

    pub fn with_grace(listener: L, grace_ticks: u32) -> Self {
        Self {
            state: TimerState::default(),
            listener,
            generation: 0,
            active: None,
            grace_ticks,
            grace_remaining: 0,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == TimerPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state.phase == TimerPhase::Paused
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Token of the live tick source, if any
    pub fn active_token(&self) -> Option<TickToken> {
        self.active
    }

    fn schedule(&mut self) -> TickToken {
        self.generation += 1;
        let token = TickToken(self.generation);
        self.active = Some(token);
        token
    }

    fn cancel(&mut self) {
        self.generation += 1;
        self.active = None;
    }

    fn rejected(&self, action: &str) -> bool {
        tracing::debug!(action, phase = %self.state.phase, "Timer call ignored in current phase");
        false
    }

    fn notify_update(&mut self) {
        self.listener.on_update(&self.state);
    }

    /// Start a countdown of `seconds`, replacing any current one
    pub fn start(&mut self, seconds: u32, label: Option<RestLabel>) -> bool {
        if seconds == 0 {
            return self.rejected("start");
        }

        self.cancel();
        self.grace_remaining = 0;
        self.state = TimerState {
            phase: TimerPhase::Running,
            remaining_seconds: seconds,
            initial_seconds: seconds,
            label,
        };
        self.schedule();

        tracing::debug!(seconds, "Rest timer started");
        self.notify_update();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state.phase != TimerPhase::Running {
            return self.rejected("pause");
        }

        self.cancel();
        self.state.phase = TimerPhase::Paused;
        self.notify_update();
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.phase != TimerPhase::Paused {
            return self.rejected("resume");
        }

        self.state.phase = TimerPhase::Running;
        self.schedule();
        self.notify_update();
        true
    }

    /// Restart from the initial duration, or clear a completed timer
    pub fn reset(&mut self) -> bool {
        match self.state.phase {
            TimerPhase::Running | TimerPhase::Paused => {
                self.cancel();
                self.state.phase = TimerPhase::Running;
                self.state.remaining_seconds = self.state.initial_seconds;
                self.schedule();
            }
            TimerPhase::Completed => {
                self.cancel();
                self.grace_remaining = 0;
                self.state.phase = TimerPhase::Idle;
                self.state.remaining_seconds = self.state.initial_seconds;
            }
            TimerPhase::Idle => return self.rejected("reset"),
        }

        self.notify_update();
        true
    }

    /// Cancel everything and clear the display
    pub fn stop(&mut self) -> bool {
        if self.state == TimerState::default() && self.active.is_none() {
            return self.rejected("stop");
        }

        self.clear();
        self.notify_update();
        true
    }

    /// End the rest early; no completion is reported
    pub fn skip(&mut self) -> bool {
        if !matches!(self.state.phase, TimerPhase::Running | TimerPhase::Paused) {
            return self.rejected("skip");
        }

        tracing::debug!(remaining = self.state.remaining_seconds, "Rest skipped");
        self.clear();
        self.notify_update();
        true
    }

    /// Add or remove seconds. Clamps at zero and never completes the timer.
    pub fn adjust(&mut self, delta_seconds: i64) -> bool {
        if !matches!(self.state.phase, TimerPhase::Running | TimerPhase::Paused) {
            return self.rejected("adjust");
        }

        let adjusted = i64::from(self.state.remaining_seconds).saturating_add(delta_seconds);
        self.state.remaining_seconds = u32::try_from(adjusted.max(0)).unwrap_or(u32::MAX);
        self.notify_update();
        true
    }

    fn clear(&mut self) {
        self.cancel();
        self.grace_remaining = 0;
        self.state = TimerState::default();
    }

    /// Deliver a tick to the live tick source
    pub fn tick(&mut self) -> bool {
        match self.active {
            Some(token) => self.fire(token),
            None => false,
        }
    }

    /// Deliver a tick from `token`'s source; stale tokens are ignored
    pub fn fire(&mut self, token: TickToken) -> bool {
        if self.active != Some(token) {
            tracing::trace!(?token, "Stale timer tick ignored");
            return false;
        }

        match self.state.phase {
            TimerPhase::Running => {
                self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
                self.listener.on_tick(&self.state);

                if self.state.remaining_seconds == 0 {
                    self.complete();
                }
                true
            }
            TimerPhase::Completed => {
                self.grace_remaining = self.grace_remaining.saturating_sub(1);
                if self.grace_remaining == 0 {
                    self.dismiss();
                }
                true
            }
            TimerPhase::Idle | TimerPhase::Paused => false,
        }
    }

    fn complete(&mut self) {
        self.cancel();
        self.state.phase = TimerPhase::Completed;
        tracing::debug!(initial = self.state.initial_seconds, "Rest complete");
        self.listener.on_complete(&self.state);

        if self.grace_ticks == 0 {
            self.dismiss();
        } else {
            self.grace_remaining = self.grace_ticks;
            self.schedule();
        }
    }

    fn dismiss(&mut self) {
        self.clear();
        self.listener.on_dismiss(&self.state);
    }
}

/// Control typed while a rest runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Pause when running, resume when paused
    Toggle,
    Reset,
    Skip,
    /// Seconds to add (negative removes)
    Adjust(i64),
}

impl FromStr for TimerCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        match input.as_str() {
            "p" | "pause" | "resume" | "" => Ok(TimerCommand::Toggle),
            "r" | "reset" => Ok(TimerCommand::Reset),
            "s" | "skip" => Ok(TimerCommand::Skip),
            _ if input.starts_with('+') || input.starts_with('-') => input
                .parse::<i64>()
                .map(TimerCommand::Adjust)
                .map_err(|_| format!("Invalid adjustment: {}", s.trim())),
            _ => Err(format!("Unknown timer command: {}", s.trim())),
        }
    }
}

impl<L: TimerListener> RestTimer<L> {
    /// Route a typed command to the matching control
    pub fn apply(&mut self, command: TimerCommand) -> bool {
        match command {
            TimerCommand::Toggle if self.is_paused() => self.resume(),
            TimerCommand::Toggle => self.pause(),
            TimerCommand::Reset => self.reset(),
            TimerCommand::Skip => self.skip(),
            TimerCommand::Adjust(delta) => self.adjust(delta),
        }
    }
}
