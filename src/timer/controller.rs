//! Countdown state machine

use tracing::{debug, info, warn};

use super::{
    input::{parse_duration, SetDurationOutcome},
    ticker::Ticker,
};
use crate::state::{TimerSnapshot, TimerState, TimerStatus};

/// Owns the countdown state and its single live ticker.
///
/// The ticker handle is present exactly while the status is `Running`; every
/// transition out of `Running` releases it.
pub struct TimerController<T: Ticker> {
    state: TimerState,
    ticker: T,
    active: Option<T::Handle>,
    generation: u64,
}

impl<T: Ticker> TimerController<T> {
    /// Mount a fresh controller in the idle state
    pub fn new(ticker: T) -> Self {
        Self {
            state: TimerState::new(),
            ticker,
            active: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    pub fn has_active_ticker(&self) -> bool {
        self.active.is_some()
    }

    /// Generation of the live ticker, if any
    pub fn active_generation(&self) -> Option<u64> {
        self.active.as_ref().map(|_| self.generation)
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    /// Configure a new duration from raw input. Rejected input leaves state untouched.
    pub fn set_duration(&mut self, input: &str) -> SetDurationOutcome {
        match parse_duration(input) {
            Ok(duration) => {
                self.release_ticker();
                self.state.configured_duration = Some(duration);
                self.state.remaining = duration;
                self.state.status = TimerStatus::Idle;
                info!("Duration set to {}s", duration);
                SetDurationOutcome::Accepted { duration }
            }
            Err(reason) => {
                warn!("Rejected duration input {:?}: {}", input, reason);
                SetDurationOutcome::Rejected(reason)
            }
        }
    }

    /// Start or resume the countdown.
    ///
    /// Returns false when there is nothing left to count or it is already running.
    pub fn start(&mut self) -> bool {
        if self.state.remaining == 0 {
            debug!("Start ignored, no time remaining");
            return false;
        }
        if self.state.is_running() && self.active.is_some() {
            debug!("Start ignored, already running");
            return false;
        }

        if self.active.is_none() {
            self.generation += 1;
            self.active = Some(self.ticker.schedule(self.generation));
        }
        self.state.status = TimerStatus::Running;
        info!("Countdown running with {}s remaining", self.state.remaining);
        true
    }

    /// Pause a running countdown. Returns false when it was not running.
    pub fn pause(&mut self) -> bool {
        self.release_ticker();
        if !self.state.is_running() {
            debug!("Pause ignored, status is {:?}", self.state.status);
            return false;
        }

        self.state.status = TimerStatus::Paused;
        info!("Countdown paused at {}s", self.state.remaining);
        true
    }

    /// Stop the countdown and restore the configured duration
    pub fn reset(&mut self) {
        self.release_ticker();
        self.state.status = TimerStatus::Idle;
        self.state.remaining = self.state.reset_target();
        info!("Countdown reset to {}s", self.state.remaining);
    }

    /// Apply one elapsed second. No-op unless running.
    pub fn tick(&mut self) {
        if !self.state.is_running() {
            debug!("Tick ignored, status is {:?}", self.state.status);
            return;
        }

        if self.state.remaining > 1 {
            self.state.remaining -= 1;
            debug!("Tick, {}s remaining", self.state.remaining);
        } else {
            self.state.remaining = 0;
            self.release_ticker();
            self.state.status = TimerStatus::Idle;
            info!("Countdown finished");
        }
    }

    /// Apply a tick delivered by the ticker of the given generation.
    ///
    /// Ticks from a ticker that has already been released are dropped.
    pub fn on_tick(&mut self, generation: u64) {
        if self.active_generation() != Some(generation) {
            debug!("Dropping stale tick from generation {}", generation);
            return;
        }
        self.tick();
    }

    /// Release the ticker at end of life. The timer is left idle.
    pub fn unmount(&mut self) {
        self.release_ticker();
        self.state.status = TimerStatus::Idle;
        info!("Timer unmounted");
    }

    fn release_ticker(&mut self) {
        if let Some(handle) = self.active.take() {
            self.ticker.cancel(handle);
        }
    }
}

impl<T: Ticker> Drop for TimerController<T> {
    fn drop(&mut self) {
        self.release_ticker();
    }
}
