//! Periodic tick scheduling
//!
//! A [`Ticker`] hands out handles that keep a periodic callback alive. The
//! callback stops when the handle is cancelled or dropped, so whoever owns the
//! handle owns the schedule.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{
    sync::mpsc::{UnboundedSender, WeakUnboundedSender},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::tasks::TimerCommand;

/// Default spacing between ticks
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Scheduling primitive driving the countdown
pub trait Ticker {
    /// Live schedule. Dropping it stops further ticks.
    type Handle;

    /// Begin firing ticks tagged with `generation`
    fn schedule(&mut self, generation: u64) -> Self::Handle;

    /// Stop the schedule behind `handle`
    fn cancel(&mut self, handle: Self::Handle) {
        drop(handle);
    }
}

/// Ticker backed by a tokio interval that feeds the timer event loop
#[derive(Debug, Clone)]
pub struct TokioTicker {
    period: Duration,
    commands: WeakUnboundedSender<TimerCommand>,
}

impl TokioTicker {
    /// Create a ticker delivering `TimerCommand::Tick` into `commands`.
    ///
    /// Only a weak reference to the queue is kept so a running ticker never
    /// keeps the event loop alive on its own.
    pub fn new(period: Duration, commands: &UnboundedSender<TimerCommand>) -> Self {
        Self {
            period,
            commands: commands.downgrade(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Spawned interval task; aborted on drop
#[derive(Debug)]
pub struct TokioTickerHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TokioTickerHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TokioTickerHandle {
    fn drop(&mut self) {
        debug!("Releasing ticker generation {}", self.generation);
        self.task.abort();
    }
}

impl Ticker for TokioTicker {
    type Handle = TokioTickerHandle;

    fn schedule(&mut self, generation: u64) -> Self::Handle {
        let period = self.period;
        let commands = self.commands.clone();

        let task = tokio::spawn(async move {
            // First tick lands one full period after scheduling
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let Some(sender) = commands.upgrade() else {
                    break;
                };
                if sender.send(TimerCommand::Tick { generation }).is_err() {
                    break;
                }
            }
        });

        debug!("Scheduled ticker generation {} every {:?}", generation, period);
        TokioTickerHandle { generation, task }
    }
}

/// Clockless ticker; ticks are delivered by calling the controller directly.
///
/// Tracks how many handles are alive so callers can check that a schedule
/// was released.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    live: Arc<AtomicUsize>,
    scheduled: Arc<AtomicUsize>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles currently alive
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Total schedules ever created
    pub fn scheduled(&self) -> usize {
        self.scheduled.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct ManualTickerHandle {
    generation: u64,
    live: Arc<AtomicUsize>,
}

impl ManualTickerHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for ManualTickerHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Ticker for ManualTicker {
    type Handle = ManualTickerHandle;

    fn schedule(&mut self, generation: u64) -> Self::Handle {
        self.live.fetch_add(1, Ordering::SeqCst);
        self.scheduled.fetch_add(1, Ordering::SeqCst);
        ManualTickerHandle {
            generation,
            live: Arc::clone(&self.live),
        }
    }
}
