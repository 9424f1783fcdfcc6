//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

use super::TimerSnapshot;
use crate::{
    tasks::{timer_loop::Reply, TimerCommand, TimerLoop},
    timer::SetDurationOutcome,
};

/// Handle the presentation layer holds onto the running timer
#[derive(Debug)]
pub struct AppState {
    /// Queue into the timer event loop
    commands: mpsc::UnboundedSender<TimerCommand>,
    /// Latest published render state
    render_rx: watch::Receiver<TimerSnapshot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last intent tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState bound to a timer event loop
    pub fn new(
        commands: mpsc::UnboundedSender<TimerCommand>,
        render_rx: watch::Receiver<TimerSnapshot>,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            commands,
            render_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Create an AppState for a loop started with `spawn_timer_loop`
    pub fn from_loop(timer_loop: &TimerLoop, port: u16, host: String) -> Self {
        Self::new(
            timer_loop.commands.clone(),
            timer_loop.render_rx.clone(),
            port,
            host,
        )
    }

    /// Send an intent to the event loop and wait for its reply
    async fn send_intent<R, F>(&self, action: &str, build: F) -> Result<(R, TimerSnapshot), String>
    where
        F: FnOnce(Reply<R>) -> TimerCommand,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(build(reply_tx))
            .map_err(|_| "Timer event loop is not running".to_string())?;

        let reply = reply_rx
            .await
            .map_err(|_| format!("Timer event loop dropped the {} intent", action))?;

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(reply)
    }

    /// Forward a raw duration input
    pub async fn set_duration(&self, input: String) -> Result<(SetDurationOutcome, TimerSnapshot), String> {
        info!("Set duration intent: {:?}", input);
        self.send_intent("set", |reply| TimerCommand::SetDuration { input, reply })
            .await
    }

    /// Start or resume the countdown
    pub async fn start(&self) -> Result<(bool, TimerSnapshot), String> {
        info!("Start intent");
        self.send_intent("start", |reply| TimerCommand::Start { reply })
            .await
    }

    /// Pause the countdown
    pub async fn pause(&self) -> Result<(bool, TimerSnapshot), String> {
        info!("Pause intent");
        self.send_intent("pause", |reply| TimerCommand::Pause { reply })
            .await
    }

    /// Reset to the configured duration
    pub async fn reset(&self) -> Result<TimerSnapshot, String> {
        info!("Reset intent");
        let ((), snapshot) = self
            .send_intent("reset", |reply| TimerCommand::Reset { reply })
            .await?;
        Ok(snapshot)
    }

    /// Ask the event loop to release the ticker and stop
    pub fn unmount(&self) -> Result<(), String> {
        self.commands
            .send(TimerCommand::Unmount)
            .map_err(|_| "Timer event loop is not running".to_string())
    }

    /// Get the most recently published timer state
    pub fn get_timer_state(&self) -> TimerSnapshot {
        self.render_rx.borrow().clone()
    }

    /// Subscribe to render updates
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.render_rx.clone()
    }

    /// Check whether the event loop still accepts intents
    pub fn is_mounted(&self) -> bool {
        if self.commands.is_closed() {
            warn!("Timer event loop has stopped");
            return false;
        }
        true
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::TimerStatus, tasks::spawn_timer_loop, timer::TICK_PERIOD};

    #[tokio::test(start_paused = true)]
    async fn intents_round_trip_through_loop() {
        let timer_loop = spawn_timer_loop(TICK_PERIOD);
        let state = AppState::from_loop(&timer_loop, 0, "127.0.0.1".to_string());

        let (outcome, snapshot) = state.set_duration("10".to_string()).await.unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(snapshot.display, "00:10");

        let (applied, snapshot) = state.start().await.unwrap();
        assert!(applied);
        assert_eq!(snapshot.status, TimerStatus::Running);

        let snapshot = state.reset().await.unwrap();
        assert_eq!(snapshot.remaining_seconds, 10);
        assert_eq!(snapshot.status, TimerStatus::Idle);
        assert_eq!(state.get_last_action().0.as_deref(), Some("reset"));
    }

    #[tokio::test]
    async fn intents_fail_after_unmount() {
        let TimerLoop {
            commands,
            render_rx,
            task,
        } = spawn_timer_loop(TICK_PERIOD);
        let state = AppState::new(commands, render_rx, 0, "127.0.0.1".to_string());

        state.unmount().unwrap();
        task.await.unwrap();

        assert!(!state.is_mounted());
        assert!(state.start().await.is_err());
        assert_eq!(state.get_timer_state(), TimerSnapshot::default());
    }
}
