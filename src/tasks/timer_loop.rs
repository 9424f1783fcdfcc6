//! Timer event loop task
//!
//! Intents from the presentation layer and ticks from the ticker share one
//! queue, so they are applied strictly one at a time in arrival order.

use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::{
    state::TimerSnapshot,
    timer::{SetDurationOutcome, Ticker, TimerController, TokioTicker},
};

/// Reply channel carrying an intent's result and the state right after it
pub type Reply<T> = oneshot::Sender<(T, TimerSnapshot)>;

/// Everything the event loop can be asked to do
#[derive(Debug)]
pub enum TimerCommand {
    SetDuration {
        input: String,
        reply: Reply<SetDurationOutcome>,
    },
    Start {
        reply: Reply<bool>,
    },
    Pause {
        reply: Reply<bool>,
    },
    Reset {
        reply: Reply<()>,
    },
    /// Delivered by the ticker of the given generation
    Tick {
        generation: u64,
    },
    /// Widget teardown; the loop releases the ticker and exits
    Unmount,
}

/// Handles to a running event loop
#[derive(Debug)]
pub struct TimerLoop {
    pub commands: mpsc::UnboundedSender<TimerCommand>,
    pub render_rx: watch::Receiver<TimerSnapshot>,
    pub task: JoinHandle<()>,
}

/// Mount a timer driven by a tokio interval of `period` and spawn its event loop
pub fn spawn_timer_loop(period: Duration) -> TimerLoop {
    let (commands, commands_rx) = mpsc::unbounded_channel();
    let controller = TimerController::new(TokioTicker::new(period, &commands));
    let (render_tx, render_rx) = watch::channel(controller.snapshot());

    let task = tokio::spawn(timer_loop_task(controller, commands_rx, render_tx));

    TimerLoop {
        commands,
        render_rx,
        task,
    }
}

/// Apply commands to `controller` until unmounted or every sender is gone
pub async fn timer_loop_task<T>(
    mut controller: TimerController<T>,
    mut commands: mpsc::UnboundedReceiver<TimerCommand>,
    render_tx: watch::Sender<TimerSnapshot>,
) where
    T: Ticker,
{
    info!("Starting timer event loop");
    render_tx.send_replace(controller.snapshot());

    while let Some(command) = commands.recv().await {
        match command {
            TimerCommand::SetDuration { input, reply } => {
                let outcome = controller.set_duration(&input);
                respond(&render_tx, &controller, reply, outcome);
            }
            TimerCommand::Start { reply } => {
                let applied = controller.start();
                respond(&render_tx, &controller, reply, applied);
            }
            TimerCommand::Pause { reply } => {
                let applied = controller.pause();
                respond(&render_tx, &controller, reply, applied);
            }
            TimerCommand::Reset { reply } => {
                controller.reset();
                respond(&render_tx, &controller, reply, ());
            }
            TimerCommand::Tick { generation } => {
                controller.on_tick(generation);
                render_tx.send_replace(controller.snapshot());
            }
            TimerCommand::Unmount => {
                info!("Unmount requested");
                break;
            }
        }
    }

    controller.unmount();
    render_tx.send_replace(controller.snapshot());
    info!("Timer event loop stopped");
}

fn respond<T: Ticker, R>(
    render_tx: &watch::Sender<TimerSnapshot>,
    controller: &TimerController<T>,
    reply: Reply<R>,
    result: R,
) {
    let snapshot = controller.snapshot();
    render_tx.send_replace(snapshot.clone());
    if reply.send((result, snapshot)).is_err() {
        debug!("Intent caller went away before the reply");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        state::TimerStatus,
        timer::{ManualTicker, RejectReason},
    };

    fn manual_loop() -> (
        ManualTicker,
        mpsc::UnboundedSender<TimerCommand>,
        watch::Receiver<TimerSnapshot>,
        JoinHandle<()>,
    ) {
        let ticker = ManualTicker::new();
        let controller = TimerController::new(ticker.clone());
        let (tx, rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = watch::channel(controller.snapshot());
        let task = tokio::spawn(timer_loop_task(controller, rx, render_tx));
        (ticker, tx, render_rx, task)
    }

    async fn set(tx: &mpsc::UnboundedSender<TimerCommand>, input: &str) -> SetDurationOutcome {
        let (reply, rx) = oneshot::channel();
        tx.send(TimerCommand::SetDuration {
            input: input.to_string(),
            reply,
        })
        .unwrap();
        rx.await.unwrap().0
    }

    async fn start(tx: &mpsc::UnboundedSender<TimerCommand>) -> (bool, TimerSnapshot) {
        let (reply, rx) = oneshot::channel();
        tx.send(TimerCommand::Start { reply }).unwrap();
        rx.await.unwrap()
    }

    async fn pause(tx: &mpsc::UnboundedSender<TimerCommand>) -> (bool, TimerSnapshot) {
        let (reply, rx) = oneshot::channel();
        tx.send(TimerCommand::Pause { reply }).unwrap();
        rx.await.unwrap()
    }

    #[tokio::test]
    async fn intents_and_ticks_apply_in_order() {
        let (ticker, tx, render_rx, task) = manual_loop();

        assert_eq!(set(&tx, "5").await, SetDurationOutcome::Accepted { duration: 5 });
        let (applied, snapshot) = start(&tx).await;
        assert!(applied);
        assert_eq!(snapshot.status, TimerStatus::Running);

        tx.send(TimerCommand::Tick { generation: 1 }).unwrap();
        tx.send(TimerCommand::Tick { generation: 1 }).unwrap();
        let (applied, snapshot) = pause(&tx).await;
        assert!(applied);
        assert_eq!(snapshot.remaining_seconds, 3);
        assert_eq!(snapshot.status, TimerStatus::Paused);
        assert_eq!(render_rx.borrow().remaining_seconds, 3);

        // Queued behind the pause, so it belongs to a released ticker
        tx.send(TimerCommand::Tick { generation: 1 }).unwrap();
        let (_, snapshot) = start(&tx).await;
        assert_eq!(snapshot.remaining_seconds, 3);
        assert_eq!(ticker.live(), 1);

        tx.send(TimerCommand::Unmount).unwrap();
        task.await.unwrap();
        assert_eq!(ticker.live(), 0);
    }

    #[tokio::test]
    async fn rejected_input_reports_reason() {
        let (_ticker, tx, render_rx, task) = manual_loop();

        assert_eq!(
            set(&tx, "zero").await,
            SetDurationOutcome::Rejected(RejectReason::NotANumber)
        );
        assert_eq!(*render_rx.borrow(), TimerSnapshot::default());

        drop(tx);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_driven_countdown_completes() {
        let TimerLoop {
            commands,
            mut render_rx,
            task,
        } = spawn_timer_loop(Duration::from_millis(1000));

        assert!(set(&commands, "3").await.is_accepted());
        let (applied, _) = start(&commands).await;
        assert!(applied);

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let snapshot = render_rx.borrow_and_update().clone();
        assert_eq!(snapshot.remaining_seconds, 0);
        assert_eq!(snapshot.status, TimerStatus::Idle);
        assert_eq!(snapshot.display, "00:00");

        // No ticker left to move anything
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(!render_rx.has_changed().unwrap());

        commands.send(TimerCommand::Unmount).unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_tokio_ticks() {
        let TimerLoop {
            commands,
            render_rx,
            task,
        } = spawn_timer_loop(Duration::from_millis(1000));

        set(&commands, "10").await;
        start(&commands).await;
        tokio::time::sleep(Duration::from_millis(2500)).await;
        let (_, snapshot) = pause(&commands).await;
        assert_eq!(snapshot.remaining_seconds, 8);

        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert_eq!(render_rx.borrow().remaining_seconds, 8);
        assert_eq!(render_rx.borrow().start_label, "Resume");

        drop(commands);
        task.await.unwrap();
    }
}
