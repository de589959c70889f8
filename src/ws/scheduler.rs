use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Callback invoked on every firing with the owning pad's name
pub type SnapshotFn = Arc<dyn Fn(&str) + Send + Sync>;

/// How long `stop` waits for the timer task before force-aborting it
const STOP_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Stopped,
}

struct SchedulerState {
    phase: Phase,
    task: Option<JoinHandle<()>>,
}

/// Periodic snapshot timer for one pad.
///
/// Phases move Idle -> Running -> Stopped, with Stopped terminal: a
/// stopped scheduler never fires again and cannot be restarted.
pub struct SnapshotScheduler {
    pad_name: String,
    period: Duration,
    snapshot_fn: SnapshotFn,
    shutdown: watch::Sender<bool>,
    state: Mutex<SchedulerState>,
}

impl SnapshotScheduler {
    pub fn new(pad_name: String, period: Duration, snapshot_fn: SnapshotFn) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            pad_name,
            period,
            snapshot_fn,
            shutdown,
            state: Mutex::new(SchedulerState {
                phase: Phase::Idle,
                task: None,
            }),
        }
    }

    /// Arm the periodic timer. The first firing happens one full period
    /// after this call, not immediately.
    pub fn start(&self) {
        let mut state = self.state.lock().unwrap();
        if state.phase != Phase::Idle {
            warn!(
                "Snapshot scheduler for pad '{}' is {:?}, ignoring start",
                self.pad_name, state.phase
            );
            return;
        }
        state.phase = Phase::Running;

        let pad_name = self.pad_name.clone();
        let snapshot_fn = self.snapshot_fn.clone();
        let period = self.period;
        let mut shutdown_rx = self.shutdown.subscribe();
        state.task = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        debug!("Periodic snapshot for pad '{}'", pad_name);
                        (snapshot_fn)(&pad_name);
                    }
                    _ = shutdown_rx.changed() => {
                        debug!("Snapshot scheduler for pad '{}' shutting down", pad_name);
                        break;
                    }
                }
            }
        }));
        debug!(
            "Snapshot scheduler for pad '{}' started, interval {:?}",
            self.pad_name, self.period
        );
    }

    /// Stop the timer. No firing begins after this returns: the task is
    /// signalled and awaited, with an in-flight firing given up to
    /// STOP_GRACE to finish before the task is aborted. Idempotent.
    pub async fn stop(&self) {
        let task = {
            let mut state = self.state.lock().unwrap();
            if state.phase == Phase::Stopped {
                return;
            }
            state.phase = Phase::Stopped;
            state.task.take()
        };
        let _ = self.shutdown.send(true);
        if let Some(mut task) = task {
            match time::timeout(STOP_GRACE, &mut task).await {
                Ok(_) => debug!("Snapshot scheduler for pad '{}' stopped", self.pad_name),
                Err(_) => {
                    warn!(
                        "Snapshot scheduler for pad '{}' did not stop within {:?}, aborting",
                        self.pad_name, STOP_GRACE
                    );
                    task.abort();
                }
            }
        }
    }
}
