use crate::RsiMonitor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// The outcome of a start request, used to pick the acknowledgement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

/// The outcome of a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopping,
    AlreadyStopped,
}

/// Owns the lifecycle of the monitoring task.
///
/// The controller is the only place that spawns or signals the scanning
/// loop. Both operations serialize on the task mutex, so concurrent command
/// handlers cannot race each other into two live scans.
pub struct MonitorController {
    monitor: RsiMonitor,
    active: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl MonitorController {
    pub fn new(monitor: RsiMonitor) -> Self {
        Self {
            monitor,
            active: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
        }
    }

    /// Starts the monitoring loop, unless a live one already exists.
    ///
    /// A finished task counts as stopped even if nobody called `stop`, so
    /// the bot can always be started again after the loop dies. A stopped
    /// task that is still draining its current instrument counts as running
    /// until it actually exits.
    pub async fn start(&self) -> StartOutcome {
        let mut task = self.task.lock().await;

        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return StartOutcome::AlreadyRunning;
        }

        self.active.store(true, Ordering::SeqCst);
        *task = Some(tokio::spawn(
            self.monitor.clone().run(Arc::clone(&self.active)),
        ));

        StartOutcome::Started
    }

    /// Signals the monitoring loop to stop after its current instrument.
    pub async fn stop(&self) -> StopOutcome {
        let _task = self.task.lock().await;

        if self.active.swap(false, Ordering::SeqCst) {
            StopOutcome::Stopping
        } else {
            StopOutcome::AlreadyStopped
        }
    }
}
