//! Background scheduling of availability scans.
//!
//! The controller arms a delayed task that runs one scan, keeps the task's
//! handle until it finishes, and cancels whatever is still pending when it
//! is stopped. A stopped controller never arms new tasks.

use crate::task::PendingTasks;
use crate::{AvailabilityScanner, ScanConfig, TaskId};
use orecheck_probe::RepositoryProbe;
use orecheck_types::{OrecheckError, PackageCandidate, Result};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info};

/// Configuration for scheduled scans.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Delay between arming a task and running its scan.
    pub startup_delay: Duration,
    /// Name given to scheduled tasks in log output.
    pub task_name: String,
}

impl ScheduleConfig {
    /// Default startup delay (5 seconds).
    pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_secs(5);
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            startup_delay: Self::DEFAULT_STARTUP_DELAY,
            task_name: "orecheck-availability-check".to_string(),
        }
    }
}

/// Owns the lifecycle of background availability scans.
///
/// The controller starts out stopped. [`start`](Self::start) activates it,
/// creates a fresh [`AvailabilityScanner`] and arms a delayed scan;
/// [`stop`](Self::stop) deactivates it and cancels every pending task.
/// Activation lives in the pending-task table, so a stop and a concurrent
/// arm can never interleave.
#[derive(Debug)]
pub struct SchedulingController {
    runtime: Handle,
    probe: Arc<dyn RepositoryProbe>,
    scan_config: ScanConfig,
    config: ScheduleConfig,
    scanner: Mutex<Option<Arc<AvailabilityScanner>>>,
    pending: PendingTasks,
}

impl SchedulingController {
    /// Creates a stopped controller that spawns its tasks on `runtime`.
    #[must_use]
    pub fn new(
        runtime: Handle,
        probe: Arc<dyn RepositoryProbe>,
        scan_config: ScanConfig,
        config: ScheduleConfig,
    ) -> Self {
        Self {
            runtime,
            probe,
            scan_config,
            config,
            scanner: Mutex::new(None),
            pending: PendingTasks::default(),
        }
    }

    /// Activates the controller and arms a scan over `candidates`.
    ///
    /// A start on a stopped controller creates a new scanner, so a start
    /// after a stop produces a brand-new scan. A start on a controller that
    /// is already active keeps the current scanner and only arms another
    /// task against it; `candidates` is ignored in that case.
    pub fn start(&self, candidates: Vec<PackageCandidate>) -> Option<TaskId> {
        let scanner = {
            let mut current = self.scanner.lock().unwrap_or_else(PoisonError::into_inner);
            let was_active = self.pending.open();

            match current.as_ref() {
                Some(scanner) if was_active => {
                    debug!("Controller already active, re-arming the current scan");
                    Arc::clone(scanner)
                }
                _ => {
                    let scanner = Arc::new(AvailabilityScanner::new(
                        candidates,
                        Arc::clone(&self.probe),
                        self.scan_config.clone(),
                    ));
                    *current = Some(Arc::clone(&scanner));
                    scanner
                }
            }
        };

        self.arm(scanner)
    }

    /// Arms another delayed scan against the current scanner.
    ///
    /// Returns `None` without arming anything if the controller is stopped.
    /// A scan scheduled after the current scanner completed is a no-op.
    pub fn schedule_scan(&self) -> Option<TaskId> {
        let Some(scanner) = self.scanner() else {
            debug!("Controller was never started, not scheduling a scan");
            return None;
        };
        self.arm(scanner)
    }

    fn arm(&self, scanner: Arc<AvailabilityScanner>) -> Option<TaskId> {
        let armed = self.pending.arm(
            &self.runtime,
            self.config.task_name.clone(),
            self.config.startup_delay,
            scanner,
        );
        if armed.is_none() {
            debug!("Controller is stopped, not scheduling a scan");
        }
        armed
    }

    /// Deactivates the controller and cancels every pending task.
    ///
    /// Tasks still waiting out their delay never scan. A scan that is already
    /// running is left to finish; its result stays readable through the
    /// scanner it belongs to.
    pub fn stop(&self) {
        let cancelled = self.pending.close();
        if !cancelled.is_empty() {
            info!(count = cancelled.len(), "Cancelled pending availability checks");
        }
    }

    /// Stops the controller and starts over with a fresh scan.
    pub fn reload(&self, candidates: Vec<PackageCandidate>) -> Option<TaskId> {
        self.stop();
        self.start(candidates)
    }

    /// Stops the controller and waits for every outstanding task to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if a task panicked.
    pub async fn shutdown(&self) -> Result<()> {
        for handle in self.pending.close() {
            match handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => return Err(OrecheckError::Task(e.to_string())),
            }
        }

        Ok(())
    }

    /// Returns true if the controller accepts new work.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.pending.is_open()
    }

    /// Returns the number of tasks armed but not yet finished.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if the given task is armed and has not finished.
    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.contains(id)
    }

    /// Returns the scanner of the most recent start.
    #[must_use]
    pub fn scanner(&self) -> Option<Arc<AvailabilityScanner>> {
        self.scanner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeRepository, candidates};
    use orecheck_types::ScanState;

    fn controller(repository: &Arc<FakeRepository>) -> SchedulingController {
        SchedulingController::new(
            Handle::current(),
            Arc::clone(repository) as Arc<dyn RepositoryProbe>,
            ScanConfig::default(),
            ScheduleConfig::default(),
        )
    }

    #[test]
    fn test_schedule_config_default() {
        let config = ScheduleConfig::default();
        assert_eq!(config.startup_delay, Duration::from_secs(5));
        assert_eq!(config.task_name, "orecheck-availability-check");
    }

    #[tokio::test(start_paused = true)]
    async fn test_scan_runs_after_delay() {
        let repository = Arc::new(FakeRepository::new().available("a"));
        let controller = controller(&repository);

        let task = controller.start(candidates(&["a", "b"])).unwrap();
        assert!(controller.is_active());
        assert!(controller.is_pending(task));

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(repository.calls(), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        let scanner = controller.scanner().unwrap();
        assert_eq!(scanner.state(), ScanState::Completed);
        assert!(scanner.checkable().unwrap().contains("a"));
        assert_eq!(repository.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_removes_itself() {
        let repository = Arc::new(FakeRepository::new());
        let controller = controller(&repository);

        controller.start(candidates(&["a"]));
        assert_eq!(controller.pending_tasks(), 1);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(controller.pending_tasks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_delay_prevents_scan() {
        let repository = Arc::new(FakeRepository::new().available("a"));
        let controller = controller(&repository);

        controller.start(candidates(&["a", "b"]));
        tokio::time::sleep(Duration::from_secs(1)).await;
        controller.stop();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(repository.calls(), 0);
        assert_eq!(controller.pending_tasks(), 0);
        assert_eq!(controller.scanner().unwrap().state(), ScanState::NotStarted);
    }

    #[tokio::test]
    async fn test_no_scheduling_while_stopped() {
        let repository = Arc::new(FakeRepository::new());
        let controller = controller(&repository);

        assert!(!controller.is_active());
        assert!(controller.schedule_scan().is_none());

        controller.start(candidates(&["a"]));
        controller.stop();
        assert!(controller.schedule_scan().is_none());
        assert_eq!(controller.pending_tasks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_scan_keeps_results() {
        let repository = Arc::new(
            FakeRepository::new()
                .available("a")
                .with_latency(Duration::from_secs(1)),
        );
        let controller = controller(&repository);

        controller.start(candidates(&["a", "b"]));
        tokio::time::sleep(Duration::from_millis(5500)).await;

        let scanner = controller.scanner().unwrap();
        assert_eq!(scanner.state(), ScanState::InProgress);
        controller.stop();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(scanner.state(), ScanState::Completed);
        let checkable = scanner.checkable().unwrap();
        assert_eq!(checkable.len(), 1);
        assert!(checkable.contains("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_starts_fresh_scan() {
        let repository = Arc::new(FakeRepository::new().available("a").available("c"));
        let controller = controller(&repository);

        controller.start(candidates(&["a", "b"]));
        tokio::time::sleep(Duration::from_secs(6)).await;
        let first = controller.scanner().unwrap();
        assert_eq!(first.state(), ScanState::Completed);

        controller.reload(candidates(&["c"]));
        let second = controller.scanner().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.state(), ScanState::NotStarted);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(second.state(), ScanState::Completed);
        assert!(second.checkable().unwrap().contains("c"));
        assert_eq!(repository.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_completed_scanner_is_noop() {
        let repository = Arc::new(FakeRepository::new().available("a"));
        let controller = controller(&repository);

        controller.start(candidates(&["a"]));
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(repository.calls(), 1);

        assert!(controller.schedule_scan().is_some());
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(repository.calls(), 1);
        assert_eq!(controller.pending_tasks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_reuses_active_scanner() {
        let repository = Arc::new(FakeRepository::new().available("a"));
        let controller = controller(&repository);

        let first = controller.start(candidates(&["a"])).unwrap();
        let scanner = controller.scanner().unwrap();
        let second = controller.start(candidates(&["a"])).unwrap();
        assert_ne!(first, second);
        assert!(Arc::ptr_eq(&scanner, &controller.scanner().unwrap()));

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(repository.calls(), 1);
        assert_eq!(controller.pending_tasks(), 0);
        assert!(scanner.checkable().unwrap().contains("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_after_stop_creates_new_scanner() {
        let repository = Arc::new(FakeRepository::new().available("a"));
        let controller = controller(&repository);

        controller.start(candidates(&["a"]));
        let first = controller.scanner().unwrap();
        controller.stop();
        assert!(!controller.is_active());

        controller.start(candidates(&["a"]));
        assert!(controller.is_active());
        assert!(!Arc::ptr_eq(&first, &controller.scanner().unwrap()));

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(repository.calls(), 1);
        assert_eq!(first.state(), ScanState::NotStarted);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_schedule_and_stop_leave_nothing_armed() {
        let repository = Arc::new(FakeRepository::new());

        for _ in 0..100 {
            let controller = Arc::new(SchedulingController::new(
                Handle::current(),
                Arc::clone(&repository) as Arc<dyn RepositoryProbe>,
                ScanConfig::default(),
                ScheduleConfig {
                    startup_delay: Duration::from_secs(60),
                    ..Default::default()
                },
            ));
            controller.start(candidates(&["a"]));

            let scheduler = {
                let controller = Arc::clone(&controller);
                tokio::spawn(async move {
                    for _ in 0..10 {
                        controller.schedule_scan();
                        tokio::task::yield_now().await;
                    }
                })
            };
            let stopper = {
                let controller = Arc::clone(&controller);
                tokio::spawn(async move { controller.stop() })
            };

            scheduler.await.unwrap();
            stopper.await.unwrap();
            assert_eq!(controller.pending_tasks(), 0);
        }
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_waits_for_running_scan() {
        let repository = Arc::new(
            FakeRepository::new()
                .available("a")
                .with_latency(Duration::from_secs(1)),
        );
        let controller = controller(&repository);

        controller.start(candidates(&["a"]));
        tokio::time::sleep(Duration::from_millis(5500)).await;

        controller.shutdown().await.unwrap();
        assert!(!controller.is_active());
        assert_eq!(
            controller.scanner().unwrap().state(),
            ScanState::Completed
        );
    }
}
