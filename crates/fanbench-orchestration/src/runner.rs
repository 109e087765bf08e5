//! Fan-out/fan-in runner.
//!
//! Dispatches one unit of work per item under the requested strategy, waits
//! for every unit, and returns results at their original index together with
//! the wall-clock time of the whole run. No unit is ever retried, cancelled,
//! or timed out: a hung unit blocks the join.

use std::io::Write;
use std::process::{Child, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use fanbench_core::item::WorkItem;
use fanbench_core::job::{Job, JobError};
use fanbench_core::observer::{UnitEvent, UnitObserver};
use fanbench_core::observers::NoOpObserver;
use fanbench_core::strategy::Strategy;
use fanbench_core::timing::Timing;

use crate::error::FanOutError;
use crate::report::FanOutReport;
use crate::slots::ResultSlots;
use crate::worker::{Envelope, WorkerCommand};

/// Executes work items under a chosen [`Strategy`].
pub struct FanOutRunner {
    worker: Option<WorkerCommand>,
    observer: Arc<dyn UnitObserver>,
}

impl FanOutRunner {
    /// Runner whose worker processes re-invoke the current executable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            worker: None,
            observer: Arc::new(NoOpObserver::new()),
        }
    }

    /// Use `worker` to start process-per-item units.
    #[must_use]
    pub fn with_worker(mut self, worker: WorkerCommand) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Report unit events to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn UnitObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run `job` once per value and collect results by original index.
    ///
    /// An empty input returns immediately without creating any thread,
    /// scheduler, or process. A single item still pays the strategy's full
    /// setup cost.
    pub fn run<J: Job>(
        &self,
        strategy: Strategy,
        job: &J,
        values: Vec<J::Item>,
    ) -> Result<FanOutReport<J::Output>, FanOutError> {
        let items = WorkItem::enumerate(values);
        let start = Instant::now();

        if items.is_empty() {
            debug!(%strategy, job = J::NAME, "no work items, nothing dispatched");
            return Ok(FanOutReport::new(strategy, Vec::new(), Timing::since(start)));
        }

        info!(%strategy, job = J::NAME, units = items.len(), "fan-out starting");
        let results = match strategy {
            Strategy::Sequential => self.run_sequential(job, &items)?,
            Strategy::ThreadPerItem => self.run_threads(job, &items)?,
            Strategy::CooperativeTask => self.run_cooperative(job, &items)?,
            Strategy::ProcessPerItem => self.run_processes(job, &items)?,
        };
        let timing = Timing::since(start);
        info!(%strategy, job = J::NAME, seconds = timing.seconds(), "fan-in complete");

        Ok(FanOutReport::new(strategy, results, timing))
    }

    fn run_sequential<J: Job>(
        &self,
        job: &J,
        items: &[WorkItem<J::Item>],
    ) -> Result<Vec<J::Output>, FanOutError> {
        let mut slots = ResultSlots::with_len(items.len());
        for item in items {
            self.notify(UnitEvent::started(Strategy::Sequential, item.index));
            let started = Instant::now();
            let outcome = job.execute(&item.value);
            self.notify(UnitEvent::finished(
                Strategy::Sequential,
                item.index,
                started.elapsed(),
            ));
            // The first failure aborts the run; later items never start.
            let value = outcome.map_err(|source| FanOutError::Job {
                index: item.index,
                source,
            })?;
            slots.fill(item.index, value);
        }
        slots.into_ordered()
    }

    fn run_threads<J: Job>(
        &self,
        job: &J,
        items: &[WorkItem<J::Item>],
    ) -> Result<Vec<J::Output>, FanOutError> {
        let mut slots: ResultSlots<Result<J::Output, JobError>> =
            ResultSlots::with_len(items.len());
        let observer = self.observer.as_ref();

        let (spawn_error, any_panicked) = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(items.len());
            let mut spawn_error = None;
            for (item, slot) in items.iter().zip(slots.as_mut_slice().iter_mut()) {
                let spawned = thread::Builder::new()
                    .name(format!("fanout-{}", item.index))
                    .spawn_scoped(scope, move || {
                        observer
                            .on_event(&UnitEvent::started(Strategy::ThreadPerItem, item.index));
                        let started = Instant::now();
                        *slot = Some(job.execute(&item.value));
                        observer.on_event(&UnitEvent::finished(
                            Strategy::ThreadPerItem,
                            item.index,
                            started.elapsed(),
                        ));
                    });
                match spawned {
                    Ok(handle) => handles.push((item.index, handle)),
                    Err(source) => {
                        spawn_error = Some(FanOutError::Spawn {
                            index: item.index,
                            source,
                        });
                        break;
                    }
                }
            }

            // Join explicitly so a panic is observed here instead of
            // re-raised by the scope.
            let mut any_panicked = false;
            for (index, handle) in handles {
                if handle.join().is_err() {
                    warn!(index, "thread unit panicked");
                    any_panicked = true;
                }
            }
            (spawn_error, any_panicked)
        });
        if let Some(error) = spawn_error {
            return Err(error);
        }

        // Every started thread was joined, so an empty slot means its unit
        // panicked. Job errors and panics compete on index alike.
        slots.into_outcomes().map_err(|error| match error {
            FanOutError::Unfilled { index } if any_panicked => FanOutError::Panicked { index },
            other => other,
        })
    }

    fn run_cooperative<J: Job>(
        &self,
        job: &J,
        items: &[WorkItem<J::Item>],
    ) -> Result<Vec<J::Output>, FanOutError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(FanOutError::Runtime)?;
        let observer = self.observer.as_ref();

        let tasks = items.iter().map(|item| async move {
            observer.on_event(&UnitEvent::started(Strategy::CooperativeTask, item.index));
            let started = Instant::now();
            let outcome = job.execute_async(&item.value).await;
            observer.on_event(&UnitEvent::finished(
                Strategy::CooperativeTask,
                item.index,
                started.elapsed(),
            ));
            outcome.map_err(|source| FanOutError::Job {
                index: item.index,
                source,
            })
        });

        // `try_join_all` yields outputs in input order whatever the completion
        // order, and drops the remaining tasks on the first failure.
        runtime.block_on(try_join_all(tasks))
    }

    fn run_processes<J: Job>(
        &self,
        job: &J,
        items: &[WorkItem<J::Item>],
    ) -> Result<Vec<J::Output>, FanOutError> {
        let worker = match &self.worker {
            Some(worker) => worker.clone(),
            None => WorkerCommand::current_exe().map_err(FanOutError::WorkerPath)?,
        };
        let payload = serde_json::to_value(job).map_err(FanOutError::Encode)?;

        let mut children: Vec<(usize, Instant, Child)> = Vec::with_capacity(items.len());
        for item in items {
            match self.spawn_worker(&worker, &payload, J::NAME, item) {
                Ok(child) => children.push(child),
                Err(error) => {
                    abandon(children);
                    return Err(error);
                }
            }
        }

        // Every child is reaped before reporting, so a failure leaves no
        // process behind. The lowest failing index wins.
        let mut slots = ResultSlots::with_len(items.len());
        let mut first_error = None;
        for (index, started, child) in children {
            let outcome = Self::collect_child::<J>(index, child);
            self.notify(UnitEvent::finished(
                Strategy::ProcessPerItem,
                index,
                started.elapsed(),
            ));
            match outcome {
                Ok(value) => slots.fill(index, value),
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => slots.into_ordered(),
        }
    }

    /// Start one worker and hand it its envelope.
    ///
    /// A worker that closes stdin early is not a spawn failure: it is still
    /// returned and judged by its exit status and output when joined.
    fn spawn_worker<I: serde::Serialize>(
        &self,
        worker: &WorkerCommand,
        payload: &serde_json::Value,
        job: &str,
        item: &WorkItem<I>,
    ) -> Result<(usize, Instant, Child), FanOutError> {
        let envelope = Envelope {
            job,
            payload,
            item: &item.value,
        };
        let body = serde_json::to_vec(&envelope).map_err(FanOutError::Encode)?;

        self.notify(UnitEvent::started(Strategy::ProcessPerItem, item.index));
        let started = Instant::now();
        let mut child = worker
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FanOutError::Spawn {
                index: item.index,
                source,
            })?;
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(&body) {
                debug!(index = item.index, %err, "worker stopped reading its envelope");
            }
            // Dropping stdin closes the pipe so the worker sees EOF.
        }
        debug!(index = item.index, pid = child.id(), "worker spawned");
        Ok((item.index, started, child))
    }

    fn collect_child<J: Job>(index: usize, child: Child) -> Result<J::Output, FanOutError> {
        let output = child
            .wait_with_output()
            .map_err(|source| FanOutError::Spawn { index, source })?;
        if !output.status.success() {
            return Err(FanOutError::Worker {
                index,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        serde_json::from_slice(&output.stdout)
            .map_err(|source| FanOutError::Protocol { index, source })
    }

    fn notify(&self, event: UnitEvent) {
        self.observer.on_event(&event);
    }
}

/// Kill and reap workers of a run that failed before every unit started.
fn abandon(children: Vec<(usize, Instant, Child)>) {
    for (index, _, mut child) in children {
        if let Err(err) = child.kill() {
            debug!(index, %err, "worker already exited");
        }
        if let Err(err) = child.wait() {
            warn!(index, %err, "could not reap worker");
        }
    }
}

impl Default for FanOutRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use fanbench_core::echo::{Echo, EchoJob};
    use fanbench_core::integrate::{IntegrateJob, Interval};
    use fanbench_core::observers::ChannelObserver;
    use serde::{Deserialize, Serialize};

    const IN_PROCESS: [Strategy; 3] = [
        Strategy::Sequential,
        Strategy::ThreadPerItem,
        Strategy::CooperativeTask,
    ];

    /// Fails on one value, panics on another, echoes the rest.
    #[derive(Serialize, Deserialize)]
    struct Faulty {
        fail_on: i64,
        panic_on: i64,
    }

    impl Job for Faulty {
        type Item = i64;
        type Output = i64;
        const NAME: &'static str = "faulty";

        fn execute(&self, item: &i64) -> Result<i64, JobError> {
            if *item == self.panic_on {
                panic!("unit {item} panicked");
            }
            if *item == self.fail_on {
                return Err(JobError::InvalidInput(format!("refusing {item}")));
            }
            Ok(*item)
        }
    }

    fn echoes(n: i64) -> Vec<Echo> {
        (0..n).map(Echo::new).collect()
    }

    #[test]
    fn identity_for_every_in_process_strategy() {
        let runner = FanOutRunner::new();
        for strategy in IN_PROCESS {
            let report = runner.run(strategy, &EchoJob, echoes(8)).unwrap();
            assert_eq!(report.strategy, strategy);
            assert_eq!(report.results, echoes(8), "strategy {strategy}");
        }
    }

    #[test]
    fn empty_input_spawns_nothing() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let runner = FanOutRunner::new().with_observer(Arc::new(ChannelObserver::new(tx)));
        for strategy in Strategy::ALL {
            let report = runner.run(strategy, &EchoJob, Vec::new()).unwrap();
            assert!(report.is_empty());
            assert!(report.duration() < Duration::from_millis(50));
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn empty_process_run_needs_no_worker() {
        let runner = FanOutRunner::new().with_worker(WorkerCommand::new("/nonexistent/fanbench"));
        let report = runner
            .run(Strategy::ProcessPerItem, &EchoJob, Vec::new())
            .unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn single_item_still_dispatches_a_unit() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let runner = FanOutRunner::new().with_observer(Arc::new(ChannelObserver::new(tx)));
        for strategy in IN_PROCESS {
            let report = runner.run(strategy, &EchoJob, echoes(1)).unwrap();
            assert_eq!(report.results, echoes(1));
        }
        let events: Vec<UnitEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 6);
    }

    #[test]
    fn cooperative_keeps_input_order_when_completion_reverses() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let runner = FanOutRunner::new().with_observer(Arc::new(ChannelObserver::new(tx)));
        let items = vec![
            Echo::delayed(0, Duration::from_millis(50)),
            Echo::delayed(1, Duration::from_millis(10)),
        ];

        let report = runner
            .run(Strategy::CooperativeTask, &EchoJob, items.clone())
            .unwrap();
        assert_eq!(report.results, items);

        let finished: Vec<usize> = rx
            .try_iter()
            .filter(UnitEvent::is_finished)
            .map(|e| e.index)
            .collect();
        assert_eq!(finished, vec![1, 0]);
    }

    #[test]
    fn threads_keep_input_order_when_completion_reverses() {
        let runner = FanOutRunner::new();
        let items: Vec<Echo> = (0..5)
            .map(|i| Echo::delayed(i, Duration::from_millis(10 * (5 - i.unsigned_abs()))))
            .collect();
        let report = runner
            .run(Strategy::ThreadPerItem, &EchoJob, items.clone())
            .unwrap();
        assert_eq!(report.results, items);
    }

    #[test]
    fn cooperative_tasks_interleave() {
        let runner = FanOutRunner::new();
        let items: Vec<Echo> = (0..10)
            .map(|i| Echo::delayed(i, Duration::from_millis(100)))
            .collect();
        let report = runner
            .run(Strategy::CooperativeTask, &EchoJob, items)
            .unwrap();
        assert!(report.duration() < Duration::from_millis(500));
    }

    #[test]
    fn sequential_aborts_on_first_failure() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let runner = FanOutRunner::new().with_observer(Arc::new(ChannelObserver::new(tx)));
        let job = Faulty {
            fail_on: 1,
            panic_on: -1,
        };
        let err = runner
            .run(Strategy::Sequential, &job, vec![0, 1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, FanOutError::Job { index: 1, .. }));

        let started = rx.try_iter().filter(|e| !e.is_finished()).count();
        assert_eq!(started, 2);
    }

    #[test]
    fn threads_surface_lowest_failing_index() {
        let runner = FanOutRunner::new();
        let job = Faulty {
            fail_on: 2,
            panic_on: -1,
        };
        let err = runner
            .run(Strategy::ThreadPerItem, &job, vec![0, 1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, FanOutError::Job { index: 2, .. }));
    }

    #[test]
    fn threads_surface_panics() {
        let runner = FanOutRunner::new();
        let job = Faulty {
            fail_on: -1,
            panic_on: 3,
        };
        let err = runner
            .run(Strategy::ThreadPerItem, &job, vec![0, 1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, FanOutError::Panicked { index: 3 }));
    }

    #[test]
    fn thread_job_error_below_a_panic_wins() {
        let runner = FanOutRunner::new();
        let job = Faulty {
            fail_on: 0,
            panic_on: 3,
        };
        let err = runner
            .run(Strategy::ThreadPerItem, &job, vec![0, 1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, FanOutError::Job { index: 0, .. }), "{err}");
    }

    #[test]
    fn thread_panic_below_a_job_error_wins() {
        let runner = FanOutRunner::new();
        let job = Faulty {
            fail_on: 3,
            panic_on: 1,
        };
        let err = runner
            .run(Strategy::ThreadPerItem, &job, vec![0, 1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, FanOutError::Panicked { index: 1 }), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn workers_closing_stdin_are_reaped_and_reported() {
        use fanbench_core::fetch::FetchJob;

        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("finished");
        // Closes stdin at once, so writing a large envelope hits a broken pipe.
        let script = format!("exec 0<&-; sleep 0.2; echo done >> '{}'", marker.display());
        let runner = FanOutRunner::new().with_worker(WorkerCommand::new("sh").arg("-c").arg(script));
        let items = vec!["y".repeat(512 * 1024); 3];

        let err = runner
            .run(Strategy::ProcessPerItem, &FetchJob, items)
            .unwrap_err();

        // The worker exits cleanly without printing a result.
        assert!(matches!(err, FanOutError::Protocol { index: 0, .. }), "{err}");
        let finished = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(finished.lines().count(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn abandoned_workers_are_killed() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("survived");
        let child = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("sleep 0.3; touch '{}'", marker.display()))
            .spawn()
            .unwrap();

        abandon(vec![(0, Instant::now(), child)]);
        thread::sleep(Duration::from_millis(600));
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[test]
    fn worker_failure_keeps_exit_status_and_stderr() {
        let runner = FanOutRunner::new().with_worker(
            WorkerCommand::new("sh")
                .arg("-c")
                .arg("cat > /dev/null; echo 'no such job' >&2; exit 5"),
        );
        let err = runner
            .run(Strategy::ProcessPerItem, &EchoJob, echoes(2))
            .unwrap_err();
        match err {
            FanOutError::Worker {
                index,
                code,
                stderr,
            } => {
                assert_eq!(index, 0);
                assert_eq!(code, Some(5));
                assert_eq!(stderr, "no such job");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cooperative_failure_aborts_run() {
        let runner = FanOutRunner::new();
        let job = Faulty {
            fail_on: 0,
            panic_on: -1,
        };
        let err = runner
            .run(Strategy::CooperativeTask, &job, vec![0, 1])
            .unwrap_err();
        assert_eq!(err.index(), Some(0));
    }

    #[test]
    fn missing_worker_executable_is_spawn_error() {
        let runner = FanOutRunner::new().with_worker(WorkerCommand::new("/nonexistent/fanbench"));
        let err = runner
            .run(Strategy::ProcessPerItem, &EchoJob, echoes(2))
            .unwrap_err();
        assert!(matches!(err, FanOutError::Spawn { index: 0, .. }));
    }

    #[test]
    fn integration_agrees_across_strategies() {
        let runner = FanOutRunner::new();
        let job = IntegrateJob::new(10_001);
        let intervals = vec![Interval::new(0.0, 1.0), Interval::new(1.0, 2.0)];
        let baseline = runner
            .run(Strategy::Sequential, &job, intervals.clone())
            .unwrap()
            .results;
        for strategy in [Strategy::ThreadPerItem, Strategy::CooperativeTask] {
            let results = runner.run(strategy, &job, intervals.clone()).unwrap().results;
            for (a, b) in baseline.iter().zip(&results) {
                assert_eq!(a.to_bits(), b.to_bits(), "strategy {strategy}");
            }
        }
    }
}
