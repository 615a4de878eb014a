//! The cron-driven scheduler loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use bazaar_capabilities::CapabilityCatalog;
use bazaar_core::ExecContext;
use bazaar_registry::{ScheduledTaskRecord, SealedRegistry};

use crate::resolver::resolve;

/// How often the loop checks for due entries.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// One scheduled task's place in time.
///
/// `next_fire` is `None` once the expression has no further occurrence
/// (impossible dates); such entries are parked forever.
#[derive(Debug, Clone, Copy)]
struct ScheduleEntry {
    task: usize,
    next_fire: Option<DateTime<Utc>>,
}

/// Drives every registered scheduled task through its cron cycle.
///
/// Single-threaded and strictly serial: one poll per [`POLL_INTERVAL`], due
/// tasks executed inline one at a time, no overlap between runs. A handler
/// failure is caught and logged, never propagated; the entry is rescheduled
/// to its next occurrence either way (the `retry_on_failure` flag changes
/// only the log line). A configured timeout bounds each run; an elapsed
/// timeout counts as a failed run.
///
/// The loop never terminates on its own; it runs for the life of the
/// process.
#[derive(Debug)]
pub struct Scheduler {
    registry: Arc<SealedRegistry>,
    context: Arc<ExecContext>,
    entries: Vec<ScheduleEntry>,
}

impl Scheduler {
    /// Create a scheduler with first fire times computed from the current
    /// wall clock.
    #[must_use]
    pub fn new(registry: Arc<SealedRegistry>, context: Arc<ExecContext>) -> Self {
        Self::with_reference_time(registry, context, Utc::now())
    }

    /// Create a scheduler with first fire times strictly after `now`.
    #[must_use]
    pub fn with_reference_time(
        registry: Arc<SealedRegistry>,
        context: Arc<ExecContext>,
        now: DateTime<Utc>,
    ) -> Self {
        let entries = registry
            .schedules()
            .iter()
            .enumerate()
            .map(|(task, record)| {
                let next_fire = record.cron().next_after(now);
                match next_fire {
                    Some(at) => debug!(task = record.name(), %at, "Scheduled first run"),
                    None => warn!(
                        task = record.name(),
                        cron = %record.cron(),
                        "Expression has no future occurrence, task will never run"
                    ),
                }
                ScheduleEntry { task, next_fire }
            })
            .collect();

        Self {
            registry,
            context,
            entries,
        }
    }

    /// The next fire time of the task registered under `name`.
    #[must_use]
    pub fn next_fire(&self, name: &str) -> Option<DateTime<Utc>> {
        self.entries.iter().find_map(|entry| {
            let record = &self.registry.schedules()[entry.task];
            (record.name() == name).then_some(entry.next_fire).flatten()
        })
    }

    /// Run the loop forever, polling once per [`POLL_INTERVAL`].
    pub async fn run(mut self) {
        info!(tasks = self.entries.len(), "Scheduler loop starting");
        let mut interval = tokio::time::interval(POLL_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.poll_once(Utc::now()).await;
        }
    }

    /// Check every entry against `now` and execute the due ones inline.
    ///
    /// Returns how many tasks ran. Exposed so hosts and tests can step the
    /// scheduler deterministically without sleeping.
    pub async fn poll_once(&mut self, now: DateTime<Utc>) -> usize {
        let mut executed = 0_usize;
        for idx in 0..self.entries.len() {
            let Some(fire_at) = self.entries[idx].next_fire else {
                continue;
            };
            if fire_at > now {
                continue;
            }

            let task = self.entries[idx].task;
            let record = &self.registry.schedules()[task];
            run_task(record, self.registry.catalog(), &self.context).await;
            executed = executed.saturating_add(1);

            // Reschedule strictly after the later of the slot just used and
            // the poll instant, so a missed poll cannot re-fire a past slot.
            let record = &self.registry.schedules()[task];
            let next = record.cron().next_after(fire_at.max(now));
            match next {
                Some(at) => debug!(task = record.name(), %at, "Rescheduled"),
                None => warn!(
                    task = record.name(),
                    "Expression has no future occurrence, parking task"
                ),
            }
            self.entries[idx].next_fire = next;
        }
        executed
    }
}

/// Execute one run of `record`: resolve, invoke, contain failure.
async fn run_task(record: &ScheduledTaskRecord, catalog: &CapabilityCatalog, context: &ExecContext) {
    info!(task = record.name(), "Running scheduled task");

    let outcome = execute(record, catalog, context).await;
    match outcome {
        Ok(()) => debug!(task = record.name(), "Scheduled task completed"),
        Err(err) if record.options().retry_on_failure => {
            warn!(
                task = record.name(),
                error = %err,
                "Scheduled task failed, retrying at its next occurrence"
            );
        },
        Err(err) => {
            error!(
                task = record.name(),
                error = %err,
                "Scheduled task failed, not retrying"
            );
        },
    }
}

async fn execute(
    record: &ScheduledTaskRecord,
    catalog: &CapabilityCatalog,
    context: &ExecContext,
) -> anyhow::Result<()> {
    let caps = resolve(record.params(), catalog, Some(context))?;
    let callable = record.callable();
    let fut = callable(caps);

    match record.options().timeout {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(anyhow!("run exceeded timeout of {limit:?}")),
        },
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_registry::{HandlerRegistry, ParamSpec, ScheduleOptions};
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn empty_context() -> Arc<ExecContext> {
        Arc::new(ExecContext::builder().build())
    }

    fn counting_scheduler(
        cron: &str,
        options: ScheduleOptions,
        reference: DateTime<Utc>,
    ) -> (Scheduler, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&runs);

        let mut registry = HandlerRegistry::with_builtin_catalog();
        registry
            .schedule("counter", cron, options, vec![], move |_caps| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .unwrap();

        let scheduler = Scheduler::with_reference_time(
            Arc::new(registry.seal()),
            empty_context(),
            reference,
        );
        (scheduler, runs)
    }

    #[test]
    fn test_first_fire_is_strictly_after_reference() {
        let (scheduler, _runs) = counting_scheduler(
            "0 9 * * *",
            ScheduleOptions::default(),
            utc(2024, 1, 1, 10, 0, 0),
        );
        assert_eq!(scheduler.next_fire("counter"), Some(utc(2024, 1, 2, 9, 0, 0)));
    }

    #[tokio::test]
    async fn test_poll_before_due_runs_nothing() {
        let (mut scheduler, runs) = counting_scheduler(
            "0 9 * * *",
            ScheduleOptions::default(),
            utc(2024, 1, 1, 10, 0, 0),
        );
        let executed = scheduler.poll_once(utc(2024, 1, 2, 8, 59, 59)).await;
        assert_eq!(executed, 0);
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_due_task_runs_and_reschedules() {
        let (mut scheduler, runs) = counting_scheduler(
            "0 9 * * *",
            ScheduleOptions::default(),
            utc(2024, 1, 1, 10, 0, 0),
        );

        let executed = scheduler.poll_once(utc(2024, 1, 2, 9, 0, 0)).await;
        assert_eq!(executed, 1);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.next_fire("counter"), Some(utc(2024, 1, 3, 9, 0, 0)));

        // The same poll instant does not re-fire the slot just used.
        let executed = scheduler.poll_once(utc(2024, 1, 2, 9, 0, 0)).await;
        assert_eq!(executed, 0);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_late_poll_fires_once_and_skips_missed_slots() {
        let (mut scheduler, runs) = counting_scheduler(
            "0 9 * * *",
            ScheduleOptions::default(),
            utc(2024, 1, 1, 10, 0, 0),
        );

        // Three days late: exactly one catch-up run, then back in phase.
        let executed = scheduler.poll_once(utc(2024, 1, 5, 12, 0, 0)).await;
        assert_eq!(executed, 1);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.next_fire("counter"), Some(utc(2024, 1, 6, 9, 0, 0)));
    }

    fn failing_scheduler(retry_on_failure: bool) -> Scheduler {
        let mut registry = HandlerRegistry::with_builtin_catalog();
        registry
            .schedule(
                "flaky",
                "0 9 * * *",
                ScheduleOptions {
                    retry_on_failure,
                    timeout: None,
                },
                vec![],
                |_caps| async move { Err(anyhow!("downstream unavailable")) },
            )
            .unwrap();
        Scheduler::with_reference_time(
            Arc::new(registry.seal()),
            empty_context(),
            utc(2024, 1, 1, 10, 0, 0),
        )
    }

    #[tokio::test]
    async fn test_failure_is_contained_and_rescheduled() {
        for retry in [true, false] {
            let mut scheduler = failing_scheduler(retry);
            let executed = scheduler.poll_once(utc(2024, 1, 2, 9, 0, 0)).await;
            assert_eq!(executed, 1);
            // The retry flag never changes rescheduling, only the log line.
            assert_eq!(scheduler.next_fire("flaky"), Some(utc(2024, 1, 3, 9, 0, 0)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_failure_and_reschedules() {
        let mut registry = HandlerRegistry::with_builtin_catalog();
        registry
            .schedule(
                "sleepy",
                "0 9 * * *",
                ScheduleOptions {
                    retry_on_failure: true,
                    timeout: Some(Duration::from_secs(5)),
                },
                vec![],
                |_caps| async move {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(())
                },
            )
            .unwrap();

        let mut scheduler = Scheduler::with_reference_time(
            Arc::new(registry.seal()),
            empty_context(),
            utc(2024, 1, 1, 10, 0, 0),
        );

        let executed = scheduler.poll_once(utc(2024, 1, 2, 9, 0, 0)).await;
        assert_eq!(executed, 1);
        assert_eq!(scheduler.next_fire("sleepy"), Some(utc(2024, 1, 3, 9, 0, 0)));
    }

    #[tokio::test]
    async fn test_resolution_failure_is_contained() {
        // kv_store with no configured path: resolution fails every run, but
        // the scheduler keeps the task on its cycle.
        let mut registry = HandlerRegistry::with_builtin_catalog();
        registry
            .schedule(
                "needs_store",
                "0 9 * * *",
                ScheduleOptions::default(),
                vec![ParamSpec::named("kv_store")],
                |_caps| async move { Ok(()) },
            )
            .unwrap();

        let mut scheduler = Scheduler::with_reference_time(
            Arc::new(registry.seal()),
            empty_context(),
            utc(2024, 1, 1, 10, 0, 0),
        );

        let executed = scheduler.poll_once(utc(2024, 1, 2, 9, 0, 0)).await;
        assert_eq!(executed, 1);
        assert_eq!(
            scheduler.next_fire("needs_store"),
            Some(utc(2024, 1, 3, 9, 0, 0))
        );
    }

    #[test]
    fn test_impossible_expression_is_parked() {
        let (scheduler, _runs) = counting_scheduler(
            "0 0 30 2 *",
            ScheduleOptions::default(),
            utc(2024, 1, 1, 10, 0, 0),
        );
        assert_eq!(scheduler.next_fire("never"), None);
        assert_eq!(scheduler.next_fire("counter"), None);
    }

    #[tokio::test]
    async fn test_serial_execution_across_tasks() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut registry = HandlerRegistry::with_builtin_catalog();

        for name in ["alpha", "beta"] {
            let order = Arc::clone(&order);
            registry
                .schedule(
                    name,
                    "0 9 * * *",
                    ScheduleOptions::default(),
                    vec![],
                    move |_caps| {
                        let order = Arc::clone(&order);
                        async move {
                            order.lock().unwrap().push(name);
                            Ok(())
                        }
                    },
                )
                .unwrap();
        }

        let mut scheduler = Scheduler::with_reference_time(
            Arc::new(registry.seal()),
            empty_context(),
            utc(2024, 1, 1, 10, 0, 0),
        );

        let executed = scheduler.poll_once(utc(2024, 1, 2, 9, 0, 30)).await;
        assert_eq!(executed, 2);
        assert_eq!(*order.lock().unwrap(), vec!["alpha", "beta"]);
    }
}
