use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::{ConcurrencyBudget, HostReport, PingError, PingResult, Prober, SequenceState, SweepConfig};

/// Outcome of a whole run over the host list.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// One report per host, in host list order.
    pub reports: Vec<HostReport>,
    pub elapsed: Duration,
}

/// Hosts share a 16-bit identifier space; the list index is the discriminator.
#[allow(clippy::cast_possible_truncation)]
fn identifier_for(index: usize) -> u16 {
    index as u16
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs one probe sequence per host, at most `concurrency_limit` of them at a time.
pub struct Dispatcher<P> {
    prober: P,
    packet_count: u16,
    concurrency_limit: usize,
    states: Mutex<Vec<SequenceState>>,
}

impl<P> Dispatcher<P>
where
    P: Prober,
{
    pub fn new(config: &SweepConfig, prober: P) -> Self {
        Dispatcher {
            prober,
            packet_count: config.packet_count,
            concurrency_limit: config.concurrency_limit,
            states: Mutex::new(vec![]),
        }
    }

    /// States of the current (or last) run's sequences, in host list order.
    pub fn sequence_states(&self) -> Vec<SequenceState> {
        lock(&self.states).clone()
    }

    fn set_state(&self, index: usize, state: SequenceState) {
        tracing::trace!("sequence {} is {:?}", index, state);
        if let Some(slot) = lock(&self.states).get_mut(index) {
            *slot = state;
        }
    }

    /// Probes every host and blocks until all sequences are done.
    ///
    /// Hosts are admitted in list order; `on_report` is called from the probing thread as each
    /// sequence finishes, so reports arrive in completion order. A fatal failure stops admission,
    /// suppresses further reports and is returned once the sequences already running have ended.
    pub fn run_all<S, F>(&self, hosts: &[S], on_report: F) -> PingResult<RunSummary>
    where
        S: AsRef<str> + Sync,
        F: Fn(&HostReport) + Sync,
    {
        let start_time = Instant::now();
        *lock(&self.states) = vec![SequenceState::Pending; hosts.len()];

        let budget = ConcurrencyBudget::new(self.concurrency_limit);
        let aborted = AtomicBool::new(false);
        let fatal_error: Mutex<Option<PingError>> = Mutex::new(None);
        let reports: Mutex<Vec<(usize, HostReport)>> = Mutex::new(Vec::with_capacity(hosts.len()));

        std::thread::scope(|s| {
            for (index, host) in hosts.iter().enumerate() {
                let permit = budget.acquire();
                if aborted.load(Ordering::SeqCst) {
                    tracing::debug!("run aborted, {} hosts not admitted", hosts.len() - index);
                    break;
                }
                self.set_state(index, SequenceState::Admitted);
                tracing::trace!("{} of {} sequences in flight", budget.in_flight(), budget.limit());

                let (aborted, fatal_error, reports, on_report) = (&aborted, &fatal_error, &reports, &on_report);
                s.spawn(move || {
                    let _permit = permit;
                    self.set_state(index, SequenceState::Running);
                    let host = host.as_ref();
                    let report = match self.prober.run_probe_sequence(host, self.packet_count, identifier_for(index)) {
                        Ok(report) => report,
                        Err(e) if e.kind.is_fatal() => {
                            tracing::error!("aborting run: {}", e);
                            self.set_state(index, SequenceState::Failed(e.kind));
                            let mut fatal_error = lock(fatal_error);
                            aborted.store(true, Ordering::SeqCst);
                            fatal_error.get_or_insert(e);
                            return;
                        }
                        Err(e) => {
                            tracing::warn!("probe sequence for {} failed: {}", host, e);
                            HostReport::failed(host, identifier_for(index), self.packet_count, e.kind)
                        }
                    };
                    self.set_state(index, report.state);
                    {
                        // Reports are only handed out while no fatal error is recorded.
                        let fatal_error = lock(fatal_error);
                        if fatal_error.is_none() {
                            on_report(&report);
                        }
                    }
                    lock(reports).push((index, report));
                });
            }
            budget.wait_idle();
        });

        if let Some(e) = fatal_error.into_inner().unwrap_or_else(PoisonError::into_inner) {
            return Err(e);
        }
        let mut reports = reports.into_inner().unwrap_or_else(PoisonError::into_inner);
        reports.sort_by_key(|(index, _)| *index);
        Ok(RunSummary { reports: reports.into_iter().map(|(_, report)| report).collect(), elapsed: start_time.elapsed() })
    }
}
