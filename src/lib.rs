#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub use concurrency_budget::{BudgetPermit, ConcurrencyBudget};
pub use config::SweepConfig;
pub use dispatcher::{Dispatcher, RunSummary};
pub use host_stats::HostStats;
pub use ping_error::{FailureKind, GenericError, PingError, PingResult};
pub use probe_outcome::ProbeOutcome;
pub use probe_runner::{HostReport, ProbeRunner, Prober, SequenceState};

pub mod host_list;
pub mod icmp;
pub mod resolver;
pub mod socket;
pub mod summary;

mod concurrency_budget;
mod config;
mod dispatcher;
mod host_stats;
mod ping_error;
mod probe_outcome;
mod probe_runner;
