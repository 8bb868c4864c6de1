//! Human readable one-line summaries of probe results.

use crate::{HostReport, RunSummary, SequenceState};

/// One line for one host, e.g.
/// `example.com (192.0.2.1): sent=3 received=2 lost=1 (33.3% loss) rtt min/avg/max = 1.015/1.120/1.225 ms`.
#[must_use]
pub fn format_report(report: &HostReport) -> String {
    let stats = &report.stats;
    let mut line = match (report.state, report.ip_addr) {
        (SequenceState::Failed(kind), _) => format!("{}: {}, ", report.host, kind),
        (_, Some(ip_addr)) => format!("{} ({}): ", report.host, ip_addr),
        (_, None) => format!("{}: ", report.host),
    };
    line += &format!(
        "sent={} received={} lost={} ({:.1}% loss)",
        stats.sent(),
        stats.received(),
        stats.lost(),
        stats.loss_percent()
    );
    if let (Some(min), Some(avg), Some(max)) = (stats.min_millis(), stats.avg_millis(), stats.max_millis()) {
        line += &format!(" rtt min/avg/max = {min:.3}/{avg:.3}/{max:.3} ms");
    }
    line
}

/// Closing line of a run.
#[must_use]
pub fn format_run(summary: &RunSummary) -> String {
    let received = summary.reports.iter().filter(|report| report.stats.received() > 0).count();
    format!(
        "{} hosts probed, {} answered, in {:.3} s",
        summary.reports.len(),
        received,
        summary.elapsed.as_secs_f64()
    )
}
