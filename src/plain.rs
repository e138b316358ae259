//! Line-oriented report for `--plain`: the same sections as the TUI, printed
//! to stdout once per tick.

use std::fmt::Write as _;
use std::io::Write;
use std::time::Duration;

use color_eyre::Result;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::system::collector::Collector;
use crate::system::reader::ProcRoot;
use crate::system::users::UserNames;
use crate::view::{Overview, TaskRow, task_rows};

const TABLE_RULE: &str =
    "----------+---------------------------+--------------+-----------------";

pub fn render_report(overview: &Overview, rows: &[TaskRow]) -> String {
    let mut out = String::new();
    let rule = "-".repeat(TABLE_RULE.len());
    let [one, five, fifteen] = &overview.load;

    // writing into a String cannot fail
    let _ = writeln!(
        out,
        "Hostname: {} | Kernel Version: {} | CPUs: {}",
        overview.hostname, overview.kernel_version, overview.cpu_units
    );
    let _ = writeln!(out, "Uptime: {}", overview.uptime);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Load Average (1/5/15 min): {one} {five} {fifteen}");
    let _ = writeln!(out, "CPU Usage:    {}", overview.cpu_bar);
    let _ = writeln!(
        out,
        "Memory Usage: {} ({} / {})",
        overview.memory_bar, overview.memory_used, overview.memory_total
    );
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Tasks: {} total", overview.task_total);
    let _ = writeln!(out, "{}", overview.task_counts);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:>9} | {:>25} | {:>12} | {:>15}",
        "PID", "Task Name", "State", "User"
    );
    let _ = writeln!(out, "{TABLE_RULE}");
    for row in rows {
        let _ = writeln!(
            out,
            "{:>9} | {:>25} | {:>12} | {:>15}",
            row.pid, row.name, row.state, row.user
        );
    }
    out
}

/// Samples the root and formats one report per call.
pub struct Reporter {
    collector: Collector,
    users: UserNames,
}

impl Reporter {
    pub fn new(root: ProcRoot) -> Self {
        Reporter {
            collector: Collector::new(root),
            users: UserNames::default(),
        }
    }

    pub fn next_report(&mut self) -> String {
        let snapshot = self.collector.refresh();
        let overview = Overview::from_snapshot(&snapshot);
        render_report(&overview, &task_rows(&snapshot, &mut self.users))
    }
}

/// Prints `count` reports, one per `refresh`, or runs until Ctrl-C when
/// `count` is zero.
pub async fn run(root: ProcRoot, refresh: Duration, count: u64) -> Result<()> {
    let mut reporter = Reporter::new(root);
    let mut ticker = interval(refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut printed = 0u64;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!(printed, "interrupted");
                return Ok(());
            }
        }

        let report = reporter.next_report();

        let mut stdout = std::io::stdout().lock();
        if printed > 0 {
            writeln!(stdout)?;
        }
        stdout.write_all(report.as_bytes())?;
        stdout.flush()?;

        printed += 1;
        if count != 0 && printed >= count {
            return Ok(());
        }
    }
}
