//! Display-ready strings derived from a snapshot. Both the TUI and the plain
//! renderer paint from these, so placeholders are decided in one place.

use crate::format::{BAR_SLOTS, format_uptime, human_readable_size, percentage_bar};
use crate::system::snapshot::SystemSnapshot;
use crate::system::tasks::TaskCounts;
use crate::system::users::{UserNames, UserResolver};

pub const UNKNOWN: &str = "(UNKNOWN)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub hostname: String,
    pub kernel_version: String,
    pub cpu_units: String,
    pub uptime: String,
    pub load: [String; 3],
    pub cpu_bar: String,
    pub memory_bar: String,
    pub memory_used: String,
    pub memory_total: String,
    pub task_total: String,
    pub task_counts: String,
}

impl Overview {
    pub fn from_snapshot(snapshot: &SystemSnapshot) -> Self {
        let or_unknown = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());

        let load = match snapshot.load_average {
            Some(load) => [load.one, load.five, load.fifteen].map(|v| format!("{v:.2}")),
            None => [UNKNOWN, UNKNOWN, UNKNOWN].map(str::to_string),
        };

        let (memory_used, memory_total) = match snapshot.memory {
            Some(mem) => (
                human_readable_size(mem.used, 1),
                human_readable_size(mem.total, 1),
            ),
            None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
        };

        let (task_total, task_counts) = match &snapshot.tasks {
            Some(tasks) => (tasks.total().to_string(), counts_line(&tasks.counts)),
            None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
        };

        Overview {
            hostname: or_unknown(snapshot.hostname.as_ref().map(|h| h.value.clone())),
            kernel_version: or_unknown(snapshot.kernel_version.as_ref().map(|v| v.value.clone())),
            cpu_units: or_unknown(snapshot.cpu_units.map(|n| n.to_string())),
            uptime: or_unknown(snapshot.uptime.map(format_uptime)),
            load,
            cpu_bar: usage_bar(snapshot.cpu_fraction()),
            memory_bar: usage_bar(snapshot.memory_fraction()),
            memory_used,
            memory_total,
            task_total,
            task_counts,
        }
    }
}

/// A usage bar, or an empty bar tagged `(UNKNOWN)` when there is no
/// fraction yet (first tick, stalled counters, unreadable resource).
pub fn usage_bar(fraction: Option<f64>) -> String {
    match fraction {
        Some(fraction) => percentage_bar(fraction),
        None => format!("[{}] {UNKNOWN}", "-".repeat(BAR_SLOTS)),
    }
}

fn counts_line(counts: &TaskCounts) -> String {
    let mut line = format!(
        "{} running, {} waiting, {} sleeping, {} stopped, {} zombie",
        counts.running, counts.waiting, counts.sleeping, counts.stopped, counts.zombie
    );
    if counts.unknown > 0 {
        line.push_str(&format!(", {} unknown", counts.unknown));
    }
    line
}

/// One row of the active task table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub pid: u32,
    pub name: String,
    pub state: String,
    pub user: String,
}

pub fn task_rows<R: UserResolver>(
    snapshot: &SystemSnapshot,
    users: &mut UserNames<R>,
) -> Vec<TaskRow> {
    let Some(tasks) = &snapshot.tasks else {
        return Vec::new();
    };
    tasks
        .active
        .iter()
        .map(|task| TaskRow {
            pid: task.pid,
            name: task.name.value.clone(),
            state: task.state.to_string(),
            user: users.name(task.uid).to_string(),
        })
        .collect()
}
