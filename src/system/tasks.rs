use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use super::error::ProcfsError;
use super::reader::{BoundedString, ProcRoot};

/// Task names are cut to this many characters for the table.
pub const TASK_NAME_MAX: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    Running,
    Sleeping,
    /// Uninterruptible sleep, usually waiting on I/O.
    Waiting,
    Stopped,
    Zombie,
    Unknown(char),
}

impl TaskState {
    pub fn from_code(code: char) -> Self {
        match code {
            'R' => TaskState::Running,
            // idle kernel threads count as sleeping
            'S' | 'I' => TaskState::Sleeping,
            'D' => TaskState::Waiting,
            'T' | 't' => TaskState::Stopped,
            'Z' => TaskState::Zombie,
            other => TaskState::Unknown(other),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Running => f.write_str("running"),
            TaskState::Sleeping => f.write_str("sleeping"),
            TaskState::Waiting => f.write_str("waiting"),
            TaskState::Stopped => f.write_str("stopped"),
            TaskState::Zombie => f.write_str("zombie"),
            TaskState::Unknown(code) => write!(f, "unknown ({code})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub uid: u32,
    pub name: BoundedString,
    pub state: TaskState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub running: usize,
    pub waiting: usize,
    pub sleeping: usize,
    pub stopped: usize,
    pub zombie: usize,
    pub unknown: usize,
}

impl TaskCounts {
    pub fn total(&self) -> usize {
        self.running + self.waiting + self.sleeping + self.stopped + self.zombie + self.unknown
    }

    fn increment(&mut self, state: TaskState) {
        let bucket = match state {
            TaskState::Running => &mut self.running,
            TaskState::Sleeping => &mut self.sleeping,
            TaskState::Waiting => &mut self.waiting,
            TaskState::Stopped => &mut self.stopped,
            TaskState::Zombie => &mut self.zombie,
            TaskState::Unknown(_) => &mut self.unknown,
        };
        *bucket += 1;
    }
}

/// Per-state counts plus every task that is not sleeping, in the order the
/// root listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTable {
    pub counts: TaskCounts,
    pub active: Vec<ProcessInfo>,
    /// Entries that exited mid-scan or had an unreadable status. Not part of
    /// the counts.
    pub skipped: usize,
}

impl TaskTable {
    pub fn total(&self) -> usize {
        self.counts.total()
    }

    pub fn record(&mut self, task: ProcessInfo) {
        self.counts.increment(task.state);
        if task.state != TaskState::Sleeping {
            self.active.push(task);
        }
    }
}

impl FromIterator<ProcessInfo> for TaskTable {
    fn from_iter<I: IntoIterator<Item = ProcessInfo>>(iter: I) -> Self {
        let mut table = TaskTable::default();
        for task in iter {
            table.record(task);
        }
        table
    }
}

/// Scans every numeric entry of the root. Tasks that vanish between the
/// listing and the status read are skipped.
pub fn task_table(root: &ProcRoot) -> Result<TaskTable, ProcfsError> {
    let mut table = TaskTable::default();

    for entry in root.entries()? {
        let Ok(entry) = entry else {
            continue;
        };
        let Some(pid) = parse_pid(&entry.file_name()) else {
            continue;
        };

        match read_task(root, pid) {
            Ok(task) => table.record(task),
            Err(err) if err.is_unavailable() => {
                debug!(pid, %err, "task exited before its status was read");
                table.skipped += 1;
            }
            Err(err) => {
                warn!(pid, %err, "skipping task with malformed status");
                table.skipped += 1;
            }
        }
    }

    debug!(
        total = table.total(),
        active = table.active.len(),
        skipped = table.skipped,
        "built task table"
    );
    Ok(table)
}

pub fn read_task(root: &ProcRoot, pid: u32) -> Result<ProcessInfo, ProcfsError> {
    let rel = format!("{pid}/status");
    let status = root.read_to_string(&rel)?;
    parse_status(root.resolve(&rel), pid, &status)
}

/// Only all-digit names are process entries; `self`, `sys`, `net` and
/// friends are not.
pub fn parse_pid(name: &OsStr) -> Option<u32> {
    let name = name.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok().filter(|&pid| pid > 0)
}

pub fn parse_status(
    path: impl AsRef<Path>,
    pid: u32,
    status: &str,
) -> Result<ProcessInfo, ProcfsError> {
    let path = path.as_ref();
    let mut name = None;
    let mut state = None;
    let mut uid = None;

    for line in status.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key {
            "Name" => name = Some(value.trim()),
            "State" => state = value.trim().chars().next(),
            "Uid" => {
                let real = value.split_whitespace().next().unwrap_or_default();
                uid = Some(real.parse::<u32>().map_err(|_| {
                    ProcfsError::malformed(path, format!("uid {real:?} is not a number"))
                })?);
            }
            _ => {}
        }
        if name.is_some() && state.is_some() && uid.is_some() {
            break;
        }
    }

    let name = name.ok_or_else(|| ProcfsError::malformed(path, "no Name line"))?;
    let state = state.ok_or_else(|| ProcfsError::malformed(path, "no State line"))?;
    let uid = uid.ok_or_else(|| ProcfsError::malformed(path, "no Uid line"))?;

    Ok(ProcessInfo {
        pid,
        uid,
        name: BoundedString::bound(name, TASK_NAME_MAX),
        state: TaskState::from_code(state),
    })
}
