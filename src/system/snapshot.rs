use std::fmt::Display;

use tracing::warn;

use super::cpu::{self, CpuSample, CpuStats};
use super::error::ProcfsError;
use super::reader::{BoundedString, ProcRoot};
use super::scalars::{self, LoadAverage, MemoryStats};
use super::tasks::{self, TaskTable};

/// Everything sampled in one tick. A field is `None` when its resource
/// could not be read or parsed; the failure has already been logged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemSnapshot {
    pub hostname: Option<BoundedString>,
    pub kernel_version: Option<BoundedString>,
    pub cpu_units: Option<usize>,
    pub uptime: Option<f64>,
    pub load_average: Option<LoadAverage>,
    pub cpu: Option<CpuStats>,
    pub memory: Option<MemoryStats>,
    pub tasks: Option<TaskTable>,
}

impl SystemSnapshot {
    /// Runs every sampler once against `root`. Never fails as a whole.
    pub fn capture(root: &ProcRoot, previous_cpu: Option<CpuSample>) -> Self {
        SystemSnapshot {
            hostname: field("hostname", scalars::hostname(root)),
            kernel_version: field("kernel version", scalars::kernel_version(root)),
            cpu_units: field("cpu units", scalars::cpu_units(root)),
            uptime: field("uptime", scalars::uptime(root)),
            load_average: field("load average", scalars::load_avg(root)),
            cpu: field("cpu usage", cpu::cpu_usage(root, previous_cpu)),
            memory: field("memory usage", scalars::mem_usage(root)),
            tasks: field("task table", tasks::task_table(root)),
        }
    }

    /// The sample to hand back on the next tick.
    pub fn cpu_sample(&self) -> Option<CpuSample> {
        self.cpu.map(|stats| stats.current)
    }

    pub fn cpu_fraction(&self) -> Option<f64> {
        self.cpu.as_ref().and_then(CpuStats::usage)
    }

    pub fn memory_fraction(&self) -> Option<f64> {
        self.memory.as_ref().and_then(MemoryStats::fraction)
    }
}

fn field<T>(what: impl Display, result: Result<T, ProcfsError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(%err, "could not sample {what}");
            None
        }
    }
}
