//! CPU utilisation from two snapshots of the aggregate `stat` counters.
//!
//! The counters are cumulative jiffies since boot, so a single sample says
//! nothing about current load. The caller keeps the previous sample and
//! passes it back on the next tick.

use std::path::Path;

use tracing::debug;

use super::error::ProcfsError;
use super::reader::ProcRoot;

pub const STAT_PATH: &str = "stat";

/// One reading of the aggregate CPU counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSample {
    /// idle + iowait
    pub idle: u64,
    /// user + nice + system + idle + iowait + irq + softirq + steal
    pub total: u64,
}

impl CpuSample {
    pub fn busy(&self) -> u64 {
        self.total.saturating_sub(self.idle)
    }
}

/// The sample taken this tick, paired with the one from the tick before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuStats {
    pub previous: Option<CpuSample>,
    pub current: CpuSample,
}

impl CpuStats {
    /// Fraction of time spent busy between the two samples, or `None` on the
    /// first tick and whenever the counters did not advance.
    pub fn usage(&self) -> Option<f64> {
        usage_fraction(self.previous?, self.current)
    }
}

/// `(busy₂ - busy₁) / (total₂ - total₁)`, clamped to `[0, 1]`.
pub fn usage_fraction(previous: CpuSample, current: CpuSample) -> Option<f64> {
    if current.total <= previous.total {
        return None;
    }
    let total = (current.total - previous.total) as f64;
    let busy = current.busy().saturating_sub(previous.busy()) as f64;
    Some((busy / total).clamp(0.0, 1.0))
}

/// Reads the counter line once and pairs it with `previous`.
pub fn cpu_usage(root: &ProcRoot, previous: Option<CpuSample>) -> Result<CpuStats, ProcfsError> {
    let line = root.read_line_unbounded(STAT_PATH)?;
    let current = parse_cpu_sample(root.resolve(STAT_PATH), &line)?;
    let stats = CpuStats { previous, current };
    debug!(
        idle = current.idle,
        total = current.total,
        usage = ?stats.usage(),
        "sampled cpu counters"
    );
    Ok(stats)
}

/// Finds the aggregate `cpu` line (not `cpu0`, `cpu1`, ...) and sums it.
pub fn parse_cpu_sample(path: impl AsRef<Path>, stat: &str) -> Result<CpuSample, ProcfsError> {
    let path = path.as_ref();
    let line = stat
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| ProcfsError::malformed(path, "no aggregate cpu line"))?;

    let counters = line
        .split_whitespace()
        .skip(1)
        // guest and guest_nice are already included in user and nice
        .take(8)
        .map(|field| {
            field.parse::<u64>().map_err(|_| {
                ProcfsError::malformed(path, format!("cpu counter {field:?} is not a number"))
            })
        })
        .collect::<Result<Vec<u64>, _>>()?;

    if counters.len() < 4 {
        return Err(ProcfsError::malformed(
            path,
            format!("expected at least 4 cpu counters, got {}", counters.len()),
        ));
    }

    let overflow = || ProcfsError::malformed(path, "cpu counters overflow u64");
    let idle = counters[3]
        .checked_add(counters.get(4).copied().unwrap_or(0))
        .ok_or_else(overflow)?;
    let total = counters
        .iter()
        .try_fold(0u64, |sum, &n| sum.checked_add(n))
        .ok_or_else(overflow)?;
    Ok(CpuSample { idle, total })
}
