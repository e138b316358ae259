use std::path::Path;

use tracing::debug;

use super::error::ProcfsError;
use super::reader::{BoundedString, ProcRoot};

pub const HOSTNAME_PATH: &str = "sys/kernel/hostname";
pub const OSRELEASE_PATH: &str = "sys/kernel/osrelease";
pub const CPUINFO_PATH: &str = "cpuinfo";
pub const UPTIME_PATH: &str = "uptime";
pub const LOADAVG_PATH: &str = "loadavg";
pub const MEMINFO_PATH: &str = "meminfo";

/// Longest hostname the kernel hands out (HOST_NAME_MAX).
pub const HOSTNAME_MAX: usize = 64;
/// Kernel versions longer than this are cut for display.
pub const KERNEL_VERSION_MAX: usize = 31;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Memory usage in bytes. `used` never exceeds `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub used: u64,
    pub total: u64,
}

impl MemoryStats {
    pub fn new(used: u64, total: u64) -> Self {
        MemoryStats {
            used: used.min(total),
            total,
        }
    }

    /// `None` when the total is unknown (zero).
    pub fn fraction(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.used as f64 / self.total as f64)
        }
    }
}

pub fn hostname(root: &ProcRoot) -> Result<BoundedString, ProcfsError> {
    let name = root.read_line(HOSTNAME_PATH, HOSTNAME_MAX)?;
    debug!(hostname = %name, truncated = name.truncated, "read hostname");
    Ok(name)
}

pub fn kernel_version(root: &ProcRoot) -> Result<BoundedString, ProcfsError> {
    let release = root.read_line_unbounded(OSRELEASE_PATH)?;
    let version = parse_kernel_version(&release);
    debug!(version = %version, truncated = version.truncated, "read kernel version");
    Ok(version)
}

/// Drops the build metadata after the first `-` (`6.1.0-13-amd64` is
/// `6.1.0`) and bounds what is left.
pub fn parse_kernel_version(release: &str) -> BoundedString {
    let version = release.split('-').next().unwrap_or_default().trim();
    BoundedString::bound(version, KERNEL_VERSION_MAX)
}

pub fn cpu_units(root: &ProcRoot) -> Result<usize, ProcfsError> {
    let mut count = 0;
    for line in root.lines(CPUINFO_PATH)? {
        if is_processor_line(&line?) {
            count += 1;
        }
    }
    debug!(count, "counted cpu units");
    Ok(count)
}

/// Matches the whole `processor` key, so `process id` or `pr...` do not count.
pub fn is_processor_line(line: &str) -> bool {
    line.split(|c: char| c == ':' || c.is_whitespace()).next() == Some("processor")
}

pub fn count_processors(cpuinfo: &str) -> usize {
    cpuinfo.lines().filter(|line| is_processor_line(line)).count()
}

pub fn uptime(root: &ProcRoot) -> Result<f64, ProcfsError> {
    let line = root.read_line(UPTIME_PATH, 128)?;
    parse_uptime(root.resolve(UPTIME_PATH), &line.value)
}

pub fn parse_uptime(path: impl AsRef<Path>, line: &str) -> Result<f64, ProcfsError> {
    let field = line
        .split_whitespace()
        .next()
        .ok_or_else(|| ProcfsError::malformed(path.as_ref(), "no uptime field"))?;
    let seconds: f64 = field.parse().map_err(|_| {
        ProcfsError::malformed(path.as_ref(), format!("uptime {field:?} is not a number"))
    })?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ProcfsError::malformed(
            path.as_ref(),
            format!("uptime {field:?} is out of range"),
        ));
    }
    Ok(seconds)
}

pub fn load_avg(root: &ProcRoot) -> Result<LoadAverage, ProcfsError> {
    let line = root.read_line(LOADAVG_PATH, 128)?;
    let load = parse_load_avg(root.resolve(LOADAVG_PATH), &line.value)?;
    debug!(one = load.one, five = load.five, fifteen = load.fifteen, "read load average");
    Ok(load)
}

/// Parses the first three tokens of a `loadavg` line.
pub fn parse_load_avg(path: impl AsRef<Path>, line: &str) -> Result<LoadAverage, ProcfsError> {
    let path = path.as_ref();
    let tokens: Vec<&str> = line.split_whitespace().take(3).collect();
    if tokens.len() < 3 {
        return Err(ProcfsError::malformed(
            path,
            format!("expected 3 load fields, got {}", tokens.len()),
        ));
    }

    let mut values = [0.0; 3];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        let value: f64 = token.parse().map_err(|_| {
            ProcfsError::malformed(path, format!("load field {token:?} is not a number"))
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ProcfsError::malformed(
                path,
                format!("load field {token:?} is out of range"),
            ));
        }
        *slot = value;
    }

    Ok(LoadAverage {
        one: values[0],
        five: values[1],
        fifteen: values[2],
    })
}

pub fn mem_usage(root: &ProcRoot) -> Result<MemoryStats, ProcfsError> {
    let meminfo = root.read_to_string(MEMINFO_PATH)?;
    let stats = parse_meminfo(root.resolve(MEMINFO_PATH), &meminfo)?;
    debug!(used = stats.used, total = stats.total, "read memory usage");
    Ok(stats)
}

/// Used memory is `MemTotal - MemAvailable`. Kernels without
/// `MemAvailable` (before 3.14) fall back to free + buffers + cached.
pub fn parse_meminfo(path: impl AsRef<Path>, meminfo: &str) -> Result<MemoryStats, ProcfsError> {
    let path = path.as_ref();
    let mut total = None;
    let mut available = None;
    let mut free = 0u64;
    let mut buffers = 0u64;
    let mut cached = 0u64;

    for line in meminfo.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let slot = match key {
            "MemTotal" | "MemAvailable" | "MemFree" | "Buffers" | "Cached" => key,
            _ => continue,
        };
        let kib: u64 = rest
            .split_whitespace()
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| ProcfsError::malformed(path, format!("bad {slot} line: {line:?}")))?;
        match slot {
            "MemTotal" => total = Some(kib),
            "MemAvailable" => available = Some(kib),
            "MemFree" => free = kib,
            "Buffers" => buffers = kib,
            _ => cached = kib,
        }
    }

    let total = total.ok_or_else(|| ProcfsError::malformed(path, "no MemTotal line"))?;
    let overflow = || ProcfsError::malformed(path, "memory sizes overflow u64");
    let available = match available {
        Some(kib) => kib,
        None => free
            .checked_add(buffers)
            .and_then(|sum| sum.checked_add(cached))
            .ok_or_else(overflow)?,
    };

    let to_bytes = |kib: u64| kib.checked_mul(1024).ok_or_else(overflow);
    Ok(MemoryStats::new(
        to_bytes(total.saturating_sub(available))?,
        to_bytes(total)?,
    ))
}
