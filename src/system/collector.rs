use super::cpu::CpuSample;
use super::reader::ProcRoot;
use super::snapshot::SystemSnapshot;

/// Driver-side state carried between ticks: the sampling root and the last
/// CPU counters seen.
pub struct Collector {
    root: ProcRoot,
    previous_cpu: Option<CpuSample>,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(ProcRoot::default())
    }
}

impl Collector {
    pub fn new(root: ProcRoot) -> Self {
        Collector {
            root,
            previous_cpu: None,
        }
    }

    pub fn root(&self) -> &ProcRoot {
        &self.root
    }

    pub fn refresh(&mut self) -> SystemSnapshot {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        let snapshot = SystemSnapshot::capture(&self.root, self.previous_cpu);
        // A failed read keeps the older sample, so the next delta simply
        // spans two ticks.
        if let Some(sample) = snapshot.cpu_sample() {
            self.previous_cpu = Some(sample);
        }
        snapshot
    }
}
