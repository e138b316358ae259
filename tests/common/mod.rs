#![allow(dead_code)]

use std::fs;
use std::path::Path;

use inspector::system::reader::ProcRoot;
use tempfile::TempDir;

/// A throwaway procfs tree. Files are written relative to the root.
pub struct FakeProc {
    dir: TempDir,
}

impl FakeProc {
    pub fn new() -> Self {
        FakeProc {
            dir: tempfile::tempdir().expect("create temp procfs root"),
        }
    }

    /// A tree with every scalar file populated and a handful of tasks.
    pub fn populated() -> Self {
        let proc = FakeProc::new();
        proc.file("sys/kernel/hostname", "buildhost\n")
            .file("sys/kernel/osrelease", "6.1.0-13-amd64\n")
            .file(
                "cpuinfo",
                "processor\t: 0\nmodel name\t: Fake CPU\n\nprocessor\t: 1\nmodel name\t: Fake CPU\n",
            )
            .file("uptime", "93784.25 12000.00\n")
            .file("loadavg", "1.25 0.75 0.50 2/300 12345\n")
            .file(
                "meminfo",
                "MemTotal:        8000000 kB\nMemFree:         1000000 kB\nMemAvailable:    6000000 kB\nBuffers:          100000 kB\nCached:          2000000 kB\n",
            )
            .file("stat", "cpu  100 0 100 800 0 0 0 0 0 0\ncpu0 50 0 50 400 0 0 0 0 0 0\n")
            .task(1, "systemd", 'S', 0)
            .task(2, "kthreadd", 'S', 0)
            .task(42, "cargo", 'R', 1000)
            .task(77, "dd", 'D', 1000)
            .task(88, "vim", 'T', 1000)
            .task(99, "defunct", 'Z', 1000);
        fs::create_dir_all(proc.path().join("self")).expect("create self");
        fs::create_dir_all(proc.path().join("net")).expect("create net");
        proc
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn root(&self) -> ProcRoot {
        ProcRoot::new(self.dir.path())
    }

    pub fn file(&self, rel: &str, contents: &str) -> &Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(path, contents).expect("write fixture file");
        self
    }

    pub fn task(&self, pid: u32, name: &str, state: char, uid: u32) -> &Self {
        self.file(&format!("{pid}/status"), &status(name, state, uid))
    }
}

pub fn status(name: &str, state: char, uid: u32) -> String {
    format!(
        "Name:\t{name}\nUmask:\t0022\nState:\t{state} (whatever)\nTgid:\t1\nPid:\t1\nPPid:\t0\nUid:\t{uid}\t{uid}\t{uid}\t{uid}\nGid:\t0\t0\t0\t0\n"
    )
}
