mod common;

use std::collections::HashMap;

use common::FakeProc;
use inspector::system::collector::Collector;
use inspector::system::cpu::cpu_usage;
use inspector::system::error::ProcfsError;
use inspector::system::reader::ProcRoot;
use inspector::system::scalars::{self, HOSTNAME_MAX};
use inspector::system::snapshot::SystemSnapshot;
use inspector::system::tasks::{TaskState, task_table};
use inspector::system::users::UserNames;
use inspector::view::{Overview, task_rows};

#[test]
fn populated_tree_fills_every_field() {
    let proc = FakeProc::populated();
    let snapshot = SystemSnapshot::capture(&proc.root(), None);

    assert_eq!(snapshot.hostname.as_ref().unwrap().as_str(), "buildhost");
    assert_eq!(snapshot.kernel_version.as_ref().unwrap().as_str(), "6.1.0");
    assert_eq!(snapshot.cpu_units, Some(2));
    assert_eq!(snapshot.uptime, Some(93784.25));

    let load = snapshot.load_average.unwrap();
    assert_eq!((load.one, load.five, load.fifteen), (1.25, 0.75, 0.50));

    // no previous sample yet
    assert!(snapshot.cpu.is_some());
    assert_eq!(snapshot.cpu_fraction(), None);

    let tasks = snapshot.tasks.as_ref().unwrap();
    assert_eq!(tasks.total(), 6);
    assert_eq!(tasks.counts.sleeping, 2);
    assert_eq!(tasks.active.len(), 4);
    assert_eq!(tasks.skipped, 0);
}

#[test]
fn overview_of_populated_tree() {
    let proc = FakeProc::populated();
    let snapshot = SystemSnapshot::capture(&proc.root(), None);
    let overview = Overview::from_snapshot(&snapshot);

    assert_eq!(overview.uptime, "1 day, 02:03:04");
    // one stat reading so far: no usage yet, and no fake 0%
    assert_eq!(overview.cpu_bar, "[--------------------] (UNKNOWN)");
    assert_eq!(overview.load, ["1.25", "0.75", "0.50"]);
    assert_eq!(overview.memory_bar, "[#####---------------] 25.0%");
    assert_eq!(overview.memory_used, "1.9 GiB");
    assert_eq!(overview.memory_total, "7.6 GiB");
    assert_eq!(overview.task_total, "6");
    assert_eq!(
        overview.task_counts,
        "1 running, 1 waiting, 2 sleeping, 1 stopped, 1 zombie"
    );
}

#[test]
fn missing_root_gives_empty_snapshot() {
    let proc = FakeProc::new();
    let root = ProcRoot::new(proc.path().join("does-not-exist"));
    let snapshot = SystemSnapshot::capture(&root, None);
    assert_eq!(snapshot, SystemSnapshot::default());

    assert!(matches!(
        scalars::hostname(&root),
        Err(ProcfsError::RootUnavailable { .. })
    ));

    let overview = Overview::from_snapshot(&snapshot);
    assert_eq!(overview.hostname, "(UNKNOWN)");
    assert_eq!(overview.cpu_bar, "[--------------------] (UNKNOWN)");
    assert_eq!(overview.memory_bar, "[--------------------] (UNKNOWN)");
}

#[test]
fn missing_resource_only_blanks_that_field() {
    let proc = FakeProc::new();
    proc.file("sys/kernel/hostname", "lonely\n");
    let snapshot = SystemSnapshot::capture(&proc.root(), None);

    assert_eq!(snapshot.hostname.as_ref().unwrap().as_str(), "lonely");
    assert_eq!(snapshot.uptime, None);
    assert_eq!(snapshot.memory, None);
    // an empty root still lists fine
    assert_eq!(snapshot.tasks.as_ref().map(|t| t.total()), Some(0));
}

#[test]
fn kernel_version_drops_build_suffix() {
    let proc = FakeProc::new();
    proc.file("sys/kernel/osrelease", "6.1.0-13-amd64\n");
    let version = scalars::kernel_version(&proc.root()).unwrap();
    assert_eq!(version.as_str(), "6.1.0");
    assert!(!version.truncated);
}

#[test]
fn long_hostname_is_truncated() {
    let proc = FakeProc::new();
    let long = "h".repeat(HOSTNAME_MAX + 20);
    proc.file("sys/kernel/hostname", &format!("{long}\n"));

    let name = scalars::hostname(&proc.root()).unwrap();
    assert_eq!(name.as_str().len(), HOSTNAME_MAX);
    assert!(name.truncated);
}

#[test]
fn mem_usage_is_reported_in_bytes() {
    let proc = FakeProc::new();
    proc.file(
        "meminfo",
        "MemTotal:        2048 kB\nMemFree:          512 kB\nMemAvailable:     1024 kB\n",
    );
    let mem = scalars::mem_usage(&proc.root()).unwrap();
    assert_eq!(mem.total, 2048 * 1024);
    assert_eq!(mem.used, (2048 - 1024) * 1024);
    assert_eq!(mem.fraction(), Some(0.5));
}

#[test]
fn non_numeric_entries_never_become_tasks() {
    let proc = FakeProc::populated();
    proc.file("self/status", &common::status("impostor", 'R', 0))
        .file("sys/status", &common::status("impostor", 'R', 0))
        .file("0/status", &common::status("impostor", 'R', 0))
        .file("007x/status", &common::status("impostor", 'R', 0));

    let table = task_table(&proc.root()).unwrap();
    assert_eq!(table.total(), 6);
    assert!(table.active.iter().all(|t| t.name.as_str() != "impostor"));
}

#[test]
fn pid_without_status_is_skipped() {
    let proc = FakeProc::populated();
    std::fs::create_dir_all(proc.path().join("4242")).unwrap();
    proc.file("4343/status", "Name:\tbroken\n");

    let table = task_table(&proc.root()).unwrap();
    assert_eq!(table.total(), 6);
    assert_eq!(table.skipped, 2);
}

#[test]
fn task_with_non_utf8_name_is_kept() {
    let proc = FakeProc::new();
    std::fs::create_dir_all(proc.path().join("42")).unwrap();
    std::fs::write(
        proc.path().join("42/status"),
        b"Name:\tbad\xff\xfename\nState:\tR (running)\nUid:\t0\t0\t0\t0\n",
    )
    .unwrap();

    let table = task_table(&proc.root()).unwrap();
    assert_eq!(table.total(), 1);
    assert_eq!(table.counts.running, 1);
    assert_eq!(table.skipped, 0);
    assert_eq!(table.active[0].name.as_str(), "bad\u{fffd}\u{fffd}name");
}

#[test]
fn unknown_states_are_listed_as_active() {
    let proc = FakeProc::new();
    proc.task(10, "odd", 'X', 0).task(11, "sleepy", 'I', 0);

    let table = task_table(&proc.root()).unwrap();
    assert_eq!(table.counts.unknown, 1);
    assert_eq!(table.counts.sleeping, 1);
    assert_eq!(table.active.len(), 1);
    assert_eq!(table.active[0].state, TaskState::Unknown('X'));
}

#[test]
fn collector_carries_cpu_between_ticks() {
    let proc = FakeProc::populated();
    let mut collector = Collector::new(proc.root());

    assert_eq!(collector.refresh().cpu_fraction(), None);

    // +100 busy, +100 idle
    proc.file("stat", "cpu  150 0 150 900 0 0 0 0 0 0\n");
    assert_eq!(collector.refresh().cpu_fraction(), Some(0.5));

    // counters did not move
    assert_eq!(collector.refresh().cpu_fraction(), None);
}

#[test]
fn cpu_usage_with_explicit_previous() {
    let proc = FakeProc::populated();
    let first = cpu_usage(&proc.root(), None).unwrap();
    assert_eq!(first.usage(), None);

    proc.file("stat", "cpu  400 0 100 800 0 0 0 0 0 0\n");
    let second = cpu_usage(&proc.root(), Some(first.current)).unwrap();
    assert_eq!(second.usage(), Some(1.0));
}

#[test]
fn task_rows_resolve_users_through_cache() {
    let proc = FakeProc::populated();
    let snapshot = SystemSnapshot::capture(&proc.root(), None);
    let mut users = UserNames::new(HashMap::from([(1000u32, "dev".to_string())]));

    let mut rows = task_rows(&snapshot, &mut users);
    rows.sort_by_key(|row| row.pid);

    let summary: Vec<(u32, &str, &str, &str)> = rows
        .iter()
        .map(|r| (r.pid, r.name.as_str(), r.state.as_str(), r.user.as_str()))
        .collect();
    assert_eq!(
        summary,
        [
            (42, "cargo", "running", "dev"),
            (77, "dd", "waiting", "dev"),
            (88, "vim", "stopped", "dev"),
            (99, "defunct", "zombie", "dev"),
        ]
    );
}
