use std::fs;
use std::path::Path;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;
use crate::ui::{header, tasks};
use crate::view::{Overview, TaskRow};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn fixture_app(running_tasks: usize) -> (tempfile::TempDir, App) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "sys/kernel/hostname", "testbox\n");
    write(root, "sys/kernel/osrelease", "6.1.0-13-amd64\n");
    write(root, "uptime", "3725.50 100.00\n");
    write(root, "loadavg", "0.52 0.41 0.30 1/123 4567\n");
    write(
        root,
        "meminfo",
        "MemTotal:        1024 kB\nMemFree:          256 kB\nMemAvailable:     512 kB\n",
    );
    write(root, "stat", "cpu 10 0 10 80 0 0 0 0 0 0\n");
    write(
        root,
        "1/status",
        "Name:\tinit\nState:\tS (sleeping)\nUid:\t0\t0\t0\t0\n",
    );
    for i in 0..running_tasks {
        write(
            root,
            &format!("{}/status", 100 + i),
            &format!("Name:\tworker{i}\nState:\tR (running)\nUid:\t0\t0\t0\t0\n"),
        );
    }
    // pid directory with no status file
    fs::create_dir_all(root.join("999")).unwrap();

    let mut config = Config::default();
    config.general.procfs_root = root.to_path_buf();
    (dir, App::new(config))
}

#[test]
fn full_screen_shows_every_section() {
    let (_dir, mut app) = fixture_app(2);
    let screen = render_to_string(100, 24, |frame| super::draw(frame, &mut app));

    assert!(screen.contains("Hostname: testbox"));
    assert!(screen.contains("Kernel Version: 6.1.0"));
    assert!(screen.contains("Uptime: 01:02:05"));
    assert!(screen.contains("0.52 0.41 0.30"));
    assert!(screen.contains("Memory Usage: [##########----------] 50.0%"));
    assert!(screen.contains("512.0 KiB / 1.0 MiB"));
    assert!(screen.contains("Tasks: 3 total"));
    assert!(screen.contains("2 running, 0 waiting, 1 sleeping, 0 stopped, 0 zombie"));
    assert!(screen.contains("Task Name"));
    assert!(screen.contains("worker0"));
    assert!(screen.contains("worker1"));
    assert!(!screen.contains("init"));
}

#[test]
fn statusbar_reports_skipped_tasks() {
    let (_dir, mut app) = fixture_app(1);
    let screen = render_to_string(100, 24, |frame| super::draw(frame, &mut app));
    assert!(screen.contains("1 skipped"));
    assert!(screen.contains("Quit"));
    assert!(screen.contains("Refresh"));
}

#[test]
fn small_terminal_limits_rows_and_shows_range() {
    let (_dir, mut app) = fixture_app(10);
    let screen = render_to_string(100, 16, |frame| super::draw(frame, &mut app));

    // 16 rows: 4 header + 5 usage + 1 status leaves 6 for the task block
    assert_eq!(app.visible_rows, 2);
    assert!(screen.contains("1-2 of 10 active"));

    app.dispatch(Action::PageDown);
    let screen = render_to_string(100, 16, |frame| super::draw(frame, &mut app));
    assert!(screen.contains("3-4 of 10 active"));
}

#[test]
fn help_overlay_lists_keybinds() {
    let (_dir, mut app) = fixture_app(0);
    app.dispatch(Action::ToggleHelp);
    let screen = render_to_string(100, 24, |frame| super::draw(frame, &mut app));
    assert!(screen.contains("Keybinds"));
    assert!(screen.contains("Toggle help"));
    assert!(screen.contains("Cycle theme"));
    assert!(screen.contains("Close"));
}

#[test]
fn empty_snapshot_renders_placeholders() {
    let overview = Overview::from_snapshot(&SystemSnapshot::default());
    let theme = Theme::dark();
    let screen = render_to_string(90, 9, |frame| {
        let area = frame.area();
        let top = ratatui::layout::Rect { height: 4, ..area };
        let bottom = ratatui::layout::Rect {
            y: 4,
            height: 5,
            ..area
        };
        header::render(frame, top, &overview, &theme);
        header::render_usage(frame, bottom, &overview, None, None, &theme);
    });

    assert!(screen.contains("Hostname: (UNKNOWN)"));
    assert!(screen.contains("CPUs: (UNKNOWN)"));
    assert!(screen.contains("(UNKNOWN) (UNKNOWN) (UNKNOWN)"));
    assert!(screen.contains("CPU Usage:    [--------------------] (UNKNOWN)"));
    assert!(screen.contains("Memory Usage: [--------------------] (UNKNOWN) ((UNKNOWN) / (UNKNOWN))"));
}

#[test]
fn long_names_are_clipped_to_column() {
    let overview = Overview::from_snapshot(&SystemSnapshot::default());
    let rows = vec![TaskRow {
        pid: 4242,
        name: "a-really-long-task-name-that-overflows".to_string(),
        state: "running".to_string(),
        user: "someone-with-a-long-login".to_string(),
    }];
    let theme = Theme::mono();
    let screen = render_to_string(90, 6, |frame| {
        tasks::render(frame, frame.area(), &overview, &rows, 0, 1, &theme)
    });

    assert!(screen.contains("4242"));
    assert!(screen.contains("running"));
    assert!(!screen.contains("overflows"));
}
