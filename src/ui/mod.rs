pub mod header;
pub mod help;
pub mod statusbar;
pub mod tasks;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(frame, chunks[0], &app.overview, &app.theme);
    header::render_usage(
        frame,
        chunks[1],
        &app.overview,
        app.snapshot.cpu_fraction(),
        app.snapshot.memory_fraction(),
        &app.theme,
    );

    app.set_visible_rows(tasks::row_capacity(chunks[2]));
    tasks::render(
        frame,
        chunks[2],
        &app.overview,
        app.visible_task_rows(),
        app.scroll,
        app.rows.len(),
        &app.theme,
    );

    let skipped = app.snapshot.tasks.as_ref().map_or(0, |t| t.skipped);
    statusbar::render(
        frame,
        chunks[3],
        app.input_mode,
        &app.keybinds,
        skipped,
        &app.theme,
    );

    // Help overlay last so it sits on top
    if app.show_help() {
        help::render(frame, area, &app.help_entries(), &app.theme);
    }
}

#[cfg(test)]
mod tests;
