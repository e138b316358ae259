use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};

use crate::format::truncate_unicode;
use crate::system::tasks::TASK_NAME_MAX;
use crate::ui::theme::Theme;
use crate::view::{Overview, TaskRow};

pub const PID_WIDTH: u16 = 9;
pub const NAME_WIDTH: u16 = TASK_NAME_MAX as u16;
pub const STATE_WIDTH: u16 = 12;
pub const USER_WIDTH: u16 = 15;

/// Rows of `area` left for task entries once borders, the summary line and
/// the column header are drawn.
pub fn row_capacity(area: Rect) -> usize {
    area.height.saturating_sub(4) as usize
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    overview: &Overview,
    rows: &[TaskRow],
    scroll: usize,
    active_total: usize,
    theme: &Theme,
) {
    let title = if active_total > rows.len() {
        format!(
            " Tasks: {} total | {}-{} of {} active ",
            overview.task_total,
            scroll + 1,
            scroll + rows.len(),
            active_total
        )
    } else {
        format!(" Tasks: {} total ", overview.task_total)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [summary_area, table_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            overview.task_counts.as_str(),
            Style::default().fg(theme.text_primary),
        ))),
        summary_area,
    );

    let header = Row::new(["PID", "Task Name", "State", "User"]).style(
        Style::default()
            .fg(theme.table_header_fg)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(format!("{:>width$}", row.pid, width = PID_WIDTH as usize)),
            Cell::from(truncate_unicode(&row.name, NAME_WIDTH as usize)),
            Cell::from(Span::styled(
                row.state.clone(),
                Style::default().fg(theme.state_color(&row.state)),
            )),
            Cell::from(truncate_unicode(&row.user, USER_WIDTH as usize)),
        ])
        .style(Style::default().fg(theme.text_primary))
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(PID_WIDTH),
            Constraint::Length(NAME_WIDTH),
            Constraint::Length(STATE_WIDTH),
            Constraint::Min(USER_WIDTH),
        ],
    )
    .header(header)
    .column_spacing(3);

    frame.render_widget(table, table_area);
}
