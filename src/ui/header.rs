use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::ui::theme::Theme;
use crate::view::Overview;

/// Host identity and uptime.
pub fn render(frame: &mut Frame, area: Rect, overview: &Overview, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " inspector ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(theme.text_secondary);
    let lines = vec![
        Line::from(vec![
            Span::styled("Hostname: ", label),
            Span::styled(
                overview.hostname.as_str(),
                Style::default()
                    .fg(theme.value_blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | Kernel Version: ", label),
            Span::styled(
                overview.kernel_version.as_str(),
                Style::default().fg(theme.value_red),
            ),
            Span::styled(" | CPUs: ", label),
            Span::styled(
                overview.cpu_units.as_str(),
                Style::default().fg(theme.value_blue),
            ),
        ]),
        Line::from(vec![
            Span::styled("Uptime: ", label),
            Span::styled(
                overview.uptime.as_str(),
                Style::default().fg(theme.text_primary),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Load average and the CPU and memory bars.
pub fn render_usage(
    frame: &mut Frame,
    area: Rect,
    overview: &Overview,
    cpu_fraction: Option<f64>,
    memory_fraction: Option<f64>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Usage ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(theme.text_secondary);
    let [one, five, fifteen] = &overview.load;
    let lines = vec![
        Line::from(vec![
            Span::styled("Load Average (1/5/15 min): ", label),
            Span::styled(format!("{one} "), Style::default().fg(theme.value_blue)),
            Span::styled(format!("{five} "), Style::default().fg(theme.value_green)),
            Span::styled(fifteen.as_str(), Style::default().fg(theme.value_red)),
        ]),
        Line::from(vec![
            Span::styled("CPU Usage:    ", label),
            Span::styled(
                overview.cpu_bar.as_str(),
                Style::default().fg(theme.bar_color(cpu_fraction)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Memory Usage: ", label),
            Span::styled(
                overview.memory_bar.as_str(),
                Style::default().fg(theme.bar_color(memory_fraction)),
            ),
            Span::styled(
                format!(" ({} / {})", overview.memory_used, overview.memory_total),
                Style::default().fg(theme.text_primary),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
