use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Theme;

/// Key labels are right-aligned to the widest one.
fn key_column(entries: &[(String, &str)]) -> usize {
    entries.iter().map(|(key, _)| key.width()).max().unwrap_or(0)
}

/// Overlay size that fits every entry plus borders, clipped to `area`.
pub fn overlay_size(entries: &[(String, &str)], area: Rect) -> (u16, u16) {
    let desc = entries.iter().map(|(_, d)| d.width()).max().unwrap_or(0);
    // " key " pill, two spaces, description, borders
    let wanted = key_column(entries) + 2 + 2 + desc + 2;
    let width = (wanted as u16).min(area.width.saturating_sub(4));
    let height = (entries.len() as u16 + 2).min(area.height.saturating_sub(2));
    (width, height)
}

/// Keybind overlay, centered over whatever is on screen. The title names
/// the active theme.
pub fn render(frame: &mut Frame, area: Rect, entries: &[(String, &str)], theme: &Theme) {
    let (width, height) = overlay_size(entries, area);
    let overlay = centered_rect(width, height, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" Keybinds ({}) ", theme.name),
            Style::default()
                .fg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(overlay);

    let pill = Style::default()
        .fg(theme.pill_key_fg)
        .bg(theme.pill_key_bg)
        .add_modifier(Modifier::BOLD);
    let column = key_column(entries);
    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            let pad = " ".repeat(column.saturating_sub(key.width()));
            Line::from(vec![
                Span::styled(format!(" {pad}{key} "), pill),
                Span::styled(format!("  {desc}"), Style::default().fg(theme.pill_desc_fg)),
            ])
        })
        .collect();

    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.surface_bg)),
        inner,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vert] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [horiz] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vert);
    horiz
}
