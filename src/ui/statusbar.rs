use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{InputMode, ResolvedKeybinds, key_label};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    keybinds: &ResolvedKeybinds,
    skipped: usize,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let quit = key_label(keybinds.quit);
    let refresh = key_label(keybinds.refresh);
    let help = key_label(keybinds.help);
    let cycle = key_label(keybinds.cycle_theme);
    let scroll = format!(
        "{}{}",
        key_label(keybinds.scroll_up),
        key_label(keybinds.scroll_down)
    );

    let mut spans = Vec::new();
    match input_mode {
        InputMode::Help => {
            spans.extend(pill_spans("Esc", "Close", theme));
            spans.extend(pill_spans(&help, "Close", theme));
        }
        InputMode::Normal => {
            spans.extend(pill_spans(&quit, "Quit", theme));
            spans.extend(pill_spans(&refresh, "Refresh", theme));
            spans.extend(pill_spans(&scroll, "Scroll", theme));
            spans.extend(pill_spans(&cycle, "Theme", theme));
            spans.extend(pill_spans(&help, "Help", theme));
        }
    }

    if skipped > 0 {
        spans.push(Span::styled(
            format!("  {skipped} skipped"),
            Style::default()
                .fg(theme.state_waiting)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans(key: &str, desc: &str, theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
