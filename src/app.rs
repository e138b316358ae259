use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::system::collector::Collector;
use crate::system::reader::ProcRoot;
use crate::system::snapshot::SystemSnapshot;
use crate::system::users::UserNames;
use crate::ui::theme::Theme;
use crate::view::{Overview, TaskRow, task_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub refresh: KeyCode,
    pub help: KeyCode,
    pub cycle_theme: KeyCode,
    pub scroll_up: KeyCode,
    pub scroll_down: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            scroll_up: parse_key(&kb.scroll_up).unwrap_or(KeyCode::Up),
            scroll_down: parse_key(&kb.scroll_down).unwrap_or(KeyCode::Down),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.refresh), "Refresh now"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.scroll_up), "Scroll tasks up"),
            (key_label(self.scroll_down), "Scroll tasks down"),
            ("PgUp/PgDn".to_string(), "Scroll a page"),
            ("Home".to_string(), "Back to top"),
            (key_label(self.help), "Toggle help"),
            ("Ctrl+C".to_string(), "Quit (always)"),
        ]
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Up => "\u{2191}".to_string(),
        KeyCode::Down => "\u{2193}".to_string(),
        KeyCode::Left => "\u{2190}".to_string(),
        KeyCode::Right => "\u{2192}".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    collector: Collector,
    users: UserNames,
    pub snapshot: SystemSnapshot,
    pub overview: Overview,
    pub rows: Vec<TaskRow>,
    /// Index of the first task row on screen.
    pub scroll: usize,
    /// Task rows that fit on screen, updated on every draw.
    pub visible_rows: usize,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    pub fn new(config: Config) -> Self {
        let collector = Collector::new(ProcRoot::new(&config.general.procfs_root));
        let mut app = App {
            running: true,
            input_mode: InputMode::Normal,
            collector,
            users: UserNames::default(),
            snapshot: SystemSnapshot::default(),
            overview: Overview::from_snapshot(&SystemSnapshot::default()),
            rows: Vec::new(),
            scroll: 0,
            visible_rows: 0,
            theme: Theme::from_config(&config.colors.theme),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
        };
        app.refresh_data();
        app
    }

    /// One tick: sample, format, keep the scroll position in range.
    pub fn refresh_data(&mut self) {
        self.snapshot = self.collector.refresh();
        self.overview = Overview::from_snapshot(&self.snapshot);
        self.rows = task_rows(&self.snapshot, &mut self.users);
        self.clamp_scroll();
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        if code == kb.quit || code == KeyCode::Esc {
            return Action::Quit;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.scroll_up {
            return Action::ScrollUp;
        }
        if code == kb.scroll_down {
            return Action::ScrollDown;
        }

        match code {
            KeyCode::PageUp => Action::PageUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::Home => Action::ScrollTop,
            _ => Action::None,
        }
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Refresh => self.refresh_data(),
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::CycleTheme => self.theme = self.theme.next(),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => {
                self.scroll += 1;
                self.clamp_scroll();
            }
            Action::PageUp => self.scroll = self.scroll.saturating_sub(self.page_size()),
            Action::PageDown => {
                self.scroll += self.page_size();
                self.clamp_scroll();
            }
            Action::ScrollTop => self.scroll = 0,
            Action::None => {}
        }
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows;
        self.clamp_scroll();
    }

    pub fn visible_task_rows(&self) -> &[TaskRow] {
        let start = self.scroll.min(self.rows.len());
        let end = if self.visible_rows == 0 {
            self.rows.len()
        } else {
            (start + self.visible_rows).min(self.rows.len())
        };
        &self.rows[start..end]
    }

    fn page_size(&self) -> usize {
        self.visible_rows.max(1)
    }

    fn clamp_scroll(&mut self) {
        let max = self.rows.len().saturating_sub(self.visible_rows.max(1));
        self.scroll = self.scroll.min(max);
    }
}
