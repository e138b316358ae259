#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    ToggleHelp,
    CycleTheme,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    None,
}
