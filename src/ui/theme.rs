use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub overlay_border: Color,
    /// hostname, CPU count, 1-minute load
    pub value_blue: Color,
    /// 5-minute load
    pub value_green: Color,
    /// kernel version, 15-minute load
    pub value_red: Color,
    pub bar_low: Color,
    pub bar_mid: Color,
    pub bar_high: Color,
    pub table_header_fg: Color,
    pub state_running: Color,
    pub state_waiting: Color,
    pub state_stopped: Color,
    pub state_zombie: Color,
    pub statusbar_bg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        }
    }

    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::mono(),
            _ => Self::dark(),
        }
    }

    /// Bar colour for a usage fraction: calm below 60%, warning below 85%.
    pub fn bar_color(&self, fraction: Option<f64>) -> Color {
        match fraction {
            Some(f) if f >= 0.85 => self.bar_high,
            Some(f) if f >= 0.60 => self.bar_mid,
            _ => self.bar_low,
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::Black,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            overlay_border: Color::DarkGray,
            value_blue: Color::LightBlue,
            value_green: Color::LightGreen,
            value_red: Color::LightRed,
            bar_low: Color::Rgb(16, 185, 129),
            bar_mid: Color::Rgb(249, 115, 22),
            bar_high: Color::Rgb(239, 68, 68),
            table_header_fg: Color::Yellow,
            state_running: Color::LightGreen,
            state_waiting: Color::Yellow,
            state_stopped: Color::LightMagenta,
            state_zombie: Color::LightRed,
            statusbar_bg: Color::DarkGray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            overlay_border: Color::Rgb(150, 150, 150),
            value_blue: Color::Blue,
            value_green: Color::Rgb(0, 120, 0),
            value_red: Color::Red,
            bar_low: Color::Rgb(60, 160, 60),
            bar_mid: Color::Rgb(200, 130, 0),
            bar_high: Color::Rgb(200, 60, 60),
            table_header_fg: Color::Blue,
            state_running: Color::Rgb(0, 120, 0),
            state_waiting: Color::Rgb(160, 110, 0),
            state_stopped: Color::Magenta,
            state_zombie: Color::Red,
            statusbar_bg: Color::Rgb(220, 220, 220),
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::White,
            header_accent_fg: Color::Black,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            overlay_border: Color::Gray,
            value_blue: Color::White,
            value_green: Color::White,
            value_red: Color::White,
            bar_low: Color::Gray,
            bar_mid: Color::White,
            bar_high: Color::White,
            table_header_fg: Color::White,
            state_running: Color::White,
            state_waiting: Color::White,
            state_stopped: Color::Gray,
            state_zombie: Color::Gray,
            statusbar_bg: Color::Black,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
        }
    }

    pub fn state_color(&self, state: &str) -> Color {
        match state {
            "running" => self.state_running,
            "waiting" => self.state_waiting,
            "stopped" => self.state_stopped,
            "zombie" => self.state_zombie,
            _ => self.text_secondary,
        }
    }
}
