use ratatui::style::{Color, Modifier, Style};

fn rgb(hex: u32) -> Color {
    Color::Rgb(((hex >> 16) & 0xff) as u8, ((hex >> 8) & 0xff) as u8, (hex & 0xff) as u8)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeVariant {
    Default,
    Nord,
    Mono,
}

impl ThemeVariant {
    pub fn next(self) -> Self {
        match self {
            Self::Default => Self::Nord,
            Self::Nord    => Self::Mono,
            Self::Mono    => Self::Default,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "nord" => Self::Nord,
            "mono" => Self::Mono,
            _      => Self::Default,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Nord    => "nord",
            Self::Mono    => "mono",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub border:      Style,
    pub title:       Style,
    pub header:      Style,
    pub text:        Style,
    pub text_dim:    Style,
    pub selected:    Style,
    /// Cells whose value is not available yet
    pub unavailable: Style,
    pub bar_low:     Style,
    pub bar_mid:     Style,
    pub bar_high:    Style,
    pub bar_crit:    Style,
    pub footer_bg:   Style,
    pub footer_key:  Style,
    pub footer_text: Style,
}

impl Theme {
    pub fn for_variant(v: ThemeVariant) -> Self {
        match v {
            ThemeVariant::Default => Self::standard(),
            ThemeVariant::Nord    => Self::nord(),
            ThemeVariant::Mono    => Self::mono(),
        }
    }

    fn standard() -> Self {
        Self {
            border:      Style::default().fg(Color::Cyan),
            title:       Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            header:      Style::default().fg(Color::Black).bg(Color::Blue).add_modifier(Modifier::BOLD),
            text:        Style::default().fg(Color::White),
            text_dim:    Style::default().fg(Color::DarkGray),
            selected:    Style::default().fg(Color::Black).bg(Color::Cyan),
            unavailable: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            bar_low:     Style::default().fg(Color::Green),
            bar_mid:     Style::default().fg(Color::Yellow),
            bar_high:    Style::default().fg(Color::LightRed),
            bar_crit:    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            footer_bg:   Style::default().bg(Color::DarkGray).fg(Color::White),
            footer_key:  Style::default().bg(Color::DarkGray).fg(Color::Cyan).add_modifier(Modifier::BOLD),
            footer_text: Style::default().bg(Color::DarkGray).fg(Color::Gray),
        }
    }

    fn nord() -> Self {
        // Polar Night #2e3440 #3b4252 #4c566a, Snow Storm #d8dee9 #eceff4,
        // Frost #88c0d0, Aurora #bf616a #d08770 #ebcb8b #a3be8c
        Self {
            border:      Style::default().fg(rgb(0x88c0d0)),
            title:       Style::default().fg(rgb(0xeceff4)).add_modifier(Modifier::BOLD),
            header:      Style::default().fg(rgb(0xeceff4)).bg(rgb(0x3b4252)).add_modifier(Modifier::BOLD),
            text:        Style::default().fg(rgb(0xd8dee9)),
            text_dim:    Style::default().fg(rgb(0x4c566a)),
            selected:    Style::default().fg(rgb(0x2e3440)).bg(rgb(0x88c0d0)),
            unavailable: Style::default().fg(rgb(0x4c566a)).add_modifier(Modifier::ITALIC),
            bar_low:     Style::default().fg(rgb(0xa3be8c)),
            bar_mid:     Style::default().fg(rgb(0xebcb8b)),
            bar_high:    Style::default().fg(rgb(0xd08770)),
            bar_crit:    Style::default().fg(rgb(0xbf616a)).add_modifier(Modifier::BOLD),
            footer_bg:   Style::default().bg(rgb(0x3b4252)).fg(rgb(0xd8dee9)),
            footer_key:  Style::default().bg(rgb(0x3b4252)).fg(rgb(0x88c0d0)).add_modifier(Modifier::BOLD),
            footer_text: Style::default().bg(rgb(0x3b4252)).fg(rgb(0x4c566a)),
        }
    }

    /// No colors at all, for terminals that render them badly.
    fn mono() -> Self {
        let plain = Style::default();
        let bold  = Style::default().add_modifier(Modifier::BOLD);
        Self {
            border:      plain,
            title:       bold,
            header:      Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            text:        plain,
            text_dim:    plain,
            selected:    Style::default().add_modifier(Modifier::REVERSED),
            unavailable: Style::default().add_modifier(Modifier::DIM),
            bar_low:     plain,
            bar_mid:     plain,
            bar_high:    bold,
            bar_crit:    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            footer_bg:   Style::default().add_modifier(Modifier::REVERSED),
            footer_key:  Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            footer_text: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Pick a usage-gradient style for a 0–100 value.
    pub fn util_style(&self, pct: f64) -> Style {
        if      pct >= 95.0 { self.bar_crit }
        else if pct >= 75.0 { self.bar_high }
        else if pct >= 50.0 { self.bar_mid  }
        else                 { self.bar_low  }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names_round_trip_and_cycle() {
        for v in [ThemeVariant::Default, ThemeVariant::Nord, ThemeVariant::Mono] {
            assert_eq!(ThemeVariant::from_name(v.name()), v);
        }
        assert_eq!(ThemeVariant::from_name("NORD"), ThemeVariant::Nord);
        assert_eq!(ThemeVariant::from_name("solarized"), ThemeVariant::Default);
        assert_eq!(ThemeVariant::Mono.next(), ThemeVariant::Default);
    }

    #[test]
    fn usage_gradient() {
        let t = Theme::for_variant(ThemeVariant::Default);
        assert_eq!(t.util_style(10.0), t.bar_low);
        assert_eq!(t.util_style(60.0), t.bar_mid);
        assert_eq!(t.util_style(80.0), t.bar_high);
        assert_eq!(t.util_style(99.0), t.bar_crit);
    }
}
