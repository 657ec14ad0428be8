use pinmap_core::Theme;
use ratatui::style::Color;

/// Terminal colors for each configured theme.
pub trait ThemeColors {
    /// Gets the focused border color
    fn focused_border(self) -> Color;
    /// Gets the unfocused border color
    fn unfocused_border(self) -> Color;
    /// Gets the text color
    fn text(self) -> Color;
    /// Gets the highlight color
    fn highlight(self) -> Color;
    /// Color of the coastline basemap
    fn land(self) -> Color;
    /// Color of pin markers
    fn marker(self) -> Color;
    /// Color of error text and error alerts
    fn error(self) -> Color;
}

impl ThemeColors for Theme {
    fn focused_border(self) -> Color {
        match self {
            Self::Nord => Color::Rgb(136, 192, 208),
            Self::Dracula => Color::Rgb(189, 147, 249),
            Self::Gruvbox => Color::Rgb(251, 184, 108),
            Self::TokyoNight => Color::Rgb(122, 162, 247),
            Self::Catppuccin => Color::Rgb(137, 180, 250),
            Self::Monochrome => Color::Rgb(100, 200, 255),
        }
    }

    fn unfocused_border(self) -> Color {
        match self {
            Self::Nord => Color::Rgb(216, 222, 233),
            Self::Dracula => Color::Rgb(98, 114, 164),
            Self::Gruvbox => Color::Rgb(168, 153, 132),
            Self::TokyoNight => Color::Rgb(86, 95, 137),
            Self::Catppuccin => Color::Rgb(108, 112, 134),
            Self::Monochrome => Color::Rgb(128, 128, 128),
        }
    }

    fn text(self) -> Color {
        match self {
            Self::Nord => Color::Rgb(236, 239, 244),
            Self::Dracula => Color::Rgb(248, 248, 242),
            Self::Gruvbox => Color::Rgb(235, 219, 178),
            Self::TokyoNight => Color::Rgb(192, 202, 245),
            Self::Catppuccin => Color::Rgb(205, 214, 244),
            Self::Monochrome => Color::Rgb(255, 255, 255),
        }
    }

    fn highlight(self) -> Color {
        self.focused_border()
    }

    fn land(self) -> Color {
        match self {
            Self::Nord => Color::Rgb(163, 190, 140),
            Self::Dracula => Color::Rgb(80, 250, 123),
            Self::Gruvbox => Color::Rgb(152, 151, 26),
            Self::TokyoNight => Color::Rgb(115, 218, 202),
            Self::Catppuccin => Color::Rgb(166, 227, 161),
            Self::Monochrome => Color::Rgb(160, 160, 160),
        }
    }

    fn marker(self) -> Color {
        match self {
            Self::Nord => Color::Rgb(235, 203, 139),
            Self::Dracula => Color::Rgb(255, 121, 198),
            Self::Gruvbox => Color::Rgb(250, 189, 47),
            Self::TokyoNight => Color::Rgb(255, 158, 100),
            Self::Catppuccin => Color::Rgb(250, 179, 135),
            Self::Monochrome => Color::Rgb(255, 255, 255),
        }
    }

    fn error(self) -> Color {
        match self {
            Self::Nord => Color::Rgb(191, 97, 106),
            Self::Dracula => Color::Rgb(255, 85, 85),
            Self::Gruvbox => Color::Rgb(251, 73, 52),
            Self::TokyoNight => Color::Rgb(247, 118, 142),
            Self::Catppuccin => Color::Rgb(243, 139, 168),
            Self::Monochrome => Color::Rgb(200, 200, 200),
        }
    }
}
