use ratatui::style::Color;

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub primary: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_debug: ColorSpec,
    pub footer_edit: ColorSpec,
    pub footer_normal: ColorSpec,
}

/// Color specification as RGB components.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    /// Get the default theme (Rose Pine Dawn).
    ///
    fn default() -> Self {
        Self::rose_pine_dawn()
    }
}

impl Theme {
    /// Return the theme with the given name, if one exists.
    ///
    pub fn by_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|theme| theme.name == name)
    }

    /// Return every available theme.
    ///
    pub fn all() -> Vec<Self> {
        vec![Self::rose_pine_dawn(), Self::rose_pine(), Self::dracula()]
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn",
            primary: ColorSpec::rgb(161, 119, 255),  // Purple
            banner: ColorSpec::rgb(255, 109, 146),   // Pink
            text: ColorSpec::rgb(88, 82, 96),        // Text
            text_muted: ColorSpec::rgb(152, 147, 165), // Muted
            success: ColorSpec::rgb(59, 247, 209),   // Pine
            warning: ColorSpec::rgb(255, 210, 0),    // Gold
            error: ColorSpec::rgb(235, 111, 146),    // Love
            border_active: ColorSpec::rgb(161, 119, 255),
            border_normal: ColorSpec::rgb(88, 82, 96),
            highlight_bg: ColorSpec::rgb(61, 174, 233), // Foam
            highlight_fg: ColorSpec::rgb(0, 0, 0),
            footer_debug: ColorSpec::rgb(59, 247, 209),
            footer_edit: ColorSpec::rgb(255, 210, 0),
            footer_normal: ColorSpec::rgb(0, 0, 0),
        }
    }

    /// Rose Pine theme.
    ///
    pub fn rose_pine() -> Self {
        Theme {
            name: "rose-pine",
            primary: ColorSpec::rgb(196, 167, 231),  // Iris
            banner: ColorSpec::rgb(235, 188, 186),   // Rose
            text: ColorSpec::rgb(224, 222, 244),     // Text
            text_muted: ColorSpec::rgb(110, 106, 134), // Muted
            success: ColorSpec::rgb(49, 116, 143),   // Pine
            warning: ColorSpec::rgb(246, 193, 119),  // Gold
            error: ColorSpec::rgb(235, 111, 146),    // Love
            border_active: ColorSpec::rgb(196, 167, 231),
            border_normal: ColorSpec::rgb(110, 106, 134),
            highlight_bg: ColorSpec::rgb(156, 207, 216), // Foam
            highlight_fg: ColorSpec::rgb(25, 23, 36),
            footer_debug: ColorSpec::rgb(49, 116, 143),
            footer_edit: ColorSpec::rgb(246, 193, 119),
            footer_normal: ColorSpec::rgb(25, 23, 36),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula",
            primary: ColorSpec::rgb(189, 147, 249),  // Purple
            banner: ColorSpec::rgb(255, 121, 198),   // Pink
            text: ColorSpec::rgb(248, 248, 242),     // Foreground
            text_muted: ColorSpec::rgb(98, 114, 164), // Comment
            success: ColorSpec::rgb(80, 250, 123),   // Green
            warning: ColorSpec::rgb(241, 250, 140),  // Yellow
            error: ColorSpec::rgb(255, 85, 85),      // Red
            border_active: ColorSpec::rgb(189, 147, 249),
            border_normal: ColorSpec::rgb(98, 114, 164),
            highlight_bg: ColorSpec::rgb(139, 233, 253), // Cyan
            highlight_fg: ColorSpec::rgb(40, 42, 54),
            footer_debug: ColorSpec::rgb(80, 250, 123),
            footer_edit: ColorSpec::rgb(241, 250, 140),
            footer_normal: ColorSpec::rgb(40, 42, 54),
        }
    }
}
