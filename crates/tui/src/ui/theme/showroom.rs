use ratatui::style::Color;
use showroom_types::Platform;

use super::roles::{Theme, ThemeRoles};

// Handset palette: warm neutrals on a light background.
pub const NEUTRAL_100: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
pub const NEUTRAL_200: Color = Color::Rgb(0xF4, 0xF2, 0xF1); // background
pub const NEUTRAL_300: Color = Color::Rgb(0xD7, 0xCE, 0xC9); // separator
pub const NEUTRAL_400: Color = Color::Rgb(0xB6, 0xAC, 0xA6); // border
pub const NEUTRAL_500: Color = Color::Rgb(0x97, 0x8F, 0x8A);
pub const NEUTRAL_600: Color = Color::Rgb(0x56, 0x4E, 0x4A); // dim text
pub const NEUTRAL_700: Color = Color::Rgb(0x3C, 0x38, 0x36); // text
pub const NEUTRAL_800: Color = Color::Rgb(0x19, 0x10, 0x15);
pub const PRIMARY_100: Color = Color::Rgb(0xF4, 0xE0, 0xD9);
pub const PRIMARY_200: Color = Color::Rgb(0xE8, 0xC1, 0xB4);
pub const PRIMARY_500: Color = Color::Rgb(0xC7, 0x65, 0x42); // tint
pub const SECONDARY_500: Color = Color::Rgb(0x41, 0x47, 0x6E);

// TV palette: high contrast, violet primaries on black.
pub const TV_BLACK: Color = Color::Rgb(0x00, 0x00, 0x00);
pub const TV_WHITE: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
pub const TV_PRIMARY_100: Color = Color::Rgb(0x38, 0x2B, 0xF0);
pub const TV_PRIMARY_200: Color = Color::Rgb(0x5E, 0x43, 0xF3); // card fill
pub const TV_PRIMARY_500: Color = Color::Rgb(0xA6, 0x88, 0xFA); // tint
pub const TV_SECONDARY: Color = Color::Rgb(0xBA, 0x9F, 0xFB);

// Shared across both palettes.
pub const ACCENT_100: Color = Color::Rgb(0xFF, 0xEE, 0xD4); // focused card border
pub const ACCENT_500: Color = Color::Rgb(0xFF, 0xBB, 0x50);
pub const ANGRY_100: Color = Color::Rgb(0xF2, 0xD6, 0xCD);
pub const ANGRY_500: Color = Color::Rgb(0xC0, 0x34, 0x03);

/// Light palette for handset and web layouts.
#[derive(Debug, Clone)]
pub struct HandsetTheme {
    roles: ThemeRoles,
}

impl HandsetTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: NEUTRAL_200,
                surface: NEUTRAL_200,
                surface_muted: NEUTRAL_100,
                border: NEUTRAL_400,
                separator: NEUTRAL_300,

                text: NEUTRAL_700,
                text_secondary: NEUTRAL_800,
                text_muted: NEUTRAL_600,

                accent_primary: PRIMARY_500,
                accent_secondary: SECONDARY_500,

                error: ANGRY_500,
                error_background: ANGRY_100,

                selection_bg: PRIMARY_100,
                selection_fg: NEUTRAL_800,
                focus: PRIMARY_500,

                card: PRIMARY_200,
                card_focus: ACCENT_500,

                scrollbar_track: NEUTRAL_300,
                scrollbar_thumb: NEUTRAL_500,
            },
        }
    }
}

impl Default for HandsetTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for HandsetTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// Dark, high-contrast palette for the TV grid.
#[derive(Debug, Clone)]
pub struct TvTheme {
    roles: ThemeRoles,
}

impl TvTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: TV_BLACK,
                surface: TV_BLACK,
                surface_muted: TV_PRIMARY_100,
                border: TV_SECONDARY,
                separator: TV_PRIMARY_100,

                text: TV_WHITE,
                text_secondary: TV_WHITE,
                // The TV neutrals collapse to black; dim text borrows the secondary tone.
                text_muted: TV_SECONDARY,

                accent_primary: TV_PRIMARY_500,
                accent_secondary: TV_SECONDARY,

                error: ANGRY_500,
                error_background: ANGRY_100,

                selection_bg: TV_PRIMARY_200,
                selection_fg: TV_WHITE,
                focus: ACCENT_100,

                card: TV_PRIMARY_200,
                card_focus: ACCENT_100,

                scrollbar_track: TV_PRIMARY_100,
                scrollbar_thumb: TV_SECONDARY,
            },
        }
    }
}

impl Default for TvTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for TvTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// Picks the palette matching the host platform.
pub fn for_platform(platform: Platform) -> Box<dyn Theme> {
    if platform.is_tv() {
        Box::new(TvTheme::new())
    } else {
        Box::new(HandsetTheme::new())
    }
}
