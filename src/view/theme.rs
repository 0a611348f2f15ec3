//! Colour palettes. A `Theme` is chosen once at startup and handed to the
//! painter on every frame.

use clap::ValueEnum;
use crossterm::style::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    #[default]
    Default,
    Dark,
    Light,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_highlight: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub border: Color,
}

const fn ansi(
    primary: u8,
    secondary: u8,
    accent: u8,
    text: [u8; 4],
    status: [u8; 3],
    border: u8,
) -> Palette {
    Palette {
        primary: Color::AnsiValue(primary),
        secondary: Color::AnsiValue(secondary),
        accent: Color::AnsiValue(accent),
        text_primary: Color::AnsiValue(text[0]),
        text_secondary: Color::AnsiValue(text[1]),
        text_muted: Color::AnsiValue(text[2]),
        text_highlight: Color::AnsiValue(text[3]),
        warning: Color::AnsiValue(status[0]),
        error: Color::AnsiValue(status[1]),
        info: Color::AnsiValue(status[2]),
        border: Color::AnsiValue(border),
    }
}

const DEFAULT_PALETTE: Palette = ansi(69, 81, 39, [255, 229, 241, 81], [226, 124, 81], 240);
const DARK_PALETTE: Palette = ansi(25, 165, 33, [252, 220, 244, 165], [214, 160, 33], 236);
const LIGHT_PALETTE: Palette = ansi(27, 125, 32, [16, 17, 240, 125], [172, 160, 27], 240);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,
    pub palette: Palette,
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        let palette = match name {
            ThemeName::Default => DEFAULT_PALETTE,
            ThemeName::Dark => DARK_PALETTE,
            ThemeName::Light => LIGHT_PALETTE,
        };
        Self { name, palette }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Default)
    }
}
