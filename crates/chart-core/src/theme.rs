// File: crates/chart-core/src/theme.rs
// Summary: Colors, categorical palettes and light/dark theme presets.

use std::fmt;

/// 8-bit RGBA color, independent of any rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Three-color palette used for screen technologies in the bar and donut charts.
pub const TECH_PALETTE: [Color; 3] = [
    Color::rgb(0x4e, 0x79, 0xa7),
    Color::rgb(0xf2, 0x8e, 0x2c),
    Color::rgb(0x59, 0xa1, 0x4f),
];

/// Ten-color categorical palette for regions and scatter technologies.
pub const CATEGORY10: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub grid: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub title: Color,
    pub mark_stroke: Color,
    pub annotation: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::WHITE,
            grid: Color::rgb(0, 0, 0),
            axis_line: Color::rgb(0, 0, 0),
            axis_label: Color::rgb(0, 0, 0),
            title: Color::rgb(0x22, 0x22, 0x22),
            mark_stroke: Color::WHITE,
            annotation: Color::rgb(0x99, 0x99, 0x99),
            tooltip_background: Color::rgb(0xf9, 0xf9, 0xf9),
            tooltip_text: Color::rgb(0x22, 0x22, 0x22),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            grid: Color::rgb(235, 235, 245),
            axis_line: Color::rgb(180, 180, 190),
            axis_label: Color::rgb(235, 235, 245),
            title: Color::rgb(245, 245, 250),
            mark_stroke: Color::rgb(18, 18, 20),
            annotation: Color::rgb(150, 150, 160),
            tooltip_background: Color::rgb(40, 40, 45),
            tooltip_text: Color::rgb(235, 235, 245),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_display_as_lowercase_hex() {
        assert_eq!(TECH_PALETTE[0].to_string(), "#4e79a7");
        assert_eq!(Color::rgb(0xff, 0x7f, 0x0e).to_string(), "#ff7f0e");
    }

    #[test]
    fn unknown_theme_falls_back_to_light() {
        assert_eq!(find("DARK").name, "dark");
        assert_eq!(find("sepia").name, "light");
    }
}
