//! Colors as written by the caller, with a parsed RGBA form for raster output.

use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// A CSS color.
///
/// The source text is kept verbatim for declarative output; `rgba` is the
/// parsed value raster backends paint with.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    css: String,
    rgba: [u8; 4],
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let css = if a == 255 {
            format!("rgb({},{},{})", r, g, b)
        } else {
            format!("rgba({},{},{},{})", r, g, b, fmt_alpha(a))
        };
        Color { css, rgba: [r, g, b, a] }
    }

    /// Parse a color, rejecting anything a raster backend could not paint.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let trimmed = s.trim();
        let invalid = || ConfigError::InvalidColor {
            value: s.to_string(),
        };

        let rgba = if let Some(hex) = trimmed.strip_prefix('#') {
            parse_hex(hex).ok_or_else(invalid)?
        } else if let Some(inner) = trimmed
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_rgb_args(inner, true).ok_or_else(invalid)?
        } else if let Some(inner) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_rgb_args(inner, false).ok_or_else(invalid)?
        } else {
            named(&trimmed.to_ascii_lowercase()).ok_or_else(invalid)?
        };

        Ok(Color {
            css: trimmed.to_string(),
            rgba,
        })
    }

    /// The color exactly as it should appear in an SVG attribute.
    pub fn as_css(&self) -> &str {
        &self.css
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        self.rgba
    }

    pub fn is_transparent(&self) -> bool {
        self.rgba[3] == 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color {
            css: crate::defaults::COLOR.to_string(),
            rgba: [0x33, 0x33, 0x33, 255],
        }
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ConfigError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}

fn fmt_alpha(a: u8) -> String {
    let alpha = (a as f64 / 255.0 * 1000.0).round() / 1000.0;
    format!("{}", alpha)
}

fn parse_hex(hex: &str) -> Option<[u8; 4]> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        // Expand short forms: #abc -> #aabbcc
        3 => Some([nibble(0)?, nibble(1)?, nibble(2)?, 255]),
        4 => Some([nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?]),
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

fn parse_rgb_args(inner: &str, with_alpha: bool) -> Option<[u8; 4]> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    let a = if with_alpha {
        let alpha = parts[3].parse::<f64>().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        (alpha * 255.0).round() as u8
    } else {
        255
    };
    Some([r, g, b, a])
}

fn named(name: &str) -> Option<[u8; 4]> {
    let rgb = match name {
        "transparent" | "none" => return Some([0, 0, 0, 0]),
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" => [0, 255, 255],
        "magenta" => [255, 0, 255],
        "orange" => [255, 165, 0],
        "purple" => [128, 0, 128],
        "brown" => [165, 42, 42],
        "pink" => [255, 192, 203],
        "gold" => [255, 215, 0],
        "navy" => [0, 0, 128],
        "gray" | "grey" => [128, 128, 128],
        "lightgray" | "lightgrey" => [211, 211, 211],
        "darkgray" | "darkgrey" => [169, 169, 169],
        "silver" => [192, 192, 192],
        _ => return None,
    };
    Some([rgb[0], rgb[1], rgb[2], 255])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_hex() {
        let c: Color = "#C25".parse().unwrap();
        assert_eq!(c.to_rgba8(), [0xCC, 0x22, 0x55, 255]);
        assert_eq!(c.as_css(), "#C25");
    }

    #[test]
    fn parses_long_hex_with_alpha() {
        let c = Color::parse("#11223380").unwrap();
        assert_eq!(c.to_rgba8(), [0x11, 0x22, 0x33, 0x80]);
    }

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(Color::parse("rgb(1, 2, 3)").unwrap().to_rgba8(), [1, 2, 3, 255]);
        assert_eq!(
            Color::parse("rgba(10,20,30,0.5)").unwrap().to_rgba8(),
            [10, 20, 30, 128]
        );
    }

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!(Color::parse("White").unwrap().to_rgba8(), [255, 255, 255, 255]);
        assert!(Color::parse("transparent").unwrap().is_transparent());
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#12", "#ggg", "rgb(1,2)", "rgb(300,0,0)", "chartreuse-ish"] {
            assert!(
                matches!(Color::parse(bad), Err(ConfigError::InvalidColor { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn constructed_colors_print_as_css() {
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "rgb(1,2,3)");
        assert_eq!(Color::rgba(1, 2, 3, 0).to_string(), "rgba(1,2,3,0)");
    }

    #[test]
    fn default_color_parses_to_itself() {
        let c = Color::default();
        assert_eq!(Color::parse(c.as_css()).unwrap(), c);
    }
}
