//! Visual formatting attached to report sections.
//!
//! Format records are plain immutable values. They describe intent only;
//! each exporter maps them onto whatever its output format supports (the
//! text and CSV exporters ignore them entirely).
//!
//! - [`CellFormat`]: table header, row-number gutter and per-column cells
//! - [`TitleFormat`]: the report title
//! - [`TableFormat`]: border style and color per edge class
//! - [`SummaryFormat`]: summary keys/values plus numeric rounding

pub mod options;

pub use options::{CellFormat, SummaryFormat, TableFormat, TitleFormat};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ReportError;

/// Font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    Underline,
    BoldItalic,
    BoldUnderline,
}

impl FontStyle {
    /// Whether the style renders bold
    pub fn is_bold(self) -> bool {
        matches!(
            self,
            FontStyle::Bold | FontStyle::BoldItalic | FontStyle::BoldUnderline
        )
    }

    /// Whether the style renders italic
    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }

    /// Whether the style renders underlined
    pub fn is_underline(self) -> bool {
        matches!(self, FontStyle::Underline | FontStyle::BoldUnderline)
    }
}

impl FromStr for FontStyle {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "normal" | "regular" => Ok(FontStyle::Normal),
            "bold" => Ok(FontStyle::Bold),
            "italic" => Ok(FontStyle::Italic),
            "underline" => Ok(FontStyle::Underline),
            "bold_italic" => Ok(FontStyle::BoldItalic),
            "bold_underline" => Ok(FontStyle::BoldUnderline),
            _ => Err(ReportError::Parse {
                value: s.to_string(),
                expected: "font style",
            }),
        }
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for Alignment {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            _ => Err(ReportError::Parse {
                value: s.to_string(),
                expected: "alignment",
            }),
        }
    }
}

/// Table border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    #[default]
    Normal,
    Bold,
    Dashed,
}

impl FromStr for BorderStyle {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "thin" => Ok(BorderStyle::Normal),
            "bold" | "thick" => Ok(BorderStyle::Bold),
            "dashed" => Ok(BorderStyle::Dashed),
            _ => Err(ReportError::Parse {
                value: s.to_string(),
                expected: "border style",
            }),
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Create a color from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Packed `0xRRGGBB` value
    pub fn to_hex(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ReportError;

    /// Parse `#RRGGBB` or one of the named colors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || ReportError::Parse {
            value: s.to_string(),
            expected: "color",
        };

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(parse_error());
            }
            let packed = u32::from_str_radix(hex, 16).map_err(|_| parse_error())?;
            return Ok(Color::rgb(
                (packed >> 16) as u8,
                (packed >> 8) as u8,
                packed as u8,
            ));
        }

        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "black" => Ok(Color::BLACK),
            "white" => Ok(Color::WHITE),
            "red" => Ok(Color::RED),
            "green" => Ok(Color::GREEN),
            "blue" => Ok(Color::BLUE),
            "light_gray" | "light_grey" => Ok(Color::LIGHT_GRAY),
            "yellow" => Ok(Color::YELLOW),
            _ => Err(parse_error()),
        }
    }
}
