//! Format records for each report section.

use serde::{Deserialize, Serialize};

use super::{Alignment, BorderStyle, Color, FontStyle};

/// Style of a table cell: header row, row-number gutter or column body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellFormat {
    /// Font style of the cell text
    pub font_style: FontStyle,
    /// Font size in points (always ≥ 1)
    pub font_size: u32,
    /// Horizontal alignment
    pub alignment: Alignment,
    /// Text color
    pub text_color: Color,
    /// Background color
    pub background_color: Color,
}

impl Default for CellFormat {
    fn default() -> Self {
        Self {
            font_style: FontStyle::Normal,
            font_size: 12,
            alignment: Alignment::Left,
            text_color: Color::BLACK,
            background_color: Color::WHITE,
        }
    }
}

impl CellFormat {
    /// Create the default cell format
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set font style
    pub fn font_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    /// Builder: set font size (0 is raised to 1)
    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size.max(1);
        self
    }

    /// Builder: set alignment
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder: set text color
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Builder: set background color
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Style of the report title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleFormat {
    pub font_style: FontStyle,
    pub font_size: u32,
    pub alignment: Alignment,
    pub text_color: Color,
    pub background_color: Color,
}

impl Default for TitleFormat {
    fn default() -> Self {
        Self {
            font_style: FontStyle::Bold,
            font_size: 24,
            alignment: Alignment::Center,
            text_color: Color::BLACK,
            background_color: Color::WHITE,
        }
    }
}

impl TitleFormat {
    /// Create the default title format
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set font style
    pub fn font_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    /// Builder: set font size (0 is raised to 1)
    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size.max(1);
        self
    }

    /// Builder: set alignment
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder: set text color
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Builder: set background color
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Table borders, styled independently for the outer frame and the inner
/// horizontal and vertical rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableFormat {
    pub outer_border_style: BorderStyle,
    pub outer_border_color: Color,
    pub horizontal_border_style: BorderStyle,
    pub horizontal_border_color: Color,
    pub vertical_border_style: BorderStyle,
    pub vertical_border_color: Color,
}

impl TableFormat {
    /// Create the default table format (normal black borders)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: same style and color on every edge
    pub fn all_borders(style: BorderStyle, color: Color) -> Self {
        Self {
            outer_border_style: style,
            outer_border_color: color,
            horizontal_border_style: style,
            horizontal_border_color: color,
            vertical_border_style: style,
            vertical_border_color: color,
        }
    }

    /// Builder: set the outer frame
    pub fn outer(mut self, style: BorderStyle, color: Color) -> Self {
        self.outer_border_style = style;
        self.outer_border_color = color;
        self
    }

    /// Builder: set inner horizontal rules
    pub fn horizontal(mut self, style: BorderStyle, color: Color) -> Self {
        self.horizontal_border_style = style;
        self.horizontal_border_color = color;
        self
    }

    /// Builder: set inner vertical rules
    pub fn vertical(mut self, style: BorderStyle, color: Color) -> Self {
        self.vertical_border_style = style;
        self.vertical_border_color = color;
        self
    }
}

/// Style of the summary section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFormat {
    pub key_color: Color,
    pub key_background_color: Color,
    pub key_style: FontStyle,
    pub value_color: Color,
    pub value_background_color: Color,
    pub value_style: FontStyle,
    pub font_size: u32,
    /// Decimal places used for numeric summary values
    pub rounding_precision: usize,
    pub alignment: Alignment,
}

impl Default for SummaryFormat {
    fn default() -> Self {
        Self {
            key_color: Color::BLACK,
            key_background_color: Color::WHITE,
            key_style: FontStyle::Bold,
            value_color: Color::BLACK,
            value_background_color: Color::WHITE,
            value_style: FontStyle::Normal,
            font_size: 12,
            rounding_precision: 2,
            alignment: Alignment::Right,
        }
    }
}

impl SummaryFormat {
    /// Create the default summary format
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: style the keys
    pub fn key(mut self, style: FontStyle, color: Color, background: Color) -> Self {
        self.key_style = style;
        self.key_color = color;
        self.key_background_color = background;
        self
    }

    /// Builder: style the values
    pub fn value(mut self, style: FontStyle, color: Color, background: Color) -> Self {
        self.value_style = style;
        self.value_color = color;
        self.value_background_color = background;
        self
    }

    /// Builder: set font size (0 is raised to 1)
    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size.max(1);
        self
    }

    /// Builder: set rounding precision
    pub fn rounding_precision(mut self, precision: usize) -> Self {
        self.rounding_precision = precision;
        self
    }

    /// Builder: set alignment
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cell = CellFormat::default();
        assert_eq!(cell.font_size, 12);
        assert_eq!(cell.alignment, Alignment::Left);

        let title = TitleFormat::default();
        assert_eq!(title.font_size, 24);
        assert_eq!(title.font_style, FontStyle::Bold);
        assert_eq!(title.alignment, Alignment::Center);

        let summary = SummaryFormat::default();
        assert_eq!(summary.rounding_precision, 2);
        assert_eq!(summary.key_style, FontStyle::Bold);

        let table = TableFormat::default();
        assert_eq!(table.outer_border_style, BorderStyle::Normal);
        assert_eq!(table.vertical_border_color, Color::BLACK);
    }

    #[test]
    fn test_font_size_is_positive() {
        assert_eq!(CellFormat::new().font_size(0).font_size, 1);
        assert_eq!(TitleFormat::new().font_size(0).font_size, 1);
        assert_eq!(SummaryFormat::new().font_size(18).font_size, 18);
    }

    #[test]
    fn test_table_format_edges_are_independent() {
        let table = TableFormat::new()
            .outer(BorderStyle::Bold, Color::RED)
            .vertical(BorderStyle::Dashed, Color::BLUE);
        assert_eq!(table.outer_border_style, BorderStyle::Bold);
        assert_eq!(table.horizontal_border_style, BorderStyle::Normal);
        assert_eq!(table.vertical_border_color, Color::BLUE);
    }
}
