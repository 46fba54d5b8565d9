//! Layout and typography derived from table options.
//!
//! Sizes are configured as CSS-like strings (`auto`, `12`, `3rem`, `40px`,
//! `80%`). In a terminal every absolute unit maps to rows or columns;
//! font sizes and families are carried through untouched for renderers
//! that can use them.

use std::fmt;
use std::str::FromStr;

use ratatui::layout::Constraint;
use thiserror::Error;

use crate::config::TableOptions;

/// Pixels per terminal row when converting `px` values.
const PIXELS_PER_CELL: u16 = 16;

/// Error returned for a size string that cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid size '{0}'")]
pub struct InvalidSize(pub String);

/// A configured size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    /// Fit the content.
    #[default]
    Auto,
    /// A fixed number of terminal cells.
    Cells(u16),
    /// A share of the available space.
    Percent(u16),
}

impl Size {
    /// Layout constraint for this size, given the size the content needs.
    pub fn constraint(self, content: u16) -> Constraint {
        match self {
            Size::Auto => Constraint::Length(content),
            Size::Cells(n) => Constraint::Length(n),
            Size::Percent(p) => Constraint::Percentage(p),
        }
    }

    /// Resolve against the available space.
    pub fn resolve(self, available: u16, content: u16) -> u16 {
        match self {
            Size::Auto => content.min(available),
            Size::Cells(n) => n.min(available),
            Size::Percent(p) => ((u32::from(available) * u32::from(p)) / 100) as u16,
        }
    }
}

impl FromStr for Size {
    type Err = InvalidSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        let invalid = || InvalidSize(s.to_string());

        if raw == "auto" {
            return Ok(Size::Auto);
        }

        if let Some(number) = raw.strip_suffix('%') {
            let percent: u16 = number.trim().parse().map_err(|_| invalid())?;
            if percent > 100 {
                return Err(invalid());
            }
            return Ok(Size::Percent(percent));
        }

        if let Some(number) = raw.strip_suffix("px") {
            let pixels: f32 = number.trim().parse().map_err(|_| invalid())?;
            if pixels < 0.0 {
                return Err(invalid());
            }
            let cells = (pixels / f32::from(PIXELS_PER_CELL)).ceil() as u16;
            return Ok(Size::Cells(cells));
        }

        let number = raw
            .strip_suffix("rem")
            .or_else(|| raw.strip_suffix("em"))
            .unwrap_or(&raw);
        let cells: f32 = number.trim().parse().map_err(|_| invalid())?;
        if cells < 0.0 {
            return Err(invalid());
        }
        Ok(Size::Cells(cells.ceil() as u16))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Auto => f.write_str("auto"),
            Size::Cells(n) => write!(f, "{}", n),
            Size::Percent(p) => write!(f, "{}%", p),
        }
    }
}

/// Presentation parameters for one section of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStyle {
    pub height: Size,
    pub font_size: String,
    pub font_family: String,
}

/// Presentation parameters for the whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyles {
    /// Controls row: page size, search column and search box.
    pub header: SectionStyle,
    /// Column headers and rows.
    pub body: SectionStyle,
    /// Previous/Next and the status line.
    pub pagination: SectionStyle,
    /// Width of the whole widget.
    pub container_width: Size,
}

impl TableStyles {
    /// Derive styles from options.
    ///
    /// Unparseable sizes fall back to `auto`; use
    /// [`TableOptions::validate`] to reject them up front.
    pub fn from_options(options: &TableOptions) -> Self {
        let size = |value: &str| value.parse::<Size>().unwrap_or_default();
        let section = |height: &str, font_size: &str| SectionStyle {
            height: size(height),
            font_size: font_size.to_string(),
            font_family: options.font_family.clone(),
        };

        Self {
            header: section(&options.header_height, &options.header_font_size),
            body: section(&options.table_body_height, &options.table_body_font_size),
            pagination: section(&options.pagination_height, &options.pagination_font_size),
            container_width: options.container_width.parse().unwrap_or(Size::Percent(100)),
        }
    }
}
