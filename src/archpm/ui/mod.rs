//! # Presentation Models
//!
//! The list, the form and the navigation between entity views, modelled
//! without any terminal I/O. A front end feeds user actions in as
//! [`list::ListEvent`] / [`form::FormEvent`] values and draws whatever state
//! the [`controller::Navigator`] leaves behind.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub mod controller;
pub mod form;
pub mod list;

pub use controller::{Navigator, Panel};
pub use form::{FormEvent, FormView};
pub use list::{ListEvent, ListView};

/// Truncates `s` to `max_width` terminal cells, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}

/// Flattens, truncates and right-pads a cell to exactly `width` cells.
pub fn fit_cell(value: &str, width: usize) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let cell = truncate_to_width(flat.trim(), width);
    let padding = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(padding))
}
