use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::classify::Classification;
use crate::compare::{Cell, Comparison};

const COLUMN_SEPARATOR: &str = " | ";

/// Side-by-side text rendering of a [`Comparison`], for debugging and
/// snapshot tests.
///
/// The first column marks the row classification (`=` common, `~` partial,
/// `+` unique). Changed words are wrapped in brackets and absent cells are
/// left blank.
///
/// ```text
/// # | Text 1      | Text 2
/// = | a           | a
/// + | b           |
/// + |             | x
/// = | hello [big] | hello [small]
/// ```
pub struct ComparisonDisplay<'a> {
    comparison: &'a Comparison,
    line_numbers: bool,
}

fn marker(classification: Classification) -> char {
    match classification {
        Classification::Common => '=',
        Classification::Partial => '~',
        Classification::Unique => '+',
    }
}

impl<'a> ComparisonDisplay<'a> {
    pub fn new(comparison: &'a Comparison) -> Self {
        ComparisonDisplay {
            comparison,
            line_numbers: false,
        }
    }

    /// Prefix present cells with their 1-based source line number.
    pub fn with_line_numbers(mut self) -> Self {
        self.line_numbers = true;
        self
    }

    fn render_cell(&self, cell: &Cell) -> String {
        if !cell.exists {
            return String::new();
        }

        let mut rendered = String::new();
        if self.line_numbers {
            if let Some(line) = cell.line {
                rendered.push_str(&format!("{}: ", line + 1));
            }
        }
        for piece in cell.pieces() {
            if piece.changed {
                rendered.push('[');
                rendered.push_str(piece.text);
                rendered.push(']');
            } else {
                rendered.push_str(piece.text);
            }
        }
        rendered
    }
}

impl<'a> std::fmt::Display for ComparisonDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines: Vec<(char, Vec<String>)> = Vec::with_capacity(self.comparison.rows.len() + 1);
        lines.push(('#', self.comparison.labels.clone()));
        for row in &self.comparison.rows {
            let cells = row.cells.iter().map(|cell| self.render_cell(cell)).collect();
            lines.push((marker(row.classification), cells));
        }

        let mut widths = vec![0usize; self.comparison.document_count()];
        for (_, cells) in &lines {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
            }
        }

        let mut is_first = true;
        for (marker, cells) in &lines {
            if is_first {
                is_first = false;
            } else {
                f.write_char('\n')?;
            }

            let mut out = String::new();
            out.push(*marker);
            for (cell, width) in cells.iter().zip(&widths) {
                out.push_str(COLUMN_SEPARATOR);
                out.push_str(cell);
                let padding = width.saturating_sub(UnicodeWidthStr::width(cell.as_str()));
                out.extend(std::iter::repeat(' ').take(padding));
            }
            f.write_str(out.trim_end())?;
        }

        Ok(())
    }
}
