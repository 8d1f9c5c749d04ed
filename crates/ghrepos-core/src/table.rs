// SPDX-License-Identifier: Apache-2.0

//! Lightweight column writer for aligned plain-text tables.

use std::io::{self, Write};

use crate::utils::single_line;

/// Spaces between columns.
const PADDING: usize = 2;

/// A simple table printer for rendering rows with consistent column alignment.
///
/// Widths are measured in characters, so multi-byte text lines up.
#[derive(Debug)]
pub struct TablePrinter {
    /// Column widths for alignment.
    column_widths: Vec<usize>,
    /// Rows of data.
    rows: Vec<Vec<String>>,
}

impl TablePrinter {
    /// Create a new table printer with the given column count.
    #[must_use]
    pub fn new(column_count: usize) -> Self {
        Self {
            column_widths: vec![0; column_count],
            rows: Vec::new(),
        }
    }

    /// Add a row to the table, updating column widths as needed.
    ///
    /// Line breaks and tabs inside a cell are replaced with spaces so every
    /// row prints as exactly one line.
    pub fn add_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        let cells: Vec<String> = cells.iter().map(|c| single_line(c.as_ref())).collect();
        for (width, cell) in self.column_widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.chars().count());
        }
        self.rows.push(cells);
    }

    /// Write the table to `w`, one line per row.
    ///
    /// Every column but the last is padded to its widest cell plus two
    /// spaces; the last column is written as is.
    pub fn write_to(&self, w: &mut dyn Write) -> io::Result<()> {
        for row in &self.rows {
            let mut line = String::new();
            let last = row.len().saturating_sub(1);
            for (i, cell) in row.iter().enumerate() {
                match self.column_widths.get(i) {
                    Some(&width) if i < last => {
                        let width = width + PADDING;
                        line.push_str(&format!("{cell:<width$}"));
                    }
                    _ => line.push_str(cell),
                }
            }
            writeln!(w, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
