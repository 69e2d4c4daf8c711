//! The cell grid backing a screen buffer.
//!
//! A flat arena of cells addressed by row/column with bounds-checked access.
//! Fill operations are linear: they wrap from the right edge of one row to
//! the left edge of the next, matching how the console's output APIs walk the
//! buffer, and stop at the end of the buffer. Scrolling moves a rectangle to
//! a new origin, clipped on both the read and the write side, and back-fills
//! the vacated cells.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::attr::LegacyAttributes;
use crate::coord::{Coord, Rect};

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub ch: char,
    pub attr: LegacyAttributes,
}

impl Cell {
    pub const fn new(ch: char, attr: LegacyAttributes) -> Self {
        Cell { ch, attr }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            attr: LegacyAttributes::empty(),
        }
    }
}

/// A 2D grid of cells (row 0 at the top).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Cell>,
    cols: usize,
    rows: usize,
}

impl Grid {
    /// Create a grid filled with default (blank) cells.
    pub fn new(cols: usize, rows: usize) -> Self {
        Grid {
            cells: vec![Cell::default(); cols * rows],
            cols,
            rows,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Buffer dimensions as a coordinate pair (x = columns, y = rows).
    pub fn size(&self) -> Coord {
        Coord::new(self.cols as i16, self.rows as i16)
    }

    fn index(&self, pos: Coord) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(y * self.cols + x)
    }

    pub fn cell(&self, pos: Coord) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, pos: Coord) -> Option<&mut Cell> {
        self.index(pos).map(|i| &mut self.cells[i])
    }

    /// Write `count` copies of `ch` starting at `start`, wrapping rows.
    /// Returns the number of cells written.
    pub fn fill_chars(&mut self, ch: char, count: u32, start: Coord) -> u32 {
        let Some(mut idx) = self.index(start) else {
            return 0;
        };
        let mut written = 0;
        while written < count && idx < self.cells.len() {
            self.cells[idx].ch = ch;
            idx += 1;
            written += 1;
        }
        written
    }

    /// Write `count` copies of `attr` starting at `start`, wrapping rows.
    /// Returns the number of cells written.
    pub fn fill_attributes(&mut self, attr: LegacyAttributes, count: u32, start: Coord) -> u32 {
        let Some(mut idx) = self.index(start) else {
            return 0;
        };
        let mut written = 0;
        while written < count && idx < self.cells.len() {
            self.cells[idx].attr = attr;
            idx += 1;
            written += 1;
        }
        written
    }

    /// Write a string at `start` with the given attribute, wrapping rows.
    pub fn write_str(&mut self, start: Coord, text: &str, attr: LegacyAttributes) {
        let Some(mut idx) = self.index(start) else {
            return;
        };
        for ch in text.chars() {
            if idx >= self.cells.len() {
                break;
            }
            self.cells[idx] = Cell::new(ch, attr);
            idx += 1;
        }
    }

    /// Fill every cell of `rect` (clipped to the grid) with `ch`/`attr`.
    pub fn fill_rect(&mut self, rect: Rect, ch: char, attr: LegacyAttributes) {
        for y in rect.top..rect.bottom {
            for x in rect.left..rect.right {
                if let Some(cell) = self.cell_mut(Coord::new(x, y)) {
                    *cell = Cell::new(ch, attr);
                }
            }
        }
    }

    /// Move the contents of `source` so its top-left corner lands on `dest`.
    ///
    /// Vacated source cells become `fill`. When `clip` is given, cells are
    /// neither consumed from nor written to positions outside it. Writes
    /// falling outside the grid are discarded.
    pub fn scroll_region(&mut self, source: Rect, clip: Option<Rect>, dest: Coord, fill: Cell) {
        if source.is_empty() {
            return;
        }
        let in_clip = |pos: Coord| clip.map_or(true, |c| c.contains(pos));

        // Snapshot the source, then blank it where the clip allows.
        let width = source.width() as usize;
        let mut saved = Vec::with_capacity(width * source.height() as usize);
        for y in source.top..source.bottom {
            for x in source.left..source.right {
                let pos = Coord::new(x, y);
                saved.push(self.cell(pos).copied().unwrap_or(fill));
                if in_clip(pos) {
                    if let Some(cell) = self.cell_mut(pos) {
                        *cell = fill;
                    }
                }
            }
        }

        // Paste the snapshot at the destination.
        for (i, cell) in saved.iter().enumerate() {
            let dx = (i % width) as i16;
            let dy = (i / width) as i16;
            let src = Coord::new(source.left + dx, source.top + dy);
            let dst = Coord::new(dest.x + dx, dest.y + dy);
            if in_clip(src) && in_clip(dst) {
                if let Some(target) = self.cell_mut(dst) {
                    *target = *cell;
                }
            }
        }
    }

    /// Resize the grid, preserving the top-left content that still fits.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        trace!(
            "resizing grid {}x{} -> {}x{}",
            self.cols,
            self.rows,
            cols,
            rows
        );
        let mut next = vec![Cell::default(); cols * rows];
        for y in 0..rows.min(self.rows) {
            for x in 0..cols.min(self.cols) {
                next[y * cols + x] = self.cells[y * self.cols + x];
            }
        }
        self.cells = next;
        self.cols = cols;
        self.rows = rows;
    }

    /// Serialize the grid for snapshot comparison or persistence.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Grid> {
        serde_json::from_str(json)
    }
}
