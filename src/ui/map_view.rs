//! Terminal map renderer
//!
//! Scales the logical canvas down to a character grid. Bodies that project
//! past the grid (the far track of a right-hand system) clamp to the edge
//! column rather than vanishing.

use crate::io::OutputWriter;
use crate::models::position::MapPoint;
use crate::services::projector::MapLayout;
use crate::services::scene::{BodyKind, MapRenderer};

const GRID_COLS: usize = 78;
const GRID_ROWS: usize = 15;

pub struct AsciiMapRenderer {
    layout: MapLayout,
    cells: Vec<Vec<char>>,
}

impl AsciiMapRenderer {
    pub fn new(layout: MapLayout) -> Self {
        AsciiMapRenderer {
            layout,
            cells: vec![vec![' '; GRID_COLS]; GRID_ROWS],
        }
    }

    fn plot(&self, point: MapPoint) -> (usize, usize) {
        let col = (point.x / self.layout.width * GRID_COLS as f64) as isize;
        let row = (point.y / self.layout.height * GRID_ROWS as f64) as isize;
        (
            row.clamp(0, GRID_ROWS as isize - 1) as usize,
            col.clamp(0, GRID_COLS as isize - 1) as usize,
        )
    }

    fn put(&mut self, row: usize, col: usize, symbol: char) {
        self.cells[row][col] = symbol;
    }

    fn label(&mut self, row: usize, col: usize, text: &str) {
        let mut col = col;
        for ch in text.chars() {
            if col >= GRID_COLS {
                break;
            }
            self.cells[row][col] = ch;
            col += 1;
        }
    }

    pub fn present(&self, output: &mut dyn OutputWriter) {
        let border = "-".repeat(GRID_COLS + 2);
        output.writeln(&border);
        for row in &self.cells {
            let line: String = row.iter().collect();
            output.writeln(&format!("|{}|", line));
        }
        output.writeln(&border);
    }
}

impl MapRenderer for AsciiMapRenderer {
    fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(' ');
        }
    }

    fn draw_star(&mut self, point: MapPoint, name: &str) {
        let (row, col) = self.plot(point);
        self.put(row, col, '*');
        if row + 1 < GRID_ROWS {
            self.label(row + 1, col.saturating_sub(1), name);
        }
    }

    fn draw_body(&mut self, point: MapPoint, name: &str, _radius: f64, kind: BodyKind) {
        let (row, col) = self.plot(point);
        let symbol = match kind {
            BodyKind::Planet => 'o',
            BodyKind::Destination => '@',
        };
        self.put(row, col, symbol);
        if row + 1 < GRID_ROWS {
            self.label(row + 1, col.saturating_sub(1), name);
        }
    }

    fn draw_ship(&mut self, point: MapPoint) {
        let (row, col) = self.plot(point);
        self.put(row, col, '>');
    }
}
