use crate::types::{Placement, Rect};

const MAX_COLS: f64 = 80.0;
const MAX_ROWS: f64 = 40.0;

/// Renders the board and its placements as a scaled ASCII drawing, the
/// top of the board first.
pub fn render_board(board: Rect, placements: &[Placement]) -> String {
    let scale = f64::min(MAX_COLS / board.w as f64, MAX_ROWS / board.h as f64);
    let cols = (board.w as f64 * scale).round() as usize;
    let rows = (board.h as f64 * scale).round() as usize;

    if cols == 0 || rows == 0 {
        return String::new();
    }

    let mut grid = Grid::new(cols + 1, rows + 1);
    grid.outline(0, 0, cols, rows);

    for p in placements {
        let x = (p.x as f64 * scale).round() as usize;
        let y = (p.y as f64 * scale).round() as usize;
        let w = (p.rect.w as f64 * scale).round() as usize;
        let h = (p.rect.h as f64 * scale).round() as usize;

        if w == 0 || h == 0 {
            continue;
        }

        grid.outline(x, y, w, h);
        grid.label(x, y, w, h, &p.rect.to_string());
    }

    grid.render()
}

struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl Grid {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    /// Writes a border character, promoting crossings to '+'.
    fn mark(&mut self, x: usize, y: usize, ch: char) {
        if x >= self.cols || y >= self.rows {
            return;
        }
        let cell = &mut self.cells[y * self.cols + x];
        *cell = match (*cell, ch) {
            ('|', '-') | ('-', '|') | ('+', _) | (_, '+') => '+',
            _ => ch,
        };
    }

    fn outline(&mut self, x: usize, y: usize, w: usize, h: usize) {
        for i in x..=x + w {
            self.mark(i, y, '-');
            self.mark(i, y + h, '-');
        }
        for j in y..=y + h {
            self.mark(x, j, '|');
            self.mark(x + w, j, '|');
        }
        for &cx in &[x, x + w] {
            for &cy in &[y, y + h] {
                self.mark(cx, cy, '+');
            }
        }
    }

    /// Centers `text` inside the rectangle, clipped to its interior.
    fn label(&mut self, x: usize, y: usize, w: usize, h: usize, text: &str) {
        if w <= 2 || h == 0 {
            return;
        }
        let cy = y + h / 2;
        if cy <= y || cy >= y + h {
            return;
        }
        let chars: Vec<char> = text.chars().collect();
        let start_x = (x + w / 2).saturating_sub(chars.len() / 2);
        for (i, &ch) in chars.iter().enumerate() {
            let cx = start_x + i;
            if cx > x && cx < x + w && cx < self.cols {
                self.cells[cy * self.cols + cx] = ch;
            }
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}
