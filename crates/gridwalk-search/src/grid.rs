//! The [`Grid`] type — fixed-size owner of every [`Cell`].
//!
//! Cells live in one flat row-major `Vec`; everything else in the crate refers
//! to them by index. Parent links are indices too, so they never own a cell.

use gridwalk_core::{Direction, Point, Range};

use crate::cell::{Cell, CellState};
use crate::error::SearchError;

/// An orthogonal neighbor found while expanding a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Neighbor {
    pub(crate) idx: usize,
    /// Direction of the edge from the expanded cell.
    pub(crate) dir: Direction,
    /// The neighbor was not queued yet, so this expansion discovered it.
    pub(crate) fresh: bool,
}

/// A fixed `width` × `height` grid of cells.
#[derive(Debug, Clone)]
pub struct Grid {
    bounds: Range,
    cells: Vec<Cell>,
    start: Option<usize>,
    finish: Option<usize>,
}

impl Grid {
    /// Create a grid of empty cells. Non-positive sizes yield an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::with_size(width, height);
        Self {
            bounds,
            cells: bounds.iter().map(Cell::new).collect(),
            start: None,
            finish: None,
        }
    }

    /// Build a grid from a text layout.
    ///
    /// One line per row: `.` empty, `#` wall, `S` start, `F` finish. Every
    /// line must have the same width. Surrounding whitespace is trimmed from
    /// the whole string and from each line.
    pub fn from_layout(s: &str) -> Result<Self, SearchError> {
        let s = s.trim();
        let rows: Vec<&str> = s.lines().map(str::trim).collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if rows.iter().any(|r| r.chars().count() != width) {
            return Err(SearchError::InconsistentLayout(s.to_string()));
        }

        let mut grid = Grid::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => {
                        grid.set_cell_state(p, CellState::Wall);
                    }
                    'S' => {
                        grid.set_start(p);
                    }
                    'F' => {
                        grid.set_finish(p);
                    }
                    _ => return Err(SearchError::InvalidLayoutChar { ch, pos: p }),
                }
            }
        }
        Ok(grid)
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.bounds.index_of(p)
    }

    /// Position of the cell at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.cells[idx].pos()
    }

    /// The cell at `p`, or `None` if out of bounds.
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// The cell at a flat index.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    #[inline]
    pub(crate) fn cell_at_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Index of the start cell, if placed.
    #[inline]
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// Index of the finish cell, if placed.
    #[inline]
    pub fn finish(&self) -> Option<usize> {
        self.finish
    }

    /// Position of the start cell, if placed.
    pub fn start_point(&self) -> Option<Point> {
        self.start.map(|i| self.point(i))
    }

    /// Position of the finish cell, if placed.
    pub fn finish_point(&self) -> Option<Point> {
        self.finish.map(|i| self.point(i))
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Make the cell at `p` the start. Only an empty cell may become the
    /// start; the previous start, if any, goes back to empty.
    ///
    /// Returns `false` (and changes nothing) if `p` is out of bounds or not
    /// empty.
    pub fn set_start(&mut self, p: Point) -> bool {
        let Some(i) = self.claim_empty(p) else {
            return false;
        };
        if let Some(old) = self.start.replace(i) {
            self.cells[old].state = CellState::Empty;
        }
        self.cells[i].state = CellState::Start;
        true
    }

    /// Make the cell at `p` the finish. Same rules as
    /// [`set_start`](Self::set_start).
    pub fn set_finish(&mut self, p: Point) -> bool {
        let Some(i) = self.claim_empty(p) else {
            return false;
        };
        if let Some(old) = self.finish.replace(i) {
            self.cells[old].state = CellState::Empty;
        }
        self.cells[i].state = CellState::Finish;
        true
    }

    fn claim_empty(&self, p: Point) -> Option<usize> {
        let i = self.index(p)?;
        (self.cells[i].state == CellState::Empty).then_some(i)
    }

    /// Set a cell to [`CellState::Wall`] or [`CellState::Empty`].
    ///
    /// `Start` and `Finish` requests are forwarded to
    /// [`set_start`](Self::set_start) / [`set_finish`](Self::set_finish).
    /// The start and finish cells themselves cannot be overwritten here.
    /// Returns whether the request was accepted.
    pub fn set_cell_state(&mut self, p: Point, state: CellState) -> bool {
        match state {
            CellState::Start => return self.set_start(p),
            CellState::Finish => return self.set_finish(p),
            CellState::Empty | CellState::Wall => {}
        }
        let Some(i) = self.index(p) else {
            return false;
        };
        match self.cells[i].state {
            CellState::Empty | CellState::Wall => {
                self.cells[i].state = state;
                true
            }
            CellState::Start | CellState::Finish => false,
        }
    }

    /// Flip an empty cell to a wall or a wall back to empty.
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        let next = match self.cell(p).map(|c| c.state) {
            Some(CellState::Empty) => CellState::Wall,
            Some(CellState::Wall) => CellState::Empty,
            _ => return false,
        };
        self.set_cell_state(p, next)
    }

    // -----------------------------------------------------------------------
    // Search support
    // -----------------------------------------------------------------------

    /// Collect the unvisited, non-wall orthogonal neighbors of the cell at
    /// `idx` into `buf`, in [`Direction::ALL`] order.
    ///
    /// Neighbors that are not queued yet are discovered here: their parent
    /// becomes `idx` and the edge direction is recorded. Queued neighbors
    /// are returned untouched so the algorithm can relax them. A wall yields
    /// nothing.
    pub(crate) fn neighbors(&mut self, idx: usize, buf: &mut Vec<Neighbor>) {
        buf.clear();
        if !self.cells[idx].state.is_passable() {
            return;
        }
        let p = self.cells[idx].pos();
        for dir in Direction::ALL {
            let Some(ni) = self.index(dir.step(p)) else {
                continue;
            };
            let n = &mut self.cells[ni];
            if !n.state.is_passable() || n.visited {
                continue;
            }
            let fresh = !n.in_frontier;
            if fresh {
                n.parent = Some(idx);
                n.discovered_from = Some(dir);
            }
            buf.push(Neighbor { idx: ni, dir, fresh });
        }
    }

    /// Reset every cell's search fields, keeping walls and endpoints.
    pub fn clear_search(&mut self) {
        for c in self.cells.iter_mut() {
            c.clear_search();
        }
    }

    /// Clear the `in_path` mark on every cell.
    pub fn clear_path(&mut self) {
        for c in self.cells.iter_mut() {
            c.in_path = false;
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn cell_snapshot_round_trip() {
        let mut g = Grid::from_layout("S.F").unwrap();
        let mut buf = Vec::new();
        g.neighbors(0, &mut buf);
        let cell = g.cell_at(1).clone();
        let json = serde_json::to_string(&cell).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
        assert_eq!(back.parent, Some(0));
        assert_eq!(back.discovered_from, Some(Direction::East));
    }
}
