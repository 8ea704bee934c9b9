//! The [`Cell`] type — one grid location and its search state.

use gridwalk_core::{Direction, Point};

/// What occupies a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Wall,
    Start,
    Finish,
}

impl CellState {
    /// Whether a search may step onto a cell in this state.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, CellState::Wall)
    }
}

/// A grid location with its search bookkeeping.
///
/// Only the scores an algorithm uses are meaningful; the others stay at 0.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    pub state: CellState,
    /// Popped from the frontier and accepted. Never reset during a run.
    pub visited: bool,
    pub in_frontier: bool,
    /// Accumulated unit-cost path length from the start.
    pub g: u32,
    /// Heuristic estimate to the finish.
    pub h: f64,
    /// `g + h`.
    pub f: f64,
    /// Index of the predecessor in the owning grid.
    pub parent: Option<usize>,
    pub in_path: bool,
    /// Edge that led to this cell's discovery.
    pub discovered_from: Option<Direction>,
}

impl Cell {
    /// Create an empty cell at `pos`.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            state: CellState::Empty,
            visited: false,
            in_frontier: false,
            g: 0,
            h: 0.0,
            f: 0.0,
            parent: None,
            in_path: false,
            discovered_from: None,
        }
    }

    /// Grid position (column, row).
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        !self.state.is_passable()
    }

    /// Clear every search field, keeping position and state.
    pub fn clear_search(&mut self) {
        *self = Self {
            state: self.state,
            ..Self::new(self.pos)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_has_default_scores() {
        let c = Cell::new(Point::new(3, 1));
        assert_eq!(c.pos(), Point::new(3, 1));
        assert_eq!(c.state, CellState::Empty);
        assert_eq!(c.g, 0);
        assert_eq!(c.h, 0.0);
        assert_eq!(c.f, 0.0);
        assert!(c.parent.is_none());
        assert!(!c.visited && !c.in_frontier && !c.in_path);
    }

    #[test]
    fn clear_search_keeps_state() {
        let mut c = Cell::new(Point::new(0, 0));
        c.state = CellState::Finish;
        c.visited = true;
        c.g = 4;
        c.parent = Some(7);
        c.discovered_from = Some(Direction::East);
        c.clear_search();
        assert_eq!(c.state, CellState::Finish);
        assert!(!c.visited);
        assert_eq!(c.g, 0);
        assert!(c.parent.is_none());
        assert!(c.discovered_from.is_none());
    }

    #[test]
    fn only_walls_block() {
        assert!(!CellState::Wall.is_passable());
        assert!(CellState::Empty.is_passable());
        assert!(CellState::Start.is_passable());
        assert!(CellState::Finish.is_passable());
    }
}
