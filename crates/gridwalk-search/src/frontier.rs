//! The [`Frontier`] — cells discovered but not yet expanded.

use std::collections::VecDeque;

use crate::cell::Cell;
use crate::grid::Grid;

/// Which score a min-selecting frontier compares.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Score {
    G,
    H,
    F,
}

impl Score {
    #[inline]
    fn of(self, cell: &Cell) -> f64 {
        match self {
            Score::G => f64::from(cell.g),
            Score::H => cell.h,
            Score::F => cell.f,
        }
    }
}

/// Order in which the frontier hands out cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PopPolicy {
    /// Earliest inserted first.
    Fifo,
    /// Latest inserted first.
    Lifo,
    /// Lowest score first; ties go to the earliest inserted.
    Min(Score),
}

/// Pending cell indices in insertion order.
///
/// Membership lives in each cell's `in_frontier` flag, which keeps pushes
/// idempotent without scanning the queue.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: VecDeque<usize>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued indices, earliest first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }

    /// Queue the cell at `idx` unless it is already queued, visited or a
    /// wall.
    ///
    /// Returns whether the cell was added.
    pub(crate) fn push(&mut self, grid: &mut Grid, idx: usize) -> bool {
        let cell = grid.cell_at_mut(idx);
        if cell.in_frontier || cell.visited || !cell.state.is_passable() {
            return false;
        }
        cell.in_frontier = true;
        self.queue.push_back(idx);
        log::trace!("frontier += {} ({} queued)", cell.pos(), self.queue.len());
        true
    }

    /// Remove and return the next cell according to `policy`.
    pub(crate) fn pop(&mut self, grid: &mut Grid, policy: PopPolicy) -> Option<usize> {
        let idx = match policy {
            PopPolicy::Fifo => self.queue.pop_front()?,
            PopPolicy::Lifo => self.queue.pop_back()?,
            PopPolicy::Min(score) => {
                let pos = self.position_of_min(grid, score)?;
                self.queue.remove(pos)?
            }
        };
        grid.cell_at_mut(idx).in_frontier = false;
        Some(idx)
    }

    /// Queue position of the lowest-scoring cell, first one on ties.
    fn position_of_min(&self, grid: &Grid, score: Score) -> Option<usize> {
        let mut winner: Option<(usize, f64)> = None;
        for (pos, &idx) in self.queue.iter().enumerate() {
            let s = score.of(grid.cell_at(idx));
            match winner {
                Some((_, best)) if s >= best => {}
                _ => winner = Some((pos, s)),
            }
        }
        winner.map(|(pos, _)| pos)
    }

    /// Drop every queued cell, clearing their membership flags.
    pub(crate) fn clear(&mut self, grid: &mut Grid) {
        for idx in self.queue.drain(..) {
            grid.cell_at_mut(idx).in_frontier = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(grid: &mut Grid, items: &[usize]) -> Frontier {
        let mut f = Frontier::new();
        for &i in items {
            f.push(grid, i);
        }
        f
    }

    #[test]
    fn fifo_and_lifo() {
        let mut g = Grid::new(4, 1);
        let mut f = filled(&mut g, &[2, 0, 3]);
        assert_eq!(f.pop(&mut g, PopPolicy::Fifo), Some(2));
        assert_eq!(f.pop(&mut g, PopPolicy::Lifo), Some(3));
        assert_eq!(f.pop(&mut g, PopPolicy::Fifo), Some(0));
        assert_eq!(f.pop(&mut g, PopPolicy::Fifo), None);
        assert!(g.iter().all(|c| !c.in_frontier));
    }

    #[test]
    fn push_is_idempotent() {
        let mut g = Grid::new(3, 1);
        let mut f = Frontier::new();
        assert!(f.push(&mut g, 1));
        assert!(!f.push(&mut g, 1));
        assert_eq!(f.len(), 1);
        assert!(g.cell_at(1).in_frontier);
        f.pop(&mut g, PopPolicy::Lifo);
        assert!(!g.cell_at(1).in_frontier);
        assert!(f.push(&mut g, 1));
    }

    #[test]
    fn walls_and_visited_cells_are_refused() {
        let mut g = Grid::from_layout("#..").unwrap();
        g.cell_at_mut(1).visited = true;
        let mut f = Frontier::new();
        assert!(!f.push(&mut g, 0));
        assert!(!f.push(&mut g, 1));
        assert!(f.push(&mut g, 2));
        assert_eq!(f.iter().collect::<Vec<_>>(), vec![2]);
        assert!(!g.cell_at(0).in_frontier);
    }

    #[test]
    fn min_selection_breaks_ties_by_insertion() {
        let mut g = Grid::new(5, 1);
        for (i, g_score) in [(0, 3), (1, 1), (2, 2), (3, 1), (4, 5)] {
            g.cell_at_mut(i).g = g_score;
        }
        let mut f = filled(&mut g, &[0, 3, 1, 2, 4]);
        let order: Vec<usize> = std::iter::from_fn(|| f.pop(&mut g, PopPolicy::Min(Score::G))).collect();
        assert_eq!(order, vec![3, 1, 2, 0, 4]);
    }

    #[test]
    fn min_by_heuristic_and_total() {
        let mut g = Grid::new(3, 1);
        g.cell_at_mut(0).h = 2.5;
        g.cell_at_mut(1).h = 0.5;
        g.cell_at_mut(2).h = 1.0;
        g.cell_at_mut(0).f = 0.1;
        let mut f = filled(&mut g, &[0, 1, 2]);
        assert_eq!(f.pop(&mut g, PopPolicy::Min(Score::H)), Some(1));
        assert_eq!(f.pop(&mut g, PopPolicy::Min(Score::F)), Some(2));
    }

    #[test]
    fn clear_resets_membership() {
        let mut g = Grid::new(3, 1);
        let mut f = filled(&mut g, &[0, 2]);
        f.clear(&mut g);
        assert!(f.is_empty());
        assert!(g.iter().all(|c| !c.in_frontier));
    }
}
