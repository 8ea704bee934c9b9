//! The five search strategies.
//!
//! Every [`Algorithm`] shares one stepping protocol: the engine pops a cell
//! using the variant's [`PopPolicy`], then expands it,
//! letting the variant decide per neighbor whether to queue it and which
//! scores to write.
//!
//! | Variant | Pops | Relaxation |
//! |---|---|---|
//! | [`BreadthFirst`](Algorithm::BreadthFirst) | FIFO | queue each new cell once |
//! | [`DepthFirst`](Algorithm::DepthFirst) | LIFO | queue each new cell once |
//! | [`Dijkstra`](Algorithm::Dijkstra) | min `g` | lower `g` of queued cells |
//! | [`GreedyBestFirst`](Algorithm::GreedyBestFirst) | min `h` | `h` set once on discovery |
//! | [`AStar`](Algorithm::AStar) | min `f` | lower `g`, recompute `f` |

use std::fmt;
use std::str::FromStr;

use gridwalk_core::{Direction, Point};

use crate::cell::Cell;
use crate::config::ParentUpdate;
use crate::distance::euclidean;
use crate::error::SearchError;
use crate::frontier::{Frontier, PopPolicy, Score};
use crate::grid::{Grid, Neighbor};

/// A search strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    BreadthFirst,
    DepthFirst,
    Dijkstra,
    AStar,
    GreedyBestFirst,
}

impl Algorithm {
    /// Every variant, in rotation order (see [`next`](Self::next)).
    pub const ALL: [Algorithm; 5] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::GreedyBestFirst,
        Algorithm::DepthFirst,
        Algorithm::BreadthFirst,
    ];

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "Breadth First Search",
            Algorithm::DepthFirst => "Depth First Search",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A Star",
            Algorithm::GreedyBestFirst => "Greedy Best First Search",
        }
    }

    /// The variant after this one in [`ALL`](Self::ALL), wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// How this variant picks the next cell from the frontier.
    pub const fn policy(self) -> PopPolicy {
        match self {
            Algorithm::BreadthFirst => PopPolicy::Fifo,
            Algorithm::DepthFirst => PopPolicy::Lifo,
            Algorithm::Dijkstra => PopPolicy::Min(Score::G),
            Algorithm::AStar => PopPolicy::Min(Score::F),
            Algorithm::GreedyBestFirst => PopPolicy::Min(Score::H),
        }
    }

    /// Expand the cell at `idx`: discover its open neighbors and relax each
    /// one into `frontier`. `buf` is scratch space.
    ///
    /// Returns the number of cells newly queued.
    pub(crate) fn expand(
        self,
        grid: &mut Grid,
        frontier: &mut Frontier,
        idx: usize,
        goal: Point,
        update: ParentUpdate,
        buf: &mut Vec<Neighbor>,
    ) -> usize {
        grid.neighbors(idx, buf);
        let mut queued = 0;
        for &n in buf.iter() {
            if self.relax(grid, frontier, idx, n, goal, update) {
                queued += 1;
            }
        }
        queued
    }

    /// Apply this variant's relaxation rule to neighbor `n` of `from`.
    ///
    /// Fresh neighbors get their scores and are queued. Queued neighbors
    /// may have `g` lowered (Dijkstra, A*). Returns whether `n` was queued.
    pub(crate) fn relax(
        self,
        grid: &mut Grid,
        frontier: &mut Frontier,
        from: usize,
        n: Neighbor,
        goal: Point,
        update: ParentUpdate,
    ) -> bool {
        let tentative = grid.cell_at(from).g + 1;
        let cell = grid.cell_at_mut(n.idx);

        if n.fresh {
            match self {
                Algorithm::BreadthFirst | Algorithm::DepthFirst => {}
                Algorithm::GreedyBestFirst => cell.h = euclidean(cell.pos(), goal),
                Algorithm::Dijkstra => cell.g = tentative,
                Algorithm::AStar => {
                    cell.g = tentative;
                    cell.h = euclidean(cell.pos(), goal);
                    cell.f = f64::from(cell.g) + cell.h;
                }
            }
            return frontier.push(grid, n.idx);
        }

        let improved = match self {
            Algorithm::Dijkstra if tentative < cell.g => {
                cell.g = tentative;
                true
            }
            Algorithm::AStar if tentative < cell.g => {
                cell.g = tentative;
                cell.f = f64::from(tentative) + cell.h;
                true
            }
            _ => false,
        };
        let repoint = match update {
            ParentUpdate::OnImprovement => improved,
            ParentUpdate::OnRediscovery => true,
        };
        if repoint {
            set_parent(cell, from, n.dir);
        }
        false
    }
}

fn set_parent(cell: &mut Cell, parent: usize, dir: Direction) {
    cell.parent = Some(parent);
    cell.discovered_from = Some(dir);
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    /// Case-insensitive; spaces, `-` and `_` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let algo = match key.as_str() {
            "bfs" | "breadthfirst" | "breadthfirstsearch" => Algorithm::BreadthFirst,
            "dfs" | "depthfirst" | "depthfirstsearch" => Algorithm::DepthFirst,
            "dijkstra" | "djikstra" => Algorithm::Dijkstra,
            "astar" | "a*" => Algorithm::AStar,
            "greedy" | "greedysearch" | "greedybestfirst" | "greedybestfirstsearch" | "gbfs"
            | "bestfirst" => Algorithm::GreedyBestFirst,
            _ => return Err(SearchError::UnknownAlgorithm(s.to_string())),
        };
        Ok(algo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(algo: Algorithm, grid: &mut Grid, from: usize, goal: Point) -> (Frontier, Vec<Neighbor>) {
        let mut frontier = Frontier::new();
        let mut buf = Vec::new();
        grid.cell_at_mut(from).visited = true;
        algo.expand(grid, &mut frontier, from, goal, ParentUpdate::OnImprovement, &mut buf);
        (frontier, buf)
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::BreadthFirst));
        assert_eq!("depth-first".parse::<Algorithm>(), Ok(Algorithm::DepthFirst));
        assert_eq!("Djikstra".parse::<Algorithm>(), Ok(Algorithm::Dijkstra));
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("Greedy Best First Search".parse::<Algorithm>(), Ok(Algorithm::GreedyBestFirst));
        assert_eq!(
            "bogo".parse::<Algorithm>(),
            Err(SearchError::UnknownAlgorithm("bogo".into()))
        );
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>(), Ok(algo));
            assert_eq!(format!("{algo:?}").parse::<Algorithm>(), Ok(algo));
        }
    }

    #[test]
    fn rotation_visits_every_variant() {
        let mut a = Algorithm::AStar;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(a);
            a = a.next();
        }
        assert_eq!(a, Algorithm::AStar);
        assert_eq!(seen, Algorithm::ALL.to_vec());
    }

    #[test]
    fn dijkstra_scores_new_cells() {
        let mut g = Grid::new(3, 3);
        let centre = g.index(Point::new(1, 1)).unwrap();
        let (frontier, _) = seeded(Algorithm::Dijkstra, &mut g, centre, Point::new(2, 2));
        assert_eq!(frontier.len(), 4);
        for i in frontier.iter() {
            assert_eq!(g.cell_at(i).g, 1);
            assert_eq!(g.cell_at(i).h, 0.0);
            assert_eq!(g.cell_at(i).parent, Some(centre));
        }
    }

    #[test]
    fn astar_scores_new_cells() {
        let mut g = Grid::new(3, 1);
        let (frontier, _) = seeded(Algorithm::AStar, &mut g, 0, Point::new(2, 0));
        let queued: Vec<usize> = frontier.iter().collect();
        assert_eq!(queued, vec![1]);
        let c = g.cell_at(1);
        assert_eq!(c.g, 1);
        assert_eq!(c.h, 1.0);
        assert_eq!(c.f, 2.0);
    }

    #[test]
    fn greedy_tracks_only_heuristic() {
        let mut g = Grid::new(3, 1);
        let (_, _) = seeded(Algorithm::GreedyBestFirst, &mut g, 0, Point::new(2, 0));
        let c = g.cell_at(1);
        assert_eq!(c.g, 0);
        assert_eq!(c.h, 1.0);
        assert_eq!(c.f, 0.0);
    }

    #[test]
    fn blind_variants_leave_scores_alone() {
        for algo in [Algorithm::BreadthFirst, Algorithm::DepthFirst] {
            let mut g = Grid::new(3, 1);
            let (frontier, _) = seeded(algo, &mut g, 0, Point::new(2, 0));
            assert_eq!(frontier.len(), 1);
            let c = g.cell_at(1);
            assert_eq!((c.g, c.h, c.f), (0, 0.0, 0.0));
        }
    }

    #[test]
    fn improvement_lowers_g_and_repoints_parent() {
        // Row of three: cell 2 was reached through a long detour (g = 9),
        // then cell 1 (g = 1) finds it again.
        let mut g = Grid::new(3, 1);
        let mut frontier = Frontier::new();
        g.cell_at_mut(0).visited = true;
        g.cell_at_mut(2).g = 9;
        g.cell_at_mut(2).h = 0.0;
        g.cell_at_mut(2).f = 9.0;
        g.cell_at_mut(2).parent = Some(0);
        frontier.push(&mut g, 2);
        g.cell_at_mut(1).g = 1;

        let n = Neighbor { idx: 2, dir: Direction::East, fresh: false };
        for algo in [Algorithm::Dijkstra, Algorithm::AStar] {
            let mut grid = g.clone();
            let mut f = frontier.clone();
            let queued = algo.relax(&mut grid, &mut f, 1, n, Point::new(2, 0), ParentUpdate::OnImprovement);
            assert!(!queued);
            let c = grid.cell_at(2);
            assert_eq!(c.g, 2);
            assert_eq!(c.parent, Some(1));
            assert_eq!(c.discovered_from, Some(Direction::East));
            if algo == Algorithm::AStar {
                assert_eq!(c.f, 2.0);
            }
        }
    }

    #[test]
    fn parent_policy_on_non_improving_rediscovery() {
        let mut g = Grid::new(3, 1);
        let mut frontier = Frontier::new();
        g.cell_at_mut(2).g = 1;
        g.cell_at_mut(2).parent = Some(0);
        frontier.push(&mut g, 2);
        g.cell_at_mut(1).g = 5;
        let n = Neighbor { idx: 2, dir: Direction::East, fresh: false };

        let mut kept = g.clone();
        Algorithm::Dijkstra.relax(&mut kept, &mut frontier.clone(), 1, n, Point::ZERO, ParentUpdate::OnImprovement);
        assert_eq!(kept.cell_at(2).parent, Some(0));
        assert_eq!(kept.cell_at(2).g, 1);

        let mut moved = g.clone();
        Algorithm::Dijkstra.relax(&mut moved, &mut frontier.clone(), 1, n, Point::ZERO, ParentUpdate::OnRediscovery);
        assert_eq!(moved.cell_at(2).parent, Some(1));
        // g is untouched, so trace and g now disagree.
        assert_eq!(moved.cell_at(2).g, 1);
    }
}
