//! The [`Engine`] — one search run, advanced one step at a time.
//!
//! ```text
//!   Idle ──start()──▶ Running ──step()──▶ Succeeded
//!    ▲                  │  ▲    │
//!    │                  └──┘    └──────▶ Failed
//!    └──── reset() / restart() from any state
//! ```
//!
//! The engine never drives itself: callers invoke [`step`](Engine::step) as
//! often as they like (for example once per rendered frame) and usually
//! [`trace`](Engine::trace) the popped cell after each step to show its
//! current ancestry.

use std::fmt;

use gridwalk_core::{Direction, Point};
use rand::SeedableRng;
use rand::distr::Bernoulli;
use rand::rngs::StdRng;

use crate::algorithm::Algorithm;
use crate::cell::CellState;
use crate::config::{EngineConfig, check_dimensions};
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::grid::{Grid, Neighbor};
use crate::mapgen;
use crate::trace::PathTracer;

/// Lifecycle of a search run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// Editable; waiting for `start()`.
    #[default]
    Idle,
    Running,
    /// The finish was popped. Terminal until reset.
    Succeeded,
    /// The frontier ran dry first. Terminal until reset.
    Failed,
}

impl SearchState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Succeeded | SearchState::Failed)
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchState::Idle => "idle",
            SearchState::Running => "running",
            SearchState::Succeeded => "succeeded",
            SearchState::Failed => "failed",
        })
    }
}

/// What a single [`Engine::step`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepResult {
    /// The expanded cell, or `None` if the frontier was already empty.
    pub popped: Option<Point>,
    /// Edge through which the popped cell was discovered.
    pub direction: Option<Direction>,
    /// The run failed: nothing is left to expand and the finish was not
    /// reached.
    pub frontier_exhausted: bool,
    /// The popped cell is the finish.
    pub goal_reached: bool,
}

/// Summary of a completed [`Engine::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub algorithm: Algorithm,
    /// Steps taken since `start()`.
    pub steps: usize,
    /// Edges from start to finish, if the finish was reached.
    pub path_len: Option<usize>,
}

/// Owns the grid, the frontier and the active algorithm of one run.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    walls: Bernoulli,
    rng: StdRng,
    grid: Grid,
    frontier: Frontier,
    selected: Algorithm,
    active: Algorithm,
    state: SearchState,
    tracer: PathTracer,
    nbuf: Vec<Neighbor>,
    steps: usize,
    last_popped: Option<usize>,
}

impl Engine {
    /// Create an engine and build its first grid from `config`.
    pub fn new(config: EngineConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let walls = wall_coin(config.wall_density)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = fresh_grid(&config, &walls, &mut rng);
        log::debug!(
            "engine: {}x{} grid, {} walls, seed {seed}",
            config.width,
            config.height,
            grid.wall_count()
        );
        Ok(Self {
            selected: config.algorithm,
            active: config.algorithm,
            config,
            walls,
            rng,
            grid,
            frontier: Frontier::new(),
            state: SearchState::Idle,
            tracer: PathTracer::new(),
            nbuf: Vec::with_capacity(4),
            steps: 0,
            last_popped: None,
        })
    }

    /// Create an engine around an existing grid. The config's size is taken
    /// from the grid; its wall density only applies to later resets.
    pub fn with_grid(grid: Grid, config: EngineConfig) -> Result<Self, SearchError> {
        let config = EngineConfig {
            width: grid.width(),
            height: grid.height(),
            ..config
        };
        let mut engine = Self::new(EngineConfig {
            wall_density: 0.0,
            ..config.clone()
        })?;
        engine.walls = wall_coin(config.wall_density)?;
        engine.config = config;
        engine.grid = grid;
        engine.grid.clear_search();
        Ok(engine)
    }

    /// Replace the grid with a fresh `width` × `height` one, scattering
    /// walls at `wall_density`. Any run in progress is discarded.
    pub fn initialize(
        &mut self,
        width: i32,
        height: i32,
        wall_density: f64,
    ) -> Result<&Grid, SearchError> {
        check_dimensions(width, height, wall_density)?;
        self.walls = wall_coin(wall_density)?;
        self.config.width = width;
        self.config.height = height;
        self.config.wall_density = wall_density;
        self.reset();
        Ok(&self.grid)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The algorithm the next `start()` will use.
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.selected
    }

    /// The algorithm of the current (or last) run.
    #[inline]
    pub fn active_algorithm(&self) -> Algorithm {
        self.active
    }

    #[inline]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Steps taken since `start()`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Position of the most recently popped cell.
    pub fn last_popped(&self) -> Option<Point> {
        self.last_popped.map(|i| self.grid.point(i))
    }

    // -----------------------------------------------------------------------
    // Editing (Idle only)
    // -----------------------------------------------------------------------

    /// Place the start. Ignored unless idle and the target cell is empty.
    pub fn set_start(&mut self, p: Point) -> bool {
        self.edit(p, |g| g.set_start(p))
    }

    /// Place the finish. Ignored unless idle and the target cell is empty.
    pub fn set_finish(&mut self, p: Point) -> bool {
        self.edit(p, |g| g.set_finish(p))
    }

    /// See [`Grid::set_cell_state`]. Ignored unless idle.
    pub fn set_cell_state(&mut self, p: Point, state: CellState) -> bool {
        self.edit(p, |g| g.set_cell_state(p, state))
    }

    /// See [`Grid::toggle_wall`]. Ignored unless idle.
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        self.edit(p, |g| g.toggle_wall(p))
    }

    fn edit(&mut self, p: Point, f: impl FnOnce(&mut Grid) -> bool) -> bool {
        if self.state != SearchState::Idle {
            log::debug!("edit at {p} ignored: search is {}", self.state);
            return false;
        }
        let accepted = f(&mut self.grid);
        if !accepted {
            log::debug!("edit at {p} rejected");
        }
        accepted
    }

    /// Move start and finish to two random empty cells. Ignored unless idle.
    pub fn place_random_endpoints(&mut self) -> bool {
        if self.state != SearchState::Idle {
            return false;
        }
        mapgen::place_random_endpoints(&mut self.grid, &mut self.rng)
    }

    // -----------------------------------------------------------------------
    // Algorithm selection
    // -----------------------------------------------------------------------

    /// Select an algorithm by name for the next `start()`.
    pub fn select_algorithm(&mut self, name: &str) -> Result<Algorithm, SearchError> {
        let algo: Algorithm = name.parse()?;
        self.set_algorithm(algo);
        Ok(algo)
    }

    /// Select `algorithm` for the next `start()`. A running search keeps the
    /// algorithm it started with.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.selected = algorithm;
        self.config.algorithm = algorithm;
    }

    /// Select the next algorithm in rotation and return it.
    pub fn cycle_algorithm(&mut self) -> Algorithm {
        let next = self.selected.next();
        self.set_algorithm(next);
        next
    }

    // -----------------------------------------------------------------------
    // Running
    // -----------------------------------------------------------------------

    /// Begin a run: mark the start visited and expand it.
    pub fn start(&mut self) -> Result<(), SearchError> {
        if self.state != SearchState::Idle {
            return Err(SearchError::NotIdle(self.state));
        }
        let start = self.grid.start().ok_or(SearchError::MissingStart)?;
        let finish = self.grid.finish().ok_or(SearchError::MissingFinish)?;

        self.active = self.selected;
        self.steps = 0;
        self.last_popped = None;
        self.grid.cell_at_mut(start).visited = true;
        self.expand(start, finish);
        self.state = SearchState::Running;
        log::info!(
            "{}: searching {} -> {}",
            self.active,
            self.grid.point(start),
            self.grid.point(finish)
        );
        Ok(())
    }

    /// Pop and expand one cell.
    ///
    /// Fails with [`SearchError::NotRunning`] unless the engine is
    /// [`Running`](SearchState::Running).
    pub fn step(&mut self) -> Result<StepResult, SearchError> {
        if self.state != SearchState::Running {
            return Err(SearchError::NotRunning(self.state));
        }
        let finish = self.grid.finish().ok_or(SearchError::MissingFinish)?;

        let Some(idx) = self.frontier.pop(&mut self.grid, self.active.policy()) else {
            self.fail();
            return Ok(StepResult {
                frontier_exhausted: true,
                ..StepResult::default()
            });
        };

        self.steps += 1;
        if !self.grid.cell_at(idx).visited {
            self.expand(idx, finish);
        }
        let cell = self.grid.cell_at_mut(idx);
        cell.visited = true;
        let (pos, direction) = (cell.pos(), cell.discovered_from);
        self.last_popped = Some(idx);
        log::debug!("{} step {}: {pos}", self.active, self.steps);

        let goal_reached = idx == finish;
        let frontier_exhausted = !goal_reached && self.frontier.is_empty();
        if goal_reached {
            self.state = SearchState::Succeeded;
            log::info!("{}: found the finish at {pos} after {} steps", self.active, self.steps);
        } else if frontier_exhausted {
            self.fail();
        }

        Ok(StepResult {
            popped: Some(pos),
            direction,
            frontier_exhausted,
            goal_reached,
        })
    }

    fn expand(&mut self, idx: usize, finish: usize) {
        let goal = self.grid.point(finish);
        self.active.expand(
            &mut self.grid,
            &mut self.frontier,
            idx,
            goal,
            self.config.parent_update,
            &mut self.nbuf,
        );
    }

    /// No path exists, so nothing stays marked.
    fn fail(&mut self) {
        self.state = SearchState::Failed;
        self.tracer.forget();
        self.grid.clear_path();
        log::info!("{}: frontier exhausted after {} steps, finish unreachable", self.active, self.steps);
    }

    /// Mark the ancestry of the cell at `p` as the current path, clearing
    /// the previous one. Returns the number of cells marked.
    ///
    /// Marks nothing if `p` is out of bounds or the run has failed.
    pub fn trace(&mut self, p: Point) -> usize {
        if self.state == SearchState::Failed {
            return 0;
        }
        match self.grid.index(p) {
            Some(i) => self.tracer.trace(&mut self.grid, i),
            None => 0,
        }
    }

    /// Drive the run to a terminal state, tracing after every step.
    ///
    /// Starts the search first if the engine is idle.
    pub fn run(&mut self) -> Result<Outcome, SearchError> {
        if self.state == SearchState::Idle {
            self.start()?;
        }
        while self.state == SearchState::Running {
            let r = self.step()?;
            if let Some(p) = r.popped {
                self.trace(p);
            }
        }
        Ok(Outcome {
            algorithm: self.active,
            steps: self.steps,
            path_len: self.path_len(),
        })
    }

    /// Start-to-finish path of a successful run, start first.
    pub fn path(&self) -> Option<Vec<Point>> {
        if self.state != SearchState::Succeeded {
            return None;
        }
        let mut path = Vec::new();
        let mut cur = self.grid.finish();
        while let Some(i) = cur {
            path.push(self.grid.point(i));
            cur = self.grid.cell_at(i).parent;
        }
        path.reverse();
        Some(path)
    }

    /// Number of edges on the path of a successful run.
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(|p| p.len() - 1)
    }

    // -----------------------------------------------------------------------
    // Resetting
    // -----------------------------------------------------------------------

    /// Throw the grid away and build a fresh one of the same size with newly
    /// scattered walls and no endpoints.
    pub fn reset(&mut self) {
        self.grid = fresh_grid(&self.config, &self.walls, &mut self.rng);
        self.frontier = Frontier::new();
        self.clear_run();
        log::info!(
            "reset: {}x{} grid with {} walls",
            self.grid.width(),
            self.grid.height(),
            self.grid.wall_count()
        );
    }

    /// Keep walls and endpoints but forget all search progress, so the same
    /// layout can be searched again.
    pub fn restart(&mut self) {
        self.frontier.clear(&mut self.grid);
        self.grid.clear_search();
        self.clear_run();
    }

    fn clear_run(&mut self) {
        self.tracer.forget();
        self.state = SearchState::Idle;
        self.steps = 0;
        self.last_popped = None;
    }
}

fn wall_coin(density: f64) -> Result<Bernoulli, SearchError> {
    Bernoulli::new(density).map_err(|_| SearchError::InvalidWallDensity(density))
}

fn fresh_grid(config: &EngineConfig, walls: &Bernoulli, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(config.width, config.height);
    mapgen::scatter_walls_with(&mut grid, walls, rng);
    grid
}
