//! Step-by-step pathfinding on a fixed 2-D grid.
//!
//! This crate is the engine behind a pathfinding visualizer. A search is
//! advanced one discrete step at a time so that every intermediate state can
//! be shown:
//!
//! - **Breadth-first** and **depth-first** search
//! - **Dijkstra** (unit edge costs)
//! - **Greedy best-first** search on a Euclidean heuristic
//! - **A\*** with the same, admissible, heuristic
//!
//! All five share one stepping protocol and one cell model; they differ only
//! in how the [`Frontier`] hands out cells and how neighbors are relaxed.
//!
//! ```
//! use gridwalk_core::Point;
//! use gridwalk_search::{Algorithm, Engine, EngineConfig, SearchState};
//!
//! let mut engine = Engine::new(EngineConfig::open(5, 5).with_algorithm(Algorithm::AStar)).unwrap();
//! engine.set_start(Point::new(0, 0));
//! engine.set_finish(Point::new(4, 4));
//! engine.start().unwrap();
//! while engine.state() == SearchState::Running {
//!     let step = engine.step().unwrap();
//!     if let Some(p) = step.popped {
//!         engine.trace(p);
//!     }
//! }
//! assert_eq!(engine.path_len(), Some(8));
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |---|---|
//! | [`cell`] | [`Cell`], [`CellState`] |
//! | [`grid`] | [`Grid`], neighbor discovery, editing |
//! | [`frontier`] | [`Frontier`] and its [`PopPolicy`] |
//! | [`algorithm`] | [`Algorithm`] — the five variants |
//! | [`engine`] | [`Engine`] state machine |
//! | [`trace`] | path marking |
//! | [`mapgen`] | random walls and endpoints |

pub mod algorithm;
pub mod cell;
pub mod config;
pub mod distance;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod mapgen;
pub mod trace;

pub use algorithm::Algorithm;
pub use cell::{Cell, CellState};
pub use config::{EngineConfig, ParentUpdate};
pub use distance::{euclidean, manhattan};
pub use engine::{Engine, Outcome, SearchState, StepResult};
pub use error::SearchError;
pub use frontier::{Frontier, PopPolicy, Score};
pub use grid::Grid;
pub use trace::{PathTracer, trace};
