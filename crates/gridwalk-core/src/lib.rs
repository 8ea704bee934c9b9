//! **gridwalk-core** — geometry primitives shared by the *gridwalk* crates.
//!
//! Provides integer grid positions, half-open rectangles with row-major
//! iteration, and the four orthogonal movement directions.

pub mod direction;
pub mod geom;

pub use direction::Direction;
pub use geom::{Point, Range, RangeIter};
