//! Engine configuration.

use crate::algorithm::Algorithm;
use crate::error::SearchError;

/// How the parent of a cell that is already queued reacts when another
/// expanded cell reaches it again.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParentUpdate {
    /// Re-point the parent only when the cell's `g` is lowered, in the same
    /// update. The traced path then always agrees with `g`.
    #[default]
    OnImprovement,
    /// Re-point the parent on every rediscovery, whether or not `g`
    /// improved. The trace may disagree with `g`.
    OnRediscovery,
}

/// Settings for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub width: i32,
    pub height: i32,
    /// Probability that a fresh cell starts as a wall (0.0–1.0).
    pub wall_density: f64,
    /// Algorithm selected for the next `start()`.
    pub algorithm: Algorithm,
    pub parent_update: ParentUpdate,
    /// Fixed RNG seed for reproducible wall layouts. `None` draws one.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            wall_density: 0.2,
            algorithm: Algorithm::AStar,
            parent_update: ParentUpdate::OnImprovement,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Config for an open `width` × `height` grid with no random walls.
    pub fn open(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            wall_density: 0.0,
            ..Self::default()
        }
    }

    /// Set the algorithm (builder).
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the parent update policy (builder).
    pub fn with_parent_update(mut self, parent_update: ParentUpdate) -> Self {
        self.parent_update = parent_update;
        self
    }

    /// Set the RNG seed (builder).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check grid size and wall density.
    pub fn validate(&self) -> Result<(), SearchError> {
        check_dimensions(self.width, self.height, self.wall_density)
    }
}

pub(crate) fn check_dimensions(width: i32, height: i32, wall_density: f64) -> Result<(), SearchError> {
    if width <= 0 || height <= 0 {
        return Err(SearchError::InvalidSize { width, height });
    }
    if !(0.0..=1.0).contains(&wall_density) {
        return Err(SearchError::InvalidWallDensity(wall_density));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.algorithm, Algorithm::AStar);
        assert_eq!(cfg.parent_update, ParentUpdate::OnImprovement);
    }

    #[test]
    fn rejects_bad_size_and_density() {
        assert_eq!(
            EngineConfig::open(0, 4).validate(),
            Err(SearchError::InvalidSize { width: 0, height: 4 })
        );
        let cfg = EngineConfig {
            wall_density: 1.5,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(SearchError::InvalidWallDensity(1.5)));
        let cfg = EngineConfig {
            wall_density: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
