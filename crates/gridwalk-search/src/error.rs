//! Errors reported by the search engine.

use std::fmt;

use gridwalk_core::Point;

use crate::engine::SearchState;

/// Errors that can occur while configuring or driving a search.
///
/// Running out of frontier is not an error; it ends the run in
/// [`SearchState::Failed`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The algorithm name did not match any known variant.
    UnknownAlgorithm(String),
    /// Width and height must both be positive.
    InvalidSize { width: i32, height: i32 },
    /// Wall density must lie in `[0, 1]`.
    InvalidWallDensity(f64),
    /// Layout lines have inconsistent widths.
    InconsistentLayout(String),
    /// A layout character other than `.`, `#`, `S` or `F`.
    InvalidLayoutChar { ch: char, pos: Point },
    /// `step()` was called outside [`SearchState::Running`].
    NotRunning(SearchState),
    /// `start()` was called outside [`SearchState::Idle`].
    NotIdle(SearchState),
    /// `start()` needs a start cell.
    MissingStart,
    /// `start()` needs a finish cell.
    MissingFinish,
}

impl SearchError {
    /// Whether the error comes from calling an operation in the wrong
    /// engine state, as opposed to a configuration problem.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::NotRunning(_) | Self::NotIdle(_) | Self::MissingStart | Self::MissingFinish
        )
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAlgorithm(name) => write!(f, "unknown search algorithm \u{201c}{name}\u{201d}"),
            Self::InvalidSize { width, height } => {
                write!(f, "invalid grid size {width}x{height}: both sides must be positive")
            }
            Self::InvalidWallDensity(d) => write!(f, "wall density {d} is outside [0, 1]"),
            Self::InconsistentLayout(s) => write!(f, "layout: inconsistent line width:\n{s}"),
            Self::InvalidLayoutChar { ch, pos } => {
                write!(f, "layout contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::NotRunning(state) => write!(f, "cannot step a search that is {state}"),
            Self::NotIdle(state) => write!(f, "cannot start a search that is {state}"),
            Self::MissingStart => write!(f, "no start cell has been placed"),
            Self::MissingFinish => write!(f, "no finish cell has been placed"),
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_and_config_errors_are_distinct() {
        assert!(SearchError::NotRunning(SearchState::Idle).is_usage());
        assert!(SearchError::MissingFinish.is_usage());
        assert!(!SearchError::UnknownAlgorithm("x".into()).is_usage());
        assert!(!SearchError::InvalidWallDensity(2.0).is_usage());
    }

    #[test]
    fn messages_name_the_problem() {
        let e = SearchError::NotRunning(SearchState::Succeeded);
        assert_eq!(e.to_string(), "cannot step a search that is succeeded");
        let e = SearchError::UnknownAlgorithm("bogo".into());
        assert!(e.to_string().contains("bogo"));
    }
}
