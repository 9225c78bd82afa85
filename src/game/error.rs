use thiserror::Error;

use super::state::Phase;

/// Errors returned by [`crate::game::Engine`] operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cannot {operation} while the engine is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },

    #[error("player {index} does not exist in a {players}-player session")]
    UnknownPlayer { index: usize, players: usize },

    #[error("no free cell left to place a snake")]
    BoardFull,
}

pub type EngineResult<T> = Result<T, EngineError>;
