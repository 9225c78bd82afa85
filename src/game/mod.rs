//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The host drives it with a clock and feeds it direction requests.

pub mod board;
pub mod collision;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod observer;
pub mod random;
pub mod state;

// Re-export commonly used types
pub use board::{Board, CellValue};
pub use collision::{Collision, CollisionKind, CollisionResolver, Move, Resolution};
pub use config::{CollisionPolicy, GameConfig, MAX_PLAYERS, ModeConfig, PlayerCount};
pub use direction::Direction;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use food::FoodSpawner;
pub use observer::{ScoreReporter, TickObserver};
pub use random::RandomSource;
pub use state::{EngineState, Phase, Position, ScoreEntry, Snake, SnakeId};
