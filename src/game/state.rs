use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::direction::Direction;

/// A cell on the wrap-around grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step one cell in `direction`, reappearing on the opposite edge when
    /// crossing a border.
    pub fn wrapped(&self, direction: Direction, grid_size: usize) -> Self {
        let (dr, dc) = direction.delta();
        let size = grid_size as i64;
        Self {
            row: (self.row as i64 + dr as i64).rem_euclid(size) as usize,
            col: (self.col as i64 + dc as i64).rem_euclid(size) as usize,
        }
    }
}

/// Identity of a snake; player index + 1, so player one owns id 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnakeId(pub u8);

impl SnakeId {
    pub fn for_player(index: usize) -> Self {
        Self(index as u8 + 1)
    }

    pub fn player_index(&self) -> usize {
        self.0 as usize - 1
    }

    /// Name used when the final score is handed to the highscore list
    pub fn label(&self) -> String {
        format!("snakePlayer{}", self.0)
    }
}

/// A snake on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    pub id: SnakeId,
    /// Occupied cells, with the head at the front
    pub segments: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
    pub alive: bool,
}

impl Snake {
    /// Create a fresh length-1 snake
    pub fn new(id: SnakeId, head: Position, direction: Direction) -> Self {
        Self {
            id,
            segments: VecDeque::from([head]),
            direction,
            alive: true,
        }
    }

    /// Create a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty segment list.
    pub fn with_segments(
        id: SnakeId,
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Option<Self> {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            id,
            segments,
            direction,
            alive: true,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (only while being respawned)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Food eaten so far: every segment beyond the first
    pub fn score(&self) -> u32 {
        self.segments.len().saturating_sub(1) as u32
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Prepend `new_head`; drop the tail unless the snake grows this tick
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.segments.push_front(new_head);
        if !grow {
            self.segments.pop_back();
        }
    }
}

/// Lifecycle of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Configuring,
    Running,
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Configuring => "configuring",
            Phase::Running => "running",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// One line of a final score report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_label: String,
    pub score: u32,
}

/// Authoritative snapshot published after every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub grid_size: usize,
    pub snakes: Vec<Snake>,
    pub food: Option<Position>,
    pub phase: Phase,
    /// Projection of `snakes` and `food`; rebuilt, never edited
    pub board: Board,
    /// Completed steps in this session
    pub tick: u64,
}

impl EngineState {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            snakes: Vec::new(),
            food: None,
            phase: Phase::Configuring,
            board: Board::empty(grid_size),
            tick: 0,
        }
    }

    /// Current score of every snake, in player order
    pub fn scores(&self) -> Vec<ScoreEntry> {
        self.snakes
            .iter()
            .map(|snake| ScoreEntry {
                player_label: snake.id.label(),
                score: snake.score(),
            })
            .collect()
    }

    pub fn snake(&self, id: SnakeId) -> Option<&Snake> {
        self.snakes.iter().find(|snake| snake.id == id)
    }
}
