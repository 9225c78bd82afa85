use tracing::debug;

use super::board::Board;
use super::random::RandomSource;
use super::state::Position;

/// Places the single food item on an empty cell
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    attempts: usize,
}

impl FoodSpawner {
    pub fn new(attempts: usize) -> Self {
        Self { attempts }
    }

    /// Pick an `Empty` cell for the food, or `None` when the board is full
    pub fn spawn<R: RandomSource + ?Sized>(&self, board: &Board, rng: &mut R) -> Option<Position> {
        let pos = sample_free(board, rng, self.attempts, (0, board.grid_size()));
        if pos.is_none() {
            debug!("no free cell for food");
        }
        pos
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new(32)
    }
}

/// Draw a free cell whose row and col both lie in `range`.
///
/// Tries `attempts` uniform probes first, then picks uniformly among the
/// free cells in range. Always terminates; `None` means no such cell exists.
pub(crate) fn sample_free<R: RandomSource + ?Sized>(
    board: &Board,
    rng: &mut R,
    attempts: usize,
    range: (usize, usize),
) -> Option<Position> {
    let (lo, hi) = range;
    if lo >= hi {
        return None;
    }
    let span = hi - lo;

    for _ in 0..attempts {
        let pos = Position::new(lo + rng.below(span), lo + rng.below(span));
        if board.is_empty(pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = board
        .free_cells()
        .filter(|pos| (lo..hi).contains(&pos.row) && (lo..hi).contains(&pos.col))
        .collect();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.below(free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::CellValue;
    use crate::game::direction::Direction;
    use crate::game::state::{Snake, SnakeId};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Snake covering every cell of a `size` grid except `hole`
    fn snake_filling(size: usize, hole: Option<Position>) -> Snake {
        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| Position::new(row, col)))
            .filter(|pos| Some(*pos) != hole);
        Snake::with_segments(SnakeId(1), cells, Direction::Right).unwrap()
    }

    #[test]
    fn test_spawn_lands_on_empty_cell() {
        let snake = Snake::with_segments(
            SnakeId(1),
            [Position::new(2, 2), Position::new(2, 1), Position::new(2, 0)],
            Direction::Right,
        )
        .unwrap();
        let board = Board::project(5, &[snake], None);
        let spawner = FoodSpawner::default();

        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let pos = spawner.spawn(&board, &mut rng).unwrap();
            assert_eq!(board.get(pos), CellValue::Empty);
        }
    }

    #[test]
    fn test_spawn_finds_last_free_cell() {
        let hole = Position::new(3, 1);
        let board = Board::project(4, &[snake_filling(4, Some(hole))], None);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        // Zero probes forces the enumeration path
        assert_eq!(FoodSpawner::new(0).spawn(&board, &mut rng), Some(hole));
        assert_eq!(FoodSpawner::default().spawn(&board, &mut rng), Some(hole));
    }

    #[test]
    fn test_spawn_on_full_board_returns_none() {
        let board = Board::project(4, &[snake_filling(4, None)], None);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(FoodSpawner::default().spawn(&board, &mut rng), None);
    }

    #[test]
    fn test_sample_free_respects_range() {
        let board = Board::empty(20);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        for _ in 0..100 {
            let pos = sample_free(&board, &mut rng, 8, (5, 15)).unwrap();
            assert!((5..15).contains(&pos.row));
            assert!((5..15).contains(&pos.col));
        }
        assert_eq!(sample_free(&board, &mut rng, 8, (3, 3)), None);
    }
}
