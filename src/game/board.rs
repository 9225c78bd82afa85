use serde::{Deserialize, Serialize};

use super::state::{Position, Snake, SnakeId};

/// Content of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Food,
    Occupied(SnakeId),
}

/// Square grid of cell values, derived from the snakes and the food.
///
/// There is no way to write a single cell: a board only comes out of
/// [`Board::project`], so it can never drift from the entities it shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid_size: usize,
    cells: Vec<CellValue>,
}

impl Board {
    pub fn empty(grid_size: usize) -> Self {
        Self {
            grid_size,
            cells: vec![CellValue::Empty; grid_size * grid_size],
        }
    }

    /// Cell-wise union of every snake's segments and the food cell
    pub fn project(grid_size: usize, snakes: &[Snake], food: Option<Position>) -> Self {
        let mut board = Self::empty(grid_size);

        if let Some(food) = food {
            let index = board.index(food);
            board.cells[index] = CellValue::Food;
        }

        for snake in snakes {
            for &segment in &snake.segments {
                let index = board.index(segment);
                debug_assert!(
                    !matches!(board.cells[index], CellValue::Occupied(other) if other != snake.id),
                    "two snakes claim {segment:?}"
                );
                board.cells[index] = CellValue::Occupied(snake.id);
            }
        }

        board
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn get(&self, pos: Position) -> CellValue {
        self.cells[self.index(pos)]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == CellValue::Empty
    }

    /// Snake owning the cell, if any
    pub fn occupant(&self, pos: Position) -> Option<SnakeId> {
        match self.get(pos) {
            CellValue::Occupied(id) => Some(id),
            _ => None,
        }
    }

    /// Every `Empty` cell, row by row
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.grid_size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == CellValue::Empty)
            .map(move |(index, _)| Position::new(index / size, index % size))
    }

    pub fn free_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == CellValue::Empty)
            .count()
    }

    /// All non-empty cells with their value, row by row
    pub fn filled_cells(&self) -> impl Iterator<Item = (Position, CellValue)> + '_ {
        let size = self.grid_size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell != CellValue::Empty)
            .map(move |(index, cell)| (Position::new(index / size, index % size), *cell))
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.grid_size + pos.col
    }
}
