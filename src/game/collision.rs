use super::board::Board;
use super::config::CollisionPolicy;
use super::state::{Position, Snake, SnakeId};

/// Candidate move of one snake for the coming tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub id: SnakeId,
    pub new_head: Position,
    /// The new head lands on the food, so the tail stays put
    pub grows: bool,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Head ran into the snake's own body
    SelfBody,
    /// Head ran into another snake's body
    OtherBody(SnakeId),
    /// Two heads reached the same cell, or swapped cells
    HeadOn(SnakeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub snake: SnakeId,
    pub kind: CollisionKind,
}

/// What the engine must do with the tick's moves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Apply every move except those of the listed snakes, which respawn
    Continue { respawn: Vec<Collision> },
    /// The session ends before any move is applied
    GameOver { cause: Collision },
}

/// Settles head contacts according to a [`CollisionPolicy`]
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    policy: CollisionPolicy,
}

impl CollisionResolver {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Judge all moves against the pre-step `board` and `snakes`.
    ///
    /// Moves are inspected in ascending snake id order; under Traditional
    /// the first collision found is reported as the cause.
    pub fn resolve(&self, board: &Board, snakes: &[Snake], moves: &[Move]) -> Resolution {
        let mut ordered: Vec<&Move> = moves.iter().collect();
        ordered.sort_by_key(|mv| mv.id);

        let mut collisions = Vec::new();
        for mv in &ordered {
            if let Some(kind) = detect(board, snakes, moves, mv) {
                let collision = Collision {
                    snake: mv.id,
                    kind,
                };
                if self.policy == CollisionPolicy::Traditional {
                    return Resolution::GameOver { cause: collision };
                }
                collisions.push(collision);
            }
        }

        Resolution::Continue {
            respawn: collisions,
        }
    }
}

fn detect(board: &Board, snakes: &[Snake], moves: &[Move], mv: &Move) -> Option<CollisionKind> {
    let head = snakes.iter().find(|s| s.id == mv.id).map(Snake::head);

    for other in moves.iter().filter(|other| other.id != mv.id) {
        let other_head = snakes.iter().find(|s| s.id == other.id).map(Snake::head);
        let same_cell = other.new_head == mv.new_head;
        let swapped = Some(mv.new_head) == other_head && Some(other.new_head) == head;
        if same_cell || swapped {
            return Some(CollisionKind::HeadOn(other.id));
        }
    }

    let owner = board.occupant(mv.new_head)?;
    if is_vacated_tail(snakes, moves, owner, mv.new_head) {
        return None;
    }
    if owner == mv.id {
        Some(CollisionKind::SelfBody)
    } else {
        Some(CollisionKind::OtherBody(owner))
    }
}

/// The cell is `owner`'s tail and `owner` moves without growing this tick
fn is_vacated_tail(snakes: &[Snake], moves: &[Move], owner: SnakeId, cell: Position) -> bool {
    let Some(snake) = snakes.iter().find(|s| s.id == owner) else {
        return false;
    };
    let moving_without_growth = moves.iter().any(|mv| mv.id == owner && !mv.grows);
    moving_without_growth && snake.tail() == cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;

    fn snake(id: u8, cells: &[(usize, usize)], direction: Direction) -> Snake {
        Snake::with_segments(
            SnakeId(id),
            cells.iter().map(|&(r, c)| Position::new(r, c)),
            direction,
        )
        .unwrap()
    }

    fn step(id: u8, row: usize, col: usize) -> Move {
        Move {
            id: SnakeId(id),
            new_head: Position::new(row, col),
            grows: false,
        }
    }

    #[test]
    fn test_clear_path_continues() {
        let snakes = vec![snake(1, &[(5, 5), (5, 4)], Direction::Right)];
        let board = Board::project(10, &snakes, None);

        for policy in [CollisionPolicy::Traditional, CollisionPolicy::Endless] {
            let resolution = CollisionResolver::new(policy).resolve(&board, &snakes, &[step(1, 5, 6)]);
            assert_eq!(resolution, Resolution::Continue { respawn: vec![] });
        }
    }

    #[test]
    fn test_traditional_body_hit_ends_session() {
        let snakes = vec![
            snake(1, &[(5, 5)], Direction::Right),
            snake(2, &[(4, 6), (5, 6), (6, 6)], Direction::Up),
        ];
        let board = Board::project(10, &snakes, None);
        let moves = [step(1, 5, 6), step(2, 3, 6)];

        let resolution = CollisionResolver::new(CollisionPolicy::Traditional).resolve(&board, &snakes, &moves);
        assert_eq!(
            resolution,
            Resolution::GameOver {
                cause: Collision {
                    snake: SnakeId(1),
                    kind: CollisionKind::OtherBody(SnakeId(2)),
                }
            }
        );
    }

    #[test]
    fn test_endless_body_hit_respawns_only_mover() {
        let snakes = vec![
            snake(1, &[(5, 5)], Direction::Right),
            snake(2, &[(4, 6), (5, 6), (6, 6)], Direction::Up),
        ];
        let board = Board::project(10, &snakes, None);
        let moves = [step(1, 5, 6), step(2, 3, 6)];

        let resolution = CollisionResolver::new(CollisionPolicy::Endless).resolve(&board, &snakes, &moves);
        assert_eq!(
            resolution,
            Resolution::Continue {
                respawn: vec![Collision {
                    snake: SnakeId(1),
                    kind: CollisionKind::OtherBody(SnakeId(2)),
                }]
            }
        );
    }

    #[test]
    fn test_vacating_tail_is_free() {
        // Four-cell ring: the head chases its own tail
        let snakes = vec![snake(1, &[(1, 1), (1, 2), (2, 2), (2, 1)], Direction::Down)];
        let board = Board::project(5, &snakes, None);

        let resolution = CollisionResolver::new(CollisionPolicy::Traditional).resolve(&board, &snakes, &[step(1, 2, 1)]);
        assert_eq!(resolution, Resolution::Continue { respawn: vec![] });
    }

    #[test]
    fn test_tail_of_growing_snake_blocks() {
        let snakes = vec![snake(1, &[(1, 1), (1, 2), (2, 2), (2, 1)], Direction::Down)];
        let board = Board::project(5, &snakes, None);
        let growing = Move {
            grows: true,
            ..step(1, 2, 1)
        };

        let resolution = CollisionResolver::new(CollisionPolicy::Traditional).resolve(&board, &snakes, &[growing]);
        assert_eq!(
            resolution,
            Resolution::GameOver {
                cause: Collision {
                    snake: SnakeId(1),
                    kind: CollisionKind::SelfBody,
                }
            }
        );
    }

    #[test]
    fn test_endless_self_hit_respawns() {
        let snakes = vec![snake(1, &[(1, 1), (1, 2), (2, 2), (2, 1), (3, 1)], Direction::Down)];
        let board = Board::project(5, &snakes, None);

        let resolution = CollisionResolver::new(CollisionPolicy::Endless).resolve(&board, &snakes, &[step(1, 2, 1)]);
        assert_eq!(
            resolution,
            Resolution::Continue {
                respawn: vec![Collision {
                    snake: SnakeId(1),
                    kind: CollisionKind::SelfBody,
                }]
            }
        );
    }

    #[test]
    fn test_head_on_into_same_cell() {
        let snakes = vec![
            snake(1, &[(5, 4)], Direction::Right),
            snake(2, &[(5, 6)], Direction::Left),
        ];
        let board = Board::project(10, &snakes, None);
        let moves = [step(2, 5, 5), step(1, 5, 5)];

        let endless = CollisionResolver::new(CollisionPolicy::Endless).resolve(&board, &snakes, &moves);
        assert_eq!(
            endless,
            Resolution::Continue {
                respawn: vec![
                    Collision {
                        snake: SnakeId(1),
                        kind: CollisionKind::HeadOn(SnakeId(2)),
                    },
                    Collision {
                        snake: SnakeId(2),
                        kind: CollisionKind::HeadOn(SnakeId(1)),
                    },
                ]
            }
        );

        let traditional = CollisionResolver::new(CollisionPolicy::Traditional).resolve(&board, &snakes, &moves);
        assert!(matches!(traditional, Resolution::GameOver { cause } if cause.snake == SnakeId(1)));
    }

    #[test]
    fn test_single_cell_snakes_cannot_swap() {
        let snakes = vec![
            snake(1, &[(5, 5)], Direction::Right),
            snake(2, &[(5, 6)], Direction::Left),
        ];
        let board = Board::project(10, &snakes, None);
        let moves = [step(1, 5, 6), step(2, 5, 5)];

        let resolution = CollisionResolver::new(CollisionPolicy::Endless).resolve(&board, &snakes, &moves);
        match resolution {
            Resolution::Continue { respawn } => assert_eq!(respawn.len(), 2),
            other => panic!("unexpected resolution {other:?}"),
        }
    }
}
