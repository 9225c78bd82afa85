use tracing::{debug, info, trace};

use super::{
    board::Board,
    collision::{Collision, CollisionResolver, Move, Resolution},
    config::{GameConfig, MAX_PLAYERS, ModeConfig},
    direction::Direction,
    error::{EngineError, EngineResult},
    food::{FoodSpawner, sample_free},
    observer::{ScoreReporter, TickObserver},
    random::RandomSource,
    state::{EngineState, Phase, Position, ScoreEntry, Snake, SnakeId},
};

/// The game engine that handles all game logic.
///
/// Lifecycle is `Configuring -> Running -> GameOver`. All entity state
/// changes happen inside [`Engine::step`]; between ticks the host may only
/// queue headings with [`Engine::request_direction`].
pub struct Engine<R> {
    config: GameConfig,
    mode: ModeConfig,
    state: EngineState,
    pending: [Option<Direction>; MAX_PLAYERS],
    rng: Option<R>,
    food_spawner: FoodSpawner,
    tick_observer: Option<Box<dyn TickObserver>>,
    score_reporter: Option<Box<dyn ScoreReporter>>,
}

impl<R: RandomSource> Engine<R> {
    /// Create an engine in `Configuring` with the default mode
    pub fn new(config: GameConfig) -> Self {
        Self {
            food_spawner: FoodSpawner::new(config.food_attempts),
            state: EngineState::new(config.grid_size),
            config,
            mode: ModeConfig::default(),
            pending: [None; MAX_PLAYERS],
            rng: None,
            tick_observer: None,
            score_reporter: None,
        }
    }

    /// Build a running engine from explicit entities.
    ///
    /// `snakes[i]` belongs to player `i`; the board is projected from the
    /// given snakes and food.
    pub fn resume(
        config: GameConfig,
        mode: ModeConfig,
        snakes: Vec<Snake>,
        food: Option<Position>,
        rng: R,
    ) -> Self {
        let mut engine = Self::new(config);
        engine.mode = mode;
        engine.state.board = Board::project(engine.config.grid_size, &snakes, food);
        engine.state.snakes = snakes;
        engine.state.food = food;
        engine.state.phase = Phase::Running;
        engine.rng = Some(rng);
        engine
    }

    pub fn with_tick_observer(mut self, observer: impl TickObserver + 'static) -> Self {
        self.tick_observer = Some(Box::new(observer));
        self
    }

    pub fn with_score_reporter(mut self, reporter: impl ScoreReporter + 'static) -> Self {
        self.score_reporter = Some(Box::new(reporter));
        self
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn mode(&self) -> ModeConfig {
        self.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    pub fn scores(&self) -> Vec<ScoreEntry> {
        self.state.scores()
    }

    /// Set player count and collision policy; only before `start`
    pub fn configure(&mut self, mode: ModeConfig) -> EngineResult<()> {
        self.expect_phase(Phase::Configuring, "configure")?;
        self.mode = mode;
        Ok(())
    }

    /// Place one snake per player and the first food, then begin running
    pub fn start(&mut self, mut rng: R) -> EngineResult<()> {
        self.expect_phase(Phase::Configuring, "start")?;

        let grid_size = self.config.grid_size;
        let mut snakes: Vec<Snake> = Vec::with_capacity(self.mode.player_count());
        for player in 0..self.mode.player_count() {
            let board = Board::project(grid_size, &snakes, None);
            let snake = spawn_snake(&self.config, &board, SnakeId::for_player(player), &mut rng)
                .ok_or(EngineError::BoardFull)?;
            snakes.push(snake);
        }

        let board = Board::project(grid_size, &snakes, None);
        let food = self.food_spawner.spawn(&board, &mut rng);

        self.state.board = Board::project(grid_size, &snakes, food);
        self.state.snakes = snakes;
        self.state.food = food;
        self.state.phase = Phase::Running;
        self.rng = Some(rng);

        debug!(
            players = self.mode.player_count(),
            policy = ?self.mode.policy,
            grid_size,
            "session started"
        );
        self.publish();
        Ok(())
    }

    /// Queue a heading for `player`, applied at the start of the next step.
    ///
    /// A request for the exact reverse of the current heading is dropped.
    pub fn request_direction(&mut self, player: usize, direction: Direction) -> EngineResult<()> {
        self.expect_phase(Phase::Running, "request a direction")?;

        let players = self.mode.player_count();
        let snake = self
            .state
            .snakes
            .get(player)
            .filter(|_| player < players)
            .ok_or(EngineError::UnknownPlayer {
                index: player,
                players,
            })?;

        if snake.direction.is_opposite(direction) {
            trace!(player, ?direction, "reversal ignored");
            return Ok(());
        }

        self.pending[player] = Some(direction);
        Ok(())
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) -> EngineResult<Phase> {
        self.expect_phase(Phase::Running, "step")?;
        let mut rng = self.rng.take().ok_or(EngineError::InvalidState {
            operation: "step",
            phase: self.state.phase,
        })?;

        self.apply_pending();

        let grid_size = self.config.grid_size;
        let food = self.state.food;
        let moves: Vec<Move> = self
            .state
            .snakes
            .iter()
            .map(|snake| {
                let new_head = snake.head().wrapped(snake.direction, grid_size);
                Move {
                    id: snake.id,
                    new_head,
                    grows: Some(new_head) == food,
                }
            })
            .collect();

        let resolver = CollisionResolver::new(self.mode.policy);
        match resolver.resolve(&self.state.board, &self.state.snakes, &moves) {
            Resolution::GameOver { cause } => self.finish(cause),
            Resolution::Continue { respawn } => self.advance(&moves, &respawn, &mut rng),
        }

        self.rng = Some(rng);
        self.publish();
        Ok(self.state.phase)
    }

    /// Abort the session from any phase; no scores are reported
    pub fn stop(&mut self) {
        if self.state.phase == Phase::GameOver {
            return;
        }
        debug!(tick = self.state.tick, "session stopped by host");
        self.enter_game_over();
    }

    fn apply_pending(&mut self) {
        for (snake, pending) in self.state.snakes.iter_mut().zip(self.pending.iter_mut()) {
            if let Some(direction) = pending.take() {
                if !snake.direction.is_opposite(direction) {
                    snake.direction = direction;
                }
            }
        }
    }

    fn advance<Rs: RandomSource + ?Sized>(
        &mut self,
        moves: &[Move],
        respawn: &[Collision],
        rng: &mut Rs,
    ) {
        let grid_size = self.config.grid_size;
        let mut food_eaten = false;

        for (snake, mv) in self.state.snakes.iter_mut().zip(moves) {
            if respawn.iter().any(|c| c.snake == snake.id) {
                snake.segments.clear();
                snake.alive = false;
                continue;
            }
            snake.advance(mv.new_head, mv.grows);
            food_eaten |= mv.grows;
        }

        if food_eaten {
            self.state.food = None;
        }

        for collision in respawn {
            let board = Board::project(grid_size, &self.state.snakes, self.state.food);
            match spawn_snake(&self.config, &board, collision.snake, rng) {
                Some(fresh) => {
                    debug!(
                        tick = self.state.tick,
                        snake = collision.snake.0,
                        kind = ?collision.kind,
                        head = ?fresh.head(),
                        "snake respawned"
                    );
                    if let Some(slot) = self.state.snakes.iter_mut().find(|s| s.id == fresh.id) {
                        *slot = fresh;
                    }
                    self.pending[collision.snake.player_index()] = None;
                }
                None => {
                    // No room left anywhere: the session ends like a Traditional one
                    self.state.board =
                        Board::project(grid_size, &self.state.snakes, self.state.food);
                    self.finish(*collision);
                    return;
                }
            }
        }

        if self.state.food.is_none() {
            let board = Board::project(grid_size, &self.state.snakes, None);
            self.state.food = self.food_spawner.spawn(&board, rng);
        }

        self.state.board = Board::project(grid_size, &self.state.snakes, self.state.food);
        self.state.tick += 1;
    }

    /// Natural end of a session: score everyone and report once
    fn finish(&mut self, cause: Collision) {
        self.state.tick += 1;
        self.enter_game_over();

        let scores = self.state.scores();
        info!(
            tick = self.state.tick,
            snake = cause.snake.0,
            kind = ?cause.kind,
            ?scores,
            "game over"
        );
        if let Some(mut reporter) = self.score_reporter.take() {
            reporter.report(&scores);
        }
    }

    fn enter_game_over(&mut self) {
        self.state.phase = Phase::GameOver;
        self.pending = [None; MAX_PLAYERS];
        for snake in &mut self.state.snakes {
            snake.alive = false;
        }
    }

    fn publish(&mut self) {
        if let Some(observer) = self.tick_observer.as_mut() {
            observer.on_tick(&self.state);
        }
    }

    fn expect_phase(&self, phase: Phase, operation: &'static str) -> EngineResult<()> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(EngineError::InvalidState {
                operation,
                phase: self.state.phase,
            })
        }
    }
}

/// Fresh length-1 snake on a free interior cell with a random heading.
///
/// Falls back to any free cell when the interior is full.
fn spawn_snake<R: RandomSource + ?Sized>(
    config: &GameConfig,
    board: &Board,
    id: SnakeId,
    rng: &mut R,
) -> Option<Snake> {
    let head = sample_free(board, rng, config.food_attempts, config.spawn_range())
        .or_else(|| sample_free(board, rng, 0, (0, config.grid_size)))?;
    let direction = Direction::ALL[rng.below(Direction::ALL.len())];
    Some(Snake::new(id, head, direction))
}
