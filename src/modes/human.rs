use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::game::{Engine, GameConfig, ModeConfig, Phase, ScoreEntry, ScoreReporter};
use crate::highscore::{DEFAULT_MAX_ENTRIES, HighscoreList};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Host settings for an interactive session
#[derive(Debug, Clone)]
pub struct HumanConfig {
    pub game: GameConfig,
    pub mode: ModeConfig,
    /// Period of the simulation clock
    pub tick_interval: Duration,
    /// Seed for reproducible sessions; entropy when absent
    pub seed: Option<u64>,
    /// Where highscores are kept; in memory only when absent
    pub highscore_path: Option<PathBuf>,
}

impl Default for HumanConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            mode: ModeConfig::default(),
            tick_interval: Duration::from_millis(200),
            seed: None,
            highscore_path: None,
        }
    }
}

pub struct HumanMode {
    config: HumanConfig,
    engine: Engine<ChaCha8Rng>,
    seeds: ChaCha8Rng,
    scores_tx: Sender<Vec<ScoreEntry>>,
    scores_rx: Receiver<Vec<ScoreEntry>>,
    highscores: HighscoreList,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: HumanConfig) -> Result<Self> {
        let highscores = match &config.highscore_path {
            Some(path) => HighscoreList::load(path, DEFAULT_MAX_ENTRIES)?,
            None => HighscoreList::default(),
        };
        let seeds = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let (scores_tx, scores_rx) = channel();

        let mut mode = Self {
            engine: Engine::new(config.game.clone()),
            config,
            seeds,
            scores_tx,
            scores_rx,
            highscores,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        };
        mode.reset_game()?;
        Ok(mode)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.config.tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.engine.phase() == Phase::Running {
                        self.update_game()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.engine.phase() == Phase::Running {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            self.engine.state(),
                            &self.metrics,
                            &self.highscores,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                self.engine.stop();
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer { player, direction } => {
                    // Keys of a player who is not in this session do nothing
                    if self.engine.phase() == Phase::Running
                        && player < self.engine.mode().player_count()
                    {
                        self.engine.request_direction(player, direction)?;
                    }
                }
                KeyAction::Restart => {
                    self.reset_game()?;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        self.engine.step()?;

        while let Ok(scores) = self.scores_rx.try_recv() {
            self.record_scores(&scores)?;
        }

        Ok(())
    }

    fn record_scores(&mut self, scores: &[ScoreEntry]) -> Result<()> {
        self.metrics.on_game_over(scores);
        for entry in scores {
            self.highscores.add(entry.clone());
        }

        if let Some(path) = &self.config.highscore_path {
            if let Err(err) = self.highscores.save(path) {
                warn!("{err:#}");
            }
        }
        Ok(())
    }

    /// Throw the current session away and start a fresh engine
    fn reset_game(&mut self) -> Result<()> {
        self.engine.stop();

        let mut engine = Engine::new(self.config.game.clone()).with_score_reporter(self.reporter());
        engine.configure(self.config.mode)?;
        engine.start(ChaCha8Rng::seed_from_u64(self.seeds.next_u64()))?;
        self.engine = engine;
        self.metrics.on_game_start();

        info!(
            players = self.config.mode.player_count(),
            policy = ?self.config.mode.policy,
            "new session"
        );
        Ok(())
    }

    fn reporter(&self) -> impl ScoreReporter + 'static {
        let tx = self.scores_tx.clone();
        move |entries: &[ScoreEntry]| {
            // Receiver is owned by the mode and outlives every engine
            let _ = tx.send(entries.to_vec());
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
