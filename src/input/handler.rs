use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Heading request on one player's input channel
    Steer { player: usize, direction: Direction },
    Restart,
    Quit,
    None,
}

/// Maps keys to the two player channels: arrows for player 1, WASD for player 2
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Player 1 - Arrow keys
            KeyCode::Up => steer(0, Direction::Up),
            KeyCode::Down => steer(0, Direction::Down),
            KeyCode::Left => steer(0, Direction::Left),
            KeyCode::Right => steer(0, Direction::Right),

            // Player 2 - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => steer(1, Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => steer(1, Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => steer(1, Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => steer(1, Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

fn steer(player: usize, direction: Direction) -> KeyAction {
    KeyAction::Steer { player, direction }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
