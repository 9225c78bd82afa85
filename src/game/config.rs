use serde::{Deserialize, Serialize};

/// Largest number of snakes a session can hold
pub const MAX_PLAYERS: usize = 2;

/// Configuration for the game grid and placement rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square, wrap-around grid
    pub grid_size: usize,
    /// Distance from each edge that spawn points keep clear of
    pub spawn_margin: usize,
    /// Random probes the food spawner makes before enumerating free cells
    pub food_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(20)
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            spawn_margin: grid_size / 4,
            food_attempts: 32,
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30)
    }

    /// Half-open range of rows/cols that spawn points are drawn from.
    ///
    /// Falls back to the whole grid when the margin would leave nothing.
    pub fn spawn_range(&self) -> (usize, usize) {
        let margin = self.spawn_margin;
        if margin.saturating_mul(2) >= self.grid_size {
            (0, self.grid_size)
        } else {
            (margin, self.grid_size - margin)
        }
    }
}

/// Number of local players in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerCount {
    #[default]
    One,
    Two,
}

impl PlayerCount {
    pub fn count(&self) -> usize {
        match self {
            PlayerCount::One => 1,
            PlayerCount::Two => 2,
        }
    }
}

/// How contacts between a head and an occupied cell are settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Any contact ends the session for everyone
    #[default]
    Traditional,
    /// Only the colliding snake is respawned; play goes on
    Endless,
}

/// Player count and collision policy, fixed once the engine starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeConfig {
    pub players: PlayerCount,
    pub policy: CollisionPolicy,
}

impl ModeConfig {
    pub fn new(players: PlayerCount, policy: CollisionPolicy) -> Self {
        Self { players, policy }
    }

    pub fn player_count(&self) -> usize {
        self.players.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.spawn_margin, 5);
        assert_eq!(config.spawn_range(), (5, 15));
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.spawn_range(), (3, 12));
    }

    #[test]
    fn test_spawn_range_on_tiny_grid() {
        let config = GameConfig {
            grid_size: 2,
            spawn_margin: 1,
            food_attempts: 4,
        };
        assert_eq!(config.spawn_range(), (0, 2));
    }

    #[test]
    fn test_default_mode() {
        let mode = ModeConfig::default();
        assert_eq!(mode.player_count(), 1);
        assert_eq!(mode.policy, CollisionPolicy::Traditional);
        assert_eq!(
            ModeConfig::new(PlayerCount::Two, CollisionPolicy::Endless).player_count(),
            2
        );
    }
}
