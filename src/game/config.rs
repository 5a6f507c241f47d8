use serde::{Deserialize, Serialize};

/// Configuration for the game board and timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board in pixels
    pub board_width: i32,
    /// Height of the board in pixels
    pub board_height: i32,
    /// Side of a normal grid cell in pixels; also the movement step
    pub cell_size: i32,
    /// Side of a large food cell in pixels
    pub large_cell_size: i32,
    /// Number of segments the snake starts with
    pub initial_body_len: usize,
    /// Tick interval at game start, in milliseconds
    pub initial_speed_ms: u64,
    /// Lower bound for the tick interval
    pub min_speed_ms: u64,
    /// Tick-interval reduction applied when large food is eaten
    pub speed_step_ms: u64,
    /// Every Nth food consumed spawns as large food
    pub large_food_every: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 600,
            board_height: 400,
            cell_size: 50,
            large_cell_size: 70,
            initial_body_len: 3,
            initial_speed_ms: 120,
            min_speed_ms: 10,
            speed_step_ms: 10,
            large_food_every: 5,
        }
    }
}

impl GameConfig {
    /// Number of normal-size columns on the board
    pub fn cols(&self) -> i32 {
        self.board_width / self.cell_size
    }

    /// Number of normal-size rows on the board
    pub fn rows(&self) -> i32 {
        self.board_height / self.cell_size
    }

    /// Cell side used by a food item of the given size class
    pub fn food_size(&self, large: bool) -> i32 {
        if large {
            self.large_cell_size
        } else {
            self.cell_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_width, 600);
        assert_eq!(config.board_height, 400);
        assert_eq!(config.cell_size, 50);
        assert_eq!(config.large_cell_size, 70);
        assert_eq!(config.initial_body_len, 3);
        assert_eq!(config.initial_speed_ms, 120);
    }

    #[test]
    fn test_grid_dimensions() {
        let config = GameConfig::default();
        assert_eq!(config.cols(), 12);
        assert_eq!(config.rows(), 8);
    }

    #[test]
    fn test_food_size() {
        let config = GameConfig::default();
        assert_eq!(config.food_size(false), 50);
        assert_eq!(config.food_size(true), 70);
    }
}
