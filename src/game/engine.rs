use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::GameConfig;
use super::direction::Direction;
use super::state::{Food, GameState, Position, Snake};

/// What a single tick did, for the caller driving the timer and the redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the game is over after this tick
    pub over: bool,
    /// Whether the tick interval changed and the timer must be rebuilt
    pub speed_changed: bool,
}

/// Drives the game state machine: one `tick` per timer interval, with
/// direction changes applied only at tick boundaries.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create an engine with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with a fixed RNG seed, for deterministic food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start (or restart) a run: fresh snake and food, score and speed reset
    pub fn start(&mut self) -> GameState {
        let food = Food::spawn(&mut self.rng, false, &self.config);

        GameState {
            snake: Snake::new(self.config.initial_body_len),
            food,
            direction: Direction::Down,
            pending_direction: None,
            score: 0,
            food_counter: 0,
            speed_ms: self.config.initial_speed_ms,
            paused: false,
            over: false,
        }
    }

    /// Advance the game by one step. Does nothing while paused or after the
    /// game is over.
    pub fn tick(&mut self, state: &mut GameState) -> TickResult {
        if state.paused || state.over {
            return TickResult {
                ate_food: false,
                over: state.over,
                speed_changed: false,
            };
        }

        debug_assert!(!state.snake.is_empty(), "ticking with an empty snake body");

        // The direction is read exactly once per tick; changes requested
        // mid-interval land here.
        if let Some(pending) = state.pending_direction.take() {
            state.direction = pending;
        }

        // The movement step is always the normal cell size, even when the
        // active food is large.
        let candidate = state
            .snake
            .head()
            .stepped(state.direction, self.config.cell_size);

        if !self.in_bounds(candidate) || state.snake.collides_with(candidate) {
            state.over = true;
            return TickResult {
                ate_food: false,
                over: true,
                speed_changed: false,
            };
        }

        state.snake.grow_head(candidate);

        let ate_food = state.food.is_eaten(candidate, &self.config);
        let mut speed_changed = false;

        if ate_food {
            if state.food.large {
                state.score += 3;
                let faster = state.speed_ms.saturating_sub(self.config.speed_step_ms);
                let clamped = faster.max(self.config.min_speed_ms);
                speed_changed = clamped != state.speed_ms;
                state.speed_ms = clamped;
            } else {
                state.score += 1;
            }

            state.food_counter += 1;
            let large = state.food_counter % self.config.large_food_every == 0;
            state.food = Food::spawn(&mut self.rng, large, &self.config);
        } else {
            state.snake.drop_tail();
        }

        TickResult {
            ate_food,
            over: false,
            speed_changed,
        }
    }

    fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.config.board_width
            && pos.y >= 0
            && pos.y < self.config.board_height
    }
}
