use rand::Rng;

use super::config::GameConfig;
use super::direction::Direction;

/// A pixel position on the board, grid-aligned to the active cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one step away in a direction, with the given step length
    pub fn stepped(&self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * step,
            y: self.y + dy * step,
        }
    }
}

/// The snake body: ordered segments, head at index 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// All segments start stacked on the board origin; the body unfolds as
    /// the first moves drop the tail one segment at a time.
    pub fn new(len: usize) -> Self {
        Self {
            body: vec![Position::new(0, 0); len],
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Body segments in order, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake has no segments (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Insert a new head segment. The caller validates the position first.
    pub fn grow_head(&mut self, pos: Position) {
        self.body.insert(0, pos);
    }

    /// Remove the tail segment after a non-eating move
    pub fn drop_tail(&mut self) {
        self.body.pop();
    }

    /// Check if a position hits any segment behind the head. Runs against the
    /// body as it is before the candidate head is inserted, so the tail
    /// counts even though it is about to move.
    pub fn collides_with(&self, pos: Position) -> bool {
        self.body[1..].contains(&pos)
    }
}

/// A single food item. Position and size class are fixed at construction;
/// eating replaces the whole value with a freshly spawned one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub pos: Position,
    pub large: bool,
}

impl Food {
    /// Spawn food on a random cell of the grid formed by the food's own size.
    /// Cells currently under the snake body are not excluded.
    pub fn spawn<R: Rng>(rng: &mut R, large: bool, config: &GameConfig) -> Self {
        let size = config.food_size(large);
        let x = rng.gen_range(0..config.board_width / size) * size;
        let y = rng.gen_range(0..config.board_height / size) * size;
        Self {
            pos: Position::new(x, y),
            large,
        }
    }

    /// Check if a head at `pos` lands inside this food's cell square
    pub fn is_eaten(&self, pos: Position, config: &GameConfig) -> bool {
        let size = config.food_size(self.large);
        pos.x >= self.pos.x
            && pos.x < self.pos.x + size
            && pos.y >= self.pos.y
            && pos.y < self.pos.y + size
    }
}

/// Complete state of one game run. Owned by the caller of the engine and
/// read by the renderer as an immutable snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    /// Direction applied by the current tick
    pub direction: Direction,
    /// Direction requested since the last tick, applied at the next one
    pub pending_direction: Option<Direction>,
    pub score: u32,
    /// Total food items consumed this run
    pub food_counter: u32,
    /// Current tick interval in milliseconds
    pub speed_ms: u64,
    pub paused: bool,
    pub over: bool,
}

impl GameState {
    /// Record a direction change for the next tick. A request that reverses
    /// the current direction is silently ignored. Pause state does not matter
    /// here; a change requested while paused takes effect once resumed.
    pub fn request_direction(&mut self, requested: Direction) {
        if !self.direction.is_opposite(requested) {
            self.pending_direction = Some(requested);
        }
    }

    /// Flip the pause flag. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        if !self.over {
            self.paused = !self.paused;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn running_state() -> GameState {
        GameState {
            snake: Snake::new(3),
            food: Food {
                pos: Position::new(500, 300),
                large: false,
            },
            direction: Direction::Down,
            pending_direction: None,
            score: 0,
            food_counter: 0,
            speed_ms: 120,
            paused: false,
            over: false,
        }
    }

    #[test]
    fn test_position_stepped() {
        let pos = Position::new(100, 100);
        assert_eq!(pos.stepped(Direction::Up, 50), Position::new(100, 50));
        assert_eq!(pos.stepped(Direction::Down, 50), Position::new(100, 150));
        assert_eq!(pos.stepped(Direction::Left, 50), Position::new(50, 100));
        assert_eq!(pos.stepped(Direction::Right, 50), Position::new(150, 100));
    }

    #[test]
    fn test_snake_starts_stacked_at_origin() {
        let snake = Snake::new(3);
        assert_eq!(snake.len(), 3);
        for segment in snake.segments() {
            assert_eq!(*segment, Position::new(0, 0));
        }
    }

    #[test]
    fn test_grow_head_and_drop_tail() {
        let mut snake = Snake::new(3);
        snake.grow_head(Position::new(0, 50));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(0, 50));

        snake.drop_tail();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(0, 50));
    }

    #[test]
    fn test_collision_excludes_head() {
        let mut snake = Snake::new(3);
        snake.grow_head(Position::new(0, 50));
        snake.drop_tail();
        snake.grow_head(Position::new(50, 50));
        snake.drop_tail();

        // body is now [(50,50), (0,50), (0,0)]
        assert!(!snake.collides_with(Position::new(50, 50))); // head only
        assert!(snake.collides_with(Position::new(0, 50)));
        assert!(snake.collides_with(Position::new(0, 0)));
        assert!(!snake.collides_with(Position::new(100, 100)));
    }

    #[test]
    fn test_food_spawns_grid_aligned() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let food = Food::spawn(&mut rng, false, &config);
            assert_eq!(food.pos.x % 50, 0);
            assert_eq!(food.pos.y % 50, 0);
            assert!(food.pos.x >= 0 && food.pos.x + 50 <= 600);
            assert!(food.pos.y >= 0 && food.pos.y + 50 <= 400);
        }

        for _ in 0..50 {
            let food = Food::spawn(&mut rng, true, &config);
            assert_eq!(food.pos.x % 70, 0);
            assert_eq!(food.pos.y % 70, 0);
            assert!(food.pos.x >= 0 && food.pos.x + 70 <= 600);
            assert!(food.pos.y >= 0 && food.pos.y + 70 <= 400);
        }
    }

    #[test]
    fn test_is_eaten_half_open_square() {
        let config = GameConfig::default();
        let food = Food {
            pos: Position::new(100, 100),
            large: false,
        };

        assert!(food.is_eaten(Position::new(100, 100), &config));
        assert!(!food.is_eaten(Position::new(150, 100), &config));
        assert!(!food.is_eaten(Position::new(100, 150), &config));
        assert!(!food.is_eaten(Position::new(50, 100), &config));
    }

    #[test]
    fn test_large_food_has_bigger_hitbox() {
        let config = GameConfig::default();
        let food = Food {
            pos: Position::new(140, 140),
            large: true,
        };

        // the 70px square [140, 210) covers the 50-aligned heads at 150 and 200
        assert!(food.is_eaten(Position::new(150, 150), &config));
        assert!(food.is_eaten(Position::new(200, 200), &config));
        assert!(!food.is_eaten(Position::new(100, 150), &config));
        assert!(!food.is_eaten(Position::new(250, 150), &config));
    }

    #[test]
    fn test_request_direction_rejects_reversal() {
        let mut state = running_state();
        assert_eq!(state.direction, Direction::Down);

        state.request_direction(Direction::Up);
        assert_eq!(state.pending_direction, None);

        state.request_direction(Direction::Left);
        assert_eq!(state.pending_direction, Some(Direction::Left));

        // a later request overwrites the pending one, still checked
        // against the current direction
        state.request_direction(Direction::Right);
        assert_eq!(state.pending_direction, Some(Direction::Right));
    }

    #[test]
    fn test_request_direction_works_while_paused() {
        let mut state = running_state();
        state.toggle_pause();
        assert!(state.paused);

        state.request_direction(Direction::Right);
        assert_eq!(state.pending_direction, Some(Direction::Right));
    }

    #[test]
    fn test_toggle_pause_ignored_after_game_over() {
        let mut state = running_state();
        state.over = true;

        state.toggle_pause();
        assert!(!state.paused);
    }
}
