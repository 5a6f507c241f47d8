pub mod store;

pub use store::{HighScoreStore, HIGH_SCORE_FILE};
