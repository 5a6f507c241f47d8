use anyhow::Result;
use pixel_snake::app::App;
use pixel_snake::game::GameConfig;
use pixel_snake::score::HighScoreStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Board geometry and timing are fixed; the game takes no flags
    let config = GameConfig::default();
    let store = HighScoreStore::default();

    let mut app = App::new(config, store);
    app.run().await
}
