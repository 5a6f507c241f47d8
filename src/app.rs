//! Terminal ownership and the game loop.
//!
//! A single `select!` loop serializes keyboard events, tick-timer fires and
//! Ctrl+C onto one logical thread, so no tick ever runs concurrently with
//! another tick or with a direction change.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval};

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::score::HighScoreStore;

pub struct App {
    engine: GameEngine,
    /// `None` until the first start; an idle board is shown until then
    state: Option<GameState>,
    renderer: Renderer,
    input_handler: InputHandler,
    store: HighScoreStore,
    high_score: u32,
    save_warning: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, store: HighScoreStore) -> Self {
        // One-time read; missing or malformed files mean no high score yet
        let high_score = store.load().unwrap_or(0);

        Self {
            engine: GameEngine::new(config.clone()),
            state: None,
            renderer: Renderer::new(config),
            input_handler: InputHandler::new(),
            store,
            high_score,
            save_warning: None,
            should_quit: false,
        }
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
        let mut tick_timer = self.new_tick_timer();

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Keyboard events; redraw after anything that may have
                // changed visible state
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event) {
                            tick_timer = self.new_tick_timer();
                        }
                        self.draw(terminal)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.tick() {
                        tick_timer = self.new_tick_timer();
                    }
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// A fresh interval at the current speed. The first fire lands a full
    /// interval out, so rebuilding on start or unpause never produces an
    /// immediate extra tick.
    fn new_tick_timer(&self) -> Interval {
        let speed_ms = self
            .state
            .as_ref()
            .map(|state| state.speed_ms)
            .unwrap_or(self.engine.config().initial_speed_ms);
        let period = Duration::from_millis(speed_ms);
        interval_at(Instant::now() + period, period)
    }

    /// Apply one key event. Returns true when the tick timer must be rebuilt.
    fn handle_event(&mut self, event: Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        // Only process key press events, not release or repeat
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                // Accepted even while paused; it matters once resumed
                if let Some(state) = self.state.as_mut() {
                    state.request_direction(direction);
                }
                false
            }
            KeyAction::Start => {
                self.state = Some(self.engine.start());
                self.save_warning = None;
                true
            }
            KeyAction::TogglePause => match self.state.as_mut() {
                Some(state) => {
                    let was_paused = state.paused;
                    state.toggle_pause();
                    // rebuild on resume so the next tick is a full interval away
                    was_paused && !state.paused
                }
                None => false,
            },
            KeyAction::Quit => {
                self.should_quit = true;
                false
            }
            KeyAction::None => false,
        }
    }

    /// Run one game tick if a run is active. Returns true when the tick
    /// changed the speed and the timer must be rebuilt.
    fn tick(&mut self) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        // Paused and finished runs keep the timer alive but do no work
        if state.paused || state.over {
            return false;
        }

        let result = self.engine.tick(state);

        if result.over {
            self.finish_run();
        }

        result.speed_changed
    }

    /// Game-over bookkeeping: persist the high score if it was beaten. A
    /// failed write is reported in the UI and never aborts the game.
    fn finish_run(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };

        if state.score > self.high_score {
            self.high_score = state.score;
            if let Err(err) = self.store.save(state.score) {
                self.save_warning = Some(format!("High score not saved: {err:#}"));
            }
        }
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| {
                self.renderer.render(
                    frame,
                    self.state.as_ref(),
                    self.high_score,
                    self.save_warning.as_deref(),
                );
            })
            .context("Failed to draw frame")?;
        Ok(())
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
