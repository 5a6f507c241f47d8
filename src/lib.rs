//! Classic grid snake for the terminal.
//!
//! This library provides:
//! - Core game logic (game module): movement, collisions, food, speed scaling
//! - Keyboard mapping (input module)
//! - Ratatui rendering (render module)
//! - High-score persistence (score module)
//! - The terminal app loop tying them together (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod render;
pub mod score;
