//! Frame-driven engine for the arcade game, free of any terminal or widget
//! concern. The event loop feeds it inputs and fixed ticks; it answers with
//! an updated [`WorldState`] snapshot that the presentation layer reads.
//!
//! All randomness (world themes, obstacle gaps, the post-100 difficulty
//! shuffle) flows through caller-supplied [`rand::Rng`] values, and the high
//! score is persisted through the [`ScoreStore`] capability, so the whole
//! engine runs deterministically under test.

pub mod difficulty;
pub mod logic;
pub mod score;
pub mod theme;
pub mod types;

pub use difficulty::{level_for, params_for, DifficultyParams};
pub use logic::{process_input, process_tick, GameInput};
pub use score::{FileScoreStore, MemoryScoreStore, ScoreStore};
pub use theme::{generate_theme, Place, Rgb, Season, WorldTheme};
pub use types::{Obstacle, Phase, WorldState};
