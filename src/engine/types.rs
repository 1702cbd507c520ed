//! Core data model: the per-frame world snapshot and its obstacles.
//!
//! Coordinates are abstract pixels on a 320x568 portrait playfield with the
//! origin at the top-left; the renderer scales them to terminal cells.

use std::collections::VecDeque;

use rand::Rng;

use super::theme::{generate_theme, WorldTheme};

pub const PLAYFIELD_WIDTH: f32 = 320.0;
pub const PLAYFIELD_HEIGHT: f32 = 568.0;
/// The bird is a square sprite.
pub const BIRD_SIZE: f32 = 32.0;
/// Fixed horizontal position of the bird's left edge.
pub const BIRD_X: f32 = 60.0;
pub const PIPE_WIDTH: f32 = 52.0;
/// A new pipe spawns once the rightmost one has scrolled this far in from
/// the right edge.
pub const SPAWN_LEAD: f32 = 200.0;
/// Minimum distance between a gap edge and the top or bottom of the field.
pub const GAP_MARGIN: f32 = 50.0;
/// The world theme rerolls on every multiple of this score.
pub const THEME_REROLL_EVERY: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Playing,
    GameOver,
}

/// A pipe pair, represented by the gap the bird has to thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge; scrolls toward negative x.
    pub x: f32,
    /// Top of the gap (bottom edge of the upper pipe).
    pub gap_top: f32,
    /// Frozen at spawn time; later difficulty changes never resize a pipe
    /// that is already on screen.
    pub gap_size: f32,
    /// Flips false to true exactly once, when the pipe's trailing edge
    /// clears the bird's leading edge.
    pub passed: bool,
}

/// The authoritative game snapshot, advanced once per tick by
/// [`super::logic::process_tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    pub phase: Phase,
    pub bird_y: f32,
    /// Vertical speed in pixels per tick; positive is downward.
    pub bird_vel: f32,
    /// Spawn order, which is also left-to-right order on screen: pipes are
    /// appended at the right edge and never reordered.
    pub obstacles: VecDeque<Obstacle>,
    pub score: u32,
    /// Obstacles cleared this run. The difficulty curve reads this; it
    /// resets together with `score` on restart.
    pub total_passed: u32,
    /// Derived from `total_passed`, never mutated independently.
    pub level: u8,
    /// Carried across runs; persisted whenever a run beats it.
    pub high_score: u32,
    pub theme: WorldTheme,
}

impl WorldState {
    pub fn new<R: Rng>(high_score: u32, rng: &mut R) -> Self {
        Self {
            phase: Phase::Start,
            bird_y: PLAYFIELD_HEIGHT / 2.0,
            bird_vel: 0.0,
            obstacles: VecDeque::new(),
            score: 0,
            total_passed: 0,
            level: 1,
            high_score,
            theme: generate_theme(rng),
        }
    }

    /// Begin a fresh run. Everything except the high score resets, and the
    /// world gets a new look.
    pub fn start_run<R: Rng>(&mut self, rng: &mut R) {
        self.phase = Phase::Playing;
        self.bird_y = PLAYFIELD_HEIGHT / 2.0;
        self.bird_vel = 0.0;
        self.obstacles.clear();
        self.score = 0;
        self.total_passed = 0;
        self.level = 1;
        self.theme = generate_theme(rng);
    }

    /// Append a pipe at the right edge with a uniformly random gap position.
    pub fn spawn_obstacle<R: Rng>(&mut self, gap_size: f32, rng: &mut R) {
        let gap_top = rng.gen_range(GAP_MARGIN..=PLAYFIELD_HEIGHT - gap_size - GAP_MARGIN);
        self.obstacles.push_back(Obstacle { x: PLAYFIELD_WIDTH, gap_top, gap_size, passed: false });
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let state = WorldState::new(42, &mut rng);
        assert_eq!(state.phase, Phase::Start);
        assert_eq!(state.bird_y, PLAYFIELD_HEIGHT / 2.0);
        assert_eq!(state.bird_vel, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.high_score, 42);
    }

    #[test]
    fn test_start_run_keeps_high_score() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut state = WorldState::new(7, &mut rng);
        state.score = 5;
        state.total_passed = 5;
        state.level = 9;
        state.bird_vel = -3.0;
        state.spawn_obstacle(200.0, &mut rng);

        state.start_run(&mut rng);

        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.total_passed, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.bird_vel, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.high_score, 7);
    }

    #[test]
    fn test_spawn_obstacle_respects_margins() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut state = WorldState::new(0, &mut rng);
        for _ in 0..200 {
            state.spawn_obstacle(150.0, &mut rng);
            let pipe = state.obstacles.back().unwrap();
            assert_eq!(pipe.x, PLAYFIELD_WIDTH);
            assert!(pipe.gap_top >= GAP_MARGIN);
            assert!(pipe.gap_top + pipe.gap_size <= PLAYFIELD_HEIGHT - GAP_MARGIN);
            assert!(!pipe.passed);
        }
    }
}
