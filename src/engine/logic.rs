//! State transitions: player input and the per-tick physics step.
//!
//! Both entry points are plain functions over a mutable [`WorldState`]; the
//! caller owns the clock, the RNG and the score store. A snapshot whose
//! phase is `Start` or `GameOver` is frozen: ticking it is the identity.

use rand::Rng;
use tracing::debug;

use super::{
    difficulty::{level_for, params_for},
    score::ScoreStore,
    theme::generate_theme,
    types::{
        Phase, WorldState, BIRD_SIZE, BIRD_X, PIPE_WIDTH, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
        SPAWN_LEAD, THEME_REROLL_EVERY,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Flap,
    Restart,
}

/// Apply a player input. A flap overwrites the vertical speed with the
/// current level's impulse; it never accumulates. Any input on the start or
/// game-over screen begins a fresh run.
pub fn process_input<R: Rng>(state: &mut WorldState, input: GameInput, rng: &mut R) {
    match state.phase {
        Phase::Playing => {
            if input == GameInput::Flap {
                state.bird_vel = params_for(state.level).jump_impulse;
            }
        },
        Phase::Start | Phase::GameOver => state.start_run(rng),
    }
}

/// Advance the world by one fixed frame step.
pub fn process_tick<R, S>(state: &mut WorldState, rng: &mut R, store: &mut S)
where
    R: Rng,
    S: ScoreStore,
{
    if state.phase != Phase::Playing {
        return;
    }

    let params = params_for(state.level);

    // Vertical step. An out-of-bounds candidate position is never committed;
    // the bird stays where it was and the run ends.
    let next_y = state.bird_y + state.bird_vel;
    if next_y <= 0.0 || next_y >= PLAYFIELD_HEIGHT - BIRD_SIZE {
        finish_run(state, store);
        return;
    }
    state.bird_y = next_y;
    state.bird_vel += params.gravity;

    // Scroll, cull, and spawn. The gap size is frozen into the new pipe at
    // creation; pipes already on screen keep theirs.
    for obstacle in state.obstacles.iter_mut() {
        obstacle.x -= params.scroll_speed;
    }
    state.obstacles.retain(|o| o.x > -PIPE_WIDTH);
    let needs_spawn = state.obstacles.back().map_or(true, |o| o.x < PLAYFIELD_WIDTH - SPAWN_LEAD);
    if needs_spawn {
        state.spawn_obstacle(params.gap_size, rng);
    }

    // Game over beats scoring when a single frame would do both.
    if hits_obstacle(state) {
        finish_run(state, store);
        return;
    }

    score_passed(state, rng);
}

fn hits_obstacle(state: &WorldState) -> bool {
    let bird_top = state.bird_y;
    let bird_bottom = state.bird_y + BIRD_SIZE;
    state.obstacles.iter().any(|o| {
        let overlaps = BIRD_X + BIRD_SIZE > o.x && BIRD_X < o.x + PIPE_WIDTH;
        overlaps && (bird_top < o.gap_top || bird_bottom > o.gap_top + o.gap_size)
    })
}

fn score_passed<R: Rng>(state: &mut WorldState, rng: &mut R) {
    let mut cleared = 0u32;
    for o in state.obstacles.iter_mut() {
        if !o.passed && o.x + PIPE_WIDTH < BIRD_X {
            o.passed = true;
            cleared += 1;
        }
    }
    for _ in 0..cleared {
        state.score += 1;
        state.total_passed += 1;
        state.level = level_for(state.total_passed, rng);
        if state.score % THEME_REROLL_EVERY == 0 {
            state.theme = generate_theme(rng);
        }
    }
}

fn finish_run<S: ScoreStore>(state: &mut WorldState, store: &mut S) {
    state.phase = Phase::GameOver;
    debug!("Run over at score {}", state.score);
    if state.score > state.high_score {
        state.high_score = state.score;
        store.save(state.high_score);
        debug!("New high score: {}", state.high_score);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::super::{
        difficulty::{BASE_GAP, BASE_JUMP},
        score::MemoryScoreStore,
        types::Obstacle,
    };
    use super::*;

    fn playing_state(rng: &mut ChaCha8Rng) -> WorldState {
        let mut state = WorldState::new(0, rng);
        state.start_run(rng);
        state
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let mut rng = ChaCha8Rng::seed_from_u64(20);
        let mut state = playing_state(&mut rng);
        state.bird_vel = 5.0;
        process_input(&mut state, GameInput::Flap, &mut rng);
        assert_eq!(state.bird_vel, BASE_JUMP);
        // A second flap overwrites again instead of stacking.
        process_input(&mut state, GameInput::Flap, &mut rng);
        assert_eq!(state.bird_vel, BASE_JUMP);
    }

    #[test]
    fn test_input_starts_run_from_start_screen() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut state = WorldState::new(0, &mut rng);
        process_input(&mut state, GameInput::Flap, &mut rng);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.bird_vel, 0.0);
    }

    #[test]
    fn test_input_restarts_after_game_over() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let mut state = playing_state(&mut rng);
        state.phase = Phase::GameOver;
        state.score = 3;
        process_input(&mut state, GameInput::Restart, &mut rng);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_gravity_accelerates_fall() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        let y0 = state.bird_y;
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.bird_y, y0);
        assert!(state.bird_vel > 0.0);
        process_tick(&mut state, &mut rng, &mut store);
        assert!(state.bird_y > y0);
    }

    #[test]
    fn test_ceiling_ends_run_without_committing_position() {
        let mut rng = ChaCha8Rng::seed_from_u64(24);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        state.bird_y = 1.0;
        state.bird_vel = -2.0;
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.bird_y, 1.0);
    }

    #[test]
    fn test_touching_ceiling_with_nonpositive_velocity_ends_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(25);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        state.bird_y = 0.0;
        state.bird_vel = 0.0;
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_floor_ends_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(26);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        state.bird_y = PLAYFIELD_HEIGHT - BIRD_SIZE - 1.0;
        state.bird_vel = 2.0;
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_pass_scores_exactly_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(27);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        // Trailing edge at 61.5 before the tick, 59.5 after one level-1
        // scroll step, which clears the bird's leading edge at 60.
        state.obstacles.push_back(Obstacle { x: 9.5, gap_top: 100.0, gap_size: 200.0, passed: false });
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.score, 1);
        assert_eq!(state.total_passed, 1);
        assert!(state.obstacles[0].passed);

        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.score, 1, "a passed pipe must never score twice");
    }

    #[test]
    fn test_not_yet_cleared_pipe_does_not_score() {
        let mut rng = ChaCha8Rng::seed_from_u64(28);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        // Still at 10 after the scroll step: 10 + 52 >= 60, no pass.
        state.obstacles.push_back(Obstacle { x: 12.0, gap_top: 100.0, gap_size: 200.0, passed: false });
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.score, 0);
        assert!(!state.obstacles[0].passed);
    }

    #[test]
    fn test_collision_outside_gap_ends_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(29);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        // Pipe sits on the bird, gap far above it.
        state.obstacles.push_back(Obstacle { x: 62.0, gap_top: 50.0, gap_size: 100.0, passed: false });
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_no_collision_inside_gap() {
        let mut rng = ChaCha8Rng::seed_from_u64(30);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        // Gap comfortably surrounds the bird at mid-field.
        state.obstacles.push_back(Obstacle { x: 62.0, gap_top: 200.0, gap_size: 200.0, passed: false });
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_game_over_beats_scoring_in_same_frame() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        // One pipe about to be passed, one colliding with the bird.
        state.obstacles.push_back(Obstacle { x: 9.5, gap_top: 200.0, gap_size: 200.0, passed: false });
        state.obstacles.push_back(Obstacle { x: 62.0, gap_top: 50.0, gap_size: 100.0, passed: false });
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.score, 0, "a dying frame must not score");
        assert!(!state.obstacles[0].passed);
    }

    #[test]
    fn test_frozen_snapshot_tick_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        state.bird_y = 1.0;
        state.bird_vel = -2.0;
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.phase, Phase::GameOver);

        let frozen = state.clone();
        process_tick(&mut state, &mut rng, &mut store);
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_high_score_persisted_once_on_game_over() {
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        state.score = 5;
        state.high_score = 3;
        state.bird_y = 1.0;
        state.bird_vel = -2.0;
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.high_score, 5);
        assert_eq!(store.load(), 5);
        assert_eq!(store.history(), &[5]);

        // Further ticks on the frozen snapshot never write again.
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(store.history(), &[5]);
    }

    #[test]
    fn test_scoreless_run_does_not_persist() {
        let mut rng = ChaCha8Rng::seed_from_u64(34);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        state.bird_y = 1.0;
        state.bird_vel = -2.0;
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.phase, Phase::GameOver);
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_level_bump_after_ten_passes() {
        let mut rng = ChaCha8Rng::seed_from_u64(35);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        state.score = 9;
        state.total_passed = 9;
        state.obstacles.push_back(Obstacle { x: 9.5, gap_top: 200.0, gap_size: 200.0, passed: false });
        // Far enough right that no new pipe spawns this frame.
        state.obstacles.push_back(Obstacle { x: 250.0, gap_top: 200.0, gap_size: 200.0, passed: false });

        // The only draws in this frame are the theme reroll, so a cloned RNG
        // predicts the new look exactly.
        let mut expected_rng = rng.clone();
        process_tick(&mut state, &mut rng, &mut store);

        assert_eq!(state.score, 10);
        assert_eq!(state.level, 2);
        assert!(params_for(state.level).gap_size < BASE_GAP);
        assert_eq!(state.theme, generate_theme(&mut expected_rng));
    }

    #[test]
    fn test_offscreen_pipes_are_culled() {
        let mut rng = ChaCha8Rng::seed_from_u64(36);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        state.obstacles.push_back(Obstacle { x: -51.0, gap_top: 200.0, gap_size: 200.0, passed: true });
        state.obstacles.push_back(Obstacle { x: 250.0, gap_top: 200.0, gap_size: 200.0, passed: false });
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.obstacles[0].x > 0.0);
    }

    #[test]
    fn test_spawn_uses_current_gap_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(37);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        state.level = 5;
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].gap_size, params_for(5).gap_size);
    }

    #[test]
    fn test_no_spawn_while_rightmost_pipe_is_near_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(38);
        let mut store = MemoryScoreStore::default();
        let mut state = playing_state(&mut rng);
        state.obstacles.push_back(Obstacle { x: 250.0, gap_top: 200.0, gap_size: 200.0, passed: false });
        process_tick(&mut state, &mut rng, &mut store);
        assert_eq!(state.obstacles.len(), 1);
    }
}
