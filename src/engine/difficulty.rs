//! The difficulty ramp: one level per ten cleared pipes up to level 10,
//! then a fresh random level on every clear once a hundred pipes are behind
//! the player.

use rand::Rng;

pub const MAX_LEVEL: u8 = 10;
/// Cleared-pipe count after which the level turns into a random draw.
pub const RANDOM_AFTER: u32 = 100;

pub const BASE_GAP: f32 = 200.0;
pub const MIN_GAP: f32 = 100.0;
pub const BASE_GRAVITY: f32 = 0.35;
pub const MAX_GRAVITY: f32 = 0.65;
pub const BASE_JUMP: f32 = -7.0;
pub const MIN_JUMP: f32 = -9.0;
pub const BASE_SPEED: f32 = 2.0;
pub const MAX_SPEED: f32 = 5.0;

/// Tuning knobs for a single level. Always derived as a set from one level,
/// so a frame can never mix the gravity of one level with the gap of
/// another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParams {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub gap_size: f32,
    pub scroll_speed: f32,
}

pub fn level_for<R: Rng>(total_passed: u32, rng: &mut R) -> u8 {
    if total_passed >= RANDOM_AFTER {
        rng.gen_range(1..=MAX_LEVEL)
    } else {
        ((total_passed / 10 + 1).min(u32::from(MAX_LEVEL))) as u8
    }
}

pub fn params_for(level: u8) -> DifficultyParams {
    let level = level.clamp(1, MAX_LEVEL);
    let t = f32::from(level - 1) / 9.0;
    DifficultyParams {
        gravity: BASE_GRAVITY + t * (MAX_GRAVITY - BASE_GRAVITY),
        jump_impulse: BASE_JUMP - t * (MIN_JUMP - BASE_JUMP),
        gap_size: BASE_GAP - t * (BASE_GAP - MIN_GAP),
        scroll_speed: BASE_SPEED + t * (MAX_SPEED - BASE_SPEED),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_linear_ramp_below_one_hundred() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for total in 0..RANDOM_AFTER {
            let expected = (total / 10 + 1).min(10) as u8;
            assert_eq!(level_for(total, &mut rng), expected, "total_passed = {total}");
        }
    }

    #[test]
    fn test_ramp_caps_at_ten() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(level_for(90, &mut rng), 10);
        assert_eq!(level_for(99, &mut rng), 10);
    }

    #[test]
    fn test_random_regime_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..1000 {
            let level = level_for(RANDOM_AFTER, &mut rng);
            assert!((1..=MAX_LEVEL).contains(&level));
        }
    }

    #[test]
    fn test_random_regime_covers_all_levels() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let seen: HashSet<u8> = (0..1000).map(|_| level_for(150, &mut rng)).collect();
        assert_eq!(seen.len(), MAX_LEVEL as usize);
    }

    #[test]
    fn test_level_one_params() {
        let params = params_for(1);
        assert_eq!(params.gravity, BASE_GRAVITY);
        assert_eq!(params.jump_impulse, BASE_JUMP);
        assert_eq!(params.gap_size, BASE_GAP);
        assert_eq!(params.scroll_speed, BASE_SPEED);
    }

    #[test]
    fn test_level_ten_params() {
        let params = params_for(10);
        assert!((params.gravity - MAX_GRAVITY).abs() < 1e-6);
        assert!((params.gap_size - MIN_GAP).abs() < 1e-6);
        assert!((params.scroll_speed - MAX_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic_over_levels() {
        for level in 2..=MAX_LEVEL {
            let prev = params_for(level - 1);
            let cur = params_for(level);
            assert!(cur.gap_size <= prev.gap_size, "gap must shrink, level {level}");
            assert!(cur.gravity >= prev.gravity, "gravity must rise, level {level}");
            assert!(cur.scroll_speed >= prev.scroll_speed, "speed must rise, level {level}");
        }
    }

    #[test]
    fn test_out_of_range_level_is_clamped() {
        assert_eq!(params_for(0), params_for(1));
        assert_eq!(params_for(200), params_for(10));
    }
}
