//! Game state and core simulation types
//!
//! One owned aggregate holds everything a handler may touch; the frame step,
//! the spawn timer and the input resolver all take `&mut GameState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::problem::Problem;
use crate::consts::*;
use crate::tuning::{DifficultyDriver, Tuning};

/// A falling drop carrying one arithmetic problem
#[derive(Debug, Clone)]
pub struct Drop {
    pub id: u32,
    /// Top-center of the drop shape; x is fixed at spawn, y advances per frame
    pub pos: Vec2,
    /// Square bounding extent, used for spawn clamping and text layout
    pub size: f32,
    /// Fall speed in pixels per frame, fixed at spawn
    pub speed: f32,
    pub problem: Problem,
    /// Golden drops clear the whole board when matched
    pub golden: bool,
}

/// Complete session state for one game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG - all sim randomness flows through it
    pub rng: Pcg32,
    /// Live drops, insertion order = spawn order
    pub drops: Vec<Drop>,
    /// Current score, floored at 0
    pub score: u32,
    /// Fraction of the playfield covered by sea, in [0.1, 1.0] in 0.1 steps
    pub sea_level: f32,
    /// Cumulative spawn count (default difficulty driver)
    pub spawned: u32,
    /// Drops popped by correct answers
    pub hits: u32,
    /// Submissions that matched nothing
    pub misses: u32,
    /// Set when the sea reaches the top; terminal until reset
    pub over: bool,
    /// Next drop ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh game with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            drops: Vec::new(),
            score: 0,
            sea_level: SEA_LEVEL_START,
            spawned: 0,
            hits: 0,
            misses: 0,
            over: false,
            next_id: 1,
        }
    }

    /// Allocate a new drop ID (monotonic, unique for the session)
    pub fn next_drop_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current difficulty value under the configured driver
    pub fn difficulty(&self, tuning: &Tuning) -> u32 {
        match tuning.driver {
            DifficultyDriver::SpawnCount => self.spawned,
            DifficultyDriver::Score => self.score,
        }
    }

    /// Spawn one drop just above the playfield
    pub fn spawn_drop(&mut self, tuning: &Tuning) {
        let min_x = (DROP_SIZE / 2.0) as u32;
        let max_x = (CANVAS_WIDTH - DROP_SIZE / 2.0) as u32;

        let base = tuning.base_speed + self.difficulty(tuning) as f32 * tuning.speed_increment;
        let problem = Problem::generate(&mut self.rng);
        let id = self.next_drop_id();

        let drop = Drop {
            id,
            pos: Vec2::new(self.rng.random_range(min_x..=max_x) as f32, -DROP_SIZE),
            size: DROP_SIZE,
            speed: self.rng.random_range(base..=base * 2.0),
            problem,
            golden: self.rng.random_bool(tuning.golden_chance.clamp(0.0, 1.0)),
        };

        self.drops.push(drop);
        self.spawned += 1;
    }

    /// Spawn timer cadence in milliseconds, shrinking with difficulty down to a floor
    pub fn spawn_delay_ms(&self, tuning: &Tuning) -> u32 {
        let reduction = self.difficulty(tuning) as u64 * tuning.spawn_decrement_ms as u64;
        (tuning.spawn_base_ms as u64)
            .saturating_sub(reduction)
            .max(tuning.spawn_min_ms as u64) as u32
    }

    /// Y coordinate of the sea surface; a drop past it counts as missed
    pub fn sea_boundary(&self) -> f32 {
        CANVAS_HEIGHT - CANVAS_HEIGHT * self.sea_level
    }

    /// Hit percentage over all submissions, 0 when nothing was submitted
    pub fn accuracy(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_places_drop_above_canvas() {
        let tuning = Tuning::default();
        let mut state = GameState::new(7);

        for _ in 0..50 {
            state.spawn_drop(&tuning);
        }

        for drop in &state.drops {
            assert!(drop.pos.x >= DROP_SIZE / 2.0);
            assert!(drop.pos.x <= CANVAS_WIDTH - DROP_SIZE / 2.0);
            assert_eq!(drop.pos.y, -DROP_SIZE);
            assert_eq!(drop.size, DROP_SIZE);
        }
        assert_eq!(state.spawned, 50);
        assert_eq!(state.drops.len(), 50);
    }

    #[test]
    fn test_spawn_ids_unique() {
        let tuning = Tuning::default();
        let mut state = GameState::new(11);

        for _ in 0..20 {
            state.spawn_drop(&tuning);
        }

        for pair in state.drops.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[test]
    fn test_spawn_speed_within_range() {
        let tuning = Tuning::default();
        let mut state = GameState::new(3);

        // First spawn sees difficulty 0, so the unscaled base band applies
        state.spawn_drop(&tuning);
        let first = &state.drops[0];
        assert!(first.speed >= tuning.base_speed);
        assert!(first.speed <= tuning.base_speed * 2.0);

        // Later spawns draw from a band shifted up with difficulty
        for _ in 0..99 {
            state.spawn_drop(&tuning);
        }
        let base = tuning.base_speed + 99.0 * tuning.speed_increment;
        let last = state.drops.last().unwrap();
        assert!(last.speed >= tuning.base_speed);
        assert!(last.speed <= base * 2.0);
    }

    #[test]
    fn test_spawn_delay_shrinks_to_floor() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1);

        assert_eq!(state.spawn_delay_ms(&tuning), tuning.spawn_base_ms);

        state.spawned = 10;
        assert_eq!(
            state.spawn_delay_ms(&tuning),
            tuning.spawn_base_ms - 10 * tuning.spawn_decrement_ms
        );

        // Far past the crossover point the floor holds
        state.spawned = 10_000;
        assert_eq!(state.spawn_delay_ms(&tuning), tuning.spawn_min_ms);
    }

    #[test]
    fn test_score_difficulty_driver() {
        let tuning = Tuning {
            driver: DifficultyDriver::Score,
            ..Tuning::default()
        };
        let mut state = GameState::new(1);
        state.score = 30;
        state.spawned = 500;

        assert_eq!(state.difficulty(&tuning), 30);
        assert_eq!(
            state.spawn_delay_ms(&tuning),
            tuning.spawn_base_ms - 30 * tuning.spawn_decrement_ms
        );
    }

    #[test]
    fn test_sea_boundary_tracks_level() {
        let mut state = GameState::new(1);
        assert_eq!(state.sea_boundary(), CANVAS_HEIGHT * 0.9);

        state.sea_level = 0.5;
        assert_eq!(state.sea_boundary(), CANVAS_HEIGHT * 0.5);
    }

    #[test]
    fn test_accuracy() {
        let mut state = GameState::new(1);
        assert_eq!(state.accuracy(), 0.0);

        state.hits = 3;
        state.misses = 1;
        assert_eq!(state.accuracy(), 75.0);
    }
}
