//! Per-frame simulation step and answer resolution
//!
//! The frame path is split in two so a renderer can slot between them:
//! [`advance`] moves drops and reports boundary crossings, [`resolve_misses`]
//! raises the sea and sweeps. [`step`] runs both for headless callers.

use super::state::GameState;
use crate::consts::SEA_LEVEL_STEP;
use crate::tuning::Tuning;

/// What resolving a frame's boundary crossings did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Drops that fell past the sea surface this frame
    pub drowned: u32,
    /// True when the sea reached the top and the session ended
    pub ended: bool,
}

/// Move every drop down by its own speed
///
/// Returns the IDs of drops now past the sea surface. Nothing is removed
/// here; the caller draws the frame first and then feeds the IDs to
/// [`resolve_misses`].
pub fn advance(state: &mut GameState) -> Vec<u32> {
    let boundary = state.sea_boundary();
    let mut missed = Vec::new();

    for drop in &mut state.drops {
        drop.pos.y += drop.speed;

        if drop.pos.y > boundary {
            missed.push(drop.id);
        }
    }

    missed
}

/// Raise the sea for drowned drops and sweep out everything it swallowed
///
/// No crossings means no change. Otherwise the sea rises one step; if it
/// reaches the top the session ends with the board left intact for the final
/// frame, else the crossed drops and any drop now under the higher surface
/// are removed.
pub fn resolve_misses(state: &mut GameState, missed: &[u32]) -> FrameOutcome {
    if missed.is_empty() {
        return FrameOutcome::default();
    }

    // Snap to exact tenths so repeated f32 adds cannot drift past the top
    state.sea_level = ((state.sea_level + SEA_LEVEL_STEP) * 10.0).round() / 10.0;

    if state.sea_level >= 1.0 {
        state.over = true;
        return FrameOutcome {
            drowned: missed.len() as u32,
            ended: true,
        };
    }

    let boundary = state.sea_boundary();
    state
        .drops
        .retain(|d| !missed.contains(&d.id) && d.pos.y <= boundary);

    FrameOutcome {
        drowned: missed.len() as u32,
        ended: false,
    }
}

/// One full frame without a render pass in the middle
pub fn step(state: &mut GameState) -> FrameOutcome {
    let missed = advance(state);
    resolve_misses(state, &missed)
}

/// Result of submitting one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Empty, non-numeric, or post-game input; nothing changed
    Ignored,
    /// Plain drops popped
    Hit { count: u32 },
    /// A golden drop matched and took the whole board with it
    Jackpot { count: u32 },
    /// Nothing matched
    Penalty,
}

/// Resolve one submitted answer against the live board
///
/// Matching scans in spawn order and commits to the first golden match it
/// finds; plain matches collected before it are folded into the jackpot.
/// A numeric answer that matches nothing costs points (floored at zero)
/// and counts as a miss.
pub fn submit(state: &mut GameState, tuning: &Tuning, raw: &str) -> Submission {
    if state.over {
        return Submission::Ignored;
    }

    let value = raw.trim();
    if value.is_empty() {
        return Submission::Ignored;
    }

    let Ok(answer) = value.parse::<f64>() else {
        return Submission::Ignored;
    };
    if answer.is_nan() {
        return Submission::Ignored;
    }

    let mut hit_ids: Vec<u32> = Vec::new();
    let mut golden_hit = false;

    for drop in &state.drops {
        // Results are exact in f64 (small integers, and division always
        // divides evenly), so direct comparison is the right test
        if drop.problem.result == answer {
            if drop.golden {
                golden_hit = true;
                break;
            }
            hit_ids.push(drop.id);
        }
    }

    if golden_hit {
        let count = state.drops.len() as u32;
        state.score += count * tuning.points_per_hit;
        state.hits += count;
        state.drops.clear();
        return Submission::Jackpot { count };
    }

    if !hit_ids.is_empty() {
        let count = hit_ids.len() as u32;
        state.drops.retain(|d| !hit_ids.contains(&d.id));
        state.score += count * tuning.points_per_hit;
        state.hits += count;
        return Submission::Hit { count };
    }

    state.score = state.score.saturating_sub(tuning.points_per_miss);
    state.misses += 1;
    Submission::Penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_HEIGHT, DROP_SIZE};
    use crate::sim::problem::{Op, Problem};
    use crate::sim::state::Drop;
    use glam::Vec2;

    fn push_drop(state: &mut GameState, y: f32, result: f64, golden: bool) {
        let id = state.next_drop_id();
        state.drops.push(Drop {
            id,
            pos: Vec2::new(600.0, y),
            size: DROP_SIZE,
            speed: 1.0,
            problem: Problem {
                a: result as u32,
                b: 0,
                op: Op::Add,
                result,
            },
            golden,
        });
    }

    #[test]
    fn test_advance_moves_drops_by_speed() {
        let mut state = GameState::new(1);
        push_drop(&mut state, 100.0, 7.0, false);
        state.drops[0].speed = 2.5;

        let missed = advance(&mut state);

        assert_eq!(state.drops[0].pos.y, 102.5);
        assert!(missed.is_empty());
    }

    #[test]
    fn test_step_without_drops_changes_nothing() {
        let mut state = GameState::new(1);
        let outcome = step(&mut state);

        assert_eq!(outcome, FrameOutcome::default());
        assert_eq!(state.sea_level, 0.1);
        assert!(!state.over);
    }

    #[test]
    fn test_drowned_drop_raises_sea_and_is_swept() {
        let mut state = GameState::new(1);
        let boundary = state.sea_boundary();
        push_drop(&mut state, boundary + 1.0, 7.0, false);

        let outcome = step(&mut state);

        assert_eq!(outcome, FrameOutcome { drowned: 1, ended: false });
        assert_eq!(state.sea_level, 0.2);
        assert!(state.drops.is_empty());
        assert!(!state.over);
    }

    #[test]
    fn test_rising_sea_sweeps_drops_under_new_surface() {
        let mut state = GameState::new(1);
        let boundary = state.sea_boundary();

        // One drop crosses, one sits safely above the old surface but below
        // where the surface will rise to, one stays clear of both
        push_drop(&mut state, boundary + 5.0, 7.0, false);
        push_drop(&mut state, boundary - 40.0, 8.0, false);
        push_drop(&mut state, 100.0, 9.0, false);

        let outcome = step(&mut state);

        assert_eq!(outcome, FrameOutcome { drowned: 1, ended: false });
        assert_eq!(state.drops.len(), 1);
        assert_eq!(state.drops[0].problem.result, 9.0);
    }

    #[test]
    fn test_sea_rises_in_exact_tenths() {
        let mut state = GameState::new(1);

        for expected in [0.2_f32, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9] {
            push_drop(&mut state, CANVAS_HEIGHT + 10.0, 7.0, false);
            let outcome = step(&mut state);

            assert_eq!(state.sea_level, expected);
            assert!(!outcome.ended);
        }
    }

    #[test]
    fn test_sea_reaching_top_ends_game_with_board_intact() {
        let mut state = GameState::new(1);
        state.sea_level = 0.9;
        let boundary = state.sea_boundary();
        push_drop(&mut state, boundary + 1.0, 7.0, false);
        push_drop(&mut state, 10.0, 8.0, false);

        let outcome = step(&mut state);

        assert!(outcome.ended);
        assert!(state.over);
        assert_eq!(state.sea_level, 1.0);
        // The final frame still shows the board
        assert_eq!(state.drops.len(), 2);
    }

    #[test]
    fn test_matching_answer_pops_every_match() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1);
        push_drop(&mut state, 100.0, 7.0, false);
        push_drop(&mut state, 150.0, 12.0, false);
        push_drop(&mut state, 200.0, 7.0, false);

        let result = submit(&mut state, &tuning, "7");

        assert_eq!(result, Submission::Hit { count: 2 });
        assert_eq!(state.drops.len(), 1);
        assert_eq!(state.drops[0].problem.result, 12.0);
        assert_eq!(state.score, 2 * tuning.points_per_hit);
        assert_eq!(state.hits, 2);
        assert_eq!(state.misses, 0);
    }

    #[test]
    fn test_wrong_answer_costs_points_floored_at_zero() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1);
        push_drop(&mut state, 100.0, 7.0, false);

        let result = submit(&mut state, &tuning, "99");

        assert_eq!(result, Submission::Penalty);
        assert_eq!(state.score, 0);
        assert_eq!(state.misses, 1);
        assert_eq!(state.drops.len(), 1);

        state.score = 100;
        submit(&mut state, &tuning, "99");
        assert_eq!(state.score, 100 - tuning.points_per_miss);
        assert_eq!(state.misses, 2);
    }

    #[test]
    fn test_golden_match_clears_whole_board() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1);
        push_drop(&mut state, 100.0, 9.0, false);
        push_drop(&mut state, 150.0, 9.0, true);
        push_drop(&mut state, 200.0, 12.0, false);

        let result = submit(&mut state, &tuning, "9");

        // The plain 9 spawned first, but the golden one takes precedence
        // and every live drop scores
        assert_eq!(result, Submission::Jackpot { count: 3 });
        assert!(state.drops.is_empty());
        assert_eq!(state.score, 3 * tuning.points_per_hit);
        assert_eq!(state.hits, 3);
    }

    #[test]
    fn test_unmatched_golden_drop_stays_put() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1);
        push_drop(&mut state, 100.0, 9.0, true);
        push_drop(&mut state, 150.0, 7.0, false);

        let result = submit(&mut state, &tuning, "7");

        assert_eq!(result, Submission::Hit { count: 1 });
        assert_eq!(state.drops.len(), 1);
        assert!(state.drops[0].golden);
    }

    #[test]
    fn test_unparseable_input_is_ignored() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1);
        push_drop(&mut state, 100.0, 7.0, false);
        state.score = 50;

        for raw in ["", "   ", "abc", "NaN", "1/2"] {
            assert_eq!(submit(&mut state, &tuning, raw), Submission::Ignored);
        }
        assert_eq!(state.score, 50);
        assert_eq!(state.drops.len(), 1);
        assert_eq!(state.misses, 0);
    }

    #[test]
    fn test_numeric_input_with_whitespace_matches() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1);
        push_drop(&mut state, 100.0, 7.0, false);

        assert_eq!(
            submit(&mut state, &tuning, " 7 "),
            Submission::Hit { count: 1 }
        );
    }

    #[test]
    fn test_submit_after_game_over_is_ignored() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1);
        push_drop(&mut state, 100.0, 7.0, false);
        state.over = true;

        assert_eq!(submit(&mut state, &tuning, "7"), Submission::Ignored);
        assert_eq!(state.drops.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let tuning = Tuning::default();
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);

        for frame in 0..200 {
            if frame % 20 == 0 {
                a.spawn_drop(&tuning);
                b.spawn_drop(&tuning);
            }
            step(&mut a);
            step(&mut b);
        }

        assert_eq!(a.drops.len(), b.drops.len());
        for (da, db) in a.drops.iter().zip(&b.drops) {
            assert_eq!(da.id, db.id);
            assert_eq!(da.pos, db.pos);
            assert_eq!(da.speed, db.speed);
            assert_eq!(da.problem.result, db.problem.result);
            assert_eq!(da.golden, db.golden);
        }
        assert_eq!(a.sea_level, b.sea_level);
        assert_eq!(a.spawned, b.spawned);
    }
}
