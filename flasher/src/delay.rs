/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure arithmetic helpers for LED flash periods.
//!
//! These are free functions so they can be used and tested independently of
//! [`ActuatorState`](crate::actuator::ActuatorState).

/// Smallest flash period, in milliseconds.
pub const MIN_DELAY_MS: u16 = 10;

/// Largest flash period, in milliseconds.
pub const MAX_DELAY_MS: u16 = 5000;

/// Period every actuator starts with unless configured otherwise.
pub const DEFAULT_DELAY_MS: u16 = 500;

/// Amount one joystick event moves a period by.
pub const ADJUST_STEP_MS: u16 = 10;

/// Increase `delay` by `step`, clamped to [`MAX_DELAY_MS`].
///
/// The comparison is done against `MAX - step` so the addition itself can
/// never overflow.
pub fn inc_delay(delay: u16, step: u16) -> u16 {
    if delay <= MAX_DELAY_MS.saturating_sub(step) {
        delay + step
    } else {
        MAX_DELAY_MS
    }
}

/// Decrease `delay` by `step`, clamped to [`MIN_DELAY_MS`].
///
/// Unsigned arithmetic: the subtraction only happens once `delay` is known to
/// be at least `MIN + step`, so it can't wrap.
pub fn dec_delay(delay: u16, step: u16) -> u16 {
    match MIN_DELAY_MS.checked_add(step) {
        Some(floor) if delay >= floor => delay - step,
        _ => MIN_DELAY_MS,
    }
}

/// Returns `true` if `delay` is inside `[MIN_DELAY_MS, MAX_DELAY_MS]`.
pub fn in_range(delay: u16) -> bool {
    (MIN_DELAY_MS..=MAX_DELAY_MS).contains(&delay)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── inc_delay ─────────────────────────────────────────────────────────────

    #[test]
    fn inc_adds_step_below_ceiling() {
        assert_eq!(inc_delay(500, ADJUST_STEP_MS), 510);
        assert_eq!(inc_delay(4990, ADJUST_STEP_MS), 5000);
    }

    #[test]
    fn inc_clamps_at_ceiling() {
        assert_eq!(inc_delay(4995, ADJUST_STEP_MS), 5000);
        assert_eq!(inc_delay(5000, ADJUST_STEP_MS), 5000);
    }

    #[test]
    fn repeated_increments_never_exceed_ceiling() {
        let mut d = DEFAULT_DELAY_MS;
        for _ in 0..1_000 {
            d = inc_delay(d, ADJUST_STEP_MS);
            assert!(d <= MAX_DELAY_MS);
        }
        assert_eq!(d, MAX_DELAY_MS);
    }

    #[test]
    fn inc_with_huge_step_does_not_overflow() {
        assert_eq!(inc_delay(100, u16::MAX), MAX_DELAY_MS);
    }

    // ── dec_delay ─────────────────────────────────────────────────────────────

    #[test]
    fn dec_subtracts_step_above_floor() {
        assert_eq!(dec_delay(500, ADJUST_STEP_MS), 490);
        assert_eq!(dec_delay(20, ADJUST_STEP_MS), 10);
    }

    #[test]
    fn dec_clamps_at_floor_without_underflow() {
        assert_eq!(dec_delay(15, ADJUST_STEP_MS), 10);
        assert_eq!(dec_delay(10, ADJUST_STEP_MS), 10);
        assert_eq!(dec_delay(0, ADJUST_STEP_MS), 10);
    }

    #[test]
    fn repeated_decrements_never_go_below_floor() {
        let mut d = DEFAULT_DELAY_MS;
        for _ in 0..1_000 {
            d = dec_delay(d, ADJUST_STEP_MS);
            assert!(d >= MIN_DELAY_MS);
        }
        assert_eq!(d, MIN_DELAY_MS);
    }

    #[test]
    fn dec_with_huge_step_does_not_overflow() {
        assert_eq!(dec_delay(u16::MAX, u16::MAX), MIN_DELAY_MS);
    }

    // ── in_range ──────────────────────────────────────────────────────────────

    #[test]
    fn in_range_bounds_are_inclusive() {
        assert!(in_range(MIN_DELAY_MS));
        assert!(in_range(MAX_DELAY_MS));
        assert!(!in_range(MIN_DELAY_MS - 1));
        assert!(!in_range(MAX_DELAY_MS + 1));
    }
}
