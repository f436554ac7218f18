//! Display bucketing and range/power curves shared by every host.

use crate::spell::SpellData;

/// Number of distinct outcomes of two `random2(101)` rolls plus one
/// `random2(100)` roll.
const FAIL_OUTCOMES: i64 = 101 * 101 * 100;

const HUNGER_BREAKPOINTS: [i32; 5] = [1, 15, 41, 121, 401];
const POWER_BREAKPOINTS: [i32; 9] = [10, 15, 25, 35, 50, 75, 100, 150, 200];

/// How many breakpoints `value` has reached.
pub fn breakpoint_rank(value: i32, breakpoints: &[i32]) -> i32 {
    breakpoints.iter().take_while(|bp| value >= **bp).count() as i32
}

fn tetrahedral(n: i64) -> i64 {
    n * (n + 1) * (n + 2) / 6
}

/// Outcomes, out of `FAIL_OUTCOMES`, in which the three casting rolls sum
/// to less than `3 * raw_fail`.
fn failing_outcomes(raw_fail: i32) -> i64 {
    let target = i64::from(raw_fail) * 3;
    if target <= 100 {
        tetrahedral(target)
    } else if target <= 200 {
        tetrahedral(target) - 2 * tetrahedral(target - 101) - tetrahedral(target - 100)
    } else {
        FAIL_OUTCOMES - tetrahedral(300 - target)
    }
}

/// Convert a raw failure value into the percentage shown to the player.
pub fn failure_rate_to_int(raw_fail: i32) -> i32 {
    if raw_fail <= 0 {
        0
    } else if raw_fail >= 100 {
        (raw_fail + 100) / 2
    } else {
        let pct = 100 * failing_outcomes(raw_fail) / FAIL_OUTCOMES;
        (pct as i32).max(1)
    }
}

/// Miscast severity tier (0..=5) for a displayed failure percentage.
pub fn fail_severity_from_percent(percent: i32) -> i32 {
    match percent {
        p if p <= 0 => 0,
        1..=5 => 1,
        6..=15 => 2,
        16..=35 => 3,
        36..=70 => 4,
        _ => 5,
    }
}

/// Hunger bars (0..=5) for a hunger cost.
pub fn hunger_bars(hunger: i32) -> i32 {
    breakpoint_rank(hunger, &HUNGER_BREAKPOINTS)
}

/// Power bars (1..=10) for a spell power; `-1` means "not castable".
pub fn power_to_barcount(power: i32) -> i32 {
    if power == -1 {
        return -1;
    }
    breakpoint_rank(power, &POWER_BREAKPOINTS) + 1
}

/// Logarithmic diminishing returns: grows linearly up to `step`, then each
/// further doubling adds another `step`.
pub fn stepdown(value: i32, step: i32) -> i32 {
    if value <= 0 || step <= 0 {
        return value.max(0);
    }
    let step = f64::from(step);
    (step * (1.0 + f64::from(value) / step).log2()) as i32
}

/// Range of a spell cast at `power`, limited by the caster's vision.
pub fn spell_range(data: &SpellData, power: i32, vision: i32) -> i32 {
    let (min, max, cap) = (data.min_range, data.max_range, data.power_cap);
    if min == max {
        return min.min(vision);
    }
    let power = power.max(0);
    if cap <= power {
        return max.min(vision);
    }
    ((power * (max - min) + cap / 2) / cap + min).min(vision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spell::SpellType;

    #[test]
    fn failure_rate_edges() {
        assert_eq!(failure_rate_to_int(0), 0);
        assert_eq!(failure_rate_to_int(-15), 0);
        assert_eq!(failure_rate_to_int(1), 1);
        assert_eq!(failure_rate_to_int(100), 100);
        assert_eq!(failure_rate_to_int(150), 125);
    }

    #[test]
    fn failure_rate_curve() {
        assert_eq!(failure_rate_to_int(20), 3);
        assert_eq!(failure_rate_to_int(43), 34);
        assert_eq!(failure_rate_to_int(99), 99);
        let mut last = 0;
        for raw in 0..=120 {
            let pct = failure_rate_to_int(raw);
            assert!(pct >= last, "not monotonic at {}", raw);
            last = pct;
        }
    }

    #[test]
    fn failing_outcomes_continuous_at_branches() {
        assert_eq!(failing_outcomes(33), tetrahedral(99));
        let t = 200;
        assert_eq!(
            tetrahedral(t) - 2 * tetrahedral(t - 101) - tetrahedral(t - 100),
            FAIL_OUTCOMES - tetrahedral(300 - t)
        );
    }

    #[test]
    fn severity_tiers() {
        assert_eq!(fail_severity_from_percent(0), 0);
        assert_eq!(fail_severity_from_percent(5), 1);
        assert_eq!(fail_severity_from_percent(6), 2);
        assert_eq!(fail_severity_from_percent(35), 3);
        assert_eq!(fail_severity_from_percent(70), 4);
        assert_eq!(fail_severity_from_percent(71), 5);
    }

    #[test]
    fn hunger_and_power_bars() {
        assert_eq!(hunger_bars(0), 0);
        assert_eq!(hunger_bars(1), 1);
        assert_eq!(hunger_bars(50), 3);
        assert_eq!(hunger_bars(1000), 5);

        assert_eq!(power_to_barcount(-1), -1);
        assert_eq!(power_to_barcount(0), 1);
        assert_eq!(power_to_barcount(10), 2);
        assert_eq!(power_to_barcount(135), 8);
        assert_eq!(power_to_barcount(200), 10);
    }

    #[test]
    fn stepdown_curve() {
        assert_eq!(stepdown(0, 50), 0);
        assert_eq!(stepdown(50, 50), 50);
        assert_eq!(stepdown(150, 50), 100);
    }

    #[test]
    fn range_scales_with_power() {
        let tongue = SpellType::FlameTongue.data();
        assert_eq!(spell_range(&tongue, 0, 7), 1);
        assert_eq!(spell_range(&tongue, 20, 7), 3);
        assert_eq!(spell_range(&tongue, 40, 7), 4);
        assert_eq!(spell_range(&tongue, 500, 7), 4);
        assert_eq!(spell_range(&tongue, 40, 2), 2);
    }

    #[test]
    fn fixed_range_ignores_power() {
        let dart = SpellType::MagicDart.data();
        assert_eq!(spell_range(&dart, 0, 7), 7);
        assert_eq!(spell_range(&dart, 25, 5), 5);
        assert_eq!(spell_range(&SpellType::NoSpell.data(), 10, 7), 0);
    }
}
