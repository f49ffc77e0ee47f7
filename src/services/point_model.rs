/// Share of rallies the serving side loses; serving is a disadvantage.
pub const SERVING_LOSS_RATE: f64 = 0.5754;
pub const RATING_SCALE: f64 = 1.0;
pub const SIDE_ADVANTAGE_STEP: f64 = 0.01;
pub const MIN_POINT_PROBABILITY: f64 = 0.05;
pub const MAX_POINT_PROBABILITY: f64 = 0.95;

/// Probability that side A wins the next rally.
///
/// Elo-style logistic on the rating gap, shifted by the serving penalty and
/// by `side_advantage` percentage points (positive favours A), then clamped
/// so no rally is ever decided in advance.
pub fn point_win_probability(
    strength_a: f64,
    strength_b: f64,
    a_serving: bool,
    side_advantage: i32,
) -> f64 {
    let base = 1.0 / (1.0 + 10f64.powf((strength_b - strength_a) / RATING_SCALE));

    let serving_penalty = SERVING_LOSS_RATE - 0.5;
    let served = if a_serving {
        base - serving_penalty
    } else {
        base + serving_penalty
    };

    let biased = served + f64::from(side_advantage) * SIDE_ADVANTAGE_STEP;
    biased.clamp(MIN_POINT_PROBABILITY, MAX_POINT_PROBABILITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn equal_strengths_apply_only_the_serving_penalty() {
        assert!((point_win_probability(4.5, 4.5, true, 0) - 0.4246).abs() < EPSILON);
        assert!((point_win_probability(4.5, 4.5, false, 0) - 0.5754).abs() < EPSILON);
    }

    #[test]
    fn side_advantage_shifts_by_whole_percentage_points() {
        let neutral = point_win_probability(4.0, 4.0, true, 0);
        assert!((point_win_probability(4.0, 4.0, true, 3) - (neutral + 0.03)).abs() < EPSILON);
        assert!((point_win_probability(4.0, 4.0, true, -5) - (neutral - 0.05)).abs() < EPSILON);
    }

    #[test]
    fn extreme_gaps_are_clamped() {
        assert_eq!(point_win_probability(8.0, 2.0, false, 5), MAX_POINT_PROBABILITY);
        assert_eq!(point_win_probability(2.0, 8.0, true, -5), MIN_POINT_PROBABILITY);
    }

    #[test]
    fn probability_is_monotonic_in_rating_gap() {
        for a_serving in [true, false] {
            for side_advantage in [-5, 0, 5] {
                let mut previous = 0.0;
                for step in -60..=60 {
                    let gap = f64::from(step) * 0.1;
                    let p = point_win_probability(4.0 + gap, 4.0, a_serving, side_advantage);
                    assert!(p >= previous, "gap {gap} decreased probability");
                    assert!((MIN_POINT_PROBABILITY..=MAX_POINT_PROBABILITY).contains(&p));
                    previous = p;
                }
            }
        }
    }

    #[test]
    fn one_rating_point_is_a_tenfold_odds_ratio() {
        let p = point_win_probability(5.0, 4.0, true, 0) + (SERVING_LOSS_RATE - 0.5);
        assert!((p - 10.0 / 11.0).abs() < 1e-9);
    }
}
