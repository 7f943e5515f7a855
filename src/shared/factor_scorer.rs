use crate::sensor_ranges::SensorRange;

/// Score returned when a factor has no reading
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Suitability of one reading against its range, in `[0, 1]`.
///
/// Missing readings score [`NEUTRAL_SCORE`]. Values outside the lethal bounds
/// (and NaN) score 0. Values inside the ideal band score 1. Between the two
/// the score is linear. A zero-width slope between an ideal and a lethal
/// bound scores 0.
pub fn score_factor(value: Option<f64>, range: &SensorRange) -> f64 {
    let Some(value) = value else {
        return NEUTRAL_SCORE;
    };

    if !(range.letal_min..=range.letal_max).contains(&value) {
        return 0.0;
    }

    if (range.ideal_min..=range.ideal_max).contains(&value) {
        1.0
    } else if value < range.ideal_min {
        if range.ideal_min == range.letal_min {
            return 0.0;
        }
        (value - range.letal_min) / (range.ideal_min - range.letal_min)
    } else {
        if range.letal_max == range.ideal_max {
            return 0.0;
        }
        1.0 - (value - range.ideal_max) / (range.letal_max - range.ideal_max)
    }
}
