use crate::util::clamp_score;

const OPTIMAL_WPM_MIN: f64 = 120.0;
const OPTIMAL_WPM_MAX: f64 = 160.0;
const OPTIMAL_PAUSE_FREQUENCY: f64 = 4.0;
const OPTIMAL_PAUSE_MIN: f64 = 3.0;
const OPTIMAL_PAUSE_MAX: f64 = 5.0;
/// Pitch variability below this reads as monotone.
const MONOTONE_PITCH_VARIABILITY: f64 = 0.05;
const ERRATIC_PITCH_VARIABILITY: f64 = 0.3;

/// `peak` inside `[min, max]`, falling linearly to zero at 0 and at `2 * max`.
fn band_score(value: f64, min: f64, max: f64, peak: f64) -> f64 {
    if value < min {
        peak * (value / min)
    } else if value > max {
        peak * (2.0 - value / max)
    } else {
        peak
    }
}

pub fn fluency_score(words_per_minute: f64, pause_frequency: f64, filler_word_rate: f64) -> f64 {
    let wpm = band_score(words_per_minute, OPTIMAL_WPM_MIN, OPTIMAL_WPM_MAX, 7.0);
    let pauses = (3.0 - (pause_frequency - OPTIMAL_PAUSE_FREQUENCY).abs() * 0.3).max(0.0);
    let filler_penalty = (filler_word_rate * 50.0).min(5.0);
    clamp_score(wpm + pauses - filler_penalty)
}

pub fn pace_score(words_per_minute: f64, pause_frequency: f64) -> f64 {
    let wpm = band_score(words_per_minute, OPTIMAL_WPM_MIN, OPTIMAL_WPM_MAX, 6.0);
    let pauses = band_score(pause_frequency, OPTIMAL_PAUSE_MIN, OPTIMAL_PAUSE_MAX, 4.0);
    clamp_score(wpm + pauses)
}

/// Pitch contributes up to 5 (3 when monotone), volume stability up to 5.
pub fn voice_steadiness(pitch_variability: f64, volume_stability: f64) -> f64 {
    let pitch = if pitch_variability < MONOTONE_PITCH_VARIABILITY {
        3.0
    } else if pitch_variability > ERRATIC_PITCH_VARIABILITY {
        let excess = (pitch_variability - ERRATIC_PITCH_VARIABILITY) / ERRATIC_PITCH_VARIABILITY;
        5.0 * (1.0 - excess.min(1.0))
    } else {
        5.0
    };
    clamp_score(pitch + volume_stability / 2.0)
}
