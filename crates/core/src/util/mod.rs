pub mod stats;
pub mod text;

pub use stats::{clamp_score, mean, round_to, std_dev};
pub use text::{count_syllables, fragments_per_terminator, normalize, sentences};

/// Score substituted whenever a signal is missing or cannot be measured.
pub const NEUTRAL_SCORE: f64 = 5.0;
