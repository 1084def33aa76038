use crate::util::{count_syllables, fragments_per_terminator, round_to, std_dev, NEUTRAL_SCORE};
use serde::{Deserialize, Serialize};

pub const FILLER_WORDS: [&str; 13] = [
    "um",
    "uh",
    "er",
    "ah",
    "like",
    "you know",
    "so",
    "actually",
    "basically",
    "literally",
    "kind of",
    "sort of",
    "i mean",
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeechRate {
    pub word_count: usize,
    pub syllable_count: usize,
    pub words_per_minute: f64,
    pub syllables_per_minute: f64,
}

/// Words and syllables per minute, both zero when `duration_secs` is zero.
pub fn speech_rate(transcript: &str, duration_secs: f64) -> SpeechRate {
    let words: Vec<&str> = transcript.split_whitespace().collect();
    let word_count = words.len();
    let syllable_count: usize = words.iter().map(|w| count_syllables(w)).sum();

    let per_minute = |count: usize| {
        if duration_secs > 0.0 {
            round_to(count as f64 / duration_secs * 60.0, 1)
        } else {
            0.0
        }
    };

    SpeechRate {
        word_count,
        syllable_count,
        words_per_minute: per_minute(word_count),
        syllables_per_minute: per_minute(syllable_count),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FillerCount {
    pub word: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FillerStats {
    pub fillers: Vec<FillerCount>,
    pub total: usize,
    /// Fillers per transcript word, 3 decimals.
    pub rate: f64,
}

/// Counts fillers surrounded by single spaces in the lowercased transcript.
///
/// A filler at the very start or end of the transcript, or touching
/// punctuation, is not counted. The fluency weights are tuned for this.
pub fn count_fillers(transcript: &str) -> FillerStats {
    let lower = transcript.to_lowercase();
    let mut fillers = Vec::new();
    let mut total = 0usize;

    for filler in FILLER_WORDS {
        let count = lower.matches(&format!(" {filler} ")).count();
        if count > 0 {
            total += count;
            fillers.push(FillerCount {
                word: filler.to_owned(),
                count,
            });
        }
    }

    let word_count = transcript.split_whitespace().count();
    let rate = if word_count > 0 {
        round_to(total as f64 / word_count as f64, 3)
    } else {
        0.0
    };

    FillerStats {
        fillers,
        total,
        rate,
    }
}

/// Scores sentence-length balance in `[0, 10]`.
///
/// Sentences come from one split per terminal punctuation mark (see
/// [`fragments_per_terminator`]), falling back to comma-separated clauses.
/// One sentence or fewer yields the neutral score.
pub fn speech_coherence(transcript: &str) -> f64 {
    let mut parts = fragments_per_terminator(transcript);
    if parts.len() <= 1 {
        parts = transcript
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
    }
    if parts.len() <= 1 {
        return NEUTRAL_SCORE;
    }

    let lengths: Vec<f64> = parts
        .iter()
        .map(|p| p.split_whitespace().count() as f64)
        .collect();
    let avg = lengths.iter().sum::<f64>() / lengths.len() as f64;

    let length_score = if avg < 5.0 {
        3.0 + (avg / 5.0) * 2.0
    } else if avg > 25.0 {
        7.0 - ((avg - 25.0) / 10.0).min(4.0)
    } else {
        7.0
    };

    let spread = std_dev(&lengths).unwrap_or(0.0);
    let variation_score = if !(1.0..=15.0).contains(&spread) {
        1.0
    } else {
        3.0 - ((spread - 5.0).abs() / 3.0).min(2.0)
    };

    (length_score + variation_score).clamp(0.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_per_minute() {
        let r = speech_rate("one two three four five six", 3.0);
        assert_eq!(r.word_count, 6);
        assert_eq!(r.words_per_minute, 120.0);
        assert_eq!(r.syllable_count, 6);
        assert_eq!(r.syllables_per_minute, 120.0);
    }

    #[test]
    fn rate_with_zero_duration() {
        let r = speech_rate("one two", 0.0);
        assert_eq!(r.words_per_minute, 0.0);
        assert_eq!(r.syllables_per_minute, 0.0);
    }

    #[test]
    fn fillers_need_surrounding_spaces() {
        let stats = count_fillers("Um we um basically you know shipped it so");
        // leading "Um" and trailing "so" are not padded by spaces
        assert_eq!(stats.total, 3);
        assert_eq!(
            stats.fillers,
            vec![
                FillerCount {
                    word: "um".to_owned(),
                    count: 1
                },
                FillerCount {
                    word: "you know".to_owned(),
                    count: 1
                },
                FillerCount {
                    word: "basically".to_owned(),
                    count: 1
                },
            ]
        );
        assert_eq!(stats.rate, 0.333);
    }

    #[test]
    fn fillers_on_empty_transcript() {
        let stats = count_fillers("");
        assert_eq!(stats.total, 0);
        assert_eq!(stats.rate, 0.0);
    }

    #[test]
    fn coherence_single_sentence_is_neutral() {
        assert_eq!(speech_coherence("Just one sentence here."), 5.0);
        assert_eq!(speech_coherence(""), 5.0);
    }

    #[test]
    fn coherence_balanced_sentences() {
        // lengths 3, 5, 7: avg 5 inside the band, population std ~1.633
        let score =
            speech_coherence("I like Rust. It is fast and safe. We use it every day at work.");
        let expected = 7.0 + 3.0 - ((8.0f64 / 3.0).sqrt() - 5.0).abs() / 3.0;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn coherence_mixed_terminators_use_overlapping_fragments() {
        // fragments "A b c", "D e f? G h", "A b c. D e f": lengths 3, 5, 6
        let score = speech_coherence("A b c. D e f? G h.");
        let avg = 14.0 / 3.0;
        let spread = std_dev(&[3.0, 5.0, 6.0]).expect("non-empty");
        let expected = 3.0 + avg / 5.0 * 2.0 + 3.0 - (spread - 5.0).abs() / 3.0;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn coherence_comma_fallback_with_uniform_clauses() {
        // two clauses of 2 words: avg 2 -> 3.8, std 0 -> 1.0
        let score = speech_coherence("first clause, second clause");
        assert!((score - 4.8).abs() < 1e-9);
    }

    #[test]
    fn coherence_long_sentences_penalized() {
        let long = vec!["word"; 45].join(" ");
        let text = format!("{long}. {long}.");
        // avg 45 -> 7 - 2, std 0 -> 1
        assert!((speech_coherence(&text) - 6.0).abs() < 1e-9);
    }
}
