//! Reading-ease and grade-level indices over normalized words.

use crate::util::count_syllables;

/// Counts the indices are computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    pub letters: usize,
    /// Words of three or more syllables.
    pub polysyllables: usize,
}

impl TextStats {
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>, sentences: usize) -> Self {
        let mut stats = TextStats {
            sentences: sentences.max(1),
            ..TextStats::default()
        };
        for word in words {
            let syllables = count_syllables(word);
            stats.words += 1;
            stats.syllables += syllables;
            stats.letters += word.chars().filter(|c| c.is_alphabetic()).count();
            if syllables >= 3 {
                stats.polysyllables += 1;
            }
        }
        stats
    }

    fn words_per_sentence(&self) -> f64 {
        self.words as f64 / self.sentences as f64
    }
}

pub fn flesch_reading_ease(stats: &TextStats) -> f64 {
    if stats.words == 0 {
        return 0.0;
    }
    let syllables_per_word = stats.syllables as f64 / stats.words as f64;
    206.835 - 1.015 * stats.words_per_sentence() - 84.6 * syllables_per_word
}

pub fn gunning_fog(stats: &TextStats) -> f64 {
    if stats.words == 0 {
        return 0.0;
    }
    let complex_share = stats.polysyllables as f64 / stats.words as f64 * 100.0;
    0.4 * (stats.words_per_sentence() + complex_share)
}

/// SMOG grade; undefined below three sentences, reported as 0.
pub fn smog_index(stats: &TextStats) -> f64 {
    if stats.sentences < 3 {
        return 0.0;
    }
    1.043 * (stats.polysyllables as f64 * 30.0 / stats.sentences as f64).sqrt() + 3.1291
}

pub fn coleman_liau_index(stats: &TextStats) -> f64 {
    if stats.words == 0 {
        return 0.0;
    }
    let letters_per_100 = stats.letters as f64 / stats.words as f64 * 100.0;
    let sentences_per_100 = stats.sentences as f64 / stats.words as f64 * 100.0;
    0.0588 * letters_per_100 - 0.296 * sentences_per_100 - 15.8
}

/// Mean of fog, SMOG and Coleman-Liau, halved and clamped into `[0, 10]`.
pub fn complexity_score(stats: &TextStats) -> f64 {
    let grade = (gunning_fog(stats) + smog_index(stats) + coleman_liau_index(stats)) / 3.0;
    (grade / 2.0).clamp(0.0, 10.0)
}

/// Combines reading ease, sentence length and complexity into `[0, 10]`.
///
/// Sentences around 20 words score best; complexity above 5 is penalized.
pub fn clarity_score(readability: f64, complexity: f64, avg_sentence_length: f64) -> f64 {
    let normalized_readability = (readability / 10.0).min(10.0);
    let complexity_penalty = (complexity - 5.0).max(0.0) / 2.0;
    let sentence_length_score = 10.0 - ((avg_sentence_length - 20.0).abs() / 3.0).min(5.0);

    (normalized_readability * 0.5 + sentence_length_score * 0.5 - complexity_penalty)
        .clamp(0.0, 10.0)
}
