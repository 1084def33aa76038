//! Tokenizing helpers used by both the voice and transcript analysis.

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];
const SYLLABLE_STRIP: [char; 6] = [',', '.', '!', '?', ';', ':'];

/// Estimates syllables by counting vowel groups.
///
/// Words of three characters or fewer are one syllable. A trailing silent
/// `e` (but not `le`) is discounted. Never returns less than one.
pub fn count_syllables(word: &str) -> usize {
    let word: String = word
        .to_lowercase()
        .chars()
        .filter(|c| !SYLLABLE_STRIP.contains(c))
        .collect();

    if word.chars().count() <= 3 {
        return 1;
    }

    let mut count = 0usize;
    let mut prev_is_vowel = false;
    for c in word.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_is_vowel {
            count += 1;
        }
        prev_is_vowel = is_vowel;
    }

    if word.ends_with('e') && !word.ends_with("le") {
        count = count.saturating_sub(1);
    }

    count.max(1)
}

/// Lowercases, replaces ASCII punctuation with spaces and collapses runs of
/// whitespace into single spaces.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits on `.`, `!` and `?`, keeping a trailing unterminated fragment.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    for (idx, c) in text.char_indices() {
        if SENTENCE_TERMINATORS.contains(&c) {
            let part = text[start..idx].trim();
            if !part.is_empty() {
                out.push(part);
            }
            start = idx + c.len_utf8();
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Splits the whole text once per terminator, in `.`, `!`, `?` order, and
/// keeps every fragment that precedes an occurrence of that terminator.
///
/// With mixed punctuation the fragments overlap: in `"a. b? c."` the `.`
/// pass yields `a` and `b? c` while the `?` pass yields `a. b`.
pub fn fragments_per_terminator(text: &str) -> Vec<&str> {
    SENTENCE_TERMINATORS
        .iter()
        .flat_map(|mark| {
            let mut pieces: Vec<&str> = text.split(*mark).collect();
            // the piece after the last terminator
            pieces.pop();
            pieces
        })
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
