use serde::{Deserialize, Serialize};

const INTRO_MARKERS: [&str; 6] = [
    "introduce",
    "overview",
    "going to",
    "will be",
    "today",
    "talk about",
];
const CONCLUSION_MARKERS: [&str; 6] = [
    "conclude",
    "summary",
    "in conclusion",
    "finally",
    "to sum up",
    "in the end",
];
const TRANSITION_MARKERS: [&str; 6] = [
    "next",
    "furthermore",
    "moreover",
    "additionally",
    "however",
    "therefore",
];

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExplanationStructure {
    pub has_introduction: bool,
    pub has_conclusion: bool,
    pub transition_count: usize,
    /// 3 per intro/conclusion plus one per transition up to 4; at most 10.
    pub structure_score: u32,
}

/// Looks for intro markers in the first fifth of the sentences, conclusion
/// markers in the last fifth and transitions anywhere.
pub fn analyze_structure(sentences: &[String]) -> ExplanationStructure {
    let n = sentences.len();
    let intro_end = ((n as f64 * 0.2) as usize).max(1).min(n);
    let conclusion_start = (n as f64 * 0.8) as usize;

    let intro = sentences[..intro_end].join(" ").to_lowercase();
    let conclusion = sentences[conclusion_start..].join(" ").to_lowercase();

    let has_introduction = INTRO_MARKERS.iter().any(|m| intro.contains(m));
    let has_conclusion = CONCLUSION_MARKERS.iter().any(|m| conclusion.contains(m));

    // Every (sentence, marker) hit counts.
    let transition_count = sentences
        .iter()
        .map(|s| {
            let lower = s.to_lowercase();
            TRANSITION_MARKERS
                .iter()
                .filter(|m| lower.contains(**m))
                .count()
        })
        .sum::<usize>();

    let mut structure_score = 0u32;
    if has_introduction {
        structure_score += 3;
    }
    if has_conclusion {
        structure_score += 3;
    }
    structure_score += transition_count.min(4) as u32;

    ExplanationStructure {
        has_introduction,
        has_conclusion,
        transition_count,
        structure_score: structure_score.min(10),
    }
}
