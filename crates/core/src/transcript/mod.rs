//! Transcript analysis: readability, technical domain, clarity and
//! explanation structure.

mod domains;
mod readability;
mod structure;

use crate::util::{normalize, round_to, sentences, NEUTRAL_SCORE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use domains::{
    detect_domains, detected_domain, domain_keyword_hits, extract_key_terms, TechDomain,
    MAX_KEY_TERMS,
};
pub use readability::{
    clarity_score, coleman_liau_index, complexity_score, flesch_reading_ease, gunning_fog,
    smog_index, TextStats,
};
pub use structure::{analyze_structure, ExplanationStructure};

const LOG_TARGET: &str = "transcript::analyze";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSummary {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    /// Flesch reading ease; higher reads easier.
    pub readability_score: f64,
    pub complexity_score: f64,
    pub clarity_score: f64,
    pub tech_term_score: f64,
    pub detected_domain: TechDomain,
    pub domain_scores: BTreeMap<TechDomain, f64>,
    pub key_terms_used: Vec<String>,
    /// Every keyword of the detected domain heard in the talk, uncapped.
    #[serde(default)]
    pub domain_keywords_used: Vec<String>,
    pub explanation_structure: ExplanationStructure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranscriptSummary {
    /// Summary for a transcript with no words: neutral scores, uniform
    /// domain weights.
    pub fn neutral(note: impl Into<String>) -> Self {
        let share = 1.0 / TechDomain::ALL.len() as f64;
        Self {
            word_count: 0,
            sentence_count: 0,
            avg_sentence_length: 0.0,
            readability_score: 0.0,
            complexity_score: 0.0,
            clarity_score: NEUTRAL_SCORE,
            tech_term_score: NEUTRAL_SCORE,
            detected_domain: TechDomain::ALL[0],
            domain_scores: TechDomain::ALL.iter().map(|d| (*d, share)).collect(),
            key_terms_used: Vec::new(),
            domain_keywords_used: Vec::new(),
            explanation_structure: ExplanationStructure::default(),
            error: Some(note.into()),
        }
    }
}

/// Analyzes raw transcript text.
///
/// Sentences are split on the raw text before punctuation is stripped,
/// then each one is normalized the same way as the full text.
pub fn analyze_transcript(transcript: &str) -> TranscriptSummary {
    let clean = normalize(transcript);
    let words: Vec<&str> = clean.split_whitespace().collect();
    if words.is_empty() {
        tracing::warn!(target: LOG_TARGET, "transcript has no words, using neutral defaults");
        return TranscriptSummary::neutral("transcript contains no words");
    }

    let sentence_list: Vec<String> = sentences(transcript)
        .into_iter()
        .map(normalize)
        .filter(|s| !s.is_empty())
        .collect();
    let sentence_count = sentence_list.len();
    let avg_sentence_length = words.len() as f64 / sentence_count.max(1) as f64;

    let stats = TextStats::from_words(words.iter().copied(), sentence_count);
    let readability = flesch_reading_ease(&stats);
    let complexity = complexity_score(&stats);

    let domain_scores = detect_domains(&clean);
    let domain = detected_domain(&domain_scores);
    let domain_share = domain_scores.get(&domain).copied().unwrap_or(0.0);
    let tech_term_score = (domain_share * 10.0).min(10.0);

    let clarity = clarity_score(readability, complexity, avg_sentence_length);
    let key_terms_used = extract_key_terms(&clean, domain);
    let domain_keywords_used = domain_keyword_hits(&clean, domain)
        .into_iter()
        .map(str::to_owned)
        .collect();
    let explanation_structure = analyze_structure(&sentence_list);

    tracing::debug!(
        target: LOG_TARGET,
        words = words.len(),
        sentences = sentence_count,
        domain = domain.as_str(),
        readability,
        clarity,
        "transcript summary computed"
    );

    TranscriptSummary {
        word_count: words.len(),
        sentence_count,
        avg_sentence_length: round_to(avg_sentence_length, 1),
        readability_score: round_to(readability, 1),
        complexity_score: round_to(complexity, 1),
        clarity_score: round_to(clarity, 1),
        tech_term_score: round_to(tech_term_score, 1),
        detected_domain: domain,
        domain_scores,
        key_terms_used,
        domain_keywords_used,
        explanation_structure,
        error: None,
    }
}
