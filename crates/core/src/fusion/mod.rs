//! Weighted fusion of the three modality summaries into final scores.

mod recommend;

use crate::config::RecommendationConfig;
use crate::emotion::EmotionSummary;
use crate::transcript::TranscriptSummary;
use crate::util::{clamp_score, round_to};
use crate::voice::VoiceSummary;
use serde::{Deserialize, Serialize};

pub use recommend::{recommend, PRAISE};

const LOG_TARGET: &str = "fusion";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct FinalScores {
    pub content_clarity: f64,
    pub technical_vocabulary: f64,
    pub delivery: f64,
    pub confidence: f64,
    pub engagement: f64,
    pub overall: f64,
}

/// Fixed linear combinations, rounded to one decimal.
///
/// `engagement` adds the raw pitch range ratio, not a 0-10 score, so it is
/// clamped into `[0, 10]`. `overall` reads the per-modality scores directly
/// rather than the fused ones.
pub fn fuse(
    transcript: &TranscriptSummary,
    emotion: &EmotionSummary,
    voice: &VoiceSummary,
) -> FinalScores {
    let scores = FinalScores {
        content_clarity: round_to(
            0.7 * transcript.clarity_score + 0.3 * voice.speech_coherence,
            1,
        ),
        technical_vocabulary: round_to(transcript.tech_term_score, 1),
        delivery: round_to(0.6 * voice.fluency_score + 0.4 * voice.pace_score, 1),
        confidence: round_to(
            0.5 * emotion.confidence_score + 0.5 * voice.voice_steadiness,
            1,
        ),
        engagement: round_to(
            clamp_score(0.7 * emotion.engagement_score + 0.3 * voice.pitch_variation),
            1,
        ),
        overall: round_to(
            0.25 * transcript.clarity_score
                + 0.15 * transcript.tech_term_score
                + 0.2 * voice.fluency_score
                + 0.2 * emotion.confidence_score
                + 0.2 * emotion.engagement_score,
            1,
        ),
    };
    tracing::debug!(target: LOG_TARGET, overall = scores.overall, "scores fused");
    scores
}

/// Final scores plus the remarks they trigger.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub scores: FinalScores,
    pub recommendations: Vec<String>,
}

pub fn assess(
    transcript: &TranscriptSummary,
    emotion: &EmotionSummary,
    voice: &VoiceSummary,
    config: &RecommendationConfig,
) -> Feedback {
    let scores = fuse(transcript, emotion, voice);
    let recommendations = recommend(&scores, transcript, emotion, voice, config);
    Feedback {
        scores,
        recommendations,
    }
}
