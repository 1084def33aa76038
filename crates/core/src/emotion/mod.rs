mod aggregator;

use crate::util::NEUTRAL_SCORE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use aggregator::{confidence_score, engagement_score, summarize_frames};

/// Emotion classes reported by the frame classifier.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Emotion {
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "happy")]
    Happy,
    #[serde(rename = "sad")]
    Sad,
    #[serde(rename = "angry")]
    Angry,
    #[serde(rename = "fear")]
    Fearful,
    #[serde(rename = "disgust")]
    Disgusted,
    #[serde(rename = "surprise")]
    Surprised,
}

impl Emotion {
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fearful => "fear",
            Emotion::Disgusted => "disgust",
            Emotion::Surprised => "surprise",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    #[error("emotion weight for {label:?} must be finite and non-negative, got {value}")]
    InvalidWeight { label: String, value: f64 },
    #[error("emotion weights sum to zero")]
    Empty,
}

/// Probability per emotion label, always summing to 1.0.
///
/// Labels are free-form strings so classifiers with extra classes pass
/// through untouched; [`Emotion`] covers the ones the scores read.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct EmotionDistribution(BTreeMap<String, f64>);

impl EmotionDistribution {
    pub fn neutral() -> Self {
        Self(BTreeMap::from([(Emotion::Neutral.label().to_owned(), 1.0)]))
    }

    /// Sums weights per label (repeated labels accumulate) and rescales the
    /// totals to 1.0.
    pub fn from_weights<I>(weights: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut sums: BTreeMap<String, f64> = BTreeMap::new();
        for (label, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(DistributionError::InvalidWeight { label, value });
            }
            *sums.entry(label).or_insert(0.0) += value;
        }

        let total: f64 = sums.values().sum();
        if total <= 0.0 {
            return Err(DistributionError::Empty);
        }
        for v in sums.values_mut() {
            *v /= total;
        }
        Ok(Self(sums))
    }

    pub fn probability(&self, emotion: Emotion) -> f64 {
        self.get(emotion.label()).unwrap_or(0.0)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl TryFrom<BTreeMap<String, f64>> for EmotionDistribution {
    type Error = DistributionError;

    fn try_from(value: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_weights(value)
    }
}

impl From<EmotionDistribution> for BTreeMap<String, f64> {
    fn from(value: EmotionDistribution) -> Self {
        value.0
    }
}

/// One sampled video frame as seen by the face/emotion classifier.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FrameObservation {
    pub face_detected: bool,
    #[serde(default)]
    pub emotion_distribution: BTreeMap<String, f64>,
    #[serde(default)]
    pub is_smiling: bool,
    #[serde(default)]
    pub eye_contact: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmotionSummary {
    pub face_detected: bool,
    pub confidence_score: f64,
    pub engagement_score: f64,
    pub emotion_distribution: EmotionDistribution,
    /// Share of face frames with eye contact, in percent.
    pub eye_contact_percentage: f64,
    /// Share of face frames with a smile, in percent.
    pub smile_percentage: f64,
    pub attention_score: f64,
    pub frame_count: usize,
    pub faces_detected_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmotionSummary {
    /// Summary used when no face was ever seen.
    pub fn neutral(frame_count: usize, note: impl Into<String>) -> Self {
        Self {
            face_detected: false,
            confidence_score: NEUTRAL_SCORE,
            engagement_score: NEUTRAL_SCORE,
            emotion_distribution: EmotionDistribution::neutral(),
            eye_contact_percentage: 0.0,
            smile_percentage: 0.0,
            attention_score: NEUTRAL_SCORE,
            frame_count,
            faces_detected_count: 0,
            error: Some(note.into()),
        }
    }
}
