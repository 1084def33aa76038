use crate::config::RecommendationConfig;
use crate::emotion::EmotionSummary;
use crate::fusion::FinalScores;
use crate::transcript::TranscriptSummary;
use crate::voice::VoiceSummary;

const LOG_TARGET: &str = "fusion::recommend";

const PACE_MIN_WPM: f64 = 120.0;
const PACE_MAX_WPM: f64 = 150.0;
const FILLER_RATE_LIMIT: f64 = 0.05;
const PAUSES_MIN_PER_MINUTE: f64 = 3.0;
const PAUSES_MAX_PER_MINUTE: f64 = 5.0;
const EYE_CONTACT_MIN_PERCENT: f64 = 60.0;
const SMILE_MIN_PERCENT: f64 = 30.0;
/// Pitch range over mean below this sounds flat.
const MONOTONE_PITCH_VARIATION: f64 = 0.5;
const SUGGESTED_TERMS: usize = 3;

pub const PRAISE: &str =
    "Excellent presentation! Your content, delivery and presence all came across strongly.";

/// Threshold-driven remarks in a fixed order: clarity, vocabulary,
/// delivery, confidence, engagement. The praise remark is only added when
/// nothing else fired and the overall score is high enough.
pub fn recommend(
    scores: &FinalScores,
    transcript: &TranscriptSummary,
    emotion: &EmotionSummary,
    voice: &VoiceSummary,
    config: &RecommendationConfig,
) -> Vec<String> {
    let threshold = config.remark_threshold;
    let mut remarks = Vec::new();

    if scores.content_clarity < threshold {
        clarity_remarks(transcript, voice, threshold, &mut remarks);
    }
    if scores.technical_vocabulary < threshold {
        vocabulary_remarks(transcript, threshold, &mut remarks);
    }
    if scores.delivery < threshold {
        delivery_remarks(voice, threshold, &mut remarks);
    }
    if scores.confidence < threshold {
        confidence_remarks(emotion, voice, threshold, &mut remarks);
    }
    if scores.engagement < threshold {
        engagement_remarks(emotion, voice, threshold, &mut remarks);
    }

    if remarks.is_empty() && scores.overall >= config.praise_threshold {
        remarks.push(PRAISE.to_owned());
    }

    tracing::debug!(target: LOG_TARGET, count = remarks.len(), "recommendations generated");
    remarks
}

fn clarity_remarks(
    transcript: &TranscriptSummary,
    voice: &VoiceSummary,
    threshold: f64,
    out: &mut Vec<String>,
) {
    if transcript.clarity_score < threshold {
        out.push(format!(
            "Make your explanations easier to follow: aim for sentences of about 20 words \
             (yours average {:.1}) and explain jargon when you first use it.",
            transcript.avg_sentence_length
        ));
    }
    if voice.speech_coherence < threshold {
        out.push(
            "Deliver each idea as one complete sentence and keep sentence lengths \
             moderately varied so your reasoning is easy to track."
                .to_owned(),
        );
    }
    let structure = &transcript.explanation_structure;
    if !structure.has_introduction {
        out.push(
            "Open with a short introduction that tells the audience what you are going to cover."
                .to_owned(),
        );
    }
    if !structure.has_conclusion {
        out.push("Close with a brief summary of your key points.".to_owned());
    }
}

fn vocabulary_remarks(transcript: &TranscriptSummary, threshold: f64, out: &mut Vec<String>) {
    if transcript.tech_term_score >= threshold {
        return;
    }
    let domain = transcript.detected_domain;
    let unused: Vec<&str> = domain
        .keywords()
        .iter()
        .copied()
        .filter(|k| !transcript.domain_keywords_used.iter().any(|t| t == k))
        .take(SUGGESTED_TERMS)
        .collect();

    if unused.is_empty() {
        out.push(format!(
            "Use more precise {} terminology to demonstrate technical depth.",
            domain.display_name()
        ));
    } else {
        out.push(format!(
            "Use more precise {} terminology to demonstrate technical depth, \
             for example: {}.",
            domain.display_name(),
            unused.join(", ")
        ));
    }
}

fn delivery_remarks(voice: &VoiceSummary, threshold: f64, out: &mut Vec<String>) {
    if voice.fluency_score < threshold {
        let before = out.len();
        if voice.words_per_minute < PACE_MIN_WPM {
            out.push(format!(
                "Speak a little faster: {:.0} words per minute is below the 120-150 range \
                 that keeps listeners engaged.",
                voice.words_per_minute
            ));
        } else if voice.words_per_minute > PACE_MAX_WPM {
            out.push(format!(
                "Slow down: {:.0} words per minute is above the 120-150 range \
                 listeners can comfortably follow.",
                voice.words_per_minute
            ));
        }
        if voice.filler_word_rate > FILLER_RATE_LIMIT {
            out.push(format!(
                "Cut filler words such as \"um\" and \"like\"; they made up {:.0}% of your words.",
                voice.filler_word_rate * 100.0
            ));
        }
        if out.len() == before {
            out.push("Rehearse the talk aloud to smooth out hesitations.".to_owned());
        }
    }
    if voice.pace_score < threshold {
        if voice.pause_frequency < PAUSES_MIN_PER_MINUTE {
            out.push(format!(
                "Pause more often to let key points land; you paused {:.1} times per minute.",
                voice.pause_frequency
            ));
        } else if voice.pause_frequency > PAUSES_MAX_PER_MINUTE {
            out.push(format!(
                "Reduce long or frequent pauses; you paused {:.1} times per minute.",
                voice.pause_frequency
            ));
        }
    }
}

fn confidence_remarks(
    emotion: &EmotionSummary,
    voice: &VoiceSummary,
    threshold: f64,
    out: &mut Vec<String>,
) {
    if emotion.confidence_score < threshold {
        if emotion.eye_contact_percentage < EYE_CONTACT_MIN_PERCENT {
            out.push(format!(
                "Maintain eye contact with the camera; you looked at it in {:.0}% of the frames \
                 where your face was visible.",
                emotion.eye_contact_percentage
            ));
        } else {
            out.push(
                "Keep an upright posture and a relaxed, open expression to project confidence."
                    .to_owned(),
            );
        }
    }
    if voice.voice_steadiness < threshold {
        out.push(
            "Keep your voice steady: breathe from the diaphragm and hold a consistent volume."
                .to_owned(),
        );
    }
}

fn engagement_remarks(
    emotion: &EmotionSummary,
    voice: &VoiceSummary,
    threshold: f64,
    out: &mut Vec<String>,
) {
    if emotion.engagement_score < threshold && emotion.smile_percentage < SMILE_MIN_PERCENT {
        out.push(
            "Smile and let your facial expressions show enthusiasm for the topic.".to_owned(),
        );
    }
    // No voiced audio means there is no pitch to judge.
    if voice.pitch_mean > 0.0 && voice.pitch_variation < MONOTONE_PITCH_VARIATION {
        out.push(
            "Vary your pitch to emphasize important points and avoid sounding monotone."
                .to_owned(),
        );
    }
}
