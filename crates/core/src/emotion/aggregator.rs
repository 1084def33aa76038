use crate::emotion::{
    DistributionError, Emotion, EmotionDistribution, EmotionSummary, FrameObservation,
};
use crate::util::{clamp_score, round_to};

const LOG_TARGET: &str = "emotion::aggregate";

/// Collapses per-frame classifier output into one [`EmotionSummary`].
///
/// Only frames with a detected face contribute to the distribution, smile
/// and eye-contact shares. With no frames or no faces the neutral summary
/// is returned instead.
pub fn summarize_frames(frames: &[FrameObservation]) -> EmotionSummary {
    if frames.is_empty() {
        tracing::warn!(target: LOG_TARGET, "no frames supplied, using neutral defaults");
        return EmotionSummary::neutral(0, "no frames extracted from video");
    }

    let total = frames.len();
    let faces: Vec<&FrameObservation> = frames.iter().filter(|f| f.face_detected).collect();
    if faces.is_empty() {
        tracing::warn!(target: LOG_TARGET, frames = total, "no faces detected, using neutral defaults");
        return EmotionSummary::neutral(total, "no faces detected in video frames");
    }

    let detected = faces.len() as f64;
    let face_share = detected / total as f64;
    let smile_share = faces.iter().filter(|f| f.is_smiling).count() as f64 / detected;
    let eye_contact_share = faces.iter().filter(|f| f.eye_contact).count() as f64 / detected;

    let (distribution, error) = match aggregate_distributions(&faces) {
        Ok(d) => (d, None),
        Err(e) => {
            tracing::warn!(target: LOG_TARGET, error = %e, "unusable emotion weights, assuming neutral");
            (EmotionDistribution::neutral(), Some(e.to_string()))
        }
    };

    let confidence = confidence_score(&distribution, smile_share, eye_contact_share);
    let engagement = engagement_score(&distribution, smile_share, eye_contact_share, face_share);
    let attention = (eye_contact_share * 10.0 + face_share * 10.0) / 2.0;

    tracing::debug!(
        target: LOG_TARGET,
        frames = total,
        faces = faces.len(),
        confidence,
        engagement,
        "emotion summary computed"
    );

    EmotionSummary {
        face_detected: true,
        confidence_score: round_to(confidence, 1),
        engagement_score: round_to(engagement, 1),
        emotion_distribution: distribution,
        eye_contact_percentage: round_to(eye_contact_share * 100.0, 1),
        smile_percentage: round_to(smile_share * 100.0, 1),
        attention_score: round_to(attention, 1),
        frame_count: total,
        faces_detected_count: faces.len(),
        error,
    }
}

// Sum of per-frame probabilities, renormalized. Labels missing from a frame
// contribute nothing for that frame.
fn aggregate_distributions(
    faces: &[&FrameObservation],
) -> Result<EmotionDistribution, DistributionError> {
    EmotionDistribution::from_weights(faces.iter().flat_map(|f| {
        f.emotion_distribution
            .iter()
            .map(|(label, p)| (label.clone(), *p))
    }))
}

/// Confidence in `[0, 10]`; shares are fractions in `[0, 1]`.
pub fn confidence_score(
    emotions: &EmotionDistribution,
    smile_share: f64,
    eye_contact_share: f64,
) -> f64 {
    let negative = emotions.probability(Emotion::Fearful)
        + emotions.probability(Emotion::Sad)
        + emotions.probability(Emotion::Angry)
        + emotions.probability(Emotion::Disgusted);
    let positive =
        emotions.probability(Emotion::Happy) + emotions.probability(Emotion::Surprised) * 0.5;

    let base = 5.0 + positive * 3.0 - negative * 3.0;
    clamp_score(base + smile_share * 2.0 + eye_contact_share * 3.0)
}

/// Engagement in `[0, 10]`; shares are fractions in `[0, 1]`.
pub fn engagement_score(
    emotions: &EmotionDistribution,
    smile_share: f64,
    eye_contact_share: f64,
    face_share: f64,
) -> f64 {
    // Negative emotions still read as engaged, just less so.
    let emotional = (emotions.probability(Emotion::Happy)
        + emotions.probability(Emotion::Surprised) * 0.8
        + emotions.probability(Emotion::Neutral) * 0.5
        + (emotions.probability(Emotion::Angry)
            + emotions.probability(Emotion::Sad)
            + emotions.probability(Emotion::Fearful)
            + emotions.probability(Emotion::Disgusted))
            * 0.3)
        * 5.0;

    clamp_score(emotional + eye_contact_share * 4.0 + smile_share * 2.0 + face_share * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn face(weights: &[(&str, f64)], smiling: bool, eye_contact: bool) -> FrameObservation {
        FrameObservation {
            face_detected: true,
            emotion_distribution: weights
                .iter()
                .map(|(k, v)| ((*k).to_owned(), *v))
                .collect::<BTreeMap<_, _>>(),
            is_smiling: smiling,
            eye_contact,
        }
    }

    fn no_face() -> FrameObservation {
        FrameObservation::default()
    }

    #[test]
    fn zero_frames_is_exact_neutral_default() {
        let s = summarize_frames(&[]);
        assert!(!s.face_detected);
        assert_eq!(s.confidence_score, 5.0);
        assert_eq!(s.engagement_score, 5.0);
        assert_eq!(s.attention_score, 5.0);
        assert_eq!(s.frame_count, 0);
        assert_eq!(s.emotion_distribution, EmotionDistribution::neutral());
        assert_eq!(s.eye_contact_percentage, 0.0);
        assert_eq!(s.smile_percentage, 0.0);
    }

    #[test]
    fn no_faces_keeps_frame_count() {
        let s = summarize_frames(&[no_face(), no_face(), no_face()]);
        assert!(!s.face_detected);
        assert_eq!(s.frame_count, 3);
        assert_eq!(s.confidence_score, 5.0);
        assert!(s.error.is_some());
    }

    #[test]
    fn distribution_is_summed_not_averaged() {
        let frames = [
            face(&[("happy", 1.0)], false, false),
            face(&[("happy", 0.5), ("sad", 0.5)], false, false),
            no_face(),
        ];
        let s = summarize_frames(&frames);
        let d = &s.emotion_distribution;
        assert!((d.probability(Emotion::Happy) - 0.75).abs() < 1e-12);
        assert!((d.probability(Emotion::Sad) - 0.25).abs() < 1e-12);
        let total: f64 = d.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn partial_face_coverage_scores() {
        let frames = [face(&[("neutral", 1.0)], false, true), no_face()];
        let s = summarize_frames(&frames);
        assert!(s.face_detected);
        assert_eq!(s.faces_detected_count, 1);
        // 5 + 3 * eye contact
        assert_eq!(s.confidence_score, 8.0);
        // 0.5 * 5 + 4 * 1.0 + 2 * 0.5
        assert_eq!(s.engagement_score, 7.5);
        assert_eq!(s.attention_score, 7.5);
        assert_eq!(s.eye_contact_percentage, 100.0);
        assert_eq!(s.smile_percentage, 0.0);
        assert!(s.error.is_none());
    }

    #[test]
    fn scores_are_clamped() {
        let frames = [face(&[("happy", 1.0)], true, true)];
        let s = summarize_frames(&frames);
        assert_eq!(s.confidence_score, 10.0);
        assert_eq!(s.engagement_score, 10.0);

        let gloomy = [face(&[("fear", 0.5), ("sad", 0.5)], false, false)];
        let s = summarize_frames(&gloomy);
        assert_eq!(s.confidence_score, 2.0);
        let anxious = EmotionDistribution::from_weights([("fear".to_owned(), 1.0)]).expect("valid");
        assert_eq!(confidence_score(&anxious, 0.0, 0.0), 2.0);
    }

    #[test]
    fn empty_weights_fall_back_to_neutral_distribution() {
        let frames = [face(&[], true, false)];
        let s = summarize_frames(&frames);
        assert!(s.face_detected);
        assert_eq!(s.emotion_distribution, EmotionDistribution::neutral());
        assert!(s.error.is_some());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let frames = [
            face(&[("happy", 0.6), ("neutral", 0.4)], true, false),
            face(&[("surprise", 0.3), ("neutral", 0.7)], false, true),
        ];
        assert_eq!(summarize_frames(&frames), summarize_frames(&frames));
    }
}
