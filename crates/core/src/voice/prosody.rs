use crate::config::PauseConfig;
use crate::util::{mean, round_to, std_dev, NEUTRAL_SCORE};
use crate::voice::VoiceError;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PitchStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    /// Coefficient of variation (std / mean).
    pub variability: f64,
    /// Range over mean, (max - min) / mean.
    pub variation: f64,
    /// Voiced frame count scaled into `[0, 10]`.
    pub confidence: f64,
    pub voiced_count: usize,
}

/// Pitch statistics over voiced samples only; all zero when nothing is voiced.
pub fn analyze_pitch(pitch_hz: &[f64]) -> PitchStats {
    let voiced: Vec<f64> = pitch_hz.iter().copied().filter(|p| *p > 0.0).collect();
    let (Some(m), Some(sd)) = (mean(&voiced), std_dev(&voiced)) else {
        return PitchStats::default();
    };

    let min = voiced.iter().copied().fold(f64::INFINITY, f64::min);
    let max = voiced.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    PitchStats {
        mean: round_to(m, 1),
        std: round_to(sd, 1),
        min: round_to(min, 1),
        max: round_to(max, 1),
        variability: round_to(sd / m, 3),
        variation: round_to((max - min) / m, 3),
        confidence: (voiced.len() as f64 / 100.0).min(10.0),
        voiced_count: voiced.len(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeStats {
    pub mean: f64,
    pub std: f64,
    pub variation: f64,
    /// `max(0, 10 - 20 * variation)`, neutral when there are no samples.
    pub stability: f64,
}

pub fn analyze_volume(intensity_db: &[f64]) -> VolumeStats {
    let (Some(m), Some(sd)) = (mean(intensity_db), std_dev(intensity_db)) else {
        return VolumeStats {
            mean: 0.0,
            std: 0.0,
            variation: 0.0,
            stability: NEUTRAL_SCORE,
        };
    };

    let variation = if m > 0.0 { sd / m } else { 0.0 };
    VolumeStats {
        mean: round_to(m, 1),
        std: round_to(sd, 1),
        variation: round_to(variation, 3),
        stability: round_to((10.0 - variation * 20.0).max(0.0), 1),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PauseStats {
    pub pause_count: usize,
    /// Pauses per minute of signal, 1 decimal.
    pub pause_frequency: f64,
    /// Mean pause length in seconds, 2 decimals.
    pub avg_pause_duration: f64,
    pub pauses: Vec<f64>,
}

/// Finds pauses as runs of low short-time energy.
///
/// RMS is taken over centered, zero-padded windows and normalized by its
/// peak. A silent run only counts once speech resumes, so trailing silence
/// is never a pause.
pub fn detect_pauses(
    samples: &[f32],
    sample_rate: u32,
    config: &PauseConfig,
) -> Result<PauseStats, VoiceError> {
    if samples.is_empty() {
        return Ok(PauseStats::default());
    }
    if sample_rate == 0 {
        return Err(VoiceError::MissingSampleRate(samples.len()));
    }

    let sr = f64::from(sample_rate);
    let frame_length = (sr * config.window_secs) as usize;
    let hop_length = (sr * config.hop_secs) as usize;
    if frame_length == 0 || hop_length == 0 {
        return Err(VoiceError::SampleRateTooLow(sample_rate));
    }

    let rms = rms_frames(samples, frame_length, hop_length);
    let peak = rms.iter().copied().fold(0.0f64, f64::max);
    let silent: Vec<bool> = rms
        .iter()
        .map(|r| {
            let level = if peak > 0.0 { r / peak } else { *r };
            level < config.silence_threshold
        })
        .collect();

    let min_pause_frames = (config.min_pause_secs * sr / hop_length as f64) as usize;
    let mut pauses = Vec::new();
    let mut pause_start: Option<usize> = None;
    for (i, &is_silent) in silent.iter().enumerate() {
        match (is_silent, pause_start) {
            (true, None) => pause_start = Some(i),
            (false, Some(start)) => {
                let frames = i - start;
                if frames >= min_pause_frames {
                    pauses.push(frames as f64 * hop_length as f64 / sr);
                }
                pause_start = None;
            }
            _ => {}
        }
    }

    let total_secs = samples.len() as f64 / sr;
    let pause_frequency = if total_secs > 0.0 {
        pauses.len() as f64 / (total_secs / 60.0)
    } else {
        0.0
    };

    Ok(PauseStats {
        pause_count: pauses.len(),
        pause_frequency: round_to(pause_frequency, 1),
        avg_pause_duration: round_to(mean(&pauses).unwrap_or(0.0), 2),
        pauses,
    })
}

fn rms_frames(samples: &[f32], frame_length: usize, hop_length: usize) -> Vec<f64> {
    let pad = frame_length / 2;
    let padded_len = samples.len() + 2 * pad;
    if padded_len < frame_length {
        return Vec::new();
    }
    let n_frames = 1 + (padded_len - frame_length) / hop_length;

    (0..n_frames)
        .map(|frame| {
            let start = frame * hop_length;
            let energy: f64 = (start..start + frame_length)
                .filter_map(|j| j.checked_sub(pad).and_then(|idx| samples.get(idx)))
                .map(|s| f64::from(*s).powi(2))
                .sum();
            (energy / frame_length as f64).sqrt()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 16_000;

    fn tone(secs: f64) -> Vec<f32> {
        (0..(secs * f64::from(SR)) as usize)
            .map(|i| (i as f32 * 0.05).sin() * 0.8)
            .collect()
    }

    fn silence(secs: f64) -> Vec<f32> {
        vec![0.0; (secs * f64::from(SR)) as usize]
    }

    #[test]
    fn pitch_ignores_unvoiced_frames() {
        let p = analyze_pitch(&[0.0, 100.0, -1.0, 200.0, 0.0]);
        assert_eq!(p.voiced_count, 2);
        assert_eq!(p.mean, 150.0);
        assert_eq!(p.std, 50.0);
        assert_eq!(p.variability, 0.333);
        assert_eq!(p.variation, 0.667);
        assert!((p.confidence - 0.02).abs() < 1e-12);
    }

    #[test]
    fn pitch_without_voiced_frames_is_zero() {
        assert_eq!(analyze_pitch(&[0.0, 0.0]), PitchStats::default());
        assert_eq!(analyze_pitch(&[]), PitchStats::default());
    }

    #[test]
    fn pitch_confidence_caps_at_ten() {
        let p = analyze_pitch(&vec![120.0; 5_000]);
        assert_eq!(p.confidence, 10.0);
        assert_eq!(p.variability, 0.0);
    }

    #[test]
    fn volume_stability_from_variation() {
        let v = analyze_volume(&[50.0, 70.0]);
        // cv = 10 / 60
        assert_eq!(v.variation, 0.167);
        assert_eq!(v.stability, 6.7);
        assert_eq!(analyze_volume(&[]).stability, 5.0);
        assert_eq!(analyze_volume(&[60.0, 60.0]).stability, 10.0);
    }

    #[test]
    fn no_pcm_means_no_pauses() {
        let stats = detect_pauses(&[], SR, &PauseConfig::default()).expect("empty is fine");
        assert_eq!(stats, PauseStats::default());
    }

    #[test]
    fn detects_a_single_half_second_pause() {
        let mut samples = tone(1.0);
        samples.extend(silence(0.5));
        samples.extend(tone(1.5));
        let stats = detect_pauses(&samples, SR, &PauseConfig::default()).expect("valid signal");
        assert_eq!(stats.pause_count, 1);
        // window overlap trims roughly one window from the silent run
        assert!((stats.pauses[0] - 0.5).abs() < 0.05, "{:?}", stats.pauses);
        // one pause in 3 s of audio
        assert_eq!(stats.pause_frequency, 20.0);
    }

    #[test]
    fn short_gaps_and_trailing_silence_are_ignored() {
        let mut samples = tone(1.0);
        samples.extend(silence(0.1));
        samples.extend(tone(1.0));
        samples.extend(silence(1.0));
        let stats = detect_pauses(&samples, SR, &PauseConfig::default()).expect("valid signal");
        assert_eq!(stats.pause_count, 0);
        assert_eq!(stats.pause_frequency, 0.0);
        assert_eq!(stats.avg_pause_duration, 0.0);
    }

    #[test]
    fn tiny_sample_rate_is_rejected() {
        let err = detect_pauses(&[0.1; 10], 20, &PauseConfig::default()).unwrap_err();
        assert_eq!(err, VoiceError::SampleRateTooLow(20));
    }

    #[test]
    fn rms_frame_count_matches_centered_framing() {
        // 1 + (len + 2 * (frame / 2) - frame) / hop
        let frames = rms_frames(&[1.0; 1_600], 400, 160);
        assert_eq!(frames.len(), 11);
        // fully inside the signal
        assert!((frames[5] - 1.0).abs() < 1e-12);
        // first frame is half zero padding
        assert!((frames[0] - 0.5f64.sqrt()).abs() < 1e-12);
    }
}
