//! Voice metrics: speech rate, pitch, pauses, volume and filler words
//! reduced to fluency, pace, steadiness and coherence sub-scores.

mod prosody;
mod scoring;
mod speech;

use crate::config::PauseConfig;
use crate::util::{round_to, NEUTRAL_SCORE};
use serde::{Deserialize, Serialize};

pub use prosody::{analyze_pitch, analyze_volume, detect_pauses, PauseStats, PitchStats, VolumeStats};
pub use scoring::{fluency_score, pace_score, voice_steadiness};
pub use speech::{
    count_fillers, speech_coherence, speech_rate, FillerCount, FillerStats, SpeechRate,
    FILLER_WORDS,
};

const LOG_TARGET: &str = "voice::metrics";

/// Everything the audio extraction collaborators hand over for one talk.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct VoiceSignals {
    pub transcript: String,
    pub duration_secs: f64,
    /// Pitch track in Hz; zero or negative marks unvoiced frames.
    #[serde(default)]
    pub pitch_hz: Vec<f64>,
    #[serde(default)]
    pub intensity_db: Vec<f64>,
    /// Mono PCM used for energy-based pause detection.
    #[serde(default)]
    pub samples: Vec<f32>,
    #[serde(default)]
    pub sample_rate: u32,
}

impl VoiceSignals {
    /// Length of the PCM signal in seconds, zero when there is none.
    pub fn signal_duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum VoiceError {
    #[error("audio duration must be finite and non-negative, got {0}")]
    InvalidDuration(f64),
    #[error("sample rate must be > 0 when {0} pcm samples are present")]
    MissingSampleRate(usize),
    #[error("sample rate {0} Hz is too low for the pause detection window")]
    SampleRateTooLow(u32),
    #[error("{signal} contains a non-finite value at index {index}")]
    NonFiniteSample { signal: &'static str, index: usize },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VoiceSummary {
    pub transcript: String,
    pub duration: f64,
    pub word_count: usize,
    pub syllable_count: usize,
    pub words_per_minute: f64,
    pub syllables_per_minute: f64,
    pub pitch_mean: f64,
    pub pitch_variability: f64,
    pub pitch_variation: f64,
    pub pitch_confidence: f64,
    pub pause_count: usize,
    pub pause_frequency: f64,
    pub avg_pause_duration: f64,
    pub volume_stability: f64,
    pub filler_words: Vec<FillerCount>,
    pub filler_word_count: usize,
    pub filler_word_rate: f64,
    pub fluency_score: f64,
    pub pace_score: f64,
    pub voice_steadiness: f64,
    pub speech_coherence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VoiceSummary {
    /// All scores neutral, all measurements zero. The transcript is kept.
    pub fn fallback(transcript: String, error: &VoiceError) -> Self {
        Self {
            transcript,
            duration: 0.0,
            word_count: 0,
            syllable_count: 0,
            words_per_minute: 0.0,
            syllables_per_minute: 0.0,
            pitch_mean: 0.0,
            pitch_variability: 0.0,
            pitch_variation: 0.0,
            pitch_confidence: NEUTRAL_SCORE,
            pause_count: 0,
            pause_frequency: 0.0,
            avg_pause_duration: 0.0,
            volume_stability: NEUTRAL_SCORE,
            filler_words: Vec::new(),
            filler_word_count: 0,
            filler_word_rate: 0.0,
            fluency_score: NEUTRAL_SCORE,
            pace_score: NEUTRAL_SCORE,
            voice_steadiness: NEUTRAL_SCORE,
            speech_coherence: NEUTRAL_SCORE,
            error: Some(error.to_string()),
        }
    }
}

/// Computes the voice summary, substituting [`VoiceSummary::fallback`] when
/// the signals violate their contract.
pub fn summarize_voice(signals: &VoiceSignals, pauses: &PauseConfig) -> VoiceSummary {
    match try_summarize_voice(signals, pauses) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(target: LOG_TARGET, error = %e, "voice analysis failed, using neutral defaults");
            VoiceSummary::fallback(signals.transcript.clone(), &e)
        }
    }
}

pub fn try_summarize_voice(
    signals: &VoiceSignals,
    pauses: &PauseConfig,
) -> Result<VoiceSummary, VoiceError> {
    validate(signals)?;

    let rate = speech_rate(&signals.transcript, signals.duration_secs);
    let pitch = analyze_pitch(&signals.pitch_hz);
    let pause_stats = detect_pauses(&signals.samples, signals.sample_rate, pauses)?;
    let volume = analyze_volume(&signals.intensity_db);
    let fillers = count_fillers(&signals.transcript);

    let fluency = fluency_score(
        rate.words_per_minute,
        pause_stats.pause_frequency,
        fillers.rate,
    );
    let pace = pace_score(rate.words_per_minute, pause_stats.pause_frequency);
    let steadiness = voice_steadiness(pitch.variability, volume.stability);
    let coherence = speech_coherence(&signals.transcript);

    tracing::debug!(
        target: LOG_TARGET,
        wpm = rate.words_per_minute,
        pauses = pause_stats.pause_count,
        fillers = fillers.total,
        fluency,
        pace,
        steadiness,
        coherence,
        "voice summary computed"
    );

    Ok(VoiceSummary {
        transcript: signals.transcript.clone(),
        duration: signals.duration_secs,
        word_count: rate.word_count,
        syllable_count: rate.syllable_count,
        words_per_minute: rate.words_per_minute,
        syllables_per_minute: rate.syllables_per_minute,
        pitch_mean: pitch.mean,
        pitch_variability: pitch.variability,
        pitch_variation: pitch.variation,
        pitch_confidence: round_to(pitch.confidence, 1),
        pause_count: pause_stats.pause_count,
        pause_frequency: pause_stats.pause_frequency,
        avg_pause_duration: pause_stats.avg_pause_duration,
        volume_stability: volume.stability,
        filler_words: fillers.fillers,
        filler_word_count: fillers.total,
        filler_word_rate: fillers.rate,
        fluency_score: round_to(fluency, 1),
        pace_score: round_to(pace, 1),
        voice_steadiness: round_to(steadiness, 1),
        speech_coherence: round_to(coherence, 1),
        error: None,
    })
}

fn validate(signals: &VoiceSignals) -> Result<(), VoiceError> {
    if !signals.duration_secs.is_finite() || signals.duration_secs < 0.0 {
        return Err(VoiceError::InvalidDuration(signals.duration_secs));
    }
    if signals.sample_rate == 0 && !signals.samples.is_empty() {
        return Err(VoiceError::MissingSampleRate(signals.samples.len()));
    }
    if let Some(index) = signals.samples.iter().position(|s| !s.is_finite()) {
        return Err(VoiceError::NonFiniteSample {
            signal: "pcm",
            index,
        });
    }
    if let Some(index) = signals.pitch_hz.iter().position(|s| !s.is_finite()) {
        return Err(VoiceError::NonFiniteSample {
            signal: "pitch",
            index,
        });
    }
    if let Some(index) = signals.intensity_db.iter().position(|s| !s.is_finite()) {
        return Err(VoiceError::NonFiniteSample {
            signal: "intensity",
            index,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speaking(transcript: &str, duration_secs: f64) -> VoiceSignals {
        VoiceSignals {
            transcript: transcript.to_owned(),
            duration_secs,
            ..VoiceSignals::default()
        }
    }

    #[test]
    fn zero_duration_gives_zero_rate() {
        let s = summarize_voice(&speaking("hello there everyone", 0.0), &PauseConfig::default());
        assert!(s.error.is_none());
        assert_eq!(s.words_per_minute, 0.0);
        assert_eq!(s.word_count, 3);
        for score in [s.fluency_score, s.pace_score, s.voice_steadiness, s.speech_coherence] {
            assert!((0.0..=10.0).contains(&score));
        }
    }

    #[test]
    fn invalid_duration_falls_back_but_keeps_transcript() {
        let s = summarize_voice(&speaking("keep me", -1.0), &PauseConfig::default());
        assert_eq!(s.transcript, "keep me");
        assert_eq!(s.fluency_score, 5.0);
        assert_eq!(s.pace_score, 5.0);
        assert_eq!(s.voice_steadiness, 5.0);
        assert_eq!(s.speech_coherence, 5.0);
        assert!(s.error.as_deref().unwrap_or_default().contains("duration"));
    }

    #[test]
    fn samples_without_rate_fall_back() {
        let signals = VoiceSignals {
            samples: vec![0.1; 10],
            ..speaking("text", 1.0)
        };
        let err = try_summarize_voice(&signals, &PauseConfig::default()).unwrap_err();
        assert_eq!(err, VoiceError::MissingSampleRate(10));
    }

    #[test]
    fn non_finite_pitch_is_rejected() {
        let signals = VoiceSignals {
            pitch_hz: vec![120.0, f64::INFINITY],
            ..speaking("text", 1.0)
        };
        let err = try_summarize_voice(&signals, &PauseConfig::default()).unwrap_err();
        assert_eq!(
            err,
            VoiceError::NonFiniteSample {
                signal: "pitch",
                index: 1
            }
        );
    }

    #[test]
    fn empty_signals_use_neutral_components() {
        let s = summarize_voice(&VoiceSignals::default(), &PauseConfig::default());
        assert!(s.error.is_none());
        assert_eq!(s.volume_stability, 5.0);
        assert_eq!(s.pitch_mean, 0.0);
        assert_eq!(s.speech_coherence, 5.0);
        // monotone pitch component (3) + half the neutral volume stability
        assert_eq!(s.voice_steadiness, 5.5);
    }

    #[test]
    fn summary_is_idempotent() {
        let signals = VoiceSignals {
            pitch_hz: vec![110.0, 0.0, 130.0, 150.0],
            intensity_db: vec![60.0, 62.0, 58.0],
            samples: vec![0.5; 1600],
            sample_rate: 16_000,
            ..speaking("So we built it. Then we um tested it, and shipped it.", 6.0)
        };
        let cfg = PauseConfig::default();
        assert_eq!(summarize_voice(&signals, &cfg), summarize_voice(&signals, &cfg));
    }

    #[test]
    fn signal_duration_from_samples() {
        let signals = VoiceSignals {
            samples: vec![0.0; 32_000],
            sample_rate: 16_000,
            ..VoiceSignals::default()
        };
        assert_eq!(signals.signal_duration_secs(), 2.0);
        assert_eq!(VoiceSignals::default().signal_duration_secs(), 0.0);
    }
}
