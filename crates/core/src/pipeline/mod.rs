//! End-to-end analysis: aggregate each modality, fuse, recommend.

use crate::capture::{CaptureError, CaptureSource};
use crate::config::AnalysisConfig;
use crate::emotion::{summarize_frames, EmotionSummary, FrameObservation};
use crate::fusion::{assess, FinalScores};
use crate::transcript::{analyze_transcript, TranscriptSummary};
use crate::voice::{summarize_voice, VoiceSignals, VoiceSummary};
use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "pipeline";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    pub scores: FinalScores,
    pub recommendations: Vec<String>,
    pub emotion: EmotionSummary,
    pub voice: VoiceSummary,
    pub transcript: TranscriptSummary,
}

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("{stage} task failed: {message}")]
    TaskFailed {
        stage: &'static str,
        message: String,
    },
}

/// Runs the three aggregators in sequence and fuses their summaries.
pub fn analyze(
    frames: &[FrameObservation],
    voice: &VoiceSignals,
    transcript: &str,
    config: &AnalysisConfig,
) -> Analysis {
    let emotion = summarize_frames(frames);
    let voice = summarize_voice(voice, &config.pauses);
    let transcript = analyze_transcript(transcript);
    combine(emotion, voice, transcript, config)
}

fn combine(
    emotion: EmotionSummary,
    voice: VoiceSummary,
    transcript: TranscriptSummary,
    config: &AnalysisConfig,
) -> Analysis {
    let feedback = assess(&transcript, &emotion, &voice, &config.recommendations);
    Analysis {
        scores: feedback.scores,
        recommendations: feedback.recommendations,
        emotion,
        voice,
        transcript,
    }
}

pub struct Pipeline<S> {
    pub source: S,
    pub config: AnalysisConfig,
}

impl<S> Pipeline<S>
where
    S: CaptureSource,
{
    pub fn new(source: S, config: AnalysisConfig) -> Self {
        Self { source, config }
    }

    /// Loads the capture and runs the aggregators on blocking tasks.
    /// The result matches [`analyze`] on the same inputs.
    pub async fn run(&self) -> Result<Analysis, PipelineError> {
        let capture = self.source.load().await?;
        let transcript_text = capture.transcript_text().to_owned();
        let pauses = self.config.pauses;
        let frames = capture.frames;
        let signals = capture.voice;

        let emotion_task = tokio::task::spawn_blocking(move || summarize_frames(&frames));
        let voice_task = tokio::task::spawn_blocking(move || summarize_voice(&signals, &pauses));
        let transcript_task =
            tokio::task::spawn_blocking(move || analyze_transcript(&transcript_text));

        let (emotion, voice, transcript) = tokio::try_join!(
            join_stage("emotion", emotion_task),
            join_stage("voice", voice_task),
            join_stage("transcript", transcript_task),
        )?;

        let analysis = combine(emotion, voice, transcript, &self.config);
        tracing::info!(
            target: LOG_TARGET,
            overall = analysis.scores.overall,
            recommendations = analysis.recommendations.len(),
            "analysis complete"
        );
        Ok(analysis)
    }
}

async fn join_stage<T>(
    stage: &'static str,
    handle: tokio::task::JoinHandle<T>,
) -> Result<T, PipelineError> {
    handle.await.map_err(|e| {
        tracing::error!(target: LOG_TARGET, stage, error = %e, "aggregation task failed");
        PipelineError::TaskFailed {
            stage,
            message: e.to_string(),
        }
    })
}
