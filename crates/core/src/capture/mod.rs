//! Loading of materialized extraction results (frames, voice signals,
//! transcript) for one recorded talk.

use crate::emotion::FrameObservation;
use crate::voice::VoiceSignals;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod json;
pub mod memory;
pub use json::JsonCaptureFile;
pub use memory::InMemoryCapture;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Capture {
    #[serde(default)]
    pub frames: Vec<FrameObservation>,
    pub voice: VoiceSignals,
    /// Overrides `voice.transcript` when the transcriber ran separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl Capture {
    pub fn transcript_text(&self) -> &str {
        self.transcript.as_deref().unwrap_or(&self.voice.transcript)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("failed to read capture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid capture json: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait CaptureSource: Send + Sync {
    fn load(&self) -> BoxFuture<'_, Result<Capture, CaptureError>>;
}
