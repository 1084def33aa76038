use crate::capture::{Capture, CaptureError, CaptureSource};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "capture::json";

/// Capture stored as a single JSON document on disk.
#[derive(Clone, Debug)]
pub struct JsonCaptureFile {
    path: PathBuf,
}

impl JsonCaptureFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CaptureSource for JsonCaptureFile {
    fn load(&self) -> BoxFuture<'_, Result<Capture, CaptureError>> {
        async move {
            let bytes = tokio::fs::read(&self.path)
                .await
                .map_err(|source| CaptureError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            let capture: Capture = serde_json::from_slice(&bytes)?;
            tracing::debug!(
                target: LOG_TARGET,
                path = %self.path.display(),
                frames = capture.frames.len(),
                samples = capture.voice.samples.len(),
                "capture loaded"
            );
            Ok(capture)
        }
        .boxed()
    }
}
