use crate::capture::{Capture, CaptureError, CaptureSource};
use futures::future::BoxFuture;
use futures::FutureExt;

/// Hands out clones of a fixed capture.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCapture {
    capture: Capture,
}

impl InMemoryCapture {
    pub fn new(capture: Capture) -> Self {
        Self { capture }
    }
}

impl CaptureSource for InMemoryCapture {
    fn load(&self) -> BoxFuture<'_, Result<Capture, CaptureError>> {
        let capture = self.capture.clone();
        async move { Ok(capture) }.boxed()
    }
}
