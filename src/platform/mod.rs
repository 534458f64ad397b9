// Platform services the session flow calls into. Camera frames are never
// analyzed and speech is fire-and-forget; both are simulated.

use std::time::Duration;

/// Delay before the simulated camera grant comes back
pub const CAMERA_GRANT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAccess {
    Granted,
    Denied,
}

/// Simulated device camera. Always grants after a fixed delay; no frame
/// data ever flows back.
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    grant_delay: Duration,
}

impl SimulatedCamera {
    pub fn new() -> Self {
        Self {
            grant_delay: CAMERA_GRANT_DELAY,
        }
    }

    /// Immediate grant, for tests and non-interactive runs
    pub fn instant() -> Self {
        Self {
            grant_delay: Duration::ZERO,
        }
    }

    pub async fn request_access(&self) -> CameraAccess {
        if !self.grant_delay.is_zero() {
            tokio::time::sleep(self.grant_delay).await;
        }
        tracing::debug!("camera access granted (simulated)");
        CameraAccess::Granted
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// Voice output seam. No acknowledgment is expected from the device.
pub trait SpeechOutput {
    fn say(&self, text: &str);
}

/// Stand-in speech synthesizer that routes utterances to the log
#[derive(Debug, Default)]
pub struct LoggingSpeech;

impl SpeechOutput for LoggingSpeech {
    fn say(&self, text: &str) {
        tracing::info!(target: "speech", "{}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_instant_camera_grants() {
        let camera = SimulatedCamera::instant();
        assert_eq!(camera.request_access().await, CameraAccess::Granted);
    }
}
