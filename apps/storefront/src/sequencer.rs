//! # Prank Sequencer Driver
//!
//! Drives the pure prank state machine with real timers.
//!
//! ## Timer Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Prank Timer Model                                    │
//! │                                                                         │
//! │  arm()                                                                  │
//! │    │ take token from the FSM, render Processing                         │
//! │    ├── spawn: sleep(1.5s) ──► advance(token, Error)    ──► render?     │
//! │    └── spawn: sleep(3.5s) ──► advance(token, Revealed) ──► render?     │
//! │                                                                         │
//! │  Both sleeps are scheduled from the same arm instant; the strictly     │
//! │  longer second delay is the ordering guarantee.                        │
//! │                                                                         │
//! │  dismiss() / re-arm() bump the FSM generation, so a timer that fires   │
//! │  late presents a stale token and advance() refuses it. Nothing is      │
//! │  ever cancelled; stale wakeups are simply no-ops.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rest of the UI stays interactive while the timers are pending; only
//! the overlay state changes when they fire.

use std::sync::{Arc, Mutex};

use tracing::debug;

use magnate_core::prank::{ERROR_DELAY, REVEAL_DELAY};
use magnate_core::{PrankSequencer, PrankStage};

use crate::render::Renderer;

/// Owns the prank state machine and its timers.
#[derive(Debug, Clone, Default)]
pub struct PrankDriver {
    seq: Arc<Mutex<PrankSequencer>>,
}

impl PrankDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently visible stage.
    pub fn stage(&self) -> PrankStage {
        self.seq.lock().expect("Prank mutex poisoned").stage()
    }

    /// Arms (or re-arms) the sequence and schedules the two deferred
    /// transitions. Must be called from within a tokio runtime.
    pub fn arm(&self, renderer: &Arc<dyn Renderer>) {
        let token = self.seq.lock().expect("Prank mutex poisoned").arm();
        debug!(token, "prank armed");
        renderer.render_prank(PrankStage::Processing);

        for (delay, stage) in [
            (ERROR_DELAY, PrankStage::Error),
            (REVEAL_DELAY, PrankStage::Revealed),
        ] {
            let seq = Arc::clone(&self.seq);
            let renderer = Arc::clone(renderer);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                // lock released before rendering
                let applied = seq.lock().expect("Prank mutex poisoned").advance(token, stage);
                if applied {
                    renderer.render_prank(stage);
                } else {
                    debug!(token, ?stage, "stale prank timer ignored");
                }
            });
        }
    }

    /// Immediately returns the overlay to `Idle` and invalidates any
    /// pending timers.
    pub fn dismiss(&self, renderer: &Arc<dyn Renderer>) {
        self.seq.lock().expect("Prank mutex poisoned").dismiss();
        debug!("prank dismissed");
        renderer.render_prank(PrankStage::Idle);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{RecordingRenderer, RenderCall};
    use std::time::Duration;

    fn renderer() -> (Arc<RecordingRenderer>, Arc<dyn Renderer>) {
        let recording = Arc::new(RecordingRenderer::new());
        let dynamic: Arc<dyn Renderer> = recording.clone();
        (recording, dynamic)
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeline_reaches_each_stage() {
        let driver = PrankDriver::new();
        let (_, r) = renderer();

        driver.arm(&r);
        assert_eq!(driver.stage(), PrankStage::Processing);

        // t = 2.0s: past the error delay, before the reveal
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(driver.stage(), PrankStage::Error);

        // t = 4.0s: past the reveal delay
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(driver.stage(), PrankStage::Revealed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_suppresses_late_timers() {
        let driver = PrankDriver::new();
        let (recording, r) = renderer();

        driver.arm(&r);
        tokio::time::sleep(Duration::from_millis(500)).await;
        driver.dismiss(&r);
        assert_eq!(driver.stage(), PrankStage::Idle);

        recording.clear();
        // both original timers fire in this window and must do nothing
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(driver.stage(), PrankStage::Idle);
        assert!(recording.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_restarts_the_timeline() {
        let driver = PrankDriver::new();
        let (_, r) = renderer();

        driver.arm(&r);
        tokio::time::sleep(Duration::from_millis(1000)).await;

        // re-arm at t=1.0s; the first arm's error timer (t=1.5s) is stale
        driver.arm(&r);
        tokio::time::sleep(Duration::from_millis(1000)).await; // t=2.0s
        assert_eq!(driver.stage(), PrankStage::Processing);

        // new error delay lands at t=2.5s
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(driver.stage(), PrankStage::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_renders_follow_applied_transitions() {
        let driver = PrankDriver::new();
        let (recording, r) = renderer();

        driver.arm(&r);
        tokio::time::sleep(Duration::from_millis(4000)).await;

        assert_eq!(
            recording.calls(),
            vec![
                RenderCall::Prank(PrankStage::Processing),
                RenderCall::Prank(PrankStage::Error),
                RenderCall::Prank(PrankStage::Revealed),
            ]
        );
    }
}
