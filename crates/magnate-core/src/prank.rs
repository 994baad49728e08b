//! # Prank State Machine
//!
//! The staged "payment error" sequence shown after a successful purchase.
//! No business meaning, but real ordering guarantees, so it is modeled as
//! an explicit finite-state machine.
//!
//! ## Stage Timeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Prank Timeline                                       │
//! │                                                                         │
//! │  arm()                                                                  │
//! │    │                                                                    │
//! │    ▼  t = 0                 t = 1.5s              t = 3.5s              │
//! │  ┌────────────┐           ┌────────────┐        ┌────────────┐          │
//! │  │ Processing │──────────►│   Error    │───────►│  Revealed  │          │
//! │  └────────────┘           └────────────┘        └────────────┘          │
//! │        │                        │                     │                 │
//! │        └────────── dismiss() at any stage ────────────┘                 │
//! │                           │                                             │
//! │                           ▼                                             │
//! │                     ┌────────────┐                                      │
//! │                     │    Idle    │  (pending timers become no-ops)      │
//! │                     └────────────┘                                      │
//! │                                                                         │
//! │  STALE-TIMER SUPPRESSION:                                              │
//! │  ────────────────────────                                              │
//! │  • every arm()/dismiss() bumps a generation counter                    │
//! │  • a deferred transition carries the generation it was armed under     │
//! │  • advance() is a no-op when the generations differ                    │
//! │  • works without any timer-cancellation API, like a fencing token      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both deferred transitions are scheduled from the same arm instant with
//! strictly increasing delays, so `Error` is guaranteed to land before
//! `Revealed`. The machine itself is pure; the app layer owns the timers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Constants
// =============================================================================

/// Delay from arming until the fake error appears.
pub const ERROR_DELAY: Duration = Duration::from_millis(1500);

/// Delay from arming until the prank reveal. Measured from the arm instant,
/// not from entering `Error`.
pub const REVEAL_DELAY: Duration = Duration::from_millis(3500);

// =============================================================================
// Stage
// =============================================================================

/// The visible stage of the prank overlay. At most one stage is shown at a
/// time; entering any stage hides the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PrankStage {
    /// Overlay hidden.
    #[default]
    Idle,
    /// Fake "processing payment" indicator.
    Processing,
    /// Fake payment error.
    Error,
    /// The reveal.
    Revealed,
}

// =============================================================================
// Sequencer
// =============================================================================

/// Generation token handed out by [`PrankSequencer::arm`]. A deferred
/// transition presents it back to prove it is not stale.
pub type ArmToken = u64;

/// The prank state machine.
///
/// Pure and timer-free: callers schedule the deferred transitions and feed
/// them back through [`Self::advance`] with the token from the arm call.
#[derive(Debug, Default)]
pub struct PrankSequencer {
    stage: PrankStage,
    generation: ArmToken,
}

impl PrankSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently visible stage.
    pub fn stage(&self) -> PrankStage {
        self.stage
    }

    /// Arms the sequence: enters `Processing` immediately and invalidates
    /// any transition scheduled under an earlier generation. Re-arming
    /// while armed restarts the timeline the same way.
    ///
    /// Returns the token the caller must attach to its deferred
    /// transitions.
    pub fn arm(&mut self) -> ArmToken {
        self.generation += 1;
        self.stage = PrankStage::Processing;
        self.generation
    }

    /// Forces the machine back to `Idle` and invalidates every pending
    /// transition. Available at any stage.
    pub fn dismiss(&mut self) {
        self.generation += 1;
        self.stage = PrankStage::Idle;
    }

    /// Applies a deferred transition if its token is still current.
    ///
    /// Returns whether the transition was applied; a stale token (armed
    /// before the latest arm/dismiss) is a no-op and returns false.
    pub fn advance(&mut self, token: ArmToken, stage: PrankStage) -> bool {
        if token != self.generation {
            return false;
        }
        self.stage = stage;
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        assert_eq!(PrankSequencer::new().stage(), PrankStage::Idle);
    }

    #[test]
    fn test_arm_then_scheduled_transitions() {
        let mut seq = PrankSequencer::new();
        let token = seq.arm();
        assert_eq!(seq.stage(), PrankStage::Processing);

        assert!(seq.advance(token, PrankStage::Error));
        assert_eq!(seq.stage(), PrankStage::Error);

        assert!(seq.advance(token, PrankStage::Revealed));
        assert_eq!(seq.stage(), PrankStage::Revealed);
    }

    #[test]
    fn test_dismiss_suppresses_pending_transitions() {
        let mut seq = PrankSequencer::new();
        let token = seq.arm();

        seq.dismiss();
        assert_eq!(seq.stage(), PrankStage::Idle);

        // the timers armed before dismiss fire late and must not resurrect
        assert!(!seq.advance(token, PrankStage::Error));
        assert!(!seq.advance(token, PrankStage::Revealed));
        assert_eq!(seq.stage(), PrankStage::Idle);
    }

    #[test]
    fn test_rearm_supersedes_old_timeline() {
        let mut seq = PrankSequencer::new();
        let old = seq.arm();
        let new = seq.arm();
        assert_eq!(seq.stage(), PrankStage::Processing);

        // old timers are stale, new ones still apply
        assert!(!seq.advance(old, PrankStage::Error));
        assert_eq!(seq.stage(), PrankStage::Processing);
        assert!(seq.advance(new, PrankStage::Error));
        assert_eq!(seq.stage(), PrankStage::Error);
    }

    #[test]
    fn test_delays_are_ordered() {
        // the reveal is scheduled from the same instant with a strictly
        // longer delay, which is what guarantees Error fires first
        assert!(ERROR_DELAY < REVEAL_DELAY);
    }
}
