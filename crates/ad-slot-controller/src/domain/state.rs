//! Slot loading state machine
//!
//! Decides, for one slot, when a load command is issued and which renderer
//! outcomes are applied. The transition function is pure; the controller
//! applies the resulting effect.
//!
//! State Machine:
//! ```text
//! [IDLE] ──mount (load_on_mount) / visible──→ [LOADING] ──success──→ [LOADED]
//!   ↑                                             │                     │
//!   │                                             └──failure──→ [FAILED]│
//!   │                                                              │    │
//!   │                                   retry (new cycle) ─────────┘    │
//!   │                                                                   │
//!   └──────────────────── reset (recycle / unmount) ────────────────────┘
//! ```
//!
//! The dedup guard: a visibility event only issues a load from `Idle`. Once
//! a cycle has left `Idle`, further visibility events do nothing.

use serde::{Deserialize, Serialize};

/// Loading status of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SlotStatus {
    /// No load issued in the current cycle.
    #[default]
    Idle,
    /// Load command issued, outcome pending.
    Loading,
    /// Creative loaded; aspect ratio known.
    Loaded,
    /// Renderer reported a failure for this cycle.
    Failed,
}

impl SlotStatus {
    /// Whether a load is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, SlotStatus::Loading)
    }

    /// Whether the cycle has reached an outcome.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, SlotStatus::Loaded | SlotStatus::Failed)
    }

    /// Calculate the transition for an event.
    ///
    /// Pure, deterministic function.
    #[must_use]
    pub fn next(self, event: SlotEvent) -> Transition {
        use SlotStatus::{Failed, Idle, Loaded, Loading};

        let (to, effect) = match (self, event) {
            (Idle, SlotEvent::Mount { load_on_mount: true }) => (Loading, Effect::IssueLoad),
            (Idle, SlotEvent::BecameVisible) => (Loading, Effect::IssueLoad),

            (Failed, SlotEvent::Retry) => (Loading, Effect::RestartCycle),

            (Loading, SlotEvent::RendererLoaded) => (Loaded, Effect::RecordLoaded),
            (Loading, SlotEvent::RendererFailed) => (Failed, Effect::RecordFailure),

            // Renderer refreshed the creative on its own interval.
            (Loaded, SlotEvent::RendererLoaded) => (Loaded, Effect::RecordLoaded),

            (_, SlotEvent::Reset) => (Idle, Effect::Release),

            // No-op transitions (stay in current state)
            (state, _) => (state, Effect::None),
        };

        Transition {
            from: self,
            to,
            effect,
        }
    }
}

/// Events that drive the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotEvent {
    /// The presentation layer mounted the slot.
    Mount {
        /// Whether the slot loads without waiting for visibility.
        load_on_mount: bool,
    },
    /// A visibility event reported this slot's index on screen.
    BecameVisible,
    /// Caller asked for a fresh attempt after a failure.
    Retry,
    /// Renderer success callback for the current cycle.
    RendererLoaded,
    /// Renderer failure callback for the current cycle.
    RendererFailed,
    /// Slot recycled, kind changed or unmounted.
    Reset,
}

/// Side effect the controller performs after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do (event suppressed or not applicable).
    None,
    /// Issue a load command in the current cycle.
    IssueLoad,
    /// Start a new cycle, then issue a load command in it.
    RestartCycle,
    /// Store the reported aspect ratio.
    RecordLoaded,
    /// Store the reported error and log it.
    RecordFailure,
    /// Start a new cycle and release the renderer registrations.
    Release,
}

/// Result of applying an event to a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Status before the event.
    pub from: SlotStatus,
    /// Status after the event.
    pub to: SlotStatus,
    /// What the controller must do.
    pub effect: Effect,
}

impl Transition {
    /// Whether the event was suppressed.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.effect == Effect::None
    }

    /// Whether a load command must be issued.
    #[must_use]
    pub fn issues_load(&self) -> bool {
        matches!(self.effect, Effect::IssueLoad | Effect::RestartCycle)
    }
}
