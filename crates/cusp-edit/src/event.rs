//! Scene notifications for the application shell

use cusp_core::ToothId;

/// How a drag session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEndReason {
    /// Matching pointer-up. The last pose is kept.
    Released,
    /// The shell lost pointer capture. The last pose is kept.
    CaptureLost,
    /// Explicit cancel. The pose was restored to the drag's start.
    Cancelled,
}

/// Events published by the orchestrator, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    SelectionChanged(Option<ToothId>),
    DragStarted {
        tooth: ToothId,
        pointer_id: u32,
    },
    DragEnded {
        tooth: ToothId,
        pointer_id: u32,
        reason: DragEndReason,
    },
    /// The orbit camera control must be enabled or disabled.
    OrbitEnabledChanged(bool),
    /// A tooth's movable transform was initialized and it accepts drags.
    ToothReady(ToothId),
}
