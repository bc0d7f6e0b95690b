//! Cusp Edit - axis-relative tooth editing
//!
//! Each tooth gets a fixed [`AxisFrame`] from the pose table and an editable
//! transform expressed inside that frame. The movable transform is derived
//! exactly once so the tooth does not move on screen, then pointer drags
//! edit it in the tooth's own local X/Y plane or about its local Z axis.
//!
//! - `AxisFrame` - fixed local coordinate system per tooth
//! - `MovableState` - `Uninitialized → Ready(Transform)` one-shot initialization
//! - `InteractionController` - per-tooth selection/drag state machine
//! - `SceneOrchestrator` - tooth store, single selection, edit mode, orbit gating
//! - `SceneEvent` / `EventBus` - notifications drained by the application shell

mod axis;
mod event;
mod event_bus;
mod input;
mod interaction;
mod movable;
mod scene;
mod tooth;

pub use axis::AxisFrame;
pub use event::{DragEndReason, SceneEvent};
pub use event_bus::EventBus;
pub use input::{Modifiers, PointerButton, PointerEvent};
pub use interaction::{
    DragSession, EditMode, Gesture, InteractionController, InteractionState, TransformTool,
};
pub use movable::MovableState;
pub use scene::SceneOrchestrator;
pub use tooth::{Placement, Tooth};
