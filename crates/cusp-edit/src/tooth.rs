//! Per-tooth editing state

use crate::axis::AxisFrame;
use crate::event::{DragEndReason, SceneEvent};
use crate::input::PointerEvent;
use crate::interaction::InteractionController;
use crate::movable::MovableState;
use cusp_core::{InteractionConfig, ToothId};
use cusp_pose::PoseRecord;
use glam::DMat4;

/// Loaded geometry, as far as placement is concerned.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Geometry {
    /// World placement when the geometry arrived. The ghost stays here.
    original_world: DMat4,
    /// The geometry's own transform. Reset to identity once the movable
    /// transform takes over.
    local: DMat4,
}

/// Where to draw one tooth this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub tooth: ToothId,
    /// Faded, non-interactive reference copy at the unedited placement.
    pub ghost: DMat4,
    /// The editable copy: `axis ∘ movable ∘ geometry` once ready.
    pub live: DMat4,
    /// Local-to-world matrix of the axis frame, if the tooth has a pose.
    pub axis: Option<DMat4>,
    pub show_axes: bool,
    pub ready: bool,
}

/// One tooth: its pose, axis frame, movable transform and controller.
#[derive(Debug, Clone)]
pub struct Tooth {
    id: ToothId,
    pose: Option<PoseRecord>,
    axis: Option<AxisFrame>,
    geometry: Option<Geometry>,
    movable: MovableState,
    controller: InteractionController,
}

impl Tooth {
    pub fn new(id: ToothId, config: InteractionConfig) -> Self {
        Self {
            controller: InteractionController::new(id.clone(), config),
            id,
            pose: None,
            axis: None,
            geometry: None,
            movable: MovableState::Uninitialized,
        }
    }

    pub fn id(&self) -> &ToothId {
        &self.id
    }

    pub fn pose(&self) -> Option<&PoseRecord> {
        self.pose.as_ref()
    }

    pub fn axis(&self) -> Option<&AxisFrame> {
        self.axis.as_ref()
    }

    pub fn movable(&self) -> &MovableState {
        &self.movable
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    /// Ready teeth accept drags.
    pub fn is_ready(&self) -> bool {
        self.movable.is_ready()
    }

    /// Build the axis frame from `record`. The frame is fixed once set, so a
    /// later record for the same tooth is ignored. Returns whether the tooth
    /// became ready.
    pub(crate) fn attach_pose(&mut self, record: &PoseRecord) -> bool {
        if self.axis.is_some() {
            tracing::debug!(tooth = %self.id, "axis frame already set, ignoring new pose");
            return false;
        }
        self.pose = Some(record.clone());
        self.axis = Some(AxisFrame::from_record(record));
        self.try_initialize()
    }

    /// Record that the geometry finished loading with the given world
    /// transform. Returns whether the tooth became ready.
    pub(crate) fn attach_geometry(&mut self, world: DMat4) -> bool {
        if self.geometry.is_some() {
            return false;
        }
        self.geometry = Some(Geometry {
            original_world: world,
            local: world,
        });
        self.try_initialize()
    }

    fn try_initialize(&mut self) -> bool {
        let (Some(axis), Some(geometry)) = (&self.axis, &mut self.geometry) else {
            return false;
        };
        let initialized = self.movable.initialize(axis, &mut geometry.local);
        if initialized {
            tracing::debug!(tooth = %self.id, "movable transform initialized");
        }
        initialized
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.controller.set_selected(selected);
    }

    pub(crate) fn controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    pub(crate) fn begin_drag(&mut self, event: &PointerEvent) -> Option<SceneEvent> {
        let current = *self.movable.transform()?;
        self.controller.begin_drag(event, &current)
    }

    pub(crate) fn drag_to(&mut self, event: &PointerEvent) -> bool {
        match self.movable.transform_mut() {
            Some(movable) => self.controller.drag_to(event, movable),
            None => false,
        }
    }

    pub(crate) fn end_drag(&mut self, pointer_id: u32, reason: DragEndReason) -> Option<SceneEvent> {
        self.controller.end_drag(pointer_id, reason)
    }

    pub(crate) fn cancel_drag(&mut self) -> Option<SceneEvent> {
        let movable = self.movable.transform_mut()?;
        self.controller.cancel_drag(movable)
    }

    /// Placement for this frame, or `None` until the geometry is loaded.
    pub fn placement(&self) -> Option<Placement> {
        let geometry = self.geometry.as_ref()?;
        let axis = self.axis.as_ref().map(AxisFrame::matrix);
        let live = match (axis, self.movable.transform()) {
            (Some(axis), Some(movable)) => axis * movable.to_matrix() * geometry.local,
            _ => geometry.local,
        };
        Some(Placement {
            tooth: self.id.clone(),
            ghost: geometry.original_world,
            live,
            axis,
            show_axes: self.controller.shows_axes(),
            ready: self.is_ready(),
        })
    }
}
