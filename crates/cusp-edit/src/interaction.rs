//! Per-tooth pointer interaction.
//!
//! A controller is `Idle`, `Selected` or `Dragging`. Selection is decided by
//! the orchestrator (it owns the single selected id); the controller owns
//! the drag session. While dragging, pointer moves rebuild the movable
//! transform from the snapshot taken at pointer-down, so the result depends
//! only on the total pointer travel and never accumulates rounding.
//!
//! The movable transform lives in axis-frame coordinates. Both gestures act
//! in that frame: translation along its X/Y, rotation about its Z through
//! its origin.

use crate::event::{DragEndReason, SceneEvent};
use crate::input::PointerEvent;
use cusp_core::{frame, InteractionConfig, ToothId, Transform};
use glam::{DQuat, DVec2, DVec3};

/// Active transform tool when edit mode is on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransformTool {
    #[default]
    Translate,
    Rotate,
}

/// Global edit mode, owned by the UI and propagated to every controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMode {
    pub enabled: bool,
    pub tool: TransformTool,
}

impl EditMode {
    pub const OFF: Self = Self {
        enabled: false,
        tool: TransformTool::Translate,
    };

    pub fn translate() -> Self {
        Self {
            enabled: true,
            tool: TransformTool::Translate,
        }
    }

    pub fn rotate() -> Self {
        Self {
            enabled: true,
            tool: TransformTool::Rotate,
        }
    }
}

/// Public view of a controller's state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Selected,
    Dragging,
}

/// What a pointer move does to the movable transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Move in the local X/Y plane.
    Translate,
    /// Rotate about the local Z axis.
    Rotate,
}

/// Snapshot taken when a drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// The captured pointer. Events from other pointers are ignored.
    pub pointer_id: u32,
    /// Chosen at pointer-down and kept for the whole drag.
    pub gesture: Gesture,
    pub start_screen: DVec2,
    pub start_position: DVec3,
    pub start_orientation: DQuat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Selected,
    Dragging(DragSession),
}

/// Pointer-driven editing for one tooth.
#[derive(Debug, Clone)]
pub struct InteractionController {
    tooth: ToothId,
    phase: Phase,
    mode: EditMode,
    config: InteractionConfig,
}

impl InteractionController {
    pub fn new(tooth: ToothId, config: InteractionConfig) -> Self {
        Self {
            tooth,
            phase: Phase::Idle,
            mode: EditMode::OFF,
            config,
        }
    }

    pub fn tooth(&self) -> &ToothId {
        &self.tooth
    }

    pub fn state(&self) -> InteractionState {
        match self.phase {
            Phase::Idle => InteractionState::Idle,
            Phase::Selected => InteractionState::Selected,
            Phase::Dragging(_) => InteractionState::Dragging,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            Phase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// The local-axes indicator is visible while selected or dragging.
    pub fn shows_axes(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Takes effect at the next pointer-down or pointer-move.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    /// Mirror the orchestrator's selection. Ignored while dragging.
    pub fn set_selected(&mut self, selected: bool) {
        self.phase = match (self.phase, selected) {
            (Phase::Dragging(session), _) => {
                tracing::debug!(tooth = %self.tooth, "selection change ignored during drag");
                Phase::Dragging(session)
            }
            (_, true) => Phase::Selected,
            (_, false) => Phase::Idle,
        };
    }

    /// `Selected → Dragging` on a primary pointer-down while edit mode is on.
    ///
    /// `current` is the movable transform to snapshot.
    pub fn begin_drag(&mut self, event: &PointerEvent, current: &Transform) -> Option<SceneEvent> {
        if self.phase != Phase::Selected || !self.mode.enabled || !event.is_primary() {
            return None;
        }

        let gesture = self.gesture_for(event);
        self.phase = Phase::Dragging(DragSession {
            pointer_id: event.pointer_id,
            gesture,
            start_screen: event.position,
            start_position: current.position,
            start_orientation: current.orientation,
        });
        tracing::debug!(tooth = %self.tooth, pointer = event.pointer_id, ?gesture, "drag started");

        Some(SceneEvent::DragStarted {
            tooth: self.tooth.clone(),
            pointer_id: event.pointer_id,
        })
    }

    /// Rotation when the configured modifier is held or the rotate tool is
    /// active, translation otherwise.
    pub fn gesture_for(&self, event: &PointerEvent) -> Gesture {
        if event.modifiers.is_held(self.config.rotate_modifier)
            || self.mode.tool == TransformTool::Rotate
        {
            Gesture::Rotate
        } else {
            Gesture::Translate
        }
    }

    /// Apply a pointer move to `movable`. Returns whether it was applied.
    pub fn drag_to(&self, event: &PointerEvent, movable: &mut Transform) -> bool {
        let Phase::Dragging(session) = &self.phase else {
            return false;
        };
        if event.pointer_id != session.pointer_id {
            return false;
        }

        let delta = event.position - session.start_screen;
        match session.gesture {
            Gesture::Rotate => {
                let spin = DQuat::from_rotation_z(delta.x * self.config.rotate_sensitivity);
                // left-multiplied: pivots about the axis frame's Z through its origin
                movable.orientation = frame::normalize_orientation(spin * session.start_orientation);
                movable.position = spin * session.start_position;
            }
            Gesture::Translate => {
                let s = self.config.translate_sensitivity;
                movable.position = session.start_position + DVec3::new(delta.x * s, -delta.y * s, 0.0);
            }
        }
        true
    }

    /// `Dragging → Selected` on pointer-up (or lost capture) from the
    /// captured pointer.
    pub fn end_drag(&mut self, pointer_id: u32, reason: DragEndReason) -> Option<SceneEvent> {
        let Phase::Dragging(session) = self.phase else {
            return None;
        };
        if session.pointer_id != pointer_id {
            return None;
        }

        self.phase = Phase::Selected;
        tracing::debug!(tooth = %self.tooth, pointer = pointer_id, ?reason, "drag ended");
        Some(SceneEvent::DragEnded {
            tooth: self.tooth.clone(),
            pointer_id,
            reason,
        })
    }

    /// Abort the drag and restore the pose captured at its start.
    pub fn cancel_drag(&mut self, movable: &mut Transform) -> Option<SceneEvent> {
        let Phase::Dragging(session) = self.phase else {
            return None;
        };
        movable.position = session.start_position;
        movable.orientation = session.start_orientation;
        self.end_drag(session.pointer_id, DragEndReason::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Modifiers, PointerButton};
    use cusp_core::ModifierKey;
    use glam::DMat4;
    use std::f64::consts::PI;

    const S: f64 = 20.0;

    fn controller() -> InteractionController {
        let config = InteractionConfig {
            translate_sensitivity: S,
            rotate_sensitivity: PI,
            rotate_modifier: ModifierKey::Shift,
        };
        let mut c = InteractionController::new(ToothId::from("11"), config);
        c.set_mode(EditMode::translate());
        c.set_selected(true);
        c
    }

    fn at(pointer_id: u32, x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(pointer_id, DVec2::new(x, y))
    }

    #[test]
    fn test_idle_to_selected_to_idle() {
        let mut c = InteractionController::new(ToothId::from("11"), InteractionConfig::default());
        assert_eq!(c.state(), InteractionState::Idle);
        assert!(!c.shows_axes());

        c.set_selected(true);
        assert_eq!(c.state(), InteractionState::Selected);
        assert!(c.shows_axes());

        c.set_selected(false);
        assert_eq!(c.state(), InteractionState::Idle);
    }

    #[test]
    fn test_drag_requires_selection_edit_mode_and_primary() {
        let mut idle = InteractionController::new(ToothId::from("11"), InteractionConfig::default());
        idle.set_mode(EditMode::translate());
        assert!(idle.begin_drag(&at(1, 0.0, 0.0), &Transform::IDENTITY).is_none());

        let mut not_editing = controller();
        not_editing.set_mode(EditMode::OFF);
        assert!(not_editing.begin_drag(&at(1, 0.0, 0.0), &Transform::IDENTITY).is_none());
        assert_eq!(not_editing.state(), InteractionState::Selected);

        let mut c = controller();
        let secondary = at(1, 0.0, 0.0).with_button(PointerButton::Secondary);
        assert!(c.begin_drag(&secondary, &Transform::IDENTITY).is_none());
        assert!(c.begin_drag(&at(1, 0.0, 0.0), &Transform::IDENTITY).is_some());
        assert_eq!(c.state(), InteractionState::Dragging);
    }

    #[test]
    fn test_drag_translate() {
        let mut c = controller();
        let mut movable = Transform::IDENTITY;
        let started = c.begin_drag(&at(7, 0.0, 0.0), &movable);
        assert_eq!(
            started,
            Some(SceneEvent::DragStarted {
                tooth: ToothId::from("11"),
                pointer_id: 7
            })
        );

        assert!(c.drag_to(&at(7, 0.1, 0.1), &mut movable));
        assert!(movable
            .position
            .abs_diff_eq(DVec3::new(0.1 * S, -0.1 * S, 0.0), 1e-12));
        assert_eq!(movable.orientation, DQuat::IDENTITY);

        let ended = c.end_drag(7, DragEndReason::Released);
        assert!(matches!(ended, Some(SceneEvent::DragEnded { .. })));
        assert_eq!(c.state(), InteractionState::Selected);
        assert!(c.session().is_none());
        assert!(movable
            .position
            .abs_diff_eq(DVec3::new(0.1 * S, -0.1 * S, 0.0), 1e-12));
    }

    #[test]
    fn test_translate_is_relative_to_drag_start() {
        let mut c = controller();
        let mut movable = Transform::from_position(DVec3::new(1.0, 2.0, 3.0));
        c.begin_drag(&at(1, 0.5, -0.5), &movable);

        c.drag_to(&at(1, 0.9, -0.5), &mut movable);
        c.drag_to(&at(1, 0.6, -0.4), &mut movable);
        // only the total travel (0.1, 0.1) matters, z never moves
        assert!(movable
            .position
            .abs_diff_eq(DVec3::new(1.0 + 0.1 * S, 2.0 - 0.1 * S, 3.0), 1e-9));
    }

    fn shifted(pointer_id: u32, x: f64, y: f64) -> PointerEvent {
        at(pointer_id, x, y).with_modifiers(Modifiers::only(ModifierKey::Shift))
    }

    #[test]
    fn test_drag_rotate_with_modifier() {
        let mut c = controller();
        let start = Transform::IDENTITY.with_orientation(DQuat::from_rotation_x(0.8));
        let mut movable = start;
        c.begin_drag(&shifted(1, 0.0, 0.0), &movable);
        assert_eq!(c.session().unwrap().gesture, Gesture::Rotate);

        c.drag_to(&shifted(1, 0.1, 0.1), &mut movable);

        // origin stays on the pivot, vertical travel ignored
        assert_eq!(movable.position, start.position);
        // result * start^-1 is a pure Z rotation of 0.1 * PI
        let delta = movable.orientation * start.orientation.inverse();
        assert!(delta.abs_diff_eq(DQuat::from_rotation_z(0.1 * PI), 1e-12));
    }

    #[test]
    fn test_rotate_pivots_position_about_frame_origin() {
        let mut c = controller();
        let start = Transform::from_position(DVec3::new(2.0, 0.0, 3.0))
            .with_orientation(DQuat::from_rotation_y(0.4));
        let mut movable = start;
        c.begin_drag(&shifted(1, 0.0, 0.0), &movable);
        c.drag_to(&shifted(1, 0.5, 0.0), &mut movable);

        // a quarter turn: (2, 0, 3) -> (0, 2, 3)
        assert!(movable.position.abs_diff_eq(DVec3::new(0.0, 2.0, 3.0), 1e-12));
        // the whole transform turned rigidly: world = Rz * start
        let expected = DMat4::from_rotation_z(0.5 * PI) * start.to_matrix();
        assert!(movable.to_matrix().abs_diff_eq(expected, 1e-12));
    }

    #[test]
    fn test_gesture_fixed_at_pointer_down() {
        let mut c = controller();
        let mut movable = Transform::IDENTITY;
        c.begin_drag(&at(1, 0.0, 0.0), &movable);
        // pressing the modifier mid-drag does not switch to rotation
        c.drag_to(&shifted(1, 0.1, 0.0), &mut movable);
        assert!(movable.position.abs_diff_eq(DVec3::new(0.1 * S, 0.0, 0.0), 1e-12));
        assert_eq!(movable.orientation, DQuat::IDENTITY);
        c.end_drag(1, DragEndReason::Released);

        let start = movable;
        c.begin_drag(&shifted(2, 0.0, 0.0), &movable);
        // releasing it mid-drag does not switch to translation
        c.drag_to(&at(2, 0.0, 0.3), &mut movable);
        c.drag_to(&at(2, 0.25, 0.3), &mut movable);
        let delta = movable.orientation * start.orientation.inverse();
        assert!(delta.abs_diff_eq(DQuat::from_rotation_z(0.25 * PI), 1e-12));
        assert!(movable
            .position
            .abs_diff_eq(DQuat::from_rotation_z(0.25 * PI) * start.position, 1e-12));
    }

    #[test]
    fn test_rotate_from_identity_is_pure_z() {
        let mut c = controller();
        let mut movable = Transform::IDENTITY;
        c.begin_drag(&shifted(1, 0.0, 0.0), &movable);
        c.drag_to(&shifted(1, 0.1, 0.1), &mut movable);

        let delta = movable.orientation * DQuat::IDENTITY.inverse();
        assert!(delta.x.abs() < 1e-12 && delta.y.abs() < 1e-12);
        let (axis, angle) = delta.to_axis_angle();
        assert!(axis.abs_diff_eq(DVec3::Z, 1e-9));
        assert!((angle - 0.1 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_tool_rotates_without_modifier() {
        let mut c = controller();
        c.set_mode(EditMode::rotate());
        assert_eq!(c.gesture_for(&at(1, 0.0, 0.0)), Gesture::Rotate);
        c.begin_drag(&at(1, 0.0, 0.0), &Transform::IDENTITY);
        assert_eq!(c.session().unwrap().gesture, Gesture::Rotate);
    }

    #[test]
    fn test_other_modifier_still_translates() {
        let c = controller();
        let ctrl = at(1, 0.0, 0.0).with_modifiers(Modifiers::only(ModifierKey::Ctrl));
        assert_eq!(c.gesture_for(&ctrl), Gesture::Translate);
    }

    #[test]
    fn test_mismatched_pointer_ignored() {
        let mut c = controller();
        let mut movable = Transform::IDENTITY;
        c.begin_drag(&at(1, 0.0, 0.0), &movable);

        assert!(!c.drag_to(&at(2, 0.5, 0.5), &mut movable));
        assert_eq!(movable, Transform::IDENTITY);
        assert!(c.end_drag(2, DragEndReason::Released).is_none());
        assert!(c.is_dragging());
    }

    #[test]
    fn test_up_without_down_ignored() {
        let mut c = controller();
        assert!(c.end_drag(1, DragEndReason::Released).is_none());
        assert_eq!(c.state(), InteractionState::Selected);
    }

    #[test]
    fn test_second_pointer_cannot_start_second_session() {
        let mut c = controller();
        c.begin_drag(&at(1, 0.0, 0.0), &Transform::IDENTITY);
        assert!(c.begin_drag(&at(2, 0.0, 0.0), &Transform::IDENTITY).is_none());
        assert_eq!(c.session().unwrap().pointer_id, 1);
    }

    #[test]
    fn test_cancel_restores_start_pose() {
        let mut c = controller();
        let start = Transform::from_position(DVec3::new(4.0, 5.0, 6.0));
        let mut movable = start;
        c.begin_drag(&at(3, 0.0, 0.0), &movable);
        c.drag_to(&at(3, 0.3, 0.2), &mut movable);
        assert_ne!(movable, start);

        let ended = c.cancel_drag(&mut movable);
        assert_eq!(
            ended,
            Some(SceneEvent::DragEnded {
                tooth: ToothId::from("11"),
                pointer_id: 3,
                reason: DragEndReason::Cancelled
            })
        );
        assert_eq!(movable, start);
        assert_eq!(c.state(), InteractionState::Selected);
    }

    #[test]
    fn test_deselect_ignored_while_dragging() {
        let mut c = controller();
        c.begin_drag(&at(1, 0.0, 0.0), &Transform::IDENTITY);
        c.set_selected(false);
        assert_eq!(c.state(), InteractionState::Dragging);
        assert!(c.shows_axes());
    }
}
