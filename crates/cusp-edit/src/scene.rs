//! Scene orchestration: the tooth store, single selection, edit mode and
//! orbit-control gating.
//!
//! Everything runs synchronously on the UI thread. The shell forwards
//! pointer events (with its own hit-test result), calls
//! [`SceneOrchestrator::placements`] every frame, and drains
//! [`SceneOrchestrator::drain_events`] to apply selection highlights and to
//! switch the orbit camera control on or off.

use crate::event::{DragEndReason, SceneEvent};
use crate::event_bus::EventBus;
use crate::input::PointerEvent;
use crate::interaction::{EditMode, InteractionState};
use crate::tooth::{Placement, Tooth};
use cusp_core::{CuspConfig, CuspError, InteractionConfig, Result, ToothId, Transform};
use cusp_pose::{PoseRecord, PoseTable};
use glam::DMat4;
use std::collections::BTreeMap;

/// Owns all per-tooth state and the global interaction state.
///
/// At most one tooth is dragged at a time: while a drag is active, further
/// pointer-downs on teeth are ignored whichever pointer they come from.
pub struct SceneOrchestrator {
    teeth: BTreeMap<ToothId, Tooth>,
    poses: PoseTable,
    selection: Option<ToothId>,
    edit_mode: EditMode,
    orbit_enabled: bool,
    active_drag: Option<ToothId>,
    events: EventBus,
}

impl SceneOrchestrator {
    pub fn new(ids: impl IntoIterator<Item = ToothId>, config: InteractionConfig) -> Self {
        let teeth = ids
            .into_iter()
            .map(|id| (id.clone(), Tooth::new(id, config.clone())))
            .collect();
        Self {
            teeth,
            poses: PoseTable::empty(),
            selection: None,
            edit_mode: EditMode::OFF,
            orbit_enabled: true,
            active_drag: None,
            events: EventBus::new(),
        }
    }

    pub fn from_config(config: &CuspConfig) -> Self {
        Self::new(config.teeth.iter().cloned(), config.interaction.clone())
    }

    // --- Loading ---

    /// Attach axis frames from a parsed pose table. Teeth without a row keep
    /// rendering unedited and cannot be dragged.
    pub fn apply_pose_table(&mut self, table: PoseTable) {
        let mut missing = Vec::new();
        for tooth in self.teeth.values_mut() {
            match table.get(tooth.id().as_str()) {
                Some(record) => {
                    if tooth.attach_pose(record) {
                        self.events.push(SceneEvent::ToothReady(tooth.id().clone()));
                    }
                }
                None => missing.push(tooth.id().to_string()),
            }
        }
        if !missing.is_empty() {
            tracing::warn!(teeth = ?missing, "no pose row, axis editing unavailable");
        }
        self.poses = table;
    }

    /// Apply the outcome of fetching the pose table.
    ///
    /// A failed fetch is logged and replaced by an empty table so rendering
    /// continues without axis editing; the error is still returned.
    pub fn apply_pose_fetch(&mut self, fetched: Result<PoseTable>) -> Result<()> {
        match fetched {
            Ok(table) => {
                self.apply_pose_table(table);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "pose table unavailable, continuing without axes");
                self.apply_pose_table(PoseTable::empty());
                Err(e)
            }
        }
    }

    /// The shell finished loading a tooth's geometry; `world` is the
    /// transform the loaded geometry carries (identity for world-authored
    /// assets).
    pub fn geometry_ready(&mut self, id: &ToothId, world: DMat4) -> Result<()> {
        let tooth = self
            .teeth
            .get_mut(id)
            .ok_or_else(|| CuspError::ToothNotFound(id.to_string()))?;
        if tooth.attach_geometry(world) {
            self.events.push(SceneEvent::ToothReady(id.clone()));
        }
        Ok(())
    }

    // --- Queries ---

    pub fn tooth_ids(&self) -> impl Iterator<Item = &ToothId> {
        self.teeth.keys()
    }

    pub fn tooth(&self, id: &str) -> Option<&Tooth> {
        self.teeth.get(id)
    }

    pub fn pose_table(&self) -> &PoseTable {
        &self.poses
    }

    /// Input for a tooth's axis frame, if its row has been loaded.
    pub fn pose_record(&self, id: &str) -> Option<&PoseRecord> {
        self.teeth.get(id).and_then(Tooth::pose)
    }

    pub fn is_ready(&self, id: &str) -> bool {
        self.teeth.get(id).is_some_and(Tooth::is_ready)
    }

    pub fn movable(&self, id: &str) -> Option<&Transform> {
        self.teeth.get(id).and_then(|t| t.movable().transform())
    }

    pub fn state(&self, id: &str) -> Option<InteractionState> {
        self.teeth.get(id).map(|t| t.controller().state())
    }

    pub fn selection(&self) -> Option<&ToothId> {
        self.selection.as_ref()
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    pub fn active_drag(&self) -> Option<&ToothId> {
        self.active_drag.as_ref()
    }

    /// Placement of every tooth whose geometry is loaded.
    pub fn placements(&self) -> Vec<Placement> {
        self.teeth.values().filter_map(Tooth::placement).collect()
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        self.events.drain()
    }

    // --- Mode and selection ---

    /// Set edit mode on every controller at once.
    pub fn set_edit_mode(&mut self, mode: EditMode) {
        if self.edit_mode == mode {
            return;
        }
        self.edit_mode = mode;
        for tooth in self.teeth.values_mut() {
            tooth.controller_mut().set_mode(mode);
        }
        tracing::debug!(?mode, "edit mode changed");
    }

    /// Select one tooth (or none), deselecting every other. Refused while a
    /// drag is in progress. Returns whether the selection is now `id`.
    pub fn select(&mut self, id: Option<&ToothId>) -> bool {
        if self.active_drag.is_some() {
            return self.selection.as_ref() == id;
        }
        if let Some(id) = id {
            if !self.teeth.contains_key(id) {
                tracing::warn!(tooth = %id, "select: unknown tooth");
                return false;
            }
        }
        if self.selection.as_ref() == id {
            return true;
        }

        for tooth in self.teeth.values_mut() {
            tooth.set_selected(Some(tooth.id()) == id);
        }
        self.selection = id.cloned();
        self.events
            .push(SceneEvent::SelectionChanged(self.selection.clone()));
        true
    }

    // --- Pointer input ---

    /// Pointer-down with the shell's hit-test result.
    ///
    /// A hit on a tooth is consumed there and never reaches empty-space
    /// handling. The first press on a tooth selects it; a primary press on
    /// the already-selected tooth in edit mode starts a drag.
    pub fn pointer_down(&mut self, hit: Option<&ToothId>, event: &PointerEvent) {
        match hit {
            Some(id) => self.pointer_down_on_tooth(id, event),
            None => self.pointer_down_on_empty(event),
        }
    }

    fn pointer_down_on_tooth(&mut self, id: &ToothId, event: &PointerEvent) {
        if let Some(dragging) = &self.active_drag {
            tracing::debug!(tooth = %id, %dragging, "pointer-down ignored, another drag is active");
            return;
        }
        if !self.teeth.contains_key(id) {
            tracing::warn!(tooth = %id, "pointer-down on unknown tooth");
            return;
        }

        if self.selection.as_ref() != Some(id) {
            self.select(Some(id));
            return;
        }

        let started = self.teeth.get_mut(id).and_then(|t| t.begin_drag(event));
        if let Some(event) = started {
            self.handle_drag_event(event);
        }
    }

    fn pointer_down_on_empty(&mut self, event: &PointerEvent) {
        if !event.is_primary() || self.edit_mode.enabled || self.active_drag.is_some() {
            return;
        }
        self.select(None);
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        let Some(id) = &self.active_drag else {
            return;
        };
        if let Some(tooth) = self.teeth.get_mut(id) {
            tooth.drag_to(event);
        }
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) {
        self.end_active_drag(event.pointer_id, DragEndReason::Released);
    }

    /// The shell lost capture of `pointer_id`. Ends the drag, keeping the
    /// last applied pose.
    pub fn pointer_cancel(&mut self, pointer_id: u32) {
        self.end_active_drag(pointer_id, DragEndReason::CaptureLost);
    }

    /// Abort the active drag and restore the tooth to where the drag
    /// started. Returns whether a drag was cancelled.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(id) = self.active_drag.clone() else {
            return false;
        };
        let ended = self.teeth.get_mut(&id).and_then(Tooth::cancel_drag);
        match ended {
            Some(event) => {
                self.handle_drag_event(event);
                true
            }
            None => false,
        }
    }

    fn end_active_drag(&mut self, pointer_id: u32, reason: DragEndReason) {
        let Some(id) = self.active_drag.clone() else {
            return;
        };
        let ended = self
            .teeth
            .get_mut(&id)
            .and_then(|t| t.end_drag(pointer_id, reason));
        if let Some(event) = ended {
            self.handle_drag_event(event);
        }
    }

    /// The single writer of `orbit_enabled`.
    fn handle_drag_event(&mut self, event: SceneEvent) {
        let orbit = match &event {
            SceneEvent::DragStarted { tooth, .. } => {
                self.active_drag = Some(tooth.clone());
                Some(false)
            }
            SceneEvent::DragEnded { .. } => {
                self.active_drag = None;
                Some(true)
            }
            _ => None,
        };
        self.events.push(event);
        if let Some(enabled) = orbit {
            self.set_orbit_enabled(enabled);
        }
    }

    fn set_orbit_enabled(&mut self, enabled: bool) {
        if self.orbit_enabled != enabled {
            self.orbit_enabled = enabled;
            self.events.push(SceneEvent::OrbitEnabledChanged(enabled));
        }
    }
}
