//! Headless replay of a select-and-drag gesture

use anyhow::{Context, Result};
use cusp_core::{CuspConfig, InteractionConfig, ToothId, Transform};
use cusp_edit::{EditMode, PointerEvent, SceneEvent, SceneOrchestrator};
use cusp_pose::{fetch_pose_table, PoseSource, PoseTable};
use glam::{DMat4, DVec2};

const POINTER: u32 = 1;

pub struct ReplayArgs {
    pub table: String,
    pub tooth: String,
    pub dx: f64,
    pub dy: f64,
    pub rotate: bool,
}

/// The tooth's pose before and after the gesture.
struct ReplayOutcome {
    local_before: Transform,
    local_after: Transform,
    world_after: Transform,
    events: Vec<SceneEvent>,
}

pub fn run(args: ReplayArgs, config: &CuspConfig) -> Result<()> {
    let source = PoseSource::parse(&args.table);
    let table = fetch_pose_table(&source)
        .with_context(|| format!("Failed to load pose table from {}", source))?;

    let outcome = replay(table, &args, config.interaction.clone())?;

    println!("tooth {}", args.tooth);
    print_transform("local before", &outcome.local_before);
    print_transform("local after ", &outcome.local_after);
    print_transform("world after ", &outcome.world_after);
    println!("events:");
    for event in &outcome.events {
        println!("  {:?}", event);
    }
    Ok(())
}

fn replay(table: PoseTable, args: &ReplayArgs, interaction: InteractionConfig) -> Result<ReplayOutcome> {
    let id = ToothId::new(args.tooth.as_str());
    let mut scene = SceneOrchestrator::new([id.clone()], interaction);
    scene.apply_pose_table(table);
    // world-authored geometry
    scene.geometry_ready(&id, DMat4::IDENTITY)?;

    let local_before = *scene
        .movable(id.as_str())
        .with_context(|| format!("Tooth {} has no pose record", id))?;

    scene.set_edit_mode(if args.rotate {
        EditMode::rotate()
    } else {
        EditMode::translate()
    });

    let press = PointerEvent::new(POINTER, DVec2::ZERO);
    let release = PointerEvent::new(POINTER, DVec2::new(args.dx, args.dy));
    // first press selects, second starts the drag
    scene.pointer_down(Some(&id), &press);
    scene.pointer_down(Some(&id), &press);
    if scene.active_drag().is_none() {
        anyhow::bail!("Drag on tooth {} did not start", id);
    }
    scene.pointer_move(&release);
    scene.pointer_up(&release);

    let local_after = *scene
        .movable(id.as_str())
        .with_context(|| format!("Tooth {} lost its movable transform", id))?;
    let placement = scene
        .placements()
        .into_iter()
        .find(|p| p.tooth == id)
        .with_context(|| format!("Tooth {} has no placement", id))?;

    Ok(ReplayOutcome {
        local_before,
        local_after,
        world_after: Transform::from_matrix(placement.live),
        events: scene.drain_events(),
    })
}

fn print_transform(label: &str, t: &Transform) {
    let p = t.position;
    let q = t.orientation;
    println!(
        "  {}  p=({:.4}, {:.4}, {:.4})  q=({:.5}, {:.5}, {:.5}, {:.5})",
        label, p.x, p.y, p.z, q.x, q.y, q.z, q.w
    );
}
