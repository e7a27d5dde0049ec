use std::time::Duration;

use anyhow::Result;
use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::WindowResolution;

use crate::simulation::engine::{RunState, Simulation};
use crate::visualization::sink::{FrameBuffer, FrameSink};

/// Component tagging each circle with its body index into the universe
#[derive(Component)]
struct BodyIndex(pub usize);

/// The simulation plus the frame it last drew, stepped from `FixedUpdate`
#[derive(Resource)]
struct Viewer {
    sim: Simulation,
    frame: FrameBuffer,
    scale: f32, // pixels per simulation length unit
    finished: bool,
}

const WINDOW_SIZE: f32 = 512.0;
const BODY_RADIUS_PX: f32 = 6.0;

/// Open a window and animate `sim` until it is done, one step per `pause`.
/// The universe radius maps onto half the window.
pub fn run_2d(sim: Simulation, pause: Duration) -> Result<()> {
    log::info!("run_2d: starting Bevy 2D viewer with {} bodies", sim.universe().len());

    let radius = sim.universe().radius;
    let scale = if radius > 0.0 { 0.5 * WINDOW_SIZE / radius as f32 } else { 1.0 };

    let mut frame = FrameBuffer::new();
    frame.begin(radius, &sim.universe().bodies)?;

    // the log crate is already wired to env_logger
    let plugins = DefaultPlugins
        .build()
        .disable::<LogPlugin>()
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "nbsim".into(),
                resolution: WindowResolution::new(WINDOW_SIZE, WINDOW_SIZE),
                ..Default::default()
            }),
            ..Default::default()
        });

    App::new()
        .insert_resource(Viewer {
            sim,
            frame,
            scale,
            finished: false,
        })
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Time::<Fixed>::from_duration(pause.max(Duration::from_millis(1))))
        .add_plugins(plugins)
        .add_systems(Startup, setup_bodies_system)
        .add_systems(FixedUpdate, physics_step_system)
        .add_systems(Update, sync_transforms_system)
        .run();

    Ok(())
}

/// Stable colour for a tag, so the same image name always gets the same hue
fn tag_color(tag: &str) -> Color {
    // FNV-1a
    let mut h: u32 = 0x811c_9dc5;
    for b in tag.bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(0x0100_0193);
    }
    Color::hsl((h % 360) as f32, 0.7, 0.6)
}

fn setup_bodies_system(mut commands: Commands, viewer: Res<Viewer>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let circle = Mesh2dHandle(meshes.add(Circle::new(BODY_RADIUS_PX)));

    for (i, drawn) in viewer.frame.current().iter().enumerate() {
        let x = drawn.x as f32 * viewer.scale;
        let y = drawn.y as f32 * viewer.scale;

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: circle.clone(),
                material: materials.add(ColorMaterial::from(tag_color(&drawn.tag))),
                transform: Transform::from_xyz(x, y, 0.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn physics_step_system(mut viewer: ResMut<Viewer>) {
    // Split &mut Viewer into &mut fields in one destructuring step
    let Viewer {
        sim,
        frame,
        finished,
        ..
    } = &mut *viewer;

    if *finished {
        return;
    }

    match sim.step(frame) {
        Ok(RunState::Running) => {}
        Ok(RunState::Done) => {
            *finished = true;
            log::info!("simulation done after {} steps, t = {}", sim.steps(), sim.time());
        }
        Err(e) => {
            *finished = true;
            log::error!("simulation stopped: {e:#}");
        }
    }
}

fn sync_transforms_system(viewer: Res<Viewer>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = viewer.frame.current().get(*i) {
            transform.translation.x = (b.x as f32) * viewer.scale;
            transform.translation.y = (b.y as f32) * viewer.scale;
        }
    }
}
