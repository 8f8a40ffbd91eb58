//! Demonstrates the parameter panel editing a small 3D scene.
//!
//! The cube in the main window is driven by the parameters in the panel
//! window; the toggle in the corner switches the camera between
//! perspective and orthographic projection.

use bevy::camera::ScalingMode;
use bevy::ecs::observer::On;
use bevy::prelude::*;

use feathers_param_panel::panel::PanelConfig;
use feathers_param_panel::{
    MeasurementClassifier, ParamValue, Parameter, ParameterCommitted, ParameterPanelPlugin,
    ParameterSet, ProjectionToggled, projection_toggle,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(ParameterPanelPlugin)
        .insert_resource(ParameterSet::new(sample_parameters()))
        // The demo's dimensions are millimetre quantities
        .insert_resource(MeasurementClassifier::new(|param| {
            matches!(param.name.as_str(), "width" | "height" | "depth" | "offsets")
        }))
        .add_observer(apply_projection_toggle)
        .add_observer(log_commits)
        .add_systems(Startup, setup)
        .add_systems(Update, (apply_parameters, spin_cube))
        .run();
}

fn sample_parameters() -> Vec<Parameter> {
    vec![
        Parameter::number("width", "Width", 5.0, 5.0),
        Parameter::number("height", "Height", 5.0, 5.0),
        Parameter::number("depth", "Depth", 5.0, 5.0),
        Parameter::boolean("spin", "Spin", true),
        Parameter::text("label", "Label", "Cube"),
        Parameter::number_list("offsets", "Offsets", vec![0.0, 0.0], vec![4.0, 4.0]),
        Parameter::bool_list("axis_lock", "Axis Lock", vec![false, false]),
        Parameter::text_list("tags", "Tags", vec!["demo".to_string(), "cube".to_string()]),
    ]
}

#[derive(Component)]
struct DemoCube;

#[derive(Component)]
struct DemoLabel;

#[derive(Component)]
struct MainCamera;

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PanelConfig>,
) {
    let camera = commands
        .spawn((
            Camera3d::default(),
            Transform::from_xyz(8.0, 8.0, 12.0).looking_at(Vec3::ZERO, Vec3::Y),
            MainCamera,
        ))
        .id();

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::default())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.5, 0.7, 0.9),
            ..default()
        })),
        Transform::default(),
        DemoCube,
        Name::new("Demo Cube"),
    ));

    // Projection toggle in the main window corner
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        UiTargetCamera(camera),
        children![projection_toggle(false, &config)],
    ));

    // Label overlay, driven by the "label" parameter
    commands.spawn((
        Text::new("Cube"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        TextFont {
            font_size: 16.0,
            ..default()
        },
        UiTargetCamera(camera),
        DemoLabel,
    ));
}

fn number(set: &ParameterSet, name: &str) -> Option<f64> {
    set.get(name).and_then(|p| p.value.as_number())
}

/// Pushes accepted parameter values into the scene whenever the set
/// changes.
fn apply_parameters(
    set: Res<ParameterSet>,
    mut last_revision: Local<u64>,
    mut cube: Query<&mut Transform, With<DemoCube>>,
    mut label: Query<&mut Text, With<DemoLabel>>,
) {
    if *last_revision == set.revision() {
        return;
    }
    *last_revision = set.revision();

    if let Ok(mut transform) = cube.single_mut() {
        let width = number(&set, "width").unwrap_or(5.0) as f32;
        let height = number(&set, "height").unwrap_or(5.0) as f32;
        let depth = number(&set, "depth").unwrap_or(5.0) as f32;
        transform.scale = Vec3::new(width, height, depth) * 0.2;

        if let Some(ParamValue::NumberList(offsets)) = set.get("offsets").map(|p| &p.value) {
            transform.translation.x = offsets.first().copied().unwrap_or(0.0) as f32 * 0.2;
            transform.translation.z = offsets.get(1).copied().unwrap_or(0.0) as f32 * 0.2;
        }
    }

    if let Ok(mut text) = label.single_mut()
        && let Some(label_text) = set.get("label").and_then(|p| p.value.as_text())
    {
        text.0 = label_text.to_string();
    }
}

fn spin_cube(
    set: Res<ParameterSet>,
    time: Res<Time>,
    mut cube: Query<&mut Transform, With<DemoCube>>,
) {
    let spinning = set
        .get("spin")
        .and_then(|p| p.value.as_bool())
        .unwrap_or(false);
    if !spinning {
        return;
    }

    let locks = match set.get("axis_lock").map(|p| &p.value) {
        Some(ParamValue::BoolList(locks)) => locks.clone(),
        _ => Vec::new(),
    };

    for mut transform in &mut cube {
        if !locks.first().copied().unwrap_or(false) {
            transform.rotate_y(0.6 * time.delta_secs());
        }
        if !locks.get(1).copied().unwrap_or(false) {
            transform.rotate_x(0.25 * time.delta_secs());
        }
    }
}

// Observer: swap the main camera projection when the toggle is clicked.
fn apply_projection_toggle(
    trigger: On<ProjectionToggled>,
    mut cameras: Query<&mut Projection, With<MainCamera>>,
) {
    for mut projection in &mut cameras {
        *projection = if trigger.orthographic {
            let mut ortho = OrthographicProjection::default_3d();
            ortho.scaling_mode = ScalingMode::FixedVertical {
                viewport_height: 10.0,
            };
            Projection::Orthographic(ortho)
        } else {
            Projection::Perspective(PerspectiveProjection::default())
        };
    }
}

// Observer: show the previous/next diff every commit carries.
fn log_commits(trigger: On<ParameterCommitted>) {
    info!(
        "commit {}: {:?} -> {:?}",
        trigger.commit.previous.name, trigger.commit.previous.value, trigger.commit.next
    );
}
