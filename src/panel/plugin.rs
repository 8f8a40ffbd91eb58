//! Parameter panel plugin and UI scaffold.

use bevy::camera::RenderTarget;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::ecs::relationship::Relationship;
use bevy::feathers::FeathersPlugins;
use bevy::feathers::dark_theme::create_dark_theme;
use bevy::feathers::theme::{ThemeBackgroundColor, UiTheme};
use bevy::feathers::tokens;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::picking::hover::HoverMap;
use bevy::prelude::*;
use bevy::ui::Val::*;
use bevy::window::{WindowRef, WindowResolution};

use super::config::PanelConfig;
use super::param_list::{
    RowsContent, filter_on_blurred, filter_on_edited, spawn_rows_panel, sync_parameter_rows,
};
use super::state::{PanelState, PanelWindowState};
use super::widgets::PanelWidgetsPlugin;

/// Marker component for the panel window.
#[derive(Component)]
pub struct PanelWindow;

/// Marker for panel-internal entities (the panel's own camera) that owners
/// may want to exclude from their own queries.
#[derive(Component)]
pub struct PanelInternal;

/// Marker to indicate the panel UI has been initialized.
#[derive(Component)]
struct PanelUiInitialized;

/// System sets for organizing panel systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PanelSet {
    /// Handle input events.
    Input,
    /// Sync UI with state.
    SyncUi,
}

/// Plugin that opens the parameter panel window and keeps it in sync with
/// the owner's parameter set.
pub struct ParameterPanelPlugin;

impl Plugin for ParameterPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(FeathersPlugins)
            .add_plugins(PanelWidgetsPlugin)
            .insert_resource(UiTheme(create_dark_theme()))
            // State resources
            .init_resource::<PanelState>()
            .init_resource::<PanelWindowState>()
            // Filter box
            .add_observer(filter_on_edited)
            .add_observer(filter_on_blurred)
            // System ordering
            .configure_sets(Update, (PanelSet::Input, PanelSet::SyncUi).chain())
            // Startup
            .add_systems(Startup, setup_panel_window)
            // Update systems
            .add_systems(
                Update,
                (
                    handle_mouse_wheel_scroll.in_set(PanelSet::Input),
                    // UI sync - chain these so the scaffold exists before rows
                    (setup_panel_ui, sync_parameter_rows)
                        .chain()
                        .in_set(PanelSet::SyncUi),
                    // Cleanup
                    handle_window_close,
                ),
            );
    }
}

/// Spawns the panel window on startup.
fn setup_panel_window(mut commands: Commands, mut window_state: ResMut<PanelWindowState>) {
    let window_entity = commands
        .spawn((
            Window {
                title: "Parameters".to_string(),
                resolution: WindowResolution::new(360, 560),
                ..default()
            },
            PanelWindow,
            Visibility::Visible,
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();

    window_state.window_entity = Some(window_entity);
    window_state.is_open = true;

    info!("Parameter panel window created: {:?}", window_entity);
}

/// Sets up the UI scaffold once the window exists.
fn setup_panel_ui(
    mut commands: Commands,
    mut window_state: ResMut<PanelWindowState>,
    config: Res<PanelConfig>,
    mut panel_state: ResMut<PanelState>,
    panel_windows: Query<Entity, (With<PanelWindow>, Without<PanelUiInitialized>)>,
) {
    let Some(window_entity) = window_state.window_entity else {
        return;
    };

    if panel_windows.get(window_entity).is_err() {
        return;
    }

    // Mark window as initialized
    commands.entity(window_entity).insert(PanelUiInitialized);

    // Camera for the panel window, marked internal
    let camera_entity = commands
        .spawn((
            Camera2d,
            Camera {
                target: RenderTarget::Window(WindowRef::Entity(window_entity)),
                ..default()
            },
            PanelInternal,
        ))
        .id();
    window_state.camera_entity = Some(camera_entity);

    // Build UI hierarchy
    commands
        .spawn((
            Node {
                width: Percent(100.0),
                height: Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            ThemeBackgroundColor(tokens::WINDOW_BG),
            UiTargetCamera(camera_entity),
        ))
        .with_children(|root| {
            spawn_title_bar(root, &config);
            spawn_rows_panel(root, &config);
        });

    // Trigger the initial row build
    panel_state.stale = true;

    info!("Parameter panel UI initialized");
}

fn spawn_title_bar(parent: &mut ChildSpawnerCommands<'_>, config: &PanelConfig) {
    parent
        .spawn((
            Node {
                width: Percent(100.0),
                height: config.title_bar_height,
                display: Display::Flex,
                align_items: AlignItems::Center,
                padding: config.panel_padding,
                border: UiRect::bottom(Px(1.0)),
                ..default()
            },
            BorderColor::all(config.border_color),
        ))
        .with_children(|bar| {
            bar.spawn((
                Text::new("Parameters"),
                TextFont {
                    font_size: config.title_font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Handles cleanup when the panel window is closed.
fn handle_window_close(
    mut window_state: ResMut<PanelWindowState>,
    mut removed_windows: RemovedComponents<Window>,
) {
    for entity in removed_windows.read() {
        if window_state.window_entity == Some(entity) {
            window_state.window_entity = None;
            window_state.is_open = false;
            info!("Parameter panel window closed");
        }
    }
}

/// Scrolls the rows column when the wheel turns anywhere over it.
fn handle_mouse_wheel_scroll(
    mut mouse_wheel_reader: MessageReader<MouseWheel>,
    hover_map: Res<HoverMap>,
    parents: Query<&ChildOf>,
    mut rows: Query<(&mut ScrollPosition, &ComputedNode), With<RowsContent>>,
) {
    for event in mouse_wheel_reader.read() {
        let mut delta_y = event.y;
        if event.unit == MouseScrollUnit::Line {
            delta_y *= 20.0; // Convert lines to pixels
        }
        delta_y = -delta_y; // Invert for natural scrolling
        if delta_y == 0.0 {
            continue;
        }

        for pointer_map in hover_map.values() {
            for &hovered_entity in pointer_map.keys() {
                // Walk up from the hovered entity to the rows container
                let mut current = hovered_entity;
                loop {
                    if let Ok((mut scroll_pos, computed)) = rows.get_mut(current) {
                        let max_y = (computed.content_size().y - computed.size().y).max(0.0)
                            * computed.inverse_scale_factor();
                        scroll_pos.y = (scroll_pos.y + delta_y).clamp(0.0, max_y);
                        return;
                    }
                    if let Ok(child_of) = parents.get(current) {
                        current = child_of.get();
                    } else {
                        break;
                    }
                }
            }
        }
    }
}
