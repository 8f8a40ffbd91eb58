//! Scrollable list of parameter editor rows.
//!
//! One row per parameter in the owner's [`ParameterSet`], filtered by the
//! panel's filter box. Each row shows a label column and an editing
//! surface chosen by the parameter's kind; the dispatch is an exhaustive
//! match, so every kind has exactly one surface.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::ecs::observer::On;
use bevy::prelude::*;
use bevy::ui::Val::*;
use bevy::ui_widgets::{ControlOrientation, CoreScrollbarThumb, Scrollbar};

use crate::parameter::draft::Draft;
use crate::parameter::{ParamKind, ParamValue, Parameter};

use super::config::PanelConfig;
use super::state::{PanelState, ParameterSet, matches_filter};
use super::validate::{MeasurementClassifier, slider_range};
use super::widgets::editor::format_number;
use super::widgets::{
    ParamTarget, ParameterEditor, Placeholder, TextFieldBlurred, TextFieldEdited, param_slider,
    text_field, toggle_switch,
};

/// Marker for the scrollable rows container.
#[derive(Component)]
pub struct RowsContent;

/// Marker for the filter box.
#[derive(Component)]
pub struct FilterInput;

/// Exclusive system that keeps the row list in sync with the owner's set.
///
/// Two paths:
/// - a filter or membership change rebuilds the whole list;
/// - a revision bump re-seeds each stale row in place: the incoming
///   parameter supersedes the row's draft, discarding any uncommitted
///   edits, and the row's widgets are rebuilt from it.
pub fn sync_parameter_rows(world: &mut World) {
    let revision = world.resource::<ParameterSet>().revision();
    let (filter_text, stale, seen_revision) = {
        let state = world.resource::<PanelState>();
        (state.filter_text.clone(), state.stale, state.seen_revision)
    };
    if !stale && seen_revision == revision {
        return;
    }

    let content_entity = {
        let mut query = world.query_filtered::<Entity, With<RowsContent>>();
        match query.iter(world).next() {
            Some(entity) => entity,
            None => return,
        }
    };

    let desired: Vec<Parameter> = world
        .resource::<ParameterSet>()
        .params()
        .iter()
        .filter(|p| matches_filter(&p.display_name, &filter_text))
        .cloned()
        .collect();

    // Existing rows in display order.
    let row_entities: Vec<Entity> = world
        .get::<Children>(content_entity)
        .map(|c| c.iter().collect())
        .unwrap_or_default();
    let mut rows: Vec<(Entity, String, u64)> = Vec::new();
    for entity in row_entities {
        if let Some(editor) = world.get::<ParameterEditor>(entity) {
            rows.push((
                entity,
                editor.draft.param().name.clone(),
                editor.seen_revision,
            ));
        }
    }

    let config = world.resource::<PanelConfig>().clone();
    let classifier = world.resource::<MeasurementClassifier>().clone();

    let names_match = rows.len() == desired.len()
        && rows.iter().zip(&desired).all(|((_, name, _), p)| *name == p.name);

    if stale || !names_match {
        for (entity, _, _) in rows {
            if world.entities().contains(entity) {
                world.entity_mut(entity).despawn();
            }
        }
        for param in desired {
            spawn_parameter_row(world, content_entity, param, revision, &config, &classifier);
        }
    } else {
        for (entity, name, seen) in rows {
            if seen == revision {
                continue;
            }
            let Some(param) = world.resource::<ParameterSet>().get(&name).cloned() else {
                continue;
            };
            if let Some(mut editor) = world.get_mut::<ParameterEditor>(entity) {
                // External value superseded local edit.
                editor.draft.supersede(param);
                editor.seen_revision = revision;
            }
            rebuild_row_widgets(world, entity, &config, &classifier);
        }
    }

    let mut state = world.resource_mut::<PanelState>();
    state.stale = false;
    state.seen_revision = revision;
}

fn spawn_parameter_row(
    world: &mut World,
    parent: Entity,
    param: Parameter,
    revision: u64,
    config: &PanelConfig,
    classifier: &MeasurementClassifier,
) {
    let align = if param.effective_kind().is_list() {
        AlignItems::Start
    } else {
        AlignItems::Center
    };
    let row = world
        .spawn((
            Node {
                width: Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Row,
                column_gap: config.widget_gap,
                align_items: align,
                ..default()
            },
            ParameterEditor {
                draft: Draft::new(param),
                seen_revision: revision,
            },
            ChildOf(parent),
        ))
        .id();
    spawn_row_widgets(world, row, config, classifier);
}

fn rebuild_row_widgets(
    world: &mut World,
    row: Entity,
    config: &PanelConfig,
    classifier: &MeasurementClassifier,
) {
    let children: Vec<Entity> = world
        .get::<Children>(row)
        .map(|c| c.iter().collect())
        .unwrap_or_default();
    for child in children {
        if world.entities().contains(child) {
            world.entity_mut(child).despawn();
        }
    }
    spawn_row_widgets(world, row, config, classifier);
}

/// Spawns the label column and the kind-appropriate editing surface for a
/// row, reading the row's draft.
fn spawn_row_widgets(
    world: &mut World,
    row: Entity,
    config: &PanelConfig,
    classifier: &MeasurementClassifier,
) {
    let Some(editor) = world.get::<ParameterEditor>(row) else {
        return;
    };
    let param = editor.draft.param().clone();

    world.spawn((
        Text::new(param.display_name.clone()),
        TextFont {
            font_size: config.body_font_size,
            ..default()
        },
        TextColor(config.muted_text_color),
        Node {
            width: config.label_column_width,
            flex_shrink: 0.0,
            ..default()
        },
        ChildOf(row),
    ));

    // A malformed kind/value combination degrades to a label-only row.
    if let Err(err) = param.check_shape() {
        warn!("{err}; rendering no editing surface");
        return;
    }

    let measurement = classifier.is_measurement(&param);

    match param.effective_kind() {
        ParamKind::Number => {
            let value = param.value.as_number().unwrap_or(0.0);
            let default = param.default_value.as_number().unwrap_or(0.0);
            spawn_number_widgets(
                world,
                row,
                ParamTarget { row, index: None },
                value,
                default,
                measurement,
                config,
            );
        }
        ParamKind::Bool => {
            let on = param.value.as_bool().unwrap_or(false);
            world.spawn((
                toggle_switch(on, ParamTarget { row, index: None }, config),
                ChildOf(row),
            ));
        }
        ParamKind::Text => {
            let text = param.value.as_text().unwrap_or("").to_string();
            world.spawn((
                text_field(text, Percent(100.0), ParamTarget { row, index: None }, config),
                ChildOf(row),
            ));
        }
        ParamKind::NumberList => {
            let column = spawn_element_column(world, row);
            if let ParamValue::NumberList(values) = param.value.clone() {
                for (index, value) in values.iter().enumerate() {
                    let default = param.element_default(index).as_number().unwrap_or(0.0);
                    let element_row = world
                        .spawn((
                            Node {
                                width: Percent(100.0),
                                display: Display::Flex,
                                flex_direction: FlexDirection::Row,
                                column_gap: config.widget_gap,
                                align_items: AlignItems::Center,
                                ..Default::default()
                            },
                            ChildOf(column),
                        ))
                        .id();
                    spawn_number_widgets(
                        world,
                        element_row,
                        ParamTarget {
                            row,
                            index: Some(index),
                        },
                        *value,
                        default,
                        measurement,
                        config,
                    );
                }
            }
        }
        ParamKind::BoolList => {
            let column = spawn_element_column(world, row);
            if let ParamValue::BoolList(values) = param.value.clone() {
                for (index, on) in values.iter().enumerate() {
                    world.spawn((
                        toggle_switch(
                            *on,
                            ParamTarget {
                                row,
                                index: Some(index),
                            },
                            config,
                        ),
                        ChildOf(column),
                    ));
                }
            }
        }
        ParamKind::TextList => {
            let column = spawn_element_column(world, row);
            if let ParamValue::TextList(values) = param.value.clone() {
                for (index, text) in values.iter().enumerate() {
                    world.spawn((
                        text_field(
                            text.clone(),
                            Percent(100.0),
                            ParamTarget {
                                row,
                                index: Some(index),
                            },
                            config,
                        ),
                        ChildOf(column),
                    ));
                }
            }
        }
    }
}

/// Slider, synced numeric field, and unit suffix for one numeric value.
fn spawn_number_widgets(
    world: &mut World,
    parent: Entity,
    target: ParamTarget,
    value: f64,
    default: f64,
    measurement: bool,
    config: &PanelConfig,
) {
    let (min, max) = slider_range(default, value);
    world.spawn((param_slider(value, min, max, target, config), ChildOf(parent)));
    world.spawn((
        text_field(format_number(value), config.field_width, target, config),
        ChildOf(parent),
    ));
    world.spawn((
        Text::new(if measurement { "mm" } else { "" }),
        TextFont {
            font_size: config.small_font_size,
            ..Default::default()
        },
        TextColor(config.muted_text_color),
        Node {
            width: config.unit_label_width,
            flex_shrink: 0.0,
            ..Default::default()
        },
        ChildOf(parent),
    ));
}

fn spawn_element_column(world: &mut World, row: Entity) -> Entity {
    world
        .spawn((
            Node {
                flex_grow: 1.0,
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                row_gap: Px(4.0),
                ..default()
            },
            ChildOf(row),
        ))
        .id()
}

// Observer: filter box keystrokes narrow the list live.
pub(crate) fn filter_on_edited(
    trigger: On<TextFieldEdited>,
    filters: Query<(), With<FilterInput>>,
    mut state: ResMut<PanelState>,
) {
    if filters.contains(trigger.source) {
        state.filter_text = trigger.text.clone();
        state.stale = true;
    }
}

// Observer: a finished filter edit applies the final text.
pub(crate) fn filter_on_blurred(
    trigger: On<TextFieldBlurred>,
    filters: Query<(), With<FilterInput>>,
    mut state: ResMut<PanelState>,
) {
    if filters.contains(trigger.source) && state.filter_text != trigger.text {
        state.filter_text = trigger.text.clone();
        state.stale = true;
    }
}

/// Spawns the filter box and the scrollable rows area.
pub fn spawn_rows_panel(parent: &mut ChildSpawnerCommands<'_>, config: &PanelConfig) {
    // Filter box
    parent
        .spawn((
            Node {
                width: Percent(100.0),
                padding: config.panel_padding,
                border: UiRect::bottom(Px(1.0)),
                ..default()
            },
            BorderColor::all(config.border_color),
        ))
        .with_children(|search| {
            search.spawn(text_field(
                "",
                Percent(100.0),
                (FilterInput, Placeholder("Filter parameters...".into())),
                config,
            ));
        });

    // Scrollable area with scrollbar - use Grid layout
    let scrollbar_width = 8.0;
    parent
        .spawn(Node {
            width: Percent(100.0),
            flex_grow: 1.0,
            display: Display::Grid,
            grid_template_columns: vec![GridTrack::fr(1.0), GridTrack::px(scrollbar_width)],
            ..default()
        })
        .with_children(|scroll_area| {
            // Scroll content
            let content_id = scroll_area
                .spawn((
                    Node {
                        display: Display::Flex,
                        flex_direction: FlexDirection::Column,
                        row_gap: config.row_gap,
                        padding: config.panel_padding,
                        overflow: Overflow::scroll_y(),
                        ..default()
                    },
                    ScrollPosition::default(),
                    RowsContent,
                ))
                .id();

            // Scrollbar
            scroll_area
                .spawn((
                    Scrollbar {
                        target: content_id,
                        orientation: ControlOrientation::Vertical,
                        min_thumb_length: 20.0,
                    },
                    Node {
                        width: Px(scrollbar_width),
                        height: Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.15, 0.15, 0.15, 0.5)),
                ))
                .with_children(|sb| {
                    sb.spawn((
                        CoreScrollbarThumb,
                        Node {
                            width: Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgba(0.5, 0.5, 0.5, 0.8)),
                    ));
                });
        });
}
