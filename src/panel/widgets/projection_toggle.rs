//! Orthographic/perspective projection toggle.
//!
//! A stateless controlled switch flanked by two glyph icons with hover
//! tooltips. The widget stores no projection state of its own: clicking
//! the switch reports the requested state through [`ProjectionToggled`],
//! the owner applies it to its camera, and the switch visual follows the
//! event.

use std::time::{Duration, Instant};

use bevy::ecs::event::Event;
use bevy::ecs::observer::On;
use bevy::picking::events::{Out, Over, Pointer};
use bevy::prelude::*;

use crate::panel::config::PanelConfig;

use super::toggle::{ToggleSwitch, SwitchToggled, refresh_switch, toggle_switch};

/// Marker for the projection switch.
#[derive(Component)]
pub struct ProjectionSwitch;

/// Hoverable description shown as a tooltip after a short delay.
#[derive(Component)]
pub struct Tooltip {
    pub label: String,
}

/// Inserted while a tooltip owner is hovered.
#[derive(Component)]
pub(crate) struct TooltipHover {
    since: Instant,
}

/// Marker for a spawned tooltip popup.
#[derive(Component)]
pub(crate) struct TooltipPopup;

/// The user asked for the other projection.
#[derive(Event, Clone, Debug)]
pub struct ProjectionToggled {
    pub orthographic: bool,
}

/// Builds the projection toggle: perspective icon, switch, orthographic
/// icon. On means orthographic.
pub fn projection_toggle(is_orthographic: bool, config: &PanelConfig) -> impl Bundle {
    (
        Node {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            column_gap: Val::Px(8.0),
            ..default()
        },
        children![
            icon("\u{25B1}", "Perspective View", config),
            toggle_switch(is_orthographic, ProjectionSwitch, config),
            icon("\u{25AD}", "Orthographic View", config),
        ],
    )
}

fn icon(glyph: &str, label: &str, config: &PanelConfig) -> impl Bundle {
    (
        Text::new(glyph),
        TextFont {
            font_size: config.body_font_size + 2.0,
            ..default()
        },
        TextColor(config.text_color),
        Tooltip {
            label: label.to_string(),
        },
        Interaction::default(),
    )
}

// Observer: clicking the projection switch reports the requested state.
pub(crate) fn projection_switch_on_toggled(
    trigger: On<SwitchToggled>,
    switches: Query<(), With<ProjectionSwitch>>,
    mut commands: Commands,
) {
    if switches.contains(trigger.source) {
        commands.trigger(ProjectionToggled {
            orthographic: trigger.on,
        });
    }
}

// Observer: follow the owner-confirmed projection state visually.
pub(crate) fn refresh_projection_switch(
    trigger: On<ProjectionToggled>,
    mut switches: Query<(&mut ToggleSwitch, &mut Node, &mut BackgroundColor), With<ProjectionSwitch>>,
    config: Res<PanelConfig>,
) {
    for (mut switch, mut node, mut background) in &mut switches {
        refresh_switch(
            trigger.orthographic,
            &mut switch,
            &mut node,
            &mut background,
            &config,
        );
    }
}

// Observer: start the hover timer.
pub(crate) fn tooltip_on_over(
    over: On<Pointer<Over>>,
    tooltips: Query<&Tooltip>,
    mut commands: Commands,
) {
    if tooltips.contains(over.entity) {
        commands.entity(over.entity).insert(TooltipHover {
            since: Instant::now(),
        });
    }
}

// Observer: hide the tooltip on pointer-out.
pub(crate) fn tooltip_on_out(
    out: On<Pointer<Out>>,
    tooltips: Query<&Tooltip>,
    children: Query<&Children>,
    popups: Query<(), With<TooltipPopup>>,
    mut commands: Commands,
) {
    if !tooltips.contains(out.entity) {
        return;
    }
    commands.entity(out.entity).remove::<TooltipHover>();
    if let Ok(kids) = children.get(out.entity) {
        for child in kids.iter() {
            if popups.contains(child) {
                commands.entity(child).despawn();
            }
        }
    }
}

// System: show the popup once the hover delay has elapsed.
pub(crate) fn show_tooltips(
    hovered: Query<(Entity, &Tooltip, &TooltipHover, Option<&Children>)>,
    popups: Query<(), With<TooltipPopup>>,
    config: Res<PanelConfig>,
    mut commands: Commands,
) {
    let delay = Duration::from_millis(config.tooltip_delay_ms);

    for (entity, tooltip, hover, children) in &hovered {
        if hover.since.elapsed() < delay {
            continue;
        }
        let shown = children
            .map(|c| c.iter().any(|child| popups.contains(child)))
            .unwrap_or(false);
        if shown {
            continue;
        }

        let label = tooltip.label.clone();
        let background = config.tooltip_bg_color;
        let border = config.border_color;
        let font_size = config.small_font_size;

        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Percent(100.0),
                    left: Val::Px(0.0),
                    padding: UiRect::axes(Val::Px(6.0), Val::Px(3.0)),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(background),
                BorderColor::all(border),
                Pickable::IGNORE,
                TooltipPopup,
                children![(
                    Text::new(label),
                    TextFont {
                        font_size,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    Pickable::IGNORE,
                )],
            ));
        });
    }
}
