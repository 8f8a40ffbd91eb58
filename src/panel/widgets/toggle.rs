//! Toggle switch widget.
//!
//! A controlled two-state switch: clicking reports the flipped state
//! through [`SwitchToggled`], and the visual follows whatever state the
//! owner pushes back via [`refresh_switch`].

use bevy::ecs::entity::Entity;
use bevy::ecs::event::Event;
use bevy::ecs::observer::On;
use bevy::ecs::relationship::Relationship;
use bevy::picking::events::{Click, Pointer};
use bevy::prelude::*;

use crate::panel::config::PanelConfig;

/// Marker + state for a toggle switch.
#[derive(Component)]
pub struct ToggleSwitch {
    pub on: bool,
}

/// Marker for the switch thumb child.
#[derive(Component)]
pub struct SwitchThumb;

/// Event emitted when a switch is clicked. Carries the flipped state.
#[derive(Event, Clone, Debug)]
pub struct SwitchToggled {
    /// The switch entity.
    pub source: Entity,
    /// The requested new state.
    pub on: bool,
}

/// Builds a toggle switch bundle. `overrides` attaches caller components
/// (an edit target, a marker) to the switch entity.
pub fn toggle_switch(on: bool, overrides: impl Bundle, config: &PanelConfig) -> impl Bundle {
    (
        Node {
            width: Val::Px(34.0),
            height: config.widget_height,
            flex_shrink: 0.0,
            padding: UiRect::all(Val::Px(3.0)),
            justify_content: thumb_side(on),
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(track_color(on, config)),
        BorderRadius::all(Val::Px(11.0)),
        ToggleSwitch { on },
        Interaction::default(),
        overrides,
        children![(
            Node {
                width: Val::Px(14.0),
                height: Val::Px(14.0),
                ..default()
            },
            BackgroundColor(config.thumb_color),
            BorderRadius::all(Val::Px(7.0)),
            Pickable::IGNORE,
            SwitchThumb,
        )],
    )
}

fn thumb_side(on: bool) -> JustifyContent {
    if on {
        JustifyContent::FlexEnd
    } else {
        JustifyContent::FlexStart
    }
}

fn track_color(on: bool, config: &PanelConfig) -> Color {
    if on {
        config.accent_color
    } else {
        config.switch_off_color
    }
}

/// Applies a state refresh to a switch's visuals.
pub fn refresh_switch(
    on: bool,
    switch: &mut ToggleSwitch,
    node: &mut Node,
    background: &mut BackgroundColor,
    config: &PanelConfig,
) {
    switch.on = on;
    node.justify_content = thumb_side(on);
    background.0 = track_color(on, config);
}

// Observer: a click anywhere in the switch flips it. Walks up the
// hierarchy so clicks landing on decorations still resolve to the switch.
pub(crate) fn switch_on_click(
    mut click: On<Pointer<Click>>,
    switches: Query<&ToggleSwitch>,
    parents: Query<&ChildOf>,
    mut commands: Commands,
) {
    let mut current = click.entity;
    loop {
        if let Ok(switch) = switches.get(current) {
            click.propagate(false);
            commands.trigger(SwitchToggled {
                source: current,
                on: !switch.on,
            });
            return;
        }
        if let Ok(child_of) = parents.get(current) {
            current = child_of.get();
        } else {
            return;
        }
    }
}
