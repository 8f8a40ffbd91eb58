//! Drag-to-set slider widget.
//!
//! Horizontal dragging maps pointer travel onto the value range for live
//! feedback; releasing the drag finishes the edit. The slider itself never
//! commits anything — it reports [`SliderDragged`] and [`SliderReleased`]
//! and displays whatever value is pushed back into it.

use bevy::ecs::entity::Entity;
use bevy::ecs::event::Event;
use bevy::ecs::observer::On;
use bevy::picking::events::{Drag, DragEnd, DragStart, Pointer};
use bevy::prelude::*;

use crate::panel::config::PanelConfig;

/// A horizontal slider over a fixed numeric range.
#[derive(Component)]
pub struct ParamSlider {
    /// Currently displayed value.
    pub value: f64,
    /// Minimum value (left edge of the track).
    pub min: f64,
    /// Maximum value (right edge of the track).
    pub max: f64,
}

impl ParamSlider {
    /// Position of the value along the track, 0..=1.
    pub(crate) fn fraction(&self) -> f32 {
        if self.max > self.min {
            ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

/// Tracks an in-progress drag.
#[derive(Component, Default)]
pub struct SliderDragState {
    /// Whether currently dragging.
    pub dragging: bool,
    /// The value when dragging started.
    pub start_value: f64,
}

/// Marker for the filled portion of the track.
#[derive(Component)]
pub struct SliderFill;

/// Live value change while dragging.
#[derive(Event, Clone, Debug)]
pub struct SliderDragged {
    pub source: Entity,
    pub value: f64,
}

/// Drag released; the edit is finished.
#[derive(Event, Clone, Debug)]
pub struct SliderReleased {
    pub source: Entity,
    pub value: f64,
}

/// Builds a slider bundle. `overrides` attaches caller components (an edit
/// target) to the slider entity.
pub fn param_slider(
    value: f64,
    min: f64,
    max: f64,
    overrides: impl Bundle,
    config: &PanelConfig,
) -> impl Bundle {
    let slider = ParamSlider { value, min, max };
    let fill = slider.fraction() * 100.0;
    (
        Node {
            flex_grow: 1.0,
            height: config.widget_height,
            ..default()
        },
        BackgroundColor(config.field_bg_color),
        slider,
        SliderDragState::default(),
        Interaction::default(),
        overrides,
        children![(
            Node {
                width: Val::Percent(fill),
                height: Val::Percent(100.0),
                ..default()
            },
            BackgroundColor(config.accent_color),
            Pickable::IGNORE,
            SliderFill,
        )],
    )
}

/// Applies a value refresh to a slider and its fill bar.
pub fn refresh_slider(
    value: f64,
    slider: &mut ParamSlider,
    children: &Children,
    fill_nodes: &mut Query<&mut Node, With<SliderFill>>,
) {
    slider.value = value;
    for child in children.iter() {
        if let Ok(mut node) = fill_nodes.get_mut(child) {
            node.width = Val::Percent(slider.fraction() * 100.0);
        }
    }
}

// Observer: capture the value at drag start.
pub(crate) fn slider_on_drag_start(
    mut drag_start: On<Pointer<DragStart>>,
    mut q_slider: Query<(&ParamSlider, &mut SliderDragState)>,
) {
    if let Ok((slider, mut drag_state)) = q_slider.get_mut(drag_start.entity) {
        drag_start.propagate(false);
        drag_state.dragging = true;
        drag_state.start_value = slider.value;
    }
}

// Observer: map horizontal drag distance onto the value range.
pub(crate) fn slider_on_drag(
    mut drag: On<Pointer<Drag>>,
    q_slider: Query<(&ParamSlider, &SliderDragState, &ComputedNode)>,
    mut commands: Commands,
) {
    if let Ok((slider, drag_state, computed)) = q_slider.get(drag.entity) {
        drag.propagate(false);

        if !drag_state.dragging {
            return;
        }

        // Track width in logical pixels.
        let width = (computed.size().x * computed.inverse_scale_factor()) as f64;
        if width <= 0.0 {
            return;
        }

        let delta = drag.distance.x as f64 / width * (slider.max - slider.min);
        let new_value = (drag_state.start_value + delta).clamp(slider.min, slider.max);

        commands.trigger(SliderDragged {
            source: drag.entity,
            value: new_value,
        });
    }
}

// Observer: releasing the drag finishes the edit.
pub(crate) fn slider_on_drag_end(
    mut drag_end: On<Pointer<DragEnd>>,
    mut q_slider: Query<(&ParamSlider, &mut SliderDragState)>,
    mut commands: Commands,
) {
    if let Ok((slider, mut drag_state)) = q_slider.get_mut(drag_end.entity) {
        drag_end.propagate(false);
        if drag_state.dragging {
            drag_state.dragging = false;
            commands.trigger(SliderReleased {
                source: drag_end.entity,
                value: slider.value,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_spans_the_range() {
        let slider = ParamSlider {
            value: 5.0,
            min: 0.0,
            max: 20.0,
        };
        assert_eq!(slider.fraction(), 0.25);
    }

    #[test]
    fn fraction_clamps_and_survives_degenerate_ranges() {
        let below = ParamSlider {
            value: -1.0,
            min: 0.0,
            max: 10.0,
        };
        assert_eq!(below.fraction(), 0.0);

        let empty = ParamSlider {
            value: 3.0,
            min: 4.0,
            max: 4.0,
        };
        assert_eq!(empty.fraction(), 0.0);
    }
}
