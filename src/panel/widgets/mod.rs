//! Parameter panel widgets.
//!
//! Editable value widgets and the plumbing that turns their events into
//! draft transitions and owner commits:
//! - ParamSlider: drag horizontally for live feedback, release to finish
//! - TextField: click to focus, Enter/blur to finish, Escape to revert
//! - ToggleSwitch: click to flip and finish immediately
//! - the projection toggle for switching camera projection modes

pub mod editor;
pub mod projection_toggle;
pub mod slider;
pub mod text_field;
pub mod toggle;

pub use editor::{
    DraftChanged, ParamTarget, ParameterCommitted, ParameterEditor, PendingCommits,
    apply_pending_commits,
};
pub use projection_toggle::{ProjectionSwitch, ProjectionToggled, Tooltip, projection_toggle};
pub use slider::{ParamSlider, SliderDragged, SliderFill, SliderReleased, param_slider};
pub use text_field::{Placeholder, TextField, TextFieldBlurred, TextFieldEdited, text_field};
pub use toggle::{SwitchToggled, ToggleSwitch, toggle_switch};

use bevy::input_focus::InputFocus;
use bevy::prelude::*;

use crate::panel::config::PanelConfig;
use crate::panel::state::ParameterSet;
use crate::panel::validate::{MeasurementClassifier, ParameterValidator};

/// Plugin that adds the widget observers and display-sync systems.
pub struct PanelWidgetsPlugin;

impl Plugin for PanelWidgetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelConfig>()
            .init_resource::<ParameterSet>()
            .init_resource::<PendingCommits>()
            .init_resource::<ParameterValidator>()
            .init_resource::<MeasurementClassifier>()
            .init_resource::<InputFocus>()
            // Slider behavior
            .add_observer(slider::slider_on_drag_start)
            .add_observer(slider::slider_on_drag)
            .add_observer(slider::slider_on_drag_end)
            // Text field focus and keyboard input
            .add_observer(text_field::text_field_on_click)
            .add_observer(text_field::text_field_on_keyboard_input)
            // Switch clicks
            .add_observer(toggle::switch_on_click)
            // Editor plumbing: widget events -> draft transitions -> commits
            .add_observer(editor::editor_on_slider_dragged)
            .add_observer(editor::editor_on_slider_released)
            .add_observer(editor::editor_on_text_edited)
            .add_observer(editor::editor_on_text_blurred)
            .add_observer(editor::editor_on_switch_toggled)
            .add_observer(editor::refresh_row_widgets)
            .add_observer(editor::queue_commit)
            // Projection toggle and tooltips
            .add_observer(projection_toggle::projection_switch_on_toggled)
            .add_observer(projection_toggle::refresh_projection_switch)
            .add_observer(projection_toggle::tooltip_on_over)
            .add_observer(projection_toggle::tooltip_on_out)
            .add_systems(
                Update,
                (
                    text_field::sync_field_display,
                    projection_toggle::show_tooltips,
                    editor::apply_pending_commits,
                ),
            );
    }
}
