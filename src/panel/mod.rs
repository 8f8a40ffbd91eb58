//! Parameter panel UI module.
//!
//! Provides a separate window for editing a set of typed parameters in a
//! Bevy application using bevy_ui and bevy_experimental_feathers, plus the
//! projection toggle widget for 3D viewer owners.

pub mod config;
pub mod param_list;
pub mod plugin;
pub mod state;
pub mod validate;
pub mod widgets;

pub use config::PanelConfig;
pub use param_list::{FilterInput, RowsContent, sync_parameter_rows};
pub use plugin::{PanelInternal, PanelSet, PanelWindow, ParameterPanelPlugin};
pub use state::{PanelState, PanelWindowState, ParameterSet, matches_filter};
pub use validate::{MeasurementClassifier, ParameterValidator, default_validate, slider_range};
pub use widgets::{
    PanelWidgetsPlugin, ParamTarget, ParameterCommitted, ParameterEditor, PendingCommits,
    ProjectionToggled, projection_toggle,
};
