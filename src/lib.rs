//! A parameter editing panel for Bevy.
//!
//! Built using bevy_feathers. Owners put their parameters in a
//! [`panel::ParameterSet`], add [`panel::ParameterPanelPlugin`], and get a
//! panel window with one type-appropriate editing row per parameter.
//! Finished edits come back as [`panel::ParameterCommitted`] events
//! carrying the pre-edit snapshot and the new value; the set is the source
//! of truth once a commit is accepted.

pub mod panel;
pub mod parameter;

// Re-export the main plugin and the owner-facing contract types
pub use panel::{
    MeasurementClassifier, PanelConfig, ParameterCommitted, ParameterPanelPlugin, ParameterSet,
    ParameterValidator, ProjectionToggled, projection_toggle,
};
pub use parameter::{
    ParamKind, ParamValue, Parameter, ParameterError,
    draft::{Commit, Draft},
};
