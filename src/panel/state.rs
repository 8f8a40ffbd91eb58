//! Central state for the parameter panel.
//!
//! [`ParameterSet`] is the owner's side of the contract: the panel reads
//! parameters out of it and writes committed values back into it. Every
//! external mutation bumps a revision counter; rows whose draft was seeded
//! from an older revision are superseded on the next sync.

use bevy::prelude::*;

use crate::parameter::{ParamValue, Parameter, ParameterError};

/// The owner's parameters, plus a revision counter that tracks external
/// mutations. The panel never mutates values in place; it goes through
/// [`ParameterSet::set_value`], which replaces the value and bumps the
/// revision so editor rows re-seed their drafts.
#[derive(Resource, Default)]
pub struct ParameterSet {
    params: Vec<Parameter>,
    revision: u64,
}

impl ParameterSet {
    pub fn new(params: Vec<Parameter>) -> Self {
        Self {
            params,
            revision: 1,
        }
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Monotonic counter bumped on every external mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the whole set, discarding any drafts seeded from it.
    pub fn replace(&mut self, params: Vec<Parameter>) {
        self.params = params;
        self.revision += 1;
    }

    /// Accepts a committed value for the named parameter.
    pub fn set_value(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let param = self
            .params
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| ParameterError::UnknownParameter {
                name: name.to_string(),
            })?;
        param.value = value;
        self.revision += 1;
        Ok(())
    }
}

/// UI-local state for the panel.
#[derive(Resource, Default)]
pub struct PanelState {
    /// Current filter text from the filter box.
    pub filter_text: String,
    /// Whether the row list must be rebuilt from scratch (filter change,
    /// membership change).
    pub stale: bool,
    /// The [`ParameterSet`] revision the rows were last synced against.
    pub seen_revision: u64,
}

/// Tracks the panel window lifecycle.
#[derive(Resource, Default)]
pub struct PanelWindowState {
    /// Entity ID of the panel window, if it exists.
    pub window_entity: Option<Entity>,
    /// Entity ID of the camera rendering to the panel window.
    pub camera_entity: Option<Entity>,
    /// Whether the panel window is currently open.
    pub is_open: bool,
}

/// Jaro-Winkler score above which a non-substring filter still matches.
const FUZZY_MATCH_THRESHOLD: f64 = 0.85;

/// Filter predicate for the panel's filter box: case-insensitive substring
/// match with a fuzzy fallback, so near-misses like "widht" still find
/// "Width".
pub fn matches_filter(display_name: &str, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let name = display_name.to_lowercase();
    let filter = filter.to_lowercase();
    if name.contains(&filter) {
        return true;
    }
    strsim::jaro_winkler(&name, &filter) > FUZZY_MATCH_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_bumps_revision() {
        let mut set = ParameterSet::new(vec![Parameter::number("width", "Width", 5.0, 0.0)]);
        let before = set.revision();
        set.set_value("width", ParamValue::Number(12.0)).unwrap();
        assert_eq!(set.get("width").unwrap().value, ParamValue::Number(12.0));
        assert!(set.revision() > before);
    }

    #[test]
    fn set_value_on_unknown_name_is_an_error() {
        let mut set = ParameterSet::new(vec![]);
        let err = set.set_value("ghost", ParamValue::Number(1.0)).unwrap_err();
        assert_eq!(
            err,
            ParameterError::UnknownParameter {
                name: "ghost".into()
            }
        );
        assert_eq!(set.revision(), 1);
    }

    #[test]
    fn filter_matches_substrings_and_near_misses() {
        assert!(matches_filter("Wall Width", ""));
        assert!(matches_filter("Wall Width", "wid"));
        assert!(matches_filter("Width", "widht"));
        assert!(!matches_filter("Height", "color"));
    }
}
