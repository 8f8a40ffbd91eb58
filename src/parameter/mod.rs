//! Parameter data model.
//!
//! A [`Parameter`] is a typed, named, user-editable value with a default and
//! a display label. Values come in six shapes ([`ParamValue`]): number,
//! boolean, and text scalars plus their list counterparts. The panel
//! dispatches its editing widgets over [`ParamKind`] with an exhaustive
//! match, so adding a seventh shape is a compile error until every widget
//! site handles it.

use thiserror::Error;

pub mod draft;

/// Errors surfaced at the panel's seams.
///
/// These are logged, never shown to the user: a malformed parameter
/// degrades to a label-only row, and a commit against a vanished parameter
/// is dropped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// The value shape does not match the declared kind.
    #[error("parameter `{name}`: declared {kind:?} but value is {value_kind:?}")]
    ShapeMismatch {
        name: String,
        kind: ParamKind,
        value_kind: ParamKind,
    },
    /// A commit referenced a parameter that is not in the set.
    #[error("unknown parameter `{name}`")]
    UnknownParameter { name: String },
}

/// The six value shapes a parameter can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Number,
    Bool,
    Text,
    NumberList,
    BoolList,
    TextList,
}

impl ParamKind {
    /// The scalar counterpart of a list kind, `None` for scalars.
    pub fn element_kind(self) -> Option<ParamKind> {
        match self {
            ParamKind::NumberList => Some(ParamKind::Number),
            ParamKind::BoolList => Some(ParamKind::Bool),
            ParamKind::TextList => Some(ParamKind::Text),
            ParamKind::Number | ParamKind::Bool | ParamKind::Text => None,
        }
    }

    /// Whether this kind is one of the list shapes.
    pub fn is_list(self) -> bool {
        self.element_kind().is_some()
    }
}

/// A parameter value, tagged with its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Bool(bool),
    Text(String),
    NumberList(Vec<f64>),
    BoolList(Vec<bool>),
    TextList(Vec<String>),
}

impl ParamValue {
    /// The kind tag matching this value's shape.
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Number(_) => ParamKind::Number,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Text(_) => ParamKind::Text,
            ParamValue::NumberList(_) => ParamKind::NumberList,
            ParamValue::BoolList(_) => ParamKind::BoolList,
            ParamValue::TextList(_) => ParamKind::TextList,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Number of elements, `None` for scalars.
    pub fn list_len(&self) -> Option<usize> {
        match self {
            ParamValue::NumberList(v) => Some(v.len()),
            ParamValue::BoolList(v) => Some(v.len()),
            ParamValue::TextList(v) => Some(v.len()),
            _ => None,
        }
    }

    /// The element at `index` as a scalar value, `None` for scalars or
    /// out-of-range indices.
    pub fn element(&self, index: usize) -> Option<ParamValue> {
        match self {
            ParamValue::NumberList(v) => v.get(index).copied().map(ParamValue::Number),
            ParamValue::BoolList(v) => v.get(index).copied().map(ParamValue::Bool),
            ParamValue::TextList(v) => v.get(index).cloned().map(ParamValue::Text),
            _ => None,
        }
    }

    /// A full new list equal to this one except at `index`, which is
    /// replaced by `element`. Editing one element always re-sends the whole
    /// list, never a per-element patch.
    ///
    /// Returns `None` when this value is a scalar, the index is out of
    /// range, or the element's shape does not match.
    pub fn with_element(&self, index: usize, element: ParamValue) -> Option<ParamValue> {
        match (self, element) {
            (ParamValue::NumberList(v), ParamValue::Number(e)) if index < v.len() => {
                let mut out = v.clone();
                out[index] = e;
                Some(ParamValue::NumberList(out))
            }
            (ParamValue::BoolList(v), ParamValue::Bool(e)) if index < v.len() => {
                let mut out = v.clone();
                out[index] = e;
                Some(ParamValue::BoolList(out))
            }
            (ParamValue::TextList(v), ParamValue::Text(e)) if index < v.len() => {
                let mut out = v.clone();
                out[index] = e;
                Some(ParamValue::TextList(out))
            }
            _ => None,
        }
    }
}

/// A typed, named, user-editable value with a default and display label.
///
/// The owner supplies parameters; the panel edits a local draft and hands
/// committed values back through [`crate::panel::ParameterCommitted`].
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Stable identifier, unique within a parameter set.
    pub name: String,
    /// Human-readable label.
    pub display_name: String,
    /// Declared value shape. `None` is treated as [`ParamKind::Number`].
    pub kind: Option<ParamKind>,
    /// Current value. Its shape must match the effective kind.
    pub value: ParamValue,
    /// Fallback/reference value used by range-based widgets.
    pub default_value: ParamValue,
}

impl Parameter {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        kind: Option<ParamKind>,
        value: ParamValue,
        default_value: ParamValue,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            kind,
            value,
            default_value,
        }
    }

    pub fn number(
        name: impl Into<String>,
        display_name: impl Into<String>,
        value: f64,
        default: f64,
    ) -> Self {
        Self::new(
            name,
            display_name,
            Some(ParamKind::Number),
            ParamValue::Number(value),
            ParamValue::Number(default),
        )
    }

    pub fn boolean(name: impl Into<String>, display_name: impl Into<String>, value: bool) -> Self {
        Self::new(
            name,
            display_name,
            Some(ParamKind::Bool),
            ParamValue::Bool(value),
            ParamValue::Bool(false),
        )
    }

    pub fn text(
        name: impl Into<String>,
        display_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            display_name,
            Some(ParamKind::Text),
            ParamValue::Text(value.into()),
            ParamValue::Text(String::new()),
        )
    }

    pub fn number_list(
        name: impl Into<String>,
        display_name: impl Into<String>,
        value: Vec<f64>,
        default: Vec<f64>,
    ) -> Self {
        Self::new(
            name,
            display_name,
            Some(ParamKind::NumberList),
            ParamValue::NumberList(value),
            ParamValue::NumberList(default),
        )
    }

    pub fn bool_list(
        name: impl Into<String>,
        display_name: impl Into<String>,
        value: Vec<bool>,
    ) -> Self {
        Self::new(
            name,
            display_name,
            Some(ParamKind::BoolList),
            ParamValue::BoolList(value),
            ParamValue::Bool(false),
        )
    }

    pub fn text_list(
        name: impl Into<String>,
        display_name: impl Into<String>,
        value: Vec<String>,
    ) -> Self {
        Self::new(
            name,
            display_name,
            Some(ParamKind::TextList),
            ParamValue::TextList(value),
            ParamValue::Text(String::new()),
        )
    }

    /// The declared kind, with an absent declaration read as `Number`.
    pub fn effective_kind(&self) -> ParamKind {
        self.kind.unwrap_or(ParamKind::Number)
    }

    /// Checks that the value's shape matches the effective kind.
    ///
    /// A mismatch (e.g. a list kind holding a scalar) is not fatal: the
    /// panel renders a label-only row and logs the error.
    pub fn check_shape(&self) -> Result<(), ParameterError> {
        let kind = self.effective_kind();
        let value_kind = self.value.kind();
        if kind == value_kind {
            Ok(())
        } else {
            Err(ParameterError::ShapeMismatch {
                name: self.name.clone(),
                kind,
                value_kind,
            })
        }
    }

    /// The effective default for element `index` of a list parameter.
    ///
    /// When `default_value` is itself a list, element `index` of it is
    /// used; otherwise the scalar default is broadcast to every element.
    pub fn element_default(&self, index: usize) -> ParamValue {
        match &self.default_value {
            ParamValue::NumberList(v) => ParamValue::Number(v.get(index).copied().unwrap_or(0.0)),
            ParamValue::BoolList(v) => ParamValue::Bool(v.get(index).copied().unwrap_or(false)),
            ParamValue::TextList(v) => ParamValue::Text(v.get(index).cloned().unwrap_or_default()),
            scalar => scalar.clone(),
        }
    }

    /// A scalar view of element `index` of a list parameter, carrying the
    /// per-element default. Range widgets and the validator see elements
    /// through this view.
    pub fn element_view(&self, index: usize) -> Option<Parameter> {
        let element_kind = self.effective_kind().element_kind()?;
        let value = self.value.element(index)?;
        Some(Parameter {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            kind: Some(element_kind),
            value,
            default_value: self.element_default(index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_kind_reads_as_number() {
        let p = Parameter::new(
            "x",
            "X",
            None,
            ParamValue::Number(1.0),
            ParamValue::Number(0.0),
        );
        assert_eq!(p.effective_kind(), ParamKind::Number);
        assert!(p.check_shape().is_ok());
    }

    #[test]
    fn shape_mismatch_is_reported_not_fatal() {
        let p = Parameter::new(
            "xs",
            "Xs",
            Some(ParamKind::NumberList),
            ParamValue::Number(1.0),
            ParamValue::Number(0.0),
        );
        let err = p.check_shape().unwrap_err();
        assert_eq!(
            err,
            ParameterError::ShapeMismatch {
                name: "xs".into(),
                kind: ParamKind::NumberList,
                value_kind: ParamKind::Number,
            }
        );
    }

    #[test]
    fn with_element_replaces_only_the_given_index() {
        let v = ParamValue::NumberList(vec![1.0, 2.0, 3.0]);
        let out = v.with_element(1, ParamValue::Number(9.0)).unwrap();
        assert_eq!(out, ParamValue::NumberList(vec![1.0, 9.0, 3.0]));
        // original untouched
        assert_eq!(v, ParamValue::NumberList(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn with_element_rejects_bad_index_and_shape() {
        let v = ParamValue::BoolList(vec![true, false]);
        assert_eq!(v.with_element(2, ParamValue::Bool(true)), None);
        assert_eq!(v.with_element(0, ParamValue::Number(1.0)), None);
        assert_eq!(ParamValue::Number(1.0).with_element(0, ParamValue::Number(2.0)), None);
    }

    #[test]
    fn element_default_prefers_per_element_over_broadcast() {
        let p = Parameter::number_list("xs", "Xs", vec![1.0, 2.0], vec![0.0, 10.0]);
        assert_eq!(p.element_default(0), ParamValue::Number(0.0));
        assert_eq!(p.element_default(1), ParamValue::Number(10.0));

        let broadcast = Parameter::new(
            "ys",
            "Ys",
            Some(ParamKind::NumberList),
            ParamValue::NumberList(vec![1.0, 2.0]),
            ParamValue::Number(7.0),
        );
        assert_eq!(broadcast.element_default(0), ParamValue::Number(7.0));
        assert_eq!(broadcast.element_default(1), ParamValue::Number(7.0));
    }

    #[test]
    fn element_view_carries_scalar_kind_and_default() {
        let p = Parameter::number_list("xs", "Xs", vec![1.0, 2.0], vec![0.0, 10.0]);
        let view = p.element_view(1).unwrap();
        assert_eq!(view.effective_kind(), ParamKind::Number);
        assert_eq!(view.value, ParamValue::Number(2.0));
        assert_eq!(view.default_value, ParamValue::Number(10.0));
        assert!(p.element_view(2).is_none());
    }
}
