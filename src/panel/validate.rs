//! Validation and classification seams.
//!
//! Both are owner-supplied pure functions held in resources: the panel
//! consumes them and ships workable defaults. The validator normalizes raw
//! text into a value of the parameter's kind at commit time and must never
//! panic; the classifier decides whether a parameter is a length quantity
//! and gets a unit suffix.

use std::sync::Arc;

use bevy::prelude::*;

use crate::parameter::{ParamKind, ParamValue, Parameter};

/// Normalizes raw text into a value consistent with a parameter's kind.
///
/// Called exactly once per numeric text commit, with the draft parameter
/// as it was before the commit and the raw field text. Unparsable input
/// must yield a best-effort value (the default implementation falls back
/// to the previous value), never an error.
#[derive(Resource, Clone)]
pub struct ParameterValidator(Arc<dyn Fn(&Parameter, &str) -> ParamValue + Send + Sync>);

impl ParameterValidator {
    pub fn new(f: impl Fn(&Parameter, &str) -> ParamValue + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn validate(&self, param: &Parameter, raw: &str) -> ParamValue {
        (self.0)(param, raw)
    }
}

impl Default for ParameterValidator {
    fn default() -> Self {
        Self::new(default_validate)
    }
}

/// Reports whether a parameter's value is a length/measurement quantity,
/// which makes numeric rows display a `mm` suffix. The default classifies
/// nothing; owners replace it with their own rule.
#[derive(Resource, Clone)]
pub struct MeasurementClassifier(Arc<dyn Fn(&Parameter) -> bool + Send + Sync>);

impl MeasurementClassifier {
    pub fn new(f: impl Fn(&Parameter) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn is_measurement(&self, param: &Parameter) -> bool {
        (self.0)(param)
    }
}

impl Default for MeasurementClassifier {
    fn default() -> Self {
        Self::new(|_| false)
    }
}

/// Slider range for a numeric parameter: a zero-anchored span of twice the
/// default, widened if needed to contain the current value. A zero default
/// still yields a usable span.
pub fn slider_range(default_value: f64, current: f64) -> (f64, f64) {
    let span = default_value.abs().max(1.0) * 2.0;
    let (mut min, mut max) = if default_value < 0.0 {
        (-span, 0.0)
    } else {
        (0.0, span)
    };
    if current.is_finite() {
        min = min.min(current);
        max = max.max(current);
    }
    (min, max)
}

/// The shipped validator: parse, fall back to the previous value, clamp
/// numbers into the slider's displayed range. Text passes through
/// untouched; booleans accept `true`/`false`.
pub fn default_validate(param: &Parameter, raw: &str) -> ParamValue {
    let kind = param.effective_kind();
    let scalar_kind = kind.element_kind().unwrap_or(kind);
    match scalar_kind {
        ParamKind::Number => {
            let previous = param
                .value
                .as_number()
                .or_else(|| param.default_value.as_number())
                .unwrap_or(0.0);
            let default = param.default_value.as_number().unwrap_or(0.0);
            let parsed = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or(previous);
            let (min, max) = slider_range(default, previous);
            ParamValue::Number(parsed.clamp(min, max))
        }
        ParamKind::Bool => {
            let previous = param.value.as_bool().unwrap_or(false);
            match raw.trim().to_lowercase().as_str() {
                "true" => ParamValue::Bool(true),
                "false" => ParamValue::Bool(false),
                _ => ParamValue::Bool(previous),
            }
        }
        ParamKind::Text => ParamValue::Text(raw.to_string()),
        // element_kind() already mapped list kinds to their scalar
        _ => param.value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::Parameter;

    #[test]
    fn parses_and_returns_numbers() {
        let p = Parameter::number("width", "Width", 5.0, 10.0);
        assert_eq!(default_validate(&p, "12"), ParamValue::Number(12.0));
    }

    #[test]
    fn unparsable_input_falls_back_to_previous_value() {
        let p = Parameter::number("width", "Width", 5.0, 10.0);
        assert_eq!(default_validate(&p, "12abc"), ParamValue::Number(5.0));
        assert_eq!(default_validate(&p, ""), ParamValue::Number(5.0));
    }

    #[test]
    fn numbers_clamp_into_the_slider_range() {
        let p = Parameter::number("width", "Width", 5.0, 10.0);
        // range is (0, 20) for default 10
        assert_eq!(default_validate(&p, "500"), ParamValue::Number(20.0));
        assert_eq!(default_validate(&p, "-3"), ParamValue::Number(0.0));
    }

    #[test]
    fn text_passes_through_untouched() {
        let p = Parameter::text("label", "Label", "old");
        assert_eq!(
            default_validate(&p, "  new text "),
            ParamValue::Text("  new text ".into())
        );
    }

    #[test]
    fn range_always_contains_the_current_value() {
        assert_eq!(slider_range(10.0, 5.0), (0.0, 20.0));
        assert_eq!(slider_range(10.0, 35.0), (0.0, 35.0));
        assert_eq!(slider_range(-4.0, -1.0), (-8.0, 0.0));
        assert_eq!(slider_range(0.0, 0.0), (0.0, 2.0));
    }
}
