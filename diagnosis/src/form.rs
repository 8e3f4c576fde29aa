use std::collections::HashMap;

use crate::{
    DiagnosisErr, Result,
    fields::{FieldKind, FieldSpec},
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    value: f64,
    provided: bool,
}

/// The values currently entered on one form.
///
/// Every field starts at its default value. Choice fields always hold a selection and count
/// as provided from the start, numeric fields only once the user enters a value (zero
/// included).
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    fields: &'static [FieldSpec],
    entries: HashMap<&'static str, Entry>,
}

/// Builds a fresh [`FormState`] for an ordered list of fields.
pub fn render(fields: &'static [FieldSpec]) -> FormState {
    let entries = fields
        .iter()
        .map(|f| {
            let entry = Entry {
                value: f.default_value(),
                provided: matches!(f.kind, FieldKind::Choice(_)),
            };
            (f.key, entry)
        })
        .collect();

    FormState { fields, entries }
}

impl FormState {
    /// Returns the current value of `key`, zero for unknown keys.
    pub fn get(&self, key: &str) -> f64 {
        self.entries.get(key).map_or(0., |e| e.value)
    }

    pub fn is_provided(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|e| e.provided)
    }

    /// Stores a user-entered value and marks the field as provided.
    ///
    /// # Errors
    /// Returns an error if `key` is not part of this form or the value is outside the
    /// field's domain.
    pub fn set(&mut self, key: &str, value: f64) -> Result<f64> {
        let spec = self.spec(key)?;
        let value = spec.coerce(value).map_err(|reason| DiagnosisErr::InvalidInput {
            field: spec.label.to_string(),
            reason,
        })?;

        self.store(spec.key, value);
        Ok(value)
    }

    /// Parses user-typed text and stores it, see [`FormState::set`].
    pub fn set_text(&mut self, key: &str, text: &str) -> Result<f64> {
        let spec = self.spec(key)?;
        let value = spec.parse(text).map_err(|reason| DiagnosisErr::InvalidInput {
            field: spec.label.to_string(),
            reason,
        })?;

        self.store(spec.key, value);
        Ok(value)
    }

    /// Moves the value one step up, or to the next option of a choice field.
    pub fn increment(&mut self, key: &str) -> Result<f64> {
        self.nudge(key, 1)
    }

    /// Moves the value one step down, or to the previous option of a choice field.
    pub fn decrement(&mut self, key: &str) -> Result<f64> {
        self.nudge(key, -1)
    }

    /// Returns the keys of every required field the user has not provided, in form order.
    pub fn missing_required(&self, fields: &[FieldSpec]) -> Vec<&'static str> {
        fields
            .iter()
            .filter(|f| f.required && !self.is_provided(f.key))
            .map(|f| f.key)
            .collect()
    }

    /// Reads the values of `fields` in their declared order.
    pub fn vector(&self, fields: &[FieldSpec]) -> Vec<f64> {
        fields.iter().map(|f| self.get(f.key)).collect()
    }

    fn spec(&self, key: &str) -> Result<&'static FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .ok_or_else(|| DiagnosisErr::UnknownField(key.to_string()))
    }

    fn nudge(&mut self, key: &str, dir: i8) -> Result<f64> {
        let spec = self.spec(key)?;
        let current = self.get(key);

        let value = match spec.kind {
            FieldKind::Choice(options) => {
                let pos = options.iter().position(|o| o.value == current).unwrap_or(0);
                let len = options.len() as isize;
                let next = (pos as isize + dir as isize).rem_euclid(len);
                options[next as usize].value
            }
            _ => {
                let raw = current + f64::from(dir) * spec.step;
                // keeps repeated 0.1 steps from drifting into 0.30000000000000004
                let snapped = (raw * 1e9).round() / 1e9;
                match spec.minimum {
                    Some(min) if snapped < min => min,
                    _ => snapped,
                }
            }
        };

        self.store(spec.key, value);
        Ok(value)
    }

    fn store(&mut self, key: &'static str, value: f64) {
        self.entries.insert(
            key,
            Entry {
                value,
                provided: true,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{DIABETES, HEART_DISEASE};

    #[test]
    fn starts_at_defaults() {
        let form = render(DIABETES);

        assert!(DIABETES.iter().all(|f| form.get(f.key) == 0.));
        assert!(DIABETES.iter().all(|f| !form.is_provided(f.key)));
        assert_eq!(form.missing_required(DIABETES).len(), DIABETES.len());
    }

    #[test]
    fn choice_fields_start_provided() {
        let form = render(HEART_DISEASE);

        assert!(form.is_provided("sex"));
        assert!(form.is_provided("thal"));
        assert!(!form.is_provided("age"));
    }

    #[test]
    fn explicit_zero_counts_as_provided() {
        let mut form = render(DIABETES);
        form.set("Pregnancies", 0.).unwrap();

        assert!(form.is_provided("Pregnancies"));
        assert!(!form.missing_required(DIABETES).contains(&"Pregnancies"));
    }

    #[test]
    fn vector_follows_field_order() {
        let mut form = render(DIABETES);
        for (i, f) in DIABETES.iter().enumerate().rev() {
            form.set(f.key, (i + 1) as f64).unwrap();
        }

        assert_eq!(
            form.vector(DIABETES),
            vec![1., 2., 3., 4., 5., 6., 7., 8.]
        );
    }

    #[test]
    fn steps_do_not_drift() {
        let mut form = render(DIABETES);
        for _ in 0..3 {
            form.increment("Glucose").unwrap();
        }

        assert_eq!(form.get("Glucose"), 0.3);
    }

    #[test]
    fn decrement_stops_at_minimum() {
        let mut form = render(HEART_DISEASE);
        form.decrement("age").unwrap();

        assert_eq!(form.get("age"), 0.);
        assert!(form.is_provided("age"));
    }

    #[test]
    fn choice_nudges_wrap_around() {
        let mut form = render(HEART_DISEASE);

        assert_eq!(form.decrement("thal").unwrap(), 2.);
        assert_eq!(form.increment("thal").unwrap(), 0.);
        assert_eq!(form.increment("cp").unwrap(), 1.);
    }

    #[test]
    fn rejects_unknown_and_invalid_input() {
        let mut form = render(HEART_DISEASE);

        assert!(matches!(
            form.set("nope", 1.),
            Err(DiagnosisErr::UnknownField(_))
        ));
        assert!(matches!(
            form.set("sex", 5.),
            Err(DiagnosisErr::InvalidInput { .. })
        ));
        assert!(matches!(
            form.set_text("age", "forty"),
            Err(DiagnosisErr::InvalidInput { .. })
        ));
        assert!(!form.is_provided("age"));
    }
}
