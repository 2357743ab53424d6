//! Patient form input and the validated record submitted for prediction.

use serde::Serialize;
use std::ops::RangeInclusive;
use thiserror::Error;

use super::format_decimal;

pub const AGE_RANGE: RangeInclusive<u32> = 20..=90;
pub const HEIGHT_CM_RANGE: RangeInclusive<f64> = 140.0..=200.0;
pub const WEIGHT_KG_RANGE: RangeInclusive<f64> = 40.0..=150.0;
pub const MENARCHE_RANGE: RangeInclusive<u32> = 8..=20;

/// Field-level validation failure for patient input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    IntegerOutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("{field} must be between {min} and {max}, got {value}")]
    DecimalOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field, matching the request JSON key.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::IntegerOutOfRange { field, .. }
            | Self::DecimalOutOfRange { field, .. }
            | Self::NotFinite { field } => *field,
        }
    }
}

/// Raw, unvalidated form values.
///
/// Defaults mirror the initial state of the patient form.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientInput {
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub has_diabetes: bool,
    pub has_high_bp: bool,
    pub family_history: bool,
    pub age_at_menarche: u32,
}

impl Default for PatientInput {
    fn default() -> Self {
        Self {
            age: 50,
            height_cm: 165.0,
            weight_kg: 70.0,
            has_diabetes: false,
            has_high_bp: false,
            family_history: false,
            age_at_menarche: 13,
        }
    }
}

/// A validated patient record.
///
/// Fields are private so every instance has passed range validation;
/// the record is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRecord {
    age: u32,
    height_cm: f64,
    weight_kg: f64,
    has_diabetes: bool,
    has_high_bp: bool,
    family_history: bool,
    age_at_menarche: u32,
}

impl PatientRecord {
    /// Validate form input, rejecting (never clamping) out-of-range values.
    pub fn new(input: PatientInput) -> Result<Self, ValidationError> {
        check_integer("age", input.age, &AGE_RANGE)?;
        check_decimal("height_cm", input.height_cm, &HEIGHT_CM_RANGE)?;
        check_decimal("weight_kg", input.weight_kg, &WEIGHT_KG_RANGE)?;
        check_integer("age_at_menarche", input.age_at_menarche, &MENARCHE_RANGE)?;

        Ok(Self {
            age: input.age,
            height_cm: input.height_cm,
            weight_kg: input.weight_kg,
            has_diabetes: input.has_diabetes,
            has_high_bp: input.has_high_bp,
            family_history: input.family_history,
            age_at_menarche: input.age_at_menarche,
        })
    }

    pub const fn age(&self) -> u32 {
        self.age
    }

    pub const fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub const fn has_diabetes(&self) -> bool {
        self.has_diabetes
    }

    pub const fn has_high_bp(&self) -> bool {
        self.has_high_bp
    }

    pub const fn family_history(&self) -> bool {
        self.family_history
    }

    pub const fn age_at_menarche(&self) -> u32 {
        self.age_at_menarche
    }

    /// Height with unit, e.g. `165.0 cm`.
    pub fn height_display(&self) -> String {
        format!("{} cm", format_decimal(self.height_cm))
    }

    /// Weight with unit, e.g. `70.0 kg`.
    pub fn weight_display(&self) -> String {
        format!("{} kg", format_decimal(self.weight_kg))
    }
}

impl TryFrom<PatientInput> for PatientRecord {
    type Error = ValidationError;

    fn try_from(input: PatientInput) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

fn check_integer(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), ValidationError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::IntegerOutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn check_decimal(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::DecimalOutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_is_valid() {
        assert!(PatientRecord::new(PatientInput::default()).is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let input = PatientInput {
            age: 90,
            height_cm: 140.0,
            weight_kg: 150.0,
            age_at_menarche: 8,
            ..Default::default()
        };
        assert!(PatientRecord::new(input).is_ok());
    }

    #[test]
    fn test_rejects_each_out_of_range_field() {
        let cases = [
            (
                PatientInput {
                    age: 19,
                    ..Default::default()
                },
                "age",
            ),
            (
                PatientInput {
                    height_cm: 200.5,
                    ..Default::default()
                },
                "height_cm",
            ),
            (
                PatientInput {
                    weight_kg: 39.9,
                    ..Default::default()
                },
                "weight_kg",
            ),
            (
                PatientInput {
                    age_at_menarche: 21,
                    ..Default::default()
                },
                "age_at_menarche",
            ),
        ];

        for (input, field) in cases {
            let err = PatientRecord::new(input).unwrap_err();
            assert_eq!(err.field(), field);
        }
    }

    #[test]
    fn test_rejects_nan() {
        let input = PatientInput {
            height_cm: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            PatientRecord::new(input),
            Err(ValidationError::NotFinite { field: "height_cm" })
        ));
    }

    #[test]
    fn test_error_message_names_field_and_bounds() {
        let err = PatientRecord::new(PatientInput {
            age: 95,
            ..Default::default()
        })
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("age"));
        assert!(msg.contains("20"));
        assert!(msg.contains("95"));
    }

    #[test]
    fn test_serializes_to_request_shape() {
        let record = PatientRecord::new(PatientInput {
            age: 45,
            height_cm: 160.0,
            weight_kg: 65.0,
            has_diabetes: false,
            has_high_bp: true,
            family_history: true,
            age_at_menarche: 12,
        })
        .unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["age"], 45);
        assert_eq!(json["height_cm"], 160.0);
        assert_eq!(json["weight_kg"], 65.0);
        assert_eq!(json["has_diabetes"], false);
        assert_eq!(json["has_high_bp"], true);
        assert_eq!(json["family_history"], true);
        assert_eq!(json["age_at_menarche"], 12);
        assert_eq!(json.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_display_units() {
        let record = PatientRecord::new(PatientInput::default()).unwrap();
        assert_eq!(record.height_display(), "165.0 cm");
        assert_eq!(record.weight_display(), "70.0 kg");
    }
}
