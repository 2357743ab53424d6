//! Prediction results returned by the remote service.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::patient::PatientRecord;

/// Risk band assigned by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Chance (percent) at or above which the service reports `High`.
    pub const HIGH_THRESHOLD: f64 = 70.0;
    /// Chance (percent) at or above which the service reports `Moderate`.
    pub const MODERATE_THRESHOLD: f64 = 30.0;

    /// Band a chance percentage the same way the service does.
    pub fn from_chance(chance: f64) -> Self {
        if chance >= Self::HIGH_THRESHOLD {
            Self::High
        } else if chance >= Self::MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Presentation tag, 1:1 with the level.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Low => "low-risk",
            Self::Moderate => "moderate-risk",
            Self::High => "high-risk",
        }
    }

    pub const fn translation_key(self) -> &'static str {
        match self {
            Self::Low => "lowRisk",
            Self::Moderate => "moderateRisk",
            Self::High => "highRisk",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-oriented echo of the submitted patient, as produced by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientSummary {
    pub age: u32,
    /// e.g. `"165.0 cm"`
    pub height: String,
    /// e.g. `"70.0 kg"`
    pub weight: String,
    /// `"Yes"` or `"No"`
    pub diabetes: String,
    pub high_bp: String,
    pub family_history: String,
    pub age_at_menarche: u32,
}

impl PatientSummary {
    /// Build the summary the service would echo for `patient`.
    pub fn from_record(patient: &PatientRecord) -> Self {
        let yes_no = |flag: bool| if flag { "Yes" } else { "No" }.to_string();
        Self {
            age: patient.age(),
            height: patient.height_display(),
            weight: patient.weight_display(),
            diabetes: yes_no(patient.has_diabetes()),
            high_bp: yes_no(patient.has_high_bp()),
            family_history: yes_no(patient.family_history()),
            age_at_menarche: patient.age_at_menarche(),
        }
    }
}

/// Risk assessment for one submitted patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability of cancer as a percentage (0-100).
    pub cancer_chance: f64,
    pub risk_level: RiskLevel,
    /// Presentation tag; always `risk_level.css_class()` for well-formed responses.
    pub risk_class: String,
    #[serde(default)]
    pub patient_data: PatientSummary,
}

impl PredictionResult {
    /// Build a result with the presentation tag derived from the level.
    pub fn new(cancer_chance: f64, risk_level: RiskLevel, patient_data: PatientSummary) -> Self {
        Self {
            cancer_chance,
            risk_level,
            risk_class: risk_level.css_class().to_string(),
            patient_data,
        }
    }

    /// Chance rounded to one decimal place with a percent sign.
    pub fn chance_display(&self) -> String {
        format!("{}%", super::format_one_decimal(self.cancer_chance))
    }
}

/// The prediction currently on screen, paired with the input that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPrediction {
    pub patient: PatientRecord,
    pub result: PredictionResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatientInput;

    #[test]
    fn test_from_chance_thresholds() {
        assert_eq!(RiskLevel::from_chance(70.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_chance(69.99), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_chance(30.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_chance(29.9), RiskLevel::Low);
    }

    #[test]
    fn test_css_class_is_one_to_one() {
        assert_eq!(RiskLevel::Low.css_class(), "low-risk");
        assert_eq!(RiskLevel::Moderate.css_class(), "moderate-risk");
        assert_eq!(RiskLevel::High.css_class(), "high-risk");
    }

    #[test]
    fn test_chance_display_rounds_to_one_decimal() {
        let result = PredictionResult::new(37.26, RiskLevel::Moderate, PatientSummary::default());
        assert_eq!(result.chance_display(), "37.3%");

        let result = PredictionResult::new(72.4, RiskLevel::High, PatientSummary::default());
        assert_eq!(result.chance_display(), "72.4%");

        let result = PredictionResult::new(37.25, RiskLevel::Moderate, PatientSummary::default());
        assert_eq!(result.chance_display(), "37.3%");
    }

    #[test]
    fn test_deserialize_service_response() {
        let json = serde_json::json!({
            "cancer_chance": 72.4,
            "risk_level": "High",
            "risk_class": "high-risk",
            "patient_data": {
                "age": 45,
                "height": "160.0 cm",
                "weight": "65.0 kg",
                "diabetes": "No",
                "high_bp": "Yes",
                "family_history": "Yes",
                "age_at_menarche": 12
            }
        });

        let result: PredictionResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.patient_data.height, "160.0 cm");
        assert_eq!(result.patient_data.high_bp, "Yes");
    }

    #[test]
    fn test_rejects_unknown_risk_level() {
        let json = serde_json::json!({
            "cancer_chance": 10.0,
            "risk_level": "Extreme",
            "risk_class": "x"
        });
        assert!(serde_json::from_value::<PredictionResult>(json).is_err());
    }

    #[test]
    fn test_summary_from_record() {
        let record = PatientRecord::new(PatientInput {
            has_high_bp: true,
            ..Default::default()
        })
        .unwrap();
        let summary = PatientSummary::from_record(&record);
        assert_eq!(summary.height, "165.0 cm");
        assert_eq!(summary.diabetes, "No");
        assert_eq!(summary.high_bp, "Yes");
    }
}
