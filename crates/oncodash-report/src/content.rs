//! Localized report content shared by both encoders.

use oncodash_core::{PatientRecord, PredictionResult};

/// `strftime` pattern for the "generated on" timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Every human-readable string a report contains, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContent {
    pub title: String,
    pub generated_on: String,
    pub timestamp: String,
    pub patient_heading: String,
    /// `(label, value)` rows: age, height, weight, diabetes, high blood
    /// pressure, family history, age at menarche.
    pub patient_rows: Vec<(String, String)>,
    pub results_heading: String,
    /// `(label, value)` rows: risk level, chance.
    pub result_rows: Vec<(String, String)>,
    pub disclaimer: String,
}

impl ReportContent {
    pub fn build(
        result: &PredictionResult,
        patient: &PatientRecord,
        localize: &dyn Fn(&str) -> String,
        timestamp: String,
    ) -> Self {
        let yes_no = |flag: bool| localize(if flag { "yes" } else { "no" });

        let patient_rows = vec![
            (localize("age"), patient.age().to_string()),
            (localize("height"), patient.height_display()),
            (localize("weight"), patient.weight_display()),
            (localize("diabetes"), yes_no(patient.has_diabetes())),
            (localize("highBP"), yes_no(patient.has_high_bp())),
            (localize("familyHistory"), yes_no(patient.family_history())),
            (
                localize("ageAtMenarche"),
                patient.age_at_menarche().to_string(),
            ),
        ];

        let result_rows = vec![
            (
                localize("riskLevel"),
                localize(result.risk_level.translation_key()),
            ),
            (localize("chance"), result.chance_display()),
        ];

        Self {
            title: localize("reportTitle"),
            generated_on: localize("generatedOn"),
            timestamp,
            patient_heading: localize("patientInformation"),
            patient_rows,
            results_heading: localize("predictionResults"),
            result_rows,
            disclaimer: localize("disclaimer"),
        }
    }

    /// The centered subtitle line of the PDF.
    pub fn generated_line(&self) -> String {
        format!("{}: {}", self.generated_on, self.timestamp)
    }
}
