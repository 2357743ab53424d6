//! Table formatting for CLI output.
//!
//! Functions return lines instead of printing so handlers decide where
//! output goes.

use oncodash_core::{
    CurrentPrediction, HistoryEntry, ResolvedTheme, SystemColorSignal, ThemePreference, Translator,
};

/// Truncates a string to a maximum length in characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use oncodash_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// The current-prediction overview card.
pub fn prediction_lines(current: &CurrentPrediction, tr: Translator) -> Vec<String> {
    let result = &current.result;
    let patient = &current.patient;
    let yes_no = |flag: bool| tr.t(if flag { "yes" } else { "no" });

    vec![
        tr.t("currentPrediction"),
        format!("  {}: {}", tr.t("chanceOfCancer"), result.chance_display()),
        format!(
            "  {}: {} [{}]",
            tr.t("riskLevel"),
            tr.t(result.risk_level.translation_key()),
            result.risk_class
        ),
        String::new(),
        tr.t("patientDetails"),
        format!("  {}: {}", tr.t("age"), patient.age()),
        format!("  {}: {}", tr.t("height"), patient.height_display()),
        format!("  {}: {}", tr.t("weight"), patient.weight_display()),
        format!("  {}: {}", tr.t("diabetes"), yes_no(patient.has_diabetes())),
        format!("  {}: {}", tr.t("highBP"), yes_no(patient.has_high_bp())),
        format!(
            "  {}: {}",
            tr.t("familyHistory"),
            yes_no(patient.family_history())
        ),
        format!("  {}: {}", tr.t("ageAtMenarche"), patient.age_at_menarche()),
    ]
}

/// The recent-predictions table, newest first as the service returned it.
pub fn history_lines(entries: &[HistoryEntry], tr: Translator) -> Vec<String> {
    let mut lines = vec![tr.t("recentPredictions")];
    if entries.is_empty() {
        lines.push(format!("  {}", tr.t("enterDetailsMessage")));
        return lines;
    }

    lines.push(format!(
        "{:<5} {:<12} {:<12} {:<16} {}",
        truncate_string(&tr.t("age"), 5),
        truncate_string(&tr.t("height"), 12),
        truncate_string(&tr.t("weight"), 12),
        truncate_string(&tr.t("riskLevel"), 16),
        tr.t("chance"),
    ));
    lines.push("-".repeat(60));
    for entry in entries {
        lines.push(format!(
            "{:<5} {:<12} {:<12} {:<16} {}",
            entry.age,
            entry.height_display(),
            entry.weight_display(),
            truncate_string(&tr.t(entry.risk.translation_key()), 16),
            entry.chance_display(),
        ));
    }
    lines
}

/// Localized name of a rendered mode.
pub fn theme_label(theme: ResolvedTheme, tr: Translator) -> String {
    tr.t(if theme.is_dark() { "darkMode" } else { "lightMode" })
}

/// Theme status: what the user picked, what the OS says, what is rendered.
pub fn theme_lines(
    preference: ThemePreference,
    signal: SystemColorSignal,
    resolved: ResolvedTheme,
    tr: Translator,
) -> Vec<String> {
    let os = match signal {
        SystemColorSignal::Light => ResolvedTheme::Light,
        SystemColorSignal::Dark => ResolvedTheme::Dark,
    };

    vec![
        format!("Preference: {}", tr.t(preference.translation_key())),
        format!("System:     {}", theme_label(os, tr)),
        format!("Resolved:   {}", theme_label(resolved, tr)),
    ]
}
