//! Handlers driven end to end against a scripted prediction service and
//! temporary directories.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use oncodash_cli::error::exit_code_for;
use oncodash_cli::{CliContext, ExportFormat, HistoryCommand, PredictArgs, ThemeCommand, handlers};
use oncodash_core::{
    HistoryEntry, ManualColorScheme, MemoryPreferenceStore, PatientRecord, PatientSummary,
    PredictionPortError, PredictionPortResult, PredictionResult, PredictionServicePort,
    PreferenceStore, RiskLevel, ServiceHealth, Settings, SystemColorSignal, THEME_PREFERENCE_KEY,
};
use oncodash_report::ReportExporter;
use tempfile::tempdir;

#[derive(Default)]
struct ScriptedService {
    history: Mutex<Vec<HistoryEntry>>,
    reject_with: Option<String>,
    unhealthy: bool,
    predict_calls: AtomicUsize,
}

#[async_trait]
impl PredictionServicePort for ScriptedService {
    async fn predict(&self, patient: &PatientRecord) -> PredictionPortResult<PredictionResult> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(detail) = &self.reject_with {
            return Err(PredictionPortError::Rejected {
                status: 422,
                detail: detail.clone(),
            });
        }
        let chance = 37.26;
        self.history.lock().unwrap().insert(
            0,
            HistoryEntry {
                age: patient.age(),
                height: patient.height_cm(),
                weight: patient.weight_kg(),
                risk: RiskLevel::Moderate,
                chance,
            },
        );
        Ok(PredictionResult::new(
            chance,
            RiskLevel::Moderate,
            PatientSummary::from_record(patient),
        ))
    }

    async fn history(&self) -> PredictionPortResult<Vec<HistoryEntry>> {
        Ok(self.history.lock().unwrap().clone())
    }

    async fn clear_history(&self) -> PredictionPortResult<()> {
        self.history.lock().unwrap().clear();
        Ok(())
    }

    async fn health(&self) -> PredictionPortResult<ServiceHealth> {
        Ok(ServiceHealth {
            status: if self.unhealthy { "degraded" } else { "healthy" }.to_string(),
            model_loaded: true,
            scaler_loaded: !self.unhealthy,
        })
    }
}

fn context(service: Arc<ScriptedService>, settings: Settings) -> (CliContext, Arc<MemoryPreferenceStore>) {
    let preferences = Arc::new(MemoryPreferenceStore::new());
    let ctx = CliContext::from_parts(
        settings,
        service,
        Arc::clone(&preferences) as Arc<dyn PreferenceStore>,
        Arc::new(ManualColorScheme::new(SystemColorSignal::Dark)),
        ReportExporter::new(),
    );
    (ctx, preferences)
}

fn predict_args() -> PredictArgs {
    PredictArgs {
        age: 50,
        height: 165.0,
        weight: 70.0,
        diabetes: false,
        high_bp: true,
        family_history: false,
        menarche: 13,
        export: None,
        out: None,
    }
}

#[tokio::test]
async fn test_predict_exports_csv_into_out_dir() {
    let temp = tempdir().unwrap();
    let service = Arc::new(ScriptedService::default());
    let (ctx, _) = context(Arc::clone(&service), Settings::default());

    let args = PredictArgs {
        export: Some(ExportFormat::Csv),
        out: Some(temp.path().join("reports")),
        ..predict_args()
    };
    let path = handlers::predict::execute(&ctx, args).await.unwrap().unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("cancer_prediction_report_"));
    assert!(name.ends_with(".csv"));
    assert_eq!(path.parent().unwrap(), temp.path().join("reports"));

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert!(text.contains("37.3%"));
    assert!(text.contains("Moderate Risk"));
}

#[tokio::test]
async fn test_predict_exports_pdf_into_configured_dir() {
    let temp = tempdir().unwrap();
    let service = Arc::new(ScriptedService::default());
    let settings = Settings {
        export_dir: Some(temp.path().to_string_lossy().into_owned()),
        ..Default::default()
    };
    let (ctx, _) = context(service, settings);

    let args = PredictArgs {
        export: Some(ExportFormat::Pdf),
        ..predict_args()
    };
    let path = handlers::predict::execute(&ctx, args).await.unwrap().unwrap();

    assert_eq!(path.parent().unwrap(), temp.path());
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_out_of_range_input_never_reaches_service() {
    let service = Arc::new(ScriptedService::default());
    let (ctx, _) = context(Arc::clone(&service), Settings::default());

    let args = PredictArgs {
        age: 95,
        ..predict_args()
    };
    let err = handlers::predict::execute(&ctx, args).await.unwrap_err();

    assert_eq!(exit_code_for(&err), 2);
    assert_eq!(service.predict_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rejection_detail_is_reported_verbatim() {
    let service = Arc::new(ScriptedService {
        reject_with: Some("age: Input should be less than or equal to 90".to_string()),
        ..Default::default()
    });
    let (ctx, _) = context(service, Settings::default());

    let err = handlers::predict::execute(&ctx, predict_args()).await.unwrap_err();
    assert_eq!(exit_code_for(&err), 69);
    assert_eq!(err.to_string(), "age: Input should be less than or equal to 90");
}

#[tokio::test]
async fn test_history_clear_without_prompt() {
    let service = Arc::new(ScriptedService::default());
    let (ctx, _) = context(Arc::clone(&service), Settings::default());

    handlers::predict::execute(&ctx, predict_args()).await.unwrap();
    assert_eq!(service.history.lock().unwrap().len(), 1);

    handlers::history::execute(&ctx, Some(HistoryCommand::Clear { yes: true }))
        .await
        .unwrap();
    assert!(service.history.lock().unwrap().is_empty());

    handlers::history::execute(&ctx, None).await.unwrap();
}

#[tokio::test]
async fn test_status_fails_when_not_ready() {
    let service = Arc::new(ScriptedService {
        unhealthy: true,
        ..Default::default()
    });
    let (ctx, _) = context(service, Settings::default());

    let err = handlers::status::execute(&ctx).await.unwrap_err();
    assert_eq!(exit_code_for(&err), 69);

    let service = Arc::new(ScriptedService::default());
    let (ctx, _) = context(service, Settings::default());
    handlers::status::execute(&ctx).await.unwrap();
}

#[tokio::test]
async fn test_theme_set_persists_and_follows_system() {
    let service = Arc::new(ScriptedService::default());
    let (ctx, preferences) = context(service, Settings::default());

    handlers::theme::execute(
        &ctx,
        ThemeCommand::Set {
            preference: "system".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(
        preferences.get(THEME_PREFERENCE_KEY).unwrap().as_deref(),
        Some("system")
    );
    // Manual source reports dark; show attached and detached again.
    assert!(ctx.theme().resolved().is_dark());
    assert!(!ctx.theme().is_attached());
}

#[tokio::test]
async fn test_theme_set_rejects_unknown_value() {
    let service = Arc::new(ScriptedService::default());
    let (ctx, preferences) = context(service, Settings::default());

    let err = handlers::theme::execute(
        &ctx,
        ThemeCommand::Set {
            preference: "sepia".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(exit_code_for(&err), 2);
    assert_eq!(preferences.get(THEME_PREFERENCE_KEY).unwrap(), None);
}
