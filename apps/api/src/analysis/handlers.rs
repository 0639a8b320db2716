//! Axum route handlers for the analysis API.
//!
//! `handle_analyze` is the orchestrator: it walks one upload through
//! validation, text extraction, remote gap analysis, and report rendering.
//! Each stage converts its failure at the boundary; nothing escapes as a
//! panic, and a rendering failure never discards the analysis result.

use axum::extract::{Multipart, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::analyzer::GapAnalysis;
use crate::errors::AppError;
use crate::extraction::extract_resume_text;
use crate::report::{build_report, report_filename};
use crate::state::AppState;
use crate::template::fetch_template;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// The raw structured result, echoed for display.
    pub result: GapAnalysis,
    /// The generated report, if rendering succeeded.
    pub report: Option<ReportDownload>,
    /// Rendering failure detail; set exactly when `report` is absent due to
    /// a rendering or template error.
    pub report_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportDownload {
    pub filename: String,
    pub content_type: &'static str,
    pub content_base64: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart fields: `resume` (PDF file) and `target_role` (text). Runs the
/// whole extract → analyze → render pipeline for this single interaction.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    // Validating
    let (resume, target_role) = read_form(multipart).await?;

    // Extracting
    info!("Extracting text from uploaded resume ({} bytes)", resume.len());
    let resume_text = extract_resume_text(&resume)?;

    // Analyzing
    info!(role = %target_role, chars = resume_text.len(), "Requesting gap analysis");
    let result = state.analyzer.analyze(&resume_text, &target_role).await?;
    info!("Gap analysis completed");

    // Rendering — independent outcome: a failure here surfaces in-band and
    // the analysis result is still presented.
    let (report, report_error) = render_report(&state, &result, &target_role).await;

    // Presenting
    Ok(Json(AnalyzeResponse {
        result,
        report,
        report_error,
    }))
}

/// Collects and validates the two form fields. Both must be present and
/// non-empty before any extraction or remote call happens.
async fn read_form(mut multipart: Multipart) -> Result<(Bytes, String), AppError> {
    let mut resume: Option<Bytes> = None;
    let mut target_role: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form upload: {e}")))?
    {
        match field.name() {
            Some("resume") => {
                resume = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Invalid resume upload: {e}"))
                })?);
            }
            Some("target_role") => {
                target_role = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Invalid target role field: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let resume = resume.filter(|b| !b.is_empty());
    let target_role = target_role
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    match (resume, target_role) {
        (Some(resume), Some(target_role)) => Ok((resume, target_role)),
        _ => {
            warn!("Analysis triggered without a resume or target role");
            Err(AppError::Validation(
                "Please upload a resume and enter your target role.".to_string(),
            ))
        }
    }
}

async fn render_report(
    state: &AppState,
    analysis: &GapAnalysis,
    target_role: &str,
) -> (Option<ReportDownload>, Option<String>) {
    // TODO: merge the fetched template into the report layout instead of
    // rendering on a blank page.
    let _template = match fetch_template(
        &state.s3,
        &state.config.s3_bucket,
        &state.config.template_path,
    )
    .await
    {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Template fetch failed: {e}");
            return (None, Some(format!("Error creating PDF report: {e}")));
        }
    };

    match build_report(analysis, target_role) {
        Ok(bytes) => {
            let download = ReportDownload {
                filename: report_filename(target_role),
                content_type: "application/pdf",
                content_base64: BASE64.encode(&bytes),
            };
            (Some(download), None)
        }
        Err(e) => {
            warn!("Report rendering failed: {e}");
            (None, Some(format!("Error creating PDF report: {e}")))
        }
    }
}
