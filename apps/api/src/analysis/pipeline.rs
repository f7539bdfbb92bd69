//! Analysis Orchestrator — the pipeline state machine.
//!
//! Stages run in strict order: Validating → Extracting → ContentChecking →
//! fan-out {profile fetch ∥ resume analysis} → join → FinalAnalyzing →
//! Aggregating. Any failure short-circuits the remaining stages and is
//! raised exactly once; no partial result is ever returned.

use bytes::Bytes;
use tracing::info;

use crate::analysis::aggregator::combine;
use crate::analysis::analyzer::StructuredAnalyzer;
use crate::document::extract_text;
use crate::document::validation::{validate_resume_text, validate_upload};
use crate::errors::AppError;
use crate::github::ProfileFetcher;
use crate::models::report::AnalysisReport;

/// One uploaded document as received at request ingress.
/// Discarded after text extraction.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: String,
    pub payload: Bytes,
}

/// Runs the full credibility pipeline for one request.
pub async fn run_analysis(
    fetcher: &dyn ProfileFetcher,
    analyzer: &StructuredAnalyzer,
    document: UploadedDocument,
    username: &str,
) -> Result<AnalysisReport, AppError> {
    // Stage 1: Validating
    let kind = validate_upload(&document.filename, &document.content_type, &document.payload)?;
    info!(filename = %document.filename, ?kind, "document validated");

    // Stage 2: Extracting — CPU-bound, off the async path
    let payload = document.payload.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(kind, &payload))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;
    info!(chars = text.len(), "text extracted");

    // Stage 3: ContentChecking — gates the network stages, so a non-resume
    // upload never costs a profile round trip
    validate_resume_text(&text)?;

    // Stages 4–5: fan-out and join. The branches are independent and both
    // network-bound; both run to completion before either error is raised,
    // so neither leaves a dangling external call behind.
    info!(username, "fetching profile and structuring resume concurrently");
    let (profile_result, resume_result) =
        tokio::join!(fetcher.fetch(username), analyzer.analyze_resume(&text));
    let profile = profile_result?;
    let resume_analysis = resume_result?;

    // Stage 6: FinalAnalyzing
    let outcome = analyzer.final_analysis(&resume_analysis, &profile).await?;

    // Compatibility path: a flat final response carries no re-derived profile
    // summary, so the dedicated profile-summarization call fills the envelope.
    let github_analysis = match outcome.github_analysis {
        Some(analysis) => analysis,
        None => analyzer.analyze_profile(&profile).await?,
    };

    // Stages 7–8: Aggregating → Done
    let report = combine(profile, resume_analysis, github_analysis, outcome.final_analysis);
    info!(
        score = report.final_analysis_info.overall_credibility_score,
        "analysis pipeline completed"
    );
    Ok(report)
}
