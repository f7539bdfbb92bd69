//! Structured Analyzer — wraps the text generator behind typed
//! request/response contracts.
//!
//! Three call sites (resume structuring, profile summarization, final
//! credibility) share one JSON-extraction routine. Each call invokes the
//! generator exactly once; retry policy belongs to the caller.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::analysis::prompts::{
    FINAL_PROMPT_TEMPLATE, GITHUB_PROMPT_TEMPLATE, RESUME_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::github::GithubProfile;
use crate::models::report::{FinalAnalysis, GithubAnalysis, ResumeAnalysis};

/// Upper bound on the response excerpt carried in parse errors.
const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("generative service call failed: {0}")]
    Service(#[from] LlmError),

    #[error("failed to parse analyzer response as JSON: no object found; preview: '{preview}'")]
    MissingJson { preview: String },

    #[error("failed to parse analyzer response as JSON: unbalanced braces; preview: '{preview}'")]
    UnbalancedJson { preview: String },

    #[error("failed to parse analyzer response as JSON: {source}; preview: '{preview}'")]
    Parse {
        source: serde_json::Error,
        preview: String,
    },

    #[error("analyzer response did not match the {kind} schema: {source}")]
    Schema {
        kind: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to encode {kind} payload: {source}")]
    Payload {
        kind: &'static str,
        source: serde_json::Error,
    },
}

/// Outcome of the final credibility call.
///
/// Canonical response shape is the wrapper `{"github_analysis": ...,
/// "final_analysis": ...}`. A flat credibility object is tolerated as the
/// compatibility shape and lands here with `github_analysis: None`; the
/// orchestrator then fills the envelope through the dedicated
/// profile-summarization call.
#[derive(Debug, Clone)]
pub struct FinalOutcome {
    pub github_analysis: Option<GithubAnalysis>,
    pub final_analysis: FinalAnalysis,
}

#[derive(Debug, Deserialize)]
struct WrappedOutcome {
    #[serde(default)]
    github_analysis: Option<GithubAnalysis>,
    final_analysis: FinalAnalysis,
}

impl FinalOutcome {
    fn from_value(value: serde_json::Value) -> Result<Self, AnalysisError> {
        if value.get("final_analysis").is_some() {
            let wrapped: WrappedOutcome = serde_json::from_value(value)
                .map_err(|e| AnalysisError::Schema {
                    kind: "final (wrapped)",
                    source: e,
                })?;
            Ok(FinalOutcome {
                github_analysis: wrapped.github_analysis,
                final_analysis: wrapped.final_analysis,
            })
        } else {
            // Compatibility shape: a single flat credibility object.
            let final_analysis: FinalAnalysis = serde_json::from_value(value)
                .map_err(|e| AnalysisError::Schema {
                    kind: "final (flat)",
                    source: e,
                })?;
            Ok(FinalOutcome {
                github_analysis: None,
                final_analysis,
            })
        }
    }
}

/// Typed facade over the generator; shared read-only across requests.
#[derive(Clone)]
pub struct StructuredAnalyzer {
    generator: Arc<dyn TextGenerator>,
}

impl StructuredAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Structures raw resume text into a `ResumeAnalysis` envelope.
    pub async fn analyze_resume(&self, text: &str) -> Result<ResumeAnalysis, AnalysisError> {
        info!("resume analysis started");
        let prompt = RESUME_PROMPT_TEMPLATE.replace("{resume_text}", text);
        let raw = self.generator.generate(&prompt, JSON_ONLY_SYSTEM).await?;
        let value = extract_json(&raw)?;
        let analysis = serde_json::from_value(value).map_err(|e| AnalysisError::Schema {
            kind: "resume",
            source: e,
        })?;
        info!("resume analysis completed");
        Ok(analysis)
    }

    /// Summarizes a fetched profile into a `GithubAnalysis` envelope.
    pub async fn analyze_profile(
        &self,
        profile: &GithubProfile,
    ) -> Result<GithubAnalysis, AnalysisError> {
        info!("GitHub profile analysis started");
        let payload = encode("github profile", profile)?;
        let prompt = GITHUB_PROMPT_TEMPLATE.replace("{github_data}", &payload);
        let raw = self.generator.generate(&prompt, JSON_ONLY_SYSTEM).await?;
        let value = extract_json(&raw)?;
        let analysis = serde_json::from_value(value).map_err(|e| AnalysisError::Schema {
            kind: "github",
            source: e,
        })?;
        info!("GitHub profile analysis completed");
        Ok(analysis)
    }

    /// Cross-verifies the structured resume against the raw profile data in
    /// one round trip, re-deriving the profile summary along the way.
    pub async fn final_analysis(
        &self,
        resume: &ResumeAnalysis,
        profile: &GithubProfile,
    ) -> Result<FinalOutcome, AnalysisError> {
        info!("final credibility analysis started");
        let resume_payload = encode("resume analysis", resume)?;
        let profile_payload = encode("github profile", profile)?;
        let prompt = FINAL_PROMPT_TEMPLATE
            .replace("{resume_analysis}", &resume_payload)
            .replace("{github_data}", &profile_payload);
        let raw = self.generator.generate(&prompt, JSON_ONLY_SYSTEM).await?;
        let value = extract_json(&raw)?;
        let outcome = FinalOutcome::from_value(value)?;
        info!(
            score = outcome.final_analysis.overall_credibility_score,
            "final credibility analysis completed"
        );
        Ok(outcome)
    }
}

fn encode<T: serde::Serialize>(kind: &'static str, value: &T) -> Result<String, AnalysisError> {
    serde_json::to_string(value).map_err(|e| AnalysisError::Payload { kind, source: e })
}

// ────────────────────────────────────────────────────────────────────────────
// Response normalization
// ────────────────────────────────────────────────────────────────────────────

/// Normalizes a raw model response into a parsed JSON object:
/// strips a code fence if present, locates the outermost `{...}` span
/// (discarding surrounding prose), and parses it.
pub(crate) fn extract_json(raw: &str) -> Result<serde_json::Value, AnalysisError> {
    let text = strip_json_fences(raw);
    let span = locate_object(text)?;
    debug!(span_len = span.len(), "JSON span located in response");
    serde_json::from_str(span).map_err(|e| AnalysisError::Parse {
        source: e,
        preview: preview(raw),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Finds the outermost balanced `{...}` span, tracking string literals and
/// escapes so braces inside values do not confuse the depth count.
fn locate_object(text: &str) -> Result<&str, AnalysisError> {
    let start = match text.find('{') {
        Some(i) => i,
        None => {
            return Err(AnalysisError::MissingJson {
                preview: preview(text),
            })
        }
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    Err(AnalysisError::UnbalancedJson {
        preview: preview(text),
    })
}

/// Bounded excerpt of an offending response, safe on char boundaries.
fn preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        trimmed.to_string()
    } else {
        trimmed.chars().take(PREVIEW_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_json_from_fenced_block_with_tag() {
        let raw = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(raw).unwrap(), json!({"key": "value"}));
    }

    #[test]
    fn test_extract_json_from_fenced_block_without_tag() {
        let raw = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(raw).unwrap(), json!({"key": "value"}));
    }

    #[test]
    fn test_extract_json_with_leading_prose() {
        let raw = "Here is the analysis you asked for:\n{\"score\": 80}";
        assert_eq!(extract_json(raw).unwrap(), json!({"score": 80}));
    }

    #[test]
    fn test_extract_json_with_trailing_prose() {
        let raw = "{\"score\": 80}\nLet me know if you need anything else!";
        assert_eq!(extract_json(raw).unwrap(), json!({"score": 80}));
    }

    #[test]
    fn test_extract_json_raw_object_passes_through() {
        let raw = "{\"nested\": {\"a\": [1, 2]}}";
        assert_eq!(extract_json(raw).unwrap(), json!({"nested": {"a": [1, 2]}}));
    }

    #[test]
    fn test_extract_json_ignores_braces_inside_strings() {
        let raw = "{\"note\": \"uses { and } inside\"}";
        assert_eq!(
            extract_json(raw).unwrap(),
            json!({"note": "uses { and } inside"})
        );
    }

    #[test]
    fn test_unbalanced_braces_fail() {
        let raw = "{\"score\": 80";
        assert!(matches!(
            extract_json(raw),
            Err(AnalysisError::UnbalancedJson { .. })
        ));
    }

    #[test]
    fn test_refusal_text_fails_with_bounded_excerpt() {
        let raw = "Sorry, I cannot process this.";
        let err = extract_json(raw).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("parse analyzer response as JSON"));
        assert!(message.contains("Sorry, I cannot process this."));
    }

    #[test]
    fn test_preview_is_bounded() {
        let long = "x".repeat(5_000);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_equivalent_structures_across_wrappings() {
        let inner = json!({"summary": "ok", "skills_inferred": ["rust"]});
        let fenced = format!("```json\n{inner}\n```");
        let prosed = format!("Sure! Here you go: {inner}");
        let raw = inner.to_string();
        assert_eq!(extract_json(&fenced).unwrap(), inner);
        assert_eq!(extract_json(&prosed).unwrap(), inner);
        assert_eq!(extract_json(&raw).unwrap(), inner);
    }

    #[test]
    fn test_final_outcome_unwraps_nested_shape() {
        let value = json!({
            "github_analysis": {"summary": "active profile"},
            "final_analysis": {"overall_credibility_score": 72}
        });
        let outcome = FinalOutcome::from_value(value).unwrap();
        assert_eq!(
            outcome.github_analysis.unwrap().summary.as_deref(),
            Some("active profile")
        );
        assert_eq!(outcome.final_analysis.overall_credibility_score, 72);
    }

    #[test]
    fn test_final_outcome_accepts_flat_compatibility_shape() {
        let value = json!({"overall_credibility_score": 55, "recommendations": ["probe deeper"]});
        let outcome = FinalOutcome::from_value(value).unwrap();
        assert!(outcome.github_analysis.is_none());
        assert_eq!(outcome.final_analysis.overall_credibility_score, 55);
    }

    #[test]
    fn test_final_outcome_rejects_shape_without_score() {
        let value = json!({"something_else": true});
        assert!(matches!(
            FinalOutcome::from_value(value),
            Err(AnalysisError::Schema { .. })
        ));
    }
}
