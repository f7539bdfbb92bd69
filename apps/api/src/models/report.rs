//! Typed analyzer envelopes and the final combined report.
//!
//! Every analyzer call deserializes into one of these structs immediately
//! after JSON normalization — untyped `Value`s never cross a stage boundary.
//! Missing fields default to null/empty per the prompt contracts.

use serde::{Deserialize, Serialize};

use crate::models::github::GithubProfile;

// ────────────────────────────────────────────────────────────────────────────
// Resume-structuring envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

/// Structured resume content extracted from raw resume text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub professional_experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    /// Project entries come back in model-chosen shapes (strings or objects);
    /// the schema deliberately leaves the element open.
    #[serde(default)]
    pub projects: Vec<serde_json::Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Profile-summarization envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopRepository {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub commits_count: u32,
    #[serde(default)]
    pub last_commit_date: Option<String>,
}

/// Structured summary of a candidate's GitHub activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubAnalysis {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills_inferred: Vec<String>,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub top_repositories: Vec<TopRepository>,
    #[serde(default)]
    pub commit_patterns: Option<String>,
    #[serde(default)]
    pub languages_used: Vec<String>,
    #[serde(default)]
    pub overall_rating: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Final credibility envelope
// ────────────────────────────────────────────────────────────────────────────

/// Four credibility sub-scores, integers in 0–100.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailedScores {
    #[serde(default)]
    pub technology_match_score: u32,
    #[serde(default)]
    pub project_verification_score: u32,
    #[serde(default)]
    pub activity_authenticity_score: u32,
    #[serde(default)]
    pub experience_consistency_score: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeSummary {
    #[serde(default)]
    pub claimed_skills: Vec<String>,
    #[serde(default)]
    pub projects_mentioned: u32,
    #[serde(default)]
    pub experience_years: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubSummary {
    #[serde(default)]
    pub total_repositories: u32,
    #[serde(default)]
    pub total_commits: u32,
    #[serde(default)]
    pub languages_used: Vec<String>,
    #[serde(default)]
    pub active_since: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationResults {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
}

/// Cross-verification of the resume against GitHub activity.
/// `overall_credibility_score` is deliberately non-defaulted: a response
/// missing it does not pass schema validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalAnalysis {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub overall_credibility_score: u32,
    #[serde(default)]
    pub detailed_scores: DetailedScores,
    #[serde(default)]
    pub resume_summary: ResumeSummary,
    #[serde(default)]
    pub github_summary: GithubSummary,
    #[serde(default)]
    pub verification_results: VerificationResults,
    #[serde(default)]
    pub detailed_analysis: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Combined report
// ────────────────────────────────────────────────────────────────────────────

/// Terminal artifact of one pipeline invocation.
/// Field names and nesting are a fixed, versionless contract.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub github_user_info: GithubProfile,
    pub resume_analysis: ResumeAnalysis,
    pub github_analysis_info: GithubAnalysis,
    pub final_analysis_info: FinalAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_analysis_deserializes_full_envelope() {
        let json = r#"{
            "timestamp": "2025-10-01T12:00:00Z",
            "overall_credibility_score": 78,
            "detailed_scores": {
                "technology_match_score": 82,
                "project_verification_score": 70,
                "activity_authenticity_score": 85,
                "experience_consistency_score": 75
            },
            "resume_summary": {
                "claimed_skills": ["Rust", "PostgreSQL"],
                "projects_mentioned": 4,
                "experience_years": 5.5
            },
            "github_summary": {
                "total_repositories": 12,
                "total_commits": 340,
                "languages_used": ["Rust", "Python"],
                "active_since": "2017-03-01T00:00:00Z"
            },
            "verification_results": {
                "strengths": ["Consistent commit history"],
                "concerns": ["Few repos match claimed frontend skills"]
            },
            "detailed_analysis": "Solid backend footprint.",
            "recommendations": ["Verify frontend claims in interview"]
        }"#;

        let parsed: FinalAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.overall_credibility_score, 78);
        assert_eq!(parsed.detailed_scores.technology_match_score, 82);
        assert_eq!(parsed.resume_summary.claimed_skills.len(), 2);
        assert_eq!(parsed.github_summary.total_commits, 340);
        assert_eq!(parsed.verification_results.concerns.len(), 1);
    }

    #[test]
    fn test_final_analysis_missing_fields_default() {
        // Only the score is mandatory; everything else nulls out.
        let parsed: FinalAnalysis =
            serde_json::from_str(r#"{"overall_credibility_score": 40}"#).unwrap();
        assert_eq!(parsed.overall_credibility_score, 40);
        assert!(parsed.timestamp.is_none());
        assert!(parsed.recommendations.is_empty());
        assert_eq!(parsed.detailed_scores.technology_match_score, 0);
    }

    #[test]
    fn test_final_analysis_without_score_is_rejected() {
        let result = serde_json::from_str::<FinalAnalysis>(r#"{"timestamp": "2025-10-01"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_resume_analysis_tolerates_null_and_missing_fields() {
        let json = r#"{
            "personal_info": {"name": null},
            "education": [{"degree": "B.Tech", "institution": null}],
            "skills": ["Rust"]
        }"#;
        let parsed: ResumeAnalysis = serde_json::from_str(json).unwrap();
        assert!(parsed.personal_info.name.is_none());
        assert_eq!(parsed.education.len(), 1);
        assert!(parsed.professional_experience.is_empty());
        assert!(parsed.projects.is_empty());
    }
}
