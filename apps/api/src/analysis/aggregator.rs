//! Result Aggregator — pure merge of the pipeline's stage outputs.
//!
//! No I/O and no failure path of its own: every input is already a
//! validated, typed envelope by construction. Field names and nesting form
//! a fixed, versionless contract.

use crate::models::github::GithubProfile;
use crate::models::report::{AnalysisReport, FinalAnalysis, GithubAnalysis, ResumeAnalysis};

pub fn combine(
    profile: GithubProfile,
    resume_analysis: ResumeAnalysis,
    github_analysis: GithubAnalysis,
    final_analysis: FinalAnalysis,
) -> AnalysisReport {
    AnalysisReport {
        github_user_info: profile,
        resume_analysis,
        github_analysis_info: github_analysis,
        final_analysis_info: final_analysis,
    }
}
