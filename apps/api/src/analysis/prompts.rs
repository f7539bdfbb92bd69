// All LLM prompt templates for the analysis module.
// Each template embeds the literal target JSON schema for its call site;
// the shared JSON-only system prompt lives in llm_client::prompts.

/// Resume-structuring prompt. Replace `{resume_text}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Think like you are an expert resume parser. You will be provided with raw scraped text from a candidate's resume in different formats. The information may be unordered, incomplete, or contain noise.
Your task is to analyze this text and return a well-structured JSON object that separates the candidate's personal, educational, and professional information.

RESUME TEXT:
{resume_text}

Return only a JSON object with the following structure (fields may be null or empty arrays if information is not available):
{
  "personal_info": {
    "name": ""
  },
  "education": [
    {
      "degree": "",
      "institution": ""
    }
  ],
  "professional_experience": [
    {
      "job_title": "",
      "company": "",
      "start_date": "",
      "end_date": "",
      "location": "",
      "responsibilities": []
    }
  ],
  "skills": [],
  "certifications": [],
  "projects": []
}"#;

/// Profile-summarization prompt. Replace `{github_data}` before sending.
pub const GITHUB_PROMPT_TEMPLATE: &str = r#"Think like you are an expert GitHub profile analyzer. You will be provided with GitHub user data including user information and repositories with commits.
Your task is to analyze this data and return a well-structured JSON object that summarizes the candidate's GitHub activity, inferred skills, activity level, and other insights.

GITHUB DATA:
{github_data}

Return only a JSON object with the following structure (fields may be null or empty if information is not available):
{
  "summary": "",
  "skills_inferred": [],
  "activity_level": "",
  "top_repositories": [
    {
      "name": "",
      "description": "",
      "commits_count": 0,
      "last_commit_date": ""
    }
  ],
  "commit_patterns": "",
  "languages_used": [],
  "overall_rating": ""
}"#;

/// Final credibility prompt. Replace `{resume_analysis}` and `{github_data}`
/// before sending. One round trip both re-derives the GitHub summary and
/// cross-verifies it against the resume, so the schema nests both envelopes.
pub const FINAL_PROMPT_TEMPLATE: &str = r#"Think like you are an expert candidate-credibility analyst. You will be provided with a structured resume analysis and the candidate's raw GitHub data (user info plus repositories with commits).
Your task is to cross-verify the resume claims against the GitHub activity and return a well-structured JSON object.

Input:
Resume Analysis: {resume_analysis}
GitHub Data: {github_data}

Return only a JSON object with the following structure (fields may be null or empty if information is not available):
{
  "github_analysis": {
    "summary": "",
    "skills_inferred": [],
    "activity_level": "",
    "top_repositories": [
      {
        "name": "",
        "description": "",
        "commits_count": 0,
        "last_commit_date": ""
      }
    ],
    "commit_patterns": "",
    "languages_used": [],
    "overall_rating": ""
  },
  "final_analysis": {
    "timestamp": "",
    "overall_credibility_score": 0,
    "detailed_scores": {
      "technology_match_score": 0,
      "project_verification_score": 0,
      "activity_authenticity_score": 0,
      "experience_consistency_score": 0
    },
    "resume_summary": {
      "claimed_skills": [],
      "projects_mentioned": 0,
      "experience_years": 0
    },
    "github_summary": {
      "total_repositories": 0,
      "total_commits": 0,
      "languages_used": [],
      "active_since": ""
    },
    "verification_results": {
      "strengths": [],
      "concerns": []
    },
    "detailed_analysis": "",
    "recommendations": []
  }
}

Rules:
1. All scores are integers from 0 to 100.
2. Generate the timestamp as the current UTC time in ISO format (e.g., "2023-10-01T12:00:00Z").
3. Ground every strength and concern in the provided inputs — do not invent activity that is not in the GitHub data.
4. Return the complete object including the nested "github_analysis" and "final_analysis" keys."#;
