// Prompt constants for the evaluator's fit-assessment call.
// Placeholders are replaced by the evaluator before sending.

/// Fit-assessment prompt template. Replace `{job_description}`, `{job_title}`,
/// `{experience_level}`, `{location}`, and `{skills}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"As an AI assistant helping with job matching, analyze this job description for a candidate:

JOB DESCRIPTION:
{job_description}

CANDIDATE PREFERENCES:
- Job Title: {job_title}
- Experience Level: {experience_level}
- Location: {location}
- Skills: {skills}

Please analyze:
1. How well does this job match the desired role and experience level? Score 0-10 as "role_match_score".
2. Which of the candidate's skills are mentioned in the job description? List them as "skills_mentioned".
3. Are there any key requirements missing from the candidate's skill set? List them as "missing_skills".
4. Is this truly a {experience_level} position? Answer as boolean "is_entry_level".
5. Overall match score from 0.0 to 1.0 where 1.0 is a perfect match, as "match_score".
6. A short free-text "summary" of the fit.

Respond with a single JSON object using exactly those keys. Do not include any text outside the JSON object."#;
