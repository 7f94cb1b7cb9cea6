//! Evaluator — scores a posting against the candidate profile.
//!
//! The model path asks the LLM for a structured assessment. Every failure
//! class on that path (transport, timeout, non-success status, unparseable
//! body, unparseable content, empty choices) falls back to the deterministic
//! keyword heuristic, so a cycle never aborts on one posting.

use tracing::{info, warn};

use crate::config::Preferences;
use crate::llm_client::{prompts::ANALYSIS_PROMPT_TEMPLATE, LlmClient};
use crate::models::{AnalysisSource, Evaluation, JobAnalysis, Posting};

/// Role match attached by the fallback heuristic, on the 0–10 scale.
const FALLBACK_ROLE_MATCH: f32 = 5.0;
/// Overall score attached by the fallback heuristic.
const FALLBACK_MATCH_SCORE: f64 = 0.5;
/// Score used when the model reply omits `match_score`.
const DEFAULT_MATCH_SCORE: f64 = 0.5;

pub struct Evaluator {
    llm: LlmClient,
}

impl Evaluator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Evaluates one posting. Never fails: the heuristic covers every model
    /// error, so the returned score is always in [0.0, 1.0].
    pub async fn evaluate(&self, posting: Posting, prefs: &Preferences) -> Evaluation {
        info!("Evaluating job: {}", posting.title);

        let prompt = build_prompt(&posting, prefs);
        match self.llm.call_json::<JobAnalysis>(&prompt).await {
            Ok(analysis) => finish_model_analysis(posting, analysis),
            Err(e) => {
                warn!("Model evaluation failed ({e}); using keyword heuristic");
                heuristic_evaluation(posting, prefs)
            }
        }
    }
}

fn build_prompt(posting: &Posting, prefs: &Preferences) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{job_description}", &posting.content)
        .replace("{job_title}", &prefs.job_title)
        .replace("{experience_level}", &prefs.experience_level)
        .replace("{location}", &prefs.location)
        .replace("{skills}", &prefs.skills.join(", "))
}

/// Normalizes a parsed model analysis: an absent `match_score` defaults to
/// the midpoint, and out-of-range scores clamp into [0.0, 1.0].
fn finish_model_analysis(posting: Posting, mut analysis: JobAnalysis) -> Evaluation {
    let match_score = analysis
        .match_score
        .unwrap_or(DEFAULT_MATCH_SCORE)
        .clamp(0.0, 1.0);
    analysis.match_score = Some(match_score);

    Evaluation {
        posting,
        analysis,
        match_score,
        source: AnalysisSource::Model,
    }
}

/// Deterministic fallback: fixed mid-range scores plus a case-insensitive
/// substring scan of the profile skills against the posting content.
/// `missing_skills` stays empty on this path.
fn heuristic_evaluation(posting: Posting, prefs: &Preferences) -> Evaluation {
    let content_lower = posting.content.to_lowercase();
    let skills_mentioned = prefs
        .skills
        .iter()
        .filter(|skill| content_lower.contains(&skill.to_lowercase()))
        .cloned()
        .collect();

    let analysis = JobAnalysis {
        role_match_score: FALLBACK_ROLE_MATCH,
        skills_mentioned,
        missing_skills: Vec::new(),
        is_entry_level: true,
        match_score: Some(FALLBACK_MATCH_SCORE),
        summary: Some("LLM parsing failed. Manual review suggested.".to_string()),
    };

    Evaluation {
        posting,
        analysis,
        match_score: FALLBACK_MATCH_SCORE,
        source: AnalysisSource::Heuristic,
    }
}
