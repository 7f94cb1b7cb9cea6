//! Core data types shared across the search → evaluate → notify pipeline.

use serde::{Deserialize, Serialize};

/// A normalized job posting extracted from a search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub title: String,
    pub url: String,
    /// Raw text content of the hit, as returned by the search API.
    pub content: String,
    /// Host segment of the URL, or `"Unknown Source"` when the URL has none.
    pub source: String,
}

impl Posting {
    /// De-duplication key: title and URL concatenated.
    pub fn identity_key(&self) -> String {
        format!("{}_{}", self.title, self.url)
    }
}

/// Structured fit assessment for one posting.
///
/// Deserialized tolerantly from model output: absent fields default, and
/// `match_score` stays optional until the evaluator normalizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    /// Role and experience-level match on a 0–10 scale.
    #[serde(default)]
    pub role_match_score: f32,
    #[serde(default)]
    pub skills_mentioned: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub is_entry_level: bool,
    /// Overall 0.0–1.0 match score. `None` when the model omitted it.
    pub match_score: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Where an analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Model,
    Heuristic,
}

/// A posting with its completed fit assessment.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub posting: Posting,
    pub analysis: JobAnalysis,
    /// Normalized overall score in [0.0, 1.0]; drives the notify decision.
    pub match_score: f64,
    pub source: AnalysisSource,
}
