use anyhow::{bail, Context, Result};

const DEFAULT_JOB_TITLE: &str = "machine learning engineer";
const DEFAULT_EXPERIENCE_LEVEL: &str = "entry level";
const DEFAULT_LOCATION: &str = "united states";
const DEFAULT_MIN_MATCH_SCORE: f64 = 0.5;
const DEFAULT_SEARCH_INTERVAL_SECS: u64 = 3600;

/// Candidate profile the agent searches and scores against.
/// Immutable after startup.
#[derive(Debug, Clone)]
pub struct Preferences {
    pub job_title: String,
    pub experience_level: String,
    pub location: String,
    pub skills: Vec<String>,
    /// Minimum overall match score that triggers an alert, in [0.0, 1.0].
    pub minimum_match_score: f64,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub tavily_api_key: String,
    pub llm_api_key: String,
    pub llm_api_url: String,
    pub gmail_user: String,
    pub gmail_app_password: String,
    pub preferences: Preferences,
    pub search_interval_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Required
    /// variables are collected first so a single diagnostic names every
    /// missing one. Empty values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut required = |key: &'static str| -> String {
            match lookup(key) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push(key);
                    String::new()
                }
            }
        };

        let tavily_api_key = required("TAVILY_API_KEY");
        let llm_api_key = required("LLM_API_KEY");
        let llm_api_url = required("LLM_API_URL");
        let gmail_user = required("GMAIL_USER");
        let gmail_app_password = required("GMAIL_APP_PASSWORD");

        if !missing.is_empty() {
            bail!(
                "Missing required environment variables: {}",
                missing.join(", ")
            );
        }

        let minimum_match_score = match lookup("MIN_MATCH_SCORE") {
            Some(raw) => raw
                .parse::<f64>()
                .context("MIN_MATCH_SCORE must be a number between 0.0 and 1.0")?
                .clamp(0.0, 1.0),
            None => DEFAULT_MIN_MATCH_SCORE,
        };

        let skills = match lookup("SKILLS") {
            Some(raw) => parse_skills(&raw),
            None => default_skills(),
        };

        let preferences = Preferences {
            job_title: lookup("JOB_TITLE").unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string()),
            experience_level: lookup("EXPERIENCE_LEVEL")
                .unwrap_or_else(|| DEFAULT_EXPERIENCE_LEVEL.to_string()),
            location: lookup("JOB_LOCATION").unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            skills,
            minimum_match_score,
        };

        let search_interval_secs = match lookup("SEARCH_INTERVAL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SEARCH_INTERVAL_SECS must be a number of seconds")?,
            None => DEFAULT_SEARCH_INTERVAL_SECS,
        };

        Ok(Config {
            tavily_api_key,
            llm_api_key,
            llm_api_url,
            gmail_user,
            gmail_app_password,
            preferences,
            search_interval_secs,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Splits a comma-separated skill list, trimming whitespace and dropping
/// empty entries.
fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_skills() -> Vec<String> {
    [
        "Python",
        "TensorFlow",
        "PyTorch",
        "scikit-learn",
        "data analysis",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
