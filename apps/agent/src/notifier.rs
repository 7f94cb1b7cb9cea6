//! Notifier — renders and delivers job alert mails.
//!
//! Delivery is best-effort: every failure is logged and reported as a
//! per-posting `false`, never propagated into the cycle.

use chrono::Utc;
use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{error, info};

use crate::models::Evaluation;

const SMTP_RELAY: &str = "smtp.gmail.com";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Sends alert mails from the configured mailbox to itself over an
/// implicit-TLS SMTP session.
pub struct Notifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    mailbox: String,
}

impl Notifier {
    pub fn new(mailbox: String, app_password: String) -> Result<Self, NotifyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_RELAY)?
            .credentials(Credentials::new(mailbox.clone(), app_password))
            .build();
        Ok(Self { transport, mailbox })
    }

    /// Sends one alert and reports whether it went out. Failures are logged
    /// here; the caller only sees the boolean.
    pub async fn send_alert(&self, evaluation: &Evaluation) -> bool {
        match self.deliver(evaluation).await {
            Ok(()) => {
                info!("Alert sent for job: {}", evaluation.posting.title);
                true
            }
            Err(e) => {
                error!(
                    "Error sending alert for '{}': {e}",
                    evaluation.posting.title
                );
                false
            }
        }
    }

    async fn deliver(&self, evaluation: &Evaluation) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.mailbox.parse()?)
            .to(self.mailbox.parse()?)
            .subject(alert_subject(&evaluation.posting.title))
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::html(render_alert_html(evaluation))),
            )?;

        self.transport.send(message).await?;
        Ok(())
    }
}

pub(crate) fn alert_subject(title: &str) -> String {
    format!("Job Alert: {title}")
}

/// HTML body of one alert mail. Posting fields are interpolated verbatim.
pub(crate) fn render_alert_html(evaluation: &Evaluation) -> String {
    let analysis = &evaluation.analysis;
    let summary = analysis.summary.as_deref().unwrap_or("No summary available");

    format!(
        r#"<html>
<body>
<h2>New Job Match: {title}</h2>
<p><strong>Match Score:</strong> {score:.1}%</p>
<p><strong>Source:</strong> {source}</p>
<p><strong>Link:</strong> <a href="{url}">{url}</a></p>

<h3>Analysis:</h3>
<p><strong>Summary:</strong> {summary}</p>

<h4>Skills Mentioned:</h4>
<ul>
{skills_mentioned}
</ul>

<h4>Missing Skills:</h4>
<ul>
{missing_skills}
</ul>

<hr>
<p><em>This is an automated alert from your job search agent. Generated at {generated_at} UTC.</em></p>
</body>
</html>"#,
        title = evaluation.posting.title,
        score = evaluation.match_score * 100.0,
        source = evaluation.posting.source,
        url = evaluation.posting.url,
        summary = summary,
        skills_mentioned = bullet_list(&analysis.skills_mentioned),
        missing_skills = bullet_list(&analysis.missing_skills),
        generated_at = Utc::now().format("%Y-%m-%d %H:%M:%S"),
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{item}</li>"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisSource, JobAnalysis, Posting};

    fn test_evaluation() -> Evaluation {
        Evaluation {
            posting: Posting {
                title: "ML Engineer".to_string(),
                url: "https://indeed.com/viewjob?jk=1".to_string(),
                content: "role text".to_string(),
                source: "indeed.com".to_string(),
            },
            analysis: JobAnalysis {
                role_match_score: 8.0,
                skills_mentioned: vec!["Python".to_string(), "PyTorch".to_string()],
                missing_skills: vec!["Kubernetes".to_string()],
                is_entry_level: true,
                match_score: Some(0.725),
                summary: Some("Good overlap with the ML stack.".to_string()),
            },
            match_score: 0.725,
            source: AnalysisSource::Model,
        }
    }

    #[test]
    fn test_alert_subject_includes_title() {
        assert_eq!(alert_subject("ML Engineer"), "Job Alert: ML Engineer");
    }

    #[test]
    fn test_render_includes_score_as_percentage() {
        let html = render_alert_html(&test_evaluation());
        assert!(html.contains("72.5%"));
    }

    #[test]
    fn test_render_includes_posting_fields() {
        let html = render_alert_html(&test_evaluation());
        assert!(html.contains("New Job Match: ML Engineer"));
        assert!(html.contains("indeed.com"));
        assert!(html.contains(r#"<a href="https://indeed.com/viewjob?jk=1">"#));
        assert!(html.contains("Good overlap with the ML stack."));
    }

    #[test]
    fn test_render_bullets_matched_and_missing_skills() {
        let html = render_alert_html(&test_evaluation());
        assert!(html.contains("<li>Python</li>"));
        assert!(html.contains("<li>PyTorch</li>"));
        assert!(html.contains("<li>Kubernetes</li>"));
    }

    #[test]
    fn test_render_with_no_skills_has_no_bullets() {
        let mut evaluation = test_evaluation();
        evaluation.analysis.skills_mentioned.clear();
        evaluation.analysis.missing_skills.clear();
        let html = render_alert_html(&evaluation);
        assert!(!html.contains("<li>"));
    }

    #[test]
    fn test_render_defaults_absent_summary() {
        let mut evaluation = test_evaluation();
        evaluation.analysis.summary = None;
        let html = render_alert_html(&evaluation);
        assert!(html.contains("No summary available"));
    }
}
