//! Cycle driver — a timed loop alternating one search → evaluate → notify
//! pass with a fixed sleep. There is no terminal state; the process runs
//! until it is killed.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::evaluator::Evaluator;
use crate::notifier::Notifier;
use crate::search::SearchClient;

pub struct Scheduler {
    search: SearchClient,
    evaluator: Evaluator,
    notifier: Notifier,
    config: Config,
}

impl Scheduler {
    pub fn new(
        search: SearchClient,
        evaluator: Evaluator,
        notifier: Notifier,
        config: Config,
    ) -> Self {
        Self {
            search,
            evaluator,
            notifier,
            config,
        }
    }

    /// Runs forever, sleeping the configured interval between passes.
    pub async fn run(mut self) {
        let interval = Duration::from_secs(self.config.search_interval_secs);
        loop {
            self.run_cycle().await;
            info!("Cycle complete; sleeping for {}s", interval.as_secs());
            tokio::time::sleep(interval).await;
        }
    }

    /// One pass over the pipeline. Postings are handled independently and
    /// sequentially; a failed evaluation or alert never aborts the rest.
    async fn run_cycle(&mut self) {
        info!(
            "Starting job search at {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        );

        let postings = self.search.search(&self.config.preferences).await;
        if postings.is_empty() {
            info!("No new postings found in this cycle");
            return;
        }

        for posting in postings {
            let evaluation = self
                .evaluator
                .evaluate(posting, &self.config.preferences)
                .await;

            debug!(
                "Evaluated '{}' ({:?} analysis): match score {:.2}",
                evaluation.posting.title, evaluation.source, evaluation.match_score
            );

            if should_notify(
                evaluation.match_score,
                self.config.preferences.minimum_match_score,
            ) {
                if self.notifier.send_alert(&evaluation).await {
                    info!("Email sent for: {}", evaluation.posting.title);
                } else {
                    warn!("Failed to send email for: {}", evaluation.posting.title);
                }
            } else {
                info!(
                    "Skipped (match score {:.2} below threshold): {}",
                    evaluation.match_score, evaluation.posting.title
                );
            }
        }
    }
}

/// Threshold check for the notify decision: fires at exactly the minimum.
fn should_notify(match_score: f64, minimum: f64) -> bool {
    match_score >= minimum
}
