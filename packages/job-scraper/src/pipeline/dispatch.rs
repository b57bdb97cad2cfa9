//! Crawl dispatcher: one scheduling call per source, concurrently.
//!
//! ```text
//! dispatch([linkedin, internshala])
//!     ├─► schedule(linkedin_jobs)    ─┐
//!     └─► schedule(internshala_jobs) ─┴─► join_all ─► [outcome; n] (input order)
//! ```
//!
//! Each call is its own failure domain: transport errors, non-success
//! statuses, malformed bodies and timeouts become a `failed` outcome for
//! that source only.

use futures::future::join_all;
use scrapyd_client::ScheduleRequest;
use std::sync::Arc;

use crate::traits::registry::JobRegistry;
use crate::types::{config::DispatchConfig, source::Source, status::DispatchOutcome};

pub struct Dispatcher {
    registry: Arc<dyn JobRegistry>,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(registry: Arc<dyn JobRegistry>, config: DispatchConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Schedule a crawl of every source and wait for all of them.
    ///
    /// Returns one outcome per distinct source, in input order. Never fails
    /// as a whole: a fan-out where every source failed is still a normal
    /// result listing each failure.
    pub async fn dispatch(
        &self,
        sources: &[Source],
        job_role: &str,
        location: &str,
        user_id: &str,
    ) -> Vec<DispatchOutcome> {
        let mut unique: Vec<Source> = Vec::with_capacity(sources.len());
        for source in sources {
            if !unique.contains(source) {
                unique.push(*source);
            }
        }

        let calls = unique
            .iter()
            .map(|&source| self.schedule_one(source, job_role, location, user_id));
        let outcomes = join_all(calls).await;

        let scheduled = outcomes.iter().filter(|o| o.is_scheduled()).count();
        tracing::info!(
            user_id,
            job_role,
            location,
            scheduled,
            failed = outcomes.len() - scheduled,
            "Crawl dispatch complete"
        );

        outcomes
    }

    async fn schedule_one(
        &self,
        source: Source,
        job_role: &str,
        location: &str,
        user_id: &str,
    ) -> DispatchOutcome {
        let request = ScheduleRequest {
            project: self.config.project.clone(),
            spider: source.spider().to_string(),
            domain: job_role.to_string(),
            location: location.to_string(),
            user_id: user_id.to_string(),
        };

        match tokio::time::timeout(self.config.timeout, self.registry.schedule(&request)).await {
            Ok(Ok(job_id)) => {
                tracing::debug!(%source, %job_id, "Crawl scheduled");
                DispatchOutcome::scheduled(source, job_id)
            }
            Ok(Err(e)) => {
                tracing::warn!(%source, error = %e, "Failed to schedule crawl");
                DispatchOutcome::failed(source)
            }
            Err(_) => {
                tracing::warn!(
                    %source,
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "Scheduling call timed out"
                );
                DispatchOutcome::failed(source)
            }
        }
    }
}
