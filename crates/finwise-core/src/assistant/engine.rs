//! Query Orchestrator
//!
//! One call to [`Assistant::ask_on`] runs the whole pipeline: aggregate the
//! reference month, build the trend, classify the message, render the answer
//! and append the exchange to the chat log. Aggregation must fully succeed
//! before anything is rendered, and a failed chat-log write fails the query.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, error, info};

use super::intent::{Intent, IntentClassifier};
use super::metrics::{aggregate_month, Metrics, MonthlySummary};
use super::response::ResponseSynthesizer;
use super::store::FinanceStore;
use super::trend::build_trend;
use crate::config::AssistantConfig;
use crate::error::{Error, Result};

/// What the presentation layer receives for one question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReply {
    pub response: String,
    pub data: MonthlySummary,
}

/// The financial assistant, bound to one storage collaborator
pub struct Assistant<S: FinanceStore> {
    store: S,
    config: AssistantConfig,
    synthesizer: ResponseSynthesizer,
}

impl<S: FinanceStore> Assistant<S> {
    /// Create an assistant with the default configuration
    pub fn new(store: S) -> Self {
        Self::with_config(store, AssistantConfig::default())
    }

    pub fn with_config(store: S, config: AssistantConfig) -> Self {
        let synthesizer = ResponseSynthesizer::new(&config);
        Self {
            store,
            config,
            synthesizer,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Month summary plus trend for `reference_date`
    pub fn compute_metrics(&self, user_id: i64, reference_date: NaiveDate) -> Result<Metrics> {
        let summary = aggregate_month(&self.store, user_id, reference_date).map_err(storage_failure)?;
        let trend = build_trend(&self.store, user_id, reference_date, self.config.trend_months)
            .map_err(storage_failure)?;
        Ok(Metrics::new(summary, trend))
    }

    /// Answer a question about the current month
    pub fn ask(&self, user_id: i64, message: &str) -> Result<AssistantReply> {
        self.ask_on(user_id, message, Local::now().date_naive())
    }

    /// Answer a question using `reference_date` as "now"
    pub fn ask_on(
        &self,
        user_id: i64,
        message: &str,
        reference_date: NaiveDate,
    ) -> Result<AssistantReply> {
        if message.trim().is_empty() {
            return Err(Error::Validation("Message is required".to_string()));
        }

        let metrics = self.compute_metrics(user_id, reference_date)?;
        let intent = self.classifier_for(&metrics).classify(message);
        debug!(user_id, intent = %intent, "Classified message");

        let response = self
            .synthesizer
            .render(&intent, &metrics)
            .map_err(storage_failure)?;

        self.store
            .append_chat_entry(user_id, message, &response)
            .map_err(storage_failure)?;
        info!(user_id, intent = intent.label(), "Answered assistant query");

        Ok(AssistantReply {
            response,
            data: metrics.summary,
        })
    }

    /// Classify without touching the chat log
    pub fn classify(&self, user_id: i64, message: &str, reference_date: NaiveDate) -> Result<Intent> {
        let metrics = self.compute_metrics(user_id, reference_date)?;
        Ok(self.classifier_for(&metrics).classify(message))
    }

    /// Configured keywords first, then the user's own categories for the month
    fn classifier_for(&self, metrics: &Metrics) -> IntentClassifier {
        let classifier = IntentClassifier::new(&self.config.category_keywords);
        if !self.config.include_user_categories {
            return classifier;
        }
        classifier.with_user_categories(
            metrics
                .summary
                .category_totals
                .iter()
                .map(|c| c.category.as_str()),
        )
    }
}

/// Collapse any failure past input validation into a generic storage error
fn storage_failure(err: Error) -> Error {
    match err {
        Error::Storage(_) => err,
        other => {
            error!(error = %other, "Assistant query failed");
            Error::Storage("Failed to process assistant query".to_string())
        }
    }
}
