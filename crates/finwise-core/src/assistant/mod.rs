//! Financial query/insight engine
//!
//! Answers natural-language questions about a user's finances:
//! - Metric Aggregator: per-category and overall totals for the reference month
//! - Trend Builder: monthly totals over a trailing window, plus a next-month estimate
//! - Intent Classifier: ordered keyword rules, first match wins
//! - Response Synthesizer: tiered plain-text answers
//! - Query Orchestrator: runs the pipeline and logs the exchange
//!
//! Storage is reached only through the [`FinanceStore`] trait.

pub mod engine;
pub mod intent;
pub mod metrics;
pub mod response;
pub mod store;
pub mod trend;

pub use engine::{Assistant, AssistantReply};
pub use intent::{Intent, IntentClassifier};
pub use metrics::{aggregate_month, category_totals, Metrics, MonthlySummary};
pub use response::{format_money, format_percent, ResponseSynthesizer};
pub use store::FinanceStore;
pub use trend::{build_trend, predict_next_month};
