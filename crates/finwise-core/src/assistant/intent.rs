//! Intent Classification using ordered keyword rules.
//!
//! Matching is literal substring search on the lower-cased message: no
//! tokenization, stemming or negation handling. Rules are evaluated top to
//! bottom and the first match wins, so "is my budget going to last, can you
//! predict it?" is a budget question, not a prediction.
//!
//! Categories taken from a user's own records are the exception: they only
//! match as whole words, and any that overlap a rule keyword are ignored, so
//! a "Car" category does not fire on "card" and a "Budget" category cannot
//! shadow the budget rule.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the user is asking about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "intent", content = "category")]
pub enum Intent {
    /// "How much did I spend on food?"; carries the matched keyword
    SpendOnCategory(String),
    /// Budget usage and remaining amount
    BudgetStatus,
    /// Highest-spending category
    TopCategory,
    /// Total spending this month
    TotalSpending,
    /// Next-month estimate from the trend
    Prediction,
    /// Income minus expenses
    IncomeVsExpense,
    /// Advisory sentences
    Recommendation,
    /// Fallback summary and usage hint
    Help,
}

impl Intent {
    /// Returns a stable label for logging
    pub fn label(&self) -> &'static str {
        match self {
            Intent::SpendOnCategory(_) => "spend_on_category",
            Intent::BudgetStatus => "budget_status",
            Intent::TopCategory => "top_category",
            Intent::TotalSpending => "total_spending",
            Intent::Prediction => "prediction",
            Intent::IncomeVsExpense => "income_vs_expense",
            Intent::Recommendation => "recommendation",
            Intent::Help => "help",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::SpendOnCategory(category) => write!(f, "{}({})", self.label(), category),
            _ => write!(f, "{}", self.label()),
        }
    }
}

type Matcher = fn(&str) -> bool;

fn contains_any(message: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| message.contains(n))
}

fn is_budget_status(m: &str) -> bool {
    contains_any(m, &["budget", "on track"])
}

fn is_top_category(m: &str) -> bool {
    m.contains("category") && contains_any(m, &["most", "highest"])
}

fn is_total_spending(m: &str) -> bool {
    m.contains("total") || (m.contains("how much") && m.contains("spend"))
}

fn is_prediction(m: &str) -> bool {
    contains_any(m, &["predict", "next month"])
}

fn is_income_vs_expense(m: &str) -> bool {
    contains_any(m, &["income", "saving"])
}

fn is_recommendation(m: &str) -> bool {
    contains_any(m, &["recommend", "suggestion", "advice"])
}

/// Every keyword the fixed rules and the category rule look for
const RULE_KEYWORDS: [&str; 15] = [
    "budget",
    "on track",
    "category",
    "most",
    "highest",
    "total",
    "how much",
    "spend",
    "predict",
    "next month",
    "income",
    "saving",
    "recommend",
    "suggestion",
    "advice",
];

/// True when `word` occurs in `text` with no letter or digit on either side
fn contains_word(text: &str, word: &str) -> bool {
    text.match_indices(word).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn overlaps_rule_keyword(category: &str) -> bool {
    RULE_KEYWORDS
        .iter()
        .any(|rule| category.contains(rule) || contains_word(rule, category))
}

/// Fixed rules evaluated after the category rule, in order
static RULES: [(Matcher, Intent); 6] = [
    (is_budget_status, Intent::BudgetStatus),
    (is_top_category, Intent::TopCategory),
    (is_total_spending, Intent::TotalSpending),
    (is_prediction, Intent::Prediction),
    (is_income_vs_expense, Intent::IncomeVsExpense),
    (is_recommendation, Intent::Recommendation),
];

/// Keyword classifier; total over all inputs (`Help` is the fallback)
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    /// Lower-cased category keywords, checked in order
    categories: Vec<String>,
    /// Lower-cased user categories, checked after `categories` as whole words
    user_categories: Vec<String>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(["food", "transport"])
    }
}

impl IntentClassifier {
    /// Build a classifier recognising the given category keywords
    ///
    /// Keywords are lower-cased; blanks and duplicates are dropped.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<String> = Vec::new();
        for category in categories {
            let keyword = category.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        Self {
            categories: keywords,
            user_categories: Vec::new(),
        }
    }

    /// Also recognise categories from the user's own records
    ///
    /// Blanks, duplicates and categories overlapping a rule keyword are dropped.
    pub fn with_user_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for category in categories {
            let keyword = category.as_ref().trim().to_lowercase();
            if keyword.is_empty()
                || self.categories.contains(&keyword)
                || self.user_categories.contains(&keyword)
                || overlaps_rule_keyword(&keyword)
            {
                continue;
            }
            self.user_categories.push(keyword);
        }
        self
    }

    /// Configured category keywords, in match order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// User categories accepted by [`Self::with_user_categories`], in match order
    pub fn user_categories(&self) -> &[String] {
        &self.user_categories
    }

    /// Classify a message
    pub fn classify(&self, message: &str) -> Intent {
        let message = message.to_lowercase();

        if message.contains("spend") {
            let configured = self.categories.iter().find(|c| message.contains(c.as_str()));
            let category = configured.or_else(|| {
                self.user_categories
                    .iter()
                    .find(|c| contains_word(&message, c))
            });
            if let Some(category) = category {
                return Intent::SpendOnCategory(category.clone());
            }
        }

        RULES
            .iter()
            .find(|(matches, _)| matches(&message))
            .map(|(_, intent)| intent.clone())
            .unwrap_or(Intent::Help)
    }
}
