//! Domain models for Penny

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned to anything that hasn't been categorized yet
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Store name used when a receipt or transaction has none
pub const UNKNOWN_STORE: &str = "Unknown Store";

/// Categories seeded into an empty database
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Utilities",
    "Entertainment",
    "Health",
    "Shopping",
    "Housing",
    "Education",
];

/// A recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub store_name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Store name for display, falling back to "Unknown Store"
    pub fn store_display(&self) -> &str {
        self.store_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(UNKNOWN_STORE)
    }
}

/// New transaction to insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub category: String,
    pub store_name: Option<String>,
    pub description: Option<String>,
    /// Creation time; the database clock is used when absent
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTransaction {
    pub fn new(amount: f64, category: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            store_name: None,
            description: None,
            created_at: None,
        }
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store_name = Some(store.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Budget period label
///
/// Only descriptive: budget status always compares against lifetime spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Weekly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
        }
    }
}

impl std::str::FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "weekly" | "week" => Ok(Self::Weekly),
            _ => Err(format!("Unknown budget period: {}", s)),
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single spending limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub limit_amount: f64,
    pub period: BudgetPeriod,
}

/// A category name and its display color
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// Summed spending for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Outcome of a filtered spending sum
///
/// Keeps "nothing matched the filter" apart from "matching rows sum to zero",
/// which a bare number can't express.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpendLookup {
    /// No transaction matched the filter
    NotFound,
    /// Matching transactions exist but sum to zero
    FoundZero,
    /// Matching transactions sum to a non-zero amount
    Found(f64),
}

impl SpendLookup {
    /// Whether any transaction matched
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// The summed amount (zero when nothing matched)
    pub fn amount(&self) -> f64 {
        match self {
            Self::Found(amount) => *amount,
            Self::NotFound | Self::FoundZero => 0.0,
        }
    }
}

impl From<Option<f64>> for SpendLookup {
    /// Build from a SQL `SUM`, which is NULL when no rows matched
    fn from(sum: Option<f64>) -> Self {
        match sum {
            None => Self::NotFound,
            Some(total) if total == 0.0 => Self::FoundZero,
            Some(total) => Self::Found(total),
        }
    }
}

/// Fields pulled out of a receipt image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptExtraction {
    /// Raw OCR text (empty when recognition failed)
    pub text: String,
    /// Detected total, 0.0 when none was found
    pub amount: f64,
    pub store_name: String,
    /// Always "Uncategorized"; receipts are never categorized automatically
    pub category: String,
}

impl ReceiptExtraction {
    /// Extraction result for an unreadable receipt
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            amount: 0.0,
            store_name: UNKNOWN_STORE.to_string(),
            category: UNCATEGORIZED.to_string(),
        }
    }

    /// Turn the extraction into a transaction to record
    pub fn to_new_transaction(&self, category: Option<&str>) -> NewTransaction {
        let mut tx = NewTransaction::new(self.amount, category.unwrap_or(&self.category))
            .with_description("Scanned receipt");
        if self.store_name != UNKNOWN_STORE {
            tx = tx.with_store(self.store_name.clone());
        }
        tx
    }
}
