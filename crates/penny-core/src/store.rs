//! Read-only spending queries used to answer questions
//!
//! [`Database`](crate::db::Database) is the production implementation. The
//! query engine only depends on this trait so tests can swap in fakes.

use crate::error::Result;
use crate::models::{Budget, CategoryTotal, SpendLookup, Transaction};

pub trait SpendingStore: Send + Sync {
    /// Sum of all transaction amounts (0 when there are none)
    fn total_spent(&self) -> Result<f64>;

    /// Sum for transactions whose category equals `name` (case-insensitive)
    fn category_total_exact(&self, name: &str) -> Result<SpendLookup>;

    /// Sum for transactions whose category contains `fragment` (case-insensitive)
    fn category_total_containing(&self, fragment: &str) -> Result<SpendLookup>;

    /// Sum for transactions whose store name contains `fragment` (case-insensitive)
    fn store_total_containing(&self, fragment: &str) -> Result<SpendLookup>;

    /// The single largest expense
    fn largest_expense(&self) -> Result<Option<Transaction>>;

    /// The category with the greatest summed spending
    fn top_category(&self) -> Result<Option<CategoryTotal>>;

    /// Most recent transactions, newest first
    fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>>;

    /// Known category names
    fn category_names(&self) -> Result<Vec<String>>;

    /// The configured budget, if any
    fn budget(&self) -> Result<Option<Budget>>;
}
