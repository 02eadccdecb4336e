//! Aggregate spending queries

use rusqlite::{params, OptionalExtension};

use super::transactions::{row_to_transaction, TRANSACTION_COLUMNS};
use super::Database;
use crate::error::Result;
use crate::models::{Budget, CategoryTotal, SpendLookup, Transaction};
use crate::store::SpendingStore;

impl Database {
    /// Run a `SELECT SUM(amount) ...` query with one text parameter
    ///
    /// SQLite returns NULL for a SUM over zero rows, which maps to `NotFound`.
    fn sum_where(&self, sql: &str, param: &str) -> Result<SpendLookup> {
        let conn = self.conn()?;
        let sum: Option<f64> = conn.query_row(sql, params![param], |row| row.get(0))?;
        Ok(SpendLookup::from(sum))
    }
}

impl SpendingStore for Database {
    fn total_spent(&self) -> Result<f64> {
        let conn = self.conn()?;
        let total: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn category_total_exact(&self, name: &str) -> Result<SpendLookup> {
        self.sum_where(
            "SELECT SUM(amount) FROM transactions WHERE fold_case(category) = fold_case(?1)",
            name,
        )
    }

    fn category_total_containing(&self, fragment: &str) -> Result<SpendLookup> {
        // instr() rather than LIKE so '_' and '%' in the fragment are literal
        self.sum_where(
            "SELECT SUM(amount) FROM transactions WHERE instr(fold_case(category), fold_case(?1)) > 0",
            fragment,
        )
    }

    fn store_total_containing(&self, fragment: &str) -> Result<SpendLookup> {
        self.sum_where(
            "SELECT SUM(amount) FROM transactions WHERE instr(fold_case(store_name), fold_case(?1)) > 0",
            fragment,
        )
    }

    fn largest_expense(&self) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions ORDER BY amount DESC, id ASC LIMIT 1",
                    TRANSACTION_COLUMNS
                ),
                [],
                row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    fn top_category(&self) -> Result<Option<CategoryTotal>> {
        let conn = self.conn()?;
        let top = conn
            .query_row(
                r#"
                SELECT category, SUM(amount) AS total
                FROM transactions
                GROUP BY fold_case(category)
                ORDER BY total DESC
                LIMIT 1
                "#,
                [],
                |row| {
                    Ok(CategoryTotal {
                        category: row.get(0)?,
                        total: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(top)
    }

    fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>> {
        self.list_transactions(limit as i64, 0)
    }

    fn category_names(&self) -> Result<Vec<String>> {
        Ok(self
            .list_categories()?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    fn budget(&self) -> Result<Option<Budget>> {
        self.get_budget()
    }
}
