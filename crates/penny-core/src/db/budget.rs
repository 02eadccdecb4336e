//! Budget operations
//!
//! A single budget row is assumed; setting a budget overwrites it.

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetPeriod};

impl Database {
    /// Get the budget, if one has been set
    pub fn get_budget(&self) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, limit_amount, period FROM budgets ORDER BY id LIMIT 1",
                [],
                |row| {
                    let period: String = row.get(2)?;
                    Ok(Budget {
                        id: row.get(0)?,
                        limit_amount: row.get(1)?,
                        period: period.parse().unwrap_or_default(),
                    })
                },
            )
            .optional()?;
        Ok(budget)
    }

    /// Create the budget, or update it if one already exists
    pub fn set_budget(&self, limit_amount: f64, period: BudgetPeriod) -> Result<Budget> {
        if !limit_amount.is_finite() || limit_amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Budget limit must be a non-negative number, got {}",
                limit_amount
            )));
        }

        let existing = self.get_budget()?;
        let conn = self.conn()?;

        let id = match existing {
            Some(budget) => {
                conn.execute(
                    "UPDATE budgets SET limit_amount = ?1, period = ?2 WHERE id = ?3",
                    params![limit_amount, period.as_str(), budget.id],
                )?;
                budget.id
            }
            None => {
                conn.execute(
                    "INSERT INTO budgets (limit_amount, period) VALUES (?1, ?2)",
                    params![limit_amount, period.as_str()],
                )?;
                conn.last_insert_rowid()
            }
        };

        Ok(Budget {
            id,
            limit_amount,
            period,
        })
    }
}
