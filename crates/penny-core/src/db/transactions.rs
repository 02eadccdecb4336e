//! Transaction operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row, ToSql};

use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, UNCATEGORIZED};

/// Columns selected by every transaction query, in `row_to_transaction` order
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, amount, category, store_name, description, created_at";

/// Map a row selected with `TRANSACTION_COLUMNS`
pub(crate) fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let created_at: String = row.get(5)?;
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        store_name: row.get(3)?,
        description: row.get(4)?,
        created_at: parse_datetime(&created_at),
    })
}

/// Validate a transaction and return its (category, store) as stored
fn normalized_fields(tx: &NewTransaction) -> Result<(&str, Option<&str>)> {
    if !tx.amount.is_finite() {
        return Err(Error::InvalidData(format!(
            "Transaction amount must be a finite number, got {}",
            tx.amount
        )));
    }

    let category = tx.category.trim();
    let category = if category.is_empty() {
        UNCATEGORIZED
    } else {
        category
    };
    let store_name = tx
        .store_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    Ok((category, store_name))
}

/// Start of `date` in stored datetime form
fn day_start(date: NaiveDate) -> String {
    format!("{} 00:00:00", date.format("%Y-%m-%d"))
}

impl Database {
    /// Insert a transaction, returning its ID
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let (category, store_name) = normalized_fields(tx)?;

        let conn = self.conn()?;
        match &tx.created_at {
            Some(created_at) => conn.execute(
                r#"
                INSERT INTO transactions (amount, category, store_name, description, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    tx.amount,
                    category,
                    store_name,
                    tx.description,
                    format_datetime(created_at),
                ],
            )?,
            None => conn.execute(
                r#"
                INSERT INTO transactions (amount, category, store_name, description)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![tx.amount, category, store_name, tx.description],
            )?,
        };

        Ok(conn.last_insert_rowid())
    }

    /// Replace a transaction's amount, category, store and description
    ///
    /// `created_at` is kept unless `tx` carries one.
    pub fn update_transaction(&self, id: i64, tx: &NewTransaction) -> Result<Transaction> {
        let (category, store_name) = normalized_fields(tx)?;

        let conn = self.conn()?;
        let updated = conn.execute(
            r#"
            UPDATE transactions
            SET amount = ?1, category = ?2, store_name = ?3, description = ?4,
                created_at = COALESCE(?5, created_at)
            WHERE id = ?6
            "#,
            params![
                tx.amount,
                category,
                store_name,
                tx.description,
                tx.created_at.as_ref().map(format_datetime),
                id,
            ],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("transaction {}", id)));
        }
        drop(conn);

        self.get_transaction(id)?
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))
    }

    /// Delete a transaction
    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("transaction {}", id)));
        }
        Ok(())
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ?1",
                    TRANSACTION_COLUMNS
                ),
                params![id],
                row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// List transactions, newest first
    pub fn list_transactions(&self, limit: i64, offset: i64) -> Result<Vec<Transaction>> {
        self.list_transactions_between(None, None, limit, offset)
    }

    /// List transactions made on or after `since` and on or before `until`
    /// (whole days, inclusive), newest first
    pub fn list_transactions_between(
        &self,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>> {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(since) = since {
            conditions.push("created_at >= ?");
            params.push(Box::new(day_start(since)));
        }
        if let Some(until) = until {
            match until.succ_opt() {
                Some(next_day) => {
                    conditions.push("created_at < ?");
                    params.push(Box::new(day_start(next_day)));
                }
                None => {
                    conditions.push("created_at <= ?");
                    params.push(Box::new(format!("{} 23:59:59", until.format("%Y-%m-%d"))));
                }
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        params.push(Box::new(limit));
        params.push(Box::new(offset));

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions {} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            TRANSACTION_COLUMNS, where_clause
        ))?;

        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let transactions = stmt
            .query_map(param_refs.as_slice(), row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count all transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }
}
