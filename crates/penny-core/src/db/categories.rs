//! Category vocabulary operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Category, DEFAULT_CATEGORIES};

/// Color given to categories created without one
pub const DEFAULT_CATEGORY_COLOR: &str = "blue";

impl Database {
    /// List all categories, alphabetically
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, color FROM categories ORDER BY name COLLATE NOCASE")?;

        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    color: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Look up a category by name (case-insensitive)
    pub fn get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name, color FROM categories WHERE fold_case(name) = fold_case(?1)",
                params![name.trim()],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        color: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(category)
    }

    /// Create a category, returning its ID
    pub fn create_category(&self, name: &str, color: Option<&str>) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Category name cannot be empty".into()));
        }
        if self.get_category_by_name(name)?.is_some() {
            return Err(Error::InvalidData(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO categories (name, color) VALUES (?1, ?2)",
            params![name, color.unwrap_or(DEFAULT_CATEGORY_COLOR)],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Seed the default categories if none exist
    ///
    /// Returns the number of categories inserted.
    pub fn seed_default_categories(&self) -> Result<usize> {
        let conn = self.conn()?;
        let existing: i64 =
            conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        for name in DEFAULT_CATEGORIES {
            conn.execute(
                "INSERT INTO categories (name, color) VALUES (?1, ?2)",
                params![name, DEFAULT_CATEGORY_COLOR],
            )?;
        }

        info!(count = DEFAULT_CATEGORIES.len(), "Seeded default categories");
        Ok(DEFAULT_CATEGORIES.len())
    }
}
