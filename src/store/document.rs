//! Document-store backend
//!
//! Persists each expense as a JSON document in the `expenses` collection of
//! the `budget` database. The database is a SQLite file and the collection is
//! a table keyed by the document's identifier; every single-record operation
//! is an equality filter on that key.

use super::{ExpenseStore, StoreError};
use crate::models::{Expense, ExpenseId};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Name of the database holding the expense collection
pub const DATABASE_NAME: &str = "budget";

/// Name of the collection expenses are stored in
pub const COLLECTION_NAME: &str = "expenses";

/// Expense store backed by a SQLite document collection
pub struct DocumentExpenseStore {
    pool: SqlitePool,
    queries: CollectionQueries,
}

/// Statements against the expense collection, filtered on `id`
struct CollectionQueries {
    find_one: String,
    find_all: String,
    insert_one: String,
    replace_one: String,
    delete_one: String,
}

impl CollectionQueries {
    fn new(collection: &str) -> Self {
        Self {
            find_one: format!("SELECT document FROM {} WHERE id = ?", collection),
            find_all: format!("SELECT document FROM {} ORDER BY rowid", collection),
            insert_one: format!("INSERT INTO {} (id, document) VALUES (?, ?)", collection),
            replace_one: format!("UPDATE {} SET document = ? WHERE id = ?", collection),
            delete_one: format!("DELETE FROM {} WHERE id = ?", collection),
        }
    }
}

impl DocumentExpenseStore {
    /// Open (creating if missing) the database and its expense collection
    ///
    /// # Arguments
    /// * `database_url` - SQLite file path, `sqlite:` URL, or `sqlite::memory:`
    ///
    /// # Returns
    /// * `Ok(DocumentExpenseStore)` if successful
    /// * `Err(StoreError)` if the connection or collection setup failed
    pub async fn open(database_url: &str) -> Result<Self, StoreError> {
        let path = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .unwrap_or(database_url);
        let in_memory = path.starts_with(":memory:");

        // Ensure parent directory exists
        if !in_memory {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(5);
        if in_memory {
            // Every connection to `:memory:` is a separate database
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;

        info!("Connected to {} database at: {}", DATABASE_NAME, path);

        let store = Self {
            pool,
            queries: CollectionQueries::new(COLLECTION_NAME),
        };
        store.ensure_collection().await?;

        Ok(store)
    }

    /// Default database file inside a data directory
    pub fn database_path(data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir.as_ref().join(format!("{}.db", DATABASE_NAME))
    }

    /// Create the expense collection if it does not exist yet
    async fn ensure_collection(&self) -> Result<(), StoreError> {
        let schema_sql = include_str!("../../migrations/001_create_expenses.sql")
            .replace("{collection}", COLLECTION_NAME);

        // Drop comments, then run each statement on its own
        let mut cleaned_sql = String::new();
        for line in schema_sql.lines() {
            let without_comments = match line.find("--") {
                Some(comment_pos) => &line[..comment_pos],
                None => line,
            };
            let trimmed = without_comments.trim();
            if trimmed.is_empty() {
                continue;
            }
            cleaned_sql.push_str(trimmed);
            cleaned_sql.push(' ');
        }

        for statement in cleaned_sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Collection '{}' ready", COLLECTION_NAME);
        Ok(())
    }

    fn encode(expense: &Expense) -> Result<String, StoreError> {
        Ok(serde_json::to_string(expense)?)
    }

    fn decode(document: &str) -> Result<Expense, StoreError> {
        Ok(serde_json::from_str(document)?)
    }
}

#[async_trait]
impl ExpenseStore for DocumentExpenseStore {
    async fn get(&self, id: ExpenseId) -> Result<Option<Expense>, StoreError> {
        let document =
            sqlx::query_scalar::<_, String>(&self.queries.find_one)
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        document.as_deref().map(Self::decode).transpose()
    }

    async fn list(&self) -> Result<Vec<Expense>, StoreError> {
        let documents =
            sqlx::query_scalar::<_, String>(&self.queries.find_all)
                .fetch_all(&self.pool)
                .await?;

        documents.iter().map(|d| Self::decode(d)).collect()
    }

    async fn create(&self, expense: &Expense) -> Result<(), StoreError> {
        let document = Self::encode(expense)?;
        sqlx::query(&self.queries.insert_one)
            .bind(expense.id.to_string())
            .bind(document)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let duplicate =
                    matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation());
                if duplicate {
                    StoreError::DuplicateId(expense.id)
                } else {
                    StoreError::Database(e)
                }
            })?;

        debug!("Created expense: {}", expense.id);
        Ok(())
    }

    async fn update(&self, expense: &Expense) -> Result<(), StoreError> {
        let document = Self::encode(expense)?;
        let result = sqlx::query(&self.queries.replace_one)
            .bind(document)
            .bind(expense.id.to_string())
            .execute(&self.pool)
            .await?;

        debug!(
            matched = result.rows_affected(),
            "Updated expense: {}", expense.id
        );
        Ok(())
    }

    async fn delete(&self, id: ExpenseId) -> Result<(), StoreError> {
        let result = sqlx::query(&self.queries.delete_one)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        debug!(matched = result.rows_affected(), "Deleted expense: {}", id);
        Ok(())
    }
}
