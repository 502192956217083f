use crate::models::report::{ConsoleOutcome, TabularResult};
use crate::utils::error::{AppError, AppResult};
use crate::utils::tabular::rows_to_table;
use sqlx::{Executor, SqlitePool, Statement};
use std::sync::Arc;
use tokio::sync::Mutex;

// Statements whose result set is returned to the caller
const READ_PREFIXES: &[&str] = &["select", "with", "explain", "pragma", "show"];

/// Raw SQL executor for administrators.
#[derive(Clone)]
pub struct ConsoleService {
    pool: SqlitePool,
    history: Arc<Mutex<Vec<String>>>,
}

impl ConsoleService {
    pub fn new(pool: SqlitePool) -> Self {
        ConsoleService {
            pool,
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn execute(&self, sql: &str) -> AppResult<ConsoleOutcome> {
        let sql = self.accept(sql).await?;

        let outcome = if is_read_statement(sql) {
            self.fetch_table(sql).await.map(ConsoleOutcome::Rows)
        } else {
            sqlx::query(sql)
                .execute(&self.pool)
                .await
                .map(|result| ConsoleOutcome::Affected {
                    rows_affected: result.rows_affected(),
                })
        };

        outcome.map_err(console_error)
    }

    /// Run a read-only query and return its rows. Anything that is not a
    /// query is refused before it reaches the database, and the query runs
    /// in a transaction that is always rolled back.
    pub async fn query_rows(&self, sql: &str) -> AppResult<TabularResult> {
        let sql = self.accept(sql).await?;
        if !is_read_statement(sql) {
            return Err(AppError::BadRequest(
                "Only queries returning rows can be exported".into(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(console_error)?;
        let table = async {
            let statement = (&mut *tx).prepare(sql).await?;
            let rows = statement.query().fetch_all(&mut *tx).await?;
            Ok::<_, sqlx::Error>(rows_to_table(statement.columns(), &rows))
        }
        .await;
        tx.rollback().await.map_err(console_error)?;

        table.map_err(console_error)
    }

    async fn accept<'a>(&self, sql: &'a str) -> AppResult<&'a str> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(AppError::ValidationError("Enter an SQL statement".into()));
        }

        self.remember(sql).await;
        log::info!("Console statement: {}", sql);
        Ok(sql)
    }

    async fn fetch_table(&self, sql: &str) -> Result<TabularResult, sqlx::Error> {
        let statement = self.pool.prepare(sql).await?;
        let rows = statement.query().fetch_all(&self.pool).await?;
        Ok(rows_to_table(statement.columns(), &rows))
    }

    pub async fn history(&self) -> Vec<String> {
        self.history.lock().await.clone()
    }

    // Consecutive repeats are recorded once
    async fn remember(&self, sql: &str) {
        let mut history = self.history.lock().await;
        if history.last().map(String::as_str) != Some(sql) {
            history.push(sql.to_string());
        }
    }
}

fn console_error(e: sqlx::Error) -> AppError {
    log::warn!("Console statement failed: {}", e);
    AppError::BadRequest(e.to_string())
}

fn is_read_statement(sql: &str) -> bool {
    let first_word = sql
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    READ_PREFIXES.contains(&first_word.as_str())
}
