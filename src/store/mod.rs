//! SQLite-backed expense store.
//!
//! One connection is opened at startup and shared behind a mutex; the table is
//! created if absent at the same time. Every operation is a single
//! parameterized statement, so no explicit transactions are needed.

mod models;
mod schema;

use rusqlite::types::ToSql;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::types::{Error, Result};

pub use models::{CategoryTotal, DateRange, Expense, NewExpense, RecordOutcome, SummaryFilter};

/// Owner of the `expenses` table.
#[derive(Debug)]
pub struct ExpenseStore {
    conn: Mutex<Connection>,
}

impl ExpenseStore {
    /// Open (or create) the database file and bootstrap the schema.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::info!(path = %path.display(), journal_mode = %mode, "expense store opened");
        Self::bootstrap(conn)
    }

    /// Open a private in-memory database. Used by tests and throwaway servers.
    pub fn open_in_memory() -> Result<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.execute_batch(schema::CREATE_EXPENSES)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::internal("expense store connection lock poisoned"))
    }

    /// Append one expense and return the id SQLite assigned to it.
    pub fn record(&self, expense: &NewExpense) -> Result<RecordOutcome> {
        let conn = self.conn()?;
        conn.execute(
            schema::INSERT_EXPENSE,
            params![
                expense.date,
                expense.amount,
                expense.category,
                expense.subcategory,
                expense.note,
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, date = %expense.date, category = %expense.category, "expense recorded");
        Ok(RecordOutcome::ok(id))
    }

    /// Expenses whose date falls in the range, in insertion order.
    pub fn query(&self, range: &DateRange) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(schema::SELECT_RANGE)?;
        let rows = stmt.query_map(params![range.start_date, range.end_date], expense_from_row)?;
        let expenses = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(expenses)
    }

    /// Per-category totals in range, sorted by category name.
    pub fn summarize(&self, filter: &SummaryFilter) -> Result<Vec<CategoryTotal>> {
        let category = filter.category_filter();
        let mut sql = String::from(schema::SUMMARIZE_RANGE);
        let mut bound: Vec<&dyn ToSql> = vec![&filter.start_date, &filter.end_date];

        if let Some(category) = category.as_ref() {
            sql.push_str(schema::SUMMARIZE_CATEGORY_CLAUSE);
            bound.push(category);
        }
        sql.push_str(schema::SUMMARIZE_TAIL);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(bound.as_slice(), |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total_amount: row.get(1)?,
            })
        })?;
        let totals = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(totals)
    }
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        date: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        subcategory: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        note: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}
