//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{Error, database_id::ExpenseId};

// ============================================================================
// MODELS
// ============================================================================

/// The categories offered in the add and filter forms.
///
/// Not enforced by the database, any non-empty category is stored as given.
pub const CATEGORIES: [&str; 4] = ["Food", "Transport", "Events", "Other"];

/// The max number of characters in an expense description.
pub const MAX_DESCRIPTION_LENGTH: usize = 150;

/// The max number of characters in an expense category.
pub const MAX_CATEGORY_LENGTH: usize = 50;

/// The largest amount a single expense may have.
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Money spent on something.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// How much was spent, always greater than zero.
    pub amount: f64,
    /// The category of the expense, e.g. "Food".
    pub category: String,
    /// When the money was spent.
    pub date: Date,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [NewExpense] for discoverability.
    pub fn build(description: &str, amount: f64, category: &str, date: Date) -> NewExpense {
        NewExpense {
            description: description.to_owned(),
            amount,
            category: category.to_owned(),
            date,
        }
    }
}

/// An expense that has not been saved to the database yet.
///
/// Request handlers should only construct this from a validated form, see
/// [crate::expense::ExpenseForm::validate].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// What the money was spent on.
    pub description: String,
    /// How much was spent.
    pub amount: f64,
    /// The category of the expense.
    pub category: String,
    /// When the money was spent.
    pub date: Date,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expense (description, amount, category, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, description, amount, category, date",
        )?
        .query_row(
            (
                new_expense.description,
                new_expense.amount,
                new_expense.category,
                new_expense.date,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
#[cfg(test)]
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, description, amount, category, date FROM expense WHERE id = :id")?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// The number of rows changed by a statement.
pub type RowsAffected = usize;

/// Delete the expense with `id`.
///
/// Returns the number of rows deleted, zero means there was no expense with that ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database if it does not exist.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Covers the date range and category filters on the expenses page.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date_category ON expense(date, category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let date = row.get(4)?;

    Ok(Expense {
        id,
        description,
        amount,
        category,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
