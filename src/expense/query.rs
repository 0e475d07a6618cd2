//! Database queries for the expenses page.
//!
//! The list, the two aggregates and the total are all derived from a single
//! WHERE clause, [FILTER_PREDICATE], so they always agree on which expenses
//! are included.

use rusqlite::{Connection, named_params};

use crate::{
    Error,
    expense::{Expense, ExpenseFilter, core::map_expense_row},
};

/// Matches expenses against an [ExpenseFilter], a NULL parameter matches everything.
const FILTER_PREDICATE: &str = "(:start IS NULL OR date >= :start) \
    AND (:end IS NULL OR date <= :end) \
    AND (:category IS NULL OR category = :category)";

/// Sums of expense amounts grouped by some key, as parallel sequences for charting.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Aggregate {
    /// The group keys, e.g. category names or dates.
    pub labels: Vec<String>,
    /// The total amount for each label, rounded to cents.
    pub values: Vec<f64>,
}

/// Everything the expenses page shows for one filter.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseReport {
    /// Matching expenses, newest first.
    pub expenses: Vec<Expense>,
    /// Total spent per category, in category name order.
    pub by_category: Aggregate,
    /// Total spent per day, oldest day first.
    pub by_day: Aggregate,
    /// Total spent across all matching expenses, rounded to cents.
    pub total: f64,
}

/// Round `amount` to two decimal places.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Get the expenses matching `filter` along with their totals.
///
/// # Errors
/// Returns [Error::SqlError] if any of the queries fail.
pub fn query_expenses(filter: &ExpenseFilter, connection: &Connection) -> Result<ExpenseReport, Error> {
    let expenses = get_filtered_expenses(filter, connection)?;
    let by_category = aggregate(
        &format!(
            "SELECT category, SUM(amount) FROM expense WHERE {FILTER_PREDICATE} \
            GROUP BY category ORDER BY category ASC"
        ),
        filter,
        connection,
    )?;
    let by_day = aggregate(
        &format!(
            "SELECT date, SUM(amount) FROM expense WHERE {FILTER_PREDICATE} \
            GROUP BY date ORDER BY date ASC"
        ),
        filter,
        connection,
    )?;
    let total = round_to_cents(expenses.iter().map(|expense| expense.amount).sum());

    Ok(ExpenseReport {
        expenses,
        by_category,
        by_day,
        total,
    })
}

/// Get the expenses matching `filter`, sorted by date and then ID, newest first.
fn get_filtered_expenses(
    filter: &ExpenseFilter,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let query = format!(
        "SELECT id, description, amount, category, date FROM expense \
        WHERE {FILTER_PREDICATE} \
        ORDER BY date DESC, id DESC"
    );

    connection
        .prepare(&query)?
        .query_map(
            named_params! {
                ":start": filter.start,
                ":end": filter.end,
                ":category": filter.category.as_deref(),
            },
            map_expense_row,
        )?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Run a `SELECT key, SUM(amount)` query filtered by `filter`.
fn aggregate(
    query: &str,
    filter: &ExpenseFilter,
    connection: &Connection,
) -> Result<Aggregate, Error> {
    let rows = connection
        .prepare(query)?
        .query_map(
            named_params! {
                ":start": filter.start,
                ":end": filter.end,
                ":category": filter.category.as_deref(),
            },
            |row| Ok((row.get::<usize, String>(0)?, row.get::<usize, f64>(1)?)),
        )?
        .collect::<Result<Vec<_>, _>>()?;

    let (labels, values): (Vec<String>, Vec<f64>) = rows
        .into_iter()
        .map(|(label, sum)| (label, round_to_cents(sum)))
        .unzip();

    Ok(Aggregate { labels, values })
}
