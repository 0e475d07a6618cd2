//! Defines the route handler for the expenses page.
use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
// axum_extra's Query tolerates repeated parameters, see [FilterQuery].
use axum_extra::extract::{PrivateCookieJar, Query};
use maud::Markup;
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    alert::Alert,
    expense::{
        CATEGORIES, ExpenseFilter, ExpenseReport, FilterError, FilterQuery, query_expenses,
        view::expenses_view,
    },
    flash::take_flash,
    timezone::local_today,
};

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The database connection for reading expenses.
    db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Everything needed to render the expenses page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpensePageData {
    /// The filtered expenses, aggregates and total.
    pub report: ExpenseReport,
    /// The filter that was actually applied.
    pub filter: ExpenseFilter,
    /// Set when the requested filter could not be applied.
    pub filter_error: Option<FilterError>,
    /// The categories to offer in the forms.
    pub categories: &'static [&'static str],
    /// The default date for new expenses.
    pub today: Date,
}

/// Parse the filter from `query` and load the matching expenses.
///
/// # Errors
/// Returns [Error::SqlError] if the expenses could not be queried.
pub fn load_expense_page(
    query: &FilterQuery,
    today: Date,
    connection: &Connection,
) -> Result<ExpensePageData, Error> {
    let (filter, filter_error) = ExpenseFilter::from_query(query);
    let report = query_expenses(&filter, connection)
        .inspect_err(|error| tracing::error!("Could not query expenses: {error}"))?;

    Ok(ExpensePageData {
        report,
        filter,
        filter_error,
        categories: &CATEGORIES,
        today,
    })
}

/// Render the expenses page: add form, filters, totals, charts and the expense table.
///
/// Any status message left by the previous request is displayed and cleared.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    jar: PrivateCookieJar,
    Query(query): Query<FilterQuery>,
) -> Result<(PrivateCookieJar, Markup), Error> {
    let today = local_today(&state.local_timezone)?;

    let data = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        load_expense_page(&query, today, &connection)?
    };

    let (jar, flash) = take_flash(jar);
    let alerts: Vec<Alert> = flash
        .into_iter()
        .chain(
            data.filter_error
                .as_ref()
                .map(|error| Alert::error(error.to_string())),
        )
        .collect();

    Ok((jar, expenses_view(&data, alerts)))
}
