//! Defines the endpoint for deleting an expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::Redirect,
};
use axum_extra::extract::PrivateCookieJar;
use rusqlite::Connection;

use crate::{
    AppState, Error, alert::Alert, database_id::ExpenseId, endpoints, expense::delete_expense,
    flash::set_flash,
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense, redirects to the expenses page.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no expense with `expense_id`.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    jar: PrivateCookieJar,
    Path(expense_id): Path<ExpenseId>,
) -> Result<(PrivateCookieJar, Redirect), Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match delete_expense(expense_id, &connection) {
        Ok(0) => {
            tracing::debug!("Tried to delete missing expense {expense_id}");
            Err(Error::NotFound)
        }
        Ok(_) => {
            let jar = set_flash(jar, &Alert::success("Expense deleted"))?;
            Ok((jar, Redirect::to(endpoints::ROOT)))
        }
        Err(error) => {
            tracing::error!("Could not delete expense {expense_id}: {error}");
            Err(error)
        }
    }
}
