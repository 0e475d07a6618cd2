//! Defines the endpoint for creating a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Redirect,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::{Form, PrivateCookieJar};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    expense::{ExpenseForm, create_expense},
    flash::set_flash,
    timezone::local_today,
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new expense, redirects to the expenses page.
///
/// Invalid forms are not saved, the reason is shown on the expenses page instead.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    jar: PrivateCookieJar,
    Form(form): Form<ExpenseForm>,
) -> Result<(PrivateCookieJar, Redirect), Error> {
    let today = local_today(&state.local_timezone)?;

    let alert = match form.validate(today) {
        Ok(new_expense) => {
            let connection = state
                .db_connection
                .lock()
                .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
                .map_err(|_| Error::DatabaseLockError)?;

            let expense = create_expense(new_expense, &connection)
                .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;
            tracing::debug!("Created expense {}", expense.id);

            Alert::success("Expense added")
        }
        Err(error) => {
            tracing::debug!("Rejected expense form: {error}");
            Alert::error(error.to_string())
        }
    };

    let jar = set_flash(jar, &alert)?;

    Ok((jar, Redirect::to(endpoints::ROOT)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::{Form, PrivateCookieJar};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        alert::Alert,
        app_state::create_cookie_key,
        db::initialize,
        expense::{
            ExpenseForm, count_expenses,
            create_endpoint::{CreateExpenseState, create_expense_endpoint},
            get_expense,
        },
        flash::take_flash,
        test_utils::get_header,
        timezone::local_today,
    };

    fn get_test_state() -> CreateExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn get_jar() -> PrivateCookieJar {
        PrivateCookieJar::new(create_cookie_key("test secret"))
    }

    fn form(description: &str, amount: &str, category: &str, date: &str) -> ExpenseForm {
        ExpenseForm {
            description: description.to_owned(),
            amount: amount.to_owned(),
            category: category.to_owned(),
            date: date.to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_expense() {
        let state = get_test_state();

        let (jar, redirect) = create_expense_endpoint(
            State(state.clone()),
            get_jar(),
            Form(form("Groceries", "42.10", "Food", "2025-03-01")),
        )
        .await
        .unwrap();

        let response = redirect.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), "/");
        assert_eq!(take_flash(jar).1, Some(Alert::success("Expense added")));

        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(1, &connection).unwrap();
        assert_eq!(expense.description, "Groceries");
        assert_eq!(expense.amount, 42.10);
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.date, date!(2025 - 03 - 01));
    }

    #[tokio::test]
    async fn empty_date_uses_today() {
        let state = get_test_state();

        create_expense_endpoint(
            State(state.clone()),
            get_jar(),
            Form(form("Bus", "3.50", "Transport", "")),
        )
        .await
        .unwrap();

        let today = local_today("Etc/UTC").unwrap();
        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(1, &connection).unwrap();
        // Guard against the test straddling midnight.
        assert!(expense.date == today || expense.date.next_day() == Some(today));
    }

    #[tokio::test]
    async fn rejects_negative_amount() {
        let state = get_test_state();

        let (jar, _) = create_expense_endpoint(
            State(state.clone()),
            get_jar(),
            Form(form("Refund", "-5", "Other", "")),
        )
        .await
        .unwrap();

        assert_eq!(
            take_flash(jar).1,
            Some(Alert::error("Amount must be a positive number"))
        );
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_non_numeric_amount() {
        let state = get_test_state();

        let (jar, _) = create_expense_endpoint(
            State(state.clone()),
            get_jar(),
            Form(form("Lunch", "abc", "Food", "")),
        )
        .await
        .unwrap();

        assert_eq!(
            take_flash(jar).1,
            Some(Alert::error("Amount must be a positive number"))
        );
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_missing_fields() {
        let state = get_test_state();

        let (jar, _) = create_expense_endpoint(
            State(state.clone()),
            get_jar(),
            Form(form("  ", "10", "Food", "")),
        )
        .await
        .unwrap();

        assert_eq!(
            take_flash(jar).1,
            Some(Alert::error("Please fill description, amount, and category"))
        );
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }
}
