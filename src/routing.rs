//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    expense::{create_expense_endpoint, delete_expense_endpoint, get_expenses_page},
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_expenses_page))
        .route(endpoints::ADD_EXPENSE, post(create_expense_endpoint))
        .route(endpoints::DELETE_EXPENSE, post(delete_expense_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        AppState,
        endpoints::{self, format_endpoint},
        expense::{Expense, count_expenses, create_expense, get_expense},
        flash::COOKIE_FLASH,
        routing::build_router,
    };

    fn get_test_state() -> AppState {
        let conn = Connection::open_in_memory().expect("Could not open database in memory.");

        AppState::new(conn, "42", "Etc/UTC").expect("Could not create app state.")
    }

    fn get_test_server(state: AppState) -> TestServer {
        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn row_descriptions(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("tbody tr[data-expense-id] td:nth-child(2)").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn added_expense_shows_on_page_with_message() {
        let server = get_test_server(get_test_state());
        let form = [
            ("description", "Lunch"),
            ("amount", "12.50"),
            ("category", "Food"),
            ("date", "2024-01-05"),
        ];

        let response = server.post(endpoints::ADD_EXPENSE).form(&form).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::ROOT);
        let flash_cookie = response.cookie(COOKIE_FLASH);

        let response = server.get(endpoints::ROOT).add_cookie(flash_cookie).await;

        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert_eq!(row_descriptions(&html), vec!["Lunch".to_owned()]);
        let message = html
            .select(&Selector::parse("[role=status]").unwrap())
            .next()
            .expect("No status message found")
            .text()
            .collect::<String>();
        assert_eq!(message.trim(), "Expense added");
        let total = html
            .select(&Selector::parse("#total").unwrap())
            .next()
            .expect("No total found")
            .text()
            .collect::<String>();
        assert_eq!(total.trim(), "$12.50");
    }

    #[tokio::test]
    async fn invalid_amount_is_not_saved() {
        let state = get_test_state();
        let server = get_test_server(state.clone());
        let form = [
            ("description", "Lunch"),
            ("amount", "0"),
            ("category", "Food"),
            ("date", ""),
        ];

        let response = server.post(endpoints::ADD_EXPENSE).form(&form).await;

        response.assert_status_see_other();
        let flash_cookie = response.cookie(COOKIE_FLASH);
        let response = server.get(endpoints::ROOT).add_cookie(flash_cookie).await;
        let html = Html::parse_document(&response.text());
        let message = html
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("No error message found")
            .text()
            .collect::<String>();
        assert_eq!(message.trim(), "Amount must be a positive number");

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }

    #[tokio::test]
    async fn tiny_amounts_render_as_cents() {
        let server = get_test_server(get_test_state());
        let form = [
            ("description", "Gum"),
            ("amount", "0.004"),
            ("category", "Food"),
            ("date", "2024-01-05"),
        ];

        server
            .post(endpoints::ADD_EXPENSE)
            .form(&form)
            .await
            .assert_status_see_other();
        let response = server.get(endpoints::ROOT).await;

        let html = Html::parse_document(&response.text());
        let amounts: Vec<_> = html
            .select(&Selector::parse("tbody tr[data-expense-id] td:nth-child(4)").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(amounts, vec!["$0.00".to_owned()]);
        let total = html
            .select(&Selector::parse("#total").unwrap())
            .next()
            .expect("No total found")
            .text()
            .collect::<String>();
        assert_eq!(total.trim(), "$0.00");
    }

    #[tokio::test]
    async fn huge_amount_is_not_saved() {
        let state = get_test_state();
        let server = get_test_server(state.clone());
        let form = [
            ("description", "Yacht"),
            ("amount", "1e15"),
            ("category", "Other"),
            ("date", ""),
        ];

        let response = server.post(endpoints::ADD_EXPENSE).form(&form).await;

        response.assert_status_see_other();
        let flash_cookie = response.cookie(COOKIE_FLASH);
        let response = server.get(endpoints::ROOT).add_cookie(flash_cookie).await;
        let html = Html::parse_document(&response.text());
        let message = html
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("No error message found")
            .text()
            .collect::<String>();
        assert_eq!(message.trim(), "Amount must be at most $1,000,000,000");

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }

    #[tokio::test]
    async fn filters_by_query_string() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for (description, category, date) in [
                ("Lunch", "Food", date!(2024 - 01 - 05)),
                ("Bus", "Transport", date!(2024 - 01 - 06)),
                ("Dinner", "Food", date!(2024 - 02 - 10)),
            ] {
                create_expense(Expense::build(description, 10.0, category, date), &connection)
                    .unwrap();
            }
        }
        let server = get_test_server(state);

        let response = server
            .get(endpoints::ROOT)
            .add_query_param("start", "2024-01-01")
            .add_query_param("end", "2024-01-31")
            .add_query_param("category", "Food")
            .await;

        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert_eq!(row_descriptions(&html), vec!["Lunch".to_owned()]);
    }

    #[tokio::test]
    async fn repeated_parameters_use_first_value() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                Expense::build("Lunch", 10.0, "Food", date!(2024 - 01 - 05)),
                &connection,
            )
            .unwrap();
        }
        let server = get_test_server(state.clone());

        let response = server
            .get(endpoints::ROOT)
            .add_query_param("category", "Food")
            .add_query_param("category", "Transport")
            .await;

        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert_eq!(row_descriptions(&html), vec!["Lunch".to_owned()]);

        let form = [
            ("description", "Bus"),
            ("amount", "3.50"),
            ("amount", "7.00"),
            ("category", "Transport"),
            ("date", "2024-01-06"),
        ];
        server
            .post(endpoints::ADD_EXPENSE)
            .form(&form)
            .await
            .assert_status_see_other();

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 2);
        let expense = get_expense(2, &connection).unwrap();
        assert_eq!(expense.amount, 3.5);
    }

    #[tokio::test]
    async fn delete_removes_expense_then_404s() {
        let state = get_test_state();
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                Expense::build("Taxi", 25.0, "Transport", date!(2024 - 03 - 01)),
                &connection,
            )
            .unwrap()
        };
        let server = get_test_server(state.clone());
        let delete_url = format_endpoint(endpoints::DELETE_EXPENSE, expense.id);

        let response = server.post(&delete_url).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::ROOT);
        {
            let connection = state.db_connection.lock().unwrap();
            assert_eq!(count_expenses(&connection).unwrap(), 0);
        }

        server.post(&delete_url).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected() {
        let server = get_test_server(get_test_state());

        let response = server.post("/delete/abc").await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server(get_test_state());

        server.get("/does-not-exist").await.assert_status_not_found();
    }
}
