//! Expense tracking.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and the database functions for storing and deleting expenses
//! - Filtering, aggregation and totals for the expenses page
//! - The add form, its validation, and the route handlers

mod core;
mod create_endpoint;
mod delete_endpoint;
mod filter;
mod form;
mod page;
mod query;
mod view;

pub use core::{
    CATEGORIES, Expense, NewExpense, create_expense, create_expense_table, delete_expense,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use filter::{ExpenseFilter, FilterError, FilterQuery};
pub use form::ExpenseForm;
pub use page::get_expenses_page;
pub use query::{Aggregate, ExpenseReport, query_expenses, round_to_cents};

#[cfg(test)]
pub use core::{count_expenses, get_expense};
