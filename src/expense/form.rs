//! The form for adding an expense and its validation rules.

use serde::Deserialize;
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::expense::{
    NewExpense,
    core::{MAX_AMOUNT, MAX_CATEGORY_LENGTH, MAX_DESCRIPTION_LENGTH},
    filter::{first_value, parse_date},
};

/// The raw form data for creating an expense.
///
/// All fields are kept as text so that bad input can be reported to the
/// user instead of being rejected by the extractor.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExpenseForm {
    /// What the money was spent on.
    #[serde(default, deserialize_with = "first_value")]
    pub description: String,
    /// The amount as typed, e.g. "12.50".
    #[serde(default, deserialize_with = "first_value")]
    pub amount: String,
    /// The category name.
    #[serde(default, deserialize_with = "first_value")]
    pub category: String,
    /// The date as `YYYY-MM-DD`, blank means today.
    #[serde(default, deserialize_with = "first_value")]
    pub date: String,
}

/// Why an [ExpenseForm] was rejected.
///
/// The display text is shown to the user as is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// One of the required fields was blank.
    #[error("Please fill description, amount, and category")]
    MissingFields,
    /// The amount was not a number greater than zero.
    #[error("Amount must be a positive number")]
    InvalidAmount,
    /// The amount was larger than [MAX_AMOUNT].
    #[error("Amount must be at most $1,000,000,000")]
    AmountTooLarge,
    /// The description was longer than [MAX_DESCRIPTION_LENGTH] characters.
    #[error("Description must be at most 150 characters")]
    DescriptionTooLong,
    /// The category was longer than [MAX_CATEGORY_LENGTH] characters.
    #[error("Category must be at most 50 characters")]
    CategoryTooLong,
}

impl ExpenseForm {
    /// Check the form and turn it into an expense ready to be saved.
    ///
    /// A blank or unparseable date falls back to `today`.
    ///
    /// # Errors
    /// Returns the first [ValidationError] found, checking for blank fields
    /// before the amount and the amount before field lengths.
    pub fn validate(&self, today: Date) -> Result<NewExpense, ValidationError> {
        let description = self.description.trim();
        let amount = self.amount.trim();
        let category = self.category.trim();

        if description.is_empty() || amount.is_empty() || category.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let amount = parse_amount(amount)?;

        if description.graphemes(true).count() > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::DescriptionTooLong);
        }

        if category.graphemes(true).count() > MAX_CATEGORY_LENGTH {
            return Err(ValidationError::CategoryTooLong);
        }

        let date = parse_date(&self.date).unwrap_or(today);

        Ok(NewExpense {
            description: description.to_owned(),
            amount,
            category: category.to_owned(),
            date,
        })
    }
}

fn parse_amount(text: &str) -> Result<f64, ValidationError> {
    match text.parse::<f64>() {
        Ok(amount) if !amount.is_finite() || amount <= 0.0 => {
            Err(ValidationError::InvalidAmount)
        }
        Ok(amount) if amount > MAX_AMOUNT => Err(ValidationError::AmountTooLarge),
        Ok(amount) => Ok(amount),
        Err(_) => Err(ValidationError::InvalidAmount),
    }
}
