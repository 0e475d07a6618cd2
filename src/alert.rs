//! Alert system for displaying success and error messages to users.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

/// A status message shown at the top of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    /// The last action completed.
    Success {
        /// The text shown to the user.
        message: String,
    },
    /// The last action was rejected or failed.
    Error {
        /// The text shown to the user.
        message: String,
    },
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Alert::Success { message } | Alert::Error { message } => message,
        }
    }

    pub fn into_html(self) -> Markup {
        let (role, style) = match self {
            Alert::Success { .. } => (
                "status",
                "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
                dark:bg-gray-800 dark:text-green-400",
            ),
            Alert::Error { .. } => (
                "alert",
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
            ),
        };

        html!(
            div class=(style) role=(role) data-alert
            {
                (self.message())
            }
        )
    }
}
