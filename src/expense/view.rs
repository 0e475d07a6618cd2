//! HTML rendering for the expenses page.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    alert::Alert,
    charts::{PageChart, category_chart, charts_script, charts_view, daily_chart},
    endpoints::{self, format_endpoint},
    expense::{
        Expense,
        core::{MAX_CATEGORY_LENGTH, MAX_DESCRIPTION_LENGTH},
        page::ExpensePageData,
    },
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, ECHARTS_SCRIPT_URL,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
};

/// The max number of graphemes to display in the expense table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

pub(crate) fn expenses_view(data: &ExpensePageData, alerts: Vec<Alert>) -> Markup {
    let report = &data.report;
    let charts = if report.expenses.is_empty() {
        Vec::new()
    } else {
        vec![
            PageChart {
                id: "category-chart",
                options: category_chart(&report.by_category).to_string(),
            },
            PageChart {
                id: "daily-chart",
                options: daily_chart(&report.by_day).to_string(),
            },
        ]
    };

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-2xl font-bold" { "Expenses" }
                }

                @for alert in alerts {
                    (alert.into_html())
                }

                (add_expense_form(data))

                (filter_form(data))

                p class="text-lg"
                {
                    "Total: "
                    span id="total" class="font-semibold" { (format_currency(report.total)) }
                }

                @if !charts.is_empty() {
                    (charts_view(&charts))
                }

                (expense_table(&report.expenses))
            }
        }
    };

    let head_elements = if charts.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
            charts_script(&charts),
        ]
    };

    base("Expenses", &head_elements, &content)
}

fn add_expense_form(data: &ExpensePageData) -> Markup {
    html! {
        section class="rounded bg-white dark:bg-gray-800 p-4"
        {
            h2 class="text-xl font-bold mb-4" { "Add Expense" }

            form
                id="add-expense"
                method="post"
                action=(endpoints::ADD_EXPENSE)
                class="grid grid-cols-1 md:grid-cols-5 gap-4 items-end"
            {
                div class="md:col-span-2"
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="What was it for?"
                        maxlength=(MAX_DESCRIPTION_LENGTH)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    select
                        name="category"
                        id="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in data.categories {
                            option value=(category) { (category) }
                        }
                    }
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                    input
                        name="date"
                        id="date"
                        type="date"
                        value=(data.today)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="md:col-span-5"
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
                }
            }
        }
    }
}

fn filter_form(data: &ExpensePageData) -> Markup {
    let filter = &data.filter;
    let selected_category = filter.category.as_deref();
    // Keep showing a category that was typed into the URL even if it is not one of the presets.
    let custom_category = selected_category
        .filter(|category| !data.categories.iter().any(|preset| preset == category));

    html! {
        section class="rounded bg-white dark:bg-gray-800 p-4"
        {
            h2 class="text-xl font-bold mb-4" { "Filter" }

            form
                id="filter-expenses"
                method="get"
                action=(endpoints::ROOT)
                class="grid grid-cols-1 md:grid-cols-4 gap-4 items-end"
            {
                div
                {
                    label for="start" class=(FORM_LABEL_STYLE) { "From" }
                    input
                        name="start"
                        id="start"
                        type="date"
                        value=[filter.start]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="end" class=(FORM_LABEL_STYLE) { "To" }
                    input
                        name="end"
                        id="end"
                        type="date"
                        value=[filter.end]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }
                    select
                        name="category"
                        id="filter-category"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected[selected_category.is_none()] { "All categories" }

                        @for category in data.categories {
                            option
                                value=(category)
                                selected[selected_category == Some(*category)]
                            {
                                (category)
                            }
                        }

                        @if let Some(category) = custom_category {
                            option value=(category) selected { (category) }
                        }
                    }
                }

                div class="flex gap-4 items-center"
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
                    a href=(endpoints::ROOT) class=(LINK_STYLE) { "Clear" }
                }
            }
        }
    }
}

fn expense_table(expenses: &[Expense]) -> Markup {
    html! {
        section class="rounded bg-gray-50 dark:bg-gray-800 overflow-x-auto"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (expense_row(expense))
                    }

                    @if expenses.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="5" class=(TABLE_CELL_STYLE) { "No expenses found." }
                        }
                    }
                }
            }
        }
    }
}

fn expense_row(expense: &Expense) -> Markup {
    let delete_url = format_endpoint(endpoints::DELETE_EXPENSE, expense.id);
    let (description, is_truncated) =
        truncate_graphemes(&expense.description, MAX_DESCRIPTION_GRAPHEMES);

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class=(TABLE_CELL_STYLE) { (expense.date) }
            td class=(TABLE_CELL_STYLE) title=[is_truncated.then_some(&expense.description)]
            {
                (description)
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) title=(expense.category)
                {
                    (truncate_graphemes(&expense.category, MAX_CATEGORY_LENGTH).0)
                }
            }
            td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                form method="post" action=(delete_url)
                {
                    button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                }
            }
        }
    }
}

/// Shorten `text` to `max_graphemes`, appending an ellipsis when it was cut.
fn truncate_graphemes(text: &str, max_graphemes: usize) -> (String, bool) {
    if text.graphemes(true).count() <= max_graphemes {
        return (text.to_owned(), false);
    }

    let mut truncated: String = text.graphemes(true).take(max_graphemes).collect();
    truncated.push_str("...");

    (truncated, true)
}
