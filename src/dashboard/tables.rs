//! Table views for the dashboard.
//!
//! Each table is a stateless template over one summary type. [date_table]
//! pairs a template with the aggregation that produces its rows, giving a
//! view that can be rendered straight from the sorted record list.

use maud::{Markup, html};

use crate::{
    dashboard::{
        aggregation::INVALID_DATE_LABEL,
        record::{DatedAmount, MonthSummary, YearSummary},
    },
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, format_currency},
};

/// A row that can be shown in a two-column (label, amount) table.
pub(super) trait AmountRow {
    fn label(&self) -> String;

    fn amount(&self) -> f64;
}

impl AmountRow for DatedAmount {
    fn label(&self) -> String {
        self.date.clone()
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

impl AmountRow for MonthSummary {
    fn label(&self) -> String {
        self.month.clone()
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

impl AmountRow for YearSummary {
    fn label(&self) -> String {
        match self.year {
            Some(year) => year.to_string(),
            None => INVALID_DATE_LABEL.to_owned(),
        }
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Bind `template` to `aggregate`.
///
/// The returned view takes the sorted record list, aggregates it and renders
/// the result with `template`.
pub(super) fn date_table<T, Template, Aggregate>(
    template: Template,
    aggregate: Aggregate,
) -> impl Fn(&[DatedAmount]) -> Markup
where
    Template: Fn(&[T]) -> Markup,
    Aggregate: Fn(&[DatedAmount]) -> Vec<T>,
{
    move |records| template(&aggregate(records))
}

/// Renders the totals for each month name.
pub(super) fn month_table(months: &[MonthSummary]) -> Markup {
    amount_table("month-table", "Month Table", "Month", months)
}

/// Renders the totals for each calendar year.
pub(super) fn year_table(years: &[YearSummary]) -> Markup {
    amount_table("year-table", "Year Table", "Year", years)
}

/// Renders every record, one row per record.
pub(super) fn sort_table(records: &[DatedAmount]) -> Markup {
    amount_table("sort-table", "Sort Table", "Date", records)
}

fn amount_table<T: AmountRow>(id: &str, title: &str, label_header: &str, rows: &[T]) -> Markup {
    html! {
        div id=(id) class="w-full mb-8" {
            h2 class="text-xl font-semibold mb-4" { (title) }

            div class="overflow-x-auto rounded-lg shadow" {
                table class=(TABLE_STYLE) {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { (label_header) }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (row.label()) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(row.amount())) }
                            }
                        }
                    }
                }
            }
        }
    }
}
