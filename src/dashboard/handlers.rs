//! Dashboard HTTP handler and view rendering.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    app_state::SharedRecords,
    dashboard::{
        aggregation::{aggregate_by_month, aggregate_by_year, identity_aggregate},
        record::{DatedAmount, sort_by_date_descending},
        tables::{date_table, month_table, sort_table, year_table},
    },
    html::{PAGE_CONTAINER_STYLE, base},
    timezone::get_local_offset,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The record list, or `None` until it has been loaded from the backend.
    pub records: SharedRecords,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            records: state.records.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the month, year and sorted record tables.
///
/// Until the record list has been loaded the page is rendered without the
/// dashboard. A loaded but empty list renders the tables with no rows.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let records = state
        .records
        .read()
        .inspect_err(|error| tracing::error!("could not acquire the records lock: {error}"))
        .map_err(|_| Error::RecordsLockError)?
        .clone();

    let Some(mut records) = records else {
        tracing::debug!("Rendering dashboard before the records have loaded");
        return Ok(dashboard_unloaded_view().into_response());
    };

    sort_by_date_descending(&mut records, local_offset);

    let month_view = date_table(month_table, |records: &[DatedAmount]| {
        aggregate_by_month(records, local_offset)
    });
    let year_view = date_table(year_table, |records: &[DatedAmount]| {
        aggregate_by_year(records, local_offset)
    });
    let sort_view = date_table(sort_table, identity_aggregate);

    let tables = [
        month_view(&records),
        year_view(&records),
        sort_view(&records),
    ];

    Ok(dashboard_view(&tables).into_response())
}

fn dashboard_view(tables: &[Markup]) -> Markup {
    let content = html!(
        div id="app" class=(PAGE_CONTAINER_STYLE) {
            @for table in tables {
                (table)
            }
        }
    );

    base("Dashboard", &content)
}

fn dashboard_unloaded_view() -> Markup {
    base("Dashboard", &html!())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use axum::{extract::State, http::StatusCode};
    use scraper::{Html, Selector};

    use crate::{
        Error,
        dashboard::{
            handlers::{DashboardState, get_dashboard_page},
            record::DatedAmount,
        },
        test_utils::{assert_valid_html, parse_html_document, select_text},
    };

    fn get_test_state(records: Option<Vec<DatedAmount>>) -> DashboardState {
        DashboardState {
            records: Arc::new(RwLock::new(records)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn example_records() -> Vec<DatedAmount> {
        [
            ("2023-01-05", 100.0),
            ("2024-03-01", 30.0),
            ("2023-01-20", 50.0),
        ]
        .into_iter()
        .map(|(date, amount)| DatedAmount {
            date: date.to_owned(),
            amount,
        })
        .collect()
    }

    #[track_caller]
    fn table_rows(html: &Html, table_id: &str) -> Vec<(String, String)> {
        let row_selector = Selector::parse(&format!("#{table_id} tbody tr")).unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        html.select(&row_selector)
            .map(|row| {
                let cells: Vec<String> = row
                    .select(&cell_selector)
                    .map(|cell| cell.text().collect())
                    .collect();
                assert_eq!(cells.len(), 2, "want 2 cells per row, got {cells:?}");
                (cells[0].clone(), cells[1].clone())
            })
            .collect()
    }

    fn pairs(rows: &[(&str, &str)]) -> Vec<(String, String)> {
        rows.iter()
            .map(|(label, amount)| (label.to_string(), amount.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn dashboard_page_renders_three_tables() {
        let state = get_test_state(Some(example_records()));

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let table_selector = Selector::parse("#app table").unwrap();
        assert_eq!(html.select(&table_selector).count(), 3);

        assert_eq!(
            select_text(&html, "#app h2"),
            ["Month Table", "Year Table", "Sort Table"]
        );
    }

    #[tokio::test]
    async fn tables_are_fed_records_sorted_newest_first() {
        let state = get_test_state(Some(example_records()));

        let response = get_dashboard_page(State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        assert_eq!(
            table_rows(&html, "month-table"),
            pairs(&[("Mar", "$30.00"), ("Jan", "$150.00")])
        );
        assert_eq!(
            table_rows(&html, "year-table"),
            pairs(&[("2024", "$30.00"), ("2023", "$150.00")])
        );
        assert_eq!(
            table_rows(&html, "sort-table"),
            pairs(&[
                ("2024-03-01", "$30.00"),
                ("2023-01-20", "$50.00"),
                ("2023-01-05", "$100.00"),
            ])
        );
    }

    #[tokio::test]
    async fn stored_records_are_not_reordered() {
        let state = get_test_state(Some(example_records()));

        get_dashboard_page(State(state.clone())).await.unwrap();

        let stored = state.records.read().unwrap().clone();
        assert_eq!(stored, Some(example_records()));
    }

    #[tokio::test]
    async fn empty_list_renders_empty_tables() {
        let state = get_test_state(Some(Vec::new()));

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let table_selector = Selector::parse("#app table").unwrap();
        assert_eq!(html.select(&table_selector).count(), 3);
        let row_selector = Selector::parse("tbody tr").unwrap();
        assert_eq!(html.select(&row_selector).count(), 0);
    }

    #[tokio::test]
    async fn unloaded_records_render_no_dashboard() {
        let state = get_test_state(None);

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let app_selector = Selector::parse("#app").unwrap();
        assert!(html.select(&app_selector).next().is_none());
        let table_selector = Selector::parse("table").unwrap();
        assert!(html.select(&table_selector).next().is_none());
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let mut state = get_test_state(Some(example_records()));
        state.local_timezone = "Not/AZone".to_owned();

        let result = get_dashboard_page(State(state)).await;

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Not/AZone".to_owned()))
        );
    }
}
