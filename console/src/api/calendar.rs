//! Reference data for filters: reporting months, weeks, and quarters.
//!
//! Two families exist server-side: `/filters/*` lists only periods that
//! already have data (for narrowing lists), `/calendar/*` lists every
//! period (for targeting uploads). Both are tiny unpaginated arrays.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::paths;
use crate::domain::ApiResult;

/// A selectable week within a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekOption {
    /// Week number within the month.
    pub week: u8,
    /// Operator-facing label.
    pub label: String,
    /// First day the week covers.
    pub start_date: String,
    /// Last day the week covers.
    pub end_date: String,
}

/// Filter and calendar reference-data client.
pub struct CalendarApi {
    client: Arc<ApiClient>,
}

impl CalendarApi {
    /// Wire the calendar client over the shared request client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Months that already have report data.
    pub async fn available_months(&self) -> ApiResult<Vec<String>> {
        self.client.get(paths::FILTER_MONTHS, Vec::new()).await
    }

    /// Weeks with data inside one month.
    pub async fn available_weeks(&self, month: &str) -> ApiResult<Vec<WeekOption>> {
        let query = vec![("month".to_owned(), month.to_owned())];
        self.client.get(paths::FILTER_WEEKS, query).await
    }

    /// Quarters that already have data.
    pub async fn available_quarters(&self) -> ApiResult<Vec<u8>> {
        self.client.get(paths::FILTER_QUARTERS, Vec::new()).await
    }

    /// Every calendar month, for targeting uploads.
    pub async fn calendar_months(&self) -> ApiResult<Vec<String>> {
        self.client.get(paths::CALENDAR_MONTHS, Vec::new()).await
    }

    /// Every calendar week inside one month, for targeting uploads.
    pub async fn calendar_weeks(&self, month: &str) -> ApiResult<Vec<WeekOption>> {
        let query = vec![("month".to_owned(), month.to_owned())];
        self.client.get(paths::CALENDAR_WEEKS, query).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::SessionContext;
    use crate::domain::ports::{InMemorySessionStore, RecordingNavigator, StaticTransport};
    use rstest::rstest;
    use serde_json::json;

    fn calendar_api(transport: Arc<StaticTransport>) -> CalendarApi {
        let session = Arc::new(
            SessionContext::initialise(Arc::new(InMemorySessionStore::new()))
                .expect("initialise session"),
        );
        CalendarApi::new(Arc::new(ApiClient::new(
            transport,
            session,
            Arc::new(RecordingNavigator::new()),
        )))
    }

    #[rstest]
    #[tokio::test]
    async fn weeks_decode_with_their_date_bounds() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(
            200,
            &json!([
                { "week": 1, "label": "Week 1", "startDate": "2025-06-02", "endDate": "2025-06-08" },
                { "week": 2, "label": "Week 2", "startDate": "2025-06-09", "endDate": "2025-06-15" }
            ]),
        );
        let api = calendar_api(transport.clone());

        let weeks = api.available_weeks("2025-06").await.expect("weeks decode");
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[1].week, 2);

        let sent = transport.requests();
        assert_eq!(sent[0].path, paths::FILTER_WEEKS);
        assert_eq!(sent[0].query, vec![("month".to_owned(), "2025-06".to_owned())]);
    }

    #[rstest]
    #[tokio::test]
    async fn months_are_plain_string_arrays() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(200, &json!(["2025-05", "2025-06"]));
        let api = calendar_api(transport);

        let months = api.available_months().await.expect("months decode");
        assert_eq!(months, vec!["2025-05".to_owned(), "2025-06".to_owned()]);
    }
}
