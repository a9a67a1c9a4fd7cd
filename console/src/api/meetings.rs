//! Meetings: weekly report listing and spreadsheet upload.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagination::{PageEnvelope, PageRequest};
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::paths;
use crate::domain::ApiResult;
use crate::domain::ports::FileUpload;

/// One meeting row from a weekly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    /// Server-assigned identifier.
    pub id: i64,
    /// Sales rep who held the meeting.
    pub rep_name: String,
    /// Customer the meeting was held with.
    pub customer_name: String,
    /// Primary contact present in the meeting.
    pub primary_contact: String,
    /// Stated purpose.
    pub meeting_purpose: String,
    /// Recorded outcome.
    pub meeting_outcome: String,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
}

/// Optional filters for the meetings list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingFilter {
    /// Restrict to one rep.
    pub rep_name: Option<String>,
    /// Restrict to one month, e.g. `2025-06`.
    pub month: Option<String>,
    /// Restrict to one week within the month.
    pub week: Option<u8>,
}

impl MeetingFilter {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(rep_name) = &self.rep_name {
            pairs.push(("repName".to_owned(), rep_name.clone()));
        }
        if let Some(month) = &self.month {
            pairs.push(("month".to_owned(), month.clone()));
        }
        if let Some(week) = self.week {
            pairs.push(("week".to_owned(), week.to_string()));
        }
        pairs
    }
}

/// Meetings endpoint client.
pub struct MeetingsApi {
    client: Arc<ApiClient>,
}

impl MeetingsApi {
    /// Wire the meetings client over the shared request client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List meetings matching the filter, one page at a time.
    pub async fn list(
        &self,
        filter: &MeetingFilter,
        page: PageRequest,
    ) -> ApiResult<PageEnvelope<Meeting>> {
        let mut query = filter.query_pairs();
        for (key, value) in page.query_pairs() {
            query.push((key.to_owned(), value));
        }
        self.client.get(paths::MEETINGS, query).await
    }

    /// Upload one rep's weekly report spreadsheet.
    pub async fn upload(
        &self,
        rep_name: &str,
        month: &str,
        week: u8,
        file: FileUpload,
    ) -> ApiResult<()> {
        let query = vec![
            ("repName".to_owned(), rep_name.to_owned()),
            ("month".to_owned(), month.to_owned()),
            ("week".to_owned(), week.to_string()),
        ];
        self.client
            .upload_unit(paths::UPLOAD_MEETINGS, query, file)
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        InMemorySessionStore, RecordingNavigator, RequestBody, StaticTransport,
    };
    use crate::domain::SessionContext;
    use rstest::rstest;
    use serde_json::json;

    fn meetings_api(transport: Arc<StaticTransport>) -> MeetingsApi {
        let session = Arc::new(
            SessionContext::initialise(Arc::new(InMemorySessionStore::new()))
                .expect("initialise session"),
        );
        let navigator = Arc::new(RecordingNavigator::new());
        MeetingsApi::new(Arc::new(ApiClient::new(transport, session, navigator)))
    }

    #[rstest]
    #[tokio::test]
    async fn list_sends_filters_and_pagination_together() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(
            200,
            &json!({
                "page": 2,
                "limit": 15,
                "total": 16,
                "totalPages": 2,
                "items": [{
                    "id": 1,
                    "repName": "Ben Okafor",
                    "customerName": "Acme",
                    "primaryContact": "CTO",
                    "meetingPurpose": "Demo",
                    "meetingOutcome": "Follow-up booked",
                    "createdAt": "2025-06-02T09:00:00Z"
                }]
            }),
        );
        let api = meetings_api(transport.clone());

        let filter = MeetingFilter {
            rep_name: Some("Ben Okafor".to_owned()),
            month: Some("2025-06".to_owned()),
            week: Some(2),
        };
        let page = PageRequest::new(2, 15).expect("valid page");
        let envelope = api.list(&filter, page).await.expect("list succeeds");
        assert_eq!(envelope.items.len(), 1);
        assert_eq!(envelope.items[0].rep_name, "Ben Okafor");

        let sent = transport.requests();
        assert_eq!(sent[0].path, paths::MEETINGS);
        let query = &sent[0].query;
        assert!(query.contains(&("repName".to_owned(), "Ben Okafor".to_owned())));
        assert!(query.contains(&("month".to_owned(), "2025-06".to_owned())));
        assert!(query.contains(&("week".to_owned(), "2".to_owned())));
        assert!(query.contains(&("page".to_owned(), "2".to_owned())));
        assert!(query.contains(&("limit".to_owned(), "15".to_owned())));
    }

    #[rstest]
    #[tokio::test]
    async fn upload_targets_the_rep_month_week_triple() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(200, &json!({ "success": true }));
        let api = meetings_api(transport.clone());

        let file = FileUpload {
            file_name: "week2.xlsx".to_owned(),
            bytes: vec![1, 2, 3],
        };
        api.upload("Ben Okafor", "2025-06", 2, file)
            .await
            .expect("upload succeeds");

        let sent = transport.requests();
        assert_eq!(sent[0].path, paths::UPLOAD_MEETINGS);
        assert!(matches!(&sent[0].body, RequestBody::Multipart(upload)
            if upload.file_name == "week2.xlsx"));
        assert!(sent[0]
            .query
            .contains(&("repName".to_owned(), "Ben Okafor".to_owned())));
    }
}
