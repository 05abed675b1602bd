//! The remote collection interface: fetches, mutations, and their errors.
//!
//! The list controller never talks HTTP directly; it goes through the
//! [`RecordApi`] trait so hosts (and tests) can substitute transports. The
//! bundled [`HttpApi`] implementation speaks the REST dialect of the admin
//! backend: full-collection fetches, per-record lifecycle mutations under a
//! records base path, bulk endpoints for scheduling and deletion, and a
//! numeric dependent-count endpoint for summary badges.
//!
//! Failure taxonomy: transport errors, server-reported failures (non-2xx or
//! an envelope with `success == false`, both carrying a human-readable
//! message), and undecodable payloads. The controller normalizes all of
//! them to a message string at the action boundary; nothing here is ever
//! allowed to crash a view.

use crate::record::Record;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tracing::{debug, warn};

/// The boxed future type returned by [`RecordApi`] methods.
///
/// Same shape as a bubbletea-rs command, so implementations compose
/// directly into the controller's async message flow.
pub type ApiFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

/// Errors surfaced by the remote collection.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered and reported a failure.
    #[error("{message}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Human-readable message from the response body.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Normalizes the error to the message string shown in the alert
    /// surface.
    pub fn to_message(&self) -> String {
        self.to_string()
    }
}

/// A mutating operation against the remote collection.
///
/// Every variant names the record(s) it applies to; the reject reason and
/// the schedule notice carry the operator-entered payload. Validation via
/// [`Action::validate`] happens before anything touches the network.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Approve a pending record.
    Approve {
        /// Target record ID.
        id: String,
    },
    /// Reject a pending record with a required reason.
    Reject {
        /// Target record ID.
        id: String,
        /// Free-text reason, included in the notification sent upstream.
        reason: String,
    },
    /// Remove a record from the active roster without deleting it.
    Remove {
        /// Target record ID.
        id: String,
    },
    /// Update named fields of a record.
    Update {
        /// Target record ID.
        id: String,
        /// Field values to write.
        fields: Map<String, Value>,
    },
    /// Permanently delete a record.
    Delete {
        /// Target record ID.
        id: String,
    },
    /// Mark a record with its terminal status (graduated, deactivated).
    Archive {
        /// Target record ID.
        id: String,
    },
    /// Schedule a requirement-submission notice for the selected records.
    Schedule {
        /// Selected record IDs, in deterministic order.
        ids: Vec<String>,
        /// The notice content.
        notice: ScheduleNotice,
    },
    /// Delete a batch of history/log records.
    BulkDelete {
        /// Selected record IDs.
        ids: Vec<String>,
    },
}

/// Discriminant of an [`Action`], used for pending-state tracking and
/// status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// See [`Action::Approve`].
    Approve,
    /// See [`Action::Reject`].
    Reject,
    /// See [`Action::Remove`].
    Remove,
    /// See [`Action::Update`].
    Update,
    /// See [`Action::Delete`].
    Delete,
    /// See [`Action::Archive`].
    Archive,
    /// See [`Action::Schedule`].
    Schedule,
    /// See [`Action::BulkDelete`].
    BulkDelete,
}

impl ActionKind {
    /// Short human label for status and confirmation text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Remove => "remove",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Archive => "archive",
            Self::Schedule => "schedule",
            Self::BulkDelete => "bulk delete",
        }
    }

    /// Returns true for actions that operate on the whole selection.
    pub fn is_bulk(&self) -> bool {
        matches!(self, Self::Schedule | Self::BulkDelete)
    }
}

/// Content of a requirement-submission notice.
///
/// All four fields are required; [`Action::validate`] rejects the action
/// before submission when any is blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleNotice {
    /// Notice title.
    pub title: String,
    /// Submission date as entered by the operator.
    pub date: String,
    /// Submission time as entered by the operator.
    pub time: String,
    /// Free-text description of the requirements.
    pub description: String,
}

impl Action {
    /// Returns this action's discriminant.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Approve { .. } => ActionKind::Approve,
            Self::Reject { .. } => ActionKind::Reject,
            Self::Remove { .. } => ActionKind::Remove,
            Self::Update { .. } => ActionKind::Update,
            Self::Delete { .. } => ActionKind::Delete,
            Self::Archive { .. } => ActionKind::Archive,
            Self::Schedule { .. } => ActionKind::Schedule,
            Self::BulkDelete { .. } => ActionKind::BulkDelete,
        }
    }

    /// Client-side validation, run before any request is issued.
    ///
    /// A failed validation never reaches the network: the controller turns
    /// the returned message into an inline form error or an alert.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recordlist::client::Action;
    ///
    /// let action = Action::Reject {
    ///     id: "APP-001".into(),
    ///     reason: "   ".into(),
    /// };
    /// assert!(action.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Reject { reason, .. } => {
                if reason.trim().is_empty() {
                    return Err("a rejection reason is required".to_string());
                }
            }
            Self::Schedule { ids, notice } => {
                if ids.is_empty() {
                    return Err("select at least one record to schedule".to_string());
                }
                let blank = [
                    &notice.title,
                    &notice.date,
                    &notice.time,
                    &notice.description,
                ]
                .iter()
                .any(|field| field.trim().is_empty());
                if blank {
                    return Err(
                        "title, date, time, and description are all required".to_string()
                    );
                }
            }
            Self::BulkDelete { ids } => {
                if ids.is_empty() {
                    return Err("select at least one record to delete".to_string());
                }
            }
            Self::Update { fields, .. } => {
                if fields.is_empty() {
                    return Err("nothing to update".to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Wire payload of a schedule-and-notify request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SchedulePayload {
    /// Selected record IDs under the backend's field name.
    #[serde(rename = "studentIds")]
    pub student_ids: Vec<String>,
    /// Notice title.
    pub title: String,
    /// Submission date.
    pub date: String,
    /// Submission time.
    pub time: String,
    /// Requirement description.
    pub description: String,
}

impl SchedulePayload {
    fn new(ids: Vec<String>, notice: ScheduleNotice) -> Self {
        Self {
            student_ids: ids,
            title: notice.title,
            date: notice.date,
            time: notice.time,
            description: notice.description,
        }
    }
}

/// Server envelope returned by mutating endpoints.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MutationOutcome {
    /// Whether the server applied the mutation.
    pub success: bool,
    /// Human-readable status message.
    #[serde(default)]
    pub message: String,
    /// Optional payload, e.g. the updated record.
    #[serde(default)]
    pub data: Option<Value>,
}

/// The abstract contract between the controller and its backend.
///
/// One implementation per transport: [`HttpApi`] for the REST backend, and
/// in-crate mocks for tests. All methods return boxed futures so the trait
/// stays object-safe and models can hold `Arc<dyn RecordApi<R>>`.
pub trait RecordApi<R: Record>: Send + Sync {
    /// Fetches the full current collection. There is no server-side
    /// pagination; the controller filters and paginates client-side.
    fn fetch_collection(&self) -> ApiFuture<Vec<R>>;

    /// Applies one mutating action and returns the server's envelope.
    fn mutate(&self, action: Action) -> ApiFuture<MutationOutcome>;

    /// Fetches the dependent summary count (e.g. pending applicants) shown
    /// in badges elsewhere in the UI.
    fn fetch_pending_count(&self) -> ApiFuture<u64>;
}

/// Endpoint set of one record collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// GET: the full collection.
    pub collection: String,
    /// Base path for per-record mutations (`{records}/{id}/approve`, ...).
    pub records: String,
    /// POST: bulk schedule-and-notify.
    pub schedule: String,
    /// POST: bulk delete.
    pub bulk_delete: String,
    /// GET: dependent summary count.
    pub pending_count: String,
}

impl Endpoints {
    /// Derives the conventional endpoint set from one collection base URL.
    ///
    /// ```rust
    /// use recordlist::client::Endpoints;
    ///
    /// let endpoints = Endpoints::for_base("https://api.school.test/applicants");
    /// assert_eq!(endpoints.collection, "https://api.school.test/applicants");
    /// assert_eq!(
    ///     endpoints.schedule,
    ///     "https://api.school.test/applicants/schedule"
    /// );
    /// ```
    pub fn for_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            collection: base.to_string(),
            records: base.to_string(),
            schedule: format!("{base}/schedule"),
            bulk_delete: format!("{base}/bulk-delete"),
            pending_count: format!("{base}/pending-count"),
        }
    }
}

/// [`RecordApi`] implementation over the REST backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpApi {
    /// Creates an API handle with a fresh HTTP client.
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }

    /// Creates an API handle reusing an existing HTTP client, so several
    /// controllers share one connection pool.
    pub fn with_client(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    fn request_for(&self, action: &Action) -> (reqwest::Method, String, Option<Value>) {
        let records = &self.endpoints.records;
        match action {
            Action::Approve { id } => (
                reqwest::Method::POST,
                format!("{records}/{id}/approve"),
                None,
            ),
            Action::Reject { id, reason } => (
                reqwest::Method::POST,
                format!("{records}/{id}/reject"),
                Some(json!({ "id": id, "reason": reason.trim() })),
            ),
            Action::Remove { id } => (
                reqwest::Method::POST,
                format!("{records}/{id}/remove"),
                None,
            ),
            Action::Update { id, fields } => (
                reqwest::Method::PATCH,
                format!("{records}/{id}"),
                Some(Value::Object(fields.clone())),
            ),
            Action::Delete { id } => (reqwest::Method::DELETE, format!("{records}/{id}"), None),
            Action::Archive { id } => (
                reqwest::Method::POST,
                format!("{records}/{id}/archive"),
                None,
            ),
            Action::Schedule { ids, notice } => (
                reqwest::Method::POST,
                self.endpoints.schedule.clone(),
                Some(
                    serde_json::to_value(SchedulePayload::new(ids.clone(), notice.clone()))
                        .unwrap_or(Value::Null),
                ),
            ),
            Action::BulkDelete { ids } => (
                reqwest::Method::POST,
                self.endpoints.bulk_delete.clone(),
                Some(json!({ "ids": ids })),
            ),
        }
    }
}

/// Extracts the server's failure message from a non-2xx response.
async fn failure_from(response: reqwest::Response) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let status = response.status().as_u16();
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("request failed with status {status}")),
        Err(_) => format!("request failed with status {status}"),
    };
    warn!(status, %message, "server reported failure");
    ApiError::Server { status, message }
}

impl<R> RecordApi<R> for HttpApi
where
    R: Record + DeserializeOwned,
{
    fn fetch_collection(&self) -> ApiFuture<Vec<R>> {
        let http = self.http.clone();
        let url = self.endpoints.collection.clone();
        Box::pin(async move {
            debug!(%url, "fetching collection");
            let response = http.get(&url).send().await?;
            if !response.status().is_success() {
                return Err(failure_from(response).await);
            }
            let records = response.json::<Vec<R>>().await?;
            debug!(count = records.len(), "collection fetched");
            Ok(records)
        })
    }

    fn mutate(&self, action: Action) -> ApiFuture<MutationOutcome> {
        let http = self.http.clone();
        let (method, url, body) = self.request_for(&action);
        let kind = action.kind();
        Box::pin(async move {
            debug!(%url, action = kind.label(), "submitting mutation");
            let mut request = http.request(method, &url);
            if let Some(body) = body {
                request = request.json(&body);
            }
            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(failure_from(response).await);
            }
            let status = response.status().as_u16();
            let outcome = response.json::<MutationOutcome>().await?;
            if !outcome.success {
                warn!(action = kind.label(), %outcome.message, "mutation declined");
                return Err(ApiError::Server {
                    status,
                    message: outcome.message,
                });
            }
            Ok(outcome)
        })
    }

    fn fetch_pending_count(&self) -> ApiFuture<u64> {
        let http = self.http.clone();
        let url = self.endpoints.pending_count.clone();
        Box::pin(async move {
            let response = http.get(&url).send().await?;
            if !response.status().is_success() {
                return Err(failure_from(response).await);
            }
            Ok(response.json::<u64>().await?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_requires_a_non_blank_reason() {
        let blank = Action::Reject {
            id: "APP-001".into(),
            reason: " \t ".into(),
        };
        assert!(blank.validate().is_err());

        let ok = Action::Reject {
            id: "APP-001".into(),
            reason: "missing form 137".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn schedule_requires_selection_and_all_fields() {
        let notice = ScheduleNotice {
            title: "Requirement submission".into(),
            date: "2025-04-01".into(),
            time: "09:00".into(),
            description: "Bring original documents".into(),
        };

        let empty_selection = Action::Schedule {
            ids: vec![],
            notice: notice.clone(),
        };
        assert!(empty_selection.validate().is_err());

        let blank_field = Action::Schedule {
            ids: vec!["A".into()],
            notice: ScheduleNotice {
                time: "  ".into(),
                ..notice.clone()
            },
        };
        assert!(blank_field.validate().is_err());

        let ok = Action::Schedule {
            ids: vec!["A".into(), "B".into()],
            notice,
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn bulk_delete_requires_a_selection() {
        assert!(Action::BulkDelete { ids: vec![] }.validate().is_err());
        assert!(Action::BulkDelete {
            ids: vec!["LOG-1".into()]
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn schedule_payload_uses_the_backend_field_name() {
        let payload = SchedulePayload::new(
            vec!["A".into(), "B".into()],
            ScheduleNotice {
                title: "t".into(),
                date: "d".into(),
                time: "h".into(),
                description: "x".into(),
            },
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["studentIds"], json!(["A", "B"]));
        assert_eq!(value["title"], json!("t"));
    }

    #[test]
    fn mutation_outcome_tolerates_sparse_envelopes() {
        let outcome: MutationOutcome = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message, "");
        assert!(outcome.data.is_none());
    }

    #[test]
    fn server_error_displays_its_message_only() {
        let err = ApiError::Server {
            status: 422,
            message: "applicant already approved".into(),
        };
        assert_eq!(err.to_message(), "applicant already approved");
    }

    #[test]
    fn endpoints_for_base_strips_trailing_slashes() {
        let endpoints = Endpoints::for_base("https://api.test/students/");
        assert_eq!(endpoints.records, "https://api.test/students");
        assert_eq!(endpoints.bulk_delete, "https://api.test/students/bulk-delete");
        assert_eq!(
            endpoints.pending_count,
            "https://api.test/students/pending-count"
        );
    }

    #[test]
    fn action_kinds_classify_bulk_operations() {
        assert!(ActionKind::Schedule.is_bulk());
        assert!(ActionKind::BulkDelete.is_bulk());
        assert!(!ActionKind::Approve.is_bulk());
        assert_eq!(ActionKind::Archive.label(), "archive");
    }
}
