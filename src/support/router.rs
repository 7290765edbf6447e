use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::analytics::{AnalysisError, ProgressSummary, StatusCounts};
use super::domain::{CatalogEntry, StudentId};
use super::recommendation::RecommendationError;
use super::repository::{CatalogLookup, RepositoryError, StudentRepository};
use super::service::{SupportService, SupportServiceError};

/// Router builder exposing the decision core over HTTP.
pub fn support_router<S, C>(service: Arc<SupportService<S, C>>) -> Router
where
    S: StudentRepository + 'static,
    C: CatalogLookup + 'static,
{
    Router::new()
        .route(
            "/api/v1/students/:student_id/recommendations",
            get(recommendations_handler::<S, C>),
        )
        .route(
            "/api/v1/students/:student_id/progress",
            get(progress_handler::<S, C>),
        )
        .with_state(service)
}

/// Caller-facing projection of a recommended catalog entry.
#[derive(Debug, Serialize)]
pub struct RecommendationView {
    pub catalog_entry_id: String,
    pub title: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_duration_days: Option<u32>,
}

impl From<&CatalogEntry> for RecommendationView {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            catalog_entry_id: entry.id().0.clone(),
            title: entry.title().to_string(),
            kind: entry.kind().label(),
            suggested_duration_days: entry.suggested_duration_days(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationListView {
    pub student_id: String,
    pub recommendations: Vec<RecommendationView>,
}

/// Caller-facing projection of a progress summary.
#[derive(Debug, Serialize)]
pub struct ProgressView {
    pub student_id: String,
    pub status_counts: StatusCounts,
    pub overall_progress: f64,
    pub assessment_average: f64,
    pub trend: &'static str,
}

impl ProgressView {
    fn new(student_id: String, summary: &ProgressSummary) -> Self {
        Self {
            student_id,
            status_counts: summary.status_counts,
            overall_progress: summary.overall_progress,
            assessment_average: summary.assessment_average,
            trend: summary.trend.label(),
        }
    }
}

pub(crate) async fn recommendations_handler<S, C>(
    State(service): State<Arc<SupportService<S, C>>>,
    Path(student_id): Path<String>,
) -> Response
where
    S: StudentRepository + 'static,
    C: CatalogLookup + 'static,
{
    let id = StudentId(student_id);
    match service.recommendations(&id) {
        Ok(entries) => {
            let view = RecommendationListView {
                student_id: id.0,
                recommendations: entries.iter().map(RecommendationView::from).collect(),
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_handler<S, C>(
    State(service): State<Arc<SupportService<S, C>>>,
    Path(student_id): Path<String>,
) -> Response
where
    S: StudentRepository + 'static,
    C: CatalogLookup + 'static,
{
    let id = StudentId(student_id);
    match service.progress(&id) {
        Ok(summary) => {
            let view = ProgressView::new(id.0, &summary);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: SupportServiceError) -> Response {
    match error {
        SupportServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "student not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        precondition @ (SupportServiceError::Recommendation(
            RecommendationError::NoDifficulties(_),
        )
        | SupportServiceError::Analysis(AnalysisError::NoInterventions(_))) => {
            let payload = json!({ "error": precondition.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
