//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Local;
use tracing::{error, info, warn};

use crate::autocomplete::{MAX_CANDIDATES, search};
use crate::journeys::{self, JourneyError, RawSearchRequest, RequestError, SearchRequest};
use crate::stations::CatalogStatus;

use super::dto::*;
use super::state::AppState;

/// Shortest query the station search endpoint accepts.
const MIN_QUERY_CHARS: usize = 2;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/search", get(search_stations))
        .route("/api/stations/:code", get(get_station))
        .route("/api/catalog/status", get(catalog_status))
        .route("/api/search", post(search_journeys))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List all stations, optionally restricted to one zone.
async fn list_stations(
    State(state): State<AppState>,
    Query(query): Query<StationListQuery>,
) -> Json<Vec<StationSummary>> {
    let stations = match query.zone.as_deref() {
        Some(zone) => state
            .catalog
            .in_zone(zone)
            .into_iter()
            .map(StationSummary::from)
            .collect(),
        None => state.catalog.iter().map(StationSummary::from).collect(),
    };
    Json(stations)
}

/// Autocomplete stations by name or code.
async fn search_stations(
    State(state): State<AppState>,
    Query(query): Query<StationSearchQuery>,
) -> Result<Json<Vec<StationSummary>>, AppError> {
    let q = query.q.trim();
    if q.chars().count() < MIN_QUERY_CHARS {
        return Err(AppError::BadRequest {
            message: format!("query must be at least {MIN_QUERY_CHARS} characters"),
        });
    }

    let limit = query.limit.unwrap_or(MAX_CANDIDATES).min(MAX_CANDIDATES);
    let stations = search(q, &state.catalog)
        .iter()
        .take(limit)
        .map(StationSummary::from)
        .collect();

    Ok(Json(stations))
}

/// Look up one station by code.
async fn get_station(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StationSummary>, AppError> {
    state
        .catalog
        .get_by_code(&code)
        .map(|station| Json(StationSummary::from(station)))
        .ok_or_else(|| AppError::NotFound {
            message: format!("station not found: {code}"),
        })
}

/// Whether the catalog loaded.
async fn catalog_status(State(state): State<AppState>) -> Json<CatalogStatus> {
    Json(state.catalog_status.as_ref().clone())
}

/// Search journeys, then filter and sort them.
async fn search_journeys(
    State(state): State<AppState>,
    Query(params): Query<JourneySearchParams>,
    Json(raw): Json<RawSearchRequest>,
) -> Result<Json<JourneySearchResponse>, AppError> {
    let now = Local::now();
    let request = SearchRequest::from_raw(&raw, now.date_naive(), now.time())?;

    // An unloaded catalog cannot vouch for any code, so only a loaded one
    // rejects unknown stations.
    if state.catalog_status.is_ready() {
        for code in [&request.origin, &request.destination] {
            if state.catalog.get_by_code(code).is_none() {
                return Err(AppError::NotFound {
                    message: format!("station not found: {code}"),
                });
            }
        }
    }

    let found = state.journeys.search_cached(&request).await?;
    let criteria = params.criteria();
    let ranking = params.ranking();
    let order = params.order();
    let limit = params.limit();
    let journeys = journeys::rank(&found, &criteria, ranking, order, limit);

    info!(
        origin = %request.origin,
        destination = %request.destination,
        date = %request.date,
        found = found.len(),
        returned = journeys.len(),
        "journey search"
    );

    let metadata = SearchMetadata {
        total_found: found.len(),
        returned_count: journeys.len(),
        query: request,
        sort_by: ranking,
        order,
        limit,
        filters: criteria,
    };

    Ok(Json(JourneySearchResponse { journeys, metadata }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RequestError> for AppError {
    fn from(e: RequestError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<JourneyError> for AppError {
    fn from(e: JourneyError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
