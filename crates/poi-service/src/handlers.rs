//! Handlers for the `/api/v1/pois` routes.
//!
//! Each handler validates its input, runs the store call on the blocking
//! pool and formats the result. Extractor rejections are turned into problem
//! documents here rather than axum's plain-text defaults.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;
use tracing::{info, warn};

use poi_lib::{NewPoi, PoiId, PoiPatch, within_distance};
use poi_service_shared::{
    AppState, CreatePoiRequest, DeleteResponse, INTERNAL_ERROR_DETAIL, NameSearchQuery,
    PoiResponse, ProblemDetails, ProximitySearchRequest, SearchResponse, StoreError,
    UpdatePoiRequest, Validate,
    extract_or_generate_request_id, from_json_rejection, from_path_rejection,
    from_query_rejection, from_store_error, record_poi_mutation, record_poi_query,
    record_query_results,
};

/// HTTP response - either a JSON body with its status or an RFC 9457 error.
#[derive(Debug)]
pub enum Response<T> {
    Success(StatusCode, T),
    Error(ProblemDetails),
}

impl<T> Response<T> {
    fn ok(body: T) -> Self {
        Response::Success(StatusCode::OK, body)
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(status, body) => (status, Json(body)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

fn outcome(error: &StoreError) -> &'static str {
    if error.is_validation() { "invalid" } else { "error" }
}

/// Map a failed mutation to its response.
///
/// Validation errors stay problem documents. Storage failures keep the
/// mutation envelope with `success: false` and a generic message; the cause
/// is only logged.
fn mutation_failure<T>(
    error: &StoreError,
    request_id: &str,
    failed: impl FnOnce(&'static str) -> T,
) -> Response<T> {
    let problem = from_store_error(error, request_id);
    if error.is_validation() {
        Response::Error(problem)
    } else {
        Response::Success(problem.status_code(), failed(INTERNAL_ERROR_DETAIL))
    }
}

/// Handle GET /api/v1/pois.
pub async fn list_pois(State(state): State<AppState>, headers: HeaderMap) -> Response<SearchResponse> {
    let request_id = extract_or_generate_request_id(&headers);
    record_poi_query("list");

    match state.with_store(|store| store.get_all()).await {
        Ok(pois) => {
            record_query_results(pois.len(), "list");
            info!(request_id = %request_id, count = pois.len(), "listed pois");
            Response::ok(SearchResponse::from(pois))
        }
        Err(e) => Response::Error(from_store_error(&e, request_id.as_str())),
    }
}

/// Handle POST /api/v1/pois.
pub async fn create_poi(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreatePoiRequest>, JsonRejection>,
) -> Response<PoiResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            record_poi_mutation("create", "invalid");
            return Response::Error(from_json_rejection(&rejection, request_id.as_str()));
        }
    };

    if let Err(problem) = request.validate(request_id.as_str()) {
        record_poi_mutation("create", "invalid");
        return Response::Error(*problem);
    }

    let new_poi = NewPoi::from(request);
    match state.with_store(move |store| store.create(&new_poi)).await {
        Ok(poi) => {
            record_poi_mutation("create", "ok");
            info!(request_id = %request_id, id = poi.id, name = %poi.name, "poi created");
            Response::Success(StatusCode::CREATED, PoiResponse::created(poi))
        }
        Err(e) => {
            record_poi_mutation("create", outcome(&e));
            mutation_failure(&e, request_id.as_str(), PoiResponse::failed)
        }
    }
}

/// Handle GET /api/v1/pois/search?name=...
pub async fn search_by_name(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<NameSearchQuery>, QueryRejection>,
) -> Response<SearchResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let NameSearchQuery { name } = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return Response::Error(from_query_rejection(&rejection, request_id.as_str()));
        }
    };

    record_poi_query("name");
    info!(request_id = %request_id, query = %name, "searching pois by name");

    match state.with_store(move |store| store.find_by_name(&name)).await {
        Ok(pois) => {
            record_query_results(pois.len(), "name");
            Response::ok(SearchResponse::from(pois))
        }
        Err(e) => Response::Error(from_store_error(&e, request_id.as_str())),
    }
}

/// Handle POST /api/v1/pois/nearby.
pub async fn nearby(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ProximitySearchRequest>, JsonRejection>,
) -> Response<SearchResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return Response::Error(from_json_rejection(&rejection, request_id.as_str()));
        }
    };

    if let Err(problem) = request.validate(request_id.as_str()) {
        return Response::Error(*problem);
    }

    record_poi_query("proximity");
    let query = request.query();
    info!(
        request_id = %request_id,
        x = request.x,
        y = request.y,
        max_distance = request.max_distance,
        "searching pois by proximity"
    );

    match state
        .with_store(move |store| Ok(within_distance(store.get_all()?, &query)))
        .await
    {
        Ok(pois) => {
            record_query_results(pois.len(), "proximity");
            Response::ok(SearchResponse::from(pois))
        }
        Err(e) => Response::Error(from_store_error(&e, request_id.as_str())),
    }
}

/// Handle GET /api/v1/pois/{id}.
pub async fn get_poi(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<PoiId>, PathRejection>,
) -> Response<PoiResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            return Response::Error(from_path_rejection(&rejection, request_id.as_str()));
        }
    };

    record_poi_query("get");
    match state.with_store(move |store| store.get(id)).await {
        Ok(Some(poi)) => Response::ok(PoiResponse::found(poi)),
        Ok(None) => {
            info!(request_id = %request_id, id, "poi not found");
            Response::Success(StatusCode::NOT_FOUND, PoiResponse::not_found(id))
        }
        Err(e) => Response::Error(from_store_error(&e, request_id.as_str())),
    }
}

/// Handle PUT /api/v1/pois/{id}.
///
/// Fields absent from the body keep their stored values.
pub async fn update_poi(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<PoiId>, PathRejection>,
    payload: Result<Json<UpdatePoiRequest>, JsonRejection>,
) -> Response<PoiResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            record_poi_mutation("update", "invalid");
            return Response::Error(from_path_rejection(&rejection, request_id.as_str()));
        }
    };

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            record_poi_mutation("update", "invalid");
            return Response::Error(from_json_rejection(&rejection, request_id.as_str()));
        }
    };

    if let Err(problem) = request.validate(request_id.as_str()) {
        record_poi_mutation("update", "invalid");
        return Response::Error(*problem);
    }

    let patch = PoiPatch::from(request);
    match state.with_store(move |store| store.update(id, &patch)).await {
        Ok(Some(poi)) => {
            record_poi_mutation("update", "ok");
            info!(request_id = %request_id, id, "poi updated");
            Response::ok(PoiResponse::updated(poi))
        }
        Ok(None) => {
            record_poi_mutation("update", "not_found");
            warn!(request_id = %request_id, id, "update of unknown poi");
            Response::Success(StatusCode::NOT_FOUND, PoiResponse::not_found(id))
        }
        Err(e) => {
            record_poi_mutation("update", outcome(&e));
            mutation_failure(&e, request_id.as_str(), PoiResponse::failed)
        }
    }
}

/// Handle DELETE /api/v1/pois/{id}.
pub async fn delete_poi(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<PoiId>, PathRejection>,
) -> Response<DeleteResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            record_poi_mutation("delete", "invalid");
            return Response::Error(from_path_rejection(&rejection, request_id.as_str()));
        }
    };

    match state.with_store(move |store| store.delete(id)).await {
        Ok(true) => {
            record_poi_mutation("delete", "ok");
            info!(request_id = %request_id, id, "poi deleted");
            Response::ok(DeleteResponse::deleted(id))
        }
        Ok(false) => {
            record_poi_mutation("delete", "not_found");
            Response::Success(StatusCode::NOT_FOUND, DeleteResponse::not_found(id))
        }
        Err(e) => {
            record_poi_mutation("delete", outcome(&e));
            mutation_failure(&e, request_id.as_str(), DeleteResponse::failed)
        }
    }
}
