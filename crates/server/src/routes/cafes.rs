use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use service::cafe_service;
use tracing::info;

use crate::{errors::JsonApiError, extract::AddCafeForm, state::ServerState};

pub const NO_COFFEE_HERE: &str = "Sorry we don't have coffee at that location";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Exact, case-sensitive location
    pub loc: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdatePriceQuery {
    /// New coffee price; the row is left as is when absent
    pub new_price: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportClosedQuery {
    /// Shared secret
    pub api_key: Option<String>,
}

#[utoipa::path(
    get, path = "/random", tag = "cafes",
    responses(
        (status = 200, description = "One random cafe as {cafe: {...}}"),
        (status = 404, description = "No cafes stored: {error: {\"Not Found\": ...}}, the same shape as an unknown id")
    )
)]
pub async fn random(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let cafe = cafe_service::random_cafe(&state.db).await?;
    Ok(Json(json!({ "cafe": cafe })))
}

#[utoipa::path(
    get, path = "/all", tag = "cafes",
    responses((status = 200, description = "All cafes ordered by name as {cafes: [...]}"))
)]
pub async fn all(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let cafes = cafe_service::list_cafes(&state.db).await?;
    info!(count = cafes.len(), "list cafes");
    Ok(Json(json!({ "cafes": cafes })))
}

/// Empty results are still HTTP 200, with an `error` body.
#[utoipa::path(
    get, path = "/search/", tag = "cafes",
    params(SearchQuery),
    responses((status = 200, description = "{cafe: [...]} or {error: {\"Not Found\": ...}}"))
)]
pub async fn search(
    State(state): State<ServerState>,
    q: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let Query(q) = q?;
    let cafes = match q.loc.as_deref() {
        Some(loc) => cafe_service::search_cafes(&state.db, loc).await?,
        None => Vec::new(),
    };
    if cafes.is_empty() {
        return Ok(Json(json!({ "error": { "Not Found": NO_COFFEE_HERE } })));
    }
    Ok(Json(json!({ "cafe": cafes })))
}

/// Accepts the form as a query string (GET), or as an urlencoded or multipart body (POST).
#[utoipa::path(
    post, path = "/add/", tag = "cafes",
    request_body(
        content = crate::openapi::AddCafeFormDoc,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as multipart/form-data"
    ),
    responses(
        (status = 200, description = "Added"),
        (status = 400, description = "Missing field"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn add(
    State(state): State<ServerState>,
    AddCafeForm(input): AddCafeForm,
) -> Result<Json<Value>, JsonApiError> {
    let new_cafe = input.into_new_cafe()?;
    cafe_service::add_cafe(&state.db, new_cafe).await?;
    Ok(Json(json!({ "response": { "Success": "Successfully added the new cafe" } })))
}

#[utoipa::path(
    patch, path = "/update-price/{cafe_id}", tag = "cafes",
    params(
        ("cafe_id" = i32, Path, description = "Cafe id"),
        UpdatePriceQuery
    ),
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Unknown or malformed id")
    )
)]
pub async fn update_price(
    State(state): State<ServerState>,
    cafe_id: Result<Path<i32>, PathRejection>,
    q: Result<Query<UpdatePriceQuery>, QueryRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let Path(cafe_id) = cafe_id?;
    let Query(q) = q?;
    cafe_service::update_price(&state.db, cafe_id, q.new_price).await?;
    Ok(Json(json!({ "success": "Successfully updated the price" })))
}

#[utoipa::path(
    delete, path = "/report-closed/{cafe_id}", tag = "cafes",
    params(
        ("cafe_id" = i32, Path, description = "Cafe id"),
        ReportClosedQuery
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Wrong or missing api key, checked before the id"),
        (status = 404, description = "Unknown or malformed id")
    )
)]
pub async fn report_closed(
    State(state): State<ServerState>,
    cafe_id: Result<Path<i32>, PathRejection>,
    q: Result<Query<ReportClosedQuery>, QueryRejection>,
) -> Result<Json<Value>, JsonApiError> {
    // an unreadable query carries no usable key
    let api_key = q.ok().and_then(|Query(q)| q.api_key);
    let cafe_id = match cafe_id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            cafe_service::check_api_key(api_key.as_deref(), &state.api_key)?;
            return Err(rejection.into());
        }
    };
    cafe_service::delete_cafe(&state.db, cafe_id, api_key.as_deref(), &state.api_key).await?;
    Ok(Json(json!({ "response": { "success": "Successfully deleted the cafe from the database." } })))
}
