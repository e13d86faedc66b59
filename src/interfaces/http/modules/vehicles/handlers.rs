//! Catalog API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::dto::{VehicleDto, VehicleListQuery};
use crate::domain::vehicle::Segment;
use crate::domain::DomainError;
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult};
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    params(VehicleListQuery),
    responses(
        (status = 200, description = "Available vehicles ordered by name", body = ApiResponse<Vec<VehicleDto>>),
        (status = 422, description = "Unknown segment")
    )
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> ApiResult<Vec<VehicleDto>> {
    let segment = match query.segment.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(s) => Some(Segment::parse(&s.to_lowercase()).ok_or_else(|| {
            error_response(DomainError::validation("segment", format!("Unknown segment '{}'", s)))
        })?),
    };

    let vehicles = state
        .catalog
        .list_available(segment)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(VehicleDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = Uuid, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<VehicleDto> {
    let vehicle = state.catalog.get_by_id(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}
