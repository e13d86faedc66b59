//! Admin API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use super::dto::{FleetStatsDto, VehicleRequest};
use crate::domain::identity::RequestContext;
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, ApiResult, EmptyData,
};
use crate::interfaces::http::modules::orders::OrderDto;
use crate::interfaces::http::modules::vehicles::VehicleDto;
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/admin/vehicles",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Whole fleet, newest first", body = ApiResponse<Vec<VehicleDto>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_fleet(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<Vec<VehicleDto>> {
    let vehicles = state.inventory.list_all(&ctx).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(VehicleDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/vehicles/stats",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Fleet counters", body = ApiResponse<FleetStatsDto>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn fleet_stats(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<FleetStatsDto> {
    let stats = state.inventory.stats(&ctx).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(stats.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/vehicles",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = ApiResponse<VehicleDto>),
        (status = 403, description = "Admin role required"),
        (status = 422, description = "Invalid vehicle attributes")
    )
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(request): Json<VehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), ApiError> {
    let vehicle = state
        .inventory
        .create(&ctx, request.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(vehicle.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/vehicles/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Vehicle id")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Vehicle not found"),
        (status = 422, description = "Invalid vehicle attributes")
    )
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<VehicleRequest>,
) -> ApiResult<VehicleDto> {
    let vehicle = state
        .inventory
        .update(&ctx, id, request.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/vehicles/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Vehicle deleted"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<EmptyData> {
    state.inventory.delete(&ctx, id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/orders",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All orders, newest first", body = ApiResponse<Vec<OrderDto>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<Vec<OrderDto>> {
    let orders = state.orders.list_all(&ctx).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        orders.into_iter().map(OrderDto::from).collect(),
    )))
}
