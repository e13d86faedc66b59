//! Cart API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use super::dto::{AddToCartRequest, CartCountDto, CartDto, CartItemCreated};
use crate::domain::identity::RequestContext;
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, ApiResult, EmptyData, ValidatedJson,
};
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart lines with current prices", body = ApiResponse<CartDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<CartDto> {
    let summary = state.carts.summary(&ctx).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(CartDto::new(summary, &state.currency))))
}

#[utoipa::path(
    post,
    path = "/api/v1/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Vehicle added to cart", body = ApiResponse<CartItemCreated>),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Vehicle is not available"),
        (status = 422, description = "Invalid rental window")
    )
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    ValidatedJson(request): ValidatedJson<AddToCartRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CartItemCreated>>), ApiError> {
    let (vehicle_id, window) = request.into_window().map_err(error_response)?;
    let item = state
        .carts
        .add(&ctx, vehicle_id, window)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CartItemCreated {
            id: item.id,
            vehicle_id: item.vehicle_id,
            rental_days: item.rental_days,
            created_at: item.created_at,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/cart/count",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Number of items in the cart", body = ApiResponse<CartCountDto>)
    )
)]
pub async fn cart_count(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<CartCountDto> {
    let count = state.carts.count(&ctx).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(CartCountDto { count })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart/{id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Item removed"),
        (status = 404, description = "No such item in the caller's cart")
    )
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<EmptyData> {
    state.carts.remove(&ctx, id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
