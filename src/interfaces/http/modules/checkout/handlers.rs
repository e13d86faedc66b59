//! Checkout handler

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::domain::identity::RequestContext;
use crate::interfaces::http::common::{error_response, ApiError, ApiResponse};
use crate::interfaces::http::modules::orders::OrderDto;
use crate::interfaces::http::AppState;

/// Place an order for everything in the caller's cart.
///
/// Either the order exists, the cart is empty and every vehicle is taken,
/// or nothing changed at all.
#[utoipa::path(
    post,
    path = "/api/v1/checkout",
    tag = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderDto>),
        (status = 409, description = "Cart is empty or a vehicle is no longer available"),
        (status = 500, description = "Order could not be placed, nothing was changed")
    )
)]
pub async fn checkout(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<(StatusCode, Json<ApiResponse<OrderDto>>), ApiError> {
    let order = state.checkout.checkout(&ctx).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order.into()))))
}
