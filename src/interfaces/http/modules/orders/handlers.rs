//! Order history handlers

use axum::{extract::State, Extension, Json};

use super::dto::OrderDto;
use crate::domain::identity::RequestContext;
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult};
use crate::interfaces::http::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's orders, newest first", body = ApiResponse<Vec<OrderDto>>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_orders(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<Vec<OrderDto>> {
    let orders = state.orders.list_for_user(&ctx).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        orders.into_iter().map(OrderDto::from).collect(),
    )))
}
