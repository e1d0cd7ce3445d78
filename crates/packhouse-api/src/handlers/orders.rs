use crate::error::{ErrorResponse, HttpAppError};
use crate::state::DocumentState;
use axum::{extract::State, Json};
use packhouse_core::models::Order;

#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    responses(
        (status = 200, description = "All orders, newest first", body = Vec<Order>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(documents))]
pub async fn list_orders(
    State(documents): State<DocumentState>,
) -> Result<Json<Vec<Order>>, HttpAppError> {
    let orders = documents.orders.list_orders().await?;
    tracing::debug!(count = orders.len(), "Listed orders");
    Ok(Json(orders))
}
