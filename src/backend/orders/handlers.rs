/**
 * Order Handlers
 *
 * HTTP handlers for the order endpoints. All four routes sit behind the
 * token-proof middleware plus a permission gate, so the handlers
 * themselves carry no authentication logic; they are thin wrappers over
 * the order store.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::orders::store::{NewOrder, Order, OrderStore};

/// Request body for creating an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Customer email the order is filed under
    pub email: String,
    /// Order total
    pub total_price: f64,
}

/// Request body for updating an order's status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Create order handler for POST /api/orders.
///
/// Gated by `PLACE_ORDER`.
pub async fn create_order(
    State(orders): State<Arc<dyn OrderStore>>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = orders
        .create(NewOrder {
            email: request.email,
            total_price: request.total_price,
        })
        .await?;

    tracing::info!("Order created: {} for {}", order.id, order.email);

    Ok((StatusCode::CREATED, Json(order)))
}

/// Orders-by-email handler for GET /api/orders/email/{email}.
///
/// Gated by `VIEW_ORDERS`.
pub async fn get_orders_by_email(
    State(orders): State<Arc<dyn OrderStore>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = orders.find_by_email(&email).await?;
    Ok(Json(orders))
}

/// All-orders handler for GET /api/orders/admin/all.
///
/// Gated by `MANAGE_USERS`.
pub async fn get_all_orders(
    State(orders): State<Arc<dyn OrderStore>>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = orders.list_all().await?;
    Ok(Json(orders))
}

/// Status-update handler for PATCH /api/orders/admin/{id}/status.
///
/// Gated by `MANAGE_USERS`.
pub async fn update_order_status(
    State(orders): State<Arc<dyn OrderStore>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let order = orders
        .update_status(id, &request.status)
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!("Order {} status set to {}", order.id, order.status);

    Ok(Json(order))
}
