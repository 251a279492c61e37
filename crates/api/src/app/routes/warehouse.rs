use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use tokio::task::JoinError;

use warehouse_core::{ErrorReason, ProductId};
use warehouse_infra::WarehouseError;
use warehouse_inventory::{NewProduct, QuantityChange, QuantityOperation};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_in_stock_products))
        .route("/order", put(order_item))
        .route("/ship", put(ship_item))
        .route("/restock", put(restock_item))
        .route("/add", post(add_new_product))
        .route("/:id", get(get_product))
}

/// Run a warehouse call on the blocking pool, inside the request's span.
///
/// Mutations wait on per-product and create mutexes (`std::sync`), which must
/// not park an async worker thread.
async fn run_blocking<T, F>(services: &Arc<AppServices>, f: F) -> Result<T, JoinError>
where
    T: Send + 'static,
    F: FnOnce(&AppServices) -> T + Send + 'static,
{
    let services = services.clone();
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(|| f(&services))).await
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    let found = match run_blocking(&services, move |s| s.warehouse().get(id)).await {
        Ok(found) => found,
        Err(e) => return errors::join_error_to_response(&ctx, e),
    };

    match found {
        Ok(Some(product)) => (StatusCode::OK, Json(product)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(&ctx, e),
    }
}

pub async fn list_in_stock_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
) -> axum::response::Response {
    let listed = match run_blocking(&services, |s| s.warehouse().list_in_stock()).await {
        Ok(listed) => listed,
        Err(e) => return errors::join_error_to_response(&ctx, e),
    };

    match listed {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::store_error_to_response(&ctx, e),
    }
}

pub async fn order_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<QuantityChange>, JsonRejection>,
) -> axum::response::Response {
    change_quantity(&services, &ctx, QuantityOperation::Reserve, body).await
}

pub async fn ship_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<QuantityChange>, JsonRejection>,
) -> axum::response::Response {
    change_quantity(&services, &ctx, QuantityOperation::Ship, body).await
}

pub async fn restock_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<QuantityChange>, JsonRejection>,
) -> axum::response::Response {
    change_quantity(&services, &ctx, QuantityOperation::Restock, body).await
}

/// Shared body of the three quantity endpoints.
///
/// A body that does not parse as a change request (missing or non-integer id,
/// for instance) is answered exactly like an unknown product.
async fn change_quantity(
    services: &Arc<AppServices>,
    ctx: &RequestContext,
    operation: QuantityOperation,
    body: Result<Json<QuantityChange>, JsonRejection>,
) -> axum::response::Response {
    let change = match body {
        Ok(Json(change)) => change,
        Err(rejection) => {
            tracing::debug!(operation = operation.as_str(), error = %rejection, "unparseable change request");
            return Json(dto::UpdateResponse::rejected(ErrorReason::InvalidRequest)).into_response();
        }
    };

    let outcome = run_blocking(services, move |s| s.warehouse().change_quantity(operation, change)).await;
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => return errors::join_error_to_response(ctx, e),
    };

    match outcome {
        Ok(_) => Json(dto::UpdateResponse::ok()).into_response(),
        Err(WarehouseError::Rejected(reason)) => Json(dto::UpdateResponse::rejected(reason)).into_response(),
        Err(WarehouseError::Store(e)) => errors::store_error_to_response(ctx, e),
    }
}

pub async fn add_new_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> axum::response::Response {
    let candidate = match body {
        Ok(Json(candidate)) => candidate,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unparseable product");
            return Json(dto::CreateResponse::<()>::rejected(ErrorReason::InvalidRequest)).into_response();
        }
    };

    let outcome = match run_blocking(&services, move |s| s.warehouse().create(&candidate)).await {
        Ok(outcome) => outcome,
        Err(e) => return errors::join_error_to_response(&ctx, e),
    };

    match outcome {
        Ok(product) => Json(dto::CreateResponse::created(product)).into_response(),
        Err(WarehouseError::Rejected(reason)) => {
            Json(dto::CreateResponse::<()>::rejected(reason)).into_response()
        }
        Err(WarehouseError::Store(e)) => errors::store_error_to_response(&ctx, e),
    }
}
