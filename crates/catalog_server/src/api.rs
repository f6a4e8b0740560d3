//! HTTP routes for the product catalog.
//!
//! # Responsibility
//! - Map each route + verb onto exactly one `ProductService` call.
//! - Decode request bodies into typed inputs and shape JSON responses.
//!
//! # Invariants
//! - List responses never carry `description`.
//! - Success bodies for writes are fixed `{"message": ...}` objects.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use catalog_core::{NewProduct, Product, ProductId, ProductPatch, ProductSummary};
use log::info;
use serde::Serialize;
use std::time::Instant;

pub const CREATED_MESSAGE: &str = "Product created successfully";
pub const UPDATED_MESSAGE: &str = "Product updated successfully";
pub const DELETED_MESSAGE: &str = "Product deleted successfully";

/// Body returned by create/update/delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    fn new(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

/// Builds the catalog router around an already-opened store.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    let products = state.with_service(|service| service.list_products()).await?;
    Ok(Json(products))
}

async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<ProductId>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = path?;
    let product = state
        .with_service(move |service| service.get_product(id))
        .await?;
    Ok(Json(product))
}

async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(product) = payload?;
    state
        .with_service(move |service| service.create_product(&product))
        .await?;
    Ok((StatusCode::CREATED, MessageResponse::new(CREATED_MESSAGE)))
}

async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<ProductId>, PathRejection>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            // Unknown ids answer 404 before the body is looked at.
            state
                .with_service(move |service| service.get_product(id))
                .await?;
            return Err(rejection.into());
        }
    };
    state
        .with_service(move |service| service.update_product(id, &patch))
        .await?;
    Ok(MessageResponse::new(UPDATED_MESSAGE))
}

async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<ProductId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    state
        .with_service(move |service| service.delete_product(id))
        .await?;
    Ok(MessageResponse::new(DELETED_MESSAGE))
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=http method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
