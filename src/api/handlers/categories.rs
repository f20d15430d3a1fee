//! Category request handlers.

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{CategoryRequest, CategoryResponse, ErrorResponse, MessageResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates category routes.
pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_categories, create_category))
        .routes(routes!(get_category, update_category, delete_category))
}

/// POST /categories - Create a category
#[utoipa::path(
    post,
    path = "/",
    tag = CATEGORY_TAG,
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse)
    )
)]
async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    info!(category_name = %req.category_name, "Creating category");
    let category = state
        .services
        .categories
        .save(None, req.into_new_category())
        .await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// PUT /categories/{id} - Replace a category
#[utoipa::path(
    put,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse)
    )
)]
async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> AppResult<Json<CategoryResponse>> {
    info!(category_id = id, "Updating category");
    let category = state
        .services
        .categories
        .save(Some(id), req.into_new_category())
        .await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// GET /categories - List all categories
#[utoipa::path(
    get,
    path = "/",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>),
        (status = 404, description = "No categories exist", body = ErrorResponse)
    )
)]
async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryResponse>>> {
    info!("Listing categories");
    let categories = state.services.categories.list().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// GET /categories/{id} - Get a category
#[utoipa::path(
    get,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CategoryResponse>> {
    info!(category_id = id, "Fetching category");
    let category = state.services.categories.get(id).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /categories/{id} - Delete an unused category
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 405, description = "Category is linked to events", body = ErrorResponse)
    )
)]
async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    info!(category_id = id, "Deleting category");
    let message = state.services.categories.delete(id).await?;
    Ok(Json(MessageResponse::new(message)))
}
