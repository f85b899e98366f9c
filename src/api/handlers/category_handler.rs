//! Category handlers.

use axum::{
    extract::{Extension, State},
    middleware,
    response::Json,
    routing::{get, patch, post},
    Router,
};

use crate::api::extractors::{EntityId, ValidatedJson};
use crate::api::middleware::admin_middleware;
use crate::api::AppState;
use crate::domain::{Actor, Category, InsertCategory, UpdateCategory};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Create category routes; every mutation is admin only.
pub fn category_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:id", get(get_category));

    let admin = Router::new()
        .route("/categories", post(create_category))
        .route(
            "/categories/:id",
            patch(update_category).delete(delete_category),
        )
        .route_layer(middleware::from_fn_with_state(state, admin_middleware));

    public.merge(admin)
}

/// Create a category (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    request_body = InsertCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Name already used")
    )
)]
pub async fn create_category(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<InsertCategory>,
) -> AppResult<Created<Category>> {
    let category = state
        .category_service
        .create_category(&actor, payload)
        .await?;
    Ok(Created(category))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Categories",
    responses((status = 200, description = "Categories", body = Vec<Category>))
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.category_service.list_categories().await?;
    Ok(Json(categories))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Category>> {
    let category = state.category_service.get_category(id).await?;
    Ok(Json(category))
}

/// Rename a category (admin only)
#[utoipa::path(
    patch,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category renamed", body = Category),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name already used")
    )
)]
pub async fn update_category(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let category = state
        .category_service
        .update_category(&actor, id, payload)
        .await?;
    Ok(Json(category))
}

/// Delete a category; linked poems remain (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<MessageResponse>> {
    state.category_service.delete_category(&actor, id).await?;
    Ok(Json(MessageResponse::new("Category deleted")))
}
