//! Review handlers.

use axum::{
    extract::{Extension, State},
    middleware,
    response::Json,
    routing::{get, patch, post},
    Router,
};

use crate::api::extractors::{EntityId, ValidatedJson};
use crate::api::middleware::auth_middleware;
use crate::api::AppState;
use crate::domain::{Actor, InsertReview, Review, UpdateReview};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Create review routes, including the ones nested under a poem.
pub fn review_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/poems/:id/reviews", get(list_reviews))
        .route("/reviews/:id", get(get_review));

    let protected = Router::new()
        .route("/poems/:id/reviews", post(create_review))
        .route("/reviews/:id", patch(update_review).delete(delete_review))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Review a poem
#[utoipa::path(
    post,
    path = "/api/v1/poems/{id}/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Poem ID")),
    request_body = InsertReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Poem not found")
    )
)]
pub async fn create_review(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    EntityId(poem_id): EntityId,
    ValidatedJson(payload): ValidatedJson<InsertReview>,
) -> AppResult<Created<Review>> {
    let review = state
        .review_service
        .create_review(&actor, poem_id, payload)
        .await?;
    Ok(Created(review))
}

/// Reviews of a poem
#[utoipa::path(
    get,
    path = "/api/v1/poems/{id}/reviews",
    tag = "Reviews",
    params(("id" = i32, Path, description = "Poem ID")),
    responses(
        (status = 200, description = "Reviews", body = Vec<Review>),
        (status = 404, description = "Poem not found")
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    EntityId(poem_id): EntityId,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.review_service.list_reviews(poem_id).await?;
    Ok(Json(reviews))
}

/// Get review by ID
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review", body = Review),
        (status = 404, description = "Review not found")
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Review>> {
    let review = state.review_service.get_review(id).await?;
    Ok(Json(review))
}

/// Change body and rating (author or admin)
#[utoipa::path(
    patch,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review ID")),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdateReview>,
) -> AppResult<Json<Review>> {
    let review = state.review_service.update_review(&actor, id, payload).await?;
    Ok(Json(review))
}

/// Delete a review (author or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<MessageResponse>> {
    state.review_service.delete_review(&actor, id).await?;
    Ok(Json(MessageResponse::new("Review deleted")))
}
