//! Poem handlers.

use axum::{
    extract::{Extension, State},
    middleware,
    response::Json,
    routing::{get, patch, post},
    Router,
};

use crate::api::extractors::{ApiQuery, EntityId, ValidatedJson};
use crate::api::middleware::auth_middleware;
use crate::api::AppState;
use crate::domain::{Actor, InsertPoem, Poem, PoemQuery, Ratings, UpdatePoem};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Create poem routes; reading is public, writing needs a token.
pub fn poem_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/poems", get(list_poems))
        .route("/poems/:id", get(get_poem))
        .route("/poems/:id/ratings", get(get_ratings));

    let protected = Router::new()
        .route("/poems", post(create_poem))
        .route("/poems/:id", patch(update_poem).delete(delete_poem))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Create a poem written by the caller
#[utoipa::path(
    post,
    path = "/api/v1/poems",
    tag = "Poems",
    security(("bearer_auth" = [])),
    request_body = InsertPoem,
    responses(
        (status = 201, description = "Poem created", body = Poem),
        (status = 400, description = "Validation error or unknown categories"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_poem(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<InsertPoem>,
) -> AppResult<Created<Poem>> {
    let poem = state.poem_service.create_poem(&actor, payload).await?;
    Ok(Created(poem))
}

/// List poems, optionally by category
#[utoipa::path(
    get,
    path = "/api/v1/poems",
    tag = "Poems",
    params(PoemQuery),
    responses(
        (status = 200, description = "Poems", body = Vec<Poem>)
    )
)]
pub async fn list_poems(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PoemQuery>,
) -> AppResult<Json<Vec<Poem>>> {
    let poems = state.poem_service.list_poems(query.category_id).await?;
    Ok(Json(poems))
}

/// Get poem by ID
#[utoipa::path(
    get,
    path = "/api/v1/poems/{id}",
    tag = "Poems",
    params(("id" = i32, Path, description = "Poem ID")),
    responses(
        (status = 200, description = "Poem", body = Poem),
        (status = 404, description = "Poem not found")
    )
)]
pub async fn get_poem(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Poem>> {
    let poem = state.poem_service.get_poem(id).await?;
    Ok(Json(poem))
}

/// Replace title, body and categories (writer or admin)
#[utoipa::path(
    patch,
    path = "/api/v1/poems/{id}",
    tag = "Poems",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Poem ID")),
    request_body = UpdatePoem,
    responses(
        (status = 200, description = "Poem updated", body = Poem),
        (status = 400, description = "Validation error or unknown categories"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the writer"),
        (status = 404, description = "Poem not found")
    )
)]
pub async fn update_poem(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdatePoem>,
) -> AppResult<Json<Poem>> {
    let poem = state.poem_service.update_poem(&actor, id, payload).await?;
    Ok(Json(poem))
}

/// Delete a poem with its reviews (writer or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/poems/{id}",
    tag = "Poems",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Poem ID")),
    responses(
        (status = 200, description = "Poem deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the writer"),
        (status = 404, description = "Poem not found")
    )
)]
pub async fn delete_poem(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<MessageResponse>> {
    state.poem_service.delete_poem(&actor, id).await?;
    Ok(Json(MessageResponse::new("Poem deleted")))
}

/// Rating summary of a poem
#[utoipa::path(
    get,
    path = "/api/v1/poems/{id}/ratings",
    tag = "Poems",
    params(("id" = i32, Path, description = "Poem ID")),
    responses(
        (status = 200, description = "Rating summary, all zero when nothing is reviewed", body = Ratings)
    )
)]
pub async fn get_ratings(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Ratings>> {
    let ratings = state.poem_service.get_ratings(id).await?;
    Ok(Json(ratings))
}
