//! User handlers.

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
use crate::domain::{Actor, InsertNewUser, UpdatePassword, UpdateUser, UserDto};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Create user routes; registration is the only public one.
pub fn user_routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/users", post(register));

    let protected = Router::new()
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/:id/password", patch(update_password))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = InsertNewUser,
    responses(
        (status = 201, description = "User registered", body = UserDto),
        (status = 400, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<InsertNewUser>,
) -> AppResult<Created<UserDto>> {
    let user = state.user_service.register(payload).await?;
    Ok(Created(UserDto::from(user)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<UserDto>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserDto::from(user)))
}

/// Update first and/or last name (self or admin)
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<UserDto>> {
    let user = state.user_service.update_user(&actor, id, payload).await?;
    Ok(Json(UserDto::from(user)))
}

/// Change password (self or admin)
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/password",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdatePassword,
    responses(
        (status = 200, description = "Password changed", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_password(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdatePassword>,
) -> AppResult<Json<UserDto>> {
    let user = state
        .user_service
        .update_password(&actor, id, payload)
        .await?;
    Ok(Json(UserDto::from(user)))
}

/// Delete account with its poems and reviews (self or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(actor): Extension<Actor>,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<MessageResponse>> {
    state.user_service.delete_user(&actor, id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
