//! JWT authentication middleware.
//!
//! Both layers verify the bearer token, resolve it to a live user and insert
//! the resulting [`Actor`] into the request extensions for handlers to take
//! with `Extension<Actor>`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::api::AppState;
use crate::domain::Actor;
use crate::errors::{AppError, AppResult};
use crate::services::Claims;

fn bearer_claims(state: &AppState, request: &Request) -> AppResult<Claims> {
    let header = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::Unauthorized)?;

    state.auth_service.verify_token(header.token())
}

/// Any authenticated user.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = bearer_claims(&state, &request)?;
    let actor: Actor = state.auth_service.resolve_actor(&claims).await?;

    request.extensions_mut().insert(actor);

    Ok(next.run(request).await)
}

/// Authenticated user whose stored role is admin.
pub async fn admin_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = bearer_claims(&state, &request)?;
    let actor: Actor = state.auth_service.resolve_admin(&claims).await?;

    request.extensions_mut().insert(actor);

    Ok(next.run(request).await)
}
