//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, category_handler, poem_handler, review_handler, user_handler,
};
use crate::domain::{
    Category, InsertCategory, InsertNewUser, InsertPoem, InsertReview, Poem, Ratings, Review,
    UpdatePassword, UpdatePoem, UpdateUser, UserDto, UserRole,
};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Poem Collection API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Poem Collection API",
        version = "0.1.0",
        description = "Poems, categories and reviews with JWT authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        user_handler::register,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::update_password,
        user_handler::delete_user,
        poem_handler::create_poem,
        poem_handler::list_poems,
        poem_handler::get_poem,
        poem_handler::update_poem,
        poem_handler::delete_poem,
        poem_handler::get_ratings,
        review_handler::create_review,
        review_handler::list_reviews,
        review_handler::get_review,
        review_handler::update_review,
        review_handler::delete_review,
        category_handler::create_category,
        category_handler::list_categories,
        category_handler::get_category,
        category_handler::update_category,
        category_handler::delete_category,
    ),
    components(
        schemas(
            UserRole,
            UserDto,
            InsertNewUser,
            UpdateUser,
            UpdatePassword,
            Poem,
            InsertPoem,
            UpdatePoem,
            Category,
            InsertCategory,
            Review,
            InsertReview,
            Ratings,
            auth_handler::LoginRequest,
            TokenResponse,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login"),
        (name = "Users", description = "Registration and account management"),
        (name = "Poems", description = "Poems and their ratings"),
        (name = "Reviews", description = "Reviews of poems"),
        (name = "Categories", description = "Poem categories")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
