//! User management controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use roster_core::ErrorResponse;
use roster_service::{CreateUserRequest, StatusResponse, UpdateUserRequest, UserResponse};
use tracing::debug;

/// Creates the user router, mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user).put(update_user))
        .route("/:username", get(get_user).delete(delete_user))
}

/// List all users, ordered by id.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    debug!("List users request");

    let response = state.user_service.list_users().await?;
    ok(response)
}

/// Get a user by username.
#[utoipa::path(
    get,
    path = "/users/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", username);

    let response = state.user_service.get_user_by_username(&username).await?;
    ok(response)
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Missing field or username taken", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Create user request: {:?}", request.username);

    let response = state.user_service.create_user(request).await?;
    ok(response)
}

/// Replace a user's username and description.
#[utoipa::path(
    put,
    path = "/users",
    tag = "users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 404, description = "No user with that id", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {:?}", request.id);

    let response = state.user_service.update_user(request).await?;
    ok(response)
}

/// Delete a user by username.
#[utoipa::path(
    delete,
    path = "/users/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "User deleted", body = StatusResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<StatusResponse> {
    debug!("Delete user request: {}", username);

    state.user_service.delete_user(&username).await?;
    ok(StatusResponse::ok())
}
