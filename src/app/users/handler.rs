//! 用户处理器

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::info;

use super::{
    model::{CreateUserRequest, CreateUserResponse, User},
    service::UserService,
};
use crate::core::{config::LookupPolicy, error::CoreError};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub lookup: LookupPolicy,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
        .with_state(state)
}

/// 十进制前导整数解析：允许前导空白和正负号，只取开头连续的数字。
/// `"1abc"` 得到 1，`"abc"` 得到 `None`。
pub fn parse_user_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: i64 = rest[..end].parse().ok()?;

    Some(if negative { -value } else { value })
}

/// Get all users
///
/// Returns a list of users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "A list of users", body = [User])
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, CoreError> {
    let users = state.user_service.list_all()?;
    Ok(Json(users))
}

/// Get user by ID
///
/// Returns a single user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "The user ID")
    ),
    responses(
        (status = 200, description = "A user object", body = User),
        (status = 404, description = "User not found", body = String, content_type = "text/plain")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, CoreError> {
    // 路径无法解码、解析失败和策略不允许的 ID 都按 404 处理
    let id = raw_id
        .ok()
        .and_then(|Path(raw_id)| parse_user_id(&raw_id))
        .filter(|id| state.lookup.admits(*id))
        .ok_or_else(|| CoreError::NotFound("User not found".to_string()))?;

    let user = state.user_service.find_by_id(id)?;
    Ok(Json(user))
}

/// Create a new user
///
/// Creates a new user with the given details
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = CreateUserResponse),
        (status = 400, description = "Bad request", body = crate::core::response::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUserResponse>), CoreError> {
    let Json(payload) = payload.map_err(|rejection| CoreError::BadRequest(rejection.body_text()))?;

    let (name, age) = payload
        .required_fields()
        .ok_or_else(|| CoreError::BadRequest("Name and age are required".to_string()))?;

    let user = state.user_service.create_user(name, age)?;
    info!(id = user.id, name = %user.name, "用户创建成功");

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("1"), Some(1));
        assert_eq!(parse_user_id("  42"), Some(42));
        assert_eq!(parse_user_id("007"), Some(7));
        assert_eq!(parse_user_id("-5"), Some(-5));
        assert_eq!(parse_user_id("+8"), Some(8));
        assert_eq!(parse_user_id("1abc"), Some(1));
        assert_eq!(parse_user_id("abc"), None);
        assert_eq!(parse_user_id(""), None);
        assert_eq!(parse_user_id("-"), None);
        assert_eq!(parse_user_id("99999999999999999999999"), None);
    }
}
