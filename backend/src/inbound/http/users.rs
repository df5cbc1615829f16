//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users?skip=0&limit=10
//! GET    /api/v1/users/{user_id}
//! POST   /api/v1/users {"name":"张三","email":"zhangsan@example.com","age":25}
//! PUT    /api/v1/users/{user_id} {"name":"李四","age":30}
//! DELETE /api/v1/users/{user_id}
//! ```

use actix_web::web;
use chrono::{DateTime, Utc};
use pagination::{DEFAULT_LIMIT, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Age, NewUser, User, UserChanges, UserName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    AcknowledgementEnvelope, ErrorEnvelope, UserEnvelope, UserPageEnvelope,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    BodyField, FieldType, FieldViolation, Location, ValidationFailure, decode_body,
};

/// Message returned after a successful create.
pub const USER_CREATED_MESSAGE: &str = "用户创建成功";
/// Message returned after a successful update.
pub const USER_UPDATED_MESSAGE: &str = "用户更新成功";
/// Message returned after a successful delete.
pub const USER_DELETED_MESSAGE: &str = "用户删除成功";

/// Query parameters parsed as unsigned integers.
pub const UNSIGNED_QUERY_FIELDS: &[&str] = &["skip", "limit"];

const CREATE_FIELDS: &[BodyField] = &[
    BodyField::required("name", FieldType::String),
    BodyField::required("email", FieldType::String),
    BodyField::optional("age", FieldType::Integer),
];

const UPDATE_FIELDS: &[BodyField] = &[
    BodyField::optional("name", FieldType::String),
    BodyField::optional("email", FieldType::String),
    BodyField::optional("age", FieldType::Integer),
];

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[schema(example = json!({"name": "张三", "email": "zhangsan@example.com", "age": 25}))]
pub struct UserCreateRequest {
    /// User name, 1 to 50 characters.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Age between 0 and 150.
    #[serde(default)]
    pub age: Option<i64>,
}

impl TryFrom<UserCreateRequest> for NewUser {
    type Error = ValidationFailure;

    fn try_from(value: UserCreateRequest) -> Result<Self, Self::Error> {
        let name = UserName::new(value.name);
        let age = value.age.map(Age::new).transpose();
        match (name, age) {
            (Ok(name), Ok(age)) => Ok(Self {
                name,
                email: value.email,
                age,
            }),
            (name, age) => Err(ValidationFailure::default()
                .with_user_field("name", name.err())
                .with_user_field("age", age.err())),
        }
    }
}

/// Request body for `PUT /api/v1/users/{user_id}`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[schema(example = json!({"name": "李四", "age": 30}))]
pub struct UserUpdateRequest {
    /// Replacement name, 1 to 50 characters.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement contact address.
    #[serde(default)]
    pub email: Option<String>,
    /// Replacement age between 0 and 150.
    #[serde(default)]
    pub age: Option<i64>,
}

impl TryFrom<UserUpdateRequest> for UserChanges {
    type Error = ValidationFailure;

    fn try_from(value: UserUpdateRequest) -> Result<Self, Self::Error> {
        let name = value.name.map(UserName::new).transpose();
        let age = value.age.map(Age::new).transpose();
        match (name, age) {
            (Ok(name), Ok(age)) => Ok(Self {
                name,
                email: value.email,
                age,
            }),
            (name, age) => Err(ValidationFailure::default()
                .with_user_field("name", name.err())
                .with_user_field("age", age.err())),
        }
    }
}

/// User as rendered in responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    /// Identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Display name.
    #[schema(example = "user1")]
    pub name: String,
    /// Contact address.
    #[schema(example = "user1@example.com")]
    pub email: String,
    /// Age in years.
    #[schema(example = 21)]
    pub age: Option<i64>,
    /// Moment the record was materialised.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            age: user.age(),
            created_at: user.created_at(),
        }
    }
}

/// Query parameters for the users listing.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Number of users to skip.
    #[serde(default)]
    #[param(minimum = 0, example = 0)]
    pub skip: u32,
    /// Number of users to return.
    #[serde(default = "default_limit")]
    #[param(minimum = 0, example = 10)]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// One page of users.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserPage {
    /// Reported size of the whole collection.
    #[schema(example = 100)]
    pub total: u64,
    /// Offset echoed from the request.
    pub skip: u32,
    /// Page size echoed from the request.
    pub limit: u32,
    /// Users on this page.
    pub users: Vec<UserResponse>,
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 400, description = "Identifier is not positive", body = ErrorEnvelope),
        (status = 404, description = "User does not exist", body = ErrorEnvelope),
        (status = 422, description = "Identifier is not an integer", body = ValidationFailure)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<Envelope<UserResponse>> {
    let user = state.users.fetch_user(path.into_inner()).await?;
    Ok(Envelope::ok(user.into()))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserCreateRequest,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 422, description = "Invalid payload", body = ValidationFailure)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<Envelope<UserResponse>> {
    let request: UserCreateRequest = decode_body(payload.into_inner(), CREATE_FIELDS)?;
    let draft = NewUser::try_from(request)?;
    let user = state.users.create_user(draft).await?;
    Ok(Envelope::created(user.into()).with_message(USER_CREATED_MESSAGE))
}

/// Update a user. Omitted fields fall back to synthesised values.
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 404, description = "User does not exist", body = ErrorEnvelope),
        (status = 422, description = "Invalid payload or identifier", body = ValidationFailure)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<Value>,
) -> ApiResult<Envelope<UserResponse>> {
    let request: UserUpdateRequest = decode_body(payload.into_inner(), UPDATE_FIELDS)?;
    let changes = UserChanges::try_from(request)?;
    let user = state.users.update_user(path.into_inner(), changes).await?;
    Ok(Envelope::ok(user.into()).with_message(USER_UPDATED_MESSAGE))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = AcknowledgementEnvelope),
        (status = 404, description = "User does not exist", body = ErrorEnvelope),
        (status = 422, description = "Identifier is not an integer", body = ValidationFailure)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<Envelope<()>> {
    state.users.delete_user(path.into_inner()).await?;
    Ok(Envelope::acknowledged(USER_DELETED_MESSAGE))
}

/// List users page by page.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users", body = UserPageEnvelope),
        (status = 422, description = "Invalid paging parameters", body = ValidationFailure)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<Envelope<UserPage>> {
    let ListUsersQuery { skip, limit } = query.into_inner();
    let request = PageRequest::bounded(skip, limit, state.max_page_limit)
        .map_err(limit_violation)?;
    let page = state.users.list_users(request).await?.map(UserResponse::from);
    Ok(Envelope::ok(UserPage {
        total: page.total(),
        skip: page.skip(),
        limit: page.limit(),
        users: page.into_items(),
    }))
}

fn limit_violation(error: PageRequestError) -> ValidationFailure {
    let PageRequestError::LimitTooLarge { max, .. } = error;
    ValidationFailure::single(FieldViolation::new(
        Location::Query,
        Some("limit"),
        "less_than_equal",
        format!("Input should be less than or equal to {max}"),
    ))
}
