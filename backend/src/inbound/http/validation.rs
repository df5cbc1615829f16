//! Request validation failures.
//!
//! Validation failures bypass the envelope: they are answered with HTTP 422
//! and a body of the form `{"detail": [{"loc": [...], "msg": "...", "type":
//! "..."}]}`. The same shape covers malformed JSON bodies, path segments and
//! query strings, so extractor errors are routed here through the handlers
//! registered in [`crate::inbound::http::routes::configure`].

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::error::Category;
use utoipa::ToSchema;

use crate::domain::UserValidationError;
use crate::inbound::http::error::ApiError;

const INT_PARSING_MESSAGE: &str =
    "Input should be a valid integer, unable to parse string as an integer";

/// Part of the request a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// JSON request body.
    Body,
    /// Path segment.
    Path,
    /// Query string.
    Query,
}

impl Location {
    fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Path => "path",
            Self::Query => "query",
        }
    }
}

/// One rejected input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Location of the input, e.g. `["body", "name"]`.
    #[schema(example = json!(["body", "name"]))]
    pub loc: Vec<String>,
    /// Human-readable explanation.
    #[schema(example = "String should have at least 1 character")]
    pub msg: String,
    /// Machine-readable violation kind.
    #[serde(rename = "type")]
    #[schema(example = "string_too_short")]
    pub kind: String,
}

impl FieldViolation {
    /// Violation at `location`, optionally narrowed to `field`.
    pub fn new(
        location: Location,
        field: Option<&str>,
        kind: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        let mut loc = vec![location.as_str().to_owned()];
        loc.extend(field.map(str::to_owned));
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// Violation for a body field rejected by a domain constructor.
    pub fn from_user_field(field: &str, error: &UserValidationError) -> Self {
        let (kind, msg) = match *error {
            UserValidationError::NameTooShort { min } => {
                let unit = if min == 1 { "character" } else { "characters" };
                (
                    "string_too_short",
                    format!("String should have at least {min} {unit}"),
                )
            }
            UserValidationError::NameTooLong { max } => (
                "string_too_long",
                format!("String should have at most {max} characters"),
            ),
            UserValidationError::AgeTooLow { min } => (
                "greater_than_equal",
                format!("Input should be greater than or equal to {min}"),
            ),
            UserValidationError::AgeTooHigh { max } => (
                "less_than_equal",
                format!("Input should be less than or equal to {max}"),
            ),
        };
        Self::new(Location::Body, Some(field), kind, msg)
    }
}

/// Collection of violations answered with HTTP 422.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, thiserror::Error,
)]
#[error("request validation failed with {} violation(s)", .detail.len())]
pub struct ValidationFailure {
    /// Every violation found in the request.
    pub detail: Vec<FieldViolation>,
}

impl ValidationFailure {
    /// Failure holding a single violation.
    pub fn single(violation: FieldViolation) -> Self {
        Self {
            detail: vec![violation],
        }
    }

    /// Append a violation for `field` when `error` is present.
    #[must_use]
    pub fn with_user_field(mut self, field: &str, error: Option<UserValidationError>) -> Self {
        if let Some(error) = error {
            self.detail
                .push(FieldViolation::from_user_field(field, &error));
        }
        self
    }

    fn from_json_error(error: &JsonPayloadError) -> Self {
        let violation = match error {
            JsonPayloadError::Deserialize(source) => match source.classify() {
                Category::Data => data_violation(source),
                _ => FieldViolation::new(
                    Location::Body,
                    None,
                    "json_invalid",
                    format!("JSON decode error: {source}"),
                ),
            },
            JsonPayloadError::ContentType => FieldViolation::new(
                Location::Body,
                None,
                "content_type",
                "Expected a JSON body sent with Content-Type: application/json",
            ),
            other => FieldViolation::new(Location::Body, None, "body_invalid", other.to_string()),
        };
        Self::single(violation)
    }

    fn from_path_error(request: &HttpRequest) -> Self {
        let names: Vec<&str> = request.match_info().iter().map(|(name, _)| name).collect();
        let field = match names.as_slice() {
            [name] => Some(*name),
            _ => None,
        };
        Self::single(FieldViolation::new(
            Location::Path,
            field,
            "int_parsing",
            INT_PARSING_MESSAGE,
        ))
    }

    fn from_query_error(
        error: &QueryPayloadError,
        request: &HttpRequest,
        unsigned_fields: &[&str],
    ) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(request.query_string())
            .map(web::Query::into_inner)
            .unwrap_or_default();
        let violation = pairs
            .iter()
            .filter(|(key, _)| unsigned_fields.contains(&key.as_str()))
            .find(|(_, value)| value.parse::<u32>().is_err())
            .map(|(key, value)| match value.parse::<i128>() {
                Ok(number) if number < 0 => FieldViolation::new(
                    Location::Query,
                    Some(key.as_str()),
                    "greater_than_equal",
                    "Input should be greater than or equal to 0",
                ),
                Ok(number) if number > i128::from(u32::MAX) => FieldViolation::new(
                    Location::Query,
                    Some(key.as_str()),
                    "less_than_equal",
                    format!("Input should be less than or equal to {}", u32::MAX),
                ),
                _ => FieldViolation::new(
                    Location::Query,
                    Some(key.as_str()),
                    "int_parsing",
                    INT_PARSING_MESSAGE,
                ),
            })
            .unwrap_or_else(|| {
                FieldViolation::new(Location::Query, None, "query_invalid", error.to_string())
            });
        Self::single(violation)
    }
}

fn data_violation(source: &serde_json::Error) -> FieldViolation {
    let text = source.to_string();
    let missing = text
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());
    match missing {
        Some(field) => FieldViolation::new(Location::Body, Some(field), "missing", "Field required"),
        None => FieldViolation::new(Location::Body, None, "type_error", source.to_string()),
    }
}

/// JSON type a body field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// JSON string.
    String,
    /// JSON integer that fits in an `i64`.
    Integer,
}

impl FieldType {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64(),
        }
    }

    fn violation(self, field: &str) -> FieldViolation {
        let (kind, msg) = match self {
            Self::String => ("string_type", "Input should be a valid string"),
            Self::Integer => ("int_type", "Input should be a valid integer"),
        };
        FieldViolation::new(Location::Body, Some(field), kind, msg)
    }
}

/// Expected shape of one field of a JSON request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyField {
    /// Key in the JSON object.
    pub name: &'static str,
    /// Type the value must carry.
    pub kind: FieldType,
    /// Whether the key must be present. Optional keys also accept `null`.
    pub required: bool,
}

impl BodyField {
    /// Field that must be present.
    pub const fn required(name: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// Field that may be omitted or `null`.
    pub const fn optional(name: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Check `body` against `fields`, reporting every offending field, then
/// deserialise it into `T`.
///
/// # Errors
/// Returns a [`ValidationFailure`] when the body is not an object, a required
/// field is absent or a field carries the wrong JSON type.
pub fn decode_body<T: DeserializeOwned>(
    body: Value,
    fields: &[BodyField],
) -> Result<T, ValidationFailure> {
    let Value::Object(map) = body else {
        return Err(ValidationFailure::single(FieldViolation::new(
            Location::Body,
            None,
            "model_attributes_type",
            "Input should be a valid dictionary or object to extract fields from",
        )));
    };
    let detail: Vec<FieldViolation> = fields
        .iter()
        .filter_map(|field| match map.get(field.name) {
            None if field.required => Some(FieldViolation::new(
                Location::Body,
                Some(field.name),
                "missing",
                "Field required",
            )),
            None => None,
            Some(Value::Null) if !field.required => None,
            Some(value) if field.kind.accepts(value) => None,
            Some(_) => Some(field.kind.violation(field.name)),
        })
        .collect();
    if !detail.is_empty() {
        return Err(ValidationFailure { detail });
    }
    serde_json::from_value(Value::Object(map))
        .map_err(|source| ValidationFailure::single(data_violation(&source)))
}

/// Error handler for `web::JsonConfig`.
pub fn json_error_handler(error: JsonPayloadError, _request: &HttpRequest) -> actix_web::Error {
    ApiError::from(ValidationFailure::from_json_error(&error)).into()
}

/// Error handler for `web::PathConfig`. Path parameters are integers.
pub fn path_error_handler(_error: PathError, request: &HttpRequest) -> actix_web::Error {
    ApiError::from(ValidationFailure::from_path_error(request)).into()
}

/// Build an error handler for `web::QueryConfig` that locates the offending
/// parameter among `unsigned_fields`.
pub fn query_error_handler(
    unsigned_fields: &'static [&'static str],
) -> impl Fn(QueryPayloadError, &HttpRequest) -> actix_web::Error + Send + Sync + 'static {
    move |error, request| {
        ApiError::from(ValidationFailure::from_query_error(
            &error,
            request,
            unsigned_fields,
        ))
        .into()
    }
}
