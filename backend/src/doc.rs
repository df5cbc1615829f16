//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint together with the envelope
//! wrappers from [`crate::inbound::http::schemas`] and the raw validation
//! body. The document is served next to Swagger UI and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::health::{HealthReport, RootMessage};
use crate::inbound::http::schemas::{
    AcknowledgementEnvelope, ErrorEnvelope, HealthEnvelope, RootEnvelope, UserEnvelope,
    UserPageEnvelope,
};
use crate::inbound::http::users::{UserCreateRequest, UserPage, UserResponse, UserUpdateRequest};
use crate::inbound::http::validation::{FieldViolation, ValidationFailure};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Starter API",
        description = "User management example API with a uniform response envelope.",
        version = "1.0.0"
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::health,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_users,
    ),
    components(schemas(
        UserCreateRequest,
        UserUpdateRequest,
        UserResponse,
        UserPage,
        RootMessage,
        HealthReport,
        UserEnvelope,
        UserPageEnvelope,
        AcknowledgementEnvelope,
        ErrorEnvelope,
        HealthEnvelope,
        RootEnvelope,
        ValidationFailure,
        FieldViolation,
    )),
    tags(
        (name = "users", description = "User management"),
        (name = "system", description = "Service information"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.
    //!
    //! Path registration is covered by the behaviour tests in
    //! `backend/tests/openapi_bdd.rs`.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn user_response_schema_has_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get("UserResponse").expect("UserResponse schema");
        for field in ["id", "name", "email", "age", "created_at"] {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[test]
    fn validation_schema_uses_detail_list() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let failure = schemas.get("ValidationFailure").expect("ValidationFailure schema");
        assert_object_schema_has_field(failure, "detail");
        let violation = schemas.get("FieldViolation").expect("FieldViolation schema");
        for field in ["loc", "msg", "type"] {
            assert_object_schema_has_field(violation, field);
        }
    }
}
