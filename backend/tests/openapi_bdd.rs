//! Behaviour tests for the generated OpenAPI document.
#[expect(dead_code, reason = "Harness fields are only partly read here.")]
#[path = "support/app.rs"]
mod app;
#[path = "support/runtime.rs"]
mod runtime;

use std::sync::Mutex;

use actix_web::test::TestRequest;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use starter::ApiDoc;
use utoipa::OpenApi;

#[derive(Default)]
struct OpenApiWorld {
    document: Option<utoipa::openapi::OpenApi>,
    served: Option<Value>,
}

impl std::fmt::Debug for OpenApiWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenApiWorld")
            .field("document", &self.document.as_ref().map(|_| "<OpenApi>"))
            .field("served", &self.served)
            .finish()
    }
}

#[fixture]
fn world() -> Mutex<OpenApiWorld> {
    Mutex::new(OpenApiWorld::default())
}

#[given("the OpenAPI document is generated")]
fn generate_openapi_document(world: &Mutex<OpenApiWorld>) {
    world.lock().expect("world lock").document = Some(ApiDoc::openapi());
}

#[when("the client fetches the served document")]
fn fetch_served_document(world: &Mutex<OpenApiWorld>) {
    let reply = runtime::dispatch(TestRequest::get().uri("/api/v1/openapi.json"));
    assert!(reply.status.is_success(), "document should be served");
    world.lock().expect("world lock").served = Some(reply.body);
}

#[then("the document lists path {path}")]
fn document_lists_path(world: &Mutex<OpenApiWorld>, path: String) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    assert!(
        doc.paths.paths.contains_key(&path),
        "{path} should be documented"
    );
}

#[then("the components section contains {schema}")]
fn components_contain(world: &Mutex<OpenApiWorld>, schema: String) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    let components = doc.components.as_ref().expect("components present");
    assert!(
        components.schemas.contains_key(&schema),
        "{schema} should be registered"
    );
}

#[then("the served document equals the generated one")]
fn served_equals_generated(world: &Mutex<OpenApiWorld>) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    let expected = serde_json::to_value(doc).expect("document serializes");
    assert_eq!(world.served.as_ref(), Some(&expected));
}

#[scenario(
    path = "tests/features/openapi.feature",
    name = "Every route is documented"
)]
fn every_route_is_documented(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi.feature",
    name = "Envelope wrappers are registered"
)]
fn envelope_wrappers_are_registered(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi.feature",
    name = "Served document matches the generated one"
)]
fn served_document_matches(world: Mutex<OpenApiWorld>) {
    drop(world);
}
