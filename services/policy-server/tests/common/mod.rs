use warden_authz::PolicySource;
use warden_server::app::{build_router, AppState};
use warden_server::rbac::engine::PolicyEngine;

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

pub async fn app() -> axum::routing::RouterIntoService<axum::body::Body, ()> {
    let engine = PolicyEngine::load(&PolicySource::Embedded, false)
        .await
        .expect("engine");
    build_router(AppState { engine }).into_service()
}
