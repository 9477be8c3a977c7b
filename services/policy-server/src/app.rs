//! Policy-server HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::observability;
use crate::rbac::engine::PolicyEngine;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub engine: PolicyEngine,
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    // Static segments take priority over `:user`, so `/policies` and
    // `/enforce` never resolve as user names.
    Router::new()
        .route("/api/health", axum::routing::get(api::system::health))
        .route(
            "/api/casbin/enforce",
            axum::routing::post(api::enforce::enforce),
        )
        .route(
            "/api/casbin/policies",
            axum::routing::get(api::policies::list_policies),
        )
        .route(
            "/api/casbin/add-policy",
            axum::routing::post(api::policies::add_policy),
        )
        .route(
            "/api/casbin/remove-policy",
            axum::routing::delete(api::policies::remove_policy),
        )
        .route(
            "/api/casbin/add-grouping",
            axum::routing::post(api::policies::add_grouping),
        )
        .route(
            "/api/casbin/remove-grouping",
            axum::routing::delete(api::policies::remove_grouping),
        )
        .route(
            "/api/casbin/permissions/:user",
            axum::routing::get(api::permissions::user_permissions),
        )
        .route(
            "/api/casbin/:user",
            axum::routing::get(api::permissions::permission_map),
        )
        .route(
            "/api/casbin/:user/detailed",
            axum::routing::get(api::permissions::detailed_permissions),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/api/openapi.json", ApiDoc::openapi()),
        )
        .fallback(api::system::not_found)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
