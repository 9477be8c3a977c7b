mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{app, read_json};
use http_helpers::{get, json_request};
use tower::ServiceExt;

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let response = app.oneshot(get("/api/health")).await.expect("health");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["status"], "OK");
    assert_eq!(payload["message"], "Backend is running");
}

#[tokio::test]
async fn permission_map_groups_inherited_objects() {
    let app = app().await;
    let response = app.oneshot(get("/api/casbin/alice")).await.expect("map");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;

    let read: Vec<&str> = payload["read"]
        .as_array()
        .expect("read")
        .iter()
        .map(|value| value.as_str().unwrap())
        .collect();
    assert!(read.contains(&"users"));
    assert!(read.contains(&"settings"));
    assert!(read.contains(&"profile"));
    let mut unique = read.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), read.len());

    let write = payload["write"].as_array().expect("write");
    assert_eq!(write.len(), 3);
}

#[tokio::test]
async fn unknown_user_has_empty_grants() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(get("/api/casbin/mallory"))
        .await
        .expect("map");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, serde_json::json!({}));

    let response = app
        .oneshot(get("/api/casbin/permissions/mallory"))
        .await
        .expect("permissions");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["user"], "mallory");
    assert_eq!(payload["roles"], serde_json::json!([]));
    assert_eq!(payload["implicitPermissions"], serde_json::json!([]));
}

#[tokio::test]
async fn detailed_permissions_include_raw_and_implicit_rules() {
    let app = app().await;
    let response = app
        .oneshot(get("/api/casbin/charlie/detailed"))
        .await
        .expect("detailed");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["roles"], serde_json::json!(["user"]));
    assert_eq!(payload["rawPermissions"], serde_json::json!([]));
    assert_eq!(
        payload["permissions"],
        serde_json::json!({ "read": ["profile"], "write": ["profile"] })
    );
    let implicit = payload["implicitPermissions"].as_array().expect("implicit");
    assert_eq!(implicit.len(), 2);
    assert!(implicit.contains(&serde_json::json!(["user", "profile", "read"])));
}

#[tokio::test]
async fn user_permissions_list_roles() {
    let app = app().await;
    let response = app
        .oneshot(get("/api/casbin/permissions/bob"))
        .await
        .expect("permissions");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["user"], "bob");
    assert_eq!(payload["roles"], serde_json::json!(["manager"]));
    assert_eq!(payload["permissions"], serde_json::json!([]));
    assert!(payload["implicitPermissions"]
        .as_array()
        .expect("implicit")
        .contains(&serde_json::json!(["manager", "users", "read"])));
}

#[tokio::test]
async fn enforce_returns_decision_and_echo() {
    let app = app().await;
    let allowed = json_request(
        "POST",
        "/api/casbin/enforce",
        serde_json::json!({ "user": "bob", "object": "settings", "action": "read" }),
    );
    let response = app.clone().oneshot(allowed).await.expect("enforce");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["allowed"], true);
    assert_eq!(
        payload["request"],
        serde_json::json!({ "user": "bob", "object": "settings", "action": "read" })
    );

    let denied = json_request(
        "POST",
        "/api/casbin/enforce",
        serde_json::json!({ "user": "bob", "object": "settings", "action": "write" }),
    );
    let response = app.oneshot(denied).await.expect("enforce");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["allowed"], false);
}

#[tokio::test]
async fn enforce_rejects_missing_fields() {
    let app = app().await;
    let partial = json_request(
        "POST",
        "/api/casbin/enforce",
        serde_json::json!({ "user": "bob", "object": "settings" }),
    );
    let response = app.clone().oneshot(partial).await.expect("enforce");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json(response).await;
    assert_eq!(payload["code"], "validation_error");
    assert_eq!(
        payload["error"],
        "Missing required fields: user, object, action"
    );

    let no_body = Request::builder()
        .method("POST")
        .uri("/api/casbin/enforce")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(no_body).await.expect("enforce");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn policies_list_both_sections() {
    let app = app().await;
    let response = app
        .oneshot(get("/api/casbin/policies"))
        .await
        .expect("policies");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["policies"].as_array().expect("p").len(), 6);
    assert!(payload["groupingPolicies"]
        .as_array()
        .expect("g")
        .contains(&serde_json::json!(["alice", "admin"])));
}

#[tokio::test]
async fn add_and_remove_policy_round_trip() {
    let app = app().await;
    let rule = serde_json::json!({ "subject": "user", "object": "reports", "action": "read" });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/casbin/add-policy", rule.clone()))
        .await
        .expect("add");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["success"], true);
    assert_eq!(payload["policy"], serde_json::json!(["user", "reports", "read"]));

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/casbin/add-policy", rule.clone()))
        .await
        .expect("add again");
    assert_eq!(read_json(response).await["success"], false);

    // Inherited through admin > manager > user.
    let check = json_request(
        "POST",
        "/api/casbin/enforce",
        serde_json::json!({ "user": "alice", "object": "reports", "action": "read" }),
    );
    let response = app.clone().oneshot(check).await.expect("enforce");
    assert_eq!(read_json(response).await["allowed"], true);

    let response = app
        .clone()
        .oneshot(json_request("DELETE", "/api/casbin/remove-policy", rule.clone()))
        .await
        .expect("remove");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["success"], true);

    let response = app
        .oneshot(json_request("DELETE", "/api/casbin/remove-policy", rule))
        .await
        .expect("remove again");
    assert_eq!(read_json(response).await["success"], false);
}

#[tokio::test]
async fn policy_mutations_validate_fields() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/casbin/add-policy",
            serde_json::json!({ "subject": "user", "object": "" , "action": "read" }),
        ))
        .await
        .expect("add");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        "Missing required fields: subject, object, action"
    );

    let response = app
        .oneshot(json_request(
            "DELETE",
            "/api/casbin/remove-policy",
            serde_json::json!({}),
        ))
        .await
        .expect("remove");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn grouping_changes_grant_and_revoke_roles() {
    let app = app().await;
    let grouping = serde_json::json!({ "user": "dave", "role": "manager" });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/casbin/add-grouping", grouping.clone()))
        .await
        .expect("add grouping");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["success"], true);
    assert_eq!(payload["grouping"], serde_json::json!(["dave", "manager"]));

    let response = app
        .clone()
        .oneshot(get("/api/casbin/dave"))
        .await
        .expect("map");
    let payload = read_json(response).await;
    assert!(payload["read"]
        .as_array()
        .expect("read")
        .contains(&serde_json::json!("users")));

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            "/api/casbin/remove-grouping",
            grouping,
        ))
        .await
        .expect("remove grouping");
    assert_eq!(read_json(response).await["success"], true);

    let response = app
        .clone()
        .oneshot(get("/api/casbin/dave"))
        .await
        .expect("map");
    assert_eq!(read_json(response).await, serde_json::json!({}));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/casbin/add-grouping",
            serde_json::json!({ "user": "dave" }),
        ))
        .await
        .expect("invalid grouping");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        "Missing required fields: user, role"
    );
}

#[tokio::test]
async fn unknown_routes_return_json_not_found() {
    let app = app().await;
    let response = app
        .oneshot(get("/api/nothing/here"))
        .await
        .expect("fallback");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["code"], "not_found");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = app().await;
    let request = Request::builder()
        .uri("/api/health")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("health");
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app().await;
    let response = app
        .oneshot(get("/api/openapi.json"))
        .await
        .expect("openapi");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert!(payload["paths"]["/api/casbin/enforce"].is_object());
}
