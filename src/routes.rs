// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::session_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas (sem sessão)
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/login", post(handlers::auth::login))
        .route("/register", post(handlers::auth::register))
        .route("/logout", post(handlers::auth::logout));

    // Tudo abaixo exige o cookie de sessão
    let protected_routes = Router::new()
        .route(
            "/assets",
            get(handlers::assets::list_assets).post(handlers::assets::create_asset),
        )
        .route("/assets/count", get(handlers::assets::count_assets))
        .route("/assets/total-value", get(handlers::assets::total_value))
        .route(
            "/assets/{id}",
            get(handlers::assets::get_asset)
                .put(handlers::assets::update_asset)
                .delete(handlers::assets::delete_asset),
        )
        .route(
            "/employees",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route(
            "/employees/me",
            get(handlers::employees::get_me).put(handlers::employees::update_me),
        )
        .route("/employees/count", get(handlers::employees::count_employees))
        .route(
            "/employees/{id}",
            get(handlers::employees::get_employee)
                .put(handlers::employees::update_employee)
                .delete(handlers::employees::delete_employee),
        )
        .route(
            "/transactions",
            get(handlers::transactions::list_transactions).post(handlers::transactions::create_transaction),
        )
        .route("/transactions/pending-returns", get(handlers::transactions::pending_returns))
        .route(
            "/companies/me",
            get(handlers::companies::get_my_company).put(handlers::companies::update_my_company),
        )
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .route_layer(axum_middleware::from_fn_with_state(app_state.clone(), session_guard));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        middleware::auth::SESSION_COOKIE,
        models::employee::ADMIN_ROLE,
        test_utils::{cookie_for, init_test_tracing, lazy_state, seed_company, test_config},
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use sqlx::PgPool;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn send(request: Request<Body>) -> Response {
        init_test_tracing();
        build_router(lazy_state()).oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn set_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = send(get("/api/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_require_a_session() {
        let response = send(get("/api/assets", None)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(&response).is_none());
        assert_eq!(json_body(response).await["message"], "Not authenticated");
    }

    #[tokio::test]
    async fn garbage_session_is_rejected_and_cleared() {
        let cookie = format!("{}=definitely-not-a-jwt", SESSION_COOKIE);
        let response = send(get("/api/transactions", Some(&cookie))).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let cleared = set_cookie(&response).expect("stale cookie should be cleared");
        assert!(cleared.starts_with("session=;"));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn incomplete_transaction_is_rejected_before_any_write() {
        let cookie = cookie_for(Uuid::new_v4(), Uuid::new_v4(), None);
        let response = send(post_json(
            "/api/transactions",
            Some(&cookie),
            json!({ "assetId": Uuid::new_v4() }),
        ))
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        let details = body["details"].as_object().unwrap();
        assert_eq!(details.len(), 3);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let cookie = cookie_for(Uuid::new_v4(), Uuid::new_v4(), None);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/transactions")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, cookie)
            .body(Body::from("{ not json"))
            .unwrap();

        let response = send(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["message"].is_string());
    }

    #[tokio::test]
    async fn aggregates_require_company_id() {
        let cookie = cookie_for(Uuid::new_v4(), Uuid::new_v4(), None);
        for uri in ["/api/assets/count", "/api/assets/total-value", "/api/transactions/pending-returns"] {
            let response = send(get(uri, Some(&cookie))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[tokio::test]
    async fn aggregates_hide_other_companies() {
        let cookie = cookie_for(Uuid::new_v4(), Uuid::new_v4(), None);
        let uri = format!("/api/assets/count?company_id={}", Uuid::new_v4());

        let response = send(get(&uri, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn asset_list_rejects_foreign_company_id() {
        let cookie = cookie_for(Uuid::new_v4(), Uuid::new_v4(), None);
        let uri = format!("/api/assets?company_id={}", Uuid::new_v4());

        let response = send(get(&uri, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_admins_cannot_create_employees() {
        let cookie = cookie_for(Uuid::new_v4(), Uuid::new_v4(), Some("Engineer"));
        let response = send(post_json(
            "/api/employees",
            Some(&cookie),
            json!({ "name": "Mallory", "email": "m@corp.test", "password": "secret1" }),
        ))
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn non_admins_cannot_edit_other_employees() {
        let employee_id = Uuid::new_v4();
        let cookie = cookie_for(employee_id, Uuid::new_v4(), Some("Engineer"));
        let request = Request::builder()
            .method(Method::PUT)
            .uri(format!("/api/employees/{}", employee_id))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, cookie)
            .body(Body::from(json!({ "role": ADMIN_ROLE, "password": "takeover1" }).to_string()))
            .unwrap();

        let response = send(request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn admin_payload_is_still_validated(pool: PgPool) {
        let (acme, admin) = seed_company(&pool, "Acme", "admin@acme.test").await;
        let cookie = cookie_for(admin.id, acme.id, Some(ADMIN_ROLE));
        let app = build_router(AppState::from_pool(pool, test_config()));

        let response = app
            .oneshot(post_json(
                "/api/employees",
                Some(&cookie),
                json!({ "name": "Bob", "email": "not-an-email", "password": "123" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["details"]["email"].is_array());
        assert!(body["details"]["password"].is_array());
    }

    #[tokio::test]
    async fn login_without_fields_is_a_bad_request() {
        let response = send(post_json("/api/login", None, json!({}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_validates_before_touching_the_database() {
        let response = send(post_json(
            "/api/register",
            None,
            json!({ "companyName": "", "name": "Ada", "email": "ada@acme.test", "password": "pw" }),
        ))
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn logout_always_clears_the_cookie() {
        let response = send(post_json("/api/logout", None, json!({}))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let cleared = set_cookie(&response).unwrap();
        assert!(cleared.starts_with("session=;"));
        assert_eq!(json_body(response).await, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let response = send(get("/api-docs/openapi.json", None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let doc = json_body(response).await;
        assert!(doc["paths"]["/api/transactions"].is_object());
    }
}
