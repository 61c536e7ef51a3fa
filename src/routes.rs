// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::{config::AppState, handlers, middleware::auth::auth_guard};

pub fn app_router(app_state: AppState) -> Router {
    // Rotas públicas
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let employee_routes = Router::new()
        .route(
            "/",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route(
            "/{id}",
            get(handlers::employees::get_employee)
                .put(handlers::employees::update_employee)
                .delete(handlers::employees::delete_employee),
        )
        .route("/{id}/status", patch(handlers::employees::set_employee_status))
        .route("/{id}/rating", get(handlers::performance::employee_rating));

    let attendance_routes = Router::new()
        .route(
            "/",
            get(handlers::attendance::list_attendance).post(handlers::attendance::create_attendance),
        )
        .route("/check-in", post(handlers::attendance::check_in))
        .route("/check-out", post(handlers::attendance::check_out))
        .route(
            "/{id}",
            put(handlers::attendance::update_attendance).delete(handlers::attendance::delete_attendance),
        );

    let leave_routes = Router::new()
        .route(
            "/",
            get(handlers::leaves::list_leaves).post(handlers::leaves::create_leave),
        )
        .route(
            "/{id}",
            get(handlers::leaves::get_leave)
                .put(handlers::leaves::update_leave)
                .delete(handlers::leaves::delete_leave),
        )
        .route("/{id}/status", patch(handlers::leaves::set_leave_status))
        .route("/{id}/review", post(handlers::leaves::review_leave));

    let permission_routes = Router::new()
        .route(
            "/",
            get(handlers::leaves::list_permissions).post(handlers::leaves::create_permission),
        )
        .route(
            "/{id}",
            get(handlers::leaves::get_permission)
                .put(handlers::leaves::update_permission)
                .delete(handlers::leaves::delete_permission),
        )
        .route("/{id}/status", patch(handlers::leaves::set_permission_status))
        .route("/{id}/review", post(handlers::leaves::review_permission));

    let salary_routes = Router::new()
        .route("/", get(handlers::payroll::list_salaries))
        .route("/generate", post(handlers::payroll::generate_salary))
        .route("/generate-all", post(handlers::payroll::generate_all))
        .route(
            "/{id}",
            get(handlers::payroll::get_salary).delete(handlers::payroll::delete_salary),
        )
        .route("/{id}/slip.pdf", get(handlers::payroll::salary_slip_pdf));

    let skills_routes = Router::new()
        .route(
            "/skills",
            get(handlers::skills::list_skills).post(handlers::skills::create_skill),
        )
        .route(
            "/skills/{id}",
            put(handlers::skills::update_skill).delete(handlers::skills::delete_skill),
        )
        .route(
            "/trainings",
            get(handlers::skills::list_trainings).post(handlers::skills::create_training),
        )
        .route(
            "/trainings/{id}",
            put(handlers::skills::update_training).delete(handlers::skills::delete_training),
        )
        .route("/trainings/{id}/status", patch(handlers::skills::set_training_status))
        .route(
            "/certifications",
            get(handlers::skills::list_certifications).post(handlers::skills::create_certification),
        )
        .route("/certifications/expiring", get(handlers::skills::expiring_certifications))
        .route(
            "/certifications/{id}",
            put(handlers::skills::update_certification)
                .delete(handlers::skills::delete_certification),
        )
        .route(
            "/skill-gaps",
            get(handlers::skills::list_gaps).post(handlers::skills::create_gap),
        )
        .route(
            "/skill-gaps/{id}",
            put(handlers::skills::update_gap).delete(handlers::skills::delete_gap),
        );

    let performance_routes = Router::new()
        .route(
            "/reviews",
            get(handlers::performance::list_reviews).post(handlers::performance::create_review),
        )
        .route(
            "/reviews/{id}",
            put(handlers::performance::update_review).delete(handlers::performance::delete_review),
        )
        .route(
            "/goals",
            get(handlers::performance::list_goals).post(handlers::performance::create_goal),
        )
        .route(
            "/goals/{id}",
            put(handlers::performance::update_goal).delete(handlers::performance::delete_goal),
        )
        .route("/goals/{id}/progress", patch(handlers::performance::update_goal_progress));

    let settings_routes = Router::new()
        .route(
            "/",
            get(handlers::settings::get_settings).patch(handlers::settings::update_settings),
        )
        .route("/reset", post(handlers::settings::reset_settings));

    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::auth::list_users).post(handlers::auth::create_user),
        )
        .route("/{id}", axum::routing::delete(handlers::auth::delete_user));

    // Tudo abaixo exige token
    let protected = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .nest("/users", user_routes)
        .nest("/employees", employee_routes)
        .nest("/attendance", attendance_routes)
        .nest("/leaves", leave_routes)
        .nest("/permissions", permission_routes)
        .nest("/salaries", salary_routes)
        .merge(skills_routes)
        .merge(performance_routes)
        .nest("/settings", settings_routes)
        .route("/reports/records", get(handlers::reports::records))
        .route("/reports/summary", get(handlers::reports::summary))
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .route("/dashboard/departments", get(handlers::dashboard::get_departments))
        .route("/export", get(handlers::export::export_data))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, IN_MEMORY_DATA_DIR};
    use crate::db::{JsonStore, MemoryStore};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::{path::PathBuf, sync::Arc};
    use tower::ServiceExt;

    // Custo mínimo aceito pelo bcrypt
    const TEST_COST: u32 = 4;

    fn test_config() -> AppConfig {
        AppConfig {
            data_dir: IN_MEMORY_DATA_DIR.to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            jwt_secret: "segredo-de-teste".to_string(),
            fonts_dir: PathBuf::from("./fonts"),
            font_family: "Roboto".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            bcrypt_cost: TEST_COST,
        }
    }

    async fn test_app() -> Router {
        let state = AppState::with_store(
            JsonStore::new(Arc::new(MemoryStore::new())),
            test_config(),
        );
        state
            .auth_service
            .ensure_default_admin("admin", "admin123")
            .await
            .unwrap();
        app_router(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login(app: &Router) -> String {
        let response = send(
            app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "admin", "password": "admin123"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public_and_api_requires_a_token() {
        let app = test_app().await;
        assert_eq!(send(&app, "GET", "/api/health", None, None).await.status(), StatusCode::OK);
        assert_eq!(
            send(&app, "GET", "/api/employees", None, None).await.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            send(&app, "GET", "/api/employees", Some("lixo"), None).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = test_app().await;
        let response = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "admin", "password": "errada"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn employee_attendance_flow() {
        let app = test_app().await;
        let token = login(&app).await;

        let me = json_body(send(&app, "GET", "/api/auth/me", Some(&token), None).await).await;
        assert_eq!(me["username"], "admin");
        assert!(me.get("passwordHash").is_none());

        let created = send(
            &app,
            "POST",
            "/api/employees",
            Some(&token),
            Some(json!({
                "name": "Alice",
                "email": "alice@example.com",
                "position": "Engineer",
                "department": "Engineering",
                "salary": 5000,
                "joinDate": "2022-01-10",
                "status": "active"
            })),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let alice = json_body(created).await;
        let alice_id = alice["id"].as_str().unwrap().to_string();

        let check_in = send(
            &app,
            "POST",
            "/api/attendance/check-in",
            Some(&token),
            Some(json!({"employeeId": alice_id, "date": "2024-03-04", "time": "08:00"})),
        )
        .await;
        assert_eq!(check_in.status(), StatusCode::CREATED);

        let check_out = send(
            &app,
            "POST",
            "/api/attendance/check-out",
            Some(&token),
            Some(json!({"employeeId": alice_id, "date": "2024-03-04", "time": "17:00"})),
        )
        .await;
        assert_eq!(check_out.status(), StatusCode::OK);
        let row = json_body(check_out).await;
        assert_eq!(row["checkOut"], "17:00");
        assert_eq!(row["hoursWorked"].as_f64(), Some(9.0));
        assert_eq!(row["status"], "present");

        let report = send(
            &app,
            "GET",
            "/api/reports/records?start=2024-03-01&end=2024-03-31",
            Some(&token),
            None,
        )
        .await;
        let rows = json_body(report).await;
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["kind"], "attendance");
        assert_eq!(rows[0]["employeeName"], "Alice");
    }

    #[tokio::test]
    async fn settings_patch_and_reset() {
        let app = test_app().await;
        let token = login(&app).await;

        let patched = send(
            &app,
            "PATCH",
            "/api/settings",
            Some(&token),
            Some(json!({"appName": "Acme", "logoData": "data:image/png;base64,AA=="})),
        )
        .await;
        assert_eq!(patched.status(), StatusCode::OK);

        let current = json_body(send(&app, "GET", "/api/settings", Some(&token), None).await).await;
        assert_eq!(current["app"]["appName"], "Acme");
        assert_eq!(current["company"]["name"], "");

        let reset = json_body(send(&app, "POST", "/api/settings/reset", Some(&token), None).await).await;
        assert_eq!(reset["app"]["appName"], "HR Management System");
        assert_eq!(reset["app"]["logoData"], Value::Null);
    }

    #[tokio::test]
    async fn export_is_an_attachment() {
        let app = test_app().await;
        let token = login(&app).await;

        let response = send(&app, "GET", "/api/export", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"hr-data-export-"));

        let body = json_body(response).await;
        assert!(body["employees"].is_array());
        assert!(body["exportDate"].is_string());
    }

    #[tokio::test]
    async fn validation_errors_carry_field_details() {
        let app = test_app().await;
        let token = login(&app).await;

        let response = send(
            &app,
            "POST",
            "/api/employees",
            Some(&token),
            Some(json!({
                "name": "",
                "email": "sem-arroba",
                "position": "Engineer",
                "department": "Engineering",
                "salary": 5000,
                "joinDate": "2022-01-10"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["details"]["name"].is_array());
        assert!(body["details"]["email"].is_array());
    }
}
