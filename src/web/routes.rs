// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, landing_handlers, mw_auth, search_handlers, translate_handlers,
        user_handlers,
    },
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_cookies::{CookieManagerLayer, Key};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

pub fn create_router(app_state: AppState) -> Router {
    // --- Public routes ---
    let public_routes = Router::new()
        .route("/", get(landing_handlers::root))
        .route("/check_role", get(landing_handlers::check_role))
        .route("/role_response/{choice}", get(landing_handlers::role_response))
        .route("/home", get(landing_handlers::home))
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route(
            "/register",
            get(auth_handlers::show_register_form).post(auth_handlers::handle_register),
        )
        .route("/translate", post(translate_handlers::handle_translate));

    // --- Routes that need a logged-in student ---
    let authenticated_routes = Router::new()
        .route("/index", get(user_handlers::index_handler))
        .route("/search", post(search_handlers::handle_search))
        .route("/profile", get(user_handlers::profile_handler))
        .route("/logout", get(auth_handlers::handle_logout))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}

/// Router plus tracing, cookie and session layers.
pub fn create_app(app_state: AppState, session_store: SqliteStore, key: Key) -> Router {
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_signed(key)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)));

    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CookieManagerLayer::new())
            .layer(session_layer),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::create_test_pool,
        services::{
            embedding::test_support::FixedEmbedder,
            job_source::test_support::StaticJobSource,
            search_service::JobSearchService,
            translation_service::test_support::StaticTranslator,
            user_service,
        },
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use sqlx::SqlitePool;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct TestApp {
        app: Router,
        pool: SqlitePool,
        _dir: tempfile::TempDir,
    }

    async fn test_app() -> TestApp {
        let pool = create_test_pool().await;
        let store = SqliteStore::new(pool.clone());
        store.migrate().await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let embedder = FixedEmbedder::new()
            .with("data analysis", vec![1.0, 0.2, 0.0])
            .with("Data Analyst", vec![0.9, 0.3, 0.0])
            .with("Data Entry Clerk", vec![0.3, 0.9, 0.1]);
        let job_search = JobSearchService::new(
            Arc::new(StaticJobSource::titled(&["Data Analyst"])),
            Arc::new(StaticJobSource::titled(&["Data Entry Clerk"])),
            Arc::new(embedder),
            dir.path().join("job_results.csv"),
        );
        let state = AppState {
            db_pool: pool.clone(),
            job_search,
            translator: Arc::new(StaticTranslator(vec![("hola", "hello")])),
        };

        TestApp {
            app: create_app(state, store, Key::from(&[7u8; 64])),
            pool,
            _dir: dir,
        }
    }

    impl TestApp {
        async fn send(&self, request: Request<Body>) -> Response {
            self.app.clone().oneshot(request).await.unwrap()
        }

        async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
            let mut builder = Request::get(uri);
            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            self.send(builder.body(Body::empty()).unwrap()).await
        }

        async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response {
            let mut builder = Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            self.send(builder.body(Body::from(form.to_string())).unwrap()).await
        }

        async fn post_json(&self, uri: &str, json: &str) -> Response {
            let request = Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap();
            self.send(request).await
        }

        async fn register(&self, email: &str, password: &str, confirm: &str) -> Response {
            let form = format!(
                "username=meera&email={email}&password={password}&confirm={confirm}\
                 &mobile=9123456780&roll_no=IT-12&college=NIT&class_name=IT-B"
            );
            self.post_form("/register", &form, None).await
        }

        /// Logs in and returns the session cookie to send on later requests.
        async fn login(&self, email: &str, password: &str) -> String {
            let response = self
                .post_form("/login", &format!("email={email}&password={password}"), None)
                .await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&response), "/index");
            session_cookie(&response).expect("login sets a session cookie")
        }
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    fn session_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .last()
            .map(str::to_string)
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn landing_flow_redirects_through_role_check() {
        let t = test_app().await;

        let root = t.get("/", None).await;
        assert_eq!(location(&root), "/check_role");

        let yes = t.get("/role_response/yes", None).await;
        assert_eq!(location(&yes), "/home");

        let no = t.get("/role_response/no", None).await;
        assert_eq!(no.status(), StatusCode::OK);
        assert!(body_text(no).await.contains("only available to students"));
    }

    #[tokio::test]
    async fn protected_pages_redirect_to_login_without_session() {
        let t = test_app().await;

        for uri in ["/index", "/profile", "/logout"] {
            let response = t.get(uri, None).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(location(&response), "/login", "{uri}");
        }
        let search = t.post_form("/search", "description=rust", None).await;
        assert_eq!(location(&search), "/login");
    }

    #[tokio::test]
    async fn register_login_profile_logout() {
        let t = test_app().await;

        let registered = t.register("meera%40example.com", "pw123", "pw123").await;
        assert_eq!(location(&registered), "/login");
        assert_eq!(user_service::count_users(&t.pool).await.unwrap(), 1);

        let cookie = t.login("meera%40example.com", "pw123").await;

        let index = t.get("/index", Some(&cookie)).await;
        assert_eq!(index.status(), StatusCode::OK);
        let index_html = body_text(index).await;
        assert!(index_html.contains("Hello, meera"));
        assert!(index_html.contains("Welcome back!"));

        let profile = body_text(t.get("/profile", Some(&cookie)).await).await;
        assert!(profile.contains("<h1>meera</h1>"));
        assert!(profile.contains("meera@example.com"));
        assert!(profile.contains("IT-12"));

        let logout = t.get("/logout", Some(&cookie)).await;
        assert_eq!(location(&logout), "/login");
        let after = t.get("/profile", Some(&cookie)).await;
        assert_eq!(location(&after), "/login");
    }

    #[tokio::test]
    async fn login_page_redirects_when_already_logged_in() {
        let t = test_app().await;
        t.register("a%40b.com", "pw", "pw").await;
        let cookie = t.login("a%40b.com", "pw").await;

        let response = t.get("/login", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/index");
    }

    #[tokio::test]
    async fn session_of_deleted_user_is_cleared() {
        let t = test_app().await;
        t.register("gone%40b.com", "pw", "pw").await;
        let cookie = t.login("gone%40b.com", "pw").await;
        sqlx::query("DELETE FROM users").execute(&t.pool).await.unwrap();

        let profile = t.get("/profile", Some(&cookie)).await;
        assert_eq!(profile.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&profile), "/login");

        // The old session no longer carries a user id
        let login = t.get("/login", Some(&cookie)).await;
        assert_eq!(login.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_password_re_renders_login() {
        let t = test_app().await;
        t.register("a%40b.com", "right", "right").await;

        let response = t.post_form("/login", "email=a%40b.com&password=wrong", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Invalid credentials"));
    }

    #[tokio::test]
    async fn mismatched_or_duplicate_registration_is_not_stored() {
        let t = test_app().await;

        let mismatch = t.register("a%40b.com", "one", "two").await;
        assert_eq!(location(&mismatch), "/register");
        assert_eq!(user_service::count_users(&t.pool).await.unwrap(), 0);

        t.register("a%40b.com", "pw", "pw").await;
        let duplicate = t.register("a%40b.com", "pw2", "pw2").await;
        assert_eq!(location(&duplicate), "/login");
        assert_eq!(user_service::count_users(&t.pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn search_renders_ranked_results() {
        let t = test_app().await;
        t.register("s%40b.com", "pw", "pw").await;
        let cookie = t.login("s%40b.com", "pw").await;

        let response = t
            .post_form(
                "/search",
                "description=data+analysis&career_goal=analytics&industry=&experience=",
                Some(&cookie),
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        let analyst = html.find("Data Analyst").expect("api job shown");
        let clerk = html.find("Data Entry Clerk").expect("nco job shown");
        assert!(analyst < clerk);
        assert!(html.contains("analytics"));
    }

    #[tokio::test]
    async fn blank_search_flashes_and_stays_on_index() {
        let t = test_app().await;
        t.register("s%40b.com", "pw", "pw").await;
        let cookie = t.login("s%40b.com", "pw").await;

        let response = t.post_form("/search", "description=+++", Some(&cookie)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("Please enter a job description or skills."));
    }

    #[tokio::test]
    async fn translate_endpoint_contract() {
        let t = test_app().await;

        let ok = t.post_json("/translate", r#"{"text": "hola"}"#).await;
        assert_eq!(ok.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(ok).await).unwrap();
        assert_eq!(body["text"], "hello");

        let missing = t.post_json("/translate", "{}").await;
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_text(missing).await).unwrap();
        assert!(body["error"].is_string());

        let not_json = t.post_json("/translate", "text=hola").await;
        assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);

        let failing = t.post_json("/translate", r#"{"text": "bonjour"}"#).await;
        assert_eq!(failing.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body_text(failing).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains("bonjour"));
    }
}
