use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth::{gate, session};
use crate::state::AppState;

/// Assemble the application router with the admin gate and request tracing
/// layered in front of every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/articles",
            get(api::articles::list_articles_handler).post(api::articles::create_article_handler),
        )
        .route(
            "/api/articles/{id}",
            get(api::articles::get_article_handler)
                .put(api::articles::update_article_handler)
                .delete(api::articles::delete_article_handler),
        )
        .route(
            "/api/options/{type}",
            get(api::options::get_options_handler).post(api::options::create_option_handler),
        )
        .route(
            "/api/subscribe",
            post(api::subscribers::subscribe_handler)
                .get(api::subscribers::subscribers_with_stats_handler),
        )
        .route(
            "/api/subscribers",
            get(api::subscribers::list_subscribers_handler)
                .delete(api::subscribers::delete_subscriber_handler),
        )
        .route("/api/auth/login", post(session::login_handler))
        .route("/api/auth/logout", post(session::logout_handler))
        .route("/api/auth/me", get(session::me_handler))
        .route("/admin", get(api::pages::dashboard_page))
        .route("/admin/dashboard", get(api::pages::dashboard_page))
        .route("/admin/login", get(api::pages::login_page))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::session_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
