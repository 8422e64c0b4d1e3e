use axum::response::Html;

/// `GET /admin` and `GET /admin/dashboard` — the admin shell the session
/// gate protects. The actual admin UI is served separately.
pub async fn dashboard_page() -> Html<&'static str> {
    Html("<!DOCTYPE html><html><head><title>Admin</title></head><body><h1>Admin dashboard</h1></body></html>")
}

/// `GET /admin/login` — the login shell, reachable without a session.
pub async fn login_page() -> Html<&'static str> {
    Html("<!DOCTYPE html><html><head><title>Admin login</title></head><body><h1>Admin login</h1></body></html>")
}
