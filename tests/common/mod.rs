use std::sync::Arc;

use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use newsroom::db::article_repository::{ArticleRepository, MongoArticleRepository};
use newsroom::db::option_repository::{MongoOptionRepository, OptionRepository};
use newsroom::db::subscriber_repository::{MongoSubscriberRepository, SubscriberRepository};
use newsroom::state::{AppConfig, AppState};

/// Holds the running Mongo container and the application router for
/// integration tests.
///
/// The container is kept alive for as long as this struct lives and is
/// cleaned up automatically on drop.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    pub router: Router,
    pub article_repo: Arc<dyn ArticleRepository>,
    pub subscriber_repo: Arc<dyn SubscriberRepository>,
    pub option_repo: Arc<dyn OptionRepository>,
}

impl TestEnv {
    /// Spin up MongoDB and build a router wired to real repositories.
    pub async fn start() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let mongo_db = mongo_client.database("newsroom_test");

        let article_repo: Arc<dyn ArticleRepository> =
            Arc::new(MongoArticleRepository::new(&mongo_db));
        let subscriber_repo: Arc<dyn SubscriberRepository> =
            Arc::new(MongoSubscriberRepository::new(&mongo_db));
        let option_repo: Arc<dyn OptionRepository> =
            Arc::new(MongoOptionRepository::new(&mongo_db));

        newsroom::seeder::seed_option_catalog(option_repo.as_ref()).await;

        let state = AppState {
            article_repo: article_repo.clone(),
            subscriber_repo: subscriber_repo.clone(),
            option_repo: option_repo.clone(),
            config: AppConfig {
                admin_username: "admin".to_string(),
                admin_password: "password123".to_string(),
                session_secret: "test-secret".to_string(),
                session_ttl_secs: 3600,
            },
        };

        let router = newsroom::routes::build_router(state);

        Self {
            _mongo: mongo_container,
            router,
            article_repo,
            subscriber_repo,
            option_repo,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for
    /// error and redirect tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
    }

    /// Helper: create an article with the standard test payload.
    pub async fn create_article(
        &self,
        server: &axum_test::TestServer,
        title: &str,
    ) -> axum_test::TestResponse {
        server
            .post("/api/articles")
            .json(&serde_json::json!({
                "title": title,
                "subtitle": "B",
                "url": "https://x.test",
                "author": "john-doe",
                "channel": "web",
                "category": "technology",
                "newsletter": "weekly-digest",
                "topic": "javascript"
            }))
            .await
    }

    /// Helper: log in as the configured admin, saving the session cookie.
    pub async fn login(&self, server: &axum_test::TestServer) -> axum_test::TestResponse {
        server
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "username": "admin",
                "password": "password123"
            }))
            .await
    }
}
