use std::sync::Arc;

use newsroom::db::article_repository::{ArticleRepository, MongoArticleRepository};
use newsroom::db::option_repository::{MongoOptionRepository, OptionRepository};
use newsroom::db::subscriber_repository::{MongoSubscriberRepository, SubscriberRepository};
use newsroom::state::{AppConfig, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsroom=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting Newsroom server...");

    // Connect to MongoDB
    let mongo_uri =
        std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let mongo_db_name =
        std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "newsroom".to_string());

    let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let mongo_db = mongo_client.database(&mongo_db_name);

    tracing::info!("Connected to MongoDB at {}", mongo_uri);

    let article_repo: Arc<dyn ArticleRepository> =
        Arc::new(MongoArticleRepository::new(&mongo_db));
    let subscriber_repo: Arc<dyn SubscriberRepository> =
        Arc::new(MongoSubscriberRepository::new(&mongo_db));
    let option_repo: Arc<dyn OptionRepository> = Arc::new(MongoOptionRepository::new(&mongo_db));

    // Make sure fresh deployments have usable form pickers
    newsroom::seeder::seed_option_catalog(option_repo.as_ref()).await;

    let state = AppState {
        article_repo,
        subscriber_repo,
        option_repo,
        config: AppConfig::from_env(),
    };

    let app = newsroom::routes::build_router(state);

    let addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
