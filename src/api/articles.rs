use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::article_repository::ArticleRepository;
use crate::db::models::{Article, ArticleChanges};
use crate::error::AppError;

/// Request payload for creating an article.
///
/// Fields default to empty strings so that absent and blank fields are
/// rejected the same way, with a message naming the field.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub newsletter: String,
    #[serde(default)]
    pub topic: String,
    /// Stamped with the request time when absent.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response from a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteArticleResponse {
    pub message: String,
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("Field '{}' is required", field)));
    }
    Ok(())
}

fn require_absolute_url(url: &str) -> Result<(), AppError> {
    url::Url::parse(url)
        .map(|_| ())
        .map_err(|_| AppError::BadRequest(format!("'{}' is not a valid absolute URL", url)))
}

/// Core creation logic — separated from the HTTP layer for testability.
///
/// Validates required fields and the URL, stamps the creation time when the
/// request omits it, and inserts the record.
pub async fn process_create(
    repo: &dyn ArticleRepository,
    request: CreateArticleRequest,
) -> Result<Article, AppError> {
    require("title", &request.title)?;
    require("subtitle", &request.subtitle)?;
    require("url", &request.url)?;
    require("author", &request.author)?;
    require("channel", &request.channel)?;
    require("category", &request.category)?;
    require("newsletter", &request.newsletter)?;
    require("topic", &request.topic)?;
    require_absolute_url(&request.url)?;

    let article = Article {
        id: Uuid::new_v4().to_string(),
        title: request.title,
        subtitle: request.subtitle,
        url: request.url,
        author: request.author,
        channel: request.channel,
        category: request.category,
        newsletter: request.newsletter,
        topic: request.topic,
        created_at: request.created_at.unwrap_or_else(Utc::now),
    };

    repo.insert(article.clone()).await?;

    Ok(article)
}

/// Core update logic. Provided fields must still be valid; absent fields
/// are left untouched.
pub async fn process_update(
    repo: &dyn ArticleRepository,
    id: &str,
    changes: ArticleChanges,
) -> Result<Article, AppError> {
    if let Some(title) = &changes.title {
        require("title", title)?;
    }
    if let Some(subtitle) = &changes.subtitle {
        require("subtitle", subtitle)?;
    }
    if let Some(url) = &changes.url {
        require("url", url)?;
        require_absolute_url(url)?;
    }
    if let Some(author) = &changes.author {
        require("author", author)?;
    }
    if let Some(channel) = &changes.channel {
        require("channel", channel)?;
    }
    if let Some(category) = &changes.category {
        require("category", category)?;
    }
    if let Some(newsletter) = &changes.newsletter {
        require("newsletter", newsletter)?;
    }
    if let Some(topic) = &changes.topic {
        require("topic", topic)?;
    }

    repo.update(id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".into()))
}

/// `GET /api/articles` — all articles, newest first.
pub async fn list_articles_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
) -> Result<axum::Json<Vec<Article>>, AppError> {
    let articles = state.article_repo.list_newest_first().await?;
    Ok(axum::Json(articles))
}

/// `POST /api/articles` — create an article.
pub async fn create_article_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::Json(request): axum::Json<CreateArticleRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<Article>), AppError> {
    let article = process_create(state.article_repo.as_ref(), request).await?;
    Ok((axum::http::StatusCode::CREATED, axum::Json(article)))
}

/// `GET /api/articles/{id}` — fetch one article.
pub async fn get_article_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<axum::Json<Article>, AppError> {
    let article = state
        .article_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".into()))?;

    Ok(axum::Json(article))
}

/// `PUT /api/articles/{id}` — apply a partial field set.
pub async fn update_article_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(id): axum::extract::Path<String>,
    axum::Json(changes): axum::Json<ArticleChanges>,
) -> Result<axum::Json<Article>, AppError> {
    let article = process_update(state.article_repo.as_ref(), &id, changes).await?;
    Ok(axum::Json(article))
}

/// `DELETE /api/articles/{id}` — delete by id.
///
/// Deleting an id that does not exist still reports success, so clients can
/// retry without special-casing.
pub async fn delete_article_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<axum::Json<DeleteArticleResponse>, AppError> {
    state.article_repo.delete_by_id(&id).await?;

    Ok(axum::Json(DeleteArticleResponse {
        message: "Article deleted successfully".to_string(),
    }))
}
