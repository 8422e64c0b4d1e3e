use async_trait::async_trait;

use crate::db::models::{Article, ArticleChanges};
use crate::error::AppError;

/// Repository trait for article operations.
///
/// This trait allows mocking the database layer in tests.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// List all articles, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Article>, AppError>;

    /// Insert a new article.
    async fn insert(&self, article: Article) -> Result<(), AppError>;

    /// Find an article by its id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, AppError>;

    /// Apply a partial field set to an article, returning the updated
    /// record, or `None` if the id matched nothing.
    async fn update(
        &self,
        id: &str,
        changes: ArticleChanges,
    ) -> Result<Option<Article>, AppError>;

    /// Delete an article by id. Deleting a nonexistent id is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), AppError>;
}

/// MongoDB implementation of the ArticleRepository.
pub struct MongoArticleRepository {
    collection: mongodb::Collection<Article>,
}

impl MongoArticleRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("articles"),
        }
    }
}

#[async_trait]
impl ArticleRepository for MongoArticleRepository {
    async fn list_newest_first(&self) -> Result<Vec<Article>, AppError> {
        use mongodb::bson::doc;

        let mut cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut articles = Vec::new();
        use futures::TryStreamExt;
        while let Some(article) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            articles.push(article);
        }

        // Timestamps are stored as RFC3339 strings, so order after decoding
        // rather than relying on a lexicographic sort in the store.
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(articles)
    }

    async fn insert(&self, article: Article) -> Result<(), AppError> {
        self.collection
            .insert_one(&article)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn update(
        &self,
        id: &str,
        changes: ArticleChanges,
    ) -> Result<Option<Article>, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

        // An empty $set document is rejected by MongoDB.
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let update_doc = bson::to_document(&changes)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(doc! { "id": id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        use mongodb::bson::doc;

        self.collection
            .delete_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
