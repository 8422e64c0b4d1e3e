use async_trait::async_trait;

use crate::db::models::{OptionCategory, OptionItem};
use crate::error::AppError;

/// Repository trait for option-catalog entries.
///
/// Entries live in a single collection partitioned by category, so created
/// values persist and are consistent across requests.
#[async_trait]
pub trait OptionRepository: Send + Sync {
    /// List the entries of one category, in insertion order.
    async fn list_by_category(
        &self,
        category: OptionCategory,
    ) -> Result<Vec<OptionItem>, AppError>;

    /// Find an entry by its value within a category, used for the
    /// uniqueness check.
    async fn find_by_value(
        &self,
        category: OptionCategory,
        value: &str,
    ) -> Result<Option<OptionItem>, AppError>;

    /// Append a new entry to its category.
    async fn insert(&self, item: OptionItem) -> Result<(), AppError>;
}

/// MongoDB implementation of the OptionRepository.
pub struct MongoOptionRepository {
    collection: mongodb::Collection<OptionItem>,
}

impl MongoOptionRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("options"),
        }
    }
}

#[async_trait]
impl OptionRepository for MongoOptionRepository {
    async fn list_by_category(
        &self,
        category: OptionCategory,
    ) -> Result<Vec<OptionItem>, AppError> {
        use mongodb::bson::doc;

        let mut cursor = self
            .collection
            .find(doc! { "category": category.as_str() })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut items = Vec::new();
        use futures::TryStreamExt;
        while let Some(item) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            items.push(item);
        }

        Ok(items)
    }

    async fn find_by_value(
        &self,
        category: OptionCategory,
        value: &str,
    ) -> Result<Option<OptionItem>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "category": category.as_str(), "value": value })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert(&self, item: OptionItem) -> Result<(), AppError> {
        self.collection
            .insert_one(&item)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
