use async_trait::async_trait;

use crate::db::models::Subscriber;
use crate::error::AppError;

/// Repository trait for subscriber operations.
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// List every subscriber, in store order.
    async fn list_all(&self) -> Result<Vec<Subscriber>, AppError>;

    /// Find a subscriber by email, used for the uniqueness check.
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, AppError>;

    /// Insert a new subscriber.
    async fn insert(&self, subscriber: Subscriber) -> Result<(), AppError>;

    /// Delete a subscriber by id. Deleting a nonexistent id is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), AppError>;
}

/// MongoDB implementation of the SubscriberRepository.
pub struct MongoSubscriberRepository {
    collection: mongodb::Collection<Subscriber>,
}

impl MongoSubscriberRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("subscribers"),
        }
    }
}

#[async_trait]
impl SubscriberRepository for MongoSubscriberRepository {
    async fn list_all(&self) -> Result<Vec<Subscriber>, AppError> {
        use mongodb::bson::doc;

        let mut cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut subscribers = Vec::new();
        use futures::TryStreamExt;
        while let Some(subscriber) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            subscribers.push(subscriber);
        }

        Ok(subscribers)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert(&self, subscriber: Subscriber) -> Result<(), AppError> {
        self.collection
            .insert_one(&subscriber)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
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
