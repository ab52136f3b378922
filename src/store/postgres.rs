use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::watch;
use tracing::error;

use super::{PhotoStore, StoreError};
use crate::models::{NewPhoto, Photo};

/// Per-user snapshot channels backing `PhotoStore::watch`. Each write
/// republishes the owner's full list, so a receiver always holds the
/// latest ordering the store would return.
#[derive(Default)]
pub struct PhotoFeed {
    channels: Mutex<HashMap<i32, watch::Sender<Vec<Photo>>>>,
}

impl PhotoFeed {
    pub fn subscribe(&self, user_id: i32) -> watch::Receiver<Vec<Photo>> {
        let mut channels = self.channels.lock().unwrap();
        channels
            .entry(user_id)
            .or_insert_with(|| watch::channel(Vec::new()).0)
            .subscribe()
    }

    pub fn publish(&self, user_id: i32, photos: Vec<Photo>) {
        let mut channels = self.channels.lock().unwrap();
        let sender = channels
            .entry(user_id)
            .or_insert_with(|| watch::channel(Vec::new()).0);
        let _ = sender.send(photos);
    }
}

pub struct PgPhotoStore {
    pool: PgPool,
    feed: PhotoFeed,
}

impl PgPhotoStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            feed: PhotoFeed::default(),
        }
    }
}

#[async_trait]
impl PhotoStore for PgPhotoStore {
    async fn create(&self, photo: NewPhoto) -> Result<Photo, StoreError> {
        let created = sqlx::query_as::<_, Photo>(
            "INSERT INTO photos (user_id, image_url, caption, tags)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, image_url, caption, tags, upload_date",
        )
        .bind(photo.user_id)
        .bind(&photo.image_url)
        .bind(&photo.caption)
        .bind(&photo.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        // The record is already committed; a failed refresh only delays
        // subscribers until the next write.
        match self.list_for_user(created.user_id).await {
            Ok(photos) => self.feed.publish(created.user_id, photos),
            Err(e) => error!("failed to refresh photo feed: {e}"),
        }

        Ok(created)
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Photo>, StoreError> {
        sqlx::query_as::<_, Photo>(
            "SELECT id, user_id, image_url, caption, tags, upload_date
             FROM photos
             WHERE user_id = $1
             ORDER BY upload_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn watch(&self, user_id: i32) -> watch::Receiver<Vec<Photo>> {
        self.feed.subscribe(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn photo(caption: &str) -> Photo {
        Photo {
            id: Uuid::new_v4(),
            user_id: 1,
            image_url: "https://bucket.s3.us-west-2.amazonaws.com/photos/1/x".to_string(),
            caption: caption.to_string(),
            tags: vec![],
            upload_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn feed_delivers_snapshots_to_subscribers() {
        let feed = PhotoFeed::default();
        let mut rx = feed.subscribe(1);
        assert!(rx.borrow().is_empty());

        feed.publish(1, vec![photo("first")]);
        assert!(rx.changed().await.is_ok());
        assert_eq!(rx.borrow().len(), 1);
        assert_eq!(rx.borrow()[0].caption, "first");
    }

    #[tokio::test]
    async fn feed_is_scoped_per_user() {
        let feed = PhotoFeed::default();
        let rx_one = feed.subscribe(1);
        let rx_two = feed.subscribe(2);

        feed.publish(1, vec![photo("mine")]);
        assert_eq!(rx_one.borrow().len(), 1);
        assert!(rx_two.borrow().is_empty());
    }

    #[tokio::test]
    async fn late_subscribers_see_the_latest_snapshot() {
        let feed = PhotoFeed::default();
        feed.publish(7, vec![photo("already there")]);

        let rx = feed.subscribe(7);
        assert_eq!(rx.borrow().len(), 1);
    }
}
