pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::caption::CaptionService;
use crate::models::{NewPhoto, Photo};
use crate::utils::data_uri::EncodedImage;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object store error: {0}")]
    Upload(String),
    #[error("database error: {0}")]
    Database(String),
}

/// Managed blob storage: an encoded image in, a resolvable URL out.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, path: &str, image: &EncodedImage) -> Result<String, StoreError>;
}

/// Per-user photo metadata with a push-based snapshot feed.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Persists the record; the store assigns the id and the timestamp.
    async fn create(&self, photo: NewPhoto) -> Result<Photo, StoreError>;

    /// All of one user's photos, newest first.
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Photo>, StoreError>;

    /// Full-list snapshots, republished after every write for the user.
    fn watch(&self, user_id: i32) -> watch::Receiver<Vec<Photo>>;
}

/// Every backing service the intake workflow talks to, injected as trait
/// objects so the workflow runs against fakes in tests.
#[derive(Clone)]
pub struct StoreHandles {
    pub objects: Arc<dyn ObjectStore>,
    pub photos: Arc<dyn PhotoStore>,
    pub captions: Arc<dyn CaptionService>,
}
