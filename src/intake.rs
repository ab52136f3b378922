//! Photo intake: one user-selected image becomes one persisted record.
//!
//! The flow is select -> caption -> edit -> submit. Validation happens
//! before any network call, captioning failures downgrade to a manual
//! caption, and a failed submit keeps the in-memory attempt so the user
//! can retry without re-selecting the file.

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{NewPhoto, Photo};
use crate::store::StoreHandles;
use crate::utils::data_uri::{DataUriError, EncodedImage};

pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("please upload an image smaller than 4MB")]
    FileTooLarge { size: usize },
    #[error(transparent)]
    InvalidImage(#[from] DataUriError),
    #[error("no photo selected or user not logged in")]
    InvalidState,
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("could not save photo: {0}")]
    Metadata(String),
}

/// The authenticated user an attempt runs under. `PhotoIntake` holds an
/// `Option` of this so the unauthenticated path is representable.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    pub user_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeState {
    Idle,
    Ready,
    Submitting,
}

/// What the captioning step produced on file selection. A failure is
/// non-fatal: the user types a caption instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionOutcome {
    Generated(String),
    Failed(String),
}

/// One upload attempt. Owns its in-memory file, caption and tags input;
/// nothing is shared across concurrent attempts.
pub struct PhotoIntake {
    stores: StoreHandles,
    session: Option<SessionContext>,
    state: IntakeState,
    image: Option<EncodedImage>,
    caption: String,
    tags: String,
}

impl PhotoIntake {
    pub fn new(stores: StoreHandles, session: Option<SessionContext>) -> Self {
        Self {
            stores,
            session,
            state: IntakeState::Idle,
            image: None,
            caption: String::new(),
            tags: String::new(),
        }
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    /// Validates the selected file and, if it passes, asks the caption
    /// service for a suggestion. Size and format are checked before any
    /// network call; a captioning failure leaves the caption unchanged.
    pub async fn select_file(&mut self, data_uri: &str) -> Result<CaptionOutcome, IntakeError> {
        let image = EncodedImage::parse(data_uri)?;
        if image.len() > MAX_UPLOAD_BYTES {
            return Err(IntakeError::FileTooLarge { size: image.len() });
        }

        let outcome = match self.stores.captions.generate_caption(&image).await {
            Ok(caption) => {
                self.caption = caption.clone();
                CaptionOutcome::Generated(caption)
            }
            Err(e) => {
                warn!("caption generation failed: {e}");
                CaptionOutcome::Failed(e.to_string())
            }
        };

        self.image = Some(image);
        self.state = IntakeState::Ready;
        Ok(outcome)
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    pub fn set_tags(&mut self, tags: impl Into<String>) {
        self.tags = tags.into();
    }

    /// Discards the attempt and returns to Idle.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Uploads the held image and persists the record. Fails fast when no
    /// image is held or the session is unauthenticated. On failure the
    /// attempt stays in Ready with the file, caption and tags retained;
    /// retries are user-initiated only.
    pub async fn submit(&mut self) -> Result<Photo, IntakeError> {
        let session = self.session.ok_or(IntakeError::InvalidState)?;
        let image = match self.image.take() {
            Some(image) => image,
            None => return Err(IntakeError::InvalidState),
        };

        self.state = IntakeState::Submitting;
        let result = persist_photo(&self.stores, &session, &image, &self.caption, &self.tags).await;

        match result {
            Ok(photo) => {
                self.reset();
                Ok(photo)
            }
            Err(e) => {
                self.image = Some(image);
                self.state = IntakeState::Ready;
                Err(e)
            }
        }
    }

    fn reset(&mut self) {
        self.state = IntakeState::Idle;
        self.image = None;
        self.caption.clear();
        self.tags.clear();
    }
}

/// Steps A and B of a submission: upload the encoded image under a
/// user-scoped key, then write the metadata record. Shared between the
/// stateful workflow and the one-shot upload endpoint. If the metadata
/// write fails the uploaded object is left behind; there is no
/// compensating delete.
pub async fn persist_photo(
    stores: &StoreHandles,
    session: &SessionContext,
    image: &EncodedImage,
    caption: &str,
    tags_input: &str,
) -> Result<Photo, IntakeError> {
    let key = format!("photos/{}/{}", session.user_id, Uuid::new_v4());

    let image_url = stores
        .objects
        .upload(&key, image)
        .await
        .map_err(|e| IntakeError::Upload(e.to_string()))?;

    let photo = stores
        .photos
        .create(NewPhoto {
            user_id: session.user_id,
            image_url,
            caption: caption.to_string(),
            tags: parse_tags(tags_input),
        })
        .await
        .map_err(|e| IntakeError::Metadata(e.to_string()))?;

    info!(photo_id = %photo.id, user_id = photo.user_id, "photo persisted");
    Ok(photo)
}

/// Splits a comma-separated tags field: trim each piece, drop empties,
/// keep the order. Duplicates pass through.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
