//! Style transformation, currently a placeholder: a fixed delay and a
//! deterministic stand-in image. The real generator is an external
//! collaborator whose contract is still undefined.

use std::time::Duration;

use thiserror::Error;
use tokio::time;

pub const TRANSFORM_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("please select a transformation style")]
    UnknownStyle,
}

pub struct TransformationStyle {
    pub id: &'static str,
    pub name: &'static str,
}

pub const TRANSFORMATION_STYLES: &[TransformationStyle] = &[
    TransformationStyle { id: "watercolor", name: "Watercolor" },
    TransformationStyle { id: "cartoon", name: "Cartoon" },
    TransformationStyle { id: "pixel-art", name: "Pixel Art" },
    TransformationStyle { id: "sci-fi", name: "Sci-Fi" },
    TransformationStyle { id: "fantasy", name: "Fantasy" },
];

pub fn style_by_id(id: &str) -> Option<&'static TransformationStyle> {
    TRANSFORMATION_STYLES.iter().find(|style| style.id == id)
}

/// Locator of the derived image, keyed by photo and style.
pub fn placeholder_url(photo_id: &str, style_id: &str) -> String {
    format!("https://picsum.photos/seed/{photo_id}-{style_id}/600/600")
}

pub async fn transform_photo(photo_id: &str, style_id: &str) -> Result<String, TransformError> {
    let style = style_by_id(style_id).ok_or(TransformError::UnknownStyle)?;

    // Stands in for the generation call.
    time::sleep(TRANSFORM_DELAY).await;

    Ok(placeholder_url(photo_id, style.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_five_styles_resolve() {
        for id in ["watercolor", "cartoon", "pixel-art", "sci-fi", "fantasy"] {
            assert!(style_by_id(id).is_some(), "missing style {id}");
        }
    }

    #[test]
    fn unknown_style_does_not_resolve() {
        assert!(style_by_id("oil-painting").is_none());
    }

    #[test]
    fn placeholder_is_deterministic_in_photo_and_style() {
        let a = placeholder_url("abc123", "watercolor");
        let b = placeholder_url("abc123", "watercolor");
        assert_eq!(a, b);
        assert_eq!(a, "https://picsum.photos/seed/abc123-watercolor/600/600");
        assert_ne!(a, placeholder_url("abc123", "cartoon"));
    }

    #[tokio::test]
    async fn unknown_style_errors_before_the_delay() {
        let result = transform_photo("abc123", "oil-painting").await;
        assert!(matches!(result, Err(TransformError::UnknownStyle)));
    }
}
