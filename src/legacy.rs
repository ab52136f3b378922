//! Pre-persistence gallery mode: photos held in memory with client-made
//! timestamp ids and the raw data URI as the locator. Kept as its own
//! code path; the canonical persisted record lives in `models::photo`.

use chrono::Utc;

use crate::intake::parse_tags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyPhoto {
    pub id: String,
    pub url: String,
    pub caption: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Default)]
pub struct LegacyGallery {
    photos: Vec<LegacyPhoto>,
}

impl LegacyGallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, url: &str, caption: &str, tags_input: &str) -> LegacyPhoto {
        let photo = LegacyPhoto {
            id: Utc::now().to_rfc3339(),
            url: url.to_string(),
            caption: caption.to_string(),
            tags: parse_tags(tags_input),
        };
        self.photos.push(photo.clone());
        photo
    }

    pub fn photos(&self) -> &[LegacyPhoto] {
        &self.photos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn added_photos_carry_parsed_tags() {
        let mut gallery = LegacyGallery::new();
        let photo = gallery.add("data:image/png;base64,AAAA", "a tree", "nature, green,");

        assert_eq!(photo.caption, "a tree");
        assert_eq!(photo.tags, vec!["nature", "green"]);
        assert_eq!(gallery.photos().len(), 1);
    }

    #[test]
    fn ids_are_client_timestamps() {
        let mut gallery = LegacyGallery::new();
        let photo = gallery.add("data:image/png;base64,AAAA", "", "");
        assert!(photo.id.parse::<chrono::DateTime<Utc>>().is_ok());
    }
}
