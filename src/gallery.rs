//! Pure search projection over a user's photos.

use tokio::sync::watch;

use crate::models::Photo;

/// The ordered subsequence of `photos` whose caption or any tag contains
/// the trimmed query, case-insensitively. An empty query is the identity.
pub fn filter_photos<'a>(photos: &'a [Photo], query: &str) -> Vec<&'a Photo> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return photos.iter().collect();
    }

    photos
        .iter()
        .filter(|photo| {
            photo.caption.to_lowercase().contains(&query)
                || photo.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
        })
        .collect()
}

/// Live filtered view: a snapshot receiver from the store plus the
/// current search query. Recomputes on every snapshot or query change;
/// never mutates the underlying records.
pub struct GalleryView {
    photos: watch::Receiver<Vec<Photo>>,
    query: String,
}

impl GalleryView {
    pub fn new(photos: watch::Receiver<Vec<Photo>>) -> Self {
        Self {
            photos,
            query: String::new(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn snapshot(&self) -> Vec<Photo> {
        filter_photos(&self.photos.borrow(), &self.query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Waits for the next snapshot from the store. `false` once the feed
    /// has closed.
    pub async fn changed(&mut self) -> bool {
        self.photos.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use uuid::Uuid;

    fn photo(caption: &str, tags: &[&str]) -> Photo {
        Photo {
            id: Uuid::new_v4(),
            user_id: 1,
            image_url: format!("https://photos.test/{caption}"),
            caption: caption.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            upload_date: Utc::now(),
        }
    }

    fn sample() -> Vec<Photo> {
        vec![
            photo("Sunset over hills", &["nature", "sunset"]),
            photo("City at night", &["urban"]),
            photo("Morning coffee", &["food", "SUN-drenched table"]),
        ]
    }

    #[test]
    fn empty_query_is_the_identity() {
        let photos = sample();
        let filtered = filter_photos(&photos, "");
        let ids: Vec<Uuid> = filtered.iter().map(|p| p.id).collect();
        let expected: Vec<Uuid> = photos.iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn whitespace_query_is_the_identity() {
        let photos = sample();
        assert_eq!(filter_photos(&photos, "   ").len(), photos.len());
    }

    #[test]
    fn matches_captions_case_insensitively() {
        let photos = sample();
        let filtered = filter_photos(&photos, "SUNSET");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].caption, "Sunset over hills");
    }

    #[test]
    fn matches_any_tag_as_a_substring() {
        let photos = sample();
        let filtered = filter_photos(&photos, "sun");
        // Caption hit, tag hit, and a substring-of-tag hit, input order kept.
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].caption, "Sunset over hills");
        assert_eq!(filtered[1].caption, "Morning coffee");
    }

    #[test]
    fn result_is_a_subsequence_of_the_input() {
        let photos = sample();
        let filtered = filter_photos(&photos, "t");
        let mut input = photos.iter();
        for hit in &filtered {
            assert!(input.any(|p| p.id == hit.id), "result out of input order");
        }
    }

    #[test]
    fn no_match_yields_empty() {
        let photos = sample();
        assert!(filter_photos(&photos, "glacier").is_empty());
    }

    #[tokio::test]
    async fn view_recomputes_on_each_snapshot() {
        let (tx, rx) = watch::channel(Vec::new());
        let mut view = GalleryView::new(rx);
        view.set_query("sunset");
        assert!(view.snapshot().is_empty());

        tx.send(sample()).unwrap();
        assert!(view.changed().await);
        let hits = view.snapshot();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].caption, "Sunset over hills");

        view.set_query("");
        assert_eq!(view.snapshot().len(), 3);
    }
}
