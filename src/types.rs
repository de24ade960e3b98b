//! Common types and data structures

use image::RgbaImage;
use serde::Deserialize;
use std::sync::{Arc, Mutex};

/// Result of the background daily load, handed to the UI thread
pub enum LoadOutcome {
    Ready { artwork: Artwork, source: RgbaImage },
    Failed(String),
}

/// Search response tagged with the request generation it answers
#[derive(Debug)]
pub struct SearchReply {
    pub generation: u64,
    pub result: Result<Vec<SearchResult>, String>,
}

/// Hand-off between search tasks and the UI thread.
/// Only the newest generation is kept.
#[derive(Clone, Default)]
pub struct SearchSlot(Arc<Mutex<Option<SearchReply>>>);

impl SearchSlot {
    /// Store `reply` unless a reply from the same or a newer search is already waiting.
    pub fn publish(&self, reply: SearchReply) -> bool {
        let Ok(mut slot) = self.0.lock() else {
            return false;
        };
        if slot.as_ref().is_some_and(|r| r.generation >= reply.generation) {
            return false;
        }
        *slot = Some(reply);
        true
    }

    /// Take the waiting reply if it answers `current`. Stale replies are discarded.
    pub fn take_current(&self, current: u64) -> Option<SearchReply> {
        let reply = self.0.lock().ok()?.take()?;
        (reply.generation == current).then_some(reply)
    }
}

/// The artwork being guessed
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub date: String,
    pub image_url: String,
    pub department: String,
    pub object_url: String,
}

/// Catalog entry offered as a guess
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub date: String,
}

impl SearchResult {
    /// "Artist, date" with empty parts dropped
    pub fn byline(&self) -> String {
        let parts: Vec<&str> = [self.artist.as_str(), self.date.as_str()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        if parts.is_empty() {
            "Unknown artist".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Object record from the collection API
#[derive(Debug, Clone, Deserialize)]
pub struct MuseumObject {
    #[serde(rename = "objectID")]
    pub object_id: u32,
    #[serde(rename = "isPublicDomain", default)]
    pub is_public_domain: bool,
    #[serde(rename = "primaryImage", default)]
    pub primary_image: String,
    #[serde(rename = "primaryImageSmall", default)]
    pub primary_image_small: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "artistDisplayName", default)]
    pub artist_display_name: String,
    #[serde(rename = "objectDate", default)]
    pub object_date: String,
    #[serde(default)]
    pub department: String,
    #[serde(rename = "objectURL", default)]
    pub object_url: String,
}

impl MuseumObject {
    /// Small image when present, full image otherwise
    pub fn image_url(&self) -> Option<&str> {
        [&self.primary_image_small, &self.primary_image]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }

    /// Public domain with an image to pixelate
    pub fn is_eligible(&self) -> bool {
        self.is_public_domain && self.image_url().is_some()
    }

    pub fn into_artwork(self) -> Option<Artwork> {
        let image_url = self.image_url()?.to_string();
        Some(Artwork {
            id: self.object_id,
            title: self.title,
            artist: self.artist_display_name,
            date: self.object_date,
            image_url,
            department: self.department,
            object_url: self.object_url,
        })
    }

    pub fn to_search_result(&self) -> SearchResult {
        SearchResult {
            id: self.object_id,
            title: self.title.clone(),
            artist: self.artist_display_name.clone(),
            date: self.object_date.clone(),
        }
    }
}

/// Search endpoint response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Option<Vec<u32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_with_missing_fields() {
        let obj: MuseumObject = serde_json::from_str(
            r#"{"objectID": 436535, "isPublicDomain": true, "primaryImage": "https://img/full.jpg",
                "title": "Wheat Field with Cypresses", "artistDisplayName": "Vincent van Gogh"}"#,
        )
        .unwrap();
        assert_eq!(obj.object_id, 436535);
        assert_eq!(obj.image_url(), Some("https://img/full.jpg"));
        assert!(obj.is_eligible());
        assert_eq!(obj.object_date, "");
    }

    #[test]
    fn prefers_small_image() {
        let obj: MuseumObject = serde_json::from_str(
            r#"{"objectID": 1, "isPublicDomain": true, "primaryImage": "full", "primaryImageSmall": "small"}"#,
        )
        .unwrap();
        assert_eq!(obj.into_artwork().unwrap().image_url, "small");
    }

    #[test]
    fn ineligible_without_image_or_rights() {
        let no_image: MuseumObject =
            serde_json::from_str(r#"{"objectID": 2, "isPublicDomain": true, "primaryImage": " "}"#).unwrap();
        assert!(!no_image.is_eligible());
        let restricted: MuseumObject =
            serde_json::from_str(r#"{"objectID": 3, "isPublicDomain": false, "primaryImage": "x"}"#).unwrap();
        assert!(!restricted.is_eligible());
    }

    #[test]
    fn search_response_accepts_null_ids() {
        let resp: SearchResponse = serde_json::from_str(r#"{"total": 0, "objectIDs": null}"#).unwrap();
        assert_eq!(resp.total, 0);
        assert!(resp.object_ids.is_none());
    }

    fn reply(generation: u64, title: &str) -> SearchReply {
        SearchReply {
            generation,
            result: Ok(vec![SearchResult {
                id: generation as u32,
                title: title.into(),
                artist: String::new(),
                date: String::new(),
            }]),
        }
    }

    #[test]
    fn older_search_cannot_overwrite_newer() {
        let slot = SearchSlot::default();
        assert!(slot.publish(reply(2, "newer")));
        assert!(!slot.publish(reply(1, "older")));
        let taken = slot.take_current(2).unwrap();
        assert_eq!(taken.result.unwrap()[0].title, "newer");
    }

    #[test]
    fn newer_search_replaces_waiting_reply() {
        let slot = SearchSlot::default();
        assert!(slot.publish(reply(1, "first")));
        assert!(slot.publish(reply(3, "third")));
        assert_eq!(slot.take_current(3).unwrap().generation, 3);
        assert!(slot.take_current(3).is_none());
    }

    #[test]
    fn stale_reply_is_dropped_on_take() {
        let slot = SearchSlot::default();
        slot.publish(reply(4, "old"));
        assert!(slot.take_current(5).is_none());
        // Discarded, not left behind for a later poll
        assert!(slot.take_current(4).is_none());
    }

    #[test]
    fn byline_skips_blank_parts() {
        let mut r = SearchResult {
            id: 1,
            title: "Untitled".into(),
            artist: "".into(),
            date: "1890".into(),
        };
        assert_eq!(r.byline(), "1890");
        r.date.clear();
        assert_eq!(r.byline(), "Unknown artist");
    }
}
