//! Collection API client: object lookup, daily artwork selection and catalog search

use crate::constants::SEARCH_CONCURRENCY;
use crate::daily::{candidate_ids, DailyRange};
use crate::types::{Artwork, MuseumObject, SearchResponse, SearchResult};
use chrono::NaiveDate;
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("Object {0} not found")]
    NotFound(u32),

    #[error("Image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("No eligible artwork found after {attempts} attempts")]
    NoEligibleArtwork { attempts: u32 },
}

#[derive(Clone)]
pub struct MuseumClient {
    base_url: String,
    http: reqwest::Client,
}

impl MuseumClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("pixel-museum/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn fetch_object(&self, id: u32) -> Result<MuseumObject, ApiError> {
        let url = format!("{}/objects/{}", self.base_url, id);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.json::<MuseumObject>().await?)
    }

    /// Walk today's candidate ids until one is public domain with an image.
    pub async fn fetch_daily_artwork(
        &self,
        date: NaiveDate,
        range: DailyRange,
        max_attempts: u32,
    ) -> Result<Artwork, ApiError> {
        let mut attempts = 0;
        for id in candidate_ids(date, range, max_attempts) {
            attempts += 1;
            match self.fetch_object(id).await {
                Ok(object) if object.is_eligible() => {
                    if let Some(artwork) = object.into_artwork() {
                        info!(id, attempts, title = %artwork.title, "Daily artwork selected");
                        return Ok(artwork);
                    }
                }
                Ok(object) => {
                    debug!(id, public_domain = object.is_public_domain, "Candidate ineligible");
                }
                Err(ApiError::NotFound(_)) => debug!(id, "Candidate missing"),
                Err(e) => return Err(e),
            }
        }
        warn!(%date, attempts, "No eligible daily artwork");
        Err(ApiError::NoEligibleArtwork { attempts })
    }

    pub async fn fetch_image(&self, url: &str) -> Result<image::DynamicImage, ApiError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let bytes = response.bytes().await?;
        debug!(url, bytes = bytes.len(), "Image downloaded");
        Ok(image::load_from_memory(&bytes)?)
    }

    /// Search the catalog and fetch details for at most `limit` hits, in API order.
    pub async fn search(&self, term: &str, limit: usize) -> Result<Vec<SearchResult>, ApiError> {
        let term = term.trim();
        if term.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", term), ("hasImages", "true")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let found: SearchResponse = response.json().await?;
        let ids: Vec<u32> = found.object_ids.unwrap_or_default().into_iter().take(limit).collect();
        debug!(term, total = found.total, fetching = ids.len(), "Search response received");

        let results = futures::stream::iter(ids)
            .map(|id| async move { (id, self.fetch_object(id).await) })
            .buffered(SEARCH_CONCURRENCY)
            .filter_map(|(id, result)| async move {
                match result {
                    Ok(object) => Some(object.to_search_result()),
                    Err(e) => {
                        warn!(id, error = %e, "Skipping search hit");
                        None
                    }
                }
            })
            .collect::<Vec<_>>()
            .await;

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn object_json(id: u32, public: bool, image: &str) -> serde_json::Value {
        serde_json::json!({
            "objectID": id,
            "isPublicDomain": public,
            "primaryImage": image,
            "primaryImageSmall": "",
            "title": format!("Object {}", id),
            "artistDisplayName": "Artist",
            "objectDate": "1870",
            "department": "European Paintings",
            "objectURL": format!("https://museum.test/{}", id),
        })
    }

    async fn mount_object(server: &MockServer, id: u32, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/objects/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn day() -> NaiveDate {
        // seed 484
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn fetch_object_maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/objects/7"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = MuseumClient::new(server.uri()).unwrap();
        assert!(matches!(client.fetch_object(7).await, Err(ApiError::NotFound(7))));
    }

    #[tokio::test]
    async fn fetch_object_reports_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/objects/8"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = MuseumClient::new(format!("{}/", server.uri())).unwrap();
        match client.fetch_object(8).await {
            Err(ApiError::Status(status)) => assert_eq!(status.as_u16(), 503),
            other => panic!("unexpected result: {:?}", other.map(|o| o.object_id)),
        }
    }

    #[tokio::test]
    async fn daily_artwork_skips_ineligible_candidates() {
        let server = MockServer::start().await;
        // 484 % 10 == 4: candidates are 104, 105, 106, ...
        let range = DailyRange::new(100, 10);
        mount_object(&server, 104, object_json(104, false, "https://img/104.jpg")).await;
        Mock::given(method("GET"))
            .and(path("/objects/105"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        mount_object(&server, 106, object_json(106, true, "")).await;
        mount_object(&server, 107, object_json(107, true, "https://img/107.jpg")).await;

        let client = MuseumClient::new(server.uri()).unwrap();
        let artwork = client.fetch_daily_artwork(day(), range, 10).await.unwrap();
        assert_eq!(artwork.id, 107);
        assert_eq!(artwork.image_url, "https://img/107.jpg");
        assert_eq!(artwork.object_url, "https://museum.test/107");
    }

    #[tokio::test]
    async fn daily_artwork_gives_up_after_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(3)
            .mount(&server)
            .await;

        let client = MuseumClient::new(server.uri()).unwrap();
        let result = client.fetch_daily_artwork(day(), DailyRange::new(1, 50), 3).await;
        assert!(matches!(result, Err(ApiError::NoEligibleArtwork { attempts: 3 })));
    }

    #[tokio::test]
    async fn daily_artwork_aborts_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = MuseumClient::new(server.uri()).unwrap();
        let result = client.fetch_daily_artwork(day(), DailyRange::new(1, 50), 5).await;
        assert!(matches!(result, Err(ApiError::Status(_))));
    }

    #[tokio::test]
    async fn search_limits_and_keeps_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "sunflowers"))
            .and(query_param("hasImages", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total": 5,
                "objectIDs": [30, 10, 20, 40, 50]
            })))
            .expect(1)
            .mount(&server)
            .await;
        for id in [30, 10, 20] {
            mount_object(&server, id, object_json(id, true, "x")).await;
        }

        let client = MuseumClient::new(server.uri()).unwrap();
        let results = client.search("  sunflowers ", 3).await.unwrap();
        let ids: Vec<u32> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
        assert_eq!(results[0].title, "Object 30");
    }

    #[tokio::test]
    async fn search_skips_failed_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total": 2,
                "objectIDs": [1, 2]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/objects/1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        mount_object(&server, 2, object_json(2, false, "")).await;

        let client = MuseumClient::new(server.uri()).unwrap();
        let results = client.search("anything", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
    }

    #[tokio::test]
    async fn search_with_no_hits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"total": 0, "objectIDs": null})),
            )
            .mount(&server)
            .await;

        let client = MuseumClient::new(server.uri()).unwrap();
        assert!(client.search("zzzz", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_search_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = MuseumClient::new(server.uri()).unwrap();
        assert!(client.search("   ", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_image_decodes_png() {
        let server = MockServer::start().await;
        let mut png = Vec::new();
        image::RgbaImage::from_pixel(3, 2, image::Rgba([200, 10, 10, 255]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        Mock::given(method("GET"))
            .and(path("/img.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(png))
            .mount(&server)
            .await;

        let client = MuseumClient::new(server.uri()).unwrap();
        let img = client.fetch_image(&format!("{}/img.png", server.uri())).await.unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
    }
}
