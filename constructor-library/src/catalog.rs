//! Catalog and decor asset client.
//!
//! The backend exposes three small JSON endpoints: `/catalog` for monument
//! products and their categories, `/decor` for cross and flower art, and
//! `/process-image` which runs the screen filter server-side for sources
//! the browser cannot read pixels from.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{LibraryError, LibraryResult};

/// A built-in monument shape offered before the catalog loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonumentShape {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Image asset path.
    pub src: &'static str,
}

/// The stock monument shapes.
pub const MONUMENT_SHAPES: [MonumentShape; 8] = [
    MonumentShape { id: "1", name: "Вертикальный", src: "/assets/monuments/vertical.png" },
    MonumentShape { id: "2", name: "Горизонтальный", src: "/assets/monuments/horizontal.jpg" },
    MonumentShape { id: "3", name: "Эксклюзивный", src: "/assets/monuments/exclusive.jpg" },
    MonumentShape { id: "4", name: "Классический", src: "/assets/monuments/classic.jpg" },
    MonumentShape { id: "5", name: "Крест", src: "/assets/monuments/cross.jpg" },
    MonumentShape { id: "6", name: "Волна", src: "/assets/monuments/wave.jpg" },
    MonumentShape { id: "7", name: "Арка", src: "/assets/monuments/arch.jpg" },
    MonumentShape { id: "8", name: "Двойной", src: "/assets/monuments/double.jpg" },
];

/// A product category from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategory {
    /// Category identifier.
    pub id: u32,
    /// Category name.
    pub name: String,
}

/// A monument product from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Product identifier.
    pub id: u32,
    /// Product name.
    pub name: String,
    /// Owning category, 0 when uncategorized.
    #[serde(default)]
    pub category_id: u32,
    /// Product image; products without one are not usable on the canvas.
    pub image_url: Option<String>,
}

/// The kinds of decor art the backend serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorKind {
    /// Religious crosses.
    Crosses,
    /// Flowers and garlands.
    Flowers,
}

impl DecorKind {
    fn query_value(self) -> &'static str {
        match self {
            Self::Crosses => "crosses",
            Self::Flowers => "flowers",
        }
    }
}

/// A decor image asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorAsset {
    /// Asset identifier.
    pub id: u32,
    /// Display name, when the backend provides one.
    #[serde(default)]
    pub name: Option<String>,
    /// Image URL.
    pub image_url: String,
}

#[derive(Debug, Serialize)]
struct ProcessImageRequest<'a> {
    image_url: &'a str,
}

/// Asynchronous client for the asset library backend.
#[derive(Debug, Clone)]
pub struct LibraryClient {
    http: Client,
    base: Url,
}

impl LibraryClient {
    /// Create a client against the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::InvalidUrl`] if the URL is malformed and
    /// [`LibraryError::Http`] if the HTTP client fails to build.
    pub fn new(base_url: impl AsRef<str>) -> LibraryResult<Self> {
        let base = Url::parse(base_url.as_ref())
            .map_err(|e| LibraryError::InvalidUrl(e.to_string()))?;
        let http = Client::builder()
            .user_agent("monument-constructor")
            .build()?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> LibraryResult<Url> {
        self.base
            .join(path)
            .map_err(|e| LibraryError::InvalidUrl(e.to_string()))
    }

    /// Fetch the product categories.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Http`] on transport failure.
    pub async fn categories(&self) -> LibraryResult<Vec<CatalogCategory>> {
        let mut url = self.endpoint("catalog")?;
        url.query_pairs_mut().append_pair("type", "categories");
        let categories = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(categories)
    }

    /// Fetch the monument products, dropping entries without an image.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Http`] on transport failure.
    pub async fn products(&self) -> LibraryResult<Vec<CatalogProduct>> {
        let url = self.endpoint("catalog")?;
        let products: Vec<CatalogProduct> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let total = products.len();
        let usable: Vec<_> = products.into_iter().filter(|p| p.image_url.is_some()).collect();
        tracing::debug!(total, usable = usable.len(), "catalog products loaded");
        Ok(usable)
    }

    /// Fetch decor assets of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Http`] on transport failure.
    pub async fn decor(&self, kind: DecorKind) -> LibraryResult<Vec<DecorAsset>> {
        let mut url = self.endpoint("decor")?;
        url.query_pairs_mut().append_pair("type", kind.query_value());
        let assets = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(assets)
    }

    /// Run the screen filter server-side over a remote image URL and return
    /// the processed image as a data URI. Used when the source pixels are
    /// not locally readable.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Http`] on transport failure,
    /// [`LibraryError::Json`] when the body is not JSON, and
    /// [`LibraryError::UnexpectedResponse`] when the expected field is
    /// missing.
    pub async fn process_image(&self, image_url: &str) -> LibraryResult<String> {
        let url = self.endpoint("process-image")?;
        let body = self
            .http
            .post(url)
            .json(&ProcessImageRequest { image_url })
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let value: serde_json::Value = serde_json::from_str(&body).map_err(LibraryError::from)?;
        let processed = value
            .get("processed_image")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| {
                LibraryError::UnexpectedResponse(
                    "process-image response missing processed_image".to_string(),
                )
            })?;
        Ok(processed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn monument_shapes_have_unique_ids() {
        for (i, a) in MONUMENT_SHAPES.iter().enumerate() {
            for b in &MONUMENT_SHAPES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            LibraryClient::new("not a url"),
            Err(LibraryError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn products_filter_entries_without_images() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/catalog"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 1, "name": "Стела классическая", "category_id": 2, "image_url": "https://cdn.example/1.jpg" },
                { "id": 2, "name": "Без фото", "category_id": 2, "image_url": null }
            ])))
            .mount(&server)
            .await;

        let client = LibraryClient::new(server.uri()).expect("client");
        let products = client.products().await.expect("products");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Стела классическая");
    }

    #[tokio::test]
    async fn categories_use_type_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/catalog"))
            .and(query_param("type", "categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 2, "name": "Вертикальные" }
            ])))
            .mount(&server)
            .await;

        let client = LibraryClient::new(server.uri()).expect("client");
        let categories = client.categories().await.expect("categories");
        assert_eq!(categories[0].name, "Вертикальные");
    }

    #[tokio::test]
    async fn decor_kinds_map_to_queries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/decor"))
            .and(query_param("type", "flowers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 7, "name": "Розы", "image_url": "https://cdn.example/rose.png" }
            ])))
            .mount(&server)
            .await;

        let client = LibraryClient::new(server.uri()).expect("client");
        let flowers = client.decor(DecorKind::Flowers).await.expect("decor");
        assert_eq!(flowers[0].image_url, "https://cdn.example/rose.png");
    }

    #[tokio::test]
    async fn process_image_posts_url_and_returns_data_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-image"))
            .and(body_string_contains("photo.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "processed_image": "data:image/png;base64,AAAA"
            })))
            .mount(&server)
            .await;

        let client = LibraryClient::new(server.uri()).expect("client");
        let processed = client
            .process_image("https://cdn.example/photo.jpg")
            .await
            .expect("process");
        assert!(processed.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn http_errors_surface() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/decor"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = LibraryClient::new(server.uri()).expect("client");
        let result = client.decor(DecorKind::Crosses).await;
        let error = result.expect_err("should fail");
        assert!(matches!(error, LibraryError::Http(_)));
        // Transport failures are worth a retry; everything else is not.
        assert!(error.is_retryable());
    }

    #[test]
    fn non_transport_errors_are_not_retryable() {
        let url_err = LibraryError::InvalidUrl("bad url".into());
        assert!(!url_err.is_retryable());

        let json_err = LibraryError::from(
            serde_json::from_str::<serde_json::Value>("not json").expect_err("parse fails"),
        );
        assert!(!json_err.is_retryable());

        let response_err = LibraryError::UnexpectedResponse("bad response".into());
        assert!(!response_err.is_retryable());
    }

    #[tokio::test]
    async fn malformed_process_payload_is_a_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-image"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = LibraryClient::new(server.uri()).expect("client");
        let result = client.process_image("https://cdn.example/photo.jpg").await;
        assert!(matches!(result, Err(LibraryError::Json(_))));
    }

    #[tokio::test]
    async fn process_payload_without_field_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-image"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok"
            })))
            .mount(&server)
            .await;

        let client = LibraryClient::new(server.uri()).expect("client");
        let result = client.process_image("https://cdn.example/photo.jpg").await;
        assert!(matches!(result, Err(LibraryError::UnexpectedResponse(_))));
    }
}
