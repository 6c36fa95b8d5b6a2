// Typed catalog accessors.
// Derives categories, website lists, lookups and counts from one render cycle.

use std::sync::Arc;

use futures::future::join_all;
use tracing::warn;

use crate::remote::{
    CatalogClient, Category, CategorySummary, Website, decode_categories, decode_websites,
};

use super::cycle::{Fetched, RenderCycle};

/// Catalog view over a single render cycle.
///
/// The `fetch_*` methods keep the distinction between a missing document, a
/// failed fetch and an empty one. The plain methods collapse the first two
/// into an empty result.
pub struct Catalog {
    cycle: RenderCycle,
}

impl Catalog {
    /// Start a new render cycle against the given client.
    pub fn begin(client: Arc<CatalogClient>) -> Self {
        Self {
            cycle: RenderCycle::new(client),
        }
    }

    /// The underlying cycle.
    pub fn cycle(&self) -> &RenderCycle {
        &self.cycle
    }

    /// Fetch the category index.
    pub async fn fetch_categories(&self) -> Fetched<Vec<Category>> {
        let url = self.cycle.client().categories_url();
        self.cycle.fetch_json(&url).await.and_then(|value| {
            decode_categories(&value).inspect_err(|e| {
                warn!(url = %url, error = %e, "category index has unexpected shape");
            })
        })
    }

    /// All categories in published order.
    pub async fn categories(&self) -> Vec<Category> {
        self.fetch_categories().await.or_empty()
    }

    /// Look up one category record.
    pub async fn category_by_id(&self, category_id: &str) -> Option<Category> {
        self.categories()
            .await
            .into_iter()
            .find(|category| category.id == category_id)
    }

    /// Fetch the websites filed under a category.
    pub async fn fetch_websites_by_category(&self, category_id: &str) -> Fetched<Vec<Website>> {
        let url = self.cycle.client().category_url(category_id);
        self.cycle.fetch_json(&url).await.and_then(|value| {
            decode_websites(category_id, &value).inspect_err(|e| {
                warn!(url = %url, error = %e, "website document has unexpected shape");
            })
        })
    }

    /// Websites filed under a category, in published order.
    pub async fn websites_by_category(&self, category_id: &str) -> Vec<Website> {
        self.fetch_websites_by_category(category_id).await.or_empty()
    }

    /// Websites of a category that are assigned to the given subcategory.
    pub async fn websites_by_subcategory(
        &self,
        category_id: &str,
        subcategory_id: &str,
    ) -> Vec<Website> {
        self.websites_by_category(category_id)
            .await
            .into_iter()
            .filter(|website| website.subcategory.as_deref() == Some(subcategory_id))
            .collect()
    }

    /// Every website across all categories. Categories are fetched
    /// concurrently; a category that fails contributes nothing.
    pub async fn all_websites(&self) -> Vec<Website> {
        let categories = self.categories().await;
        let lists = join_all(
            categories
                .iter()
                .map(|category| self.websites_by_category(&category.id)),
        )
        .await;
        lists.into_iter().flatten().collect()
    }

    /// First website with the given id across all categories.
    pub async fn website_by_id(&self, website_id: &str) -> Option<Website> {
        self.all_websites()
            .await
            .into_iter()
            .find(|website| website.id == website_id)
    }

    /// Websites flagged as featured, across all categories.
    pub async fn featured_websites(&self) -> Vec<Website> {
        self.all_websites()
            .await
            .into_iter()
            .filter(|website| website.featured)
            .collect()
    }

    /// Number of websites in a category.
    pub async fn category_count(&self, category_id: &str) -> usize {
        self.websites_by_category(category_id).await.len()
    }

    /// Categories paired with their website counts, for the home view.
    pub async fn fetch_category_summaries(&self) -> Fetched<Vec<CategorySummary>> {
        let categories = match self.fetch_categories().await {
            Fetched::Ready(categories) => categories,
            Fetched::Missing => return Fetched::Missing,
            Fetched::Failed(reason) => return Fetched::Failed(reason),
        };

        let counts = join_all(
            categories
                .iter()
                .map(|category| self.category_count(&category.id)),
        )
        .await;

        Fetched::Ready(
            categories
                .into_iter()
                .zip(counts)
                .map(|(category, count)| CategorySummary { category, count })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::time::Duration;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn website(id: &str, category: &str, subcategory: Option<&str>, featured: bool) -> Value {
        let mut entry = json!({
            "id": id,
            "title": id.to_uppercase(),
            "url": format!("https://{}.example", id),
            "description": format!("{} description", id),
            "category": category,
            "tags": ["tag"],
            "dateAdded": "2024-01-01",
            "featured": featured,
        });
        if let Some(sub) = subcategory {
            entry["subcategory"] = json!(sub);
        }
        entry
    }

    async fn mount(server: &MockServer, file: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", file)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn catalog_server() -> MockServer {
        let server = MockServer::start().await;
        mount(
            &server,
            "categories.json",
            json!([
                {
                    "id": "ai-tools", "name": "AI Tools", "description": "AI",
                    "subcategories": [
                        {"id": "image-generation", "name": "Image Generation", "description": "Images"}
                    ]
                },
                {"id": "design-tools", "name": "Design Tools", "description": "Design"},
                {"id": "missing-category", "name": "Missing", "description": "Gone"}
            ]),
        )
        .await;
        mount(
            &server,
            "ai-tools.json",
            json!([
                website("midjourney", "ai-tools", Some("image-generation"), true),
                website("chatbot", "ai-tools", None, false),
            ]),
        )
        .await;
        mount(
            &server,
            "design-tools.json",
            json!([website("figma", "design-tools", None, false)]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/missing-category.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        server
    }

    fn catalog(server: &MockServer) -> Catalog {
        let client = CatalogClient::new(&server.uri(), Duration::from_secs(5), None).unwrap();
        Catalog::begin(Arc::new(client))
    }

    #[tokio::test]
    async fn test_categories_and_lookup() {
        let server = catalog_server().await;
        let catalog = catalog(&server);

        let categories = catalog.categories().await;
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0].id, "ai-tools");

        assert_eq!(
            catalog.category_by_id("design-tools").await.map(|c| c.name),
            Some("Design Tools".to_string())
        );
        assert!(catalog.category_by_id("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_websites_belong_to_requested_category() {
        let server = catalog_server().await;
        let catalog = catalog(&server);

        let websites = catalog.websites_by_category("ai-tools").await;
        assert_eq!(websites.len(), 2);
        assert!(websites.iter().all(|w| w.category == "ai-tools"));
    }

    #[tokio::test]
    async fn test_failed_category_is_empty() {
        let server = catalog_server().await;
        let catalog = catalog(&server);

        assert!(catalog.websites_by_category("missing-category").await.is_empty());
        assert_eq!(catalog.category_count("missing-category").await, 0);
        assert!(matches!(
            catalog.fetch_websites_by_category("missing-category").await,
            Fetched::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_non_array_document_is_failed() {
        let server = catalog_server().await;
        mount(&server, "rate-limited.json", json!({"error": "rate limited"})).await;
        let catalog = catalog(&server);

        assert!(matches!(
            catalog.fetch_websites_by_category("rate-limited").await,
            Fetched::Failed(_)
        ));
        assert!(catalog.websites_by_category("rate-limited").await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_is_missing() {
        let server = catalog_server().await;
        let catalog = catalog(&server);

        assert_eq!(
            catalog.fetch_websites_by_category("never-published").await,
            Fetched::Missing
        );
        assert!(catalog.websites_by_category("never-published").await.is_empty());
    }

    #[tokio::test]
    async fn test_websites_by_subcategory() {
        let server = catalog_server().await;
        let catalog = catalog(&server);

        let websites = catalog
            .websites_by_subcategory("ai-tools", "image-generation")
            .await;
        assert_eq!(websites.len(), 1);
        assert_eq!(websites[0].id, "midjourney");

        assert!(
            catalog
                .websites_by_subcategory("ai-tools", "video-generation")
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_fan_out_survives_partial_failure() {
        let server = catalog_server().await;
        let catalog = catalog(&server);

        let all = catalog.all_websites().await;
        let ids: Vec<&str> = all.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["midjourney", "chatbot", "figma"]);

        assert_eq!(
            catalog.website_by_id("figma").await.map(|w| w.title),
            Some("FIGMA".to_string())
        );
        assert!(catalog.website_by_id("nope").await.is_none());

        let featured = catalog.featured_websites().await;
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].id, "midjourney");
    }

    #[tokio::test]
    async fn test_category_summaries_count_sites() {
        let server = catalog_server().await;
        let catalog = catalog(&server);

        let summaries = catalog.fetch_category_summaries().await.or_empty();
        let counts: Vec<(&str, usize)> = summaries
            .iter()
            .map(|s| (s.category.id.as_str(), s.count))
            .collect();
        assert_eq!(
            counts,
            vec![("ai-tools", 2), ("design-tools", 1), ("missing-category", 0)]
        );
    }

    #[tokio::test]
    async fn test_repeated_lookups_share_fetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "design-tools", "name": "Design Tools", "description": "Design"}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/design-tools.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([website("figma", "design-tools", None, true)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let catalog = catalog(&server);
        catalog.websites_by_category("design-tools").await;
        catalog.websites_by_category("design-tools").await;
        catalog.website_by_id("figma").await;
        catalog.featured_websites().await;
        catalog.category_count("design-tools").await;

        assert_eq!(catalog.cycle().distinct_requests(), 2);
    }

    #[tokio::test]
    async fn test_missing_index_is_empty() {
        let server = MockServer::start().await;
        let catalog = catalog(&server);

        assert_eq!(catalog.fetch_categories().await, Fetched::Missing);
        assert!(catalog.categories().await.is_empty());
        assert!(catalog.all_websites().await.is_empty());
        assert_eq!(catalog.fetch_category_summaries().await, Fetched::Missing);
    }
}
