// Catalog document locations and decoding.
// Maps categories and category ids to URLs and turns JSON bodies into typed records.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{Result, WikiError};

use super::client::CatalogClient;
use super::types::{Category, Website};

/// Filename of the category index document.
pub const CATEGORIES_FILE: &str = "categories.json";

impl CatalogClient {
    /// URL of the category index.
    pub fn categories_url(&self) -> String {
        format!("{}/{}", self.base_url(), CATEGORIES_FILE)
    }

    /// URL of the website document for a category.
    pub fn category_url(&self, category_id: &str) -> String {
        format!("{}/{}.json", self.base_url(), category_id)
    }
}

/// Decode the category index. The document must be an array of categories.
pub fn decode_categories(value: &Value) -> Result<Vec<Category>> {
    Ok(Vec::<Category>::deserialize(value)?)
}

/// Decode a category's website document. The document must be an array.
///
/// Entries that fail to decode are skipped, as are entries filed under a
/// different category than the document they were served from.
pub fn decode_websites(category_id: &str, value: &Value) -> Result<Vec<Website>> {
    let Some(entries) = value.as_array() else {
        return Err(WikiError::Other(format!(
            "website document for {} is not an array",
            category_id
        )));
    };

    let websites = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match Website::deserialize(entry) {
            Ok(website) if website.category == category_id => Some(website),
            Ok(website) => {
                warn!(
                    category_id,
                    website_id = %website.id,
                    filed_under = %website.category,
                    "skipping website filed under another category"
                );
                None
            }
            Err(e) => {
                warn!(category_id, index, error = %e, "skipping malformed website entry");
                None
            }
        })
        .collect();
    Ok(websites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_urls() {
        let client =
            CatalogClient::new("https://example.com/data/", Duration::from_secs(5), None).unwrap();
        assert_eq!(
            client.categories_url(),
            "https://example.com/data/categories.json"
        );
        assert_eq!(
            client.category_url("design-tools"),
            "https://example.com/data/design-tools.json"
        );
    }

    #[test]
    fn test_decode_categories_rejects_non_array() {
        assert!(decode_categories(&json!({"id": "x"})).is_err());
        assert_eq!(decode_categories(&json!([])).unwrap(), Vec::new());
    }

    #[test]
    fn test_decode_websites_skips_bad_entries() {
        let value = json!([
            {
                "id": "figma", "title": "Figma", "url": "https://figma.com",
                "description": "Design", "category": "design-tools",
                "tags": ["design"], "dateAdded": "2023-01-15"
            },
            { "id": "broken", "title": "No date" },
            {
                "id": "stray", "title": "Stray", "url": "https://stray.example",
                "description": "Wrong file", "category": "ai-tools",
                "dateAdded": "2023-02-01"
            }
        ]);

        let websites = decode_websites("design-tools", &value).unwrap();
        assert_eq!(websites.len(), 1);
        assert_eq!(websites[0].id, "figma");
    }

    #[test]
    fn test_decode_websites_rejects_non_array() {
        let err = decode_websites("design-tools", &json!({"error": "rate limited"})).unwrap_err();
        assert!(matches!(err, WikiError::Other(_)));
        assert!(err.to_string().contains("design-tools"));

        assert!(decode_websites("design-tools", &json!([])).unwrap().is_empty());
    }
}
