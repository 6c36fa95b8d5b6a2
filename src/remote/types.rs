// Catalog data types.
// Defines structs for deserializing the category and website JSON documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Monetization model of a website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pricing {
    Free,
    Paid,
    Trial,
    Limited,
    #[serde(other)]
    Unknown,
}

/// Second-level grouping nested inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Top-level grouping of websites. The id doubles as the filename stem of
/// the category's website document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<SubCategory>>,
}

impl Category {
    /// Subcategories in declared order (empty when the field is absent).
    pub fn subcategories(&self) -> &[SubCategory] {
        self.subcategories.as_deref().unwrap_or_default()
    }

    /// Whether the category declares at least one subcategory.
    pub fn has_subcategories(&self) -> bool {
        !self.subcategories().is_empty()
    }

    /// Look up a subcategory by id.
    pub fn subcategory(&self, id: &str) -> Option<&SubCategory> {
        self.subcategories().iter().find(|sub| sub.id == id)
    }
}

/// A catalogued external website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date_added: NaiveDate,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

/// Category record paired with its website count, used by the home view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub count: usize,
}
