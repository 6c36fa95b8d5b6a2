// Page derivations for the catalog views.
// Resolves route targets, partitions websites into sections, and maps pricing to badges.

use chrono::NaiveDate;
use ratatui::style::Color;

use crate::remote::{Category, Pricing, SubCategory, Website};

/// Anchor and bucket id of the implicit "no subcategory" section.
pub const UNCATEGORIZED: &str = "uncategorized";

/// A bucket a website can be grouped into on a category page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bucket {
    Subcategory(SubCategory),
    Uncategorized,
}

impl Bucket {
    pub fn id(&self) -> &str {
        match self {
            Bucket::Subcategory(sub) => &sub.id,
            Bucket::Uncategorized => UNCATEGORIZED,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Bucket::Subcategory(sub) => &sub.name,
            Bucket::Uncategorized => "Uncategorized",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Bucket::Subcategory(sub) => &sub.description,
            Bucket::Uncategorized => "Websites that don't belong to a specific subcategory",
        }
    }
}

/// One titled group of websites on a category page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub bucket: Bucket,
    pub websites: Vec<Website>,
}

/// How a found category lays out its websites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// One section per non-empty bucket, subcategories first in declared order.
    Grouped(Vec<Section>),
    /// The category has no subcategories.
    Flat(Vec<Website>),
}

impl Layout {
    /// Websites in display order.
    pub fn websites(&self) -> Vec<&Website> {
        match self {
            Layout::Grouped(sections) => sections.iter().flat_map(|s| &s.websites).collect(),
            Layout::Flat(websites) => websites.iter().collect(),
        }
    }
}

/// Resolved state of a category route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPage {
    NotFound,
    Found { category: Category, layout: Layout },
}

/// Resolved state of a subcategory route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubcategoryPage {
    NotFound,
    Found {
        category: Category,
        subcategory: SubCategory,
        websites: Vec<Website>,
    },
}

/// Index of the declared subcategory a website belongs to. Websites with no
/// subcategory, or naming one their category does not declare, get `None`.
fn declared_index(category: &Category, website: &Website) -> Option<usize> {
    let sub = website.subcategory.as_deref()?;
    category.subcategories().iter().position(|s| s.id == sub)
}

/// Split a category's websites into one section per subcategory plus the
/// uncategorized section. Every website lands in exactly one section; empty
/// sections are kept.
pub fn partition(category: &Category, websites: &[Website]) -> Vec<Section> {
    let mut sections: Vec<Section> = category
        .subcategories()
        .iter()
        .map(|sub| Section {
            bucket: Bucket::Subcategory(sub.clone()),
            websites: Vec::new(),
        })
        .collect();
    let uncategorized = sections.len();
    sections.push(Section {
        bucket: Bucket::Uncategorized,
        websites: Vec::new(),
    });

    for website in websites {
        let index = declared_index(category, website).unwrap_or(uncategorized);
        sections[index].websites.push(website.clone());
    }

    sections
}

/// Resolve a category route against the category index.
pub fn resolve_category_page(
    categories: &[Category],
    category_id: &str,
    websites: Vec<Website>,
) -> CategoryPage {
    let Some(category) = categories.iter().find(|c| c.id == category_id) else {
        return CategoryPage::NotFound;
    };

    let layout = if category.has_subcategories() {
        let sections = partition(category, &websites)
            .into_iter()
            .filter(|section| !section.websites.is_empty())
            .collect();
        Layout::Grouped(sections)
    } else {
        Layout::Flat(websites)
    };

    CategoryPage::Found {
        category: category.clone(),
        layout,
    }
}

/// Resolve a subcategory route. The websites are expected to be the
/// category's list already filtered to the subcategory.
pub fn resolve_subcategory_page(
    categories: &[Category],
    category_id: &str,
    subcategory_id: &str,
    websites: Vec<Website>,
) -> SubcategoryPage {
    let Some(category) = categories.iter().find(|c| c.id == category_id) else {
        return SubcategoryPage::NotFound;
    };
    let Some(subcategory) = category.subcategory(subcategory_id) else {
        return SubcategoryPage::NotFound;
    };

    SubcategoryPage::Found {
        subcategory: subcategory.clone(),
        category: category.clone(),
        websites,
    }
}

/// Sidebar row for jumping to a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub anchor: String,
    pub name: String,
    pub count: usize,
    /// Declared subcategories have a page of their own; the uncategorized
    /// bucket does not.
    pub has_page: bool,
}

/// Sidebar rows: every declared subcategory with its count, then the
/// uncategorized row when it has members.
pub fn sidebar_entries(category: &Category, websites: &[Website]) -> Vec<SidebarEntry> {
    partition(category, websites)
        .into_iter()
        .filter(|section| {
            matches!(section.bucket, Bucket::Subcategory(_)) || !section.websites.is_empty()
        })
        .map(|section| SidebarEntry {
            anchor: section.bucket.id().to_string(),
            name: section.bucket.name().to_string(),
            count: section.websites.len(),
            has_page: matches!(section.bucket, Bucket::Subcategory(_)),
        })
        .collect()
}

/// Display label and colour for a pricing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub color: Color,
}

/// Badge for a website's pricing. Absent or unrecognised values get none.
pub fn pricing_badge(pricing: Option<Pricing>) -> Option<Badge> {
    let (label, color) = match pricing? {
        Pricing::Free => ("Free", Color::Green),
        Pricing::Paid => ("Paid", Color::Blue),
        Pricing::Trial => ("Trial", Color::Yellow),
        Pricing::Limited => ("Limited", Color::Gray),
        Pricing::Unknown => return None,
    };
    Some(Badge { label, color })
}

/// Everything a website card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub tags: Vec<String>,
    pub badge: Option<Badge>,
    pub featured: bool,
    pub added: String,
}

impl WebsiteCard {
    pub fn new(website: &Website) -> Self {
        Self {
            id: website.id.clone(),
            title: website.title.clone(),
            description: website.description.clone(),
            url: website.url.clone(),
            tags: website.tags.clone(),
            badge: pricing_badge(website.pricing),
            featured: website.featured,
            added: format_date(website.date_added),
        }
    }
}

/// Format a date as e.g. "Jan 15, 2023".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sub(id: &str) -> SubCategory {
        SubCategory {
            id: id.to_string(),
            name: id.replace('-', " "),
            description: format!("{} tools", id),
        }
    }

    fn category(id: &str, subs: Option<Vec<SubCategory>>) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            subcategories: subs,
        }
    }

    fn website(id: &str, category: &str, subcategory: Option<&str>) -> Website {
        Website {
            id: id.to_string(),
            title: id.to_string(),
            url: format!("https://{}.example", id),
            description: String::new(),
            category: category.to_string(),
            tags: vec![],
            date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            featured: false,
            pricing: None,
            subcategory: subcategory.map(str::to_string),
        }
    }

    fn ai_tools() -> Category {
        category(
            "ai-tools",
            Some(vec![sub("image-generation"), sub("video-generation")]),
        )
    }

    #[test]
    fn test_partition_places_each_website_once() {
        let category = ai_tools();
        let websites = vec![
            website("a", "ai-tools", Some("image-generation")),
            website("b", "ai-tools", None),
            website("c", "ai-tools", Some("video-generation")),
            website("d", "ai-tools", Some("voice-generation")),
            website("e", "ai-tools", Some("image-generation")),
        ];

        let sections = partition(&category, &websites);
        assert_eq!(sections.len(), 3);

        let mut seen = HashSet::new();
        let mut total = 0;
        for section in &sections {
            for website in &section.websites {
                assert!(seen.insert(website.id.clone()), "duplicate {}", website.id);
                total += 1;
            }
        }
        assert_eq!(total, websites.len());

        assert_eq!(sections[0].bucket.id(), "image-generation");
        assert_eq!(sections[0].websites.len(), 2);
        assert_eq!(sections[1].websites.len(), 1);
        // Unknown subcategory "voice-generation" falls back to uncategorized.
        assert_eq!(sections[2].bucket, Bucket::Uncategorized);
        let uncategorized: Vec<&str> =
            sections[2].websites.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(uncategorized, vec!["b", "d"]);
    }

    #[test]
    fn test_declared_uncategorized_id_does_not_absorb_unassigned() {
        let category = category(
            "ai-tools",
            Some(vec![sub("image-generation"), sub(UNCATEGORIZED)]),
        );
        let websites = vec![
            website("a", "ai-tools", Some(UNCATEGORIZED)),
            website("b", "ai-tools", None),
            website("c", "ai-tools", Some("image-generation")),
        ];

        let sections = partition(&category, &websites);
        assert_eq!(sections.len(), 3);

        assert!(matches!(sections[1].bucket, Bucket::Subcategory(_)));
        let declared: Vec<&str> = sections[1].websites.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(declared, vec!["a"]);

        assert_eq!(sections[2].bucket, Bucket::Uncategorized);
        let implicit: Vec<&str> = sections[2].websites.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(implicit, vec!["b"]);

        let entries = sidebar_entries(&category, &websites);
        assert_eq!(entries.len(), 3);
        assert!(entries[1].has_page);
        assert!(!entries[2].has_page);
    }

    #[test]
    fn test_unknown_category_is_not_found() {
        let categories = vec![ai_tools()];
        assert_eq!(
            resolve_category_page(&categories, "nope", vec![]),
            CategoryPage::NotFound
        );
        assert_eq!(
            resolve_subcategory_page(&categories, "nope", "image-generation", vec![]),
            SubcategoryPage::NotFound
        );
        assert_eq!(
            resolve_subcategory_page(&categories, "ai-tools", "nope", vec![]),
            SubcategoryPage::NotFound
        );
    }

    #[test]
    fn test_grouped_layout_drops_empty_sections() {
        let categories = vec![ai_tools()];
        let websites = vec![website("a", "ai-tools", Some("video-generation"))];

        let CategoryPage::Found { layout, .. } =
            resolve_category_page(&categories, "ai-tools", websites)
        else {
            panic!("expected found page");
        };
        let Layout::Grouped(sections) = layout else {
            panic!("expected grouped layout");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].bucket.id(), "video-generation");
    }

    #[test]
    fn test_flat_layout_without_subcategories() {
        let categories = vec![category("design-tools", None)];
        let websites = vec![
            website("figma", "design-tools", None),
            website("sketch", "design-tools", Some("ui-design")),
        ];

        let page = resolve_category_page(&categories, "design-tools", websites.clone());
        let CategoryPage::Found { layout, .. } = page else {
            panic!("expected found page");
        };
        assert_eq!(layout, Layout::Flat(websites));
        assert_eq!(layout.websites().len(), 2);
    }

    #[test]
    fn test_sidebar_entries() {
        let category = ai_tools();
        let websites = vec![
            website("a", "ai-tools", Some("image-generation")),
            website("b", "ai-tools", None),
        ];

        let entries = sidebar_entries(&category, &websites);
        let rows: Vec<(&str, usize)> = entries
            .iter()
            .map(|e| (e.anchor.as_str(), e.count))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("image-generation", 1),
                ("video-generation", 0),
                ("uncategorized", 1)
            ]
        );

        let only_sorted = vec![website("a", "ai-tools", Some("image-generation"))];
        let entries = sidebar_entries(&category, &only_sorted);
        assert!(entries.iter().all(|e| e.anchor != UNCATEGORIZED));
    }

    #[test]
    fn test_pricing_badge_mapping() {
        let cases = [
            (Pricing::Free, "Free", Color::Green),
            (Pricing::Paid, "Paid", Color::Blue),
            (Pricing::Trial, "Trial", Color::Yellow),
            (Pricing::Limited, "Limited", Color::Gray),
        ];
        for (pricing, label, color) in cases {
            let badge = pricing_badge(Some(pricing)).unwrap();
            assert_eq!(badge, Badge { label, color });
            assert_eq!(pricing_badge(Some(pricing)), Some(badge));
        }
        assert_eq!(pricing_badge(Some(Pricing::Unknown)), None);
        assert_eq!(pricing_badge(None), None);
    }

    #[test]
    fn test_design_tools_scenario_card() {
        let categories: Vec<Category> = serde_json::from_str(
            r#"[{"id": "design-tools", "name": "Design Tools", "description": "..."}]"#,
        )
        .unwrap();
        let websites: Vec<Website> = serde_json::from_str(
            r#"[{"id": "figma", "title": "Figma", "url": "https://figma.com",
                "description": "...", "category": "design-tools", "tags": ["design"],
                "dateAdded": "2023-01-15", "pricing": "free"}]"#,
        )
        .unwrap();

        let CategoryPage::Found { layout, .. } =
            resolve_category_page(&categories, "design-tools", websites)
        else {
            panic!("expected found page");
        };
        let cards: Vec<WebsiteCard> = layout.websites().into_iter().map(WebsiteCard::new).collect();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Figma");
        assert_eq!(cards[0].badge.map(|b| b.label), Some("Free"));
        assert!(!cards[0].featured);
        assert_eq!(cards[0].added, "Jan 15, 2023");
    }
}
