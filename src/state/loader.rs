// View loading.
// Each request runs in its own render cycle and yields a resolved view model.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalog, Fetched};
use crate::remote::{CatalogClient, CategorySummary, Website};

use super::page::{
    CategoryPage, SidebarEntry, SubcategoryPage, resolve_category_page, resolve_subcategory_page,
    sidebar_entries,
};

/// A view that needs remote data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    Home,
    Category { id: String },
    Subcategory { category_id: String, id: String },
    Website { id: String },
    Featured,
}

/// Resolved category view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub page: CategoryPage,
    pub sidebar: Vec<SidebarEntry>,
    /// Set when the website document could not be loaded, so an empty page
    /// is not mistaken for an empty category.
    pub notice: Option<String>,
}

/// Resolved subcategory view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryView {
    pub page: SubcategoryPage,
    pub notice: Option<String>,
}

/// Result of a load, tagged with what was requested.
/// `Err` carries a message when the category index itself is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    Home(Result<Vec<CategorySummary>, String>),
    Category {
        id: String,
        view: Result<CategoryView, String>,
    },
    Subcategory {
        category_id: String,
        id: String,
        view: Result<SubcategoryView, String>,
    },
    Website {
        id: String,
        website: Option<Website>,
    },
    Featured(Vec<Website>),
}

/// Explain why a document is not available.
fn unavailable<T>(what: &str, fetched: &Fetched<T>) -> Option<String> {
    match fetched {
        Fetched::Ready(_) => None,
        Fetched::Missing => Some(format!("{} is not published", what)),
        Fetched::Failed(reason) => Some(format!("Could not load {}: {}", what, reason)),
    }
}

/// Run one request in a fresh render cycle.
pub async fn load(client: Arc<CatalogClient>, request: LoadRequest) -> LoadResult {
    let catalog = Catalog::begin(client);
    let result = resolve(&catalog, request).await;
    debug!(
        requests = catalog.cycle().distinct_requests(),
        "render cycle finished"
    );
    result
}

async fn resolve(catalog: &Catalog, request: LoadRequest) -> LoadResult {
    match request {
        LoadRequest::Home => {
            let summaries = catalog.fetch_category_summaries().await;
            match unavailable("the category index", &summaries) {
                Some(message) => LoadResult::Home(Err(message)),
                None => LoadResult::Home(Ok(summaries.or_empty())),
            }
        }
        LoadRequest::Category { id } => {
            let (categories, websites) = futures::join!(
                catalog.fetch_categories(),
                catalog.fetch_websites_by_category(&id)
            );
            let view = match unavailable("the category index", &categories) {
                Some(message) => Err(message),
                None => {
                    let notice = unavailable("this category's websites", &websites);
                    let websites = websites.or_empty();
                    // Same cycle: served from the memoized fetch above.
                    let sidebar = catalog
                        .category_by_id(&id)
                        .await
                        .map(|category| sidebar_entries(&category, &websites))
                        .unwrap_or_default();
                    let page = resolve_category_page(&categories.or_empty(), &id, websites);
                    Ok(CategoryView {
                        page,
                        sidebar,
                        notice,
                    })
                }
            };
            LoadResult::Category { id, view }
        }
        LoadRequest::Subcategory { category_id, id } => {
            let (categories, websites) = futures::join!(
                catalog.fetch_categories(),
                catalog.fetch_websites_by_category(&category_id)
            );
            let view = match unavailable("the category index", &categories) {
                Some(message) => Err(message),
                None => {
                    let notice = unavailable("this category's websites", &websites);
                    // Same cycle: served from the memoized fetch above.
                    let websites = catalog.websites_by_subcategory(&category_id, &id).await;
                    let page = resolve_subcategory_page(
                        &categories.or_empty(),
                        &category_id,
                        &id,
                        websites,
                    );
                    Ok(SubcategoryView { page, notice })
                }
            };
            LoadResult::Subcategory {
                category_id,
                id,
                view,
            }
        }
        LoadRequest::Website { id } => {
            let website = catalog.website_by_id(&id).await;
            LoadResult::Website { id, website }
        }
        LoadRequest::Featured => LoadResult::Featured(catalog.featured_websites().await),
    }
}
