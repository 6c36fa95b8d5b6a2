// State management module.
// Handles navigation, view loading, page resolution, and UI state for tabs.

pub mod browse;
pub mod editor;
pub mod loader;
pub mod navigation;
pub mod page;

pub use browse::{
    BrowseTabState, CategoryPane, CategoryViewState, FeaturedTabState, LoadingState,
    SelectableList, SubcategoryViewState,
};
pub use editor::{EditorForm, EditorPane, EditorTabState, SubcategoryEditor, SubcategoryField};
pub use loader::{LoadRequest, LoadResult, load};
pub use navigation::{BreadcrumbNode, ViewLevel};
