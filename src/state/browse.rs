// Browse and Featured tab state management.
// Handles loading state, list selection, and the category page's sidebar anchor.

use ratatui::widgets::ListState;

use crate::remote::{CategorySummary, Website};

use super::loader::{CategoryView, LoadRequest, LoadResult, SubcategoryView};
use super::navigation::{NavigationStack, ViewLevel};
use super::page::{CategoryPage, Layout, SubcategoryPage};

/// Loading state for async data.
#[derive(Debug, Clone)]
pub enum LoadingState<T> {
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// State for a selectable list with keyboard navigation.
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    pub data: LoadingState<Vec<T>>,
    pub list_state: ListState,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self {
            data: LoadingState::Idle,
            list_state: ListState::default(),
        }
    }
}

impl<T> SelectableList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.data.data().map(Vec::len).unwrap_or(0)
    }

    /// Select the next item in the list.
    pub fn select_next(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous item in the list.
    pub fn select_prev(&mut self) {
        if self.len() == 0 {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(0);
        self.list_state.select(Some(i));
    }

    /// Get the selected item.
    pub fn selected_item(&self) -> Option<&T> {
        let index = self.list_state.selected()?;
        self.data.data()?.get(index)
    }

    /// Set loaded data and select the first item.
    pub fn set_loaded(&mut self, items: Vec<T>) {
        let selected = if items.is_empty() { None } else { Some(0) };
        self.data = LoadingState::Loaded(items);
        self.list_state.select(selected);
    }

    pub fn set_loading(&mut self) {
        self.data = LoadingState::Loading;
    }

    pub fn set_error(&mut self, error: String) {
        self.data = LoadingState::Error(error);
    }
}

/// Which pane of the category page has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryPane {
    #[default]
    Websites,
    Sidebar,
}

/// A loaded category page with its selection and anchor.
#[derive(Debug, Clone)]
pub struct CategoryViewState {
    pub view: CategoryView,
    /// Index of the selected website in display order.
    pub selected: usize,
    /// Section the page is scrolled to, like a URL fragment.
    pub anchor: Option<String>,
    pub sidebar_state: ListState,
    pub focus: CategoryPane,
}

impl CategoryViewState {
    pub fn new(view: CategoryView) -> Self {
        let mut sidebar_state = ListState::default();
        if !view.sidebar.is_empty() {
            sidebar_state.select(Some(0));
        }
        Self {
            view,
            selected: 0,
            anchor: None,
            sidebar_state,
            focus: CategoryPane::default(),
        }
    }

    fn layout(&self) -> Option<&Layout> {
        match &self.view.page {
            CategoryPage::Found { layout, .. } => Some(layout),
            CategoryPage::NotFound => None,
        }
    }

    /// Websites in display order.
    pub fn websites(&self) -> Vec<&Website> {
        self.layout().map(Layout::websites).unwrap_or_default()
    }

    pub fn selected_website(&self) -> Option<&Website> {
        self.websites().get(self.selected).copied()
    }

    /// Display index of the first website in the section with `anchor`.
    pub fn section_start(&self, anchor: &str) -> Option<usize> {
        let Some(Layout::Grouped(sections)) = self.layout() else {
            return None;
        };
        let mut offset = 0;
        for section in sections {
            if section.bucket.id() == anchor {
                return Some(offset);
            }
            offset += section.websites.len();
        }
        None
    }

    /// Set the anchor; the sidebar highlight and website selection follow
    /// it. Returns false when no rendered section carries that anchor.
    pub fn jump_to(&mut self, anchor: &str) -> bool {
        self.anchor = Some(anchor.to_string());
        if let Some(row) = self.view.sidebar.iter().position(|e| e.anchor == anchor) {
            self.sidebar_state.select(Some(row));
        }
        match self.section_start(anchor) {
            Some(start) => {
                self.selected = start;
                true
            }
            None => false,
        }
    }

    /// Anchor of the highlighted sidebar row.
    pub fn sidebar_anchor(&self) -> Option<&str> {
        let row = self.sidebar_state.selected()?;
        self.view.sidebar.get(row).map(|e| e.anchor.as_str())
    }

    pub fn toggle_focus(&mut self) {
        if self.view.sidebar.is_empty() {
            self.focus = CategoryPane::Websites;
            return;
        }
        self.focus = match self.focus {
            CategoryPane::Websites => CategoryPane::Sidebar,
            CategoryPane::Sidebar => CategoryPane::Websites,
        };
    }

    pub fn select_next(&mut self) {
        match self.focus {
            CategoryPane::Websites => {
                let len = self.websites().len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            CategoryPane::Sidebar => {
                let len = self.view.sidebar.len();
                if let Some(i) = self.sidebar_state.selected() {
                    self.sidebar_state.select(Some((i + 1).min(len.saturating_sub(1))));
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            CategoryPane::Websites => self.selected = self.selected.saturating_sub(1),
            CategoryPane::Sidebar => {
                if let Some(i) = self.sidebar_state.selected() {
                    self.sidebar_state.select(Some(i.saturating_sub(1)));
                }
            }
        }
    }
}

/// A loaded subcategory page.
#[derive(Debug, Clone)]
pub struct SubcategoryViewState {
    pub view: SubcategoryView,
    pub list_state: ListState,
}

impl SubcategoryViewState {
    pub fn new(view: SubcategoryView) -> Self {
        let mut list_state = ListState::default();
        if !page_websites(&view.page).is_empty() {
            list_state.select(Some(0));
        }
        Self { view, list_state }
    }

    pub fn websites(&self) -> &[Website] {
        page_websites(&self.view.page)
    }

    pub fn selected_website(&self) -> Option<&Website> {
        self.websites().get(self.list_state.selected()?)
    }

    pub fn select_next(&mut self) {
        let len = self.websites().len();
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some((i + 1).min(len.saturating_sub(1))));
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(1)));
        }
    }
}

fn page_websites(page: &SubcategoryPage) -> &[Website] {
    match page {
        SubcategoryPage::Found { websites, .. } => websites,
        SubcategoryPage::NotFound => &[],
    }
}

/// Complete state for the browse tab.
#[derive(Debug)]
pub struct BrowseTabState {
    /// Navigation stack for breadcrumb trail.
    pub nav: NavigationStack,
    /// Category grid with site counts.
    pub home: SelectableList<CategorySummary>,
    pub category: LoadingState<CategoryViewState>,
    pub subcategory: LoadingState<SubcategoryViewState>,
    /// Detail view; `Loaded(None)` is the not-found state.
    pub detail: LoadingState<Option<Website>>,
}

impl Default for BrowseTabState {
    fn default() -> Self {
        Self {
            nav: NavigationStack::default(),
            home: SelectableList::new(),
            category: LoadingState::Idle,
            subcategory: LoadingState::Idle,
            detail: LoadingState::Idle,
        }
    }
}

impl BrowseTabState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request needed to show the current view.
    pub fn request_for_current(&self) -> LoadRequest {
        request_for(self.nav.current())
    }

    /// Mark the current view as loading.
    pub fn mark_loading(&mut self) {
        match self.nav.current() {
            ViewLevel::Home | ViewLevel::Featured => self.home.set_loading(),
            ViewLevel::Category { .. } => self.category = LoadingState::Loading,
            ViewLevel::Subcategory { .. } => self.subcategory = LoadingState::Loading,
            ViewLevel::Website { .. } => self.detail = LoadingState::Loading,
        }
    }

    /// Drill down into a view and return what must be loaded for it.
    pub fn open(&mut self, level: ViewLevel) -> LoadRequest {
        self.nav.push(level);
        self.mark_loading();
        self.request_for_current()
    }

    /// Drill down from the current selection, if it leads anywhere.
    pub fn open_selected(&mut self) -> Option<LoadRequest> {
        let level = match self.nav.current() {
            ViewLevel::Home | ViewLevel::Featured => {
                let summary = self.home.selected_item()?;
                ViewLevel::Category {
                    id: summary.category.id.clone(),
                    name: summary.category.name.clone(),
                }
            }
            ViewLevel::Category { .. } => {
                let state = self.category.data_mut()?;
                match state.focus {
                    CategoryPane::Websites => website_level(state.selected_website()?),
                    CategoryPane::Sidebar => {
                        let anchor = state.sidebar_anchor()?.to_string();
                        state.jump_to(&anchor);
                        return None;
                    }
                }
            }
            ViewLevel::Subcategory { .. } => {
                website_level(self.subcategory.data()?.selected_website()?)
            }
            ViewLevel::Website { .. } => return None,
        };
        Some(self.open(level))
    }

    /// Open the subcategory page for the highlighted sidebar row.
    pub fn open_sidebar_page(&mut self) -> Option<LoadRequest> {
        let ViewLevel::Category { id, .. } = self.nav.current() else {
            return None;
        };
        let category_id = id.clone();
        let state = self.category.data()?;
        let entry = state
            .view
            .sidebar
            .get(state.sidebar_state.selected()?)?
            .clone();
        // The uncategorized bucket has no page of its own.
        if !entry.has_page {
            return None;
        }
        Some(self.open(ViewLevel::Subcategory {
            category_id,
            id: entry.anchor,
            name: entry.name,
        }))
    }

    /// Navigate back, clearing the view we leave so it reloads next time.
    pub fn go_back(&mut self) -> bool {
        let current = self.nav.current().clone();
        let popped = self.nav.pop();
        if popped {
            match current {
                ViewLevel::Category { .. } => self.category = LoadingState::Idle,
                ViewLevel::Subcategory { .. } => self.subcategory = LoadingState::Idle,
                ViewLevel::Website { .. } => self.detail = LoadingState::Idle,
                ViewLevel::Home | ViewLevel::Featured => {}
            }
        }
        popped
    }

    pub fn select_next(&mut self) {
        match self.nav.current() {
            ViewLevel::Home | ViewLevel::Featured => self.home.select_next(),
            ViewLevel::Category { .. } => {
                if let Some(state) = self.category.data_mut() {
                    state.select_next();
                }
            }
            ViewLevel::Subcategory { .. } => {
                if let Some(state) = self.subcategory.data_mut() {
                    state.select_next();
                }
            }
            ViewLevel::Website { .. } => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.nav.current() {
            ViewLevel::Home | ViewLevel::Featured => self.home.select_prev(),
            ViewLevel::Category { .. } => {
                if let Some(state) = self.category.data_mut() {
                    state.select_prev();
                }
            }
            ViewLevel::Subcategory { .. } => {
                if let Some(state) = self.subcategory.data_mut() {
                    state.select_prev();
                }
            }
            ViewLevel::Website { .. } => {}
        }
    }

    /// Store a load result if it still matches the view on screen.
    pub fn apply(&mut self, result: LoadResult) {
        match (self.nav.current(), result) {
            (ViewLevel::Home, LoadResult::Home(summaries)) => match summaries {
                Ok(items) => self.home.set_loaded(items),
                Err(e) => self.home.set_error(e),
            },
            (ViewLevel::Category { id, .. }, LoadResult::Category { id: loaded, view })
                if *id == loaded =>
            {
                self.category = match view {
                    Ok(view) => LoadingState::Loaded(CategoryViewState::new(view)),
                    Err(e) => LoadingState::Error(e),
                };
            }
            (
                ViewLevel::Subcategory {
                    category_id, id, ..
                },
                LoadResult::Subcategory {
                    category_id: loaded_category,
                    id: loaded,
                    view,
                },
            ) if *category_id == loaded_category && *id == loaded => {
                self.subcategory = match view {
                    Ok(view) => LoadingState::Loaded(SubcategoryViewState::new(view)),
                    Err(e) => LoadingState::Error(e),
                };
            }
            (ViewLevel::Website { id, .. }, LoadResult::Website { id: loaded, website })
                if *id == loaded =>
            {
                self.detail = LoadingState::Loaded(website);
            }
            _ => {}
        }
    }
}

/// Complete state for the featured tab.
#[derive(Debug)]
pub struct FeaturedTabState {
    pub nav: NavigationStack,
    pub featured: SelectableList<Website>,
    pub detail: LoadingState<Option<Website>>,
}

impl Default for FeaturedTabState {
    fn default() -> Self {
        Self {
            nav: NavigationStack::new(ViewLevel::Featured),
            featured: SelectableList::new(),
            detail: LoadingState::Idle,
        }
    }
}

impl FeaturedTabState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_for_current(&self) -> LoadRequest {
        request_for(self.nav.current())
    }

    pub fn mark_loading(&mut self) {
        match self.nav.current() {
            ViewLevel::Website { .. } => self.detail = LoadingState::Loading,
            _ => self.featured.set_loading(),
        }
    }

    pub fn open_selected(&mut self) -> Option<LoadRequest> {
        if !matches!(self.nav.current(), ViewLevel::Featured) {
            return None;
        }
        let level = website_level(self.featured.selected_item()?);
        self.nav.push(level);
        self.mark_loading();
        Some(self.request_for_current())
    }

    pub fn go_back(&mut self) -> bool {
        let popped = self.nav.pop();
        if popped {
            self.detail = LoadingState::Idle;
        }
        popped
    }

    pub fn select_next(&mut self) {
        if matches!(self.nav.current(), ViewLevel::Featured) {
            self.featured.select_next();
        }
    }

    pub fn select_prev(&mut self) {
        if matches!(self.nav.current(), ViewLevel::Featured) {
            self.featured.select_prev();
        }
    }

    pub fn apply(&mut self, result: LoadResult) {
        match (self.nav.current(), result) {
            (ViewLevel::Featured, LoadResult::Featured(websites)) => {
                self.featured.set_loaded(websites);
            }
            (ViewLevel::Website { id, .. }, LoadResult::Website { id: loaded, website })
                if *id == loaded =>
            {
                self.detail = LoadingState::Loaded(website);
            }
            _ => {}
        }
    }
}

fn website_level(website: &Website) -> ViewLevel {
    ViewLevel::Website {
        id: website.id.clone(),
        title: website.title.clone(),
    }
}

fn request_for(level: &ViewLevel) -> LoadRequest {
    match level {
        ViewLevel::Home => LoadRequest::Home,
        ViewLevel::Featured => LoadRequest::Featured,
        ViewLevel::Category { id, .. } => LoadRequest::Category { id: id.clone() },
        ViewLevel::Subcategory {
            category_id, id, ..
        } => LoadRequest::Subcategory {
            category_id: category_id.clone(),
            id: id.clone(),
        },
        ViewLevel::Website { id, .. } => LoadRequest::Website { id: id.clone() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{Category, SubCategory};
    use crate::state::page::{resolve_category_page, sidebar_entries};
    use chrono::NaiveDate;

    fn website(id: &str, subcategory: Option<&str>) -> Website {
        Website {
            id: id.to_string(),
            title: id.to_uppercase(),
            url: format!("https://{}.example", id),
            description: String::new(),
            category: "ai-tools".to_string(),
            tags: vec![],
            date_added: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            featured: false,
            pricing: None,
            subcategory: subcategory.map(str::to_string),
        }
    }

    fn ai_tools() -> Category {
        let sub = |id: &str| SubCategory {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
        };
        Category {
            id: "ai-tools".to_string(),
            name: "AI Tools".to_string(),
            description: String::new(),
            subcategories: Some(vec![sub("image-generation"), sub("video-generation")]),
        }
    }

    fn category_view() -> CategoryView {
        let category = ai_tools();
        let websites = vec![
            website("a", Some("image-generation")),
            website("b", Some("image-generation")),
            website("c", None),
        ];
        CategoryView {
            sidebar: sidebar_entries(&category, &websites),
            page: resolve_category_page(&[category], "ai-tools", websites),
            notice: None,
        }
    }

    #[test]
    fn test_jump_to_anchor_moves_selection() {
        let mut state = CategoryViewState::new(category_view());

        assert!(state.jump_to("uncategorized"));
        assert_eq!(state.selected, 2);
        assert_eq!(state.selected_website().map(|w| w.id.as_str()), Some("c"));
        assert_eq!(state.sidebar_anchor(), Some("uncategorized"));

        // Declared but empty: highlighted, nothing to scroll to.
        assert!(!state.jump_to("video-generation"));
        assert_eq!(state.anchor.as_deref(), Some("video-generation"));
        assert_eq!(state.sidebar_anchor(), Some("video-generation"));
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_selectable_list_bounds() {
        let mut list = SelectableList::new();
        list.select_next();
        assert!(list.selected_item().is_none());

        list.set_loaded(vec![1, 2]);
        list.select_prev();
        assert_eq!(list.selected_item(), Some(&1));
        list.select_next();
        list.select_next();
        assert_eq!(list.selected_item(), Some(&2));
    }

    #[test]
    fn test_browse_drill_down_and_back() {
        let mut browse = BrowseTabState::new();
        browse.apply(LoadResult::Home(Ok(vec![CategorySummary {
            category: ai_tools(),
            count: 3,
        }])));

        let request = browse.open_selected().unwrap();
        assert_eq!(
            request,
            LoadRequest::Category {
                id: "ai-tools".to_string()
            }
        );
        assert!(matches!(browse.category, LoadingState::Loading));

        // A result for another category is ignored.
        browse.apply(LoadResult::Category {
            id: "design-tools".to_string(),
            view: Ok(category_view()),
        });
        assert!(matches!(browse.category, LoadingState::Loading));

        browse.apply(LoadResult::Category {
            id: "ai-tools".to_string(),
            view: Ok(category_view()),
        });
        let request = browse.open_selected().unwrap();
        assert_eq!(
            request,
            LoadRequest::Website {
                id: "a".to_string()
            }
        );

        browse.apply(LoadResult::Website {
            id: "a".to_string(),
            website: None,
        });
        assert!(matches!(browse.detail, LoadingState::Loaded(None)));

        assert!(browse.go_back());
        assert!(matches!(browse.detail, LoadingState::Idle));
        assert!(browse.go_back());
        assert!(!browse.go_back());
    }

    #[test]
    fn test_sidebar_enter_jumps_and_page_opens() {
        let mut browse = BrowseTabState::new();
        browse.open(ViewLevel::Category {
            id: "ai-tools".to_string(),
            name: "AI Tools".to_string(),
        });
        browse.apply(LoadResult::Category {
            id: "ai-tools".to_string(),
            view: Ok(category_view()),
        });

        if let Some(state) = browse.category.data_mut() {
            state.toggle_focus();
            state.select_next();
            state.select_next();
        }
        assert!(browse.open_selected().is_none());
        assert_eq!(
            browse.category.data().and_then(|s| s.anchor.as_deref()),
            Some("uncategorized")
        );
        // No page for the uncategorized bucket.
        assert!(browse.open_sidebar_page().is_none());

        if let Some(state) = browse.category.data_mut() {
            state.select_prev();
            state.select_prev();
        }
        assert_eq!(
            browse.open_sidebar_page(),
            Some(LoadRequest::Subcategory {
                category_id: "ai-tools".to_string(),
                id: "image-generation".to_string(),
            })
        );
    }
}
