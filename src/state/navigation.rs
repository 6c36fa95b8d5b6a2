// Navigation state management.
// Handles the navigation stack and breadcrumb trail for drill-down views.

/// A node in the navigation breadcrumb trail.
#[derive(Debug, Clone)]
pub struct BreadcrumbNode {
    /// Display label for the breadcrumb.
    pub label: String,
}

/// The current view level in the navigation hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLevel {
    /// Top level: grid of categories
    Home,
    /// Top level of the featured tab
    Featured,
    /// One category page
    Category { id: String, name: String },
    /// One subcategory page
    Subcategory {
        category_id: String,
        id: String,
        name: String,
    },
    /// Detail card for a website
    Website { id: String, title: String },
}

impl ViewLevel {
    /// Get the display title for this view level.
    pub fn title(&self) -> String {
        match self {
            ViewLevel::Home => "Categories".to_string(),
            ViewLevel::Featured => "Featured".to_string(),
            ViewLevel::Category { name, .. } => name.clone(),
            ViewLevel::Subcategory { name, .. } => name.clone(),
            ViewLevel::Website { title, .. } => title.clone(),
        }
    }

    /// Create a breadcrumb node for this view level.
    pub fn to_breadcrumb(&self) -> BreadcrumbNode {
        BreadcrumbNode {
            label: self.title(),
        }
    }
}

/// Navigation stack for a tab.
#[derive(Debug, Clone)]
pub struct NavigationStack {
    /// Stack of view levels (bottom = root, top = current)
    stack: Vec<ViewLevel>,
}

impl NavigationStack {
    /// Create a new navigation stack starting at the given level.
    pub fn new(root: ViewLevel) -> Self {
        Self { stack: vec![root] }
    }

    /// Get the current view level.
    pub fn current(&self) -> &ViewLevel {
        // The root is never popped.
        &self.stack[self.stack.len() - 1]
    }

    /// Push a new view level onto the stack (drill down).
    pub fn push(&mut self, level: ViewLevel) {
        self.stack.push(level);
    }

    /// Pop the current view level (go back). Returns false if at root.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Check if we can go back (not at root).
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Get the breadcrumb trail.
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbNode> {
        self.stack
            .iter()
            .map(|level| level.to_breadcrumb())
            .collect()
    }

    /// Get the depth of the navigation stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(ViewLevel::Home)
    }
}
