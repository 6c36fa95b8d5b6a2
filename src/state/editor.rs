// Subcategory editor state.
// Local working copy of the category tree with validation and JSON export.

use std::path::{Path, PathBuf};

use ratatui::widgets::ListState;
use thiserror::Error;
use tracing::info;

use crate::cache::write_atomic;
use crate::error::Result;
use crate::remote::{Category, SubCategory};

/// Filename the editor exports to.
pub const EXPORT_FILE: &str = "categories.json";

/// Editable subcategory fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubcategoryField {
    Id,
    Name,
    Description,
}

impl SubcategoryField {
    pub fn label(&self) -> &'static str {
        match self {
            SubcategoryField::Id => "ID",
            SubcategoryField::Name => "Name",
            SubcategoryField::Description => "Description",
        }
    }

    /// Field order in the add form: name first so the id can be derived.
    pub fn next(&self) -> Self {
        match self {
            SubcategoryField::Name => SubcategoryField::Id,
            SubcategoryField::Id => SubcategoryField::Description,
            SubcategoryField::Description => SubcategoryField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            SubcategoryField::Name => SubcategoryField::Description,
            SubcategoryField::Id => SubcategoryField::Name,
            SubcategoryField::Description => SubcategoryField::Id,
        }
    }

    pub fn get<'a>(&self, sub: &'a SubCategory) -> &'a str {
        match self {
            SubcategoryField::Id => &sub.id,
            SubcategoryField::Name => &sub.name,
            SubcategoryField::Description => &sub.description,
        }
    }

    pub fn get_mut<'a>(&self, sub: &'a mut SubCategory) -> &'a mut String {
        match self {
            SubcategoryField::Id => &mut sub.id,
            SubcategoryField::Name => &mut sub.name,
            SubcategoryField::Description => &mut sub.description,
        }
    }
}

/// Rejected editor operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Please fill in all fields ({} is empty)", .0.label())]
    MissingField(SubcategoryField),

    #[error("No category is selected")]
    NoActiveCategory,

    #[error("No subcategory at position {0}")]
    NoSuchSubcategory(usize),
}

/// Derive a slug-style id from a display name: lowercase, whitespace runs
/// become a single hyphen.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Categories the editor starts with.
pub fn seed_categories() -> Vec<Category> {
    fn sub(id: &str, name: &str, description: &str) -> SubCategory {
        SubCategory {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    vec![
        Category {
            id: "ai-tools".to_string(),
            name: "AI Tools".to_string(),
            description: "Artificial intelligence tools and platforms for various applications"
                .to_string(),
            subcategories: Some(vec![
                sub(
                    "image-generation",
                    "Image Generation",
                    "AI tools for creating and editing images",
                ),
                sub(
                    "video-generation",
                    "Video Generation",
                    "AI tools for creating and editing videos",
                ),
                sub(
                    "voice-generation",
                    "Voice Generation",
                    "AI tools for creating and modifying voice and audio",
                ),
            ]),
        },
        Category {
            id: "design-tools".to_string(),
            name: "Design Tools".to_string(),
            description: "Tools for graphic design, UI/UX, and visual creation".to_string(),
            subcategories: Some(vec![
                sub("ui-design", "UI Design", "Tools for creating user interfaces"),
                sub(
                    "graphic-design",
                    "Graphic Design",
                    "Tools for creating graphics and illustrations",
                ),
            ]),
        },
    ]
}

/// In-memory working copy of the category tree.
#[derive(Debug, Clone)]
pub struct SubcategoryEditor {
    categories: Vec<Category>,
    active: String,
    /// Subcategory being composed in the add form.
    pub draft: SubCategory,
}

impl Default for SubcategoryEditor {
    fn default() -> Self {
        Self::new(seed_categories())
    }
}

impl SubcategoryEditor {
    /// Create an editor over the given tree; the first category is active.
    pub fn new(categories: Vec<Category>) -> Self {
        let active = categories
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_default();
        Self {
            categories,
            active,
            draft: SubCategory::default(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn active_id(&self) -> &str {
        &self.active
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == self.active)
    }

    fn active_category_mut(&mut self) -> Option<&mut Category> {
        let active = &self.active;
        self.categories.iter_mut().find(|c| &c.id == active)
    }

    /// Make a category active. Unknown ids are ignored.
    pub fn select_category(&mut self, category_id: &str) -> bool {
        if self.categories.iter().any(|c| c.id == category_id) {
            self.active = category_id.to_string();
            true
        } else {
            false
        }
    }

    /// Append the draft to the active category's subcategories.
    /// Blank fields reject the operation and leave the tree untouched.
    pub fn add_subcategory(&mut self) -> std::result::Result<(), EditorError> {
        for field in [
            SubcategoryField::Id,
            SubcategoryField::Name,
            SubcategoryField::Description,
        ] {
            if field.get(&self.draft).trim().is_empty() {
                return Err(EditorError::MissingField(field));
            }
        }

        let draft = self.draft.clone();
        let category = self
            .active_category_mut()
            .ok_or(EditorError::NoActiveCategory)?;
        category.subcategories.get_or_insert_with(Vec::new).push(draft);
        self.draft = SubCategory::default();
        Ok(())
    }

    /// Remove every subcategory of the active category with the given id.
    pub fn remove_subcategory(&mut self, subcategory_id: &str) -> bool {
        let Some(subs) = self
            .active_category_mut()
            .and_then(|c| c.subcategories.as_mut())
        else {
            return false;
        };
        let before = subs.len();
        subs.retain(|sub| sub.id != subcategory_id);
        subs.len() != before
    }

    /// Overwrite one field of the active category's subcategory at `index`.
    pub fn update_subcategory(
        &mut self,
        index: usize,
        field: SubcategoryField,
        value: &str,
    ) -> std::result::Result<(), EditorError> {
        let category = self
            .active_category_mut()
            .ok_or(EditorError::NoActiveCategory)?;
        let sub = category
            .subcategories
            .as_mut()
            .and_then(|subs| subs.get_mut(index))
            .ok_or(EditorError::NoSuchSubcategory(index))?;
        *field.get_mut(sub) = value.to_string();
        Ok(())
    }

    /// Called when focus leaves the draft's name field: derive the id from
    /// the name if the id is still blank.
    pub fn fill_id_from_name(&mut self) {
        if self.draft.id.trim().is_empty() && !self.draft.name.trim().is_empty() {
            self.draft.id = slugify(&self.draft.name);
        }
    }

    /// Pretty-printed JSON of the whole working tree.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.categories)?)
    }

    /// Write the working tree to `categories.json` inside `dir`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(EXPORT_FILE);
        write_atomic(&path, self.to_json()?.as_bytes())?;
        info!(path = %path.display(), categories = self.categories.len(), "exported categories");
        Ok(path)
    }
}

/// Which list has keyboard focus in the editor tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPane {
    #[default]
    Categories,
    Subcategories,
}

/// Modal form currently open in the editor tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorForm {
    /// Composing the draft; `error` holds the last validation failure.
    Add {
        focused: SubcategoryField,
        error: Option<String>,
    },
    /// Editing the subcategory at `index` in place.
    Edit {
        index: usize,
        focused: SubcategoryField,
    },
}

/// Transient message in the editor tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Complete state for the editor tab.
#[derive(Debug)]
pub struct EditorTabState {
    pub editor: SubcategoryEditor,
    pub focus: EditorPane,
    pub categories_state: ListState,
    pub subcategories_state: ListState,
    pub form: Option<EditorForm>,
    pub status: Option<StatusMessage>,
    pub show_preview: bool,
    pub export_dir: PathBuf,
}

impl EditorTabState {
    pub fn new(editor: SubcategoryEditor, export_dir: PathBuf) -> Self {
        let mut categories_state = ListState::default();
        if !editor.categories().is_empty() {
            categories_state.select(Some(0));
        }
        let mut state = Self {
            editor,
            focus: EditorPane::default(),
            categories_state,
            subcategories_state: ListState::default(),
            form: None,
            status: None,
            show_preview: false,
            export_dir,
        };
        state.reset_subcategory_selection();
        state
    }

    fn subcategory_count(&self) -> usize {
        self.editor
            .active_category()
            .map(|c| c.subcategories().len())
            .unwrap_or(0)
    }

    fn reset_subcategory_selection(&mut self) {
        let selected = if self.subcategory_count() > 0 {
            Some(0)
        } else {
            None
        };
        self.subcategories_state.select(selected);
    }

    fn clamp_subcategory_selection(&mut self) {
        let count = self.subcategory_count();
        match self.subcategories_state.selected() {
            _ if count == 0 => self.subcategories_state.select(None),
            Some(i) if i >= count => self.subcategories_state.select(Some(count - 1)),
            None => self.subcategories_state.select(Some(0)),
            _ => {}
        }
    }

    /// Handle up arrow key.
    pub fn select_prev(&mut self) {
        match self.focus {
            EditorPane::Categories => {
                let i = self.categories_state.selected().unwrap_or(0).saturating_sub(1);
                self.activate_category_at(i);
            }
            EditorPane::Subcategories => {
                if let Some(i) = self.subcategories_state.selected() {
                    self.subcategories_state.select(Some(i.saturating_sub(1)));
                }
            }
        }
    }

    /// Handle down arrow key.
    pub fn select_next(&mut self) {
        match self.focus {
            EditorPane::Categories => {
                let last = self.editor.categories().len().saturating_sub(1);
                let i = self
                    .categories_state
                    .selected()
                    .map(|i| (i + 1).min(last))
                    .unwrap_or(0);
                self.activate_category_at(i);
            }
            EditorPane::Subcategories => {
                let count = self.subcategory_count();
                if let Some(i) = self.subcategories_state.selected() {
                    if i + 1 < count {
                        self.subcategories_state.select(Some(i + 1));
                    }
                }
            }
        }
    }

    fn activate_category_at(&mut self, index: usize) {
        let Some(id) = self.editor.categories().get(index).map(|c| c.id.clone()) else {
            return;
        };
        self.editor.select_category(&id);
        self.categories_state.select(Some(index));
        self.reset_subcategory_selection();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            EditorPane::Categories => EditorPane::Subcategories,
            EditorPane::Subcategories => EditorPane::Categories,
        };
    }

    /// Open the add form with a fresh draft.
    pub fn open_add_form(&mut self) {
        self.editor.draft = SubCategory::default();
        self.form = Some(EditorForm::Add {
            focused: SubcategoryField::Name,
            error: None,
        });
    }

    /// Open the in-place edit form for the selected subcategory.
    pub fn open_edit_form(&mut self) {
        if let Some(index) = self.subcategories_state.selected() {
            if index < self.subcategory_count() {
                self.form = Some(EditorForm::Edit {
                    index,
                    focused: SubcategoryField::Name,
                });
            }
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Move to the next form field. Leaving the name field of the add form
    /// derives the id when it is blank.
    pub fn focus_next_field(&mut self, backwards: bool) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let focused = match form {
            EditorForm::Add { focused, .. } | EditorForm::Edit { focused, .. } => focused,
        };
        let leaving = *focused;
        *focused = if backwards {
            leaving.prev()
        } else {
            leaving.next()
        };
        if matches!(form, EditorForm::Add { .. }) && leaving == SubcategoryField::Name {
            self.editor.fill_id_from_name();
        }
    }

    /// Apply a text edit to the focused field of the open form.
    pub fn edit_field(&mut self, edit: impl FnOnce(&mut String)) {
        match self.form.clone() {
            Some(EditorForm::Add { focused, .. }) => {
                edit(focused.get_mut(&mut self.editor.draft));
            }
            Some(EditorForm::Edit { index, focused }) => {
                let current = self
                    .editor
                    .active_category()
                    .and_then(|c| c.subcategories().get(index))
                    .map(|sub| focused.get(sub).to_string());
                if let Some(mut value) = current {
                    edit(&mut value);
                    if let Err(e) = self.editor.update_subcategory(index, focused, &value) {
                        self.set_status(e.to_string(), true);
                    }
                }
            }
            None => {}
        }
    }

    /// Submit the open form.
    pub fn submit_form(&mut self) {
        match self.form.clone() {
            Some(EditorForm::Add { focused, .. }) => {
                if focused == SubcategoryField::Name {
                    self.editor.fill_id_from_name();
                }
                let name = self.editor.draft.name.clone();
                match self.editor.add_subcategory() {
                    Ok(()) => {
                        self.form = None;
                        self.focus = EditorPane::Subcategories;
                        let last = self.subcategory_count().saturating_sub(1);
                        self.subcategories_state.select(Some(last));
                        self.set_status(format!("Added subcategory {}", name), false);
                    }
                    Err(e) => {
                        self.form = Some(EditorForm::Add {
                            focused,
                            error: Some(e.to_string()),
                        });
                    }
                }
            }
            Some(EditorForm::Edit { .. }) => self.form = None,
            None => {}
        }
    }

    /// Remove the selected subcategory.
    pub fn remove_selected(&mut self) {
        let Some(id) = self.subcategories_state.selected().and_then(|i| {
            self.editor
                .active_category()
                .and_then(|c| c.subcategories().get(i))
                .map(|sub| sub.id.clone())
        }) else {
            return;
        };
        if self.editor.remove_subcategory(&id) {
            self.set_status(format!("Removed subcategory {}", id), false);
        }
        self.clamp_subcategory_selection();
    }

    /// Export the tree into the configured directory.
    pub fn export(&mut self) {
        match self.editor.export(&self.export_dir) {
            Ok(path) => self.set_status(format!("Saved {}", path.display()), false),
            Err(e) => self.set_status(format!("Export failed: {}", e), true),
        }
    }

    pub fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusMessage { text, is_error });
    }
}
