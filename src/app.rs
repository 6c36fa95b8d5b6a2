// App state and main event loop.
// Manages tabs, background view loads, and keyboard input handling.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::remote::CatalogClient;
use crate::state::{
    BrowseTabState, EditorPane, EditorTabState, FeaturedTabState, LoadRequest, LoadResult,
    SubcategoryEditor, load,
};
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Browse,
    Featured,
    Editor,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Browse => "Browse",
            Tab::Featured => "Featured",
            Tab::Editor => "Editor",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Browse => Tab::Featured,
            Tab::Featured => Tab::Editor,
            Tab::Editor => Tab::Browse,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Browse => Tab::Editor,
            Tab::Featured => Tab::Browse,
            Tab::Editor => Tab::Featured,
        }
    }
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    pub browse: BrowseTabState,
    pub featured: FeaturedTabState,
    pub editor: EditorTabState,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    client: Arc<CatalogClient>,
    loads_tx: UnboundedSender<(Tab, LoadResult)>,
    loads_rx: UnboundedReceiver<(Tab, LoadResult)>,
}

impl App {
    pub fn new(client: Arc<CatalogClient>, export_dir: PathBuf) -> Self {
        let (loads_tx, loads_rx) = mpsc::unbounded_channel();
        Self {
            active_tab: Tab::default(),
            browse: BrowseTabState::new(),
            featured: FeaturedTabState::new(),
            editor: EditorTabState::new(SubcategoryEditor::default(), export_dir),
            show_help: false,
            should_quit: false,
            client,
            loads_tx,
            loads_rx,
        }
    }

    /// Base URL the catalog is read from.
    pub fn source(&self) -> &str {
        self.client.base_url()
    }

    /// Main event loop. Must run inside a tokio runtime.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.refresh(Tab::Browse);
        self.refresh(Tab::Featured);

        while !self.should_quit {
            self.drain_loads();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Spawn a view load; its result comes back through the channel.
    fn request(&self, tab: Tab, request: LoadRequest) {
        debug!(?tab, ?request, "loading view");
        let client = Arc::clone(&self.client);
        let tx = self.loads_tx.clone();
        tokio::spawn(async move {
            let result = load(client, request).await;
            // Closed channel means the app is exiting.
            let _ = tx.send((tab, result));
        });
    }

    /// Reload the current view of a tab.
    fn refresh(&mut self, tab: Tab) {
        match tab {
            Tab::Browse => {
                self.browse.mark_loading();
                self.request(tab, self.browse.request_for_current());
            }
            Tab::Featured => {
                self.featured.mark_loading();
                self.request(tab, self.featured.request_for_current());
            }
            Tab::Editor => {}
        }
    }

    /// Apply finished loads to their tabs.
    fn drain_loads(&mut self) {
        while let Ok((tab, result)) = self.loads_rx.try_recv() {
            match tab {
                Tab::Browse => self.browse.apply(result),
                Tab::Featured => self.featured.apply(result),
                Tab::Editor => {}
            }
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        // An open form captures all input, including q and Tab.
        if self.active_tab == Tab::Editor && self.editor.form.is_some() {
            self.handle_form_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab => self.active_tab = self.active_tab.prev(),
            _ => match self.active_tab {
                Tab::Browse => self.handle_browse_key(key),
                Tab::Featured => self.handle_featured_key(key),
                Tab::Editor => self.handle_editor_key(key),
            },
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.browse.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.browse.select_prev(),
            KeyCode::Enter => {
                if let Some(request) = self.browse.open_selected() {
                    self.request(Tab::Browse, request);
                }
            }
            KeyCode::Char('o') => {
                if let Some(request) = self.browse.open_sidebar_page() {
                    self.request(Tab::Browse, request);
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                if let Some(state) = self.browse.category.data_mut() {
                    state.toggle_focus();
                }
            }
            KeyCode::Esc | KeyCode::Backspace => {
                self.browse.go_back();
            }
            KeyCode::Char('r') => self.refresh(Tab::Browse),
            _ => {}
        }
    }

    fn handle_featured_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.featured.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.featured.select_prev(),
            KeyCode::Enter => {
                if let Some(request) = self.featured.open_selected() {
                    self.request(Tab::Featured, request);
                }
            }
            KeyCode::Esc | KeyCode::Backspace => {
                self.featured.go_back();
            }
            KeyCode::Char('r') => self.refresh(Tab::Featured),
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.editor.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.editor.select_prev(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.editor.toggle_focus()
            }
            KeyCode::Enter => match self.editor.focus {
                EditorPane::Categories => self.editor.toggle_focus(),
                EditorPane::Subcategories => self.editor.open_edit_form(),
            },
            KeyCode::Char('a') => self.editor.open_add_form(),
            KeyCode::Char('d') => self.editor.remove_selected(),
            KeyCode::Char('x') => self.editor.export(),
            KeyCode::Char('p') => self.editor.show_preview = !self.editor.show_preview,
            KeyCode::Esc => self.editor.status = None,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.editor.close_form(),
            KeyCode::Tab | KeyCode::Down => self.editor.focus_next_field(false),
            KeyCode::BackTab | KeyCode::Up => self.editor.focus_next_field(true),
            KeyCode::Enter => self.editor.submit_form(),
            KeyCode::Backspace => self.editor.edit_field(|value| {
                value.pop();
            }),
            KeyCode::Char(c) => self.editor.edit_field(|value| value.push(c)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EditorForm;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn app() -> App {
        let client = CatalogClient::new("http://127.0.0.1:9", Duration::from_secs(1), None).unwrap();
        App::new(Arc::new(client), PathBuf::from("."))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Browse.next(), Tab::Featured);
        assert_eq!(Tab::Editor.next(), Tab::Browse);
        assert_eq!(Tab::Browse.prev(), Tab::Editor);
    }

    #[test]
    fn test_form_captures_quit_and_tab() {
        let mut app = app();
        app.active_tab = Tab::Editor;
        press(&mut app, KeyCode::Char('a'));
        assert!(app.editor.form.is_some());

        type_text(&mut app, "Quiet Audio");
        press(&mut app, KeyCode::Tab);
        assert!(!app.should_quit);
        assert_eq!(app.active_tab, Tab::Editor);
        assert_eq!(app.editor.editor.draft.name, "Quiet Audio");
        assert_eq!(app.editor.editor.draft.id, "quiet-audio");

        // Missing description keeps the form open with an error.
        press(&mut app, KeyCode::Enter);
        assert!(matches!(
            app.editor.form,
            Some(EditorForm::Add { error: Some(_), .. })
        ));

        press(&mut app, KeyCode::Esc);
        assert!(app.editor.form.is_none());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
