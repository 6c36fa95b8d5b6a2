// UI module for rendering the TUI.
// Contains widgets for tabs, breadcrumbs, catalog pages, and the subcategory editor.

mod breadcrumb;
mod editor;
mod list;
mod modal;
mod page;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::state::{CategoryPane, ViewLevel};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Length(2), // Breadcrumb
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    // Tab bar
    tabs::draw_tabs(frame, app, chunks[0]);

    // Breadcrumb
    match app.active_tab {
        Tab::Browse => breadcrumb::draw_breadcrumb(frame, &app.browse.nav.breadcrumbs(), chunks[1]),
        Tab::Featured => {
            breadcrumb::draw_breadcrumb(frame, &app.featured.nav.breadcrumbs(), chunks[1])
        }
        Tab::Editor => {
            let block = Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Subcategory Editor ");
            frame.render_widget(block, chunks[1]);
        }
    }

    // Main content area
    draw_content(frame, app, chunks[2]);

    // Status bar
    draw_status_bar(frame, app, chunks[3]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the main content area based on active tab.
fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.active_tab {
        Tab::Browse => draw_browse_tab(frame, app, area),
        Tab::Featured => draw_featured_tab(frame, app, area),
        Tab::Editor => editor::draw_editor_tab(frame, &mut app.editor, area),
    }
}

/// Draw the Browse tab with navigation hierarchy.
fn draw_browse_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    let browse = &mut app.browse;
    match browse.nav.current() {
        ViewLevel::Home | ViewLevel::Featured => {
            list::render_categories_list(frame, &mut browse.home, area);
        }
        ViewLevel::Category { .. } => page::render_category(frame, &mut browse.category, area),
        ViewLevel::Subcategory { .. } => {
            page::render_subcategory(frame, &mut browse.subcategory, area)
        }
        ViewLevel::Website { .. } => page::render_detail(frame, &browse.detail, area),
    }
}

/// Draw the Featured tab.
fn draw_featured_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    let featured = &mut app.featured;
    match featured.nav.current() {
        ViewLevel::Website { .. } => page::render_detail(frame, &featured.detail, area),
        _ => list::render_featured_list(frame, &mut featured.featured, area),
    }
}

fn hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::raw(key),
        Span::styled(action, Style::default().fg(Color::DarkGray)),
    ]
}

/// Draw the status bar with keybinding hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints: Vec<[Span; 2]> = Vec::new();

    match app.active_tab {
        Tab::Editor => {
            if app.editor.form.is_some() {
                hints.push(hint(" Tab ", "Next field"));
                hints.push(hint("  ↵ ", "Save"));
                hints.push(hint("  Esc ", "Cancel"));
            } else {
                hints.push(hint(" ↑↓ ", "Navigate"));
                hints.push(hint("  ←→ ", "Pane"));
                hints.push(hint("  a ", "Add"));
                hints.push(hint("  ↵ ", "Edit"));
                hints.push(hint("  d ", "Delete"));
                hints.push(hint("  p ", "Preview"));
                hints.push(hint("  x ", "Export"));
            }
        }
        Tab::Browse => {
            hints.push(hint(" ↑↓ ", "Navigate"));
            hints.push(hint("  ↵ ", "Select"));
            if let ViewLevel::Category { .. } = app.browse.nav.current() {
                hints.push(hint("  ←→ ", "Sidebar"));
                let sidebar_focused = app
                    .browse
                    .category
                    .data()
                    .is_some_and(|s| s.focus == CategoryPane::Sidebar);
                if sidebar_focused {
                    hints.push(hint("  o ", "Open page"));
                }
            }
            if app.browse.nav.can_go_back() {
                hints.push(hint("  Esc ", "Back"));
            }
            hints.push(hint("  r ", "Refresh"));
        }
        Tab::Featured => {
            hints.push(hint(" ↑↓ ", "Navigate"));
            hints.push(hint("  ↵ ", "Select"));
            if app.featured.nav.can_go_back() {
                hints.push(hint("  Esc ", "Back"));
            }
            hints.push(hint("  r ", "Refresh"));
        }
    }

    if app.active_tab != Tab::Editor || app.editor.form.is_none() {
        hints.push(hint("  Tab ", "Switch"));
        hints.push(hint("  ? ", "Help"));
        hints.push(hint("  q ", "Quit"));
    }

    let spans: Vec<Span> = hints.into_iter().flatten().collect();
    let status = Paragraph::new(Line::from(spans));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = area.width.min(56);
    let popup_height = area.height.min(26);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", keys), Style::default().fg(Color::Cyan)),
            Span::raw(action),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("↑/↓ or j/k", "Navigate list"),
        key("Enter", "Select / drill down / jump to section"),
        key("Esc", "Go back / close help"),
        key("Tab", "Switch tabs"),
        key("←/→ or h/l", "Switch pane (sidebar, editor)"),
        key("o", "Open highlighted subcategory page"),
        key("r", "Refresh current view"),
        Line::from(""),
        Line::from(Span::styled(
            "Editor",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key("a", "Add subcategory"),
        key("Enter", "Edit selected subcategory"),
        key("d", "Delete selected subcategory"),
        key("p", "Toggle JSON preview"),
        key("x", "Export categories.json"),
        Line::from(""),
        key("?", "Show/hide this help"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
