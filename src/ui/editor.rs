// Subcategory editor rendering.
// Category and subcategory lists, JSON preview, status line, and the add/edit form.

use ratatui::{prelude::*, widgets::*};

use crate::remote::SubCategory;
use crate::state::{EditorForm, EditorPane, EditorTabState, SubcategoryField};

use super::list::{highlight_style, render_empty};
use super::modal::{FormField, draw_form_modal};

const FIELD_ORDER: [SubcategoryField; 3] = [
    SubcategoryField::Name,
    SubcategoryField::Id,
    SubcategoryField::Description,
];

fn pane_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw the editor tab.
pub fn draw_editor_tab(frame: &mut Frame, state: &mut EditorTabState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let constraints = if state.show_preview {
        vec![
            Constraint::Length(28),
            Constraint::Percentage(40),
            Constraint::Min(1),
        ]
    } else {
        vec![Constraint::Length(28), Constraint::Min(1)]
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(rows[0]);

    draw_categories(frame, state, columns[0]);
    draw_subcategories(frame, state, columns[1]);
    if state.show_preview {
        draw_preview(frame, state, columns[2]);
    }
    draw_status(frame, state, rows[1]);

    if state.form.is_some() {
        draw_form(frame, state);
    }
}

fn draw_categories(frame: &mut Frame, state: &mut EditorTabState, area: Rect) {
    let items: Vec<ListItem> = state
        .editor
        .categories()
        .iter()
        .map(|category| {
            ListItem::new(Line::from(vec![
                Span::raw(category.name.clone()),
                Span::styled(
                    format!(" ({})", category.subcategories().len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(pane_border(state.focus == EditorPane::Categories))
                .title(" Categories "),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut state.categories_state);
}

fn draw_subcategories(frame: &mut Frame, state: &mut EditorTabState, area: Rect) {
    let title = state
        .editor
        .active_category()
        .map(|c| format!(" {} ({}) ", c.name, state.editor.active_id()))
        .unwrap_or_else(|| " Subcategories ".to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border(state.focus == EditorPane::Subcategories))
        .title(title);

    let subcategories: &[SubCategory] = state
        .editor
        .active_category()
        .map(|c| c.subcategories())
        .unwrap_or(&[]);
    if subcategories.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        render_empty(frame, inner, "No subcategories. Press a to add one");
        return;
    }

    let items: Vec<ListItem> = subcategories
        .iter()
        .map(|sub| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(sub.name.clone(), Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!("  {}", sub.id),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", sub.description),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut state.subcategories_state);
}

fn draw_preview(frame: &mut Frame, state: &EditorTabState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" categories.json ");
    let text = match state.editor.to_json() {
        Ok(json) => Paragraph::new(json).style(Style::default().fg(Color::Green)),
        Err(e) => Paragraph::new(e.to_string()).style(Style::default().fg(Color::Red)),
    };
    frame.render_widget(text.block(block), area);
}

fn draw_status(frame: &mut Frame, state: &EditorTabState, area: Rect) {
    let line = match &state.status {
        Some(status) => {
            let color = if status.is_error {
                Color::Red
            } else {
                Color::Green
            };
            Line::from(Span::styled(
                format!(" {}", status.text),
                Style::default().fg(color),
            ))
        }
        None => Line::from(Span::styled(
            " Edits stay local until exported with x",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_form(frame: &mut Frame, state: &EditorTabState) {
    let Some(form) = &state.form else {
        return;
    };
    let (title, focused, error, subcategory) = match form {
        EditorForm::Add { focused, error } => (
            "Add Subcategory",
            *focused,
            error.as_deref(),
            Some(&state.editor.draft),
        ),
        EditorForm::Edit { index, focused } => (
            "Edit Subcategory",
            *focused,
            None,
            state
                .editor
                .active_category()
                .and_then(|c| c.subcategories().get(*index)),
        ),
    };
    let Some(subcategory) = subcategory else {
        return;
    };

    let fields: Vec<FormField> = FIELD_ORDER
        .iter()
        .map(|field| FormField {
            label: field.label(),
            value: field.get(subcategory),
            focused: *field == focused,
        })
        .collect();
    draw_form_modal(frame, title, &fields, error);
}
