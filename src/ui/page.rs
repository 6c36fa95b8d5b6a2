// Catalog page rendering.
// Category pages with their section sidebar, subcategory pages, and website details.

use ratatui::{prelude::*, widgets::*};

use crate::remote::Website;
use crate::state::page::{CategoryPage, Layout as PageLayout, SubcategoryPage, WebsiteCard};
use crate::state::{CategoryPane, CategoryViewState, LoadingState, SubcategoryViewState};

use super::list::{
    highlight_style, render_empty, render_error, render_loading, render_websites_list,
    website_item,
};

const SIDEBAR_WIDTH: u16 = 34;

/// Render a not-found page with a way back.
pub fn render_not_found(frame: &mut Frame, area: Rect, what: &str) {
    let text = vec![
        Line::from(Span::styled(
            format!("{} not found", what),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to go back",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Split off a header area for the page title, description, and notice.
fn page_header(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    description: &str,
    notice: Option<&str>,
) -> Rect {
    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];
    if let Some(notice) = notice {
        lines.push(Line::from(Span::styled(
            format!("⚠ {}", notice),
            Style::default().fg(Color::Yellow),
        )));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(lines.len() as u16 + 1), Constraint::Min(1)])
        .split(area);
    frame.render_widget(Paragraph::new(lines), chunks[0]);
    chunks[1]
}

/// Render the category view in any loading state.
pub fn render_category(frame: &mut Frame, state: &mut LoadingState<CategoryViewState>, area: Rect) {
    match state {
        LoadingState::Idle => render_empty(frame, area, "Press r to load"),
        LoadingState::Loading => render_loading(frame, area, "Loading category"),
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(state) => render_category_page(frame, state, area),
    }
}

fn render_category_page(frame: &mut Frame, state: &mut CategoryViewState, area: Rect) {
    let CategoryPage::Found { category, layout } = &state.view.page else {
        render_not_found(frame, area, "Category");
        return;
    };

    let body = page_header(
        frame,
        area,
        &category.name,
        &category.description,
        state.view.notice.as_deref(),
    );

    let (content_area, sidebar_area) = if state.view.sidebar.is_empty() {
        (body, None)
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(SIDEBAR_WIDTH)])
            .split(body);
        (chunks[0], Some(chunks[1]))
    };

    let content_focused = state.focus == CategoryPane::Websites;
    let border = if content_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    match layout {
        PageLayout::Flat(websites) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Websites ");
            if websites.is_empty() {
                let text = Paragraph::new("No websites found in this category.")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                frame.render_widget(text, content_area);
            } else {
                let items: Vec<ListItem> = websites.iter().map(website_item).collect();
                let mut list_state = ListState::default().with_selected(Some(state.selected));
                let list = List::new(items)
                    .block(block)
                    .highlight_style(highlight_style())
                    .highlight_symbol("> ");
                frame.render_stateful_widget(list, content_area, &mut list_state);
            }
        }
        PageLayout::Grouped(sections) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Websites ");
            if sections.is_empty() {
                let text = Paragraph::new("No websites found in this category.")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                frame.render_widget(text, content_area);
            } else {
                let mut items = Vec::new();
                let mut selected_row = None;
                let mut anchor_row = None;
                let mut index = 0;
                for section in sections {
                    let header_row = items.len();
                    let in_anchor = state.anchor.as_deref() == Some(section.bucket.id());
                    items.push(ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(
                                section.bucket.name().to_string(),
                                Style::default()
                                    .fg(Color::Yellow)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(
                                format!("  ({})", section.websites.len()),
                                Style::default().fg(Color::DarkGray),
                            ),
                        ]),
                        Line::from(Span::styled(
                            section.bucket.description().to_string(),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ]));
                    for website in &section.websites {
                        if index == state.selected {
                            selected_row = Some(items.len());
                            if in_anchor {
                                anchor_row = Some(header_row);
                            }
                        }
                        items.push(website_item(website));
                        index += 1;
                    }
                }

                // Keep the anchored section's header in view while the
                // selection stays inside that section.
                let mut list_state = ListState::default()
                    .with_offset(anchor_row.unwrap_or(0))
                    .with_selected(selected_row);
                let list = List::new(items)
                    .block(block)
                    .highlight_style(highlight_style())
                    .highlight_symbol("> ");
                frame.render_stateful_widget(list, content_area, &mut list_state);
            }
        }
    }

    if let Some(sidebar_area) = sidebar_area {
        render_sidebar(frame, state, sidebar_area);
    }
}

/// Render the section index with per-section counts.
fn render_sidebar(frame: &mut Frame, state: &mut CategoryViewState, area: Rect) {
    let focused = state.focus == CategoryPane::Sidebar;
    let items: Vec<ListItem> = state
        .view
        .sidebar
        .iter()
        .map(|entry| {
            let style = if state.anchor.as_deref() == Some(entry.anchor.as_str()) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(entry.name.clone(), style),
                Span::styled(
                    format!(" ({})", entry.count),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Subcategories "),
        )
        .highlight_style(if focused {
            highlight_style()
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        })
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state.sidebar_state);
}

/// Render the subcategory view in any loading state.
pub fn render_subcategory(
    frame: &mut Frame,
    state: &mut LoadingState<SubcategoryViewState>,
    area: Rect,
) {
    match state {
        LoadingState::Idle => render_empty(frame, area, "Press r to load"),
        LoadingState::Loading => render_loading(frame, area, "Loading subcategory"),
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(state) => {
            let SubcategoryPage::Found {
                category,
                subcategory,
                websites,
            } = &state.view.page
            else {
                render_not_found(frame, area, "Subcategory");
                return;
            };
            let body = page_header(
                frame,
                area,
                &format!("{} / {}", category.name, subcategory.name),
                &subcategory.description,
                state.view.notice.as_deref(),
            );
            render_websites_list(
                frame,
                websites,
                &mut state.list_state,
                &subcategory.name,
                "No websites found in this subcategory.",
                body,
            );
        }
    }
}

/// Render the detail view for one website.
pub fn render_detail(frame: &mut Frame, state: &LoadingState<Option<Website>>, area: Rect) {
    match state {
        LoadingState::Idle => render_empty(frame, area, "Press r to load"),
        LoadingState::Loading => render_loading(frame, area, "Loading website"),
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(None) => render_not_found(frame, area, "Website"),
        LoadingState::Loaded(Some(website)) => render_website(frame, website, area),
    }
}

fn render_website(frame: &mut Frame, website: &Website, area: Rect) {
    let card = WebsiteCard::new(website);
    let label = Style::default().fg(Color::DarkGray);

    let mut title = vec![Span::styled(
        card.title.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let Some(badge) = card.badge {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            format!("[{}]", badge.label),
            Style::default().fg(badge.color),
        ));
    }
    if card.featured {
        title.push(Span::styled("  ★ Featured", Style::default().fg(Color::Yellow)));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(""),
        Line::from(card.description.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled("URL:         ", label),
            Span::styled(card.url.clone(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled("Category:    ", label),
            Span::raw(website.category.clone()),
        ]),
    ];
    if let Some(subcategory) = &website.subcategory {
        lines.push(Line::from(vec![
            Span::styled("Subcategory: ", label),
            Span::raw(subcategory.clone()),
        ]));
    }
    if !card.tags.is_empty() {
        let tags: Vec<String> = card.tags.iter().map(|t| format!("#{}", t)).collect();
        lines.push(Line::from(vec![
            Span::styled("Tags:        ", label),
            Span::styled(tags.join(" "), Style::default().fg(Color::Magenta)),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Added:       ", label),
        Span::raw(card.added.clone()),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Website "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
