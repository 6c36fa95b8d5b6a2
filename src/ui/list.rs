// Generic list rendering for selectable items.
// Provides styled category and website lists with loading and empty states.

use ratatui::{prelude::*, widgets::*};

use crate::remote::{CategorySummary, Website};
use crate::state::page::WebsiteCard;
use crate::state::{LoadingState, SelectableList};

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

pub fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Build a multi-line list item for a website card.
pub fn website_item(website: &Website) -> ListItem<'static> {
    let card = WebsiteCard::new(website);

    let mut title = Vec::new();
    if card.featured {
        title.push(Span::styled("★ ", Style::default().fg(Color::Yellow)));
    }
    title.push(Span::styled(
        card.title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    if let Some(badge) = card.badge {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            format!("[{}]", badge.label),
            Style::default().fg(badge.color),
        ));
    }

    let mut meta = vec![
        Span::raw("  "),
        Span::styled(card.url, Style::default().fg(Color::Blue)),
    ];
    for tag in card.tags {
        meta.push(Span::styled(
            format!("  #{}", tag),
            Style::default().fg(Color::Magenta),
        ));
    }
    meta.push(Span::styled(
        format!("  Added {}", card.added),
        Style::default().fg(Color::DarkGray),
    ));

    ListItem::new(vec![
        Line::from(title),
        Line::from(Span::styled(
            format!("  {}", card.description),
            Style::default().fg(Color::Gray),
        )),
        Line::from(meta),
    ])
}

/// Render the home grid of categories with site counts.
pub fn render_categories_list(
    frame: &mut Frame,
    list: &mut SelectableList<CategorySummary>,
    area: Rect,
) {
    match &list.data {
        LoadingState::Idle => render_empty(frame, area, "Press r to load"),
        LoadingState::Loading => render_loading(frame, area, "Loading categories"),
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(data) => {
            if data.is_empty() {
                render_empty(frame, area, "No categories published yet");
            } else {
                let items: Vec<ListItem> = data
                    .iter()
                    .map(|summary| {
                        let category = &summary.category;
                        let mut header = vec![
                            Span::styled(&category.name, Style::default().fg(Color::Cyan)),
                            Span::styled(
                                format!("  {} sites", summary.count),
                                Style::default().fg(Color::Green),
                            ),
                        ];
                        if category.has_subcategories() {
                            header.push(Span::styled(
                                format!("  {} subcategories", category.subcategories().len()),
                                Style::default().fg(Color::DarkGray),
                            ));
                        }
                        ListItem::new(vec![
                            Line::from(header),
                            Line::from(Span::styled(
                                format!("  {}", category.description),
                                Style::default().fg(Color::Gray),
                            )),
                        ])
                    })
                    .collect();

                let list_widget = List::new(items)
                    .block(Block::default().borders(Borders::ALL).title(" Categories "))
                    .highlight_style(highlight_style())
                    .highlight_symbol("> ");

                frame.render_stateful_widget(list_widget, area, &mut list.list_state);
            }
        }
    }
}

/// Render a plain list of website cards.
pub fn render_websites_list(
    frame: &mut Frame,
    websites: &[Website],
    list_state: &mut ListState,
    title: &str,
    empty_message: &str,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title));
    if websites.is_empty() {
        let text = Paragraph::new(empty_message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = websites.iter().map(website_item).collect();
    let list_widget = List::new(items)
        .block(block)
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, list_state);
}

/// Render the featured websites list.
pub fn render_featured_list(frame: &mut Frame, list: &mut SelectableList<Website>, area: Rect) {
    match &list.data {
        LoadingState::Idle => render_empty(frame, area, "Press r to load"),
        LoadingState::Loading => render_loading(frame, area, "Loading featured websites"),
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(data) => render_websites_list(
            frame,
            data,
            &mut list.list_state,
            "Featured",
            "No featured websites yet",
            area,
        ),
    }
}
