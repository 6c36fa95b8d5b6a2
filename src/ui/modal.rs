// Modal UI components.
// Reusable modal dialogs for user input.

use ratatui::{prelude::*, widgets::*};

/// One labelled input in a form modal.
pub struct FormField<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub focused: bool,
}

/// Draw a form modal on top of the current view.
pub fn draw_form_modal(frame: &mut Frame, title: &str, fields: &[FormField], error: Option<&str>) {
    let area = frame.area();

    // Create centered modal
    let modal_width = area.width.min(64);
    let modal_height = (fields.len() as u16 * 3 + 4).min(area.height);
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title));
    let inner = outer.inner(modal_area);
    frame.render_widget(outer, modal_area);

    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(1)); // Error
    constraints.push(Constraint::Length(1)); // Instructions
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (field, chunk) in fields.iter().zip(chunks.iter()) {
        let border = if field.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::raw(field.value)];
        if field.focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        let input = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", field.label)),
        );
        frame.render_widget(input, *chunk);
    }

    if let Some(error) = error {
        let error_widget = Paragraph::new(Span::styled(
            format!("⚠ {}", error),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(error_widget, chunks[fields.len()]);
    }

    // Instructions
    let instructions = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" = Save  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::styled(" = Next field  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" = Cancel ", Style::default().fg(Color::DarkGray)),
    ]);

    let instructions_widget = Paragraph::new(instructions).alignment(Alignment::Center);
    frame.render_widget(instructions_widget, chunks[fields.len() + 1]);
}
