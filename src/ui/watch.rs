//! Watch placeholder

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: Rect, content_id: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .style(Style::default().bg(Theme::VIDEO));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let top = inner.y + inner.height.saturating_sub(3) / 2;
    let text = Rect::new(inner.x, top, inner.width, 3.min(inner.height));
    let lines = vec![
        Line::from(Span::styled(format!("Playing {}", content_id), Theme::title())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Esc]", Theme::keybind()),
            Span::styled(" back", Theme::keybind_desc()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text);
}
