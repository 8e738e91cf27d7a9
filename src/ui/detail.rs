//! Detail view for a hero slide or row card
//!
//! Shows the full info of the selected title with Play and Back hints.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::Selection;
use crate::format;
use crate::models::{ContentCardItem, HeroItem};
use crate::ui::Theme;

/// Render the detail view
pub fn render(frame: &mut Frame, area: Rect, selection: Option<&Selection>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .style(Theme::text());

    let Some(selection) = selection else {
        let empty = Paragraph::new("Nothing selected")
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = match selection {
        Selection::Hero(item) => hero_lines(item),
        Selection::Card(card) => card_lines(card),
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" ▶ Play ", Theme::button_primary()),
        Span::raw("  "),
        Span::styled("[Enter]", Theme::keybind()),
        Span::styled(" play  ", Theme::keybind_desc()),
        Span::styled("[Esc]", Theme::keybind()),
        Span::styled(" back", Theme::keybind_desc()),
    ]));

    let title = format!(" {} ", selection.title());
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block.title(Span::styled(title, Theme::title())));
    frame.render_widget(paragraph, area);
}

fn hero_lines(item: &HeroItem) -> Vec<Line<'static>> {
    let mut meta = vec![Span::styled(item.content_type.label(), Theme::secondary())];
    for part in format::meta_items(item) {
        meta.push(Span::styled("  ·  ", Theme::dimmed()));
        meta.push(Span::styled(part, Theme::secondary()));
    }
    if !item.maturity_rating.is_empty() {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(format!("[{}]", item.maturity_rating), Theme::rating()));
    }

    let mut lines = vec![Line::from(Span::styled(item.title.clone(), Theme::title())), Line::from(meta)];
    if let Some(score) = item.match_score {
        lines.push(Line::from(Span::styled(
            format!("{}% Match", score),
            Theme::match_score(),
        )));
    }
    if let Some(rank) = item.top_ten_rank.filter(|_| item.is_top_ten) {
        lines.push(Line::from(Span::styled(
            format!("#{} in Top 10 Today", rank),
            Theme::top_ten(),
        )));
    }
    if !item.genres.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genres: ", Theme::dimmed()),
            Span::styled(item.genres.join(", "), Theme::secondary()),
        ]));
    }
    if let Some(runtime) = item.runtime_minutes {
        lines.push(Line::from(vec![
            Span::styled("Runtime: ", Theme::dimmed()),
            Span::styled(format::convert_minutes(runtime), Theme::secondary()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(item.synopsis.clone(), Theme::text())));
    lines
}

fn card_lines(card: &ContentCardItem) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(card.title.clone(), Theme::title())),
        Line::from(Span::styled(format::card_meta(card), Theme::secondary())),
    ];
    if let Some(score) = card.match_score {
        lines.push(Line::from(Span::styled(
            format!("{}% Match", score),
            Theme::match_score(),
        )));
    }
    if !card.genres.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genres: ", Theme::dimmed()),
            Span::styled(card.genres.join(", "), Theme::secondary()),
        ]));
    }
    lines
}
