//! Catalogue admin view
//!
//! Dashboard counters, a search box and the film list. Deletion asks for a
//! confirmation in the list title.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::{AdminState, InputMode};
use crate::models::{Film, MediaType};
use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: Rect, admin: &AdminState, input_mode: &InputMode) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Dashboard
            Constraint::Length(3), // Search
            Constraint::Min(1),    // Films
        ])
        .split(area);

    render_stats(frame, chunks[0], admin);
    render_search(frame, chunks[1], admin, input_mode);
    render_films(frame, chunks[2], admin);
}

fn render_stats(frame: &mut Frame, area: Rect, admin: &AdminState) {
    let line = Line::from(vec![
        Span::styled("Movies ", Theme::dimmed()),
        Span::styled(admin.stats.movies.to_string(), Theme::title()),
        Span::raw("    "),
        Span::styled("TV Shows ", Theme::dimmed()),
        Span::styled(admin.stats.tv_shows.to_string(), Theme::title()),
    ]);
    let stats = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .title(Span::styled(" DASHBOARD ", Theme::brand())),
    );
    frame.render_widget(stats, area);
}

fn render_search(frame: &mut Frame, area: Rect, admin: &AdminState, input_mode: &InputMode) {
    let editing = *input_mode == InputMode::Editing;
    let search = &admin.search;

    let text = if editing {
        let split = search
            .value
            .char_indices()
            .nth(search.cursor)
            .map_or(search.value.len(), |(i, _)| i);
        let (before, after) = search.value.split_at(split);
        format!("⌕ {}│{}", before, after)
    } else if search.value.is_empty() {
        "⌕ Press / to search titles".to_string()
    } else {
        format!("⌕ {}", search.value)
    };

    let filter = match admin.type_filter {
        None => "All",
        Some(MediaType::Movie) => "Movies",
        Some(MediaType::Tv) => "TV Shows",
    };

    let border = if editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let paragraph = Paragraph::new(text).style(Theme::input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(format!(" SEARCH · {} ", filter), Theme::title())),
    );
    frame.render_widget(paragraph, area);
}

fn film_item(film: &Film, selected: bool) -> ListItem<'static> {
    let fields = &film.fields;
    let marker = if selected { "▸ " } else { "  " };
    let style = if selected {
        Theme::list_item_selected()
    } else {
        Theme::text()
    };

    let mut spans = vec![
        Span::styled(marker, Theme::dimmed()),
        Span::styled(format!("#{:<4} ", film.id), Theme::dimmed()),
        Span::styled(fields.title.clone(), style),
    ];
    if fields.release_year > 0 {
        spans.push(Span::styled(format!(" ({})", fields.release_year), Theme::secondary()));
    }
    spans.push(Span::styled(
        format!("  [{}]", fields.content_type.label()),
        Theme::dimmed(),
    ));
    if let Some(rank) = fields.top_ten_rank.filter(|_| fields.is_top_ten) {
        spans.push(Span::styled(format!("  #{}", rank), Theme::top_ten()));
    }
    ListItem::new(Line::from(spans))
}

fn render_films(frame: &mut Frame, area: Rect, admin: &AdminState) {
    let films = admin.visible_films();
    let visible_height = usize::from(area.height.saturating_sub(2));

    let title = match admin.confirm_delete {
        Some(id) => Span::styled(format!(" Delete film #{}? (y/n) ", id), Theme::error()),
        None => Span::styled(
            format!(
                " FILMS ({}/{}) ",
                if films.is_empty() { 0 } else { admin.list.selected + 1 },
                films.len()
            ),
            Theme::title(),
        ),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(title);

    if let Some(message) = admin.loading.message() {
        let style = if admin.loading.is_error() {
            Theme::error()
        } else {
            Theme::loading()
        };
        let paragraph = Paragraph::new(message.to_string())
            .style(style)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if films.is_empty() {
        let paragraph = Paragraph::new("No films in the catalogue")
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = films
        .iter()
        .enumerate()
        .skip(admin.list.offset)
        .take(visible_height)
        .map(|(i, film)| film_item(film, i == admin.list.selected))
        .collect();

    frame.render_widget(List::new(items).block(block).style(Theme::text()), area);
}
