//! Terminal UI components
//!
//! Built with ratatui. The home screen is rendered into an off-screen page
//! buffer and the visible slice is copied into the frame, which gives the
//! page smooth vertical scrolling and lets rows clip partially visible cards.

pub mod admin;
pub mod detail;
pub mod hero;
pub mod layout;
pub mod row;
pub mod skeleton;
pub mod theme;
pub mod watch;

pub use theme::Theme;

use std::time::Instant;

use ratatui::{
    layout::Position,
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, AppState, HomeFocus, InputMode};
use crate::ui::hero::HeroView;
use crate::ui::layout::HomeLayout;
use crate::ui::row::RowView;

/// Number of placeholder rows shown while content loads
const SKELETON_ROWS: usize = 4;

/// Copy `src` into `dst` with its top-left corner at (`x`, `y`), writing only
/// cells inside `clip`.
pub fn blit(src: &Buffer, dst: &mut Buffer, x: i32, y: u16, clip: Rect) {
    let clip = clip.intersection(dst.area);
    for sy in 0..src.area.height {
        let Some(dy) = y.checked_add(sy) else {
            break;
        };
        for sx in 0..src.area.width {
            let Ok(dx) = u16::try_from(x + i32::from(sx)) else {
                continue;
            };
            if clip.contains(Position::new(dx, dy)) {
                dst[(dx, dy)] = src[(src.area.x + sx, src.area.y + sy)].clone();
            }
        }
    }
}

/// Main render function - dispatches to view-specific renderers
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Theme::text()), area);

    let (header, content, status) = layout::page_areas(area);

    render_header(frame, header, app);
    match &app.state {
        AppState::Home => render_home(frame, content, app, now),
        AppState::Detail => detail::render(frame, content, app.detail.as_ref()),
        AppState::Watch { content_id } => watch::render(frame, content, content_id),
        AppState::Admin => admin::render(frame, content, &app.admin, &app.input_mode),
    }
    render_status_bar(frame, status, app);

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

/// Wordmark and section tabs
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let tab = |label: &'static str, active: bool| {
        Span::styled(
            format!("  {}", label),
            if active { Theme::title() } else { Theme::dimmed() },
        )
    };
    let line = Line::from(vec![
        Span::styled(" STREAMVAULT", Theme::brand()),
        tab("Home", app.state != AppState::Admin),
        tab("Admin", app.state == AppState::Admin),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the home page and copy its visible slice into the frame
fn render_home(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    if area.is_empty() {
        return;
    }

    let loading = app.rows.is_empty() && app.rows_loading.is_loading();
    let layout = if loading {
        HomeLayout::skeleton(area, SKELETON_ROWS)
    } else {
        app.layout.clone()
    };
    let scroll = app.page_scroll.min(layout.max_scroll());

    let page_height = layout.content_height.max(area.height);
    let mut page = Buffer::empty(Rect::new(0, 0, area.width, page_height));
    page.set_style(page.area, Theme::text());

    let hero = Rect::new(0, layout.hero.y, area.width, layout.hero.height);
    if app.hero_items.is_empty() {
        skeleton::render_hero(hero, &mut page);
    } else {
        HeroView::new(app, now).render(hero, &mut page);
    }

    for geometry in &layout.rows {
        if loading {
            skeleton::render_row(geometry, &mut page);
            continue;
        }
        let Some(row) = app.rows.get(geometry.row) else {
            continue;
        };
        let focused = match app.focus {
            HomeFocus::Row { row, card } if row == geometry.row => Some(card),
            _ => None,
        };
        RowView {
            row,
            geometry,
            scroll: app.row_scrolls.get(geometry.row),
            focused,
        }
        .render(geometry.area, &mut page);
    }

    let visible = Rect::new(0, scroll, area.width, area.height.min(page_height - scroll));
    let mut slice = Buffer::empty(visible);
    blit(&page, &mut slice, 0, 0, visible);
    blit(&slice, frame.buffer_mut(), i32::from(area.x), area.y, area);
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(" NORMAL ", Theme::button_secondary()),
        InputMode::Editing => Span::styled(" INSERT ", Theme::badge()),
    };

    let message = app
        .hero_loading
        .message()
        .map(str::to_string)
        .filter(|_| app.state == AppState::Home)
        .or_else(|| {
            (app.state == AppState::Home)
                .then(|| app.hero_status())
                .flatten()
        })
        .unwrap_or_default();

    let help = match app.state {
        AppState::Home => " ←→ slides  ↑↓ rows  space pause  m mute  i info  a admin  q quit ",
        AppState::Detail => " enter play  esc back  q quit ",
        AppState::Watch { .. } => " esc back  q quit ",
        AppState::Admin => " / search  t type  d delete  r reload  esc back ",
    };

    let left = Line::from(vec![
        mode_indicator,
        Span::raw(" "),
        Span::styled(message, Theme::status_bar()),
    ]);
    let help_width = help.chars().count() as u16;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(help_width)])
        .split(area);

    frame.render_widget(Paragraph::new(left).style(Theme::status_bar()), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(help, Theme::keybind_desc())).style(Theme::status_bar()),
        chunks[1],
    );
}

/// Render error popup overlay
fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5.min(area.height);

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}
