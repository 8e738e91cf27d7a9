//! Content row view
//!
//! A row is a header line plus a horizontally scrolled strip of cards. Each
//! card is drawn into its own small buffer and copied into the strip, clipped
//! to the visible track, so partially scrolled cards render correctly.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::format;
use crate::gesture::RowScroll;
use crate::models::{ContentCardItem, ContentRow, ContinueWatchingItem, RowItems, TopTenItem};
use crate::ui::layout::{card_size, px_to_columns, RowGeometry};
use crate::ui::{blit, Theme};

pub struct RowView<'a> {
    pub row: &'a ContentRow,
    pub geometry: &'a RowGeometry,
    pub scroll: Option<&'a RowScroll>,
    /// Focused card, if this row has focus
    pub focused: Option<usize>,
}

impl Widget for RowView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        self.render_header(buf);
        self.render_arrows(buf);

        let track = self.geometry.track();
        let offset = self.scroll.map_or(0, |s| px_to_columns(s.offset()));
        let (card_w, card_h) = card_size(self.geometry.variant);

        for index in 0..self.row.items.len() {
            let (start, end) = self.geometry.card_span(index);
            if end <= offset || start >= offset + track.width {
                continue;
            }

            let mut card_buf = Buffer::empty(Rect::new(0, 0, card_w, card_h));
            let focused = self.focused == Some(index);
            render_card(&self.row.items, index, focused, &mut card_buf);

            let x = i32::from(track.x) + i32::from(start) - i32::from(offset);
            blit(&card_buf, buf, x, track.y, track);
        }
    }
}

impl RowView<'_> {
    fn render_header(&self, buf: &mut Buffer) {
        let header = self.geometry.header();
        let mut spans = vec![Span::styled(self.row.title.clone(), Theme::title())];
        if let Some(subtitle) = &self.row.subtitle {
            spans.push(Span::styled(format!("  {}", subtitle), Theme::dimmed()));
        }
        if self.row.see_all_href.is_some() {
            spans.push(Span::styled("  Explore All ›", Theme::secondary()));
        }
        let area = Rect::new(header.x + 3, header.y, header.width.saturating_sub(3), 1);
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }

    /// Arrows follow the scroll bounds
    fn render_arrows(&self, buf: &mut Buffer) {
        let Some(scroll) = self.scroll else {
            return;
        };
        let left = self.geometry.left_arrow();
        let right = self.geometry.right_arrow();
        let mid = left.y + left.height / 2;
        if scroll.can_scroll_left() {
            buf.set_string(left.x + 1, mid, "‹", Theme::title());
        }
        if scroll.can_scroll_right() {
            buf.set_string(right.x + 1, mid, "›", Theme::title());
        }
    }
}

fn card_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .style(Theme::card())
}

/// Draw card `index` of `items` filling `buf`.
pub fn render_card(items: &RowItems, index: usize, focused: bool, buf: &mut Buffer) {
    let area = buf.area;
    match items {
        RowItems::Poster(cards) | RowItems::Backdrop(cards) => {
            if let Some(card) = cards.get(index) {
                render_plain_card(card, focused, area, buf);
            }
        }
        RowItems::ContinueWatching(cards) => {
            if let Some(item) = cards.get(index) {
                render_continue_watching(item, focused, area, buf);
            }
        }
        RowItems::TopTen(cards) => {
            if let Some(item) = cards.get(index) {
                render_top_ten(item, focused, area, buf);
            }
        }
    }
}

fn badge_line(card: &ContentCardItem) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(score) = card.match_score {
        spans.push(Span::styled(format!("{}% ", score), Theme::match_score()));
    }
    if card.is_new {
        spans.push(Span::styled("NEW", Theme::badge()));
    } else if card.is_original {
        spans.push(Span::styled("ORIGINAL", Theme::badge()));
    }
    Line::from(spans)
}

fn render_plain_card(card: &ContentCardItem, focused: bool, area: Rect, buf: &mut Buffer) {
    let block = card_block(focused);
    let inner = block.inner(area);
    block.render(area, buf);

    let lines = vec![
        Line::from(Span::styled(card.title.clone(), Theme::title())),
        Line::from(Span::styled(format::card_meta(card), Theme::dimmed())),
        badge_line(card),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

fn render_continue_watching(
    item: &ContinueWatchingItem,
    focused: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = card_block(focused);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![Line::from(Span::styled(
        format::truncate(&item.card.title, usize::from(inner.width)),
        Theme::title(),
    ))];
    if let Some(episode) = &item.episode_title {
        lines.push(Line::from(Span::styled(
            format::truncate(episode, usize::from(inner.width)),
            Theme::secondary(),
        )));
    }
    if let Some(remaining) = item.remaining_minutes {
        lines.push(Line::from(Span::styled(
            format!("{}m left", remaining),
            Theme::dimmed(),
        )));
    }
    Paragraph::new(lines).render(inner, buf);

    // Progress bar on the last inner line
    if inner.height > 0 {
        let y = inner.bottom() - 1;
        let filled = usize::from(inner.width) * usize::from(item.progress_percent.min(100)) / 100;
        for x in 0..inner.width {
            let style = if usize::from(x) < filled {
                Theme::progress_bar()
            } else {
                Theme::progress_bar_empty()
            };
            buf.set_string(inner.x + x, y, "▬", style);
        }
    }
}

fn render_top_ten(item: &TopTenItem, focused: bool, area: Rect, buf: &mut Buffer) {
    let rank_width = 6.min(area.width);
    let rank = item.rank.to_string();
    let rank_y = area.y + area.height / 2;
    let rank_x = area.x + rank_width.saturating_sub(rank.len() as u16 + 1);
    buf.set_string(rank_x, rank_y, &rank, Theme::top_ten());

    let poster = Rect::new(
        area.x + rank_width,
        area.y,
        area.width - rank_width,
        area.height,
    );
    render_plain_card(&item.card, focused, poster, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use crate::models::RowVariant;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.bottom())
            .flat_map(|y| (area.x..area.right()).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn geometry(variant: RowVariant, count: usize) -> RowGeometry {
        RowGeometry {
            row: 0,
            variant,
            item_count: count,
            area: Rect::new(0, 0, 60, crate::ui::layout::row_height(variant)),
        }
    }

    #[test]
    fn test_header_shows_subtitle_and_explore() {
        let row = ContentRow::new("Top Picks", RowItems::Poster(mock::make_mock_cards(5, "pick")))
            .subtitle("Because you watched Dune")
            .see_all("/browse/top-picks");
        let geometry = geometry(RowVariant::Poster, 5);
        let mut buf = Buffer::empty(geometry.area);
        RowView {
            row: &row,
            geometry: &geometry,
            scroll: None,
            focused: None,
        }
        .render(geometry.area, &mut buf);

        let rendered = text(&buf);
        assert!(rendered.contains("Top Picks"));
        assert!(rendered.contains("Because you watched Dune"));
        assert!(rendered.contains("Explore All"));
    }

    #[test]
    fn test_arrows_follow_bounds() {
        let row = ContentRow::new("Trending", RowItems::Poster(mock::make_mock_cards(10, "t")));
        let geometry = geometry(RowVariant::Poster, 10);
        let mut scroll = RowScroll::new();
        let track = geometry.track();
        scroll.on_resize(
            0.0,
            f32::from(track.width) * 8.0,
            f32::from(geometry.content_width()) * 8.0,
        );

        let mut buf = Buffer::empty(geometry.area);
        RowView {
            row: &row,
            geometry: &geometry,
            scroll: Some(&scroll),
            focused: None,
        }
        .render(geometry.area, &mut buf);

        let left = geometry.left_arrow();
        let right = geometry.right_arrow();
        let mid = left.y + left.height / 2;
        assert_eq!(buf[(left.x + 1, mid)].symbol(), " ");
        assert_eq!(buf[(right.x + 1, mid)].symbol(), "›");
    }

    #[test]
    fn test_top_ten_rank_rendered() {
        let row = mock::home_rows(chrono::Utc::now())
            .into_iter()
            .find(|r| r.variant() == RowVariant::TopTen)
            .unwrap();
        let (w, h) = card_size(RowVariant::TopTen);
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        render_card(&row.items, 0, false, &mut buf);
        assert!(text(&buf).contains('1'));
    }

    #[test]
    fn test_scrolled_cards_are_clipped_to_track() {
        let row = ContentRow::new("Trending", RowItems::Poster(mock::make_mock_cards(10, "t")));
        let geometry = geometry(RowVariant::Poster, 10);
        let mut scroll = RowScroll::new();
        let track = geometry.track();
        scroll.on_resize(
            0.0,
            f32::from(track.width) * 8.0,
            f32::from(geometry.content_width()) * 8.0,
        );
        scroll.set_offset(40.0);

        let mut buf = Buffer::empty(geometry.area);
        RowView {
            row: &row,
            geometry: &geometry,
            scroll: Some(&scroll),
            focused: None,
        }
        .render(geometry.area, &mut buf);

        // Nothing spills into the arrow gutters
        let left = geometry.left_arrow();
        assert_eq!(buf[(left.x, track.y)].symbol(), " ");
        assert!(scroll.can_scroll_left());
    }
}
