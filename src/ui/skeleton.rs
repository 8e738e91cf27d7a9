//! Loading placeholders for the hero and content rows

use ratatui::prelude::*;

use crate::models::RowVariant;
use crate::ui::layout::{card_size, RowGeometry, CARD_GAP};
use crate::ui::Theme;

fn bar(buf: &mut Buffer, x: u16, y: u16, width: u16, clip: Rect) {
    let rect = Rect::new(x, y, width, 1).intersection(clip);
    if !rect.is_empty() {
        buf.set_style(rect, Theme::skeleton());
    }
}

/// Hero placeholder: title, meta and synopsis bars, button blocks
pub fn render_hero(area: Rect, buf: &mut Buffer) {
    buf.set_style(area, Style::default().bg(Theme::BACKDROP));
    let x = area.x + 2;
    let width = area.width.saturating_sub(4);

    bar(buf, x, area.y + 1, 12.min(width), area);
    bar(buf, x, area.y + 3, (width / 3).max(1), area);
    bar(buf, x, area.y + 4, (width / 4).max(1), area);
    for line in 0..3 {
        bar(buf, x, area.y + 6 + line, (width / 2).max(1), area);
    }
    let buttons_y = area.y + area.height.saturating_sub(4);
    bar(buf, x, buttons_y, 8, area);
    bar(buf, x + 10, buttons_y, 13, area);
}

/// Row placeholder: header bar and as many poster blocks as fit
pub fn render_row(geometry: &RowGeometry, buf: &mut Buffer) {
    let header = geometry.header();
    bar(buf, header.x + 3, header.y, 18, header);

    let track = geometry.track();
    let (card_w, card_h) = card_size(RowVariant::Poster);
    let mut x = track.x;
    while x < track.right() {
        let card = Rect::new(x, track.y, card_w, card_h).intersection(track);
        buf.set_style(card, Theme::skeleton());
        x += card_w + CARD_GAP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::HomeLayout;

    #[test]
    fn test_skeleton_rows_fill_track() {
        let layout = HomeLayout::skeleton(Rect::new(0, 1, 80, 30), 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, layout.content_height));
        for geometry in &layout.rows {
            render_row(geometry, &mut buf);
        }
        let track = layout.rows[0].track();
        assert_eq!(buf[(track.x, track.y)].bg, Theme::SKELETON);
        assert_eq!(buf[(track.right() - 1, track.y)].bg, Theme::SKELETON);
    }

    #[test]
    fn test_hero_skeleton_tiny_area() {
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        render_hero(area, &mut buf);
    }
}
