//! Home screen geometry
//!
//! The home screen is a tall virtual page (hero, then rows) scrolled
//! vertically inside the viewport. Everything here is in page coordinates
//! unless a function says otherwise; pointer positions are converted with
//! [`HomeLayout::to_page`]. Horizontal quantities handed to the gesture
//! tracker are logical pixels, one column being [`CELL_WIDTH_PX`].

use ratatui::layout::{Position, Rect};

use crate::models::{ContentRow, RowVariant};

/// Logical pixels per terminal column
pub const CELL_WIDTH_PX: f32 = 8.0;

pub const HEADER_HEIGHT: u16 = 1;
pub const STATUS_HEIGHT: u16 = 1;
pub const HERO_HEIGHT: u16 = 16;

/// Columns reserved on each side of a row track for the scroll arrows
pub const ROW_INSET: u16 = 3;
pub const CARD_GAP: u16 = 1;

/// Card size (columns, lines) per row variant
pub fn card_size(variant: RowVariant) -> (u16, u16) {
    match variant {
        RowVariant::Poster => (16, 8),
        RowVariant::Backdrop => (28, 7),
        RowVariant::ContinueWatching => (28, 8),
        RowVariant::TopTen => (22, 8),
    }
}

/// Header line, card track and one blank line
pub fn row_height(variant: RowVariant) -> u16 {
    1 + card_size(variant).1 + 1
}

/// Split the terminal into header, scrollable viewport and status bar.
pub fn page_areas(area: Rect) -> (Rect, Rect, Rect) {
    let header = Rect::new(area.x, area.y, area.width, HEADER_HEIGHT.min(area.height));
    let status_y = area.bottom().saturating_sub(STATUS_HEIGHT).max(header.bottom());
    let status = Rect::new(area.x, status_y, area.width, area.bottom() - status_y);
    let viewport = Rect::new(
        area.x,
        header.bottom(),
        area.width,
        status_y.saturating_sub(header.bottom()),
    );
    (header, viewport, status)
}

/// Placement of one rendered row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowGeometry {
    /// Index into the app's row list
    pub row: usize,
    pub variant: RowVariant,
    pub item_count: usize,
    /// Whole row, page coordinates
    pub area: Rect,
}

impl RowGeometry {
    pub fn header(&self) -> Rect {
        Rect::new(self.area.x, self.area.y, self.area.width, 1)
    }

    /// Visible card strip between the arrows
    pub fn track(&self) -> Rect {
        let (_, card_h) = card_size(self.variant);
        Rect::new(
            self.area.x + ROW_INSET,
            self.area.y + 1,
            self.area.width.saturating_sub(2 * ROW_INSET),
            card_h,
        )
    }

    pub fn left_arrow(&self) -> Rect {
        let track = self.track();
        Rect::new(self.area.x, track.y, ROW_INSET, track.height)
    }

    pub fn right_arrow(&self) -> Rect {
        let track = self.track();
        Rect::new(track.right(), track.y, ROW_INSET, track.height)
    }

    /// Column stride between card starts
    pub fn stride(&self) -> u16 {
        card_size(self.variant).0 + CARD_GAP
    }

    /// Width of all cards laid end to end
    pub fn content_width(&self) -> u16 {
        let (card_w, _) = card_size(self.variant);
        let n = self.item_count as u16;
        (n * card_w + n.saturating_sub(1) * CARD_GAP).max(0)
    }

    /// Card span `[start, end)` in track columns, before scrolling
    pub fn card_span(&self, index: usize) -> (u16, u16) {
        let start = index as u16 * self.stride();
        (start, start + card_size(self.variant).0)
    }

    /// Card under track column `col` (already shifted by the scroll offset)
    pub fn card_at(&self, content_col: u16) -> Option<usize> {
        let index = (content_col / self.stride()) as usize;
        let within = content_col % self.stride();
        (index < self.item_count && within < card_size(self.variant).0).then_some(index)
    }
}

/// Clickable parts of the hero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroHit {
    Play,
    MoreInfo,
    Previous,
    TogglePause,
    Next,
    ToggleMute,
    Dot(usize),
    Body,
}

/// Control placement inside the hero, page coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroControls {
    pub play: Rect,
    pub more_info: Rect,
    pub previous: Option<Rect>,
    pub pause: Option<Rect>,
    pub next: Option<Rect>,
    pub mute: Option<Rect>,
    pub dots: Vec<Rect>,
}

/// Width of the current slide's dot (a progress bar)
pub const ACTIVE_DOT_WIDTH: u16 = 6;

impl HeroControls {
    /// Navigation only exists with more than one slide; the mute toggle only
    /// when the current slide has a trailer.
    pub fn compute(hero: Rect, total: usize, current: usize, has_trailer: bool) -> Self {
        let buttons_y = hero.y + hero.height.saturating_sub(4);
        let controls_y = hero.y + hero.height.saturating_sub(2);
        let play = Rect::new(hero.x + 2, buttons_y, 8, 1);
        let more_info = Rect::new(play.right() + 2, buttons_y, 13, 1);
        let mute = has_trailer.then(|| Rect::new(hero.right().saturating_sub(6), controls_y, 3, 1));

        if total <= 1 {
            return Self {
                play,
                more_info,
                previous: None,
                pause: None,
                next: None,
                mute,
                dots: Vec::new(),
            };
        }

        let previous = Rect::new(hero.x + 2, controls_y, 3, 1);
        let pause = Rect::new(previous.right() + 1, controls_y, 3, 1);
        let next = Rect::new(pause.right() + 1, controls_y, 3, 1);

        let widths: Vec<u16> = (0..total)
            .map(|i| if i == current { ACTIVE_DOT_WIDTH } else { 1 })
            .collect();
        let dots_width: u16 = widths.iter().sum::<u16>() + total as u16 - 1;
        let mut x = hero.x + hero.width.saturating_sub(dots_width) / 2;
        let dots = widths
            .into_iter()
            .map(|w| {
                let dot = Rect::new(x, controls_y, w, 1);
                x += w + 1;
                dot
            })
            .collect();

        Self {
            play,
            more_info,
            previous: Some(previous),
            pause: Some(pause),
            next: Some(next),
            mute,
            dots,
        }
    }

    pub fn hit(&self, pos: Position) -> Option<HeroHit> {
        let buttons = [
            (Some(self.play), HeroHit::Play),
            (Some(self.more_info), HeroHit::MoreInfo),
            (self.previous, HeroHit::Previous),
            (self.pause, HeroHit::TogglePause),
            (self.next, HeroHit::Next),
            (self.mute, HeroHit::ToggleMute),
        ];
        buttons
            .into_iter()
            .find_map(|(rect, hit)| rect.filter(|r| r.contains(pos)).map(|_| hit))
            .or_else(|| {
                self.dots
                    .iter()
                    .position(|d| d.contains(pos))
                    .map(HeroHit::Dot)
            })
    }
}

/// Geometry of the whole home page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeLayout {
    /// Screen area the page is scrolled within
    pub viewport: Rect,
    /// Hero, page coordinates
    pub hero: Rect,
    pub rows: Vec<RowGeometry>,
    pub content_height: u16,
}

impl HomeLayout {
    /// Empty rows are not laid out.
    pub fn compute(viewport: Rect, rows: &[ContentRow]) -> Self {
        let hero = Rect::new(0, 0, viewport.width, HERO_HEIGHT);
        let mut y = hero.bottom() + 1;
        let mut geometry = Vec::new();

        for (row, content) in rows.iter().enumerate() {
            if content.items.is_empty() {
                continue;
            }
            let variant = content.variant();
            let height = row_height(variant);
            geometry.push(RowGeometry {
                row,
                variant,
                item_count: content.items.len(),
                area: Rect::new(0, y, viewport.width, height),
            });
            y += height;
        }

        Self {
            viewport,
            hero,
            rows: geometry,
            content_height: y,
        }
    }

    /// Skeleton page: hero plus `count` placeholder poster rows
    pub fn skeleton(viewport: Rect, count: usize) -> Self {
        let hero = Rect::new(0, 0, viewport.width, HERO_HEIGHT);
        let height = row_height(RowVariant::Poster);
        let rows = (0..count)
            .map(|i| RowGeometry {
                row: i,
                variant: RowVariant::Poster,
                item_count: 0,
                area: Rect::new(0, hero.bottom() + 1 + i as u16 * height, viewport.width, height),
            })
            .collect();
        Self {
            viewport,
            hero,
            rows,
            content_height: hero.bottom() + 1 + count as u16 * height,
        }
    }

    pub fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport.height)
    }

    /// Screen position to page position, `None` outside the viewport.
    pub fn to_page(&self, column: u16, row: u16, scroll: u16) -> Option<Position> {
        let pos = Position::new(column, row);
        self.viewport.contains(pos).then(|| {
            Position::new(column - self.viewport.x, row - self.viewport.y + scroll)
        })
    }

    /// Screen x of a page column
    pub fn screen_x(&self, page_x: u16) -> u16 {
        self.viewport.x + page_x
    }

    pub fn row_at(&self, pos: Position) -> Option<&RowGeometry> {
        self.rows.iter().find(|r| r.area.contains(pos))
    }

    pub fn geometry_for(&self, row: usize) -> Option<&RowGeometry> {
        self.rows.iter().find(|g| g.row == row)
    }

    /// Top of the hero relative to the viewport's top edge
    pub fn hero_screen_top(&self, scroll: u16) -> i32 {
        i32::from(self.hero.y) - i32::from(scroll)
    }

    /// Scroll that brings `area` fully into view, keeping `scroll` if it is.
    pub fn scroll_to_reveal(&self, area: Rect, scroll: u16) -> u16 {
        let view = self.viewport.height;
        let target = if area.y < scroll {
            area.y
        } else if area.bottom() > scroll + view {
            area.bottom().saturating_sub(view)
        } else {
            scroll
        };
        target.min(self.max_scroll())
    }
}

/// Pixel x for a screen column
pub fn column_to_px(column: u16) -> f32 {
    f32::from(column) * CELL_WIDTH_PX
}

/// Column count for a pixel distance, rounded
pub fn px_to_columns(px: f32) -> u16 {
    (px / CELL_WIDTH_PX).round().max(0.0) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn test_page_areas() {
        let (header, viewport, status) = page_areas(Rect::new(0, 0, 100, 40));
        assert_eq!(header, Rect::new(0, 0, 100, 1));
        assert_eq!(viewport, Rect::new(0, 1, 100, 38));
        assert_eq!(status, Rect::new(0, 39, 100, 1));
    }

    #[test]
    fn test_rows_stack_below_hero() {
        let rows = mock::home_rows(chrono::Utc::now());
        let layout = HomeLayout::compute(Rect::new(0, 1, 120, 38), &rows);
        assert_eq!(layout.rows.len(), rows.len());
        assert_eq!(layout.rows[0].area.y, HERO_HEIGHT + 1);
        for pair in layout.rows.windows(2) {
            assert_eq!(pair[0].area.bottom(), pair[1].area.y);
        }
        assert!(layout.max_scroll() > 0);
    }

    #[test]
    fn test_empty_rows_skipped() {
        let mut rows = mock::home_rows(chrono::Utc::now());
        rows[1].items = crate::models::RowItems::Poster(Vec::new());
        let layout = HomeLayout::compute(Rect::new(0, 1, 120, 38), &rows);
        assert_eq!(layout.rows.len(), rows.len() - 1);
        assert!(layout.geometry_for(1).is_none());
    }

    #[test]
    fn test_card_hit_testing() {
        let geometry = RowGeometry {
            row: 0,
            variant: RowVariant::Poster,
            item_count: 3,
            area: Rect::new(0, 20, 80, 10),
        };
        assert_eq!(geometry.card_at(0), Some(0));
        assert_eq!(geometry.card_at(15), Some(0));
        assert_eq!(geometry.card_at(16), None);
        assert_eq!(geometry.card_at(17), Some(1));
        assert_eq!(geometry.card_at(60), None);
        assert_eq!(geometry.content_width(), 3 * 16 + 2);
    }

    #[test]
    fn test_hero_controls_single_slide() {
        let hero = Rect::new(0, 0, 100, HERO_HEIGHT);
        let controls = HeroControls::compute(hero, 1, 0, true);
        assert!(controls.previous.is_none());
        assert!(controls.dots.is_empty());
        assert!(controls.mute.is_some());

        let controls = HeroControls::compute(hero, 1, 0, false);
        assert!(controls.mute.is_none());
    }

    #[test]
    fn test_hero_controls_hit() {
        let hero = Rect::new(0, 0, 100, HERO_HEIGHT);
        let controls = HeroControls::compute(hero, 4, 1, false);
        assert_eq!(controls.dots.len(), 4);
        assert_eq!(controls.dots[1].width, ACTIVE_DOT_WIDTH);

        let next = controls.next.unwrap();
        assert_eq!(controls.hit(Position::new(next.x, next.y)), Some(HeroHit::Next));
        let dot = controls.dots[3];
        assert_eq!(controls.hit(Position::new(dot.x, dot.y)), Some(HeroHit::Dot(3)));
        assert_eq!(controls.hit(Position::new(50, 2)), None);
    }

    #[test]
    fn test_to_page() {
        let layout = HomeLayout::compute(Rect::new(0, 1, 80, 20), &[]);
        assert_eq!(layout.to_page(5, 0, 0), None);
        assert_eq!(layout.to_page(5, 1, 0), Some(Position::new(5, 0)));
        assert_eq!(layout.to_page(5, 3, 10), Some(Position::new(5, 12)));
    }

    #[test]
    fn test_scroll_to_reveal() {
        let rows = mock::home_rows(chrono::Utc::now());
        let layout = HomeLayout::compute(Rect::new(0, 1, 120, 20), &rows);
        let last = layout.rows.last().unwrap().area;
        let scroll = layout.scroll_to_reveal(last, 0);
        assert_eq!(scroll, last.bottom() - 20);
        assert_eq!(layout.scroll_to_reveal(layout.hero, scroll), 0);
    }
}
