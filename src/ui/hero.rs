//! Hero carousel view
//!
//! Renders the current slide (backdrop tint, badges, title, meta line,
//! synopsis, Play / More Info) and the carousel controls. Rendered into the
//! home page buffer at the hero's page rect.

use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::carousel::Carousel;
use crate::format;
use crate::models::HeroItem;
use crate::ui::layout::{HeroControls, ACTIVE_DOT_WIDTH};
use crate::ui::Theme;

/// Share of the hero width used by the text column
const TEXT_COLUMN_PERCENT: u16 = 60;

pub struct HeroView<'a> {
    app: &'a App,
    now: Instant,
}

impl<'a> HeroView<'a> {
    pub fn new(app: &'a App, now: Instant) -> Self {
        Self { app, now }
    }
}

impl Widget for HeroView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(item) = self.app.current_hero() else {
            crate::ui::skeleton::render_hero(area, buf);
            return;
        };

        let video = self.app.video_visible();
        buf.set_style(
            area,
            Style::default().bg(if video { Theme::VIDEO } else { Theme::BACKDROP }),
        );

        let text_width = (area.width * TEXT_COLUMN_PERCENT / 100).max(20).min(area.width);
        let text_area = Rect::new(
            area.x + 2,
            area.y + 1,
            text_width.saturating_sub(2),
            area.height.saturating_sub(5),
        );
        Paragraph::new(slide_lines(item))
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        if video {
            if let Some(carousel) = self.app.carousel.as_ref() {
                render_video_badge(carousel, area, buf);
            }
        }

        let controls = self.app.hero_controls();
        render_buttons(&controls, buf);
        if let Some(carousel) = self.app.carousel.as_ref() {
            render_controls(&controls, carousel, self.now, buf);
        }
    }
}

/// Badges, title, meta line and synopsis
fn slide_lines(item: &HeroItem) -> Vec<Line<'static>> {
    let mut badges = vec![Span::styled(
        format!(
            "{} {}",
            if item.content_type.is_episodic() { "▣" } else { "▶" },
            item.content_type.label().to_uppercase()
        ),
        Theme::secondary(),
    )];
    if item.is_original {
        badges.push(Span::raw(" "));
        badges.push(Span::styled(" ORIGINAL ", Theme::badge()));
    }
    if item.is_new {
        badges.push(Span::raw(" "));
        badges.push(Span::styled(" NEW ", Theme::badge()));
    }
    if let Some(rank) = item.top_ten_rank.filter(|_| item.is_top_ten) {
        badges.push(Span::raw(" "));
        badges.push(Span::styled(format!("#{} in Top 10 Today", rank), Theme::top_ten()));
    }

    let title_style = if item.logo_url.is_some() {
        Theme::title().add_modifier(Modifier::ITALIC)
    } else {
        Theme::title()
    };

    let mut meta = Vec::new();
    if let Some(score) = item.match_score {
        meta.push(Span::styled(format!("{}% Match", score), Theme::match_score()));
        meta.push(Span::raw("  "));
    }
    if !item.maturity_rating.is_empty() {
        meta.push(Span::styled(format!("[{}]", item.maturity_rating), Theme::rating()));
        meta.push(Span::raw("  "));
    }
    meta.push(Span::styled(
        format::meta_items(item).join("  ·  "),
        Theme::secondary(),
    ));

    let mut lines = vec![
        Line::from(badges),
        Line::from(""),
        Line::from(Span::styled(item.title.to_uppercase(), title_style)),
        Line::from(meta),
    ];
    if !item.genres.is_empty() {
        lines.push(Line::from(Span::styled(
            item.genres.join(" · "),
            Theme::dimmed(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(item.synopsis.clone(), Theme::text())));
    lines
}

fn render_video_badge(carousel: &Carousel, area: Rect, buf: &mut Buffer) {
    let label = if carousel.is_muted() {
        "▶ Trailer (muted)"
    } else {
        "▶ Trailer"
    };
    let width = label.chars().count() as u16;
    let x = area.right().saturating_sub(width + 2);
    buf.set_string(x, area.y + 1, label, Theme::dimmed());
}

fn render_buttons(controls: &HeroControls, buf: &mut Buffer) {
    buf.set_string(controls.play.x, controls.play.y, " ▶ Play ", Theme::button_primary());
    buf.set_string(
        controls.more_info.x,
        controls.more_info.y,
        " ⓘ More Info ",
        Theme::button_secondary(),
    );
}

fn render_controls(controls: &HeroControls, carousel: &Carousel, now: Instant, buf: &mut Buffer) {
    if let Some(rect) = controls.previous {
        buf.set_string(rect.x, rect.y, " ‹ ", Theme::control());
    }
    if let Some(rect) = controls.pause {
        let glyph = if carousel.is_paused() { " ▶ " } else { " ‖ " };
        buf.set_string(rect.x, rect.y, glyph, Theme::control());
    }
    if let Some(rect) = controls.next {
        buf.set_string(rect.x, rect.y, " › ", Theme::control());
    }
    if let Some(rect) = controls.mute {
        let style = if carousel.is_muted() {
            Theme::control().add_modifier(Modifier::CROSSED_OUT)
        } else {
            Theme::control()
        };
        buf.set_string(rect.x, rect.y, " ♪ ", style);
    }

    let current = carousel.current_index();
    let progress = carousel.auto_advance_progress(now).unwrap_or(1.0);
    for (index, dot) in controls.dots.iter().enumerate() {
        if index == current {
            let filled = (f64::from(ACTIVE_DOT_WIDTH) * progress).round() as usize;
            let bar = (0..usize::from(dot.width)).map(|i| {
                if i < filled {
                    ("━", Theme::dot_active())
                } else {
                    ("━", Theme::dot())
                }
            });
            for (offset, (glyph, style)) in bar.enumerate() {
                buf.set_string(dot.x + offset as u16, dot.y, glyph, style);
            }
        } else {
            buf.set_string(dot.x, dot.y, "•", Theme::dot());
        }
    }
}
