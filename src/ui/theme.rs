//! StreamVault theme
//!
//! Color palette and style helpers for the TUI: near-black canvas, a red
//! brand accent, and muted greys for metadata.

use ratatui::style::{Color, Modifier, Style};

/// StreamVault color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #141414
    pub const BACKGROUND: Color = Color::Rgb(0x14, 0x14, 0x14);

    /// Brand: #e50914 (signature red)
    pub const BRAND: Color = Color::Rgb(0xe5, 0x09, 0x14);

    /// Text: #ffffff
    pub const TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);

    /// Secondary text: #b3b3b3
    pub const TEXT_SECONDARY: Color = Color::Rgb(0xb3, 0xb3, 0xb3);

    /// Dim: #6d6d6e
    pub const DIM: Color = Color::Rgb(0x6d, 0x6d, 0x6e);

    /// Match score: #46d369
    pub const MATCH: Color = Color::Rgb(0x46, 0xd3, 0x69);

    /// Top 10 gold: #f5c518
    pub const GOLD: Color = Color::Rgb(0xf5, 0xc5, 0x18);

    /// Error: #ff4d4f
    pub const ERROR: Color = Color::Rgb(0xff, 0x4d, 0x4f);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Card / panel surface
    pub const SURFACE: Color = Color::Rgb(0x23, 0x23, 0x23);

    /// Hero backdrop tint
    pub const BACKDROP: Color = Color::Rgb(0x1f, 0x1a, 0x24);

    /// Hero tint while the trailer plays
    pub const VIDEO: Color = Color::Rgb(0x0b, 0x0b, 0x12);

    /// Skeleton placeholder blocks
    pub const SKELETON: Color = Color::Rgb(0x2f, 0x2f, 0x2f);

    pub const BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Synopsis, subtitles
    pub fn secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    /// Wordmark in the header
    pub fn brand() -> Style {
        Style::default()
            .fg(Self::BRAND)
            .add_modifier(Modifier::BOLD)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// "98% Match"
    pub fn match_score() -> Style {
        Style::default()
            .fg(Self::MATCH)
            .add_modifier(Modifier::BOLD)
    }

    /// Maturity rating box
    pub fn rating() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Original / New badge
    pub fn badge() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::BRAND)
            .add_modifier(Modifier::BOLD)
    }

    /// Top 10 badge and rank numerals
    pub fn top_ten() -> Style {
        Style::default()
            .fg(Self::GOLD)
            .add_modifier(Modifier::BOLD)
    }

    /// Play button (white on dark text)
    pub fn button_primary() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    /// More Info button
    pub fn button_secondary() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::DIM)
    }

    /// Round carousel controls
    pub fn control() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused card / row border
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    /// Progress bar filled portion
    pub fn progress_bar() -> Style {
        Style::default().fg(Self::BRAND).bg(Self::SURFACE)
    }

    /// Progress bar unfilled portion
    pub fn progress_bar_empty() -> Style {
        Style::default().fg(Self::DIM).bg(Self::SURFACE)
    }

    /// Pagination dot
    pub fn dot() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn dot_active() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn card() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    pub fn skeleton() -> Style {
        Style::default().bg(Self::SKELETON)
    }

    /// Style for list items (selected/highlighted)
    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Keybinding description style
    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY).bg(Self::SURFACE)
    }

    /// Loading indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::BRAND)
            .add_modifier(Modifier::BOLD)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colors, 1 (same) to 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("Theme colors should all be RGB")
    }

    #[test]
    fn test_text_contrast_against_background() {
        let bg = rgb(Theme::BACKGROUND);
        assert!(meets_wcag_aa(rgb(Theme::TEXT), bg));
        assert!(meets_wcag_aa(rgb(Theme::TEXT_SECONDARY), bg));
    }

    #[test]
    fn test_accent_contrast_against_background() {
        let bg = rgb(Theme::BACKGROUND);
        for color in [Theme::BRAND, Theme::MATCH, Theme::GOLD, Theme::ERROR] {
            let ratio = contrast_ratio(rgb(color), bg);
            assert!(meets_wcag_aa_large(rgb(color), bg), "{:?} got {:.2}:1", color, ratio);
        }
    }

    #[test]
    fn test_cards_stand_out_from_skeletons() {
        assert_ne!(Theme::SURFACE, Theme::SKELETON);
        assert!(meets_wcag_aa(rgb(Theme::TEXT), rgb(Theme::SURFACE)));
    }

    #[test]
    fn test_contrast_ratio_bounds() {
        assert!((contrast_ratio((0, 0, 0), (255, 255, 255)) - 21.0).abs() < 0.1);
        assert!((contrast_ratio((100, 100, 100), (100, 100, 100)) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_color_to_rgb_rejects_named() {
        assert_eq!(color_to_rgb(Color::Red), None);
        assert_eq!(rgb(Theme::BRAND), (0xe5, 0x09, 0x14));
    }
}
