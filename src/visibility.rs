//! Threshold visibility observer
//!
//! Reports when an element crosses a visible-fraction threshold, the way an
//! intersection observer does: once initially, then only on crossings.

/// Fraction of the carousel that must be on screen for it to count as visible.
pub const CAROUSEL_VISIBILITY_THRESHOLD: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f32,
    visible: Option<bool>,
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(CAROUSEL_VISIBILITY_THRESHOLD)
    }
}

impl VisibilityObserver {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            visible: None,
        }
    }

    /// Last reported state, `None` before the first observation.
    pub fn is_visible(&self) -> Option<bool> {
        self.visible
    }

    /// Feed the current visible fraction. Returns the new state when it
    /// changed (always on the first call).
    pub fn observe(&mut self, ratio: f32) -> Option<bool> {
        let visible = ratio > 0.0 && ratio >= self.threshold;
        if self.visible == Some(visible) {
            return None;
        }
        self.visible = Some(visible);
        Some(visible)
    }

    /// Stop observing; the next observation reports again.
    pub fn disconnect(&mut self) {
        self.visible = None;
    }
}

/// Visible fraction of a span `[start, start + len)` within a viewport
/// `[0, viewport)` along one axis.
pub fn visible_fraction(start: i32, len: u16, viewport: u16) -> f32 {
    if len == 0 {
        return 0.0;
    }
    let end = start + i32::from(len);
    let shown = end.min(i32::from(viewport)) - start.max(0);
    (shown.max(0) as f32 / f32::from(len)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_always_reports() {
        let mut observer = VisibilityObserver::default();
        assert_eq!(observer.observe(1.0), Some(true));

        let mut observer = VisibilityObserver::default();
        assert_eq!(observer.observe(0.0), Some(false));
    }

    #[test]
    fn test_reports_only_on_crossing() {
        let mut observer = VisibilityObserver::default();
        observer.observe(1.0);
        assert_eq!(observer.observe(0.8), None);
        assert_eq!(observer.observe(0.31), None);
        assert_eq!(observer.observe(0.29), Some(false));
        assert_eq!(observer.observe(0.1), None);
        assert_eq!(observer.observe(0.3), Some(true));
    }

    #[test]
    fn test_disconnect_resets() {
        let mut observer = VisibilityObserver::default();
        observer.observe(1.0);
        observer.disconnect();
        assert_eq!(observer.is_visible(), None);
        assert_eq!(observer.observe(1.0), Some(true));
    }

    #[test]
    fn test_visible_fraction() {
        assert_eq!(visible_fraction(0, 10, 40), 1.0);
        assert_eq!(visible_fraction(-5, 10, 40), 0.5);
        assert_eq!(visible_fraction(-10, 10, 40), 0.0);
        assert_eq!(visible_fraction(35, 10, 40), 0.5);
        assert_eq!(visible_fraction(0, 0, 40), 0.0);
    }
}
