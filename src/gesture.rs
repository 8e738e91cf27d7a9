//! Drag-to-scroll for content rows
//!
//! Converts raw pointer events into a horizontal scroll offset while keeping
//! ordinary clicks on cards working. A drag that actually moved the row hands
//! back a [`ClickGuard`] so the click that terminates it is swallowed.
//!
//! Distances are logical pixels.

use std::time::{Duration, Instant};

use tracing::debug;

/// Pointer travel is amplified so dragging feels faster than the pointer.
pub const DRAG_MULTIPLIER: f32 = 1.2;

/// Amplified travel beyond which a press counts as a drag rather than a click.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;

/// Slack used when deciding whether the row can scroll further.
pub const BOUNDS_EPSILON_PX: f32 = 2.0;

/// Fraction of the visible width moved by one discrete scroll command.
pub const DEFAULT_SCROLL_AMOUNT: f32 = 0.85;

/// Lifetime of a click guard if no click arrives.
pub const CLICK_GUARD_TTL: Duration = Duration::from_millis(100);

/// Duration of a smooth scroll animation.
pub const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(300);

// =============================================================================
// Gesture State
// =============================================================================

/// Pointer interaction in progress. Neutral (default) outside a drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    pub is_dragging: bool,
    /// Pointer x relative to the container at press time
    pub start_x: f32,
    /// Scroll offset at press time
    pub scroll_origin: f32,
    pub has_moved: bool,
}

/// Which navigation affordances should be shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollBounds {
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
}

impl ScrollBounds {
    pub fn compute(offset: f32, visible_width: f32, total_width: f32) -> Self {
        Self {
            can_scroll_left: offset > BOUNDS_EPSILON_PX,
            can_scroll_right: offset + visible_width < total_width - BOUNDS_EPSILON_PX,
        }
    }
}

// =============================================================================
// Click Suppression
// =============================================================================

/// Suppresses a single click, valid until it expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickGuard {
    expires_at: Instant,
}

impl ClickGuard {
    pub fn new(now: Instant) -> Self {
        Self {
            expires_at: now + CLICK_GUARD_TTL,
        }
    }

    pub fn is_live(&self, now: Instant) -> bool {
        now <= self.expires_at
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}

/// Holder for at most one pending [`ClickGuard`].
#[derive(Debug, Default)]
pub struct ClickSuppressor {
    guard: Option<ClickGuard>,
}

impl ClickSuppressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, guard: ClickGuard) {
        self.guard = Some(guard);
    }

    /// Offer a click. Returns `true` if it must be swallowed. The guard is
    /// consumed either way.
    pub fn intercept(&mut self, now: Instant) -> bool {
        self.guard.take().is_some_and(|g| g.is_live(now))
    }

    /// Drop the guard once it has expired.
    pub fn expire(&mut self, now: Instant) {
        if self.guard.is_some_and(|g| !g.is_live(now)) {
            self.guard = None;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.guard.is_some()
    }
}

// =============================================================================
// Smooth Scrolling
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    fn value_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        let t = (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        // ease-out cubic
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from + (self.to - self.from) * eased
    }

    fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

// =============================================================================
// Row Scroll
// =============================================================================

/// Scroll container model for one content row.
#[derive(Debug, Clone)]
pub struct RowScroll {
    offset: f32,
    visible_width: f32,
    total_width: f32,
    /// Left edge of the container in pointer coordinates
    container_left: f32,
    scroll_amount: f32,
    snap_interval: Option<f32>,
    snap_enabled: bool,
    gesture: GestureState,
    bounds: ScrollBounds,
    animation: Option<ScrollAnimation>,
}

impl Default for RowScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl RowScroll {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            visible_width: 0.0,
            total_width: 0.0,
            container_left: 0.0,
            scroll_amount: DEFAULT_SCROLL_AMOUNT,
            snap_interval: None,
            snap_enabled: true,
            gesture: GestureState::default(),
            bounds: ScrollBounds::default(),
            animation: None,
        }
    }

    /// Fraction of the visible width moved by `scroll_left`/`scroll_right`.
    pub fn with_scroll_amount(mut self, amount: f32) -> Self {
        self.scroll_amount = amount;
        self
    }

    /// Snap resting positions to multiples of `interval` (one card stride).
    pub fn with_snap_interval(mut self, interval: f32) -> Self {
        self.snap_interval = (interval > 0.0).then_some(interval);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn visible_width(&self) -> f32 {
        self.visible_width
    }

    pub fn total_width(&self) -> f32 {
        self.total_width
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging
    }

    pub fn bounds(&self) -> ScrollBounds {
        self.bounds
    }

    pub fn can_scroll_left(&self) -> bool {
        self.bounds.can_scroll_left
    }

    pub fn can_scroll_right(&self) -> bool {
        self.bounds.can_scroll_right
    }

    pub fn is_snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn max_offset(&self) -> f32 {
        (self.total_width - self.visible_width).max(0.0)
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Container moved or resized, or its content changed.
    pub fn on_resize(&mut self, container_left: f32, visible_width: f32, total_width: f32) {
        self.container_left = container_left;
        self.visible_width = visible_width.max(0.0);
        self.total_width = total_width.max(0.0);
        self.set_offset(self.offset);
    }

    /// Jump to `offset` (clamped) and refresh the bounds.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_offset());
        self.on_scroll();
    }

    /// Scroll observer: recompute the navigation affordances.
    fn on_scroll(&mut self) {
        self.bounds = ScrollBounds::compute(self.offset, self.visible_width, self.total_width);
    }

    fn snapped(&self, offset: f32) -> f32 {
        match self.snap_interval {
            Some(step) if self.snap_enabled => {
                ((offset / step).round() * step).clamp(0.0, self.max_offset())
            }
            _ => offset.clamp(0.0, self.max_offset()),
        }
    }

    // -------------------------------------------------------------------------
    // Pointer Events
    // -------------------------------------------------------------------------

    pub fn on_pointer_down(&mut self, pointer_x: f32) {
        self.animation = None;
        self.gesture = GestureState {
            is_dragging: true,
            start_x: pointer_x - self.container_left,
            scroll_origin: self.offset,
            has_moved: false,
        };
        self.snap_enabled = false;
    }

    pub fn on_pointer_move(&mut self, pointer_x: f32) {
        if !self.gesture.is_dragging {
            return;
        }

        let x = pointer_x - self.container_left;
        let walk = (x - self.gesture.start_x) * DRAG_MULTIPLIER;

        if walk.abs() > DRAG_THRESHOLD_PX {
            self.gesture.has_moved = true;
        }

        self.set_offset(self.gesture.scroll_origin - walk);
    }

    /// End the drag. Returns a guard when the drag moved the row, so the
    /// click produced by this release can be swallowed.
    pub fn on_pointer_up(&mut self, now: Instant) -> Option<ClickGuard> {
        if !self.gesture.is_dragging {
            return None;
        }

        let moved = self.gesture.has_moved;
        self.gesture = GestureState::default();
        self.snap_enabled = true;

        let target = self.snapped(self.offset);
        if (target - self.offset).abs() > f32::EPSILON {
            self.animate_to(target, now);
        }

        if moved {
            debug!(offset = self.offset, "row drag ended, suppressing click");
            Some(ClickGuard::new(now))
        } else {
            None
        }
    }

    /// Pointer left the row. Ends a drag in progress like a release would.
    pub fn on_pointer_leave(&mut self, now: Instant) -> Option<ClickGuard> {
        if self.gesture.is_dragging {
            self.on_pointer_up(now)
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // Discrete Scrolling
    // -------------------------------------------------------------------------

    pub fn scroll_left(&mut self, now: Instant) {
        let distance = self.visible_width * self.scroll_amount;
        self.scroll_by(-distance, now);
    }

    pub fn scroll_right(&mut self, now: Instant) {
        let distance = self.visible_width * self.scroll_amount;
        self.scroll_by(distance, now);
    }

    fn scroll_by(&mut self, delta: f32, now: Instant) {
        let target = self.snapped(self.offset + delta);
        self.animate_to(target, now);
    }

    fn animate_to(&mut self, target: f32, now: Instant) {
        self.animation = Some(ScrollAnimation {
            from: self.offset,
            to: target,
            started: now,
            duration: SMOOTH_SCROLL_DURATION,
        });
    }

    /// Advance a running smooth scroll. Returns `true` if the offset changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };

        let before = self.offset;
        self.set_offset(animation.value_at(now));
        if animation.is_finished(now) {
            self.animation = None;
        }
        (self.offset - before).abs() > f32::EPSILON
    }

    /// Make sure the span `[start, end)` is within the viewport.
    pub fn reveal(&mut self, start: f32, end: f32, now: Instant) {
        let target = if start < self.offset {
            start
        } else if end > self.offset + self.visible_width {
            end - self.visible_width
        } else {
            return;
        };
        self.animate_to(target.clamp(0.0, self.max_offset()), now);
    }
}
