//! Hero carousel state machine
//!
//! Owns which slide is current, whether auto-advance is running, and the
//! delayed trailer start. All time flows in through explicit `now` arguments;
//! the UI loop calls [`Carousel::tick`] and deadlines fire from there.
//!
//! ```text
//!   Idle(i) --go_to(j)--> Transitioning(i -> j) --600ms--> Idle(j)
//! ```
//!
//! Three timer slots, one per concern:
//! - auto-advance: `auto_rotate_interval` after the last slide change or resume
//! - transition lock: 600ms after a slide change
//! - video delay: 2000ms after mount or the last slide change

use std::time::{Duration, Instant};

use tracing::debug;

use crate::timer::TimerSlot;

/// Window after a slide change during which further navigation is ignored.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(600);

/// Delay between a slide settling and its trailer being allowed to play.
pub const VIDEO_DELAY: Duration = Duration::from_millis(2000);

/// Default auto-advance interval (8 seconds).
pub const DEFAULT_AUTO_ROTATE_INTERVAL: Duration = Duration::from_millis(8000);

// =============================================================================
// Pause Reasons
// =============================================================================

/// Independent reasons the carousel may be paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    /// Pause button or Space
    Manual,
    /// Pointer is over the carousel
    Hover,
    /// Less than the visibility threshold is on screen
    OffScreen,
}

/// Set of active pause reasons. The carousel is paused if any is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseReasons {
    pub manual: bool,
    pub hover: bool,
    pub off_screen: bool,
}

impl PauseReasons {
    pub fn any(&self) -> bool {
        self.manual || self.hover || self.off_screen
    }

    pub fn get(&self, reason: PauseReason) -> bool {
        match reason {
            PauseReason::Manual => self.manual,
            PauseReason::Hover => self.hover,
            PauseReason::OffScreen => self.off_screen,
        }
    }

    fn set(&mut self, reason: PauseReason, paused: bool) {
        match reason {
            PauseReason::Manual => self.manual = paused,
            PauseReason::Hover => self.hover = paused,
            PauseReason::OffScreen => self.off_screen = paused,
        }
    }
}

// =============================================================================
// Public State
// =============================================================================

/// Snapshot of the carousel as the presentation layer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub current_index: usize,
    pub previous_index: Option<usize>,
    pub is_paused: bool,
    pub is_muted: bool,
    pub show_video: bool,
    pub is_transitioning: bool,
}

/// Coarse phase of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle(usize),
    Transitioning { from: usize, to: usize },
}

/// Something that happened while deadlines were processed in [`Carousel::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// Auto-advance moved to another slide
    SlideChanged { from: usize, to: usize },
    /// The transition lock was released
    TransitionEnded,
    /// The current slide's trailer may start
    VideoReady,
}

/// Construction options.
#[derive(Debug, Clone)]
pub struct CarouselOptions {
    pub total_slides: usize,
    pub auto_rotate_interval: Duration,
    pub enabled: bool,
}

impl CarouselOptions {
    /// Options for `total_slides` slides; auto-advance is enabled when there is
    /// more than one.
    pub fn new(total_slides: usize) -> Self {
        Self {
            total_slides,
            auto_rotate_interval: DEFAULT_AUTO_ROTATE_INTERVAL,
            enabled: total_slides > 1,
        }
    }

    pub fn auto_rotate_interval(mut self, interval: Duration) -> Self {
        self.auto_rotate_interval = interval;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Order matters: at equal deadlines the lock is released before auto-advance
/// tries to navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Concern {
    TransitionLock,
    VideoDelay,
    AutoAdvance,
}

#[derive(Debug, Clone, Default)]
struct CarouselTimers {
    auto_advance: TimerSlot,
    transition_lock: TimerSlot,
    video_delay: TimerSlot,
}

impl CarouselTimers {
    fn slot(&self, concern: Concern) -> &TimerSlot {
        match concern {
            Concern::TransitionLock => &self.transition_lock,
            Concern::VideoDelay => &self.video_delay,
            Concern::AutoAdvance => &self.auto_advance,
        }
    }

    fn slot_mut(&mut self, concern: Concern) -> &mut TimerSlot {
        match concern {
            Concern::TransitionLock => &mut self.transition_lock,
            Concern::VideoDelay => &mut self.video_delay,
            Concern::AutoAdvance => &mut self.auto_advance,
        }
    }

    /// Consume the earliest elapsed deadline across all slots.
    fn fire_next(&mut self, now: Instant) -> Option<(Instant, Concern)> {
        let (_, concern) = [Concern::TransitionLock, Concern::VideoDelay, Concern::AutoAdvance]
            .into_iter()
            .filter_map(|c| self.slot(c).due(now).map(|at| (at, c)))
            .min()?;
        let at = self.slot_mut(concern).fire(now)?;
        Some((at, concern))
    }

    fn cancel_all(&mut self) {
        self.auto_advance.cancel();
        self.transition_lock.cancel();
        self.video_delay.cancel();
    }
}

// =============================================================================
// Carousel
// =============================================================================

/// Hero carousel interaction model.
#[derive(Debug, Clone)]
pub struct Carousel {
    total: usize,
    interval: Duration,
    enabled: bool,

    current: usize,
    previous: Option<usize>,
    pause: PauseReasons,
    muted: bool,
    show_video: bool,
    transitioning: bool,
    mounted: bool,

    timers: CarouselTimers,
}

impl Carousel {
    /// Mount a carousel at `now`: slide 0 is current, the initial video delay
    /// is armed and auto-advance starts if applicable.
    pub fn mount(options: CarouselOptions, now: Instant) -> Self {
        let mut carousel = Self {
            total: options.total_slides,
            // An interval shorter than the transition window could only ever
            // hit the lock; keep it at least that long.
            interval: options.auto_rotate_interval.max(TRANSITION_DURATION),
            enabled: options.enabled,
            current: 0,
            previous: None,
            pause: PauseReasons::default(),
            muted: true,
            show_video: false,
            transitioning: false,
            mounted: true,
            timers: CarouselTimers::default(),
        };

        carousel.timers.video_delay.arm(now, VIDEO_DELAY);
        carousel.sync_auto_advance(now);
        carousel
    }

    /// Cancel every pending timer. The carousel is inert afterwards.
    pub fn unmount(&mut self) {
        self.timers.cancel_all();
        self.mounted = false;
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> CarouselState {
        CarouselState {
            current_index: self.current,
            previous_index: self.previous,
            is_paused: self.is_paused(),
            is_muted: self.muted,
            show_video: self.show_video,
            is_transitioning: self.transitioning,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.previous {
            Some(from) if self.transitioning => Phase::Transitioning {
                from,
                to: self.current,
            },
            _ => Phase::Idle(self.current),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.previous
    }

    pub fn total_slides(&self) -> usize {
        self.total
    }

    pub fn auto_rotate_interval(&self) -> Duration {
        self.interval
    }

    pub fn is_paused(&self) -> bool {
        self.pause.any()
    }

    pub fn pause_reasons(&self) -> PauseReasons {
        self.pause
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn show_video(&self) -> bool {
        self.show_video
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether an auto-advance timer is currently armed.
    pub fn is_auto_advancing(&self) -> bool {
        self.timers.auto_advance.is_armed()
    }

    /// Fraction (0.0..=1.0) of the auto-advance interval that has elapsed,
    /// `None` while auto-advance is not armed.
    pub fn auto_advance_progress(&self, now: Instant) -> Option<f64> {
        let remaining = self.timers.auto_advance.remaining(now)?;
        let total = self.interval.as_secs_f64();
        Some((1.0 - remaining.as_secs_f64() / total).clamp(0.0, 1.0))
    }

    /// Earliest pending deadline, used by the UI loop to size its poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.timers.auto_advance.deadline(),
            self.timers.transition_lock.deadline(),
            self.timers.video_delay.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Arm counts of (auto-advance, transition lock, video delay).
    pub fn timer_generations(&self) -> (u64, u64, u64) {
        (
            self.timers.auto_advance.generation(),
            self.timers.transition_lock.generation(),
            self.timers.video_delay.generation(),
        )
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Move to slide `index`. Returns `false` when the call was a no-op.
    pub fn go_to(&mut self, index: usize, now: Instant) -> bool {
        if !self.mounted
            || self.total <= 1
            || index >= self.total
            || index == self.current
            || self.transitioning
        {
            return false;
        }

        debug!(from = self.current, to = index, "carousel slide change");

        self.transitioning = true;
        self.previous = Some(self.current);
        self.show_video = false;
        self.current = index;

        self.timers.transition_lock.arm(now, TRANSITION_DURATION);
        self.timers.video_delay.arm(now, VIDEO_DELAY);
        self.sync_auto_advance(now);
        true
    }

    pub fn go_to_next(&mut self, now: Instant) -> bool {
        if self.total == 0 {
            return false;
        }
        let next = (self.current + 1) % self.total;
        self.go_to(next, now)
    }

    pub fn go_to_previous(&mut self, now: Instant) -> bool {
        if self.total == 0 {
            return false;
        }
        let prev = (self.current + self.total - 1) % self.total;
        self.go_to(prev, now)
    }

    // -------------------------------------------------------------------------
    // Pause / Mute
    // -------------------------------------------------------------------------

    pub fn toggle_pause(&mut self, now: Instant) {
        let paused = !self.pause.manual;
        self.set_pause_reason(PauseReason::Manual, paused, now);
    }

    pub fn pause(&mut self, now: Instant) {
        self.set_pause_reason(PauseReason::Manual, true, now);
    }

    pub fn resume(&mut self, now: Instant) {
        self.set_pause_reason(PauseReason::Manual, false, now);
    }

    pub fn pause_for(&mut self, reason: PauseReason, now: Instant) {
        self.set_pause_reason(reason, true, now);
    }

    pub fn resume_for(&mut self, reason: PauseReason, now: Instant) {
        self.set_pause_reason(reason, false, now);
    }

    fn set_pause_reason(&mut self, reason: PauseReason, paused: bool, now: Instant) {
        let was_paused = self.is_paused();
        self.pause.set(reason, paused);

        // Only a change of the effective flag touches the schedule; a second
        // reason piling on must not restart the countdown.
        if was_paused != self.is_paused() {
            debug!(?reason, paused = self.is_paused(), "carousel pause state");
            self.sync_auto_advance(now);
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Override the video flag, e.g. to hide the layer once a trailer ends.
    pub fn set_show_video(&mut self, show: bool) {
        self.show_video = show;
    }

    // -------------------------------------------------------------------------
    // Configuration changes
    // -------------------------------------------------------------------------

    /// Replace the slide count (new items loaded). The current index is reset
    /// when it no longer fits.
    pub fn set_total_slides(&mut self, total: usize, now: Instant) {
        if total == self.total {
            return;
        }
        self.total = total;
        if self.current >= total {
            self.current = 0;
            self.previous = None;
        }
        if self.previous.is_some_and(|p| p >= total) {
            self.previous = None;
        }
        self.sync_auto_advance(now);
    }

    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        if enabled != self.enabled {
            self.enabled = enabled;
            self.sync_auto_advance(now);
        }
    }

    /// Tear down and, when applicable, rearm the auto-advance timer.
    fn sync_auto_advance(&mut self, now: Instant) {
        self.timers.auto_advance.cancel();
        if self.mounted && self.enabled && !self.is_paused() && self.total > 1 {
            self.timers.auto_advance.arm(now, self.interval);
        }
    }

    // -------------------------------------------------------------------------
    // Deadlines
    // -------------------------------------------------------------------------

    /// Fire every deadline that has elapsed by `now`, in deadline order.
    pub fn tick(&mut self, now: Instant) -> Vec<CarouselEvent> {
        let mut events = Vec::new();

        while let Some((at, concern)) = self.timers.fire_next(now) {
            match concern {
                Concern::TransitionLock => {
                    self.transitioning = false;
                    events.push(CarouselEvent::TransitionEnded);
                }
                Concern::VideoDelay => {
                    self.show_video = true;
                    events.push(CarouselEvent::VideoReady);
                }
                Concern::AutoAdvance => {
                    let from = self.current;
                    if self.go_to_next(at) {
                        events.push(CarouselEvent::SlideChanged {
                            from,
                            to: self.current,
                        });
                    } else {
                        // Rejected (e.g. slide count changed under us): keep
                        // the rotation alive instead of stalling.
                        self.sync_auto_advance(at);
                    }
                }
            }
        }

        events
    }
}
