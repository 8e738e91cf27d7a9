//! Carousel input bindings
//!
//! Pure mapping from keys and horizontal swipes to carousel commands. Holds
//! no carousel state of its own.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Minimum net horizontal travel (logical px) for a swipe to navigate.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// A carousel operation triggered by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    Previous,
    Next,
    TogglePause,
    ToggleMute,
}

/// Map a key press to a carousel command.
///
/// ArrowLeft/ArrowRight navigate, Space toggles pause, `m`/`M` toggles mute.
pub fn carousel_command(key: &KeyEvent) -> Option<CarouselCommand> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(CarouselCommand::Previous),
        KeyCode::Right => Some(CarouselCommand::Next),
        KeyCode::Char(' ') => Some(CarouselCommand::TogglePause),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(CarouselCommand::ToggleMute),
        _ => None,
    }
}

/// Tracks one touch sequence and decides whether it was a swipe.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start_x: f32,
    end_x: f32,
    swiping: bool,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD_PX)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            start_x: 0.0,
            end_x: 0.0,
            swiping: false,
            threshold,
        }
    }

    pub fn is_swiping(&self) -> bool {
        self.swiping
    }

    pub fn touch_start(&mut self, x: f32) {
        self.start_x = x;
        // A tap without movement must not reuse the previous sequence's end
        self.end_x = x;
        self.swiping = true;
    }

    pub fn touch_move(&mut self, x: f32) {
        if self.swiping {
            self.end_x = x;
        }
    }

    /// Finish the sequence. A leftward swipe means next, rightward previous.
    pub fn touch_end(&mut self) -> Option<CarouselCommand> {
        if !self.swiping {
            return None;
        }
        self.swiping = false;

        let diff = self.start_x - self.end_x;
        if diff.abs() < self.threshold {
            return None;
        }

        if diff > 0.0 {
            Some(CarouselCommand::Next)
        } else {
            Some(CarouselCommand::Previous)
        }
    }

    pub fn cancel(&mut self) {
        self.swiping = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(carousel_command(&key(KeyCode::Left)), Some(CarouselCommand::Previous));
        assert_eq!(carousel_command(&key(KeyCode::Right)), Some(CarouselCommand::Next));
        assert_eq!(
            carousel_command(&key(KeyCode::Char(' '))),
            Some(CarouselCommand::TogglePause)
        );
        assert_eq!(
            carousel_command(&key(KeyCode::Char('m'))),
            Some(CarouselCommand::ToggleMute)
        );
        assert_eq!(
            carousel_command(&KeyEvent::new(KeyCode::Char('M'), KeyModifiers::SHIFT)),
            Some(CarouselCommand::ToggleMute)
        );
        assert_eq!(carousel_command(&key(KeyCode::Char('x'))), None);
        assert_eq!(carousel_command(&key(KeyCode::Up)), None);
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        let ctrl_m = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL);
        assert_eq!(carousel_command(&ctrl_m), None);
    }

    #[test]
    fn test_short_swipe_ignored() {
        let mut swipe = SwipeTracker::default();
        swipe.touch_start(300.0);
        swipe.touch_move(260.0);
        assert_eq!(swipe.touch_end(), None);
        assert!(!swipe.is_swiping());
    }

    #[test]
    fn test_left_swipe_is_next() {
        let mut swipe = SwipeTracker::default();
        swipe.touch_start(300.0);
        swipe.touch_move(230.0);
        assert_eq!(swipe.touch_end(), Some(CarouselCommand::Next));
    }

    #[test]
    fn test_right_swipe_is_previous() {
        let mut swipe = SwipeTracker::default();
        swipe.touch_start(100.0);
        swipe.touch_move(180.0);
        assert_eq!(swipe.touch_end(), Some(CarouselCommand::Previous));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut swipe = SwipeTracker::default();
        swipe.touch_start(100.0);
        swipe.touch_move(50.0);
        assert_eq!(swipe.touch_end(), Some(CarouselCommand::Next));
    }

    #[test]
    fn test_tap_does_not_reuse_previous_end() {
        let mut swipe = SwipeTracker::default();
        swipe.touch_start(300.0);
        swipe.touch_move(100.0);
        swipe.touch_end();

        swipe.touch_start(300.0);
        assert_eq!(swipe.touch_end(), None);
    }

    #[test]
    fn test_end_without_start() {
        let mut swipe = SwipeTracker::default();
        assert_eq!(swipe.touch_end(), None);
    }
}
