//! App state and core application logic
//!
//! Manages the screen state machine, navigation stack, home screen focus and
//! the interaction models behind it (hero carousel, row scrollers, swipe and
//! visibility tracking). The app never performs I/O: loads are queued as
//! [`Action`]s for the event loop and their results come back as
//! [`AppEvent`]s.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info};

use crate::carousel::{
    Carousel, CarouselEvent, CarouselOptions, PauseReason, DEFAULT_AUTO_ROTATE_INTERVAL,
};
use crate::gesture::{ClickSuppressor, RowScroll};
use crate::input::{carousel_command, CarouselCommand, SwipeTracker};
use crate::models::{CatalogStats, ContentCardItem, ContentRow, Film, HeroItem, MediaType};
use crate::ui::layout::{
    self, column_to_px, HeroControls, HeroHit, HomeLayout, RowGeometry,
};
use crate::visibility::{visible_fraction, VisibilityObserver};

/// Redraw cadence while the auto-advance progress fill is moving
const PROGRESS_FRAME: Duration = Duration::from_millis(100);

/// Redraw cadence while a row is animating
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Lines scrolled per mouse wheel notch
const WHEEL_LINES: u16 = 3;

/// Admin lines that are not film rows (stats, search box, borders, header)
pub const ADMIN_CHROME_LINES: u16 = 8;

// =============================================================================
// App State Enum
// =============================================================================

/// Application state enum representing current screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppState {
    /// Hero carousel and content rows
    #[default]
    Home,
    /// More info about the selected title
    Detail,
    /// Playback placeholder
    Watch { content_id: String },
    /// Catalogue administration
    Admin,
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (admin search box focused)
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
    /// Error with message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if visible_height > 0 && self.selected >= self.offset + visible_height {
            self.offset = self.selected - visible_height + 1;
        }
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Single-line text input; the cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

// =============================================================================
// View-Specific State
// =============================================================================

/// What has keyboard focus on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeFocus {
    #[default]
    Hero,
    Row { row: usize, card: usize },
}

/// Element that owns the pointer between press and release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerTarget {
    Hero { start: Position },
    Row(usize),
}

/// Title opened in the detail view
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Hero(HeroItem),
    Card(ContentCardItem),
}

impl Selection {
    pub fn id(&self) -> &str {
        match self {
            Selection::Hero(item) => &item.id,
            Selection::Card(card) => &card.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Selection::Hero(item) => &item.title,
            Selection::Card(card) => &card.title,
        }
    }
}

/// Admin screen state
#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub films: Vec<Film>,
    pub stats: CatalogStats,
    pub list: ListState,
    /// Title search
    pub search: TextInput,
    /// `None` shows every media type
    pub type_filter: Option<MediaType>,
    /// Film awaiting delete confirmation
    pub confirm_delete: Option<i64>,
    pub loading: LoadingState,
}

impl AdminState {
    /// Films matching the search and type filter
    pub fn visible_films(&self) -> Vec<&Film> {
        let query = self.search.value.trim().to_lowercase();
        self.films
            .iter()
            .filter(|f| self.type_filter.map_or(true, |t| f.fields.media_type == t))
            .filter(|f| query.is_empty() || f.fields.title.to_lowercase().contains(&query))
            .collect()
    }

    pub fn selected_film(&self) -> Option<&Film> {
        self.visible_films().get(self.list.selected).copied()
    }

    /// All, then movies, then TV
    pub fn cycle_type_filter(&mut self) {
        self.type_filter = match self.type_filter {
            None => Some(MediaType::Movie),
            Some(MediaType::Movie) => Some(MediaType::Tv),
            Some(MediaType::Tv) => None,
        };
        self.refresh_list();
    }

    fn refresh_list(&mut self) {
        let len = self.visible_films().len();
        self.list.set_len(len);
    }
}

// =============================================================================
// Async Plumbing
// =============================================================================

/// Work the event loop should run on the app's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch hero slides and content rows
    LoadHome,
    /// Fetch catalogue films and counters
    LoadAdmin,
    DeleteFilm(i64),
}

/// Result of an [`Action`], delivered back to the UI loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    HeroLoaded(Vec<HeroItem>),
    RowsLoaded(Vec<ContentRow>),
    AdminLoaded {
        films: Vec<Film>,
        stats: CatalogStats,
    },
    FilmDeleted(i64),
    Failed(String),
}

/// Whether a trailer reference can be handed to a player
fn is_playable(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current state/screen
    pub state: AppState,
    /// Navigation history stack
    pub nav_stack: Vec<AppState>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Global error message
    pub error: Option<String>,

    // Home screen
    pub hero_items: Vec<HeroItem>,
    pub hero_loading: LoadingState,
    pub carousel: Option<Carousel>,
    pub rows: Vec<ContentRow>,
    pub rows_loading: LoadingState,
    /// One scroller per entry of `rows`
    pub row_scrolls: Vec<RowScroll>,
    pub focus: HomeFocus,
    /// Vertical page scroll in lines
    pub page_scroll: u16,
    pub layout: HomeLayout,
    /// Hero ids whose trailer failed to load
    pub failed_trailers: HashSet<String>,
    auto_rotate_interval: Duration,
    swipe: SwipeTracker,
    visibility: VisibilityObserver,
    suppressor: ClickSuppressor,
    pointer: Option<PointerTarget>,
    hero_hovered: bool,

    // Other screens
    pub detail: Option<Selection>,
    pub admin: AdminState,

    pending: Vec<Action>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_ROTATE_INTERVAL)
    }
}

impl App {
    /// Create a new App instance
    pub fn new(auto_rotate_interval: Duration) -> Self {
        Self {
            state: AppState::Home,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            error: None,

            hero_items: Vec::new(),
            hero_loading: LoadingState::Idle,
            carousel: None,
            rows: Vec::new(),
            rows_loading: LoadingState::Idle,
            row_scrolls: Vec::new(),
            focus: HomeFocus::Hero,
            page_scroll: 0,
            layout: HomeLayout::default(),
            failed_trailers: HashSet::new(),
            auto_rotate_interval,
            swipe: SwipeTracker::default(),
            visibility: VisibilityObserver::default(),
            suppressor: ClickSuppressor::new(),
            pointer: None,
            hero_hovered: false,

            detail: None,
            admin: AdminState::default(),

            pending: Vec::new(),
        }
    }

    /// Navigate to a new state, pushing current to stack
    pub fn navigate(&mut self, state: AppState) {
        if self.state != state {
            self.nav_stack.push(self.state.clone());
            self.state = state;
        }
        self.input_mode = InputMode::Normal;
    }

    /// Go back to previous state
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            self.state = prev;
            true
        } else {
            false
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.unmount();
        }
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Drain the queued actions.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    /// Queue a home reload; hero and rows show skeletons until it lands.
    pub fn request_home(&mut self) {
        self.hero_loading = LoadingState::Loading(Some("Loading featured titles".into()));
        self.rows_loading = LoadingState::Loading(None);
        self.pending.push(Action::LoadHome);
    }

    pub fn request_admin(&mut self) {
        self.admin.loading = LoadingState::Loading(Some("Loading catalogue".into()));
        self.pending.push(Action::LoadAdmin);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn current_hero(&self) -> Option<&HeroItem> {
        let index = self.carousel.as_ref().map_or(0, Carousel::current_index);
        self.hero_items.get(index)
    }

    /// Whether the trailer layer is shown over the current backdrop
    pub fn video_visible(&self) -> bool {
        let Some(carousel) = self.carousel.as_ref() else {
            return false;
        };
        carousel.show_video()
            && self.current_hero().is_some_and(|item| {
                item.trailer_url.is_some() && !self.failed_trailers.contains(&item.id)
            })
    }

    /// Live-region announcement for the current slide
    pub fn hero_status(&self) -> Option<String> {
        let item = self.current_hero()?;
        let index = self.carousel.as_ref().map_or(0, Carousel::current_index);
        Some(format!(
            "Now showing: {}. Slide {} of {}.",
            item.title,
            index + 1,
            self.hero_items.len()
        ))
    }

    pub fn focused_card(&self) -> Option<&ContentCardItem> {
        match self.focus {
            HomeFocus::Row { row, card } => self.rows.get(row)?.items.card(card),
            HomeFocus::Hero => None,
        }
    }

    pub fn is_hero_hovered(&self) -> bool {
        self.hero_hovered
    }

    pub fn hero_controls(&self) -> HeroControls {
        let total = self.hero_items.len();
        let current = self.carousel.as_ref().map_or(0, Carousel::current_index);
        let has_trailer = self
            .current_hero()
            .is_some_and(|item| item.trailer_url.is_some());
        HeroControls::compute(self.layout.hero, total, current, has_trailer)
    }

    // -------------------------------------------------------------------------
    // Async Results
    // -------------------------------------------------------------------------

    pub fn apply(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::HeroLoaded(items) => self.set_hero_items(items, now),
            AppEvent::RowsLoaded(rows) => {
                info!(rows = rows.len(), "content rows loaded");
                self.row_scrolls = rows.iter().map(|_| RowScroll::new()).collect();
                self.rows = rows;
                self.rows_loading = LoadingState::Idle;
                self.focus = HomeFocus::Hero;
                self.relayout();
            }
            AppEvent::AdminLoaded { films, stats } => {
                info!(films = films.len(), "catalogue loaded");
                self.admin.films = films;
                self.admin.stats = stats;
                self.admin.loading = LoadingState::Idle;
                self.admin.refresh_list();
            }
            AppEvent::FilmDeleted(id) => {
                if let Some(pos) = self.admin.films.iter().position(|f| f.id == id) {
                    let film = self.admin.films.remove(pos);
                    match film.fields.media_type {
                        MediaType::Movie => self.admin.stats.movies -= 1,
                        MediaType::Tv => self.admin.stats.tv_shows -= 1,
                    }
                }
                self.admin.refresh_list();
            }
            AppEvent::Failed(message) => {
                if self.hero_loading.is_loading() {
                    self.hero_loading = LoadingState::Idle;
                }
                if self.rows_loading.is_loading() {
                    self.rows_loading = LoadingState::Idle;
                }
                if self.admin.loading.is_loading() {
                    self.admin.loading = LoadingState::Error(message.clone());
                }
                self.set_error(message);
            }
        }
        self.sync_visibility(now);
    }

    /// Replace the slides and remount the carousel.
    pub fn set_hero_items(&mut self, items: Vec<HeroItem>, now: Instant) {
        info!(slides = items.len(), "hero slides loaded");
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.unmount();
        }
        let options =
            CarouselOptions::new(items.len()).auto_rotate_interval(self.auto_rotate_interval);
        let mut carousel = Carousel::mount(options, now);
        if self.visibility.is_visible() == Some(false) {
            carousel.pause_for(PauseReason::OffScreen, now);
        }
        if self.hero_hovered {
            carousel.pause_for(PauseReason::Hover, now);
        }
        self.carousel = Some(carousel);
        self.hero_items = items;
        self.failed_trailers.clear();
        self.hero_loading = LoadingState::Idle;
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Terminal resized (or content changed): recompute the page layout.
    pub fn resize(&mut self, area: Rect, now: Instant) {
        let (_, viewport, _) = layout::page_areas(area);
        self.layout.viewport = viewport;
        self.relayout();
        self.sync_visibility(now);
    }

    fn relayout(&mut self) {
        self.layout = HomeLayout::compute(self.layout.viewport, &self.rows);
        self.page_scroll = self.page_scroll.min(self.layout.max_scroll());

        for geometry in &self.layout.rows {
            let Some(scroll) = self.row_scrolls.get_mut(geometry.row) else {
                continue;
            };
            let track = geometry.track();
            *scroll = std::mem::take(scroll)
                .with_snap_interval(column_to_px(geometry.stride()));
            scroll.on_resize(
                column_to_px(self.layout.screen_x(track.x)),
                column_to_px(track.width),
                column_to_px(geometry.content_width()),
            );
        }

        if let HomeFocus::Row { row, .. } = self.focus {
            if self.layout.geometry_for(row).is_none() {
                self.focus = HomeFocus::Hero;
            }
        }
    }

    /// Feed the hero's visible fraction to the off-screen pause reason.
    /// The hero counts as off screen whenever home is not displayed.
    fn sync_visibility(&mut self, now: Instant) {
        let on_home = self.state == AppState::Home;
        if !on_home && self.hero_hovered {
            self.set_hero_hover(false, now);
        }

        let ratio = if on_home {
            visible_fraction(
                self.layout.hero_screen_top(self.page_scroll),
                self.layout.hero.height,
                self.layout.viewport.height,
            )
        } else {
            0.0
        };

        if let Some(visible) = self.visibility.observe(ratio) {
            debug!(visible, ratio, "hero visibility changed");
            if let Some(carousel) = self.carousel.as_mut() {
                if visible {
                    carousel.resume_for(PauseReason::OffScreen, now);
                } else {
                    carousel.pause_for(PauseReason::OffScreen, now);
                }
            }
        }
    }

    fn set_hero_hover(&mut self, hovered: bool, now: Instant) {
        if self.hero_hovered == hovered {
            return;
        }
        self.hero_hovered = hovered;
        if let Some(carousel) = self.carousel.as_mut() {
            if hovered {
                carousel.pause_for(PauseReason::Hover, now);
            } else {
                carousel.resume_for(PauseReason::Hover, now);
            }
        }
    }

    fn set_page_scroll(&mut self, scroll: u16) {
        self.page_scroll = scroll.min(self.layout.max_scroll());
    }

    // -------------------------------------------------------------------------
    // Timers
    // -------------------------------------------------------------------------

    /// Fire due deadlines. Returns `true` when the screen needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut dirty = false;

        let events = self
            .carousel
            .as_mut()
            .map(|c| c.tick(now))
            .unwrap_or_default();
        for event in events {
            dirty = true;
            match event {
                CarouselEvent::SlideChanged { from, to } => {
                    debug!(from, to, "hero auto-advanced");
                }
                CarouselEvent::TransitionEnded => {}
                CarouselEvent::VideoReady => self.start_trailer(),
            }
        }

        for scroll in &mut self.row_scrolls {
            dirty |= scroll.tick(now);
        }

        if self.suppressor.is_armed() {
            self.suppressor.expire(now);
        }

        if self.state == AppState::Home
            && self
                .carousel
                .as_ref()
                .is_some_and(Carousel::is_auto_advancing)
        {
            dirty = true;
        }

        dirty
    }

    /// A trailer that cannot be handed to a player hides the video layer for
    /// that slide; the backdrop stays.
    fn start_trailer(&mut self) {
        let Some(item) = self.current_hero() else {
            return;
        };
        let Some(url) = item.trailer_url.as_deref() else {
            return;
        };
        if is_playable(url) {
            debug!(title = %item.title, "trailer started");
            return;
        }

        debug!(title = %item.title, url, "trailer failed to load, keeping backdrop");
        let id = item.id.clone();
        self.failed_trailers.insert(id);
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.set_show_video(false);
        }
    }

    /// When the event loop should wake up next.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let mut deadlines = Vec::new();

        if let Some(carousel) = self.carousel.as_ref() {
            deadlines.extend(carousel.next_deadline());
            if self.state == AppState::Home && carousel.is_auto_advancing() {
                deadlines.push(now + PROGRESS_FRAME);
            }
        }
        if self.row_scrolls.iter().any(RowScroll::is_animating) {
            deadlines.push(now + ANIMATION_FRAME);
        }
        if self.suppressor.is_armed() {
            deadlines.push(now + ANIMATION_FRAME);
        }

        deadlines.into_iter().min()
    }

    // -------------------------------------------------------------------------
    // Carousel Commands
    // -------------------------------------------------------------------------

    fn run_command(&mut self, command: CarouselCommand, now: Instant) {
        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        match command {
            CarouselCommand::Previous => {
                carousel.go_to_previous(now);
            }
            CarouselCommand::Next => {
                carousel.go_to_next(now);
            }
            CarouselCommand::TogglePause => carousel.toggle_pause(now),
            CarouselCommand::ToggleMute => carousel.toggle_mute(),
        }
    }

    fn open_watch(&mut self, content_id: String) {
        info!(content_id = %content_id, "opening watch screen");
        self.navigate(AppState::Watch { content_id });
    }

    fn open_detail(&mut self, selection: Selection) {
        self.detail = Some(selection);
        self.navigate(AppState::Detail);
    }

    fn open_admin(&mut self) {
        self.navigate(AppState::Admin);
        self.request_admin();
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        let consumed = if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key, now)
        };
        self.sync_visibility(now);
        consumed
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        let search = &mut self.admin.search;
        match key.code {
            KeyCode::Esc => {
                search.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Char(c) => search.insert(c),
            KeyCode::Backspace => search.backspace(),
            KeyCode::Delete => search.delete(),
            KeyCode::Left => search.cursor_left(),
            KeyCode::Right => search.cursor_right(),
            KeyCode::Home => search.cursor_home(),
            KeyCode::End => search.cursor_end(),
            _ => return false,
        }
        self.admin.refresh_list();
        true
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Esc => {
                return self.back();
            }
            _ => {}
        }

        match &self.state {
            AppState::Home => self.handle_home_key(key, now),
            AppState::Detail => self.handle_detail_key(key),
            AppState::Watch { .. } => false,
            AppState::Admin => self.handle_admin_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if let Some(command) = carousel_command(&key) {
            let hero_focused = self.focus == HomeFocus::Hero;
            match command {
                CarouselCommand::Previous | CarouselCommand::Next if !hero_focused => {}
                _ => {
                    self.run_command(command, now);
                    return true;
                }
            }
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_card(-1, now),
            KeyCode::Right | KeyCode::Char('l') => self.move_card(1, now),
            KeyCode::Down | KeyCode::Char('j') => self.move_row(1, now),
            KeyCode::Up | KeyCode::Char('k') => self.move_row(-1, now),
            KeyCode::Char('[') => self.scroll_focused_row(false, now),
            KeyCode::Char(']') => self.scroll_focused_row(true, now),
            KeyCode::PageDown => {
                let page = self.layout.viewport.height;
                self.set_page_scroll(self.page_scroll.saturating_add(page));
                true
            }
            KeyCode::PageUp => {
                let page = self.layout.viewport.height;
                self.set_page_scroll(self.page_scroll.saturating_sub(page));
                true
            }
            KeyCode::Enter => {
                let id = match self.focus {
                    HomeFocus::Hero => self.current_hero().map(|h| h.id.clone()),
                    HomeFocus::Row { .. } => self.focused_card().map(|c| c.id.clone()),
                };
                match id {
                    Some(id) => {
                        self.open_watch(id);
                        true
                    }
                    None => false,
                }
            }
            KeyCode::Char('i') => {
                let selection = match self.focus {
                    HomeFocus::Hero => self.current_hero().cloned().map(Selection::Hero),
                    HomeFocus::Row { .. } => self.focused_card().cloned().map(Selection::Card),
                };
                match selection {
                    Some(selection) => {
                        self.open_detail(selection);
                        true
                    }
                    None => false,
                }
            }
            KeyCode::Char('a') => {
                self.open_admin();
                true
            }
            KeyCode::Char('r') => {
                self.request_home();
                true
            }
            _ => false,
        }
    }

    fn move_card(&mut self, delta: isize, now: Instant) -> bool {
        let HomeFocus::Row { row, card } = self.focus else {
            return false;
        };
        let Some(len) = self.rows.get(row).map(|r| r.items.len()) else {
            return false;
        };
        let target = card.saturating_add_signed(delta).min(len.saturating_sub(1));
        self.focus = HomeFocus::Row { row, card: target };
        self.reveal_focus(now);
        true
    }

    fn move_row(&mut self, delta: isize, now: Instant) -> bool {
        let rendered: Vec<usize> = self.layout.rows.iter().map(|g| g.row).collect();
        if rendered.is_empty() {
            return false;
        }

        let (position, card) = match self.focus {
            HomeFocus::Hero => (None, 0),
            HomeFocus::Row { row, card } => (rendered.iter().position(|&r| r == row), card),
        };

        let target = match (position, delta > 0) {
            (None, true) => Some(0),
            (None, false) => return false,
            (Some(0), false) => None,
            (Some(p), false) => Some(p - 1),
            (Some(p), true) => Some((p + 1).min(rendered.len() - 1)),
        };

        self.focus = match target {
            Some(p) => {
                let row = rendered[p];
                let len = self.rows[row].items.len();
                HomeFocus::Row {
                    row,
                    card: card.min(len.saturating_sub(1)),
                }
            }
            None => HomeFocus::Hero,
        };
        self.reveal_focus(now);
        true
    }

    /// Scroll the page and the focused row so the focus is on screen.
    fn reveal_focus(&mut self, now: Instant) {
        match self.focus {
            HomeFocus::Hero => {
                self.page_scroll = self.layout.scroll_to_reveal(self.layout.hero, self.page_scroll);
            }
            HomeFocus::Row { row, card } => {
                let Some(geometry) = self.layout.geometry_for(row).copied() else {
                    return;
                };
                self.page_scroll = self.layout.scroll_to_reveal(geometry.area, self.page_scroll);
                let (start, end) = geometry.card_span(card);
                if let Some(scroll) = self.row_scrolls.get_mut(row) {
                    scroll.reveal(column_to_px(start), column_to_px(end), now);
                }
            }
        }
    }

    fn scroll_focused_row(&mut self, right: bool, now: Instant) -> bool {
        let HomeFocus::Row { row, .. } = self.focus else {
            return false;
        };
        self.scroll_row(row, right, now);
        true
    }

    fn scroll_row(&mut self, row: usize, right: bool, now: Instant) {
        if let Some(scroll) = self.row_scrolls.get_mut(row) {
            if right {
                scroll.scroll_right(now);
            } else {
                scroll.scroll_left(now);
            }
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char('p') => {
                let Some(id) = self.detail.as_ref().map(|s| s.id().to_string()) else {
                    return false;
                };
                self.open_watch(id);
                true
            }
            _ => false,
        }
    }

    fn handle_admin_key(&mut self, key: KeyEvent) -> bool {
        if let Some(id) = self.admin.confirm_delete {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.admin.confirm_delete = None;
                    self.pending.push(Action::DeleteFilm(id));
                }
                _ => self.admin.confirm_delete = None,
            }
            return true;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.admin.list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.admin.list.down(),
            KeyCode::Home | KeyCode::Char('g') => self.admin.list.first(),
            KeyCode::End | KeyCode::Char('G') => self.admin.list.last(),
            KeyCode::Char('/') => self.input_mode = InputMode::Editing,
            KeyCode::Char('t') => self.admin.cycle_type_filter(),
            KeyCode::Char('r') => self.request_admin(),
            KeyCode::Char('d') | KeyCode::Delete => {
                self.admin.confirm_delete = self.admin.selected_film().map(|f| f.id);
            }
            KeyCode::Enter => {
                let Some(item) = self.admin.selected_film().map(Film::to_hero_item) else {
                    return false;
                };
                self.open_detail(Selection::Hero(item));
            }
            _ => return false,
        }
        let visible = self.admin_list_height();
        self.admin.list.scroll_into_view(visible);
        true
    }

    /// Film lines that fit under the admin dashboard
    pub fn admin_list_height(&self) -> usize {
        usize::from(self.layout.viewport.height.saturating_sub(ADMIN_CHROME_LINES))
    }

    // -------------------------------------------------------------------------
    // Mouse Event Handling
    // -------------------------------------------------------------------------

    /// The terminal lost focus. The pointer may have left the window without
    /// a final move event, so any hover pause is released.
    pub fn focus_lost(&mut self, now: Instant) -> bool {
        if !self.hero_hovered {
            return false;
        }
        debug!("focus lost while hovering hero");
        self.set_hero_hover(false, now);
        true
    }

    /// Handle mouse event, returns true if event was consumed
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        let consumed = match self.state {
            AppState::Home => self.handle_home_mouse(mouse, now),
            AppState::Admin => match mouse.kind {
                MouseEventKind::ScrollDown => {
                    self.admin.list.down();
                    true
                }
                MouseEventKind::ScrollUp => {
                    self.admin.list.up();
                    true
                }
                _ => false,
            },
            _ => false,
        };
        self.sync_visibility(now);
        consumed
    }

    fn handle_home_mouse(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        let pos = self.layout.to_page(mouse.column, mouse.row, self.page_scroll);
        let px = column_to_px(mouse.column);
        let over_hero = pos.is_some_and(|p| self.layout.hero.contains(p));

        match mouse.kind {
            MouseEventKind::Moved => {
                self.set_hero_hover(over_hero, now);
                true
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.set_hero_hover(over_hero, now);
                let Some(pos) = pos else {
                    return false;
                };
                if over_hero {
                    self.swipe.touch_start(px);
                    self.pointer = Some(PointerTarget::Hero { start: pos });
                    return true;
                }
                let Some(geometry) = self.layout.row_at(pos).copied() else {
                    return false;
                };
                if geometry.left_arrow().contains(pos) {
                    self.scroll_row(geometry.row, false, now);
                } else if geometry.right_arrow().contains(pos) {
                    self.scroll_row(geometry.row, true, now);
                } else if geometry.track().contains(pos) {
                    if let Some(scroll) = self.row_scrolls.get_mut(geometry.row) {
                        scroll.on_pointer_down(px);
                        self.pointer = Some(PointerTarget::Row(geometry.row));
                    }
                }
                true
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.pointer {
                Some(PointerTarget::Hero { .. }) => {
                    self.swipe.touch_move(px);
                    true
                }
                Some(PointerTarget::Row(row)) => {
                    let inside = pos.is_some_and(|p| {
                        self.layout
                            .geometry_for(row)
                            .is_some_and(|g| g.area.contains(p))
                    });
                    if inside {
                        if let Some(scroll) = self.row_scrolls.get_mut(row) {
                            scroll.on_pointer_move(px);
                        }
                    } else {
                        self.pointer = None;
                        let guard = self
                            .row_scrolls
                            .get_mut(row)
                            .and_then(|scroll| scroll.on_pointer_leave(now));
                        if let Some(guard) = guard {
                            self.suppressor.arm(guard);
                        }
                    }
                    true
                }
                None => false,
            },
            MouseEventKind::Up(MouseButton::Left) => match self.pointer.take() {
                Some(PointerTarget::Hero { start }) => {
                    match self.swipe.touch_end() {
                        Some(command) => self.run_command(command, now),
                        None if pos == Some(start) => self.click_hero(start, now),
                        None => {}
                    }
                    true
                }
                Some(PointerTarget::Row(row)) => {
                    let guard = self
                        .row_scrolls
                        .get_mut(row)
                        .and_then(|scroll| scroll.on_pointer_up(now));
                    if let Some(guard) = guard {
                        self.suppressor.arm(guard);
                    }
                    if let Some(pos) = pos {
                        self.click_row(row, pos, now);
                    }
                    true
                }
                None => false,
            },
            MouseEventKind::ScrollDown => {
                self.set_page_scroll(self.page_scroll.saturating_add(WHEEL_LINES));
                true
            }
            MouseEventKind::ScrollUp => {
                self.set_page_scroll(self.page_scroll.saturating_sub(WHEEL_LINES));
                true
            }
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
                let right = mouse.kind == MouseEventKind::ScrollRight;
                match pos.and_then(|p| self.layout.row_at(p)).map(|g| g.row) {
                    Some(row) => {
                        self.scroll_row(row, right, now);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn click_hero(&mut self, pos: Position, now: Instant) {
        let hit = self.hero_controls().hit(pos).unwrap_or(HeroHit::Body);
        debug!(?hit, "hero click");
        match hit {
            HeroHit::Play => {
                if let Some(id) = self.current_hero().map(|h| h.id.clone()) {
                    self.open_watch(id);
                }
            }
            HeroHit::MoreInfo => {
                if let Some(item) = self.current_hero().cloned() {
                    self.open_detail(Selection::Hero(item));
                }
            }
            HeroHit::Previous => self.run_command(CarouselCommand::Previous, now),
            HeroHit::TogglePause => self.run_command(CarouselCommand::TogglePause, now),
            HeroHit::Next => self.run_command(CarouselCommand::Next, now),
            HeroHit::ToggleMute => self.run_command(CarouselCommand::ToggleMute, now),
            HeroHit::Dot(index) => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.go_to(index, now);
                }
            }
            HeroHit::Body => {}
        }
    }

    /// The click that follows a release on a row card; swallowed after a drag.
    fn click_row(&mut self, row: usize, pos: Position, now: Instant) {
        if self.suppressor.intercept(now) {
            debug!(row, "click suppressed after drag");
            return;
        }
        let Some(geometry) = self.layout.geometry_for(row).copied() else {
            return;
        };
        let Some(card) = self.card_at(&geometry, pos) else {
            return;
        };
        self.focus = HomeFocus::Row { row, card };
        if let Some(id) = self.rows[row].items.card(card).map(|c| c.id.clone()) {
            self.open_watch(id);
        }
    }

    fn card_at(&self, geometry: &RowGeometry, pos: Position) -> Option<usize> {
        let track = geometry.track();
        if !track.contains(pos) {
            return None;
        }
        let offset = self
            .row_scrolls
            .get(geometry.row)
            .map_or(0, |s| layout::px_to_columns(s.offset()));
        geometry.card_at(pos.x - track.x + offset)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    /// Home screen with sample slides and rows on a 120x40 terminal
    fn loaded_app(now: Instant) -> App {
        let mut app = App::default();
        app.resize(Rect::new(0, 0, 120, 40), now);
        app.apply(AppEvent::HeroLoaded(mock::sample_hero_items()), now);
        app.apply(AppEvent::RowsLoaded(mock::home_rows(chrono::Utc::now())), now);
        app
    }

    // -------------------------------------------------------------------------
    // ListState / TextInput Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_list_state_navigation() {
        let mut list = ListState::new(5);
        list.down();
        list.down();
        assert_eq!(list.selected, 2);
        list.last();
        list.down();
        assert_eq!(list.selected, 4);
        list.up();
        assert_eq!(list.selected, 3);
        list.first();
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_list_state_set_len() {
        let mut list = ListState::new(10);
        list.selected = 8;
        list.set_len(5);
        assert_eq!(list.selected, 4);
        list.set_len(0);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_text_input_multibyte() {
        let mut input = TextInput::default();
        for c in "café".chars() {
            input.insert(c);
        }
        assert_eq!(input.cursor, 4);
        input.backspace();
        assert_eq!(input.value, "caf");
        input.cursor_home();
        input.delete();
        assert_eq!(input.value, "af");
    }

    // -------------------------------------------------------------------------
    // Navigation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_app_navigation() {
        let mut app = App::default();
        app.navigate(AppState::Detail);
        app.navigate(AppState::Watch {
            content_id: "42".into(),
        });
        assert_eq!(app.nav_stack.len(), 2);

        assert!(app.back());
        assert_eq!(app.state, AppState::Detail);
        assert!(app.back());
        assert_eq!(app.state, AppState::Home);
        assert!(!app.back());
    }

    #[test]
    fn test_quit_keys() {
        let now = Instant::now();
        let mut app = App::default();
        app.handle_key(key(KeyCode::Char('q')), now);
        assert!(!app.running);

        let mut app = App::default();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), now);
        assert!(!app.running);
    }

    #[test]
    fn test_enter_on_hero_opens_watch() {
        let now = Instant::now();
        let mut app = loaded_app(now);
        let id = app.current_hero().unwrap().id.clone();

        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.state, AppState::Watch { content_id: id });

        app.handle_key(key(KeyCode::Esc), now);
        assert_eq!(app.state, AppState::Home);
    }

    #[test]
    fn test_info_opens_detail() {
        let now = Instant::now();
        let mut app = loaded_app(now);
        app.handle_key(key(KeyCode::Char('i')), now);
        assert_eq!(app.state, AppState::Detail);
        assert_eq!(
            app.detail.as_ref().map(Selection::title),
            Some("The Last Frontier")
        );
    }

    // -------------------------------------------------------------------------
    // Carousel Wiring Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_arrow_keys_drive_hero() {
        let now = Instant::now();
        let mut app = loaded_app(now);

        app.handle_key(key(KeyCode::Right), now);
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 1);
        assert_eq!(
            app.hero_status().as_deref(),
            Some("Now showing: Ocean Beneath. Slide 2 of 4.")
        );

        app.handle_key(key(KeyCode::Char(' ')), now);
        assert!(app.carousel.as_ref().unwrap().is_paused());

        app.handle_key(key(KeyCode::Char('m')), now);
        assert!(!app.carousel.as_ref().unwrap().is_muted());
    }

    #[test]
    fn test_leaving_home_pauses_hero() {
        let now = Instant::now();
        let mut app = loaded_app(now);
        assert!(!app.carousel.as_ref().unwrap().is_paused());

        app.handle_key(key(KeyCode::Char('i')), now);
        let reasons = app.carousel.as_ref().unwrap().pause_reasons();
        assert!(reasons.get(PauseReason::OffScreen));

        app.handle_key(key(KeyCode::Esc), now);
        assert!(!app.carousel.as_ref().unwrap().is_paused());
    }

    #[test]
    fn test_scrolling_hero_off_screen_pauses() {
        let now = Instant::now();
        let mut app = loaded_app(now);

        for _ in 0..5 {
            app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 30), now);
        }
        assert!(app.page_scroll >= 12);
        assert!(app.carousel.as_ref().unwrap().is_paused());

        for _ in 0..5 {
            app.handle_mouse(mouse(MouseEventKind::ScrollUp, 10, 30), now);
        }
        assert_eq!(app.page_scroll, 0);
        assert!(!app.carousel.as_ref().unwrap().is_paused());
    }

    #[test]
    fn test_hover_pauses_hero() {
        let now = Instant::now();
        let mut app = loaded_app(now);

        app.handle_mouse(mouse(MouseEventKind::Moved, 10, 5), now);
        assert!(app.is_hero_hovered());
        assert!(app.carousel.as_ref().unwrap().pause_reasons().get(PauseReason::Hover));

        app.handle_mouse(mouse(MouseEventKind::Moved, 10, 30), now);
        assert!(!app.carousel.as_ref().unwrap().is_paused());
    }

    #[test]
    fn test_focus_lost_releases_hover_pause() {
        let now = Instant::now();
        let mut app = loaded_app(now);

        app.handle_mouse(mouse(MouseEventKind::Moved, 10, 5), now);
        assert!(app.carousel.as_ref().unwrap().is_paused());

        // Pointer leaves the window: no further Moved event arrives
        assert!(app.focus_lost(now));
        assert!(!app.is_hero_hovered());
        let carousel = app.carousel.as_ref().unwrap();
        assert!(!carousel.pause_reasons().get(PauseReason::Hover));
        assert!(!carousel.is_paused());
        assert!(carousel.is_auto_advancing());

        assert!(!app.focus_lost(now));
    }

    #[test]
    fn test_swipe_on_hero_navigates() {
        let now = Instant::now();
        let mut app = loaded_app(now);

        // 10 columns = 80px leftward
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, 5), now);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 50, 5), now);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 50, 5), now);
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 1);

        // 5 columns = 40px, ignored
        let later = now + Duration::from_secs(1);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, 5), later);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 55, 5), later);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 55, 5), later);
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 1);
    }

    #[test]
    fn test_relative_trailer_hides_video() {
        let now = Instant::now();
        let mut app = App::default();
        app.resize(Rect::new(0, 0, 120, 40), now);
        let mut items = mock::sample_hero_items();
        items[0].trailer_url = Some("/trailers/missing.mp4".into());
        app.apply(AppEvent::HeroLoaded(items), now);

        app.tick(now + Duration::from_millis(2000));
        assert!(!app.video_visible());
        assert!(app.failed_trailers.contains(&app.hero_items[0].id));
    }

    #[test]
    fn test_next_deadline_tracks_progress() {
        let now = Instant::now();
        let app = loaded_app(now);
        let deadline = app.next_deadline(now).unwrap();
        assert!(deadline <= now + PROGRESS_FRAME);
    }

    // -------------------------------------------------------------------------
    // Row Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_row_focus_navigation() {
        let now = Instant::now();
        let mut app = loaded_app(now);

        app.handle_key(key(KeyCode::Down), now);
        assert_eq!(app.focus, HomeFocus::Row { row: 0, card: 0 });

        app.handle_key(key(KeyCode::Right), now);
        assert_eq!(app.focus, HomeFocus::Row { row: 0, card: 1 });
        // Left/Right move cards, not slides, while a row is focused
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 0);

        app.handle_key(key(KeyCode::Up), now);
        assert_eq!(app.focus, HomeFocus::Hero);
        assert_eq!(app.page_scroll, 0);
    }

    #[test]
    fn test_focus_reveals_row() {
        let now = Instant::now();
        let mut app = loaded_app(now);
        for _ in 0..6 {
            app.handle_key(key(KeyCode::Down), now);
        }
        let HomeFocus::Row { row, .. } = app.focus else {
            panic!("expected row focus");
        };
        let area = app.layout.geometry_for(row).unwrap().area;
        assert!(area.y >= app.page_scroll);
        assert!(area.bottom() <= app.page_scroll + app.layout.viewport.height);
    }

    #[test]
    fn test_drag_suppresses_click() {
        let now = Instant::now();
        let mut app = loaded_app(now);
        let geometry = app.layout.rows[1];
        let track = geometry.track();
        let y = app.layout.viewport.y + track.y;
        let x = track.x + 30;

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), now);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), x - 10, y), now);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x - 10, y), now);

        assert_eq!(app.state, AppState::Home);
        assert!(app.row_scrolls[geometry.row].offset() > 0.0);
    }

    #[test]
    fn test_click_without_drag_opens_card() {
        let now = Instant::now();
        let mut app = loaded_app(now);
        let geometry = app.layout.rows[1];
        let track = geometry.track();
        let y = app.layout.viewport.y + track.y;
        let x = track.x + 1;

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), now);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, y), now);

        let expected = app.rows[geometry.row].items.card(0).unwrap().id.clone();
        assert_eq!(app.state, AppState::Watch { content_id: expected });
    }

    // -------------------------------------------------------------------------
    // Admin Tests
    // -------------------------------------------------------------------------

    fn film(id: i64, title: &str, media_type: MediaType) -> Film {
        Film {
            id,
            fields: crate::models::NewFilm::new(title, media_type),
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_admin_filters_and_delete() {
        let now = Instant::now();
        let mut app = App::default();
        app.handle_key(key(KeyCode::Char('a')), now);
        assert_eq!(app.state, AppState::Admin);
        assert_eq!(app.take_actions(), vec![Action::LoadAdmin]);

        app.apply(
            AppEvent::AdminLoaded {
                films: vec![
                    film(1, "Arrival", MediaType::Movie),
                    film(2, "Dark", MediaType::Tv),
                    film(3, "Dune", MediaType::Movie),
                ],
                stats: CatalogStats {
                    movies: 2,
                    tv_shows: 1,
                },
            },
            now,
        );

        app.handle_key(key(KeyCode::Char('t')), now);
        assert_eq!(app.admin.visible_films().len(), 2);

        app.handle_key(key(KeyCode::Char('/')), now);
        app.handle_key(key(KeyCode::Char('d')), now);
        app.handle_key(key(KeyCode::Char('u')), now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.admin.visible_films().len(), 1);

        app.handle_key(key(KeyCode::Char('d')), now);
        assert_eq!(app.admin.confirm_delete, Some(3));
        app.handle_key(key(KeyCode::Char('y')), now);
        assert_eq!(app.take_actions(), vec![Action::DeleteFilm(3)]);

        app.apply(AppEvent::FilmDeleted(3), now);
        assert_eq!(app.admin.stats.movies, 1);
        assert!(app.admin.visible_films().is_empty());
    }

    #[test]
    fn test_failure_clears_loading() {
        let now = Instant::now();
        let mut app = App::default();
        app.request_home();
        app.apply(AppEvent::Failed("catalogue unavailable".into()), now);
        assert!(!app.hero_loading.is_loading());
        assert_eq!(app.error.as_deref(), Some("catalogue unavailable"));
    }
}
