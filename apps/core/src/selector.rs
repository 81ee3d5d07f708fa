/// Sticky category browse state. Set by "Search X" view commands, cleared
/// by typing free text or by executing a real (action/url) command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Tabs,
    Bookmarks,
    History,
    Extensions,
}

/// Truncation limit for search results. Starts at a base size and doubles
/// each time the view scrolls past the end; any input change resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultWindow {
    base: usize,
    limit: usize,
}

pub const DEFAULT_WINDOW_BASE: usize = 75;

impl ResultWindow {
    pub fn new(base: usize) -> Self {
        Self { base, limit: base }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn grow(&mut self) {
        self.limit = self.limit.saturating_mul(2);
    }

    pub fn reset(&mut self) {
        self.limit = self.base;
    }
}

impl Default for ResultWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_BASE)
    }
}

/// Wrapped index into the displayed result list. Stays valid however the
/// list shrinks; an empty list has no selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionCursor {
    raw: i64,
}

impl SelectionCursor {
    pub fn reset(&mut self) {
        self.raw = 0;
    }

    pub fn move_up(&mut self) {
        self.raw -= 1;
    }

    pub fn move_down(&mut self) {
        self.raw += 1;
    }

    pub fn index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let n = len as i64;
        Some((((self.raw % n) + n) % n) as usize)
    }
}
