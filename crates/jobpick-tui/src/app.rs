//! Session-scoped browser state (not part of the tree).

/// Mutable UI state for one browser session.
///
/// Owned by the run loop and dropped with it; nothing here outlives the
/// session. The geometry fields are refreshed on every draw so the input
/// handlers can map mouse coordinates and page sizes without re-measuring.
pub(crate) struct BrowserApp {
    /// Index into the current visible rows.
    pub(crate) cursor: usize,
    /// First visible row index (scroll offset).
    pub(crate) scroll: usize,
    /// Render job ids instead of summaries (toggled with `i`).
    pub(crate) show_ids: bool,
    /// Set when the user presses the finish key.
    pub(crate) finished: bool,
    /// Rows that fit in the list body, set during render.
    pub(crate) viewport: usize,
    /// Screen row of the first list line, set during render.
    pub(crate) list_top: u16,
    /// Screen column of the first list character, set during render.
    pub(crate) list_left: u16,
}

impl BrowserApp {
    pub(crate) fn new() -> Self {
        Self {
            cursor: 0,
            scroll: 0,
            show_ids: false,
            finished: false,
            viewport: 0,
            list_top: 0,
            list_left: 0,
        }
    }

    /// Clamp the cursor to `rows` rows and keep it inside the scroll
    /// window. Called after any mutation that can shrink the row list.
    pub(crate) fn clamp(&mut self, rows: usize) {
        if rows == 0 {
            self.cursor = 0;
            self.scroll = 0;
            return;
        }
        self.cursor = self.cursor.min(rows - 1);
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        let viewport = self.viewport.max(1);
        if self.cursor >= self.scroll + viewport {
            self.scroll = self.cursor + 1 - viewport;
        }
    }
}
