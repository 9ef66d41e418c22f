//! Terminal tree browser for selecting test jobs grouped by category.
//!
//! Renders a `jobpick` [`SelectionTree`] as an interactive checkbox tree
//! (ratatui + crossterm) and runs a blocking event loop until the user
//! finishes. A companion [`run_plan_picker`] offers a flat single-choice
//! list for picking a test plan.
//!
//! # Key bindings
//!
//! | Key         | Action                                   |
//! |-------------|------------------------------------------|
//! | `space`     | Toggle inclusion of the focused node     |
//! | `enter`     | Expand/collapse the focused branch       |
//! | `i` / `I`   | Show job ids instead of summaries        |
//! | `t` / `T`   | Finish and return the selection          |
//! | arrows etc. | Move the cursor                          |
//!
//! A left click on a branch's `+`/`-` icon also expands/collapses it.
//!
//! # Quick start
//!
//! ```ignore
//! use jobpick::{Category, JobDescriptor, StaticJobSource};
//! use jobpick_tui::CategoryBrowser;
//!
//! let source = StaticJobSource::new(
//!     vec![Category::new("audio", "Audio tests")],
//!     vec![JobDescriptor::new("audio/playback", "Playback works", "audio")],
//! );
//! let browser = CategoryBrowser::new("Choose tests to run", &source)?;
//! let selected = browser.run()?;
//! ```

use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use ratatui::prelude::*;

use jobpick::{BuildError, JobSource, SelectionTree};

mod app;
mod input;
mod picker;
mod render;

pub use picker::run_plan_picker;

use app::BrowserApp;

/// One interactive job-selection session.
///
/// Everything session-scoped (the tree, its node index, the UI state)
/// is owned by this value and dropped when [`run`](Self::run) returns;
/// a second session is simply a second value.
pub struct CategoryBrowser {
    title: String,
    tree: SelectionTree,
}

impl CategoryBrowser {
    /// Build the selection tree with every job included.
    ///
    /// Fails if the source's todo list references an unknown job or a job
    /// references an unregistered category.
    pub fn new(title: impl Into<String>, source: &dyn JobSource) -> Result<Self, BuildError> {
        Ok(Self {
            title: title.into(),
            tree: SelectionTree::build(source)?,
        })
    }

    /// Run the blocking browser loop and return the included job ids.
    ///
    /// The terminal is restored even when the loop errors mid-session.
    pub fn run(mut self) -> io::Result<BTreeSet<String>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut app = BrowserApp::new();
        let result = run_loop(&mut terminal, &mut app, &mut self.tree, &self.title);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;
        terminal.show_cursor()?;
        result?;

        Ok(self.tree.selected_jobs())
    }
}

/// Draw, poll with a 100 ms timeout, dispatch; exits on the finish key.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut BrowserApp,
    tree: &mut SelectionTree,
    title: &str,
) -> io::Result<()> {
    while !app.finished {
        terminal.draw(|frame| render::render(frame, app, tree, title))?;
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => input::handle_key_event(key, app, tree),
                Event::Mouse(mouse) => input::handle_mouse_event(mouse, app, tree),
                _ => {}
            }
        }
    }
    Ok(())
}
