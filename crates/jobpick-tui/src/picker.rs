//! Single-choice test-plan picker.
//!
//! A flat, mutually exclusive radio list with none of the tree browser's
//! propagation machinery. Returns the chosen index, or `None` when the
//! user finishes without choosing — a sentinel, not an error.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

/// Cursor and choice state for one picker session.
struct PickerApp {
    cursor: usize,
    chosen: Option<usize>,
    len: usize,
    finished: bool,
}

impl PickerApp {
    fn new(len: usize, preselected: Option<usize>) -> Self {
        let preselected = preselected.filter(|&i| i < len);
        Self {
            cursor: preselected.unwrap_or(0),
            chosen: preselected,
            len,
            finished: false,
        }
    }
}

fn handle_picker_key(key: KeyEvent, app: &mut PickerApp) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        // Abort: finish without a choice.
        app.chosen = None;
        app.finished = true;
        return;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.cursor + 1 < app.len {
                app.cursor += 1;
            }
        }
        KeyCode::Char(' ') => {
            app.chosen = Some(app.cursor);
        }
        KeyCode::Enter => {
            app.finished = true;
        }
        _ => {}
    }
}

fn render_picker(frame: &mut Frame, app: &PickerApp, plans: &[String], title: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = Paragraph::new(format!(" {title}"))
        .style(Style::default().fg(Color::Black).bg(Color::Gray));
    frame.render_widget(header, chunks[0]);

    let lines: Vec<Line> = plans
        .iter()
        .enumerate()
        .map(|(i, plan)| {
            let radio = if app.chosen == Some(i) { "(*)" } else { "( )" };
            let line = Line::from(format!("  {radio} {plan}"));
            if i == app.cursor {
                line.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                line
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(Block::bordered()), chunks[1]);

    let footer = Line::from(vec![
        Span::raw(" Press "),
        Span::styled(
            "<Enter>",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to continue"),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}

/// Run the blocking plan-picker loop.
///
/// `preselected` pre-marks an entry (ignored when out of range). An empty
/// plan list returns `Ok(None)` without touching the terminal.
pub fn run_plan_picker(
    title: &str,
    plans: &[String],
    preselected: Option<usize>,
) -> io::Result<Option<usize>> {
    if plans.is_empty() {
        return Ok(None);
    }
    let mut app = PickerApp::new(plans.len(), preselected);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = (|| -> io::Result<()> {
        while !app.finished {
            terminal.draw(|frame| render_picker(frame, &app, plans, title))?;
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                handle_picker_key(key, &mut app);
            }
        }
        Ok(())
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    terminal.show_cursor()?;
    result?;

    Ok(app.chosen)
}

// ── Tests ─────────────────────────────────────────────────────────────
