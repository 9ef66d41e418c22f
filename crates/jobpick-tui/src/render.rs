//! Row rendering for the category browser.

use jobpick::{NodeId, SelectionTree};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::app::BrowserApp;

/// Column (relative to the list body) of a branch row's expand icon.
///
/// Rows are laid out as `[X] ` + two spaces per depth level + icon. The
/// mouse handler uses the same arithmetic for its hit test.
pub(crate) fn expand_icon_column(depth: usize) -> u16 {
    (4 + 2 * depth) as u16
}

/// Text of one tree row: checkbox, indent, expand icon, label.
pub(crate) fn row_text(tree: &SelectionTree, id: NodeId, show_ids: bool) -> String {
    let checkbox = if tree.flag(id) { "[X]" } else { "[ ]" };
    let indent = "  ".repeat(tree.depth(id));
    let label = tree.label(id, show_ids);
    if tree.is_leaf(id) {
        format!("{checkbox} {indent}{label}")
    } else {
        let icon = if tree.expanded(id) { '-' } else { '+' };
        format!("{checkbox} {indent}{icon} {label}")
    }
}

/// Draw one frame and record the list geometry on `app` for the input
/// handlers.
pub(crate) fn render(frame: &mut Frame, app: &mut BrowserApp, tree: &SelectionTree, title: &str) {
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

    let block = Block::bordered();
    let inner = block.inner(chunks[1]);
    app.viewport = inner.height as usize;
    app.list_top = inner.y;
    app.list_left = inner.x;
    app.clamp(tree.visible_rows().len());

    let rows = tree.visible_rows();
    let end = (app.scroll + app.viewport).min(rows.len());
    let lines: Vec<Line> = rows[app.scroll..end]
        .iter()
        .enumerate()
        .map(|(offset, &id)| {
            let line = Line::from(row_text(tree, id, app.show_ids));
            if app.scroll + offset == app.cursor {
                line.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                line
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);

    let footer = Line::from(vec![
        Span::raw(" Press ("),
        Span::styled(
            "T",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(") to start Testing"),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}

// ── Tests ─────────────────────────────────────────────────────────────
