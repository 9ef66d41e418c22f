//! Key and mouse dispatch for the category browser.
//!
//! All mutations happen synchronously inside these handlers; the run loop
//! is single-threaded, so the tree needs no locking.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use jobpick::SelectionTree;

use crate::app::BrowserApp;
use crate::render::expand_icon_column;

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut BrowserApp, tree: &mut SelectionTree) {
    // Ctrl+C always finishes, returning whatever is selected.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.finished = true;
        return;
    }

    let rows = tree.visible_rows();
    let viewport = app.viewport.max(1);
    match key.code {
        KeyCode::Char(' ') => {
            if let Some(&id) = rows.get(app.cursor) {
                tree.toggle(id);
            }
        }
        KeyCode::Enter => {
            if let Some(&id) = rows.get(app.cursor)
                && !tree.is_leaf(id)
            {
                tree.toggle_expanded(id);
            }
        }
        KeyCode::Char('i') | KeyCode::Char('I') => {
            // Labels re-render from the new mode next frame; flags are
            // untouched.
            app.show_ids = !app.show_ids;
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.finished = true;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor = app.cursor.saturating_add(1);
        }
        KeyCode::PageUp => {
            app.cursor = app.cursor.saturating_sub(viewport);
        }
        KeyCode::PageDown => {
            app.cursor = app.cursor.saturating_add(viewport);
        }
        KeyCode::Home => {
            app.cursor = 0;
        }
        KeyCode::End => {
            app.cursor = usize::MAX;
        }
        _ => {}
    }
    // Collapse and movement can both leave the cursor past the end.
    app.clamp(tree.visible_rows().len());
}

/// Left click on a branch row's expand icon toggles expansion; a click
/// anywhere else on a row moves the cursor there.
pub(crate) fn handle_mouse_event(mouse: MouseEvent, app: &mut BrowserApp, tree: &mut SelectionTree) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if mouse.row < app.list_top {
        return;
    }
    let offset = (mouse.row - app.list_top) as usize;
    if offset >= app.viewport {
        return;
    }

    let rows = tree.visible_rows();
    let index = app.scroll + offset;
    let Some(&id) = rows.get(index) else {
        return;
    };

    app.cursor = index;
    if !tree.is_leaf(id) && mouse.column == app.list_left + expand_icon_column(tree.depth(id)) {
        tree.toggle_expanded(id);
    }
    app.clamp(tree.visible_rows().len());
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use jobpick::{Category, JobDescriptor, StaticJobSource};
    use std::collections::BTreeSet;

    fn sample_tree() -> SelectionTree {
        let source = StaticJobSource::new(
            vec![
                Category::new("A", "Audio"),
                Category::new("B", "Benchmarks"),
            ],
            vec![
                JobDescriptor::new("job1", "First audio job", "A"),
                JobDescriptor::new("job2", "Second audio job", "A"),
                JobDescriptor::new("job3", "Benchmark job", "B"),
            ],
        );
        SelectionTree::build(&source).unwrap()
    }

    fn new_app() -> BrowserApp {
        let mut app = BrowserApp::new();
        app.viewport = 20;
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(code: KeyCode, app: &mut BrowserApp, tree: &mut SelectionTree) {
        handle_key_event(key(code), app, tree);
    }

    /// Move the cursor onto the row with the given key, expanding nothing.
    fn cursor_to(app: &mut BrowserApp, tree: &SelectionTree, target: &str) {
        let rows = tree.visible_rows();
        app.cursor = rows
            .iter()
            .position(|&id| tree.key(id) == target)
            .expect("target row not visible");
    }

    #[test]
    fn space_toggles_the_node_under_the_cursor() {
        let mut tree = sample_tree();
        let mut app = new_app();
        // Row 1 is category "A" (root is row 0).
        app.cursor = 1;
        press(KeyCode::Char(' '), &mut app, &mut tree);
        let a = tree.node_by_key("A").unwrap();
        assert!(!tree.flag(a));

        press(KeyCode::Char(' '), &mut app, &mut tree);
        assert!(tree.flag(a));
    }

    #[test]
    fn enter_expands_and_collapses_branches() {
        let mut tree = sample_tree();
        let mut app = new_app();
        app.cursor = 1;
        press(KeyCode::Enter, &mut app, &mut tree);
        assert_eq!(tree.visible_rows().len(), 5);

        press(KeyCode::Enter, &mut app, &mut tree);
        assert_eq!(tree.visible_rows().len(), 3);
    }

    #[test]
    fn enter_on_a_leaf_is_ignored() {
        let mut tree = sample_tree();
        let mut app = new_app();
        app.cursor = 1;
        press(KeyCode::Enter, &mut app, &mut tree);
        cursor_to(&mut app, &tree, "job1");
        let before = tree.visible_rows().len();
        press(KeyCode::Enter, &mut app, &mut tree);
        assert_eq!(tree.visible_rows().len(), before);
    }

    #[test]
    fn id_toggle_changes_no_flags() {
        let mut tree = sample_tree();
        let mut app = new_app();
        let before: Vec<bool> = tree.visible_rows().iter().map(|&id| tree.flag(id)).collect();

        press(KeyCode::Char('i'), &mut app, &mut tree);
        assert!(app.show_ids);
        let after: Vec<bool> = tree.visible_rows().iter().map(|&id| tree.flag(id)).collect();
        assert_eq!(before, after);

        press(KeyCode::Char('I'), &mut app, &mut tree);
        assert!(!app.show_ids);
    }

    #[test]
    fn finish_keys_end_the_session() {
        let mut tree = sample_tree();
        let mut app = new_app();
        press(KeyCode::Char('t'), &mut app, &mut tree);
        assert!(app.finished);

        let mut app2 = new_app();
        press(KeyCode::Char('T'), &mut app2, &mut tree);
        assert!(app2.finished);

        let mut app3 = new_app();
        handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app3,
            &mut tree,
        );
        assert!(app3.finished);
    }

    #[test]
    fn cursor_movement_stays_in_range() {
        let mut tree = sample_tree();
        let mut app = new_app();
        press(KeyCode::Up, &mut app, &mut tree);
        assert_eq!(app.cursor, 0);

        press(KeyCode::End, &mut app, &mut tree);
        assert_eq!(app.cursor, 2);

        press(KeyCode::Down, &mut app, &mut tree);
        assert_eq!(app.cursor, 2);

        press(KeyCode::Home, &mut app, &mut tree);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn end_key_tracks_the_row_count_across_collapse() {
        let mut tree = sample_tree();
        let mut app = new_app();
        app.cursor = 1;
        press(KeyCode::Enter, &mut app, &mut tree);
        press(KeyCode::End, &mut app, &mut tree);
        assert_eq!(app.cursor, 4);

        app.cursor = 1;
        press(KeyCode::Enter, &mut app, &mut tree);
        press(KeyCode::End, &mut app, &mut tree);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn unselecting_both_audio_jobs_leaves_the_benchmark() {
        let mut tree = sample_tree();
        let mut app = new_app();
        app.cursor = 1;
        press(KeyCode::Enter, &mut app, &mut tree);

        cursor_to(&mut app, &tree, "job1");
        press(KeyCode::Char(' '), &mut app, &mut tree);
        cursor_to(&mut app, &tree, "job2");
        press(KeyCode::Char(' '), &mut app, &mut tree);

        let a = tree.node_by_key("A").unwrap();
        let b = tree.node_by_key("B").unwrap();
        assert!(!tree.flag(a));
        assert!(tree.flag(b));
        assert!(tree.flag(tree.root()));
        assert_eq!(tree.selected_jobs(), BTreeSet::from(["job3".to_string()]));
    }

    #[test]
    fn mouse_click_on_icon_toggles_expansion() {
        let mut tree = sample_tree();
        let mut app = new_app();
        app.list_top = 2;
        app.list_left = 1;

        // Category "A" is on visible row 1, depth 1.
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: app.list_left + expand_icon_column(1),
            row: app.list_top + 1,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(click, &mut app, &mut tree);
        assert_eq!(app.cursor, 1);
        let a = tree.node_by_key("A").unwrap();
        assert!(tree.expanded(a));

        handle_mouse_event(click, &mut app, &mut tree);
        assert!(!tree.expanded(a));
    }

    #[test]
    fn mouse_click_elsewhere_only_moves_the_cursor() {
        let mut tree = sample_tree();
        let mut app = new_app();
        app.list_top = 2;

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 30,
            row: app.list_top + 2,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(click, &mut app, &mut tree);
        assert_eq!(app.cursor, 2);
        let b = tree.node_by_key("B").unwrap();
        assert!(!tree.expanded(b));
    }

    #[test]
    fn mouse_click_outside_the_list_is_ignored() {
        let mut tree = sample_tree();
        let mut app = new_app();
        app.list_top = 2;
        app.cursor = 1;

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(click, &mut app, &mut tree);
        assert_eq!(app.cursor, 1);
    }
}
