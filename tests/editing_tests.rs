//! Cell-edit overlay tests: begin, commit, cancel, veto and focus handoff.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]

mod common;

use common::{realized, HostCall};
use gridview::{LeaveCellDecision, Rect};

#[test]
fn test_edit_and_commit() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_value(&mut host, 1, 1, "old");
    host.clear();

    grid.begin_edit(&mut host, 1, 1);
    assert!(grid.is_editing());
    assert!(host.has_call(&HostCall::ShowEditor {
        rect: Rect::new(20, 20, 20, 20),
        value: "old".into(),
    }));
    assert!(host.has_call(&HostCall::FocusEditor));

    host.editor_text = "new".into();
    assert!(grid.commit_edit(&mut host, true));
    assert_eq!(grid.cell_value(1, 1), "new");
    assert!(!grid.is_editing());
    assert!(host.has_call(&HostCall::HideEditor));
    // The committed cell repainted.
    assert!(host.drawn_cells().contains(&(1, 1)));
    // Traversal position survives the unmap.
    assert_eq!(grid.current_cell(), Some((1, 1)));
}

#[test]
fn test_commit_without_unmap_keeps_editing() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.begin_edit(&mut host, 1, 1);
    host.clear();
    host.editor_text = "v".into();

    assert!(grid.commit_edit(&mut host, false));

    assert_eq!(grid.cell_value(1, 1), "v");
    assert!(grid.is_editing());
    assert!(!host.has_call(&HostCall::HideEditor));
}

#[test]
fn test_veto_keeps_edit_and_store() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_value(&mut host, 3, 2, "keep");
    grid.begin_edit(&mut host, 3, 2);
    host.editor_text = "reject me".into();
    host.leave_decision = LeaveCellDecision::veto();
    host.clear();

    assert!(!grid.commit_edit(&mut host, true));

    assert_eq!(grid.cell_value(3, 2), "keep");
    assert!(grid.is_editing());
    assert_eq!(grid.current_cell(), Some((3, 2)));
    assert!(!host.has_call(&HostCall::HideEditor));
    assert!(host.has_call(&HostCall::FocusEditor));
}

#[test]
fn test_veto_scrolls_cell_back_into_view() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.begin_edit(&mut host, 3, 3);
    grid.set_vert_origin(&mut host, 80);
    assert!(!grid.is_row_visible(3));
    host.leave_decision = LeaveCellDecision::veto();

    assert!(!grid.commit_edit(&mut host, true));

    assert!(grid.is_row_visible(3));
    assert_eq!(grid.viewport().vert_origin, 60);
}

#[test]
fn test_leave_decision_can_replace_value() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.begin_edit(&mut host, 0, 0);
    host.editor_text = "3.14159".into();
    host.leave_decision = LeaveCellDecision::replace("3.14");

    assert!(grid.commit_edit(&mut host, true));
    assert_eq!(grid.cell_value(0, 0), "3.14");
}

#[test]
fn test_cancel_with_unmap_discards() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_value(&mut host, 2, 2, "old");
    grid.begin_edit(&mut host, 2, 2);
    host.editor_text = "typed".into();

    grid.cancel_edit(&mut host, true);

    assert_eq!(grid.cell_value(2, 2), "old");
    assert!(!grid.is_editing());
    assert!(host.has_call(&HostCall::HideEditor));
}

#[test]
fn test_cancel_without_unmap_restores_text() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_value(&mut host, 2, 2, "old");
    grid.begin_edit(&mut host, 2, 2);
    host.editor_text = "typed".into();

    grid.cancel_edit(&mut host, false);

    assert_eq!(host.editor_text, "old");
    assert!(grid.is_editing());
}

#[test]
fn test_begin_edit_commits_previous_cell() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.begin_edit(&mut host, 0, 0);
    host.editor_text = "first".into();

    grid.begin_edit(&mut host, 2, 2);

    assert_eq!(grid.cell_value(0, 0), "first");
    assert_eq!(grid.current_cell(), Some((2, 2)));
    assert!(grid.is_editing());
}

#[test]
fn test_begin_edit_same_cell_only_refocuses() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.begin_edit(&mut host, 1, 1);
    host.clear();

    grid.begin_edit(&mut host, 1, 1);

    assert!(host.has_call(&HostCall::FocusEditor));
    assert!(!host
        .calls
        .iter()
        .any(|c| matches!(c, HostCall::ShowEditor { .. })));
}

#[test]
fn test_veto_blocks_moving_to_new_cell() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_value(&mut host, 0, 0, "bad");
    grid.begin_edit(&mut host, 0, 0);
    host.leave_decision = LeaveCellDecision::veto();
    host.clear();

    grid.begin_edit(&mut host, 2, 2);

    assert_eq!(grid.current_cell(), Some((0, 0)));
    assert!(grid.is_editing());
    assert!(!host
        .calls
        .iter()
        .any(|c| matches!(c, HostCall::ShowEditor { .. })));
}

#[test]
fn test_cell_widget_takes_focus_instead_of_editor() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_widget(&mut host, 1, 2, Some(42));
    host.clear();

    grid.begin_edit(&mut host, 1, 2);

    assert!(host.has_call(&HostCall::FocusWidget(42)));
    assert!(!grid.is_editing());
    assert_eq!(grid.current_cell(), Some((1, 2)));
    assert!(!host
        .calls
        .iter()
        .any(|c| matches!(c, HostCall::ShowEditor { .. })));
}

#[test]
fn test_editor_follows_scroll() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.begin_edit(&mut host, 3, 3);
    host.clear();

    grid.set_vert_origin(&mut host, 20);

    assert!(host.has_call(&HostCall::MoveEditor {
        rect: Rect::new(60, 40, 20, 20),
    }));
}

#[test]
fn test_rewriting_edited_cell_syncs_editor() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.begin_edit(&mut host, 1, 1);
    host.editor_text = "typed".into();

    grid.set_cell_value(&mut host, 1, 1, "from app");

    assert_eq!(host.editor_text, "from app");
}

#[test]
fn test_begin_edit_out_of_range_is_ignored() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);

    grid.begin_edit(&mut host, 30, 0);

    assert!(!grid.is_editing());
    assert!(host.calls.is_empty());
}
