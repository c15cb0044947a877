//! Row/column insertion and deletion tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]

mod common;

use common::{realized, HostCall};

#[test]
fn test_insert_rows_shifts_content() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_value(&mut host, 2, 0, "x");
    grid.set_row_height(&mut host, 2, 35);

    grid.insert_rows(&mut host, 1, 2);

    assert_eq!(grid.rows(), 12);
    assert_eq!(grid.cell_value(4, 0), "x");
    assert_eq!(grid.cell_value(1, 0), "");
    // Side arrays spliced in step with the store.
    assert_eq!(grid.row_height(4), 35);
    assert_eq!(grid.row_height(1), 20);
}

#[test]
fn test_delete_rows_shifts_content() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_value(&mut host, 5, 3, "keep");

    grid.delete_rows(&mut host, 1, 3);

    assert_eq!(grid.rows(), 7);
    assert_eq!(grid.cell_value(2, 3), "keep");
}

#[test]
fn test_insert_then_delete_restores_geometry() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    let before = grid.cell_rect(5, 5);

    grid.insert_rows(&mut host, 2, 3);
    grid.delete_rows(&mut host, 2, 3);

    assert_eq!(grid.rows(), 10);
    assert_eq!(grid.cell_rect(5, 5), before);
}

#[test]
fn test_column_splice() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_value(&mut host, 0, 4, "v");

    grid.insert_columns(&mut host, 0, 1);
    assert_eq!(grid.columns(), 11);
    assert_eq!(grid.cell_value(0, 5), "v");

    grid.delete_columns(&mut host, 0, 1);
    assert_eq!(grid.columns(), 10);
    assert_eq!(grid.cell_value(0, 4), "v");
}

#[test]
fn test_deleting_edited_row_abandons_edit() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_value(&mut host, 5, 5, "stale");
    grid.begin_edit(&mut host, 5, 5);
    host.editor_text = "typed".into();
    host.clear();

    grid.delete_rows(&mut host, 4, 3);

    assert!(!grid.is_editing());
    assert_eq!(grid.current_cell(), None);
    assert!(host.has_call(&HostCall::HideEditor));
    // Nothing was committed into a neighboring row.
    assert_eq!(grid.cell_value(4, 5), "");
}

#[test]
fn test_edit_position_shifts_with_splices() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.begin_edit(&mut host, 5, 5);

    grid.insert_rows(&mut host, 0, 2);
    assert_eq!(grid.current_cell(), Some((7, 5)));

    grid.delete_rows(&mut host, 0, 2);
    assert_eq!(grid.current_cell(), Some((5, 5)));

    grid.insert_columns(&mut host, 3, 1);
    assert_eq!(grid.current_cell(), Some((5, 6)));
}

#[test]
fn test_delete_refused_when_it_breaks_frozen_bands() {
    let (mut grid, mut host) = realized(common::banded_config(), 150, 150);

    // 2 leading + 1 trailing frozen rows; leaving 2 rows cannot hold them.
    grid.delete_rows(&mut host, 2, 8);

    assert_eq!(grid.rows(), 10);
}

#[test]
fn test_out_of_range_splices_ignored() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);

    grid.insert_rows(&mut host, 11, 1);
    grid.delete_rows(&mut host, 8, 5);
    grid.insert_columns(&mut host, 99, 2);
    grid.delete_columns(&mut host, 9, 2);

    assert_eq!(grid.rows(), 10);
    assert_eq!(grid.columns(), 10);
}

#[test]
fn test_extreme_splice_arguments_ignored() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    grid.set_cell_value(&mut host, 5, 5, "v");

    // Positions and counts near usize::MAX must warn and no-op, not wrap.
    grid.delete_rows(&mut host, usize::MAX, 2);
    grid.insert_rows(&mut host, 0, usize::MAX);
    grid.delete_rows(&mut host, 2, usize::MAX);
    grid.delete_columns(&mut host, usize::MAX, 2);
    grid.insert_columns(&mut host, 0, usize::MAX);
    grid.delete_columns(&mut host, 2, usize::MAX);

    assert_eq!(grid.rows(), 10);
    assert_eq!(grid.columns(), 10);
    assert_eq!(grid.cell_value(5, 5), "v");
}

#[test]
fn test_splice_repaints_from_splice_point() {
    let (mut grid, mut host) = realized(common::plain_config(), 100, 100);
    host.clear();

    grid.insert_rows(&mut host, 2, 1);

    let drawn = grid_rows_drawn(&host);
    assert!(drawn.contains(&2), "splice row must repaint");
    assert!(!drawn.contains(&0), "rows above the splice are untouched");
    assert!(!drawn.contains(&1));
}

fn grid_rows_drawn(host: &common::RecordingHost) -> Vec<usize> {
    host.drawn_cells().iter().map(|&(row, _)| row).collect()
}
