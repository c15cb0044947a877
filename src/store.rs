//! Cell content and per-axis side arrays.
//!
//! The cell matrix is lazily allocated: a grid created with a million rows
//! costs nothing until something is written. Reads of unallocated cells see
//! default values. All mutators treat out-of-range coordinates as caller
//! mistakes: they report on the warning channel and do nothing.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Visual relief of one cell, rendered by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadowStyle {
    #[default]
    Flat,
    In,
    Out,
}

/// One cell record. Colors are opaque tokens the host interprets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
    pub foreground: Option<u32>,
    pub background: Option<u32>,
    pub shadow: ShadowStyle,
    pub selected: bool,
    pub highlighted: bool,
    pub underlined: bool,
    /// Host-owned widget embedded in this cell, by host-assigned id.
    pub user_widget: Option<u64>,
}

/// Borrowed view of a cell, handed to the host's draw calls.
#[derive(Debug, Clone, Copy)]
pub struct CellSnapshot<'a> {
    pub value: &'a str,
    pub foreground: Option<u32>,
    pub background: Option<u32>,
    pub shadow: ShadowStyle,
    pub selected: bool,
    pub highlighted: bool,
    pub underlined: bool,
    pub user_widget: Option<u64>,
}

impl Cell {
    fn snapshot(&self) -> CellSnapshot<'_> {
        CellSnapshot {
            value: &self.value,
            foreground: self.foreground,
            background: self.background,
            shadow: self.shadow,
            selected: self.selected,
            highlighted: self.highlighted,
            underlined: self.underlined,
            user_widget: self.user_widget,
        }
    }
}

const EMPTY_SNAPSHOT: CellSnapshot<'static> = CellSnapshot {
    value: "",
    foreground: None,
    background: None,
    shadow: ShadowStyle::Flat,
    selected: false,
    highlighted: false,
    underlined: false,
    user_widget: None,
};

/// Row-major cell matrix with lazy allocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellStore {
    rows: usize,
    columns: usize,
    cells: Option<Vec<Cell>>,
}

impl CellStore {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn flat_index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }

    /// The cell record, if the matrix is allocated and in range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        let idx = self.flat_index(row, column)?;
        self.cells.as_ref()?.get(idx)
    }

    /// Mutable cell access, allocating the matrix on first write.
    /// Out-of-range coordinates warn and return `None`.
    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        let Some(idx) = self.flat_index(row, column) else {
            warn!(
                row,
                column,
                rows = self.rows,
                columns = self.columns,
                "cell access out of range, ignored"
            );
            return None;
        };
        let total = self.rows * self.columns;
        self.cells
            .get_or_insert_with(|| vec![Cell::default(); total])
            .get_mut(idx)
    }

    /// Cell text; empty for unallocated cells.
    pub fn value(&self, row: usize, column: usize) -> &str {
        self.cell(row, column).map_or("", |c| c.value.as_str())
    }

    pub fn set_value(&mut self, row: usize, column: usize, value: impl Into<String>) {
        if let Some(cell) = self.cell_mut(row, column) {
            cell.value = value.into();
        }
    }

    /// Draw-time view of a cell. Unallocated cells read as defaults.
    pub fn snapshot(&self, row: usize, column: usize) -> CellSnapshot<'_> {
        self.cell(row, column)
            .map_or(EMPTY_SNAPSHOT, Cell::snapshot)
    }

    /// Bulk-load values row by row. Short rows back-fill with empty values;
    /// surplus entries are dropped with a warning.
    pub fn load(&mut self, values: &[Vec<String>]) {
        if values.len() > self.rows {
            warn!(
                given = values.len(),
                rows = self.rows,
                "more value rows than grid rows, surplus dropped"
            );
        }
        for (r, row_values) in values.iter().take(self.rows).enumerate() {
            if row_values.len() > self.columns {
                warn!(
                    row = r,
                    given = row_values.len(),
                    columns = self.columns,
                    "more values than columns, surplus dropped"
                );
            }
            for (c, v) in row_values.iter().take(self.columns).enumerate() {
                self.set_value(r, c, v.clone());
            }
        }
    }

    pub fn insert_rows(&mut self, at: usize, count: usize) {
        let grown = self
            .rows
            .checked_add(count)
            .and_then(|rows| rows.checked_mul(self.columns.max(1)));
        if at > self.rows || grown.is_none() {
            warn!(at, count, rows = self.rows, "row insertion out of range, ignored");
            return;
        }
        self.rows += count;
        if let Some(cells) = self.cells.as_mut() {
            let pos = at * self.columns;
            cells.splice(pos..pos, std::iter::repeat_with(Cell::default).take(count * self.columns));
        }
    }

    pub fn delete_rows(&mut self, at: usize, count: usize) {
        if at.checked_add(count).map_or(true, |end| end > self.rows) {
            warn!(at, count, rows = self.rows, "row range out of range, ignored");
            return;
        }
        self.rows -= count;
        if let Some(cells) = self.cells.as_mut() {
            let start = at * self.columns;
            let end = start + count * self.columns;
            cells.drain(start..end);
        }
    }

    pub fn insert_columns(&mut self, at: usize, count: usize) {
        let grown = self
            .columns
            .checked_add(count)
            .and_then(|columns| columns.checked_mul(self.rows.max(1)));
        if at > self.columns || grown.is_none() {
            warn!(at, count, columns = self.columns, "column insertion out of range, ignored");
            return;
        }
        let old_columns = self.columns;
        self.columns += count;
        if let Some(cells) = self.cells.take() {
            let mut next = Vec::with_capacity(self.rows * self.columns);
            for chunk in cells.chunks(old_columns.max(1)) {
                next.extend(chunk.iter().take(at).cloned());
                next.extend(std::iter::repeat_with(Cell::default).take(count));
                next.extend(chunk.iter().skip(at).cloned());
            }
            self.cells = Some(next);
        }
    }

    pub fn delete_columns(&mut self, at: usize, count: usize) {
        if at.checked_add(count).map_or(true, |end| end > self.columns) {
            warn!(at, count, columns = self.columns, "column range out of range, ignored");
            return;
        }
        let old_columns = self.columns;
        self.columns -= count;
        if let Some(cells) = self.cells.take() {
            let mut next = Vec::with_capacity(self.rows * self.columns);
            for chunk in cells.chunks(old_columns.max(1)) {
                next.extend(
                    chunk
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i < at || *i >= at + count)
                        .map(|(_, c)| c.clone()),
                );
            }
            self.cells = Some(next);
        }
    }
}

/// Per-index side data for one axis: sizes and labels. The arrays always
/// agree in length with the axis's index count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AxisData {
    sizes: Vec<i32>,
    labels: Vec<String>,
}

impl AxisData {
    /// Build side arrays for `count` indices. A short or missing size array
    /// back-fills with the default; surplus entries are dropped with a
    /// warning.
    pub fn new(count: usize, sizes: Option<&[i32]>, default_size: i32) -> Self {
        let mut data = Self {
            sizes: Vec::new(),
            labels: vec![String::new(); count],
        };
        match sizes {
            Some(given) => {
                if given.len() > count {
                    warn!(
                        given = given.len(),
                        count, "more sizes than axis indices, surplus dropped"
                    );
                }
                data.sizes.extend(given.iter().take(count).copied());
                if given.len() < count {
                    warn!(
                        given = given.len(),
                        count, "fewer sizes than axis indices, back-filling default"
                    );
                    data.sizes.resize(count, default_size);
                }
            }
            None => data.sizes.resize(count, default_size),
        }
        data
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn sizes(&self) -> &[i32] {
        &self.sizes
    }

    pub fn size_of(&self, index: usize) -> i32 {
        self.sizes.get(index).copied().unwrap_or(0)
    }

    pub fn set_size(&mut self, index: usize, size: i32) {
        match self.sizes.get_mut(index) {
            Some(slot) => *slot = size,
            None => warn!(index, len = self.sizes.len(), "size index out of range, ignored"),
        }
    }

    /// Replace all sizes, back-filling or truncating against the axis count.
    pub fn set_sizes(&mut self, sizes: &[i32], default_size: i32) {
        let count = self.sizes.len();
        self.sizes = Self::new(count, Some(sizes), default_size).sizes;
    }

    pub fn label(&self, index: usize) -> &str {
        self.labels.get(index).map_or("", String::as_str)
    }

    pub fn set_label(&mut self, index: usize, label: impl Into<String>) {
        match self.labels.get_mut(index) {
            Some(slot) => *slot = label.into(),
            None => warn!(index, len = self.labels.len(), "label index out of range, ignored"),
        }
    }

    /// Replace all labels, back-filling with empty strings.
    pub fn set_labels(&mut self, labels: &[String]) {
        let count = self.labels.len();
        if labels.len() > count {
            warn!(
                given = labels.len(),
                count, "more labels than axis indices, surplus dropped"
            );
        }
        self.labels.clear();
        self.labels.extend(labels.iter().take(count).cloned());
        self.labels.resize(count, String::new());
    }

    /// Splice `count` new indices in at `at`, sized by the default.
    pub fn insert(&mut self, at: usize, count: usize, default_size: i32) {
        if at > self.sizes.len() || self.sizes.len().checked_add(count).is_none() {
            warn!(at, count, len = self.sizes.len(), "splice out of range, ignored");
            return;
        }
        self.sizes
            .splice(at..at, std::iter::repeat(default_size).take(count));
        self.labels
            .splice(at..at, std::iter::repeat_with(String::new).take(count));
    }

    /// Remove `count` indices starting at `at`.
    pub fn delete(&mut self, at: usize, count: usize) {
        let Some(end) = at.checked_add(count).filter(|&end| end <= self.sizes.len()) else {
            warn!(at, count, len = self.sizes.len(), "splice range out of range, ignored");
            return;
        };
        self.sizes.drain(at..end);
        self.labels.drain(at..end);
    }
}
