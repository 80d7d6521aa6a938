//! Visible window of a virtualized card list
//!
//! Rows have a fixed estimated height, so the window is pure arithmetic on
//! the scroll offset, viewport height and list length. Only rows inside the
//! window (plus overscan on both sides) need rendering; a spacer of the full
//! list height keeps the scrollbar honest.

use deskboard_config::{VirtualizationConfig, DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT};
use serde::Serialize;
use std::ops::Range;

/// Rows to render and where to put them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleWindow {
    /// First rendered row
    pub start: usize,
    /// One past the last rendered row
    pub end: usize,
    /// Height of the whole list, `len * row_height`
    pub total_height: f64,
    /// Translation of the first rendered row, `start * row_height`
    pub offset: f64,
}

impl VisibleWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, row: usize) -> bool {
        self.range().contains(&row)
    }
}

fn sanitize_offset(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn sanitize_row_height(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

/// Compute the window for scroll offset `scroll_top`, viewport height
/// `viewport`, fixed `row_height`, `len` rows and `overscan` extra rows
/// on each side.
///
/// Negative or non-finite offsets count as 0; a non-positive row height
/// counts as 1. Always `start <= end <= len`.
pub fn visible_range(
    scroll_top: f64,
    viewport: f64,
    row_height: f64,
    len: usize,
    overscan: usize,
) -> VisibleWindow {
    let scroll_top = sanitize_offset(scroll_top);
    let viewport = sanitize_offset(viewport);
    let row_height = sanitize_row_height(row_height);

    // float-to-int casts saturate
    let first = (scroll_top / row_height).floor() as usize;
    let last = ((scroll_top + viewport) / row_height).floor() as usize;

    let start = first.saturating_sub(overscan).min(len);
    let end = last
        .saturating_add(1)
        .saturating_add(overscan)
        .min(len)
        .max(start);

    VisibleWindow {
        start,
        end,
        total_height: len as f64 * row_height,
        offset: start as f64 * row_height,
    }
}

/// Scroll and viewport state of one list, with the last computed window.
///
/// Every update returns whether the window changed, so callers re-render
/// only when needed.
#[derive(Debug, Clone)]
pub struct VirtualList {
    row_height: f64,
    overscan: usize,
    scroll_top: f64,
    viewport: f64,
    len: usize,
    window: VisibleWindow,
}

impl Default for VirtualList {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_HEIGHT, DEFAULT_OVERSCAN)
    }
}

impl VirtualList {
    pub fn new(row_height: f64, overscan: usize) -> Self {
        let row_height = sanitize_row_height(row_height);
        Self {
            row_height,
            overscan,
            scroll_top: 0.0,
            viewport: 0.0,
            len: 0,
            window: visible_range(0.0, 0.0, row_height, 0, overscan),
        }
    }

    pub fn from_config(config: &VirtualizationConfig) -> Self {
        Self::new(config.row_height, config.overscan)
    }

    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn on_scroll(&mut self, scroll_top: f64) -> bool {
        self.scroll_top = sanitize_offset(scroll_top);
        self.recompute()
    }

    pub fn on_resize(&mut self, viewport: f64) -> bool {
        self.viewport = sanitize_offset(viewport);
        self.recompute()
    }

    /// The underlying list grew or shrank
    pub fn set_len(&mut self, len: usize) -> bool {
        self.len = len;
        self.recompute()
    }

    /// The rows of `items` inside the window
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.window.end.min(items.len());
        let start = self.window.start.min(end);
        &items[start..end]
    }

    fn recompute(&mut self) -> bool {
        let window = visible_range(
            self.scroll_top,
            self.viewport,
            self.row_height,
            self.len,
            self.overscan,
        );
        let changed = window != self.window;
        self.window = window;
        changed
    }
}
