//! Rendering adapter for drag visuals

use crate::types::{Card, CardId, ColumnId};
use std::sync::Mutex;

/// Draws the drag image and drop-target highlights.
///
/// The controller calls these in response to gestures; implementations only
/// paint, they never touch board state.
pub trait DragRenderer: Send + Sync {
    /// Build the image that follows the pointer while `card` is dragged
    fn show_drag_image(&self, card: &Card);

    fn clear_drag_image(&self);

    /// Turn the "drop here" highlight of `column` on or off
    fn set_drop_highlight(&self, column: ColumnId, highlighted: bool);
}

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl DragRenderer for NoopRenderer {
    fn show_drag_image(&self, _card: &Card) {}

    fn clear_drag_image(&self) {}

    fn set_drop_highlight(&self, _column: ColumnId, _highlighted: bool) {}
}

/// One call made on a [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    DragImage(CardId),
    ClearDragImage,
    Highlight(ColumnId, bool),
}

/// Renderer that records every call, for headless front ends and tests
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<RenderEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Columns whose highlight is currently on, by replaying recorded events
    pub fn highlighted(&self) -> Vec<ColumnId> {
        let mut on: Vec<ColumnId> = Vec::new();
        for event in self.lock().iter() {
            if let RenderEvent::Highlight(column, highlighted) = event {
                on.retain(|c| c != column);
                if *highlighted {
                    on.push(*column);
                }
            }
        }
        on
    }

    fn push(&self, event: RenderEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RenderEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DragRenderer for RecordingRenderer {
    fn show_drag_image(&self, card: &Card) {
        self.push(RenderEvent::DragImage(card.id.clone()));
    }

    fn clear_drag_image(&self) {
        self.push(RenderEvent::ClearDragImage);
    }

    fn set_drop_highlight(&self, column: ColumnId, highlighted: bool) {
        self.push(RenderEvent::Highlight(column, highlighted));
    }
}

impl<R: DragRenderer + ?Sized> DragRenderer for std::sync::Arc<R> {
    fn show_drag_image(&self, card: &Card) {
        (**self).show_drag_image(card)
    }

    fn clear_drag_image(&self) {
        (**self).clear_drag_image()
    }

    fn set_drop_highlight(&self, column: ColumnId, highlighted: bool) {
        (**self).set_drop_highlight(column, highlighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_renderer_tracks_highlights() {
        let renderer = RecordingRenderer::new();
        renderer.set_drop_highlight(ColumnId::Todo, true);
        renderer.set_drop_highlight(ColumnId::Done, true);
        renderer.set_drop_highlight(ColumnId::Todo, false);
        assert_eq!(renderer.highlighted(), vec![ColumnId::Done]);

        let events = renderer.take();
        assert_eq!(events.len(), 3);
        assert!(renderer.take().is_empty());
    }
}
