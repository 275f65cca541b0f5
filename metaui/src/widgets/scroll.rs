//! Scrollable containers

use crate::core::geometry::{Rect, Size};
use crate::core::{Children, EventCtx, MessageKind, ScrollEvent, Widget, WidgetBase};
use crate::layout::{Direction, SizeSpec};

/// Extent offered to the content along the scroll axis
const UNBOUNDED: f32 = 1e9;

/// Pixels scrolled per wheel unit
pub const DEFAULT_SCROLL_STEP: f32 = 20.0;

/// Scrollable viewport around a single child. Extra children are ignored.
///
/// The offset only clamps at zero; scrolling past the end of the content is
/// allowed.
pub struct ScrollView {
    base: WidgetBase,
    direction: Direction,
    offset: f32,
    step: f32,
}

impl ScrollView {
    pub fn new() -> Self {
        Self {
            base: WidgetBase::sized(SizeSpec::fill(), SizeSpec::fill()),
            direction: Direction::Vertical,
            offset: 0.0,
            step: DEFAULT_SCROLL_STEP,
        }
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn horizontal(self) -> Self {
        self.direction(Direction::Horizontal)
    }

    pub fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Current scroll offset along the scroll axis
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset.max(0.0);
    }

    fn child_available(&self, viewport: Size) -> Size {
        match self.direction {
            Direction::Vertical => Size::new(viewport.width, UNBOUNDED),
            Direction::Horizontal => Size::new(UNBOUNDED, viewport.height),
        }
    }
}

impl Default for ScrollView {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ScrollView {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn accepts_children(&self) -> bool { true }

    fn measure_content(&mut self, available: Size, children: &mut Children<'_>) -> Size {
        if children.is_empty() {
            return Size::ZERO;
        }
        let child = children.measure(0, self.child_available(available));
        match self.direction {
            Direction::Vertical => Size::new(available.width, child.height),
            Direction::Horizontal => Size::new(child.width, available.height),
        }
    }

    fn layout_children(&mut self, content: Rect, children: &mut Children<'_>) {
        if children.is_empty() {
            return;
        }
        let size = children.measure(0, self.child_available(content.size()));
        let (dx, dy) = match self.direction {
            Direction::Vertical => (0.0, self.offset),
            Direction::Horizontal => (self.offset, 0.0),
        };
        children.layout(0, Rect::new(content.x - dx, content.y - dy, size.width, size.height));
    }

    fn handle_scroll(&mut self, event: &ScrollEvent, ctx: &mut EventCtx, children: &mut Children<'_>) -> bool {
        if !self.base.content_bounds.contains(event.position) {
            return false;
        }
        let delta = match self.direction {
            Direction::Vertical => event.delta_y,
            Direction::Horizontal => event.delta_x,
        };
        self.offset = (self.offset - delta * self.step).max(0.0);
        let content = self.base.content_bounds;
        self.layout_children(content, children);
        ctx.emit(MessageKind::Scrolled { offset: self.offset });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::core::{MessageKind, WidgetExt, WidgetTree};
    use crate::render::{ApproxText, Canvas};
    use crate::widgets::{BoxLayout, Spacer};

    fn scroll_at(y: f32, delta: f32) -> ScrollEvent {
        ScrollEvent {
            position: Point::new(10.0, y),
            delta_x: 0.0,
            delta_y: delta,
        }
    }

    fn setup() -> (WidgetTree, crate::core::WidgetId, crate::core::WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(ScrollView::new().size(200.0, 100.0));
        let column = tree.add_child(root, BoxLayout::column()).unwrap();
        for _ in 0..10 {
            tree.add_child(column, Spacer::new(0.0).size(50.0, 50.0)).unwrap();
        }
        tree.frame(Size::new(200.0, 100.0), &mut Canvas::new(ApproxText));
        (tree, root, column)
    }

    #[test]
    fn test_content_measured_unbounded_on_scroll_axis() {
        let (tree, _, column) = setup();
        let b = tree.base(column).unwrap().bounds();
        assert_eq!(b.height, 500.0);
        assert_eq!(b.y, 0.0);
    }

    #[test]
    fn test_wheel_moves_content_and_relayouts() {
        let (mut tree, root, column) = setup();
        assert!(tree.handle_scroll(&scroll_at(50.0, -2.0)));
        assert_eq!(tree.get::<ScrollView>(root).unwrap().offset(), 40.0);
        assert_eq!(tree.base(column).unwrap().bounds().y, -40.0);
        let msgs = tree.drain_messages();
        assert_eq!(msgs.last().unwrap().kind, MessageKind::Scrolled { offset: 40.0 });
    }

    #[test]
    fn test_offset_clamps_at_zero_only() {
        let (mut tree, root, _) = setup();
        tree.handle_scroll(&scroll_at(50.0, 5.0));
        assert_eq!(tree.get::<ScrollView>(root).unwrap().offset(), 0.0);

        tree.handle_scroll(&scroll_at(50.0, -100.0));
        assert_eq!(tree.get::<ScrollView>(root).unwrap().offset(), 2000.0);
    }

    #[test]
    fn test_scroll_outside_viewport_is_ignored() {
        let (mut tree, root, _) = setup();
        assert!(!tree.handle_scroll(&scroll_at(150.0, -1.0)));
        assert_eq!(tree.get::<ScrollView>(root).unwrap().offset(), 0.0);
    }

    #[test]
    fn test_horizontal_scrolls_on_x_delta_only() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(ScrollView::new().horizontal().size(200.0, 100.0));
        let row = tree.add_child(root, BoxLayout::row()).unwrap();
        for _ in 0..10 {
            tree.add_child(row, Spacer::new(0.0).size(50.0, 50.0)).unwrap();
        }
        tree.frame(Size::new(200.0, 100.0), &mut Canvas::new(ApproxText));
        assert_eq!(tree.base(row).unwrap().bounds().width, 500.0);

        let event = ScrollEvent {
            position: Point::new(10.0, 50.0),
            delta_x: -3.0,
            delta_y: -5.0,
        };
        assert!(tree.handle_scroll(&event));
        assert_eq!(tree.get::<ScrollView>(root).unwrap().offset(), 60.0);
        let b = tree.base(row).unwrap().bounds();
        assert_eq!((b.x, b.y), (-60.0, 0.0));

        tree.handle_scroll(&ScrollEvent { delta_x: 10.0, ..event });
        assert_eq!(tree.get::<ScrollView>(root).unwrap().offset(), 0.0);
        assert_eq!(tree.base(row).unwrap().bounds().x, 0.0);
    }
}
