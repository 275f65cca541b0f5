//! Container widgets (BoxLayout, Stack, Grid, Sidebar) and the spacing
//! primitives that go inside them

use crate::core::context::Color;
use crate::core::geometry::{Rect, Size};
use crate::core::{Children, Widget, WidgetBase};
use crate::layout::{Alignment, Direction, SizeSpec};
use crate::render::Renderer;

/// Stacks children along one axis (Row / Column)
pub struct BoxLayout {
    base: WidgetBase,
    direction: Direction,
    spacing: f32,
    align: Alignment,
    cross_align: Alignment,
}

impl BoxLayout {
    pub fn new(direction: Direction) -> Self {
        Self {
            base: WidgetBase::new(),
            direction,
            spacing: 0.0,
            align: Alignment::Start,
            cross_align: Alignment::Start,
        }
    }

    pub fn row() -> Self {
        Self::new(Direction::Horizontal)
    }

    pub fn column() -> Self {
        Self::new(Direction::Vertical)
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Main-axis placement of the whole run of children
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn cross_align(mut self, align: Alignment) -> Self {
        self.cross_align = align;
        self
    }

    fn total_spacing(&self, count: usize) -> f32 {
        self.spacing * count.saturating_sub(1) as f32
    }

    /// Split a size into (main, cross) extents
    fn axes(&self, size: Size) -> (f32, f32) {
        match self.direction {
            Direction::Horizontal => (size.width, size.height),
            Direction::Vertical => (size.height, size.width),
        }
    }

    fn from_axes(&self, main: f32, cross: f32) -> Size {
        match self.direction {
            Direction::Horizontal => Size::new(main, cross),
            Direction::Vertical => Size::new(cross, main),
        }
    }
}

impl Default for BoxLayout {
    fn default() -> Self {
        Self::row()
    }
}

impl Widget for BoxLayout {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn accepts_children(&self) -> bool { true }

    fn measure_content(&mut self, available: Size, children: &mut Children<'_>) -> Size {
        if children.is_empty() {
            return Size::ZERO;
        }
        let spacing = self.total_spacing(children.len());
        let (avail_main, avail_cross) = self.axes(available);
        let child_available = self.from_axes((avail_main - spacing).max(0.0), avail_cross);

        let mut main = 0.0f32;
        let mut cross = 0.0f32;
        for i in 0..children.len() {
            let (m, c) = self.axes(children.measure(i, child_available));
            main += m;
            cross = cross.max(c);
        }
        self.from_axes(main + spacing, cross)
    }

    fn layout_children(&mut self, content: Rect, children: &mut Children<'_>) {
        if children.is_empty() {
            return;
        }
        let spacing = self.total_spacing(children.len());
        let (content_main, content_cross) = self.axes(content.size());
        let child_available = self.from_axes((content_main - spacing).max(0.0), content_cross);

        let sizes: Vec<Size> = (0..children.len())
            .map(|i| children.measure(i, child_available))
            .collect();
        let total: f32 = sizes.iter().map(|s| self.axes(*s).0).sum::<f32>() + spacing;

        let (origin_main, origin_cross) = match self.direction {
            Direction::Horizontal => (content.x, content.y),
            Direction::Vertical => (content.y, content.x),
        };
        let mut cursor = origin_main + self.align.offset(content_main, total);

        for (i, size) in sizes.iter().enumerate() {
            let (main, measured_cross) = self.axes(*size);
            let cross = if self.cross_align == Alignment::Stretch {
                content_cross
            } else {
                measured_cross
            };
            let cross_pos = origin_cross + self.cross_align.offset(content_cross, cross);
            let rect = match self.direction {
                Direction::Horizontal => Rect::new(cursor, cross_pos, main, cross),
                Direction::Vertical => Rect::new(cross_pos, cursor, cross, main),
            };
            children.layout(i, rect);
            cursor += main + self.spacing;
        }
    }
}

/// Overlays children in the same box, each aligned independently
pub struct Stack {
    base: WidgetBase,
    horizontal: Alignment,
    vertical: Alignment,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            horizontal: Alignment::Start,
            vertical: Alignment::Start,
        }
    }

    pub fn align(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Stack {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn accepts_children(&self) -> bool { true }

    fn measure_content(&mut self, available: Size, children: &mut Children<'_>) -> Size {
        let mut result = Size::ZERO;
        for i in 0..children.len() {
            let size = children.measure(i, available);
            result.width = result.width.max(size.width);
            result.height = result.height.max(size.height);
        }
        result
    }

    fn layout_children(&mut self, content: Rect, children: &mut Children<'_>) {
        for i in 0..children.len() {
            let size = children.measure(i, content.size());
            let x = content.x + self.horizontal.offset(content.width, size.width);
            let y = content.y + self.vertical.offset(content.height, size.height);
            children.layout(i, Rect::new(x, y, size.width, size.height));
        }
    }
}

/// Fixed-column grid with uniform cells, filled row-major
pub struct Grid {
    base: WidgetBase,
    columns: usize,
    spacing: f32,
    cell_size: Option<Size>,
}

impl Grid {
    pub fn new(columns: usize) -> Self {
        Self {
            base: WidgetBase::new(),
            columns,
            spacing: 0.0,
            cell_size: None,
        }
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Explicit cell size; a non-positive height falls back to the width
    pub fn cell_size(mut self, size: Size) -> Self {
        self.cell_size = Some(size);
        self
    }

    fn cell(&self, width: f32) -> Size {
        let derived = (width - self.spacing * (self.columns as f32 - 1.0)) / self.columns as f32;
        let (w, h) = match self.cell_size {
            Some(s) => (
                if s.width > 0.0 { s.width } else { derived },
                s.height,
            ),
            None => (derived, 0.0),
        };
        let w = w.max(0.0);
        Size::new(w, if h > 0.0 { h } else { w })
    }

    fn rows(&self, count: usize) -> usize {
        count.div_ceil(self.columns)
    }
}

impl Widget for Grid {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn accepts_children(&self) -> bool { true }

    fn measure_content(&mut self, available: Size, children: &mut Children<'_>) -> Size {
        if children.is_empty() || self.columns == 0 {
            return Size::ZERO;
        }
        let cell = self.cell(available.width);
        for i in 0..children.len() {
            children.measure(i, cell);
        }
        let cols = self.columns as f32;
        let rows = self.rows(children.len()) as f32;
        Size::new(
            cell.width * cols + self.spacing * (cols - 1.0),
            cell.height * rows + self.spacing * (rows - 1.0),
        )
    }

    fn layout_children(&mut self, content: Rect, children: &mut Children<'_>) {
        if children.is_empty() || self.columns == 0 {
            return;
        }
        let cell = self.cell(content.width);
        for i in 0..children.len() {
            let (row, col) = (i / self.columns, i % self.columns);
            let x = content.x + col as f32 * (cell.width + self.spacing);
            let y = content.y + row as f32 * (cell.height + self.spacing);
            children.measure(i, cell);
            children.layout(i, Rect::new(x, y, cell.width, cell.height));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarPosition {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

/// Two-pane split: child 0 is the sidebar, child 1 the main content
pub struct Sidebar {
    base: WidgetBase,
    position: SidebarPosition,
    extent: f32,
}

impl Sidebar {
    pub fn new(position: SidebarPosition, extent: f32) -> Self {
        Self {
            base: WidgetBase::sized(SizeSpec::fill(), SizeSpec::fill()),
            position,
            extent,
        }
    }

    pub fn position(mut self, position: SidebarPosition) -> Self {
        self.position = position;
        self
    }

    pub fn extent(mut self, extent: f32) -> Self {
        self.extent = extent;
        self
    }

    /// (sidebar, main) rectangles inside `content`
    pub fn split(&self, content: Rect) -> (Rect, Rect) {
        let Rect { x, y, width, height } = content;
        match self.position {
            SidebarPosition::Left => {
                let s = self.extent.clamp(0.0, width);
                (Rect::new(x, y, s, height), Rect::new(x + s, y, width - s, height))
            }
            SidebarPosition::Right => {
                let s = self.extent.clamp(0.0, width);
                (Rect::new(x + width - s, y, s, height), Rect::new(x, y, width - s, height))
            }
            SidebarPosition::Top => {
                let s = self.extent.clamp(0.0, height);
                (Rect::new(x, y, width, s), Rect::new(x, y + s, width, height - s))
            }
            SidebarPosition::Bottom => {
                let s = self.extent.clamp(0.0, height);
                (Rect::new(x, y + height - s, width, s), Rect::new(x, y, width, height - s))
            }
        }
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new(SidebarPosition::Left, 200.0)
    }
}

impl Widget for Sidebar {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn accepts_children(&self) -> bool { true }

    fn layout_children(&mut self, content: Rect, children: &mut Children<'_>) {
        if children.len() < 2 {
            tracing::warn!(children = children.len(), "sidebar needs two children, skipping layout");
            return;
        }
        let (side, main) = self.split(content);
        for (i, rect) in [(0, side), (1, main)] {
            children.measure(i, rect.size());
            children.layout(i, rect);
        }
    }
}

/// Empty space; renders nothing
pub struct Spacer {
    base: WidgetBase,
}

impl Spacer {
    /// Fixed square gap
    pub fn new(size: f32) -> Self {
        Self {
            base: WidgetBase::sized(SizeSpec::fixed(size), SizeSpec::fixed(size)),
        }
    }

    /// Takes all the space it is offered
    pub fn flexible() -> Self {
        Self {
            base: WidgetBase::sized(SizeSpec::fill(), SizeSpec::fill()),
        }
    }
}

impl Default for Spacer {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl Widget for Spacer {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn render(&self, _renderer: &mut dyn Renderer) {}
}

/// Thin rule filling its main axis
pub struct Divider {
    base: WidgetBase,
    direction: Direction,
}

impl Divider {
    pub fn new() -> Self {
        Self::with_direction(Direction::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::with_direction(Direction::Vertical)
    }

    pub fn with_direction(direction: Direction) -> Self {
        let mut base = match direction {
            Direction::Horizontal => WidgetBase::sized(SizeSpec::fill(), SizeSpec::fixed(1.0)),
            Direction::Vertical => WidgetBase::sized(SizeSpec::fixed(1.0), SizeSpec::fill()),
        };
        base.style.background = Color::gray(0.3);
        Self { base, direction }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.base.style.background = color;
        self
    }

    pub fn thickness(mut self, thickness: f32) -> Self {
        match self.direction {
            Direction::Horizontal => self.base.height = SizeSpec::fixed(thickness),
            Direction::Vertical => self.base.width = SizeSpec::fixed(thickness),
        }
        self
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Divider {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
}
