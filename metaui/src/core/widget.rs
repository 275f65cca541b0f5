//! Widget trait and the state every widget shares

use std::any::Any;

use crate::core::context::Color;
use crate::core::geometry::{CornerRadius, Padding, Point, Rect, Size};
use crate::core::tree::Children;
use crate::core::{EventCtx, KeyEvent, MessageKind, MouseButton, MouseEvent, ScrollEvent};
use crate::layout::SizeSpec;
use crate::render::Renderer;
use crate::style::{BoxStyle, Gradient, Shadow};

slotmap::new_key_type! {
    /// Generation-checked handle to a widget in a [`crate::core::WidgetTree`]
    pub struct WidgetId;
}

/// Upcast helper so trait objects can be downcast to their concrete type
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Core trait that all UI components implement.
///
/// The tree drives the pipeline: it resolves size specs and margins itself
/// and only calls into the widget for the parts that differ per type
/// (content size, child placement, painting, input).
pub trait Widget: AsAny {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Whether the tree may attach children to this widget
    fn accepts_children(&self) -> bool {
        false
    }

    /// Load renderer resources the next measure depends on. Runs before
    /// each frame's measure pass.
    fn prepare(&mut self, renderer: &mut dyn Renderer) {
        let _ = renderer;
    }

    /// Natural size of the content, excluding padding
    fn measure_content(&mut self, available: Size, children: &mut Children<'_>) -> Size {
        let _ = (available, children);
        Size::ZERO
    }

    /// Measure and place children inside `content`
    fn layout_children(&mut self, content: Rect, children: &mut Children<'_>) {
        let _ = (content, children);
    }

    /// Paint this widget. Children are painted afterwards by the tree.
    fn render(&self, renderer: &mut dyn Renderer) {
        self.base().paint(renderer);
    }

    /// Returns the widget's hover state
    fn handle_mouse_move(&mut self, event: &MouseEvent, ctx: &mut EventCtx) -> bool {
        self.base_mut().track_hover(event.position, ctx)
    }

    /// Returns true when the event was consumed
    fn handle_mouse_button(&mut self, event: &MouseEvent, ctx: &mut EventCtx) -> bool {
        let clicked = self.base_mut().click(event, ctx);
        // Containers report the click but let it reach their children
        clicked && !self.accepts_children()
    }

    fn handle_key(&mut self, event: &KeyEvent, ctx: &mut EventCtx) -> bool {
        let _ = (event, ctx);
        false
    }

    fn handle_scroll(&mut self, event: &ScrollEvent, ctx: &mut EventCtx, children: &mut Children<'_>) -> bool {
        let _ = (event, ctx, children);
        false
    }
}

impl dyn Widget {
    pub fn downcast_ref<T: Widget>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Widget>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Sizing policy, style, flags and the geometry computed by the last frame
#[derive(Debug, Clone)]
pub struct WidgetBase {
    pub width: SizeSpec,
    pub height: SizeSpec,
    pub style: BoxStyle,
    pub visible: bool,
    pub enabled: bool,
    pub(crate) hovered: bool,
    pub(crate) focused: bool,
    pub(crate) bounds: Rect,
    pub(crate) content_bounds: Rect,
    pub(crate) measured: Size,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self {
            width: SizeSpec::content(),
            height: SizeSpec::content(),
            style: BoxStyle::default(),
            visible: true,
            enabled: true,
            hovered: false,
            focused: false,
            bounds: Rect::default(),
            content_bounds: Rect::default(),
            measured: Size::ZERO,
        }
    }
}

impl WidgetBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sized(width: SizeSpec, height: SizeSpec) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn content_bounds(&self) -> Rect {
        self.content_bounds
    }

    /// Size recorded by the last measure pass
    pub fn measured_size(&self) -> Size {
        self.measured
    }

    pub fn paint(&self, renderer: &mut dyn Renderer) {
        self.style.paint(self.bounds, renderer);
    }

    /// Update the hover flag from a pointer position, emitting `Hovered`
    /// only on transitions
    pub fn track_hover(&mut self, position: Point, ctx: &mut EventCtx) -> bool {
        let hovered = self.bounds.contains(position);
        if hovered != self.hovered {
            self.hovered = hovered;
            ctx.emit(MessageKind::Hovered(hovered));
        }
        hovered
    }

    /// Left press inside bounds emits `Clicked` and returns true
    pub fn click(&mut self, event: &MouseEvent, ctx: &mut EventCtx) -> bool {
        if !self.enabled {
            return false;
        }
        if event.pressed && event.button == MouseButton::Left && self.bounds.contains(event.position) {
            ctx.emit(MessageKind::Clicked);
            return true;
        }
        false
    }

    /// Returns true when the focus state changed
    pub(crate) fn set_focus(&mut self, focus: bool) -> bool {
        if self.focused == focus {
            return false;
        }
        self.focused = focus;
        true
    }
}

/// Fluent configuration shared by every widget
pub trait WidgetExt: Widget + Sized {
    fn width(mut self, spec: impl Into<SizeSpec>) -> Self {
        self.base_mut().width = spec.into();
        self
    }

    fn height(mut self, spec: impl Into<SizeSpec>) -> Self {
        self.base_mut().height = spec.into();
        self
    }

    fn size(self, width: impl Into<SizeSpec>, height: impl Into<SizeSpec>) -> Self {
        self.width(width).height(height)
    }

    fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.base_mut().style.padding = padding.into();
        self
    }

    fn margin(mut self, margin: impl Into<Padding>) -> Self {
        self.base_mut().style.margin = margin.into();
        self
    }

    fn background(mut self, color: Color) -> Self {
        self.base_mut().style.background = color;
        self
    }

    fn border(mut self, width: f32, color: Color) -> Self {
        let style = &mut self.base_mut().style;
        style.border_width = width;
        style.border_color = color;
        self
    }

    fn border_radius(mut self, radius: impl Into<CornerRadius>) -> Self {
        self.base_mut().style.border_radius = radius.into();
        self
    }

    fn shadow(mut self, shadow: Shadow) -> Self {
        self.base_mut().style.shadow = Some(shadow);
        self
    }

    fn gradient(mut self, gradient: Gradient) -> Self {
        self.base_mut().style.gradient = Some(gradient);
        self
    }

    fn style(mut self, style: BoxStyle) -> Self {
        self.base_mut().style = style;
        self
    }

    fn visible(mut self, visible: bool) -> Self {
        self.base_mut().visible = visible;
        self
    }

    fn enabled(mut self, enabled: bool) -> Self {
        self.base_mut().enabled = enabled;
        self
    }
}

impl<T: Widget> WidgetExt for T {}
