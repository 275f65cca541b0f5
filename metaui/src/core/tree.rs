//! Widget arena, frame pipeline and event routing

use slotmap::{SecondaryMap, SlotMap};

use crate::core::context::Outbox;
use crate::core::geometry::{Rect, Size};
use crate::core::{
    EventCtx, InputEvent, KeyEvent, Message, MessageKind, MouseEvent, ScrollEvent, Widget,
    WidgetBase, WidgetId,
};
use crate::error::{Error, Result};
use crate::render::Renderer;

struct Node {
    /// Taken out while the widget itself is being driven
    widget: Option<Box<dyn Widget>>,
    children: Vec<WidgetId>,
}

/// Owns every widget and drives measure, layout, render and dispatch.
///
/// Children are stored as ordered id lists on their parent. Insertion order
/// is paint order and hit-test priority at the same time, so the first child
/// added wins a press even where a later sibling is painted over it.
#[derive(Default)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
    parents: SecondaryMap<WidgetId, WidgetId>,
    root: Option<WidgetId>,
    focused: Option<WidgetId>,
    outbox: Outbox,
}

/// A container's view of its children while it measures or places them
pub struct Children<'a> {
    tree: &'a mut WidgetTree,
    ids: &'a [WidgetId],
}

impl Children<'_> {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn id(&self, index: usize) -> Option<WidgetId> {
        self.ids.get(index).copied()
    }

    /// Measure child `index`; out-of-range indices measure as zero
    pub fn measure(&mut self, index: usize, available: Size) -> Size {
        match self.ids.get(index) {
            Some(&id) => self.tree.measure_node(id, available),
            None => Size::ZERO,
        }
    }

    pub fn layout(&mut self, index: usize, rect: Rect) {
        if let Some(&id) = self.ids.get(index) {
            self.tree.layout_node(id, rect);
        }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.id(index)
            .and_then(|id| self.tree.base(id))
            .is_some_and(|base| base.visible)
    }

    /// Size recorded by the child's last measure
    pub fn measured(&self, index: usize) -> Size {
        self.id(index)
            .and_then(|id| self.tree.base(id))
            .map_or(Size::ZERO, WidgetBase::measured_size)
    }
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `widget` as the root, dropping any previous root subtree
    pub fn set_root(&mut self, widget: impl Widget) -> WidgetId {
        if let Some(old) = self.root.take() {
            self.drop_subtree(old);
        }
        let id = self.insert(Box::new(widget));
        self.root = Some(id);
        tracing::debug!(?id, "root set");
        id
    }

    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    fn insert(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        self.nodes.insert(Node {
            widget: Some(widget),
            children: Vec::new(),
        })
    }

    pub fn add_child(&mut self, parent: WidgetId, child: impl Widget) -> Result<WidgetId> {
        self.add_boxed_child(parent, Box::new(child))
    }

    pub fn add_boxed_child(&mut self, parent: WidgetId, child: Box<dyn Widget>) -> Result<WidgetId> {
        let accepts = self
            .widget(parent)
            .ok_or(Error::StaleWidget(parent))?
            .accepts_children();
        if !accepts {
            return Err(Error::NotAContainer(parent));
        }
        let id = self.insert(child);
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        self.parents.insert(id, parent);
        tracing::debug!(?parent, ?id, "child added");
        Ok(id)
    }

    /// Remove a widget and its whole subtree
    pub fn remove(&mut self, id: WidgetId) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(Error::StaleWidget(id));
        }
        if let Some(parent) = self.parents.remove(id) {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|c| *c != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }
        self.drop_subtree(id);
        tracing::debug!(?id, "subtree removed");
        Ok(())
    }

    pub fn clear_children(&mut self, id: WidgetId) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::StaleWidget(id))?;
        let children = std::mem::take(&mut node.children);
        for child in children {
            self.drop_subtree(child);
        }
        Ok(())
    }

    fn drop_subtree(&mut self, id: WidgetId) {
        if let Some(node) = self.nodes.remove(id) {
            self.parents.remove(id);
            if self.focused == Some(id) {
                self.focused = None;
            }
            for child in node.children {
                self.drop_subtree(child);
            }
        }
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parents.get(id).copied()
    }

    pub fn widget(&self, id: WidgetId) -> Option<&(dyn Widget + 'static)> {
        self.nodes.get(id)?.widget.as_deref()
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        self.nodes.get_mut(id)?.widget.as_deref_mut()
    }

    /// Typed access to a widget
    pub fn get<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.widget(id)?.downcast_ref::<T>()
    }

    pub fn get_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.widget_mut(id)?.downcast_mut::<T>()
    }

    pub fn base(&self, id: WidgetId) -> Option<&WidgetBase> {
        self.widget(id).map(|w| w.base())
    }

    pub fn base_mut(&mut self, id: WidgetId) -> Option<&mut WidgetBase> {
        self.widget_mut(id).map(|w| w.base_mut())
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Move keyboard focus, blurring the previous holder. Stale ids clear
    /// focus.
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        let id = id.filter(|id| self.nodes.contains_key(*id));
        if self.focused == id {
            return;
        }
        if let Some(old) = self.focused.take() {
            self.apply_focus(old, false);
        }
        if let Some(new) = id {
            self.apply_focus(new, true);
        }
        self.focused = id;
        tracing::debug!(focused = ?id, "focus moved");
    }

    fn apply_focus(&mut self, id: WidgetId, focus: bool) {
        let changed = self
            .base_mut(id)
            .is_some_and(|base| base.set_focus(focus));
        if changed {
            self.outbox.messages.push(Message {
                source: id,
                kind: MessageKind::Focused(focus),
            });
        }
    }

    /// Messages emitted since the last drain, in emission order
    pub fn drain_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox.messages)
    }

    // --- frame pipeline ---

    /// Measure the root against the available size
    pub fn measure(&mut self, available: Size) -> Size {
        match self.root {
            Some(root) => self.measure_node(root, available),
            None => Size::ZERO,
        }
    }

    pub fn layout(&mut self, rect: Rect) {
        if let Some(root) = self.root {
            self.layout_node(root, rect);
        }
    }

    /// Paint the tree pre-order; later siblings paint over earlier ones
    pub fn render(&self, renderer: &mut dyn Renderer) {
        if let Some(root) = self.root {
            self.render_node(root, renderer);
        }
    }

    /// Let every widget load what its measurement needs from the renderer
    pub fn prepare(&mut self, renderer: &mut dyn Renderer) {
        for node in self.nodes.values_mut() {
            if let Some(widget) = node.widget.as_deref_mut() {
                widget.prepare(renderer);
            }
        }
    }

    /// Prepare, measure, lay out and render one frame filling `size`
    pub fn frame(&mut self, size: Size, renderer: &mut dyn Renderer) {
        self.prepare(renderer);
        self.measure(size);
        self.layout(Rect::from_size(size));
        self.render(renderer);
    }

    /// Run `f` with the node's widget and a view of its children. Returns
    /// `None` for stale ids and for a node already being driven.
    fn with_node<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut Children<'_>) -> R,
    ) -> Option<R> {
        let node = self.nodes.get_mut(id)?;
        let mut widget = node.widget.take()?;
        let ids = std::mem::take(&mut node.children);

        let result = {
            let mut children = Children { tree: self, ids: &ids };
            f(&mut *widget, &mut children)
        };

        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
            node.children = ids;
        }
        Some(result)
    }

    pub(crate) fn measure_node(&mut self, id: WidgetId, available: Size) -> Size {
        self.with_node(id, |widget, children| measure_widget(widget, available, children))
            .unwrap_or(Size::ZERO)
    }

    pub(crate) fn layout_node(&mut self, id: WidgetId, rect: Rect) {
        self.with_node(id, |widget, children| {
            let base = widget.base_mut();
            base.bounds = rect;
            base.content_bounds = rect.inset(base.style.padding);
            let content = base.content_bounds;
            widget.layout_children(content, children);
        });
    }

    fn render_node(&self, id: WidgetId, renderer: &mut dyn Renderer) {
        let Some(node) = self.nodes.get(id) else { return };
        let Some(widget) = node.widget.as_deref() else { return };
        if !widget.base().visible {
            return;
        }
        widget.render(renderer);
        for &child in &node.children {
            self.render_node(child, renderer);
        }
    }

    // --- dispatch ---

    /// Route an input event; returns true when a widget consumed it
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::MouseMove(e) => self.handle_mouse_move(e),
            InputEvent::MouseButton(e) => self.handle_mouse_button(e),
            InputEvent::Key(e) => self.handle_key(e),
            InputEvent::Scroll(e) => self.handle_scroll(e),
            InputEvent::Resize(_) => false,
        }
    }

    pub fn handle_mouse_move(&mut self, event: &MouseEvent) -> bool {
        let handled = match self.root {
            Some(root) => self.mouse_move_node(root, event),
            None => false,
        };
        self.finish_dispatch();
        handled
    }

    /// A press that nobody claims focus for and that lands outside the
    /// focused widget blurs it
    pub fn handle_mouse_button(&mut self, event: &MouseEvent) -> bool {
        let handled = match self.root {
            Some(root) => self.mouse_button_node(root, event),
            None => false,
        };
        if event.pressed && self.outbox.focus_request.is_none() {
            let outside = self
                .focused
                .and_then(|id| self.base(id))
                .is_some_and(|base| !base.bounds().contains(event.position));
            if outside {
                self.set_focus(None);
            }
        }
        self.finish_dispatch();
        handled
    }

    /// Keys go to the focused widget, or pre-order through the tree when
    /// nothing holds focus
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let handled = match (self.focused, self.root) {
            (Some(focused), _) => self
                .with_node(focused, |widget, children| {
                    let mut ctx = EventCtx::new(focused, &mut children.tree.outbox);
                    widget.handle_key(event, &mut ctx)
                })
                .unwrap_or(false),
            (None, Some(root)) => self.key_node(root, event),
            (None, None) => false,
        };
        self.finish_dispatch();
        handled
    }

    pub fn handle_scroll(&mut self, event: &ScrollEvent) -> bool {
        let handled = match self.root {
            Some(root) => self.scroll_node(root, event),
            None => false,
        };
        self.finish_dispatch();
        handled
    }

    fn finish_dispatch(&mut self) {
        if let Some(id) = self.outbox.focus_request.take() {
            self.set_focus(Some(id));
        }
    }

    fn mouse_move_node(&mut self, id: WidgetId, event: &MouseEvent) -> bool {
        self.with_node(id, |widget, children| {
            if !widget.base().visible {
                return false;
            }
            let hovered = {
                let mut ctx = EventCtx::new(id, &mut children.tree.outbox);
                widget.handle_mouse_move(event, &mut ctx)
            };
            if !widget.accepts_children() {
                return hovered;
            }
            for &child in children.ids {
                if children.tree.mouse_move_node(child, event) {
                    return true;
                }
            }
            false
        })
        .unwrap_or(false)
    }

    fn mouse_button_node(&mut self, id: WidgetId, event: &MouseEvent) -> bool {
        self.with_node(id, |widget, children| {
            if !widget.base().visible {
                return false;
            }
            let consumed = {
                let mut ctx = EventCtx::new(id, &mut children.tree.outbox);
                widget.handle_mouse_button(event, &mut ctx)
            };
            if consumed {
                return true;
            }
            for &child in children.ids {
                if children.tree.mouse_button_node(child, event) {
                    return true;
                }
            }
            false
        })
        .unwrap_or(false)
    }

    fn key_node(&mut self, id: WidgetId, event: &KeyEvent) -> bool {
        self.with_node(id, |widget, children| {
            if !widget.base().visible {
                return false;
            }
            let consumed = {
                let mut ctx = EventCtx::new(id, &mut children.tree.outbox);
                widget.handle_key(event, &mut ctx)
            };
            if consumed {
                return true;
            }
            for &child in children.ids {
                if children.tree.key_node(child, event) {
                    return true;
                }
            }
            false
        })
        .unwrap_or(false)
    }

    fn scroll_node(&mut self, id: WidgetId, event: &ScrollEvent) -> bool {
        self.with_node(id, |widget, children| {
            if !widget.base().visible {
                return false;
            }
            let mut outbox = std::mem::take(&mut children.tree.outbox);
            let consumed = {
                let mut ctx = EventCtx::new(id, &mut outbox);
                widget.handle_scroll(event, &mut ctx, children)
            };
            children.tree.outbox.messages.append(&mut outbox.messages);
            if outbox.focus_request.is_some() {
                children.tree.outbox.focus_request = outbox.focus_request;
            }
            if consumed {
                return true;
            }
            for &child in children.ids {
                if children.tree.scroll_node(child, event) {
                    return true;
                }
            }
            false
        })
        .unwrap_or(false)
    }

    // --- deferred mutation ---

    /// Apply queued commands in order. Returns true when one of them asked
    /// the host to quit.
    pub fn apply(&mut self, commands: &mut Commands) -> bool {
        let mut quit = false;
        for command in commands.queue.drain(..) {
            let result = match command {
                TreeCommand::AddChild { parent, widget } => {
                    self.add_boxed_child(parent, widget).map(|_| ())
                }
                TreeCommand::Remove(id) => self.remove(id),
                TreeCommand::ClearChildren(id) => self.clear_children(id),
                TreeCommand::SetVisible(id, visible) => self
                    .base_mut(id)
                    .map(|base| base.visible = visible)
                    .ok_or(Error::StaleWidget(id)),
                TreeCommand::SetEnabled(id, enabled) => self
                    .base_mut(id)
                    .map(|base| base.enabled = enabled)
                    .ok_or(Error::StaleWidget(id)),
                TreeCommand::Focus(id) => {
                    self.set_focus(id);
                    Ok(())
                }
                TreeCommand::Update(id, update) => self
                    .widget_mut(id)
                    .map(update)
                    .ok_or(Error::StaleWidget(id)),
                TreeCommand::Quit => {
                    quit = true;
                    Ok(())
                }
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, "dropped command");
            }
        }
        quit
    }
}

/// Size resolution shared by every widget: margin first, then each axis
/// from its spec, with the content hook run at most once
fn measure_widget(widget: &mut dyn Widget, available: Size, children: &mut Children<'_>) -> Size {
    let base = widget.base();
    if !base.visible {
        return Size::ZERO;
    }
    let available = available.shrink(base.style.margin);
    let (width, height, padding) = (base.width, base.height, base.style.padding);

    let content = if width.is_content() || height.is_content() {
        widget.measure_content(available, children)
    } else {
        Size::ZERO
    };
    let size = Size::new(
        width.resolve(available.width, || content.width + padding.horizontal()),
        height.resolve(available.height, || content.height + padding.vertical()),
    );
    widget.base_mut().measured = size;
    size
}

type UpdateFn = Box<dyn FnOnce(&mut (dyn Widget + 'static))>;

/// A structural or state change queued for the start of the next frame
pub enum TreeCommand {
    AddChild { parent: WidgetId, widget: Box<dyn Widget> },
    Remove(WidgetId),
    ClearChildren(WidgetId),
    SetVisible(WidgetId, bool),
    SetEnabled(WidgetId, bool),
    Focus(Option<WidgetId>),
    Update(WidgetId, UpdateFn),
    Quit,
}

/// Queue of tree mutations requested while handling messages
#[derive(Default)]
pub struct Commands {
    queue: Vec<TreeCommand>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: TreeCommand) {
        self.queue.push(command);
    }

    pub fn add_child(&mut self, parent: WidgetId, widget: impl Widget) {
        self.push(TreeCommand::AddChild {
            parent,
            widget: Box::new(widget),
        });
    }

    pub fn remove(&mut self, id: WidgetId) {
        self.push(TreeCommand::Remove(id));
    }

    pub fn clear_children(&mut self, id: WidgetId) {
        self.push(TreeCommand::ClearChildren(id));
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        self.push(TreeCommand::SetVisible(id, visible));
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        self.push(TreeCommand::SetEnabled(id, enabled));
    }

    pub fn focus(&mut self, id: Option<WidgetId>) {
        self.push(TreeCommand::Focus(id));
    }

    /// Mutate a widget of a known type; a type mismatch is logged and
    /// skipped
    pub fn update<T: Widget>(&mut self, id: WidgetId, f: impl FnOnce(&mut T) + 'static) {
        self.push(TreeCommand::Update(
            id,
            Box::new(move |widget| match widget.downcast_mut::<T>() {
                Some(w) => f(w),
                None => tracing::warn!(?id, "update skipped: widget type mismatch"),
            }),
        ));
    }

    pub fn quit(&mut self) {
        self.push(TreeCommand::Quit);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::core::{Key, WidgetExt};
    use crate::layout::{Alignment, SizeSpec};
    use crate::render::{ApproxText, Canvas};
    use crate::widgets::{BoxLayout, Button, Checkbox, Divider, Spacer, Stack, Text, TextInput};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_percent_resolves_after_margin() {
        let mut tree = WidgetTree::new();
        tree.set_root(
            Spacer::flexible()
                .size(SizeSpec::percent(50.0), SizeSpec::percent(25.0))
                .margin(10.0),
        );
        assert_eq!(tree.measure(Size::new(200.0, 100.0)), Size::new(90.0, 20.0));

        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::column().padding(20.0));
        let child = tree
            .add_child(
                root,
                Spacer::flexible()
                    .size(SizeSpec::percent(50.0), SizeSpec::percent(50.0))
                    .margin(10.0),
            )
            .unwrap();
        tree.measure(Size::new(200.0, 100.0));
        assert_eq!(tree.base(child).unwrap().measured_size(), Size::new(70.0, 20.0));
    }

    #[test]
    fn test_percent_over_hundred_is_not_clamped() {
        let mut tree = WidgetTree::new();
        tree.set_root(Spacer::flexible().size(SizeSpec::percent(150.0), SizeSpec::percent(0.0)));
        assert_eq!(tree.measure(Size::new(200.0, 100.0)), Size::new(300.0, 0.0));
    }

    #[test]
    fn test_negative_available_clamps_to_zero() {
        let mut tree = WidgetTree::new();
        tree.set_root(Spacer::flexible().margin(10.0));
        assert_eq!(tree.measure(Size::new(-50.0, -50.0)), Size::ZERO);

        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::column().size(SizeSpec::fill(), SizeSpec::fill()).padding(5.0));
        let text = tree.add_child(root, Text::new("hello")).unwrap();
        assert_eq!(tree.measure(Size::new(-50.0, -50.0)), Size::ZERO);
        tree.layout(Rect::new(0.0, 0.0, 0.0, 0.0));
        let content = tree.base(root).unwrap().content_bounds();
        assert_eq!((content.width, content.height), (0.0, 0.0));
        let t = tree.base(text).unwrap().bounds();
        assert!(t.width >= 0.0 && t.height >= 0.0);
    }

    #[test]
    fn test_welcome_column_layout() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::column().padding(30.0).spacing(15.0));
        let text = tree.add_child(root, Text::new("Welcome")).unwrap();
        let divider = tree.add_child(root, Divider::new()).unwrap();
        let spacer = tree.add_child(root, Spacer::new(10.0)).unwrap();
        let button = tree.add_child(root, Button::new("Click Me")).unwrap();

        let mut canvas = Canvas::new(ApproxText);
        tree.frame(Size::new(500.0, 400.0), &mut canvas);

        let d = tree.base(divider).unwrap().bounds();
        assert!(approx(d.width, 440.0));
        assert!(approx(d.height, 1.0));

        let b = tree.base(button).unwrap().bounds();
        assert!(approx(b.height, 39.6));

        let t = tree.base(text).unwrap().bounds();
        let s = tree.base(spacer).unwrap().bounds();
        assert!(approx(t.y, 30.0));
        assert!(approx(d.y, t.y + t.height + 15.0));
        assert!(approx(s.y, d.y + 1.0 + 15.0));
        assert!(approx(b.y, s.y + 10.0 + 15.0));

        let used = t.height + d.height + s.height + b.height + 3.0 * 15.0;
        assert!(approx(b.y + b.height - 30.0, used));
        assert!(used <= 340.0);
    }

    #[test]
    fn test_invisible_widget_measures_zero_and_paints_nothing() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(
            Button::new("hidden")
                .background(crate::Color::WHITE)
                .visible(false),
        );
        let mut canvas = Canvas::new(ApproxText);
        assert_eq!(tree.measure(Size::new(100.0, 100.0)), Size::ZERO);
        tree.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
        tree.render(&mut canvas);
        assert!(canvas.draw_list().is_empty());
        assert_eq!(tree.base(root).unwrap().measured_size(), Size::ZERO);
    }

    #[test]
    fn test_first_inserted_child_wins_overlapping_press() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(Stack::new().size(SizeSpec::fill(), SizeSpec::fill()));
        let a = tree.add_child(root, Checkbox::new(false)).unwrap();
        let b = tree.add_child(root, Checkbox::new(false)).unwrap();
        tree.frame(Size::new(100.0, 100.0), &mut Canvas::new(ApproxText));

        assert!(tree.handle_mouse_button(&MouseEvent::press(Point::new(5.0, 5.0))));
        assert!(tree.get::<Checkbox>(a).unwrap().is_checked());
        assert!(!tree.get::<Checkbox>(b).unwrap().is_checked());
    }

    #[test]
    fn test_container_click_reaches_children() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::row());
        let button = tree.add_child(root, Button::new("Go")).unwrap();
        tree.frame(Size::new(300.0, 100.0), &mut Canvas::new(ApproxText));

        assert!(tree.handle_mouse_button(&MouseEvent::press(Point::new(5.0, 5.0))));
        let clicked: Vec<_> = tree
            .drain_messages()
            .into_iter()
            .filter(|m| m.kind == MessageKind::Clicked)
            .map(|m| m.source)
            .collect();
        assert_eq!(clicked, vec![root, button]);
    }

    #[test]
    fn test_focus_moves_between_inputs() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::column().spacing(10.0));
        let first = tree.add_child(root, TextInput::new()).unwrap();
        let second = tree.add_child(root, TextInput::new()).unwrap();
        tree.frame(Size::new(300.0, 200.0), &mut Canvas::new(ApproxText));

        let first_center = tree.base(first).unwrap().bounds().center();
        let second_center = tree.base(second).unwrap().bounds().center();

        tree.handle_mouse_button(&MouseEvent::press(first_center));
        assert_eq!(tree.focused(), Some(first));
        tree.handle_key(&KeyEvent::text("hi"));
        assert_eq!(tree.get::<TextInput>(first).unwrap().text(), "hi");

        tree.drain_messages();
        tree.handle_mouse_button(&MouseEvent::press(second_center));
        assert_eq!(tree.focused(), Some(second));
        assert!(!tree.base(first).unwrap().focused());

        let focus: Vec<_> = tree
            .drain_messages()
            .into_iter()
            .filter(|m| matches!(m.kind, MessageKind::Focused(_)))
            .collect();
        assert_eq!(focus[0], Message { source: first, kind: MessageKind::Focused(false) });
        assert_eq!(focus[1], Message { source: second, kind: MessageKind::Focused(true) });
    }

    #[test]
    fn test_press_elsewhere_blurs() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::column().size(SizeSpec::fill(), SizeSpec::fill()));
        let input = tree.add_child(root, TextInput::new()).unwrap();
        tree.frame(Size::new(300.0, 200.0), &mut Canvas::new(ApproxText));

        tree.set_focus(Some(input));
        tree.handle_mouse_button(&MouseEvent::press(Point::new(250.0, 150.0)));
        assert_eq!(tree.focused(), None);
    }

    #[test]
    fn test_keys_without_focus_are_not_consumed_by_inputs() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::column());
        let input = tree.add_child(root, TextInput::new()).unwrap();
        assert!(!tree.handle_key(&KeyEvent::key(Key::Backspace)));
        assert_eq!(tree.get::<TextInput>(input).unwrap().text(), "");
    }

    #[test]
    fn test_stale_ids_and_non_containers() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::column());
        let text = tree.add_child(root, Text::new("x")).unwrap();
        assert!(matches!(tree.add_child(text, Text::new("y")), Err(Error::NotAContainer(_))));

        tree.remove(text).unwrap();
        assert!(tree.get::<Text>(text).is_none());
        assert!(tree.children(root).is_empty());
        assert!(matches!(tree.remove(text), Err(Error::StaleWidget(_))));
    }

    #[test]
    fn test_remove_drops_whole_subtree() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::column());
        let row = tree.add_child(root, BoxLayout::row()).unwrap();
        tree.add_child(row, Text::new("a")).unwrap();
        tree.add_child(row, Text::new("b")).unwrap();
        assert_eq!(tree.len(), 4);
        tree.remove(row).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_commands_apply_in_order() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::column().align(Alignment::Center));
        let label = tree.add_child(root, Text::new("old")).unwrap();

        let mut commands = Commands::new();
        commands.update::<Text>(label, |t| t.set_text("new"));
        commands.add_child(root, Spacer::new(4.0));
        commands.set_visible(label, false);
        assert_eq!(commands.len(), 3);

        assert!(!tree.apply(&mut commands));
        assert!(commands.is_empty());
        assert_eq!(tree.get::<Text>(label).unwrap().text(), "new");
        assert!(!tree.base(label).unwrap().visible);
        assert_eq!(tree.children(root).len(), 2);

        commands.quit();
        assert!(tree.apply(&mut commands));
    }

    #[test]
    fn test_hidden_subtree_is_skipped_by_dispatch() {
        let mut tree = WidgetTree::new();
        let root = tree.set_root(Stack::new().size(SizeSpec::fill(), SizeSpec::fill()));
        let hidden = tree.add_child(root, Checkbox::new(false)).unwrap();
        tree.frame(Size::new(100.0, 100.0), &mut Canvas::new(ApproxText));
        tree.base_mut(hidden).unwrap().visible = false;

        assert!(!tree.handle_mouse_button(&MouseEvent::press(Point::new(5.0, 5.0))));
        assert!(!tree.get::<Checkbox>(hidden).unwrap().is_checked());
    }
}
