//! Input widgets

use crate::core::context::Color;
use crate::core::geometry::{CornerRadius, Padding, Rect, Size};
use crate::core::{
    Children, EventCtx, Key, KeyEvent, MessageKind, MouseButton, MouseEvent, Widget, WidgetBase,
};
use crate::render::Renderer;
use crate::style::TextStyle;

const ACCENT: Color = Color::from_hex(0x3b82f6ff);
const INPUT_BORDER: Color = Color::gray(0.3);

/// Single-line text field. The cursor counts characters, not bytes.
pub struct TextInput {
    base: WidgetBase,
    value: String,
    placeholder: String,
    text: TextStyle,
    cursor: usize,
    max_length: Option<usize>,
    password: bool,
}

impl TextInput {
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.style.padding = Padding::only(8.0, 12.0, 8.0, 12.0);
        base.style.background = Color::gray(0.1);
        base.style.border_color = INPUT_BORDER;
        base.style.border_width = 1.0;
        base.style.border_radius = CornerRadius::all(4.0);
        Self {
            base,
            value: String::new(),
            placeholder: String::new(),
            text: TextStyle::default(),
            cursor: 0,
            max_length: None,
            password: false,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Initial value; the cursor moves to its end
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.set_text(value);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn password(mut self, password: bool) -> Self {
        self.password = password;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.text.font_size = size;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text.color = color;
        self
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Text as drawn: masked in password mode
    fn display(&self, upto: Option<usize>) -> String {
        let count = upto.unwrap_or_else(|| self.len());
        if self.password {
            "•".repeat(count)
        } else {
            self.value.chars().take(count).collect()
        }
    }

    /// Insert at the cursor, truncated to the remaining capacity. Returns
    /// false when nothing was inserted.
    fn insert(&mut self, text: &str) -> bool {
        let room = self
            .max_length
            .map_or(usize::MAX, |max| max.saturating_sub(self.len()));
        let insert: String = text.chars().filter(|c| !c.is_control()).take(room).collect();
        if insert.is_empty() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, &insert);
        self.cursor += insert.chars().count();
        true
    }

    fn remove_at(&mut self, char_index: usize) {
        let at = self.byte_index(char_index);
        self.value.remove(at);
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextInput {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn measure_content(&mut self, _available: Size, _children: &mut Children<'_>) -> Size {
        Size::new(200.0, self.text.font_size * 1.5)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let mut style = self.base.style.clone();
        if self.base.focused() {
            style.border_color = ACCENT;
            style.border_width = 2.0;
        }
        style.paint(self.base.bounds(), renderer);

        let content = self.base.content_bounds();
        let font = renderer.load_font_face(&self.text.font_family, self.text.font_size, self.text.face());
        if self.value.is_empty() {
            let color = self.text.color.with_alpha(0.5);
            renderer.draw_text(&self.placeholder, content.top_left(), font, color, &self.text);
        } else {
            renderer.draw_text(&self.display(None), content.top_left(), font, self.text.color, &self.text);
        }

        if self.base.focused() {
            let before = renderer.measure_text(font, &self.display(Some(self.cursor)));
            let caret = Rect::new(
                content.x + before.width,
                content.y + 2.0,
                2.0,
                (content.height - 4.0).max(0.0),
            );
            renderer.draw_rect(caret, self.text.color);
        }
    }

    fn handle_mouse_button(&mut self, event: &MouseEvent, ctx: &mut EventCtx) -> bool {
        let clicked = self.base.click(event, ctx);
        if clicked {
            ctx.request_focus();
        }
        clicked
    }

    /// Consumes every key while focused
    fn handle_key(&mut self, event: &KeyEvent, ctx: &mut EventCtx) -> bool {
        if !self.base.focused() {
            return false;
        }
        if !event.pressed {
            return true;
        }
        match event.named() {
            Key::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at(self.cursor);
                    ctx.emit(MessageKind::TextChanged(self.value.clone()));
                }
            }
            Key::Delete => {
                if self.cursor < self.len() {
                    self.remove_at(self.cursor);
                    ctx.emit(MessageKind::TextChanged(self.value.clone()));
                }
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.len()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.len(),
            Key::Enter => ctx.emit(MessageKind::Submitted(self.value.clone())),
            _ => {
                if !event.text.is_empty() && self.insert(&event.text) {
                    ctx.emit(MessageKind::TextChanged(self.value.clone()));
                }
            }
        }
        true
    }
}

/// Toggle box; flips on a left press inside its bounds
pub struct Checkbox {
    base: WidgetBase,
    checked: bool,
    check_color: Color,
}

impl Checkbox {
    pub fn new(checked: bool) -> Self {
        let mut base = WidgetBase::new();
        base.style.background = Color::gray(0.2);
        base.style.border_color = Color::gray(0.4);
        base.style.border_width = 1.0;
        base.style.border_radius = CornerRadius::all(3.0);
        Self {
            base,
            checked,
            check_color: Color::WHITE,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn check_color(mut self, color: Color) -> Self {
        self.check_color = color;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Widget for Checkbox {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn measure_content(&mut self, _available: Size, _children: &mut Children<'_>) -> Size {
        Size::new(20.0, 20.0)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let background = if self.checked { ACCENT } else { Color::gray(0.2) };
        let style = self.base.style.clone().background(background);
        style.paint(self.base.bounds(), renderer);

        if self.checked {
            let c = self.base.content_bounds().center();
            renderer.draw_rect(Rect::new(c.x - 5.0, c.y - 1.0, 10.0, 2.0), self.check_color);
            renderer.draw_rect(Rect::new(c.x - 1.0, c.y - 5.0, 2.0, 10.0), self.check_color);
        }
    }

    fn handle_mouse_button(&mut self, event: &MouseEvent, ctx: &mut EventCtx) -> bool {
        if !self.base.enabled {
            return false;
        }
        if event.pressed && event.button == MouseButton::Left && self.base.bounds().contains(event.position) {
            self.checked = !self.checked;
            ctx.emit(MessageKind::Toggled(self.checked));
            return true;
        }
        false
    }
}

/// Horizontal value slider. The value follows the pointer from the press
/// until the release.
pub struct Slider {
    base: WidgetBase,
    min: f32,
    max: f32,
    value: f32,
    fill_color: Color,
    thumb_color: Color,
    dragging: bool,
}

impl Slider {
    pub fn new(min: f32, max: f32, value: f32) -> Self {
        let mut base = WidgetBase::new();
        base.style.background = Color::gray(0.2);
        base.style.border_radius = CornerRadius::all(3.0);
        Self {
            base,
            min,
            max,
            value: clamp_between(value, min, max),
            fill_color: Color::from_hex(0x60a5faff),
            thumb_color: ACCENT,
            dragging: false,
        }
    }

    pub fn range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self.value = clamp_between(self.value, min, max);
        self
    }

    pub fn value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    pub fn track_color(mut self, color: Color) -> Self {
        self.base.style.background = color;
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn thumb_color(mut self, color: Color) -> Self {
        self.thumb_color = color;
        self
    }

    pub fn get_value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = clamp_between(value, self.min, self.max);
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Value for a pointer x coordinate, clamped to the range
    pub fn value_at(&self, x: f32) -> f32 {
        let bounds = self.base.bounds();
        if bounds.width <= 0.0 {
            return self.min;
        }
        let t = (x - bounds.x) / bounds.width;
        clamp_between(self.min + t * (self.max - self.min), self.min, self.max)
    }

    fn update(&mut self, x: f32, ctx: &mut EventCtx) {
        self.value = self.value_at(x);
        ctx.emit(MessageKind::ValueChanged(self.value));
    }

    fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 { 0.0 } else { (self.value - self.min) / span }
    }
}

/// Clamp into the range spanned by `a` and `b`, whichever order they come in
fn clamp_between(value: f32, a: f32, b: f32) -> f32 {
    value.max(a.min(b)).min(a.max(b))
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.5)
    }
}

impl Widget for Slider {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn measure_content(&mut self, _available: Size, _children: &mut Children<'_>) -> Size {
        Size::new(200.0, 20.0)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.base.paint(renderer);
        let content = self.base.content_bounds();
        let fill = self.fraction() * content.width;
        renderer.draw_rounded_rect(
            Rect::new(content.x, content.y, fill, content.height),
            self.base.style.border_radius,
            self.fill_color,
        );
        let thumb = Rect::new(content.x + fill - 8.0, content.y - 5.0, 16.0, content.height + 10.0);
        renderer.draw_rounded_rect(thumb, CornerRadius::all(8.0), self.thumb_color);
    }

    fn handle_mouse_button(&mut self, event: &MouseEvent, ctx: &mut EventCtx) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        if !event.pressed {
            self.dragging = false;
            return false;
        }
        if self.base.enabled && self.base.bounds().contains(event.position) {
            self.dragging = true;
            self.update(event.position.x, ctx);
            return true;
        }
        false
    }

    fn handle_mouse_move(&mut self, event: &MouseEvent, ctx: &mut EventCtx) -> bool {
        self.base.track_hover(event.position, ctx);
        if self.dragging {
            self.update(event.position.x, ctx);
            return true;
        }
        false
    }
}
