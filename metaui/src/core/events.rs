//! Input events consumed by the widget tree and messages it emits

use crate::core::geometry::{Point, Size};
use crate::core::WidgetId;

/// Pointer motion or button event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub position: Point,
    /// Motion since the previous pointer event
    pub delta: Point,
    pub button: MouseButton,
    pub pressed: bool,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn moved(position: Point) -> Self {
        Self {
            position,
            delta: Point::ZERO,
            button: MouseButton::Left,
            pressed: false,
            modifiers: Modifiers::default(),
        }
    }

    pub fn press(position: Point) -> Self {
        Self { pressed: true, ..Self::moved(position) }
    }

    pub fn release(position: Point) -> Self {
        Self::moved(position)
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

/// Keyboard event. `keycode` uses Linux evdev numbering.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    pub keycode: u32,
    pub keysym: u32,
    pub pressed: bool,
    pub modifiers: Modifiers,
    /// Text produced by the key press, already decoded by the host
    pub text: String,
}

impl KeyEvent {
    pub fn key(key: Key) -> Self {
        Self {
            keycode: key.evdev_code(),
            keysym: 0,
            pressed: true,
            modifiers: Modifiers::default(),
            text: String::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            keycode: 0,
            keysym: 0,
            pressed: true,
            modifiers: Modifiers::default(),
            text: text.into(),
        }
    }

    pub fn released(mut self) -> Self {
        self.pressed = false;
        self
    }

    /// Named key for the event's keycode
    pub fn named(&self) -> Key {
        Key::from_evdev(self.keycode)
    }
}

/// Wheel or touchpad scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub position: Point,
    pub delta_x: f32,
    pub delta_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,  // Super/Cmd
}

/// Keys the widgets care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape, Tab, Enter, Backspace, Delete,
    Up, Down, Left, Right,
    Home, End, PageUp, PageDown,
    Unknown,
}

impl Key {
    const TABLE: [(Key, u32); 13] = [
        (Key::Escape, 1),
        (Key::Backspace, 14),
        (Key::Tab, 15),
        (Key::Enter, 28),
        (Key::Home, 102),
        (Key::Up, 103),
        (Key::PageUp, 104),
        (Key::Left, 105),
        (Key::Right, 106),
        (Key::End, 107),
        (Key::Down, 108),
        (Key::PageDown, 109),
        (Key::Delete, 111),
    ];

    pub fn from_evdev(code: u32) -> Key {
        Self::TABLE
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(k, _)| *k)
            .unwrap_or(Key::Unknown)
    }

    pub fn evdev_code(self) -> u32 {
        Self::TABLE
            .iter()
            .find(|(k, _)| *k == self)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

/// Event produced by the host and routed through the tree
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseMove(MouseEvent),
    MouseButton(MouseEvent),
    Key(KeyEvent),
    Scroll(ScrollEvent),
    Resize(Size),
}

/// Notification emitted by a widget, consumed by the host after dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub source: WidgetId,
    pub kind: MessageKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageKind {
    Clicked,
    Hovered(bool),
    Focused(bool),
    TextChanged(String),
    Submitted(String),
    ValueChanged(f32),
    Toggled(bool),
    Scrolled { offset: f32 },
}
